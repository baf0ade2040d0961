use crate::core::models::well::WellCoord;
use crate::workflows::project::PlateLayout;
use serde::Serialize;
use std::io::Write;

/// One occupied well as written to CSV.
///
/// `plate` is 1-based; `row` and `column` are 0-based matrix indices and `well`
/// is the conventional lab name (`A1`, `B12`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WellRecord<'a> {
    pub plate: usize,
    pub row: usize,
    pub column: usize,
    pub well: String,
    pub sample: &'a str,
    pub reagent: &'a str,
}

/// Occupied wells of `layout` in plate, then row-major order.
pub fn records(layout: &PlateLayout) -> impl Iterator<Item = WellRecord<'_>> {
    layout.plates.iter().enumerate().flat_map(|(plate, rows)| {
        rows.iter().enumerate().flat_map(move |(row, wells)| {
            wells.iter().enumerate().filter_map(move |(column, well)| {
                well.as_ref().map(|assignment| WellRecord {
                    plate: plate + 1,
                    row,
                    column,
                    well: WellCoord::new(column, row).name(),
                    sample: assignment.sample(),
                    reagent: assignment.reagent(),
                })
            })
        })
    })
}

/// Writes every occupied well of `layout` as CSV with a header row.
pub fn write_csv<W: Write>(layout: &PlateLayout, writer: W) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    for record in records(layout) {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}
