use super::{assemble_layout, report_unplaced};
use crate::cli::{AssembleArgs, OutputFormat};
use crate::error::Result;
use crate::ui::UiEvent;
use crate::utils::palette::Palette;
use crate::utils::render;
use platemap::core::io::export;
use platemap::workflows::project::PlateLayout;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use tokio::sync::mpsc;
use tracing::info;

#[derive(Serialize)]
struct ColoredRecord<'a> {
    plate: usize,
    row: usize,
    column: usize,
    well: String,
    sample: &'a str,
    reagent: &'a str,
    color: String,
}

pub async fn run(args: AssembleArgs, ui_sender: mpsc::Sender<UiEvent>) -> Result<()> {
    println!("Starting plate assembly...");
    let layout = assemble_layout(&args.layout, ui_sender)?;

    info!(
        plates = layout.plate_count(),
        empty = layout.empty_plates(),
        unplaced = layout.unplaced.len(),
        "Assembly finished."
    );
    report_unplaced(&layout);

    match &args.output {
        Some(path) => {
            info!("Writing {:?} layout to {:?}", args.format, path);
            let mut writer = BufWriter::new(File::create(path)?);
            write_layout(&layout, args.format, &mut writer)?;
            writer.flush()?;
            println!("✓ Layout written to: {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write_layout(&layout, args.format, &mut writer)?;
            writer.flush()?;
        }
    }

    Ok(())
}

pub(crate) fn write_layout<W: Write>(
    layout: &PlateLayout,
    format: OutputFormat,
    writer: &mut W,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, &layout.plates)?;
            writeln!(writer)?;
        }
        OutputFormat::Csv => {
            let mut palette = Palette::new();
            let mut wtr = csv::Writer::from_writer(writer);
            for record in export::records(layout) {
                let color = palette.color_for(record.reagent).to_string();
                wtr.serialize(ColoredRecord {
                    plate: record.plate,
                    row: record.row,
                    column: record.column,
                    well: record.well,
                    sample: record.sample,
                    reagent: record.reagent,
                    color,
                })?;
            }
            wtr.flush()?;
        }
        OutputFormat::Text => {
            writer.write_all(render::text_dump(layout).as_bytes())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use platemap::core::models::experiment::AssemblyInput;
    use platemap::engine::config::AssemblyConfigBuilder;
    use platemap::engine::progress::ProgressReporter;
    use platemap::workflows::{assemble, project};

    fn layout() -> PlateLayout {
        let input = AssemblyInput::default()
            .with_experiment(["S1", "S2"], ["<Pink>", "<Zeta>"], 1);
        let config = AssemblyConfigBuilder::new()
            .plate_size(96)
            .plate_limit(1)
            .build()
            .unwrap();
        let result = assemble::run(&input, &config, &ProgressReporter::new()).unwrap();
        project::project(&result)
    }

    fn render(format: OutputFormat) -> String {
        let mut out = Vec::new();
        write_layout(&layout(), format, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn json_output_is_plate_row_column_matrix() {
        let value: serde_json::Value = serde_json::from_str(&render(OutputFormat::Json)).unwrap();
        let plates = value.as_array().unwrap();
        assert_eq!(plates.len(), 1);
        assert_eq!(plates[0].as_array().unwrap().len(), 8);
        assert_eq!(plates[0][0].as_array().unwrap().len(), 12);
        assert_eq!(plates[0][0][0], serde_json::json!(["S1", "<Pink>"]));
        assert_eq!(plates[0][1][1], serde_json::json!(["S2", "<Zeta>"]));
        assert!(plates[0][0][2].is_null());
    }

    #[test]
    fn csv_output_adds_color_column() {
        let text = render(OutputFormat::Csv);
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("plate,row,column,well,sample,reagent,color")
        );
        assert_eq!(lines.next(), Some("1,0,0,A1,S1,<Pink>,#FFC0CB"));
        assert_eq!(text.lines().count(), 5);
    }

    #[test]
    fn text_output_uses_bracketed_listing() {
        let text = render(OutputFormat::Text);
        assert!(text.starts_with("result = [\n"));
        assert!(text.contains("['S1', '<Pink>'], ['S1', '<Zeta>'], null, "));
    }
}
