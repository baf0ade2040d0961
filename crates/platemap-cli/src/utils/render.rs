use super::palette::Palette;
use platemap::core::models::well::WellCoord;
use platemap::workflows::project::PlateLayout;
use std::fmt::Write;

/// Renders the layout as a bracketed listing, one commented block per plate.
///
/// Occupied wells print as `['sample', 'reagent']`, empty ones as `null`.
pub fn text_dump(layout: &PlateLayout) -> String {
    let mut out = String::from("result = [\n");
    for (index, plate) in layout.plates.iter().enumerate() {
        out.push_str("  [\n");
        for row in plate {
            out.push_str("    [");
            for well in row {
                match well {
                    Some(a) => {
                        let _ = write!(out, "['{}', '{}'], ", a.sample(), a.reagent());
                    }
                    None => out.push_str("null, "),
                }
            }
            out.push_str("]\n");
        }
        let _ = writeln!(out, "  ], #Plate {}\n", index + 1);
    }
    out.push_str("]\n");
    out
}

/// Walks the occupied plates of a layout one page at a time.
///
/// Empty plates are not pages. The current page is always clamped to the
/// available range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    pages: Vec<usize>,
    total_plates: usize,
    empty_plates: usize,
    current: usize,
}

impl Pager {
    pub fn new(layout: &PlateLayout) -> Self {
        Self {
            pages: layout.occupied_plates(),
            total_plates: layout.plate_count(),
            empty_plates: layout.empty_plates(),
            current: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Zero-based index of the current page.
    pub fn current(&self) -> usize {
        self.current
    }

    /// Plate index shown on the current page.
    pub fn plate(&self) -> Option<usize> {
        self.pages.get(self.current).copied()
    }

    /// Moves to `page` (zero-based), clamped into `[0, pages - 1]`.
    /// Returns whether the current page changed.
    pub fn go_to(&mut self, page: usize) -> bool {
        let clamped = page.min(self.pages.len().saturating_sub(1));
        let changed = clamped != self.current;
        self.current = clamped;
        changed
    }

    pub fn title(&self) -> String {
        let mut title = format!("Results page {}/{}", self.current + 1, self.total_plates);
        if self.empty_plates > 0 {
            let _ = write!(title, "    ({} plates are empty...)", self.empty_plates);
        }
        title
    }
}

/// Renders one plate as a labelled grid of sample names with a reagent legend.
pub fn plate_grid(layout: &PlateLayout, plate: usize, palette: &mut Palette) -> String {
    let Some(matrix) = layout.plates.get(plate) else {
        return String::new();
    };

    let width = matrix
        .iter()
        .flatten()
        .flatten()
        .map(|a| a.sample().chars().count())
        .max()
        .unwrap_or(0)
        .max(3);
    let columns = matrix.first().map_or(0, Vec::len);

    let mut out = String::new();
    let _ = write!(out, "{:>3} ", "");
    for column in 1..=columns {
        let _ = write!(out, "| {:^width$} ", column, width = width);
    }
    out.push_str("|\n");

    let mut legend: Vec<&str> = Vec::new();
    for (row, wells) in matrix.iter().enumerate() {
        let _ = write!(out, "{:>3} ", WellCoord::new(0, row).row_name());
        for well in wells {
            let text = match well {
                Some(a) => {
                    if !legend.contains(&a.reagent()) {
                        legend.push(a.reagent());
                    }
                    a.sample()
                }
                None => ".",
            };
            let _ = write!(out, "| {:^width$} ", text, width = width);
        }
        out.push_str("|\n");
    }

    if !legend.is_empty() {
        out.push_str("\nReagents:\n");
        for reagent in legend {
            let _ = writeln!(out, "  {}  {}", palette.color_for(reagent), reagent);
        }
    }
    out
}
