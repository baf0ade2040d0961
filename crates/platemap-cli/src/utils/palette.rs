use platemap::core::models::well::REAGENT_DELIMITER;
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::collections::HashMap;
use std::fmt;

const PALETTE_SEED: u64 = 0x5EED_96_384;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// Fixed colours for the known reagent category codes.
fn known_color(code: char) -> Option<Rgb> {
    let rgb = match code {
        'B' => Rgb(173, 216, 230), // light blue
        'Y' => Rgb(255, 255, 0),
        'G' => Rgb(144, 238, 144), // light green
        'V' => Rgb(238, 130, 238),
        'P' => Rgb(255, 192, 203),
        'W' => Rgb(255, 255, 255),
        'C' => Rgb(0, 255, 255),
        'K' => Rgb(244, 164, 96), // sandy brown
        'O' => Rgb(255, 165, 0),
        'N' => Rgb(255, 69, 0), // orange red
        'M' => Rgb(0, 0, 255),
        'T' => Rgb(64, 224, 208),
        _ => return None,
    };
    Some(rgb)
}

/// The category code of a reagent: the first character after its first `<`.
///
/// Reagents without the delimiter, or with nothing after it, have no code and
/// share a single generated colour.
pub fn category_code(reagent: &str) -> Option<char> {
    reagent
        .split_once(REAGENT_DELIMITER)
        .and_then(|(_, rest)| rest.chars().next())
}

/// Assigns display colours to reagents by category code.
///
/// Unknown codes draw a colour from a seeded generator the first time they are
/// seen and keep it for the rest of the run.
pub struct Palette {
    rng: StdRng,
    assigned: HashMap<Option<char>, Rgb>,
}

impl Palette {
    pub fn new() -> Self {
        Self::with_seed(PALETTE_SEED)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            assigned: HashMap::new(),
        }
    }

    pub fn color_for(&mut self, reagent: &str) -> Rgb {
        let code = category_code(reagent);
        if let Some(rgb) = code.and_then(known_color) {
            return rgb;
        }
        let rng = &mut self.rng;
        *self
            .assigned
            .entry(code)
            .or_insert_with(|| Rgb(rng.r#gen(), rng.r#gen(), rng.r#gen()))
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_code_skips_leading_delimiter() {
        assert_eq!(category_code("<Pink>"), Some('P'));
        assert_eq!(category_code("Dye<Teal>"), Some('T'));
        assert_eq!(category_code("Blue"), None);
        assert_eq!(category_code("<"), None);
        assert_eq!(category_code(""), None);
    }

    #[test]
    fn reagents_without_delimiter_share_one_generated_color() {
        let mut palette = Palette::new();
        let blue = palette.color_for("Blue");
        assert_ne!(blue, Rgb(173, 216, 230));
        assert_eq!(palette.color_for("Green"), blue);
        assert_eq!(palette.color_for("<"), blue);
    }

    #[test]
    fn known_codes_get_fixed_colors() {
        let mut palette = Palette::new();
        assert_eq!(palette.color_for("<Blue>"), Rgb(173, 216, 230));
        assert_eq!(palette.color_for("<Turquoise>"), Rgb(64, 224, 208));
        assert_eq!(palette.color_for("<Noon>"), Rgb(255, 69, 0));
        assert_eq!(palette.color_for("<Kiwi>").to_string(), "#F4A460");
    }

    #[test]
    fn unknown_codes_are_memoized() {
        let mut palette = Palette::new();
        let first = palette.color_for("<Zeta>");
        palette.color_for("<Xray>");
        assert_eq!(palette.color_for("<Zulu>"), first);
    }

    #[test]
    fn same_seed_gives_same_colors() {
        let mut a = Palette::with_seed(7);
        let mut b = Palette::with_seed(7);
        for reagent in ["<Zeta>", "<Dye>", "<Reagent-A>"] {
            assert_eq!(a.color_for(reagent), b.color_for(reagent));
        }
    }
}
