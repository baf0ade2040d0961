use serde::Serialize;
use std::fmt;

/// The two supported microtiter plate formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PlateGeometry {
    /// 8 rows × 12 columns.
    Wells96,
    /// 16 rows × 24 columns.
    Wells384,
}

impl PlateGeometry {
    /// Resolves a well-count selector (`96` or `384`) into a geometry.
    pub fn from_well_count(wells: u32) -> Option<Self> {
        match wells {
            96 => Some(Self::Wells96),
            384 => Some(Self::Wells384),
            _ => None,
        }
    }

    pub const fn rows(self) -> usize {
        match self {
            Self::Wells96 => 8,
            Self::Wells384 => 16,
        }
    }

    pub const fn columns(self) -> usize {
        match self {
            Self::Wells96 => 12,
            Self::Wells384 => 24,
        }
    }

    pub const fn size(self) -> usize {
        self.rows() * self.columns()
    }
}

impl fmt::Display for PlateGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-well", self.size())
    }
}
