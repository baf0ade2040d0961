use crate::core::models::geometry::PlateGeometry;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyConfig {
    /// Raw well-count selector. Only `96` and `384` pass validation.
    pub plate_size: u32,
    /// Number of plates allocated up front.
    pub plate_limit: usize,
    /// Reject inputs whose total well demand exceeds `plate_limit` plates.
    pub enforce_capacity: bool,
}

impl AssemblyConfig {
    pub fn geometry(&self) -> Option<PlateGeometry> {
        PlateGeometry::from_well_count(self.plate_size)
    }

    /// Total wells across all plates, when the plate size is supported.
    pub fn available_wells(&self) -> Option<usize> {
        self.geometry()
            .map(|g| g.size().saturating_mul(self.plate_limit))
    }
}

pub struct AssemblyConfigBuilder {
    plate_size: Option<u32>,
    plate_limit: Option<usize>,
    enforce_capacity: bool,
}

impl Default for AssemblyConfigBuilder {
    fn default() -> Self {
        Self {
            plate_size: None,
            plate_limit: None,
            enforce_capacity: true,
        }
    }
}

impl AssemblyConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plate_size(mut self, wells: u32) -> Self {
        self.plate_size = Some(wells);
        self
    }
    pub fn plate_limit(mut self, plates: usize) -> Self {
        self.plate_limit = Some(plates);
        self
    }
    pub fn enforce_capacity(mut self, enforce: bool) -> Self {
        self.enforce_capacity = enforce;
        self
    }

    pub fn build(self) -> Result<AssemblyConfig, ConfigError> {
        Ok(AssemblyConfig {
            plate_size: self
                .plate_size
                .ok_or(ConfigError::MissingParameter("plate_size"))?,
            plate_limit: self
                .plate_limit
                .ok_or(ConfigError::MissingParameter("plate_limit"))?,
            enforce_capacity: self.enforce_capacity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_requires_plate_size_and_limit() {
        let missing_size = AssemblyConfigBuilder::new().plate_limit(2).build();
        assert_eq!(missing_size, Err(ConfigError::MissingParameter("plate_size")));

        let missing_limit = AssemblyConfigBuilder::new().plate_size(96).build();
        assert_eq!(missing_limit, Err(ConfigError::MissingParameter("plate_limit")));
    }

    #[test]
    fn builder_enforces_capacity_by_default() {
        let config = AssemblyConfigBuilder::new()
            .plate_size(384)
            .plate_limit(17)
            .build()
            .unwrap();
        assert!(config.enforce_capacity);
        assert_eq!(config.geometry(), Some(PlateGeometry::Wells384));
        assert_eq!(config.available_wells(), Some(384 * 17));
    }

    #[test]
    fn unsupported_plate_size_has_no_geometry() {
        let config = AssemblyConfigBuilder::new()
            .plate_size(100)
            .plate_limit(1)
            .enforce_capacity(false)
            .build()
            .unwrap();
        assert!(!config.enforce_capacity);
        assert!(config.geometry().is_none());
        assert!(config.available_wells().is_none());
    }
}
