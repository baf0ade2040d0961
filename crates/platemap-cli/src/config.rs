mod defaults;

use crate::cli::LayoutArgs;
use crate::error::{CliError, Result};
use defaults::DefaultsConfig;
use platemap::engine::config::{AssemblyConfig, AssemblyConfigBuilder};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialPlateConfig {
    size: Option<u32>,
    limit: Option<usize>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialPlacementConfig {
    #[serde(rename = "enforce-capacity")]
    enforce_capacity: Option<bool>,
}

/// Assembly settings as read from a configuration file; every key is optional.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialAssemblyConfig {
    plate: Option<PartialPlateConfig>,
    placement: Option<PartialPlacementConfig>,
}

impl PartialAssemblyConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Loads `path` when given, otherwise starts from an empty configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Resolves the final settings: `-S` values, then dedicated flags, then the
    /// file, then built-in defaults.
    pub fn merge_with_cli(mut self, args: &LayoutArgs) -> Result<AssemblyConfig> {
        let defaults = DefaultsConfig::default();
        let from_set = Self::from_set_values(&args.set_values)?;

        let file_plate = self.plate.take().unwrap_or_default();
        let file_placement = self.placement.take().unwrap_or_default();
        let set_plate = from_set.plate.unwrap_or_default();
        let set_placement = from_set.placement.unwrap_or_default();

        let plate_size = set_plate
            .size
            .or(args.plate_size)
            .or(file_plate.size)
            .unwrap_or(defaults.plate_size);
        let plate_limit = set_plate
            .limit
            .or(args.plate_limit)
            .or(file_plate.limit)
            .unwrap_or(defaults.plate_limit);
        let enforce_capacity = set_placement
            .enforce_capacity
            .or(args.no_capacity_check.then_some(false))
            .or(file_placement.enforce_capacity)
            .unwrap_or(defaults.enforce_capacity);

        debug!(
            plate_size,
            plate_limit, enforce_capacity, "Resolved assembly configuration."
        );

        AssemblyConfigBuilder::new()
            .plate_size(plate_size)
            .plate_limit(plate_limit)
            .enforce_capacity(enforce_capacity)
            .build()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    fn from_set_values(set_values: &[String]) -> Result<Self> {
        let mut overrides = Self::default();
        overrides.apply_set_values(set_values)?;
        Ok(overrides)
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };

            match key {
                "plate.size" => {
                    self.plate.get_or_insert_with(Default::default).size =
                        Some(value_str.parse().map_err(|_| {
                            CliError::Config(format!(
                                "Invalid integer value for {}: {}",
                                key, value_str
                            ))
                        })?);
                }
                "plate.limit" => {
                    self.plate.get_or_insert_with(Default::default).limit =
                        Some(value_str.parse().map_err(|_| {
                            CliError::Config(format!(
                                "Invalid integer value for {}: {}",
                                key, value_str
                            ))
                        })?);
                }
                "placement.enforce-capacity" => {
                    self.placement
                        .get_or_insert_with(Default::default)
                        .enforce_capacity = Some(value_str.parse().map_err(|_| {
                        CliError::Config(format!(
                            "Invalid boolean value for {}: {}",
                            key, value_str
                        ))
                    })?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}
