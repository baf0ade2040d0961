use crate::core::models::experiment::AssemblyInput;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid experiment manifest: {0}")]
    Parse(#[from] toml::de::Error),
}

/// One `[[experiment]]` table of a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExperimentEntry {
    pub samples: Vec<String>,
    pub reagents: Vec<String>,
    pub replicates: usize,
}

/// A TOML list of experiments.
///
/// ```toml
/// [[experiment]]
/// samples = ["Sample-1", "Sample-2"]
/// reagents = ["<Pink>", "<Green>"]
/// replicates = 1
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExperimentManifest {
    #[serde(rename = "experiment", default)]
    pub experiments: Vec<ExperimentEntry>,
}

impl ExperimentManifest {
    pub fn parse(content: &str) -> Result<Self, ManifestError> {
        Ok(toml::from_str(content)?)
    }

    pub fn read_from_path(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let manifest = Self::parse(&content)?;
        debug!(
            path = %path.display(),
            experiments = manifest.experiments.len(),
            "Loaded experiment manifest."
        );
        Ok(manifest)
    }

    /// Converts the manifest into the index-correlated form used by the engine.
    pub fn into_input(self) -> AssemblyInput {
        self.experiments
            .into_iter()
            .fold(AssemblyInput::default(), |input, exp| {
                input.with_experiment(exp.samples, exp.reagents, exp.replicates)
            })
    }
}

impl From<ExperimentManifest> for AssemblyInput {
    fn from(manifest: ExperimentManifest) -> Self {
        manifest.into_input()
    }
}
