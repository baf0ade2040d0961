use super::config::AssemblyConfig;
use crate::core::models::experiment::AssemblyInput;
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Plate limit has to be greater than 0!")]
    PlateLimit,

    #[error("Invalid plate size specified: {0} (expected 96 or 384)")]
    PlateSize(u32),

    #[error("Reagents not unique.")]
    DuplicateReagents,

    #[error("Experiment(s) contain duplicate samples.")]
    DuplicateSamples,

    #[error("Samples/reagents/replicates lengths mismatch! ({samples}/{reagents}/{replicates})")]
    LengthMismatch {
        samples: usize,
        reagents: usize,
        replicates: usize,
    },

    #[error("Not enough plates! {required} wells required, {available} available.")]
    InsufficientCapacity { required: usize, available: usize },

    #[error("Experiment(s) declare zero replicates.")]
    ZeroReplicates,

    #[error("Experiment(s) declare reagents without any samples.")]
    EmptySamples,
}

/// Every problem found in one pass over the inputs, in check order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: Vec<ValidationError>,
}

impl ValidationReport {
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn contains(&self, error: &ValidationError) -> bool {
        self.errors.contains(error)
    }

    /// Human-readable messages, one per error.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for error in &self.errors {
            writeln!(f, "> {}", error)?;
        }
        Ok(())
    }
}

impl IntoIterator for ValidationReport {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

/// Checks the raw inputs before any plate is allocated.
///
/// All checks run; none short-circuits the others. An empty report means the
/// inputs are accepted.
pub fn validate(input: &AssemblyInput, config: &AssemblyConfig) -> ValidationReport {
    let mut report = ValidationReport::default();

    if config.plate_limit == 0 {
        report.push(ValidationError::PlateLimit);
    }

    if config.geometry().is_none() {
        report.push(ValidationError::PlateSize(config.plate_size));
    }

    if !reagents_unique(input) {
        report.push(ValidationError::DuplicateReagents);
    }

    if !samples_unique(input) {
        report.push(ValidationError::DuplicateSamples);
    }

    if input.lengths_match() {
        if config.enforce_capacity && config.plate_limit > 0 {
            if let Some(available) = config.available_wells() {
                let required = input.required_wells();
                if required > available {
                    report.push(ValidationError::InsufficientCapacity {
                        required,
                        available,
                    });
                }
            }
        }
    } else {
        report.push(ValidationError::LengthMismatch {
            samples: input.samples.len(),
            reagents: input.reagents.len(),
            replicates: input.replicates.len(),
        });
    }

    if input.replicates.iter().any(|&r| r == 0) {
        report.push(ValidationError::ZeroReplicates);
    }

    if input
        .experiments()
        .any(|exp| exp.samples.is_empty() && !exp.reagents.is_empty())
    {
        report.push(ValidationError::EmptySamples);
    }

    report
}

fn reagents_unique(input: &AssemblyInput) -> bool {
    let mut seen = HashSet::new();
    input.reagents.iter().flatten().all(|r| seen.insert(r))
}

fn samples_unique(input: &AssemblyInput) -> bool {
    input.samples.iter().all(|samples| {
        let mut seen = HashSet::with_capacity(samples.len());
        samples.iter().all(|s| seen.insert(s))
    })
}
