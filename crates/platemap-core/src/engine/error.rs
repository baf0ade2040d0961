use super::validation::ValidationReport;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Fix the following error(s) before proceeding:\n{0}")]
    InvalidInput(ValidationReport),

    #[error("Internal logic error: {0}")]
    Internal(String),
}
