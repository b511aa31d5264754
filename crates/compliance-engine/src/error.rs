use shared_types::RuleSetError;
use thiserror::Error;

use crate::extractors::ExtractionError;

/// Errors surfaced by [`crate::ComplianceEngine`]
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Checklist document is empty or contains no extractable text")]
    EmptyChecklist,

    #[error("Invalid checklist: {0}")]
    InvalidChecklist(#[from] RuleSetError),
}
