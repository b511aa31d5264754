//! Extraction collaborators
//!
//! The engine talks to the extraction oracle only through [`SiteExtractor`].
//! Live model transports live outside this crate; here are the deterministic
//! implementations used for demos, replays and tests.

pub mod mock;
pub mod replay;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub use mock::MockExtractor;
pub use replay::{parse_model_output, ReplayExtractor};

/// Failures of the extraction collaborator
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Extraction provider error: {0}")]
    Provider(String),

    #[error("Invalid model response: {0}")]
    InvalidResponse(String),

    #[error("Response does not match the target schema: {0}")]
    SchemaMismatch(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Maps free text plus a target schema to a schema-shaped JSON record
#[async_trait]
pub trait SiteExtractor: Send + Sync {
    /// Extract a record conforming to `schema` from sanitized page `text`
    async fn extract(
        &self,
        text: &str,
        schema: &Value,
        instructions: &str,
    ) -> Result<Value, ExtractionError>;

    /// Provider name, for logging
    fn provider_name(&self) -> &'static str;
}
