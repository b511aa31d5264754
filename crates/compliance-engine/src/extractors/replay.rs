//! Replays a recorded model response
//!
//! Models often wrap their JSON in a Markdown fence; the raw text is cleaned
//! before parsing so a recording can be pasted in verbatim.

use std::fs;
use std::path::Path;

use async_trait::async_trait;
use serde_json::Value;

use super::{ExtractionError, SiteExtractor};
use crate::patterns::strip_code_fence;

/// Parse a model's raw output into JSON, tolerating a surrounding code fence
pub fn parse_model_output(raw: &str) -> Result<Value, ExtractionError> {
    let body = strip_code_fence(raw);
    if body.is_empty() {
        return Err(ExtractionError::InvalidResponse(
            "empty model response".to_string(),
        ));
    }
    let value: Value = serde_json::from_str(body)?;
    if !value.is_object() {
        return Err(ExtractionError::InvalidResponse(format!(
            "expected a JSON object, got {}",
            json_type_name(&value)
        )));
    }
    Ok(value)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Serves one recorded response for every request
#[derive(Debug, Clone)]
pub struct ReplayExtractor {
    response: Value,
}

impl ReplayExtractor {
    /// Build from an already-parsed record
    pub fn new(response: Value) -> Self {
        Self { response }
    }

    /// Build from raw model output
    pub fn from_raw(raw: &str) -> Result<Self, ExtractionError> {
        parse_model_output(raw).map(Self::new)
    }

    /// Build from a file holding raw model output
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ExtractionError> {
        let raw = fs::read_to_string(path.as_ref())?;
        Self::from_raw(&raw)
    }
}

#[async_trait]
impl SiteExtractor for ReplayExtractor {
    async fn extract(
        &self,
        text: &str,
        _schema: &Value,
        _instructions: &str,
    ) -> Result<Value, ExtractionError> {
        tracing::debug!("Replaying recorded extraction for {} chars of text", text.len());
        Ok(self.response.clone())
    }

    fn provider_name(&self) -> &'static str {
        "replay"
    }
}
