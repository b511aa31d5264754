//! Checklist documents to dynamic rule sets
//!
//! Decoding PDF or DOCX uploads happens before this point; the parser only sees
//! the document's plain text and asks the extractor to structure it.

use shared_types::DynamicChecklist;

use crate::error::EngineError;
use crate::extractors::{ExtractionError, SiteExtractor};
use crate::patterns::clip_chars;
use crate::prompts::{checklist_schema, CHECKLIST_INSTRUCTIONS};

/// Documents with less trimmed text than this are rejected
pub const MIN_CHECKLIST_CHARS: usize = 10;

/// Document text beyond this many characters is not sent to the extractor
pub const MAX_CHECKLIST_CHARS: usize = 30_000;

/// Turn checklist document text into a validated rule set
///
/// # Errors
///
/// [`EngineError::EmptyChecklist`] for blank documents, [`EngineError::Extraction`]
/// when the extractor fails or answers in the wrong shape, and
/// [`EngineError::InvalidChecklist`] for duplicate or blank rule ids.
pub async fn parse_checklist(
    text: &str,
    extractor: &dyn SiteExtractor,
) -> Result<DynamicChecklist, EngineError> {
    let trimmed = text.trim();
    if trimmed.chars().count() < MIN_CHECKLIST_CHARS {
        return Err(EngineError::EmptyChecklist);
    }

    let document = clip_chars(trimmed, MAX_CHECKLIST_CHARS);
    tracing::info!(
        "Parsing checklist document ({} chars) with provider '{}'",
        document.chars().count(),
        extractor.provider_name()
    );

    let raw = extractor
        .extract(document, &checklist_schema(), CHECKLIST_INSTRUCTIONS)
        .await?;
    let checklist: DynamicChecklist =
        serde_json::from_value(raw).map_err(ExtractionError::from)?;
    checklist.validate()?;

    tracing::info!(
        "Parsed checklist '{}' with {} rules",
        checklist.name,
        checklist.rules.len()
    );
    Ok(checklist)
}
