//! Deterministic extractor for demos without a model provider

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use super::{ExtractionError, SiteExtractor};
use crate::prompts::CHECKLIST_SCHEMA_TITLE;

/// Value returned for schema properties the demo record does not know about
pub const MOCK_RULE_VALUE: &str = "Demo value";

/// Answers every request from a fixed demo record, whatever the page says
#[derive(Debug, Clone, Default)]
pub struct MockExtractor;

impl MockExtractor {
    pub fn new() -> Self {
        Self
    }

    /// The demo site: a small shop with a few gaps
    pub fn demo_record() -> Value {
        json!({
            "company_name": "Demo Company",
            "support_email": "support@demo.com",
            "has_contact_page": true,
            "has_privacy_policy": true,
            "has_terms_conditions": false,
            "has_refund_policy": true,
            "refund_period_days": 14,
            "policy_mentions_refund_terms": true,
            "site_primary_language": "English",
            "has_product_description": true,
            "prices_in_purchase_currency": true,
            "shows_final_price": true,
            "payment_methods_mentioned": ["Visa", "MasterCard"],
            "has_mobile_responsive": true
        })
    }

    /// The demo checklist document: a single rule
    pub fn demo_checklist() -> Value {
        json!({
            "name": "Mock Checklist",
            "rules": [{
                "rule_id": "MOCK-001",
                "section": "Mock Section",
                "item": "Mock Rule 1",
                "description": "This is a mock rule from parser.",
                "extraction_prompt": "Find mock value",
                "pass_condition": "not_empty",
                "severity": "fail"
            }]
        })
    }
}

/// Answer for a property the demo record does not set. Plain string
/// properties get [`MOCK_RULE_VALUE`]; anything else falls back to the
/// schema default, or is left out.
fn placeholder(property: &Value) -> Option<Value> {
    match property.get("type") {
        Some(Value::String(kind)) if kind == "string" => {
            Some(Value::String(MOCK_RULE_VALUE.to_string()))
        }
        _ => property.get("default").cloned(),
    }
}

#[async_trait]
impl SiteExtractor for MockExtractor {
    async fn extract(
        &self,
        text: &str,
        schema: &Value,
        _instructions: &str,
    ) -> Result<Value, ExtractionError> {
        tracing::info!("MockExtractor: returning demo extraction data ({} chars ignored)", text.len());

        if schema.get("title").and_then(Value::as_str) == Some(CHECKLIST_SCHEMA_TITLE) {
            return Ok(Self::demo_checklist());
        }

        let demo = Self::demo_record();
        let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
            return Ok(demo);
        };

        let mut record = Map::new();
        for (key, property) in properties {
            if let Some(value) = demo.get(key).cloned().or_else(|| placeholder(property)) {
                record.insert(key.clone(), value);
            }
        }
        Ok(Value::Object(record))
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}
