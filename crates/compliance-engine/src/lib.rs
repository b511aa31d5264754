//! Merchant website compliance engine
//!
//! Turns sanitized page text into a scored [`ComplianceReport`], either against
//! the fixed eight-section checklist or against a caller-supplied rule set.
//! Field extraction is delegated to a [`SiteExtractor`]; everything after the
//! extraction call is deterministic.

pub mod checklist;
pub mod condition;
pub mod config;
pub mod error;
pub mod extraction;
pub mod extractors;
pub mod patterns;
pub mod prompts;
pub mod report;
pub mod rules;
pub mod scoring;

use std::sync::Arc;

use serde_json::{Map, Value};
use shared_types::{ComplianceReport, DynamicChecklist, DynamicChecklistRule};

pub use config::{build_extractor, EngineConfig, ProviderKind};
pub use error::EngineError;
pub use extraction::{Field, SiteContentExtraction};
pub use extractors::{ExtractionError, MockExtractor, ReplayExtractor, SiteExtractor};
pub use rules::Section;

use crate::patterns::clip_chars;

/// ComplianceEngine entry point
pub struct ComplianceEngine {
    extractor: Arc<dyn SiteExtractor>,
    config: EngineConfig,
}

impl ComplianceEngine {
    /// Engine with default limits around the given extractor
    pub fn new(extractor: Arc<dyn SiteExtractor>) -> Self {
        Self::with_config(extractor, EngineConfig::default())
    }

    pub fn with_config(extractor: Arc<dyn SiteExtractor>, config: EngineConfig) -> Self {
        Self { extractor, config }
    }

    /// Build the engine and its extractor from configuration
    pub fn from_config(config: EngineConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let extractor = build_extractor(&config)?;
        Ok(Self::with_config(extractor, config))
    }

    pub fn provider_name(&self) -> &'static str {
        self.extractor.provider_name()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Turn checklist document text into a rule set with this engine's extractor
    pub async fn parse_checklist(&self, document_text: &str) -> Result<DynamicChecklist, EngineError> {
        checklist::parse_checklist(document_text, self.extractor.as_ref()).await
    }

    /// Score page text against the fixed eight-section checklist
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Extraction`] when the extractor fails or its
    /// answer does not fit the target schema.
    pub async fn analyze_site(&self, clean_text: &str) -> Result<ComplianceReport, EngineError> {
        let text = clip_chars(clean_text, self.config.max_text_chars);
        tracing::info!(
            "Analyzing site content ({} chars) with provider '{}'",
            text.chars().count(),
            self.provider_name()
        );

        let schema = extraction::target_schema();
        let raw = self
            .extractor
            .extract(text, &schema, prompts::STATIC_INSTRUCTIONS)
            .await?;
        let extraction = SiteContentExtraction::from_value(raw).map_err(ExtractionError::from)?;

        let report = report::static_report(&extraction, report::timestamp_now());
        tracing::info!(
            "Static analysis for '{}': score {}, status {}",
            report.company_name,
            report.score,
            report.status
        );
        Ok(report)
    }

    /// Score page text against caller-supplied rules
    ///
    /// Never fails: an extraction error is logged and every rule is evaluated
    /// as if nothing was found.
    pub async fn analyze_with_rules(
        &self,
        clean_text: &str,
        rules: &[DynamicChecklistRule],
        company_name: &str,
    ) -> ComplianceReport {
        if rules.is_empty() {
            tracing::warn!("Empty rule set supplied, skipping extraction");
            return report::empty_rule_set_report(company_name, report::timestamp_now());
        }

        let text = clip_chars(clean_text, self.config.max_text_chars);
        tracing::info!(
            "Analyzing site content ({} chars) against {} custom rules",
            text.chars().count(),
            rules.len()
        );

        let schema = prompts::dynamic_schema(rules);
        let instructions = prompts::dynamic_instructions(rules);
        let values = match self.extractor.extract(text, &schema, &instructions).await {
            Ok(value) if value.is_object() => value,
            Ok(_) => {
                tracing::warn!("Extractor returned a non-object answer; treating all rules as not found");
                Value::Object(Map::new())
            }
            Err(e) => {
                tracing::warn!("Dynamic extraction failed: {}; treating all rules as not found", e);
                Value::Object(Map::new())
            }
        };

        let report = report::dynamic_report(
            rules,
            &values,
            company_name,
            self.config.max_found_value_chars,
            report::timestamp_now(),
        );
        tracing::info!(
            "Custom rule analysis for '{}': score {}, status {}",
            report.company_name,
            report.score,
            report.status
        );
        report
    }
}

impl Default for ComplianceEngine {
    fn default() -> Self {
        Self::new(Arc::new(MockExtractor::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use shared_types::{CheckStatus, ComplianceStatus, RuleSeverity};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Records every call and answers with a fixed value
    struct RecordingExtractor {
        answer: Value,
        calls: AtomicUsize,
        last_text_len: Mutex<Option<usize>>,
    }

    impl RecordingExtractor {
        fn new(answer: Value) -> Self {
            Self {
                answer,
                calls: AtomicUsize::new(0),
                last_text_len: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl SiteExtractor for RecordingExtractor {
        async fn extract(
            &self,
            text: &str,
            _schema: &Value,
            _instructions: &str,
        ) -> Result<Value, ExtractionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_text_len.lock().unwrap() = Some(text.chars().count());
            Ok(self.answer.clone())
        }

        fn provider_name(&self) -> &'static str {
            "recording"
        }
    }

    struct FailingExtractor;

    #[async_trait]
    impl SiteExtractor for FailingExtractor {
        async fn extract(
            &self,
            _text: &str,
            _schema: &Value,
            _instructions: &str,
        ) -> Result<Value, ExtractionError> {
            Err(ExtractionError::Provider("quota exceeded".to_string()))
        }

        fn provider_name(&self) -> &'static str {
            "failing"
        }
    }

    fn rule(id: &str, condition: &str) -> DynamicChecklistRule {
        DynamicChecklistRule {
            rule_id: id.to_string(),
            section: "Company Info".to_string(),
            item: format!("Item {}", id),
            description: format!("Requirement {}", id),
            extraction_prompt: format!("Find {}", id),
            pass_condition: condition.to_string(),
            severity: RuleSeverity::Fail,
        }
    }

    #[tokio::test]
    async fn test_mock_engine_static_analysis() {
        let engine = ComplianceEngine::default();
        let report = engine.analyze_site("Welcome to our shop").await.unwrap();

        assert_eq!(engine.provider_name(), "mock");
        assert_eq!(report.company_name, "Demo Company");
        assert!(report.score < 80);
        let terms = report
            .checklist
            .iter()
            .find(|item| item.rule_id == "POL-001")
            .unwrap();
        assert_eq!(terms.status, CheckStatus::Fail);
        assert_eq!(report.stats().total, report.checklist.len());
    }

    #[tokio::test]
    async fn test_static_analysis_truncates_text() {
        let extractor = Arc::new(RecordingExtractor::new(json!({})));
        let config = EngineConfig {
            max_text_chars: 10,
            ..EngineConfig::default()
        };
        let engine = ComplianceEngine::with_config(extractor.clone(), config);

        let report = engine.analyze_site(&"ü".repeat(25)).await.unwrap();
        assert_eq!(*extractor.last_text_len.lock().unwrap(), Some(10));
        assert_eq!(report.score, 5);
        assert_eq!(report.status, ComplianceStatus::NonCompliant);
    }

    #[tokio::test]
    async fn test_static_analysis_propagates_errors() {
        let engine = ComplianceEngine::new(Arc::new(FailingExtractor));
        let err = engine.analyze_site("text").await.unwrap_err();
        assert!(err.to_string().contains("quota exceeded"));

        let mismatched = ComplianceEngine::new(Arc::new(RecordingExtractor::new(
            json!({ "has_contact_page": "maybe" }),
        )));
        assert!(matches!(
            mismatched.analyze_site("text").await,
            Err(EngineError::Extraction(ExtractionError::SchemaMismatch(_)))
        ));
    }

    #[tokio::test]
    async fn test_static_analysis_tolerates_nulls() {
        let engine = ComplianceEngine::new(Arc::new(RecordingExtractor::new(json!({
            "company_name": "Acme",
            "has_terms_conditions": null,
            "refund_period_days": null
        }))));
        let report = engine.analyze_site("text").await.unwrap();
        assert_eq!(report.company_name, "Acme");
    }

    #[tokio::test]
    async fn test_empty_rule_set_skips_extraction() {
        let extractor = Arc::new(RecordingExtractor::new(json!({})));
        let engine = ComplianceEngine::new(extractor.clone());

        let report = engine.analyze_with_rules("text", &[], "Acme").await;
        assert_eq!(extractor.calls.load(Ordering::SeqCst), 0);
        assert_eq!(report.score, 0);
        assert_eq!(report.status, ComplianceStatus::NeedsReview);
        assert!(report.checklist.is_empty());
    }

    #[tokio::test]
    async fn test_dynamic_analysis_uses_extracted_values() {
        let extractor = Arc::new(RecordingExtractor::new(json!({
            "SEC-01": "HE 123456",
            "SEC-02": "Not found"
        })));
        let engine = ComplianceEngine::new(extractor.clone());
        let rules = vec![rule("SEC-01", "not_empty"), rule("SEC-02", "not_empty")];

        let report = engine.analyze_with_rules("text", &rules, "Acme").await;
        assert_eq!(extractor.calls.load(Ordering::SeqCst), 1);
        assert_eq!(report.checklist[0].status, CheckStatus::Pass);
        assert_eq!(report.checklist[1].status, CheckStatus::Fail);
        assert_eq!(report.score, 50);
        assert_eq!(report.status, ComplianceStatus::NonCompliant);
    }

    #[tokio::test]
    async fn test_dynamic_analysis_degrades_on_failure() {
        let engine = ComplianceEngine::new(Arc::new(FailingExtractor));
        let rules = vec![rule("SEC-01", "not_empty"), rule("SEC-02", "true")];

        let report = engine.analyze_with_rules("text", &rules, "Acme").await;
        assert_eq!(report.checklist.len(), 2);
        assert!(report
            .checklist
            .iter()
            .all(|item| item.status == CheckStatus::Fail && item.found_value == "Not found"));
        assert_eq!(report.score, 0);
        assert_eq!(report.status, ComplianceStatus::NonCompliant);
    }

    #[tokio::test]
    async fn test_dynamic_analysis_ignores_non_object_answer() {
        let engine = ComplianceEngine::new(Arc::new(RecordingExtractor::new(json!(["SEC-01"]))));
        let report = engine
            .analyze_with_rules("text", &[rule("SEC-01", "not_empty")], "")
            .await;
        assert_eq!(report.checklist[0].status, CheckStatus::Fail);
        assert_eq!(report.company_name, "Unknown");
    }

    #[tokio::test]
    async fn test_mock_dynamic_analysis() {
        let engine = ComplianceEngine::default();
        let report = engine
            .analyze_with_rules("text", &[rule("CUSTOM-1", "not_empty")], "Demo")
            .await;
        assert_eq!(report.checklist[0].status, CheckStatus::Pass);
        assert_eq!(report.checklist[0].found_value, extractors::mock::MOCK_RULE_VALUE);
        assert_eq!(report.status, ComplianceStatus::Compliant);
    }

    #[tokio::test]
    async fn test_parsed_checklist_feeds_rule_analysis() {
        let engine = ComplianceEngine::default();
        let checklist = engine
            .parse_checklist("Sites must show a registration number.")
            .await
            .unwrap();

        let report = engine
            .analyze_with_rules("text", &checklist.rules, "Demo")
            .await;
        assert_eq!(report.checklist.len(), 1);
        assert_eq!(report.checklist[0].rule_id, "MOCK-001");
        assert_eq!(report.checklist[0].found_value, extractors::mock::MOCK_RULE_VALUE);
        assert_eq!(report.status, ComplianceStatus::Compliant);
    }

    #[test]
    fn test_from_config() {
        let engine = ComplianceEngine::from_config(EngineConfig::default()).unwrap();
        assert_eq!(engine.provider_name(), "mock");

        let live = EngineConfig {
            provider: ProviderKind::OpenAi,
            ..EngineConfig::default()
        };
        assert!(ComplianceEngine::from_config(live).is_err());
    }
}
