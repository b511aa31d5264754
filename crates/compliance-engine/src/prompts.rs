//! Instructions and target schemas handed to the extraction oracle

use serde_json::{json, Map, Value};
use shared_types::DynamicChecklistRule;

use crate::patterns::NOT_FOUND;

/// System instruction for the fixed checklist
pub const STATIC_INSTRUCTIONS: &str =
    "Extract regulatory compliance details from the website text. \
     Only report what the text actually shows; leave a field empty or false when it is not mentioned.";

/// Schema title identifying a checklist-document request
pub const CHECKLIST_SCHEMA_TITLE: &str = "DynamicChecklist";

/// System instruction for turning a checklist document into rules
pub const CHECKLIST_INSTRUCTIONS: &str = "You are a compliance expert. Convert this checklist document into a structured JSON format.
Create a list of rules based on the requirements found in the text.

For each rule, define:
- rule_id: A unique code (e.g. SEC-01)
- section: The section it belongs to (e.g. 'Company Info')
- item: Short name (e.g. 'Privacy Policy link')
- description: Full requirement details from the text
- extraction_prompt: A specific instruction for an AI agent to check this specific rule on a website text. Example: 'Find the company registration number on the page'.
- pass_condition: 'not_empty' (if finding any value passes), 'true' (if boolean check must be true), or 'contains(<text>)'
- severity: 'fail' (critical) or 'warning' (minor)";

/// Instructions for a caller-supplied rule set: one line per rule
pub fn dynamic_instructions(rules: &[DynamicChecklistRule]) -> String {
    let mut lines = vec![format!(
        "For each rule id below, extract the requested value from the website text. \
         Answer with a JSON object keyed by rule id. Use \"{}\" when the value is not present.",
        NOT_FOUND
    )];
    lines.extend(
        rules
            .iter()
            .map(|rule| format!("{}: {}", rule.rule_id, rule.extraction_prompt)),
    );
    lines.join("\n")
}

/// Open key -> string schema keyed by rule id
pub fn dynamic_schema(rules: &[DynamicChecklistRule]) -> Value {
    let mut properties = Map::new();
    for rule in rules {
        properties.insert(
            rule.rule_id.clone(),
            json!({
                "type": "string",
                "description": rule.extraction_prompt,
            }),
        );
    }

    json!({
        "title": "DynamicExtraction",
        "type": "object",
        "properties": Value::Object(properties),
        "additionalProperties": { "type": "string" },
    })
}

/// Target schema for a checklist document: a name plus a list of rules
pub fn checklist_schema() -> Value {
    let text = |description: &str| json!({ "type": "string", "description": description });
    json!({
        "title": CHECKLIST_SCHEMA_TITLE,
        "type": "object",
        "properties": {
            "name": text("Checklist name"),
            "rules": {
                "type": "array",
                "default": [],
                "items": {
                    "type": "object",
                    "properties": {
                        "rule_id": text("Unique rule code, e.g. SEC-01"),
                        "section": text("Section the rule belongs to"),
                        "item": text("Short rule name"),
                        "description": text("Full requirement text"),
                        "extraction_prompt": text("Instruction for checking this rule on website text"),
                        "pass_condition": text("not_empty, true or contains(<text>)"),
                        "severity": { "type": "string", "enum": ["fail", "warning"] },
                    },
                    "required": [
                        "rule_id", "section", "item", "description",
                        "extraction_prompt", "pass_condition", "severity"
                    ],
                },
            },
        },
        "required": ["name", "rules"],
    })
}
