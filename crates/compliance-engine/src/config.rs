//! Engine configuration
//!
//! Loaded from TOML, every key optional:
//!
//! ```toml
//! provider = "replay"
//! replay_file = "fixtures/acme_response.json"
//! max_text_chars = 50000
//! max_found_value_chars = 100
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

use crate::condition::MAX_FOUND_VALUE_CHARS;
use crate::extractors::{MockExtractor, ReplayExtractor, SiteExtractor};

/// Page text beyond this many characters is not sent to the oracle
pub const DEFAULT_MAX_TEXT_CHARS: usize = 50_000;

/// Which extraction collaborator to use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Mock,
    Replay,
    OpenAi,
    Gemini,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Mock => "mock",
            ProviderKind::Replay => "replay",
            ProviderKind::OpenAi => "openai",
            ProviderKind::Gemini => "gemini",
        }
    }
}

/// Engine settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Extraction provider
    pub provider: ProviderKind,
    /// Recorded model response served by the `replay` provider
    pub replay_file: Option<PathBuf>,
    /// Page text is truncated to this many characters before extraction
    pub max_text_chars: usize,
    /// Dynamic found values are truncated to this many characters for display
    pub max_found_value_chars: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Mock,
            replay_file: None,
            max_text_chars: DEFAULT_MAX_TEXT_CHARS,
            max_found_value_chars: MAX_FOUND_VALUE_CHARS,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the TOML is malformed
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(s: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(s).context("Failed to parse TOML configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject limits that would make every analysis meaningless
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.max_text_chars == 0 {
            bail!("max_text_chars must be greater than zero");
        }
        if self.max_found_value_chars == 0 {
            bail!("max_found_value_chars must be greater than zero");
        }
        if self.provider == ProviderKind::Replay && self.replay_file.is_none() {
            bail!("provider 'replay' requires replay_file");
        }
        Ok(())
    }
}

/// Build the extraction collaborator named by the config
pub fn build_extractor(config: &EngineConfig) -> anyhow::Result<Arc<dyn SiteExtractor>> {
    match config.provider {
        ProviderKind::Mock => Ok(Arc::new(MockExtractor::new())),
        ProviderKind::Replay => {
            let Some(path) = config.replay_file.as_ref() else {
                bail!("provider 'replay' requires replay_file");
            };
            let extractor = ReplayExtractor::from_file(path)
                .with_context(|| format!("Failed to load replay file: {}", path.display()))?;
            Ok(Arc::new(extractor))
        }
        ProviderKind::OpenAi | ProviderKind::Gemini => bail!(
            "provider '{}' needs a network transport, which is not built into this crate; \
             pass your own SiteExtractor to ComplianceEngine::new",
            config.provider.as_str()
        ),
    }
}
