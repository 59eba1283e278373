// Provider factory
//
// Builds the two provider clients from configuration. Both are always
// constructed; a missing credential surfaces as NotConfigured at call time
// (and as `false` in /health), not as a startup failure.

use std::sync::Arc;

use anyhow::{Context, Result};

use super::llama::LlamaProvider;
use super::mistral::MistralProvider;
use super::types::ModelChoice;
use super::TextProvider;
use crate::config::Config;

/// The full provider lineup, indexed by `ModelChoice`.
#[derive(Clone)]
pub struct ProviderSet {
    pub llama: Arc<dyn TextProvider>,
    pub mistral: Arc<dyn TextProvider>,
}

impl ProviderSet {
    pub fn from_config(config: &Config) -> Result<Self> {
        let llama =
            LlamaProvider::new(&config.llama).context("Failed to create llama provider")?;
        let mistral =
            MistralProvider::new(&config.mistral).context("Failed to create mistral provider")?;
        Ok(Self {
            llama: Arc::new(llama),
            mistral: Arc::new(mistral),
        })
    }

    /// Build a set from arbitrary implementations. Used by tests to inject
    /// stub providers under the real service and handlers.
    pub fn new(llama: Arc<dyn TextProvider>, mistral: Arc<dyn TextProvider>) -> Self {
        Self { llama, mistral }
    }

    pub fn for_choice(&self, choice: ModelChoice) -> &Arc<dyn TextProvider> {
        match choice {
            ModelChoice::Llama => &self.llama,
            ModelChoice::Mistral => &self.mistral,
        }
    }
}
