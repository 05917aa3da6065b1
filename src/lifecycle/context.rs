//! Service-wide state shared by every request handler.

use std::sync::Arc;

use crate::config::{ServiceConfig, DEFAULT_NAMESPACE};
use crate::filter::CombinedFilters;
use crate::policy::{
    self, DisambiguationPolicy, InitializationError, InputError, Registry, SpotterPolicy,
};
use crate::provider::{DisambiguatorMap, SpotterMap};
use crate::strategy::{Disambiguator, SimpleTokenizer, Spotter, TextTokenizer, Token};

/// Everything the service knows once it is configured.
///
/// Built by the startup sequence, then frozen behind an `Arc` and handed to
/// the HTTP layer. The registries are write-once; the remaining setters take
/// `&mut self` and are only reachable before the context is shared.
#[derive(Debug)]
pub struct ServiceContext {
    config: ServiceConfig,
    namespace_prefix: String,
    spotters: Registry<SpotterPolicy, Arc<dyn Spotter>>,
    disambiguators: Registry<DisambiguationPolicy, Arc<dyn Disambiguator>>,
    tokenizer: Option<Arc<dyn TextTokenizer>>,
    default_tokenizer: SimpleTokenizer,
    combined_filters: Option<CombinedFilters>,
}

impl ServiceContext {
    pub fn new(config: ServiceConfig) -> Self {
        let namespace_prefix = if config.service.namespace_prefix.is_empty() {
            DEFAULT_NAMESPACE.to_string()
        } else {
            config.service.namespace_prefix.clone()
        };

        let default_tokenizer = SimpleTokenizer::with_stopwords(&config.strategies.stopwords);

        Self {
            config,
            namespace_prefix,
            spotters: Registry::new("spotter"),
            disambiguators: Registry::new("disambiguator"),
            tokenizer: None,
            default_tokenizer,
            combined_filters: None,
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn set_spotters(&self, spotters: SpotterMap) -> Result<(), InitializationError> {
        self.spotters.set(spotters)
    }

    pub fn set_disambiguators(
        &self,
        disambiguators: DisambiguatorMap,
    ) -> Result<(), InitializationError> {
        self.disambiguators.set(disambiguators)
    }

    pub fn set_namespace_prefix(&mut self, prefix: impl Into<String>) {
        self.namespace_prefix = prefix.into();
    }

    pub fn set_tokenizer(&mut self, tokenizer: Arc<dyn TextTokenizer>) {
        self.tokenizer = Some(tokenizer);
    }

    pub fn set_combined_filters(&mut self, filters: CombinedFilters) {
        self.combined_filters = Some(filters);
    }

    pub fn resolve_spotter(&self, name: &str) -> Result<Arc<dyn Spotter>, InputError> {
        policy::resolve(&self.spotters, name)
    }

    pub fn resolve_disambiguator(&self, name: &str) -> Result<Arc<dyn Disambiguator>, InputError> {
        policy::resolve(&self.disambiguators, name)
    }

    pub fn loaded_spotters(&self) -> Vec<SpotterPolicy> {
        self.spotters.keys()
    }

    pub fn loaded_disambiguators(&self) -> Vec<DisambiguationPolicy> {
        self.disambiguators.keys()
    }

    pub fn spotter_count(&self) -> usize {
        self.spotters.len()
    }

    pub fn disambiguator_count(&self) -> usize {
        self.disambiguators.len()
    }

    pub fn namespace_prefix(&self) -> &str {
        &self.namespace_prefix
    }

    /// Externally exposed URI of a resource.
    pub fn prefixed_uri(&self, local_name: &str) -> String {
        format!("{}{}", self.namespace_prefix, local_name)
    }

    /// Tokenizer supplied by the model, if any.
    pub fn tokenizer(&self) -> Option<&Arc<dyn TextTokenizer>> {
        self.tokenizer.as_ref()
    }

    /// Tokenize with the model tokenizer, or one built from the configured
    /// stopwords when there is none.
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        match &self.tokenizer {
            Some(tokenizer) => tokenizer.tokenize(text),
            None => self.default_tokenizer.tokenize(text),
        }
    }

    pub fn combined_filters(&self) -> Option<&CombinedFilters> {
        self.combined_filters.as_ref()
    }
}
