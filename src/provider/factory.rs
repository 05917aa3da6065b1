//! Configuration-driven strategy provider (Mode A).

use std::sync::Arc;

use crate::config::ServiceConfig;
use crate::policy::{DisambiguationPolicy, SpotterPolicy};
use crate::provider::{
    build_disambiguators, build_spotters, DisambiguatorMap, ProviderError, SpotterMap,
    StrategyProvider, StrategySettings,
};
use crate::strategy::Lexicon;

/// Builds the strategies a `ServiceConfig` asks for.
#[derive(Debug)]
pub struct StrategyFactory {
    lexicon: Arc<Lexicon>,
    spotters: Vec<SpotterPolicy>,
    disambiguators: Vec<DisambiguationPolicy>,
    settings: StrategySettings,
}

impl StrategyFactory {
    /// Load the configured lexicon and remember which policies to build.
    pub fn new(config: &ServiceConfig) -> Result<Self, ProviderError> {
        let path = config
            .strategies
            .lexicon_path
            .as_deref()
            .ok_or(ProviderError::MissingLexicon)?;
        let lexicon = Lexicon::load(path)?;

        Ok(Self::with_lexicon(config, Arc::new(lexicon)))
    }

    /// Use an already loaded lexicon.
    pub fn with_lexicon(config: &ServiceConfig, lexicon: Arc<Lexicon>) -> Self {
        Self {
            lexicon,
            spotters: config.strategies.spotters.clone(),
            disambiguators: config.strategies.disambiguators.clone(),
            settings: StrategySettings::from(&config.strategies),
        }
    }
}

impl StrategyProvider for StrategyFactory {
    fn spotters(&self) -> Result<SpotterMap, ProviderError> {
        build_spotters(&self.spotters, &self.lexicon, &self.settings)
    }

    fn disambiguators(&self) -> Result<DisambiguatorMap, ProviderError> {
        build_disambiguators(&self.disambiguators, &self.lexicon, &self.settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_configured_policies() {
        let mut config = ServiceConfig::default();
        config.strategies.spotters = vec![SpotterPolicy::Default, SpotterPolicy::CoOccurrenceBased];
        config.strategies.disambiguators =
            vec![DisambiguationPolicy::Default, DisambiguationPolicy::Occurrences];

        let lexicon = Arc::new(Lexicon::parse("Rome\tRome\t10\n").unwrap());
        let factory = StrategyFactory::with_lexicon(&config, lexicon);

        let spotters = factory.spotters().unwrap();
        assert_eq!(spotters.len(), 2);
        assert_eq!(spotters[&SpotterPolicy::CoOccurrenceBased].name(), "CoOccurrenceSelector");

        let disambiguators = factory.disambiguators().unwrap();
        assert_eq!(
            disambiguators[&DisambiguationPolicy::Occurrences].name(),
            "ContextDisambiguator"
        );
    }

    #[test]
    fn test_missing_lexicon_path() {
        let err = StrategyFactory::new(&ServiceConfig::default()).unwrap_err();
        assert!(matches!(err, ProviderError::MissingLexicon));
    }
}
