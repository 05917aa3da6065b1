//! Strategy providers.
//!
//! # Data Flow
//! ```text
//! Mode A: ServiceConfig → factory.rs (StrategyFactory)  ┐
//!                                                        ├→ StrategyProvider
//! Mode B: model folder  → model.rs (ModelBundle)        ┘     → SpotterMap / DisambiguatorMap
//!                                                               → policy registries
//! ```
//!
//! # Design Decisions
//! - Both modes build the same reference strategies from a shared lexicon
//! - Asking for a policy this build has no implementation for is a startup error

pub mod factory;
pub mod model;

pub use factory::StrategyFactory;
pub use model::{ModelBundle, ModelProperties};

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::config::StrategyConfig;
use crate::policy::{DisambiguationPolicy, SpotterPolicy};
use crate::strategy::disambiguators::{ContextDisambiguator, PriorDisambiguator};
use crate::strategy::spotters::{CapitalizedSelector, CoOccurrenceSelector, LexiconSpotter};
use crate::strategy::{Disambiguator, Lexicon, LexiconError, Spotter};

pub type SpotterMap = BTreeMap<SpotterPolicy, Arc<dyn Spotter>>;
pub type DisambiguatorMap = BTreeMap<DisambiguationPolicy, Arc<dyn Disambiguator>>;

/// Source of ready-to-use strategies for the policy registries.
pub trait StrategyProvider {
    fn spotters(&self) -> Result<SpotterMap, ProviderError>;
    fn disambiguators(&self) -> Result<DisambiguatorMap, ProviderError>;
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{0}")]
    Lexicon(#[from] LexiconError),

    #[error("no lexicon configured")]
    MissingLexicon,

    #[error("spotter policy {0} has no implementation")]
    UnsupportedSpotter(SpotterPolicy),

    #[error("disambiguation policy {0} has no implementation")]
    UnsupportedDisambiguator(DisambiguationPolicy),

    #[error("cannot read model {path}: {source}")]
    ModelIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed model properties {path}: {source}")]
    ModelProperties {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Parameters shared by every reference strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategySettings {
    pub case_sensitive: bool,
    pub context_window: usize,
    pub prior_weight: f64,
    pub unambiguous_prior: f64,
}

impl Default for StrategySettings {
    fn default() -> Self {
        Self::from(&StrategyConfig::default())
    }
}

impl From<&StrategyConfig> for StrategySettings {
    fn from(config: &StrategyConfig) -> Self {
        Self {
            case_sensitive: config.case_sensitive,
            context_window: config.context_window,
            prior_weight: config.prior_weight,
            unambiguous_prior: config.unambiguous_prior,
        }
    }
}

pub(crate) fn build_spotter(
    policy: SpotterPolicy,
    lexicon: &Arc<Lexicon>,
    settings: &StrategySettings,
) -> Result<Arc<dyn Spotter>, ProviderError> {
    let lexicon = lexicon.clone();
    let spotter: Arc<dyn Spotter> = match policy {
        SpotterPolicy::Default | SpotterPolicy::LingPipeSpotter => {
            Arc::new(LexiconSpotter::new(lexicon, settings.case_sensitive))
        }
        SpotterPolicy::CoOccurrenceBased => Arc::new(CoOccurrenceSelector::new(
            lexicon,
            settings.case_sensitive,
            settings.unambiguous_prior,
        )),
        SpotterPolicy::NESpotter => {
            Arc::new(CapitalizedSelector::new(lexicon, settings.case_sensitive))
        }
        other => return Err(ProviderError::UnsupportedSpotter(other)),
    };
    Ok(spotter)
}

pub(crate) fn build_disambiguator(
    policy: DisambiguationPolicy,
    lexicon: &Arc<Lexicon>,
    settings: &StrategySettings,
) -> Result<Arc<dyn Disambiguator>, ProviderError> {
    let lexicon = lexicon.clone();
    let disambiguator: Arc<dyn Disambiguator> = match policy {
        DisambiguationPolicy::Default => {
            Arc::new(PriorDisambiguator::new(lexicon, settings.case_sensitive))
        }
        DisambiguationPolicy::Document => Arc::new(ContextDisambiguator::new(
            lexicon,
            settings.case_sensitive,
            None,
            settings.prior_weight,
        )),
        DisambiguationPolicy::Occurrences => Arc::new(ContextDisambiguator::new(
            lexicon,
            settings.case_sensitive,
            Some(settings.context_window),
            settings.prior_weight,
        )),
        other => return Err(ProviderError::UnsupportedDisambiguator(other)),
    };
    Ok(disambiguator)
}

pub(crate) fn build_spotters(
    policies: &[SpotterPolicy],
    lexicon: &Arc<Lexicon>,
    settings: &StrategySettings,
) -> Result<SpotterMap, ProviderError> {
    let mut spotters = SpotterMap::new();
    for &policy in policies {
        if !spotters.contains_key(&policy) {
            let spotter = build_spotter(policy, lexicon, settings)?;
            tracing::debug!(policy = %policy, implementation = spotter.name(), "Spotter built");
            spotters.insert(policy, spotter);
        }
    }
    Ok(spotters)
}

pub(crate) fn build_disambiguators(
    policies: &[DisambiguationPolicy],
    lexicon: &Arc<Lexicon>,
    settings: &StrategySettings,
) -> Result<DisambiguatorMap, ProviderError> {
    let mut disambiguators = DisambiguatorMap::new();
    for &policy in policies {
        if !disambiguators.contains_key(&policy) {
            let disambiguator = build_disambiguator(policy, lexicon, settings)?;
            tracing::debug!(
                policy = %policy,
                implementation = disambiguator.name(),
                "Disambiguator built"
            );
            disambiguators.insert(policy, disambiguator);
        }
    }
    Ok(disambiguators)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexicon() -> Arc<Lexicon> {
        Arc::new(Lexicon::parse("Rome\tRome\t10\n").unwrap())
    }

    #[test]
    fn test_duplicates_are_built_once() {
        let spotters = build_spotters(
            &[SpotterPolicy::Default, SpotterPolicy::NESpotter, SpotterPolicy::Default],
            &lexicon(),
            &StrategySettings::default(),
        )
        .unwrap();
        assert_eq!(
            spotters.keys().copied().collect::<Vec<_>>(),
            vec![SpotterPolicy::Default, SpotterPolicy::NESpotter]
        );
    }

    #[test]
    fn test_unsupported_policies_fail() {
        let err = build_spotters(
            &[SpotterPolicy::KeyphraseSpotter],
            &lexicon(),
            &StrategySettings::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ProviderError::UnsupportedSpotter(SpotterPolicy::KeyphraseSpotter)));

        let err = build_disambiguators(
            &[DisambiguationPolicy::CuttingEdge],
            &lexicon(),
            &StrategySettings::default(),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "disambiguation policy CuttingEdge has no implementation");
    }
}
