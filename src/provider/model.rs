//! Pre-built model folder provider (Mode B).
//!
//! A model folder holds:
//! - `model.toml`: model properties (namespace, policies, tokenizer settings)
//! - `lexicon.tsv`: the surface form lexicon

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;

use crate::policy::{DisambiguationPolicy, SpotterPolicy};
use crate::provider::{
    build_disambiguators, build_spotters, DisambiguatorMap, ProviderError, SpotterMap,
    StrategyProvider, StrategySettings,
};
use crate::strategy::{Lexicon, SimpleTokenizer, TextTokenizer};

pub const PROPERTIES_FILE: &str = "model.toml";
pub const LEXICON_FILE: &str = "lexicon.tsv";

/// Properties stored alongside a model.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelProperties {
    /// Namespace prefix of the resources this model annotates with.
    pub namespace: Option<String>,
    pub spotters: Vec<SpotterPolicy>,
    pub disambiguators: Vec<DisambiguationPolicy>,
    pub case_sensitive: bool,
    pub context_window: usize,
    pub prior_weight: f64,
    pub unambiguous_prior: f64,
    pub stopwords: Vec<String>,
}

impl Default for ModelProperties {
    fn default() -> Self {
        let defaults = StrategySettings::default();
        Self {
            namespace: None,
            spotters: vec![SpotterPolicy::Default],
            disambiguators: vec![DisambiguationPolicy::Default],
            case_sensitive: defaults.case_sensitive,
            context_window: defaults.context_window,
            prior_weight: defaults.prior_weight,
            unambiguous_prior: defaults.unambiguous_prior,
            stopwords: Vec::new(),
        }
    }
}

impl ModelProperties {
    fn settings(&self) -> StrategySettings {
        StrategySettings {
            case_sensitive: self.case_sensitive,
            context_window: self.context_window,
            prior_weight: self.prior_weight,
            unambiguous_prior: self.unambiguous_prior,
        }
    }
}

/// A model loaded from disk.
#[derive(Debug)]
pub struct ModelBundle {
    folder: PathBuf,
    properties: ModelProperties,
    lexicon: Arc<Lexicon>,
    tokenizer: Arc<SimpleTokenizer>,
}

impl ModelBundle {
    pub fn from_folder(folder: &Path) -> Result<Self, ProviderError> {
        if !folder.is_dir() {
            return Err(ProviderError::ModelIo {
                path: folder.to_path_buf(),
                source: io::Error::new(io::ErrorKind::NotFound, "not a directory"),
            });
        }

        let properties_path = folder.join(PROPERTIES_FILE);
        let content = fs::read_to_string(&properties_path).map_err(|source| ProviderError::ModelIo {
            path: properties_path.clone(),
            source,
        })?;
        let properties: ModelProperties =
            toml::from_str(&content).map_err(|source| ProviderError::ModelProperties {
                path: properties_path,
                source,
            })?;

        let lexicon = Lexicon::load(&folder.join(LEXICON_FILE))?;
        let tokenizer = SimpleTokenizer::with_stopwords(&properties.stopwords);

        tracing::info!(
            folder = %folder.display(),
            spotters = properties.spotters.len(),
            disambiguators = properties.disambiguators.len(),
            "Model loaded"
        );

        Ok(Self {
            folder: folder.to_path_buf(),
            properties,
            lexicon: Arc::new(lexicon),
            tokenizer: Arc::new(tokenizer),
        })
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn properties(&self) -> &ModelProperties {
        &self.properties
    }

    pub fn tokenizer(&self) -> Arc<dyn TextTokenizer> {
        self.tokenizer.clone()
    }
}

impl StrategyProvider for ModelBundle {
    fn spotters(&self) -> Result<SpotterMap, ProviderError> {
        build_spotters(&self.properties.spotters, &self.lexicon, &self.properties.settings())
    }

    fn disambiguators(&self) -> Result<DisambiguatorMap, ProviderError> {
        build_disambiguators(
            &self.properties.disambiguators,
            &self.lexicon,
            &self.properties.settings(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_model(dir: &Path, properties: &str) {
        fs::write(dir.join(PROPERTIES_FILE), properties).unwrap();
        fs::write(dir.join(LEXICON_FILE), "Rome\tRome\t10\tcity,italy\n").unwrap();
    }

    #[test]
    fn test_loads_folder() {
        let dir = tempfile::tempdir().unwrap();
        write_model(
            dir.path(),
            "namespace = \"http://example.org/id/\"\n\
             spotters = [\"Default\", \"NESpotter\"]\n\
             stopwords = [\"the\"]\n",
        );

        let bundle = ModelBundle::from_folder(dir.path()).unwrap();
        assert_eq!(bundle.properties().namespace.as_deref(), Some("http://example.org/id/"));
        assert_eq!(bundle.spotters().unwrap().len(), 2);
        assert_eq!(bundle.disambiguators().unwrap().len(), 1);

        let tokens = bundle.tokenizer().tokenize("the Rome");
        assert!(tokens[0].stopword);
    }

    #[test]
    fn test_missing_folder() {
        let err = ModelBundle::from_folder(Path::new("/nonexistent/model")).unwrap_err();
        assert!(matches!(err, ProviderError::ModelIo { .. }));
    }

    #[test]
    fn test_missing_lexicon() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(PROPERTIES_FILE), "").unwrap();
        let err = ModelBundle::from_folder(dir.path()).unwrap_err();
        assert!(matches!(err, ProviderError::Lexicon(_)));
    }

    #[test]
    fn test_malformed_properties() {
        let dir = tempfile::tempdir().unwrap();
        write_model(dir.path(), "spotters = \"Default\"\n");
        let err = ModelBundle::from_folder(dir.path()).unwrap_err();
        assert!(matches!(err, ProviderError::ModelProperties { .. }));
    }
}
