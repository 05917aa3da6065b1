//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::ServiceConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "IO error reading {}: {}", path.display(), e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate configuration from a TOML file.
///
/// A relative `strategies.lexicon_path` is resolved against the directory
/// holding the configuration file.
pub fn load_config(path: &Path) -> Result<ServiceConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
    let mut config = parse_config(&content)?;

    if let (Some(lexicon), Some(dir)) = (&config.strategies.lexicon_path, path.parent()) {
        if lexicon.is_relative() {
            config.strategies.lexicon_path = Some(dir.join(lexicon));
        }
    }

    validate_config(&config).map_err(ConfigError::Validation)?;

    tracing::info!(
        path = %path.display(),
        server_uri = %config.listener.server_uri,
        spotters = config.strategies.spotters.len(),
        disambiguators = config.strategies.disambiguators.len(),
        "Configuration loaded"
    );
    Ok(config)
}

/// Parse configuration text without validating it.
pub fn parse_config(content: &str) -> Result<ServiceConfig, ConfigError> {
    toml::from_str(content).map_err(ConfigError::Parse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::SpotterPolicy;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = parse_config("[strategies]\nlexicon_path = \"lexicon.tsv\"\n").unwrap();
        assert_eq!(config.listener.server_uri, "http://localhost:2222/rest/");
        assert_eq!(config.strategies.spotters, vec![SpotterPolicy::Default]);
        assert!(config.filters.enabled);
        assert!(!config.admin.enabled);
    }

    #[test]
    fn test_policy_names_are_checked_at_parse_time() {
        let err = parse_config("[strategies]\nspotters = [\"Bogus\"]\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_relative_lexicon_resolves_next_to_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("service.toml");
        fs::write(&path, "[strategies]\nlexicon_path = \"data/lexicon.tsv\"\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(
            config.strategies.lexicon_path.unwrap(),
            dir.path().join("data/lexicon.tsv")
        );
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/service.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(..)));
        assert!(err.to_string().contains("/nonexistent/service.toml"));
    }

    #[test]
    fn test_validation_errors_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("service.toml");
        fs::write(&path, "[listener]\nserver_uri = \"not a uri\"\n").unwrap();

        match load_config(&path).unwrap_err() {
            ConfigError::Validation(errors) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected error: {other}"),
        }
    }
}
