//! Startup orchestration.
//!
//! # Responsibilities
//! - Decide the startup mode from the command line, once
//! - Load configuration or a model folder
//! - Populate both policy registries in one step each
//! - Resolve the listener address
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Subsystems initialize in order, not concurrently
//! - Listeners start last (traffic only when ready), see controller.rs

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::{self, ConfigError, ServiceConfig, DEFAULT_NAMESPACE};
use crate::filter::CombinedFilters;
use crate::lifecycle::context::ServiceContext;
use crate::net::{ListenerAddress, ListenerError};
use crate::observability::metrics;
use crate::policy::InitializationError;
use crate::provider::{ModelBundle, ProviderError, StrategyFactory, StrategyProvider};

/// How the service was asked to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupMode {
    /// Mode A: everything comes from a configuration file.
    ConfigFile { path: PathBuf },
    /// Mode B: a pre-built model folder plus an explicit listener URI.
    ModelFolder { folder: PathBuf, listener_uri: String },
}

impl StartupMode {
    /// Classify the positional arguments.
    ///
    /// A directory selects Mode B and requires the listener URI; anything
    /// else is treated as a configuration file and takes no further argument.
    /// A path that does not exist but is followed by a URI is reported as a
    /// missing model folder.
    pub fn from_args(
        input: Option<PathBuf>,
        listener_uri: Option<String>,
    ) -> Result<Self, StartupError> {
        let input = input.ok_or_else(|| {
            StartupError::Usage("missing configuration file or model folder".to_string())
        })?;

        if input.is_dir() {
            let listener_uri = listener_uri.ok_or_else(|| {
                StartupError::Usage(format!(
                    "model folder {} needs a listener URI",
                    input.display()
                ))
            })?;
            Ok(StartupMode::ModelFolder {
                folder: input,
                listener_uri,
            })
        } else if listener_uri.is_some() && !input.exists() {
            Err(StartupError::Usage(format!(
                "model folder {} does not exist",
                input.display()
            )))
        } else {
            if let Some(extra) = listener_uri {
                return Err(StartupError::Usage(format!(
                    "unexpected argument '{}' after configuration file {}",
                    extra,
                    input.display()
                )));
            }
            Ok(StartupMode::ConfigFile { path: input })
        }
    }
}

/// Error raised while bringing the service up.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("{0}")]
    Usage(String),

    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Provider(#[from] ProviderError),

    #[error("{0}")]
    Initialization(#[from] InitializationError),

    #[error("{0}")]
    Listener(#[from] ListenerError),

    #[error("server error: {0}")]
    Server(std::io::Error),
}

impl StartupError {
    /// Whether the command line itself was wrong.
    pub fn is_usage(&self) -> bool {
        matches!(self, StartupError::Usage(_))
    }
}

/// A populated context and the address it should be served on.
#[derive(Debug)]
pub struct Configured {
    pub context: ServiceContext,
    pub address: ListenerAddress,
}

/// Load everything the startup mode asks for.
pub fn configure(mode: &StartupMode) -> Result<Configured, StartupError> {
    match mode {
        StartupMode::ConfigFile { path } => configure_from_file(path),
        StartupMode::ModelFolder {
            folder,
            listener_uri,
        } => configure_from_model(folder, listener_uri),
    }
}

fn configure_from_file(path: &Path) -> Result<Configured, StartupError> {
    let config = config::load_config(path)?;
    let address = ListenerAddress::parse(&config.listener.server_uri)?;
    let factory = StrategyFactory::new(&config)?;

    let filters = config
        .filters
        .enabled
        .then(|| CombinedFilters::from_config(&config.filters));

    let mut context = ServiceContext::new(config);
    populate(&context, &factory)?;
    if let Some(filters) = filters {
        tracing::debug!(filters = filters.len(), "Combined filters configured");
        context.set_combined_filters(filters);
    }

    Ok(Configured { context, address })
}

fn configure_from_model(folder: &Path, listener_uri: &str) -> Result<Configured, StartupError> {
    let address = ListenerAddress::parse(listener_uri)?;
    let bundle = ModelBundle::from_folder(folder)?;

    let mut config = ServiceConfig::default();
    config.listener.server_uri = listener_uri.to_string();
    config.service.public_base_uri = listener_uri.trim_end_matches('/').to_string();

    let namespace = match &bundle.properties().namespace {
        Some(namespace) => namespace.clone(),
        None => {
            tracing::warn!(
                folder = %bundle.folder().display(),
                default = DEFAULT_NAMESPACE,
                "Model does not name a namespace, using default"
            );
            DEFAULT_NAMESPACE.to_string()
        }
    };
    config.service.namespace_prefix = namespace.clone();

    let mut context = ServiceContext::new(config);
    populate(&context, &bundle)?;
    context.set_namespace_prefix(namespace);
    context.set_tokenizer(bundle.tokenizer());

    Ok(Configured { context, address })
}

/// Fill both registries of `context` from `provider`.
///
/// Each registry is written once; calling this a second time on the same
/// context fails with an initialization error.
pub fn populate(
    context: &ServiceContext,
    provider: &dyn StrategyProvider,
) -> Result<(), StartupError> {
    let spotters = provider.spotters()?;
    let disambiguators = provider.disambiguators()?;

    context.set_spotters(spotters)?;
    context.set_disambiguators(disambiguators)?;

    metrics::record_loaded("spotter", context.spotter_count());
    metrics::record_loaded("disambiguator", context.disambiguator_count());

    Ok(())
}
