//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::policy::{DisambiguationPolicy, SpotterPolicy};

/// Namespace used when neither the configuration nor a model names one.
pub const DEFAULT_NAMESPACE: &str = "http://dbpedia.org/resource/";

/// Root configuration for the annotation service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (server URI, body limits).
    pub listener: ListenerConfig,

    /// Resource naming.
    pub service: NamingConfig,

    /// Which strategies to load and how to build them.
    pub strategies: StrategyConfig,

    /// Annotation filter chain.
    pub filters: FilterConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Admin endpoints.
    pub admin: AdminConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// URI the service listens on; its path is the mount point of the
    /// annotation resources (e.g., "http://localhost:2222/rest/").
    pub server_uri: String,

    /// Maximum accepted request body in bytes.
    pub max_body_bytes: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            server_uri: "http://localhost:2222/rest/".to_string(),
            max_body_bytes: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// How resources are named towards clients.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Prepended to a resource's local name to form its URI.
    pub namespace_prefix: String,

    /// Public base URI of the service, reported to clients.
    pub public_base_uri: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            namespace_prefix: DEFAULT_NAMESPACE.to_string(),
            public_base_uri: "http://localhost:2222/rest".to_string(),
        }
    }
}

/// Strategy selection and parameters.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StrategyConfig {
    /// Lexicon file (relative paths resolve against the config file).
    pub lexicon_path: Option<PathBuf>,

    /// Spotting policies to load.
    pub spotters: Vec<SpotterPolicy>,

    /// Disambiguation policies to load.
    pub disambiguators: Vec<DisambiguationPolicy>,

    /// Match surface forms case-sensitively.
    pub case_sensitive: bool,

    /// Tokens on each side of an occurrence used by the `Occurrences` policy.
    pub context_window: usize,

    /// Weight of the prior against context overlap, in `[0, 1]`.
    pub prior_weight: f64,

    /// Prior above which a capitalized single-token spot needs no corroboration.
    pub unambiguous_prior: f64,

    /// Words flagged as stopwords by the tokenizer.
    pub stopwords: Vec<String>,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            lexicon_path: None,
            spotters: vec![SpotterPolicy::Default],
            disambiguators: vec![DisambiguationPolicy::Default],
            case_sensitive: true,
            context_window: 10,
            prior_weight: 0.5,
            unambiguous_prior: 0.9,
            stopwords: Vec::new(),
        }
    }
}

/// Annotation filter chain configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Build the combined filter chain.
    pub enabled: bool,

    /// Confidence floor applied even when a request asks for less.
    pub min_confidence: f64,

    /// Support floor applied even when a request asks for less.
    pub min_support: u32,

    /// Resource local names never returned.
    pub blacklist: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_confidence: 0.0,
            min_support: 0,
            blacklist: Vec::new(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout in seconds.
    pub request_secs: u64,

    /// Time allowed for in-flight requests to drain on shutdown, in seconds.
    pub shutdown_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 30,
            shutdown_secs: 10,
        }
    }
}

/// Admin endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Enable the admin endpoints.
    pub enabled: bool,

    /// API key for authentication (Bearer token).
    pub api_key: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            // WARNING: This is a placeholder! Change this in production.
            api_key: "CHANGE_ME_IN_PRODUCTION".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
