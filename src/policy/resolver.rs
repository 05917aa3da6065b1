//! Policy name resolution.

use thiserror::Error;

use crate::observability::metrics;
use crate::policy::registry::Registry;
use crate::policy::types::Policy;

/// A recoverable, client-facing error in request input.
///
/// Messages are meant to be shown to the caller verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Specified parameter {parameter}={value} is invalid. Use one of {}.", list(.valid))]
    InvalidPolicy {
        parameter: &'static str,
        value: String,
        valid: Vec<String>,
    },

    #[error("No {plural} were loaded. Please add one of {}.", list(.available))]
    NothingLoaded {
        plural: &'static str,
        available: Vec<String>,
    },

    #[error("Specified {parameter}={requested} has not been loaded. Use one of {}.", list(.loaded))]
    NotLoaded {
        parameter: &'static str,
        requested: String,
        loaded: Vec<String>,
    },

    #[error("Specified parameter {parameter}={value} is out of range. Expected {expected}.")]
    OutOfRange {
        parameter: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("Missing required parameter {0}.")]
    MissingParameter(&'static str),
}

fn list(items: &[String]) -> String {
    format!("[{}]", items.join(", "))
}

fn names<P: Policy>(policies: impl IntoIterator<Item = P>) -> Vec<String> {
    policies.into_iter().map(|p| p.to_string()).collect()
}

/// Resolve a caller-supplied policy name against a populated registry.
///
/// 1. `name` must parse (case-exact) as a `P`
/// 2. the registry must hold at least one strategy
/// 3. the parsed policy must be loaded
pub fn resolve<P, V>(registry: &Registry<P, V>, name: &str) -> Result<V, InputError>
where
    P: Policy,
    V: Clone,
{
    let outcome = lookup(registry, name);
    metrics::record_resolution(
        P::PARAMETER,
        match &outcome {
            Ok(_) => "resolved",
            Err(InputError::InvalidPolicy { .. }) => "invalid",
            Err(_) => "not_loaded",
        },
    );
    outcome
}

fn lookup<P, V>(registry: &Registry<P, V>, name: &str) -> Result<V, InputError>
where
    P: Policy,
    V: Clone,
{
    let policy: P = name.parse().map_err(|_| InputError::InvalidPolicy {
        parameter: P::PARAMETER,
        value: name.to_string(),
        valid: names(P::iter()),
    })?;

    if registry.is_empty() {
        return Err(InputError::NothingLoaded {
            plural: P::PLURAL,
            available: names(registry.keys()),
        });
    }

    registry
        .get(&policy)
        .cloned()
        .ok_or_else(|| InputError::NotLoaded {
            parameter: P::PARAMETER,
            requested: name.to_string(),
            loaded: names(registry.keys()),
        })
}
