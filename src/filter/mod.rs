//! Annotation filtering.
//!
//! # Data Flow
//! ```text
//! disambiguated occurrences + request thresholds (confidence, support)
//!     → combined.rs (configured filter chain)   if the service has one
//!     → apply_thresholds                        otherwise
//!     → annotations returned to the caller
//! ```

pub mod combined;

pub use combined::{
    AnnotationFilter, BlacklistFilter, CombinedFilters, ConfidenceFilter, SupportFilter,
};

use crate::strategy::DisambiguatedOccurrence;

/// Per-request filtering thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Minimum similarity score, in `[0, 1]`.
    pub confidence: f64,
    /// Minimum resource support.
    pub support: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            confidence: 0.0,
            support: 0,
        }
    }
}

/// Filtering used when no combined filter chain is configured.
pub fn apply_thresholds(
    occurrences: Vec<DisambiguatedOccurrence>,
    thresholds: &Thresholds,
) -> Vec<DisambiguatedOccurrence> {
    occurrences
        .into_iter()
        .filter(|o| o.similarity_score >= thresholds.confidence && o.support >= thresholds.support)
        .collect()
}
