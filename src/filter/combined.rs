//! Configured filter chain.

use std::collections::HashSet;
use std::fmt;

use crate::config::FilterConfig;
use crate::filter::Thresholds;
use crate::strategy::DisambiguatedOccurrence;

/// One stage of the filter chain.
pub trait AnnotationFilter: Send + Sync + fmt::Debug {
    fn keep(&self, occurrence: &DisambiguatedOccurrence, thresholds: &Thresholds) -> bool;
}

/// Drops annotations below the requested (or configured minimum) confidence.
#[derive(Debug, Clone)]
pub struct ConfidenceFilter {
    pub floor: f64,
}

impl AnnotationFilter for ConfidenceFilter {
    fn keep(&self, occurrence: &DisambiguatedOccurrence, thresholds: &Thresholds) -> bool {
        occurrence.similarity_score >= thresholds.confidence.max(self.floor)
    }
}

/// Drops annotations of resources below the requested (or configured minimum) support.
#[derive(Debug, Clone)]
pub struct SupportFilter {
    pub floor: u32,
}

impl AnnotationFilter for SupportFilter {
    fn keep(&self, occurrence: &DisambiguatedOccurrence, thresholds: &Thresholds) -> bool {
        occurrence.support >= thresholds.support.max(self.floor)
    }
}

/// Drops annotations of listed resources.
#[derive(Debug, Clone)]
pub struct BlacklistFilter {
    resources: HashSet<String>,
}

impl BlacklistFilter {
    pub fn new<I: IntoIterator<Item = String>>(resources: I) -> Self {
        Self {
            resources: resources.into_iter().collect(),
        }
    }
}

impl AnnotationFilter for BlacklistFilter {
    fn keep(&self, occurrence: &DisambiguatedOccurrence, _thresholds: &Thresholds) -> bool {
        !self.resources.contains(&occurrence.resource)
    }
}

/// All configured filters, applied in sequence.
#[derive(Debug)]
pub struct CombinedFilters {
    filters: Vec<Box<dyn AnnotationFilter>>,
}

impl CombinedFilters {
    pub fn new(filters: Vec<Box<dyn AnnotationFilter>>) -> Self {
        Self { filters }
    }

    pub fn from_config(config: &FilterConfig) -> Self {
        let mut filters: Vec<Box<dyn AnnotationFilter>> = vec![
            Box::new(ConfidenceFilter {
                floor: config.min_confidence,
            }),
            Box::new(SupportFilter {
                floor: config.min_support,
            }),
        ];
        if !config.blacklist.is_empty() {
            filters.push(Box::new(BlacklistFilter::new(config.blacklist.iter().cloned())));
        }
        Self::new(filters)
    }

    pub fn filter(
        &self,
        occurrences: Vec<DisambiguatedOccurrence>,
        thresholds: &Thresholds,
    ) -> Vec<DisambiguatedOccurrence> {
        occurrences
            .into_iter()
            .filter(|o| self.filters.iter().all(|f| f.keep(o, thresholds)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}
