//! Reference disambiguators.

use std::collections::HashSet;
use std::sync::Arc;

use crate::strategy::lexicon::Lexicon;
use crate::strategy::types::{Disambiguator, ScoredCandidate, SurfaceFormOccurrence, Token};

/// Ranks candidates by their prior alone.
#[derive(Debug, Clone)]
pub struct PriorDisambiguator {
    lexicon: Arc<Lexicon>,
    case_sensitive: bool,
}

impl PriorDisambiguator {
    pub fn new(lexicon: Arc<Lexicon>, case_sensitive: bool) -> Self {
        Self {
            lexicon,
            case_sensitive,
        }
    }
}

impl Disambiguator for PriorDisambiguator {
    fn name(&self) -> &'static str {
        "PriorDisambiguator"
    }

    fn best_k(
        &self,
        _tokens: &[Token],
        occurrence: &SurfaceFormOccurrence,
        k: usize,
    ) -> Vec<ScoredCandidate> {
        let Some(candidates) = self
            .lexicon
            .lookup(&occurrence.surface_form, self.case_sensitive)
        else {
            return Vec::new();
        };

        // Lexicon candidates are already sorted by support, i.e. by prior.
        candidates
            .iter()
            .take(k)
            .map(|c| ScoredCandidate {
                candidate: c.clone(),
                score: c.prior,
            })
            .collect()
    }
}

/// Mixes the prior with the overlap between a candidate's context words and
/// the words around the occurrence.
///
/// With `window == None` the whole text is the context; otherwise only
/// `window` tokens on each side of the occurrence are considered.
#[derive(Debug, Clone)]
pub struct ContextDisambiguator {
    lexicon: Arc<Lexicon>,
    case_sensitive: bool,
    window: Option<usize>,
    prior_weight: f64,
}

impl ContextDisambiguator {
    pub fn new(
        lexicon: Arc<Lexicon>,
        case_sensitive: bool,
        window: Option<usize>,
        prior_weight: f64,
    ) -> Self {
        Self {
            lexicon,
            case_sensitive,
            window,
            prior_weight: prior_weight.clamp(0.0, 1.0),
        }
    }

    fn context_words(
        &self,
        tokens: &[Token],
        occurrence: &SurfaceFormOccurrence,
    ) -> HashSet<String> {
        let first = occurrence.token_start;
        let last = first + occurrence.token_len;
        let (from, to) = match self.window {
            Some(w) => (first.saturating_sub(w), (last + w).min(tokens.len())),
            None => (0, tokens.len()),
        };

        tokens[from.min(tokens.len())..to]
            .iter()
            .enumerate()
            .filter(|(i, t)| {
                let index = from + i;
                !t.stopword && !(first..last).contains(&index)
            })
            .map(|(_, t)| t.text.to_lowercase())
            .collect()
    }
}

impl Disambiguator for ContextDisambiguator {
    fn name(&self) -> &'static str {
        "ContextDisambiguator"
    }

    fn best_k(
        &self,
        tokens: &[Token],
        occurrence: &SurfaceFormOccurrence,
        k: usize,
    ) -> Vec<ScoredCandidate> {
        let Some(candidates) = self
            .lexicon
            .lookup(&occurrence.surface_form, self.case_sensitive)
        else {
            return Vec::new();
        };

        let words = self.context_words(tokens, occurrence);
        let mut scored: Vec<ScoredCandidate> = candidates
            .iter()
            .map(|c| {
                let overlap = c.context.iter().filter(|w| words.contains(*w)).count();
                let coverage = overlap as f64 / c.context.len().max(1) as f64;
                ScoredCandidate {
                    candidate: c.clone(),
                    score: self.prior_weight * c.prior + (1.0 - self.prior_weight) * coverage,
                }
            })
            .collect();

        let total: f64 = scored.iter().map(|c| c.score).sum();
        if total > 0.0 {
            for c in &mut scored {
                c.score /= total;
            }
        }

        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(k);
        scored
    }
}
