//! Strategy interfaces and the annotation data model.

use std::fmt;

use serde::Serialize;

/// A token of the request text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub text: String,
    /// Byte offset of the token in the original text.
    pub offset: usize,
    pub stopword: bool,
}

impl Token {
    /// Byte offset one past the last byte of the token.
    pub fn end(&self) -> usize {
        self.offset + self.text.len()
    }
}

/// A span of text that matched a known surface form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceFormOccurrence {
    pub surface_form: String,
    /// Byte offset of the span in the original text.
    pub offset: usize,
    /// Index of the first token covered by the span.
    #[serde(skip)]
    pub token_start: usize,
    /// Number of tokens covered by the span.
    #[serde(skip)]
    pub token_len: usize,
}

/// A resource a surface form may refer to.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Resource local name (joined with the namespace prefix to form a URI).
    pub resource: String,
    pub support: u32,
    /// Share of this candidate in the total support of its surface form.
    pub prior: f64,
    /// Lowercased words that tend to appear near this resource.
    pub context: Vec<String>,
}

/// A candidate with a disambiguator-specific score in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub candidate: Candidate,
    pub score: f64,
}

/// An occurrence resolved to a single resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisambiguatedOccurrence {
    pub surface_form: String,
    pub offset: usize,
    pub resource: String,
    pub support: u32,
    pub similarity_score: f64,
    /// Score of the runner-up relative to the winner (0 when unambiguous).
    pub percentage_of_second_rank: f64,
}

/// Splits text into tokens.
pub trait TextTokenizer: Send + Sync + fmt::Debug {
    fn tokenize(&self, text: &str) -> Vec<Token>;
}

/// Identifies candidate spans for annotation.
pub trait Spotter: Send + Sync + fmt::Debug {
    /// Implementation name, for logs.
    fn name(&self) -> &'static str;

    /// Extract occurrences from `text`. `tokens` must come from `text`.
    fn extract(&self, text: &str, tokens: &[Token]) -> Vec<SurfaceFormOccurrence>;
}

/// Resolves spotted spans to specific resources.
pub trait Disambiguator: Send + Sync + fmt::Debug {
    /// Implementation name, for logs.
    fn name(&self) -> &'static str;

    /// Rank at most `k` candidates for one occurrence, best first.
    fn best_k(
        &self,
        tokens: &[Token],
        occurrence: &SurfaceFormOccurrence,
        k: usize,
    ) -> Vec<ScoredCandidate>;

    /// Pick the best candidate for every occurrence.
    ///
    /// Occurrences without any candidate are dropped.
    fn disambiguate(
        &self,
        tokens: &[Token],
        occurrences: &[SurfaceFormOccurrence],
    ) -> Vec<DisambiguatedOccurrence> {
        occurrences
            .iter()
            .filter_map(|occurrence| {
                let ranked = self.best_k(tokens, occurrence, 2);
                let best = ranked.first()?;
                let second = ranked.get(1).map_or(0.0, |c| c.score);
                let percentage_of_second_rank = if best.score > 0.0 {
                    second / best.score
                } else {
                    0.0
                };
                Some(DisambiguatedOccurrence {
                    surface_form: occurrence.surface_form.clone(),
                    offset: occurrence.offset,
                    resource: best.candidate.resource.clone(),
                    support: best.candidate.support,
                    similarity_score: best.score,
                    percentage_of_second_rank,
                })
            })
            .collect()
    }
}
