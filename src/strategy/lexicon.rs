//! Surface form lexicon shared by the reference strategies.
//!
//! # Format
//! ```text
//! # surface <TAB> resource <TAB> support [<TAB> comma,separated,context]
//! Berlin	Berlin	1200	germany,capital,city
//! Berlin	Berlin_(band)	40	band,music
//! ```
//!
//! Blank lines and lines starting with `#` are ignored.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::strategy::tokenizer::SimpleTokenizer;
use crate::strategy::types::{Candidate, TextTokenizer};

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("cannot read lexicon {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed lexicon line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

/// Immutable mapping from surface forms to ranked candidates.
#[derive(Debug, Default)]
pub struct Lexicon {
    forms: HashMap<String, Vec<Candidate>>,
    /// Candidates of every casing of a surface form, keyed by its lowercase.
    folded: HashMap<String, Vec<Candidate>>,
    /// Longest surface form, in tokens.
    max_tokens: usize,
}

impl Lexicon {
    /// Build a lexicon from `(surface form, resource, support, context)` entries.
    ///
    /// Priors are computed per surface form from the support counts. The
    /// case-insensitive view merges all casings of a form; a resource listed
    /// under several casings appears once with the summed support.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, String, u32, Vec<String>)>,
    {
        let tokenizer = SimpleTokenizer::new();
        let mut lexicon = Self::default();

        for (surface, resource, support, context) in entries {
            let width = tokenizer.tokenize(&surface).len();
            lexicon.max_tokens = lexicon.max_tokens.max(width);

            let merged = lexicon.folded.entry(surface.to_lowercase()).or_default();
            match merged.iter_mut().find(|c| c.resource == resource) {
                Some(existing) => {
                    existing.support = existing.support.saturating_add(support);
                    for word in &context {
                        if !existing.context.contains(word) {
                            existing.context.push(word.clone());
                        }
                    }
                }
                None => merged.push(Candidate {
                    resource: resource.clone(),
                    support,
                    prior: 0.0,
                    context: context.clone(),
                }),
            }

            lexicon.forms.entry(surface).or_default().push(Candidate {
                resource,
                support,
                prior: 0.0,
                context,
            });
        }

        lexicon.forms.values_mut().for_each(|c| rank(c));
        lexicon.folded.values_mut().for_each(|c| rank(c));
        lexicon
    }

    /// Parse the tab separated lexicon format.
    pub fn parse(input: &str) -> Result<Self, LexiconError> {
        let mut entries = Vec::new();

        for (index, raw) in input.lines().enumerate() {
            let line = index + 1;
            let trimmed = raw.trim_end_matches('\r');
            if trimmed.trim().is_empty() || trimmed.trim_start().starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = trimmed.split('\t').collect();
            if fields.len() < 3 || fields.len() > 4 {
                return Err(LexiconError::Malformed {
                    line,
                    reason: format!("expected 3 or 4 tab separated fields, found {}", fields.len()),
                });
            }

            let surface = fields[0].trim();
            let resource = fields[1].trim();
            if surface.is_empty() || resource.is_empty() {
                return Err(LexiconError::Malformed {
                    line,
                    reason: "surface form and resource must not be empty".to_string(),
                });
            }

            let support: u32 = fields[2].trim().parse().map_err(|_| LexiconError::Malformed {
                line,
                reason: format!("support '{}' is not a non-negative integer", fields[2].trim()),
            })?;

            let context = fields
                .get(3)
                .map(|ctx| {
                    ctx.split(',')
                        .map(|w| w.trim().to_lowercase())
                        .filter(|w| !w.is_empty())
                        .collect()
                })
                .unwrap_or_default();

            entries.push((surface.to_string(), resource.to_string(), support, context));
        }

        Ok(Self::from_entries(entries))
    }

    /// Read and parse a lexicon file.
    pub fn load(path: &Path) -> Result<Self, LexiconError> {
        let content = fs::read_to_string(path).map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let lexicon = Self::parse(&content)?;

        tracing::info!(
            path = %path.display(),
            surface_forms = lexicon.len(),
            "Lexicon loaded"
        );
        Ok(lexicon)
    }

    /// Candidates for a surface form, best supported first.
    pub fn lookup(&self, surface: &str, case_sensitive: bool) -> Option<&[Candidate]> {
        if case_sensitive {
            return self.forms.get(surface).map(Vec::as_slice);
        }
        self.folded.get(&surface.to_lowercase()).map(Vec::as_slice)
    }

    pub fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}

/// Set priors from support counts and order best supported first.
fn rank(candidates: &mut [Candidate]) {
    let total: u64 = candidates.iter().map(|c| u64::from(c.support)).sum();
    let count = candidates.len() as f64;
    for candidate in candidates.iter_mut() {
        candidate.prior = if total == 0 {
            1.0 / count
        } else {
            f64::from(candidate.support) / total as f64
        };
    }
    candidates.sort_by(|a, b| {
        b.support
            .cmp(&a.support)
            .then_with(|| a.resource.cmp(&b.resource))
    });
}
