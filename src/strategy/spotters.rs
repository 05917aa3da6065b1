//! Reference spotters.
//!
//! - `LexiconSpotter`: greedy longest match of token windows against the lexicon
//! - `CoOccurrenceSelector`: keeps lexicon spots backed by co-occurring evidence
//! - `CapitalizedSelector`: keeps lexicon spots that look like names

use std::collections::HashSet;
use std::sync::Arc;

use crate::strategy::lexicon::Lexicon;
use crate::strategy::types::{Spotter, SurfaceFormOccurrence, Token};

/// Dictionary spotter over the shared lexicon.
#[derive(Debug, Clone)]
pub struct LexiconSpotter {
    lexicon: Arc<Lexicon>,
    case_sensitive: bool,
}

impl LexiconSpotter {
    pub fn new(lexicon: Arc<Lexicon>, case_sensitive: bool) -> Self {
        Self {
            lexicon,
            case_sensitive,
        }
    }
}

impl Spotter for LexiconSpotter {
    fn name(&self) -> &'static str {
        "LexiconSpotter"
    }

    fn extract(&self, text: &str, tokens: &[Token]) -> Vec<SurfaceFormOccurrence> {
        let mut occurrences = Vec::new();
        let mut i = 0;

        while i < tokens.len() {
            let widest = self.lexicon.max_tokens().min(tokens.len() - i);
            let start = tokens[i].offset;

            // Longest window first; lone stopwords never match.
            let matched = (1..=widest).rev().find_map(|len| {
                if len == 1 && tokens[i].stopword {
                    return None;
                }
                let surface = text.get(start..tokens[i + len - 1].end())?;
                self.lexicon
                    .lookup(surface, self.case_sensitive)
                    .map(|_| (len, surface))
            });

            match matched {
                Some((len, surface)) => {
                    occurrences.push(SurfaceFormOccurrence {
                        surface_form: surface.to_string(),
                        offset: start,
                        token_start: i,
                        token_len: len,
                    });
                    i += len;
                }
                None => i += 1,
            }
        }

        occurrences
    }
}

/// Keeps spots that other words in the text corroborate.
///
/// Multi-token spots are always kept. A single-token spot is kept when a
/// candidate's context words appear elsewhere in the text, or when it is
/// capitalized and its best candidate's prior reaches `unambiguous_prior`.
#[derive(Debug, Clone)]
pub struct CoOccurrenceSelector {
    base: LexiconSpotter,
    unambiguous_prior: f64,
}

impl CoOccurrenceSelector {
    pub fn new(lexicon: Arc<Lexicon>, case_sensitive: bool, unambiguous_prior: f64) -> Self {
        Self {
            base: LexiconSpotter::new(lexicon, case_sensitive),
            unambiguous_prior,
        }
    }

    fn corroborated(&self, occurrence: &SurfaceFormOccurrence, words: &HashSet<String>) -> bool {
        if occurrence.token_len > 1 {
            return true;
        }
        let Some(candidates) = self
            .base
            .lexicon
            .lookup(&occurrence.surface_form, self.base.case_sensitive)
        else {
            return false;
        };

        let own = occurrence.surface_form.to_lowercase();
        let co_occurs = candidates
            .iter()
            .flat_map(|c| c.context.iter())
            .any(|w| *w != own && words.contains(w));
        if co_occurs {
            return true;
        }

        starts_uppercase(&occurrence.surface_form)
            && candidates
                .first()
                .is_some_and(|best| best.prior >= self.unambiguous_prior)
    }
}

impl Spotter for CoOccurrenceSelector {
    fn name(&self) -> &'static str {
        "CoOccurrenceSelector"
    }

    fn extract(&self, text: &str, tokens: &[Token]) -> Vec<SurfaceFormOccurrence> {
        let words: HashSet<String> = tokens
            .iter()
            .filter(|t| !t.stopword)
            .map(|t| t.text.to_lowercase())
            .collect();

        self.base
            .extract(text, tokens)
            .into_iter()
            .filter(|occurrence| self.corroborated(occurrence, &words))
            .collect()
    }
}

/// Keeps spots whose surface form starts with an uppercase letter.
#[derive(Debug, Clone)]
pub struct CapitalizedSelector {
    base: LexiconSpotter,
}

impl CapitalizedSelector {
    pub fn new(lexicon: Arc<Lexicon>, case_sensitive: bool) -> Self {
        Self {
            base: LexiconSpotter::new(lexicon, case_sensitive),
        }
    }
}

impl Spotter for CapitalizedSelector {
    fn name(&self) -> &'static str {
        "CapitalizedSelector"
    }

    fn extract(&self, text: &str, tokens: &[Token]) -> Vec<SurfaceFormOccurrence> {
        self.base
            .extract(text, tokens)
            .into_iter()
            .filter(|occurrence| starts_uppercase(&occurrence.surface_form))
            .collect()
    }
}

fn starts_uppercase(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::tokenizer::SimpleTokenizer;
    use crate::strategy::types::TextTokenizer;

    const LEXICON: &str = "Berlin\tBerlin\t1200\tgermany,capital,city\n\
                           Berlin\tBerlin_(band)\t40\tband,music\n\
                           Germany\tGermany\t3000\tcountry,europe\n\
                           capital\tCapital_city\t500\tcity,government\n\
                           Angela Merkel\tAngela_Merkel\t800\tchancellor,germany\n\
                           the\tThe_(band)\t10\n";

    const TEXT: &str = "Angela Merkel lives in Berlin, the capital of Germany.";

    fn lexicon() -> Arc<Lexicon> {
        Arc::new(Lexicon::parse(LEXICON).unwrap())
    }

    fn surfaces(spotter: &dyn Spotter) -> Vec<String> {
        let tokens = SimpleTokenizer::with_stopwords(["the", "of", "in"]).tokenize(TEXT);
        spotter
            .extract(TEXT, &tokens)
            .into_iter()
            .map(|o| o.surface_form)
            .collect()
    }

    #[test]
    fn test_longest_match_wins() {
        let spotter = LexiconSpotter::new(lexicon(), true);
        assert_eq!(
            surfaces(&spotter),
            vec!["Angela Merkel", "Berlin", "capital", "Germany"]
        );
    }

    #[test]
    fn test_offsets_point_into_text() {
        let spotter = LexiconSpotter::new(lexicon(), true);
        let tokens = SimpleTokenizer::new().tokenize(TEXT);
        for occurrence in spotter.extract(TEXT, &tokens) {
            let end = occurrence.offset + occurrence.surface_form.len();
            assert_eq!(&TEXT[occurrence.offset..end], occurrence.surface_form);
        }
    }

    #[test]
    fn test_case_insensitive_matching() {
        let spotter = LexiconSpotter::new(lexicon(), false);
        let text = "GERMANY";
        let tokens = SimpleTokenizer::new().tokenize(text);
        assert_eq!(spotter.extract(text, &tokens).len(), 1);
    }

    #[test]
    fn test_co_occurrence_drops_uncorroborated_common_words() {
        let spotter = CoOccurrenceSelector::new(lexicon(), true, 0.9);
        assert_eq!(surfaces(&spotter), vec!["Angela Merkel", "Berlin", "Germany"]);
    }

    #[test]
    fn test_capitalized_selector() {
        let spotter = CapitalizedSelector::new(lexicon(), true);
        assert_eq!(surfaces(&spotter), vec!["Angela Merkel", "Berlin", "Germany"]);
    }
}
