//! Annotation strategies.
//!
//! # Data Flow
//! ```text
//! request text
//!     → tokenizer.rs (tokens with byte offsets)
//!     → spotters.rs (surface form occurrences)
//!     → disambiguators.rs (ranked candidates per occurrence)
//!     → filter subsystem (confidence / support / blacklist)
//! ```
//!
//! # Design Decisions
//! - Strategies are trait objects (`Arc<dyn Spotter>`), built once at startup
//! - All reference strategies share one immutable `Lexicon`
//! - Strategies hold no per-request state and are safe to call concurrently

pub mod disambiguators;
pub mod lexicon;
pub mod spotters;
pub mod tokenizer;
pub mod types;

pub use lexicon::{Lexicon, LexiconError};
pub use tokenizer::SimpleTokenizer;
pub use types::{
    Candidate, DisambiguatedOccurrence, Disambiguator, ScoredCandidate, Spotter,
    SurfaceFormOccurrence, TextTokenizer, Token,
};
