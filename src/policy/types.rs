//! Policy identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// A closed enumeration of interchangeable strategies of one kind.
pub trait Policy:
    Copy + Ord + fmt::Display + FromStr + IntoEnumIterator + Send + Sync + 'static
{
    /// Request parameter selecting this kind of policy.
    const PARAMETER: &'static str;

    /// Plural noun for the strategies, used in messages.
    const PLURAL: &'static str;
}

/// Spotting policies.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
pub enum SpotterPolicy {
    Default,
    LingPipeSpotter,
    AtLeastOneNounSelector,
    CoOccurrenceBased,
    NESpotter,
    KeyphraseSpotter,
    OpenNLPChunkerSpotter,
    WikiMarkupSpotter,
    SpotXmlSpotter,
}

impl Policy for SpotterPolicy {
    const PARAMETER: &'static str = "spotter";
    const PLURAL: &'static str = "spotters";
}

/// Disambiguation policies.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
pub enum DisambiguationPolicy {
    Default,
    Document,
    Occurrences,
    CuttingEdge,
}

impl Policy for DisambiguationPolicy {
    const PARAMETER: &'static str = "disambiguator";
    const PLURAL: &'static str = "disambiguators";
}
