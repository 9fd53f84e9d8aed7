//! The four context-derivation policies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::key::Attribute;

/// How much context a pattern key carries. Each level refines the previous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Minimal,
    Lexical,
    Syntactic,
    Full,
}

const MINIMAL: &[Attribute] = &[Attribute::EventType];

const LEXICAL: &[Attribute] = &[
    Attribute::EventType,
    Attribute::PartOfSpeech,
    Attribute::LemmaOrForm,
    Attribute::ProperNoun,
];

const SYNTACTIC: &[Attribute] = &[
    Attribute::EventType,
    Attribute::PartOfSpeech,
    Attribute::LemmaOrForm,
    Attribute::ProperNoun,
    Attribute::RelationOrLabel,
    Attribute::ParentPartOfSpeech,
];

const FULL: &[Attribute] = &[
    Attribute::EventType,
    Attribute::PartOfSpeech,
    Attribute::LemmaOrForm,
    Attribute::ProperNoun,
    Attribute::RelationOrLabel,
    Attribute::ParentPartOfSpeech,
    Attribute::Features,
    Attribute::Position,
];

impl Granularity {
    /// Coarsest first.
    pub const ALL: [Granularity; 4] = [Self::Minimal, Self::Lexical, Self::Syntactic, Self::Full];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Lexical => "lexical",
            Self::Syntactic => "syntactic",
            Self::Full => "full",
        }
    }

    /// Attributes making up the key, in key order. Always a prefix-extension
    /// of the previous level's list.
    pub fn attributes(&self) -> &'static [Attribute] {
        match self {
            Self::Minimal => MINIMAL,
            Self::Lexical => LEXICAL,
            Self::Syntactic => SYNTACTIC,
            Self::Full => FULL,
        }
    }

    /// Resolve config names; unknown names are skipped (config validation
    /// rejects them earlier).
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<Granularity> {
        let mut out: Vec<Granularity> = names.into_iter().filter_map(|n| n.parse().ok()).collect();
        out.sort();
        out.dedup();
        out
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|g| g.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown granularity `{s}`"))
    }
}
