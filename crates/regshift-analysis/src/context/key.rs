//! Context keys: ordered, hashable attribute tuples.

use std::fmt;

use regshift_core::types::collections::SmallVec8;
use serde::Serialize;

/// One attribute slot in a context key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    EventType,
    PartOfSpeech,
    LemmaOrForm,
    #[serde(rename = "is_proper_noun")]
    ProperNoun,
    RelationOrLabel,
    ParentPartOfSpeech,
    Features,
    Position,
}

impl Attribute {
    pub fn name(&self) -> &'static str {
        match self {
            Self::EventType => "event_type",
            Self::PartOfSpeech => "part_of_speech",
            Self::LemmaOrForm => "lemma_or_form",
            Self::ProperNoun => "is_proper_noun",
            Self::RelationOrLabel => "relation_or_label",
            Self::ParentPartOfSpeech => "parent_part_of_speech",
            Self::Features => "features",
            Self::Position => "position",
        }
    }
}

/// Value of one slot. `Unspecified` is distinct from `Text("")` and sorts first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum ContextValue {
    Unspecified,
    Flag(bool),
    Text(String),
}

impl ContextValue {
    pub fn text(value: Option<&str>) -> Self {
        value.map_or(Self::Unspecified, |v| Self::Text(v.to_string()))
    }

    pub fn flag(value: Option<bool>) -> Self {
        value.map_or(Self::Unspecified, Self::Flag)
    }
}

impl fmt::Display for ContextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unspecified => f.write_str("<unspecified>"),
            Self::Flag(b) => write!(f, "{b}"),
            Self::Text(s) => write!(f, "{s:?}"),
        }
    }
}

/// Values in the granularity's attribute order. Ordering is lexicographic
/// over the tuple, which is what breaks ranking ties.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContextKey {
    values: SmallVec8<ContextValue>,
}

/// Named view of one key slot, for serialization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyComponent {
    pub attribute: Attribute,
    pub value: ContextValue,
}

impl ContextKey {
    pub(crate) fn from_values(values: SmallVec8<ContextValue>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[ContextValue] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Pair each value with its attribute name.
    pub fn components(&self, attributes: &[Attribute]) -> Vec<KeyComponent> {
        attributes
            .iter()
            .zip(self.values.iter())
            .map(|(attribute, value)| KeyComponent {
                attribute: *attribute,
                value: value.clone(),
            })
            .collect()
    }
}

impl fmt::Display for ContextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str(")")
    }
}
