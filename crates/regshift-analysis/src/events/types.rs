//! Typed edit events.
//!
//! Raw records are loosely-typed field maps; by the time anything downstream
//! sees an event it is one of two closed variants, each exposing the same
//! attribute surface through [`EditEvent`].

use std::fmt;

use regshift_core::types::SourceLayer;
use serde::{Deserialize, Serialize};

/// Normalized event category. One per recognized raw `event_type` family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    DepTokensAdded,
    DepTokensRemoved,
    DepTokensReordered,
    DepFormChanged,
    DepLemmaChanged,
    DepPosChanged,
    DepFeatsChanged,
    DepDeprelChanged,
    ConstWordsAdded,
    ConstWordsRemoved,
    ConstPosChanged,
    ConstConstituentsAdded,
    ConstConstituentsRemoved,
}

/// What kind of edit a category describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Added,
    Removed,
    Reordered,
    /// An attribute of a retained element changed value.
    Changed,
}

impl EventCategory {
    pub const ALL: [EventCategory; 13] = [
        Self::DepTokensAdded,
        Self::DepTokensRemoved,
        Self::DepTokensReordered,
        Self::DepFormChanged,
        Self::DepLemmaChanged,
        Self::DepPosChanged,
        Self::DepFeatsChanged,
        Self::DepDeprelChanged,
        Self::ConstWordsAdded,
        Self::ConstWordsRemoved,
        Self::ConstPosChanged,
        Self::ConstConstituentsAdded,
        Self::ConstConstituentsRemoved,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::DepTokensAdded => "dep_tokens_added",
            Self::DepTokensRemoved => "dep_tokens_removed",
            Self::DepTokensReordered => "dep_tokens_reordered",
            Self::DepFormChanged => "dep_form_changed",
            Self::DepLemmaChanged => "dep_lemma_changed",
            Self::DepPosChanged => "dep_pos_changed",
            Self::DepFeatsChanged => "dep_feats_changed",
            Self::DepDeprelChanged => "dep_deprel_changed",
            Self::ConstWordsAdded => "const_words_added",
            Self::ConstWordsRemoved => "const_words_removed",
            Self::ConstPosChanged => "const_pos_changed",
            Self::ConstConstituentsAdded => "const_constituents_added",
            Self::ConstConstituentsRemoved => "const_constituents_removed",
        }
    }

    pub fn layer(&self) -> SourceLayer {
        match self {
            Self::DepTokensAdded
            | Self::DepTokensRemoved
            | Self::DepTokensReordered
            | Self::DepFormChanged
            | Self::DepLemmaChanged
            | Self::DepPosChanged
            | Self::DepFeatsChanged
            | Self::DepDeprelChanged => SourceLayer::Dependency,
            Self::ConstWordsAdded
            | Self::ConstWordsRemoved
            | Self::ConstPosChanged
            | Self::ConstConstituentsAdded
            | Self::ConstConstituentsRemoved => SourceLayer::Constituency,
        }
    }

    pub fn change_kind(&self) -> ChangeKind {
        match self {
            Self::DepTokensAdded | Self::ConstWordsAdded | Self::ConstConstituentsAdded => {
                ChangeKind::Added
            }
            Self::DepTokensRemoved | Self::ConstWordsRemoved | Self::ConstConstituentsRemoved => {
                ChangeKind::Removed
            }
            Self::DepTokensReordered => ChangeKind::Reordered,
            Self::DepFormChanged
            | Self::DepLemmaChanged
            | Self::DepPosChanged
            | Self::DepFeatsChanged
            | Self::DepDeprelChanged
            | Self::ConstPosChanged => ChangeKind::Changed,
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where the edited element sits relative to the aligned material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionClass {
    Before,
    Within,
    After,
}

impl PositionClass {
    /// Case-insensitive parse; anything else is `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "before" => Some(Self::Before),
            "within" => Some(Self::Within),
            "after" => Some(Self::After),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::Within => "within",
            Self::After => "after",
        }
    }
}

/// Attribute surface shared by both event variants.
///
/// Accessors return `None` for attributes the record did not carry; the
/// context builder turns those into an explicit unspecified marker.
pub trait EditEvent {
    fn pair_index(&self) -> u64;
    fn category(&self) -> EventCategory;
    fn part_of_speech(&self) -> Option<&str>;
    /// Lemma when known, else the surface form.
    fn lemma_or_form(&self) -> Option<&str>;
    fn is_proper_noun(&self) -> Option<bool>;
    /// Dependency relation (dependency layer) or constituent label (constituency layer).
    fn relation_or_label(&self) -> Option<&str>;
    fn parent_part_of_speech(&self) -> Option<&str>;
    /// Morphological features, normalized `Name=Value|...` sorted by name.
    fn features(&self) -> Option<&str>;
    fn position(&self) -> Option<PositionClass>;
    /// Numeric side-channel (tree-edit distance) if one was supplied and parsed.
    fn distance(&self) -> Option<f64>;
    fn explicit_outcome(&self) -> Option<&str>;
    fn new_value(&self) -> Option<&str>;

    fn layer(&self) -> SourceLayer {
        self.category().layer()
    }

    /// Concrete outcome tallied into the owning pattern.
    fn outcome(&self) -> &str {
        if let Some(explicit) = self.explicit_outcome() {
            return explicit;
        }
        match self.category().change_kind() {
            ChangeKind::Added => OUTCOME_ADDED,
            ChangeKind::Removed => OUTCOME_DELETED,
            ChangeKind::Reordered => OUTCOME_REORDERED,
            ChangeKind::Changed => self.new_value().unwrap_or(OUTCOME_CHANGED),
        }
    }
}

pub const OUTCOME_ADDED: &str = "added";
pub const OUTCOME_DELETED: &str = "deleted";
pub const OUTCOME_REORDERED: &str = "reordered";
pub const OUTCOME_CHANGED: &str = "changed";

/// Edit observed between two dependency parses.
#[derive(Debug, Clone, PartialEq)]
pub struct DependencyEvent {
    pub pair_index: u64,
    pub category: EventCategory,
    pub form: Option<String>,
    pub lemma: Option<String>,
    pub upos: Option<String>,
    pub feats: Option<String>,
    pub deprel: Option<String>,
    pub head_upos: Option<String>,
    pub position: Option<PositionClass>,
    pub proper_noun: Option<bool>,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub outcome: Option<String>,
    pub distance: Option<f64>,
}

/// Edit observed between two constituency parses.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstituencyEvent {
    pub pair_index: u64,
    pub category: EventCategory,
    pub word: Option<String>,
    pub lemma: Option<String>,
    pub pos: Option<String>,
    pub label: Option<String>,
    pub parent_label: Option<String>,
    pub position: Option<PositionClass>,
    pub proper_noun: Option<bool>,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub outcome: Option<String>,
    pub tree_edit_distance: Option<f64>,
}

impl DependencyEvent {
    /// Bare event with every optional attribute absent.
    pub fn new(pair_index: u64, category: EventCategory) -> Self {
        Self {
            pair_index,
            category,
            form: None,
            lemma: None,
            upos: None,
            feats: None,
            deprel: None,
            head_upos: None,
            position: None,
            proper_noun: None,
            old_value: None,
            new_value: None,
            outcome: None,
            distance: None,
        }
    }
}

impl ConstituencyEvent {
    /// Bare event with every optional attribute absent.
    pub fn new(pair_index: u64, category: EventCategory) -> Self {
        Self {
            pair_index,
            category,
            word: None,
            lemma: None,
            pos: None,
            label: None,
            parent_label: None,
            position: None,
            proper_noun: None,
            old_value: None,
            new_value: None,
            outcome: None,
            tree_edit_distance: None,
        }
    }
}

impl EditEvent for DependencyEvent {
    fn pair_index(&self) -> u64 {
        self.pair_index
    }
    fn category(&self) -> EventCategory {
        self.category
    }
    fn part_of_speech(&self) -> Option<&str> {
        self.upos.as_deref()
    }
    fn lemma_or_form(&self) -> Option<&str> {
        self.lemma.as_deref().or(self.form.as_deref())
    }
    fn is_proper_noun(&self) -> Option<bool> {
        self.proper_noun
    }
    fn relation_or_label(&self) -> Option<&str> {
        self.deprel.as_deref()
    }
    fn parent_part_of_speech(&self) -> Option<&str> {
        self.head_upos.as_deref()
    }
    fn features(&self) -> Option<&str> {
        self.feats.as_deref()
    }
    fn position(&self) -> Option<PositionClass> {
        self.position
    }
    fn distance(&self) -> Option<f64> {
        self.distance
    }
    fn explicit_outcome(&self) -> Option<&str> {
        self.outcome.as_deref()
    }
    fn new_value(&self) -> Option<&str> {
        self.new_value.as_deref()
    }
}

impl EditEvent for ConstituencyEvent {
    fn pair_index(&self) -> u64 {
        self.pair_index
    }
    fn category(&self) -> EventCategory {
        self.category
    }
    fn part_of_speech(&self) -> Option<&str> {
        self.pos.as_deref()
    }
    fn lemma_or_form(&self) -> Option<&str> {
        self.lemma.as_deref().or(self.word.as_deref())
    }
    fn is_proper_noun(&self) -> Option<bool> {
        self.proper_noun
    }
    fn relation_or_label(&self) -> Option<&str> {
        self.label.as_deref()
    }
    fn parent_part_of_speech(&self) -> Option<&str> {
        self.parent_label.as_deref()
    }
    fn features(&self) -> Option<&str> {
        None
    }
    fn position(&self) -> Option<PositionClass> {
        self.position
    }
    fn distance(&self) -> Option<f64> {
        self.tree_edit_distance
    }
    fn explicit_outcome(&self) -> Option<&str> {
        self.outcome.as_deref()
    }
    fn new_value(&self) -> Option<&str> {
        self.new_value.as_deref()
    }
}

/// One accepted edit event, from either layer.
#[derive(Debug, Clone, PartialEq)]
pub enum EventInstance {
    Dependency(DependencyEvent),
    Constituency(ConstituencyEvent),
}

impl EventInstance {
    fn inner(&self) -> &dyn EditEvent {
        match self {
            Self::Dependency(e) => e,
            Self::Constituency(e) => e,
        }
    }
}

impl EditEvent for EventInstance {
    fn pair_index(&self) -> u64 {
        self.inner().pair_index()
    }
    fn category(&self) -> EventCategory {
        self.inner().category()
    }
    fn part_of_speech(&self) -> Option<&str> {
        self.inner().part_of_speech()
    }
    fn lemma_or_form(&self) -> Option<&str> {
        self.inner().lemma_or_form()
    }
    fn is_proper_noun(&self) -> Option<bool> {
        self.inner().is_proper_noun()
    }
    fn relation_or_label(&self) -> Option<&str> {
        self.inner().relation_or_label()
    }
    fn parent_part_of_speech(&self) -> Option<&str> {
        self.inner().parent_part_of_speech()
    }
    fn features(&self) -> Option<&str> {
        self.inner().features()
    }
    fn position(&self) -> Option<PositionClass> {
        self.inner().position()
    }
    fn distance(&self) -> Option<f64> {
        self.inner().distance()
    }
    fn explicit_outcome(&self) -> Option<&str> {
        self.inner().explicit_outcome()
    }
    fn new_value(&self) -> Option<&str> {
        self.inner().new_value()
    }
}

impl From<DependencyEvent> for EventInstance {
    fn from(event: DependencyEvent) -> Self {
        Self::Dependency(event)
    }
}

impl From<ConstituencyEvent> for EventInstance {
    fn from(event: ConstituencyEvent) -> Self {
        Self::Constituency(event)
    }
}
