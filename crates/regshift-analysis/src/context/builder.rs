//! Context Builder — event + granularity → context key.

use regshift_core::types::collections::SmallVec8;

use super::granularity::Granularity;
use super::key::{Attribute, ContextKey, ContextValue};
use crate::events::types::EditEvent;

/// Derives grouping keys from events.
///
/// The key is a pure function of the event's attribute values: the slots
/// are filled in the granularity's fixed attribute order, never in the
/// order fields appeared in the raw record.
pub struct ContextBuilder;

impl ContextBuilder {
    pub fn build<E: EditEvent + ?Sized>(event: &E, granularity: Granularity) -> ContextKey {
        let values: SmallVec8<ContextValue> = granularity
            .attributes()
            .iter()
            .map(|attribute| Self::value(event, *attribute))
            .collect();
        ContextKey::from_values(values)
    }

    fn value<E: EditEvent + ?Sized>(event: &E, attribute: Attribute) -> ContextValue {
        match attribute {
            Attribute::EventType => ContextValue::Text(event.category().name().to_string()),
            Attribute::PartOfSpeech => ContextValue::text(event.part_of_speech()),
            Attribute::LemmaOrForm => ContextValue::text(event.lemma_or_form()),
            Attribute::ProperNoun => ContextValue::flag(event.is_proper_noun()),
            Attribute::RelationOrLabel => ContextValue::text(event.relation_or_label()),
            Attribute::ParentPartOfSpeech => ContextValue::text(event.parent_part_of_speech()),
            Attribute::Features => ContextValue::text(event.features()),
            Attribute::Position => ContextValue::text(event.position().map(|p| p.name())),
        }
    }
}
