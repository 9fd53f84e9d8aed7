//! Fixed raw `event_type` → category tables, one per source layer.

use regshift_core::types::SourceLayer;

use super::types::EventCategory;

const DEPENDENCY_TABLE: &[(&str, EventCategory)] = &[
    ("tokens_added", EventCategory::DepTokensAdded),
    ("token_added", EventCategory::DepTokensAdded),
    ("tokens_removed", EventCategory::DepTokensRemoved),
    ("tokens_deleted", EventCategory::DepTokensRemoved),
    ("token_removed", EventCategory::DepTokensRemoved),
    ("token_deleted", EventCategory::DepTokensRemoved),
    ("tokens_reordered", EventCategory::DepTokensReordered),
    ("reordered", EventCategory::DepTokensReordered),
    ("form_changed", EventCategory::DepFormChanged),
    ("lemma_changed", EventCategory::DepLemmaChanged),
    ("pos_changed", EventCategory::DepPosChanged),
    ("upos_changed", EventCategory::DepPosChanged),
    ("feats_changed", EventCategory::DepFeatsChanged),
    ("features_changed", EventCategory::DepFeatsChanged),
    ("deprel_changed", EventCategory::DepDeprelChanged),
    ("dependency_changed", EventCategory::DepDeprelChanged),
];

const CONSTITUENCY_TABLE: &[(&str, EventCategory)] = &[
    ("word_added", EventCategory::ConstWordsAdded),
    ("words_added", EventCategory::ConstWordsAdded),
    ("word_removed", EventCategory::ConstWordsRemoved),
    ("words_removed", EventCategory::ConstWordsRemoved),
    ("word_deleted", EventCategory::ConstWordsRemoved),
    ("pos_tag_changed", EventCategory::ConstPosChanged),
    ("pos_changed", EventCategory::ConstPosChanged),
    ("constituent_added", EventCategory::ConstConstituentsAdded),
    ("constituent_removed", EventCategory::ConstConstituentsRemoved),
    ("constituent_deleted", EventCategory::ConstConstituentsRemoved),
];

/// Map a raw event type to its category. Exact match after trimming;
/// `None` means the record is dropped as unknown.
pub fn categorize(layer: SourceLayer, raw_event_type: &str) -> Option<EventCategory> {
    let table = match layer {
        SourceLayer::Dependency => DEPENDENCY_TABLE,
        SourceLayer::Constituency => CONSTITUENCY_TABLE,
    };
    let needle = raw_event_type.trim();
    table
        .iter()
        .find(|(raw, _)| *raw == needle)
        .map(|(_, category)| *category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_only_map_into_their_own_layer() {
        for (_, category) in DEPENDENCY_TABLE {
            assert_eq!(category.layer(), SourceLayer::Dependency);
        }
        for (_, category) in CONSTITUENCY_TABLE {
            assert_eq!(category.layer(), SourceLayer::Constituency);
        }
    }

    #[test]
    fn same_raw_name_resolves_per_layer() {
        assert_eq!(
            categorize(SourceLayer::Dependency, "pos_changed"),
            Some(EventCategory::DepPosChanged)
        );
        assert_eq!(
            categorize(SourceLayer::Constituency, "pos_changed"),
            Some(EventCategory::ConstPosChanged)
        );
    }

    #[test]
    fn unknown_and_cross_layer_names_are_dropped() {
        assert_eq!(categorize(SourceLayer::Dependency, "word_added"), None);
        assert_eq!(categorize(SourceLayer::Constituency, "tokens_added"), None);
        assert_eq!(categorize(SourceLayer::Dependency, "Tokens_Added"), None);
        assert_eq!(categorize(SourceLayer::Dependency, ""), None);
    }

    #[test]
    fn every_category_is_reachable() {
        for category in EventCategory::ALL {
            let found = DEPENDENCY_TABLE
                .iter()
                .chain(CONSTITUENCY_TABLE)
                .any(|(_, c)| *c == category);
            assert!(found, "{category} has no raw event type");
        }
    }
}
