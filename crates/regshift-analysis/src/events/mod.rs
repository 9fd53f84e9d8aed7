//! Event Extractor — dependency and constituency diff logs into typed events.
//!
//! Each raw record is a JSON object keyed at minimum by `pair_index` and
//! `event_type`. Recognized event types map to a fixed category per layer;
//! everything else is counted and dropped.

pub mod diagnostics;
pub mod extractor;
pub mod mapping;
pub mod record;
pub mod types;

pub use diagnostics::{DistanceSummary, IngestDiagnostics, RecordRejection};
pub use extractor::{EventExtractor, Extraction, LayerExtraction};
pub use record::RawRecord;
pub use types::{
    ChangeKind, ConstituencyEvent, DependencyEvent, EditEvent, EventCategory, EventInstance,
    PositionClass,
};
