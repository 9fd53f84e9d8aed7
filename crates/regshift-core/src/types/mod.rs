//! Shared data structures for regshift.
//! FxHashMap/SmallVec aliases and the source-layer tag.

pub mod collections;
pub mod layer;

pub use collections::{FxHashMap, FxHashSet};
pub use layer::SourceLayer;
