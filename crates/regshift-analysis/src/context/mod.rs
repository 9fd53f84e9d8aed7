//! Context Builder — canonical grouping keys at four granularities.
//!
//! minimal ⊂ lexical ⊂ syntactic ⊂ full, each a strict attribute superset
//! of the previous, so pattern counts never decrease as keys get finer.

pub mod builder;
pub mod granularity;
pub mod key;

pub use builder::ContextBuilder;
pub use granularity::Granularity;
pub use key::{Attribute, ContextKey, ContextValue, KeyComponent};
