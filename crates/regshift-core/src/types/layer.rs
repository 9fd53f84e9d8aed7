//! Source layer of an edit log.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which diff log a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceLayer {
    /// Token-level diffs over dependency parses.
    Dependency,
    /// Word and constituent diffs over constituency parses.
    Constituency,
}

impl SourceLayer {
    pub const ALL: [SourceLayer; 2] = [Self::Dependency, Self::Constituency];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Dependency => "dependency",
            Self::Constituency => "constituency",
        }
    }

    /// Prefix used by the category names of this layer.
    pub fn category_prefix(&self) -> &'static str {
        match self {
            Self::Dependency => "dep",
            Self::Constituency => "const",
        }
    }
}

impl fmt::Display for SourceLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
