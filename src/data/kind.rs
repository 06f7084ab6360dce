//! Element kinds a dataset can hold

use serde::{Deserialize, Serialize};

/// The closed set of element kinds a [`TypedDataset`](super::TypedDataset) can hold
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataKind {
    /// 64-bit signed integers, numeric order
    Int64,
    /// 64-bit floats, numeric order
    Float64,
    /// Single characters, code-point order
    Char,
    /// Owned strings, byte-wise lexicographic order
    String,
}

impl DataKind {
    /// Every kind, in declaration order
    pub const ALL: [DataKind; 4] = [
        DataKind::Int64,
        DataKind::Float64,
        DataKind::Char,
        DataKind::String,
    ];

    /// Human-readable name used in reports and status messages
    pub fn display_name(&self) -> &'static str {
        match self {
            DataKind::Int64 => "Integers",
            DataKind::Float64 => "Reals",
            DataKind::Char => "Characters",
            DataKind::String => "Strings",
        }
    }
}

impl std::fmt::Display for DataKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.display_name())
    }
}
