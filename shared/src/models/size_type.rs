//! Size Type Model

use crate::util::{lenient_labels, lenient_string};
use serde::{Deserialize, Serialize};

/// Master-data size family (e.g. "Adult Alpha": XS, S, M, L, XL)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SizeTypeDefinition {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default)]
    pub size_name: String,
    /// Canonical label sequence
    #[serde(default, alias = "sizes", deserialize_with = "lenient_labels")]
    pub available_sizes: Vec<String>,
}

impl SizeTypeDefinition {
    /// Position of a label in this family (case-insensitive)
    pub fn position(&self, label: &str) -> Option<usize> {
        let label = label.trim();
        self.available_sizes
            .iter()
            .position(|s| s.trim().eq_ignore_ascii_case(label))
    }
}
