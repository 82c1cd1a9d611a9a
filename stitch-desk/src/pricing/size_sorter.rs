//! Size Quantity Sorter
//!
//! Puts a sparse size → quantity map into display order. A master size
//! family wins when the line names one; otherwise the built-in alpha ladder
//! is used, then numeric sizes ascending, then everything else as entered.

use shared::models::{SizeQuantities, SizeTypeDefinition};
use std::cmp::Ordering;

/// Built-in ladder for alpha sizes. Each rung lists its accepted spellings.
const ALPHA_LADDER: &[&[&str]] = &[
    &["XXS", "2XS"],
    &["XS"],
    &["S"],
    &["M"],
    &["L"],
    &["XL"],
    &["XXL", "2XL"],
    &["XXXL", "3XL"],
    &["XXXXL", "4XL"],
    &["5XL"],
    &["6XL"],
];

/// Rank of a label on the built-in ladder (case-insensitive)
pub fn alpha_rank(label: &str) -> Option<usize> {
    let label = label.trim();
    ALPHA_LADDER
        .iter()
        .position(|rung| rung.iter().any(|s| s.eq_ignore_ascii_case(label)))
}

fn numeric_value(label: &str) -> Option<f64> {
    label.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[derive(Debug, Clone, Copy)]
enum SortKey {
    Alpha(usize),
    Numeric(f64),
    Other,
}

impl SortKey {
    fn fallback(label: &str) -> Self {
        if let Some(rank) = alpha_rank(label) {
            SortKey::Alpha(rank)
        } else if let Some(value) = numeric_value(label) {
            SortKey::Numeric(value)
        } else {
            SortKey::Other
        }
    }

    fn group(&self) -> u8 {
        match self {
            SortKey::Alpha(_) => 0,
            SortKey::Numeric(_) => 1,
            SortKey::Other => 2,
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Alpha(a), SortKey::Alpha(b)) => a.cmp(b),
            (SortKey::Numeric(a), SortKey::Numeric(b)) => a.total_cmp(b),
            _ => self.group().cmp(&other.group()),
        }
    }
}

/// Resolve a size family by id
pub fn find_definition<'a>(
    size_type_id: Option<&str>,
    definitions: &'a [SizeTypeDefinition],
) -> Option<&'a SizeTypeDefinition> {
    let id = size_type_id.map(str::trim).filter(|id| !id.is_empty())?;
    definitions.iter().find(|d| d.id.trim() == id)
}

/// Order `quantities` for display.
///
/// The sort is stable, so labels that compare equal keep the order they were
/// entered in and the result does not change when sorted again.
pub fn sort_sizes(
    quantities: &SizeQuantities,
    size_type_id: Option<&str>,
    definitions: &[SizeTypeDefinition],
) -> Vec<(String, i64)> {
    let mut entries: Vec<(String, i64)> = quantities
        .iter()
        .map(|(size, qty)| (size.clone(), *qty))
        .collect();

    match find_definition(size_type_id, definitions) {
        Some(definition) => {
            // Labels outside the family go last, in entry order
            entries.sort_by_key(|(size, _)| definition.position(size).unwrap_or(usize::MAX));
        }
        None => {
            if let Some(id) = size_type_id.filter(|id| !id.trim().is_empty()) {
                tracing::debug!(size_type_id = id, "Unknown size type, using built-in order");
            }
            entries.sort_by(|(a, _), (b, _)| SortKey::fallback(a).compare(&SortKey::fallback(b)));
        }
    }

    entries
}
