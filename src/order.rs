//! Order resolution for a sibling group.
//!
//! Every chapter and section gets two numbers:
//!
//! - **weight**: the sort key written into front matter. Hugo sorts menus by it.
//! - **order**: the 1-based display rank, used only to build numbering such as `1.2.`
//!
//! When no entry in a group has a weight, input position decides: the n-th
//! entry gets `order = weight = n`. When every entry has one, the group is
//! sorted by weight and `order` is the rank; weights are written unchanged, so
//! `[5, 1, 3]` becomes orders `[3, 1, 2]` with Hugo still seeing 5, 1 and 3.

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum OrderError {
    #[error("Cannot order a group with {given} of {total} weights given")]
    MixedWeight { given: usize, total: usize },
    #[error("{weights} weights given for {entries} entries")]
    LengthMismatch { weights: usize, entries: usize },
}

/// An entry with its resolved order and weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ordered<T> {
    pub entry: T,
    /// 1-based rank within the group.
    pub order: usize,
    /// Explicit weight, or `order` when the group has none.
    pub weight: i64,
}

/// Resolve the order of one sibling group.
///
/// `weights` must line up with `entries` (as returned by
/// [`check_weights`](crate::validate::check_weights)). The result is sorted by
/// order. Weights are distinct after validation; should two be equal anyway,
/// input order breaks the tie.
pub fn resolve_order<T>(
    entries: impl IntoIterator<Item = T>,
    weights: &[Option<i64>],
) -> Result<Vec<Ordered<T>>, OrderError> {
    let entries: Vec<T> = entries.into_iter().collect();
    if entries.len() != weights.len() {
        return Err(OrderError::LengthMismatch {
            weights: weights.len(),
            entries: entries.len(),
        });
    }

    let given = weights.iter().filter(|w| w.is_some()).count();
    if given == 0 {
        return Ok(entries
            .into_iter()
            .enumerate()
            .map(|(i, entry)| Ordered {
                entry,
                order: i + 1,
                weight: (i + 1) as i64,
            })
            .collect());
    }
    if given != weights.len() {
        return Err(OrderError::MixedWeight {
            given,
            total: weights.len(),
        });
    }

    let mut weighted: Vec<(i64, T)> = weights.iter().flatten().copied().zip(entries).collect();
    weighted.sort_by_key(|(w, _)| *w);
    Ok(weighted
        .into_iter()
        .enumerate()
        .map(|(i, (weight, entry))| Ordered {
            entry,
            order: i + 1,
            weight,
        })
        .collect())
}
