//! Search filtering over the visible collection.
//!
//! The search query derives a filtered view by case-insensitive substring
//! match on the filename. Filtering is always computed fresh from the full
//! collection, never from a previously filtered view, so a broader query
//! can always widen results and clearing the query restores everything.

use crate::models::AudioAsset;

/// Filter `assets` by case-insensitive substring match on filename.
///
/// An empty (or whitespace-only) query matches everything. The underlying
/// collection is never mutated.
pub fn filter_assets<'a>(assets: &'a [AudioAsset], query: &str) -> Vec<&'a AudioAsset> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return assets.iter().collect();
    }

    assets
        .iter()
        .filter(|asset| asset.filename.to_lowercase().contains(&needle))
        .collect()
}
