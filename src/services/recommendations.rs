use std::cmp::Ordering;

use crate::{models::Recommendation, services::catalog::CatalogStore};

/// Returns the `top_n` movies most similar to `title`.
///
/// Scores come from the query movie's similarity row. Entries are ranked by score
/// descending, ties broken by catalog index ascending. The top-ranked entry is
/// assumed to be the self-match and is skipped by position. An unknown title
/// yields an empty list.
pub fn recommend<'a>(store: &'a CatalogStore, title: &str, top_n: usize) -> Vec<Recommendation<'a>> {
    let catalog = store.catalog();

    let Some(index) = catalog.position(title) else {
        tracing::debug!(title = %title, "Title not in catalog");
        return Vec::new();
    };

    let Some(row) = store.similarity().row(index) else {
        return Vec::new();
    };

    let mut ranked: Vec<(usize, f64)> = row.iter().copied().enumerate().collect();
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then(a.0.cmp(&b.0))
    });

    ranked
        .into_iter()
        .skip(1)
        .take(top_n)
        .filter_map(|(i, score)| catalog.get(i).map(|movie| Recommendation { movie, score }))
        .collect()
}
