use std::sync::Arc;

use crate::{
    models::{Poster, PosterQuery},
    services::providers::PosterProvider,
};

/// Resolves posters for several movies concurrently.
///
/// One task per query; results come back in the same order as `queries`.
/// A task that panics contributes the "no image" placeholder.
pub async fn resolve_posters(
    provider: Arc<dyn PosterProvider>,
    queries: Vec<PosterQuery>,
) -> Vec<Poster> {
    let mut tasks = Vec::with_capacity(queries.len());

    for query in queries {
        let provider = Arc::clone(&provider);
        let task = tokio::spawn(async move { provider.resolve(&query).await });
        tasks.push(task);
    }

    let mut posters = Vec::with_capacity(tasks.len());
    for task in tasks {
        match task.await {
            Ok(poster) => posters.push(poster),
            Err(e) => {
                tracing::error!(error = %e, "Poster task join error");
                posters.push(Poster::unavailable());
            }
        }
    }

    let placeholders = posters.iter().filter(|p| p.is_placeholder()).count();
    tracing::debug!(
        provider = provider.name(),
        resolved = posters.len() - placeholders,
        placeholders,
        "Posters resolved"
    );

    posters
}
