/// Poster provider abstraction
///
/// Poster artwork is best-effort enrichment: a provider always produces a
/// displayable `Poster`, substituting a placeholder when the upstream service
/// is unconfigured, unreachable, slow, or has no image.
use crate::models::{Poster, PosterQuery};

pub mod tmdb;

pub use tmdb::TmdbPosterProvider;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PosterProvider: Send + Sync {
    /// Resolve a poster by movie id, falling back to a title search.
    ///
    /// Never fails; every failure branch converges on a placeholder.
    async fn resolve(&self, query: &PosterQuery) -> Poster;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
