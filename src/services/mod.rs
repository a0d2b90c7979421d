pub mod catalog;
pub mod posters;
pub mod providers;
pub mod recommendations;

pub use catalog::{Catalog, CatalogStore, SimilarityMatrix};
pub use providers::{PosterProvider, TmdbPosterProvider};
