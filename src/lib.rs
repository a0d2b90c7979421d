//! Movie recommendations from a precomputed similarity matrix, with poster
//! enrichment and flat-file watchlist, review and feedback stores.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
