pub mod feedback;
pub mod json_store;
pub mod reviews;
pub mod watchlist;

pub use feedback::FeedbackStore;
pub use json_store::JsonStore;
pub use reviews::ReviewStore;
pub use watchlist::WatchlistStore;
