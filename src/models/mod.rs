mod movie;
mod poster;
mod records;
pub mod timestamp;

pub use movie::{Movie, MovieSummary, Recommendation};
pub use poster::{Poster, PosterQuery, PosterSource, NO_API_KEY_POSTER_URL, NO_IMAGE_POSTER_URL};
pub use records::{FeedbackEntry, Review, WatchlistEntry, DEFAULT_REVIEWER, MAX_RATING, MIN_RATING};
