pub mod credits;
pub mod genre;
pub mod movie;
pub mod page;
pub mod watch_history;

pub use credits::{CastMember, Credits, CrewMember, StreamSource, Video};
pub use genre::{builtin_genres, genre_by_name, genre_name, Genre, MOVIE_GENRES};
pub use movie::{GenreId, Movie, MovieDetails, MovieId, Watchable};
pub use page::{MoviePage, RecommendationResult};
pub use watch_history::{normalize_rating, WatchHistoryItem, DEFAULT_RATING, WATCH_HISTORY_LIMIT};
