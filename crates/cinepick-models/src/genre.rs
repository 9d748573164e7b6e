use serde::{Deserialize, Serialize};
use crate::movie::GenreId;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

/// TMDB movie genres
pub const MOVIE_GENRES: &[(GenreId, &str)] = &[
    (28, "Action"),
    (12, "Adventure"),
    (16, "Animation"),
    (35, "Comedy"),
    (80, "Crime"),
    (99, "Documentary"),
    (18, "Drama"),
    (10751, "Family"),
    (14, "Fantasy"),
    (36, "History"),
    (27, "Horror"),
    (10402, "Music"),
    (9648, "Mystery"),
    (10749, "Romance"),
    (878, "Science Fiction"),
    (10770, "TV Movie"),
    (53, "Thriller"),
    (10752, "War"),
    (37, "Western"),
];

pub fn genre_name(id: GenreId) -> Option<&'static str> {
    MOVIE_GENRES
        .iter()
        .find(|(genre_id, _)| *genre_id == id)
        .map(|(_, name)| *name)
}

/// The built-in genre table as `Genre` values
pub fn builtin_genres() -> Vec<Genre> {
    MOVIE_GENRES
        .iter()
        .map(|(id, name)| Genre { id: *id, name: name.to_string() })
        .collect()
}

/// Case-insensitive name lookup. Any numeric id is accepted as-is, since
/// the catalog may know genres missing from the built-in table.
pub fn genre_by_name(name: &str) -> Option<GenreId> {
    let name = name.trim();
    if let Ok(id) = name.parse::<GenreId>() {
        return Some(id);
    }
    MOVIE_GENRES
        .iter()
        .find(|(_, genre)| genre.eq_ignore_ascii_case(name))
        .map(|(id, _)| *id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genre_lookups() {
        assert_eq!(genre_name(878), Some("Science Fiction"));
        assert_eq!(genre_name(1), None);
        assert_eq!(genre_by_name("science fiction"), Some(878));
        assert_eq!(builtin_genres().len(), MOVIE_GENRES.len());
        assert_eq!(genre_by_name("28"), Some(28));
        assert_eq!(genre_by_name("999"), Some(999));
        assert_eq!(genre_by_name(" 10770 "), Some(10770));
        assert_eq!(genre_by_name("Noir"), None);
    }
}
