use serde::{Deserialize, Serialize};
use crate::movie::{GenreId, MovieId};

/// Maximum number of entries kept in the watch history
pub const WATCH_HISTORY_LIMIT: usize = 20;

/// Rating assumed when none is given, or when the given one is not a number
pub const DEFAULT_RATING: f64 = 7.0;

/// One watched movie, as persisted under the `watchHistory` key.
///
/// Field names are camelCase on disk so existing stores stay readable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WatchHistoryItem {
    pub movie_id: MovieId,
    pub timestamp: i64, // ms since epoch, ordering only
    #[serde(default)]
    pub genres: Vec<GenreId>,
    #[serde(default = "default_rating", deserialize_with = "de_rating")]
    pub rating: f64,
}

fn default_rating() -> f64 {
    DEFAULT_RATING
}

// Stored ratings may be null or non-numeric after manual edits
fn de_rating<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(normalize_rating(value.as_f64()))
}

/// Substitute the default for missing/NaN ratings and clamp to 0-10
pub fn normalize_rating(rating: Option<f64>) -> f64 {
    match rating {
        Some(r) if r.is_finite() => r.clamp(0.0, 10.0),
        _ => DEFAULT_RATING,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_rating() {
        assert_eq!(normalize_rating(None), 7.0);
        assert_eq!(normalize_rating(Some(f64::NAN)), 7.0);
        assert_eq!(normalize_rating(Some(8.5)), 8.5);
        assert_eq!(normalize_rating(Some(12.0)), 10.0);
        assert_eq!(normalize_rating(Some(-1.0)), 0.0);
    }

    #[test]
    fn test_camel_case_round_trip_format() {
        let item = WatchHistoryItem {
            movie_id: 42,
            timestamp: 1_700_000_000_000,
            genres: vec![28, 12],
            rating: 8.0,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["movieId"], 42);
        assert_eq!(json["genres"], serde_json::json!([28, 12]));
    }

    #[test]
    fn test_missing_or_bad_rating_defaults() {
        let item: WatchHistoryItem =
            serde_json::from_str(r#"{"movieId": 1, "timestamp": 5, "genres": [18]}"#).unwrap();
        assert_eq!(item.rating, 7.0);

        let item: WatchHistoryItem =
            serde_json::from_str(r#"{"movieId": 1, "timestamp": 5, "genres": [18], "rating": null}"#).unwrap();
        assert_eq!(item.rating, 7.0);
    }
}
