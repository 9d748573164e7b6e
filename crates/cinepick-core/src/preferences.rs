use cinepick_models::{GenreId, WatchHistoryItem};
use std::collections::BTreeMap;

/// Weight of the position-in-history signal
pub const RECENCY_WEIGHT: f64 = 0.7;
/// Weight of the user's own rating
pub const RATING_WEIGHT: f64 = 0.3;

/// Accumulated preference per genre, iterated in ascending genre id order
pub type GenreScores = BTreeMap<GenreId, f64>;

/// Score genres from a newest-first history.
///
/// The item at index `i` gets a recency of `(i + 1) / len`, so the newest entry
/// (index 0) carries the *smallest* recency weight and the oldest the largest.
/// Every genre of an item gains `0.7 * recency + 0.3 * rating / 10`. Scores are
/// not normalised.
pub fn compute_genre_preferences(history: &[WatchHistoryItem]) -> GenreScores {
    let mut scores = GenreScores::new();
    let len = history.len() as f64;

    for (index, item) in history.iter().enumerate() {
        let recency = (index + 1) as f64 / len;
        let contribution = RECENCY_WEIGHT * recency + RATING_WEIGHT * (item.rating / 10.0);
        for genre in &item.genres {
            *scores.entry(*genre).or_insert(0.0) += contribution;
        }
    }

    scores
}

/// Highest scoring genres, ties broken by ascending genre id
pub fn top_genres(scores: &GenreScores, count: usize) -> Vec<GenreId> {
    let finite = |s: f64| if s.is_finite() { s } else { 0.0 };

    let mut ranked: Vec<(GenreId, f64)> = scores.iter().map(|(g, s)| (*g, finite(*s))).collect();
    // Stable sort keeps ascending-id order among equal scores
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.into_iter().take(count).map(|(genre, _)| genre).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::history_item;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_empty_history() {
        assert!(compute_genre_preferences(&[]).is_empty());
        assert!(top_genres(&GenreScores::new(), 3).is_empty());
    }

    #[test]
    fn test_single_item_score() {
        let scores = compute_genre_preferences(&[history_item(1, 0, &[28], 8.0)]);
        // recency 1/1 = 1.0
        assert!(approx(scores[&28], 0.7 + 0.3 * 0.8));
    }

    #[test]
    fn test_newest_entry_gets_smallest_recency_weight() {
        // Same rating, disjoint genres: only position differs
        let history = vec![
            history_item(1, 300, &[28], 5.0), // newest
            history_item(2, 200, &[18], 5.0),
            history_item(3, 100, &[35], 5.0), // oldest
        ];
        let scores = compute_genre_preferences(&history);

        assert!(approx(scores[&28], 0.7 * (1.0 / 3.0) + 0.15));
        assert!(approx(scores[&18], 0.7 * (2.0 / 3.0) + 0.15));
        assert!(approx(scores[&35], 0.7 * 1.0 + 0.15));
        assert_eq!(top_genres(&scores, 3), vec![35, 18, 28]);
    }

    #[test]
    fn test_scores_accumulate_across_items() {
        let history = vec![
            history_item(1, 200, &[28, 12], 10.0),
            history_item(2, 100, &[28], 0.0),
        ];
        let scores = compute_genre_preferences(&history);
        assert!(approx(scores[&28], (0.7 * 0.5 + 0.3) + (0.7 * 1.0)));
        assert!(approx(scores[&12], 0.7 * 0.5 + 0.3));
    }

    #[test]
    fn test_top_genres_tie_break_and_limit() {
        let mut scores = GenreScores::new();
        scores.insert(99, 1.0);
        scores.insert(12, 1.0);
        scores.insert(28, 2.0);
        scores.insert(35, 0.5);

        assert_eq!(top_genres(&scores, 3), vec![28, 12, 99]);
        assert_eq!(top_genres(&scores, 1), vec![28]);
    }
}
