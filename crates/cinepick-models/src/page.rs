use serde::{Deserialize, Serialize};
use crate::movie::Movie;

/// One page of a paginated movie listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MoviePage {
    pub page: u32,
    pub results: Vec<Movie>,
    pub total_pages: u32,
    pub total_results: u64,
}

/// Recommendations share the listing shape; personalised results are always a single page
pub type RecommendationResult = MoviePage;

impl MoviePage {
    /// Wrap a fully materialised list as a single page
    pub fn single(results: Vec<Movie>) -> Self {
        Self {
            page: 1,
            total_results: results.len() as u64,
            total_pages: 1,
            results,
        }
    }

    pub fn empty() -> Self {
        Self::single(Vec::new())
    }

    /// Page number to request next, if any (infinite-scroll rule)
    pub fn next_page(&self) -> Option<u32> {
        if self.page < self.total_pages {
            Some(self.page + 1)
        } else {
            None
        }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_page() {
        let mut page = MoviePage::empty();
        assert_eq!(page.next_page(), None);

        page.total_pages = 3;
        assert_eq!(page.next_page(), Some(2));

        page.page = 3;
        assert_eq!(page.next_page(), None);
    }

    #[test]
    fn test_single_page_counts() {
        let page = MoviePage::single(vec![]);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.total_results, 0);
        assert!(page.is_empty());
    }
}
