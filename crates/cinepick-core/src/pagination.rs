use serde::Serialize;

/// One entry of a pagination bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSlot {
    Page(u32),
    Gap,
}

/// Page numbers to display around `current`: the first and last page, plus
/// `siblings` pages on each side. Runs of two or more hidden pages collapse to a gap.
pub fn page_window(current: u32, total: u32, siblings: u32) -> Vec<PageSlot> {
    if total == 0 {
        return Vec::new();
    }

    let current = current.clamp(1, total);
    let start = current.saturating_sub(siblings).max(1);
    let end = current.saturating_add(siblings).min(total);

    let mut pages: Vec<u32> = Vec::with_capacity((end - start + 3) as usize);
    pages.push(1);
    pages.extend(start..=end);
    pages.push(total);
    pages.sort_unstable();
    pages.dedup();

    let mut slots = Vec::with_capacity(pages.len() + 2);
    let mut previous: Option<u32> = None;
    for page in pages {
        if let Some(prev) = previous {
            match page - prev {
                1 => {}
                2 => slots.push(PageSlot::Page(prev + 1)),
                _ => slots.push(PageSlot::Gap),
            }
        }
        slots.push(PageSlot::Page(page));
        previous = Some(page);
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageSlot::{Gap, Page};

    #[test]
    fn test_empty_and_single() {
        assert!(page_window(1, 0, 1).is_empty());
        assert_eq!(page_window(1, 1, 1), vec![Page(1)]);
    }

    #[test]
    fn test_middle_window() {
        assert_eq!(
            page_window(5, 10, 1),
            vec![Page(1), Gap, Page(4), Page(5), Page(6), Gap, Page(10)]
        );
    }

    #[test]
    fn test_single_hidden_page_is_shown() {
        assert_eq!(
            page_window(4, 10, 1),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Gap, Page(10)]
        );
    }

    #[test]
    fn test_current_is_clamped() {
        assert_eq!(page_window(0, 3, 1), vec![Page(1), Page(2), Page(3)]);
        assert_eq!(page_window(99, 500, 0), vec![Page(1), Gap, Page(99), Gap, Page(500)]);
        assert_eq!(page_window(900, 5, 1), vec![Page(1), Gap, Page(4), Page(5)]);
    }
}
