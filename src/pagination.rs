use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 100;

/// Page counts up to this size render every page button.
pub const FULL_WINDOW_PAGES: usize = 7;

/// One entry of the pagination control strip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageControl {
    Page { number: usize, active: bool },
    Ellipsis,
}

impl PageControl {
    pub fn number(&self) -> Option<usize> {
        match self {
            PageControl::Page { number, .. } => Some(*number),
            PageControl::Ellipsis => None,
        }
    }
}

fn pages(range: impl IntoIterator<Item = usize>, current_page: usize) -> Vec<PageControl> {
    range
        .into_iter()
        .map(|number| PageControl::Page {
            number,
            active: number == current_page,
        })
        .collect()
}

/// Computes the page buttons to display for `current_page` of `total_pages`.
///
/// Up to seven pages are all shown. Beyond that the first and last page are
/// always present and ellipses stand in for the omitted ranges:
///
/// * pages 1-3: `1 2 3 4 … N`
/// * middle: `1 … c-1 c c+1 … N`
/// * last three: `1 … N-3 N-2 N-1 N`
pub fn page_window(current_page: usize, total_pages: usize) -> Vec<PageControl> {
    let current_page = current_page.max(1);

    if total_pages <= FULL_WINDOW_PAGES {
        return pages(1..=total_pages, current_page);
    }

    let mut window = Vec::with_capacity(FULL_WINDOW_PAGES);
    if current_page <= 3 {
        window.extend(pages(1..=4, current_page));
        window.push(PageControl::Ellipsis);
        window.extend(pages([total_pages], current_page));
    } else if current_page < total_pages - 2 {
        window.extend(pages([1], current_page));
        window.push(PageControl::Ellipsis);
        window.extend(pages(current_page - 1..=current_page + 1, current_page));
        window.push(PageControl::Ellipsis);
        window.extend(pages([total_pages], current_page));
    } else {
        window.extend(pages([1], current_page));
        window.push(PageControl::Ellipsis);
        window.extend(pages(total_pages - 3..=total_pages, current_page));
    }
    window
}

/// The "Showing X to Y of Z" line under the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PageSummary {
    pub first: usize,
    pub last: usize,
    pub total: usize,
}

impl PageSummary {
    /// `shown` is the number of rows on the current page.
    pub fn new(page: usize, per_page: usize, shown: usize, total: usize) -> Self {
        if shown == 0 {
            return Self {
                first: 0,
                last: 0,
                total,
            };
        }
        let offset = page.max(1).saturating_sub(1).saturating_mul(per_page);
        Self {
            first: offset + 1,
            last: (offset + shown).min(total),
            total,
        }
    }
}

#[derive(Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<PageControl>,
    pub page: usize,
    pub total_pages: usize,
    pub summary: PageSummary,
}

impl<T> Paginated<T> {
    pub fn new(
        items: Vec<T>,
        current_page: usize,
        per_page: usize,
        total_items: usize,
        total_pages: usize,
    ) -> Self {
        let current_page = if current_page == 0 { 1 } else { current_page };

        let pages = page_window(current_page, total_pages);
        let summary = PageSummary::new(current_page, per_page, items.len(), total_items);

        Self {
            items,
            pages,
            page: current_page,
            total_pages,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Renders a window as `[1, 2, "...", 9]`-style tokens for readable asserts.
    fn render(window: &[PageControl]) -> Vec<String> {
        window
            .iter()
            .map(|control| match control {
                PageControl::Page { number, .. } => number.to_string(),
                PageControl::Ellipsis => "...".to_string(),
            })
            .collect()
    }

    fn active(window: &[PageControl]) -> Vec<usize> {
        window
            .iter()
            .filter_map(|control| match control {
                PageControl::Page {
                    number,
                    active: true,
                } => Some(*number),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn small_page_counts_show_every_page() {
        for total in 0..=FULL_WINDOW_PAGES {
            for current in 1..=total.max(1) {
                let window = page_window(current, total);
                assert_eq!(window.len(), total);
                assert!(!window.contains(&PageControl::Ellipsis));
            }
        }
    }

    #[test]
    fn first_pages_window() {
        for current in 1..=3 {
            assert_eq!(
                render(&page_window(current, 10)),
                vec!["1", "2", "3", "4", "...", "10"]
            );
        }
    }

    #[test]
    fn middle_window() {
        assert_eq!(
            render(&page_window(5, 10)),
            vec!["1", "...", "4", "5", "6", "...", "10"]
        );
        assert_eq!(
            render(&page_window(4, 8)),
            vec!["1", "...", "3", "4", "5", "...", "8"]
        );
    }

    #[test]
    fn last_pages_window() {
        for current in 8..=10 {
            assert_eq!(
                render(&page_window(current, 10)),
                vec!["1", "...", "7", "8", "9", "10"]
            );
        }
    }

    #[test]
    fn window_stays_in_bounds_with_one_active_page() {
        for total in 1..40 {
            for current in 1..=total {
                let window = page_window(current, total);
                let numbers: Vec<usize> = window.iter().filter_map(PageControl::number).collect();
                assert!(numbers.iter().all(|n| (1..=total).contains(n)));
                assert!(numbers.windows(2).all(|w| w[0] < w[1]));
                assert_eq!(active(&window), vec![current]);
                if total > FULL_WINDOW_PAGES {
                    assert_eq!(numbers.first(), Some(&1));
                    assert_eq!(numbers.last(), Some(&total));
                }
            }
        }
    }

    #[test]
    fn page_zero_is_treated_as_first_page() {
        assert_eq!(page_window(0, 10), page_window(1, 10));
    }

    #[test]
    fn summary_counts_rows_on_page() {
        assert_eq!(
            PageSummary::new(3, 10, 5, 25),
            PageSummary {
                first: 21,
                last: 25,
                total: 25
            }
        );
        assert_eq!(
            PageSummary::new(1, 10, 0, 0),
            PageSummary {
                first: 0,
                last: 0,
                total: 0
            }
        );
    }

    #[test]
    fn paginated_builds_window_and_summary() {
        let paginated = Paginated::new(vec!["a", "b"], 0, 2, 20, 10);
        assert_eq!(paginated.page, 1);
        assert_eq!(render(&paginated.pages), vec!["1", "2", "3", "4", "...", "10"]);
        assert_eq!(paginated.summary.first, 1);
        assert_eq!(paginated.summary.last, 2);
    }
}
