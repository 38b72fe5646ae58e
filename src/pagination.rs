//! Page-number strip for paginated result grids.

use serde::Serialize;

/// Page numbers to render: the first `left_edge` pages, a window around the
/// current page and the last `right_edge` pages. `None` marks a gap.
fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let past_last = last_page.saturating_add(1);
    let left_end = left_edge.saturating_add(1).min(past_last);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = current_page
        .saturating_add(right_current)
        .saturating_add(1)
        .min(past_last);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// A numbered link in the pagination strip.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageLink {
    pub number: usize,
    pub href: String,
    pub current: bool,
}

#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<Option<PageLink>>,
    pub page: usize,
    pub total_pages: usize,
    pub prev: Option<String>,
    pub next: Option<String>,
}

impl<T> Paginated<T> {
    /// Builds the strip for `current_page` of `total_pages`, with `href`
    /// producing the link for a page number.
    pub fn new<F>(items: Vec<T>, current_page: usize, total_pages: usize, href: F) -> Self
    where
        F: Fn(usize) -> String,
    {
        let current_page = current_page.clamp(1, total_pages.max(1));

        let pages = get_pages(total_pages, current_page, 2, 2, 4, 2)
            .into_iter()
            .map(|page| {
                page.map(|number| PageLink {
                    number,
                    href: href(number),
                    current: number == current_page,
                })
            })
            .collect();

        let prev = (current_page > 1).then(|| href(current_page - 1));
        let next = (current_page < total_pages).then(|| href(current_page + 1));

        Self {
            items,
            pages,
            page: current_page,
            total_pages,
            prev,
            next,
        }
    }

    /// A single page holding every item, with no links.
    pub fn single(items: Vec<T>) -> Self {
        Self {
            items,
            pages: Vec::new(),
            page: 1,
            total_pages: 1,
            prev: None,
            next: None,
        }
    }
}
