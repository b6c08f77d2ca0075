//! Deterministic slicing of ordered result sequences into fixed-size
//! pages. Every listing route shares one page size, taken from
//! configuration.

use serde::Serialize;

#[derive(Debug, Clone)]
pub struct Paginator {
    page_size: usize,
}

/// One page of an ordered sequence plus the navigation metadata the
/// listing responses carry.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }

    /// Slices `items` for the requested page. The caller is responsible
    /// for ordering. A missing, non-numeric or `< 1` page request serves
    /// page 1; a request beyond the last page serves the last page. An
    /// empty sequence still has one (empty) page.
    pub fn paginate<T: Clone>(&self, items: &[T], raw_page: Option<&str>) -> Page<T> {
        let total_items = items.len();
        let total_pages = total_items.div_ceil(self.page_size).max(1);
        let number = requested_number(raw_page).min(total_pages);

        let start = (number - 1) * self.page_size;
        let end = (start + self.page_size).min(total_items);
        let items = if start < total_items {
            items[start..end].to_vec()
        } else {
            Vec::new()
        };

        Page {
            items,
            number,
            total_items,
            total_pages,
            has_previous: number > 1,
            has_next: number < total_pages,
        }
    }
}

fn requested_number(raw: Option<&str>) -> usize {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|&n| n >= 1)
        .unwrap_or(1)
}
