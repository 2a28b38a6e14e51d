use serde::Serialize;

/// Page size used when neither the caller nor the settings name one.
pub const DEFAULT_PAGE_SIZE: usize = 50;
/// Upper bound applied to any requested page size.
pub const MAX_PAGE_SIZE: usize = 500;

/// One page of results plus navigation metadata. Pages are 1-based.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_items: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> Page<T> {
    /// Convert every item, keeping the metadata.
    pub fn try_map<U, E>(self, f: impl FnMut(T) -> Result<U, E>) -> Result<Page<U>, E> {
        let items = self.items.into_iter().map(f).collect::<Result<Vec<_>, E>>()?;
        Ok(Page {
            items,
            total_items: self.total_items,
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages,
            has_next: self.has_next,
            has_previous: self.has_previous,
        })
    }
}

/// Slice `items` into the requested page.
///
/// `page` below 1 reads as 1 and `page_size` is clamped to `[1, max_page_size]`.
/// A page past the end is empty but still reports the real totals.
pub fn paginate<T>(items: Vec<T>, page: usize, page_size: usize, max_page_size: usize) -> Page<T> {
    let page = page.max(1);
    let page_size = page_size.clamp(1, max_page_size.max(1));
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size);
    let start = (page - 1).saturating_mul(page_size);

    let items = items.into_iter().skip(start).take(page_size).collect();
    Page {
        items,
        total_items,
        page,
        page_size,
        total_pages,
        has_next: page < total_pages,
        has_previous: page > 1,
    }
}
