//! Page envelope and page count arithmetic.

use serde::{Deserialize, Serialize};

use crate::{PageNumber, PageSize};

/// Number of pages needed to hold `total_items` at `size` items per page.
///
/// This is `ceil(total_items / size)`; an empty collection has zero pages.
///
/// # Example
///
/// ```
/// use pagination::{PageSize, total_pages};
///
/// let size = PageSize::new(10).expect("valid size");
/// assert_eq!(total_pages(100, size), 10);
/// assert_eq!(total_pages(101, size), 11);
/// assert_eq!(total_pages(0, size), 0);
/// ```
#[must_use]
pub fn total_pages(total_items: usize, size: PageSize) -> u32 {
    let per_page = u64::from(size.get());
    let total = u64::try_from(total_items).unwrap_or(u64::MAX);
    u32::try_from(total.div_ceil(per_page)).unwrap_or(u32::MAX)
}

/// One page of results plus the page count of the whole collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    items: Vec<T>,
    number: PageNumber,
    total_pages: u32,
}

impl<T> Page<T> {
    /// Wrap the items of page `number` of a `total_pages`-page collection.
    #[must_use]
    pub const fn new(items: Vec<T>, number: PageNumber, total_pages: u32) -> Self {
        Self {
            items,
            number,
            total_pages,
        }
    }

    /// Items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the page and return its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Page number this envelope holds.
    #[must_use]
    pub const fn number(&self) -> PageNumber {
        self.number
    }

    /// Total number of pages in the collection.
    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Whether pages exist after this one.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.number.get() < self.total_pages
    }
}
