//! Validated page numbers, page sizes and page requests.

use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::PaginationError;

/// 1-based page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageNumber(NonZeroU32);

impl PageNumber {
    /// The first page.
    pub const FIRST: Self = Self(NonZeroU32::MIN);

    /// Validate a raw page number.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::ZeroPageNumber`] for `0`.
    pub fn new(value: u32) -> Result<Self, PaginationError> {
        NonZeroU32::new(value)
            .map(Self)
            .ok_or(PaginationError::ZeroPageNumber)
    }

    /// Raw page number.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// The page after this one, or `None` on overflow.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Number of items requested per page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageSize(NonZeroU32);

impl PageSize {
    /// Ten items per page.
    pub const DEFAULT: Self = match NonZeroU32::new(10) {
        Some(size) => Self(size),
        None => Self(NonZeroU32::MIN),
    };

    /// Validate a raw page size.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::ZeroPageSize`] for `0`.
    pub fn new(value: u32) -> Result<Self, PaginationError> {
        NonZeroU32::new(value)
            .map(Self)
            .ok_or(PaginationError::ZeroPageSize)
    }

    /// Raw page size.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A request for one page of an ordered collection.
///
/// # Example
///
/// ```
/// use pagination::PageRequest;
///
/// let third = PageRequest::new(3, 25).expect("valid");
/// assert_eq!(third.offset(), 50);
/// assert_eq!(third.end(), 75);
/// assert!(PageRequest::new(0, 25).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
    number: PageNumber,
    size: PageSize,
}

impl PageRequest {
    /// Build a request from raw integers.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError`] when either value is zero.
    pub fn new(number: u32, size: u32) -> Result<Self, PaginationError> {
        Ok(Self {
            number: PageNumber::new(number)?,
            size: PageSize::new(size)?,
        })
    }

    /// Request an explicit page with the given size.
    #[must_use]
    pub const fn at(number: PageNumber, size: PageSize) -> Self {
        Self { number, size }
    }

    /// Requested page number.
    #[must_use]
    pub const fn number(&self) -> PageNumber {
        self.number
    }

    /// Requested page size.
    #[must_use]
    pub const fn size(&self) -> PageSize {
        self.size
    }

    /// Index of the first item on this page.
    #[must_use]
    pub fn offset(&self) -> usize {
        let skipped = u64::from(self.number.get() - 1) * u64::from(self.size.get());
        usize::try_from(skipped).unwrap_or(usize::MAX)
    }

    /// Index one past the last item on this page.
    #[must_use]
    pub fn end(&self) -> usize {
        let size = usize::try_from(self.size.get()).unwrap_or(usize::MAX);
        self.offset().saturating_add(size)
    }
}
