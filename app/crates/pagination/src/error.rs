//! Validation errors for pagination inputs.

use thiserror::Error;

/// Errors raised when constructing pagination values from raw integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PaginationError {
    /// Pages are 1-based; zero is not a page.
    #[error("page number must be at least 1")]
    ZeroPageNumber,
    /// A page must hold at least one item.
    #[error("page size must be at least 1")]
    ZeroPageSize,
}
