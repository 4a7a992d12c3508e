//! Page-based pagination primitives shared by listing adapters and the feed.
//!
//! Pages are 1-based. A [`PageRequest`] pairs a page number with a page
//! size, both guaranteed non-zero, and knows the slice offsets it covers in
//! an ordered collection. [`total_pages`] performs the ceiling division
//! every adapter must agree on, and [`Page`] is the envelope returned to
//! callers.
//!
//! # Example
//!
//! ```
//! use pagination::{PageRequest, total_pages};
//!
//! let request = PageRequest::new(2, 10).expect("valid request");
//! assert_eq!(request.offset(), 10);
//! assert_eq!(total_pages(100, request.size()), 10);
//! ```

mod error;
mod page;
mod request;

pub use error::PaginationError;
pub use page::{Page, total_pages};
pub use request::{PageNumber, PageRequest, PageSize};
