//! Port for the remote (or simulated) listing API.
//!
//! The controllers depend only on this trait. The simulated in-memory
//! service and the HTTP client in `outbound` both implement it, so the
//! presentation layer never knows which one is wired in.

use std::fmt;

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Coordinates, Listing, ListingId, LoginCredentials};

use super::define_port_error;

define_port_error! {
    /// Errors raised by listing service adapters.
    pub enum ListingServiceError {
        /// The service could not be reached or failed internally.
        Unavailable { message: String } => "listing service unavailable: {message}",
        /// The service refused the request as malformed.
        InvalidRequest { message: String } => "listing service rejected the request: {message}",
        /// The service answered with a payload the adapter could not decode.
        Decode { message: String } => "listing service response could not be decoded: {message}",
    }
}

/// Why the service declined an unlock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlockRejection {
    /// The service declined the attempt; the user may try again.
    Declined,
    /// No listing with the requested id exists.
    UnknownListing,
}

impl fmt::Display for UnlockRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Declined => f.write_str("unlock declined"),
            Self::UnknownListing => f.write_str("unknown listing"),
        }
    }
}

/// Result of an unlock mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum UnlockOutcome {
    /// The listing is now unlocked; carries the service's copy.
    Unlocked(Listing),
    /// The service refused the unlock.
    Rejected(UnlockRejection),
}

/// Listing API used by the controllers.
///
/// All operations may fail; callers must not assume success.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingService: Send + Sync {
    /// Check credentials; `Ok(false)` means they were rejected.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<bool, ListingServiceError>;

    /// Fetch one page of listings.
    ///
    /// `bias` may influence which listings are produced or how they are
    /// ranked but never the page arithmetic: `total_pages` is always
    /// `ceil(total_items / page_size)`. Pages past the end are empty.
    async fn fetch_page(
        &self,
        request: PageRequest,
        bias: Option<Coordinates>,
    ) -> Result<Page<Listing>, ListingServiceError>;

    /// Look up a listing; `Ok(None)` when it does not exist.
    async fn fetch_by_id(&self, id: &ListingId) -> Result<Option<Listing>, ListingServiceError>;

    /// Attempt to unlock a listing for the current user.
    async fn unlock(&self, id: &ListingId) -> Result<UnlockOutcome, ListingServiceError>;
}
