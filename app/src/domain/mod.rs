//! Domain primitives, policies and controllers.
//!
//! Purpose: define the listing model, the proximity policy and the state
//! machines behind the login, feed and detail screens. Types here are
//! transport agnostic; adapters in `outbound` translate to and from their
//! own representations.
//!
//! Public surface:
//! - Error / ErrorCode: domain error payload surfaced to the presentation layer.
//! - Listing / ListingId / Coordinates: the property record.
//! - ProximityRadius / distance_km: great-circle distance and nearby policy.
//! - Notice: user-visible message published through the notice sink port.
//! - SessionController, FeedController, DetailController: screen state machines.

pub mod auth;
pub mod coordinates;
pub mod detail;
pub mod error;
pub mod feed;
pub mod listing;
pub mod notice;
pub mod ports;
pub mod proximity;
pub mod session;

mod calls;
pub(crate) mod sync;
#[cfg(test)]
mod test_support;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::calls::{DEFAULT_LOCATION_TIMEOUT, DEFAULT_REQUEST_TIMEOUT};
pub use self::coordinates::{Coordinates, CoordinatesValidationError};
pub use self::detail::{
    DetailController, DetailOutcome, DetailSettings, DetailSnapshot, ProximityStatus,
    ProximityUnavailable, UnlockAttempt, UnlockSkip,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::feed::{FeedController, FeedOutcome, FeedPhase, FeedSettings, FeedSnapshot, SkipReason};
pub use self::listing::{Listing, ListingDraft, ListingId, ListingValidationError};
pub use self::notice::{Notice, NoticeSeverity};
pub use self::proximity::{ProximityRadius, ProximityRadiusError, distance_km};
pub use self::session::{LoginOutcome, SessionController, SessionSnapshot};
