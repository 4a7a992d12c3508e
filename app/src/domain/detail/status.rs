//! Detail screen status types.

use crate::domain::ports::UnlockRejection;
use crate::domain::{Error, Listing};

/// Why proximity could not be decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProximityUnavailable {
    /// Location permission is not granted; final for this instance.
    PermissionDenied,
    /// The device could not produce a position.
    PositionUnavailable,
}

impl ProximityUnavailable {
    /// Domain error shown in place of the unlock button.
    pub fn error(self) -> Error {
        match self {
            Self::PermissionDenied => Error::permission_denied("location permission not granted"),
            Self::PositionUnavailable => Error::service_unavailable("device position unavailable"),
        }
    }
}

/// Where the user stands relative to the listing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ProximityStatus {
    /// No listing to measure against yet.
    #[default]
    Pending,
    /// A position query is in flight.
    Checking,
    /// Within the unlock radius.
    Nearby {
        /// Great-circle distance to the listing.
        distance_km: f64,
    },
    /// Outside the unlock radius.
    Distant {
        /// Great-circle distance to the listing.
        distance_km: f64,
    },
    /// Proximity cannot be decided.
    Unavailable(ProximityUnavailable),
}

impl ProximityStatus {
    /// Whether the user is within the unlock radius.
    pub fn is_nearby(&self) -> bool {
        matches!(self, Self::Nearby { .. })
    }

    /// Whether the outcome is still being worked out.
    pub fn is_settled(&self) -> bool {
        !matches!(self, Self::Pending | Self::Checking)
    }
}

/// Result of [`super::DetailController::load_details`].
#[derive(Debug, Clone, PartialEq)]
pub enum DetailOutcome {
    /// The listing was fetched; carries the resulting proximity status.
    Loaded(ProximityStatus),
    /// No listing has this id.
    NotFound,
    /// The fetch failed; nothing changed.
    Failed(Error),
    /// The listing was already requested by this instance.
    AlreadyRequested,
    /// The instance was torn down before the fetch completed.
    Stale,
}

impl DetailOutcome {
    /// Domain error for a fetch that produced no listing.
    pub fn error(&self) -> Option<Error> {
        match self {
            Self::NotFound => Some(Error::not_found("listing not found")),
            Self::Failed(error) => Some(error.clone()),
            Self::Loaded(_) | Self::AlreadyRequested | Self::Stale => None,
        }
    }
}

/// Why an unlock was not attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlockSkip {
    /// The listing has not loaded.
    NoListing,
    /// The user is not within the unlock radius.
    NotNearby,
    /// The listing is already unlocked.
    AlreadyUnlocked,
    /// Another unlock is in flight.
    InProgress,
    /// The instance was torn down.
    TornDown,
}

/// Result of [`super::DetailController::unlock`].
#[derive(Debug, Clone, PartialEq)]
pub enum UnlockAttempt {
    /// The listing is now unlocked.
    Unlocked,
    /// The service refused.
    Rejected(UnlockRejection),
    /// The call failed or timed out.
    Failed(Error),
    /// The service was not called.
    Skipped(UnlockSkip),
    /// The instance was torn down before the call completed.
    Stale,
}

impl UnlockAttempt {
    /// Domain error for a refused or failed unlock. Skips are not errors.
    pub fn error(&self) -> Option<Error> {
        match self {
            Self::Rejected(rejection) => Some(Error::unlock_rejected(rejection.to_string())),
            Self::Failed(error) => Some(error.clone()),
            Self::Unlocked | Self::Skipped(_) | Self::Stale => None,
        }
    }
}

/// Rendering copy of the detail screen state.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailSnapshot {
    pub(super) listing: Option<Listing>,
    pub(super) proximity: ProximityStatus,
    pub(super) unlocking: bool,
}

impl DetailSnapshot {
    /// The fetched listing, if any.
    pub fn listing(&self) -> Option<&Listing> {
        self.listing.as_ref()
    }

    /// Current proximity status.
    pub fn proximity(&self) -> ProximityStatus {
        self.proximity
    }

    /// Whether an unlock call is in flight.
    pub fn is_unlocking(&self) -> bool {
        self.unlocking
    }

    /// Whether the screen should still show its loading view.
    pub fn is_loading(&self) -> bool {
        self.listing.is_none() || !self.proximity.is_settled()
    }

    /// Whether the unlock affordance should be offered.
    pub fn can_unlock(&self) -> bool {
        self.listing
            .as_ref()
            .is_some_and(|listing| !listing.is_unlocked())
            && self.proximity.is_nearby()
            && !self.unlocking
    }
}
