//! Single listing view with a proximity-gated unlock.
//!
//! A [`DetailController`] is created per visit to a listing. It fetches the
//! listing once, measures the user's distance to it and offers the unlock
//! only when the user stands within the configured radius. Permission is
//! read, never prompted for; a denial disables the unlock for the rest of
//! the visit. [`DetailController::teardown`] ends the visit and makes any
//! still-pending completion a no-op.

mod status;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::domain::calls::{self, call_location, call_service};
use crate::domain::ports::{
    GeolocationProvider, ListingService, LocationPermission, NoticeSink, UnlockOutcome,
};
use crate::domain::sync::lock;
use crate::domain::{Listing, ListingId, Notice, ProximityRadius, distance_km};

pub use self::status::{
    DetailOutcome, DetailSnapshot, ProximityStatus, ProximityUnavailable, UnlockAttempt,
    UnlockSkip,
};

/// Tuning for a [`DetailController`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetailSettings {
    radius: ProximityRadius,
    request_timeout: Duration,
    location_timeout: Duration,
}

impl DetailSettings {
    /// Build settings from explicit values.
    pub fn new(radius: ProximityRadius, request_timeout: Duration, location_timeout: Duration) -> Self {
        Self {
            radius,
            request_timeout,
            location_timeout,
        }
    }

    /// Unlock radius.
    pub fn radius(&self) -> ProximityRadius {
        self.radius
    }

    /// Upper bound on each listing service call.
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Upper bound on each location call.
    pub fn location_timeout(&self) -> Duration {
        self.location_timeout
    }
}

impl Default for DetailSettings {
    fn default() -> Self {
        Self::new(
            ProximityRadius::default(),
            calls::DEFAULT_REQUEST_TIMEOUT,
            calls::DEFAULT_LOCATION_TIMEOUT,
        )
    }
}

#[derive(Debug, Default)]
struct DetailState {
    listing: Option<Listing>,
    proximity: ProximityStatus,
    requested: bool,
    unlocking: bool,
    torn_down: bool,
    generation: u64,
}

impl DetailState {
    fn snapshot(&self) -> DetailSnapshot {
        DetailSnapshot {
            listing: self.listing.clone(),
            proximity: self.proximity,
            unlocking: self.unlocking,
        }
    }

    fn unlock_blocker(&self) -> Option<UnlockSkip> {
        if self.torn_down {
            return Some(UnlockSkip::TornDown);
        }
        let Some(listing) = self.listing.as_ref() else {
            return Some(UnlockSkip::NoListing);
        };
        if self.unlocking {
            Some(UnlockSkip::InProgress)
        } else if listing.is_unlocked() {
            Some(UnlockSkip::AlreadyUnlocked)
        } else if !self.proximity.is_nearby() {
            Some(UnlockSkip::NotNearby)
        } else {
            None
        }
    }
}

/// State machine behind the listing detail screen.
pub struct DetailController<S, G> {
    id: ListingId,
    service: Arc<S>,
    geolocation: Arc<G>,
    notices: Arc<dyn NoticeSink>,
    settings: DetailSettings,
    state: Mutex<DetailState>,
}

impl<S, G> DetailController<S, G> {
    /// Create a controller for one visit to listing `id`.
    pub fn new(
        id: ListingId,
        service: Arc<S>,
        geolocation: Arc<G>,
        notices: Arc<dyn NoticeSink>,
        settings: DetailSettings,
    ) -> Self {
        Self {
            id,
            service,
            geolocation,
            notices,
            settings,
            state: Mutex::new(DetailState::default()),
        }
    }

    /// Listing this controller was created for.
    pub fn id(&self) -> &ListingId {
        &self.id
    }

    /// Copy of the current state for rendering.
    pub fn snapshot(&self) -> DetailSnapshot {
        lock(&self.state).snapshot()
    }

    /// End the visit. Completions still in flight are discarded.
    pub fn teardown(&self) {
        let mut state = lock(&self.state);
        state.torn_down = true;
        state.generation = state.generation.wrapping_add(1);
        debug!(listing = %self.id, "detail controller torn down");
    }
}

impl<S, G> DetailController<S, G>
where
    S: ListingService,
    G: GeolocationProvider,
{
    /// Fetch the listing, then evaluate proximity.
    ///
    /// Runs at most once per instance. A missing listing leaves the screen in
    /// its loading view; failures are logged without notifying the user.
    pub async fn load_details(&self) -> DetailOutcome {
        let token = {
            let mut state = lock(&self.state);
            if state.requested {
                return DetailOutcome::AlreadyRequested;
            }
            if state.torn_down {
                return DetailOutcome::Stale;
            }
            state.requested = true;
            state.generation
        };

        let result = call_service(
            "fetch listing",
            self.settings.request_timeout,
            self.service.fetch_by_id(&self.id),
        )
        .await;

        {
            let mut state = lock(&self.state);
            if state.generation != token {
                debug!(listing = %self.id, "discarding listing fetched after teardown");
                return DetailOutcome::Stale;
            }
            match result {
                Ok(Some(listing)) => state.listing = Some(listing),
                Ok(None) => {
                    info!(listing = %self.id, "listing not found");
                    return DetailOutcome::NotFound;
                }
                Err(error) => {
                    warn!(listing = %self.id, %error, "failed to fetch listing details");
                    return DetailOutcome::Failed(error);
                }
            }
        }

        DetailOutcome::Loaded(self.evaluate_proximity().await)
    }

    /// Measure the user's distance to the loaded listing.
    ///
    /// Reads the permission state without prompting. Returns the resulting
    /// status, which is also visible through [`Self::snapshot`].
    pub async fn evaluate_proximity(&self) -> ProximityStatus {
        let (target, token) = {
            let mut state = lock(&self.state);
            let denied = state.proximity
                == ProximityStatus::Unavailable(ProximityUnavailable::PermissionDenied);
            let target = state.listing.as_ref().map(Listing::coordinates);
            match target {
                Some(target) if !denied && !state.torn_down => {
                    state.proximity = ProximityStatus::Checking;
                    (target, state.generation)
                }
                _ => return state.proximity,
            }
        };

        let limit = self.settings.location_timeout;
        let status = match call_location(limit, self.geolocation.permission_status()).await {
            Ok(LocationPermission::Granted) => {
                match call_location(limit, self.geolocation.current_position()).await {
                    Ok(position) => {
                        let distance = distance_km(position, target);
                        if self.settings.radius.contains_km(distance) {
                            ProximityStatus::Nearby {
                                distance_km: distance,
                            }
                        } else {
                            ProximityStatus::Distant {
                                distance_km: distance,
                            }
                        }
                    }
                    Err(error) => {
                        warn!(listing = %self.id, %error, "could not read device position");
                        ProximityStatus::Unavailable(ProximityUnavailable::PositionUnavailable)
                    }
                }
            }
            Ok(LocationPermission::Denied) => {
                info!(listing = %self.id, "location permission not granted; unlock disabled");
                ProximityStatus::Unavailable(ProximityUnavailable::PermissionDenied)
            }
            Err(error) => {
                warn!(listing = %self.id, %error, "could not read location permission");
                ProximityStatus::Unavailable(ProximityUnavailable::PositionUnavailable)
            }
        };

        let mut state = lock(&self.state);
        if state.generation != token {
            return state.proximity;
        }
        state.proximity = status;
        debug!(listing = %self.id, ?status, "proximity evaluated");
        status
    }

    /// Unlock the listing.
    ///
    /// The service is only called when the listing is loaded, still locked,
    /// the user is nearby and no other unlock is in flight.
    pub async fn unlock(&self) -> UnlockAttempt {
        let token = {
            let mut state = lock(&self.state);
            if let Some(skip) = state.unlock_blocker() {
                debug!(listing = %self.id, ?skip, "unlock skipped");
                return UnlockAttempt::Skipped(skip);
            }
            state.unlocking = true;
            state.generation
        };

        let result = call_service(
            "unlock listing",
            self.settings.request_timeout,
            self.service.unlock(&self.id),
        )
        .await;

        let attempt = {
            let mut state = lock(&self.state);
            state.unlocking = false;
            if state.generation != token {
                debug!(listing = %self.id, "discarding unlock completed after teardown");
                return UnlockAttempt::Stale;
            }
            match result {
                Ok(UnlockOutcome::Unlocked(_)) => {
                    if let Some(listing) = state.listing.as_mut() {
                        listing.mark_unlocked();
                    }
                    UnlockAttempt::Unlocked
                }
                Ok(UnlockOutcome::Rejected(rejection)) => UnlockAttempt::Rejected(rejection),
                Err(error) => UnlockAttempt::Failed(error),
            }
        };

        match &attempt {
            UnlockAttempt::Unlocked => {
                info!(listing = %self.id, "listing unlocked");
                self.notices
                    .publish(Notice::success("Success", "Home unlocked successfully!"));
            }
            UnlockAttempt::Rejected(rejection) => {
                info!(listing = %self.id, %rejection, "unlock rejected");
                self.notices
                    .publish(Notice::error("Error", "Failed to unlock the home."));
            }
            UnlockAttempt::Failed(error) => {
                warn!(listing = %self.id, %error, "unlock failed");
                self.notices.publish(Notice::error(
                    "Error",
                    "An error occurred while unlocking the home.",
                ));
            }
            UnlockAttempt::Skipped(_) | UnlockAttempt::Stale => {}
        }
        attempt
    }
}

#[cfg(test)]
mod tests;
