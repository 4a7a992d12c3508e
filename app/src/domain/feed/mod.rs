//! Paginated listing feed.
//!
//! [`FeedController`] drives the listing list screen: the first page on
//! mount, further pages as the user scrolls, and pull-to-refresh. Only one
//! fetch owns the feed at a time, except that a refresh preempts a page
//! load; the preempted completion is recognised by its generation token and
//! discarded.
//!
//! Before the very first fetch the controller asks for location permission
//! and resolves the device position once. The position, if any, biases
//! every fetch the controller makes afterwards.

mod state;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use pagination::{PageNumber, PageRequest, PageSize};
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::domain::calls::{self, call_location, call_service};
use crate::domain::ports::{GeolocationProvider, ListingService, LocationPermission, NoticeSink};
use crate::domain::sync::lock;
use crate::domain::{Coordinates, Error, Notice};

pub use self::state::{FeedPhase, FeedSnapshot, SkipReason};
use self::state::{FeedState, RequestKind};

/// Tuning for a [`FeedController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedSettings {
    page_size: PageSize,
    request_timeout: Duration,
    location_timeout: Duration,
}

impl FeedSettings {
    /// Build settings from explicit values.
    pub fn new(page_size: PageSize, request_timeout: Duration, location_timeout: Duration) -> Self {
        Self {
            page_size,
            request_timeout,
            location_timeout,
        }
    }

    /// Listings requested per page.
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Upper bound on one page fetch.
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Upper bound on each location call.
    pub fn location_timeout(&self) -> Duration {
        self.location_timeout
    }
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self::new(
            PageSize::DEFAULT,
            calls::DEFAULT_REQUEST_TIMEOUT,
            calls::DEFAULT_LOCATION_TIMEOUT,
        )
    }
}

/// Result of a feed operation.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedOutcome {
    /// The page was fetched and applied.
    Loaded {
        /// Page that was applied.
        page: PageNumber,
        /// Number of listings it carried.
        received: usize,
    },
    /// The operation did not start.
    Skipped(SkipReason),
    /// The fetch completed after a newer request superseded it.
    Stale,
    /// The fetch failed; the feed kept its items.
    Failed(Error),
}

/// State machine behind the listing list screen.
pub struct FeedController<S, G> {
    service: Arc<S>,
    geolocation: Arc<G>,
    notices: Arc<dyn NoticeSink>,
    settings: FeedSettings,
    state: Mutex<FeedState>,
    bias: OnceCell<Option<Coordinates>>,
}

impl<S, G> FeedController<S, G> {
    /// Create an idle feed.
    pub fn new(
        service: Arc<S>,
        geolocation: Arc<G>,
        notices: Arc<dyn NoticeSink>,
        settings: FeedSettings,
    ) -> Self {
        Self {
            service,
            geolocation,
            notices,
            settings,
            state: Mutex::new(FeedState::default()),
            bias: OnceCell::new(),
        }
    }

    /// Copy of the current state for rendering.
    pub fn snapshot(&self) -> FeedSnapshot {
        lock(&self.state).snapshot()
    }

    /// The resolved location bias; `None` until resolved or when unavailable.
    pub fn bias(&self) -> Option<Coordinates> {
        self.bias.get().copied().flatten()
    }
}

impl<S, G> FeedController<S, G>
where
    S: ListingService,
    G: GeolocationProvider,
{
    /// Load page 1, replacing any items. Allowed from `Idle` and `Error`.
    pub async fn load_initial(&self) -> FeedOutcome {
        self.run(RequestKind::Initial).await
    }

    /// Append the page after the current one.
    ///
    /// Ignored while any fetch is in flight, once the feed is exhausted, and
    /// until the first page has loaded.
    pub async fn load_next(&self) -> FeedOutcome {
        self.run(RequestKind::Next).await
    }

    /// Re-fetch page 1 and replace the list once it arrives.
    ///
    /// Preempts an in-flight page load. Ignored while a refresh or the first
    /// load is in flight.
    pub async fn refresh(&self) -> FeedOutcome {
        self.run(RequestKind::Refresh).await
    }

    async fn run(&self, kind: RequestKind) -> FeedOutcome {
        let begun = lock(&self.state).begin(kind);
        let ticket = match begun {
            Ok(ticket) => ticket,
            Err(reason) => {
                debug!(?kind, ?reason, "feed operation skipped");
                return FeedOutcome::Skipped(reason);
            }
        };

        let bias = self.location_bias().await;
        let request = PageRequest::at(ticket.page, self.settings.page_size);
        let result = call_service(
            "fetch page",
            self.settings.request_timeout,
            self.service.fetch_page(request, bias),
        )
        .await;

        let outcome = {
            let mut state = lock(&self.state);
            if !state.is_current(ticket.token) {
                debug!(page = ticket.page.get(), "discarding superseded page fetch");
                return FeedOutcome::Stale;
            }
            match result {
                Ok(page) => {
                    let received = state.complete(ticket, page);
                    FeedOutcome::Loaded {
                        page: ticket.page,
                        received,
                    }
                }
                Err(error) => {
                    state.fail();
                    FeedOutcome::Failed(error)
                }
            }
        };

        match &outcome {
            FeedOutcome::Loaded { page, received } => {
                info!(page = page.get(), received, ?kind, "feed page loaded");
            }
            FeedOutcome::Failed(error) => {
                warn!(page = ticket.page.get(), %error, ?kind, "feed page failed to load");
                self.notices
                    .publish(Notice::error("Error", "Failed to load listings."));
            }
            FeedOutcome::Skipped(_) | FeedOutcome::Stale => {}
        }
        outcome
    }

    async fn location_bias(&self) -> Option<Coordinates> {
        *self.bias.get_or_init(|| self.resolve_bias()).await
    }

    async fn resolve_bias(&self) -> Option<Coordinates> {
        let limit = self.settings.location_timeout;
        match call_location(limit, self.geolocation.request_permission()).await {
            Ok(LocationPermission::Granted) => {}
            Ok(LocationPermission::Denied) => {
                info!("location permission denied; feed continues without bias");
                self.notices.publish(Notice::error(
                    "Permission denied",
                    "Location permission is required to check proximity.",
                ));
                return None;
            }
            Err(error) => {
                warn!(%error, "location permission request failed");
                return None;
            }
        }

        match call_location(limit, self.geolocation.current_position()).await {
            Ok(position) => {
                debug!(%position, "resolved feed location bias");
                Some(position)
            }
            Err(error) => {
                warn!(%error, "feed location bias unavailable");
                None
            }
        }
    }
}
