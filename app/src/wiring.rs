//! Assemble adapters and controllers from [`AppSettings`].
//!
//! One listing service, one geolocation provider and one notice sink are
//! shared by every controller created from an [`AppServices`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pagination::{Page, PageRequest};
use thiserror::Error;
use tracing::info;

use crate::config::{AppSettings, SettingsError};
use crate::domain::ports::{
    GeolocationProvider, ListingService, ListingServiceError, NoticeSink, UnlockOutcome,
};
use crate::domain::{
    Coordinates, DetailController, DetailSettings, FeedController, FeedSettings, Listing,
    ListingId, LoginCredentials, SessionController,
};
use crate::outbound::{HttpListingService, InMemoryListingStore, SimulatedListingService};

/// Errors raised while assembling the app core.
#[derive(Debug, Error)]
pub enum WiringError {
    /// A setting was out of range.
    #[error(transparent)]
    Settings(#[from] SettingsError),
    /// The HTTP client could not be built.
    #[error("failed to build listing API client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// The listing service selected by configuration.
pub enum ListingBackend {
    /// In-process simulation over an in-memory store.
    Simulated(SimulatedListingService<InMemoryListingStore>),
    /// Remote JSON API.
    Http(HttpListingService),
}

impl ListingBackend {
    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Simulated(_) => "simulated",
            Self::Http(_) => "http",
        }
    }
}

#[async_trait]
impl ListingService for ListingBackend {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<bool, ListingServiceError> {
        match self {
            Self::Simulated(service) => service.authenticate(credentials).await,
            Self::Http(service) => service.authenticate(credentials).await,
        }
    }

    async fn fetch_page(
        &self,
        request: PageRequest,
        bias: Option<Coordinates>,
    ) -> Result<Page<Listing>, ListingServiceError> {
        match self {
            Self::Simulated(service) => service.fetch_page(request, bias).await,
            Self::Http(service) => service.fetch_page(request, bias).await,
        }
    }

    async fn fetch_by_id(&self, id: &ListingId) -> Result<Option<Listing>, ListingServiceError> {
        match self {
            Self::Simulated(service) => service.fetch_by_id(id).await,
            Self::Http(service) => service.fetch_by_id(id).await,
        }
    }

    async fn unlock(&self, id: &ListingId) -> Result<UnlockOutcome, ListingServiceError> {
        match self {
            Self::Simulated(service) => service.unlock(id).await,
            Self::Http(service) => service.unlock(id).await,
        }
    }
}

/// Shared adapters plus the settings each controller needs.
pub struct AppServices<G> {
    service: Arc<ListingBackend>,
    geolocation: Arc<G>,
    notices: Arc<dyn NoticeSink>,
    feed: FeedSettings,
    detail: DetailSettings,
    request_timeout: Duration,
}

impl<G> AppServices<G>
where
    G: GeolocationProvider,
{
    /// Build the listing service named by `settings` and keep the shared
    /// adapters for later controller construction.
    ///
    /// # Errors
    ///
    /// Returns [`WiringError`] when a setting is invalid or the HTTP client
    /// cannot be built.
    pub fn from_settings(
        settings: &AppSettings,
        geolocation: Arc<G>,
        notices: Arc<dyn NoticeSink>,
    ) -> Result<Self, WiringError> {
        let request_timeout = settings.request_timeout()?;
        let backend = match settings.api_base_url()? {
            Some(base) => ListingBackend::Http(HttpListingService::new(base, request_timeout)?),
            None => ListingBackend::Simulated(SimulatedListingService::new(
                Arc::new(InMemoryListingStore::new()),
                settings.simulated_settings()?,
            )),
        };
        info!(backend = backend.kind(), "listing service ready");

        Ok(Self {
            service: Arc::new(backend),
            geolocation,
            notices,
            feed: settings.feed_settings()?,
            detail: settings.detail_settings()?,
            request_timeout,
        })
    }

    /// Shared listing service.
    pub fn listing_service(&self) -> &Arc<ListingBackend> {
        &self.service
    }

    /// Controller for the login screen.
    pub fn session(&self) -> SessionController<ListingBackend> {
        SessionController::new(
            Arc::clone(&self.service),
            Arc::clone(&self.notices),
            self.request_timeout,
        )
    }

    /// Controller for the listing list screen.
    pub fn feed(&self) -> FeedController<ListingBackend, G> {
        FeedController::new(
            Arc::clone(&self.service),
            Arc::clone(&self.geolocation),
            Arc::clone(&self.notices),
            self.feed,
        )
    }

    /// Controller for one visit to listing `id`.
    pub fn detail(&self, id: ListingId) -> DetailController<ListingBackend, G> {
        DetailController::new(
            id,
            Arc::clone(&self.service),
            Arc::clone(&self.geolocation),
            Arc::clone(&self.notices),
            self.detail,
        )
    }
}
