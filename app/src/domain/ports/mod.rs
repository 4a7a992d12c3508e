//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod geolocation;
mod listing_service;
mod listing_store;
mod notice_sink;

#[cfg(test)]
pub use geolocation::MockGeolocationProvider;
pub use geolocation::{GeolocationError, GeolocationProvider, LocationPermission};
#[cfg(test)]
pub use listing_service::MockListingService;
pub use listing_service::{ListingService, ListingServiceError, UnlockOutcome, UnlockRejection};
#[cfg(test)]
pub use listing_store::MockListingStore;
pub use listing_store::{ListingStore, ListingStoreError};
#[cfg(test)]
pub use notice_sink::MockNoticeSink;
pub use notice_sink::NoticeSink;
