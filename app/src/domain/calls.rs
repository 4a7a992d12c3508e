//! Bounded port calls shared by the controllers.
//!
//! Every service and location call made by a controller is wrapped in a
//! timeout. Service failures and expiries are folded into domain errors here
//! so the controllers only ever branch on [`Error`].

use std::future::Future;
use std::time::Duration;

use tokio::time;

use crate::domain::Error;
use crate::domain::ports::{GeolocationError, ListingServiceError};

/// Default upper bound on one listing service call.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Default upper bound on one geolocation call.
pub const DEFAULT_LOCATION_TIMEOUT: Duration = Duration::from_secs(5);

/// Translate a listing service failure into a domain error.
pub(crate) fn map_service_error(error: ListingServiceError) -> Error {
    match error {
        ListingServiceError::Unavailable { message } => {
            Error::service_unavailable(format!("listing service unavailable: {message}"))
        }
        ListingServiceError::InvalidRequest { message } => {
            Error::invalid_request(format!("listing service rejected the request: {message}"))
        }
        ListingServiceError::Decode { message } => Error::service_unavailable(format!(
            "listing service response could not be decoded: {message}"
        )),
    }
}

/// Await a listing service call for at most `limit`.
///
/// Expiry is reported as `ServiceUnavailable`.
pub(crate) async fn call_service<T, F>(
    operation: &'static str,
    limit: Duration,
    call: F,
) -> Result<T, Error>
where
    F: Future<Output = Result<T, ListingServiceError>>,
{
    match time::timeout(limit, call).await {
        Ok(result) => result.map_err(map_service_error),
        Err(_) => Err(Error::service_unavailable(format!(
            "{operation} timed out after {}ms",
            limit.as_millis()
        ))),
    }
}

/// Await a geolocation call for at most `limit`.
pub(crate) async fn call_location<T, F>(limit: Duration, call: F) -> Result<T, GeolocationError>
where
    F: Future<Output = Result<T, GeolocationError>>,
{
    time::timeout(limit, call)
        .await
        .unwrap_or_else(|_| Err(GeolocationError::timed_out()))
}
