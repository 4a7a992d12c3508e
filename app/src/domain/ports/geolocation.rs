//! Port for the device's location capability.

use async_trait::async_trait;

use crate::domain::Coordinates;

use super::define_port_error;

define_port_error! {
    /// Errors raised by geolocation adapters.
    pub enum GeolocationError {
        /// The platform could not produce a fix.
        Unavailable { message: String } => "location unavailable: {message}",
        /// The platform did not answer in time.
        TimedOut => "location request timed out",
    }
}

/// Foreground location permission state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationPermission {
    /// The app may read the device position.
    Granted,
    /// The user refused, or has not yet been asked.
    Denied,
}

impl LocationPermission {
    /// Whether the permission allows position queries.
    pub fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Device geolocation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GeolocationProvider: Send + Sync {
    /// Ask the user for permission, prompting if the platform requires it.
    async fn request_permission(&self) -> Result<LocationPermission, GeolocationError>;

    /// Read the current permission state without prompting.
    async fn permission_status(&self) -> Result<LocationPermission, GeolocationError>;

    /// Read the device position once.
    async fn current_position(&self) -> Result<Coordinates, GeolocationError>;
}
