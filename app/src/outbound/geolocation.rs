//! Geolocation provider with a fixed permission and a settable position.
//!
//! Stands in for the platform location service where none exists: headless
//! runs, demos and tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::Coordinates;
use crate::domain::ports::{GeolocationError, GeolocationProvider, LocationPermission};
use crate::domain::sync::lock;

/// [`GeolocationProvider`] answering from configured values.
#[derive(Debug)]
pub struct StaticGeolocation {
    permission: LocationPermission,
    position: Mutex<Option<Coordinates>>,
}

impl StaticGeolocation {
    /// Provider with the given permission and optional position.
    pub fn new(permission: LocationPermission, position: Option<Coordinates>) -> Self {
        Self {
            permission,
            position: Mutex::new(position),
        }
    }

    /// Permission granted, device at `position`.
    pub fn granted_at(position: Coordinates) -> Self {
        Self::new(LocationPermission::Granted, Some(position))
    }

    /// Permission refused.
    pub fn denied() -> Self {
        Self::new(LocationPermission::Denied, None)
    }

    /// Move the device. `None` simulates losing the fix.
    pub fn set_position(&self, position: Option<Coordinates>) {
        *lock(&self.position) = position;
    }
}

#[async_trait]
impl GeolocationProvider for StaticGeolocation {
    async fn request_permission(&self) -> Result<LocationPermission, GeolocationError> {
        Ok(self.permission)
    }

    async fn permission_status(&self) -> Result<LocationPermission, GeolocationError> {
        Ok(self.permission)
    }

    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        if !self.permission.is_granted() {
            return Err(GeolocationError::unavailable("location permission not granted"));
        }
        (*lock(&self.position)).ok_or_else(|| GeolocationError::unavailable("no position fix"))
    }
}
