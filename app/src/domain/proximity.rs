//! Great-circle distance and the "nearby" policy gating unlocks.

use thiserror::Error;

use super::Coordinates;

/// Mean Earth radius used by the spherical approximation.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Default unlock radius in metres.
pub const DEFAULT_UNLOCK_RADIUS_METRES: f64 = 30.0;

const METRES_PER_KM: f64 = 1000.0;

/// Calculate the distance between two coordinates in kilometres.
///
/// Uses the haversine formula on a sphere of radius 6371 km, which is well
/// within GPS error for the distances the app deals with.
///
/// # Examples
/// ```
/// use home_unlock::domain::{Coordinates, distance_km};
///
/// let london = Coordinates::new(51.5074, -0.1278).expect("valid");
/// let paris = Coordinates::new(48.8566, 2.3522).expect("valid");
/// let km = distance_km(london, paris);
/// assert!((km - 343.5).abs() < 1.0);
/// ```
pub fn distance_km(from: Coordinates, to: Coordinates) -> f64 {
    let lat1 = from.latitude().to_radians();
    let lat2 = to.latitude().to_radians();
    let dlat = (to.latitude() - from.latitude()).to_radians();
    let dlng = (to.longitude() - from.longitude()).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    // Clamp guards against rounding pushing `a` past 1 for antipodal points.
    let c = 2.0 * a.clamp(0.0, 1.0).sqrt().atan2((1.0 - a).max(0.0).sqrt());

    EARTH_RADIUS_KM * c
}

/// Errors raised when constructing a [`ProximityRadius`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ProximityRadiusError {
    /// Radius was negative, zero or not finite.
    #[error("proximity radius must be a positive, finite number of metres, got {0}")]
    Invalid(f64),
}

/// Radius within which a listing counts as nearby.
///
/// Stored in metres; distances are compared in kilometres after an
/// explicit conversion so the two units can never be mixed up.
///
/// # Examples
/// ```
/// use home_unlock::domain::ProximityRadius;
///
/// let radius = ProximityRadius::from_metres(30.0).expect("valid radius");
/// assert!(radius.contains_km(0.030));
/// assert!(!radius.contains_km(0.031));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityRadius {
    metres: f64,
}

impl ProximityRadius {
    /// Build a radius from metres.
    pub fn from_metres(metres: f64) -> Result<Self, ProximityRadiusError> {
        if !metres.is_finite() || metres <= 0.0 {
            return Err(ProximityRadiusError::Invalid(metres));
        }
        Ok(Self { metres })
    }

    /// Radius in metres.
    pub fn metres(&self) -> f64 {
        self.metres
    }

    /// Radius in kilometres.
    pub fn kilometres(&self) -> f64 {
        self.metres / METRES_PER_KM
    }

    /// Whether a distance in kilometres lies inside the radius (inclusive).
    pub fn contains_km(&self, distance_km: f64) -> bool {
        distance_km <= self.kilometres()
    }

    /// Whether `point` is nearby `target`.
    pub fn is_nearby(&self, point: Coordinates, target: Coordinates) -> bool {
        self.contains_km(distance_km(point, target))
    }
}

impl Default for ProximityRadius {
    fn default() -> Self {
        Self {
            metres: DEFAULT_UNLOCK_RADIUS_METRES,
        }
    }
}
