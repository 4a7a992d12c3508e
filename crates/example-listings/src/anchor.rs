//! Anchor point used to cluster generated listings around a location.

use crate::GenerationError;

/// Metres per degree of latitude (and of longitude at the equator).
const METRES_PER_DEGREE: f64 = 111_320.0;

/// Sphere radius matching [`METRES_PER_DEGREE`].
const EARTH_RADIUS_METRES: f64 = METRES_PER_DEGREE * 180.0 / std::f64::consts::PI;

/// Below this cosine of latitude the anchor sits on a pole and keeps its
/// longitude.
const POLAR_COSINE_EPSILON: f64 = 1e-9;

/// Centre and radius for biased listing generation.
///
/// ## Invariants
/// - `latitude` is finite and within `[-90, 90]`.
/// - `longitude` is finite and within `[-180, 180]`.
/// - `spread_metres` is finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    latitude: f64,
    longitude: f64,
    spread_metres: f64,
}

impl Anchor {
    /// Validate and build an anchor.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] when a coordinate is out of range or the
    /// spread is negative or not finite.
    ///
    /// # Example
    ///
    /// ```
    /// use example_listings::Anchor;
    ///
    /// assert!(Anchor::new(40.0, -74.0, 50.0).is_ok());
    /// assert!(Anchor::new(95.0, -74.0, 50.0).is_err());
    /// assert!(Anchor::new(40.0, -74.0, -1.0).is_err());
    /// ```
    pub fn new(latitude: f64, longitude: f64, spread_metres: f64) -> Result<Self, GenerationError> {
        check_range("latitude", latitude, 90.0)?;
        check_range("longitude", longitude, 180.0)?;
        if !spread_metres.is_finite() || spread_metres < 0.0 {
            return Err(GenerationError::InvalidSpread {
                value: spread_metres,
            });
        }
        Ok(Self {
            latitude,
            longitude,
            spread_metres,
        })
    }

    /// Anchor latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Anchor longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Maximum distance of generated listings from the anchor, in metres.
    #[must_use]
    pub const fn spread_metres(&self) -> f64 {
        self.spread_metres
    }

    /// Displace the anchor by `distance_metres` along `bearing_radians`.
    ///
    /// Follows the great circle from the anchor, so the result is exactly
    /// `distance_metres` away on a sphere of [`EARTH_RADIUS_METRES`] even
    /// next to a pole. Longitude is wrapped into `[-180, 180]`.
    pub(crate) fn offset(&self, distance_metres: f64, bearing_radians: f64) -> (f64, f64) {
        let angle = distance_metres / EARTH_RADIUS_METRES;
        let lat = self.latitude.to_radians();
        let (sin_lat, cos_lat) = lat.sin_cos();
        let (sin_angle, cos_angle) = angle.sin_cos();

        let sin_target = (sin_lat * cos_angle + cos_lat * sin_angle * bearing_radians.cos())
            .clamp(-1.0, 1.0);
        let latitude = sin_target.asin().to_degrees();
        let longitude = if cos_lat.abs() < POLAR_COSINE_EPSILON {
            self.longitude
        } else {
            let delta = (bearing_radians.sin() * sin_angle * cos_lat)
                .atan2(cos_angle - sin_lat * sin_target);
            wrap_longitude(self.longitude + delta.to_degrees())
        };
        (latitude, longitude)
    }
}

fn check_range(field: &'static str, value: f64, bound: f64) -> Result<(), GenerationError> {
    if value.is_finite() && (-bound..=bound).contains(&value) {
        Ok(())
    } else {
        Err(GenerationError::AnchorOutOfRange {
            field,
            value,
            min: -bound,
            max: bound,
        })
    }
}

fn wrap_longitude(longitude: f64) -> f64 {
    (longitude + 180.0).rem_euclid(360.0) - 180.0
}
