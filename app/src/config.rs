//! Application settings loaded via OrthoConfig.
//!
//! Every value is optional; accessors fall back to defaults and validate
//! ranges, returning typed settings for the controllers and adapters.
//! Values come from `HOME_UNLOCK_*` environment variables, a configuration
//! file or command-line flags.

use std::time::Duration;

use ortho_config::OrthoConfig;
use pagination::PageSize;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::domain::{
    DEFAULT_LOCATION_TIMEOUT, DEFAULT_REQUEST_TIMEOUT, DetailSettings, FeedSettings,
    ProximityRadius, ProximityRadiusError,
};
use crate::outbound::{SimulatedLatency, SimulatedSettings};

/// Errors raised when settings hold out-of-range values.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Page size was zero.
    #[error("page_size must be at least 1")]
    ZeroPageSize,
    /// Unlock radius was not a positive number of metres.
    #[error(transparent)]
    InvalidRadius(#[from] ProximityRadiusError),
    /// Unlock success ratio fell outside `[0, 1]`.
    #[error("unlock_success_ratio must lie in [0, 1], got {0}")]
    UnlockRatioOutOfRange(f64),
    /// Generation spread was not a non-negative number of metres.
    #[error("spread_metres must be a non-negative number, got {0}")]
    InvalidSpread(f64),
    /// A timeout was zero.
    #[error("{field} must be greater than zero")]
    ZeroTimeout {
        /// Offending setting.
        field: &'static str,
    },
    /// The listing API base URL did not parse.
    #[error("api_base_url {value:?} is not a valid URL: {source}")]
    InvalidBaseUrl {
        /// Raw configured value.
        value: String,
        /// Parser failure.
        source: url::ParseError,
    },
}

/// Configuration values for the app core.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "HOME_UNLOCK")]
pub struct AppSettings {
    /// Listings per feed page.
    pub page_size: Option<u32>,
    /// Size of the simulated catalogue.
    pub total_listings: Option<usize>,
    /// Unlock radius in metres.
    pub unlock_radius_metres: Option<f64>,
    /// Probability that a simulated unlock succeeds.
    pub unlock_success_ratio: Option<f64>,
    /// Seed for simulated listings and unlock outcomes.
    pub generator_seed: Option<u64>,
    /// Simulated login delay in milliseconds.
    pub login_latency_ms: Option<u64>,
    /// Simulated page delay in milliseconds.
    pub page_latency_ms: Option<u64>,
    /// Simulated detail delay in milliseconds.
    pub detail_latency_ms: Option<u64>,
    /// Simulated unlock delay in milliseconds.
    pub unlock_latency_ms: Option<u64>,
    /// Upper bound on each listing service call in milliseconds.
    pub request_timeout_ms: Option<u64>,
    /// Upper bound on each location call in milliseconds.
    pub location_timeout_ms: Option<u64>,
    /// Radius in metres around the user within which listings are generated.
    pub spread_metres: Option<f64>,
    /// Root of a listing HTTP API; the simulated service is used when unset.
    pub api_base_url: Option<String>,
}

fn millis_or(value: Option<u64>, default: Duration) -> Duration {
    value.map_or(default, Duration::from_millis)
}

fn non_zero_timeout(value: Duration, field: &'static str) -> Result<Duration, SettingsError> {
    if value.is_zero() {
        return Err(SettingsError::ZeroTimeout { field });
    }
    Ok(value)
}

impl AppSettings {
    /// Settings with every value unset, so each accessor yields its default.
    pub fn empty() -> Self {
        Self {
            page_size: None,
            total_listings: None,
            unlock_radius_metres: None,
            unlock_success_ratio: None,
            generator_seed: None,
            login_latency_ms: None,
            page_latency_ms: None,
            detail_latency_ms: None,
            unlock_latency_ms: None,
            request_timeout_ms: None,
            location_timeout_ms: None,
            spread_metres: None,
            api_base_url: None,
        }
    }

    /// Configured page size, or ten.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::ZeroPageSize`] for `0`.
    pub fn page_size(&self) -> Result<PageSize, SettingsError> {
        self.page_size.map_or(Ok(PageSize::DEFAULT), |size| {
            PageSize::new(size).map_err(|_| SettingsError::ZeroPageSize)
        })
    }

    /// Configured unlock radius, or 30 metres.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidRadius`] for non-positive values.
    pub fn unlock_radius(&self) -> Result<ProximityRadius, SettingsError> {
        self.unlock_radius_metres
            .map_or(Ok(ProximityRadius::default()), |metres| {
                ProximityRadius::from_metres(metres).map_err(SettingsError::from)
            })
    }

    /// Upper bound on each listing service call.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::ZeroTimeout`] when set to zero.
    pub fn request_timeout(&self) -> Result<Duration, SettingsError> {
        non_zero_timeout(
            millis_or(self.request_timeout_ms, DEFAULT_REQUEST_TIMEOUT),
            "request_timeout_ms",
        )
    }

    /// Upper bound on each location call.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::ZeroTimeout`] when set to zero.
    pub fn location_timeout(&self) -> Result<Duration, SettingsError> {
        non_zero_timeout(
            millis_or(self.location_timeout_ms, DEFAULT_LOCATION_TIMEOUT),
            "location_timeout_ms",
        )
    }

    /// Settings for the listing feed.
    ///
    /// # Errors
    ///
    /// Propagates page size and timeout validation failures.
    pub fn feed_settings(&self) -> Result<FeedSettings, SettingsError> {
        Ok(FeedSettings::new(
            self.page_size()?,
            self.request_timeout()?,
            self.location_timeout()?,
        ))
    }

    /// Settings for the detail screen.
    ///
    /// # Errors
    ///
    /// Propagates radius and timeout validation failures.
    pub fn detail_settings(&self) -> Result<DetailSettings, SettingsError> {
        Ok(DetailSettings::new(
            self.unlock_radius()?,
            self.request_timeout()?,
            self.location_timeout()?,
        ))
    }

    /// Settings for the simulated listing service.
    ///
    /// # Errors
    ///
    /// Returns an error when the unlock ratio or spread is out of range.
    pub fn simulated_settings(&self) -> Result<SimulatedSettings, SettingsError> {
        let defaults = SimulatedSettings::default();
        let ratio = self
            .unlock_success_ratio
            .unwrap_or(defaults.unlock_success_ratio);
        if !(0.0..=1.0).contains(&ratio) {
            return Err(SettingsError::UnlockRatioOutOfRange(ratio));
        }
        let spread = self.spread_metres.unwrap_or(defaults.spread_metres);
        if !spread.is_finite() || spread < 0.0 {
            return Err(SettingsError::InvalidSpread(spread));
        }
        let latency = SimulatedLatency {
            login: millis_or(self.login_latency_ms, defaults.latency.login),
            page: millis_or(self.page_latency_ms, defaults.latency.page),
            detail: millis_or(self.detail_latency_ms, defaults.latency.detail),
            unlock: millis_or(self.unlock_latency_ms, defaults.latency.unlock),
        };

        Ok(SimulatedSettings {
            total_listings: self.total_listings.unwrap_or(defaults.total_listings),
            unlock_success_ratio: ratio,
            seed: self.generator_seed.unwrap_or(defaults.seed),
            spread_metres: spread,
            latency,
        })
    }

    /// Parsed listing API root, if configured.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidBaseUrl`] when the value does not parse.
    pub fn api_base_url(&self) -> Result<Option<Url>, SettingsError> {
        self.api_base_url
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .map(|raw| {
                Url::parse(raw).map_err(|source| SettingsError::InvalidBaseUrl {
                    value: raw.to_owned(),
                    source,
                })
            })
            .transpose()
    }
}
