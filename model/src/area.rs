//! Search areas for the restaurant listing endpoint.

use serde::Serialize;

use crate::error::{ModelError, ModelResult};

/// Centre point and radius used to list restaurants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SearchArea {
    latitude: f64,
    longitude: f64,
    radius_km: f64,
}

impl SearchArea {
    /// Creates a search area with the same checks the gateway applies.
    pub fn new(latitude: f64, longitude: f64, radius_km: f64) -> ModelResult<Self> {
        if !(radius_km.is_finite() && radius_km > 0.0) {
            return Err(ModelError::InvalidRadius { radius_km });
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ModelError::LatitudeOutOfRange {
                latitude,
                min: -90.0,
                max: 90.0,
            });
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(ModelError::LongitudeOutOfRange {
                longitude,
                min: -180.0,
                max: 180.0,
            });
        }
        Ok(Self {
            latitude,
            longitude,
            radius_km,
        })
    }

    /// Wide area used when discovering existing fixtures.
    #[must_use]
    pub const fn discovery() -> Self {
        Self {
            latitude: 9.0,
            longitude: 38.0,
            radius_km: 100.0,
        }
    }

    /// Ten kilometres around the city centre.
    #[must_use]
    pub const fn city_centre() -> Self {
        Self {
            latitude: 9.0192,
            longitude: 38.7525,
            radius_km: 10.0,
        }
    }

    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    #[must_use]
    pub const fn radius_km(&self) -> f64 {
        self.radius_km
    }
}

impl Default for SearchArea {
    fn default() -> Self {
        Self::discovery()
    }
}
