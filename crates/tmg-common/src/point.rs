//! Geographic point type.
//!
//! All grid math works in (latitude, longitude) order. The only place the
//! order flips is [`LatLng::to_lng_lat`], used when polygons are handed to
//! renderers that expect (x, y) = (lng, lat).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{TmgError, TmgResult};
use crate::normalize::{equal_within_tolerance, lng180, DEGREE_DIGITS};

/// A point on the sphere in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Create a point without validation. Used for derived geometry.
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Create a point from caller input, rejecting out-of-range latitudes
    /// and non-finite longitudes.
    pub fn checked(lat: f64, lng: f64) -> TmgResult<Self> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(TmgError::InvalidLatitude(lat));
        }
        if !lng.is_finite() {
            return Err(TmgError::InvalidLongitude(lng));
        }
        Ok(Self { lat, lng })
    }

    /// The south pole, carrying the given longitude.
    pub const fn south_pole(lng: f64) -> Self {
        Self { lat: -90.0, lng }
    }

    /// The north pole, carrying the given longitude.
    pub const fn north_pole(lng: f64) -> Self {
        Self { lat: 90.0, lng }
    }

    pub fn is_south_pole(&self) -> bool {
        self.lat == -90.0
    }

    pub fn is_north_pole(&self) -> bool {
        self.lat == 90.0
    }

    /// The diametrically opposite point.
    pub fn antipode(&self) -> Self {
        Self {
            lat: -self.lat,
            lng: lng180(self.lng + 180.0),
        }
    }

    /// Equality within the degree precision, comparing longitudes after
    /// normalization to (-180, 180].
    pub fn approx_eq(&self, other: &LatLng) -> bool {
        equal_within_tolerance(self.lat, other.lat, DEGREE_DIGITS)
            && equal_within_tolerance(lng180(self.lng), lng180(other.lng), DEGREE_DIGITS)
    }

    /// The (lng, lat) pair used by KML and GeoJSON.
    pub fn to_lng_lat(&self) -> [f64; 2] {
        [self.lng, self.lat]
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// Parses `"lat,lng"`.
impl FromStr for LatLng {
    type Err = TmgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 2 {
            return Err(TmgError::InvalidCoordinate(format!(
                "{}. Expected 'lat,lng'",
                s
            )));
        }
        let lat: f64 = parts[0]
            .parse()
            .map_err(|_| TmgError::InvalidCoordinate(parts[0].to_string()))?;
        let lng: f64 = parts[1]
            .parse()
            .map_err(|_| TmgError::InvalidCoordinate(parts[1].to_string()))?;
        Self::checked(lat, lng)
    }
}
