//! Oriented bounding box types and longitude span helpers.

use serde::{Deserialize, Serialize};

use crate::error::{TmgError, TmgResult};
use crate::normalize::{equal_within_tolerance, lng180, DEGREE_DIGITS};
use crate::point::LatLng;

/// Degrees travelled eastward from `west_lng` to `east_lng`.
///
/// Equal longitudes mean the whole circle, so the result is in (0, 360].
pub fn lng_distance(west_lng: f64, east_lng: f64) -> f64 {
    let w = lng180(west_lng);
    let e = lng180(east_lng);
    if equal_within_tolerance(w, e, DEGREE_DIGITS) {
        return 360.0;
    }
    if w > e {
        360.0 + e - w
    } else {
        e - w
    }
}

/// Whether `lng` lies on the eastward sweep from `west_lng` to `east_lng`,
/// endpoints included.
pub fn is_lng_between(lng: f64, west_lng: f64, east_lng: f64) -> bool {
    let l = lng180(lng);
    if equal_within_tolerance(l, lng180(west_lng), DEGREE_DIGITS)
        || equal_within_tolerance(l, lng180(east_lng), DEGREE_DIGITS)
    {
        return true;
    }
    lng_distance(west_lng, east_lng) >= lng_distance(lng, east_lng)
}

/// A latitude/longitude box whose longitude extent runs eastward from
/// `west` to `east`, so it may cross the antimeridian or span more than
/// 180 degrees.
///
/// Longitudes are stored in (-180, 180]. `west == east` covers every
/// longitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrientedBoundingBox {
    pub north: f64,
    pub west: f64,
    pub south: f64,
    pub east: f64,
}

impl OrientedBoundingBox {
    /// Build the box spanned by two corners.
    ///
    /// North and south come from the larger and smaller latitude. With a
    /// non-negative `orientation` the box runs east from `from.lng` to
    /// `to.lng`; with a negative one it runs east from `to.lng` to
    /// `from.lng`. So `(-1,-1) -> (1,1)` with orientation 1 is a 2x2 degree
    /// box, and the same corners with orientation -1 go the long way round.
    pub fn from_corners(from: LatLng, to: LatLng, orientation: i32) -> Self {
        let (north, south) = if from.lat >= to.lat {
            (from.lat, to.lat)
        } else {
            (to.lat, from.lat)
        };
        let (west, east) = if orientation >= 0 {
            (lng180(from.lng), lng180(to.lng))
        } else {
            (lng180(to.lng), lng180(from.lng))
        };
        Self {
            north,
            west,
            south,
            east,
        }
    }

    /// Like [`from_corners`](Self::from_corners) but validates the corners.
    pub fn try_from_corners(from: LatLng, to: LatLng, orientation: i32) -> TmgResult<Self> {
        let from = LatLng::checked(from.lat, from.lng)?;
        let to = LatLng::checked(to.lat, to.lng)?;
        Ok(Self::from_corners(from, to, orientation))
    }

    /// Parse `"north,west,south,east"`.
    pub fn from_nwse_string(s: &str) -> TmgResult<Self> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(TmgError::InvalidCoordinate(format!(
                "{}. Expected 'north,west,south,east'",
                s
            )));
        }
        let mut values = [0.0f64; 4];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part
                .parse()
                .map_err(|_| TmgError::InvalidCoordinate(part.to_string()))?;
        }
        let [north, west, south, east] = values;
        Self::try_from_corners(LatLng::new(north, west), LatLng::new(south, east), 1)
    }

    pub fn north_west(&self) -> LatLng {
        LatLng::new(self.north, self.west)
    }

    pub fn north_east(&self) -> LatLng {
        LatLng::new(self.north, self.east)
    }

    pub fn south_west(&self) -> LatLng {
        LatLng::new(self.south, self.west)
    }

    pub fn south_east(&self) -> LatLng {
        LatLng::new(self.south, self.east)
    }

    /// Corners in NW, NE, SW, SE order.
    pub fn corners(&self) -> [LatLng; 4] {
        [
            self.north_west(),
            self.north_east(),
            self.south_west(),
            self.south_east(),
        ]
    }

    /// Longitude extent in degrees, in (0, 360].
    pub fn lng_span(&self) -> f64 {
        lng_distance(self.west, self.east)
    }

    /// Whether the box spans every longitude.
    pub fn is_global_lng(&self) -> bool {
        self.lng_span() >= 360.0
    }

    /// Whether the box crosses the antimeridian.
    pub fn crosses_antimeridian(&self) -> bool {
        !self.is_global_lng() && self.west > self.east
    }

    /// Check if a point lies inside the box, edges included. The poles have
    /// no meaningful longitude, so any longitude is accepted there.
    pub fn contains(&self, p: LatLng) -> bool {
        if p.lat > self.north || p.lat < self.south {
            return false;
        }
        if p.lat.abs() == 90.0 {
            return true;
        }
        is_lng_between(p.lng, self.west, self.east)
    }
}
