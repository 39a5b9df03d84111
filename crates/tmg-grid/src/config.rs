//! Configuration for the triangular mesh grid.

use serde::{Deserialize, Serialize};
use spherical::SEMI_MAJOR_AXIS;

use crate::constants::VERTEX_ANGLE;

/// Default number of cells along each rhomboid edge.
pub const DEFAULT_CELL_COUNT: u32 = 3;

/// Configuration for a grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Number of cells along each rhomboid edge. A rhomboid holds
    /// `cell_count²` cells and the globe `10 · cell_count²`.
    pub cell_count: u32,

    /// Radius of the sphere in meters.
    pub radius_m: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_count: DEFAULT_CELL_COUNT,
            radius_m: SEMI_MAJOR_AXIS,
        }
    }
}

impl GridConfig {
    /// Configuration with the default radius and the given resolution.
    pub fn with_cell_count(cell_count: u32) -> Self {
        Self {
            cell_count,
            ..Self::default()
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("TMG_CELL_COUNT") {
            if let Ok(count) = val.parse() {
                config.cell_count = count;
            }
        }

        if let Ok(val) = std::env::var("TMG_EARTH_RADIUS_M") {
            if let Ok(radius) = val.parse() {
                config.radius_m = radius;
            }
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.cell_count == 0 {
            return Err("cell_count must be > 0".to_string());
        }

        if !self.radius_m.is_finite() || self.radius_m <= 0.0 {
            return Err(format!("radius_m must be a positive number, got {}", self.radius_m));
        }

        Ok(())
    }

    /// Surface distance in meters between adjacent icosahedron vertices,
    /// the length of every rhomboid edge.
    pub fn edge_length_m(&self) -> f64 {
        self.radius_m * VERTEX_ANGLE.to_radians()
    }

    /// Length in meters of one cell side along a rhomboid edge.
    pub fn cell_side_m(&self) -> f64 {
        self.edge_length_m() / f64::from(self.cell_count)
    }

    /// Total number of cells on the globe.
    pub fn total_cells(&self) -> u64 {
        10 * u64::from(self.cell_count) * u64::from(self.cell_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GridConfig::default();
        assert_eq!(config.cell_count, 3);
        assert_eq!(config.radius_m, 6378137.0);
        assert!(config.validate().is_ok());
        assert_eq!(config.total_cells(), 90);
        assert!((config.edge_length_m() - 7_061_546.2).abs() < 1.0);
        assert!((config.cell_side_m() * 3.0 - config.edge_length_m()).abs() < 1e-6);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(GridConfig::with_cell_count(0).validate().is_err());

        let mut config = GridConfig::default();
        config.radius_m = -1.0;
        assert!(config.validate().is_err());
        config.radius_m = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_env_overrides() {
        std::env::set_var("TMG_CELL_COUNT", "12");
        std::env::set_var("TMG_EARTH_RADIUS_M", "not-a-number");
        let config = GridConfig::from_env();
        std::env::remove_var("TMG_CELL_COUNT");
        std::env::remove_var("TMG_EARTH_RADIUS_M");

        assert_eq!(config.cell_count, 12);
        assert_eq!(config.radius_m, SEMI_MAJOR_AXIS);
    }
}
