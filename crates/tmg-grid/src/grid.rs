//! The grid value type: point lookup, polygons, and cell enumeration.

use spherical::{LatLng, Sphere};
use tmg_common::cell::RHOMBOID_COUNT;
use tmg_common::{CellKey, TmgError, TmgResult};
use tracing::trace;

use crate::config::GridConfig;
use crate::face::face_number;
use crate::polygon::CellPolygon;
use crate::rhomboid::{CanonicalFrame, Rhomboid};

/// A triangular mesh grid at one resolution on one sphere.
///
/// Cheap to clone and immutable; every query is a pure function of the
/// configuration and its arguments, so a single `Grid` can be shared across
/// threads.
#[derive(Debug, Clone)]
pub struct Grid {
    config: GridConfig,
    sphere: Sphere,
    cell_side: f64,
    frame: CanonicalFrame,
}

impl Default for Grid {
    fn default() -> Self {
        Self::from_valid(GridConfig::default())
    }
}

impl Grid {
    /// Create a grid, validating the configuration.
    pub fn new(config: GridConfig) -> TmgResult<Self> {
        if config.cell_count == 0 {
            return Err(TmgError::InvalidResolution(config.cell_count));
        }
        config.validate().map_err(TmgError::Config)?;
        Ok(Self::from_valid(config))
    }

    /// Grid on the default sphere with `cell_count` cells per rhomboid edge.
    pub fn with_cell_count(cell_count: u32) -> TmgResult<Self> {
        Self::new(GridConfig::with_cell_count(cell_count))
    }

    fn from_valid(config: GridConfig) -> Self {
        Self {
            config,
            sphere: Sphere::new(config.radius_m),
            cell_side: config.cell_side_m(),
            frame: CanonicalFrame::new(),
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn cell_count(&self) -> u32 {
        self.config.cell_count
    }

    pub fn sphere(&self) -> &Sphere {
        &self.sphere
    }

    /// Ensure `key` addresses a cell of this grid.
    pub fn check_key(&self, key: &CellKey) -> TmgResult<()> {
        key.validate(self.cell_count())
    }

    /// Parse a `"r-x-y"` cell key and check it against this grid.
    pub fn parse_key(&self, s: &str) -> TmgResult<CellKey> {
        let key: CellKey = s.parse()?;
        self.check_key(&key)?;
        Ok(key)
    }

    /// Cell containing the point `(lat, lng)`.
    ///
    /// Fails on a latitude outside [-90, 90] or a non-finite coordinate.
    /// Any finite longitude is accepted.
    pub fn cell_key(&self, lat: f64, lng: f64) -> TmgResult<CellKey> {
        let p = LatLng::checked(lat, lng)?;
        Ok(self.locate(p))
    }

    /// Cell containing an already validated point.
    pub(crate) fn locate(&self, p: LatLng) -> CellKey {
        let face = face_number(p);
        let rhomboid = Rhomboid::from_face(face);
        let canonical = rhomboid.to_canonical(p);
        let (x, y) = self
            .frame
            .indices(canonical, self.cell_count(), self.config.radius_m);
        let key = CellKey::new(rhomboid.id(), x, y);
        trace!(%p, face, %key, "located point");
        key
    }

    /// Boundary polygon of a cell.
    pub fn polygon(&self, key: CellKey) -> TmgResult<CellPolygon> {
        self.check_key(&key)?;
        let corners = Rhomboid::new(key.rhomboid)?.corners();
        CellPolygon::build(&self.sphere, &corners, self.cell_side, key, self.cell_count())
    }

    /// Boundary ring of a cell as (lng, lat) pairs.
    pub fn cell_polygon(&self, key: CellKey) -> TmgResult<Vec<[f64; 2]>> {
        Ok(self.polygon(key)?.to_lng_lat_ring())
    }

    /// A point inside the cell whose lookup gives back `key`.
    pub fn cell_center(&self, key: CellKey) -> TmgResult<LatLng> {
        Ok(self.polygon(key)?.center())
    }

    /// The `cell_count²` keys of one rhomboid, x-major.
    pub fn rhomboid_cells(&self, rhomboid: u8) -> TmgResult<Vec<CellKey>> {
        let rhomboid = Rhomboid::new(rhomboid)?.id();
        let n = self.cell_count();
        Ok((0..n)
            .flat_map(|x| (0..n).map(move |y| CellKey::new(rhomboid, x, y)))
            .collect())
    }

    /// Every key of the grid, rhomboid by rhomboid.
    pub fn all_cells(&self) -> Vec<CellKey> {
        let n = self.cell_count();
        (0..RHOMBOID_COUNT)
            .flat_map(|r| (0..n).flat_map(move |x| (0..n).map(move |y| CellKey::new(r, x, y))))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid() {
        let grid = Grid::default();
        assert_eq!(grid.cell_count(), 3);
        assert_eq!(grid.all_cells().len(), 90);
    }

    #[test]
    fn test_rejects_zero_resolution() {
        let err = Grid::with_cell_count(0).unwrap_err();
        assert!(matches!(err, TmgError::InvalidResolution(0)));
    }

    #[test]
    fn test_huge_resolution_polygon_does_not_overflow() {
        let n = 3_000_000_000;
        let grid = Grid::with_cell_count(n).unwrap();
        let key = grid.cell_key(89.9999, 10.0).unwrap();
        assert!(key.x + 1 > n / 2 && key.y + 1 > n / 2);
        for key in [key, CellKey::new(0, n - 1, n - 1)] {
            match grid.polygon(key) {
                Ok(polygon) => assert_eq!(polygon.key, key),
                Err(err) => assert!(matches!(err, TmgError::DegenerateGeometry(_)), "{}", err),
            }
        }
    }

    #[test]
    fn test_rejects_bad_radius() {
        let config = GridConfig {
            cell_count: 3,
            radius_m: 0.0,
        };
        assert!(matches!(Grid::new(config), Err(TmgError::Config(_))));
    }

    #[test]
    fn test_cell_key_known_points() {
        let grid = Grid::default();
        assert_eq!(grid.cell_key(-26.565051177077997, 0.0).unwrap(), CellKey::new(0, 0, 0));
        assert_eq!(grid.cell_key(90.0, 0.0).unwrap(), CellKey::new(0, 2, 2));
        assert_eq!(grid.cell_key(-90.0, 0.0).unwrap().rhomboid, 5);
        assert!(grid.cell_key(-90.0, 0.0).unwrap().x == 0);
    }

    #[test]
    fn test_cell_key_rejects_bad_input() {
        let grid = Grid::default();
        assert!(matches!(grid.cell_key(91.0, 0.0), Err(TmgError::InvalidLatitude(_))));
        assert!(matches!(grid.cell_key(0.0, f64::NAN), Err(TmgError::InvalidLongitude(_))));
    }

    #[test]
    fn test_cell_key_any_longitude() {
        let grid = Grid::default();
        assert_eq!(grid.cell_key(10.0, 370.0).unwrap(), grid.cell_key(10.0, 10.0).unwrap());
        assert_eq!(grid.cell_key(10.0, -350.0).unwrap(), grid.cell_key(10.0, 10.0).unwrap());
    }

    #[test]
    fn test_polygon_rejects_out_of_range_key() {
        let grid = Grid::default();
        assert!(matches!(
            grid.polygon(CellKey::new(0, 3, 0)),
            Err(TmgError::CellOutOfRange { .. })
        ));
        assert!(grid.polygon(CellKey::new(10, 0, 0)).is_err());
    }

    #[test]
    fn test_parse_key() {
        let grid = Grid::default();
        assert_eq!(grid.parse_key("7-2-0").unwrap(), CellKey::new(7, 2, 0));
        assert!(grid.parse_key("7-3-0").is_err());
        assert!(grid.parse_key("07-2-0").is_err());
    }

    #[test]
    fn test_rhomboid_cells_order() {
        let grid = Grid::with_cell_count(2).unwrap();
        let keys = grid.rhomboid_cells(4).unwrap();
        let expected: Vec<CellKey> = [(0, 0), (0, 1), (1, 0), (1, 1)]
            .iter()
            .map(|&(x, y)| CellKey::new(4, x, y))
            .collect();
        assert_eq!(keys, expected);
        assert!(grid.rhomboid_cells(10).is_err());
    }

    #[test]
    fn test_cell_center_round_trips() {
        let grid = Grid::default();
        for key in grid.all_cells() {
            let c = grid.cell_center(key).unwrap();
            assert_eq!(grid.cell_key(c.lat, c.lng).unwrap(), key, "center {} of {}", c, key);
        }
    }
}
