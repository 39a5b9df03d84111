//! Triangular Mesh Grid
//!
//! A discrete global grid built on an icosahedron. Adjacent pairs of the
//! icosahedron's 20 triangular faces form 10 rhomboids, and each rhomboid is
//! cut into `cell_count × cell_count` cells. A cell is identified by its
//! rhomboid and (x, y) offsets, serialized as the key `"r-x-y"`.
//!
//! - **Point lookup**: which cell holds a latitude/longitude
//! - **Polygons**: the boundary of a cell, built from great-circle arcs
//! - **Adjacency**: the neighbours of a cell across each of its edges
//! - **Bounding-box query**: every cell overlapping a latitude/longitude box
//! - **Mesh export**: KML or GeoJSON renderings of a set of cells
//!
//! # Architecture
//!
//! ```text
//! (lat, lng)
//!      │
//!      ▼
//! face_number ──► Rhomboid::to_canonical ──► CanonicalFrame::indices
//!                                                    │
//!                                                    ▼
//!                                                 CellKey
//!                                                    │
//!      ┌─────────────────────────────────────────────┤
//!      ▼                                             ▼
//! CellPolygon::build                          next_ne / next_se /
//! (great-circle walks and intersections)      next_sw / next_nw
//!      │                                             │
//!      └──────────────► Grid::tile ◄─────────────────┘
//!                   (row walk + completion flood)
//! ```
//!
//! # Example
//!
//! ```
//! use tmg_grid::{Grid, LatLng};
//!
//! let grid = Grid::default();
//! let key = grid.cell_key(48.85, 2.35)?;
//! let ring = grid.cell_polygon(key)?;
//! assert_eq!(ring.first(), ring.last());
//!
//! let keys = grid.tile(LatLng::new(10.0, 170.0), LatLng::new(-10.0, -170.0), 1)?;
//! assert!(!keys.is_empty());
//! # Ok::<(), tmg_grid::TmgError>(())
//! ```

pub mod adjacency;
pub mod config;
pub mod constants;
pub mod export;
pub mod face;
pub mod grid;
pub mod polygon;
pub mod rhomboid;
pub mod tile;

// Re-export commonly used types at crate root
pub use adjacency::{next_ne, next_nw, next_se, next_sw, Neighbors};
pub use config::{GridConfig, DEFAULT_CELL_COUNT};
pub use constants::VERTEX_LAT;
pub use export::{Mesh, MeshFormat};
pub use face::{face_number, FaceBand, FaceId};
pub use grid::Grid;
pub use polygon::{CellPolygon, CellPosition};
pub use rhomboid::{CanonicalFrame, Corners, Rhomboid};
pub use tmg_common::{CellKey, LatLng, OrientedBoundingBox, TmgError, TmgResult};
