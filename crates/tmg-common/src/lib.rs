//! Common types and utilities shared across the triangular mesh grid crates.

pub mod bbox;
pub mod cell;
pub mod error;
pub mod normalize;
pub mod point;

pub use bbox::{is_lng_between, lng_distance, OrientedBoundingBox};
pub use cell::CellKey;
pub use error::{TmgError, TmgResult};
pub use normalize::{equal_within_tolerance, lng180, lng360, truncate, DEGREE_DIGITS};
pub use point::LatLng;
