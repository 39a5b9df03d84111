//! Cell identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{TmgError, TmgResult};

/// Number of rhomboids on the icosahedron.
pub const RHOMBOID_COUNT: u8 = 10;

/// Identifies one cell of the grid: a rhomboid and the (x, y) offsets from
/// its southern corner.
///
/// Serializes as the cell key string `"<rhomboid>-<x>-<y>"`, e.g. `"7-2-0"`.
/// A key is only meaningful together with the `cell_count` of the grid that
/// produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CellKey {
    pub rhomboid: u8,
    pub x: u32,
    pub y: u32,
}

impl CellKey {
    pub const fn new(rhomboid: u8, x: u32, y: u32) -> Self {
        Self { rhomboid, x, y }
    }

    /// Rhomboids 0..5 touch the north pole, 5..10 the south pole.
    pub fn is_northern(&self) -> bool {
        self.rhomboid < 5
    }

    /// Check that the key addresses a cell of a grid with `cell_count`
    /// cells per rhomboid edge.
    pub fn validate(&self, cell_count: u32) -> TmgResult<()> {
        if cell_count == 0 {
            return Err(TmgError::InvalidResolution(cell_count));
        }
        if self.rhomboid >= RHOMBOID_COUNT || self.x >= cell_count || self.y >= cell_count {
            return Err(TmgError::CellOutOfRange {
                key: self.to_string(),
                cell_count,
            });
        }
        Ok(())
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.rhomboid, self.x, self.y)
    }
}

fn parse_component(part: &str, key: &str) -> TmgResult<u32> {
    let canonical = !part.is_empty()
        && part.bytes().all(|b| b.is_ascii_digit())
        && (part == "0" || !part.starts_with('0'));
    if !canonical {
        return Err(TmgError::invalid_key(key));
    }
    part.parse().map_err(|_| TmgError::invalid_key(key))
}

impl FromStr for CellKey {
    type Err = TmgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('-').collect();
        if parts.len() != 3 {
            return Err(TmgError::invalid_key(s));
        }
        let rhomboid = parse_component(parts[0], s)?;
        if rhomboid >= RHOMBOID_COUNT as u32 {
            return Err(TmgError::invalid_key(s));
        }
        Ok(Self {
            rhomboid: rhomboid as u8,
            x: parse_component(parts[1], s)?,
            y: parse_component(parts[2], s)?,
        })
    }
}

impl TryFrom<String> for CellKey {
    type Error = TmgError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CellKey> for String {
    fn from(key: CellKey) -> Self {
        key.to_string()
    }
}
