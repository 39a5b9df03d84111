//! Error types for triangular mesh grid operations.

use thiserror::Error;

/// Result type alias using TmgError.
pub type TmgResult<T> = Result<T, TmgError>;

/// Primary error type for grid operations.
#[derive(Debug, Error)]
pub enum TmgError {
    // === Input Errors ===
    #[error("Latitude out of range [-90, 90]: {0}")]
    InvalidLatitude(f64),

    #[error("Longitude is not finite: {0}")]
    InvalidLongitude(f64),

    #[error("Invalid cell key: {0}")]
    InvalidCellKey(String),

    #[error("Invalid resolution: cell_count must be > 0, got {0}")]
    InvalidResolution(u32),

    #[error("Cell {key} is outside a grid with cell_count {cell_count}")]
    CellOutOfRange { key: String, cell_count: u32 },

    #[error("Invalid coordinate pair: {0}")]
    InvalidCoordinate(String),

    // === Geometry Errors ===
    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    // === Infrastructure Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export failed: {0}")]
    Export(String),
}

impl TmgError {
    /// Create a DegenerateGeometry error.
    pub fn degenerate(msg: impl Into<String>) -> Self {
        Self::DegenerateGeometry(msg.into())
    }

    /// Create an InvalidCellKey error.
    pub fn invalid_key(msg: impl Into<String>) -> Self {
        Self::InvalidCellKey(msg.into())
    }

    /// Create an Export error.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Whether the error was caused by caller input rather than the grid itself.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            TmgError::InvalidLatitude(_)
                | TmgError::InvalidLongitude(_)
                | TmgError::InvalidCellKey(_)
                | TmgError::InvalidResolution(_)
                | TmgError::CellOutOfRange { .. }
                | TmgError::InvalidCoordinate(_)
        )
    }
}

impl From<std::io::Error> for TmgError {
    fn from(err: std::io::Error) -> Self {
        TmgError::Export(err.to_string())
    }
}

impl From<serde_json::Error> for TmgError {
    fn from(err: serde_json::Error) -> Self {
        TmgError::Export(format!("JSON error: {}", err))
    }
}
