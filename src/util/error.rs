use thiserror::Error;

/// Result type alias for hexpix operations.
pub type Result<T> = std::result::Result<T, HexPixError>;

/// Error type for hexpix-rs operations.
#[derive(Error, Debug, PartialEq)]
pub enum HexPixError {
    /// The pixel pitch is not a finite, strictly positive length.
    #[error("Invalid pitch: {0} (must be finite and positive)")]
    InvalidPitch(f64),
    /// A position coordinate is NaN or infinite.
    #[error("Invalid position: ({x}, {y}) has a non-finite coordinate")]
    NonFinitePosition { x: f64, y: f64 },
    /// The position is too far from the grid origin for exact integer indexing.
    #[error("Position out of range: ({x}, {y}) is too far from the grid origin")]
    PositionOutOfRange { x: f64, y: f64 },
    /// The row band fell outside `0..6`. This is an arithmetic defect, not an
    /// out-of-grid result.
    #[error("Unresolved pixel index: row band {band} is outside 0..6")]
    UnresolvedIndex { band: i64 },
    /// A hexagon dimension value is invalid (e.g., negative).
    #[error("Invalid dimension: {0}")]
    InvalidDimension(String),
    /// Detector configuration could not be parsed or validated.
    #[error("Configuration error: {0}")]
    ConfigError(String),
    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(String),
    /// CSV parsing or writing error.
    #[error("CSV error: {0}")]
    CsvError(String),
    /// Failed to parse geometry from string (GeoJSON or WKT).
    #[error("Geometry parse error: {0}")]
    GeometryParseError(String),
}
