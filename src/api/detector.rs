use crate::core::dimensions::{GridDimensions, GridExtent, HexGridSpec};
use crate::core::geometry::create_hexagon;
use crate::core::grid::PixelIndex;
use crate::util::coord::Coordinate;
use crate::util::error::{HexPixError, Result};
use geo_types::{Point, Polygon};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_name() -> String {
    "hexagonal".to_string()
}

/// Parameters of a hexagonal pixel detector, as supplied by the detector
/// configuration.
///
/// # Example
/// ```
/// use hexpix_rs::DetectorConfig;
///
/// # fn main() -> Result<(), hexpix_rs::HexPixError> {
/// let config = DetectorConfig::from_json_str(
///     r#"{ "number_of_pixels": { "columns": 64, "rows": 32 }, "pixel_pitch": 55.0 }"#,
/// )?;
/// assert_eq!(config.name, "hexagonal");
/// assert_eq!(config.number_of_pixels.rows, 32);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DetectorConfig {
    #[serde(default = "default_name")]
    pub name: String,
    pub number_of_pixels: GridDimensions,
    /// Side-to-side width of one pixel.
    pub pixel_pitch: f64,
}

impl DetectorConfig {
    pub fn new(columns: u32, rows: u32, pixel_pitch: f64) -> Self {
        Self {
            name: default_name(),
            number_of_pixels: GridDimensions::new(columns, rows),
            pixel_pitch,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(s).map_err(|e| HexPixError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading detector configuration from {}", path.display());
        let contents = fs::read_to_string(path).map_err(|e| HexPixError::IoError(e.to_string()))?;
        Self::from_json_str(&contents)
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| HexPixError::ConfigError(e.to_string()))
    }

    /// Checks the pixel pitch is a finite, positive length.
    pub fn validate(&self) -> Result<()> {
        HexGridSpec::new(self.pixel_pitch).map(|_| ())
    }
}

/// A hexagonal pixel detector: a pitch plus the number of columns and rows.
///
/// Wraps the stateless indexing functions and adds the grid-bounds check
/// the indexer itself does not perform.
///
/// # Example
/// ```
/// use hexpix_rs::{HexagonalPixelDetector, PixelIndex};
///
/// # fn main() -> Result<(), hexpix_rs::HexPixError> {
/// let detector = HexagonalPixelDetector::new(55.0, 4, 4)?;
///
/// assert_eq!(detector.locate(&(56.0, 0.0))?, Some(PixelIndex::new(1, 0)));
/// assert_eq!(detector.locate(&(-60.0, 0.0))?, None);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct HexagonalPixelDetector {
    name: String,
    spec: HexGridSpec,
    dims: GridDimensions,
}

impl HexagonalPixelDetector {
    pub fn new(pitch: f64, columns: u32, rows: u32) -> Result<Self> {
        Self::from_config(&DetectorConfig::new(columns, rows, pitch))
    }

    pub fn from_config(config: &DetectorConfig) -> Result<Self> {
        let spec = HexGridSpec::new(config.pixel_pitch)?;
        debug!(
            "Detector '{}': {}x{} hexagonal pixels, pitch {}",
            config.name,
            config.number_of_pixels.columns,
            config.number_of_pixels.rows,
            config.pixel_pitch
        );

        Ok(Self {
            name: config.name.clone(),
            spec,
            dims: config.number_of_pixels,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pitch(&self) -> f64 {
        self.spec.pitch()
    }

    pub fn spec(&self) -> &HexGridSpec {
        &self.spec
    }

    pub fn number_of_pixels(&self) -> GridDimensions {
        self.dims
    }

    /// Index of the pixel containing `coord`, whether or not it is on the grid.
    pub fn pixel_index(&self, coord: &impl Coordinate) -> Result<PixelIndex> {
        self.spec.pixel_index(coord)
    }

    /// Whether `index` addresses a pixel of this detector.
    pub fn is_within_pixel_grid(&self, index: &PixelIndex) -> bool {
        (0..i64::from(self.dims.columns)).contains(&index.col)
            && (0..i64::from(self.dims.rows)).contains(&index.row)
    }

    /// Index of the pixel containing `coord`, or `None` when it falls off the grid.
    pub fn locate(&self, coord: &impl Coordinate) -> Result<Option<PixelIndex>> {
        let index = self.pixel_index(coord)?;
        Ok(self.is_within_pixel_grid(&index).then_some(index))
    }

    /// Bounding rectangle of the full pixel grid.
    pub fn grid_size(&self) -> GridExtent {
        self.spec.extent(self.dims)
    }

    pub fn pixel_center(&self, index: &PixelIndex) -> Point<f64> {
        self.spec.pixel_center(*index)
    }

    pub fn pixel_outline(&self, index: &PixelIndex) -> Polygon<f64> {
        create_hexagon(&self.pixel_center(index), self.spec.side())
    }
}
