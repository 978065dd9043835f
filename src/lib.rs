//! # hexpix-rs
//!
//! Maps positions on a sensor to the pixels of a hexagonal pixel grid, and
//! computes the physical size of such a grid. Pixels are regular pointy-top
//! hexagons of a given pitch (flat-to-flat width); pixel (0, 0) sits at the
//! bottom left and odd rows are shifted right by half a pitch.
//!
//! ### 1. Stateless indexing
//!
//! ```
//! use hexpix_rs::{PixelIndex, grid_extent, pixel_index_at};
//!
//! # fn main() -> Result<(), hexpix_rs::HexPixError> {
//! let index = pixel_index_at(&(0.0, 0.0), 1.0)?;
//! assert_eq!(index, PixelIndex::new(0, 0));
//!
//! let extent = grid_extent(3, 2, 2.0)?;
//! println!("{} x {}", extent.width, extent.height);
//! # Ok(())
//! # }
//! ```
//!
//! ### 2. `HexagonalPixelDetector` - a configured sensor
//!
//! The indexer returns any index, on the grid or not. A detector adds the
//! bounds check against its number of columns and rows.
//!
//! ```
//! use hexpix_rs::{DetectorConfig, HexagonalPixelDetector};
//!
//! # fn main() -> Result<(), hexpix_rs::HexPixError> {
//! let config = DetectorConfig::new(64, 64, 55.0);
//! let detector = HexagonalPixelDetector::from_config(&config)?;
//!
//! if let Some(index) = detector.locate(&(120.0, 80.0))? {
//!     println!("hit in pixel {index}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### 3. `csv_to_pixel_csv` - CSV hit conversion
//!
//! ```no_run
//! use hexpix_rs::{CsvHitConfig, CsvToPixels, GeometryFormat, HexagonalPixelDetector};
//!
//! let detector = HexagonalPixelDetector::new(55.0, 64, 64).unwrap();
//! let config = CsvHitConfig::from_coords("x", "y").with_pixel_geometry(GeometryFormat::Wkt);
//!
//! "hits.csv".to_pixel_csv("pixels.csv", &detector, &config).unwrap();
//! ```

pub mod api;
pub mod core;
pub mod geom;
pub mod util;

pub use api::{
    ConversionSummary, CoordinateSource, CsvHitConfig, CsvToPixels, DetectorConfig,
    GeometryFormat, HexagonalPixelDetector, Pixel, PixelGrid, PixelGridBuilder, csv_to_pixel_csv,
    index_positions, locate_positions,
};
pub use core::{
    GridDimensions, GridExtent, HexGridSpec, HexagonDims, PixelIndex, create_hexagon,
    from_across_corners, from_area, from_pitch, from_side, grid_extent, pixel_bounding_box,
    pixel_center, pixel_index_at, side_from_pitch,
};
pub use geom::parse_hit_positions;
pub use util::{Coordinate, HexPixError, Position2D, Result};

pub use geo_types;
