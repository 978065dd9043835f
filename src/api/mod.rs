pub mod batch;
pub mod detector;
pub mod hit_csv;
pub mod pixel;
pub mod pixel_grid;

pub use batch::{index_positions, locate_positions};
pub use detector::{DetectorConfig, HexagonalPixelDetector};
pub use hit_csv::{
    ConversionSummary, CoordinateSource, CsvHitConfig, CsvToPixels, GeometryFormat,
    csv_to_pixel_csv,
};
pub use pixel::Pixel;
pub use pixel_grid::{PixelGrid, PixelGridBuilder};
