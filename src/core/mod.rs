pub mod boundary;
pub mod constants;
pub mod dimensions;
pub mod geometry;
pub mod grid;

pub use boundary::{ColumnParity, Correction, OffsetFrame, RowBand};
pub use constants::{EDGE_SLOPE, ROW_BANDS, ROW_PERIOD_SIDES, SQRT_3};
pub use dimensions::{
    GridDimensions, GridExtent, HexGridSpec, HexagonDims, from_across_corners, from_area,
    from_pitch, from_side, grid_extent, pixel_bounding_box, side_from_pitch,
};
pub use geometry::create_hexagon;
pub use grid::{PixelIndex, pixel_center, pixel_index_at};
