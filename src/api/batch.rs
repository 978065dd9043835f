use crate::api::detector::HexagonalPixelDetector;
use crate::core::dimensions::HexGridSpec;
use crate::core::grid::PixelIndex;
use crate::util::coord::Coordinate;
use crate::util::error::Result;
use rayon::prelude::*;

/// Indexes a batch of positions in parallel.
///
/// Fails on the first position that cannot be indexed; no partial result
/// is returned.
///
/// # Example
/// ```
/// use hexpix_rs::{PixelIndex, index_positions};
///
/// # fn main() -> Result<(), hexpix_rs::HexPixError> {
/// let hits = vec![(0.0, 0.0), (1.0, 0.0), (-1.0, 0.0)];
/// let indices = index_positions(&hits, 1.0)?;
/// assert_eq!(indices[2], PixelIndex::new(-1, 0));
/// # Ok(())
/// # }
/// ```
pub fn index_positions<C>(positions: &[C], pitch: f64) -> Result<Vec<PixelIndex>>
where
    C: Coordinate + Sync,
{
    let spec = HexGridSpec::new(pitch)?;
    positions.par_iter().map(|p| spec.pixel_index(p)).collect()
}

/// Indexes a batch of positions against a detector, mapping off-grid
/// positions to `None`.
pub fn locate_positions<C>(
    detector: &HexagonalPixelDetector,
    positions: &[C],
) -> Result<Vec<Option<PixelIndex>>>
where
    C: Coordinate + Sync,
{
    positions.par_iter().map(|p| detector.locate(p)).collect()
}
