use crate::core::dimensions::HexGridSpec;
use crate::core::geometry::create_hexagon;
use crate::core::grid::PixelIndex;
use crate::util::coord::Coordinate;
use crate::util::error::Result;
use geo_types::{Point, Polygon};

/// A single hexagonal pixel: its grid address and the centre of its cell.
///
/// # Example
///
/// ```
/// use hexpix_rs::{Pixel, PixelIndex};
///
/// # fn main() -> Result<(), hexpix_rs::HexPixError> {
/// let pixel = Pixel::from_position(&(0.3, 0.1), 1.0)?;
/// assert_eq!(pixel.index, PixelIndex::new(0, 0));
///
/// let outline = pixel.to_polygon(1.0)?;
/// assert_eq!(outline.exterior().coords().count(), 7);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pixel {
    pub index: PixelIndex,
    /// Centre of the pixel in the sensor's local frame.
    pub center: Point<f64>,
}

impl Pixel {
    pub(crate) fn new(index: PixelIndex, center: Point<f64>) -> Self {
        Self { index, center }
    }

    /// The pixel containing a local position.
    pub fn from_position(coord: &impl Coordinate, pitch: f64) -> Result<Self> {
        let spec = HexGridSpec::new(pitch)?;
        Ok(Self::from_spec(&spec, spec.pixel_index(coord)?))
    }

    pub fn from_index(index: PixelIndex, pitch: f64) -> Result<Self> {
        Ok(Self::from_spec(&HexGridSpec::new(pitch)?, index))
    }

    pub(crate) fn from_spec(spec: &HexGridSpec, index: PixelIndex) -> Self {
        Self::new(index, spec.pixel_center(index))
    }

    pub fn col(&self) -> i64 {
        self.index.col
    }

    pub fn row(&self) -> i64 {
        self.index.row
    }

    /// Outline of the pixel for a grid of the given pitch.
    pub fn to_polygon(&self, pitch: f64) -> Result<Polygon<f64>> {
        let spec = HexGridSpec::new(pitch)?;
        Ok(create_hexagon(&self.center, spec.side()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::error::HexPixError;

    #[test]
    fn test_from_position_tuple_and_point() -> Result<()> {
        let from_tuple = Pixel::from_position(&(80.0, 50.0), 55.0)?;
        let from_point = Pixel::from_position(&Point::new(80.0, 50.0), 55.0)?;

        assert_eq!(from_tuple, from_point);
        assert_eq!(from_tuple.index, PixelIndex::new(1, 1));
        Ok(())
    }

    #[test]
    fn test_same_pixel_near_centre() -> Result<()> {
        let pixel = Pixel::from_index(PixelIndex::new(4, 7), 55.0)?;
        let nearby = Pixel::from_position(&(pixel.center.x() + 5.0, pixel.center.y() - 5.0), 55.0)?;

        assert_eq!(pixel.index, nearby.index);
        assert_eq!(pixel.col(), 4);
        assert_eq!(pixel.row(), 7);
        Ok(())
    }

    #[test]
    fn test_invalid_pitch() {
        assert_eq!(
            Pixel::from_position(&(0.0, 0.0), 0.0),
            Err(HexPixError::InvalidPitch(0.0))
        );
        assert!(Pixel::from_index(PixelIndex::new(0, 0), -1.0).is_err());
    }

    #[test]
    fn test_to_polygon() -> Result<()> {
        let pixel = Pixel::from_index(PixelIndex::new(0, 0), 1.0)?;
        let polygon = pixel.to_polygon(1.0)?;
        let exterior = polygon.exterior();

        assert_eq!(exterior.coords().count(), 7);
        assert_eq!(exterior.0[0], exterior.0[6]);
        Ok(())
    }
}
