use crate::core::boundary::{ColumnParity, OffsetFrame, RowBand, correction};
use crate::core::constants::MAX_EXACT_QUOTIENT;
use crate::core::dimensions::HexGridSpec;
use crate::util::coord::Coordinate;
use crate::util::error::{HexPixError, Result};
use geo_types::Point;
use log::error;
use serde::{Deserialize, Serialize};

/// Zero-based (column, row) address of a hexagonal pixel.
///
/// Pixel (0, 0) is the bottom-left pixel of the grid. Odd rows are shifted
/// right by half a pitch. Indices outside a detector's grid, including
/// negative ones, are valid geometric answers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct PixelIndex {
    pub col: i64,
    pub row: i64,
}

impl PixelIndex {
    pub fn new(col: i64, row: i64) -> Self {
        Self { col, row }
    }
}

impl From<(i64, i64)> for PixelIndex {
    fn from((col, row): (i64, i64)) -> Self {
        Self { col, row }
    }
}

impl std::fmt::Display for PixelIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// Converts a local sensor position to the index of the hexagonal pixel containing it.
///
/// # Example
/// ```
/// use hexpix_rs::{PixelIndex, pixel_index_at};
///
/// # fn main() -> Result<(), hexpix_rs::HexPixError> {
/// assert_eq!(pixel_index_at(&(0.0, 0.0), 1.0)?, PixelIndex::new(0, 0));
/// assert_eq!(pixel_index_at(&(1.0, 0.0), 1.0)?, PixelIndex::new(1, 0));
/// assert!(pixel_index_at(&(0.0, 0.0), 0.0).is_err());
/// # Ok(())
/// # }
/// ```
pub fn pixel_index_at<C: Coordinate>(coord: &C, pitch: f64) -> Result<PixelIndex> {
    HexGridSpec::new(pitch)?.pixel_index(coord)
}

/// Returns the local position of the centre of a pixel.
pub fn pixel_center(index: PixelIndex, pitch: f64) -> Result<Point<f64>> {
    Ok(HexGridSpec::new(pitch)?.pixel_center(index))
}

impl HexGridSpec {
    /// Shifts a position into the frame where pixel (0, 0) starts at the
    /// origin and computes its buckets.
    pub fn offset_frame<C: Coordinate>(&self, coord: &C) -> Result<OffsetFrame> {
        let (x, y) = (coord.x(), coord.y());
        if !x.is_finite() || !y.is_finite() {
            return Err(HexPixError::NonFinitePosition { x, y });
        }

        let side = self.side();
        let minor_radius = self.minor_radius();
        let posx = x + minor_radius;
        let posy = y + side;

        let x_quotient = posx / minor_radius;
        let y_quotient = posy / self.row_period();
        if x_quotient.abs() > MAX_EXACT_QUOTIENT || y_quotient.abs() > MAX_EXACT_QUOTIENT {
            return Err(HexPixError::PositionOutOfRange { x, y });
        }

        Ok(OffsetFrame {
            posx,
            posy,
            x_bucket: x_quotient.floor() as i64,
            period: y_quotient.floor(),
            minor_radius,
            side,
        })
    }

    /// Index of the pixel containing `coord`.
    ///
    /// The first approximation names the lower cell of the current row
    /// period, counted from one; the band/parity case table then moves it to
    /// the diagonal neighbour when needed, and the result is shifted to
    /// zero-based indices.
    pub fn pixel_index<C: Coordinate>(&self, coord: &C) -> Result<PixelIndex> {
        let frame = self.offset_frame(coord)?;
        let band_index = RowBand::index_of(frame.posy / self.row_period());
        let band = RowBand::try_from(band_index).inspect_err(|e| {
            error!(
                "{} for position ({}, {}) at pitch {}",
                e,
                coord.x(),
                coord.y(),
                self.pitch()
            )
        })?;
        let parity = ColumnParity::of(frame.x_bucket);

        let col = frame.x_bucket.div_euclid(2) + 1;
        let row = 2 * frame.period as i64 + 1;
        let step = correction(band, parity, &frame);

        Ok(PixelIndex::new(col + step.dcol - 1, row + step.drow - 1))
    }

    /// Local position of the centre of `index`.
    pub fn pixel_center(&self, index: PixelIndex) -> Point<f64> {
        let shift = if index.row.rem_euclid(2) == 1 {
            self.minor_radius()
        } else {
            0.0
        };
        let x = index.col as f64 * self.pitch() + shift;
        let y = index.row as f64 * self.row_spacing();

        Point::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::boundary::boundary_height;
    use crate::core::constants::SQRT_3;

    fn distance(a: Point<f64>, b: Point<f64>) -> f64 {
        ((a.x() - b.x()).powi(2) + (a.y() - b.y()).powi(2)).sqrt()
    }

    /// Distance from `p` to the centre of `idx`, and to the closest other centre.
    fn centre_distances(spec: &HexGridSpec, p: Point<f64>, idx: PixelIndex) -> (f64, f64) {
        let own = distance(p, spec.pixel_center(idx));
        let mut other = f64::INFINITY;
        for dr in -2..=2 {
            for dc in -2..=2 {
                if dr == 0 && dc == 0 {
                    continue;
                }
                let n = PixelIndex::new(idx.col + dc, idx.row + dr);
                other = other.min(distance(p, spec.pixel_center(n)));
            }
        }
        (own, other)
    }

    /// Neighbour across the edge of `idx` in direction (±1 horizontal, ±1 vertical).
    fn diagonal_neighbour(idx: PixelIndex, right: bool, up: bool) -> PixelIndex {
        let odd = idx.row.rem_euclid(2) == 1;
        let dcol = match (odd, right) {
            (false, false) => -1,
            (false, true) => 0,
            (true, false) => 0,
            (true, true) => 1,
        };
        let drow = if up { 1 } else { -1 };
        PixelIndex::new(idx.col + dcol, idx.row + drow)
    }

    #[test]
    fn test_origin_resolves_to_first_pixel() -> Result<()> {
        assert_eq!(pixel_index_at(&(0.0, 0.0), 1.0)?, PixelIndex::new(0, 0));
        Ok(())
    }

    #[test]
    fn test_invalid_pitch() {
        assert_eq!(
            pixel_index_at(&(0.0, 0.0), 0.0),
            Err(HexPixError::InvalidPitch(0.0))
        );
        assert_eq!(
            pixel_index_at(&(0.3, 0.1), -55.0),
            Err(HexPixError::InvalidPitch(-55.0))
        );
        assert!(matches!(
            pixel_index_at(&(0.3, 0.1), f64::NAN),
            Err(HexPixError::InvalidPitch(_))
        ));
    }

    #[test]
    fn test_non_finite_position() {
        assert!(matches!(
            pixel_index_at(&(f64::NAN, 0.0), 1.0),
            Err(HexPixError::NonFinitePosition { .. })
        ));
        assert!(matches!(
            pixel_index_at(&(0.0, f64::NEG_INFINITY), 1.0),
            Err(HexPixError::NonFinitePosition { .. })
        ));
    }

    #[test]
    fn test_position_out_of_range() {
        assert!(matches!(
            pixel_index_at(&(1e300, 0.0), 1.0),
            Err(HexPixError::PositionOutOfRange { .. })
        ));
        assert!(matches!(
            pixel_index_at(&(0.0, -1e20), 1.0),
            Err(HexPixError::PositionOutOfRange { .. })
        ));
    }

    #[test]
    fn test_point_types_agree() -> Result<()> {
        let from_tuple = pixel_index_at(&(12.5, -7.25), 3.0)?;
        let from_point = pixel_index_at(&Point::new(12.5, -7.25), 3.0)?;
        assert_eq!(from_tuple, from_point);
        Ok(())
    }

    #[test]
    fn test_centres_round_trip() -> Result<()> {
        for pitch in [1.0, 0.3, 55.0, 250.0] {
            let spec = HexGridSpec::new(pitch)?;
            for row in -7..=7 {
                for col in -7..=7 {
                    let idx = PixelIndex::new(col, row);
                    let centre = spec.pixel_center(idx);
                    assert_eq!(spec.pixel_index(&centre)?, idx, "pitch {pitch}, {idx}");
                }
            }
        }
        Ok(())
    }

    #[test]
    fn test_neighbouring_centres_are_one_pitch_apart() -> Result<()> {
        let spec = HexGridSpec::new(2.0)?;
        let idx = PixelIndex::new(3, 4);
        let centre = spec.pixel_center(idx);
        for (right, up) in [(false, false), (true, false), (false, true), (true, true)] {
            let n = spec.pixel_center(diagonal_neighbour(idx, right, up));
            assert!((distance(centre, n) - 2.0).abs() < 1e-9);
        }
        let east = spec.pixel_center(PixelIndex::new(4, 4));
        assert!((distance(centre, east) - 2.0).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_dense_sampling_assigns_nearest_pixel() -> Result<()> {
        // A regular hexagonal tiling is the Voronoi diagram of the pixel
        // centres, so every sample must land in the pixel with the closest centre.
        for pitch in [1.0, 55.0] {
            let spec = HexGridSpec::new(pitch)?;
            let period = spec.row_period();
            let steps = 150;
            for i in 0..=steps {
                for j in 0..=steps {
                    let x = -3.0 * pitch + 6.0 * pitch * i as f64 / steps as f64;
                    let y = -2.0 * period + 4.0 * period * j as f64 / steps as f64;
                    let p = Point::new(x, y);
                    let idx = spec.pixel_index(&p)?;
                    let (own, other) = centre_distances(&spec, p, idx);
                    assert!(
                        own <= other + 1e-9 * pitch,
                        "({x}, {y}) -> {idx}: own {own}, other {other}"
                    );
                }
            }
        }
        Ok(())
    }

    #[test]
    fn test_both_sides_of_each_diagonal_edge() -> Result<()> {
        let pitch = 1.0;
        let spec = HexGridSpec::new(pitch)?;
        let side = spec.side();
        let delta = 1e-7;

        for idx in [
            PixelIndex::new(0, 0),
            PixelIndex::new(0, 1),
            PixelIndex::new(3, 4),
            PixelIndex::new(-2, -3),
            PixelIndex::new(5, -6),
        ] {
            let centre = spec.pixel_center(idx);
            for (right, up) in [(false, false), (true, false), (false, true), (true, true)] {
                let sx = if right { 1.0 } else { -1.0 };
                let sy = if up { 1.0 } else { -1.0 };
                // Edge midpoint and the unit vector towards the neighbour's centre.
                let mid = (centre.x() + sx * 0.25 * pitch, centre.y() + sy * 0.75 * side);
                let (ux, uy) = (sx * 0.5, sy * 1.5 * side / pitch);

                let inside = (mid.0 - delta * ux, mid.1 - delta * uy);
                let outside = (mid.0 + delta * ux, mid.1 + delta * uy);

                assert_eq!(spec.pixel_index(&inside)?, idx);
                assert_eq!(
                    spec.pixel_index(&outside)?,
                    diagonal_neighbour(idx, right, up),
                    "edge of {idx} towards right={right} up={up}"
                );
            }
        }
        Ok(())
    }

    #[test]
    fn test_vertical_edges() -> Result<()> {
        let spec = HexGridSpec::new(1.0)?;
        for idx in [PixelIndex::new(0, 0), PixelIndex::new(2, 3), PixelIndex::new(-1, -1)] {
            let centre = spec.pixel_center(idx);
            let left = (centre.x() - 0.5 + 1e-7, centre.y() + 0.1);
            let right = (centre.x() + 0.5 + 1e-7, centre.y() - 0.1);
            assert_eq!(spec.pixel_index(&left)?, idx);
            assert_eq!(
                spec.pixel_index(&right)?,
                PixelIndex::new(idx.col + 1, idx.row)
            );
        }
        Ok(())
    }

    #[test]
    fn test_periodicity() -> Result<()> {
        let pitch = 1.0;
        let spec = HexGridSpec::new(pitch)?;
        let period = spec.row_period();
        let steps = 41;

        for i in 0..steps {
            for j in 0..steps {
                let x = pitch * (i as f64 + 0.5) / steps as f64;
                let y = period * (j as f64 + 0.5) / steps as f64;
                let base = spec.pixel_index(&(x, y))?;

                let (own, other) = centre_distances(&spec, Point::new(x, y), base);
                if other - own < 1e-6 {
                    continue;
                }

                let east = spec.pixel_index(&(x + pitch, y))?;
                assert_eq!(east, PixelIndex::new(base.col + 1, base.row));

                let north = spec.pixel_index(&(x, y + period))?;
                assert_eq!(north, PixelIndex::new(base.col, base.row + 2));

                let far = spec.pixel_index(&(x - 4.0 * pitch, y - 3.0 * period))?;
                assert_eq!(far, PixelIndex::new(base.col - 4, base.row - 6));
            }
        }
        Ok(())
    }

    #[test]
    fn test_position_exactly_on_lower_edge_stays_in_first_approximation() -> Result<()> {
        // At pitch sqrt(3) the side is exactly 1, so in the second row period
        // both the edge height and `y + side` sit in [2, 4) and round-trip.
        let pitch = SQRT_3;
        let spec = HexGridSpec::new(pitch)?;
        assert_eq!(spec.side(), 1.0);

        let x = -0.25 * pitch;
        let frame = spec.offset_frame(&(x, 2.2))?;
        assert_eq!(frame.x_bucket, 0);
        assert_eq!(frame.period, 1.0);
        let Some(line) = boundary_height(RowBand::LowerEdge, ColumnParity::Even, &frame) else {
            panic!("Expected a lower edge over an even bucket");
        };

        let y = line - spec.side();
        assert_eq!(y + spec.side(), line);
        assert_eq!(RowBand::index_of(line / spec.row_period()), 0);

        assert_eq!(pixel_index_at(&(x, y), pitch)?, PixelIndex::new(0, 2));

        let below = f64::from_bits(y.to_bits() - 1);
        assert_eq!(pixel_index_at(&(x, below), pitch)?, PixelIndex::new(-1, 1));
        Ok(())
    }

    #[test]
    fn test_tiny_negative_offset_below_period_boundary() -> Result<()> {
        // One ulp below -side the offset quotient rounds its fraction up to a
        // full period; the band must stay in the shifted row below.
        let pitch = 0.99 * SQRT_3;
        let spec = HexGridSpec::new(pitch)?;
        let y = f64::from_bits((-spec.side()).to_bits() + 1);
        let idx = spec.pixel_index(&(0.3 * pitch, y))?;
        assert_eq!(idx, PixelIndex::new(0, -1));
        Ok(())
    }

    #[test]
    fn test_pixel_center_values() -> Result<()> {
        let spec = HexGridSpec::new(2.0)?;
        let side = spec.side();

        let c = spec.pixel_center(PixelIndex::new(0, 0));
        assert_eq!((c.x(), c.y()), (0.0, 0.0));

        let c = spec.pixel_center(PixelIndex::new(1, 1));
        assert!((c.x() - 3.0).abs() < 1e-12);
        assert!((c.y() - 1.5 * side).abs() < 1e-12);

        let c = pixel_center(PixelIndex::new(-1, -1), 2.0)?;
        assert!((c.x() - -1.0).abs() < 1e-12);
        assert!((c.y() - -1.5 * side).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_pixel_index_display_and_from() {
        let idx: PixelIndex = (3, -2).into();
        assert_eq!(idx, PixelIndex::new(3, -2));
        assert_eq!(idx.to_string(), "(3, -2)");
    }
}
