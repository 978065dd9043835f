//! Case table for resolving a point against the diagonal hexagon edges.
//!
//! One vertical period of the tiling (`3 * side`, two pixel rows) is cut
//! into six equal row bands, and the horizontal axis into half-pitch
//! buckets. The first approximation always names the cell whose centre row
//! is odd (one-based) in the current period; the band and the bucket
//! parity decide whether the point actually lies in a diagonal neighbour.

use crate::core::constants::{EDGE_SLOPE, ROW_BANDS};
use crate::util::error::HexPixError;

/// Vertical band of a point within one row period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowBand {
    /// Band 0: the lower tip of the approximated cell meets the upper tip of
    /// the row below.
    LowerEdge,
    /// Bands 1 and 2: inside the approximated cell.
    Interior,
    /// Band 3: the upper tip of the approximated cell meets the lower tip of
    /// the shifted row above.
    UpperEdge,
    /// Bands 4 and 5: entirely inside the shifted row above.
    Shifted,
}

impl TryFrom<i64> for RowBand {
    type Error = HexPixError;

    fn try_from(band: i64) -> Result<Self, Self::Error> {
        match band {
            0 => Ok(RowBand::LowerEdge),
            1 | 2 => Ok(RowBand::Interior),
            3 => Ok(RowBand::UpperEdge),
            4 | 5 => Ok(RowBand::Shifted),
            _ => Err(HexPixError::UnresolvedIndex { band }),
        }
    }
}

impl RowBand {
    /// Band of a row-period quotient `q = posy / (3 * side)`.
    ///
    /// The fractional part of `q` can round up to exactly one for tiny
    /// negative offsets below a period boundary; that lands in band 5 of the
    /// same period rather than wrapping to band 0.
    pub(crate) fn index_of(quotient: f64) -> i64 {
        let fraction = quotient - quotient.floor();
        ((fraction * ROW_BANDS as f64).floor() as i64).min(ROW_BANDS - 1)
    }
}

/// Parity of the half-pitch bucket the point falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnParity {
    Even,
    Odd,
}

impl ColumnParity {
    pub fn of(bucket: i64) -> Self {
        if bucket.rem_euclid(2) == 0 {
            ColumnParity::Even
        } else {
            ColumnParity::Odd
        }
    }
}

/// Index adjustment applied to the first approximation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Correction {
    pub dcol: i64,
    pub drow: i64,
}

impl Correction {
    pub const NONE: Correction = Correction { dcol: 0, drow: 0 };

    const fn new(dcol: i64, drow: i64) -> Self {
        Self { dcol, drow }
    }
}

/// A point expressed in the shifted frame where pixel (0, 0) starts at the
/// origin, plus the bucket quantities derived from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetFrame {
    pub posx: f64,
    pub posy: f64,
    /// `floor(posx / minor_radius)`.
    pub x_bucket: i64,
    /// `floor(posy / (3 * side))`, kept as a float for the line offsets.
    pub period: f64,
    pub minor_radius: f64,
    pub side: f64,
}

/// Diagonal neighbour a band/parity pair points at when the point lies
/// beyond the boundary.
pub fn neighbour_step(band: RowBand, parity: ColumnParity) -> Correction {
    match (band, parity) {
        (RowBand::Interior, _) => Correction::NONE,
        (RowBand::LowerEdge, ColumnParity::Even) => Correction::new(-1, -1),
        (RowBand::LowerEdge, ColumnParity::Odd) => Correction::new(0, -1),
        (RowBand::UpperEdge | RowBand::Shifted, ColumnParity::Even) => Correction::new(-1, 1),
        (RowBand::UpperEdge | RowBand::Shifted, ColumnParity::Odd) => Correction::new(0, 1),
    }
}

/// Height of the separating edge at `frame.posx`, for the two bands that
/// need a half-plane test.
///
/// Lower band: the edge descends over even buckets and ascends over odd
/// ones. Upper band: the reverse, lifted by `2 * side`.
pub fn boundary_height(band: RowBand, parity: ColumnParity, frame: &OffsetFrame) -> Option<f64> {
    let base = 3.0 * frame.side * frame.period;
    let bucket = frame.x_bucket as f64;
    let r = frame.minor_radius;

    match (band, parity) {
        (RowBand::LowerEdge, ColumnParity::Even) => {
            let offset = base + EDGE_SLOPE * ((bucket + 1.0) * r);
            Some(-EDGE_SLOPE * frame.posx + offset)
        }
        (RowBand::LowerEdge, ColumnParity::Odd) => {
            let offset = base - EDGE_SLOPE * (bucket * r);
            Some(EDGE_SLOPE * frame.posx + offset)
        }
        (RowBand::UpperEdge, ColumnParity::Even) => {
            let offset = frame.side * (3.0 * frame.period + 2.0) - EDGE_SLOPE * (r * (bucket + 1.0));
            Some(EDGE_SLOPE * frame.posx + offset)
        }
        (RowBand::UpperEdge, ColumnParity::Odd) => {
            let offset = frame.side * (3.0 * frame.period + 2.0) + EDGE_SLOPE * (r * bucket);
            Some(-EDGE_SLOPE * frame.posx + offset)
        }
        (RowBand::Interior | RowBand::Shifted, _) => None,
    }
}

/// Whether a point at height `posy` lies past an edge of height `line`.
///
/// Strict in both directions: a point exactly on an edge stays in the
/// first-approximation cell.
pub fn crosses(band: RowBand, posy: f64, line: f64) -> bool {
    match band {
        RowBand::LowerEdge => posy < line,
        RowBand::UpperEdge => posy > line,
        RowBand::Interior | RowBand::Shifted => false,
    }
}

/// Resolves the correction for one point.
pub fn correction(band: RowBand, parity: ColumnParity, frame: &OffsetFrame) -> Correction {
    let beyond = match band {
        RowBand::Interior => false,
        RowBand::Shifted => true,
        RowBand::LowerEdge | RowBand::UpperEdge => boundary_height(band, parity, frame)
            .is_some_and(|line| crosses(band, frame.posy, line)),
    };

    if beyond {
        neighbour_step(band, parity)
    } else {
        Correction::NONE
    }
}
