use crate::core::constants::{ROW_PERIOD_SIDES, SQRT_3};
use crate::util::error::{HexPixError, Result};
use serde::{Deserialize, Serialize};

/// Shape parameter of a regular pointy-top hexagonal pixel grid.
///
/// `pitch` is the side-to-side (flat-to-flat) width of one pixel. It is the
/// only free parameter; everything else is derived from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexGridSpec {
    pitch: f64,
}

impl HexGridSpec {
    /// Validates `pitch` and builds the spec.
    pub fn new(pitch: f64) -> Result<Self> {
        if !pitch.is_finite() || pitch <= 0.0 {
            return Err(HexPixError::InvalidPitch(pitch));
        }
        Ok(Self { pitch })
    }

    /// Side-to-side width of one pixel.
    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    /// Edge length of the hexagon, `pitch / sqrt(3)`.
    pub fn side(&self) -> f64 {
        side_from_pitch(self.pitch)
    }

    /// Half the pitch; the horizontal bucket width.
    pub fn minor_radius(&self) -> f64 {
        self.pitch / 2.0
    }

    /// Vertical period of the tiling, `3 * side`, covering two pixel rows.
    pub fn row_period(&self) -> f64 {
        ROW_PERIOD_SIDES * self.side()
    }

    /// Vertical distance between the centres of adjacent rows, `1.5 * side`.
    pub fn row_spacing(&self) -> f64 {
        self.row_period() / 2.0
    }
}

/// Edge length of a hexagon with the given pitch.
pub fn side_from_pitch(pitch: f64) -> f64 {
    pitch / SQRT_3
}

/// Logical size of a pixel grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridDimensions {
    pub columns: u32,
    pub rows: u32,
}

impl GridDimensions {
    pub fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// Total number of pixels.
    pub fn len(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Physical bounding rectangle of a hexagonal pixel grid.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GridExtent {
    pub width: f64,
    pub height: f64,
}

/// Computes the bounding rectangle of a `columns` x `rows` grid of the given pitch.
///
/// The width spans the flats of the outer pixels of the first row. The
/// height spans corner to corner of the outer pixels of a column: two rows
/// stack to `3 * side`, an odd trailing row adds its full `2 * side` height
/// and an even row count adds the half-side overhang of the shifted row.
///
/// # Example
/// ```
/// use hexpix_rs::grid_extent;
///
/// # fn main() -> Result<(), hexpix_rs::HexPixError> {
/// let extent = grid_extent(3, 1, 2.0)?;
/// assert!((extent.width - 6.0).abs() < 1e-12);
/// assert!((extent.height - 4.0 / 3.0_f64.sqrt()).abs() < 1e-12);
/// # Ok(())
/// # }
/// ```
pub fn grid_extent(columns: u32, rows: u32, pitch: f64) -> Result<GridExtent> {
    let spec = HexGridSpec::new(pitch)?;
    Ok(spec.extent(GridDimensions::new(columns, rows)))
}

impl HexGridSpec {
    /// Bounding rectangle of a grid of `dims` pixels with this pitch.
    pub fn extent(&self, dims: GridDimensions) -> GridExtent {
        let side = self.side();
        let width = f64::from(dims.columns) * self.pitch;

        let height = match dims.rows {
            0 => 0.0,
            rows if rows % 2 == 1 => {
                f64::from((rows - 1) / 2) * ROW_PERIOD_SIDES * side + 2.0 * side
            }
            rows => f64::from(rows / 2) * ROW_PERIOD_SIDES * side + side / 2.0,
        };

        GridExtent { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexagonDims {
    pub a: f64,
    pub r_circum: f64,
    pub r_apothem: f64,
    pub d_corners: f64,
    pub d_flats: f64,
    pub perimeter: f64,
    pub area: f64,
}

pub fn from_side(a: f64) -> Result<HexagonDims> {
    if !a.is_finite() || a <= 0.0 {
        return Err(HexPixError::InvalidDimension(
            "Side length must be positive".to_string(),
        ));
    }

    let r_apothem = (SQRT_3 / 2.0) * a;
    let d_flats = SQRT_3 * a;
    let area = (3.0 * SQRT_3 / 2.0) * a * a;

    Ok(HexagonDims {
        a,
        r_circum: a,
        r_apothem,
        d_corners: 2.0 * a,
        d_flats,
        perimeter: 6.0 * a,
        area,
    })
}

/// Dimensions of one pixel of the given pitch (the across-flats width).
pub fn from_pitch(pitch: f64) -> Result<HexagonDims> {
    if !pitch.is_finite() || pitch <= 0.0 {
        return Err(HexPixError::InvalidDimension(
            "Pitch must be positive".to_string(),
        ));
    }

    from_side(side_from_pitch(pitch))
}

pub fn from_across_corners(dc: f64) -> Result<HexagonDims> {
    if !dc.is_finite() || dc <= 0.0 {
        return Err(HexPixError::InvalidDimension(
            "Across-corners must be positive".to_string(),
        ));
    }

    from_side(dc / 2.0)
}

pub fn from_area(area: f64) -> Result<HexagonDims> {
    if !area.is_finite() || area <= 0.0 {
        return Err(HexPixError::InvalidDimension(
            "Area must be positive".to_string(),
        ));
    }

    let a = ((2.0 * area) / (3.0 * SQRT_3)).sqrt();
    from_side(a)
}

/// `(width, height)` of the box around one pointy-top pixel: the pitch
/// across, two sides tall.
pub fn pixel_bounding_box(pitch: f64) -> Result<(f64, f64)> {
    let dims = from_pitch(pitch)?;
    Ok((dims.d_flats, dims.d_corners))
}
