/// `sqrt(3)`, the ratio of a hexagon's pitch (across flats) to its side.
pub const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Slope magnitude of the diagonal hexagon edges, `sqrt(3) / 3 = tan(30°)`.
pub const EDGE_SLOPE: f64 = SQRT_3 / 3.0;

/// Number of row bands one vertical period (`3 * side`) is divided into.
pub const ROW_BANDS: i64 = 6;

/// Vertical period of the tiling in units of the hexagon side; holds two rows.
pub const ROW_PERIOD_SIDES: f64 = 3.0;

/// Largest bucket quotient magnitude that still maps to an exact integer.
pub(crate) const MAX_EXACT_QUOTIENT: f64 = 4_503_599_627_370_496.0; // 2^52
