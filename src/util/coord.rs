use geo_types::{Coord, Point};

/// A point in the sensor's local 2-D frame, origin at the centre of pixel (0, 0).
pub type Position2D = Point<f64>;

/// Trait for types that can provide x/y coordinates.
///
/// Implemented for `(f64, f64)` tuples, `geo_types::Point<f64>` and
/// `geo_types::Coord<f64>`, so indexing functions accept any of them.
pub trait Coordinate {
    /// Returns the local x-coordinate.
    fn x(&self) -> f64;
    /// Returns the local y-coordinate.
    fn y(&self) -> f64;
}

impl Coordinate for (f64, f64) {
    fn x(&self) -> f64 {
        self.0
    }
    fn y(&self) -> f64 {
        self.1
    }
}

impl Coordinate for Point<f64> {
    fn x(&self) -> f64 {
        Point::x(*self)
    }
    fn y(&self) -> f64 {
        Point::y(*self)
    }
}

impl Coordinate for Coord<f64> {
    fn x(&self) -> f64 {
        self.x
    }
    fn y(&self) -> f64 {
        self.y
    }
}
