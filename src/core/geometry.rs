use crate::util::coord::Coordinate;
use geo_types::{Coord, LineString, Polygon};

/// Builds the outline of a pointy-top hexagon with circumradius `side`.
///
/// Vertices run counter-clockwise from the upper-right corner (30°); the
/// ring is closed, so it holds seven coordinates.
pub fn create_hexagon(center: &impl Coordinate, side: f64) -> Polygon<f64> {
    let mut coords = Vec::with_capacity(7);

    for i in 0..6 {
        let angle_rad = (30.0 + i as f64 * 60.0).to_radians();
        coords.push(Coord {
            x: center.x() + side * angle_rad.cos(),
            y: center.y() + side * angle_rad.sin(),
        });
    }
    coords.push(coords[0]);

    Polygon::new(LineString::from(coords), vec![])
}
