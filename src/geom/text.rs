//! Hit positions and pixel outlines as WKT or GeoJSON text.

use crate::util::error::{HexPixError, Result};
use geo::Centroid;
use geo_types::{Geometry, Point, Polygon};
use geojson::GeoJson;
use std::str::FromStr;
use wkt::{ToWkt, Wkt};

/// Text encoding of a geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryFormat {
    /// Well-Known Text format (e.g., "POLYGON((...))")
    Wkt,
    /// GeoJSON format
    GeoJson,
}

impl GeometryFormat {
    /// GeoJSON when the text opens with `{`, WKT otherwise.
    pub fn detect(text: &str) -> Self {
        if text.trim_start().starts_with('{') {
            GeometryFormat::GeoJson
        } else {
            GeometryFormat::Wkt
        }
    }

    /// Renders a pixel outline in this format.
    pub fn render(self, outline: &Polygon<f64>) -> String {
        match self {
            GeometryFormat::Wkt => outline.wkt_string(),
            GeometryFormat::GeoJson => geojson::Geometry::from(outline).to_string(),
        }
    }
}

/// Reads the hit positions carried by a WKT or GeoJSON string.
///
/// Points and multipoints give one position per point. Cluster footprints
/// (polygons, multipolygons, rectangles, triangles) give their centroid.
/// Collections, and GeoJSON features and feature collections, contribute
/// every member. Line geometries describe tracks rather than hits and are
/// rejected, as is text that yields no position at all.
///
/// # Example
/// ```
/// use hexpix_rs::geom::parse_hit_positions;
///
/// # fn main() -> Result<(), hexpix_rs::HexPixError> {
/// let hits = parse_hit_positions("MULTIPOINT((0 0),(27.5 47.6))")?;
/// assert_eq!(hits.len(), 2);
///
/// let cluster = parse_hit_positions(r#"{"type":"Point","coordinates":[3.0,4.0]}"#)?;
/// assert_eq!(cluster[0].x(), 3.0);
///
/// assert!(parse_hit_positions("LINESTRING(0 0, 1 1)").is_err());
/// # Ok(())
/// # }
/// ```
pub fn parse_hit_positions(text: &str) -> Result<Vec<Point<f64>>> {
    let text = text.trim();
    let geometries = match GeometryFormat::detect(text) {
        GeometryFormat::Wkt => vec![decode_wkt(text)?],
        GeometryFormat::GeoJson => decode_geojson(text)?,
    };

    let mut positions = Vec::new();
    for geometry in geometries {
        collect_hits(geometry, &mut positions)?;
    }

    if positions.is_empty() {
        return Err(HexPixError::GeometryParseError(format!(
            "no hit position in '{text}'"
        )));
    }
    Ok(positions)
}

fn decode_wkt(text: &str) -> Result<Geometry<f64>> {
    let wkt = Wkt::<f64>::from_str(text).map_err(|e| HexPixError::GeometryParseError(e.to_string()))?;
    Geometry::try_from(wkt).map_err(|e| HexPixError::GeometryParseError(e.to_string()))
}

fn decode_geojson(text: &str) -> Result<Vec<Geometry<f64>>> {
    let document = GeoJson::from_str(text).map_err(|e| HexPixError::GeometryParseError(e.to_string()))?;

    let raw = match document {
        GeoJson::Geometry(geometry) => vec![geometry],
        GeoJson::Feature(feature) => vec![feature.geometry.ok_or_else(|| {
            HexPixError::GeometryParseError("feature has no geometry".to_string())
        })?],
        GeoJson::FeatureCollection(collection) => collection
            .features
            .into_iter()
            .filter_map(|feature| feature.geometry)
            .collect(),
    };

    raw.into_iter()
        .map(|g| Geometry::try_from(g).map_err(|e| HexPixError::GeometryParseError(e.to_string())))
        .collect()
}

fn collect_hits(geometry: Geometry<f64>, out: &mut Vec<Point<f64>>) -> Result<()> {
    match geometry {
        Geometry::Point(p) => out.push(p),
        Geometry::MultiPoint(mp) => out.extend(mp.0),
        Geometry::Polygon(poly) => out.extend(poly.centroid()),
        Geometry::MultiPolygon(mp) => out.extend(mp.0.iter().filter_map(|p| p.centroid())),
        Geometry::Rect(rect) => out.push(rect.centroid()),
        Geometry::Triangle(tri) => out.push(tri.centroid()),
        Geometry::GeometryCollection(gc) => {
            for member in gc.0 {
                collect_hits(member, out)?;
            }
        }
        Geometry::Line(_) | Geometry::LineString(_) | Geometry::MultiLineString(_) => {
            return Err(HexPixError::GeometryParseError(
                "line geometries are tracks, not hit positions".to_string(),
            ));
        }
    }
    Ok(())
}
