use crate::api::detector::HexagonalPixelDetector;
use crate::api::pixel::Pixel;
use crate::core::dimensions::GridExtent;
use crate::core::grid::PixelIndex;
use crate::geom::text::GeometryFormat;
use crate::util::coord::Coordinate;
use crate::util::error::{HexPixError, Result};
use crate::util::output::write_csv_atomically;
use geo_types::Polygon;
use log::debug;
use rayon::prelude::*;
use std::path::Path;

/// Every pixel of a detector, stored row by row from the bottom row up.
#[derive(Debug, Clone)]
pub struct PixelGrid {
    pixels: Vec<Pixel>,
    detector: HexagonalPixelDetector,
}

impl PixelGrid {
    pub fn builder() -> PixelGridBuilder {
        PixelGridBuilder::new()
    }

    pub fn from_detector(detector: &HexagonalPixelDetector) -> Self {
        let dims = detector.number_of_pixels();
        let spec = detector.spec();

        let mut pixels = Vec::with_capacity(dims.len());
        for row in 0..i64::from(dims.rows) {
            for col in 0..i64::from(dims.columns) {
                pixels.push(Pixel::from_spec(spec, PixelIndex::new(col, row)));
            }
        }

        Self {
            pixels,
            detector: detector.clone(),
        }
    }

    pub fn detector(&self) -> &HexagonalPixelDetector {
        &self.detector
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pixel> {
        self.pixels.iter()
    }

    /// Bounding rectangle of the grid.
    pub fn extent(&self) -> GridExtent {
        self.detector.grid_size()
    }

    pub fn get_pixel(&self, index: &PixelIndex) -> Option<&Pixel> {
        if !self.detector.is_within_pixel_grid(index) {
            return None;
        }
        let columns = i64::from(self.detector.number_of_pixels().columns);
        let offset = usize::try_from(index.row * columns + index.col).ok()?;
        self.pixels.get(offset)
    }

    /// The pixel containing `coord`, or `None` when it is off the grid.
    ///
    /// Positions that cannot be indexed at all are errors, never `None`.
    pub fn get_pixel_at(&self, coord: &impl Coordinate) -> Result<Option<&Pixel>> {
        Ok(self
            .detector
            .locate(coord)?
            .and_then(|index| self.get_pixel(&index)))
    }

    pub fn to_polygons(&self) -> Vec<Polygon<f64>> {
        self.pixels
            .par_iter()
            .map(|pixel| self.detector.pixel_outline(&pixel.index))
            .collect()
    }

    pub fn filter<F>(&self, predicate: F) -> Vec<&Pixel>
    where
        F: Fn(&Pixel) -> bool,
    {
        self.pixels.iter().filter(|pixel| predicate(pixel)).collect()
    }

    /// Writes the pixel layout as CSV: `col,row,center_x,center_y` and,
    /// when requested, each pixel's outline.
    pub fn to_csv(&self, path: impl AsRef<Path>, geometry: Option<GeometryFormat>) -> Result<()> {
        let path = path.as_ref();

        let outlines: Vec<Option<String>> = match geometry {
            Some(format) => self
                .to_polygons()
                .par_iter()
                .map(|polygon| Some(format.render(polygon)))
                .collect(),
            None => vec![None; self.pixels.len()],
        };

        write_csv_atomically(path, |writer| {
            let mut header = vec!["col", "row", "center_x", "center_y"];
            if geometry.is_some() {
                header.push("pixel_geometry");
            }
            writer
                .write_record(&header)
                .map_err(|e| HexPixError::CsvError(e.to_string()))?;

            for (pixel, outline) in self.pixels.iter().zip(outlines) {
                let mut row = vec![
                    pixel.col().to_string(),
                    pixel.row().to_string(),
                    pixel.center.x().to_string(),
                    pixel.center.y().to_string(),
                ];
                row.extend(outline);
                writer
                    .write_record(&row)
                    .map_err(|e| HexPixError::CsvError(e.to_string()))?;
            }
            Ok(())
        })?;
        debug!("Wrote {} pixels to {}", self.pixels.len(), path.display());

        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct PixelGridBuilder {
    pitch: Option<f64>,
    columns: Option<u32>,
    rows: Option<u32>,
}

impl PixelGridBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pitch(mut self, pitch: f64) -> Self {
        self.pitch = Some(pitch);
        self
    }

    pub fn columns(mut self, columns: u32) -> Self {
        self.columns = Some(columns);
        self
    }

    pub fn rows(mut self, rows: u32) -> Self {
        self.rows = Some(rows);
        self
    }

    pub fn build(self) -> Result<PixelGrid> {
        let missing = |field: &str| HexPixError::ConfigError(format!("{field} must be set"));
        let pitch = self.pitch.ok_or_else(|| missing("pitch"))?;
        let columns = self.columns.ok_or_else(|| missing("columns"))?;
        let rows = self.rows.ok_or_else(|| missing("rows"))?;

        let detector = HexagonalPixelDetector::new(pitch, columns, rows)?;
        Ok(PixelGrid::from_detector(&detector))
    }
}
