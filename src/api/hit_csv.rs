use crate::api::detector::HexagonalPixelDetector;
use crate::geom::text::parse_hit_positions;
use crate::util::error::{HexPixError, Result};
use crate::util::output::write_csv_atomically;
use geo_types::Point;
use log::{debug, trace};
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

pub use crate::geom::text::GeometryFormat;

/// For the type of position source in the file
enum SourceIndices {
    Geometry(usize),
    Coordinates { x_idx: usize, y_idx: usize },
}

/// Specifies how to extract hit positions from CSV rows.
#[derive(Debug, Clone)]
pub enum CoordinateSource {
    /// A single column containing WKT or GeoJSON geometry
    GeometryColumn(String),
    /// Separate local x and y coordinate columns
    CoordinateColumns { x_column: String, y_column: String },
}

/// Configuration for hit CSV to pixel index conversion.
#[derive(Debug, Clone)]
pub struct CsvHitConfig {
    pub source: CoordinateSource,
    pub exclude_columns: Vec<String>,
    /// Write rows whose pixel lies outside the detector grid instead of dropping them.
    pub keep_out_of_grid: bool,
    pub include_pixel_geometry: Option<GeometryFormat>,
}

impl CsvHitConfig {
    /// Create config for a CSV with a geometry column (WKT or GeoJSON).
    ///
    /// # Example
    /// ```
    /// use hexpix_rs::CsvHitConfig;
    ///
    /// let config = CsvHitConfig::new("cluster");
    /// ```
    pub fn new(geometry_column: impl Into<String>) -> Self {
        Self {
            source: CoordinateSource::GeometryColumn(geometry_column.into()),
            exclude_columns: Vec::new(),
            keep_out_of_grid: false,
            include_pixel_geometry: None,
        }
    }

    /// Create config for a CSV with separate x/y coordinate columns.
    ///
    /// # Example
    /// ```
    /// use hexpix_rs::CsvHitConfig;
    ///
    /// let config = CsvHitConfig::from_coords("local_x", "local_y").keep_out_of_grid(true);
    /// ```
    pub fn from_coords(x_column: impl Into<String>, y_column: impl Into<String>) -> Self {
        Self {
            source: CoordinateSource::CoordinateColumns {
                x_column: x_column.into(),
                y_column: y_column.into(),
            },
            exclude_columns: Vec::new(),
            keep_out_of_grid: false,
            include_pixel_geometry: None,
        }
    }

    pub fn exclude(mut self, columns: Vec<String>) -> Self {
        self.exclude_columns = columns;
        self
    }

    pub fn keep_out_of_grid(mut self, keep: bool) -> Self {
        self.keep_out_of_grid = keep;
        self
    }

    /// Include the pixel outline in the output.
    pub fn with_pixel_geometry(mut self, format: GeometryFormat) -> Self {
        self.include_pixel_geometry = Some(format);
        self
    }
}

/// Counts reported by a CSV conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConversionSummary {
    pub rows_read: usize,
    pub rows_written: usize,
    /// Positions whose pixel lies outside the detector grid, written or not.
    pub out_of_grid: usize,
}

pub trait CsvToPixels {
    fn to_pixel_csv(
        &self,
        output_path: impl AsRef<Path>,
        detector: &HexagonalPixelDetector,
        config: &CsvHitConfig,
    ) -> Result<ConversionSummary>;
}

impl<P: AsRef<Path>> CsvToPixels for P {
    fn to_pixel_csv(
        &self,
        output_path: impl AsRef<Path>,
        detector: &HexagonalPixelDetector,
        config: &CsvHitConfig,
    ) -> Result<ConversionSummary> {
        csv_to_pixel_csv(self, output_path, detector, config)
    }
}

fn parse_coordinate(value: Option<&str>, axis: &str, idx: usize) -> Result<f64> {
    let raw = value
        .ok_or_else(|| HexPixError::CsvError(format!("Missing {axis} column at index {idx}")))?
        .trim();
    raw.parse()
        .map_err(|_| HexPixError::CsvError(format!("Invalid {axis} coordinate: '{raw}'")))
}

/// Converts a CSV file of hit positions to a CSV file of pixel indices.
///
/// Each output row starts with `col,row` (and `pixel_geometry` when
/// requested), followed by the input columns that were neither position
/// columns nor excluded. Rows are streamed, so large files are not held in
/// memory. The output is staged next to `output_path` and only replaces it
/// once every row has converted; a failing row leaves `output_path` untouched.
///
/// # Example
///
/// ```no_run
/// use hexpix_rs::{CsvHitConfig, HexagonalPixelDetector, csv_to_pixel_csv};
///
/// let detector = HexagonalPixelDetector::new(55.0, 64, 64).unwrap();
/// let config = CsvHitConfig::from_coords("x", "y");
///
/// let summary = csv_to_pixel_csv("hits.csv", "pixels.csv", &detector, &config).unwrap();
/// println!("{} hits outside the sensor", summary.out_of_grid);
/// ```
pub fn csv_to_pixel_csv(
    csv_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    detector: &HexagonalPixelDetector,
    config: &CsvHitConfig,
) -> Result<ConversionSummary> {
    let csv_path = csv_path.as_ref();
    debug!(
        "Converting hits in {} for detector '{}'",
        csv_path.display(),
        detector.name()
    );

    let file = File::open(csv_path).map_err(|e| HexPixError::IoError(e.to_string()))?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| HexPixError::CsvError(e.to_string()))?
        .clone();

    let find = |name: &str, what: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| HexPixError::CsvError(format!("{what} column '{name}' not found")))
    };

    let (source_indices, mut exclude_indices) = match &config.source {
        CoordinateSource::GeometryColumn(col) => {
            let idx = find(col.as_str(), "Geometry")?;
            (SourceIndices::Geometry(idx), HashSet::from([idx]))
        }
        CoordinateSource::CoordinateColumns { x_column, y_column } => {
            let x_idx = find(x_column.as_str(), "X")?;
            let y_idx = find(y_column.as_str(), "Y")?;
            (
                SourceIndices::Coordinates { x_idx, y_idx },
                HashSet::from([x_idx, y_idx]),
            )
        }
    };

    for col_name in &config.exclude_columns {
        if let Some(idx) = headers.iter().position(|h| h == col_name) {
            exclude_indices.insert(idx);
        }
    }

    let summary = write_csv_atomically(output_path.as_ref(), |writer| {
        let mut header_row: Vec<&str> = vec!["col", "row"];
        if config.include_pixel_geometry.is_some() {
            header_row.push("pixel_geometry");
        }
        for (i, h) in headers.iter().enumerate() {
            if !exclude_indices.contains(&i) {
                header_row.push(h);
            }
        }
        writer
            .write_record(&header_row)
            .map_err(|e| HexPixError::CsvError(e.to_string()))?;

        let mut summary = ConversionSummary::default();

        for result in reader.records() {
            let record = result.map_err(|e| HexPixError::CsvError(e.to_string()))?;
            summary.rows_read += 1;

            let positions = match &source_indices {
                SourceIndices::Geometry(idx) => {
                    let geom_str = record.get(*idx).ok_or_else(|| {
                        HexPixError::CsvError(format!("Missing geometry column at index {idx}"))
                    })?;
                    parse_hit_positions(geom_str)?
                }
                SourceIndices::Coordinates { x_idx, y_idx } => {
                    let x = parse_coordinate(record.get(*x_idx), "X", *x_idx)?;
                    let y = parse_coordinate(record.get(*y_idx), "Y", *y_idx)?;
                    vec![Point::new(x, y)]
                }
            };

            for position in positions {
                let index = detector.pixel_index(&position)?;
                if !detector.is_within_pixel_grid(&index) {
                    summary.out_of_grid += 1;
                    trace!(
                        "Hit at ({}, {}) maps to off-grid pixel {}",
                        position.x(),
                        position.y(),
                        index
                    );
                    if !config.keep_out_of_grid {
                        continue;
                    }
                }

                let mut row: Vec<String> = vec![index.col.to_string(), index.row.to_string()];
                if let Some(format) = config.include_pixel_geometry {
                    row.push(format.render(&detector.pixel_outline(&index)));
                }
                for (i, field) in record.iter().enumerate() {
                    if !exclude_indices.contains(&i) {
                        row.push(field.to_string());
                    }
                }
                writer
                    .write_record(&row)
                    .map_err(|e| HexPixError::CsvError(e.to_string()))?;
                summary.rows_written += 1;
            }
        }

        Ok(summary)
    })?;

    debug!(
        "Read {} rows, wrote {}, {} hits off the pixel grid",
        summary.rows_read, summary.rows_written, summary.out_of_grid
    );

    Ok(summary)
}
