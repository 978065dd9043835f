//! Command-line front end for hexagonal pixel indexing.
use clap::{Parser, Subcommand, ValueEnum};
use hexpix_rs::{
    CsvHitConfig, CsvToPixels, DetectorConfig, GeometryFormat, HexPixError, HexagonalPixelDetector,
    grid_extent, pixel_index_at,
};
use log::info;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutlineFormat {
    Wkt,
    Geojson,
}

impl From<OutlineFormat> for GeometryFormat {
    fn from(format: OutlineFormat) -> Self {
        match format {
            OutlineFormat::Wkt => GeometryFormat::Wkt,
            OutlineFormat::Geojson => GeometryFormat::GeoJson,
        }
    }
}

/// Map sensor positions to hexagonal pixels.
#[derive(Parser)]
#[command(name = "hexpix")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the pixel containing a position
    Index {
        /// Local x-coordinate
        #[arg(long, allow_hyphen_values = true)]
        x: f64,

        /// Local y-coordinate
        #[arg(long, allow_hyphen_values = true)]
        y: f64,

        /// Pixel pitch (flat-to-flat width)
        #[arg(short, long)]
        pitch: f64,
    },

    /// Print the width and height of a pixel grid
    Extent {
        #[arg(short, long)]
        columns: u32,

        #[arg(short, long)]
        rows: u32,

        /// Pixel pitch (flat-to-flat width)
        #[arg(short, long)]
        pitch: f64,
    },

    /// Convert a CSV of hit positions to pixel indices
    Convert {
        /// Detector configuration JSON
        #[arg(short, long)]
        config: PathBuf,

        /// Input hit CSV
        #[arg(short, long)]
        input: PathBuf,

        /// Output CSV
        #[arg(short, long)]
        output: PathBuf,

        #[arg(long, default_value = "x")]
        x_column: String,

        #[arg(long, default_value = "y")]
        y_column: String,

        /// Read positions from a WKT/GeoJSON column instead of x/y columns
        #[arg(long, conflicts_with_all = ["x_column", "y_column"])]
        geometry_column: Option<String>,

        /// Keep hits whose pixel lies off the detector
        #[arg(long)]
        keep_out_of_grid: bool,

        /// Append each pixel's outline in this format
        #[arg(long, value_enum)]
        outline: Option<OutlineFormat>,
    },
}

fn main() -> Result<(), HexPixError> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Index { x, y, pitch } => {
            let index = pixel_index_at(&(x, y), pitch)?;
            println!("{} {}", index.col, index.row);
        }
        Commands::Extent {
            columns,
            rows,
            pitch,
        } => {
            let extent = grid_extent(columns, rows, pitch)?;
            println!("{} {}", extent.width, extent.height);
        }
        Commands::Convert {
            config,
            input,
            output,
            x_column,
            y_column,
            geometry_column,
            keep_out_of_grid,
            outline,
        } => {
            let detector = HexagonalPixelDetector::from_config(&DetectorConfig::from_json_file(&config)?)?;

            let mut hit_config = match geometry_column {
                Some(column) => CsvHitConfig::new(column),
                None => CsvHitConfig::from_coords(x_column, y_column),
            }
            .keep_out_of_grid(keep_out_of_grid);
            if let Some(format) = outline {
                hit_config = hit_config.with_pixel_geometry(format.into());
            }

            let summary = input.to_pixel_csv(&output, &detector, &hit_config)?;
            info!(
                "Wrote {} of {} hits to {} ({} outside the grid)",
                summary.rows_written,
                summary.rows_read,
                output.display(),
                summary.out_of_grid
            );
        }
    }

    Ok(())
}
