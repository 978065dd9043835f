pub mod coord;
pub mod error;
pub(crate) mod output;

pub use coord::{Coordinate, Position2D};
pub use error::{HexPixError, Result};
