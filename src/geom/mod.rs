pub mod text;

pub use text::{GeometryFormat, parse_hit_positions};
