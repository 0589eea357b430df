extern crate nalgebra;
extern crate smallvec;

/// Errors reported by a [Region]
mod error;
/// Coordinate field definition and per-node parameter sets
mod field;
/// An in-memory finite element region: nodes, square elements and their line faces
mod region;
/// Serialization of a [Region] into exchange-format (EX) text
mod write;

pub use error::RegionError;
pub use field::{CoordinateField, NodeParameters, NodeValueLabel, BICUBIC_HERMITE_BASIS};
pub use region::Region;
pub use write::format_real;
