//! Board representation.
//!
//! Coordinates with their two-letter SGF tokens, and square cell-state grids.

pub mod coord;
pub mod grid;

pub use coord::{decode_coord, encode_coord, Coord, CoordError, MAX_AXIS};
pub use grid::BoardGrid;
