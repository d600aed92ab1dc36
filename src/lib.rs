//! SGF editor library.
//!
//! Applies square-board symmetries to the move coordinates and packed
//! relevance-zone boards of game-solver SGF records, and migrates the
//! legacy per-channel RZone dump into the combined `RZ` property.

pub mod board;
pub mod protocol;
pub mod rewrite;
pub mod symmetry;

pub use rewrite::{rewrite_transcript, RewriteError, RewriteOptions, RewriteOutput, RewriteStats};
pub use symmetry::{Opcode, Transform};
