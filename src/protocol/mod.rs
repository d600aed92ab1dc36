//! Text and bit-level codecs for solver SGF records.
//!
//! `bits` packs board grids into hexadecimal payloads; `sgf` locates the
//! board size and splits a record into nodes.

pub mod bits;
pub mod sgf;

pub use bits::{decode_board, encode_board, BitsError};
pub use sgf::{find_board_size, split_nodes, SplitRecord};
