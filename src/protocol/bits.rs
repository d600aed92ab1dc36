//! Packed board encoding.
//!
//! A board is a hexadecimal number whose binary form carries one bit per
//! cell, row-major from the top-left, with each row's columns stored
//! right-to-left (column 0 is the lowest bit of its row group). A move that
//! passed sets one extra bit above the `size * size` cell bits.
//!
//! Encoding drops leading zero bits, so `"0"` is the empty board and the
//! decoder re-derives the cell width from the declared board size.

use thiserror::Error;

use crate::board::BoardGrid;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Errors that can occur while decoding a packed board.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BitsError {
    #[error("empty board payload")]
    Empty,

    #[error("invalid hexadecimal digit '{0}'")]
    InvalidHexDigit(char),

    #[error("packed value is {width} bits wide, at most {max} fit a {size}x{size} board")]
    TooWide { width: usize, max: usize, size: usize },
}

/// Expands a hex string into its binary digits, most significant first,
/// with leading zeros removed.
fn hex_to_bits(hex: &str) -> Result<Vec<bool>, BitsError> {
    let mut bits = Vec::with_capacity(hex.len() * 4);
    for ch in hex.chars() {
        let nibble = ch.to_digit(16).ok_or(BitsError::InvalidHexDigit(ch))?;
        for shift in (0..4).rev() {
            bits.push((nibble >> shift) & 1 == 1);
        }
    }
    let first_set = bits.iter().position(|&b| b).unwrap_or(bits.len());
    bits.drain(..first_set);
    Ok(bits)
}

/// Renders binary digits (most significant first) as lowercase hex without
/// leading zeros.
fn bits_to_hex(bits: &[bool]) -> String {
    let lead = (4 - bits.len() % 4) % 4;
    let padded = std::iter::repeat(false).take(lead).chain(bits.iter().copied());

    let mut hex = String::with_capacity((bits.len() + lead) / 4);
    let mut nibble = 0usize;
    for (i, bit) in padded.enumerate() {
        nibble = (nibble << 1) | bit as usize;
        if i % 4 == 3 {
            if !(hex.is_empty() && nibble == 0) {
                hex.push(HEX_DIGITS[nibble] as char);
            }
            nibble = 0;
        }
    }

    if hex.is_empty() {
        hex.push('0');
    }
    hex
}

/// Decodes a packed board into its grid and pass flag.
pub fn decode_board(hex: &str, size: usize) -> Result<(BoardGrid, bool), BitsError> {
    if hex.is_empty() {
        return Err(BitsError::Empty);
    }

    let bits = hex_to_bits(hex)?;
    let num_cells = size * size;
    let width = bits.len();
    if width > num_cells + 1 {
        return Err(BitsError::TooWide {
            width,
            max: num_cells + 1,
            size,
        });
    }
    let pass = width == num_cells + 1;

    // Right-align the cell bits into a num_cells-wide field.
    let cell_bits = &bits[width.saturating_sub(num_cells)..];
    let mut field = vec![false; num_cells - cell_bits.len()];
    field.extend_from_slice(cell_bits);

    let mut grid = BoardGrid::empty(size);
    for r in 0..size {
        for c in 0..size {
            grid.set(r, c, field[r * size + (size - 1 - c)]);
        }
    }
    Ok((grid, pass))
}

/// Encodes a grid and pass flag as a packed board.
pub fn encode_board(grid: &BoardGrid, pass: bool) -> String {
    let n = grid.size();
    let mut bits = Vec::with_capacity(n * n + 1);
    if pass {
        bits.push(true);
    }
    for r in 0..n {
        for c in (0..n).rev() {
            bits.push(grid.get(r, c));
        }
    }
    bits_to_hex(&bits)
}
