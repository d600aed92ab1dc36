//! Board coordinates and their two-letter SGF tokens.
//!
//! A coordinate is a 1-based `(x, y)` pair. In SGF text each axis is one
//! lowercase letter, `a` = 1 through `z` = 26, x first.

use std::fmt;

use thiserror::Error;

/// Largest axis value a single letter can express.
pub const MAX_AXIS: u8 = 26;

/// Errors from decoding or encoding coordinate tokens.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoordError {
    #[error("coordinate token must be two letters, got '{0}'")]
    InvalidLength(String),

    #[error("invalid coordinate letter '{0}' (expected a..z)")]
    InvalidLetter(char),

    #[error("axis value {0} outside 1..=26")]
    AxisOutOfRange(u8),
}

/// A 1-based board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub x: u8,
    pub y: u8,
}

impl Coord {
    pub const fn new(x: u8, y: u8) -> Self {
        Coord { x, y }
    }

    /// Returns true when both axes lie within `1..=size`.
    pub fn on_board(self, size: u8) -> bool {
        (1..=size).contains(&self.x) && (1..=size).contains(&self.y)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Maps a letter to its axis value.
fn letter_to_axis(c: char) -> Result<u8, CoordError> {
    if c.is_ascii_lowercase() {
        Ok(c as u8 - b'a' + 1)
    } else {
        Err(CoordError::InvalidLetter(c))
    }
}

/// Maps an axis value to its letter.
fn axis_to_letter(v: u8) -> Result<char, CoordError> {
    if (1..=MAX_AXIS).contains(&v) {
        Ok((b'a' + v - 1) as char)
    } else {
        Err(CoordError::AxisOutOfRange(v))
    }
}

/// Parses a two-letter token like `"ab"` into `Coord { x: 1, y: 2 }`.
///
/// Empty tokens (pass moves) never reach this function; callers skip them.
pub fn decode_coord(token: &str) -> Result<Coord, CoordError> {
    let mut chars = token.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(a), Some(b), None) => Ok(Coord::new(letter_to_axis(a)?, letter_to_axis(b)?)),
        _ => Err(CoordError::InvalidLength(token.to_string())),
    }
}

/// Formats a coordinate as its two-letter token.
pub fn encode_coord(coord: Coord) -> Result<String, CoordError> {
    let mut token = String::with_capacity(2);
    token.push(axis_to_letter(coord.x)?);
    token.push(axis_to_letter(coord.y)?);
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn decode_corner_tokens() {
        assert_eq!(decode_coord("aa"), Ok(Coord::new(1, 1)));
        assert_eq!(decode_coord("ab"), Ok(Coord::new(1, 2)));
        assert_eq!(decode_coord("zz"), Ok(Coord::new(26, 26)));
        assert_eq!(decode_coord("ia"), Ok(Coord::new(9, 1)));
    }

    #[test]
    fn encode_corner_coords() {
        assert_eq!(encode_coord(Coord::new(1, 1)).unwrap(), "aa");
        assert_eq!(encode_coord(Coord::new(9, 2)).unwrap(), "ib");
        assert_eq!(encode_coord(Coord::new(26, 26)).unwrap(), "zz");
    }

    #[test]
    fn rejects_uppercase_and_digits() {
        assert_eq!(decode_coord("Ab"), Err(CoordError::InvalidLetter('A')));
        assert_eq!(decode_coord("a1"), Err(CoordError::InvalidLetter('1')));
    }

    #[test]
    fn rejects_wrong_length() {
        assert_eq!(decode_coord("a"), Err(CoordError::InvalidLength("a".into())));
        assert_eq!(decode_coord("abc"), Err(CoordError::InvalidLength("abc".into())));
        assert!(decode_coord("").is_err());
    }

    #[test]
    fn encode_rejects_out_of_range() {
        assert_eq!(encode_coord(Coord::new(0, 3)), Err(CoordError::AxisOutOfRange(0)));
        assert_eq!(encode_coord(Coord::new(3, 27)), Err(CoordError::AxisOutOfRange(27)));
    }

    #[test]
    fn on_board_bounds() {
        assert!(Coord::new(9, 9).on_board(9));
        assert!(!Coord::new(10, 1).on_board(9));
        assert!(!Coord::new(0, 1).on_board(9));
    }

    proptest! {
        #[test]
        fn prop_token_roundtrip(x in 1u8..=26, y in 1u8..=26) {
            let coord = Coord::new(x, y);
            let token = encode_coord(coord).unwrap();
            prop_assert_eq!(decode_coord(&token).unwrap(), coord);
        }
    }
}
