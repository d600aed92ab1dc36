//! Square board symmetries.
//!
//! Six elementary opcodes cover the flips and rotations of a square board.
//! A [`Transform`] is an ordered opcode list applied left to right, so
//! composite symmetries such as "flip then rotate" are written as the
//! literal sequence `[1, 3]` rather than looked up in a group table.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::board::{BoardGrid, Coord};

/// Errors raised by symmetry parsing and application.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SymmetryError {
    #[error("unknown opcode '{0}' (expected 0..5)")]
    InvalidOpcode(char),

    #[error("coordinate {coord} is off a {size}x{size} board")]
    OffBoard { coord: Coord, size: u8 },
}

/// An elementary board symmetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    Identity,
    FlipHorizontal,
    FlipVertical,
    Rotate90,
    Rotate180,
    Rotate270,
}

/// All opcodes in digit order.
pub const ALL_OPCODES: [Opcode; 6] = [
    Opcode::Identity,
    Opcode::FlipHorizontal,
    Opcode::FlipVertical,
    Opcode::Rotate90,
    Opcode::Rotate180,
    Opcode::Rotate270,
];

impl Opcode {
    /// Returns the decimal digit used on the command line.
    pub const fn digit(self) -> char {
        match self {
            Opcode::Identity => '0',
            Opcode::FlipHorizontal => '1',
            Opcode::FlipVertical => '2',
            Opcode::Rotate90 => '3',
            Opcode::Rotate180 => '4',
            Opcode::Rotate270 => '5',
        }
    }

    /// Parses an opcode from its decimal digit.
    pub fn from_digit(c: char) -> Result<Opcode, SymmetryError> {
        match c {
            '0' => Ok(Opcode::Identity),
            '1' => Ok(Opcode::FlipHorizontal),
            '2' => Ok(Opcode::FlipVertical),
            '3' => Ok(Opcode::Rotate90),
            '4' => Ok(Opcode::Rotate180),
            '5' => Ok(Opcode::Rotate270),
            other => Err(SymmetryError::InvalidOpcode(other)),
        }
    }

    /// Maps a coordinate on a `size`-wide board.
    ///
    /// | opcode | (x, y) maps to |
    /// |---|---|
    /// | 0 | (x, y) |
    /// | 1 | (N-x+1, y) |
    /// | 2 | (x, N-y+1) |
    /// | 3 | (N-y+1, x) |
    /// | 4 | (N-x+1, N-y+1) |
    /// | 5 | (y, N-x+1) |
    pub fn apply_to_coord(self, coord: Coord, size: u8) -> Result<Coord, SymmetryError> {
        if !coord.on_board(size) {
            return Err(SymmetryError::OffBoard { coord, size });
        }
        let Coord { x, y } = coord;
        let mirror = |v: u8| size - v + 1;
        Ok(match self {
            Opcode::Identity => Coord::new(x, y),
            Opcode::FlipHorizontal => Coord::new(mirror(x), y),
            Opcode::FlipVertical => Coord::new(x, mirror(y)),
            Opcode::Rotate90 => Coord::new(mirror(y), x),
            Opcode::Rotate180 => Coord::new(mirror(x), mirror(y)),
            Opcode::Rotate270 => Coord::new(y, mirror(x)),
        })
    }

    /// Maps a grid; rotations are clockwise with row 0 at the top.
    pub fn apply_to_grid(self, grid: &BoardGrid) -> BoardGrid {
        let last = grid.size().saturating_sub(1);
        match self {
            Opcode::Identity => grid.clone(),
            Opcode::FlipHorizontal => grid.remap(|r, c| grid.get(r, last - c)),
            Opcode::FlipVertical => grid.remap(|r, c| grid.get(last - r, c)),
            Opcode::Rotate90 => grid.remap(|r, c| grid.get(last - c, r)),
            Opcode::Rotate180 => grid.remap(|r, c| grid.get(last - r, last - c)),
            Opcode::Rotate270 => grid.remap(|r, c| grid.get(c, last - r)),
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.digit())
    }
}

/// An ordered sequence of opcodes. Empty means identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Transform {
    ops: Vec<Opcode>,
}

impl Transform {
    pub fn new(ops: Vec<Opcode>) -> Self {
        Transform { ops }
    }

    pub fn ops(&self) -> &[Opcode] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Folds every opcode over a coordinate, feeding each result into the next.
    pub fn apply_to_coord(&self, coord: Coord, size: u8) -> Result<Coord, SymmetryError> {
        self.ops
            .iter()
            .try_fold(coord, |c, op| op.apply_to_coord(c, size))
    }

    /// Folds every opcode over a grid.
    pub fn apply_to_grid(&self, grid: &BoardGrid) -> BoardGrid {
        self.ops
            .iter()
            .fold(grid.clone(), |g, op| op.apply_to_grid(&g))
    }
}

impl FromStr for Transform {
    type Err = SymmetryError;

    /// Parses a digit string such as `"13"` (flip horizontally, then rotate 90).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .map(Opcode::from_digit)
            .collect::<Result<Vec<_>, _>>()
            .map(Transform::new)
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for op in &self.ops {
            write!(f, "{}", op)?;
        }
        Ok(())
    }
}
