//! Tagged fields inside a node and the rules that rewrite their payloads.
//!
//! The set of recognized fields is closed, so each one is a [`FieldTag`]
//! variant with its own matcher and payload transform instead of a table of
//! patterns and callbacks. A matcher reports the byte span of the payload;
//! rewriting splices the new payload into exactly that span and leaves the
//! tag and everything around it untouched.
//!
//! Only the first occurrence of each tag in a node is rewritten. Solver
//! records carry at most one of each per node.

use std::fmt;
use std::ops::Range;

use thiserror::Error;

use crate::board::{decode_coord, encode_coord, CoordError};
use crate::protocol::bits::{decode_board, encode_board, BitsError};
use crate::symmetry::{SymmetryError, Transform};

use super::stats::RewriteStats;

/// Payload of the `equal_loss` field that means "no move" and is never transformed.
pub const EQUAL_LOSS_SENTINEL: &str = "-1";

/// One color channel of the legacy RZone dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

/// Channels in the slot order of the combined `RZ[..][..][..]` field.
pub const ALL_CHANNELS: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

impl Channel {
    /// The text that introduces this channel's dump line, e.g. `"R: "`.
    pub const fn tag(self) -> &'static str {
        match self {
            Channel::Red => "R: ",
            Channel::Green => "G: ",
            Channel::Blue => "B: ",
        }
    }

    /// Span of the whole dump line: tag, payload, and trailing line breaks.
    pub fn line_span(self, text: &str) -> Option<Range<usize>> {
        let tag = self.tag();
        let start = text.find(tag)?;
        let payload_end = scan(text, start + tag.len(), is_value_byte);
        let end = scan(text, payload_end, |b| b == b'\r' || b == b'\n');
        Some(start..end)
    }
}

/// A recognized field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldTag {
    /// `;B[xy]` / `;W[xy]` move coordinate, empty for a pass.
    Move,
    /// Slot `0..3` of the packed `RZ[..]` board field.
    Rzone { slot: usize },
    /// `equal_loss = xy` coordinate, or the `-1` sentinel.
    EqualLoss,
    /// Legacy single-channel `R: `, `G: `, `B: ` board dumps.
    Legacy(Channel),
}

/// Rules in application order. Each rule sees the output of the previous one.
pub const REWRITE_RULES: [FieldTag; 8] = [
    FieldTag::Move,
    FieldTag::Rzone { slot: 0 },
    FieldTag::Rzone { slot: 1 },
    FieldTag::Rzone { slot: 2 },
    FieldTag::EqualLoss,
    FieldTag::Legacy(Channel::Red),
    FieldTag::Legacy(Channel::Green),
    FieldTag::Legacy(Channel::Blue),
];

impl fmt::Display for FieldTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldTag::Move => write!(f, "move"),
            FieldTag::Rzone { slot } => write!(f, "RZ slot {}", slot + 1),
            FieldTag::EqualLoss => write!(f, "equal_loss"),
            FieldTag::Legacy(ch) => write!(f, "legacy {}", ch.tag().trim_end()),
        }
    }
}

/// Characters allowed in bracket-terminated and line-terminated values.
fn is_value_byte(b: u8) -> bool {
    !matches!(b, b'\r' | b'\n' | b'[' | b']')
}

/// Returns the end of the run of bytes starting at `from` that satisfy `pred`.
fn scan(text: &str, from: usize, pred: impl Fn(u8) -> bool) -> usize {
    from + text.as_bytes()[from..].iter().take_while(|&&b| pred(b)).count()
}

fn byte_at(text: &str, idx: usize) -> Option<u8> {
    text.as_bytes().get(idx).copied()
}

/// Finds the first move field and returns the span of the whole field,
/// from `;` through the closing `]`.
pub fn find_move_field(text: &str) -> Option<Range<usize>> {
    text.match_indices(';').find_map(|(i, _)| {
        if !matches!(byte_at(text, i + 1)?, b'B' | b'W' | b'b' | b'w') {
            return None;
        }
        if byte_at(text, i + 2)? != b'[' {
            return None;
        }
        let end = scan(text, i + 3, is_value_byte);
        (byte_at(text, end)? == b']').then_some(i..end + 1)
    })
}

/// Matches `RZ` followed by `slot + 1` bracketed alphanumeric values and
/// returns the span of the last one.
fn find_rzone_slot(text: &str, slot: usize) -> Option<Range<usize>> {
    text.match_indices("RZ[").find_map(|(i, _)| {
        let mut start = i + 3;
        for _ in 0..slot {
            let end = scan(text, start, |b| b.is_ascii_alphanumeric());
            if !text[end..].starts_with("][") {
                return None;
            }
            start = end + 2;
        }
        let end = scan(text, start, |b| b.is_ascii_alphanumeric());
        (byte_at(text, end)? == b']').then_some(start..end)
    })
}

/// Matches a literal tag followed by a line value and returns the value span.
fn find_tagged_line(text: &str, tag: &str) -> Option<Range<usize>> {
    let start = text.find(tag)? + tag.len();
    Some(start..scan(text, start, is_value_byte))
}

impl FieldTag {
    /// Returns the payload span of the first occurrence of this field.
    pub fn find(self, text: &str) -> Option<Range<usize>> {
        match self {
            FieldTag::Move => find_move_field(text).map(|span| span.start + 3..span.end - 1),
            FieldTag::Rzone { slot } => find_rzone_slot(text, slot),
            FieldTag::EqualLoss => find_tagged_line(text, "equal_loss = "),
            FieldTag::Legacy(ch) => find_tagged_line(text, ch.tag()),
        }
    }

    /// Computes the replacement for a payload.
    pub fn rewrite_payload(
        self,
        payload: &str,
        ctx: &FieldContext<'_>,
    ) -> Result<PayloadOutcome, FieldErrorKind> {
        // Dump lines may carry stray blanks around the hex value.
        let payload = match self {
            FieldTag::Legacy(_) => payload.trim(),
            _ => payload,
        };
        if payload.is_empty() {
            return Ok(PayloadOutcome::Empty);
        }
        match self {
            FieldTag::EqualLoss if payload == EQUAL_LOSS_SENTINEL => Ok(PayloadOutcome::Sentinel),
            FieldTag::Move | FieldTag::EqualLoss => ctx.transform_coord(payload),
            FieldTag::Rzone { .. } | FieldTag::Legacy(_) => ctx.transform_board(payload),
        }
    }
}

/// What a rule did with a matched payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadOutcome {
    /// Empty payload, e.g. a pass move; left alone.
    Empty,
    /// The `equal_loss` sentinel; left alone.
    Sentinel,
    /// The transform is empty; left alone.
    Unchanged,
    /// New payload text.
    Replaced(String),
}

/// The cause of a failed payload rewrite.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldErrorKind {
    #[error(transparent)]
    Coord(#[from] CoordError),

    #[error(transparent)]
    Bits(#[from] BitsError),

    #[error(transparent)]
    Symmetry(#[from] SymmetryError),
}

/// A payload that could not be rewritten.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{tag} payload '{payload}': {kind}")]
pub struct FieldError {
    pub tag: FieldTag,
    pub payload: String,
    #[source]
    pub kind: FieldErrorKind,
}

/// Board size and transform shared by every rule in a run.
#[derive(Debug, Clone, Copy)]
pub struct FieldContext<'a> {
    pub size: u8,
    pub transform: &'a Transform,
}

impl FieldContext<'_> {
    /// Runs a two-letter coordinate token through the transform.
    pub fn transform_coord(&self, token: &str) -> Result<PayloadOutcome, FieldErrorKind> {
        if self.transform.is_empty() {
            return Ok(PayloadOutcome::Unchanged);
        }
        let coord = decode_coord(token)?;
        let moved = self.transform.apply_to_coord(coord, self.size)?;
        Ok(PayloadOutcome::Replaced(encode_coord(moved)?))
    }

    /// Runs a packed board through decode, the transform, and encode.
    pub fn transform_board(&self, hex: &str) -> Result<PayloadOutcome, FieldErrorKind> {
        if self.transform.is_empty() {
            return Ok(PayloadOutcome::Unchanged);
        }
        let (grid, pass) = decode_board(hex, self.size as usize)?;
        let moved = self.transform.apply_to_grid(&grid);
        Ok(PayloadOutcome::Replaced(encode_board(&moved, pass)))
    }
}

/// Applies every rule in [`REWRITE_RULES`] order to one node's text.
pub fn apply_rules(
    text: &str,
    ctx: &FieldContext<'_>,
) -> Result<(String, RewriteStats), FieldError> {
    let mut out = text.to_string();
    let mut stats = RewriteStats::default();

    for tag in REWRITE_RULES {
        let Some(span) = tag.find(&out) else {
            continue;
        };
        let payload = &out[span.clone()];
        let outcome = tag.rewrite_payload(payload, ctx).map_err(|kind| FieldError {
            tag,
            payload: payload.to_string(),
            kind,
        })?;
        stats.record_field(tag, &outcome);
        if let PayloadOutcome::Replaced(new_payload) = outcome {
            out.replace_range(span, &new_payload);
        }
    }

    Ok((out, stats))
}
