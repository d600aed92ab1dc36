//! The rewrite engine.
//!
//! Field rules locate tagged payloads inside a node and replace them using
//! the coordinate and board codecs; the legacy migration folds old RZone
//! channel lines into the combined field; the record rewriter drives both
//! over every node of a record.

pub mod fields;
pub mod migrate;
pub mod record;
pub mod stats;

pub use fields::{
    apply_rules, Channel, FieldContext, FieldError, FieldErrorKind, FieldTag, PayloadOutcome,
    ALL_CHANNELS, EQUAL_LOSS_SENTINEL, REWRITE_RULES,
};
pub use migrate::{migrate_node, MigrationOutcome};
pub use record::{
    rewrite_node, rewrite_transcript, rewrite_transcript_with_stop, rewrite_with_size,
    RewriteError, RewriteOptions, RewriteOutput,
};
pub use stats::RewriteStats;
