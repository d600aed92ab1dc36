//! Per-run rewrite counters.
//!
//! Every node rewrite returns its own `RewriteStats`; the record rewriter
//! merges them in node order.

use std::ops::AddAssign;

use serde::Serialize;

use super::fields::{FieldTag, PayloadOutcome};
use super::migrate::MigrationOutcome;

/// Counts of fields seen and rewritten.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RewriteStats {
    /// Nodes processed.
    pub nodes: usize,
    /// Move fields with a coordinate.
    pub moves: usize,
    /// Move fields with an empty payload.
    pub passes: usize,
    /// Non-empty `RZ` slots.
    pub rzone_slots: usize,
    /// `equal_loss` fields holding a coordinate.
    pub equal_loss: usize,
    /// `equal_loss` fields holding the `-1` sentinel.
    pub sentinels: usize,
    /// Non-empty legacy channel dumps still present during the rule pass.
    pub legacy_channels: usize,
    /// Payloads whose text was replaced.
    pub rewritten: usize,
    /// Nodes whose legacy dumps were folded into an `RZ` field.
    pub migrated_nodes: usize,
    /// Nodes with legacy dumps but no move field to anchor them.
    pub skipped_migrations: usize,
}

impl RewriteStats {
    /// Counts one rule application.
    pub fn record_field(&mut self, tag: FieldTag, outcome: &PayloadOutcome) {
        match (tag, outcome) {
            (FieldTag::Move, PayloadOutcome::Empty) => self.passes += 1,
            (FieldTag::Move, _) => self.moves += 1,
            (_, PayloadOutcome::Empty) => {}
            (FieldTag::Rzone { .. }, _) => self.rzone_slots += 1,
            (FieldTag::EqualLoss, PayloadOutcome::Sentinel) => self.sentinels += 1,
            (FieldTag::EqualLoss, _) => self.equal_loss += 1,
            (FieldTag::Legacy(_), _) => self.legacy_channels += 1,
        }
        if matches!(outcome, PayloadOutcome::Replaced(_)) {
            self.rewritten += 1;
        }
    }

    /// Counts one migration pass.
    pub fn record_migration(&mut self, outcome: MigrationOutcome) {
        match outcome {
            MigrationOutcome::Absent => {}
            MigrationOutcome::Migrated => self.migrated_nodes += 1,
            MigrationOutcome::NoMoveField => self.skipped_migrations += 1,
        }
    }
}

impl AddAssign for RewriteStats {
    fn add_assign(&mut self, other: RewriteStats) {
        self.nodes += other.nodes;
        self.moves += other.moves;
        self.passes += other.passes;
        self.rzone_slots += other.rzone_slots;
        self.equal_loss += other.equal_loss;
        self.sentinels += other.sentinels;
        self.legacy_channels += other.legacy_channels;
        self.rewritten += other.rewritten;
        self.migrated_nodes += other.migrated_nodes;
        self.skipped_migrations += other.skipped_migrations;
    }
}
