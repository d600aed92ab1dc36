//! Whole-record rewriting.
//!
//! A record is split into nodes, each node is migrated (optionally) and run
//! through the field rules, and the results are joined in the original
//! order. Nodes never interact, so with more than one thread they are
//! rewritten on a rayon pool; the output and any reported failure are the
//! same as for the sequential path.

use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;
use thiserror::Error;

use crate::board::MAX_AXIS;
use crate::protocol::sgf::{find_board_size, split_nodes};
use crate::symmetry::Transform;

use super::fields::{apply_rules, FieldContext, FieldError};
use super::migrate::migrate_node;
use super::stats::RewriteStats;

/// Options for a rewrite run.
#[derive(Debug, Clone)]
pub struct RewriteOptions {
    /// Symmetry applied to every coordinate and packed board.
    pub transform: Transform,
    /// Fold legacy `R:`/`G:`/`B:` lines into `RZ` before the rule pass.
    pub migrate_legacy: bool,
    /// Worker threads; 1 rewrites nodes on the calling thread.
    pub threads: usize,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        RewriteOptions {
            transform: Transform::default(),
            migrate_legacy: false,
            threads: 1,
        }
    }
}

/// Errors that abort a rewrite run.
#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("sgf format error: can't find SZ[size]")]
    MissingSize,

    #[error("unsupported board size {0} (expected 1..=26)")]
    UnsupportedSize(usize),

    #[error("node index: {index} (start from 0)\n{text}")]
    Node {
        index: usize,
        text: String,
        #[source]
        source: FieldError,
    },

    #[error("rewrite cancelled")]
    Cancelled,

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// A rewritten record and what was done to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOutput {
    pub text: String,
    pub stats: RewriteStats,
}

/// Rewrites one node: migration (if enabled), then the field rules.
pub fn rewrite_node(
    text: &str,
    ctx: &FieldContext<'_>,
    migrate_legacy: bool,
) -> Result<(String, RewriteStats), FieldError> {
    let mut stats = RewriteStats {
        nodes: 1,
        ..Default::default()
    };

    let (out, node_stats) = if migrate_legacy {
        let (migrated, outcome) = migrate_node(text);
        stats.record_migration(outcome);
        apply_rules(&migrated, ctx)?
    } else {
        apply_rules(text, ctx)?
    };

    stats += node_stats;
    Ok((out, stats))
}

/// Rewrites a record, reading the board size from its `SZ[n]` property.
pub fn rewrite_transcript(text: &str, options: &RewriteOptions) -> Result<RewriteOutput, RewriteError> {
    rewrite_transcript_with_stop(text, options, &AtomicBool::new(false))
}

/// Like [`rewrite_transcript`], checking `stop` before each node.
pub fn rewrite_transcript_with_stop(
    text: &str,
    options: &RewriteOptions,
    stop: &AtomicBool,
) -> Result<RewriteOutput, RewriteError> {
    let size = find_board_size(text).ok_or(RewriteError::MissingSize)?;
    rewrite_with_size(text, size, options, stop)
}

/// Rewrites a record on a board of the given size.
///
/// Returns [`RewriteError::Cancelled`] if `stop` is set before every node
/// has been rewritten; no partial output is produced.
pub fn rewrite_with_size(
    text: &str,
    size: usize,
    options: &RewriteOptions,
    stop: &AtomicBool,
) -> Result<RewriteOutput, RewriteError> {
    let size = u8::try_from(size)
        .ok()
        .filter(|s| (1..=MAX_AXIS).contains(s))
        .ok_or(RewriteError::UnsupportedSize(size))?;
    let ctx = FieldContext {
        size,
        transform: &options.transform,
    };

    let record = split_nodes(text);
    let rewritten = if options.threads > 1 {
        rewrite_parallel(&record.nodes, &ctx, options, stop)?
    } else {
        rewrite_sequential(&record.nodes, &ctx, options, stop)?
    };

    let mut out = String::with_capacity(text.len());
    out.push_str(record.prefix);
    let mut stats = RewriteStats::default();
    for (node, node_stats) in rewritten {
        out.push_str(&node);
        stats += node_stats;
    }

    log::info!(
        "rewrote {} nodes on {}x{} (transform '{}', {} payloads changed, {} migrated)",
        stats.nodes,
        size,
        size,
        options.transform,
        stats.rewritten,
        stats.migrated_nodes,
    );
    Ok(RewriteOutput { text: out, stats })
}

fn node_error(index: usize, node: &str, source: FieldError) -> RewriteError {
    RewriteError::Node {
        index,
        text: node.to_string(),
        source,
    }
}

fn rewrite_sequential(
    nodes: &[&str],
    ctx: &FieldContext<'_>,
    options: &RewriteOptions,
    stop: &AtomicBool,
) -> Result<Vec<(String, RewriteStats)>, RewriteError> {
    let mut rewritten = Vec::with_capacity(nodes.len());
    for (index, node) in nodes.iter().enumerate() {
        if stop.load(Ordering::Relaxed) {
            return Err(RewriteError::Cancelled);
        }
        let result = rewrite_node(node, ctx, options.migrate_legacy)
            .map_err(|e| node_error(index, node, e))?;
        log::debug!("node {}: {} field(s) rewritten", index, result.1.rewritten);
        rewritten.push(result);
    }
    Ok(rewritten)
}

/// Rewrites nodes on a rayon pool. Results are collected by index, so the
/// lowest failing node is reported regardless of completion order.
fn rewrite_parallel(
    nodes: &[&str],
    ctx: &FieldContext<'_>,
    options: &RewriteOptions,
    stop: &AtomicBool,
) -> Result<Vec<(String, RewriteStats)>, RewriteError> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.threads)
        .build()?;

    let results: Vec<Option<Result<(String, RewriteStats), FieldError>>> = pool.install(|| {
        nodes
            .par_iter()
            .map(|node| {
                if stop.load(Ordering::Relaxed) {
                    return None;
                }
                Some(rewrite_node(node, ctx, options.migrate_legacy))
            })
            .collect()
    });

    if stop.load(Ordering::Relaxed) {
        return Err(RewriteError::Cancelled);
    }

    results
        .into_iter()
        .zip(nodes)
        .enumerate()
        .map(|(index, (result, node))| match result {
            Some(r) => r.map_err(|e| node_error(index, node, e)),
            None => Err(RewriteError::Cancelled),
        })
        .collect()
}
