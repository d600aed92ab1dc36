//! Legacy RZone migration.
//!
//! Older solver records dump the relevance zone as three single-channel
//! lines (`R: `, `G: `, `B: `) inside the node comment. The current format
//! is one `RZ[r][g][b]` property placed right after the move. Migration
//! builds that property from whichever channels are present (a missing
//! channel becomes `0`) and deletes the old lines.

use super::fields::{find_move_field, FieldTag, ALL_CHANNELS};

/// What the migration pass did to a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// No legacy channel lines; the node is unchanged.
    Absent,
    /// The channels were folded into an `RZ` property.
    Migrated,
    /// Legacy lines exist but there is no move field to anchor the new
    /// property; the lines are removed and no `RZ` is added.
    NoMoveField,
}

/// Builds the combined `RZ[..][..][..]` property from a node's channel lines.
///
/// Returns `None` if the node has no legacy channel line at all.
pub fn combined_field(text: &str) -> Option<String> {
    let payloads: Vec<Option<&str>> = ALL_CHANNELS
        .iter()
        .map(|&ch| FieldTag::Legacy(ch).find(text).map(|span| text[span].trim()))
        .collect();
    if payloads.iter().all(Option::is_none) {
        return None;
    }

    let mut field = String::from("RZ");
    for payload in payloads {
        field.push('[');
        field.push_str(payload.unwrap_or("0"));
        field.push(']');
    }
    Some(field)
}

/// Removes the first dump line of each channel, line breaks included.
fn remove_channel_lines(text: &mut String) {
    for ch in ALL_CHANNELS {
        if let Some(span) = ch.line_span(text.as_str()) {
            text.replace_range(span, "");
        }
    }
}

/// Migrates one node from the legacy channel lines to an `RZ` property.
pub fn migrate_node(text: &str) -> (String, MigrationOutcome) {
    let Some(field) = combined_field(text) else {
        return (text.to_string(), MigrationOutcome::Absent);
    };
    let Some(move_span) = find_move_field(text) else {
        log::warn!("legacy RZone lines without a move field dropped: {:?}", text);
        let mut out = text.to_string();
        remove_channel_lines(&mut out);
        return (out, MigrationOutcome::NoMoveField);
    };

    let mut out = String::with_capacity(text.len() + field.len());
    out.push_str(&text[..move_span.end]);
    out.push_str(&field);
    out.push_str(&text[move_span.end..]);
    remove_channel_lines(&mut out);
    (out, MigrationOutcome::Migrated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_three_channels_fold_in_order() {
        let node = ";B[cc]C[solver_status: win\r\nR: 1f\r\nG: 2\r\nB: a0\r\n]";
        let (out, outcome) = migrate_node(node);
        assert_eq!(outcome, MigrationOutcome::Migrated);
        assert_eq!(out, ";B[cc]RZ[1f][2][a0]C[solver_status: win\r\n]");
        for ch in ALL_CHANNELS {
            assert!(!out.contains(ch.tag()));
        }
        assert_eq!(out.matches("RZ[").count(), 1);
    }

    #[test]
    fn missing_channels_default_to_zero() {
        let node = ";W[aa]C[G: ff\n]";
        let (out, outcome) = migrate_node(node);
        assert_eq!(outcome, MigrationOutcome::Migrated);
        assert_eq!(out, ";W[aa]RZ[0][ff][0]C[]");
    }

    #[test]
    fn node_without_channels_is_untouched() {
        let node = ";B[aa]RZ[1][2][3]C[p = 0.5\n]";
        let (out, outcome) = migrate_node(node);
        assert_eq!(outcome, MigrationOutcome::Absent);
        assert_eq!(out, node);
    }

    #[test]
    fn pass_move_still_anchors_the_field() {
        let (out, _) = migrate_node(";B[]C[R: 3\n]");
        assert_eq!(out, ";B[]RZ[3][0][0]C[]");
    }

    #[test]
    fn node_without_move_field_loses_channel_lines() {
        let node = "(;FF[4]SZ[9]C[R: 1\r\nG: 2\r\nB: 3\r\n]";
        let (out, outcome) = migrate_node(node);
        assert_eq!(outcome, MigrationOutcome::NoMoveField);
        assert_eq!(out, "(;FF[4]SZ[9]C[]");
        for ch in ALL_CHANNELS {
            assert!(!out.contains(ch.tag()));
        }
        assert!(!out.contains("RZ["));
    }

    #[test]
    fn channel_payloads_are_trimmed() {
        assert_eq!(combined_field("C[R: 1f \nB:  3\n]").as_deref(), Some("RZ[1f][0][3]"));
        assert_eq!(combined_field("C[G:  a0\t\n]").as_deref(), Some("RZ[0][a0][0]"));
        let (out, _) = migrate_node(";B[aa]C[R: 1f \n]");
        assert_eq!(out, ";B[aa]RZ[1f][0][0]C[]");
    }

    #[test]
    fn combined_field_keeps_empty_payloads() {
        assert_eq!(combined_field("C[R: \n]").as_deref(), Some("RZ[][0][0]"));
        assert_eq!(combined_field("C[nothing]"), None);
    }
}
