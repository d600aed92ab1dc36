//! Record-level SGF scanning.
//!
//! Only what the rewriter needs: the `SZ[n]` board size declaration and the
//! split of a record into nodes. A node is an optional `(`, a `;`, and every
//! following character up to the next `;`.

/// Finds the first `SZ[n]` declaration with `n` a positive decimal integer.
///
/// Values too large for `usize` saturate so callers reject them as unsupported.
pub fn find_board_size(text: &str) -> Option<usize> {
    for (idx, _) in text.match_indices("SZ[") {
        let rest = &text[idx + 3..];
        let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        let digits = &rest[..digits_len];
        if digits.is_empty() || digits.starts_with('0') {
            continue;
        }
        if rest[digits_len..].starts_with(']') {
            return Some(digits.parse().unwrap_or(usize::MAX));
        }
    }
    None
}

/// A record split into the text before its first node and the nodes themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitRecord<'a> {
    /// Text preceding the first node; carried through untouched.
    pub prefix: &'a str,
    /// Nodes in document order. Concatenated after `prefix` they rebuild the input.
    pub nodes: Vec<&'a str>,
}

/// Splits a record into nodes.
pub fn split_nodes(text: &str) -> SplitRecord<'_> {
    let Some(first) = text.find(';') else {
        return SplitRecord {
            prefix: text,
            nodes: Vec::new(),
        };
    };
    let start = if first > 0 && text.as_bytes()[first - 1] == b'(' {
        first - 1
    } else {
        first
    };

    let mut nodes = Vec::new();
    let mut pos = start;
    let mut marker = first;
    while pos < text.len() {
        let end = text[marker + 1..]
            .find(';')
            .map_or(text.len(), |i| marker + 1 + i);
        nodes.push(&text[pos..end]);
        pos = end;
        marker = end;
    }

    SplitRecord {
        prefix: &text[..start],
        nodes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_first_size() {
        assert_eq!(find_board_size("(;FF[4]SZ[9]KM[7])"), Some(9));
        assert_eq!(find_board_size("(;SZ[19];B[aa]SZ[7])"), Some(19));
    }

    #[test]
    fn skips_zero_and_malformed_sizes() {
        assert_eq!(find_board_size("(;SZ[0])"), None);
        assert_eq!(find_board_size("(;SZ[09])"), None);
        assert_eq!(find_board_size("(;SZ[9x]SZ[7])"), Some(7));
        assert_eq!(find_board_size("(;SZ[])"), None);
        assert_eq!(find_board_size("(;FF[4])"), None);
    }

    #[test]
    fn splits_nodes_in_order() {
        let rec = split_nodes("(;FF[4]SZ[9];B[aa];W[bb])");
        assert_eq!(rec.prefix, "");
        assert_eq!(rec.nodes, vec!["(;FF[4]SZ[9]", ";B[aa]", ";W[bb])"]);
    }

    #[test]
    fn inner_branch_paren_stays_with_previous_node() {
        let rec = split_nodes("(;SZ[9](;B[aa])(;B[bb]))");
        assert_eq!(rec.nodes, vec!["(;SZ[9](", ";B[aa])(", ";B[bb]))"]);
    }

    #[test]
    fn leading_text_is_kept_as_prefix() {
        let text = "\n\n(;SZ[9];B[aa])";
        let rec = split_nodes(text);
        assert_eq!(rec.prefix, "\n\n");
        assert_eq!(rec.nodes.len(), 2);
        let rebuilt: String = std::iter::once(rec.prefix).chain(rec.nodes).collect();
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn text_without_nodes_is_all_prefix() {
        let rec = split_nodes("no nodes here");
        assert_eq!(rec.prefix, "no nodes here");
        assert!(rec.nodes.is_empty());
    }

    #[test]
    fn single_bare_node() {
        let rec = split_nodes(";B[ab]");
        assert_eq!(rec.prefix, "");
        assert_eq!(rec.nodes, vec![";B[ab]"]);
    }
}
