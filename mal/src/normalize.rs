// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Reduction of source lines to the lines that need checking

use crate::{NormalizedLine, SourceLine};

/// The comment marker
pub const COMMENT: char = ';';

/// Where an in-line comment is cut off
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone)]
pub enum CommentMode {
    /// Truncate exactly at the comment marker
    #[default]
    AtMarker,
    /// Also drop the character immediately before a comment marker that doesn't start the line
    ///
    /// This reproduces the listings produced by older versions of the checker, where
    /// `END;done` normalizes to `EN`.
    Legacy,
}

/// Strip a single line, returning [`None`] if nothing is left
///
/// Tabs are removed first, then the comment, then leading and trailing whitespace.
#[must_use]
pub fn normalize_text(text: &str, mode: CommentMode) -> Option<String> {
    let mut text = text.replace('\t', "");
    if let Some(index) = text.find(COMMENT) {
        let end = match mode {
            CommentMode::AtMarker => index,
            CommentMode::Legacy => text[..index]
                .char_indices()
                .next_back()
                .map_or(0, |(i, _)| i),
        };
        text.truncate(end);
    }
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Normalize every line in `original`, dropping those left empty
///
/// The result keeps each line's original number, so it's always an order-preserving subsequence
/// of `original`.
#[must_use]
pub fn normalize(original: &[SourceLine], mode: CommentMode) -> Vec<NormalizedLine> {
    original
        .iter()
        .filter_map(|line| {
            normalize_text(&line.text, mode).map(|text| NormalizedLine {
                number: line.number,
                text,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Line;

    #[test]
    fn comments_and_blanks() {
        let original = [
            Line::new(1, "; full-line comment"),
            Line::new(2, ""),
            Line::new(3, "   "),
            Line::new(4, "\tLOAD R1, X ; trailing"),
            Line::new(5, "  ; indented comment"),
            Line::new(6, "END;done"),
        ];
        assert_eq!(
            normalize(&original, CommentMode::AtMarker),
            [Line::new(4, "LOAD R1, X"), Line::new(6, "END")]
        );
    }

    #[test]
    fn legacy_truncation() {
        assert_eq!(
            normalize_text("END;done", CommentMode::Legacy).as_deref(),
            Some("EN")
        );
        assert_eq!(
            normalize_text("END ; done", CommentMode::Legacy).as_deref(),
            Some("END")
        );
        assert_eq!(normalize_text(";done", CommentMode::Legacy), None);
        assert_eq!(normalize_text("\t;done", CommentMode::Legacy), None);
        assert_eq!(normalize_text("x;", CommentMode::Legacy), None);
    }

    #[test]
    fn tabs_are_removed_not_replaced() {
        assert_eq!(
            normalize_text("LOAD\tR1,\tX", CommentMode::AtMarker).as_deref(),
            Some("LOADR1,X")
        );
    }

    #[test]
    fn numbers_are_preserved() {
        let original: Vec<_> = (1..=12)
            .map(|n| Line::new(n, if n % 3 == 0 { "NOOP" } else { "" }))
            .collect();
        let numbers: Vec<_> = normalize(&original, CommentMode::default())
            .into_iter()
            .map(|line| line.number)
            .collect();
        assert_eq!(numbers, [3, 6, 9, 12]);
    }
}
