// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Numbered lines of program text

use std::fmt::{self, Display};

/// A line of program text, along with its 1-based line number in the source
///
/// The same shape is used both for the [lines as read](SourceLine) and for the [lines left after
/// normalization](NormalizedLine), which keep the number of the line they came from.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Line {
    /// The 1-based line number within the source file
    pub number: usize,
    /// The text of the line, without any line terminator
    pub text: String,
}

/// A line exactly as it was read from the source
pub type SourceLine = Line;

/// A line with tabs, comments, and surrounding whitespace removed
pub type NormalizedLine = Line;

impl Line {
    /// Create a new [`Line`]
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }
}

impl Display for Line {
    /// Formats the line as a listing row, with the line number padded to two digits
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        listing_row(f, self.number, &self.text)
    }
}

pub(crate) fn listing_row(f: &mut impl fmt::Write, number: usize, text: &str) -> fmt::Result {
    if number < 10 {
        write!(f, "{number}.  {text}")
    } else {
        write!(f, "{number}. {text}")
    }
}

/// Split `text` into numbered [`SourceLine`]s
///
/// Every carriage return is removed, and a trailing newline does not produce an extra line.
///
/// ```
/// use mal::source_lines;
/// let lines = source_lines("LOOP: NOOP\r\n\r\nBR LOOP\n");
/// assert_eq!(lines.len(), 3);
/// assert_eq!(lines[0].text, "LOOP: NOOP");
/// assert_eq!(lines[1].text, "");
/// assert_eq!((lines[2].number, lines[2].text.as_str()), (3, "BR LOOP"));
/// ```
#[must_use]
pub fn source_lines(text: &str) -> Vec<SourceLine> {
    text.split_terminator('\n')
        .enumerate()
        .map(|(i, line)| Line::new(i + 1, line.replace('\r', "")))
        .collect()
}
