// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Rendering diagnostics to STDERR with [`ariadne`]
//!
//! Diagnostic spans point into the stripped text of each line, so reports are rendered against a
//! copy of the source where every line is replaced with its stripped text. Lines that were
//! dropped entirely become blank, so line numbers still match the original file.

use ariadne::{Color, Config, Fmt, IndexType, Label, Report, ReportKind, Source};
use itertools::Itertools;
use mal::{CheckResult, Diagnostic, Severity};
use std::io;
use std::ops::Range;

/// The stripped program, laid out with the same line numbers as the original
#[derive(Debug, PartialEq, Eq)]
struct StrippedSource {
    text: String,
    /// Byte offset of the start of each line, indexed by line number minus one
    line_starts: Vec<usize>,
}

impl StrippedSource {
    fn new(result: &CheckResult) -> Self {
        let mut text = String::new();
        let mut line_starts = Vec::with_capacity(result.original.len());
        let mut normalized = result.normalized.iter().peekable();
        for line in &result.original {
            line_starts.push(text.len());
            if let Some(stripped) = normalized.next_if(|n| n.number == line.number) {
                text.push_str(&stripped.text);
            }
            text.push('\n');
        }
        Self { text, line_starts }
    }

    /// The span of `diagnostic` within the full text, or the whole line if it has no span
    fn span(&self, diagnostic: &Diagnostic, line_len: usize) -> Range<usize> {
        let start = self
            .line_starts
            .get(diagnostic.line.wrapping_sub(1))
            .copied()
            .unwrap_or_default();
        let relative = diagnostic.span.clone().unwrap_or(0..line_len);
        start + relative.start..start + relative.end
    }
}

fn build_report<'a>(
    file: &'a str,
    diagnostic: &Diagnostic,
    span: Range<usize>,
) -> Report<'a, (&'a str, Range<usize>)> {
    let (kind, color) = match diagnostic.severity() {
        Severity::Error => (ReportKind::Error, Color::Red),
        Severity::Warning => (ReportKind::Warning, Color::Yellow),
    };

    let mut builder = Report::build(kind, (file, span.clone()))
        .with_config(Config::default().with_index_type(IndexType::Byte))
        .with_message(diagnostic.message())
        .with_label(
            Label::new((file, span))
                .with_message(diagnostic.category().fg(color))
                .with_color(color),
        );

    if let Some(expected) = diagnostic.expected {
        let operands = expected.opcode.operands();
        builder = builder.with_note(if operands.is_empty() {
            format!("{} takes no operands", expected.opcode.fg(Color::Cyan))
        } else {
            format!(
                "{} takes {}",
                expected.opcode.fg(Color::Cyan),
                operands.iter().format(", ")
            )
        });
    }

    builder.finish()
}

/// Write a report for every diagnostic in `result` to STDERR
pub(crate) fn render(file: &str, result: &CheckResult) -> io::Result<()> {
    let stripped = StrippedSource::new(result);
    for line in &result.annotated {
        for diagnostic in line.diagnostics() {
            let span = stripped.span(diagnostic, line.text.len());
            build_report(file, diagnostic, span).eprint((file, Source::from(&stripped.text)))?;
        }
    }
    Ok(())
}
