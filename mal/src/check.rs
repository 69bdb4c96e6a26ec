// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! The line, instruction, and operand evaluator
//!
//! Checking happens in passes over the [normalized](crate::normalize) lines:
//!
//! 1. every label definition is collected into a [`LabelTable`]
//! 2. each line is checked in order, with branches counting references to their targets
//! 3. labels that were never branched to get a warning on their definition line
//!
//! Within an instruction, the operands are checked in order and checking stops at the first one
//! with a problem. That is the only problem reported for the line, except for a branch target,
//! which can be both ill-formed and missing from the label table.

use crate::diagnostic::{Diagnostic, DiagnosticKind, Tally};
use crate::labels::{LabelTable, label_name};
use crate::normalize::{CommentMode, normalize};
use crate::scan::{Word, operand_tokens, split_words};
use crate::source::listing_row;
use crate::{NormalizedLine, SourceLine};
use chumsky::span::Spanned;
use mal_core::{
    ErrorKind, Opcode, OperandKind, Register, WarningKind, check_identifier, is_octal_literal,
};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt::{self, Display};

/// Settings that affect how programs are checked
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone)]
pub struct CheckOptions {
    /// Where in-line comments are cut off
    pub comment_mode: CommentMode,
}

/// A normalized line along with the diagnostics found on it
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct AnnotatedLine {
    /// The line number in the original source
    pub number: usize,
    /// The normalized text of the line
    pub text: String,
    diagnostics: Vec<Diagnostic>,
    has_error: bool,
}

impl AnnotatedLine {
    fn new(line: &NormalizedLine) -> Self {
        Self {
            number: line.number,
            text: line.text.clone(),
            diagnostics: Vec::new(),
            has_error: false,
        }
    }

    fn push(&mut self, diagnostic: Diagnostic) {
        self.has_error |= diagnostic.is_error();
        self.diagnostics.push(diagnostic);
    }

    /// The diagnostics attached to this line, in the order they were found
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Whether any error is attached to this line
    #[must_use]
    pub fn has_error(&self) -> bool {
        self.has_error
    }

    /// The annotated text: the line, followed by each diagnostic on its own indented line
    ///
    /// ```
    /// let result = mal::check("INC R1, R2");
    /// assert_eq!(
    ///     result.annotated[0].rendered(),
    ///     "INC R1, R2\n    ** error: too many operands (1 operand expected for INC) **"
    /// );
    /// ```
    #[must_use]
    pub fn rendered(&self) -> String {
        let mut rendered = self.text.clone();
        for diagnostic in &self.diagnostics {
            rendered.push_str("\n    ");
            rendered.push_str(&diagnostic.to_string());
        }
        rendered
    }
}

impl Display for AnnotatedLine {
    /// Formats the line as a listing row, with the line number padded to two digits
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        listing_row(f, self.number, &self.rendered())
    }
}

/// Everything produced by checking a program
///
/// The result owns all of its data, and nothing in it is shared with the [`Checker`] that
/// produced it.
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// The program as read
    pub original: Vec<SourceLine>,
    /// The lines left after normalization
    pub normalized: Vec<NormalizedLine>,
    /// The normalized lines with their diagnostics
    pub annotated: Vec<AnnotatedLine>,
    /// Error counts by category
    pub errors: Tally<ErrorKind>,
    /// Warning counts by category
    pub warnings: Tally<WarningKind>,
    /// The labels defined in the program, with their final reference counts
    pub labels: LabelTable,
}

impl CheckResult {
    /// A program is valid if it has no errors; warnings don't count against it
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.total() == 0
    }

    /// The total number of errors
    #[must_use]
    pub fn total_errors(&self) -> usize {
        self.errors.total()
    }

    /// The total number of warnings
    #[must_use]
    pub fn total_warnings(&self) -> usize {
        self.warnings.total()
    }

    /// The number of lines left after normalization
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.normalized.len()
    }

    /// The annotated line with the given line number, if it survived normalization
    #[must_use]
    pub fn annotated(&self, number: usize) -> Option<&AnnotatedLine> {
        self.annotated
            .binary_search_by_key(&number, |line| line.number)
            .ok()
            .map(|index| &self.annotated[index])
    }

    /// Every diagnostic, in line order
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.annotated.iter().flat_map(AnnotatedLine::diagnostics)
    }
}

/// A reusable MAL syntax checker
///
/// A [`Checker`] only holds its [`CheckOptions`]. The label table and tallies are created fresh
/// for every call to [`Checker::check`], so checking one program never affects the next.
///
/// ```
/// use mal::{Checker, source_lines};
/// let checker = Checker::default();
/// let first = checker.check(&source_lines("BADOP R1"));
/// let second = checker.check(&source_lines("END"));
/// assert_eq!(first.total_errors(), 1);
/// assert!(second.is_valid());
/// ```
#[derive(Debug, Default, Clone)]
pub struct Checker {
    options: CheckOptions,
}

impl Checker {
    /// Create a new [`Checker`] using `options`
    #[must_use]
    pub fn new(options: CheckOptions) -> Self {
        Self { options }
    }

    /// The options this checker uses
    #[must_use]
    pub fn options(&self) -> CheckOptions {
        self.options
    }

    /// Check a program, given as numbered source lines
    #[must_use]
    pub fn check(&self, original: &[SourceLine]) -> CheckResult {
        let normalized = normalize(original, self.options.comment_mode);
        tracing::debug!(
            lines = original.len(),
            normalized = normalized.len(),
            "normalized program"
        );

        let mut run = Run {
            labels: LabelTable::discover(&normalized),
            errors: Tally::new(),
            warnings: Tally::new(),
        };

        let mut annotated: Vec<_> = normalized
            .iter()
            .map(|line| run.evaluate_line(line))
            .collect();
        run.flag_unused_labels(&mut annotated);

        tracing::debug!(
            errors = run.errors.total(),
            warnings = run.warnings.total(),
            "check complete"
        );

        CheckResult {
            original: original.to_vec(),
            normalized,
            annotated,
            errors: run.errors,
            warnings: run.warnings,
            labels: run.labels,
        }
    }
}

/// The state of a single call to [`Checker::check`]
struct Run {
    labels: LabelTable,
    errors: Tally<ErrorKind>,
    warnings: Tally<WarningKind>,
}

fn spanned_diagnostic(
    kind: impl Into<DiagnosticKind>,
    line: usize,
    word: &Word<'_>,
    subject: &str,
) -> Diagnostic {
    Diagnostic::new(kind, line, subject).with_span(word.span.into_range())
}

impl Run {
    fn record(&mut self, line: &mut AnnotatedLine, diagnostic: Diagnostic) {
        match diagnostic.kind {
            DiagnosticKind::Error(kind) => self.errors.increment(kind),
            DiagnosticKind::Warning(kind) => self.warnings.increment(kind),
        }
        line.push(diagnostic);
    }

    fn evaluate_line(&mut self, line: &NormalizedLine) -> AnnotatedLine {
        let mut annotated = AnnotatedLine::new(line);
        let words = split_words(&line.text);

        let problems = match words.first() {
            // normalization should never let an empty line through, but if one gets here it
            // can't start with a valid opcode
            None => vec![
                Diagnostic::new(ErrorKind::InvalidOpcode, line.number, "").with_span(0..0),
            ],
            Some(first) => {
                if let Some(label) = label_name(first.inner) {
                    match check_identifier(&label) {
                        Err(err) => vec![spanned_diagnostic(
                            ErrorKind::label(err),
                            line.number,
                            first,
                            &label,
                        )],
                        Ok(()) => {
                            let rest = &words[1..];
                            match rest.first().and_then(|word| Opcode::lookup(word.inner)) {
                                Some(opcode) => {
                                    self.evaluate_instruction(line.number, opcode, rest)
                                }
                                None => Vec::new(),
                            }
                        }
                    }
                } else if let Some(opcode) = Opcode::lookup(first.inner) {
                    self.evaluate_instruction(line.number, opcode, &words)
                } else {
                    vec![spanned_diagnostic(
                        ErrorKind::InvalidOpcode,
                        line.number,
                        first,
                        first.inner,
                    )]
                }
            }
        };

        for diagnostic in problems {
            tracing::trace!(line = line.number, %diagnostic);
            self.record(&mut annotated, diagnostic);
        }
        annotated
    }

    /// Check an instruction, where `words[0]` is the opcode
    ///
    /// Only the problems with the first bad operand are returned.
    fn evaluate_instruction(
        &mut self,
        line: usize,
        opcode: Opcode,
        words: &[Word<'_>],
    ) -> Vec<Diagnostic> {
        let Some((mnemonic, rest)) = words.split_first() else {
            return Vec::new();
        };
        let operands: Vec<_> = operand_tokens(rest).collect();
        let expected = opcode.operands();

        let count_error = match operands.len().cmp(&expected.len()) {
            Ordering::Less => Some(ErrorKind::TooFewOperands),
            Ordering::Greater => Some(ErrorKind::TooManyOperands),
            Ordering::Equal => None,
        };
        if let Some(kind) = count_error {
            let end = words.last().map_or(mnemonic.span.end, |word| word.span.end);
            return vec![
                Diagnostic::operand_count(kind, line, opcode).with_span(mnemonic.span.start..end),
            ];
        }

        expected
            .iter()
            .zip(&operands)
            .map(|(&kind, token)| self.evaluate_operand(line, kind, token))
            .find(|problems| !problems.is_empty())
            .unwrap_or_default()
    }

    /// Check one operand
    ///
    /// A label operand can have both an error and a warning, with the error first.
    fn evaluate_operand(
        &mut self,
        line: usize,
        kind: OperandKind,
        token: &Spanned<Cow<'_, str>>,
    ) -> Vec<Diagnostic> {
        let text = token.inner.as_ref();
        let diagnostic = |category: DiagnosticKind| {
            Diagnostic::new(category, line, text).with_span(token.span.into_range())
        };

        let error = match kind {
            OperandKind::Register => Register::parse(text)
                .is_none()
                .then_some(ErrorKind::IllFormedRegister),
            OperandKind::LiteralOctal => {
                (!is_octal_literal(text)).then_some(ErrorKind::IllFormedLiteral)
            }
            OperandKind::SourceIdent | OperandKind::DestIdent => {
                check_identifier(text).err().map(ErrorKind::identifier)
            }
            OperandKind::Label => check_identifier(text).err().map(ErrorKind::label),
        };
        let warning = (kind == OperandKind::Label && !self.labels.reference(text))
            .then_some(WarningKind::BranchToMissingLabel);

        error
            .map(DiagnosticKind::from)
            .into_iter()
            .chain(warning.map(DiagnosticKind::from))
            .map(diagnostic)
            .collect()
    }

    /// Warn about labels that were never branched to, unless their line already has an error
    fn flag_unused_labels(&mut self, annotated: &mut [AnnotatedLine]) {
        let unused: Vec<_> = self
            .labels
            .unreferenced()
            .map(|entry| (entry.definition_line, entry.name.clone()))
            .collect();

        for (number, name) in unused {
            let Ok(index) = annotated.binary_search_by_key(&number, |line| line.number) else {
                continue;
            };
            let line = &mut annotated[index];
            if line.has_error() {
                tracing::trace!(line = number, label = %name, "unused label warning suppressed");
                continue;
            }
            let mut warning = Diagnostic::new(WarningKind::LabelNotBranchedTo, number, name);
            if let Some(word) = split_words(&line.text).first() {
                warning = warning.with_span(word.span.into_range());
            }
            self.record(line, warning);
        }
    }
}
