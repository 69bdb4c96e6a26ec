// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Diagnostics and the per-category tallies they're counted in

use mal_core::{Category, ErrorKind, Opcode, Severity, WarningKind};
use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::ops::Range;

/// The category of a [`Diagnostic`], which also determines its [`Severity`]
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub enum DiagnosticKind {
    /// An error, which makes the program invalid
    Error(ErrorKind),
    /// A warning
    Warning(WarningKind),
}

impl DiagnosticKind {
    /// The severity of this kind of diagnostic
    #[must_use]
    pub fn severity(self) -> Severity {
        match self {
            DiagnosticKind::Error(_) => Severity::Error,
            DiagnosticKind::Warning(_) => Severity::Warning,
        }
    }

    /// The category name, as listed in report footers
    #[must_use]
    pub fn category(self) -> &'static str {
        match self {
            DiagnosticKind::Error(kind) => kind.name(),
            DiagnosticKind::Warning(kind) => kind.name(),
        }
    }
}

impl From<ErrorKind> for DiagnosticKind {
    fn from(kind: ErrorKind) -> Self {
        DiagnosticKind::Error(kind)
    }
}

impl From<WarningKind> for DiagnosticKind {
    fn from(kind: WarningKind) -> Self {
        DiagnosticKind::Warning(kind)
    }
}

/// The operand count an instruction should have had
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct ExpectedOperands {
    /// The opcode of the instruction
    pub opcode: Opcode,
    /// How many operands it takes
    pub count: usize,
}

impl Display for ExpectedOperands {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.count == 1 { "operand" } else { "operands" };
        write!(f, "{} {noun} expected for {}", self.count, self.opcode)
    }
}

/// A problem found on a single line
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Diagnostic {
    /// What kind of problem it is
    pub kind: DiagnosticKind,
    /// The number of the line it was found on
    pub line: usize,
    /// The offending text, as written
    pub subject: String,
    /// For operand count errors, what was expected
    pub expected: Option<ExpectedOperands>,
    /// Byte range of the offending text within the normalized line, if known
    pub span: Option<Range<usize>>,
}

impl Diagnostic {
    /// Create a new [`Diagnostic`] with no span
    pub fn new(kind: impl Into<DiagnosticKind>, line: usize, subject: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            line,
            subject: subject.into(),
            expected: None,
            span: None,
        }
    }

    /// Create an operand count error for `opcode`
    #[must_use]
    pub fn operand_count(kind: ErrorKind, line: usize, opcode: Opcode) -> Self {
        Self {
            expected: Some(ExpectedOperands {
                opcode,
                count: opcode.arity(),
            }),
            ..Self::new(kind, line, opcode.mnemonic())
        }
    }

    /// Attach a span to the diagnostic
    #[must_use]
    pub fn with_span(mut self, span: Range<usize>) -> Self {
        self.span = Some(span);
        self
    }

    /// The severity of the diagnostic
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }

    /// Whether the diagnostic is an error
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    /// The category name of the diagnostic
    #[must_use]
    pub fn category(&self) -> &'static str {
        self.kind.category()
    }

    /// The message without the surrounding `** severity: ... **` decoration
    #[must_use]
    pub fn message(&self) -> String {
        let subject = &self.subject;
        match self.kind {
            DiagnosticKind::Error(kind) => match kind {
                ErrorKind::InvalidOpcode => format!("invalid opcode {subject}"),
                ErrorKind::IllFormedLiteral => {
                    format!("ill-formed literal {subject} (not an octal number)")
                }
                ErrorKind::IdentifierTooLong => {
                    format!("ill-formed identifier {subject} (too long)")
                }
                ErrorKind::IdentifierNonLetter => {
                    format!("ill-formed identifier {subject} (contains non-letter character)")
                }
                ErrorKind::IllFormedRegister => format!("invalid register {subject} (not R0-R7)"),
                ErrorKind::LabelTooLong => format!("ill-formed label {subject} (too long)"),
                ErrorKind::LabelNonLetter => {
                    format!("ill-formed label {subject} (contains non-letter character)")
                }
                ErrorKind::TooFewOperands | ErrorKind::TooManyOperands => {
                    let summary = if kind == ErrorKind::TooFewOperands {
                        "too few operands"
                    } else {
                        "too many operands"
                    };
                    match self.expected {
                        Some(expected) => format!("{summary} ({expected})"),
                        None => format!("{summary} for {subject}"),
                    }
                }
            },
            DiagnosticKind::Warning(WarningKind::BranchToMissingLabel) => {
                format!("branch to missing label {subject}")
            }
            DiagnosticKind::Warning(WarningKind::LabelNotBranchedTo) => {
                format!("label {subject} is not branched to")
            }
        }
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "** {}: {} **", self.severity(), self.message())
    }
}

/// A count for every member of a [`Category`]
///
/// Every member starts out present with a count of zero, and counts only ever go up.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Tally<K: Category> {
    counts: BTreeMap<K, usize>,
}

impl<K: Category> Default for Tally<K> {
    fn default() -> Self {
        Self {
            counts: K::ALL.iter().map(|&kind| (kind, 0)).collect(),
        }
    }
}

impl<K: Category> Tally<K> {
    /// Create a [`Tally`] with every category at zero
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more occurrence of `kind`
    pub fn increment(&mut self, kind: K) {
        *self.counts.entry(kind).or_default() += 1;
    }

    /// The count for `kind`
    #[must_use]
    pub fn get(&self, kind: K) -> usize {
        self.counts.get(&kind).copied().unwrap_or_default()
    }

    /// The sum of every count
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Every category and its count, in category order
    pub fn iter(&self) -> impl Iterator<Item = (K, usize)> + '_ {
        self.counts.iter().map(|(&kind, &count)| (kind, count))
    }

    /// Categories with a non-zero count, in category order
    pub fn nonzero(&self) -> impl Iterator<Item = (K, usize)> + '_ {
        self.iter().filter(|&(_, count)| count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operand_count_grammar() {
        let one = Diagnostic::operand_count(ErrorKind::TooManyOperands, 1, Opcode::Inc);
        assert_eq!(
            one.to_string(),
            "** error: too many operands (1 operand expected for INC) **"
        );
        let three = Diagnostic::operand_count(ErrorKind::TooFewOperands, 1, Opcode::Add);
        assert_eq!(
            three.to_string(),
            "** error: too few operands (3 operands expected for ADD) **"
        );
        let zero = Diagnostic::operand_count(ErrorKind::TooManyOperands, 1, Opcode::End);
        assert_eq!(
            zero.to_string(),
            "** error: too many operands (0 operands expected for END) **"
        );
    }

    #[test]
    fn rendered_warnings() {
        let missing = Diagnostic::new(WarningKind::BranchToMissingLabel, 4, "NOWHERE");
        assert_eq!(
            missing.to_string(),
            "** warning: branch to missing label NOWHERE **"
        );
        assert!(!missing.is_error());
        assert_eq!(missing.category(), "branch to missing label");
    }

    #[test]
    fn tally_is_seeded() {
        let mut tally = Tally::<ErrorKind>::new();
        assert_eq!(tally.iter().count(), ErrorKind::ALL.len());
        assert_eq!(tally.total(), 0);
        tally.increment(ErrorKind::TooManyOperands);
        tally.increment(ErrorKind::InvalidOpcode);
        tally.increment(ErrorKind::TooManyOperands);
        assert_eq!(tally.total(), 3);
        assert_eq!(
            tally.nonzero().collect::<Vec<_>>(),
            [(ErrorKind::InvalidOpcode, 1), (ErrorKind::TooManyOperands, 2)]
        );
    }
}
