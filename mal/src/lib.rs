// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD
#![warn(missing_docs)]

//! Library for checking the syntax of MAL programs
//!
//! MAL is a small assembly-like teaching language with thirteen opcodes, eight registers, octal
//! literals, short alphabetic identifiers, and labels. This crate doesn't run MAL programs - it
//! reads them, finds every syntax problem it can, and reports on them.
//!
//! # Checking a program
//!
//! ```rust
//! use mal::check;
//!
//! let result = check(
//!     r#"; count down from 7
//! LOADI R1, 7
//! LOOP: DEC R1
//! BGT R1, R0, LOOP
//! END"#,
//! );
//!
//! assert!(result.is_valid());
//! assert_eq!(result.line_count(), 4);
//! assert_eq!(result.labels.get("loop").map(|l| l.reference_count), Some(1));
//! ```
//!
//! Problems don't stop checking. Each one becomes a [`Diagnostic`] attached to the line it was
//! found on, and counted by category:
//!
//! ```rust
//! use mal::{ErrorKind, WarningKind, check};
//!
//! let result = check("LOADI R1, 9\nBR GONE\nEND");
//!
//! assert!(!result.is_valid());
//! assert_eq!(result.errors.get(ErrorKind::IllFormedLiteral), 1);
//! assert_eq!(result.warnings.get(WarningKind::BranchToMissingLabel), 1);
//! assert_eq!(
//!     result.annotated(1).unwrap().rendered(),
//!     "LOADI R1, 9\n    ** error: ill-formed literal 9 (not an octal number) **"
//! );
//! ```
//!
//! # Reports
//!
//! The [`report`] module renders a [`CheckResult`] as a plain-text [`SyntaxReport`] with
//! listings of the original, stripped, and annotated program.
//!
//! [`SyntaxReport`]: report::SyntaxReport

mod check;
mod diagnostic;
mod labels;
mod normalize;
pub mod report;
pub mod scan;
mod source;

pub use mal_core::{Category, ErrorKind, Opcode, OperandKind, Severity, WarningKind};

pub use check::{AnnotatedLine, CheckOptions, CheckResult, Checker};
pub use diagnostic::{Diagnostic, DiagnosticKind, ExpectedOperands, Tally};
pub use labels::{LabelEntry, LabelTable};
pub use normalize::{COMMENT, CommentMode, normalize, normalize_text};
pub use source::{Line, NormalizedLine, SourceLine, source_lines};

/// Check `text` with the default [`CheckOptions`]
///
/// This is a thin convenience wrapper around [`source_lines`] and [`Checker::check`].
#[must_use]
pub fn check(text: &str) -> CheckResult {
    Checker::default().check(&source_lines(text))
}
