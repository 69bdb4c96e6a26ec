// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Core types used throughout the MAL workspace
//!
//! This crate holds the instruction catalog for MAL, along with the small predicates and
//! diagnostic categories that every other part of the workspace agrees on.
#![warn(missing_docs)]

use std::error::Error;
use std::fmt::{self, Debug, Display};
use std::str::FromStr;
use unicode_general_category::{GeneralCategory, get_general_category};

/// The longest identifier or label name that MAL accepts
pub const MAX_IDENT_LEN: usize = 5;

/// The syntactic category expected at one operand position of an instruction
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub enum OperandKind {
    /// One of the eight registers, `R0` through `R7`
    Register,
    /// An octal literal value
    #[doc(alias = "V")]
    LiteralOctal,
    /// An identifier naming a value to read from
    #[doc(alias = "S")]
    SourceIdent,
    /// An identifier naming a location to write to
    #[doc(alias = "D")]
    DestIdent,
    /// A branch target
    #[doc(alias = "LAB")]
    Label,
}

impl Display for OperandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperandKind::Register => write!(f, "register"),
            OperandKind::LiteralOctal => write!(f, "octal literal"),
            OperandKind::SourceIdent => write!(f, "source identifier"),
            OperandKind::DestIdent => write!(f, "destination identifier"),
            OperandKind::Label => write!(f, "label"),
        }
    }
}

/// A MAL opcode
///
/// Each opcode has a fixed, ordered list of [operand kinds](OperandKind), available through
/// [`Opcode::operands`].
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Copy, Clone)]
pub enum Opcode {
    /// `LOAD R, S` - load the value of an identifier into a register
    Load,
    /// `LOADI R, V` - load an octal literal into a register
    Loadi,
    /// `STORE R, D` - store a register's value into an identifier
    Store,
    /// `ADD R, R, R`
    Add,
    /// `SUB R, R, R`
    Sub,
    /// `INC R`
    Inc,
    /// `DEC R`
    Dec,
    /// `BEQ R, R, LAB` - branch if equal
    Beq,
    /// `BLT R, R, LAB` - branch if less than
    Blt,
    /// `BGT R, R, LAB` - branch if greater than
    Bgt,
    /// `BR LAB` - unconditional branch
    Br,
    /// `NOOP`
    Noop,
    /// `END`
    End,
}

impl Opcode {
    /// Every opcode, in catalog order
    pub const ALL: [Opcode; 13] = [
        Opcode::Load,
        Opcode::Loadi,
        Opcode::Store,
        Opcode::Add,
        Opcode::Sub,
        Opcode::Inc,
        Opcode::Dec,
        Opcode::Beq,
        Opcode::Blt,
        Opcode::Bgt,
        Opcode::Br,
        Opcode::Noop,
        Opcode::End,
    ];

    /// The canonical (upper-case) mnemonic
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Load => "LOAD",
            Opcode::Loadi => "LOADI",
            Opcode::Store => "STORE",
            Opcode::Add => "ADD",
            Opcode::Sub => "SUB",
            Opcode::Inc => "INC",
            Opcode::Dec => "DEC",
            Opcode::Beq => "BEQ",
            Opcode::Blt => "BLT",
            Opcode::Bgt => "BGT",
            Opcode::Br => "BR",
            Opcode::Noop => "NOOP",
            Opcode::End => "END",
        }
    }

    /// The operand kinds this opcode expects, in order
    ///
    /// ```
    /// use mal_core::{Opcode, OperandKind};
    /// assert_eq!(
    ///     Opcode::Beq.operands(),
    ///     &[OperandKind::Register, OperandKind::Register, OperandKind::Label]
    /// );
    /// assert!(Opcode::End.operands().is_empty());
    /// ```
    #[must_use]
    pub const fn operands(self) -> &'static [OperandKind] {
        use OperandKind::{DestIdent, Label, LiteralOctal, Register, SourceIdent};
        match self {
            Opcode::Load => &[Register, SourceIdent],
            Opcode::Loadi => &[Register, LiteralOctal],
            Opcode::Store => &[Register, DestIdent],
            Opcode::Add | Opcode::Sub => &[Register, Register, Register],
            Opcode::Inc | Opcode::Dec => &[Register],
            Opcode::Beq | Opcode::Blt | Opcode::Bgt => &[Register, Register, Label],
            Opcode::Br => &[Label],
            Opcode::Noop | Opcode::End => &[],
        }
    }

    /// The number of operands this opcode expects
    #[must_use]
    pub const fn arity(self) -> usize {
        self.operands().len()
    }

    /// Look up an opcode by mnemonic, ignoring case
    ///
    /// ```
    /// use mal_core::Opcode;
    /// assert_eq!(Opcode::lookup("beq"), Some(Opcode::Beq));
    /// assert_eq!(Opcode::lookup("LoadI"), Some(Opcode::Loadi));
    /// assert_eq!(Opcode::lookup("BADOP"), None);
    /// ```
    #[must_use]
    pub fn lookup(name: &str) -> Option<Self> {
        let name = name.to_uppercase();
        Self::ALL.into_iter().find(|op| op.mnemonic() == name)
    }
}

impl Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

impl FromStr for Opcode {
    type Err = UnknownOpcode;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| UnknownOpcode(s.to_owned()))
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
/// A mnemonic did not name any opcode in the catalog
pub struct UnknownOpcode(pub String);

impl Display for UnknownOpcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown opcode {:?}", self.0)
    }
}

impl Error for UnknownOpcode {}

/// One of the eight MAL registers
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Copy, Clone)]
pub struct Register(u8);

impl Register {
    /// The number of registers
    pub const COUNT: u8 = 8;

    /// Parse a register name, ignoring case
    ///
    /// ```
    /// use mal_core::Register;
    /// assert_eq!(Register::parse("r0").map(Register::index), Some(0));
    /// assert_eq!(Register::parse("R7").map(Register::index), Some(7));
    /// assert_eq!(Register::parse("R8"), None);
    /// assert_eq!(Register::parse("R01"), None);
    /// ```
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.to_uppercase();
        (0..Self::COUNT)
            .map(Register)
            .find(|reg| reg.to_string() == token)
    }

    /// The register's index, from 0 to 7
    #[must_use]
    pub fn index(self) -> u8 {
        self.0
    }
}

impl Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}", self.0)
    }
}

/// The reason an identifier or label name is ill-formed
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum IdentError {
    /// Longer than [`MAX_IDENT_LEN`] characters
    TooLong,
    /// Contains something other than letters
    ///
    /// Letters are the characters in the Unicode letter categories (`Lu`, `Ll`, `Lt`, `Lm`,
    /// and `Lo`). Letter-like numbers such as `Ⅻ` and combining marks are not letters.
    NonLetter,
}

impl Display for IdentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentError::TooLong => write!(f, "too long"),
            IdentError::NonLetter => write!(f, "contains non-letter"),
        }
    }
}

impl Error for IdentError {}

/// Check that `ident` is a well-formed identifier
///
/// Length is checked before content, so a long name with digits in it is [too long].
///
/// ```
/// use mal_core::{IdentError, check_identifier};
/// assert_eq!(check_identifier("loop"), Ok(()));
/// assert_eq!(check_identifier("toolong"), Err(IdentError::TooLong));
/// assert_eq!(check_identifier("abc12345"), Err(IdentError::TooLong));
/// assert_eq!(check_identifier("x1"), Err(IdentError::NonLetter));
/// assert_eq!(check_identifier(""), Err(IdentError::NonLetter));
/// ```
///
/// # Errors
///
/// Returns the first [`IdentError`] that applies.
///
/// [too long]: IdentError::TooLong
pub fn check_identifier(ident: &str) -> Result<(), IdentError> {
    if ident.chars().count() > MAX_IDENT_LEN {
        Err(IdentError::TooLong)
    } else if ident.is_empty() || !ident.chars().all(is_letter) {
        Err(IdentError::NonLetter)
    } else {
        Ok(())
    }
}

fn is_letter(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
    )
}

/// Check whether `token` is a non-empty string of octal digits
#[must_use]
pub fn is_octal_literal(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| matches!(c, '0'..='7'))
}

/// How serious a diagnostic is
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Copy, Clone)]
pub enum Severity {
    /// Makes the program invalid
    Error,
    /// Reported, but doesn't affect validity
    Warning,
}

impl Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A category of diagnostic, with a fixed set of members
///
/// Implemented by [`ErrorKind`] and [`WarningKind`] so that tallies can be seeded with every
/// category up front.
pub trait Category: Copy + Ord + Debug + Display + 'static {
    /// Every member of the category, in report order
    const ALL: &'static [Self];
    /// The severity shared by every member
    const SEVERITY: Severity;
    /// The category's name as it appears in reports
    fn name(self) -> &'static str;
}

/// Categories of error
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Copy, Clone)]
pub enum ErrorKind {
    /// A line doesn't start with a label or a known opcode
    InvalidOpcode,
    /// A literal operand contains non-octal characters
    IllFormedLiteral,
    /// An identifier operand is longer than [`MAX_IDENT_LEN`]
    IdentifierTooLong,
    /// An identifier operand contains non-letter characters
    IdentifierNonLetter,
    /// A register operand isn't one of `R0` through `R7`
    IllFormedRegister,
    /// A label is longer than [`MAX_IDENT_LEN`]
    LabelTooLong,
    /// A label contains non-letter characters
    LabelNonLetter,
    /// An instruction has fewer operands than its opcode expects
    TooFewOperands,
    /// An instruction has more operands than its opcode expects
    TooManyOperands,
}

impl ErrorKind {
    /// The identifier error category for `err`
    #[must_use]
    pub fn identifier(err: IdentError) -> Self {
        match err {
            IdentError::TooLong => ErrorKind::IdentifierTooLong,
            IdentError::NonLetter => ErrorKind::IdentifierNonLetter,
        }
    }

    /// The label error category for `err`
    #[must_use]
    pub fn label(err: IdentError) -> Self {
        match err {
            IdentError::TooLong => ErrorKind::LabelTooLong,
            IdentError::NonLetter => ErrorKind::LabelNonLetter,
        }
    }
}

impl Category for ErrorKind {
    const ALL: &'static [Self] = &[
        ErrorKind::InvalidOpcode,
        ErrorKind::IllFormedLiteral,
        ErrorKind::IdentifierTooLong,
        ErrorKind::IdentifierNonLetter,
        ErrorKind::IllFormedRegister,
        ErrorKind::LabelTooLong,
        ErrorKind::LabelNonLetter,
        ErrorKind::TooFewOperands,
        ErrorKind::TooManyOperands,
    ];
    const SEVERITY: Severity = Severity::Error;

    fn name(self) -> &'static str {
        match self {
            ErrorKind::InvalidOpcode => "invalid opcode",
            ErrorKind::IllFormedLiteral => "ill-formed literal",
            ErrorKind::IdentifierTooLong => "ill-formed identifier (too long)",
            ErrorKind::IdentifierNonLetter => "ill-formed identifier (contains non-letter)",
            ErrorKind::IllFormedRegister => "ill-formed register",
            ErrorKind::LabelTooLong => "ill-formed label (too long)",
            ErrorKind::LabelNonLetter => "ill-formed label (contains non-letter)",
            ErrorKind::TooFewOperands => "too few operands",
            ErrorKind::TooManyOperands => "too many operands",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Categories of warning
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Copy, Clone)]
pub enum WarningKind {
    /// A branch names a label that is never defined
    BranchToMissingLabel,
    /// A label is defined but never used as a branch target
    LabelNotBranchedTo,
}

impl Category for WarningKind {
    const ALL: &'static [Self] = &[
        WarningKind::BranchToMissingLabel,
        WarningKind::LabelNotBranchedTo,
    ];
    const SEVERITY: Severity = Severity::Warning;

    fn name(self) -> &'static str {
        match self {
            WarningKind::BranchToMissingLabel => "branch to missing label",
            WarningKind::LabelNotBranchedTo => "label not branched to",
        }
    }
}

impl Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
