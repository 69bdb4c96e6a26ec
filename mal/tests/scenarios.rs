// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Behavior of complete checks over small programs

use mal::{
    CheckOptions, Checker, CommentMode, Diagnostic, DiagnosticKind, ErrorKind, Opcode,
    OperandKind, WarningKind, check, source_lines,
};

fn only_diagnostic(src: &str) -> Diagnostic {
    let result = check(src);
    let mut diagnostics = result.diagnostics().cloned();
    let first = diagnostics.next().expect("no diagnostics");
    assert_eq!(diagnostics.next(), None, "more than one diagnostic for {src:?}");
    first
}

#[test]
fn labelled_loop() {
    let result = check("LOOP: ADD R1, R2, R3\nBR LOOP\nEND");
    assert_eq!((result.total_errors(), result.total_warnings()), (0, 0));
    assert!(result.is_valid());
    assert_eq!(result.labels.get("LOOP").unwrap().reference_count, 1);
}

#[test]
fn invalid_opcode() {
    let diagnostic = only_diagnostic("BADOP R1");
    assert_eq!(diagnostic.kind, DiagnosticKind::Error(ErrorKind::InvalidOpcode));
    assert_eq!(diagnostic.category(), "invalid opcode");
    assert_eq!(diagnostic.to_string(), "** error: invalid opcode BADOP **");
}

#[test]
fn non_octal_literal() {
    let diagnostic = only_diagnostic("LOADI R1, 9");
    assert_eq!(diagnostic.category(), "ill-formed literal");
    assert_eq!(diagnostic.subject, "9");
}

#[test]
fn too_many_operands_singular() {
    let diagnostic = only_diagnostic("INC R1, R2");
    assert_eq!(diagnostic.category(), "too many operands");
    assert_eq!(
        diagnostic.to_string(),
        "** error: too many operands (1 operand expected for INC) **"
    );
}

#[test]
fn branch_to_missing_label() {
    let result = check("BR NOWHERE");
    assert_eq!(result.total_warnings(), 1);
    assert_eq!(result.warnings.get(WarningKind::BranchToMissingLabel), 1);
    assert_eq!(result.warnings.get(WarningKind::LabelNotBranchedTo), 0);
    // NOWHERE is also too long to be a label
    assert_eq!(result.total_errors(), 1);
    assert_eq!(result.errors.get(ErrorKind::LabelTooLong), 1);

    let result = check("BR AWAY");
    assert_eq!((result.total_errors(), result.total_warnings()), (0, 1));
    assert_eq!(result.warnings.get(WarningKind::BranchToMissingLabel), 1);
    assert!(result.is_valid());
}

#[test]
fn label_too_long() {
    let result = check("TOOLONGLABEL: NOOP");
    assert_eq!(result.total_errors(), 1);
    assert_eq!(result.errors.get(ErrorKind::LabelTooLong), 1);
    // the line has an error, so the unused label isn't also warned about
    assert_eq!(result.total_warnings(), 0);
    assert_eq!(
        result.annotated[0].rendered(),
        "TOOLONGLABEL: NOOP\n    ** error: ill-formed label TOOLONGLABEL (too long) **"
    );
}

fn valid_operand(kind: OperandKind) -> &'static str {
    match kind {
        OperandKind::Register => "R1",
        OperandKind::LiteralOctal => "17",
        OperandKind::SourceIdent | OperandKind::DestIdent => "X",
        OperandKind::Label => "L",
    }
}

fn instruction(opcode: Opcode, operands: &[&str]) -> String {
    format!("L: NOOP\n{opcode} {}\nBR L", operands.join(", "))
}

#[test]
fn operand_counts() {
    for opcode in Opcode::ALL {
        let n = opcode.arity();
        let noun = if n == 1 { "operand" } else { "operands" };
        let mut operands: Vec<_> = opcode.operands().iter().copied().map(valid_operand).collect();

        let exact = check(&instruction(opcode, &operands));
        assert!(exact.is_valid(), "{opcode} with {n} operands: {exact:#?}");

        operands.push("R1");
        let diagnostic = only_diagnostic(&instruction(opcode, &operands));
        assert_eq!(
            diagnostic.to_string(),
            format!("** error: too many operands ({n} {noun} expected for {opcode}) **")
        );

        operands.truncate(n);
        if let Some(n_minus_one) = n.checked_sub(1) {
            operands.truncate(n_minus_one);
            let diagnostic = only_diagnostic(&instruction(opcode, &operands));
            assert_eq!(
                diagnostic.to_string(),
                format!("** error: too few operands ({n} {noun} expected for {opcode}) **")
            );
        }
    }
}

#[test]
fn one_diagnostic_per_bad_instruction() {
    for src in ["ADD R8, R9, RX", "BEQ R9, R1, 123", "LOAD RA, X1", "STORE R1, 1234567"] {
        let result = check(src);
        assert_eq!(result.diagnostics().count(), 1, "{src}");
        assert_eq!(result.total_errors(), 1, "{src}");
    }
}

#[test]
fn problems_on_later_operands() {
    assert_eq!(only_diagnostic("ADD R1, R2, R9").subject, "R9");
    assert_eq!(only_diagnostic("LOAD R1, VALUE1").category(), "ill-formed identifier (too long)");
    assert_eq!(
        only_diagnostic("STORE R1, X_Y").category(),
        "ill-formed identifier (contains non-letter)"
    );
    let result = check("BEQ R1, R2, L2");
    let categories: Vec<_> = result.diagnostics().map(Diagnostic::category).collect();
    assert_eq!(
        categories,
        ["ill-formed label (contains non-letter)", "branch to missing label"]
    );
}

#[test]
fn case_insensitivity() {
    let result = check("Loop: inc r0\nbeq R0, r1, loop\nBr LOOP\nEnD");
    assert!(result.is_valid());
    assert_eq!(result.total_warnings(), 0);
    assert_eq!(result.labels.get("lOoP").unwrap().reference_count, 2);
}

#[test]
fn labels_match_under_full_case_folding() {
    let result = check("ß: NOOP\nBR SS\nEND");
    assert_eq!((result.total_errors(), result.total_warnings()), (0, 0));
    assert_eq!(result.labels.get("ss").unwrap().reference_count, 1);
}

#[test]
fn letter_numbers_are_not_letters() {
    let diagnostic = only_diagnostic("LOAD R1, \u{216b}");
    assert_eq!(diagnostic.category(), "ill-formed identifier (contains non-letter)");
    assert!(check("LOAD R1, Ωmega").is_valid());
}

#[test]
fn unused_label() {
    let result = check("START: NOOP\nEND");
    assert_eq!(result.warnings.get(WarningKind::LabelNotBranchedTo), 1);
    let line = result.annotated(1).unwrap();
    assert_eq!(
        line.rendered(),
        "START: NOOP\n    ** warning: label START is not branched to **"
    );
}

#[test]
fn warnings_do_not_affect_validity() {
    let result = check("A: NOOP\nB: NOOP\nBR C\nEND");
    assert_eq!(result.total_warnings(), 3);
    assert!(result.is_valid());

    let result = check("A: NOOP\nBR A\nEND R1");
    assert_eq!(result.total_warnings(), 0);
    assert!(!result.is_valid());
}

#[test]
fn normalized_is_a_subsequence() {
    let src = "; header\n\n\tLOAD R1, X\n   \nEND ; done\n;\n";
    let result = check(src);
    assert!(result.normalized.len() <= result.original.len());
    let numbers: Vec<_> = result.normalized.iter().map(|l| l.number).collect();
    assert_eq!(numbers, [3, 5]);
    for line in &result.normalized {
        assert!(result.original.iter().any(|o| o.number == line.number));
    }
    let annotated: Vec<_> = result.annotated.iter().map(|l| l.number).collect();
    assert_eq!(annotated, numbers);
}

#[test]
fn checker_reuse_is_isolated() {
    let checker = Checker::default();
    let lines = source_lines("LOOP: NOOP\nBR LOOP\nBR LOOP\nXYZ");
    let first = checker.check(&lines);
    let second = checker.check(&lines);
    for result in [&first, &second] {
        assert_eq!(result.total_errors(), 1);
        assert_eq!(result.labels.get("loop").unwrap().reference_count, 2);
    }
    assert!(checker.check(&source_lines("END")).labels.is_empty());
}

#[test]
fn comment_modes() {
    let lines = source_lines("LOOP: INC R1;bump\nBR LOOP ; back\nEND");

    let exact = Checker::default().check(&lines);
    assert!(exact.is_valid());

    let legacy = Checker::new(CheckOptions {
        comment_mode: CommentMode::Legacy,
    })
    .check(&lines);
    assert_eq!(legacy.normalized[0].text, "LOOP: INC R");
    assert_eq!(legacy.normalized[1].text, "BR LOOP");
    assert_eq!(legacy.errors.get(ErrorKind::IllFormedRegister), 1);
}

#[test]
fn empty_program_is_valid() {
    let result = check("");
    assert!(result.is_valid());
    assert_eq!(result.line_count(), 0);
    assert!(result.annotated.is_empty());
}
