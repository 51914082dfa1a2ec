// src/tests/matches_tests.rs

//! tests for `matches.rs`

#![allow(non_snake_case)]

use ::kinded::Kinded;
use ::test_case::test_case;

use crate::data::matches::{
    check_term_len,
    MatchExpression,
    MatchOp,
    MATCH_TERM_LEN_MAX,
};
use crate::errors::SessionErrorKind;

const UNIT_SSHD: &[u8] = b"_SYSTEMD_UNIT=sshd.service";
const UNIT_CRON: &[u8] = b"_SYSTEMD_UNIT=cron.service";
const PRIO_3: &[u8] = b"PRIORITY=3";
const PRIO_4: &[u8] = b"PRIORITY=4";

#[test]
fn test_check_term_len() {
    check_term_len(UNIT_SSHD).unwrap();
    assert_eq!(check_term_len(b"").unwrap_err().kind(), SessionErrorKind::Config);
    assert_eq!(MATCH_TERM_LEN_MAX, i32::MAX as usize);
}

#[test]
fn test_MatchExpression_builder_ops() {
    let expr = MatchExpression::new()
        .term(UNIT_SSHD).unwrap()
        .term(PRIO_3).unwrap()
        .or()
        .term(UNIT_CRON).unwrap()
        .and()
        .term(PRIO_4).unwrap();
    assert_eq!(
        expr.ops(),
        &[
            MatchOp::Term(UNIT_SSHD.to_vec()),
            MatchOp::Term(PRIO_3.to_vec()),
            MatchOp::Disjunction,
            MatchOp::Term(UNIT_CRON.to_vec()),
            MatchOp::Conjunction,
            MatchOp::Term(PRIO_4.to_vec()),
        ]
    );
    assert_eq!(expr.len(), 6);
    assert_eq!(expr.count_terms(), 4);
    assert_eq!(
        expr.to_string(),
        "_SYSTEMD_UNIT=sshd.service PRIORITY=3 + _SYSTEMD_UNIT=cron.service * PRIORITY=4"
    );
}

#[test]
fn test_MatchExpression_empty_term_rejected() {
    let mut expr = MatchExpression::new();
    let err = expr.add_term(b"").unwrap_err();
    assert_eq!(err.kind(), SessionErrorKind::Config);
    assert!(expr.is_empty());
}

#[test]
fn test_MatchExpression_groups() {
    let expr = MatchExpression::new()
        .term(UNIT_SSHD).unwrap()
        .term(PRIO_3).unwrap()
        .or()
        .term(UNIT_CRON).unwrap();
    let groups = expr.groups();
    assert_eq!(groups, vec![vec![UNIT_SSHD, PRIO_3], vec![UNIT_CRON]]);
    assert_eq!(expr.clauses().len(), 1);
}

#[test]
fn test_MatchExpression_groups_skip_empty() {
    let expr = MatchExpression::new()
        .or()
        .term(UNIT_SSHD).unwrap()
        .or()
        .or()
        .and();
    assert_eq!(expr.groups(), vec![vec![UNIT_SSHD]]);
    assert_eq!(expr.clauses().len(), 1);
}

#[test]
fn test_MatchExpression_clear() {
    let mut expr = MatchExpression::new().term(UNIT_SSHD).unwrap().or();
    expr.clear();
    assert!(expr.is_empty());
    assert!(expr.groups().is_empty());
    assert!(expr.evaluate(&[b"ANY=thing"]));
}

fn expr_a_or_b() -> MatchExpression {
    MatchExpression::new()
        .term(UNIT_SSHD).unwrap()
        .or()
        .term(PRIO_3).unwrap()
}

fn expr_a_and_b() -> MatchExpression {
    MatchExpression::new()
        .term(UNIT_SSHD).unwrap()
        .term(PRIO_3).unwrap()
}

fn expr_same_field() -> MatchExpression {
    MatchExpression::new()
        .term(UNIT_SSHD).unwrap()
        .term(UNIT_CRON).unwrap()
}

fn expr_conjunction() -> MatchExpression {
    MatchExpression::new()
        .term(UNIT_SSHD).unwrap()
        .or()
        .term(UNIT_CRON).unwrap()
        .and()
        .term(PRIO_3).unwrap()
        .or()
        .term(PRIO_4).unwrap()
}

#[test_case(MatchExpression::new(), &[], true; "empty matches everything")]
#[test_case(expr_a_or_b(), &[UNIT_SSHD], true; "or left")]
#[test_case(expr_a_or_b(), &[PRIO_3], true; "or right")]
#[test_case(expr_a_or_b(), &[UNIT_CRON], false; "or neither")]
#[test_case(expr_a_and_b(), &[UNIT_SSHD, PRIO_3], true; "and both")]
#[test_case(expr_a_and_b(), &[UNIT_SSHD], false; "and one")]
#[test_case(expr_a_and_b(), &[PRIO_3, b"MESSAGE=x"], false; "and other")]
#[test_case(expr_same_field(), &[UNIT_CRON], true; "same field ors")]
#[test_case(expr_conjunction(), &[UNIT_CRON, PRIO_4], true; "clauses both")]
#[test_case(expr_conjunction(), &[UNIT_CRON], false; "clauses first only")]
#[test_case(expr_conjunction(), &[PRIO_3], false; "clauses second only")]
fn test_MatchExpression_evaluate(
    expr: MatchExpression,
    entry_data: &[&[u8]],
    expect: bool,
) {
    assert_eq!(expr.evaluate(entry_data), expect, "{}", expr);
}
