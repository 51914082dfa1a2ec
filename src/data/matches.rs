// src/data/matches.rs

//! The [`MatchExpression`] stack: an ordered record of match terms and the
//! conjunction/disjunction markers between them.
//!
//! A `MatchExpression` can be built offline and later replayed into a
//! journal session with
//! [`JournalSession::set_matches`]. A session also keeps one, recording
//! every term and marker the journal accepted.
//!
//! The structure follows the journal's own evaluator:
//!
//! - terms between markers form a group; within a group, terms for
//!   different fields are ANDed and terms for the same field are ORed
//! - a disjunction closes the group; groups are ORed
//! - a conjunction closes the ORed groups into a clause; clauses are ANDed
//! - an empty expression matches every entry
//!
//! [`JournalSession::set_matches`]: crate::sessions::journalsession::JournalSession::set_matches

use std::fmt;

use ::bstr::ByteSlice;

use crate::common::Bytes;
use crate::data::fields::FIELD_MID_U8;
use crate::errors::{
    Result,
    SessionError,
};

/// Longest match term the journal API accepts; its length parameter is a
/// C `int`.
pub const MATCH_TERM_LEN_MAX: usize = i32::MAX as usize;

/// Check a match term before it is recorded or passed to the journal.
///
/// An empty term or a term longer than [`MATCH_TERM_LEN_MAX`] is a
/// [`SessionError::Config`]. Terms are never truncated.
pub fn check_term_len(term: &[u8]) -> Result<()> {
    if term.is_empty() {
        return Err(SessionError::Config(String::from("match term is empty")));
    }
    if term.len() > MATCH_TERM_LEN_MAX {
        return Err(SessionError::Config(format!(
            "match term of {} bytes exceeds maximum {} bytes",
            term.len(),
            MATCH_TERM_LEN_MAX
        )));
    }

    Ok(())
}

/// The field name part of a `FIELD=value` term.
fn term_field(term: &[u8]) -> &[u8] {
    match term.find_byte(FIELD_MID_U8) {
        Some(at) => &term[..at],
        None => term,
    }
}

/// One element of a [`MatchExpression`].
#[derive(Clone, PartialEq, Eq)]
pub enum MatchOp {
    /// Literal `FIELD=value` bytes.
    Term(Bytes),
    Disjunction,
    Conjunction,
}

impl fmt::Debug for MatchOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MatchOp::Term(term) => write!(f, "Term({:?})", term.as_bstr()),
            MatchOp::Disjunction => write!(f, "Disjunction"),
            MatchOp::Conjunction => write!(f, "Conjunction"),
        }
    }
}

/// Terms of one group, in order.
pub type MatchGroup<'a> = Vec<&'a [u8]>;

/// ORed groups of one clause, in order.
pub type MatchClause<'a> = Vec<MatchGroup<'a>>;

/// Append-only sequence of [`MatchOp`]. [`clear`] resets it to
/// "match everything".
///
/// [`clear`]: MatchExpression::clear
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MatchExpression {
    ops: Vec<MatchOp>,
}

impl MatchExpression {
    pub fn new() -> MatchExpression {
        MatchExpression::default()
    }

    /// Append a term, builder style.
    pub fn term<T: AsRef<[u8]>>(mut self, term: T) -> Result<MatchExpression> {
        self.add_term(term.as_ref())?;

        Ok(self)
    }

    /// Append a disjunction marker, builder style.
    pub fn or(mut self) -> MatchExpression {
        self.add_disjunction();

        self
    }

    /// Append a conjunction marker, builder style.
    pub fn and(mut self) -> MatchExpression {
        self.add_conjunction();

        self
    }

    pub fn add_term(&mut self, term: &[u8]) -> Result<()> {
        check_term_len(term)?;
        self.ops.push(MatchOp::Term(term.to_vec()));

        Ok(())
    }

    pub fn add_disjunction(&mut self) {
        self.ops.push(MatchOp::Disjunction);
    }

    pub fn add_conjunction(&mut self) {
        self.ops.push(MatchOp::Conjunction);
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }

    pub fn ops(&self) -> &[MatchOp] {
        self.ops.as_slice()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Count of [`MatchOp::Term`].
    pub fn count_terms(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, MatchOp::Term(_)))
            .count()
    }

    /// The ANDed clauses, each a list of ORed groups. Empty groups and
    /// empty clauses are left out, as the journal ignores them.
    pub fn clauses(&self) -> Vec<MatchClause<'_>> {
        let mut clauses: Vec<MatchClause<'_>> = Vec::new();
        let mut clause: MatchClause<'_> = Vec::new();
        let mut group: MatchGroup<'_> = Vec::new();
        for op in self.ops.iter() {
            match op {
                MatchOp::Term(term) => group.push(term.as_slice()),
                MatchOp::Disjunction => {
                    if !group.is_empty() {
                        clause.push(std::mem::take(&mut group));
                    }
                }
                MatchOp::Conjunction => {
                    if !group.is_empty() {
                        clause.push(std::mem::take(&mut group));
                    }
                    if !clause.is_empty() {
                        clauses.push(std::mem::take(&mut clause));
                    }
                }
            }
        }
        if !group.is_empty() {
            clause.push(group);
        }
        if !clause.is_empty() {
            clauses.push(clause);
        }

        clauses
    }

    /// Every group of ANDed terms, in order, across all clauses.
    ///
    /// Without a conjunction marker this is the whole expression: the
    /// groups are ORed.
    pub fn groups(&self) -> Vec<MatchGroup<'_>> {
        self.clauses()
            .into_iter()
            .flatten()
            .collect()
    }

    /// Does an entry with raw field data `entry_data` (each item
    /// `FIELD=value`) satisfy this expression?
    pub fn evaluate(&self, entry_data: &[&[u8]]) -> bool {
        self.clauses()
            .iter()
            .all(|clause| {
                clause
                    .iter()
                    .any(|group| group_matches(group, entry_data))
            })
    }
}

/// For every field named in `group`, one of that field's terms equals an
/// item of `entry_data`.
fn group_matches(group: &[&[u8]], entry_data: &[&[u8]]) -> bool {
    group.iter().all(|term| {
        let field = term_field(term);
        group
            .iter()
            .filter(|other| term_field(other) == field)
            .any(|other| entry_data.iter().any(|data| data == other))
    })
}

impl fmt::Display for MatchExpression {
    /// Format like `journalctl` arguments, `A B + C`, with `*` for a
    /// conjunction.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for op in self.ops.iter() {
            if !first {
                write!(f, " ")?;
            }
            first = false;
            match op {
                MatchOp::Term(term) => write!(f, "{}", term.as_bstr())?,
                MatchOp::Disjunction => write!(f, "+")?,
                MatchOp::Conjunction => write!(f, "*")?,
            }
        }

        Ok(())
    }
}
