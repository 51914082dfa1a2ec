// src/data/mod.rs

//! The `data` module is the plain data handled by the sessions:
//! the [`FieldProjection`] table, the projected [`LogEntry`] tuple, and the
//! [`MatchExpression`] stack.
//!
//! None of these touch a native library. They are built and checked
//! up-front so configuration errors surface before a journal handle is
//! opened.
//!
//! ## Definitions of data
//!
//! ### Field
//!
//! A journal entry is a set of structured fields, each retrieved from
//! `libsystemd` as raw bytes `FIELD=value`. The value may be any bytes,
//! including newlines and non-UTF-8 sequences.
//!
//! ### Projection
//!
//! The ordered field names requested by the caller, fixed when the
//! session opens. Each read returns exactly one value per projected field.
//!
//! ### Match term
//!
//! A literal `FIELD=value` byte string handed to the journal's own filter
//! evaluator.
//!
//! [`FieldProjection`]: crate::data::fields::FieldProjection
//! [`LogEntry`]: crate::data::entry::LogEntry
//! [`MatchExpression`]: crate::data::matches::MatchExpression

pub mod entry;
pub mod fields;
pub mod matches;
