// src/tests/mod.rs

//! Tests for _scnpmlib_.
//!
//! Tests are placed at `src/tests/`, inside the `scnpmlib`. This is a
//! reasonable trade-off of separation and access.
//!
//! Tests placed at top-level path `tests/` do not have crate-internal
//! visibility. The forced-error hooks and the internal constructors are
//! only reachable from here.

pub mod common;
pub mod errors_tests;
pub mod fields_tests;
pub mod matches_tests;
pub mod nftsession_tests;
