// src/lib.rs

//! _scnpmlib_ is the native-library core of a journal-driven firewall
//! responder.
//!
//! It provides two sessions:
//!
//! - [`JournalSession`] tails the local systemd journal, filtered with
//!   the journal's own matches, and returns each new entry projected onto
//!   a fixed list of fields.
//! - [`NftSession`] applies nftables rule changes and returns the text
//!   `libnftables` produced, with dry-run support.
//!
//! A policy layer opens both, adds matches, then loops
//! wait, read, decide, and apply.
//!
//! Both `libsystemd` and `libnftables` are loaded at runtime with
//! [`dlopen2`]; neither is needed to build this crate.
//!
//! [`JournalSession`]: crate::sessions::journalsession::JournalSession
//! [`NftSession`]: crate::sessions::nftsession::NftSession
//! [`dlopen2`]: https://docs.rs/dlopen2/0.7.0/dlopen2/index.html

#![allow(non_camel_case_types)]

pub mod bindings;
pub mod common;
pub mod data;
pub mod debug;
pub mod errors;
pub mod libload;
pub mod sessions;
#[cfg(test)]
pub mod tests;
