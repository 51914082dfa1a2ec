// src/tests/common.rs

//! Common helpers and availability checks for tests.
//!
//! Tests that need a live journal or a live nftables context check one of
//! the `*_NOT_AVAILABLE` values and return early when the host cannot
//! provide it (containers, non-root CI runners, non-systemd hosts).

use std::path::Path;
use std::time::{
    SystemTime,
    UNIX_EPOCH,
};

use ::lazy_static::lazy_static;
use ::nix::unistd::geteuid;

use crate::libload::nftables_dlopen2::load_library_nftables;
use crate::libload::systemd_dlopen2::load_library_systemd;
use crate::sessions::journalsession::{
    JournalSession,
    TailPosition,
};
use crate::sessions::nftsession::NftSession;

/// Socket that `sd_journal_sendv` writes to.
pub const JOURNALD_SOCKET: &str = "/run/systemd/journal/socket";

lazy_static! {
    /// `libsystemd` cannot be loaded.
    pub static ref SYSTEMD_NOT_AVAILABLE: bool = !load_library_systemd().is_ok();

    /// The local journal cannot be opened.
    pub static ref JOURNAL_NOT_AVAILABLE: bool = {
        *SYSTEMD_NOT_AVAILABLE
            || JournalSession::open(["MESSAGE"], TailPosition::NewOnly).is_err()
    };

    /// Entries cannot be sent to journald, or would not be read back.
    pub static ref JOURNALD_NOT_AVAILABLE: bool = {
        *JOURNAL_NOT_AVAILABLE || !Path::new(JOURNALD_SOCKET).exists()
    };

    /// `libnftables` cannot be loaded or a context cannot be created.
    pub static ref NFTABLES_NOT_AVAILABLE: bool = {
        !load_library_nftables().is_ok() || NftSession::init().is_err()
    };

    /// Rule changes cannot be committed: not root, or the kernel refuses
    /// a harmless listing.
    pub static ref NFTABLES_LIVE_NOT_AVAILABLE: bool = {
        if *NFTABLES_NOT_AVAILABLE || !geteuid().is_root() {
            true
        } else {
            match NftSession::init() {
                Ok(mut session) => session.apply("list tables").is_err(),
                Err(_) => true,
            }
        }
    };
}

/// A value unique to this test run, for tagging journal entries and
/// nftables tables.
pub fn unique_id(prefix: &str) -> String {
    let nanos = match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_nanos(),
        Err(_) => 0,
    };

    format!("{}_{}_{}", prefix, std::process::id(), nanos)
}
