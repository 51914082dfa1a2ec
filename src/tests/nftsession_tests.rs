// src/tests/nftsession_tests.rs

//! tests for `nftsession.rs`
//!
//! Tests skip themselves when `libnftables` is missing. Tests that commit
//! rules also need root and a kernel with nftables; each works on its own
//! temporary table and deletes it.

#![allow(non_snake_case)]

use ::si_trace_print::defñ;

use crate::bindings::nftables_h::{
    NFT_CTX_OUTPUT_ECHO,
    NFT_CTX_OUTPUT_HANDLE,
    NFT_CTX_OUTPUT_NUMERIC_ALL,
    NFT_CTX_OUTPUT_TERSE,
};
use crate::common::Count;
use crate::sessions::nftsession::{
    NftSession,
    NFT_OUTPUT_FLAGS_DEFAULT,
};
use crate::tests::common::{
    unique_id,
    NFTABLES_LIVE_NOT_AVAILABLE,
    NFTABLES_NOT_AVAILABLE,
};

const CMD_INVALID: &str = "this is not an nft command";

fn table_name() -> String {
    // nft identifiers are limited in length; keep the pid and the low digits
    let id = unique_id("t");
    let tail: String = id.chars().rev().take(12).collect::<String>().chars().rev().collect();

    format!("scnpm_{}_{}", std::process::id(), tail)
}

fn cmd_add_table(table: &str) -> String {
    format!("add table inet {}", table)
}

fn cmd_add_chain_rule(table: &str) -> String {
    format!(
        "add chain inet {table} input {{ type filter hook input priority 0; policy accept; }}\n\
         add rule inet {table} input ip saddr 192.0.2.1 counter drop\n",
        table = table
    )
}

fn table_exists(session: &mut NftSession, table: &str) -> bool {
    match session.apply("list tables") {
        Ok(output) => output.contains(table),
        Err(err) => panic!("list tables failed: {}", err),
    }
}

#[test]
fn test_output_flags_default() {
    assert_eq!(
        NFT_OUTPUT_FLAGS_DEFAULT,
        NFT_CTX_OUTPUT_ECHO | NFT_CTX_OUTPUT_HANDLE | NFT_CTX_OUTPUT_NUMERIC_ALL | NFT_CTX_OUTPUT_TERSE
    );
}

#[test]
fn test_init_free() {
    if *NFTABLES_NOT_AVAILABLE {
        defñ!("skip");
        return;
    }
    let session = NftSession::init().unwrap();
    assert_eq!(session.output_flags(), NFT_OUTPUT_FLAGS_DEFAULT);
    assert!(!session.dry_run());
    session.free();
}

#[test]
fn test_set_dry_run() {
    if *NFTABLES_NOT_AVAILABLE {
        defñ!("skip");
        return;
    }
    let mut session = NftSession::init().unwrap();
    session.set_dry_run(true);
    assert!(session.dry_run());
    session.set_dry_run(false);
    assert!(!session.dry_run());
}

#[test]
fn test_apply_invalid_is_err_text() {
    if *NFTABLES_NOT_AVAILABLE {
        defñ!("skip");
        return;
    }
    let mut session = NftSession::init().unwrap();
    session.set_dry_run(true);
    let err = session.apply(CMD_INVALID).unwrap_err();
    assert!(!err.trim().is_empty());
    // the session is still usable and the error text does not leak
    let err2 = session.apply(CMD_INVALID).unwrap_err();
    assert_eq!(err, err2);
    let summary = session.summary();
    assert_eq!(summary.commands_applied, 2);
    assert_eq!(summary.commands_failed, 2);
    assert_eq!(summary.commands_dry_run, 2);
}

#[test]
fn test_apply_nul_is_err_text() {
    if *NFTABLES_NOT_AVAILABLE {
        defñ!("skip");
        return;
    }
    let mut session = NftSession::init().unwrap();
    let err = session.apply("list tables\0").unwrap_err();
    assert!(err.contains("NUL"), "{}", err);
    assert_eq!(session.summary().commands_failed, 1);
}

#[test]
fn test_apply_force_error() {
    if *NFTABLES_NOT_AVAILABLE {
        defñ!("skip");
        return;
    }
    let mut session = NftSession::init().unwrap();
    session.force_error_range_opt = Some(0..Count::MAX);
    let err = session.apply("list tables").unwrap_err();
    assert!(!err.is_empty());
    assert_eq!(session.summary().commands_failed, 1);
}

/// Dry-run: invalid is `Err`, valid is `Ok`, and repeating the valid
/// buffer changes nothing. Then the same buffer applied live is `Ok`
/// and the table exists.
#[test]
fn test_end_to_end_dry_run_then_live() {
    if *NFTABLES_LIVE_NOT_AVAILABLE {
        defñ!("skip");
        return;
    }
    let table = table_name();
    let add = cmd_add_table(&table);
    let mut session = NftSession::init().unwrap();

    session.set_dry_run(true);
    let err = session.apply(CMD_INVALID).unwrap_err();
    assert!(!err.trim().is_empty());
    session.apply(&add).unwrap();
    session.apply(&add).unwrap();
    session.set_dry_run(false);
    assert!(!table_exists(&mut session, &table), "dry-run committed {}", table);

    session.apply(&add).unwrap();
    assert!(table_exists(&mut session, &table));
    let output = session.apply(&cmd_add_chain_rule(&table)).unwrap();
    assert!(output.contains("192.0.2.1"), "{}", output);

    session.apply(&format!("delete table inet {}", table)).unwrap();
    assert!(!table_exists(&mut session, &table));
}

/// Each live apply commits once: adding the same rule twice gives two
/// rules.
#[test]
fn test_live_apply_commits_each_call() {
    if *NFTABLES_LIVE_NOT_AVAILABLE {
        defñ!("skip");
        return;
    }
    let table = table_name();
    let mut session = NftSession::init().unwrap();
    session.apply(&cmd_add_table(&table)).unwrap();
    session
        .apply(&format!("add chain inet {} c", table))
        .unwrap();
    let rule = format!("add rule inet {} c ip saddr 192.0.2.2 drop", table);
    session.apply(&rule).unwrap();
    session.apply(&rule).unwrap();
    let listing = session.apply(&format!("list chain inet {} c", table)).unwrap();
    assert_eq!(listing.matches("192.0.2.2").count(), 2, "{}", listing);
    session.apply(&format!("delete table inet {}", table)).unwrap();
}
