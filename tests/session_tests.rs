// tests/session_tests.rs
//
// exercise the public API the way a policy layer uses it

#![allow(non_snake_case)]

use ::kinded::Kinded;
use ::scnpmlib::common::ResultFind;
use ::scnpmlib::data::fields::{
    FieldProjection,
    FIELDS_MAX,
    KEY_MESSAGE,
    KEY_PRIORITY,
};
use ::scnpmlib::data::matches::MatchExpression;
use ::scnpmlib::errors::SessionErrorKind;
use ::scnpmlib::sessions::journalsession::{
    JournalSession,
    TailPosition,
};
use ::scnpmlib::sessions::nftsession::NftSession;

#[test]
fn test_config_errors_without_library() {
    let names: Vec<String> = (0..=FIELDS_MAX).map(|i| format!("FIELD_{}", i)).collect();
    let err = FieldProjection::new(&names).unwrap_err();
    assert_eq!(err.kind(), SessionErrorKind::Config);
    let err = JournalSession::open(&names, TailPosition::NewOnly).unwrap_err();
    assert_eq!(err.kind(), SessionErrorKind::Config);
    // converts for callers that deal in `std::io::Error`
    let ioerr: std::io::Error = err.into();
    assert_eq!(ioerr.kind(), std::io::ErrorKind::InvalidInput);
}

#[test]
fn test_open_or_unavailable() {
    match JournalSession::open([KEY_MESSAGE, KEY_PRIORITY], TailPosition::NewOnly) {
        Ok(mut session) => {
            let expr = MatchExpression::new()
                .term(b"_SYSTEMD_UNIT=sshd.service")
                .unwrap()
                .or()
                .term(b"_SYSTEMD_UNIT=ssh.service")
                .unwrap();
            session.set_matches(&expr).unwrap();
            assert_eq!(session.matches().groups().len(), 2);
            match session.read() {
                ResultFind::Found(entry) => assert_eq!(entry.len(), 2),
                ResultFind::Done => {}
                ResultFind::Err(err) => panic!("read failed: {}", err),
            }
            session.close();
        }
        // no libsystemd or no readable journal on this host
        Err(err) => assert_eq!(err.kind(), SessionErrorKind::SourceUnavailable),
    }
}

#[test]
fn test_init_or_unavailable() {
    match NftSession::init() {
        Ok(mut session) => {
            session.set_dry_run(true);
            let result = session.apply("this is not an nft command");
            assert!(matches!(result, Err(ref text) if !text.is_empty()), "{:?}", result);
            session.free();
        }
        Err(err) => assert_eq!(err.kind(), SessionErrorKind::SourceUnavailable),
    }
}
