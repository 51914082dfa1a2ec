// src/tests/errors_tests.rs

//! tests for `errors.rs` and `ResultFind` in `common.rs`

#![allow(non_snake_case)]

use std::error::Error as _;
use std::io::{
    Error,
    ErrorKind,
};

use ::kinded::Kinded;
use ::test_case::test_case;

use crate::common::ResultFind;
use crate::errors::{
    errno_to_errorkind,
    Errno,
    Error_from_Errno,
    NativeCallError,
    SessionError,
    SessionErrorKind,
};

#[test_case(Errno::ENOENT, ErrorKind::NotFound)]
#[test_case(Errno::EACCES, ErrorKind::PermissionDenied)]
#[test_case(Errno::EPERM, ErrorKind::PermissionDenied)]
#[test_case(Errno::EINVAL, ErrorKind::InvalidInput)]
#[test_case(Errno::EBADMSG, ErrorKind::InvalidData)]
#[test_case(Errno::ENOMEM, ErrorKind::OutOfMemory)]
#[test_case(Errno::EINTR, ErrorKind::Interrupted)]
#[test_case(Errno::EIO, ErrorKind::Other)]
fn test_errno_to_errorkind(errno: Errno, expect: ErrorKind) {
    assert_eq!(errno_to_errorkind(&errno), expect);
}

#[test]
fn test_Error_from_Errno() {
    let err = Error_from_Errno(-(Errno::ENOENT as i32), "sd_journal_open");
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.to_string(), "sd_journal_open returned -2; ENOENT");
    let native = err
        .get_ref()
        .and_then(|e| e.downcast_ref::<NativeCallError>())
        .unwrap();
    assert_eq!(native.funcname, "sd_journal_open");
    assert_eq!(native.r, -2);
    assert_eq!(native.errno, Errno::ENOENT);
}

#[test]
fn test_SessionError_source_errno() {
    let err = SessionError::Source(Error_from_Errno(-(Errno::EINVAL as i32), "sd_journal_wait"));
    assert_eq!(err.kind(), SessionErrorKind::Source);
    assert_eq!(err.errno(), Some(Errno::EINVAL));
    assert_eq!(err.io_kind(), ErrorKind::InvalidInput);
    assert!(err.source().is_some());
    assert_eq!(err.to_string(), "source error: sd_journal_wait returned -22; EINVAL");
}

#[test]
fn test_SessionError_unavailable_no_errno() {
    let err = SessionError::SourceUnavailable(Error::new(ErrorKind::NotFound, "no library"));
    assert_eq!(err.kind(), SessionErrorKind::SourceUnavailable);
    assert_eq!(err.errno(), None);
    assert_eq!(err.io_kind(), ErrorKind::NotFound);
}

#[test_case(SessionError::Config(String::from("x")), SessionErrorKind::Config, ErrorKind::InvalidInput)]
#[test_case(SessionError::Integrity(String::from("x")), SessionErrorKind::Integrity, ErrorKind::InvalidData)]
fn test_SessionError_into_io(err: SessionError, kind: SessionErrorKind, io_kind: ErrorKind) {
    assert_eq!(err.kind(), kind);
    assert!(err.source().is_none());
    assert_eq!(err.errno(), None);
    let ioerr: Error = err.into();
    assert_eq!(ioerr.kind(), io_kind);
}

#[test]
fn test_ResultFind() {
    let found: ResultFind<u8, SessionError> = ResultFind::Found(1);
    assert!(found.is_ok());
    assert!(found.is_found());
    assert!(!found.is_done());
    assert_eq!(found.into_result().unwrap(), Some(1));

    let done: ResultFind<u8, SessionError> = ResultFind::Done;
    assert!(done.is_ok());
    assert!(done.is_done());
    assert_eq!(done.to_string(), "ResultFind::Done");
    assert_eq!(done.into_result().unwrap(), None);

    let err: ResultFind<u8, SessionError> = ResultFind::Err(SessionError::Config(String::from("x")));
    assert!(err.is_err());
    assert!(!err.is_done());
    assert_eq!(err.err().unwrap().kind(), SessionErrorKind::Config);
}
