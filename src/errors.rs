// src/errors.rs

//! Errors returned by the sessions.
//!
//! A [`SessionError`] always names its cause. The end of the journal is
//! not an error, it is [`ResultFind::Done`]. A rejected nftables command
//! is not an error either, it is the `Err` half of a [`CommandResult`].
//!
//! [`ResultFind::Done`]: crate::common::ResultFind::Done
//! [`CommandResult`]: crate::sessions::nftsession::CommandResult

use std::fmt;
use std::io::{
    Error,
    ErrorKind,
};

use ::kinded::Kinded;
pub use ::nix::errno::Errno;

/// Errors of the journal and nftables sessions.
///
/// Use [`kind()`] to branch on the cause without matching payloads.
///
/// [`kind()`]: ::kinded::Kinded::kind
#[derive(Debug, Kinded)]
pub enum SessionError {
    /// Caller-supplied configuration violates a static constraint (too
    /// many fields, oversized match term, ...). Detected before the native
    /// library is touched.
    Config(String),
    /// The native library could not be loaded, or the handle could not be
    /// opened, initialized, or positioned. No session was created.
    SourceUnavailable(Error),
    /// A call on an already-open session failed in the native library.
    /// The session stays as the library left it.
    Source(Error),
    /// The native library returned data that cannot be interpreted, e.g.
    /// field data without a `=` separator.
    Integrity(String),
}

/// `Result` for session functions.
pub type Result<T> = std::result::Result<T, SessionError>;

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Config(s) => write!(f, "configuration error: {}", s),
            SessionError::SourceUnavailable(err) => write!(f, "source unavailable: {}", err),
            SessionError::Source(err) => write!(f, "source error: {}", err),
            SessionError::Integrity(s) => write!(f, "integrity error: {}", s),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::SourceUnavailable(err) | SessionError::Source(err) => Some(err),
            SessionError::Config(_) | SessionError::Integrity(_) => None,
        }
    }
}

impl From<SessionError> for Error {
    fn from(err: SessionError) -> Error {
        match err {
            SessionError::Config(s) => Error::new(ErrorKind::InvalidInput, s),
            SessionError::SourceUnavailable(err) | SessionError::Source(err) => err,
            SessionError::Integrity(s) => Error::new(ErrorKind::InvalidData, s),
        }
    }
}

impl SessionError {
    /// The underlying [`ErrorKind`], for callers that only deal in
    /// `std::io` errors.
    pub fn io_kind(&self) -> ErrorKind {
        match self {
            SessionError::Config(_) => ErrorKind::InvalidInput,
            SessionError::SourceUnavailable(err) | SessionError::Source(err) => err.kind(),
            SessionError::Integrity(_) => ErrorKind::InvalidData,
        }
    }

    /// The [`Errno`] reported by the native library, if there was one.
    pub fn errno(&self) -> Option<Errno> {
        match self {
            SessionError::SourceUnavailable(err) | SessionError::Source(err) => err
                .get_ref()
                .and_then(|inner| inner.downcast_ref::<NativeCallError>())
                .map(|native| native.errno),
            SessionError::Config(_) | SessionError::Integrity(_) => None,
        }
    }
}

/// Map a few of the most common `Errno` errors to a formal `ErrorKind`.
/// Give a little bit more information beyond catch-all `ErrorKind::Other`.
pub fn errno_to_errorkind(err: &Errno) -> ErrorKind {
    match err {
        Errno::EACCES => ErrorKind::PermissionDenied,
        Errno::EPERM => ErrorKind::PermissionDenied,
        Errno::ENOENT => ErrorKind::NotFound,
        Errno::EADDRINUSE => ErrorKind::AddrInUse,
        Errno::EADDRNOTAVAIL => ErrorKind::AddrNotAvailable,
        Errno::EAFNOSUPPORT => ErrorKind::AddrNotAvailable,
        Errno::EALREADY => ErrorKind::AlreadyExists,
        Errno::EEXIST => ErrorKind::AlreadyExists,
        Errno::EBADF => ErrorKind::InvalidInput,
        Errno::EINVAL => ErrorKind::InvalidInput,
        Errno::E2BIG => ErrorKind::InvalidInput,
        Errno::EBADMSG => ErrorKind::InvalidData,
        Errno::ENOBUFS => ErrorKind::OutOfMemory,
        Errno::ENOMEM => ErrorKind::OutOfMemory,
        Errno::EINTR => ErrorKind::Interrupted,
        Errno::ECANCELED => ErrorKind::Interrupted,
        Errno::ETIMEDOUT => ErrorKind::TimedOut,
        Errno::EAGAIN => ErrorKind::WouldBlock,
        Errno::EBUSY => ErrorKind::Other,
        _ => ErrorKind::Other,
    }
}

/// A native library function returned a negative `errno` value.
///
/// Carried inside the `std::io::Error` of [`SessionError::Source`] and
/// [`SessionError::SourceUnavailable`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NativeCallError {
    /// Name of the native function, e.g. `sd_journal_next`.
    pub funcname: String,
    /// The raw return value.
    pub r: i32,
    pub errno: Errno,
}

impl fmt::Display for NativeCallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} returned {}; {:?}", self.funcname, self.r, self.errno)
    }
}

impl std::error::Error for NativeCallError {}

/// Helper to create an `Error` from the negative return value `r` of a
/// native library function `funcname`.
#[allow(non_snake_case)]
pub fn Error_from_Errno(
    r: i32,
    funcname: &str,
) -> Error {
    let errno = Errno::from_raw(r.abs());
    Error::new(
        errno_to_errorkind(&errno),
        NativeCallError {
            funcname: String::from(funcname),
            r,
            errno,
        },
    )
}
