// src/libload/mod.rs

//! Dynamic loading of the native libraries behind the sessions.
//!
//! Neither `libsystemd` nor `libnftables` is linked at build time. Each is
//! loaded once per process with [`dlopen2`] the first time a session needs
//! it. A failed load is remembered and not retried.
//!
//! [`dlopen2`]: https://docs.rs/dlopen2/0.7.0/dlopen2/index.html

use std::fmt;

pub mod nftables_dlopen2;
pub mod systemd_dlopen2;

/// Return values for [`load_library_systemd`] and [`load_library_nftables`].
///
/// [`load_library_systemd`]: crate::libload::systemd_dlopen2::load_library_systemd
/// [`load_library_nftables`]: crate::libload::nftables_dlopen2::load_library_nftables
pub enum LoadLibraryError {
    /// The library was successfully loaded.
    Ok,
    /// The library failed to load and this was the error.
    Err(::dlopen2::Error),
    /// A previous attempt to load the library failed (the previous attempt
    /// returned `Err`). No more attempts will be made to load the library.
    PrevErr,
}

impl LoadLibraryError {
    pub const fn is_ok(&self) -> bool {
        matches!(self, LoadLibraryError::Ok)
    }
}

impl PartialEq for LoadLibraryError {
    /// allow `Err` == `PrevErr`
    fn eq(&self, other: &LoadLibraryError) -> bool {
        matches!(
            (self, other),
            (&LoadLibraryError::Ok, &LoadLibraryError::Ok)
                | (&LoadLibraryError::Err(_), &LoadLibraryError::Err(_))
                | (&LoadLibraryError::Err(_), &LoadLibraryError::PrevErr)
                | (&LoadLibraryError::PrevErr, &LoadLibraryError::Err(_))
                | (&LoadLibraryError::PrevErr, &LoadLibraryError::PrevErr)
        )
    }
}
impl Eq for LoadLibraryError {}

impl fmt::Debug for LoadLibraryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadLibraryError::Ok => f.debug_struct("LoadLibraryError::Ok").finish(),
            LoadLibraryError::Err(err) => f
                .debug_struct("LoadLibraryError::Err")
                .field("error", &err.to_string())
                .finish(),
            LoadLibraryError::PrevErr => f.debug_struct("LoadLibraryError::PrevErr").finish(),
        }
    }
}

impl fmt::Display for LoadLibraryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadLibraryError::Ok => write!(f, "library loaded"),
            LoadLibraryError::Err(err) => write!(f, "library failed to load: {}", err),
            LoadLibraryError::PrevErr => write!(f, "library failed to load in a previous attempt"),
        }
    }
}
