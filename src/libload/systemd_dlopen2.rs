// src/libload/systemd_dlopen2.rs

//! Functions to dynamically load the `libsystemd` library using [`dlopen2`].
//!
//! [`dlopen2`]: https://docs.rs/dlopen2/0.7.0/dlopen2/index.html

use std::sync::{Arc, RwLock};

use ::const_format::concatcp;
use ::dlopen2::wrapper::{Container, WrapperApi};
use ::lazy_static::lazy_static;
use ::nix::libc::iovec;
use ::si_trace_print::{
    defn,
    defo,
    defx,
    defñ,
};

use crate::bindings::sd_journal_h::{
    sd_journal,
    size_t,
};
use crate::libload::LoadLibraryError;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// User-friendly name for the `libsystemd` library, used in error messages.
pub const LIB_NAME_SYSTEMD: &str = "libsystemd.so";
const LIB_NAME_SYSTEMD_NAMES_LEN: usize = 7;
/// All possible names for the `libsystemd` library
/// used in [`load_library_systemd`].
///
/// Most distributions ship only `libsystemd.so.0` unless the `-dev`
/// package is installed. Older systems (CentOS 7) split the journal
/// functions into `libsystemd-journal.so`.
///
/// Find the local file using command:
/// ```text
/// (find / -xdev \( -type f -o -type l \) -name 'libsystemd*' 2>/dev/null || true) | sort
/// ```
pub const LIB_NAME_SYSTEMD_NAMES: [&str; LIB_NAME_SYSTEMD_NAMES_LEN] = [
    LIB_NAME_SYSTEMD,
    // on some Linux systems, there is only `libsystemd.so.0` (no `libsystemd.so` symlink)
    concatcp!(LIB_NAME_SYSTEMD, ".0"),
    concatcp!(LIB_NAME_SYSTEMD, ".0.28.0"),
    concatcp!(LIB_NAME_SYSTEMD, ".0.32.0"),
    concatcp!(LIB_NAME_SYSTEMD, ".0.36.0"),
    // on older Linux systems there might be `libsystemd-journal.so`
    "/usr/lib64/libsystemd-journal.so",
    "/usr/lib64/libsystemd-journal.so.0",
];

/// [`dlopen2`] API wrapper for `libsystemd.so`. Selected functions from
/// [`systemd/sd-journal.h`].
///
/// [`dlopen2`]: https://docs.rs/dlopen2/0.7.0/dlopen2/index.html
/// [`systemd/sd-journal.h`]: https://github.com/systemd/systemd/blob/v249/src/systemd/sd-journal.h
#[derive(WrapperApi)]
pub struct SdJournalHApi {
    /// Function signature for [`sd_journal_open`].
    ///
    /// [`sd_journal_open`]: https://man7.org/linux/man-pages/man3/sd_journal_open.3.html
    sd_journal_open: unsafe extern "C" fn(
        ret: *mut *mut sd_journal,
        flags: ::std::os::raw::c_int,
    ) -> ::std::os::raw::c_int,

    /// Function signature for [`sd_journal_close`].
    ///
    /// [`sd_journal_close`]: https://www.man7.org/linux/man-pages/man3/sd-journal.3.html
    sd_journal_close: unsafe extern "C" fn(
        j: *mut sd_journal,
    ),

    /// Function signature for [`sd_journal_seek_tail`].
    ///
    /// [`sd_journal_seek_tail`]: https://man7.org/linux/man-pages/man3/sd_journal_seek_head.3.html
    sd_journal_seek_tail: unsafe extern "C" fn(
        j: *mut sd_journal,
    ) -> ::std::os::raw::c_int,

    /// Function signature for [`sd_journal_next`].
    ///
    /// [`sd_journal_next`]: https://man7.org/linux/man-pages/man3/sd_journal_next.3.html
    sd_journal_next: unsafe extern "C" fn(
        j: *mut sd_journal,
    ) -> ::std::os::raw::c_int,

    /// Function signature for [`sd_journal_next_skip`].
    ///
    /// [`sd_journal_next_skip`]: https://man7.org/linux/man-pages/man3/sd_journal_next.3.html
    sd_journal_next_skip: unsafe extern "C" fn(
        j: *mut sd_journal,
        skip: u64,
    ) -> ::std::os::raw::c_int,

    /// Function signature for [`sd_journal_previous_skip`].
    ///
    /// [`sd_journal_previous_skip`]: https://man7.org/linux/man-pages/man3/sd_journal_next.3.html
    sd_journal_previous_skip: unsafe extern "C" fn(
        j: *mut sd_journal,
        skip: u64,
    ) -> ::std::os::raw::c_int,

    /// Function signature for [`sd_journal_wait`].
    ///
    /// [`sd_journal_wait`]: https://man7.org/linux/man-pages/man3/sd_journal_wait.3.html
    sd_journal_wait: unsafe extern "C" fn(
        j: *mut sd_journal,
        timeout_usec: u64,
    ) -> ::std::os::raw::c_int,

    /// Function signature for [`sd_journal_get_data`].
    ///
    /// [`sd_journal_get_data`]: https://man7.org/linux/man-pages/man3/sd_journal_get_data.3.html
    sd_journal_get_data: unsafe extern "C" fn(
        j: *mut sd_journal,
        field: *const ::std::os::raw::c_char,
        data: *mut *const ::std::os::raw::c_void,
        l: *mut size_t,
    ) -> ::std::os::raw::c_int,

    /// Function signature for [`sd_journal_add_match`].
    ///
    /// [`sd_journal_add_match`]: https://man7.org/linux/man-pages/man3/sd_journal_add_match.3.html
    sd_journal_add_match: unsafe extern "C" fn(
        j: *mut sd_journal,
        data: *const ::std::os::raw::c_void,
        size: size_t,
    ) -> ::std::os::raw::c_int,

    /// Function signature for [`sd_journal_add_disjunction`].
    ///
    /// [`sd_journal_add_disjunction`]: https://man7.org/linux/man-pages/man3/sd_journal_add_match.3.html
    sd_journal_add_disjunction: unsafe extern "C" fn(
        j: *mut sd_journal,
    ) -> ::std::os::raw::c_int,

    /// Function signature for [`sd_journal_add_conjunction`].
    ///
    /// [`sd_journal_add_conjunction`]: https://man7.org/linux/man-pages/man3/sd_journal_add_match.3.html
    sd_journal_add_conjunction: unsafe extern "C" fn(
        j: *mut sd_journal,
    ) -> ::std::os::raw::c_int,

    /// Function signature for [`sd_journal_flush_matches`].
    ///
    /// [`sd_journal_flush_matches`]: https://man7.org/linux/man-pages/man3/sd_journal_add_match.3.html
    sd_journal_flush_matches: unsafe extern "C" fn(
        j: *mut sd_journal,
    ),

    /// Function signature for [`sd_journal_get_realtime_usec`].
    ///
    /// [`sd_journal_get_realtime_usec`]: https://www.man7.org/linux/man-pages/man3/sd_journal_get_realtime_usec.3.html
    sd_journal_get_realtime_usec: unsafe extern "C" fn(
        j: *mut sd_journal,
        usec: *mut u64,
    ) -> ::std::os::raw::c_int,

    /// Function signature for [`sd_journal_get_cursor`].
    ///
    /// [`sd_journal_get_cursor`]: https://www.man7.org/linux/man-pages/man3/sd_journal_get_cursor.3.html
    sd_journal_get_cursor: unsafe extern "C" fn(
        j: *mut sd_journal,
        cursor: *mut *mut ::std::os::raw::c_char,
    ) -> ::std::os::raw::c_int,

    /// Function signature for [`sd_journal_sendv`].
    ///
    /// [`sd_journal_sendv`]: https://www.man7.org/linux/man-pages/man3/sd_journal_print.3.html
    sd_journal_sendv: unsafe extern "C" fn(
        iov: *const iovec,
        n: ::std::os::raw::c_int,
    ) -> ::std::os::raw::c_int,
}

/// `dlopen2` container for the `libsystemd` interface.
pub type JournalApiContainer = Container<SdJournalHApi>;

/// Multi-threaded pointer to a the `libsystemd` interface.
pub type JournalApiPtr = Arc<JournalApiContainer>;

lazy_static! {
    /// The interface for using shared library `libsystemd.so`.
    ///
    /// The `RwLock` is to allow setting the value in `load_library_systemd()`.
    /// The `Option` is `None` until the library is loaded (loading may
    /// never happen or may fail).
    /// The `Arc` lets every `JournalSession` hold its own reference to the
    /// one `dlopen2::Container`.
    pub static ref SYSTEMD_JOURNAL_API: RwLock<Option<JournalApiPtr>> = {
        RwLock::new(None)
    };

    /// None means `load_library_systemd()` has not been called yet.
    /// Some(false) means `load_library_systemd()` was called but failed.
    /// Some(true) means `load_library_systemd()` was called and succeeded.
    pub static ref LOAD_LIBRARY_SYSTEMD_OK: RwLock<Option<bool>> = {
        RwLock::new(None)
    };
}

/// Helpful accessor for lazy_static [`SYSTEMD_JOURNAL_API`].
///
/// Returns `None` if [`load_library_systemd`] has not succeeded.
///
/// [`SYSTEMD_JOURNAL_API`]: static@SYSTEMD_JOURNAL_API
pub fn journal_api() -> Option<JournalApiPtr> {
    match SYSTEMD_JOURNAL_API.read() {
        Ok(guard) => guard.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

fn load_library_systemd_ok() -> Option<bool> {
    match LOAD_LIBRARY_SYSTEMD_OK.read() {
        Ok(guard) => *guard,
        Err(poisoned) => *poisoned.into_inner(),
    }
}

fn set_load_library_systemd_ok(ok: bool) {
    match LOAD_LIBRARY_SYSTEMD_OK.write() {
        Ok(mut guard) => *guard = Some(ok),
        Err(poisoned) => *poisoned.into_inner() = Some(ok),
    }
}

/// Wrapper to set the global static variables.
fn set_systemd_journal_api(container: JournalApiContainer) {
    defñ!();
    match SYSTEMD_JOURNAL_API.write() {
        Ok(mut guard) => *guard = Some(Arc::new(container)),
        Err(poisoned) => *poisoned.into_inner() = Some(Arc::new(container)),
    }
    set_load_library_systemd_ok(true);
}

/// Load the shared library `libsystemd`. Store in the global static
/// variable `SYSTEMD_JOURNAL_API` the [`dlopen2::Container`] object.
///
/// Only attempts to load the library once.
///
/// If the load library attempt fails the first time then that call will
/// return `LoadLibraryError::Err`. All subsequent calls to
/// `load_library_systemd` will return `LoadLibraryError::PrevErr`.
///
/// If the load library succeeds in the current call or in a previous call
/// then return `LoadLibraryError::Ok`.
///
/// [`dlopen2::Container`]: https://docs.rs/dlopen2/0.7.0/dlopen2/wrapper/struct.Container.html
pub fn load_library_systemd() -> LoadLibraryError {
    // only attempt to load the library once. if that fails don't try again.
    match load_library_systemd_ok() {
        Some(true) => return LoadLibraryError::Ok,
        Some(false) => return LoadLibraryError::PrevErr,
        None => {}
    }

    defn!();

    for (index, libname) in LIB_NAME_SYSTEMD_NAMES.iter().enumerate() {
        defo!("Container::load({:?})", libname);
        match unsafe { JournalApiContainer::load(libname) } {
            Ok(container) => {
                defx!("loaded library {:?}", libname);
                set_systemd_journal_api(container);
                return LoadLibraryError::Ok;
            }
            Err(err) => {
                defo!("failed to load library: {}", err);
                if index == LIB_NAME_SYSTEMD_NAMES.len() - 1 {
                    set_load_library_systemd_ok(false);
                    defx!("return Err({:?})", err);
                    return LoadLibraryError::Err(err);
                }
            }
        }
    }
    // XXX: should never get here

    set_load_library_systemd_ok(false);

    LoadLibraryError::PrevErr
}
