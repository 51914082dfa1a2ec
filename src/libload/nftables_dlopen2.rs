// src/libload/nftables_dlopen2.rs

//! Functions to dynamically load the `libnftables` library using [`dlopen2`].
//!
//! Same scheme as [`systemd_dlopen2`]: one process-wide container, loaded
//! on first use, a failed load is never retried.
//!
//! [`dlopen2`]: https://docs.rs/dlopen2/0.7.0/dlopen2/index.html
//! [`systemd_dlopen2`]: crate::libload::systemd_dlopen2

use std::sync::{Arc, RwLock};

use ::const_format::concatcp;
use ::dlopen2::wrapper::{Container, WrapperApi};
use ::lazy_static::lazy_static;
use ::si_trace_print::{
    defn,
    defo,
    defx,
    defñ,
};

use crate::bindings::nftables_h::nft_ctx;
use crate::libload::LoadLibraryError;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// User-friendly name for the `libnftables` library, used in error messages.
pub const LIB_NAME_NFTABLES: &str = "libnftables.so";
const LIB_NAME_NFTABLES_NAMES_LEN: usize = 3;
/// All possible names for the `libnftables` library
/// used in [`load_library_nftables`].
///
/// Debian and Ubuntu ship `libnftables.so.1` in package `libnftables1`;
/// the unversioned symlink only comes with `libnftables-dev`.
pub const LIB_NAME_NFTABLES_NAMES: [&str; LIB_NAME_NFTABLES_NAMES_LEN] = [
    LIB_NAME_NFTABLES,
    concatcp!(LIB_NAME_NFTABLES, ".1"),
    concatcp!(LIB_NAME_NFTABLES, ".0"),
];

/// [`dlopen2`] API wrapper for `libnftables.so`. Selected functions from
/// [`nftables/libnftables.h`].
///
/// [`dlopen2`]: https://docs.rs/dlopen2/0.7.0/dlopen2/index.html
/// [`nftables/libnftables.h`]: https://git.netfilter.org/nftables/tree/include/nftables/libnftables.h
#[derive(WrapperApi)]
pub struct NftablesHApi {
    /// Function signature for [`nft_ctx_new`].
    ///
    /// [`nft_ctx_new`]: https://www.netfilter.org/projects/nftables/manpage.html
    nft_ctx_new: unsafe extern "C" fn(
        flags: u32,
    ) -> *mut nft_ctx,

    /// Function signature for `nft_ctx_free`.
    nft_ctx_free: unsafe extern "C" fn(
        ctx: *mut nft_ctx,
    ),

    /// Function signature for `nft_ctx_buffer_output`.
    /// Returns `0` on success.
    nft_ctx_buffer_output: unsafe extern "C" fn(
        ctx: *mut nft_ctx,
    ) -> ::std::os::raw::c_int,

    /// Function signature for `nft_ctx_buffer_error`.
    /// Returns `0` on success.
    nft_ctx_buffer_error: unsafe extern "C" fn(
        ctx: *mut nft_ctx,
    ) -> ::std::os::raw::c_int,

    /// Function signature for `nft_ctx_get_output_buffer`.
    /// Returns the text buffered since the previous call and resets the
    /// buffer.
    nft_ctx_get_output_buffer: unsafe extern "C" fn(
        ctx: *mut nft_ctx,
    ) -> *const ::std::os::raw::c_char,

    /// Function signature for `nft_ctx_get_error_buffer`.
    /// Returns the text buffered since the previous call and resets the
    /// buffer.
    nft_ctx_get_error_buffer: unsafe extern "C" fn(
        ctx: *mut nft_ctx,
    ) -> *const ::std::os::raw::c_char,

    /// Function signature for `nft_ctx_output_set_flags`.
    nft_ctx_output_set_flags: unsafe extern "C" fn(
        ctx: *mut nft_ctx,
        flags: ::std::os::raw::c_uint,
    ),

    /// Function signature for `nft_ctx_output_get_flags`.
    nft_ctx_output_get_flags: unsafe extern "C" fn(
        ctx: *mut nft_ctx,
    ) -> ::std::os::raw::c_uint,

    /// Function signature for `nft_ctx_set_dry_run`.
    nft_ctx_set_dry_run: unsafe extern "C" fn(
        ctx: *mut nft_ctx,
        dry: bool,
    ),

    /// Function signature for `nft_ctx_get_dry_run`.
    nft_ctx_get_dry_run: unsafe extern "C" fn(
        ctx: *mut nft_ctx,
    ) -> bool,

    /// Function signature for `nft_run_cmd_from_buffer`.
    /// Returns `0` on success, `-1` on failure.
    nft_run_cmd_from_buffer: unsafe extern "C" fn(
        nft: *mut nft_ctx,
        buf: *const ::std::os::raw::c_char,
    ) -> ::std::os::raw::c_int,
}

/// `dlopen2` container for the `libnftables` interface.
pub type NftablesApiContainer = Container<NftablesHApi>;

/// Multi-threaded pointer to a the `libnftables` interface.
pub type NftablesApiPtr = Arc<NftablesApiContainer>;

lazy_static! {
    /// The interface for using shared library `libnftables.so`.
    ///
    /// See [`SYSTEMD_JOURNAL_API`] for the reasoning behind the wrapping
    /// types.
    ///
    /// [`SYSTEMD_JOURNAL_API`]: static@crate::libload::systemd_dlopen2::SYSTEMD_JOURNAL_API
    pub static ref NFTABLES_API: RwLock<Option<NftablesApiPtr>> = {
        RwLock::new(None)
    };

    /// None means `load_library_nftables()` has not been called yet.
    /// Some(false) means `load_library_nftables()` was called but failed.
    /// Some(true) means `load_library_nftables()` was called and succeeded.
    pub static ref LOAD_LIBRARY_NFTABLES_OK: RwLock<Option<bool>> = {
        RwLock::new(None)
    };
}

/// Helpful accessor for lazy_static [`NFTABLES_API`].
///
/// Returns `None` if [`load_library_nftables`] has not succeeded.
///
/// [`NFTABLES_API`]: static@NFTABLES_API
pub fn nftables_api() -> Option<NftablesApiPtr> {
    match NFTABLES_API.read() {
        Ok(guard) => guard.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

fn load_library_nftables_ok() -> Option<bool> {
    match LOAD_LIBRARY_NFTABLES_OK.read() {
        Ok(guard) => *guard,
        Err(poisoned) => *poisoned.into_inner(),
    }
}

fn set_load_library_nftables_ok(ok: bool) {
    match LOAD_LIBRARY_NFTABLES_OK.write() {
        Ok(mut guard) => *guard = Some(ok),
        Err(poisoned) => *poisoned.into_inner() = Some(ok),
    }
}

fn set_nftables_api(container: NftablesApiContainer) {
    defñ!();
    match NFTABLES_API.write() {
        Ok(mut guard) => *guard = Some(Arc::new(container)),
        Err(poisoned) => *poisoned.into_inner() = Some(Arc::new(container)),
    }
    set_load_library_nftables_ok(true);
}

/// Load the shared library `libnftables`. Store in the global static
/// variable `NFTABLES_API` the [`dlopen2::Container`] object.
///
/// Only attempts to load the library once; behaves like
/// [`load_library_systemd`].
///
/// [`dlopen2::Container`]: https://docs.rs/dlopen2/0.7.0/dlopen2/wrapper/struct.Container.html
/// [`load_library_systemd`]: crate::libload::systemd_dlopen2::load_library_systemd
pub fn load_library_nftables() -> LoadLibraryError {
    match load_library_nftables_ok() {
        Some(true) => return LoadLibraryError::Ok,
        Some(false) => return LoadLibraryError::PrevErr,
        None => {}
    }

    defn!();

    for (index, libname) in LIB_NAME_NFTABLES_NAMES.iter().enumerate() {
        defo!("Container::load({:?})", libname);
        match unsafe { NftablesApiContainer::load(libname) } {
            Ok(container) => {
                defx!("loaded library {:?}", libname);
                set_nftables_api(container);
                return LoadLibraryError::Ok;
            }
            Err(err) => {
                defo!("failed to load library: {}", err);
                if index == LIB_NAME_NFTABLES_NAMES.len() - 1 {
                    set_load_library_nftables_ok(false);
                    defx!("return Err({:?})", err);
                    return LoadLibraryError::Err(err);
                }
            }
        }
    }

    set_load_library_nftables_ok(false);

    LoadLibraryError::PrevErr
}
