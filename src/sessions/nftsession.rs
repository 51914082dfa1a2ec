// src/sessions/nftsession.rs

//! Implements an [`NftSession`], a `libnftables` control context for
//! applying firewall rule changes.
//!
//! Output and error text are buffered inside the context. Each call to
//! [`apply`] takes both buffers, so the text returned always belongs to
//! that one command batch.
//!
//! [`apply`]: NftSession::apply

use std::ffi::{
    CStr,
    CString,
};
use std::fmt;
use std::io::{
    Error,
    ErrorKind,
};
use std::os::raw::{
    c_char,
    c_int,
    c_uint,
};

#[allow(unused_imports)]
use ::si_trace_print::{
    def1n,
    def1o,
    def1x,
    defñ,
};

use crate::bindings::nftables_h::{
    nft_ctx,
    NFT_CTX_DEFAULT,
    NFT_CTX_OUTPUT_ECHO,
    NFT_CTX_OUTPUT_HANDLE,
    NFT_CTX_OUTPUT_NUMERIC_ALL,
    NFT_CTX_OUTPUT_TERSE,
};
use crate::common::Count;
#[cfg(test)]
use crate::common::ForceErrorRangeOpt;
use crate::de_err;
use crate::de_wrn;
use crate::errors::{
    Result,
    SessionError,
};
use crate::libload::nftables_dlopen2::{
    load_library_nftables,
    nftables_api,
    NftablesApiPtr,
    LIB_NAME_NFTABLES,
};
use crate::libload::LoadLibraryError;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Output flags set on every new context: echo applied rules with their
/// handles, numeric and terse.
pub const NFT_OUTPUT_FLAGS_DEFAULT: c_uint =
    NFT_CTX_OUTPUT_ECHO | NFT_CTX_OUTPUT_HANDLE | NFT_CTX_OUTPUT_NUMERIC_ALL | NFT_CTX_OUTPUT_TERSE;

/// Result of one [`NftSession::apply`]: the output text on success, the
/// error text on failure. The error text is never empty.
pub type CommandResult = std::result::Result<String, String>;

/// Diagnostic counters of an [`NftSession`].
#[derive(Clone, Default, Eq, PartialEq, Debug)]
pub struct SummaryNftSession {
    /// Calls into `libnftables`.
    pub api_calls: Count,
    /// Calls to `nft_run_cmd_from_buffer`.
    pub commands_applied: Count,
    pub commands_succeeded: Count,
    pub commands_failed: Count,
    /// Of `commands_applied`, how many ran in dry-run mode.
    pub commands_dry_run: Count,
}

/// An nftables control context.
///
/// Created by [`init`], released by [`free`] or when dropped.
///
/// [`init`]: NftSession::init
/// [`free`]: NftSession::free
pub struct NftSession {
    /// Context from `nft_ctx_new`. Null once freed.
    ctx: *mut nft_ctx,
    nftables_api_ptr: NftablesApiPtr,
    /// Output flags as read back from the context.
    output_flags: c_uint,
    api_calls: Count,
    commands_applied: Count,
    commands_succeeded: Count,
    commands_failed: Count,
    commands_dry_run: Count,
    #[cfg(test)]
    pub(crate) force_error_range_opt: ForceErrorRangeOpt,
}

impl fmt::Debug for NftSession {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("NftSession")
            .field("ctx", &self.ctx)
            .field("output_flags", &format_args!("{:#x}", self.output_flags))
            .finish()
    }
}

impl Drop for NftSession {
    fn drop(&mut self) {
        self.free_ctx();
    }
}

fn unavailable(msg: String) -> SessionError {
    SessionError::SourceUnavailable(Error::new(ErrorKind::Other, msg))
}

impl NftSession {
    /// Load `libnftables` and create a context that buffers its output
    /// and error text, with [`NFT_OUTPUT_FLAGS_DEFAULT`].
    ///
    /// Any failure returns [`SessionError::SourceUnavailable`]; a context
    /// created before the failure is freed.
    pub fn init() -> Result<NftSession> {
        def1n!();
        match load_library_nftables() {
            LoadLibraryError::Ok => {}
            LoadLibraryError::Err(err) => {
                de_err!("load_library_nftables() failed: {}", err);
                def1x!("return Err");
                return Err(SessionError::SourceUnavailable(Error::new(
                    ErrorKind::NotFound,
                    format!("failed to load {}: {}", LIB_NAME_NFTABLES, err),
                )));
            }
            LoadLibraryError::PrevErr => {
                def1x!("return Err");
                return Err(SessionError::SourceUnavailable(Error::new(
                    ErrorKind::NotFound,
                    format!("failed to load {} in a previous attempt", LIB_NAME_NFTABLES),
                )));
            }
        }
        let nftables_api_ptr: NftablesApiPtr = match nftables_api() {
            Some(api) => api,
            None => {
                def1x!("return Err");
                return Err(SessionError::SourceUnavailable(Error::new(
                    ErrorKind::NotFound,
                    format!("{} is not loaded", LIB_NAME_NFTABLES),
                )));
            }
        };

        let ctx: *mut nft_ctx = unsafe { nftables_api_ptr.nft_ctx_new(NFT_CTX_DEFAULT) };
        def1o!("nft_ctx_new returned @{:p}", ctx);
        if ctx.is_null() {
            def1x!("return Err");
            return Err(unavailable(String::from("nft_ctx_new returned NULL")));
        }

        // from here on a failure drops `session` which frees the context
        let mut session = NftSession {
            ctx,
            nftables_api_ptr,
            output_flags: 0,
            api_calls: 1,
            commands_applied: 0,
            commands_succeeded: 0,
            commands_failed: 0,
            commands_dry_run: 0,
            #[cfg(test)]
            force_error_range_opt: None,
        };
        unsafe {
            let r: c_int = session.nftables_api_ptr.nft_ctx_buffer_output(session.ctx);
            session.api_calls += 1;
            if r != 0 {
                def1x!("nft_ctx_buffer_output returned {}", r);
                return Err(unavailable(format!("nft_ctx_buffer_output returned {}", r)));
            }
            let r: c_int = session.nftables_api_ptr.nft_ctx_buffer_error(session.ctx);
            session.api_calls += 1;
            if r != 0 {
                def1x!("nft_ctx_buffer_error returned {}", r);
                return Err(unavailable(format!("nft_ctx_buffer_error returned {}", r)));
            }
            session.nftables_api_ptr.nft_ctx_output_set_flags(session.ctx, NFT_OUTPUT_FLAGS_DEFAULT);
            session.output_flags = session.nftables_api_ptr.nft_ctx_output_get_flags(session.ctx);
            session.api_calls += 2;
        }
        def1x!("return Ok({:?})", session);

        Ok(session)
    }

    /// Free the context. Dropping the session does the same.
    pub fn free(mut self) {
        self.free_ctx();
    }

    fn free_ctx(&mut self) {
        if self.ctx.is_null() {
            return;
        }
        defñ!("nft_ctx_free(@{:p})", self.ctx);
        unsafe {
            self.nftables_api_ptr.nft_ctx_free(self.ctx);
        }
        self.api_calls += 1;
        self.ctx = std::ptr::null_mut();
    }

    /// In dry-run mode commands are checked but never committed.
    pub fn set_dry_run(
        &mut self,
        dry: bool,
    ) {
        defñ!("nft_ctx_set_dry_run({})", dry);
        unsafe {
            self.nftables_api_ptr.nft_ctx_set_dry_run(self.ctx, dry);
        }
        self.api_calls += 1;
    }

    pub fn dry_run(&self) -> bool {
        unsafe { self.nftables_api_ptr.nft_ctx_get_dry_run(self.ctx) }
    }

    /// Output flags of the context, see [`NFT_OUTPUT_FLAGS_DEFAULT`].
    pub const fn output_flags(&self) -> c_uint {
        self.output_flags
    }

    /// Take the text buffered at `buffer`. A null buffer is empty text.
    ///
    /// # Safety
    ///
    /// `buffer` must be null or a NUL-terminated string valid until the
    /// next call on the context.
    unsafe fn buffer_text(buffer: *const c_char) -> String {
        if buffer.is_null() {
            return String::new();
        }
        CStr::from_ptr(buffer).to_string_lossy().into_owned()
    }

    /// Drain the output and error buffers.
    fn take_buffers(&mut self) -> (String, String) {
        let output: String;
        let error: String;
        unsafe {
            output = Self::buffer_text(self.nftables_api_ptr.nft_ctx_get_output_buffer(self.ctx));
            error = Self::buffer_text(self.nftables_api_ptr.nft_ctx_get_error_buffer(self.ctx));
        }
        self.api_calls += 2;

        (output, error)
    }

    /// Run `commands`, in `nft -f` syntax, as one batch.
    ///
    /// Returns the output text on success and the error text on failure.
    /// Both buffers are drained either way. Outside dry-run mode each
    /// successful batch is committed on its own. A failure is reported in
    /// the `Err` text, never as a [`SessionError`].
    pub fn apply(
        &mut self,
        commands: &str,
    ) -> CommandResult {
        def1n!("({:?})", commands);
        self.commands_applied += 1;
        if self.dry_run() {
            self.commands_dry_run += 1;
        }
        #[cfg(test)]
        {
            if let Some(range) = &self.force_error_range_opt {
                if self.api_calls >= range.start && self.api_calls <= range.end {
                    self.api_calls += 1;
                    self.commands_failed += 1;
                    def1x!("FORCE_ERROR_RANGE");
                    return Err(String::from("nft_run_cmd_from_buffer forced error"));
                }
            }
        }
        let commands_cs: CString = match CString::new(commands) {
            Ok(val) => val,
            Err(err) => {
                self.commands_failed += 1;
                let msg = format!("commands contain a NUL byte at {}", err.nul_position());
                def1x!("return Err({:?})", msg);
                return Err(msg);
            }
        };
        let r: c_int = unsafe {
            self.nftables_api_ptr.nft_run_cmd_from_buffer(self.ctx, commands_cs.as_ptr())
        };
        self.api_calls += 1;
        def1o!("nft_run_cmd_from_buffer returned {}", r);
        let (output, error) = self.take_buffers();
        if r == 0 {
            self.commands_succeeded += 1;
            def1x!("return Ok({:?})", output);
            return Ok(output);
        }
        self.commands_failed += 1;
        let error = match error.trim().is_empty() {
            true => {
                de_wrn!("nft_run_cmd_from_buffer returned {} with no error text", r);
                format!("nft_run_cmd_from_buffer returned {}", r)
            }
            false => error,
        };
        def1x!("return Err({:?})", error);

        Err(error)
    }

    pub fn summary(&self) -> SummaryNftSession {
        SummaryNftSession {
            api_calls: self.api_calls,
            commands_applied: self.commands_applied,
            commands_succeeded: self.commands_succeeded,
            commands_failed: self.commands_failed,
            commands_dry_run: self.commands_dry_run,
        }
    }
}
