// src/sessions/journalsession.rs

//! Implements a [`JournalSession`], a tailing cursor over the local
//! systemd journal.
//!
//! The journal is read through the `libsystemd` API functions
//! `sd_journal_*`, loaded at runtime with [`dlopen2`] (see
//! [`load_library_systemd`]).
//!
//! A session is opened at the tail of the journal, positioned by the
//! caller's [`TailPosition`]. The caller then loops:
//! [`wait`] for a change, [`read`] entries until [`ResultFind::Done`], and
//! repeat.
//!
//! ```text
//! let mut session = JournalSession::open(["MESSAGE", "_PID"], TailPosition::NewOnly)?;
//! session.add_match(b"_SYSTEMD_UNIT=sshd.service")?;
//! loop {
//!     if !session.wait(WAIT_INFINITE)? { continue; }
//!     while let Some(entry) = session.read().into_result()? {
//!         // ...
//!     }
//! }
//! ```
//!
//! [`dlopen2`]: https://docs.rs/dlopen2/0.7.0/dlopen2/index.html
//! [`load_library_systemd`]: crate::libload::systemd_dlopen2::load_library_systemd
//! [`wait`]: JournalSession::wait
//! [`read`]: JournalSession::read

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
    c_void,
};

use ::more_asserts::debug_assert_le;
use ::nix::errno::Errno;
use ::nix::libc::iovec;
#[allow(unused_imports)]
use ::si_trace_print::{
    def1n,
    def1o,
    def1x,
    defn,
    defo,
    defx,
    defñ,
};

use crate::bindings::sd_journal_h::{
    sd_journal,
    size_t,
    SD_JOURNAL_APPEND,
    SD_JOURNAL_LOCAL_ONLY,
    SD_JOURNAL_NOP,
    SD_JOURNAL_WAIT_INFINITE,
};
use crate::common::{
    Count,
    EpochMicroseconds,
    ResultFind,
};
#[cfg(test)]
use crate::common::ForceErrorRangeOpt;
use crate::data::entry::LogEntry;
use crate::data::fields::{
    FieldProjection,
    FIELDS_MAX,
    FIELD_MID_U8,
};
use crate::data::matches::{
    check_term_len,
    MatchExpression,
    MatchOp,
};
use crate::de_err;
#[cfg(any(debug_assertions, test))]
use crate::debug::printers::buffer_to_String_noraw;
use crate::errors::{
    Error_from_Errno,
    Result,
    SessionError,
};
use crate::libload::systemd_dlopen2::{
    journal_api,
    load_library_systemd,
    JournalApiPtr,
    LIB_NAME_SYSTEMD,
};
use crate::libload::LoadLibraryError;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Entries skipped forward after seeking the tail for
/// [`TailPosition::NewOnly`].
pub const SKIP_NEW_ONLY: u64 = 10;

/// Entries stepped back after seeking the tail for
/// [`TailPosition::Recent`].
pub const SKIP_RECENT: u64 = 5;

/// Pass to [`JournalSession::wait`] to block until the journal changes.
pub const WAIT_INFINITE: u64 = SD_JOURNAL_WAIT_INFINITE;

/// Where a new session starts reading, relative to the tail of the
/// journal. There is no default; the caller must choose.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ::clap::ValueEnum)]
pub enum TailPosition {
    /// Only entries appended after the session opened.
    NewOnly,
    /// Replay the last few entries, then continue with new ones.
    Recent,
}

impl TailPosition {
    /// The skip applied after seeking the tail.
    pub const fn skip(&self) -> u64 {
        match self {
            TailPosition::NewOnly => SKIP_NEW_ONLY,
            TailPosition::Recent => SKIP_RECENT,
        }
    }
}

impl fmt::Display for TailPosition {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        match self {
            TailPosition::NewOnly => write!(f, "new-only"),
            TailPosition::Recent => write!(f, "recent"),
        }
    }
}

/// Why [`JournalSession::wait_event`] returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JournalWake {
    /// The timeout elapsed and nothing changed.
    Nop,
    /// New entries were appended.
    Append,
    /// Journal files were added or removed; entries may have appeared.
    Invalidate,
}

impl JournalWake {
    /// From a non-negative `sd_journal_wait` return value. An unknown
    /// positive value is treated as `Invalidate`, so the caller re-reads.
    pub const fn from_raw(r: c_int) -> JournalWake {
        match r {
            SD_JOURNAL_NOP => JournalWake::Nop,
            SD_JOURNAL_APPEND => JournalWake::Append,
            // SD_JOURNAL_INVALIDATE and anything unknown
            _ => JournalWake::Invalidate,
        }
    }

    /// Did the journal change?
    pub const fn is_change(&self) -> bool {
        !matches!(self, JournalWake::Nop)
    }
}

/// Return type of [`JournalSession::read`].
///
/// `Done` is the end of the journal for now, not an error.
pub type ResultRead = ResultFind<LogEntry, SessionError>;

/// Diagnostic counters of a [`JournalSession`].
#[derive(Clone, Default, Eq, PartialEq, Debug)]
pub struct SummaryJournalSession {
    /// Calls into `libsystemd`.
    pub api_calls: Count,
    /// Calls into `libsystemd` that returned an error.
    pub api_call_errors: Count,
    /// Entries returned by `read` as `Found`.
    pub entries_read: Count,
    pub wakes_nop: Count,
    pub wakes_append: Count,
    pub wakes_invalidate: Count,
}

/// A tailing cursor over the local journal.
///
/// Created by [`open`], released by [`close`] or when dropped.
///
/// [`open`]: JournalSession::open
/// [`close`]: JournalSession::close
pub struct JournalSession {
    /// Handle from `sd_journal_open`. Null once closed.
    journal_handle_ptr: *mut sd_journal,
    journal_api_ptr: JournalApiPtr,
    projection: FieldProjection,
    tail_position: TailPosition,
    /// Every match term and marker the journal has accepted since the
    /// last flush.
    matches: MatchExpression,
    api_calls: Count,
    api_call_errors: Count,
    entries_read: Count,
    wakes_nop: Count,
    wakes_append: Count,
    wakes_invalidate: Count,
    #[cfg(test)]
    pub(crate) force_error_range_opt: ForceErrorRangeOpt,
}

impl fmt::Debug for JournalSession {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("JournalSession")
            .field("handle", &self.journal_handle_ptr)
            .field("projection", &self.projection)
            .field("tail_position", &self.tail_position)
            .field("matches", &self.matches)
            .finish()
    }
}

impl Drop for JournalSession {
    fn drop(&mut self) {
        self.close_handle();
    }
}

/// Load `libsystemd` and return its interface, or a
/// [`SessionError::SourceUnavailable`].
fn journal_api_load() -> Result<JournalApiPtr> {
    match load_library_systemd() {
        LoadLibraryError::Ok => {}
        LoadLibraryError::Err(err) => {
            de_err!("load_library_systemd() failed: {}", err);
            return Err(SessionError::SourceUnavailable(Error::new(
                ErrorKind::NotFound,
                format!("failed to load {}: {}", LIB_NAME_SYSTEMD, err),
            )));
        }
        LoadLibraryError::PrevErr => {
            return Err(SessionError::SourceUnavailable(Error::new(
                ErrorKind::NotFound,
                format!("failed to load {} in a previous attempt", LIB_NAME_SYSTEMD),
            )));
        }
    }
    match journal_api() {
        Some(api) => Ok(api),
        None => Err(SessionError::SourceUnavailable(Error::new(
            ErrorKind::NotFound,
            format!("{} is not loaded", LIB_NAME_SYSTEMD),
        ))),
    }
}

impl JournalSession {
    /// Open the local journal, record the field projection, and position
    /// the cursor per `tail_position`.
    ///
    /// Field names are checked first; a bad projection returns
    /// [`SessionError::Config`] without loading `libsystemd`. Any failure
    /// to load, open, or position returns
    /// [`SessionError::SourceUnavailable`] and no handle is left open.
    pub fn open<I, S>(
        field_names: I,
        tail_position: TailPosition,
    ) -> Result<JournalSession>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        def1n!("({:?})", tail_position);
        let projection = FieldProjection::new(field_names)?;
        debug_assert_le!(projection.len(), FIELDS_MAX);
        let journal_api_ptr = journal_api_load()?;

        let mut journal_handle_ptr: *mut sd_journal = std::ptr::null_mut();
        unsafe {
            //
            // call sd_journal_open
            //
            def1o!("sd_journal_open(@{:p}, SD_JOURNAL_LOCAL_ONLY)", &journal_handle_ptr);
            let r: c_int = journal_api_ptr.sd_journal_open(&mut journal_handle_ptr, SD_JOURNAL_LOCAL_ONLY);
            def1o!("sd_journal_open returned {}, {:?}", r, Errno::from_raw(r.abs()));
            if r < 0 {
                let err = Error_from_Errno(r, "sd_journal_open");
                de_err!("{}", err);
                def1x!("return {:?}", err);
                return Err(SessionError::SourceUnavailable(err));
            }
        }

        // from here on a failure drops `session` which closes the handle
        let mut session = JournalSession {
            journal_handle_ptr,
            journal_api_ptr,
            projection,
            tail_position,
            matches: MatchExpression::new(),
            api_calls: 1,
            api_call_errors: 0,
            entries_read: 0,
            wakes_nop: 0,
            wakes_append: 0,
            wakes_invalidate: 0,
            #[cfg(test)]
            force_error_range_opt: None,
        };
        if let Err(err) = session.position() {
            def1x!("return {:?}", err);
            return Err(err);
        }
        def1x!("return Ok(JournalSession)");

        Ok(session)
    }

    /// Seek the tail then apply the `TailPosition` skip.
    fn position(&mut self) -> Result<()> {
        def1n!("({:?})", self.tail_position);
        unsafe {
            //
            // call sd_journal_seek_tail
            //
            let r: c_int = self.journal_api_ptr.sd_journal_seek_tail(self.journal_handle_ptr);
            self.api_calls += 1;
            def1o!("sd_journal_seek_tail returned {}", r);
            if r < 0 {
                self.api_call_errors += 1;
                let err = Error_from_Errno(r, "sd_journal_seek_tail");
                def1x!("return {:?}", err);
                return Err(SessionError::SourceUnavailable(err));
            }
            //
            // call sd_journal_next_skip or sd_journal_previous_skip
            //
            let skip: u64 = self.tail_position.skip();
            let (r, funcname): (c_int, &str) = match self.tail_position {
                TailPosition::NewOnly => (
                    self.journal_api_ptr.sd_journal_next_skip(self.journal_handle_ptr, skip),
                    "sd_journal_next_skip",
                ),
                TailPosition::Recent => (
                    self.journal_api_ptr.sd_journal_previous_skip(self.journal_handle_ptr, skip),
                    "sd_journal_previous_skip",
                ),
            };
            self.api_calls += 1;
            def1o!("{}({}) returned {}", funcname, skip, r);
            if r < 0 {
                self.api_call_errors += 1;
                let err = Error_from_Errno(r, funcname);
                def1x!("return {:?}", err);
                return Err(SessionError::SourceUnavailable(err));
            }
        }
        def1x!();

        Ok(())
    }

    /// Close the journal handle. Dropping the session does the same.
    pub fn close(mut self) {
        self.close_handle();
    }

    fn close_handle(&mut self) {
        if self.journal_handle_ptr.is_null() {
            return;
        }
        defñ!("sd_journal_close(@{:p})", self.journal_handle_ptr);
        unsafe {
            self.journal_api_ptr.sd_journal_close(self.journal_handle_ptr);
        }
        self.api_calls += 1;
        self.journal_handle_ptr = std::ptr::null_mut();
    }

    /// Block up to `timeout_us` microseconds for the journal to change.
    ///
    /// Returns `true` if entries were appended or journal files changed,
    /// `false` if the timeout elapsed. [`WAIT_INFINITE`] blocks until a
    /// change.
    pub fn wait(
        &mut self,
        timeout_us: u64,
    ) -> Result<bool> {
        Ok(self.wait_event(timeout_us)?.is_change())
    }

    /// Like [`wait`] but reports which kind of change woke it.
    ///
    /// [`wait`]: JournalSession::wait
    pub fn wait_event(
        &mut self,
        timeout_us: u64,
    ) -> Result<JournalWake> {
        testing_force_error!(
            &self.force_error_range_opt,
            "sd_journal_wait",
            self.api_calls,
            self.api_call_errors,
            Result::Err
        );
        def1n!("sd_journal_wait(@{:p}, {})", self.journal_handle_ptr, timeout_us);
        let r: c_int = unsafe {
            self.journal_api_ptr.sd_journal_wait(self.journal_handle_ptr, timeout_us)
        };
        self.api_calls += 1;
        if r < 0 {
            self.api_call_errors += 1;
            let err = Error_from_Errno(r, "sd_journal_wait");
            def1x!("return {:?}", err);
            return Err(SessionError::Source(err));
        }
        let wake = JournalWake::from_raw(r);
        match wake {
            JournalWake::Nop => self.wakes_nop += 1,
            JournalWake::Append => self.wakes_append += 1,
            JournalWake::Invalidate => self.wakes_invalidate += 1,
        }
        def1x!("returned {}, {:?}", r, wake);

        Ok(wake)
    }

    /// Advance to the next entry and return its projected field values.
    ///
    /// `Done` means there are no more entries right now. A field missing
    /// from the entry has an empty value. Field data without `=` is
    /// [`SessionError::Integrity`].
    pub fn read(&mut self) -> ResultRead {
        def1n!();
        match self.call_sd_journal_next() {
            ResultFind::Found(_) => {}
            ResultFind::Done => {
                def1x!("return Done");
                return ResultFind::Done;
            }
            ResultFind::Err(err) => {
                def1x!("return Err {:?}", err);
                return ResultFind::Err(err);
            }
        }
        let mut entry = LogEntry::with_capacity(self.projection.len());
        for index in 0..self.projection.len() {
            match Self::call_sd_journal_get_data(
                &mut self.journal_handle_ptr,
                &self.journal_api_ptr,
                &mut self.api_calls,
                &mut self.api_call_errors,
                self.projection.name_cstr(index),
                #[cfg(test)]
                &self.force_error_range_opt,
            ) {
                Ok(Some(data)) => {
                    def1o!("field {}: {:?}", index, buffer_to_String_noraw(data));
                    if let Err(err) = entry.push_field_data(data) {
                        de_err!("{}", err);
                        def1x!("return Err {:?}", err);
                        return ResultFind::Err(err);
                    }
                }
                Ok(None) => {
                    def1o!("field {}: absent", index);
                    entry.push_absent();
                }
                Err(err) => {
                    def1x!("return Err {:?}", err);
                    return ResultFind::Err(err);
                }
            }
        }
        debug_assert_eq!(entry.len(), self.projection.len());
        self.entries_read += 1;
        def1x!("return Found");

        ResultFind::Found(entry)
    }

    /// Wrapper to call `sd_journal_next`.
    fn call_sd_journal_next(&mut self) -> ResultFind<(), SessionError> {
        testing_force_error!(
            &self.force_error_range_opt,
            "sd_journal_next",
            self.api_calls,
            self.api_call_errors,
            ResultFind::Err
        );
        let r: c_int = unsafe { self.journal_api_ptr.sd_journal_next(self.journal_handle_ptr) };
        self.api_calls += 1;
        defñ!("sd_journal_next returned {}", r);
        if r == 0 {
            return ResultFind::Done;
        } else if r < 0 {
            self.api_call_errors += 1;
            return ResultFind::Err(SessionError::Source(Error_from_Errno(r, "sd_journal_next")));
        }

        ResultFind::Found(())
    }

    // `call_sd_journal_get_data` borrows the members of `self` separately
    // because the returned data borrows the handle.

    /// Wrapper to call `sd_journal_get_data`.
    /// Returns `Ok(None)` if the current entry does not have `field`.
    fn call_sd_journal_get_data<'h>(
        journal_handle_ptr: &'h mut *mut sd_journal,
        journal_api_ptr: &JournalApiPtr,
        api_calls: &mut Count,
        api_call_errors: &mut Count,
        field: &CString,
        #[cfg(test)]
        force_error_range_opt: &ForceErrorRangeOpt,
    ) -> Result<Option<&'h [u8]>> {
        testing_force_error!(
            force_error_range_opt,
            "sd_journal_get_data",
            (*api_calls),
            (*api_call_errors),
            Result::Err
        );
        let data: &[u8];
        unsafe {
            let mut length: size_t = 0;
            let mut pdata: *const c_void = std::ptr::null();
            let r: c_int = journal_api_ptr.sd_journal_get_data(
                *journal_handle_ptr,
                field.as_ptr(),
                &mut pdata,
                &mut length,
            );
            *api_calls += 1;
            if r == -(Errno::ENOENT as c_int) {
                return Ok(None);
            }
            if r < 0 {
                *api_call_errors += 1;
                return Err(SessionError::Source(Error_from_Errno(r, "sd_journal_get_data")));
            }
            if pdata.is_null() {
                return Ok(Some(&[]));
            }
            data = std::slice::from_raw_parts(pdata as *const u8, length);
        }

        Ok(Some(data))
    }

    /// Add a `FIELD=value` match term. Terms added without a marker in
    /// between are ANDed (terms for the same field are ORed).
    ///
    /// An empty term or one longer than `i32::MAX` bytes is
    /// [`SessionError::Config`]; the journal is not called.
    pub fn add_match(
        &mut self,
        term: &[u8],
    ) -> Result<()> {
        check_term_len(term)?;
        testing_force_error!(
            &self.force_error_range_opt,
            "sd_journal_add_match",
            self.api_calls,
            self.api_call_errors,
            Result::Err
        );
        def1n!("sd_journal_add_match({:?})", buffer_to_String_noraw(term));
        let r: c_int = unsafe {
            self.journal_api_ptr.sd_journal_add_match(
                self.journal_handle_ptr,
                term.as_ptr() as *const c_void,
                term.len() as size_t,
            )
        };
        self.api_calls += 1;
        if r < 0 {
            self.api_call_errors += 1;
            let err = Error_from_Errno(r, "sd_journal_add_match");
            def1x!("return {:?}", err);
            return Err(SessionError::Source(err));
        }
        self.matches.add_term(term)?;
        def1x!();

        Ok(())
    }

    /// Start a new group of terms, ORed with the previous groups.
    pub fn add_disjunction(&mut self) -> Result<()> {
        let r: c_int = unsafe { self.journal_api_ptr.sd_journal_add_disjunction(self.journal_handle_ptr) };
        self.api_calls += 1;
        defñ!("sd_journal_add_disjunction returned {}", r);
        if r < 0 {
            self.api_call_errors += 1;
            return Err(SessionError::Source(Error_from_Errno(r, "sd_journal_add_disjunction")));
        }
        self.matches.add_disjunction();

        Ok(())
    }

    /// Close the ORed groups so far into a clause, ANDed with the next.
    pub fn add_conjunction(&mut self) -> Result<()> {
        let r: c_int = unsafe { self.journal_api_ptr.sd_journal_add_conjunction(self.journal_handle_ptr) };
        self.api_calls += 1;
        defñ!("sd_journal_add_conjunction returned {}", r);
        if r < 0 {
            self.api_call_errors += 1;
            return Err(SessionError::Source(Error_from_Errno(r, "sd_journal_add_conjunction")));
        }
        self.matches.add_conjunction();

        Ok(())
    }

    /// Remove all matches; every entry matches again.
    pub fn flush_matches(&mut self) {
        defñ!("sd_journal_flush_matches(@{:p})", self.journal_handle_ptr);
        unsafe {
            self.journal_api_ptr.sd_journal_flush_matches(self.journal_handle_ptr);
        }
        self.api_calls += 1;
        self.matches.clear();
    }

    /// Replace the current matches with `expression`.
    ///
    /// On failure the matches are flushed, so the session never filters on
    /// half an expression.
    pub fn set_matches(
        &mut self,
        expression: &MatchExpression,
    ) -> Result<()> {
        def1n!("{}", expression);
        self.flush_matches();
        for op in expression.ops().iter() {
            let result = match op {
                MatchOp::Term(term) => self.add_match(term),
                MatchOp::Disjunction => self.add_disjunction(),
                MatchOp::Conjunction => self.add_conjunction(),
            };
            if let Err(err) = result {
                self.flush_matches();
                def1x!("return {:?}", err);
                return Err(err);
            }
        }
        debug_assert_eq!(&self.matches, expression);
        def1x!();

        Ok(())
    }

    /// The matches currently applied.
    pub fn matches(&self) -> &MatchExpression {
        &self.matches
    }

    /// Wall-clock timestamp of the current entry.
    pub fn realtime_usec(&mut self) -> Result<EpochMicroseconds> {
        let mut usec: u64 = 0;
        let r: c_int = unsafe {
            self.journal_api_ptr.sd_journal_get_realtime_usec(self.journal_handle_ptr, &mut usec)
        };
        self.api_calls += 1;
        defñ!("sd_journal_get_realtime_usec returned {}, {}", r, usec);
        if r < 0 {
            self.api_call_errors += 1;
            return Err(SessionError::Source(Error_from_Errno(r, "sd_journal_get_realtime_usec")));
        }

        Ok(usec as EpochMicroseconds)
    }

    /// Cursor string of the current entry, as `journalctl --cursor` takes.
    pub fn cursor(&mut self) -> Result<String> {
        def1n!();
        let cursor: String;
        unsafe {
            let mut pcursor: *mut c_char = std::ptr::null_mut();
            let r: c_int = self.journal_api_ptr.sd_journal_get_cursor(self.journal_handle_ptr, &mut pcursor);
            self.api_calls += 1;
            if r < 0 {
                self.api_call_errors += 1;
                let err = Error_from_Errno(r, "sd_journal_get_cursor");
                def1x!("return {:?}", err);
                return Err(SessionError::Source(err));
            }
            if pcursor.is_null() {
                def1x!("return Integrity");
                return Err(SessionError::Integrity(String::from(
                    "sd_journal_get_cursor returned a null cursor",
                )));
            }
            cursor = CStr::from_ptr(pcursor).to_string_lossy().into_owned();
            // the cursor string is allocated by libsystemd for the caller
            ::nix::libc::free(pcursor as *mut c_void);
        }
        def1x!("return {:?}", cursor);

        Ok(cursor)
    }

    pub fn projection(&self) -> &FieldProjection {
        &self.projection
    }

    pub const fn tail_position(&self) -> TailPosition {
        self.tail_position
    }

    pub fn is_closed(&self) -> bool {
        self.journal_handle_ptr.is_null()
    }

    pub fn summary(&self) -> SummaryJournalSession {
        SummaryJournalSession {
            api_calls: self.api_calls,
            api_call_errors: self.api_call_errors,
            entries_read: self.entries_read,
            wakes_nop: self.wakes_nop,
            wakes_append: self.wakes_append,
            wakes_invalidate: self.wakes_invalidate,
        }
    }
}

/// Write one entry to the journal with `fields`, each `FIELD=value`.
///
/// A field without `=` or an empty `fields` is [`SessionError::Config`].
pub fn journal_send<I, T>(fields: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    // collect first so the iovec pointers stay valid
    let fields: Vec<T> = fields.into_iter().collect();
    def1n!("{} fields", fields.len());
    if fields.is_empty() {
        return Err(SessionError::Config(String::from("journal entry has no fields")));
    }
    if fields.len() > c_int::MAX as usize {
        return Err(SessionError::Config(format!("journal entry has too many fields {}", fields.len())));
    }
    let mut iov: Vec<iovec> = Vec::with_capacity(fields.len());
    for field in fields.iter() {
        let field: &[u8] = field.as_ref();
        match field.iter().position(|b| *b == FIELD_MID_U8) {
            Some(0) | None => {
                def1x!("bad field {:?}", buffer_to_String_noraw(field));
                return Err(SessionError::Config(format!(
                    "journal field {:?} is not FIELD=value",
                    String::from_utf8_lossy(field)
                )));
            }
            Some(_) => {}
        }
        iov.push(iovec {
            iov_base: field.as_ptr() as *mut c_void,
            iov_len: field.len(),
        });
    }
    let journal_api_ptr = journal_api_load()?;
    let r: c_int = unsafe { journal_api_ptr.sd_journal_sendv(iov.as_ptr(), iov.len() as c_int) };
    if r < 0 {
        let err = Error_from_Errno(r, "sd_journal_sendv");
        de_err!("{}", err);
        def1x!("return {:?}", err);
        return Err(SessionError::Source(err));
    }
    def1x!();

    Ok(())
}
