// src/bindings/sd_journal_h.rs

//! Declarations from [`systemd/sd-journal.h`], in the shape `bindgen`
//! emits them.
//!
//! [`systemd/sd-journal.h`]: https://github.com/systemd/systemd/blob/v249/src/systemd/sd-journal.h

pub type size_t = usize;

/// Opaque journal handle. Only ever used behind a pointer.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct sd_journal {
    pub _unused: [u8; 0],
}

/// Flag for `sd_journal_open`: only files generated on the local machine.
pub const SD_JOURNAL_LOCAL_ONLY: ::std::os::raw::c_int = 1 << 0;
pub const SD_JOURNAL_RUNTIME_ONLY: ::std::os::raw::c_int = 1 << 1;
pub const SD_JOURNAL_SYSTEM: ::std::os::raw::c_int = 1 << 2;
pub const SD_JOURNAL_CURRENT_USER: ::std::os::raw::c_int = 1 << 3;

/// `sd_journal_wait` return value: nothing changed.
pub const SD_JOURNAL_NOP: ::std::os::raw::c_int = 0;
/// `sd_journal_wait` return value: entries were appended.
pub const SD_JOURNAL_APPEND: ::std::os::raw::c_int = 1;
/// `sd_journal_wait` return value: files were added or removed.
pub const SD_JOURNAL_INVALIDATE: ::std::os::raw::c_int = 2;

/// `sd_journal_wait` timeout meaning "block until something happens",
/// `(uint64_t) -1` in C.
pub const SD_JOURNAL_WAIT_INFINITE: u64 = u64::MAX;
