// src/data/fields.rs

//! The [`FieldProjection`] table: which journal fields a session returns,
//! and in which order.

use std::ffi::CString;
use std::fmt;

use ::si_trace_print::{
    def1n,
    def1x,
};

use crate::errors::{
    Result,
    SessionError,
};

/// Hard capacity of a [`FieldProjection`]. More fields is a
/// [`SessionError::Config`].
pub const FIELDS_MAX: usize = 10;

/// Journal field name separator within raw field data, `FIELD=value`.
pub const FIELD_MID_U8: u8 = b'=';

/// Common journal field names.
/// See [`systemd.journal-fields`].
///
/// [`systemd.journal-fields`]: https://www.man7.org/linux/man-pages/man7/systemd.journal-fields.7.html
pub const KEY_MESSAGE: &str = "MESSAGE";
pub const KEY_PRIORITY: &str = "PRIORITY";
pub const KEY_SYSLOG_IDENTIFIER: &str = "SYSLOG_IDENTIFIER";
pub const KEY_PID: &str = "_PID";
pub const KEY_SYSTEMD_UNIT: &str = "_SYSTEMD_UNIT";
pub const KEY_UNIT: &str = "UNIT";

/// The ordered field names requested for every [`LogEntry`].
///
/// Set exactly once, immutable afterwards. Duplicates are kept; each
/// occurrence gets its own slot in the entry.
///
/// [`LogEntry`]: crate::data::entry::LogEntry
#[derive(Clone, Default, PartialEq, Eq)]
pub struct FieldProjection {
    names: Vec<String>,
    /// Same names, NUL-terminated for the native calls.
    names_cstr: Vec<CString>,
}

impl fmt::Debug for FieldProjection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.names.iter()).finish()
    }
}

impl FieldProjection {
    /// Build the projection from `field_names`, in order.
    ///
    /// Fails with [`SessionError::Config`] if there are more than
    /// [`FIELDS_MAX`] names or if a name is empty, contains `=`, or
    /// contains a NUL byte.
    pub fn new<I, S>(field_names: I) -> Result<FieldProjection>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        def1n!();
        let mut names: Vec<String> = Vec::with_capacity(FIELDS_MAX);
        let mut names_cstr: Vec<CString> = Vec::with_capacity(FIELDS_MAX);
        for name in field_names.into_iter() {
            let name: &str = name.as_ref();
            if names.len() == FIELDS_MAX {
                def1x!("too many fields");
                return Err(SessionError::Config(format!(
                    "too many fields; at most {} fields may be projected",
                    FIELDS_MAX
                )));
            }
            if name.is_empty() {
                def1x!("empty field name");
                return Err(SessionError::Config(format!(
                    "field name at index {} is empty",
                    names.len()
                )));
            }
            if name.as_bytes().contains(&FIELD_MID_U8) {
                def1x!("field name {:?} has '='", name);
                return Err(SessionError::Config(format!("field name {:?} contains '='", name)));
            }
            let name_cstr = match CString::new(name) {
                Ok(val) => val,
                Err(err) => {
                    def1x!("field name {:?} has NUL", name);
                    return Err(SessionError::Config(format!(
                        "field name {:?} contains a NUL byte at {}",
                        name,
                        err.nul_position()
                    )));
                }
            };
            names.push(String::from(name));
            names_cstr.push(name_cstr);
        }
        def1x!("{:?}", names);

        Ok(FieldProjection { names, names_cstr })
    }

    /// Count of projected fields; every [`LogEntry`] has this many values.
    ///
    /// [`LogEntry`]: crate::data::entry::LogEntry
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        self.names.as_slice()
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(|s| s.as_str())
    }

    /// Index of the first occurrence of `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub(crate) fn name_cstr(&self, index: usize) -> &CString {
        &self.names_cstr[index]
    }
}
