// src/data/entry.rs

//! A [`LogEntry`] is one journal entry projected through a
//! [`FieldProjection`].
//!
//! [`FieldProjection`]: crate::data::fields::FieldProjection

use std::borrow::Cow;
use std::fmt;
use std::ops::Index;

use ::bstr::ByteSlice; // attaches `find_byte`, `as_bstr` to `&[u8]`

use crate::common::Bytes;
use crate::data::fields::{
    FieldProjection,
    FIELD_MID_U8,
};
use crate::errors::{
    Result,
    SessionError,
};

/// Return the value part of raw journal field data `FIELD=value`, i.e.
/// everything after the first `=`.
///
/// Field data without `=` is malformed and returns
/// [`SessionError::Integrity`].
pub fn field_value(data: &[u8]) -> Result<&[u8]> {
    match data.find_byte(FIELD_MID_U8) {
        Some(at) => Ok(&data[at + 1..]),
        None => Err(SessionError::Integrity(format!(
            "journal field data {:?} has no '=' separator",
            data.as_bstr()
        ))),
    }
}

/// The values of one journal entry, one per projected field, in
/// projection order.
///
/// A field absent on the entry has an empty value. Values are raw bytes;
/// journal values are usually, but not always, UTF-8.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct LogEntry {
    values: Vec<Bytes>,
}

impl fmt::Debug for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list()
            .entries(self.values.iter().map(|v| v.as_bstr()))
            .finish()
    }
}

impl LogEntry {
    pub(crate) fn with_capacity(capacity: usize) -> LogEntry {
        LogEntry {
            values: Vec::with_capacity(capacity),
        }
    }

    /// Append the value of raw field data `FIELD=value`.
    pub(crate) fn push_field_data(&mut self, data: &[u8]) -> Result<()> {
        let value = field_value(data)?;
        self.values.push(value.to_vec());

        Ok(())
    }

    /// Append the empty value of a field absent on this entry.
    pub(crate) fn push_absent(&mut self) {
        self.values.push(Bytes::with_capacity(0));
    }

    /// Create a `LogEntry` directly from values.
    pub fn from_values(values: Vec<Bytes>) -> LogEntry {
        LogEntry { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&[u8]> {
        self.values.get(index).map(|v| v.as_slice())
    }

    /// Value at `index` as text, invalid UTF-8 replaced.
    pub fn get_str(&self, index: usize) -> Option<Cow<'_, str>> {
        self.values.get(index).map(|v| String::from_utf8_lossy(v))
    }

    /// Value of the first field named `name` in `projection`.
    ///
    /// `projection` must be the projection this entry was read with.
    pub fn get_by_name(&self, projection: &FieldProjection, name: &str) -> Option<&[u8]> {
        projection.position(name).and_then(|index| self.get(index))
    }

    pub fn values(&self) -> &[Bytes] {
        self.values.as_slice()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Bytes> {
        self.values.iter()
    }

    pub fn into_values(self) -> Vec<Bytes> {
        self.values
    }
}

impl Index<usize> for LogEntry {
    type Output = [u8];

    fn index(&self, index: usize) -> &[u8] {
        self.values[index].as_slice()
    }
}

impl<'a> IntoIterator for &'a LogEntry {
    type Item = &'a Bytes;
    type IntoIter = std::slice::Iter<'a, Bytes>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
