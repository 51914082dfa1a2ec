// src/common.rs
//
// common imports, type aliases, and other globals (avoids circular imports)

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// general
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// General purpose counting type.
pub type Count = u64;

/// Sequence of Bytes
pub type Bytes = Vec<u8>;

/// Microseconds since the Unix epoch, as the journal stores timestamps.
pub type EpochMicroseconds = u64;

/// Range of session `api_calls` values that force a native call error.
#[cfg(test)]
pub type ForceErrorRange = std::ops::Range<Count>;
#[cfg(test)]
pub type ForceErrorRangeOpt = Option<ForceErrorRange>;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// custom Results enums
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

// XXX: ripped from '\.rustup\toolchains\beta-x86_64-pc-windows-msvc\lib\rustlib\src\rust\library\core\src\result.rs'
//      https://doc.rust-lang.org/src/core/result.rs.html#481-495

/// `Result` Extended
/// for functions that step through a stream of items.
///
/// `Done` is the expected end of the stream, it is not an error.
#[derive(Debug, PartialEq)]
pub enum ResultFind<T, E> {
    /// Contains the success data
    Found(T),
    /// Nothing more to return (end of stream), but no bad errors happened
    Done,
    /// Contains the error value, something bad happened
    Err(E),
}

impl<T, E> ResultFind<T, E> {
    // Querying the contained values

    /// Returns `true` if the result is [`Found`, 'Done`].
    #[must_use = "if you intended to assert that this is ok, consider `.unwrap()` instead"]
    #[inline(always)]
    pub const fn is_ok(&self) -> bool {
        matches!(*self, ResultFind::Found(_) | ResultFind::Done)
    }

    /// Returns `true` if the result is [`Err`].
    #[must_use = "if you intended to assert that this is err, consider `.unwrap_err()` instead"]
    #[inline(always)]
    pub const fn is_err(&self) -> bool {
        !self.is_ok()
    }

    /// Returns `true` if the result is [`Found`].
    #[inline(always)]
    pub const fn is_found(&self) -> bool {
        matches!(*self, ResultFind::Found(_))
    }

    /// Returns `true` if the result is [`Done`].
    #[inline(always)]
    pub const fn is_done(&self) -> bool {
        matches!(*self, ResultFind::Done)
    }

    // Adapter for each variant

    /// Converts from `ResultFind<T, E>` to [`Option<T>`].
    ///
    /// Converts `self` into an [`Option<T>`], consuming `self`,
    /// and discarding the error, if any.
    #[inline(always)]
    pub fn ok(self) -> Option<T> {
        match self {
            ResultFind::Found(x) => Some(x),
            ResultFind::Done => None,
            ResultFind::Err(_) => None,
        }
    }

    /// Converts from `ResultFind<T, E>` to [`Option<E>`].
    ///
    /// Converts `self` into an [`Option<E>`], consuming `self`,
    /// and discarding the success value, if any.
    #[inline(always)]
    pub fn err(self) -> Option<E> {
        match self {
            ResultFind::Found(_) => None,
            ResultFind::Done => None,
            ResultFind::Err(x) => Some(x),
        }
    }

    /// Converts to a standard `Result` where `Done` becomes `Ok(None)`.
    ///
    /// Lets callers use `?` on errors while still seeing the end of the
    /// stream.
    #[inline(always)]
    pub fn into_result(self) -> Result<Option<T>, E> {
        match self {
            ResultFind::Found(x) => Ok(Some(x)),
            ResultFind::Done => Ok(None),
            ResultFind::Err(e) => Err(e),
        }
    }
}

impl<T, E> std::fmt::Display for ResultFind<T, E>
where
    E: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResultFind::Found(_) => { write!(f, "ResultFind::Found") },
            ResultFind::Done => { write!(f, "ResultFind::Done") },
            ResultFind::Err(err) => { write!(f, "ResultFind::Err({})", err) },
        }
    }
}
