// src/sessions/mod.rs

//! The `sessions` module holds the two sessions over native libraries.
//!
//! - [`JournalSession`] tails the local systemd journal, filtered by the
//!   journal's own match evaluator, projecting each entry onto a fixed list
//!   of fields.
//! - [`NftSession`] applies nftables rule changes and reports the text
//!   the library produced.
//!
//! Each session owns exactly one native handle and releases it when
//! dropped. A session holds raw pointers so it is neither `Send` nor
//! `Sync`; it stays on the thread that created it.
//!
//! [`JournalSession`]: crate::sessions::journalsession::JournalSession
//! [`NftSession`]: crate::sessions::nftsession::NftSession

/// Force an error when the session's `api_calls` is in the range.
/// Testing only.
macro_rules! testing_force_error {
    (
        $force_error_range_opt:expr,
        $func_name:expr,
        $api_calls:expr,
        $api_call_errors:expr,
        $err_type:expr
    ) => {
        #[cfg(test)]
        {
            match $force_error_range_opt {
                Some(range) => {
                    let r: i32 = -99;
                    let start = range.start;
                    let end = range.end;
                    if $api_calls >= start && $api_calls <= end {
                        $api_calls += 1;
                        $api_call_errors += 1;
                        def1o!("{}() FORCE_ERROR_RANGE {}", $func_name, r);
                        let err = $crate::errors::Error_from_Errno(r, $func_name);
                        return $err_type($crate::errors::SessionError::Source(err));
                    }
                }
                None => {}
            }
        }
    };
}

pub mod journalsession;
pub mod nftsession;
