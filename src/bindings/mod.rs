// src/bindings/mod.rs

//! Hand-maintained subsets of the C declarations needed from
//! [`systemd/sd-journal.h`] and [`nftables/libnftables.h`].
//!
//! Only opaque handle types and constants live here. Function signatures
//! are declared in the [`libload`] wrappers, which resolve them at runtime.
//!
//! [`systemd/sd-journal.h`]: https://github.com/systemd/systemd/blob/v249/src/systemd/sd-journal.h
//! [`nftables/libnftables.h`]: https://git.netfilter.org/nftables/tree/include/nftables/libnftables.h
//! [`libload`]: crate::libload

#![allow(non_upper_case_globals)]
#![allow(non_camel_case_types)]

pub mod nftables_h;
pub mod sd_journal_h;
