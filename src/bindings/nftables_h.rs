// src/bindings/nftables_h.rs

//! Declarations from [`nftables/libnftables.h`].
//!
//! [`nftables/libnftables.h`]: https://git.netfilter.org/nftables/tree/include/nftables/libnftables.h

/// Opaque nftables control context. Only ever used behind a pointer.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct nft_ctx {
    pub _unused: [u8; 0],
}

/// Flags for `nft_ctx_new`.
pub const NFT_CTX_DEFAULT: u32 = 0;

// `enum nft_output_flags`
pub const NFT_CTX_OUTPUT_REVERSEDNS: ::std::os::raw::c_uint = 1 << 0;
pub const NFT_CTX_OUTPUT_SERVICE: ::std::os::raw::c_uint = 1 << 1;
pub const NFT_CTX_OUTPUT_STATELESS: ::std::os::raw::c_uint = 1 << 2;
pub const NFT_CTX_OUTPUT_HANDLE: ::std::os::raw::c_uint = 1 << 3;
pub const NFT_CTX_OUTPUT_JSON: ::std::os::raw::c_uint = 1 << 4;
pub const NFT_CTX_OUTPUT_ECHO: ::std::os::raw::c_uint = 1 << 5;
pub const NFT_CTX_OUTPUT_GUID: ::std::os::raw::c_uint = 1 << 6;
pub const NFT_CTX_OUTPUT_NUMERIC_PROTO: ::std::os::raw::c_uint = 1 << 7;
pub const NFT_CTX_OUTPUT_NUMERIC_PRIO: ::std::os::raw::c_uint = 1 << 8;
pub const NFT_CTX_OUTPUT_NUMERIC_SYMBOL: ::std::os::raw::c_uint = 1 << 9;
pub const NFT_CTX_OUTPUT_NUMERIC_TIME: ::std::os::raw::c_uint = 1 << 10;
pub const NFT_CTX_OUTPUT_NUMERIC_ALL: ::std::os::raw::c_uint = NFT_CTX_OUTPUT_NUMERIC_PROTO
    | NFT_CTX_OUTPUT_NUMERIC_PRIO
    | NFT_CTX_OUTPUT_NUMERIC_SYMBOL
    | NFT_CTX_OUTPUT_NUMERIC_TIME;
pub const NFT_CTX_OUTPUT_TERSE: ::std::os::raw::c_uint = 1 << 11;
