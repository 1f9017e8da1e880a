//! This module serves as the public API and dispatcher for the collection of all
//! pure, stateless compression and decompression kernels.
//!
//! It declares all kernel sub-modules and provides a single, unified pair of
//! `encode`/`decode` functions keyed on the configured [`Codec`]. This
//! dispatcher is the sole entry point used by the container multiplexer and
//! the column pipeline; nothing else calls a kernel directly, which keeps the
//! container format and the block codecs independently testable.

use crate::config::{BintableConfig, Codec};
use crate::error::BintableError;

//==================================================================================
// 1. Module Declarations
//==================================================================================

/// Varint framing used by the value codec.
pub mod leb128;

/// Stored passthrough.
pub mod raw;

/// The in-crate LZ4-style block codec.
pub mod lz4;

/// Zstandard wrapper.
pub mod zstd;

//==================================================================================
// 2. Public API (Unified Dispatchers)
//==================================================================================

/// Compresses one column's value stream with the configured codec.
pub fn encode(input_bytes: &[u8], config: &BintableConfig) -> Result<Vec<u8>, BintableError> {
    match config.codec {
        Codec::Raw => raw::encode(input_bytes),
        Codec::Lz4 => lz4::encode(input_bytes, config.block_size),
        Codec::Zstd { level } => zstd::encode(input_bytes, level),
    }
}

/// Decompresses one column's payload with the given codec.
///
/// Takes the codec rather than the whole config: the decode side learns the
/// codec from the container header (or, for a headerless split artifact, from
/// the caller), never from ambient configuration.
pub fn decode(input_bytes: &[u8], codec: Codec) -> Result<Vec<u8>, BintableError> {
    match codec {
        Codec::Raw => raw::decode(input_bytes),
        Codec::Lz4 => lz4::decode(input_bytes),
        Codec::Zstd { .. } => zstd::decode(input_bytes),
    }
}

//==================================================================================
// 3. Unit Tests
//==================================================================================
