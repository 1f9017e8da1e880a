// In: src/config.rs

//! The single source of truth for all bintable codec configuration.
//!
//! This module defines the unified `BintableConfig` struct, which is designed
//! to be created once at the application boundary (e.g., from a user's JSON
//! file or CLI flags) and then passed down through the system explicitly.
//!
//! Nothing in the codec reads ambient global state: block size and codec
//! choice travel with this struct, which keeps per-column work deterministic
//! and side-effect-free.

use serde::{Deserialize, Serialize};

//==================================================================================
// I. Core Configuration Enums & Structs
//==================================================================================

/// Selects the block codec applied to each column's value stream.
///
/// The container format is codec-agnostic: the chosen codec is recorded in
/// the container header so the decode side needs no out-of-band knowledge.
/// Split artifacts are headerless, so decoding one takes the codec as an
/// explicit argument instead.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "codec", rename_all = "snake_case")]
pub enum Codec {
    /// Stored, uncompressed. Useful for already-compressed payloads and for
    /// testing the container layer in isolation.
    Raw,

    /// **Default:** The in-crate LZ4-style block codec (literal runs +
    /// back-references inside bounded, independently decodable blocks).
    Lz4,

    /// Zstandard, whole-stream. Heavier but denser than the block codec.
    Zstd {
        /// Compression level passed straight to the zstd encoder.
        #[serde(default = "default_zstd_level")]
        level: i32,
    },
}

// Implement `Default` manually for `Codec` because of the struct variant.
impl Default for Codec {
    fn default() -> Self {
        Codec::Lz4
    }
}

/// Provides a sensible default zstd level for serde.
fn default_zstd_level() -> i32 {
    3
}

//==================================================================================
// II. The Unified BintableConfig
//==================================================================================

/// The single, unified configuration for an encode or decode pass.
/// Created once and threaded through every component call.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "snake_case")]
pub struct BintableConfig {
    /// The block codec applied to every column.
    #[serde(default)]
    pub codec: Codec,

    /// **The target number of uncompressed bytes per block.**
    /// Bounds the working memory of both the compressor and the streaming
    /// decompressor: neither ever holds more than one block of a column in
    /// flight. Matches never cross a block boundary.
    #[serde(default = "default_block_size")]
    pub block_size: usize,
}

// Default implementation to make constructing the config easier.
impl Default for BintableConfig {
    fn default() -> Self {
        Self {
            codec: Codec::default(),
            block_size: default_block_size(),
        }
    }
}

/// Helper for `serde` to provide a default for `block_size`.
fn default_block_size() -> usize {
    64 * 1024
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_lz4_with_64k_blocks() {
        let config = BintableConfig::default();
        assert_eq!(config.codec, Codec::Lz4);
        assert_eq!(config.block_size, 64 * 1024);
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: BintableConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.codec, Codec::Lz4);
        assert_eq!(config.block_size, 64 * 1024);
    }

    #[test]
    fn test_codec_deserializes_tagged_variants() {
        let config: BintableConfig =
            serde_json::from_str(r#"{"codec": {"codec": "zstd", "level": 7}}"#).unwrap();
        assert_eq!(config.codec, Codec::Zstd { level: 7 });

        let config: BintableConfig =
            serde_json::from_str(r#"{"codec": {"codec": "raw"}, "block_size": 512}"#).unwrap();
        assert_eq!(config.codec, Codec::Raw);
        assert_eq!(config.block_size, 512);
    }
}
