//! This file is the root of the `bintable` Rust crate.
//!
//! bintable is a column-oriented binary table codec: it transforms row-major
//! delimited text into a compressed, column-split binary container and
//! reverses that transform exactly. Columns are independent once split, the
//! container is codec-agnostic, and every structural violation is a terminal,
//! located error.
//!
//! The root's responsibilities are strictly limited to declaring the
//! top-level modules and re-exporting the public surface.

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//==================================================================================
// 1. Module Declarations
//==================================================================================

pub mod bridge;
pub mod column;
pub mod config;
pub mod container;
pub mod error;
pub mod kernels;

//==================================================================================
// 2. Public Re-exports
//==================================================================================

pub use bridge::{
    decode_column, decode_csv, decompress_column, encode_csv, rehydrate_column, split_container,
};
pub use config::{BintableConfig, Codec};
pub use container::{Container, ManifestInfo};
pub use error::BintableError;
