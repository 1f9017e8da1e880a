// In: src/error.rs

//! This module defines the single, unified error type for the entire bintable library.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.
//!
//! Every failure is terminal for the current operation: nothing in this crate
//! retries internally. Each variant carries enough context (row index, column
//! index, byte offset) to locate the fault in the input.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BintableError {
    // =========================================================================
    // === Structural input errors (text boundary)
    // =========================================================================
    /// A row's field count did not match the table's established width.
    #[error("ragged row {row}: expected {expected} fields, found {found}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },

    // =========================================================================
    // === Decode-path errors (binary boundary)
    // =========================================================================
    /// A value declared more bytes than remain in its stream.
    #[error(
        "truncated input at byte {offset}: value declares {declared} bytes, {available} remain"
    )]
    TruncatedInput {
        offset: usize,
        declared: usize,
        available: usize,
    },

    /// The block decompressor hit an invalid back-reference, a length
    /// mismatch, or ran past its declared bounds.
    #[error("corrupt compressed stream: {0}")]
    CorruptStream(String),

    /// The container manifest is inconsistent with the bytes that follow it.
    #[error("corrupt container manifest: {0}")]
    ManifestCorrupt(String),

    /// A column was requested beyond the container's column count.
    #[error("column index {index} out of range: container holds {count} columns")]
    IndexOutOfRange { index: usize, count: usize },

    // =========================================================================
    // === External Error Wrappers (Using #[from] for automatic conversion)
    // =========================================================================
    /// An error originating from the underlying I/O subsystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error from the Serde JSON library, raised while loading a config file.
    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// A decoded value was not valid UTF-8 and could not be rehydrated as text.
    #[error("decoded value is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    // =========================================================================
    // === Low-Level Kernel Errors
    // =========================================================================
    #[error("Zstd operation failed: {0}")]
    ZstdError(String),

    #[error("LEB128 decoding error: {0}")]
    Leb128DecodeError(String),

    #[error("Internal logic error (this is a bug): {0}")]
    InternalError(String),
}
