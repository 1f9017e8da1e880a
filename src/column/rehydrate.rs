//! The text rehydrator: converts a decoded column's raw value stream back
//! into newline-joined text.
//!
//! Exactly one newline separates consecutive values and none trails the last
//! one, so a rehydrated column compares byte-for-byte against the
//! newline-join of the source column's values. (The CLI printers append a
//! final newline per value when writing to a terminal; the library form is
//! the canonical one.)

use crate::column::value;
use crate::error::BintableError;

/// Joins each decoded value with a single `\n`, in row order.
pub fn rehydrate(value_stream: &[u8]) -> Result<String, BintableError> {
    let values = value::decode_values(value_stream)?;
    let mut out = String::with_capacity(value_stream.len());
    for (i, value) in values.into_iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&String::from_utf8(value)?);
    }
    Ok(out)
}
