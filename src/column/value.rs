//! The value encoder/decoder: serializes one text field and its length so it
//! can be located and recovered independently of its neighbors.
//!
//! Each value is framed as `LEB128(length) ++ raw bytes`. Carrying an explicit
//! length (rather than a delimiter byte) makes the encoding injective for
//! every byte sequence: empty values, values containing newlines, commas, or
//! any other byte all round-trip exactly, and concatenated values re-split
//! unambiguously.

use std::io::Cursor;

use crate::error::BintableError;
use crate::kernels::leb128;

//==================================================================================
// 1. Public API
//==================================================================================

/// Appends one length-prefixed value to `output_buf`.
pub fn encode_value(field: &[u8], output_buf: &mut Vec<u8>) -> Result<(), BintableError> {
    leb128::encode_one(field.len() as u64, output_buf)?;
    output_buf.extend_from_slice(field);
    Ok(())
}

/// Decodes the next value at the cursor, advancing it past the value.
///
/// Fails with `TruncatedInput` when the length prefix declares more bytes
/// than remain in the stream.
pub fn decode_value<'a>(cursor: &mut Cursor<&'a [u8]>) -> Result<&'a [u8], BintableError> {
    let declared = leb128::decode_one::<u64>(cursor)? as usize;
    let start = cursor.position() as usize;
    let stream: &'a [u8] = *cursor.get_ref();
    let available = stream.len() - start;

    if declared > available {
        return Err(BintableError::TruncatedInput {
            offset: start,
            declared,
            available,
        });
    }

    cursor.set_position((start + declared) as u64);
    Ok(&stream[start..start + declared])
}

/// Decodes an entire value stream into owned values, in order.
pub fn decode_values(stream: &[u8]) -> Result<Vec<Vec<u8>>, BintableError> {
    let mut cursor = Cursor::new(stream);
    let mut values = Vec::new();
    while (cursor.position() as usize) < stream.len() {
        values.push(decode_value(&mut cursor)?.to_vec());
    }
    Ok(values)
}

//==================================================================================
// 2. Unit Tests
//==================================================================================
