//! Stored (identity) codec: the column payload is carried verbatim.
//!
//! Exists so the container layer stays testable independent of any real
//! compressor, and for payloads that are already compressed.

use crate::error::BintableError;

pub fn encode(input_bytes: &[u8]) -> Result<Vec<u8>, BintableError> {
    Ok(input_bytes.to_vec())
}

pub fn decode(input_bytes: &[u8]) -> Result<Vec<u8>, BintableError> {
    Ok(input_bytes.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_is_identity() {
        let original = b"anything at all, \x00\xFF included";
        assert_eq!(encode(original).unwrap(), original);
        assert_eq!(decode(original).unwrap(), original);
    }
}
