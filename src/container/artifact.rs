//! Defines the self-describing on-disk format for a compressed column container.
//! This module is the single source of truth for serialization, deserialization,
//! and efficient manifest peeking of the artifact.
//!
//! Layout:
//!
//! ```text
//! [magic b"BTBL"][version: u16 LE][codec_id: u8][column_count: u32 LE]
//! [compressed_len_i: u64 LE] * column_count
//! [payload_0][payload_1]...
//! ```
//!
//! The manifest is discoverable without touching payloads, and the declared
//! lengths must sum *exactly* to the remaining file size — a one-byte deficit
//! or surplus is `ManifestCorrupt`, never a silent success.

use std::io::{Cursor, Read, Write};

use crate::config::Codec;
use crate::error::BintableError;

//==================================================================================
// Format Constants
//==================================================================================

/// The magic number to identify the start of a bintable container.
pub const FILE_MAGIC: &[u8; 4] = b"BTBL";
/// The current version of the container format.
pub const FILE_FORMAT_VERSION: u16 = 1;
/// The minimum possible size of a valid container in bytes.
const MIN_CONTAINER_SIZE: usize = 11; // magic(4) + ver(2) + codec(1) + count(4)

const CODEC_ID_RAW: u8 = 0;
const CODEC_ID_LZ4: u8 = 1;
const CODEC_ID_ZSTD: u8 = 2;

fn codec_wire_id(codec: Codec) -> u8 {
    match codec {
        Codec::Raw => CODEC_ID_RAW,
        Codec::Lz4 => CODEC_ID_LZ4,
        Codec::Zstd { .. } => CODEC_ID_ZSTD,
    }
}

fn codec_from_wire_id(id: u8) -> Result<Codec, BintableError> {
    match id {
        CODEC_ID_RAW => Ok(Codec::Raw),
        CODEC_ID_LZ4 => Ok(Codec::Lz4),
        // The level only matters on the encode side; any value decodes.
        CODEC_ID_ZSTD => Ok(Codec::Zstd { level: 3 }),
        other => Err(BintableError::ManifestCorrupt(format!(
            "unknown codec id {}",
            other
        ))),
    }
}

//==================================================================================
// Public Structs
//==================================================================================

/// Metadata extracted from a container's manifest.
/// This is the return type of the efficient `peek_manifest` function, allowing
/// inspection (and payload addressing) without reading any payload bytes.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ManifestInfo {
    /// The version of the container format that was parsed.
    pub format_version: u16,
    /// The codec every column payload was compressed with.
    pub codec: Codec,
    /// Per-column compressed byte length, in column order.
    pub column_lengths: Vec<usize>,
    /// The size of the entire header (fixed part + manifest) in bytes.
    pub header_size: usize,
    /// The total size of all compressed payloads.
    pub data_size: usize,
}

impl ManifestInfo {
    pub fn column_count(&self) -> usize {
        self.column_lengths.len()
    }

    /// Absolute byte range of column `i`'s payload within the container.
    pub fn payload_range(&self, index: usize) -> Result<std::ops::Range<usize>, BintableError> {
        if index >= self.column_lengths.len() {
            return Err(BintableError::IndexOutOfRange {
                index,
                count: self.column_lengths.len(),
            });
        }
        let start = self.header_size + self.column_lengths[..index].iter().sum::<usize>();
        Ok(start..start + self.column_lengths[index])
    }

    /// Split artifact names for this container: `prefix` followed by the
    /// column index, zero-padded to the digit count of the largest index.
    pub fn artifact_names(&self, prefix: &str) -> Vec<String> {
        artifact_names(prefix, self.column_count())
    }
}

/// Represents a fully assembled container in memory: the codec plus each
/// column's compressed payload, in column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub codec: Codec,
    pub columns: Vec<Vec<u8>>,
}

//==================================================================================
// Core Implementation
//==================================================================================

impl Container {
    /// Serializes the container into its canonical byte form. Column order is
    /// payload order; the output is deterministic.
    pub fn to_bytes(&self) -> Result<Vec<u8>, BintableError> {
        if self.columns.len() > u32::MAX as usize {
            return Err(BintableError::InternalError(format!(
                "column count {} exceeds format limit",
                self.columns.len()
            )));
        }

        let data_size: usize = self.columns.iter().map(|c| c.len()).sum();
        let header_size = MIN_CONTAINER_SIZE + self.columns.len() * 8;
        let mut buf = Vec::with_capacity(header_size + data_size);

        // Writing to a Vec<u8> cannot fail.
        buf.write_all(FILE_MAGIC).unwrap();
        buf.write_all(&FILE_FORMAT_VERSION.to_le_bytes()).unwrap();
        buf.push(codec_wire_id(self.codec));
        buf.write_all(&(self.columns.len() as u32).to_le_bytes())
            .unwrap();
        for column in &self.columns {
            buf.write_all(&(column.len() as u64).to_le_bytes()).unwrap();
        }
        for column in &self.columns {
            buf.write_all(column).unwrap();
        }

        log::debug!(
            "assembled container: {} columns, {} header bytes, {} payload bytes",
            self.columns.len(),
            header_size,
            data_size
        );
        Ok(buf)
    }

    /// Deserializes a full byte slice into a `Container`, payloads included.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BintableError> {
        // Reuse peek_manifest for all header parsing and validation;
        // from_bytes only has to lift the payloads out.
        let info = Self::peek_manifest(bytes)?;

        let mut cursor = Cursor::new(bytes);
        cursor.set_position(info.header_size as u64);

        let map_err = |e: std::io::Error| BintableError::ManifestCorrupt(e.to_string());
        let mut columns = Vec::with_capacity(info.column_lengths.len());
        for &len in &info.column_lengths {
            let mut payload = vec![0; len];
            cursor.read_exact(&mut payload).map_err(map_err)?;
            columns.push(payload);
        }

        Ok(Self {
            codec: info.codec,
            columns,
        })
    }

    /// Parses and validates the manifest without reading any payload bytes.
    pub fn peek_manifest(bytes: &[u8]) -> Result<ManifestInfo, BintableError> {
        if bytes.len() < MIN_CONTAINER_SIZE {
            return Err(BintableError::ManifestCorrupt(format!(
                "container is too small to be valid: minimum size {}, got {}",
                MIN_CONTAINER_SIZE,
                bytes.len()
            )));
        }

        let mut cursor = Cursor::new(bytes);
        let map_err = |e: std::io::Error| BintableError::ManifestCorrupt(e.to_string());

        let mut magic_buf = [0u8; 4];
        cursor.read_exact(&mut magic_buf).map_err(map_err)?;
        if magic_buf != *FILE_MAGIC {
            return Err(BintableError::ManifestCorrupt(
                "invalid container magic number".into(),
            ));
        }

        let mut u16_buf = [0u8; 2];
        cursor.read_exact(&mut u16_buf).map_err(map_err)?;
        let version = u16::from_le_bytes(u16_buf);
        if version != FILE_FORMAT_VERSION {
            return Err(BintableError::ManifestCorrupt(format!(
                "unsupported container version: expected {}, got {}",
                FILE_FORMAT_VERSION, version
            )));
        }

        let mut u8_buf = [0u8; 1];
        cursor.read_exact(&mut u8_buf).map_err(map_err)?;
        let codec = codec_from_wire_id(u8_buf[0])?;

        let mut u32_buf = [0u8; 4];
        cursor.read_exact(&mut u32_buf).map_err(map_err)?;
        let column_count = u32::from_le_bytes(u32_buf) as usize;

        // SECURITY: validate the declared manifest length against the buffer
        // before allocating anything proportional to it.
        let header_size = MIN_CONTAINER_SIZE + column_count * 8;
        if bytes.len() < header_size {
            return Err(BintableError::ManifestCorrupt(format!(
                "manifest for {} columns needs {} header bytes, file holds {}",
                column_count,
                header_size,
                bytes.len()
            )));
        }

        let mut u64_buf = [0u8; 8];
        let mut column_lengths = Vec::with_capacity(column_count);
        let mut data_size: usize = 0;
        for _ in 0..column_count {
            cursor.read_exact(&mut u64_buf).map_err(map_err)?;
            let len = u64::from_le_bytes(u64_buf) as usize;
            data_size = data_size.saturating_add(len);
            column_lengths.push(len);
        }

        // The declared payload lengths must account for every remaining byte.
        let remaining = bytes.len() - header_size;
        if data_size != remaining {
            return Err(BintableError::ManifestCorrupt(format!(
                "declared payload lengths sum to {} bytes but {} remain after the manifest",
                data_size, remaining
            )));
        }

        Ok(ManifestInfo {
            format_version: version,
            codec,
            column_lengths,
            header_size,
            data_size,
        })
    }

    /// Borrow column `i`'s compressed payload.
    pub fn column_bytes(&self, index: usize) -> Result<&[u8], BintableError> {
        self.columns
            .get(index)
            .map(|c| c.as_slice())
            .ok_or(BintableError::IndexOutOfRange {
                index,
                count: self.columns.len(),
            })
    }
}

//==================================================================================
// Artifact Naming
//==================================================================================

/// Names for `column_count` split artifacts: `prefix` + zero-padded decimal
/// index, padded to the digit count of `column_count - 1`.
pub fn artifact_names(prefix: &str, column_count: usize) -> Vec<String> {
    if column_count == 0 {
        return Vec::new();
    }
    let width = (column_count - 1).to_string().len();
    (0..column_count)
        .map(|i| format!("{prefix}{i:0width$}"))
        .collect()
}

//==================================================================================
// Unit Tests
//==================================================================================
