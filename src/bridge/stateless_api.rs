// In: src/bridge/stateless_api.rs

//! One-shot, stateless transforms over whole inputs held in memory. Each
//! function is a pure `Reading -> Transforming -> Writing` pass; any
//! structural violation aborts with an error and produces no output.

use std::path::Path;

use crate::column::{rehydrate, splitter};
use crate::config::{BintableConfig, Codec};
use crate::container::artifact::Container;
use crate::container::split;
use crate::error::BintableError;
use crate::kernels;

/// Encodes delimited text into a single container byte vector: rows are
/// parsed, split into columns, each column's value stream is compressed with
/// the configured codec, and the results are multiplexed behind a manifest.
pub fn encode_csv(text: &str, config: &BintableConfig) -> Result<Vec<u8>, BintableError> {
    let streams = splitter::split_text(text)?;
    log::debug!("split input into {} columns", streams.len());

    let mut columns = Vec::with_capacity(streams.len());
    for stream in streams {
        columns.push(kernels::encode(stream.as_bytes(), config)?);
    }

    Container {
        codec: config.codec,
        columns,
    }
    .to_bytes()
}

/// Splits a container into per-column artifact files under `dir` and returns
/// the artifact names in ascending column-index order.
pub fn split_container(
    container_bytes: &[u8],
    prefix: &str,
    dir: &Path,
) -> Result<Vec<String>, BintableError> {
    split::split_to_dir(container_bytes, prefix, dir)
}

/// Decompresses one column's compressed bytes (e.g., a split artifact's
/// contents) back into its raw value stream. Artifacts are headerless, so the
/// codec is the caller's to supply.
pub fn decompress_column(payload: &[u8], codec: Codec) -> Result<Vec<u8>, BintableError> {
    kernels::decode(payload, codec)
}

/// Joins a decoded value stream into newline-separated text.
pub fn rehydrate_column(value_stream: &[u8]) -> Result<String, BintableError> {
    rehydrate::rehydrate(value_stream)
}

/// Decodes column `index` of a container straight to its textual form.
pub fn decode_column(container_bytes: &[u8], index: usize) -> Result<String, BintableError> {
    let container = Container::from_bytes(container_bytes)?;
    let payload = container.column_bytes(index)?;
    let value_stream = kernels::decode(payload, container.codec)?;
    rehydrate::rehydrate(&value_stream)
}

/// Full inverse of `encode_csv`: reassembles the delimited text, one `\n`
/// after every row (the row-major printer form).
pub fn decode_csv(container_bytes: &[u8]) -> Result<String, BintableError> {
    let container = Container::from_bytes(container_bytes)?;

    let mut columns = Vec::with_capacity(container.columns.len());
    for payload in &container.columns {
        let value_stream = kernels::decode(payload, container.codec)?;
        let values = crate::column::value::decode_values(&value_stream)?;
        let mut texts = Vec::with_capacity(values.len());
        for value in values {
            texts.push(String::from_utf8(value)?);
        }
        columns.push(texts);
    }

    let rows = columns.first().map(|c| c.len()).unwrap_or(0);
    for (i, column) in columns.iter().enumerate() {
        if column.len() != rows {
            return Err(BintableError::InternalError(format!(
                "column {} holds {} rows, column 0 holds {}",
                i,
                column.len(),
                rows
            )));
        }
    }

    let mut out = String::new();
    for row in 0..rows {
        for (i, column) in columns.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            out.push_str(&column[row]);
        }
        out.push('\n');
    }
    Ok(out)
}
