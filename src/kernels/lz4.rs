//! This module contains the pure, stateless kernels for the in-crate LZ4-style
//! block codec: a byte-oriented format mixing literal runs and back-references
//! (match offset + match length) inside bounded-size blocks.
//!
//! A compressed stream is a sequence of self-describing blocks:
//!
//! ```text
//! [compressed_len: u32 LE][uncompressed_len: u32 LE][token stream ...]
//! ```
//!
//! The token stream follows the LZ4 block convention: a token byte whose high
//! nibble is the literal-run length and whose low nibble is the match length
//! minus four, each nibble extended past 15 with 0xFF runs plus a final byte
//! below 255; then the literals; then a little-endian u16 back-reference
//! offset. The final sequence of a block is literals-only. Matches never cross
//! a block boundary, so decoding needs one block of working memory regardless
//! of the total stream size.
//!
//! The decoder never reads or writes past declared bounds: an offset of zero,
//! an offset reaching before the start of the decoded block, a token stream
//! that over- or under-produces its declared `uncompressed_len`, or a
//! truncated header all fail with `CorruptStream`.

use std::io::{Read, Write};

use crate::error::BintableError;

//==================================================================================
// 1. Format Constants
//==================================================================================

/// Shortest back-reference worth emitting; also the implicit match-length bias.
const MIN_MATCH: usize = 4;
/// Back-reference offsets are u16, so the window is capped at 64 KiB - 1.
const MAX_OFFSET: usize = u16::MAX as usize;
/// Size of each block's header: compressed length + uncompressed length.
const BLOCK_HEADER_SIZE: usize = 8;
/// log2 of the match-finder hash table size.
const HASH_BITS: u32 = 12;

//==================================================================================
// 2. Public API
//==================================================================================

/// Compresses a byte slice into a sequence of self-describing blocks of at
/// most `block_size` uncompressed bytes each. The empty input encodes to an
/// empty stream.
pub fn encode(input_bytes: &[u8], block_size: usize) -> Result<Vec<u8>, BintableError> {
    if block_size == 0 || block_size > u32::MAX as usize {
        return Err(BintableError::InternalError(format!(
            "invalid block size: {}",
            block_size
        )));
    }
    if input_bytes.is_empty() {
        return Ok(Vec::new());
    }

    let mut output_buf = Vec::with_capacity(input_bytes.len() / 2 + BLOCK_HEADER_SIZE);
    let mut table = vec![0u32; 1 << HASH_BITS];
    let mut body = Vec::with_capacity(block_size);

    for chunk in input_bytes.chunks(block_size) {
        table.fill(0);
        body.clear();
        compress_block(chunk, &mut table, &mut body);

        output_buf.extend_from_slice(&(body.len() as u32).to_le_bytes());
        output_buf.extend_from_slice(&(chunk.len() as u32).to_le_bytes());
        output_buf.extend_from_slice(&body);
    }

    Ok(output_buf)
}

/// Decompresses a full block stream held in memory.
/// `decode(&encode(x, any)?)? == x` for every input `x`.
pub fn decode(input_bytes: &[u8]) -> Result<Vec<u8>, BintableError> {
    let mut output_buf = Vec::new();
    let mut cursor = 0usize;
    let mut scratch = Vec::new();

    while cursor < input_bytes.len() {
        let (body, expected, next) = read_block_header(input_bytes, cursor)?;
        decompress_block(body, expected, &mut scratch)?;
        output_buf.extend_from_slice(&scratch);
        cursor = next;
    }

    Ok(output_buf)
}

/// Streaming decompression: reads blocks one at a time from `reader` and
/// writes their decoded bytes to `writer`. Working memory is bounded by the
/// largest single block (one compressed + one decoded buffer, both reused),
/// never by the total stream size. Returns the number of decoded bytes.
pub fn decode_stream<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
) -> Result<u64, BintableError> {
    let mut header = [0u8; BLOCK_HEADER_SIZE];
    let mut body = Vec::new();
    let mut scratch = Vec::new();
    let mut total: u64 = 0;

    loop {
        match read_exact_or_eof(reader, &mut header)? {
            HeaderRead::Eof => return Ok(total),
            HeaderRead::Partial(n) => {
                return Err(BintableError::CorruptStream(format!(
                    "truncated block header: got {} of {} bytes",
                    n, BLOCK_HEADER_SIZE
                )))
            }
            HeaderRead::Full => {}
        }

        let compressed_len = u32::from_le_bytes(header[0..4].try_into().unwrap()) as usize;
        let expected = u32::from_le_bytes(header[4..8].try_into().unwrap()) as usize;

        body.resize(compressed_len, 0);
        reader.read_exact(&mut body).map_err(|e| {
            BintableError::CorruptStream(format!("truncated block body: {}", e))
        })?;

        decompress_block(&body, expected, &mut scratch)?;
        writer.write_all(&scratch)?;
        total += scratch.len() as u64;
    }
}

//==================================================================================
// 3. Core Logic (The "Engine")
//==================================================================================

#[inline(always)]
fn hash4(bytes: &[u8]) -> usize {
    let v = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    (v.wrapping_mul(2654435761) >> (32 - HASH_BITS)) as usize
}

/// Greedy single-pass matcher over one block. Positions are stored in the hash
/// table as `index + 1` so that zero means "empty".
fn compress_block(src: &[u8], table: &mut [u32], out: &mut Vec<u8>) {
    let n = src.len();
    let mut i = 0usize;
    let mut anchor = 0usize;

    while i + MIN_MATCH <= n {
        let h = hash4(&src[i..]);
        let candidate = table[h] as usize;
        table[h] = (i + 1) as u32;

        if candidate != 0 {
            let cand = candidate - 1;
            if i - cand <= MAX_OFFSET && src[cand..cand + MIN_MATCH] == src[i..i + MIN_MATCH] {
                let mut match_len = MIN_MATCH;
                while i + match_len < n && src[cand + match_len] == src[i + match_len] {
                    match_len += 1;
                }
                emit_sequence(out, &src[anchor..i], (i - cand) as u16, match_len);
                i += match_len;
                anchor = i;
                continue;
            }
        }
        i += 1;
    }

    // Whatever the matcher could not cover becomes the final literal run.
    // A block that found no matches at all degrades to exactly this run.
    if anchor < n {
        emit_final_literals(out, &src[anchor..n]);
    }
}

/// Writes one `literals + back-reference` sequence.
fn emit_sequence(out: &mut Vec<u8>, literals: &[u8], offset: u16, match_len: usize) {
    let lit_len = literals.len();
    let match_code = match_len - MIN_MATCH;

    let token = (nibble(lit_len) << 4) | nibble(match_code);
    out.push(token);
    push_length_extension(out, lit_len);
    out.extend_from_slice(literals);
    out.extend_from_slice(&offset.to_le_bytes());
    push_length_extension(out, match_code);
}

/// Writes the terminal literals-only sequence (no offset follows).
fn emit_final_literals(out: &mut Vec<u8>, literals: &[u8]) {
    let lit_len = literals.len();
    out.push(nibble(lit_len) << 4);
    push_length_extension(out, lit_len);
    out.extend_from_slice(literals);
}

#[inline(always)]
fn nibble(len: usize) -> u8 {
    if len >= 15 {
        15
    } else {
        len as u8
    }
}

/// Emits the 0xFF-run extension for a nibble that saturated at 15.
fn push_length_extension(out: &mut Vec<u8>, len: usize) {
    if len < 15 {
        return;
    }
    let mut rest = len - 15;
    while rest >= 255 {
        out.push(255);
        rest -= 255;
    }
    out.push(rest as u8);
}

/// Decodes one block body into `out` (cleared first), verifying every bound
/// and the declared uncompressed length.
fn decompress_block(
    body: &[u8],
    expected: usize,
    out: &mut Vec<u8>,
) -> Result<(), BintableError> {
    out.clear();
    out.reserve(expected);
    let mut pos = 0usize;

    while out.len() < expected {
        let token = *body.get(pos).ok_or_else(|| {
            BintableError::CorruptStream(format!(
                "token stream ended at byte {} with {} of {} bytes produced",
                pos,
                out.len(),
                expected
            ))
        })?;
        pos += 1;

        // Literal run.
        let mut lit_len = (token >> 4) as usize;
        if lit_len == 15 {
            lit_len += read_length_extension(body, &mut pos)?;
        }
        let lit_end = pos.checked_add(lit_len).filter(|&e| e <= body.len()).ok_or_else(|| {
            BintableError::CorruptStream(format!(
                "literal run of {} bytes at byte {} overruns block body",
                lit_len, pos
            ))
        })?;
        out.extend_from_slice(&body[pos..lit_end]);
        pos = lit_end;

        if out.len() > expected {
            return Err(BintableError::CorruptStream(format!(
                "block produced {} bytes but declared {}",
                out.len(),
                expected
            )));
        }
        if out.len() == expected {
            break; // terminal literals-only sequence
        }

        // Back-reference.
        let offset_bytes = body.get(pos..pos + 2).ok_or_else(|| {
            BintableError::CorruptStream(format!("truncated match offset at byte {}", pos))
        })?;
        let offset = u16::from_le_bytes([offset_bytes[0], offset_bytes[1]]) as usize;
        pos += 2;

        if offset == 0 || offset > out.len() {
            return Err(BintableError::CorruptStream(format!(
                "invalid back-reference at byte {}: offset {} with only {} bytes decoded",
                pos,
                offset,
                out.len()
            )));
        }

        let mut match_len = (token & 0x0F) as usize;
        if match_len == 15 {
            match_len += read_length_extension(body, &mut pos)?;
        }
        match_len += MIN_MATCH;

        if out.len() + match_len > expected {
            return Err(BintableError::CorruptStream(format!(
                "match of {} bytes would produce {} bytes, block declared {}",
                match_len,
                out.len() + match_len,
                expected
            )));
        }

        // Copy byte-by-byte: offsets shorter than the match length legally
        // self-overlap (the classic run-generation trick).
        let start = out.len() - offset;
        for k in 0..match_len {
            let b = out[start + k];
            out.push(b);
        }
    }

    if pos != body.len() {
        return Err(BintableError::CorruptStream(format!(
            "{} trailing bytes after block decoded to its declared length",
            body.len() - pos
        )));
    }

    Ok(())
}

fn read_length_extension(body: &[u8], pos: &mut usize) -> Result<usize, BintableError> {
    let mut extra = 0usize;
    loop {
        let b = *body.get(*pos).ok_or_else(|| {
            BintableError::CorruptStream(format!("truncated length extension at byte {}", pos))
        })?;
        *pos += 1;
        extra += b as usize;
        if b < 255 {
            return Ok(extra);
        }
    }
}

fn read_block_header(
    input_bytes: &[u8],
    cursor: usize,
) -> Result<(&[u8], usize, usize), BintableError> {
    let header = input_bytes
        .get(cursor..cursor + BLOCK_HEADER_SIZE)
        .ok_or_else(|| {
            BintableError::CorruptStream(format!(
                "truncated block header at byte {}: {} bytes remain",
                cursor,
                input_bytes.len() - cursor
            ))
        })?;
    let compressed_len = u32::from_le_bytes(header[0..4].try_into().unwrap()) as usize;
    let expected = u32::from_le_bytes(header[4..8].try_into().unwrap()) as usize;

    let body_start = cursor + BLOCK_HEADER_SIZE;
    let body = input_bytes
        .get(body_start..body_start + compressed_len)
        .ok_or_else(|| {
            BintableError::CorruptStream(format!(
                "block at byte {} declares {} body bytes, {} remain",
                cursor,
                compressed_len,
                input_bytes.len() - body_start
            ))
        })?;
    Ok((body, expected, body_start + compressed_len))
}

enum HeaderRead {
    Full,
    Partial(usize),
    Eof,
}

/// Fills `buf` from `reader`, distinguishing a clean EOF (zero bytes read)
/// from a torn header (some but not all bytes read).
fn read_exact_or_eof<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<HeaderRead, BintableError> {
    let mut filled = 0usize;
    while filled < buf.len() {
        let n = reader.read(&mut buf[filled..])?;
        if n == 0 {
            return Ok(if filled == 0 {
                HeaderRead::Eof
            } else {
                HeaderRead::Partial(filled)
            });
        }
        filled += n;
    }
    Ok(HeaderRead::Full)
}

//==================================================================================
// 4. Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn test_roundtrip_repetitive_text() {
        let original = b"hello world, hello world, hello world, hello world".repeat(20);
        let compressed = encode(&original, 64 * 1024).unwrap();
        assert!(compressed.len() < original.len());
        assert_eq!(decode(&compressed).unwrap(), original);
    }

    #[test]
    fn test_roundtrip_empty_input() {
        let compressed = encode(b"", 64 * 1024).unwrap();
        assert!(compressed.is_empty());
        assert_eq!(decode(&compressed).unwrap(), b"");
    }

    #[test]
    fn test_roundtrip_input_shorter_than_min_match() {
        for original in [&b"a"[..], &b"ab"[..], &b"abc"[..]] {
            let compressed = encode(original, 64 * 1024).unwrap();
            assert_eq!(decode(&compressed).unwrap(), original);
        }
    }

    #[test]
    fn test_roundtrip_incompressible_data_falls_back_to_literals() {
        let mut rng = StdRng::seed_from_u64(7);
        let original: Vec<u8> = (0..10_000).map(|_| rng.random()).collect();
        // High-entropy input offers no viable back-references; the codec must
        // still round-trip via literal-only sequences.
        let compressed = encode(&original, 64 * 1024).unwrap();
        assert_eq!(decode(&compressed).unwrap(), original);
    }

    #[test]
    fn test_roundtrip_across_many_small_blocks() {
        let original = b"abcdefgh".repeat(500);
        let compressed = encode(&original, 64).unwrap();
        assert_eq!(decode(&compressed).unwrap(), original);
    }

    #[test]
    fn test_roundtrip_long_runs_use_overlapping_matches() {
        let original = vec![b'x'; 100_000];
        let compressed = encode(&original, 64 * 1024).unwrap();
        assert!(compressed.len() < original.len() / 100);
        assert_eq!(decode(&compressed).unwrap(), original);
    }

    #[test]
    fn test_decode_stream_matches_slice_decode() {
        let original = b"the quick brown fox jumps over the lazy dog, ".repeat(100);
        let compressed = encode(&original, 256).unwrap();

        let mut reader = std::io::Cursor::new(compressed.as_slice());
        let mut decoded = Vec::new();
        let total = decode_stream(&mut reader, &mut decoded).unwrap();

        assert_eq!(total, original.len() as u64);
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_decode_rejects_backreference_before_block_start() {
        // Block declaring 4 output bytes whose first sequence is a zero-literal
        // match: the offset points at data that does not exist yet.
        let body = [0x00u8, 0x01, 0x00];
        let mut stream = Vec::new();
        stream.extend_from_slice(&(body.len() as u32).to_le_bytes());
        stream.extend_from_slice(&4u32.to_le_bytes());
        stream.extend_from_slice(&body);

        let result = decode(&stream);
        assert!(matches!(result, Err(BintableError::CorruptStream(_))));
    }

    #[test]
    fn test_decode_rejects_declared_length_mismatch() {
        let mut stream = encode(b"abcd", 64 * 1024).unwrap();
        // Inflate the declared uncompressed length: the token stream now
        // under-produces and must be rejected.
        let declared = u32::from_le_bytes(stream[4..8].try_into().unwrap());
        stream[4..8].copy_from_slice(&(declared + 1).to_le_bytes());

        let result = decode(&stream);
        assert!(matches!(result, Err(BintableError::CorruptStream(_))));
    }

    #[test]
    fn test_decode_rejects_truncated_stream() {
        let stream = encode(b"some bytes worth compressing, some bytes", 64 * 1024).unwrap();
        let result = decode(&stream[..stream.len() - 1]);
        assert!(matches!(result, Err(BintableError::CorruptStream(_))));

        // A torn header is equally fatal, via both decode paths.
        let result = decode(&stream[..4]);
        assert!(matches!(result, Err(BintableError::CorruptStream(_))));
        let mut reader = std::io::Cursor::new(&stream[..4]);
        let result = decode_stream(&mut reader, &mut Vec::new());
        assert!(matches!(result, Err(BintableError::CorruptStream(_))));
    }

    #[test]
    fn test_decode_rejects_trailing_garbage_inside_block() {
        // Valid literals-only block for "ab", with one stray byte appended to
        // the body and accounted for in compressed_len.
        let body = [0x20u8, b'a', b'b', 0xEE];
        let mut stream = Vec::new();
        stream.extend_from_slice(&(body.len() as u32).to_le_bytes());
        stream.extend_from_slice(&2u32.to_le_bytes());
        stream.extend_from_slice(&body);

        let result = decode(&stream);
        assert!(matches!(result, Err(BintableError::CorruptStream(_))));
    }

    #[test]
    fn test_random_roundtrips_with_mixed_entropy() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            let len = rng.random_range(0..5000);
            // Low-cardinality alphabet so matches actually occur.
            let original: Vec<u8> = (0..len).map(|_| rng.random_range(b'a'..b'e')).collect();
            let block_size = rng.random_range(32..2048);
            let compressed = encode(&original, block_size).unwrap();
            assert_eq!(decode(&compressed).unwrap(), original, "block_size={}", block_size);
        }
    }
}
