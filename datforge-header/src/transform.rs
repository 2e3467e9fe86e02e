//! Applying a [`SkipRule`] to a byte stream.
//!
//! The transform is all-or-nothing: output is accumulated in memory and
//! surfaced only once the whole selected range has been processed, so a
//! failing rule never leaves partial output behind.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use crate::error::TransformError;
use crate::rule::{SkipRule, TransformOp};

const CHUNK_SIZE: usize = 8 * 1024;

/// Apply a rule to the selected range of `input`, returning the transformed
/// bytes.
///
/// Bytes are accumulated into a rolling 4-byte window; each incoming byte
/// is placed according to the operation and the window is flushed every
/// four bytes. A partial final window flushes only the slots that were
/// actually written, in slot order.
pub fn transform<R: Read + Seek>(
    input: &mut R,
    rule: &SkipRule,
) -> Result<Vec<u8>, TransformError> {
    let len = input.seek(SeekFrom::End(0))?;
    let (start, end) = rule.validate(len)?;
    input.seek(SeekFrom::Start(start))?;

    let mut out = Vec::with_capacity((end - start) as usize);
    let mut window = [0u8; 4];
    let mut filled = [false; 4];
    let mut pos = 0usize;

    let mut remaining = end - start;
    let mut buf = [0u8; CHUNK_SIZE];
    while remaining > 0 {
        let want = remaining.min(CHUNK_SIZE as u64) as usize;
        let n = input.read(&mut buf[..want])?;
        if n == 0 {
            break;
        }
        for &byte in &buf[..n] {
            let (slot, byte) = match rule.op {
                TransformOp::None => (pos, byte),
                TransformOp::Bitswap => (pos, byte.reverse_bits()),
                TransformOp::Byteswap => {
                    // Swap within each adjacent pair: 0<->1, 2<->3
                    if pos % 2 == 1 {
                        (pos - 1, byte)
                    } else {
                        (pos + 1, byte)
                    }
                }
                TransformOp::Wordswap => (3 - pos, byte),
                TransformOp::WordByteswap => ((pos + 2) % 4, byte),
            };
            window[slot] = byte;
            filled[slot] = true;
            pos = (pos + 1) % 4;
            if pos == 0 {
                out.extend_from_slice(&window);
                filled = [false; 4];
            }
        }
        remaining -= n as u64;
    }

    if pos != 0 {
        for (byte, used) in window.iter().zip(filled) {
            if used {
                out.push(*byte);
            }
        }
    }

    Ok(out)
}

/// Apply a rule and write the result to an output stream.
///
/// Both streams are borrowed for the duration of the call only; whether
/// they stay open afterwards is the caller's choice. Nothing is written
/// unless the whole transform succeeds.
pub fn transform_stream<R: Read + Seek, W: Write>(
    input: &mut R,
    output: &mut W,
    rule: &SkipRule,
) -> Result<u64, TransformError> {
    let bytes = transform(input, rule)?;
    output.write_all(&bytes)?;
    output.flush()?;
    Ok(bytes.len() as u64)
}

/// Apply a rule from one file to another.
///
/// The source is opened before anything is written, a zero-byte result is
/// reported as a failure, and a half-written destination is removed rather
/// than left behind.
pub fn transform_file(input: &Path, output: &Path, rule: &SkipRule) -> Result<u64, TransformError> {
    let mut source = File::open(input)?;
    let bytes = match transform(&mut source, rule) {
        Ok(bytes) => bytes,
        Err(err) => {
            log::warn!("header transform failed for {}: {err}", input.display());
            return Err(err);
        }
    };
    if bytes.is_empty() {
        return Err(TransformError::EmptyOutput);
    }
    if let Err(err) = std::fs::write(output, &bytes) {
        let _ = std::fs::remove_file(output);
        return Err(err.into());
    }
    Ok(bytes.len() as u64)
}
