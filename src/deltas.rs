//! Packed delta-value encoding: a run-length encoding of signed 16-bit
//! integers, with dedicated all-zero runs.
//!
//! Ported from `fontTools.ttLib.tables.TupleVariation.TupleVariation`'s
//! `compileDeltaValues_`/`decompileDeltas_`, cross-checked against
//! `read-fonts::tables::variations::DeltaRunIter`.

use crate::cursor::Cursor;
use crate::error::DecodeError;

const DELTAS_ARE_ZERO: u8 = 0x80;
const DELTAS_ARE_WORDS: u8 = 0x40;
const DELTA_RUN_COUNT_MASK: u8 = 0x3f;
const MAX_RUN_LENGTH: usize = 64;

/// Decode `count` signed deltas from `data`, returning them along with the
/// number of bytes consumed.
///
/// On seeing `DELTAS_ARE_ZERO`, a run is treated as all-zero even if
/// `DELTAS_ARE_WORDS` is also set (that combination is never produced by
/// this crate's encoder, but decode treats zero as taking precedence,
/// matching observed decoders).
pub fn decode_deltas(data: &[u8], count: usize) -> Result<(Vec<i16>, usize), DecodeError> {
    let mut cursor = Cursor::new(data);
    let mut deltas = Vec::with_capacity(count);
    while deltas.len() < count {
        let header = cursor.read_u8()?;
        let run_len = (header & DELTA_RUN_COUNT_MASK) as usize + 1;
        if header & DELTAS_ARE_ZERO != 0 {
            deltas.extend(std::iter::repeat(0i16).take(run_len));
        } else if header & DELTAS_ARE_WORDS != 0 {
            for _ in 0..run_len {
                deltas.push(cursor.read_i16()?);
            }
        } else {
            for _ in 0..run_len {
                deltas.push(cursor.read_i8()? as i16);
            }
        }
        if deltas.len() > count {
            return Err(DecodeError::BadRunHeader);
        }
    }
    let consumed = data.len() - cursor.remaining();
    Ok((deltas, consumed))
}

/// Encode a sequence of signed deltas using a greedy, lookahead-1 strategy:
/// zero runs, byte runs, and word runs are each extended as far as possible
/// before falling back to a cheaper encoding for what follows.
pub fn encode_deltas(deltas: &[i16]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut pos = 0;
    while pos < deltas.len() {
        let value = deltas[pos];
        if value == 0 {
            pos = encode_zero_run(deltas, pos, &mut out);
        } else if (-128..=127).contains(&value) {
            pos = encode_byte_run(deltas, pos, &mut out);
        } else {
            pos = encode_word_run(deltas, pos, &mut out);
        }
    }
    out
}

fn encode_zero_run(deltas: &[i16], start: usize, out: &mut Vec<u8>) -> usize {
    let mut pos = start;
    while pos < deltas.len() && (pos - start) < MAX_RUN_LENGTH && deltas[pos] == 0 {
        pos += 1;
    }
    out.push(DELTAS_ARE_ZERO | (pos - start - 1) as u8);
    pos
}

fn encode_byte_run(deltas: &[i16], start: usize, out: &mut Vec<u8>) -> usize {
    let mut pos = start;
    while pos < deltas.len() && (pos - start) < MAX_RUN_LENGTH {
        let value = deltas[pos];
        if !(-128..=127).contains(&value) {
            break;
        }
        // A single interior zero is cheaper stored literally; two or more
        // zeroes in a row are cheaper as a dedicated zero run.
        if value == 0 && pos + 1 < deltas.len() && deltas[pos + 1] == 0 {
            break;
        }
        pos += 1;
    }
    out.push((pos - start - 1) as u8);
    out.extend(deltas[start..pos].iter().map(|&v| v as i8 as u8));
    pos
}

fn encode_word_run(deltas: &[i16], start: usize, out: &mut Vec<u8>) -> usize {
    let is_byte_encodable = |v: i16| (-128..=127).contains(&v);
    let mut pos = start;
    while pos < deltas.len() && (pos - start) < MAX_RUN_LENGTH {
        let value = deltas[pos];
        if value == 0 {
            break;
        }
        if is_byte_encodable(value) && pos + 1 < deltas.len() && is_byte_encodable(deltas[pos + 1])
        {
            break;
        }
        pos += 1;
    }
    out.push(DELTAS_ARE_WORDS | (pos - start - 1) as u8);
    for &value in &deltas[start..pos] {
        out.extend_from_slice(&value.to_be_bytes());
    }
    pos
}
