//! Packed point-number encoding: a compact, delta-of-delta run-length
//! encoding for a sorted set of point indices in `[0, N)`.
//!
//! Ported from `fontTools.ttLib.tables.TupleVariation.TupleVariation`'s
//! `compilePoints`/`decompilePoints_`, and cross-checked against
//! `read-fonts::tables::variations::{PackedPointNumbers, PackedPointNumbersIter}`.

use crate::cursor::Cursor;
use crate::error::DecodeError;

const POINTS_ARE_WORDS: u8 = 0x80;
const POINT_RUN_COUNT_MASK: u8 = 0x7f;
const MAX_RUN_LENGTH: usize = 128;

/// Decode a packed point-number set.
///
/// `num_points_in_glyph` is `N`: the glyph's point count (`gvar`) or the CVT
/// entry count (`cvar`). Returns the decoded absolute point indices and the
/// number of bytes consumed from `data`.
///
/// A leading count of zero is the "all points" shortcut: the returned list
/// is `0..num_points_in_glyph`.
///
/// Points outside `[0, num_points_in_glyph)` are not an error: they're
/// logged as a warning and still returned.
pub fn decode_points(
    data: &[u8],
    num_points_in_glyph: u16,
    table_tag: &str,
) -> Result<(Vec<u16>, usize), DecodeError> {
    let mut cursor = Cursor::new(data);
    let first = cursor.read_u8()?;
    let (count, header_len) = if first & POINTS_ARE_WORDS != 0 {
        let low = (first & POINT_RUN_COUNT_MASK) as u16;
        let second = cursor.read_u8()? as u16;
        (low << 8 | second, 2)
    } else {
        (first as u16, 1)
    };

    if count == 0 {
        return Ok(((0..num_points_in_glyph).collect(), header_len));
    }

    let mut points = Vec::with_capacity(count as usize);
    let mut last = 0u16;
    while points.len() < count as usize {
        let run_header = cursor.read_u8()?;
        let run_len = (run_header & POINT_RUN_COUNT_MASK) as usize + 1;
        let words = run_header & POINTS_ARE_WORDS != 0;
        for _ in 0..run_len {
            let delta = if words {
                cursor.read_u16()?
            } else {
                cursor.read_u8()? as u16
            };
            last = last.wrapping_add(delta);
            points.push(last);
        }
        if points.len() > count as usize {
            return Err(DecodeError::BadRunHeader);
        }
    }

    let out_of_range: Vec<_> = points
        .iter()
        .filter(|&&p| p >= num_points_in_glyph)
        .collect();
    if !out_of_range.is_empty() {
        log::warn!(
            "point {} out of range in '{table_tag}' table",
            out_of_range
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join(",")
        );
    }

    let consumed = data.len() - cursor.remaining();
    Ok((points, consumed))
}

/// Encode a sorted, deduplicated set of point indices.
///
/// If `points` contains every index in `[0, num_points_in_glyph)`, the
/// encoding is the single-byte "all points" shortcut.
///
/// The run-splitting heuristic never reverts a run from word encoding back
/// to byte encoding mid-stream; this is a known, deliberately preserved
/// sub-optimality that keeps output compatible with existing decoders.
pub fn encode_points(points: &[u16], num_points_in_glyph: u16) -> Vec<u8> {
    debug_assert!(
        points.windows(2).all(|w| w[0] < w[1]),
        "points must be sorted and deduplicated"
    );

    if points.len() == num_points_in_glyph as usize {
        return vec![0];
    }

    let num_points = points.len();
    let mut out = Vec::new();
    if num_points < 0x80 {
        out.push(num_points as u8);
    } else {
        out.push(((num_points >> 8) | 0x80) as u8);
        out.push((num_points & 0xff) as u8);
    }

    let mut pos = 0;
    let mut last_value = 0u16;
    while pos < num_points {
        let run_start = pos;
        let mut use_byte_encoding = None;
        let mut run = Vec::new();
        while pos < num_points && (pos - run_start) < MAX_RUN_LENGTH {
            let cur = points[pos];
            let delta = cur.wrapping_sub(last_value);
            let use_byte = *use_byte_encoding.get_or_insert(delta <= 0xff);
            if use_byte && delta > 0xff {
                break;
            }
            if use_byte {
                run.push(delta as u8);
            } else {
                run.push((delta >> 8) as u8);
                run.push((delta & 0xff) as u8);
            }
            last_value = cur;
            pos += 1;
        }
        let run_len = pos - run_start;
        let header = if use_byte_encoding.unwrap_or(true) {
            (run_len - 1) as u8
        } else {
            (run_len - 1) as u8 | POINTS_ARE_WORDS
        };
        out.push(header);
        out.extend_from_slice(&run);
    }

    out
}
