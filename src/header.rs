//! The tuple variation header: `uint16 variationDataSize, uint16 flags`,
//! followed by an optional embedded peak tuple and optional intermediate
//! min/max tuples.
//!
//! Grounded in `read-fonts::tables::variations::TupleIndex` (the flags
//! word) and the `TupleVariationHeader` table declared in
//! `resources/codegen_inputs/variations.rs`.

use crate::cursor::Cursor;
use crate::error::DecodeError;
use crate::f2dot14::F2Dot14;

/// Header carries an inline peak tuple; otherwise the low 12 bits of the
/// flags word index into the outer shared-tuple table.
pub const EMBEDDED_PEAK_TUPLE: u16 = 0x8000;
/// Header carries inline min and max coordinate tuples after the peak.
pub const INTERMEDIATE_REGION: u16 = 0x4000;
/// Auxiliary data begins with a private point-number encoding.
pub const PRIVATE_POINT_NUMBERS: u16 = 0x2000;
/// Mask for the low 12 bits: the shared-tuple index, when
/// [`EMBEDDED_PEAK_TUPLE`] is clear.
pub const TUPLE_INDEX_MASK: u16 = 0x0fff;

/// A decoded tuple variation header.
#[derive(Clone, Debug)]
pub struct TupleHeader {
    pub variation_data_size: u16,
    pub flags: u16,
    pub peak: Option<Vec<F2Dot14>>,
    pub intermediate: Option<(Vec<F2Dot14>, Vec<F2Dot14>)>,
}

impl TupleHeader {
    pub fn embedded_peak_tuple(&self) -> bool {
        self.flags & EMBEDDED_PEAK_TUPLE != 0
    }

    pub fn intermediate_region(&self) -> bool {
        self.flags & INTERMEDIATE_REGION != 0
    }

    pub fn private_point_numbers(&self) -> bool {
        self.flags & PRIVATE_POINT_NUMBERS != 0
    }

    /// The shared-tuple index, when no peak tuple is embedded.
    pub fn shared_tuple_index(&self) -> Option<u16> {
        (!self.embedded_peak_tuple()).then_some(self.flags & TUPLE_INDEX_MASK)
    }
}

/// The number of bytes a header with these flags consumes, given the font's
/// axis count. A successful call to [`decode`] with the same flags always
/// consumes exactly this many bytes.
pub fn header_size(flags: u16, axis_count: u16) -> usize {
    let tuple_bytes = 2 * axis_count as usize;
    let mut size = 4; // variationDataSize + flags
    if flags & EMBEDDED_PEAK_TUPLE != 0 {
        size += tuple_bytes;
    }
    if flags & INTERMEDIATE_REGION != 0 {
        size += 2 * tuple_bytes;
    }
    size
}

/// Decode a single tuple variation header, returning it along with the
/// number of bytes consumed (always equal to [`header_size`] for the
/// decoded flags).
pub fn decode(data: &[u8], axis_count: u16) -> Result<(TupleHeader, usize), DecodeError> {
    let mut cursor = Cursor::new(data);
    let variation_data_size = cursor.read_u16()?;
    let flags = cursor.read_u16()?;

    let read_tuple = |cursor: &mut Cursor| -> Result<Vec<F2Dot14>, DecodeError> {
        (0..axis_count)
            .map(|_| cursor.read_i16().map(F2Dot14::from_bits))
            .collect()
    };

    let peak = (flags & EMBEDDED_PEAK_TUPLE != 0)
        .then(|| read_tuple(&mut cursor))
        .transpose()?;
    let intermediate = if flags & INTERMEDIATE_REGION != 0 {
        let min = read_tuple(&mut cursor)?;
        let max = read_tuple(&mut cursor)?;
        Some((min, max))
    } else {
        None
    };

    let consumed = data.len() - cursor.remaining();
    Ok((
        TupleHeader {
            variation_data_size,
            flags,
            peak,
            intermediate,
        },
        consumed,
    ))
}

/// Encode a tuple variation header.
pub fn encode(
    variation_data_size: u16,
    flags: u16,
    peak: Option<&[F2Dot14]>,
    intermediate: Option<(&[F2Dot14], &[F2Dot14])>,
) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&variation_data_size.to_be_bytes());
    out.extend_from_slice(&flags.to_be_bytes());
    if let Some(peak) = peak {
        for coord in peak {
            out.extend_from_slice(&coord.to_bits().to_be_bytes());
        }
    }
    if let Some((min, max)) = intermediate {
        for coord in min.iter().chain(max) {
            out.extend_from_slice(&coord.to_bits().to_be_bytes());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_size_law() {
        for axis_count in [0u16, 1, 4] {
            for flags in [
                0u16,
                EMBEDDED_PEAK_TUPLE,
                INTERMEDIATE_REGION,
                EMBEDDED_PEAK_TUPLE | INTERMEDIATE_REGION,
            ] {
                let peak = (flags & EMBEDDED_PEAK_TUPLE != 0)
                    .then(|| vec![F2Dot14::ZERO; axis_count as usize]);
                let intermediate = (flags & INTERMEDIATE_REGION != 0).then(|| {
                    (
                        vec![F2Dot14::ZERO; axis_count as usize],
                        vec![F2Dot14::ZERO; axis_count as usize],
                    )
                });
                let encoded = encode(
                    0,
                    flags,
                    peak.as_deref(),
                    intermediate.as_ref().map(|(a, b)| (a.as_slice(), b.as_slice())),
                );
                let (_, consumed) = decode(&encoded, axis_count).unwrap();
                assert_eq!(consumed, header_size(flags, axis_count));
                assert_eq!(consumed, encoded.len());
            }
        }
    }

    // wght (-0.5, 1.0, 1.0): the peak alone defaults to (0, 1.0, 1.0), so an
    // intermediate region is required to carry the -0.5 start.
    #[test]
    fn scenario_g_intermediate_region() {
        let peak = [F2Dot14::from_f64(1.0)];
        let min = [F2Dot14::from_f64(-0.5)];
        let max = [F2Dot14::from_f64(1.0)];
        assert_eq!(peak[0].to_bits(), 0x4000u16 as i16);
        assert_eq!(min[0].to_bits(), 0xE000u16 as i16);
        assert_eq!(max[0].to_bits(), 0x4000u16 as i16);

        let flags = EMBEDDED_PEAK_TUPLE | INTERMEDIATE_REGION;
        assert_eq!(flags, 0xC000);
        let encoded = encode(0, flags, Some(&peak), Some((&min, &max)));
        let (header, consumed) = decode(&encoded, 1).unwrap();
        assert_eq!(consumed, encoded.len());
        assert_eq!(header.peak.unwrap(), peak);
        assert_eq!(header.intermediate.unwrap(), (min.to_vec(), max.to_vec()));
    }
}
