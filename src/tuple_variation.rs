//! The in-memory `TupleVariation` model, and the `compile`/`decompile`
//! operations that move it to and from the wire format of a single tuple
//! variation record (header plus point-number and delta auxiliary data).
//!
//! Ported from `fontTools.ttLib.tables.TupleVariation.TupleVariation`'s
//! `compile`/`decompile` pair. Packing several records into the shared
//! header/data streams of an enclosing `gvar`/`cvar` table is that outer
//! table's job; this module only *consumes* the shared-tuple and
//! shared-point views the caller hands it.

use std::collections::HashMap;

use crate::deltas::{decode_deltas, encode_deltas};
use crate::error::{CompileError, DecodeError};
use crate::f2dot14::F2Dot14;
use crate::header::{self, EMBEDDED_PEAK_TUPLE, INTERMEDIATE_REGION, PRIVATE_POINT_NUMBERS, TUPLE_INDEX_MASK};
use crate::points::{decode_points, encode_points};
use crate::tag::Tag;

/// One axis's contribution to a variation's support region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AxisRegion {
    pub start: F2Dot14,
    pub peak: F2Dot14,
    pub end: F2Dot14,
}

impl AxisRegion {
    const ZERO: AxisRegion = AxisRegion {
        start: F2Dot14::ZERO,
        peak: F2Dot14::ZERO,
        end: F2Dot14::ZERO,
    };

    /// `true` if `(start, end)` is exactly `(min(0, peak), max(0, peak))`,
    /// the implicit region used when no intermediate tuple is present.
    fn is_default_region(&self) -> bool {
        let zero = F2Dot14::ZERO;
        let default_start = if self.peak.to_bits() < 0 { self.peak } else { zero };
        let default_end = if self.peak.to_bits() > 0 { self.peak } else { zero };
        self.start == default_start && self.end == default_end
    }

    fn has_no_effect(&self) -> bool {
        *self == AxisRegion::ZERO
    }
}

/// The target of a tuple variation's delta stream: `gvar` deltas are paired
/// (x, y) outline-point movements, `cvar` deltas are single scalar CVT
/// adjustments. Each vector has one slot per point in the glyph (`gvar`) or
/// entry in the CVT (`cvar`); `None` means the caller never set a delta at
/// that position.
#[derive(Clone, Debug, PartialEq)]
pub enum Deltas {
    Gvar(Vec<Option<(i16, i16)>>),
    Cvar(Vec<Option<i16>>),
}

impl Deltas {
    /// `N`: the glyph's point count, or the CVT entry count.
    pub fn len(&self) -> usize {
        match self {
            Deltas::Gvar(v) => v.len(),
            Deltas::Cvar(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Which table a [`TupleVariation`] is being decompiled for, and the point
/// count its packed point-number set is interpreted against (the glyph's
/// point count for `gvar`, the CVT entry count for `cvar`). `compile` infers
/// this from `self.deltas` instead, since by then it's already dense.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VariationKind {
    Gvar { num_points_in_glyph: u16 },
    Cvar { num_entries: u16 },
}

impl VariationKind {
    fn point_count(self) -> u16 {
        match self {
            VariationKind::Gvar { num_points_in_glyph } => num_points_in_glyph,
            VariationKind::Cvar { num_entries } => num_entries,
        }
    }
}

/// A single tuple variation record: a support region over some subset of the
/// font's axes, and the per-point (or per-CVT-entry) deltas it contributes.
#[derive(Clone, Debug, PartialEq)]
pub struct TupleVariation {
    /// Non-default axis regions, keyed by axis tag. Axes absent from this
    /// list contribute the default `(0, 0, 0)` region, i.e. have no effect.
    pub axes: Vec<(Tag, AxisRegion)>,
    pub deltas: Deltas,
}

/// The byte-exact encoding of a peak-coordinate tuple, suitable as a key into
/// a [`SharedCoordIndices`] map. An enclosing `gvar`/`cvar` table builds this
/// map (peak bytes -> shared-tuple index) once and shares it across every
/// record it compiles.
pub fn encode_peak(peak: &[F2Dot14]) -> Vec<u8> {
    peak.iter().flat_map(|c| c.to_bits().to_be_bytes()).collect()
}

/// Maps a compiled peak tuple's bytes to its index in the outer table's
/// shared-tuple array, so records that share a peak can reference it instead
/// of re-embedding it.
pub type SharedCoordIndices = HashMap<Vec<u8>, u16>;

impl TupleVariation {
    fn region_for(&self, tag: &Tag) -> AxisRegion {
        self.axes
            .iter()
            .find(|(t, _)| t == tag)
            .map(|(_, r)| *r)
            .unwrap_or(AxisRegion::ZERO)
    }

    /// The point numbers this variation has an explicit (possibly zero)
    /// delta at, in ascending order.
    pub fn used_points(&self) -> Vec<u16> {
        match &self.deltas {
            Deltas::Gvar(v) => v.iter().enumerate().filter_map(|(i, d)| d.is_some().then_some(i as u16)).collect(),
            Deltas::Cvar(v) => v.iter().enumerate().filter_map(|(i, d)| d.is_some().then_some(i as u16)).collect(),
        }
    }

    /// `false` iff every position is unset. A position set to a zero delta
    /// still counts as impact.
    pub fn has_impact(&self) -> bool {
        match &self.deltas {
            Deltas::Gvar(v) => v.iter().any(Option::is_some),
            Deltas::Cvar(v) => v.iter().any(Option::is_some),
        }
    }

    /// Encode this variation's header and auxiliary (point-number plus
    /// delta) data, in `axis_order`.
    ///
    /// `shared_coord_indices` is the enclosing table's shared-tuple
    /// dictionary: if this variation's peak tuple is a key in it, the header
    /// references that index instead of embedding the peak. `shared_points`,
    /// if given, is adopted instead of writing a private point-number set;
    /// the deltas written correspond to exactly that point set, substituting
    /// a zero delta for any position this variation left unset.
    ///
    /// Fails if `self.axes` names an axis not present in `axis_order`.
    pub fn compile(
        &self,
        axis_order: &[Tag],
        shared_coord_indices: &SharedCoordIndices,
        shared_points: Option<&[u16]>,
    ) -> Result<(Vec<u8>, Vec<u8>), CompileError> {
        for (tag, _) in &self.axes {
            if !axis_order.contains(tag) {
                return Err(CompileError::UnknownAxis(*tag));
            }
        }

        let peak: Vec<F2Dot14> = axis_order.iter().map(|t| self.region_for(t).peak).collect();
        let needs_intermediate = axis_order.iter().any(|t| !self.region_for(t).is_default_region());

        let mut flags = 0u16;
        let peak_key = encode_peak(&peak);
        let embed_peak = match shared_coord_indices.get(&peak_key) {
            Some(&index) => {
                flags |= index & TUPLE_INDEX_MASK;
                false
            }
            None => {
                flags |= EMBEDDED_PEAK_TUPLE;
                true
            }
        };

        let intermediate = if needs_intermediate {
            flags |= INTERMEDIATE_REGION;
            let start: Vec<F2Dot14> = axis_order.iter().map(|t| self.region_for(t).start).collect();
            let end: Vec<F2Dot14> = axis_order.iter().map(|t| self.region_for(t).end).collect();
            Some((start, end))
        } else {
            None
        };

        let points: Vec<u16> = match shared_points {
            Some(shared) => shared.to_vec(),
            None => {
                flags |= PRIVATE_POINT_NUMBERS;
                self.used_points()
            }
        };

        let mut data = Vec::new();
        if shared_points.is_none() {
            data.extend(encode_points(&points, self.deltas.len() as u16));
        }
        match &self.deltas {
            Deltas::Gvar(v) => {
                let xs: Vec<i16> = points.iter().map(|&p| v.get(p as usize).copied().flatten().map_or(0, |(x, _)| x)).collect();
                let ys: Vec<i16> = points.iter().map(|&p| v.get(p as usize).copied().flatten().map_or(0, |(_, y)| y)).collect();
                data.extend(encode_deltas(&xs));
                data.extend(encode_deltas(&ys));
            }
            Deltas::Cvar(v) => {
                let vs: Vec<i16> = points.iter().map(|&p| v.get(p as usize).copied().flatten().unwrap_or(0)).collect();
                data.extend(encode_deltas(&vs));
            }
        }

        let header_bytes = header::encode(
            data.len() as u16,
            flags,
            embed_peak.then_some(peak.as_slice()),
            intermediate.as_ref().map(|(s, e)| (s.as_slice(), e.as_slice())),
        );

        Ok((header_bytes, data))
    }

    /// Decode a tuple variation from its header bytes and the start of its
    /// auxiliary data.
    ///
    /// `shared_tuples` is the outer table's shared peak-coordinate list,
    /// consulted when the header has no embedded peak tuple. `shared_points`
    /// is the outer table's shared point-number set, adopted when the header
    /// clears `PRIVATE_POINT_NUMBERS`.
    ///
    /// Returns the variation, the number of header bytes consumed, and the
    /// number of auxiliary data bytes consumed (`header.variation_data_size`,
    /// useful when iterating several records packed back to back).
    pub fn decompile(
        header_bytes: &[u8],
        data: &[u8],
        axis_order: &[Tag],
        kind: VariationKind,
        table_tag: &str,
        shared_tuples: &[Vec<F2Dot14>],
        shared_points: Option<&[u16]>,
    ) -> Result<(TupleVariation, usize, usize), DecodeError> {
        let axis_count = axis_order.len() as u16;
        let (header, header_len) = header::decode(header_bytes, axis_count)?;

        let peak = match &header.peak {
            Some(peak) => peak.clone(),
            None => {
                // header.embedded_peak_tuple() is false here, so this is Some.
                let index = header.shared_tuple_index().unwrap();
                shared_tuples
                    .get(index as usize)
                    .cloned()
                    .ok_or(DecodeError::SharedTupleIndexOutOfRange(index))?
            }
        };

        let axes: Vec<(Tag, AxisRegion)> = axis_order
            .iter()
            .enumerate()
            .map(|(i, tag)| {
                let p = peak[i];
                let (start, end) = match &header.intermediate {
                    Some((min, max)) => (min[i], max[i]),
                    None => {
                        let zero = F2Dot14::ZERO;
                        if p.to_bits() < 0 { (p, zero) } else { (zero, p) }
                    }
                };
                (*tag, AxisRegion { start, peak: p, end })
            })
            .filter(|(_, r)| !r.has_no_effect())
            .collect();

        let num_points_for_decode = kind.point_count();
        let (points, points_len) = if header.private_point_numbers() {
            decode_points(data, num_points_for_decode, table_tag)?
        } else {
            (shared_points.unwrap_or(&[]).to_vec(), 0)
        };
        let count = points.len();
        let aux = &data[points_len..];

        let deltas = match kind {
            VariationKind::Gvar { num_points_in_glyph } => {
                let (xs, x_len) = decode_deltas(aux, count)?;
                let (ys, _) = decode_deltas(&aux[x_len..], count)?;
                let mut v = vec![None; num_points_in_glyph as usize];
                for (i, &p) in points.iter().enumerate() {
                    if (p as usize) < v.len() {
                        v[p as usize] = Some((xs[i], ys[i]));
                    }
                }
                Deltas::Gvar(v)
            }
            VariationKind::Cvar { num_entries } => {
                let (vs, _) = decode_deltas(aux, count)?;
                let mut v = vec![None; num_entries as usize];
                for (i, &p) in points.iter().enumerate() {
                    if (p as usize) < v.len() {
                        v[p as usize] = Some(vs[i]);
                    }
                }
                Deltas::Cvar(v)
            }
        };

        Ok((TupleVariation { axes, deltas }, header_len, header.variation_data_size as usize))
    }
}
