//! The F2DOT14 fixed-point coordinate type used for peak/min/max axis values.

/// A signed 16-bit fixed-point number with 14 fractional bits.
///
/// Stored value `v` represents the real number `v / 16384`. This mirrors
/// `font-types::F2Dot14`, reimplemented here directly: the rest of that crate
/// (glyph ids, sfnt tags, offsets, name ids...) has no bearing on this codec.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct F2Dot14(i16);

const SCALE: f64 = 16384.0;

impl F2Dot14 {
    /// The zero value.
    pub const ZERO: F2Dot14 = F2Dot14(0);

    /// Construct from the raw on-wire `i16`.
    pub const fn from_bits(bits: i16) -> Self {
        F2Dot14(bits)
    }

    /// The raw on-wire `i16` value.
    pub const fn to_bits(self) -> i16 {
        self.0
    }

    /// Construct from a real number in `[-2.0, 2.0)`, rounding to the
    /// nearest representable value and clamping to the `i16` range.
    ///
    /// OpenType axis coordinates are defined over `[-1.0, 1.0]`, but we don't
    /// clamp to that narrower range here: it's the caller's job (the
    /// enclosing `fvar`/`avar` logic, out of scope for this crate) to ensure
    /// values are normalized before they reach this codec.
    pub fn from_f64(value: f64) -> Self {
        let scaled = (value * SCALE).round();
        let clamped = scaled.clamp(i16::MIN as f64, i16::MAX as f64);
        F2Dot14(clamped as i16)
    }

    /// The real number this value represents.
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / SCALE
    }
}

impl std::fmt::Debug for F2Dot14 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "F2Dot14({})", self.to_f64())
    }
}
