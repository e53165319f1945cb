//! Errors produced while compiling or decompiling a [`TupleVariation`](crate::TupleVariation).

/// An error produced while decoding a tuple variation header or its auxiliary data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecodeError {
    /// A read would have run past the end of the supplied byte range.
    Truncated,
    /// A run's declared length pushed the decoded count past the point or
    /// delta count the caller expects. Can't happen from this crate's own
    /// encoder; guarded defensively against hostile input.
    BadRunHeader,
    /// The header referenced a shared-tuple index with no embedded peak
    /// tuple, but the caller's shared-tuple table doesn't have an entry at
    /// that index.
    SharedTupleIndexOutOfRange(u16),
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::Truncated => write!(f, "unexpected end of tuple variation data"),
            DecodeError::BadRunHeader => write!(f, "run length overruns the expected point or delta count"),
            DecodeError::SharedTupleIndexOutOfRange(idx) => {
                write!(f, "shared tuple index {idx} has no entry in the shared tuple table")
            }
        }
    }
}

impl std::error::Error for DecodeError {}

/// An error produced while compiling a [`TupleVariation`](crate::TupleVariation).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompileError {
    /// An axis present in the variation's region is not in the caller's axis order.
    UnknownAxis(crate::Tag),
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileError::UnknownAxis(tag) => {
                write!(f, "axis '{tag}' is not present in the font's axis order")
            }
        }
    }
}

impl std::error::Error for CompileError {}
