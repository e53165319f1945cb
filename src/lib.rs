//! A codec and in-memory model for a single OpenType `gvar`/`cvar` tuple
//! variation record: the tuple header (peak and optional intermediate
//! region), the packed point-number set it applies to, and its packed
//! delta values.
//!
//! This crate covers one record in isolation: it *consumes* a shared-tuple
//! table and shared point-number set handed to it by the caller, but does
//! not build or deduplicate those tables itself. Packing many records into
//! an enclosing `gvar`/`cvar` table, glyph/CVT storage, XML import/export,
//! and evaluating a variation at a given design-space location are out of
//! scope.

mod cursor;
pub mod deltas;
pub mod error;
pub mod f2dot14;
pub mod header;
pub mod points;
mod tag;
mod tuple_variation;

pub use error::{CompileError, DecodeError};
pub use f2dot14::F2Dot14;
pub use header::{TupleHeader, EMBEDDED_PEAK_TUPLE, INTERMEDIATE_REGION, PRIVATE_POINT_NUMBERS, TUPLE_INDEX_MASK};
pub use tag::Tag;
pub use tuple_variation::{encode_peak, AxisRegion, Deltas, SharedCoordIndices, TupleVariation, VariationKind};
