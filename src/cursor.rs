//! A minimal big-endian byte cursor.
//!
//! Modeled on `read-fonts::font_data::{FontData, Cursor}`, scoped down to the
//! handful of scalar reads the tuple variation codec needs.

use crate::error::DecodeError;

/// A borrowed byte range with a read position, for parsing run-length
/// encoded data.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Cursor { data, pos: 0 }
    }

    /// Bytes remaining to be read.
    pub(crate) fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    pub(crate) fn read_u8(&mut self) -> Result<u8, DecodeError> {
        let byte = *self.data.get(self.pos).ok_or(DecodeError::Truncated)?;
        self.pos += 1;
        Ok(byte)
    }

    pub(crate) fn read_i8(&mut self) -> Result<i8, DecodeError> {
        self.read_u8().map(|b| b as i8)
    }

    pub(crate) fn read_u16(&mut self) -> Result<u16, DecodeError> {
        let end = self.pos.checked_add(2).ok_or(DecodeError::Truncated)?;
        let bytes: [u8; 2] = self
            .data
            .get(self.pos..end)
            .ok_or(DecodeError::Truncated)?
            .try_into()
            .unwrap();
        self.pos = end;
        Ok(u16::from_be_bytes(bytes))
    }

    pub(crate) fn read_i16(&mut self) -> Result<i16, DecodeError> {
        self.read_u16().map(|v| v as i16)
    }
}
