// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Raw field access within SMBIOS structures.
//!
//! All multi-byte values in the structure table are little-endian.  Offsets
//! are relative to the start of a structure (i.e. the header is at offset 0),
//! matching how DSP0134 lays out each structure type.

use byteorder::{ByteOrder, LE};
use zerocopy::byteorder::little_endian::U16;
use zerocopy::{FromBytes, Immutable};

use crate::{FieldError, Handle};

/// Size of [StructureHeader]
pub const HEADER_LEN: usize = 4;

/// Each structure's string table is expected to terminate with a double-NUL
pub const TABLE_TERMINATOR: [u8; 2] = [0, 0];

/// Minimum digit count emitted by [to_hex] when rendering handles
pub const DEFAULT_HEX_WIDTH: usize = 4;

/// Header common to every SMBIOS structure
#[repr(C, packed)]
#[derive(Copy, Clone, Debug, FromBytes, Immutable)]
pub struct StructureHeader {
    stype: u8,
    length: u8,
    handle: U16,
}
impl StructureHeader {
    /// Read a header from the front of `data`, if enough bytes are present.
    pub fn parse(data: &[u8]) -> Option<Self> {
        Self::read_from_prefix(data).ok().map(|(header, _rest)| header)
    }

    /// Structure type code
    pub fn stype(&self) -> u8 {
        self.stype
    }

    /// Length of the formatted area, including this header but excluding
    /// the trailing string table.
    pub fn length(&self) -> u8 {
        self.length
    }

    pub fn handle(&self) -> Handle {
        Handle(self.handle.get())
    }
}

fn field(data: &[u8], offset: usize, width: usize) -> Result<&[u8], FieldError> {
    offset
        .checked_add(width)
        .and_then(|end| data.get(offset..end))
        .ok_or(FieldError::Truncated { offset, width, len: data.len() })
}

/// Read the BYTE at `offset`
pub fn read_byte(data: &[u8], offset: usize) -> Result<u8, FieldError> {
    Ok(field(data, offset, 1)?[0])
}

/// Read the little-endian WORD at `offset`
pub fn read_word(data: &[u8], offset: usize) -> Result<u16, FieldError> {
    Ok(LE::read_u16(field(data, offset, 2)?))
}

/// Read the little-endian DWORD at `offset`
pub fn read_dword(data: &[u8], offset: usize) -> Result<u32, FieldError> {
    Ok(LE::read_u32(field(data, offset, 4)?))
}

/// Render `value` as `0x`-prefixed lowercase hex, zero-padded to at least
/// `width` digits.
pub fn to_hex(value: impl Into<u64>, width: usize) -> String {
    format!("0x{:0width$x}", value.into(), width = width)
}
