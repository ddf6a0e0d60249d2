// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Decoding of the SMBIOS structure table into hardware inventory records.
//!
//! The table is handed to us as an opaque byte buffer (typically read from
//! `/sys/firmware/dmi/tables/DMI`).  [Structures] walks it lazily, yielding
//! one [Structure] per SMBIOS structure, and the decoders in [table] turn
//! those into typed records:
//!
//! - [Summary], emitted for every structure
//! - [MemoryDevice], emitted for Type 17 (Memory Device) structures
//!
//! Vendor firmware is frequently sloppy, so nothing here fails a whole
//! parse.  A malformed structure ends the walk early, and a field which
//! cannot be read (or which carries a "not reported" sentinel) is simply
//! absent from its record.
//!
//! The layouts decoded here are defined by [DSP0134], the _SMBIOS Reference
//! Specification_.
//!
//! [DSP0134]:
//!     https://www.dmtf.org/sites/default/files/standards/documents/DSP0134_3.7.0.pdf

use std::fmt;

pub mod bits;
pub mod fingerprint;
pub mod lookup;
pub mod record;
pub mod strings;
pub mod table;
pub mod walk;

pub use fingerprint::{Fingerprint, Sha256Fingerprint};
pub use record::{Record, Value};
pub use strings::{resolve_string, StringTable};
pub use table::{memory_devices, summaries, MemoryDevice, Summary};
pub use walk::{Structure, Structures};

/// Structure Handle
///
/// A 16-bit number identifying a single structure within the table.  Other
/// structures refer to it by value (e.g. the array handle of a Memory Device).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
#[repr(transparent)]
pub struct Handle(pub u16);
impl Handle {
    pub const UNKNOWN: Self = Self(0xffff);
}
impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bits::to_hex(self.0, bits::DEFAULT_HEX_WIDTH))
    }
}
impl From<u16> for Handle {
    fn from(value: u16) -> Self {
        Self(value)
    }
}
impl From<Handle> for u16 {
    fn from(value: Handle) -> Self {
        value.0
    }
}

/// Failure to decode a single field of a structure.
///
/// These never escape a decoder as a hard error: the affected field is
/// reported as absent instead.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("{width}-byte read at offset {offset:#x} overruns {len}-byte area")]
    Truncated { offset: usize, width: usize, len: usize },

    #[error("string index {index} out of range ({count} strings present)")]
    StringIndex { index: u8, count: usize },
}

/// Logger which drops everything, for callers that do not provide one
pub(crate) fn null_log() -> slog::Logger {
    slog::Logger::root(slog::Discard, slog::o!())
}
