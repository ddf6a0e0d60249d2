// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Traversal of the SMBIOS structure table.

use std::iter::FusedIterator;

use slog::{debug, o};

use crate::bits::{StructureHeader, HEADER_LEN, TABLE_TERMINATOR};
use crate::lookup::StructureType;
use crate::strings::StringTable;
use crate::Handle;

/// One structure within the table: its header, formatted area and string
/// table.
#[derive(Copy, Clone, Debug)]
pub struct Structure<'a> {
    index: usize,
    offset: usize,
    header: StructureHeader,
    data: &'a [u8],
    formatted: &'a [u8],
    trailing: &'a [u8],
}
impl<'a> Structure<'a> {
    /// Position of this structure in traversal order, starting at 0
    pub fn index(&self) -> usize {
        self.index
    }
    /// Byte offset of this structure from the start of the table
    pub fn offset(&self) -> usize {
        self.offset
    }
    pub fn header(&self) -> &StructureHeader {
        &self.header
    }
    pub fn stype(&self) -> u8 {
        self.header.stype()
    }
    pub fn handle(&self) -> Handle {
        self.header.handle()
    }

    /// All bytes of the structure, including its string table and the
    /// double-NUL which terminates it
    pub fn bytes(&self) -> &'a [u8] {
        self.data
    }
    /// Total size in bytes, equal to `self.bytes().len()`
    pub fn len(&self) -> usize {
        self.data.len()
    }
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Header and formatted area, `header().length()` bytes long
    pub fn formatted(&self) -> &'a [u8] {
        self.formatted
    }
    /// Unformatted area following the formatted one
    pub fn trailing(&self) -> &'a [u8] {
        self.trailing
    }
    pub fn strings(&self) -> StringTable<'a> {
        StringTable::new(self.trailing)
    }

    /// Is this the End-of-Table (Type 127) structure?
    pub fn is_end_of_table(&self) -> bool {
        self.stype() == StructureType::EndOfTable as u8
    }
}

/// Lazy, single-pass walk over the structures in a table.
///
/// The walk ends, without error, at the first structure which cannot be
/// delimited within the buffer.  Everything yielded before that point is
/// well-formed.  To traverse the table again, construct a new walker over
/// the same buffer.
pub struct Structures<'a> {
    data: &'a [u8],
    cursor: usize,
    index: usize,
    done: bool,
    log: slog::Logger,
}
impl<'a> Structures<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_log(data, &crate::null_log())
    }

    pub fn with_log(data: &'a [u8], log: &slog::Logger) -> Self {
        Self {
            data,
            cursor: 0,
            index: 0,
            done: false,
            log: log.new(o!("component" => "smbios-walk")),
        }
    }

    fn stop(&mut self, reason: &'static str) -> Option<Structure<'a>> {
        self.done = true;
        debug!(self.log, "structure walk stopped early";
            "reason" => reason,
            "offset" => self.cursor,
            "structures" => self.index,
        );
        None
    }
}
impl<'a> Iterator for Structures<'a> {
    type Item = Structure<'a>;

    fn next(&mut self) -> Option<Structure<'a>> {
        if self.done {
            return None;
        }

        let rest = self.data.get(self.cursor..).unwrap_or(&[]);
        if rest.is_empty() {
            self.done = true;
            return None;
        }
        let Some(header) = StructureHeader::parse(rest) else {
            return self.stop("truncated header");
        };
        if header.length() == 0 && header.handle().0 == 0 {
            // null padding past the last structure
            return self.stop("zeroed header");
        }

        let formatted_len = usize::from(header.length());
        if formatted_len < HEADER_LEN {
            return self.stop("length shorter than header");
        }
        if formatted_len > rest.len() {
            return self.stop("formatted area overruns table");
        }
        let Some(strings_len) = rest[formatted_len..]
            .windows(TABLE_TERMINATOR.len())
            .position(|pair| pair == TABLE_TERMINATOR)
        else {
            return self.stop("unterminated string table");
        };

        let span = formatted_len + strings_len + TABLE_TERMINATOR.len();
        let data = &rest[..span];
        let (formatted, trailing) = data.split_at(formatted_len);
        let structure = Structure {
            index: self.index,
            offset: self.cursor,
            header,
            data,
            formatted,
            trailing,
        };

        self.cursor += span;
        self.index += 1;
        Some(structure)
    }
}
impl FusedIterator for Structures<'_> {}

#[cfg(test)]
pub(crate) mod test {
    use super::*;
    use proptest::prelude::*;

    /// Assemble a structure from its parts.  `formatted` excludes the header,
    /// and `strings` should include the terminating NULs.
    pub(crate) fn raw_structure(
        stype: u8,
        handle: u16,
        formatted: &[u8],
        strings: &[u8],
    ) -> Vec<u8> {
        let length = (HEADER_LEN + formatted.len()) as u8;
        let mut buf = vec![stype, length];
        buf.extend_from_slice(&handle.to_le_bytes());
        buf.extend_from_slice(formatted);
        buf.extend_from_slice(strings);
        buf
    }

    #[test]
    fn short_buffers_are_empty() {
        for len in 0..HEADER_LEN {
            let data = vec![1u8; len];
            assert_eq!(Structures::new(&data).count(), 0);
        }
    }

    #[test]
    fn single_structure() {
        let data = raw_structure(1, 0x0100, &[0xaa; 4], b"Oxide\0\0");
        let all: Vec<_> = Structures::new(&data).collect();

        assert_eq!(all.len(), 1);
        let s = &all[0];
        assert_eq!(s.index(), 0);
        assert_eq!(s.offset(), 0);
        assert_eq!(s.stype(), 1);
        assert_eq!(s.handle(), Handle(0x0100));
        assert_eq!(s.header().length(), 8);
        assert_eq!(s.len(), data.len());
        assert_eq!(s.formatted().len(), 8);
        assert_eq!(s.trailing(), b"Oxide\0\0");
        assert_eq!(s.strings().get(1).unwrap(), "Oxide");
    }

    #[test]
    fn sequence_in_order() {
        let mut data = raw_structure(0, 0, &[1, 2], b"\0\0");
        data.extend(raw_structure(17, 0x1100, &[0; 8], b"A\0B\0\0"));
        data.extend(raw_structure(127, 0xfeff, &[], b"\0\0"));

        let all: Vec<_> = Structures::new(&data).collect();
        let types: Vec<u8> = all.iter().map(Structure::stype).collect();
        let indices: Vec<usize> = all.iter().map(Structure::index).collect();
        assert_eq!(types, [0, 17, 127]);
        assert_eq!(indices, [0, 1, 2]);
        assert_eq!(all[1].offset(), 8);
        assert_eq!(all[1].len(), 12 + 5);
        assert!(all[2].is_end_of_table());
        assert!(!all[1].is_end_of_table());
    }

    #[test]
    fn walks_past_end_of_table() {
        let mut data = raw_structure(127, 0xfeff, &[], b"\0\0");
        data.extend(raw_structure(1, 0x0001, &[], b"\0\0"));
        assert_eq!(Structures::new(&data).count(), 2);
    }

    #[test]
    fn stops_at_zeroed_header() {
        let mut data = raw_structure(2, 0x0200, &[0; 2], b"\0\0");
        data.extend([0u8; 16]);
        data.extend(raw_structure(3, 0x0300, &[0; 2], b"\0\0"));
        assert_eq!(Structures::new(&data).count(), 1);
    }

    #[test]
    fn length_overrun_emits_nothing() {
        let mut data = raw_structure(17, 0x1000, &[0; 4], b"\0\0");
        data[1] = 0x40;
        assert_eq!(Structures::new(&data).count(), 0);
    }

    #[test]
    fn length_below_header_size() {
        let data = [4u8, 2, 0x34, 0x12, 0, 0];
        assert_eq!(Structures::new(&data).count(), 0);
    }

    #[test]
    fn unterminated_strings_are_dropped() {
        let mut data = raw_structure(0, 0, &[0xff; 4], b"\0\0");
        data.extend(raw_structure(1, 1, &[0xff; 4], b"Vendor\0"));
        let all: Vec<_> = Structures::new(&data).collect();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].stype(), 0);
    }

    #[test]
    fn trailing_bytes_ignored() {
        let mut data = raw_structure(4, 0x0400, &[], b"\0\0");
        data.extend([0u8; 3]);
        let mut walk = Structures::new(&data);
        assert!(walk.next().is_some());
        assert!(walk.next().is_none());
        assert!(walk.next().is_none());
    }

    proptest! {
        #[test]
        fn spans_stay_in_bounds(data in proptest::collection::vec(any::<u8>(), 0..512)) {
            let mut expected_offset = 0;
            for (i, s) in Structures::new(&data).enumerate() {
                prop_assert_eq!(s.index(), i);
                prop_assert_eq!(s.offset(), expected_offset);
                prop_assert!(s.len() >= usize::from(s.header().length()));
                prop_assert!(s.header().length() as usize >= HEADER_LEN);
                prop_assert!(s.offset() + s.len() <= data.len());
                prop_assert!(s.bytes().ends_with(&TABLE_TERMINATOR));
                expected_offset += s.len();
            }
        }
    }
}
