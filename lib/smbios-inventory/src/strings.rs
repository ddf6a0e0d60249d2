// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Structure string tables.
//!
//! Strings associated with a structure are NUL-terminated and concatenated
//! directly after its formatted area, with an extra NUL closing the table.
//! The formatted area refers to them by 1-based index, with 0 meaning "no
//! string".

use crate::FieldError;

/// Read-only view of the string table trailing a structure's formatted area
#[derive(Copy, Clone, Debug)]
pub struct StringTable<'a> {
    data: &'a [u8],
}
impl<'a> StringTable<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Resolve the string at `index`.
    ///
    /// Index 0 is the empty string.  Trailing whitespace, which vendors are
    /// fond of padding values with, is removed.  An index beyond the end of
    /// the table yields [FieldError::StringIndex].
    pub fn get(&self, index: u8) -> Result<String, FieldError> {
        if index == 0 {
            return Ok(String::new());
        }
        self.iter()
            .nth(usize::from(index) - 1)
            .ok_or_else(|| FieldError::StringIndex { index, count: self.len() })
    }

    /// Iterate over the strings present in the table, in index order.
    pub fn iter(&self) -> Strings<'a> {
        Strings { rest: self.data }
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// Iterator over the entries of a [StringTable]
pub struct Strings<'a> {
    rest: &'a [u8],
}
impl Iterator for Strings<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let nul = self.rest.iter().position(|b| *b == 0);
        match nul {
            // An empty entry is the start of the terminating double-NUL, and
            // a missing NUL means the table was cut short.  Either way, there
            // is nothing further to yield.
            Some(0) | None => {
                self.rest = &[];
                None
            }
            Some(n) => {
                let (raw, rest) = self.rest.split_at(n);
                self.rest = &rest[1..];
                Some(String::from_utf8_lossy(raw).trim_end().to_string())
            }
        }
    }
}

/// Resolve string `index` within the trailing area `data` of a structure.
pub fn resolve_string(data: &[u8], index: u8) -> Result<String, FieldError> {
    StringTable::new(data).get(index)
}
