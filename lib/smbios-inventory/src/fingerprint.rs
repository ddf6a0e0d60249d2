// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Content fingerprints of raw structure bytes, for change detection.

use ring::digest::{digest, SHA256};

/// Digest over the raw bytes of a structure, rendered as text
pub trait Fingerprint {
    fn fingerprint(&self, data: &[u8]) -> String;
}

/// Lowercase hex SHA-256
#[derive(Copy, Clone, Debug, Default)]
pub struct Sha256Fingerprint;
impl Fingerprint for Sha256Fingerprint {
    fn fingerprint(&self, data: &[u8]) -> String {
        hex::encode(digest(&SHA256, data).as_ref())
    }
}
