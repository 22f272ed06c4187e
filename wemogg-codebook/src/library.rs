// Wemogg
// Copyright (c) 2026 The Project Wemogg Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use log::debug;

use wemogg_core::errors::{format_violation_error, invalid_id_error, Result};
use wemogg_core::io::{BitReaderRtl, WriteBitsRtl};

use crate::transcode;

#[inline(always)]
fn read_u32le(buf: &[u8], pos: usize) -> u32 {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&buf[pos..pos + 4]);
    u32::from_le_bytes(bytes)
}

/// An id-indexed library of packed codebooks.
///
/// The library blob ends with a 32-bit little-endian byte offset at which the offset table itself
/// begins. Bytes before that offset are the packed codebooks, back-to-back with no delimiters;
/// from it to the end of the blob runs the table of 32-bit little-endian entries, entry `i` being
/// the start of codebook `i`. The final entry is the table's own start offset and so marks the end
/// of the last codebook.
///
/// The library is immutable after construction, so lookups may be shared freely across
/// simultaneous transcoding calls.
pub struct CodebookLibrary {
    data: Box<[u8]>,
    offsets: Vec<u32>,
}

impl CodebookLibrary {
    /// Instantiate a `CodebookLibrary` from a library blob.
    pub fn new(data: Vec<u8>) -> Result<CodebookLibrary> {
        let len = data.len();

        if len < 4 {
            return format_violation_error("codebook library too short");
        }

        let off = read_u32le(&data, len - 4) as usize;

        if off > len - 4 {
            return format_violation_error("invalid codebook offset table");
        }

        // The table's final entry is its own start offset, read above, and doubles as the end
        // sentinel for the last codebook.
        let n_entries = (len - off) / 4;

        let offsets: Vec<u32> = (0..n_entries).map(|i| read_u32le(&data, off + 4 * i)).collect();

        let mut data = data;
        data.truncate(off);

        debug!("loaded codebook library: {} codebooks, {} data bytes", n_entries - 1, data.len());

        Ok(CodebookLibrary { data: data.into_boxed_slice(), offsets })
    }

    /// Gets the number of addressable codebooks.
    pub fn count(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Gets the packed bytes of the codebook with the given id.
    pub fn get(&self, id: usize) -> Result<&[u8]> {
        if id >= self.count() {
            return invalid_id_error(id);
        }

        let start = self.offsets[id] as usize;
        let end = self.offsets[id + 1] as usize;

        if start > end || end > self.data.len() {
            return invalid_id_error(id);
        }

        Ok(&self.data[start..end])
    }

    /// Gets the packed byte length of the codebook with the given id.
    pub fn size(&self, id: usize) -> Result<usize> {
        Ok(self.get(id)?.len())
    }

    /// Rebuilds the codebook with the given id into `bw` in the standard encoding.
    pub fn rebuild<W: WriteBitsRtl>(&self, id: usize, bw: &mut W) -> Result<()> {
        let cb = self.get(id)?;

        let mut bs = BitReaderRtl::new(cb);

        transcode::rebuild(&mut bs, cb.len() as u64, bw)
    }
}
