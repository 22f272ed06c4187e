// Wemogg
// Copyright (c) 2026 The Project Wemogg Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::cmp::min;
use std::io;

fn end_of_bitstream_error<T>() -> io::Result<T> {
    Err(io::Error::new(io::ErrorKind::UnexpectedEof, "unexpected end of bitstream"))
}

/// `ReadBitsRtl` reads bits from least-significant to most-significant.
///
/// Stated another way, if N-bits are read then bit 0, the first bit read, is the least-significant
/// bit, and bit N-1, the last bit read, is the most-significant. This is the packing convention of
/// the Vorbis bitstream.
pub trait ReadBitsRtl {
    /// Reads a single bit as a boolean value or returns an error.
    fn read_bit(&mut self) -> io::Result<bool>;

    /// Reads up to 32-bits and interprets them as an unsigned integer or returns an error.
    fn read_bits_leq32(&mut self, bit_width: u32) -> io::Result<u32>;

    /// Gets the total number of bits consumed since instantiation.
    fn bits_read(&self) -> u64;
}

/// `WriteBitsRtl` writes bits from least-significant to most-significant, mirroring
/// [`ReadBitsRtl`]. A value written with a given width is recovered by a read of the same width.
pub trait WriteBitsRtl {
    /// Writes a single bit.
    fn write_bit(&mut self, bit: bool);

    /// Writes the `bit_width` least-significant bits of `value`. Any bits of `value` above
    /// `bit_width` are ignored.
    fn write_bits_leq32(&mut self, value: u32, bit_width: u32);

    /// Gets the total number of bits written since instantiation.
    fn bits_written(&self) -> u64;
}

/// `BitReaderRtl` reads bits from least-significant to most-significant from any `&[u8]`.
pub struct BitReaderRtl<'a> {
    buf: &'a [u8],
    bits: u64,
    n_bits_left: u32,
    n_bits_read: u64,
}

impl<'a> BitReaderRtl<'a> {
    /// Instantiate a new `BitReaderRtl` with the given buffer.
    pub fn new(buf: &'a [u8]) -> Self {
        BitReaderRtl { buf, bits: 0, n_bits_left: 0, n_bits_read: 0 }
    }

    fn fetch_bits(&mut self) -> io::Result<()> {
        if self.buf.is_empty() {
            // Checked before the counter update so a failed read leaves bits_read exact.
            return end_of_bitstream_error();
        }

        // Any bits still cached at this point were folded into a value being assembled by the
        // caller, so they count as consumed.
        self.n_bits_read += u64::from(self.n_bits_left);

        let mut buf = [0u8; std::mem::size_of::<u64>()];

        let read_len = min(self.buf.len(), std::mem::size_of::<u64>());

        buf[..read_len].copy_from_slice(&self.buf[..read_len]);

        self.buf = &self.buf[read_len..];

        self.bits = u64::from_le_bytes(buf);
        self.n_bits_left = (read_len as u32) << 3;

        Ok(())
    }

    #[inline(always)]
    fn consume_bits(&mut self, num: u32) {
        self.n_bits_left -= num;
        self.bits >>= num;
        self.n_bits_read += u64::from(num);
    }
}

impl ReadBitsRtl for BitReaderRtl<'_> {
    #[inline(always)]
    fn read_bit(&mut self) -> io::Result<bool> {
        if self.n_bits_left < 1 {
            self.fetch_bits()?;
        }

        let bit = (self.bits & 1) == 1;

        self.consume_bits(1);
        Ok(bit)
    }

    #[inline(always)]
    fn read_bits_leq32(&mut self, bit_width: u32) -> io::Result<u32> {
        debug_assert!(bit_width <= u32::BITS);

        let mut bits = self.bits;
        let mut bits_needed = bit_width;

        while bits_needed > self.n_bits_left {
            bits_needed -= self.n_bits_left;

            self.fetch_bits()?;

            bits |= self.bits << (bit_width - bits_needed);
        }

        self.consume_bits(bits_needed);

        // Since bit_width is <= 32, this shift will never panic.
        let mask = !(!0u64 << bit_width);

        Ok((bits & mask) as u32)
    }

    #[inline(always)]
    fn bits_read(&self) -> u64 {
        self.n_bits_read
    }
}

/// `BitWriterRtl` writes bits from least-significant to most-significant into an owned `Vec<u8>`.
///
/// The final partial byte, if any, is zero-padded when the writer is finalized.
pub struct BitWriterRtl {
    buf: Vec<u8>,
    bits: u64,
    n_bits_pending: u32,
}

impl BitWriterRtl {
    /// Instantiate a new empty `BitWriterRtl`.
    pub fn new() -> Self {
        BitWriterRtl { buf: Vec::new(), bits: 0, n_bits_pending: 0 }
    }

    #[inline(always)]
    fn flush(&mut self) {
        while self.n_bits_pending >= 8 {
            self.buf.push(self.bits as u8);
            self.bits >>= 8;
            self.n_bits_pending -= 8;
        }
    }

    /// Finalizes the bitstream, zero-padding the final byte, and returns the written bytes.
    pub fn finalize(mut self) -> Vec<u8> {
        self.flush();
        if self.n_bits_pending > 0 {
            self.buf.push(self.bits as u8);
        }
        self.buf
    }
}

impl Default for BitWriterRtl {
    fn default() -> Self {
        Self::new()
    }
}

impl WriteBitsRtl for BitWriterRtl {
    #[inline(always)]
    fn write_bit(&mut self, bit: bool) {
        self.bits |= u64::from(bit) << self.n_bits_pending;
        self.n_bits_pending += 1;
        self.flush();
    }

    #[inline(always)]
    fn write_bits_leq32(&mut self, value: u32, bit_width: u32) {
        debug_assert!(bit_width <= u32::BITS);

        // Since bit_width is <= 32, this shift will never panic.
        let mask = !(!0u64 << bit_width);

        // At most 7 bits are pending after a flush, so the cache never overflows.
        self.bits |= (u64::from(value) & mask) << self.n_bits_pending;
        self.n_bits_pending += bit_width;
        self.flush();
    }

    #[inline(always)]
    fn bits_written(&self) -> u64 {
        ((self.buf.len() as u64) << 3) + u64::from(self.n_bits_pending)
    }
}
