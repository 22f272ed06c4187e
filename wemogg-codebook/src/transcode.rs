// Wemogg
// Copyright (c) 2026 The Project Wemogg Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use log::debug;

use wemogg_core::errors::{format_violation_error, size_mismatch_error, Result};
use wemogg_core::io::{ReadBitsRtl, WriteBitsRtl};

/// Synchronization word prefixed to every codebook in the standard encoding.
pub const CODEBOOK_SYNC: u32 = 0x56_4342;

/// As defined in section 9.2.1 of the Vorbis I specification.
///
/// The `ilog` function returns the position number (1 through n) of the highest set bit in the
/// two's complement integer value `x`.
#[inline(always)]
fn ilog(x: u32) -> u32 {
    32 - x.leading_zeros()
}

/// As defined in section 9.2.3 of the Vorbis I specification.
///
/// Returns the number of quantization values in a lookup type 1 table: the greatest integer for
/// which `value.pow(dimensions) <= entries`.
fn lookup1_values(entries: u32, dimensions: u16) -> u32 {
    if dimensions == 0 {
        // A zero-dimensional lookup table has no values.
        return 0;
    }

    // Seed from a float root, then correct with exact integer arithmetic. The accumulators
    // saturate rather than overflow for large entry counts.
    let mut value = (f64::from(entries)).powf(1.0 / f64::from(dimensions)).floor() as u32;

    loop {
        let mut acc = 1u64;
        let mut acc1 = 1u64;

        for _ in 0..dimensions {
            acc = acc.saturating_mul(u64::from(value));
            acc1 = acc1.saturating_mul(u64::from(value) + 1);
        }

        if acc <= u64::from(entries) && acc1 > u64::from(entries) {
            return value;
        }
        else if acc > u64::from(entries) {
            value -= 1;
        }
        else {
            value += 1;
        }
    }
}

/// Copies the run-length encoded list of an ordered codebook: a 5-bit initial codeword length,
/// then counts of entries sharing each successive length, each count `ilog` of the remaining
/// entries wide. The field widths are identical in the packed and standard encodings.
fn copy_ordered_lengths<R: ReadBitsRtl, W: WriteBitsRtl>(
    bs: &mut R,
    bw: &mut W,
    entries: u32,
) -> Result<()> {
    // IN/OUT: 5 bit initial length.
    let initial_length = bs.read_bits_leq32(5)?;
    bw.write_bits_leq32(initial_length, 5);

    let mut current_entry = 0;

    while current_entry < entries {
        // IN/OUT: ilog(entries - current_entry) bit count with the given length.
        let width = ilog(entries - current_entry);

        let number = bs.read_bits_leq32(width)?;
        bw.write_bits_leq32(number, width);

        current_entry += number;
    }

    if current_entry > entries {
        return format_violation_error("codeword count out of range");
    }

    Ok(())
}

/// Copies the body of a lookup type 1 table. The field widths are identical in the packed and
/// standard encodings.
fn copy_lookup1<R: ReadBitsRtl, W: WriteBitsRtl>(
    bs: &mut R,
    bw: &mut W,
    entries: u32,
    dimensions: u16,
) -> Result<()> {
    // IN/OUT: 32 bit minimum value, 32 bit maximum value, 4 bit value length-1, 1 bit sequence
    // flag.
    let min = bs.read_bits_leq32(32)?;
    let max = bs.read_bits_leq32(32)?;
    let value_length = bs.read_bits_leq32(4)?;
    let sequence_flag = bs.read_bit()?;

    bw.write_bits_leq32(min, 32);
    bw.write_bits_leq32(max, 32);
    bw.write_bits_leq32(value_length, 4);
    bw.write_bit(sequence_flag);

    let quantvals = lookup1_values(entries, dimensions);

    for _ in 0..quantvals {
        // IN/OUT: value_length+1 bit value.
        let value = bs.read_bits_leq32(value_length + 1)?;
        bw.write_bits_leq32(value, value_length + 1);
    }

    Ok(())
}

/// Rebuilds one packed codebook read from `bs` into the standard encoding written to `bw`.
///
/// `cb_size` is the packed byte length declared for the codebook. The packed source pads out its
/// final byte, so a fully consumed byte still leaves one byte of slack; the rebuild fails with
/// [`wemogg_core::errors::Error::SizeMismatch`] unless `bits_read / 8 + 1` matches. Pass
/// `cb_size == 0` to disable the check, for an inline bitstream whose length is not separately
/// known.
pub fn rebuild<R: ReadBitsRtl, W: WriteBitsRtl>(bs: &mut R, cb_size: u64, bw: &mut W) -> Result<()> {
    // IN: 4 bit dimensions, 14 bit entry count.
    let dimensions = bs.read_bits_leq32(4)?;
    let entries = bs.read_bits_leq32(14)?;

    debug!("codebook: {} dimensions, {} entries", dimensions, entries);

    // OUT: 24 bit sync, 16 bit dimensions, 24 bit entry count.
    bw.write_bits_leq32(CODEBOOK_SYNC, 24);
    bw.write_bits_leq32(dimensions, 16);
    bw.write_bits_leq32(entries, 24);

    // IN/OUT: 1 bit ordered flag.
    let ordered = bs.read_bit()?;
    bw.write_bit(ordered);

    if ordered {
        debug!("ordered");

        copy_ordered_lengths(bs, bw, entries)?;
    }
    else {
        // IN: 3 bit codeword length field width, 1 bit sparse flag.
        let codeword_length_length = bs.read_bits_leq32(3)?;
        let sparse = bs.read_bit()?;

        debug!("unordered, {} bit lengths, sparse={}", codeword_length_length, sparse);

        if codeword_length_length == 0 || codeword_length_length > 5 {
            return format_violation_error("nonsense codeword length");
        }

        // OUT: 1 bit sparse flag. The standard encoding always uses a 5 bit codeword length
        // field, so the packed field width is not re-emitted.
        bw.write_bit(sparse);

        for _ in 0..entries {
            let mut present = true;

            if sparse {
                // IN/OUT: 1 bit presence flag.
                present = bs.read_bit()?;
                bw.write_bit(present);
            }

            if present {
                // IN: codeword length-1 at the packed field width.
                let codeword_length = bs.read_bits_leq32(codeword_length_length)?;

                // OUT: 5 bit codeword length-1.
                bw.write_bits_leq32(codeword_length, 5);
            }
        }
    }

    // IN: 1 bit lookup type. OUT: 4 bit lookup type.
    let lookup_type = bs.read_bits_leq32(1)?;
    bw.write_bits_leq32(lookup_type, 4);

    match lookup_type {
        0 => (),
        1 => copy_lookup1(bs, bw, entries, dimensions as u16)?,
        2 => return format_violation_error("didn't expect lookup type 2"),
        _ => return format_violation_error("invalid lookup type"),
    }

    debug!("total bits read = {}", bs.bits_read());

    // Check that exactly all the declared bytes were consumed.
    if cb_size != 0 && bs.bits_read() / 8 + 1 != cb_size {
        return size_mismatch_error(cb_size, bs.bits_read() / 8 + 1);
    }

    Ok(())
}

/// Copies one codebook already in the standard encoding from `bs` to `bw`, validating its
/// structure. Every field is re-emitted at the width it was read.
///
/// Standard-encoding codebooks are self-delimiting through their declared entry count and field
/// widths, so no byte-length check applies.
pub fn copy<R: ReadBitsRtl, W: WriteBitsRtl>(bs: &mut R, bw: &mut W) -> Result<()> {
    // IN/OUT: 24 bit sync, 16 bit dimensions, 24 bit entry count.
    let sync = bs.read_bits_leq32(24)?;

    if sync != CODEBOOK_SYNC {
        return format_violation_error("invalid codebook identifier");
    }

    let dimensions = bs.read_bits_leq32(16)?;
    let entries = bs.read_bits_leq32(24)?;

    debug!("codebook: {} dimensions, {} entries", dimensions, entries);

    bw.write_bits_leq32(sync, 24);
    bw.write_bits_leq32(dimensions, 16);
    bw.write_bits_leq32(entries, 24);

    // IN/OUT: 1 bit ordered flag.
    let ordered = bs.read_bit()?;
    bw.write_bit(ordered);

    if ordered {
        debug!("ordered");

        copy_ordered_lengths(bs, bw, entries)?;
    }
    else {
        // IN/OUT: 1 bit sparse flag. The codeword length field is always 5 bits here.
        let sparse = bs.read_bit()?;
        bw.write_bit(sparse);

        debug!("unordered, sparse={}", sparse);

        for _ in 0..entries {
            let mut present = true;

            if sparse {
                // IN/OUT: 1 bit presence flag.
                present = bs.read_bit()?;
                bw.write_bit(present);
            }

            if present {
                // IN/OUT: 5 bit codeword length-1.
                let codeword_length = bs.read_bits_leq32(5)?;
                bw.write_bits_leq32(codeword_length, 5);
            }
        }
    }

    // IN/OUT: 4 bit lookup type.
    let lookup_type = bs.read_bits_leq32(4)?;
    bw.write_bits_leq32(lookup_type, 4);

    match lookup_type {
        0 => (),
        1 => copy_lookup1(bs, bw, entries, dimensions as u16)?,
        2 => return format_violation_error("didn't expect lookup type 2"),
        _ => return format_violation_error("invalid lookup type"),
    }

    debug!("total bits read = {}", bs.bits_read());

    Ok(())
}
