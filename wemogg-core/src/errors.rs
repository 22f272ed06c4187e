// Wemogg
// Copyright (c) 2026 The Project Wemogg Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `errors` module defines the common error type.

use std::error;
use std::fmt;
use std::io;
use std::result;

/// `Error` provides an enumeration of all possible errors reported by Wemogg.
#[derive(Debug)]
pub enum Error {
    /// An IO error occured while reading or writing a bit stream. Almost always an unexpected
    /// end of the source bitstream.
    IoError(std::io::Error),
    /// A codebook id was outside the valid range of the codebook library it was looked up in.
    InvalidId(usize),
    /// The codebook bitstream broke a structural rule and cannot be transcoded.
    FormatViolation(&'static str),
    /// The number of bytes consumed rebuilding a codebook does not match the byte length the
    /// codebook library declared for it.
    SizeMismatch { expected: u64, actual: u64 },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::IoError(ref err) => err.fmt(f),
            Error::InvalidId(id) => {
                write!(f, "invalid codebook id: {}", id)
            }
            Error::FormatViolation(msg) => {
                write!(f, "malformed codebook: {}", msg)
            }
            Error::SizeMismatch { expected, actual } => {
                write!(f, "codebook size mismatch: expected {} bytes, consumed {}", expected, actual)
            }
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::IoError(ref err) => Some(err),
            Error::InvalidId(_) => None,
            Error::FormatViolation(_) => None,
            Error::SizeMismatch { .. } => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::IoError(err)
    }
}

pub type Result<T> = result::Result<T, Error>;

/// Convenience function to create an invalid id error.
pub fn invalid_id_error<T>(id: usize) -> Result<T> {
    Err(Error::InvalidId(id))
}

/// Convenience function to create a format violation error.
pub fn format_violation_error<T>(desc: &'static str) -> Result<T> {
    Err(Error::FormatViolation(desc))
}

/// Convenience function to create a size mismatch error.
pub fn size_mismatch_error<T>(expected: u64, actual: u64) -> Result<T> {
    Err(Error::SizeMismatch { expected, actual })
}
