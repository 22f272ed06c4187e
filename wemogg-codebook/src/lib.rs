// Wemogg
// Copyright (c) 2026 The Project Wemogg Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transcodes the packed Vorbis codebooks found in Wwise soundbank data into the standard
//! self-contained codebook encoding of the Vorbis I bitstream.
//!
//! Packed codebooks are stored back-to-back in a shared library blob and addressed by numeric id;
//! a stream may also carry a codebook inline, already in the standard encoding. Both arrive and
//! leave as bit streams: locating codebook bytes within a container, and framing the rebuilt
//! codebooks into setup packets, are the caller's responsibility.

#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]

mod library;
mod transcode;

pub use library::CodebookLibrary;
pub use transcode::{copy, rebuild, CODEBOOK_SYNC};
