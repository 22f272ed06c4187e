// Wemogg
// Copyright (c) 2026 The Project Wemogg Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared infrastructure for Project Wemogg: the common error type and the bit-precision I/O
//! primitives every transcoding path is written against.

#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]

pub mod errors;
pub mod io;
