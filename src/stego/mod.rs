// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/cipher-core

//! LSB steganography codec.
//!
//! Hides a text payload in the least-significant bits of an RGB carrier:
//!
//! 1. the message plus the fixed [`DELIMITER`] expand to one bit per
//!    channel sample ([`bits`]),
//! 2. [`embed`] overwrites the LSB plane of a carrier copy,
//! 3. [`extract`] reads every LSB back, decodes the byte stream, and scans
//!    for the delimiter.
//!
//! Capacity accounting lives in [`capacity`]; the codec carries no
//! encryption or error correction — lossless storage of the stego image is
//! the caller's responsibility, since any lossy re-encode destroys the LSB
//! plane.

pub mod bits;
pub mod capacity;
pub mod embed;
pub mod error;
pub mod extract;

/// Marker appended to every embedded message so the extractor can find the
/// payload's end. Protocol constant — embed and extract must agree on it,
/// and a message containing this literal truncates at extraction.
pub const DELIMITER: &str = "#####";

pub use capacity::{capacity_bytes, fits, frame_bits};
pub use embed::embed;
pub use error::StegoError;
pub use extract::{extract, extract_with, DecodePolicy, Extraction};

#[cfg(test)]
mod delimiter_tests {
    use super::*;

    #[test]
    fn delimiter_is_five_hashes() {
        assert_eq!(DELIMITER, "#####");
        assert_eq!(DELIMITER.len(), 5);
    }

    #[test]
    fn delimiter_is_single_byte_units() {
        assert!(DELIMITER.chars().all(|c| (c as u32) < 0x80));
    }
}
