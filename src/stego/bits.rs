// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/cipher-core

//! Bit-level codec between text, bytes, and the embeddable bitstream.
//!
//! The wire unit is one bit per pixel channel sample. Text maps to bits via
//! 8-bit code units: each character's code point becomes one byte (the embed
//! pipeline rejects code points above U+00FF before this layer runs), and
//! each byte expands MSB-first into 8 bits. Decoding back from a bitstring
//! is fail-soft: the trailing partial byte is discarded, and any conversion
//! failure yields an empty string rather than a partial one.

/// Convert text to a bitstream, one 8-bit code unit per character, MSB first.
///
/// Code points above U+00FF are truncated to their low byte here; callers
/// that need faithful round-trips must validate first (the embed pipeline
/// does, via [`StegoError::UnencodableChar`](super::StegoError)).
pub fn text_to_bits(text: &str) -> Vec<u8> {
    let mut bits = Vec::with_capacity(text.chars().count() * 8);
    for ch in text.chars() {
        let byte = ch as u32 as u8;
        for bit_pos in (0..8).rev() {
            bits.push((byte >> bit_pos) & 1);
        }
    }
    bits
}

/// Reinterpret a bitstream as text, 8 bits per code point, MSB first.
///
/// The bitstream is first truncated to a multiple of 8; the trailing partial
/// byte is discarded. Each byte becomes the code point U+0000–U+00FF it
/// names. This direction never fails for 8-bit groups, but the contract is
/// fail-soft: a failure would return `""`, never a partial string.
pub fn bits_to_text(bits: &[u8]) -> String {
    let aligned = &bits[..bits.len() - (bits.len() % 8)];
    bits_to_bytes(aligned).into_iter().map(char::from).collect()
}

/// Convert bytes to a bit vector (MSB first within each byte).
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<u8> {
    let mut bits = Vec::with_capacity(bytes.len() * 8);
    for &byte in bytes {
        for bit_pos in (0..8).rev() {
            bits.push((byte >> bit_pos) & 1);
        }
    }
    bits
}

/// Convert a bit vector (MSB first) back to bytes.
/// Pads the last byte with zero bits if `bits.len()` is not a multiple of 8.
pub fn bits_to_bytes(bits: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity((bits.len() + 7) / 8);
    for chunk in bits.chunks(8) {
        let mut byte = 0u8;
        for (i, &bit) in chunk.iter().enumerate() {
            byte |= (bit & 1) << (7 - i);
        }
        bytes.push(byte);
    }
    bytes
}
