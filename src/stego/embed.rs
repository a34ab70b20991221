// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/cipher-core

//! Embed pipeline: write a framed message into a carrier's LSB plane.
//!
//! The message plus the fixed [`DELIMITER`](super::DELIMITER) expand to one
//! bit per channel sample, MSB first within each 8-bit code unit. Bit *i*
//! replaces the least-significant bit of sample *i* in flat (y, x, channel)
//! order; the upper 7 bits and all samples beyond the bitstream are
//! untouched. All preconditions are checked before any write, so a failed
//! embed leaves no partial output.

use crate::pixels::PixelImage;
use crate::stego::bits::text_to_bits;
use crate::stego::capacity::frame_bits;
use crate::stego::error::StegoError;
use crate::stego::DELIMITER;

/// Embed `message` into a copy of `carrier`, returning the stego image.
///
/// The carrier is never mutated; the returned image has identical
/// dimensions with the framed bitstream written into its LSB plane.
///
/// # Errors
/// - [`StegoError::InvalidChannelCount`] if the carrier is not 3-channel.
/// - [`StegoError::UnencodableChar`] if the message contains a code point
///   above U+00FF (the 8-bit code units cannot carry it faithfully).
/// - [`StegoError::CapacityExceeded`] if message + delimiter need more bits
///   than the carrier has samples.
pub fn embed(carrier: &PixelImage, message: &str) -> Result<PixelImage, StegoError> {
    // 1. Preconditions, checked fail-fast before any write.
    if !carrier.is_rgb() {
        return Err(StegoError::InvalidChannelCount { channels: carrier.channels() });
    }
    if let Some(ch) = message.chars().find(|&c| c as u32 > 0xFF) {
        return Err(StegoError::UnencodableChar { ch });
    }
    let required_bits = frame_bits(message);
    let available_bits = carrier.sample_count();
    if required_bits > available_bits {
        return Err(StegoError::CapacityExceeded { required_bits, available_bits });
    }

    // 2. Frame the payload and expand to bits.
    let framed = format!("{message}{DELIMITER}");
    let bits = text_to_bits(&framed);

    log::debug!(
        "embedding {} bits into {}x{} carrier ({} samples)",
        bits.len(),
        carrier.width(),
        carrier.height(),
        available_bits
    );

    // 3. Overwrite the LSB of the first bits.len() samples.
    let width = carrier.width();
    let height = carrier.height();
    let mut samples = carrier.clone().into_samples();
    for (sample, bit) in samples.iter_mut().zip(bits) {
        *sample = (*sample & 0xFE) | bit;
    }

    Ok(PixelImage::from_raw(width, height, 3, samples))
}
