// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/cipher-core

//! Carrier capacity accounting.
//!
//! One payload bit fits per channel sample, so an RGB carrier holds
//! `width * height * 3` bits, or `floor(width * height * 3 / 8)` bytes for
//! the message plus delimiter. Exposed so callers can pre-validate a message
//! before attempting to embed.

use crate::pixels::PixelImage;
use crate::stego::DELIMITER;

/// Capacity of the carrier in bytes, message + delimiter included.
///
/// `floor(width * height * channels / 8)` — one bit per sample.
pub fn capacity_bytes(image: &PixelImage) -> usize {
    image.sample_count() / 8
}

/// Number of bits the framed payload (message + delimiter) occupies.
///
/// One 8-bit code unit per character; multi-byte UTF-8 encodings are
/// irrelevant here because the codec operates on code points, not UTF-8.
pub fn frame_bits(message: &str) -> usize {
    (message.chars().count() + DELIMITER.len()) * 8
}

/// Whether `message` (plus delimiter) fits into `image`.
pub fn fits(image: &PixelImage, message: &str) -> bool {
    frame_bits(message) <= image.sample_count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb(width: u32, height: u32) -> PixelImage {
        PixelImage::from_raw(width, height, 3, vec![0u8; (width * height * 3) as usize])
    }

    #[test]
    fn capacity_of_8x8_rgb() {
        // 8*8*3 = 192 samples -> 24 bytes.
        assert_eq!(capacity_bytes(&rgb(8, 8)), 24);
    }

    #[test]
    fn capacity_floors() {
        // 3*3*3 = 27 samples -> floor(27/8) = 3 bytes.
        assert_eq!(capacity_bytes(&rgb(3, 3)), 3);
    }

    #[test]
    fn frame_bits_counts_delimiter() {
        assert_eq!(frame_bits(""), DELIMITER.len() * 8);
        assert_eq!(frame_bits("hi"), (2 + DELIMITER.len()) * 8);
    }

    #[test]
    fn fits_boundary() {
        // 192 sample image: a 19-char message frames to (19+5)*8 = 192 bits.
        let img = rgb(8, 8);
        assert!(fits(&img, &"x".repeat(19)));
        assert!(!fits(&img, &"x".repeat(20)));
    }
}
