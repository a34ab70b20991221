// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/cipher-core

//! Extract pipeline: read the LSB plane back into text and locate the frame.
//!
//! Every channel sample contributes one bit; bits pack MSB-first into bytes,
//! and the byte stream decodes to text under a [`DecodePolicy`]. The decoded
//! text is scanned for the first [`DELIMITER`](super::DELIMITER) occurrence —
//! everything before it is the payload. A delimiter that appears *inside*
//! the embedded message therefore truncates it; that is the framing
//! protocol's documented limitation, not a fault.
//!
//! No payload is a normal negative outcome ([`Extraction::NotFound`]), not
//! an error: a clean image simply has no delimiter in its LSB noise.

use crate::pixels::PixelImage;
use crate::stego::bits::bits_to_bytes;
use crate::stego::error::StegoError;
use crate::stego::DELIMITER;

/// How to treat byte groups that do not form valid UTF-8 during extraction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DecodePolicy {
    /// Skip invalid byte sequences and keep decoding (best-effort, lossy).
    /// This is the default: LSB noise beyond the payload rarely forms valid
    /// UTF-8, and dropping it must not abort the whole extraction.
    #[default]
    Lossy,
    /// Fail with [`StegoError::PayloadNotUtf8`] on the first invalid sequence.
    Strict,
}

/// Outcome of a completed extraction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Extraction {
    /// A delimiter was found; the payload is everything before it.
    Payload(String),
    /// The image decoded cleanly but contains no delimiter.
    NotFound,
}

/// Extract a payload from `image` using the default (lossy) decode policy.
///
/// # Errors
/// [`StegoError::InvalidChannelCount`] if the image is not 3-channel.
pub fn extract(image: &PixelImage) -> Result<Extraction, StegoError> {
    extract_with(image, DecodePolicy::default())
}

/// Extract a payload from `image` under an explicit decode policy.
///
/// # Errors
/// - [`StegoError::InvalidChannelCount`] if the image is not 3-channel.
/// - [`StegoError::PayloadNotUtf8`] under [`DecodePolicy::Strict`] when the
///   LSB byte stream contains invalid UTF-8.
pub fn extract_with(image: &PixelImage, policy: DecodePolicy) -> Result<Extraction, StegoError> {
    if !image.is_rgb() {
        return Err(StegoError::InvalidChannelCount { channels: image.channels() });
    }

    // 1. Collect the LSB plane and pack to bytes.
    let bits: Vec<u8> = image.samples().iter().map(|&s| s & 1).collect();
    let bytes = bits_to_bytes(&bits);

    // 2. Decode bytes to text under the chosen policy.
    let decoded = match policy {
        DecodePolicy::Lossy => decode_utf8_skipping(&bytes),
        DecodePolicy::Strict => match core::str::from_utf8(&bytes) {
            Ok(s) => s.to_owned(),
            Err(_) => return Err(StegoError::PayloadNotUtf8),
        },
    };

    // 3. The payload is the prefix before the first delimiter occurrence.
    match decoded.find(DELIMITER) {
        Some(pos) => {
            log::debug!("payload delimiter found after {pos} decoded chars");
            Ok(Extraction::Payload(decoded[..pos].to_owned()))
        }
        None => Ok(Extraction::NotFound),
    }
}

/// Decode UTF-8 best-effort, skipping invalid byte sequences.
///
/// Unlike `String::from_utf8_lossy`, invalid sequences are dropped rather
/// than replaced with U+FFFD, so payload text is never padded with
/// replacement characters.
fn decode_utf8_skipping(mut bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    while !bytes.is_empty() {
        match core::str::from_utf8(bytes) {
            Ok(s) => {
                out.push_str(s);
                break;
            }
            Err(e) => {
                let (valid, rest) = bytes.split_at(e.valid_up_to());
                if let Ok(s) = core::str::from_utf8(valid) {
                    out.push_str(s);
                }
                // error_len() is None only for a truncated sequence at the
                // very end of the input.
                let skip = e.error_len().unwrap_or(rest.len());
                bytes = &rest[skip..];
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stego::bits::bytes_to_bits;

    /// Build a 3-channel image whose LSB plane spells out `bytes`, padded
    /// with zero bits to fill the sample count.
    fn image_with_lsb_bytes(bytes: &[u8], width: u32, height: u32) -> PixelImage {
        let mut bits = bytes_to_bits(bytes);
        let total = (width * height * 3) as usize;
        assert!(bits.len() <= total);
        bits.resize(total, 0);
        let data: Vec<u8> = bits.iter().map(|&b| 0xA0 | b).collect();
        PixelImage::from_raw(width, height, 3, data)
    }

    #[test]
    fn finds_delimited_payload() {
        let img = image_with_lsb_bytes(b"secret#####", 8, 8);
        assert_eq!(extract(&img).unwrap(), Extraction::Payload("secret".into()));
    }

    #[test]
    fn no_delimiter_is_not_found() {
        let img = image_with_lsb_bytes(b"no terminator here", 8, 8);
        assert_eq!(extract(&img).unwrap(), Extraction::NotFound);
    }

    #[test]
    fn first_delimiter_wins() {
        let img = image_with_lsb_bytes(b"a#####b#####", 8, 8);
        assert_eq!(extract(&img).unwrap(), Extraction::Payload("a".into()));
    }

    #[test]
    fn grayscale_rejected() {
        let gray = PixelImage::from_raw(8, 8, 1, vec![0u8; 64]);
        assert_eq!(
            extract(&gray),
            Err(StegoError::InvalidChannelCount { channels: 1 })
        );
    }

    #[test]
    fn lossy_skips_invalid_bytes() {
        // 0xFF is never valid UTF-8; the delimiter after it must still be found.
        let img = image_with_lsb_bytes(b"ok\xFF\xFEmore#####", 8, 8);
        assert_eq!(extract(&img).unwrap(), Extraction::Payload("okmore".into()));
    }

    #[test]
    fn strict_rejects_invalid_bytes() {
        let img = image_with_lsb_bytes(b"ok\xFFmore#####", 8, 8);
        assert_eq!(
            extract_with(&img, DecodePolicy::Strict),
            Err(StegoError::PayloadNotUtf8)
        );
    }

    #[test]
    fn strict_accepts_clean_ascii() {
        // All-zero LSB padding decodes as NUL characters — valid UTF-8.
        let img = image_with_lsb_bytes(b"plain#####", 8, 8);
        assert_eq!(
            extract_with(&img, DecodePolicy::Strict).unwrap(),
            Extraction::Payload("plain".into())
        );
    }

    #[test]
    fn skipping_decoder_drops_only_bad_bytes() {
        assert_eq!(decode_utf8_skipping(b"a\xFFb\xC3"), "ab");
        assert_eq!(decode_utf8_skipping(b"\xC3\xA9"), "é");
        assert_eq!(decode_utf8_skipping(b""), "");
    }
}
