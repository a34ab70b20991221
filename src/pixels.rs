// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/cipher-core

//! In-memory pixel buffers and geometry operations.
//!
//! [`PixelImage`] is the carrier type used by both the steganography codec
//! and the steganalysis pipeline: a flat row-major sample buffer in
//! (y, x, channel) order with 8 bits per sample. Decoded images enter the
//! core through [`PixelImage::from_dynamic`], which normalizes any source
//! representation (grayscale, indexed, alpha) to 3-channel RGB. File I/O
//! stays outside the core — callers hand in already-decoded images.

use image::DynamicImage;

/// A flat 8-bit pixel buffer in row-major (y, x, channel) order.
///
/// Sample index for (x, y, c) is `(y * width + x) * channels + c`.
/// Dimensions are fixed at construction; all codec operations produce new
/// buffers rather than mutating an existing one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelImage {
    width: u32,
    height: u32,
    channels: u8,
    data: Vec<u8>,
}

impl PixelImage {
    /// Build an image from raw parts.
    ///
    /// # Panics
    /// Panics if either dimension is zero, `channels` is zero, or the buffer
    /// length does not equal `width * height * channels`. These are caller
    /// programming errors, not recoverable conditions.
    pub fn from_raw(width: u32, height: u32, channels: u8, data: Vec<u8>) -> Self {
        assert!(width > 0 && height > 0, "image dimensions must be nonzero");
        assert!(channels > 0, "channel count must be nonzero");
        assert_eq!(
            data.len(),
            width as usize * height as usize * channels as usize,
            "sample buffer length does not match dimensions"
        );
        Self { width, height, channels, data }
    }

    /// Convert a decoded [`DynamicImage`] into a 3-channel RGB buffer.
    ///
    /// Grayscale is replicated across channels, alpha is dropped, and
    /// indexed formats arrive already expanded by the decoder.
    pub fn from_dynamic(img: &DynamicImage) -> Self {
        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();
        Self::from_raw(width, height, 3, rgb.into_raw())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Total number of 8-bit samples (`width * height * channels`).
    pub fn sample_count(&self) -> usize {
        self.data.len()
    }

    /// The flat sample buffer in (y, x, channel) order.
    pub fn samples(&self) -> &[u8] {
        &self.data
    }

    /// Consume the image and return its sample buffer.
    pub fn into_samples(self) -> Vec<u8> {
        self.data
    }

    pub fn is_rgb(&self) -> bool {
        self.channels == 3
    }

    /// Sample at (x, y, c). Caller must stay in bounds.
    pub fn sample(&self, x: u32, y: u32, c: u8) -> u8 {
        let idx = (y as usize * self.width as usize + x as usize) * self.channels as usize
            + c as usize;
        self.data[idx]
    }

    /// Return a 3-channel copy of this image.
    ///
    /// Single-channel input is replicated into R, G and B; 4-channel input
    /// drops the trailing alpha sample; 3-channel input is cloned as-is.
    /// Other layouts keep their first three samples per pixel.
    pub fn to_rgb(&self) -> PixelImage {
        if self.channels == 3 {
            return self.clone();
        }
        let pixels = self.width as usize * self.height as usize;
        let mut data = Vec::with_capacity(pixels * 3);
        let ch = self.channels as usize;
        for p in 0..pixels {
            let base = p * ch;
            if ch == 1 {
                let v = self.data[base];
                data.extend_from_slice(&[v, v, v]);
            } else {
                data.push(self.data[base]);
                data.push(self.data[base + usize::min(1, ch - 1)]);
                data.push(self.data[base + usize::min(2, ch - 1)]);
            }
        }
        PixelImage::from_raw(self.width, self.height, 3, data)
    }

    /// Resize to `dst_w` × `dst_h` with bilinear interpolation, per channel.
    ///
    /// Uses center-aligned coordinate mapping, so a same-size resize is an
    /// exact identity (no resampling drift on already-normalized images).
    pub fn resize_bilinear(&self, dst_w: u32, dst_h: u32) -> PixelImage {
        assert!(dst_w > 0 && dst_h > 0, "target dimensions must be nonzero");
        if dst_w == self.width && dst_h == self.height {
            return self.clone();
        }

        let ch = self.channels as usize;
        let src_w = self.width as usize;
        let src_h = self.height as usize;
        let mut data = vec![0u8; dst_w as usize * dst_h as usize * ch];

        let x_ratio = src_w as f64 / dst_w as f64;
        let y_ratio = src_h as f64 / dst_h as f64;

        for dy in 0..dst_h as usize {
            let sy = (dy as f64 + 0.5) * y_ratio - 0.5;
            for dx in 0..dst_w as usize {
                let sx = (dx as f64 + 0.5) * x_ratio - 0.5;
                for c in 0..ch {
                    let v = bilinear_sample(&self.data, src_w, src_h, ch, c, sx, sy);
                    data[(dy * dst_w as usize + dx) * ch + c] = v.round().clamp(0.0, 255.0) as u8;
                }
            }
        }

        PixelImage::from_raw(dst_w, dst_h, self.channels, data)
    }
}

/// Sample one channel of the image at fractional coordinates using bilinear
/// interpolation. Out-of-bounds taps clamp to the nearest edge pixel.
fn bilinear_sample(data: &[u8], w: usize, h: usize, ch: usize, c: usize, x: f64, y: f64) -> f64 {
    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;
    let x1 = x0 + 1;
    let y1 = y0 + 1;

    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let get = |px: i64, py: i64| -> f64 {
        let cx = px.clamp(0, w as i64 - 1) as usize;
        let cy = py.clamp(0, h as i64 - 1) as usize;
        data[(cy * w + cx) * ch + c] as f64
    };

    let v00 = get(x0, y0);
    let v10 = get(x1, y0);
    let v01 = get(x0, y1);
    let v11 = get(x1, y1);

    v00 * (1.0 - fx) * (1.0 - fy)
        + v10 * fx * (1.0 - fy)
        + v01 * (1.0 - fx) * fy
        + v11 * fx * fy
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_indexing() {
        // 2x2 RGB with distinct samples.
        let data: Vec<u8> = (0..12).collect();
        let img = PixelImage::from_raw(2, 2, 3, data);
        assert_eq!(img.sample(0, 0, 0), 0);
        assert_eq!(img.sample(1, 0, 2), 5);
        assert_eq!(img.sample(0, 1, 1), 7);
        assert_eq!(img.sample_count(), 12);
    }

    #[test]
    #[should_panic(expected = "dimensions must be nonzero")]
    fn zero_dimension_rejected() {
        let _ = PixelImage::from_raw(0, 4, 3, vec![]);
    }

    #[test]
    #[should_panic(expected = "buffer length")]
    fn mismatched_buffer_rejected() {
        let _ = PixelImage::from_raw(2, 2, 3, vec![0u8; 11]);
    }

    #[test]
    fn gray_to_rgb_replicates() {
        let img = PixelImage::from_raw(2, 1, 1, vec![10, 200]);
        let rgb = img.to_rgb();
        assert_eq!(rgb.channels(), 3);
        assert_eq!(rgb.samples(), &[10, 10, 10, 200, 200, 200]);
    }

    #[test]
    fn rgba_to_rgb_drops_alpha() {
        let img = PixelImage::from_raw(1, 2, 4, vec![1, 2, 3, 255, 4, 5, 6, 128]);
        let rgb = img.to_rgb();
        assert_eq!(rgb.samples(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn same_size_resize_is_identity() {
        let data: Vec<u8> = (0..48).map(|i| (i * 5 + 3) as u8).collect();
        let img = PixelImage::from_raw(4, 4, 3, data.clone());
        let resized = img.resize_bilinear(4, 4);
        assert_eq!(resized.samples(), &data[..]);
    }

    #[test]
    fn constant_image_resizes_to_constant() {
        let img = PixelImage::from_raw(8, 8, 3, vec![77u8; 8 * 8 * 3]);
        let small = img.resize_bilinear(3, 5);
        assert!(small.samples().iter().all(|&s| s == 77));
    }

    #[test]
    fn from_dynamic_normalizes_gray_and_alpha() {
        let gray = DynamicImage::ImageLuma8(image::GrayImage::from_pixel(4, 4, image::Luma([42])));
        let img = PixelImage::from_dynamic(&gray);
        assert_eq!(img.channels(), 3);
        assert!(img.samples().iter().all(|&s| s == 42));

        let rgba = DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
            2,
            2,
            image::Rgba([9, 8, 7, 100]),
        ));
        let img = PixelImage::from_dynamic(&rgba);
        assert_eq!(img.channels(), 3);
        assert_eq!(img.samples(), &[9, 8, 7, 9, 8, 7, 9, 8, 7, 9, 8, 7]);
    }

    #[test]
    fn downscale_stays_in_value_range() {
        let data: Vec<u8> = (0..16 * 16 * 3).map(|i| (i % 251) as u8).collect();
        let img = PixelImage::from_raw(16, 16, 3, data);
        let small = img.resize_bilinear(5, 7);
        assert_eq!(small.width(), 5);
        assert_eq!(small.height(), 7);
        assert_eq!(small.sample_count(), 5 * 7 * 3);
    }
}
