// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/cipher-core

//! Statistical feature extraction for steganalysis.
//!
//! Every image is normalized to RGB and resized to the fixed
//! [`ANALYSIS_RESOLUTION`](super::ANALYSIS_RESOLUTION) before measurement,
//! so the classifier always sees the same sample count. The five features,
//! in their fixed contract order:
//!
//! 1. mean intensity over all channel samples
//! 2. population variance of all samples
//! 3. Shannon entropy of the 256-bin intensity histogram
//! 4. population variance of the LSB plane (`sample & 1`) — the
//!    steganography-sensitive statistic: an untouched carrier's LSB plane is
//!    structured, an embedded one approaches independent coin flips
//! 5. mean absolute difference between horizontally adjacent samples, per
//!    channel (texture proxy)

use crate::analysis::{ANALYSIS_RESOLUTION, FEATURE_COUNT};
use crate::pixels::PixelImage;

/// Fixed-order numeric fingerprint of an image.
///
/// Order: {mean, variance, entropy, LSB variance, horizontal gradient mean}.
/// Consumers must treat this order as a stable contract.
pub type FeatureVector = [f64; FEATURE_COUNT];

/// Compute the feature vector for an image. Pure and deterministic: the same
/// image always yields bit-identical results.
pub fn extract_features(image: &PixelImage) -> FeatureVector {
    let normalized = image.to_rgb().resize_bilinear(ANALYSIS_RESOLUTION, ANALYSIS_RESOLUTION);
    let samples = normalized.samples();

    let (mean, variance) = mean_variance(samples);

    [
        mean,
        variance,
        histogram_entropy(samples),
        lsb_variance(samples),
        horizontal_gradient_mean(&normalized),
    ]
}

/// Mean and population variance of the sample buffer.
fn mean_variance(samples: &[u8]) -> (f64, f64) {
    let n = samples.len() as f64;
    let mean = samples.iter().map(|&s| s as f64).sum::<f64>() / n;
    let variance = samples
        .iter()
        .map(|&s| {
            let d = s as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n;
    (mean, variance)
}

/// Shannon entropy of the 256-bin intensity histogram, in bits.
///
/// Zero-probability bins are excluded before the logarithm, so a constant
/// image (one occupied bin) yields exactly 0.0 rather than NaN.
fn histogram_entropy(samples: &[u8]) -> f64 {
    let mut histogram = [0u64; 256];
    for &s in samples {
        histogram[s as usize] += 1;
    }
    let total = samples.len() as f64;
    histogram
        .iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum()
}

/// Population variance of the LSB plane.
///
/// LSBs are Bernoulli samples, so this is `p * (1 - p)` for `p` the fraction
/// of set bits: 0.0 for a forced-zero plane, approaching 0.25 for
/// independent random bits.
fn lsb_variance(samples: &[u8]) -> f64 {
    let n = samples.len() as f64;
    let p = samples.iter().map(|&s| (s & 1) as f64).sum::<f64>() / n;
    p * (1.0 - p)
}

/// Mean absolute difference between horizontally adjacent samples of the
/// same channel. Returns 0.0 for single-column images.
fn horizontal_gradient_mean(image: &PixelImage) -> f64 {
    let width = image.width();
    let height = image.height();
    let channels = image.channels();
    if width < 2 {
        return 0.0;
    }

    let mut sum = 0.0f64;
    for y in 0..height {
        for x in 0..width - 1 {
            for c in 0..channels {
                let a = image.sample(x, y, c) as f64;
                let b = image.sample(x + 1, y, c) as f64;
                sum += (a - b).abs();
            }
        }
    }
    let count = height as f64 * (width - 1) as f64 * channels as f64;
    sum / count
}
