// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/cipher-core

//! Synthetic training data for the steganalysis classifier.
//!
//! The generator models only the *statistical signature* of LSB embedding,
//! not the framed codec output, so the classifier never depends on real
//! payload content:
//!
//! - **clean**: uniform random images with the LSB plane forced to zero,
//!   simulating an unmodified carrier;
//! - **modified**: uniform random images with the LSB plane overwritten by
//!   independent random bits, simulating an embedded payload.
//!
//! All randomness comes from a single seeded ChaCha20 PRNG, so the dataset
//! is reproducible bit-for-bit from the seed alone.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::analysis::features::{extract_features, FeatureVector};
use crate::analysis::ANALYSIS_RESOLUTION;
use crate::pixels::PixelImage;

/// Class label for a training sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Label {
    /// Untouched carrier.
    Clean = 0,
    /// Carrier with an LSB-embedded payload.
    Modified = 1,
}

/// One labeled feature vector. Produced only here, consumed only at
/// training time; never persisted.
#[derive(Clone, Debug)]
pub struct TrainingSample {
    pub features: FeatureVector,
    pub label: Label,
}

/// Samples generated per class.
pub const SAMPLES_PER_CLASS: usize = 50;

/// Generate the full training set: [`SAMPLES_PER_CLASS`] clean samples
/// followed by the same number of modified ones, deterministic in `seed`.
pub fn generate(seed: u64) -> Vec<TrainingSample> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut samples = Vec::with_capacity(SAMPLES_PER_CLASS * 2);

    for _ in 0..SAMPLES_PER_CLASS {
        let img = random_image(&mut rng, |rng| rng.gen::<u8>() & 0xFE);
        samples.push(TrainingSample { features: extract_features(&img), label: Label::Clean });
    }

    for _ in 0..SAMPLES_PER_CLASS {
        let img = random_image(&mut rng, |rng| {
            let base = rng.gen::<u8>();
            let bit = rng.gen::<u8>() & 1;
            (base & 0xFE) | bit
        });
        samples.push(TrainingSample { features: extract_features(&img), label: Label::Modified });
    }

    log::debug!("generated {} synthetic training samples", samples.len());
    samples
}

/// Build a random image at the analysis resolution, one sample at a time.
fn random_image(rng: &mut ChaCha20Rng, mut sample: impl FnMut(&mut ChaCha20Rng) -> u8) -> PixelImage {
    let side = ANALYSIS_RESOLUTION as usize;
    let data: Vec<u8> = (0..side * side * 3).map(|_| sample(rng)).collect();
    PixelImage::from_raw(ANALYSIS_RESOLUTION, ANALYSIS_RESOLUTION, 3, data)
}
