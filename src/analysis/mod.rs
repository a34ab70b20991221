// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/cipher-core

//! Steganalysis pipeline.
//!
//! Estimates the probability that an image carries an LSB-embedded payload:
//!
//! 1. [`features`] reduces any image to a fixed 5-element statistical
//!    fingerprint,
//! 2. [`dataset`] synthesizes labeled clean/modified training images,
//! 3. [`forest`] fits a seeded random-forest ensemble over them,
//! 4. [`scorer`] wraps inference behind a lazily-built shared model and a
//!    fixed decision threshold.
//!
//! Everything is deterministic: the same inputs and seed always produce the
//! same model and the same scores.

pub mod dataset;
pub mod features;
pub mod forest;
pub mod scorer;

/// Side length of the square analysis raster. Every image is normalized to
/// this resolution before feature extraction so the classifier sees a fixed
/// sample count.
pub const ANALYSIS_RESOLUTION: u32 = 128;

/// Number of features in a [`FeatureVector`](features::FeatureVector).
pub const FEATURE_COUNT: usize = 5;

/// Seed for synthetic dataset generation and forest training.
pub const TRAINING_SEED: u64 = 42;

pub use dataset::{Label, TrainingSample};
pub use features::{extract_features, FeatureVector};
pub use forest::{ForestConfig, RandomForest};
pub use scorer::{AnalysisReport, Steganalyzer, Verdict, DETECTION_THRESHOLD};
