// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/cipher-core

//! # cipher-core
//!
//! LSB steganography engine with statistical steganalysis. Two subsystems:
//!
//! - **Codec** (`stego` module): hides a text payload in the
//!   least-significant bits of an RGB carrier, framed by a fixed delimiter,
//!   and recovers it by scanning the decoded LSB plane. Capacity is one bit
//!   per channel sample.
//! - **Steganalysis** (`analysis` module): estimates the probability that an
//!   image already carries a hidden payload, using a 5-feature statistical
//!   fingerprint and a seeded random-forest ensemble trained on synthetic
//!   clean/modified images.
//!
//! All processing is pure and in-memory. The codec assumes lossless
//! per-pixel storage of its output — a lossy re-encode destroys the LSB
//! plane. File handling and presentation stay outside this crate; images
//! enter through [`PixelImage`].
//!
//! # Quick start
//!
//! ```rust,ignore
//! use cipher_core::{embed, extract, Extraction, PixelImage, Steganalyzer};
//!
//! let carrier = PixelImage::from_dynamic(&image::open("photo.png").unwrap());
//! let stego = embed(&carrier, "secret message").unwrap();
//! match extract(&stego).unwrap() {
//!     Extraction::Payload(text) => assert_eq!(text, "secret message"),
//!     Extraction::NotFound => unreachable!(),
//! }
//!
//! let analyzer = Steganalyzer::new();
//! let report = analyzer.analyze(&stego);
//! println!("stego probability: {:.2}", report.probability);
//! ```

pub mod analysis;
pub mod pixels;
pub mod stego;

pub use pixels::PixelImage;
pub use stego::{
    capacity_bytes, embed, extract, extract_with, fits, frame_bits, DecodePolicy, Extraction,
    StegoError, DELIMITER,
};
pub use analysis::{
    extract_features, AnalysisReport, FeatureVector, ForestConfig, Label, RandomForest,
    Steganalyzer, TrainingSample, Verdict, ANALYSIS_RESOLUTION, DETECTION_THRESHOLD, FEATURE_COUNT,
    TRAINING_SEED,
};
