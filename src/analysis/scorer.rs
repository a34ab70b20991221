// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/cipher-core

//! Steganalysis scoring service.
//!
//! [`Steganalyzer`] owns the classifier model behind a `OnceLock`: the first
//! probability request trains it from the synthetic dataset, concurrent
//! first requests race safely (a single build wins, every caller sees the
//! same immutable model), and all later requests reuse it without
//! retraining. Construct one service during initialization and share it by
//! reference — there is no implicit process-global.

use std::sync::OnceLock;

use crate::analysis::dataset;
use crate::analysis::features::{extract_features, FeatureVector};
use crate::analysis::forest::{ForestConfig, RandomForest};
use crate::pixels::PixelImage;

/// Probability above which an image is reported as carrying a payload.
/// Exactly at the threshold resolves to [`Verdict::Clean`].
pub const DETECTION_THRESHOLD: f64 = 0.5;

/// Binary steganalysis outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// No embedded payload suspected.
    Clean,
    /// The image likely carries a hidden payload.
    Detected,
}

/// Full analysis result for one image: the ensemble probability, the
/// thresholded verdict, and the feature vector that produced them.
#[derive(Clone, Debug)]
pub struct AnalysisReport {
    pub probability: f64,
    pub verdict: Verdict,
    pub features: FeatureVector,
}

/// Lazily-trained steganalysis service.
#[derive(Debug, Default)]
pub struct Steganalyzer {
    config: ForestConfig,
    model: OnceLock<RandomForest>,
}

impl Steganalyzer {
    /// Service with the reference hyperparameters (50 trees, depth 5,
    /// fixed seed).
    pub fn new() -> Self {
        Self::with_config(ForestConfig::default())
    }

    /// Service with explicit hyperparameters.
    pub fn with_config(config: ForestConfig) -> Self {
        Self { config, model: OnceLock::new() }
    }

    /// The trained model, building it on first access.
    ///
    /// `OnceLock` guarantees a single training run even under concurrent
    /// first access; losers of the race block and reuse the winner's model.
    fn model(&self) -> &RandomForest {
        self.model.get_or_init(|| {
            let samples = dataset::generate(self.config.seed);
            RandomForest::train(&samples, &self.config)
        })
    }

    /// Force model construction now instead of on first scoring call.
    pub fn warm_up(&self) {
        let _ = self.model();
    }

    /// Probability in [0, 1] that `image` carries an LSB-embedded payload.
    pub fn probability(&self, image: &PixelImage) -> f64 {
        self.model().predict_proba(&extract_features(image))
    }

    /// Apply the fixed decision threshold: `Detected` iff probability is
    /// strictly above [`DETECTION_THRESHOLD`].
    pub fn verdict(probability: f64) -> Verdict {
        if probability > DETECTION_THRESHOLD {
            Verdict::Detected
        } else {
            Verdict::Clean
        }
    }

    /// Probability, verdict, and features in one pass.
    pub fn analyze(&self, image: &PixelImage) -> AnalysisReport {
        let features = extract_features(image);
        let probability = self.model().predict_proba(&features);
        AnalysisReport { probability, verdict: Self::verdict(probability), features }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_thresholding() {
        assert_eq!(Steganalyzer::verdict(0.0), Verdict::Clean);
        assert_eq!(Steganalyzer::verdict(1.0), Verdict::Detected);
        // Exactly at the threshold resolves to Clean (strict comparison).
        assert_eq!(Steganalyzer::verdict(0.5), Verdict::Clean);
        assert_eq!(Steganalyzer::verdict(0.5 + 1e-9), Verdict::Detected);
    }

    #[test]
    fn model_is_built_once() {
        let analyzer = Steganalyzer::new();
        analyzer.warm_up();
        let first = analyzer.model() as *const RandomForest;
        let second = analyzer.model() as *const RandomForest;
        assert_eq!(first, second, "later accesses must reuse the same model");
    }

    #[test]
    fn concurrent_first_access_single_build() {
        let analyzer = std::sync::Arc::new(Steganalyzer::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let analyzer = analyzer.clone();
                std::thread::spawn(move || analyzer.model() as *const RandomForest as usize)
            })
            .collect();
        let addrs: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(addrs.windows(2).all(|w| w[0] == w[1]), "all callers must see one model");
    }
}
