// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/cipher-core

//! Random-forest ensemble classifier over feature vectors.
//!
//! Each tree trains on a bootstrap resample of the data and splits nodes by
//! Gini impurity over a random feature subset, capped at a fixed depth. The
//! ensemble probability is the fraction of trees voting for the "modified"
//! label. All randomness (bootstrap draws and feature subsets) comes from a
//! single ChaCha20 PRNG seeded from [`ForestConfig::seed`], so training is
//! reproducible bit-for-bit.
//!
//! Random draws use `u32` ranges so the stream is identical on 32- and
//! 64-bit targets.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::analysis::dataset::{Label, TrainingSample};
use crate::analysis::features::FeatureVector;
use crate::analysis::{FEATURE_COUNT, TRAINING_SEED};

/// Features considered at each split: floor(sqrt(FEATURE_COUNT)).
const FEATURES_PER_SPLIT: usize = 2;

/// A node refuses to split below this many samples.
const MIN_SPLIT_SAMPLES: usize = 2;

/// Training hyperparameters. The defaults reproduce the reference model:
/// 50 trees of depth 5, seeded with [`TRAINING_SEED`].
#[derive(Clone, Copy, Debug)]
pub struct ForestConfig {
    pub tree_count: usize,
    pub max_depth: usize,
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self { tree_count: 50, max_depth: 5, seed: TRAINING_SEED }
    }
}

/// A trained ensemble. Immutable after [`RandomForest::train`].
#[derive(Clone, Debug)]
pub struct RandomForest {
    trees: Vec<Node>,
}

#[derive(Clone, Debug)]
enum Node {
    Leaf {
        label: Label,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl RandomForest {
    /// Fit the ensemble on `samples`.
    ///
    /// # Panics
    /// Panics on an empty training set or a zero tree count — the synthetic
    /// dataset is fixed and non-empty, so this is a programming fault, not a
    /// user-facing error.
    pub fn train(samples: &[TrainingSample], config: &ForestConfig) -> Self {
        assert!(!samples.is_empty(), "training set must not be empty");
        assert!(config.tree_count > 0, "forest needs at least one tree");

        let mut rng = ChaCha20Rng::seed_from_u64(config.seed);
        let n = samples.len();

        let trees = (0..config.tree_count)
            .map(|_| {
                // Bootstrap resample: n draws with replacement.
                let indices: Vec<usize> =
                    (0..n).map(|_| rng.gen_range(0..n as u32) as usize).collect();
                build_node(samples, &indices, 0, config.max_depth, &mut rng)
            })
            .collect();

        log::debug!("trained random forest: {} trees, depth {}", config.tree_count, config.max_depth);
        Self { trees }
    }

    /// Fraction of trees voting [`Label::Modified`], in [0, 1].
    pub fn predict_proba(&self, features: &FeatureVector) -> f64 {
        let votes = self
            .trees
            .iter()
            .filter(|tree| predict(tree, features) == Label::Modified)
            .count();
        votes as f64 / self.trees.len() as f64
    }

    /// Majority-vote class prediction.
    pub fn predict(&self, features: &FeatureVector) -> Label {
        if self.predict_proba(features) > 0.5 {
            Label::Modified
        } else {
            Label::Clean
        }
    }
}

fn predict(node: &Node, features: &FeatureVector) -> Label {
    match node {
        Node::Leaf { label } => *label,
        Node::Split { feature, threshold, left, right } => {
            if features[*feature] <= *threshold {
                predict(left, features)
            } else {
                predict(right, features)
            }
        }
    }
}

fn build_node(
    samples: &[TrainingSample],
    indices: &[usize],
    depth: usize,
    max_depth: usize,
    rng: &mut ChaCha20Rng,
) -> Node {
    let modified = indices.iter().filter(|&&i| samples[i].label == Label::Modified).count();
    let clean = indices.len() - modified;

    if depth >= max_depth || modified == 0 || clean == 0 || indices.len() < MIN_SPLIT_SAMPLES {
        return majority_leaf(clean, modified);
    }

    let Some((feature, threshold)) = best_split(samples, indices, rng) else {
        return majority_leaf(clean, modified);
    };

    let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
        .iter()
        .copied()
        .partition(|&i| samples[i].features[feature] <= threshold);

    Node::Split {
        feature,
        threshold,
        left: Box::new(build_node(samples, &left_idx, depth + 1, max_depth, rng)),
        right: Box::new(build_node(samples, &right_idx, depth + 1, max_depth, rng)),
    }
}

/// Majority label; ties break toward [`Label::Clean`] (the lower class).
fn majority_leaf(clean: usize, modified: usize) -> Node {
    let label = if modified > clean { Label::Modified } else { Label::Clean };
    Node::Leaf { label }
}

/// Draw [`FEATURES_PER_SPLIT`] distinct feature indices.
fn feature_subset(rng: &mut ChaCha20Rng) -> [usize; FEATURES_PER_SPLIT] {
    let first = rng.gen_range(0..FEATURE_COUNT as u32) as usize;
    let mut second = rng.gen_range(0..(FEATURE_COUNT - 1) as u32) as usize;
    if second >= first {
        second += 1;
    }
    [first, second]
}

/// Find the (feature, threshold) pair minimizing weighted Gini impurity over
/// the node's random feature subset. Thresholds are midpoints between
/// consecutive distinct values, so both children are always nonempty.
/// Returns `None` when every candidate feature is constant on this node.
fn best_split(
    samples: &[TrainingSample],
    indices: &[usize],
    rng: &mut ChaCha20Rng,
) -> Option<(usize, f64)> {
    let n = indices.len();
    let total_modified = indices.iter().filter(|&&i| samples[i].label == Label::Modified).count();

    let mut best: Option<(usize, f64, f64)> = None;

    for feature in feature_subset(rng) {
        let mut pairs: Vec<(f64, Label)> = indices
            .iter()
            .map(|&i| (samples[i].features[feature], samples[i].label))
            .collect();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut left_n = 0usize;
        let mut left_modified = 0usize;
        for i in 0..n - 1 {
            left_n += 1;
            if pairs[i].1 == Label::Modified {
                left_modified += 1;
            }
            // A boundary exists only between distinct values.
            if pairs[i].0 == pairs[i + 1].0 {
                continue;
            }

            let right_n = n - left_n;
            let right_modified = total_modified - left_modified;
            let score = (left_n as f64 * gini(left_n, left_modified)
                + right_n as f64 * gini(right_n, right_modified))
                / n as f64;

            if best.map_or(true, |(_, _, s)| score < s) {
                let threshold = (pairs[i].0 + pairs[i + 1].0) / 2.0;
                best = Some((feature, threshold, score));
            }
        }
    }

    best.map(|(feature, threshold, _)| (feature, threshold))
}

/// Gini impurity of a node with `n` samples, `modified` of which are
/// positive: `1 - p² - (1-p)²`.
fn gini(n: usize, modified: usize) -> f64 {
    let p = modified as f64 / n as f64;
    let q = 1.0 - p;
    1.0 - p * p - q * q
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two well-separated clusters, mimicking the clean/modified feature
    /// populations: several features carry the class signal so every random
    /// feature subset sees at least one informative axis.
    fn separable_samples() -> Vec<TrainingSample> {
        let mut samples = Vec::new();
        for i in 0..20 {
            samples.push(TrainingSample {
                features: [i as f64, 0.5, 1.0, 0.0, 3.0],
                label: Label::Clean,
            });
            samples.push(TrainingSample {
                features: [100.0 + i as f64, 0.5, 9.0, 0.25, 50.0],
                label: Label::Modified,
            });
        }
        samples
    }

    #[test]
    fn learns_a_separable_problem() {
        let samples = separable_samples();
        let forest = RandomForest::train(&samples, &ForestConfig::default());
        assert!(forest.predict_proba(&[5.0, 0.5, 1.0, 0.0, 3.0]) < 0.5);
        assert!(forest.predict_proba(&[110.0, 0.5, 9.0, 0.25, 50.0]) > 0.5);
    }

    #[test]
    fn training_is_deterministic() {
        let samples = separable_samples();
        let config = ForestConfig::default();
        let a = RandomForest::train(&samples, &config);
        let b = RandomForest::train(&samples, &config);
        for i in 0..150 {
            let probe = [i as f64, 0.5, 1.0, 0.0, 3.0];
            assert_eq!(a.predict_proba(&probe), b.predict_proba(&probe));
        }
    }

    #[test]
    fn different_seeds_may_differ_but_stay_bounded() {
        let samples = separable_samples();
        let forest = RandomForest::train(
            &samples,
            &ForestConfig { seed: 7, ..ForestConfig::default() },
        );
        for i in 0..150 {
            let p = forest.predict_proba(&[i as f64, 0.5, 4.0, 0.1, 20.0]);
            assert!((0.0..=1.0).contains(&p));
        }
    }

    #[test]
    fn constant_features_yield_majority_vote() {
        // No split possible: every tree is a single leaf with the majority
        // label of its bootstrap sample.
        let mut samples = Vec::new();
        for _ in 0..30 {
            samples.push(TrainingSample { features: [1.0; 5], label: Label::Clean });
        }
        samples.push(TrainingSample { features: [1.0; 5], label: Label::Modified });
        let forest = RandomForest::train(&samples, &ForestConfig::default());
        assert!(forest.predict_proba(&[1.0; 5]) < 0.5);
        assert_eq!(forest.predict(&[1.0; 5]), Label::Clean);
    }

    #[test]
    fn gini_bounds() {
        assert_eq!(gini(10, 0), 0.0);
        assert_eq!(gini(10, 10), 0.0);
        assert!((gini(10, 5) - 0.5).abs() < 1e-12);
    }

    #[test]
    #[should_panic(expected = "must not be empty")]
    fn empty_training_set_is_a_fault() {
        let _ = RandomForest::train(&[], &ForestConfig::default());
    }
}
