//! Ensemble training over the encoded dataset.
//!
//! Training runs once per session: the encoded dataset is class-balanced,
//! shuffled, split 80/20 with the configured seed, and a bagged ensemble of
//! decision trees is fit on the training split. The held-out split is kept
//! only as a row count; no evaluation is performed on it.

use crate::config::TrainingConfig;
use crate::dataset::EncodedDataset;
use crate::features::FEATURE_NAMES;
use crate::models::resampler;
use crate::types::ScoreBand;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use linfa::prelude::*;
use linfa_ensemble::{EnsembleLearner, EnsembleLearnerParams};
use linfa_trees::{DecisionTree, DecisionTreeParams};
use ndarray::Array2;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;
use std::time::Instant;
use tracing::info;

/// A fitted classifier from feature rows to score band codes
pub struct TrainedModel {
    ensemble: EnsembleLearner<DecisionTree<f64, usize>>,
    /// Rows the ensemble was fit on
    pub training_rows: usize,
    /// Rows held out by the split and never evaluated
    pub holdout_rows: usize,
    /// When training finished
    pub trained_at: DateTime<Utc>,
}

impl TrainedModel {
    /// Predict the raw band code for one feature row
    pub fn predict_code(&self, row: &[f64]) -> Result<usize> {
        let matrix = Array2::from_shape_vec((1, row.len()), row.to_vec())
            .context("Failed to shape feature row for prediction")?;
        let predicted = self.ensemble.predict(&matrix);
        Ok(predicted[0])
    }

    /// Predict and decode the score band for one feature row
    pub fn predict_band(&self, row: &[f64]) -> Result<ScoreBand> {
        ScoreBand::from_code(self.predict_code(row)?)
    }
}

/// Balance, split and fit. Every randomized step shares `config.seed`.
pub fn train(dataset: &EncodedDataset, config: &TrainingConfig) -> Result<TrainedModel> {
    let started = Instant::now();

    let (features, labels) = resampler::oversample(
        &dataset.features,
        &dataset.labels,
        config.smote_neighbours,
        config.seed,
    )?;
    let balanced_rows = labels.len();

    let mut rng = Xoshiro256Plus::seed_from_u64(config.seed);
    let (train_set, holdout) = Dataset::new(features, labels)
        .with_feature_names(FEATURE_NAMES.to_vec())
        .shuffle(&mut rng)
        .split_with_ratio((1.0 - config.test_ratio) as f32);

    let tree_params: DecisionTreeParams<f64, usize> = DecisionTree::params();
    let ensemble = EnsembleLearnerParams::new_fixed_rng(tree_params, rng)
        .ensemble_size(config.ensemble_size)
        .bootstrap_proportion(config.bootstrap_proportion)
        .fit(&train_set)
        .context("Failed to fit the ensemble classifier")?;

    let model = TrainedModel {
        ensemble,
        training_rows: train_set.records.nrows(),
        holdout_rows: holdout.records.nrows(),
        trained_at: Utc::now(),
    };

    info!(
        balanced_rows,
        training_rows = model.training_rows,
        holdout_rows = model.holdout_rows,
        trees = config.ensemble_size,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Model trained"
    );

    Ok(model)
}
