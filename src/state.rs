//! Session-scoped caches for the loaded dataset and the trained model.
//!
//! Both caches are initialize-once and keyed by nothing: the first access
//! populates them and every later access returns the same value, so the
//! dataset is read and the model is trained exactly once per process. There
//! is no invalidation path.

use crate::config::AppConfig;
use crate::dataset::EncodedDataset;
use crate::models::trainer::{self, TrainedModel};
use anyhow::Result;
use once_cell::sync::OnceCell;

/// Holds everything that survives across interactions in one session
pub struct SessionState {
    dataset: OnceCell<EncodedDataset>,
    model: OnceCell<TrainedModel>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            dataset: OnceCell::new(),
            model: OnceCell::new(),
        }
    }

    /// The encoded dataset, loading it on first access
    pub fn dataset(&self, config: &AppConfig) -> Result<&EncodedDataset> {
        self.dataset
            .get_or_try_init(|| EncodedDataset::load(&config.data.dataset_path))
    }

    /// The trained model, loading the dataset and training on first access
    pub fn model(&self, config: &AppConfig) -> Result<&TrainedModel> {
        let dataset = self.dataset(config)?;
        self.model
            .get_or_try_init(|| trainer::train(dataset, &config.training))
    }

    /// The dataset if it has been loaded, without triggering a load
    pub fn loaded_dataset(&self) -> Option<&EncodedDataset> {
        self.dataset.get()
    }

    /// The model if it has been trained, without triggering training
    pub fn trained_model(&self) -> Option<&TrainedModel> {
        self.model.get()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
