//! Credit Scoring Library
//!
//! Trains a credit-score classifier on a historical customer dataset and
//! scores interactively collected customer profiles into one of the
//! Poor/Standard/Good bands, rendered as a gauge chart.

pub mod config;
pub mod dataset;
pub mod features;
pub mod form;
pub mod gauge;
pub mod models;
pub mod state;
pub mod types;

pub use config::AppConfig;
pub use dataset::EncodedDataset;
pub use models::scorer::ScoringEngine;
pub use models::trainer::TrainedModel;
pub use state::SessionState;
pub use types::{CustomerProfile, ScoreBand, ScoreReport};
