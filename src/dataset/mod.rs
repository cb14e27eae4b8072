//! Pipeline orchestration: load, encode, label, scale, split, weight.

use std::collections::HashMap;

use log::{debug, info};
use ndarray::{Array1, Array2};

use crate::config::StoreConfig;
use crate::encode::{encode_records, feature_matrix};
use crate::error::{CohortPrepError, Result};
use crate::labels::assign_labels;
use crate::models::PatientRecord;
use crate::scale::StandardScaler;
use crate::split::stratified_split;
use crate::store::PatientStore;
use crate::weights::balanced_class_weights;

/// Seed for label synthesis and the train/test shuffle
pub const RANDOM_SEED: u64 = 42;
/// Fraction of rows held out as the test partition
pub const TEST_FRACTION: f64 = 0.2;

/// Ready-to-train dataset: standardized features, labels, and class weights
#[derive(Debug, Clone)]
pub struct PreparedDataset {
    /// Standardized training features, shape (n_train, 5)
    pub x_train: Array2<f64>,
    /// Standardized test features, shape (n_test, 5)
    pub x_test: Array2<f64>,
    /// Training labels
    pub y_train: Array1<i64>,
    /// Test labels
    pub y_test: Array1<i64>,
    /// Per-class training weights (balanced scheme)
    pub class_weights: HashMap<i64, f64>,
}

/// Run the pure transform chain over already-loaded records.
///
/// The scaler is fitted on the full matrix before splitting, mirroring the
/// production preprocessing this pipeline feeds.
pub fn prepare_from_records(records: &[PatientRecord]) -> Result<PreparedDataset> {
    if records.is_empty() {
        return Err(CohortPrepError::EmptyDataset);
    }

    let encoded = encode_records(records)?;
    let labels = assign_labels(&encoded, RANDOM_SEED);
    let features = feature_matrix(&encoded);
    debug!(
        "Encoded {} records into a {:?} feature matrix",
        encoded.len(),
        features.dim()
    );

    let scaler = StandardScaler::fit(&features)?;
    let standardized = scaler.transform(&features);

    let split = stratified_split(&standardized, &labels, TEST_FRACTION, RANDOM_SEED)?;
    let class_weights = balanced_class_weights(&split.y_train);
    info!(
        "Prepared dataset: {} training rows, {} test rows",
        split.y_train.len(),
        split.y_test.len()
    );

    Ok(PreparedDataset {
        x_train: split.x_train,
        x_test: split.x_test,
        y_train: Array1::from(split.y_train),
        y_test: Array1::from(split.y_test),
        class_weights,
    })
}

/// Load patient records from the store and prepare them for training.
///
/// One fetch, then the pure transform chain; the store connection lives
/// only for this call.
pub async fn prepare_training_data(config: &StoreConfig) -> Result<PreparedDataset> {
    let store = PatientStore::connect(config).await?;
    let records = store.fetch_patients().await?;
    prepare_from_records(&records)
}
