//! A Rust library for preparing clinical-trial eligibility training data
//! from patient records held in a MongoDB document store.
//!
//! The crate implements one linear pipeline: load the projected patient
//! documents, encode the five feature columns, ensure every row carries a
//! binary eligibility label (observed or synthesized), standardize the
//! features, stratify into train/test partitions, and compute balanced
//! class weights for training.

pub mod config;
pub mod dataset;
pub mod encode;
pub mod error;
pub mod labels;
pub mod models;
pub mod scale;
pub mod split;
pub mod store;
pub mod weights;

// Re-export the most common types for easier use
// Core types
pub use config::{DEFAULT_COLLECTION, StoreConfig};
pub use error::{CohortPrepError, Result};
pub use models::{EncodedRecord, FEATURE_NAMES, PatientRecord};

// Pipeline entry points
pub use dataset::{
    PreparedDataset, RANDOM_SEED, TEST_FRACTION, prepare_from_records, prepare_training_data,
};

// Individual stages
pub use encode::{encode_records, feature_matrix};
pub use labels::assign_labels;
pub use scale::StandardScaler;
pub use split::{SplitData, stratified_split};
pub use store::PatientStore;
pub use weights::balanced_class_weights;
