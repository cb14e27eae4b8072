//! Manual driver for the preparation pipeline.
//!
//! Runs the full load, encode, label, scale, split, and weight chain
//! against a live record store and logs a summary of the result. The
//! connection parameters come from the environment (see
//! `StoreConfig::from_env`).

use anyhow::Context;
use cohort_prep::{StoreConfig, prepare_training_data};
use log::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = StoreConfig::from_env().context("loading store configuration")?;
    let dataset = prepare_training_data(&config)
        .await
        .context("preparing training data")?;

    let (n_train, n_features) = dataset.x_train.dim();
    let (n_test, _) = dataset.x_test.dim();
    info!("Training partition: {n_train} rows x {n_features} features");
    info!("Test partition: {n_test} rows");

    let positives = dataset.y_train.iter().filter(|&&label| label == 1).count();
    info!(
        "Training label balance: {positives}/{} positive",
        dataset.y_train.len()
    );

    let mut weights: Vec<_> = dataset.class_weights.iter().collect();
    weights.sort_by_key(|(class, _)| **class);
    for (class, weight) in weights {
        info!("Class {class} weight: {weight:.4}");
    }

    Ok(())
}
