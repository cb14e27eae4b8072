//! Eligibility label assignment.
//!
//! Training needs a binary label for every row. Collections exported from
//! production systems often carry no eligibility ground truth at all; in
//! that case a reproducible synthetic label is derived from the encoded
//! features so a model can still be trained.

use log::info;
use rand::prelude::*;

use crate::models::EncodedRecord;

/// Ensure every record has a binary eligibility label.
///
/// When no record carries an observed label, the whole label column is
/// synthesized from the seeded heuristic below. Otherwise records without
/// a label default to 0 and nothing is synthesized.
#[must_use]
pub fn assign_labels(records: &[EncodedRecord], seed: u64) -> Vec<i64> {
    if records.iter().all(|record| record.eligible.is_none()) {
        info!("No observed eligibility labels; synthesizing training labels (seed {seed})");
        synthesize_labels(records, seed)
    } else {
        records
            .iter()
            .map(|record| record.eligible.unwrap_or(0))
            .collect()
    }
}

/// Heuristic eligibility score in [0, 1]: younger, lower-stage patients
/// with few comorbidities and an in-range BMI score higher.
fn eligibility_score(record: &EncodedRecord) -> f64 {
    let mut score = 0.0;
    if record.age < 65.0 {
        score += 0.3;
    }
    if record.stage_enc <= 2 {
        score += 0.3;
    }
    if record.num_comorbidities <= 2 {
        score += 0.2;
    }
    if (18.5..=30.0).contains(&record.bmi) {
        score += 0.2;
    }
    score
}

/// One uniform noise draw in [0, 0.3) per record, in record order, from a
/// generator seeded once for the whole column. Label = 1 when the noisy
/// score clears 0.5.
fn synthesize_labels(records: &[EncodedRecord], seed: u64) -> Vec<i64> {
    let mut rng = StdRng::seed_from_u64(seed);
    records
        .iter()
        .map(|record| {
            let noise = rng.random_range(0.0..0.3);
            i64::from(eligibility_score(record) + noise > 0.5)
        })
        .collect()
}
