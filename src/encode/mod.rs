//! Feature encoding for patient records.
//!
//! Pure transforms from raw documents to numeric rows. Categorical fields
//! fall back to fixed defaults rather than failing; numeric fields that
//! cannot be coerced abort the pipeline with a `TypeConversion` error.

use bson::Bson;
use ndarray::Array2;

use crate::error::{CohortPrepError, Result};
use crate::models::{EncodedRecord, FEATURE_NAMES, PatientRecord};

/// Gender codes for the `gender_enc` feature
const GENDER_CODES: &[(&str, i64)] = &[("Male", 0), ("Female", 1)];
/// Disease stage codes for the `stage_enc` feature
const STAGE_CODES: &[(&str, i64)] = &[("I", 1), ("II", 2), ("III", 3), ("IV", 4)];

/// Code used for unrecognized or missing gender values ("Male")
const GENDER_DEFAULT: i64 = 0;
/// Code used for unrecognized or missing stage values ("II")
const STAGE_DEFAULT: i64 = 2;

/// Encode raw records into numeric rows, in input order
pub fn encode_records(records: &[PatientRecord]) -> Result<Vec<EncodedRecord>> {
    records.iter().map(encode_record).collect()
}

fn encode_record(record: &PatientRecord) -> Result<EncodedRecord> {
    Ok(EncodedRecord {
        age: coerce_f64("age", record.age.as_ref())?,
        gender_enc: lookup_code(GENDER_CODES, record.gender.as_ref(), GENDER_DEFAULT),
        num_comorbidities: match record.comorbidities.as_ref() {
            Some(Bson::Array(items)) => items.len() as i64,
            _ => 0,
        },
        stage_enc: lookup_code(STAGE_CODES, record.stage.as_ref(), STAGE_DEFAULT),
        bmi: coerce_f64("bmi", record.bmi.as_ref())?,
        eligible: coerce_label(record.eligible.as_ref())?,
    })
}

/// Assemble the (n_records, 5) feature matrix in `FEATURE_NAMES` order
#[must_use]
pub fn feature_matrix(records: &[EncodedRecord]) -> Array2<f64> {
    let mut matrix = Array2::zeros((records.len(), FEATURE_NAMES.len()));
    for (mut row, record) in matrix.rows_mut().into_iter().zip(records) {
        for (slot, value) in row.iter_mut().zip(record.features()) {
            *slot = value;
        }
    }
    matrix
}

fn lookup_code(codes: &[(&str, i64)], value: Option<&Bson>, default: i64) -> i64 {
    value
        .and_then(Bson::as_str)
        .and_then(|s| codes.iter().find(|(name, _)| *name == s))
        .map_or(default, |(_, code)| *code)
}

fn coerce_f64(field: &str, value: Option<&Bson>) -> Result<f64> {
    match value {
        Some(Bson::Double(v)) => Ok(*v),
        Some(Bson::Int32(v)) => Ok(f64::from(*v)),
        Some(Bson::Int64(v)) => Ok(*v as f64),
        Some(Bson::Boolean(v)) => Ok(if *v { 1.0 } else { 0.0 }),
        Some(Bson::String(s)) => s.trim().parse().map_err(|_| {
            CohortPrepError::TypeConversion(format!(
                "field '{field}' has non-numeric value '{s}'"
            ))
        }),
        None | Some(Bson::Null) => Err(CohortPrepError::TypeConversion(format!(
            "field '{field}' is missing"
        ))),
        Some(other) => Err(CohortPrepError::TypeConversion(format!(
            "field '{field}' cannot be coerced to a number (got {other})"
        ))),
    }
}

fn coerce_label(value: Option<&Bson>) -> Result<Option<i64>> {
    match value {
        None | Some(Bson::Null) => Ok(None),
        Some(Bson::Boolean(v)) => Ok(Some(i64::from(*v))),
        Some(Bson::Int32(v)) => Ok(Some(i64::from(*v))),
        Some(Bson::Int64(v)) => Ok(Some(*v)),
        Some(Bson::Double(v)) => Ok(Some(*v as i64)),
        Some(Bson::String(s)) => s.trim().parse().map(Some).map_err(|_| {
            CohortPrepError::TypeConversion(format!(
                "eligibility flag has non-integer value '{s}'"
            ))
        }),
        Some(other) => Err(CohortPrepError::TypeConversion(format!(
            "eligibility flag cannot be coerced to an integer (got {other})"
        ))),
    }
}
