//! Record types for the preparation pipeline.
//!
//! `PatientRecord` is the raw projection read from the document store. Its
//! fields stay loosely typed (`Bson`) so that documents with mixed or
//! missing values deserialize cleanly; the encoding rules decide what is a
//! hard error. `EncodedRecord` is the derived numeric row the rest of the
//! pipeline works on.

use bson::Bson;
use serde::{Deserialize, Serialize};

/// Feature columns, in matrix order
pub const FEATURE_NAMES: [&str; 5] = ["age", "gender_enc", "num_comorbidities", "stage_enc", "bmi"];

/// Raw patient document as projected from the store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatientRecord {
    /// Patient age in years
    #[serde(default)]
    pub age: Option<Bson>,
    /// Gender as recorded in the source system
    #[serde(default)]
    pub gender: Option<Bson>,
    /// List of recorded comorbidities; only its length is used
    #[serde(default)]
    pub comorbidities: Option<Bson>,
    /// Disease stage code ("I" through "IV")
    #[serde(default)]
    pub stage: Option<Bson>,
    /// Body mass index
    #[serde(default)]
    pub bmi: Option<Bson>,
    /// Trial-eligibility flag; absent for collections without ground truth
    #[serde(default)]
    pub eligible: Option<Bson>,
}

/// Encoded patient row: five numeric features and an optional observed label
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedRecord {
    /// Age in years
    pub age: f64,
    /// Gender code (0 = Male, 1 = Female)
    pub gender_enc: i64,
    /// Number of recorded comorbidities
    pub num_comorbidities: i64,
    /// Disease stage code (1 through 4)
    pub stage_enc: i64,
    /// Body mass index
    pub bmi: f64,
    /// Observed eligibility label, if the document carried one
    pub eligible: Option<i64>,
}

impl EncodedRecord {
    /// Feature values in `FEATURE_NAMES` order
    #[must_use]
    pub fn features(&self) -> [f64; 5] {
        [
            self.age,
            self.gender_enc as f64,
            self.num_comorbidities as f64,
            self.stage_enc as f64,
            self.bmi,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_partial_document() {
        let doc = bson::doc! { "age": 61, "stage": "II" };
        let record: PatientRecord = bson::from_document(doc).unwrap();

        assert_eq!(record.age, Some(Bson::Int32(61)));
        assert_eq!(record.stage, Some(Bson::String("II".to_string())));
        assert!(record.gender.is_none());
        assert!(record.comorbidities.is_none());
        assert!(record.bmi.is_none());
        assert!(record.eligible.is_none());
    }

    #[test]
    fn test_features_follow_column_order() {
        let record = EncodedRecord {
            age: 54.0,
            gender_enc: 1,
            num_comorbidities: 3,
            stage_enc: 2,
            bmi: 27.5,
            eligible: None,
        };

        assert_eq!(record.features(), [54.0, 1.0, 3.0, 2.0, 27.5]);
        assert_eq!(FEATURE_NAMES.len(), record.features().len());
    }
}
