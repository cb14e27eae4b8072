//! Balanced class weights for training.

use std::collections::HashMap;

use itertools::Itertools;

/// Compute per-class training weights inversely proportional to class
/// frequency: `weight(c) = n_total / (n_classes * count(c))`.
///
/// With fewer than two observed classes there is no ratio to balance, so
/// the fixed two-class mapping `{0: 1.0, 1: 1.0}` is returned.
#[must_use]
pub fn balanced_class_weights(y: &[i64]) -> HashMap<i64, f64> {
    let counts = y.iter().copied().counts();
    if counts.len() < 2 {
        return HashMap::from([(0, 1.0), (1, 1.0)]);
    }

    let total = y.len() as f64;
    let n_classes = counts.len() as f64;
    counts
        .into_iter()
        .map(|(class, count)| (class, total / (n_classes * count as f64)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balanced_weights_for_imbalanced_classes() {
        let y: Vec<i64> = std::iter::repeat_n(0, 80).chain(std::iter::repeat_n(1, 20)).collect();
        let weights = balanced_class_weights(&y);

        assert_eq!(weights.len(), 2);
        assert!((weights[&0] - 0.625).abs() < 1e-12);
        assert!((weights[&1] - 2.5).abs() < 1e-12);

        // Minority class weighs more, and weight * count balances out
        assert!(weights[&1] > weights[&0]);
        assert!((weights[&0] * 80.0 - weights[&1] * 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_class_returns_fixed_mapping() {
        let weights = balanced_class_weights(&[1, 1, 1, 1]);

        assert_eq!(weights.len(), 2);
        assert_eq!(weights[&0], 1.0);
        assert_eq!(weights[&1], 1.0);
    }

    #[test]
    fn test_empty_labels_return_fixed_mapping() {
        let weights = balanced_class_weights(&[]);
        assert_eq!(weights, HashMap::from([(0, 1.0), (1, 1.0)]));
    }
}
