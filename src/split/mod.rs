//! Stratified train/test splitting.
//!
//! Partitions rows so that each side preserves the overall label
//! proportions as closely as integer apportionment allows. The shuffle is
//! driven by a seeded generator so a given input always produces the same
//! partitions.

use std::collections::BTreeMap;

use ndarray::{Array2, Axis};
use rand::prelude::*;
use rand::seq::SliceRandom;

use crate::error::{CohortPrepError, Result};

/// Feature and label partitions produced by `stratified_split`
#[derive(Debug, Clone)]
pub struct SplitData {
    /// Training features
    pub x_train: Array2<f64>,
    /// Test features
    pub x_test: Array2<f64>,
    /// Training labels, aligned with `x_train` rows
    pub y_train: Vec<i64>,
    /// Test labels, aligned with `x_test` rows
    pub y_test: Vec<i64>,
}

/// Split rows into stratified train/test partitions.
///
/// Every observed class must have at least two rows so that both sides of
/// the split keep at least one; otherwise the split fails with
/// `InsufficientData`.
pub fn stratified_split(
    x: &Array2<f64>,
    y: &[i64],
    test_fraction: f64,
    seed: u64,
) -> Result<SplitData> {
    let n = y.len();
    if n == 0 {
        return Err(CohortPrepError::EmptyDataset);
    }
    debug_assert_eq!(x.nrows(), n);

    let mut by_class: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
    for (idx, &label) in y.iter().enumerate() {
        by_class.entry(label).or_default().push(idx);
    }
    for (&label, indices) in &by_class {
        if indices.len() < 2 {
            return Err(CohortPrepError::InsufficientData(format!(
                "class {label} has only {} member(s); stratified splitting needs at least 2 per class",
                indices.len()
            )));
        }
    }

    let counts: Vec<usize> = by_class.values().map(Vec::len).collect();
    let alloc = apportion_test_rows(&counts, n, test_fraction);

    let mut rng = StdRng::seed_from_u64(seed);
    let n_test: usize = alloc.iter().sum();
    let mut train_idx = Vec::with_capacity(n - n_test);
    let mut test_idx = Vec::with_capacity(n_test);

    for (indices, &take) in by_class.values_mut().zip(&alloc) {
        indices.shuffle(&mut rng);
        test_idx.extend_from_slice(&indices[..take]);
        train_idx.extend_from_slice(&indices[take..]);
    }
    train_idx.shuffle(&mut rng);
    test_idx.shuffle(&mut rng);

    Ok(SplitData {
        x_train: x.select(Axis(0), &train_idx),
        x_test: x.select(Axis(0), &test_idx),
        y_train: train_idx.iter().map(|&i| y[i]).collect(),
        y_test: test_idx.iter().map(|&i| y[i]).collect(),
    })
}

/// Largest-remainder apportionment of the test rows across classes.
///
/// The overall test count is `round(n * test_fraction)`, clamped so both
/// partitions keep at least one row of every class.
fn apportion_test_rows(counts: &[usize], n: usize, test_fraction: f64) -> Vec<usize> {
    let n_classes = counts.len();
    let n_test = (((n as f64) * test_fraction).round() as usize).clamp(n_classes, n - n_classes);

    let exact: Vec<f64> = counts.iter().map(|&c| c as f64 * test_fraction).collect();
    let mut alloc: Vec<usize> = exact
        .iter()
        .zip(counts)
        .map(|(&e, &c)| (e.floor() as usize).clamp(1, c - 1))
        .collect();
    let mut total: usize = alloc.iter().sum();

    while total < n_test {
        let candidate = (0..n_classes)
            .filter(|&i| alloc[i] < counts[i] - 1)
            .max_by(|&a, &b| {
                let remainder_a = exact[a] - alloc[a] as f64;
                let remainder_b = exact[b] - alloc[b] as f64;
                remainder_a
                    .partial_cmp(&remainder_b)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        match candidate {
            Some(i) => {
                alloc[i] += 1;
                total += 1;
            }
            None => break,
        }
    }
    while total > n_test {
        let candidate = (0..n_classes).filter(|&i| alloc[i] > 1).max_by(|&a, &b| {
            let excess_a = alloc[a] as f64 - exact[a];
            let excess_b = alloc[b] as f64 - exact[b];
            excess_a
                .partial_cmp(&excess_b)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        match candidate {
            Some(i) => {
                alloc[i] -= 1;
                total -= 1;
            }
            None => break,
        }
    }

    alloc
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn row_indexed_matrix(n: usize) -> Array2<f64> {
        Array2::from_shape_fn((n, 2), |(row, col)| (row * 2 + col) as f64)
    }

    #[test]
    fn test_split_sizes_and_stratification() {
        // 80 rows of class 0, 20 of class 1
        let y: Vec<i64> = (0..100).map(|i| i64::from(i >= 80)).collect();
        let x = row_indexed_matrix(100);

        let split = stratified_split(&x, &y, 0.2, 42).unwrap();

        assert_eq!(split.y_train.len(), 80);
        assert_eq!(split.y_test.len(), 20);
        assert_eq!(split.x_train.nrows(), 80);
        assert_eq!(split.x_test.nrows(), 20);

        assert_eq!(split.y_test.iter().filter(|&&l| l == 1).count(), 4);
        assert_eq!(split.y_train.iter().filter(|&&l| l == 1).count(), 16);
    }

    #[test]
    fn test_small_minority_keeps_row_on_both_sides() {
        // 8 rows of class 0, 2 of class 1: the minority class must appear
        // once in test and once in train
        let y: Vec<i64> = (0..10).map(|i| i64::from(i >= 8)).collect();
        let split = stratified_split(&row_indexed_matrix(10), &y, 0.2, 42).unwrap();

        assert_eq!(split.y_test.iter().filter(|&&l| l == 1).count(), 1);
        assert_eq!(split.y_train.iter().filter(|&&l| l == 1).count(), 1);
        assert_eq!(split.y_train.len() + split.y_test.len(), 10);
    }

    #[test]
    fn test_rows_are_partitioned_intact() {
        let y: Vec<i64> = (0..10).map(|i| i64::from(i % 2 == 0)).collect();
        let x = Array2::from_shape_fn((10, 2), |(row, _)| row as f64);

        let split = stratified_split(&x, &y, 0.2, 42).unwrap();

        let mut seen: Vec<usize> = split
            .x_train
            .column(0)
            .iter()
            .chain(split.x_test.column(0).iter())
            .map(|&v| v as usize)
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_split_is_deterministic() {
        let y: Vec<i64> = (0..30).map(|i| i64::from(i % 3 == 0)).collect();
        let x = row_indexed_matrix(30);

        let first = stratified_split(&x, &y, 0.2, 42).unwrap();
        let second = stratified_split(&x, &y, 0.2, 42).unwrap();

        assert_eq!(first.x_train, second.x_train);
        assert_eq!(first.x_test, second.x_test);
        assert_eq!(first.y_train, second.y_train);
        assert_eq!(first.y_test, second.y_test);
    }

    #[test]
    fn test_single_member_class_rejected() {
        let y = vec![0, 0, 0, 1];
        let err = stratified_split(&row_indexed_matrix(4), &y, 0.2, 42).unwrap_err();

        assert!(matches!(err, CohortPrepError::InsufficientData(_)));
    }

    #[test]
    fn test_single_class_still_splits() {
        let y = vec![0i64; 10];
        let split = stratified_split(&row_indexed_matrix(10), &y, 0.2, 42).unwrap();

        assert_eq!(split.y_test.len(), 2);
        assert_eq!(split.y_train.len(), 8);
        assert!(split.y_train.iter().all(|&l| l == 0));
    }

    #[test]
    fn test_empty_input_rejected() {
        let err = stratified_split(&row_indexed_matrix(0), &[], 0.2, 42).unwrap_err();
        assert!(matches!(err, CohortPrepError::EmptyDataset));
    }
}
