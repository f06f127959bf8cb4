//! Class balancing via synthetic minority oversampling.
//!
//! Every minority class is grown to the majority class count. Each synthetic
//! row interpolates a randomly chosen class member toward one of its k nearest
//! same-class neighbours; neighbour search is delegated to `linfa-nn`. With a
//! fixed seed the output is fully deterministic.

use anyhow::{anyhow, Result};
use ndarray::{Array1, Array2, Axis};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256Plus;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use linfa_nn::distance::L2Dist;
use linfa_nn::{CommonNearestNeighbour, NearestNeighbour};

/// Oversample `(features, labels)` until every class matches the majority count.
///
/// Original rows are kept unchanged and synthetic rows are appended class by
/// class in label order. `neighbours` is clamped to the available class size.
pub fn oversample(
    features: &Array2<f64>,
    labels: &Array1<usize>,
    neighbours: usize,
    seed: u64,
) -> Result<(Array2<f64>, Array1<usize>)> {
    let n_features = features.ncols();

    let mut class_rows: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (row, &label) in labels.iter().enumerate() {
        class_rows.entry(label).or_default().push(row);
    }

    let majority = class_rows
        .values()
        .map(|rows| rows.len())
        .max()
        .ok_or_else(|| anyhow!("cannot oversample an empty dataset"))?;

    let mut rng = Xoshiro256Plus::seed_from_u64(seed);
    let mut out_rows: Vec<f64> = features.iter().copied().collect();
    let mut out_labels: Vec<usize> = labels.to_vec();

    for (&label, rows) in &class_rows {
        let deficit = majority - rows.len();
        if deficit == 0 {
            continue;
        }

        let points = features.select(Axis(0), rows);

        if rows.len() == 1 {
            // A single sample has no neighbours to interpolate toward.
            warn!(
                class = label,
                "Single-sample class; duplicating instead of synthesizing"
            );
            for _ in 0..deficit {
                out_rows.extend(points.row(0).iter().copied());
                out_labels.push(label);
            }
            continue;
        }

        let k = neighbours.min(rows.len() - 1);
        let index = CommonNearestNeighbour::KdTree
            .from_batch(&points, L2Dist)
            .map_err(|e| anyhow!("failed to build neighbour index: {}", e))?;

        for _ in 0..deficit {
            let base = rng.gen_range(0..rows.len());
            let query = points.row(base);

            // The query point is a member of the batch, so ask for one extra
            // neighbour and drop the self-match.
            let found = index
                .k_nearest(query, k + 1)
                .map_err(|e| anyhow!("neighbour query failed: {}", e))?;
            let candidates: Vec<usize> = found
                .into_iter()
                .map(|(_, idx)| idx)
                .filter(|&idx| idx != base)
                .take(k)
                .collect();

            let pick = candidates[rng.gen_range(0..candidates.len())];
            let neighbour = points.row(pick);
            let gap: f64 = rng.gen_range(0.0..1.0);

            for (p, q) in query.iter().zip(neighbour.iter()) {
                out_rows.push(p + gap * (q - p));
            }
            out_labels.push(label);
        }

        debug!(class = label, synthesized = deficit, "Class balanced");
    }

    let total = out_labels.len();
    let features = Array2::from_shape_vec((total, n_features), out_rows)
        .map_err(|e| anyhow!("failed to assemble oversampled matrix: {}", e))?;

    Ok((features, Array1::from_vec(out_labels)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn unbalanced() -> (Array2<f64>, Array1<usize>) {
        let features = array![
            [0.0, 0.0],
            [0.2, 0.1],
            [0.1, 0.3],
            [0.3, 0.2],
            [5.0, 5.0],
            [5.2, 5.1],
        ];
        let labels = array![0, 0, 0, 0, 1, 1];
        (features, labels)
    }

    fn class_counts(labels: &Array1<usize>) -> BTreeMap<usize, usize> {
        let mut counts = BTreeMap::new();
        for &label in labels {
            *counts.entry(label).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn test_classes_are_balanced_to_majority() {
        let (x, y) = unbalanced();
        let (rx, ry) = oversample(&x, &y, 5, 42).unwrap();

        let counts = class_counts(&ry);
        assert_eq!(counts[&0], 4);
        assert_eq!(counts[&1], 4);
        assert_eq!(rx.nrows(), 8);
        assert_eq!(rx.ncols(), 2);
    }

    #[test]
    fn test_original_rows_are_preserved() {
        let (x, y) = unbalanced();
        let (rx, ry) = oversample(&x, &y, 5, 42).unwrap();

        for i in 0..x.nrows() {
            assert_eq!(rx.row(i), x.row(i));
            assert_eq!(ry[i], y[i]);
        }
    }

    #[test]
    fn test_synthetic_rows_interpolate_within_class() {
        let (x, y) = unbalanced();
        let (rx, ry) = oversample(&x, &y, 5, 42).unwrap();

        // Synthetic minority rows lie between existing class-1 members.
        for i in x.nrows()..rx.nrows() {
            assert_eq!(ry[i], 1);
            for v in rx.row(i) {
                assert!(*v >= 5.0 && *v <= 5.2);
            }
        }
    }

    #[test]
    fn test_deterministic_for_fixed_seed() {
        let (x, y) = unbalanced();
        let (a_x, a_y) = oversample(&x, &y, 5, 42).unwrap();
        let (b_x, b_y) = oversample(&x, &y, 5, 42).unwrap();
        assert_eq!(a_x, b_x);
        assert_eq!(a_y, b_y);
    }

    #[test]
    fn test_single_sample_class_is_duplicated() {
        let features = array![[0.0, 0.0], [1.0, 1.0], [2.0, 2.0], [9.0, 9.0]];
        let labels = array![0, 0, 0, 1];

        let (rx, ry) = oversample(&features, &labels, 5, 7).unwrap();
        let counts = class_counts(&ry);
        assert_eq!(counts[&0], 3);
        assert_eq!(counts[&1], 3);
        for i in features.nrows()..rx.nrows() {
            assert_eq!(rx.row(i), features.row(3));
        }
    }

    #[test]
    fn test_balanced_input_is_unchanged() {
        let features = array![[0.0, 0.0], [1.0, 1.0], [9.0, 9.0], [8.0, 8.0]];
        let labels = array![0, 0, 1, 1];

        let (rx, ry) = oversample(&features, &labels, 5, 42).unwrap();
        assert_eq!(rx, features);
        assert_eq!(ry, labels);
    }
}
