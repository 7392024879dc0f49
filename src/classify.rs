use std::collections::HashMap;

use log::debug;
use rand::Rng;
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::metric::Minkowski;

/// Configuration options for k-nearest-neighbours classification.
#[derive(Debug, Clone)]
pub struct KnnConfig {
    /// Number of neighbours that vote on each prediction.
    pub k: usize,
    /// Order of the Minkowski distance metric (1 = Manhattan, 2 = Euclidean).
    pub p: f64,
}

impl KnnConfig {
    /// Create a new config with default values: k = 3, p = 2 (Euclidean).
    pub fn new() -> Self {
        Self { k: 3, p: 2.0 }
    }

    /// Customize the number of voting neighbours.
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Customize the metric order.
    pub fn with_p(mut self, p: f64) -> Self {
        self.p = p;
        self
    }
}

impl Default for KnnConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Predicts a label for each query vector by majority vote among its
/// `config.k` nearest training samples under the Minkowski metric of order
/// `config.p`.
///
/// The metric is built once per call and shared across all queries. Queries
/// are independent and are evaluated in parallel; the output preserves query
/// order, one label per query. An empty query set yields an empty vector.
///
/// When several training samples sit at exactly the same distance on the
/// boundary of the neighbour set, any of the tied samples may be selected to
/// fill the remaining slots — the chosen *set* beyond the tie is otherwise
/// exact. When two or more labels occur equally often among the k
/// neighbours, the smallest label value wins.
///
/// # Arguments
///
/// - `data`: training matrix, N samples of M features each
/// - `labels`: one label per training sample
/// - `queries`: query vectors of M features each
/// - `config`: neighbour count and metric order
///
/// # Errors
///
/// - [`Error::InvalidParameter`] if `config.k < 1` or `config.p <= 0`
/// - [`Error::DimensionMismatch`] if `data` and `labels` differ in length,
///   or a query's feature count differs from the training matrix's
/// - [`Error::InsufficientData`] if there are fewer than `config.k`
///   training samples
///
/// All inputs are validated before any distance is computed.
///
/// # Example
///
/// ```
/// use knn::{classify, KnnConfig};
///
/// let data = vec![
///     vec![1.0, 2.0],
///     vec![2.0, 3.0],
///     vec![3.0, 3.0],
///     vec![6.0, 7.0],
/// ];
/// let labels = vec![0, 0, 1, 1];
/// let queries = vec![vec![2.1, 2.9]];
///
/// let predictions = classify(&data, &labels, &queries, &KnnConfig::new()).unwrap();
/// assert_eq!(predictions, vec![0]);
/// ```
pub fn classify(
    data: &[Vec<f64>],
    labels: &[usize],
    queries: &[Vec<f64>],
    config: &KnnConfig,
) -> Result<Vec<usize>> {
    if config.k < 1 {
        return Err(Error::InvalidParameter {
            name: "k",
            message: "must be at least 1",
        });
    }
    let metric = Minkowski::new(config.p)?;
    if data.len() != labels.len() {
        return Err(Error::DimensionMismatch {
            expected: data.len(),
            found: labels.len(),
        });
    }
    if data.len() < config.k {
        return Err(Error::InsufficientData {
            k: config.k,
            n_samples: data.len(),
        });
    }
    // data is non-empty here: data.len() >= k >= 1
    let width = data[0].len();
    for query in queries {
        if query.len() != width {
            return Err(Error::DimensionMismatch {
                expected: width,
                found: query.len(),
            });
        }
    }

    debug!(
        "classifying {} queries against {} samples (k = {}, p = {})",
        queries.len(),
        data.len(),
        config.k,
        config.p
    );

    let predictions = queries
        .par_iter()
        .map(|query| {
            let distances = metric.distances(data, query);
            let neighbours = k_smallest(&distances, config.k);
            majority_vote(labels, &neighbours)
        })
        .collect();

    Ok(predictions)
}

/// Indices of the k smallest distances. The returned indices identify the k
/// nearest samples exactly, but their order within the result is
/// unspecified.
fn k_smallest(distances: &[f64], k: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..distances.len()).collect();
    select_k_smallest(&mut order, distances, k);
    order.truncate(k);
    order
}

/// Partitions `order` so its first k entries index the k smallest values of
/// `dist`, without sorting the rest. Randomized quickselect: expected O(n).
fn select_k_smallest(order: &mut [usize], dist: &[f64], k: usize) {
    if k == 0 || order.len() <= k {
        return;
    }
    let last = order.len() - 1;
    let pivot_index = rand::thread_rng().gen_range(0..order.len());
    order.swap(pivot_index, last);
    let pivot = dist[order[last]];
    let mut i = 0;
    for j in 0..last {
        if dist[order[j]] <= pivot {
            order.swap(i, j);
            i += 1;
        }
    }
    order.swap(i, last);
    // order[..i] holds values <= pivot, the pivot sits at i, the rest are > pivot
    if k <= i {
        select_k_smallest(&mut order[..i], dist, k);
    } else if k > i + 1 {
        select_k_smallest(&mut order[i + 1..], dist, k - i - 1);
    }
}

/// Majority vote over the labels of the selected neighbours. When counts
/// tie, the smallest label value wins.
fn majority_vote(labels: &[usize], neighbours: &[usize]) -> usize {
    let mut counts = HashMap::<usize, usize>::new();
    for &idx in neighbours {
        *counts.entry(labels[idx]).or_insert(0) += 1;
    }
    // Highest count; equal counts resolve to the smaller label. Non-empty
    // since k >= 1.
    counts
        .into_iter()
        .max_by(|(la, ca), (lb, cb)| ca.cmp(cb).then_with(|| lb.cmp(la)))
        .unwrap()
        .0
}
