//! Evaluation metrics for deduplication quality.
//!
//! Compares the pairs a [`DeduplicationResult`](crate::DeduplicationResult)
//! claims as duplicates against a ground-truth pair set, yielding
//! precision, recall and F-scores. Pairs are order-insensitive: a
//! representative↔candidate link counts the same regardless of which name
//! anchored the group.

use std::collections::HashSet;

use crate::dedup::DeduplicationResult;

/// An order-insensitive name pair, lexicographically smaller name first.
pub type NamePair = (String, String);

/// Canonical form of a name pair.
#[must_use]
pub fn pair_key(a: &str, b: &str) -> NamePair {
    if a <= b {
        (a.to_owned(), b.to_owned())
    } else {
        (b.to_owned(), a.to_owned())
    }
}

/// Every representative↔candidate pair a result claims as duplicates.
#[must_use]
pub fn matched_pairs(result: &DeduplicationResult) -> HashSet<NamePair> {
    result
        .groups
        .iter()
        .flat_map(|group| {
            group
                .matches
                .iter()
                .map(|m| pair_key(&group.representative, &m.candidate))
        })
        .collect()
}

/// Precision: TP / (TP + FP).
///
/// The share of claimed pairs that are true duplicates. With no claimed
/// pairs, precision is 1.0 when there was nothing to find and 0.0
/// otherwise.
#[must_use]
pub fn precision(true_pairs: &HashSet<NamePair>, predicted_pairs: &HashSet<NamePair>) -> f64 {
    if predicted_pairs.is_empty() {
        return if true_pairs.is_empty() { 1.0 } else { 0.0 };
    }
    let tp = predicted_pairs.intersection(true_pairs).count();
    tp as f64 / predicted_pairs.len() as f64
}

/// Recall: TP / (TP + FN).
///
/// The share of true duplicate pairs the result found. With no true pairs,
/// recall is 1.0 when nothing was claimed and 0.0 otherwise.
#[must_use]
pub fn recall(true_pairs: &HashSet<NamePair>, predicted_pairs: &HashSet<NamePair>) -> f64 {
    if true_pairs.is_empty() {
        return if predicted_pairs.is_empty() { 1.0 } else { 0.0 };
    }
    let tp = predicted_pairs.intersection(true_pairs).count();
    tp as f64 / true_pairs.len() as f64
}

/// F-beta score combining precision and recall.
///
/// `beta = 1.0` weighs them equally; larger beta favours recall.
#[must_use]
pub fn f_score(true_pairs: &HashSet<NamePair>, predicted_pairs: &HashSet<NamePair>, beta: f64) -> f64 {
    let p = precision(true_pairs, predicted_pairs);
    let r = recall(true_pairs, predicted_pairs);
    if p + r == 0.0 {
        return 0.0;
    }
    let beta_sq = beta * beta;
    (1.0 + beta_sq) * p * r / (beta_sq * p + r)
}

/// Confusion-matrix counts over pair sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfusionMatrix {
    pub true_positives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
}

impl ConfusionMatrix {
    /// Tally predicted pairs against ground truth.
    #[must_use]
    pub fn from_pairs(
        true_pairs: &HashSet<NamePair>,
        predicted_pairs: &HashSet<NamePair>,
    ) -> Self {
        let true_positives = predicted_pairs.intersection(true_pairs).count();
        Self {
            true_positives,
            false_positives: predicted_pairs.len() - true_positives,
            false_negatives: true_pairs.len() - true_positives,
        }
    }

    #[must_use]
    pub fn precision(&self) -> f64 {
        let denominator = self.true_positives + self.false_positives;
        if denominator == 0 {
            if self.false_negatives == 0 {
                1.0
            } else {
                0.0
            }
        } else {
            self.true_positives as f64 / denominator as f64
        }
    }

    #[must_use]
    pub fn recall(&self) -> f64 {
        let denominator = self.true_positives + self.false_negatives;
        if denominator == 0 {
            if self.false_positives == 0 {
                1.0
            } else {
                0.0
            }
        } else {
            self.true_positives as f64 / denominator as f64
        }
    }
}
