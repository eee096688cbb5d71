//! Multi-strategy fuzzy matcher
//!
//! Runs four comparison strategies over a candidate pool, reconciles
//! per-candidate results down to the single best match, filters by the
//! confidence floor, then ranks and truncates. Every step is deterministic:
//! re-running with the same inputs yields byte-identical output.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::algorithms::levenshtein::levenshtein_similarity;
use crate::algorithms::normalize::normalize;
use crate::algorithms::tokens::{is_geographic_variant, token_overlap, token_set};
use crate::config::{ConfigError, MatchConfig};

/// Confidence added to the token strategy when two names differ only by
/// geographic terms, capped so the total never exceeds 1.0.
const GEOGRAPHIC_BOOST: f64 = 0.10;

/// The strategy that produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMethod {
    ExactAfterNormalization,
    HighSimilarity,
    TokenMatch,
    PartialMatch,
}

impl MatchMethod {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ExactAfterNormalization => "exact_after_normalization",
            Self::HighSimilarity => "high_similarity",
            Self::TokenMatch => "token_match",
            Self::PartialMatch => "partial_match",
        }
    }
}

impl std::fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reconciliation and ranking compare confidences across strategies, so the
/// evaluation order doubles as the deterministic tie-break order.
const STRATEGY_ORDER: [MatchMethod; 4] = [
    MatchMethod::ExactAfterNormalization,
    MatchMethod::HighSimilarity,
    MatchMethod::TokenMatch,
    MatchMethod::PartialMatch,
];

/// A scored pairing of a query name with one candidate.
///
/// Both normalized forms are retained for explainability; downstream code
/// never recomputes from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    /// The raw query name.
    pub name: String,
    /// The raw candidate name.
    pub candidate: String,
    /// Confidence in `[0, 1]`, rounded to 3 decimals.
    pub confidence: f64,
    /// The strategy that produced this confidence.
    pub method: MatchMethod,
    pub normalized_name: String,
    pub normalized_candidate: String,
}

/// A raw name with its precomputed normalized form and token set.
///
/// Matching over a pool normalizes every name exactly once.
#[derive(Debug, Clone)]
pub(crate) struct NameEntry {
    pub raw: String,
    pub normalized: String,
    pub tokens: Vec<String>,
}

impl NameEntry {
    pub(crate) fn new(raw: &str, config: &MatchConfig) -> Self {
        let normalized = normalize(raw, config);
        let tokens = token_set(&normalized);
        Self {
            raw: raw.to_owned(),
            normalized,
            tokens,
        }
    }
}

/// Round a confidence to 3 decimal places.
pub(crate) fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Evaluate one strategy for a pair, returning the confidence iff the pair
/// clears that strategy's (inclusive) threshold.
fn evaluate(
    method: MatchMethod,
    query: &NameEntry,
    candidate: &NameEntry,
    config: &MatchConfig,
) -> Option<f64> {
    match method {
        MatchMethod::ExactAfterNormalization => {
            (!query.normalized.is_empty() && query.normalized == candidate.normalized)
                .then_some(1.0)
        }
        MatchMethod::HighSimilarity => {
            let confidence = levenshtein_similarity(&query.normalized, &candidate.normalized);
            (confidence >= config.high_similarity).then_some(confidence)
        }
        MatchMethod::TokenMatch => {
            let mut confidence = token_overlap(&query.tokens, &candidate.tokens);
            if is_geographic_variant(&query.tokens, &candidate.tokens) {
                confidence = (confidence + GEOGRAPHIC_BOOST).min(1.0);
            }
            (confidence >= config.token_match).then_some(confidence)
        }
        MatchMethod::PartialMatch => {
            let confidence = substring_confidence(&query.normalized, &candidate.normalized)?;
            (confidence >= config.partial_match).then_some(confidence)
        }
    }
}

/// Length ratio of the shorter normalized form to the longer, provided the
/// shorter is a literal substring of the longer. Lengths are character
/// counts. Two empty forms are a trivial substring pair with ratio 1.0.
fn substring_confidence(a: &str, b: &str) -> Option<f64> {
    let a_len = a.chars().count();
    let b_len = b.chars().count();
    let (shorter, longer, short_len, long_len) = if a_len <= b_len {
        (a, b, a_len, b_len)
    } else {
        (b, a, b_len, a_len)
    };

    if long_len == 0 {
        return Some(1.0);
    }
    longer
        .contains(shorter)
        .then(|| short_len as f64 / long_len as f64)
}

/// Match one query entry against a candidate pool.
///
/// The pool is scanned in order; per candidate the best strategy result is
/// kept in a reconciliation map keyed by pool index (confidence ties keep
/// the earlier strategy). Survivors below `min_confidence` are dropped, the
/// rest are stable-sorted by descending confidence (ties keep pool order)
/// and truncated to `max_results_per_name`.
pub(crate) fn match_against_pool(
    query: &NameEntry,
    pool: &[NameEntry],
    config: &MatchConfig,
) -> Vec<Match> {
    let mut best: AHashMap<usize, Match> = AHashMap::new();

    for (idx, candidate) in pool.iter().enumerate() {
        if candidate.raw == query.raw {
            continue;
        }
        for method in STRATEGY_ORDER {
            let Some(raw_confidence) = evaluate(method, query, candidate, config) else {
                continue;
            };
            let confidence = round3(raw_confidence);
            let improves = best
                .get(&idx)
                .map_or(true, |kept| confidence > kept.confidence);
            if improves {
                best.insert(
                    idx,
                    Match {
                        name: query.raw.clone(),
                        candidate: candidate.raw.clone(),
                        confidence,
                        method,
                        normalized_name: query.normalized.clone(),
                        normalized_candidate: candidate.normalized.clone(),
                    },
                );
            }
        }
    }

    let mut matches: Vec<Match> = (0..pool.len())
        .filter_map(|idx| best.remove(&idx))
        .filter(|m| m.confidence >= config.min_confidence)
        .collect();
    matches.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    matches.truncate(config.max_results_per_name);
    matches
}

/// Find every candidate matching `query`, ranked by descending confidence.
///
/// The candidate pool is taken as given; callers wanting blank filtering and
/// deduplication of the pool should use
/// [`find_duplicates_for_company`](crate::dedup::find_duplicates_for_company).
/// The query itself is excluded from the pool by raw-string identity.
///
/// # Errors
/// Returns [`ConfigError`] if the configuration is out of range; no matching
/// work happens in that case.
///
/// # Example
/// ```
/// use namedup::{find_all_matches, MatchConfig, MatchMethod};
///
/// let candidates = vec!["Ubisoft Montréal Studio".to_string()];
/// let matches = find_all_matches("Ubisoft Montreal", &candidates, &MatchConfig::default()).unwrap();
/// assert_eq!(matches.len(), 1);
/// assert_eq!(matches[0].method, MatchMethod::ExactAfterNormalization);
/// assert_eq!(matches[0].confidence, 1.0);
/// ```
pub fn find_all_matches(
    query: &str,
    candidates: &[String],
    config: &MatchConfig,
) -> Result<Vec<Match>, ConfigError> {
    config.validate()?;
    let entry = NameEntry::new(query, config);
    let pool: Vec<NameEntry> = candidates
        .iter()
        .map(|c| NameEntry::new(c, config))
        .collect();
    Ok(match_against_pool(&entry, &pool, config))
}

/// The single best match for `query`, if any candidate clears the floors.
///
/// # Errors
/// Returns [`ConfigError`] if the configuration is out of range.
pub fn find_best_match(
    query: &str,
    candidates: &[String],
    config: &MatchConfig,
) -> Result<Option<Match>, ConfigError> {
    let mut matches = find_all_matches(query, candidates, config)?;
    Ok(if matches.is_empty() {
        None
    } else {
        Some(matches.swap_remove(0))
    })
}
