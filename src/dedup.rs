//! Greedy duplicate clustering
//!
//! Walks the deduplicated input list in order and claims names into groups
//! on a first-come basis. Grouping is deliberately NOT an equivalence-class
//! computation: a name claimed by an earlier group never starts a group of
//! its own, even when it would have anchored a better one, so output depends
//! on input order. Downstream consumers rely on this greedy semantic; a
//! union-find redesign would change results.

use std::time::{Duration, Instant};

use ahash::{AHashMap, AHashSet};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{ConfigError, MatchConfig};
use crate::matcher::{match_against_pool, Match, NameEntry};

/// Minimum unique-list size for parallel matching.
///
/// Below this, sequential matching is faster than paying thread pool
/// coordination, and the sequential walk can skip matcher calls for names
/// already claimed. Matching is parallelized per name; claiming is always
/// sequential, so both paths produce identical output.
const PARALLEL_THRESHOLD: usize = 100;

/// Per-name claim state during the clustering walk.
///
/// `Unprocessed` names may still become representatives; both claimed
/// states are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NameState {
    Unprocessed,
    Representative,
    Claimed,
}

/// One duplicate group: a representative and its matches, ordered by
/// descending confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateGroup {
    /// The name that anchored the group, chosen by processing order.
    pub representative: String,
    pub matches: Vec<Match>,
    /// Number of probable duplicates of the representative.
    pub duplicate_count: usize,
}

/// The outcome of one full deduplication pass. Immutable once returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeduplicationResult {
    /// Distinct non-blank input names considered.
    pub total_names: usize,
    pub groups: Vec<DuplicateGroup>,
    pub processing_time: Duration,
    /// The configuration the pass ran with.
    pub config: MatchConfig,
}

/// Blank-filter and deduplicate the raw input, keeping first occurrences in
/// input order, then precompute normalized forms and token sets.
fn unique_entries(names: &[String], config: &MatchConfig) -> Vec<NameEntry> {
    let mut seen: AHashSet<&str> = AHashSet::with_capacity(names.len());
    names
        .iter()
        .filter(|name| !name.trim().is_empty())
        .filter(|name| seen.insert(name.as_str()))
        .map(|name| NameEntry::new(name, config))
        .collect()
}

/// Find duplicate groups across a list of raw names.
///
/// Blank entries are dropped and repeats collapse to their first
/// occurrence before matching. Every still-unclaimed name is matched
/// against the entire unique list; a name with at least one match becomes
/// a group representative and claims its matched candidates, so they never
/// anchor groups of their own.
///
/// An empty input is not an error; it yields a result with zero groups.
///
/// # Errors
/// Returns [`ConfigError`] if the configuration is out of range; no
/// matching work happens in that case.
///
/// # Example
/// ```
/// use namedup::{find_duplicates, MatchConfig};
///
/// let names = vec![
///     "Ubisoft Montréal Studio".to_string(),
///     "Ubisoft Montreal".to_string(),
///     "Valve".to_string(),
/// ];
/// let result = find_duplicates(&names, &MatchConfig::default()).unwrap();
/// assert_eq!(result.groups.len(), 1);
/// assert_eq!(result.groups[0].representative, "Ubisoft Montréal Studio");
/// ```
pub fn find_duplicates(
    names: &[String],
    config: &MatchConfig,
) -> Result<DeduplicationResult, ConfigError> {
    config.validate()?;
    let started = Instant::now();

    let entries = unique_entries(names, config);
    let n = entries.len();

    // Match results are independent of claim state, so above the threshold
    // they can all be computed up front in parallel. The claim walk below
    // stays sequential either way.
    let mut precomputed: Option<Vec<Vec<Match>>> = (n >= PARALLEL_THRESHOLD).then(|| {
        entries
            .par_iter()
            .map(|entry| match_against_pool(entry, &entries, config))
            .collect()
    });

    let index_by_raw: AHashMap<&str, usize> = entries
        .iter()
        .enumerate()
        .map(|(i, e)| (e.raw.as_str(), i))
        .collect();

    let mut states = vec![NameState::Unprocessed; n];
    let mut groups = Vec::new();

    for i in 0..n {
        if states[i] != NameState::Unprocessed {
            continue;
        }
        let matches = match precomputed.as_mut() {
            Some(all) => std::mem::take(&mut all[i]),
            None => match_against_pool(&entries[i], &entries, config),
        };
        if matches.is_empty() {
            continue;
        }

        states[i] = NameState::Representative;
        for m in &matches {
            if let Some(&j) = index_by_raw.get(m.candidate.as_str()) {
                if states[j] == NameState::Unprocessed {
                    states[j] = NameState::Claimed;
                }
            }
        }

        groups.push(DuplicateGroup {
            representative: entries[i].raw.clone(),
            duplicate_count: matches.len(),
            matches,
        });
    }

    let processing_time = started.elapsed();
    debug!(
        "deduplicated {} names ({} unique) into {} groups in {:?}",
        names.len(),
        n,
        groups.len(),
        processing_time
    );

    Ok(DeduplicationResult {
        total_names: n,
        groups,
        processing_time,
        config: config.clone(),
    })
}

/// Match a single name against a candidate pool, without clustering.
///
/// The pool is independently blank-filtered and deduplicated first;
/// otherwise this is exactly one matcher invocation.
///
/// # Errors
/// Returns [`ConfigError`] if the configuration is out of range.
pub fn find_duplicates_for_company(
    name: &str,
    candidates: &[String],
    config: &MatchConfig,
) -> Result<Vec<Match>, ConfigError> {
    config.validate()?;
    let pool = unique_entries(candidates, config);
    let entry = NameEntry::new(name, config);
    Ok(match_against_pool(&entry, &pool, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigOverrides, Preset};
    use crate::matcher::MatchMethod;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn groups_exact_normalized_duplicates() {
        let result = find_duplicates(
            &names(&["Acme Corp", "Acme", "Bolt Corp"]),
            &MatchConfig::default(),
        )
        .unwrap();

        assert_eq!(result.total_names, 3);
        assert_eq!(result.groups.len(), 1);
        let group = &result.groups[0];
        assert_eq!(group.representative, "Acme Corp");
        assert_eq!(group.duplicate_count, 1);
        assert_eq!(group.matches[0].candidate, "Acme");
        assert_eq!(group.matches[0].method, MatchMethod::ExactAfterNormalization);
    }

    #[test]
    fn empty_input_yields_empty_result() {
        let result = find_duplicates(&[], &MatchConfig::default()).unwrap();
        assert_eq!(result.total_names, 0);
        assert!(result.groups.is_empty());
    }

    #[test]
    fn blank_names_are_filtered_and_repeats_collapse() {
        let result = find_duplicates(
            &names(&["", "  ", "Acme Inc", "Acme Inc", "Acme Incorporated"]),
            &MatchConfig::default(),
        )
        .unwrap();
        // "Acme Inc" twice collapses to one; blanks never reach matching.
        assert_eq!(result.total_names, 2);
        assert_eq!(result.groups.len(), 1);
        assert_eq!(result.groups[0].representative, "Acme Inc");
        assert_eq!(result.groups[0].matches[0].candidate, "Acme Incorporated");
    }

    #[test]
    fn claimed_names_never_start_groups() {
        // Monolith↔Monolitx and Monolitx↔Monolixx clear the 0.85 floor
        // (one substitution each) but Monolith↔Monolixx does not (two).
        // Greedy claiming still lets Monolitx appear as a later match
        // target while barring it from anchoring a group.
        let result = find_duplicates(
            &names(&["Monolith", "Monolitx", "Monolixx"]),
            &MatchConfig::default(),
        )
        .unwrap();

        assert_eq!(result.groups.len(), 2);
        assert_eq!(result.groups[0].representative, "Monolith");
        assert_eq!(result.groups[0].matches[0].candidate, "Monolitx");
        assert_eq!(result.groups[1].representative, "Monolixx");
        assert_eq!(result.groups[1].matches[0].candidate, "Monolitx");
    }

    #[test]
    fn grouping_depends_on_input_order() {
        // Same three names, reordered: the middle name now anchors first
        // and swallows both neighbours into a single group.
        let result = find_duplicates(
            &names(&["Monolitx", "Monolith", "Monolixx"]),
            &MatchConfig::default(),
        )
        .unwrap();

        assert_eq!(result.groups.len(), 1);
        assert_eq!(result.groups[0].representative, "Monolitx");
        assert_eq!(result.groups[0].duplicate_count, 2);
    }

    #[test]
    fn unmatched_names_stay_ungrouped() {
        let result = find_duplicates(
            &names(&["Valve", "Getir", "Nintendo"]),
            &MatchConfig::default(),
        )
        .unwrap();
        assert_eq!(result.total_names, 3);
        assert!(result.groups.is_empty());
    }

    #[test]
    fn result_carries_config_and_timing() {
        let config = MatchConfig::from_preset(Preset::Aggressive);
        let result = find_duplicates(&names(&["Acme Corp", "Acme"]), &config).unwrap();
        assert_eq!(result.config, config);
        assert!(result.processing_time <= Duration::from_secs(60));
    }

    #[test]
    fn invalid_config_fails_before_any_matching() {
        let config = MatchConfig {
            min_confidence: -0.5,
            max_results_per_name: 0,
            ..MatchConfig::default()
        };
        let err = find_duplicates(&names(&["Acme"]), &config).unwrap_err();
        assert_eq!(err.violations.len(), 2);
    }

    #[test]
    fn parallel_path_matches_sequential_semantics() {
        // 180 unique names (60 bases, 3 legal-form variants each) exercise
        // the parallel matcher fan-out; clustering must still produce one
        // exact group per base with the first variant as representative.
        // Base stems share a fixed length so no stem is a substring of, or
        // one edit away from, another.
        let stems: Vec<String> = (0..60)
            .map(|i| {
                let c1 = char::from(b'a' + (i / 26) as u8);
                let c2 = char::from(b'a' + (i % 26) as u8);
                format!("Base{c1}{c2}")
            })
            .collect();
        let mut input = Vec::new();
        for stem in &stems {
            input.push(format!("{stem} Inc"));
            input.push(format!("{stem} Incorporated"));
            input.push(format!("{stem} LLC"));
        }
        let result = find_duplicates(&input, &MatchConfig::default()).unwrap();

        assert_eq!(result.total_names, 180);
        assert_eq!(result.groups.len(), 60);
        for (stem, group) in stems.iter().zip(&result.groups) {
            assert_eq!(&group.representative, &format!("{stem} Inc"));
            assert_eq!(group.duplicate_count, 2);
        }
    }

    #[test]
    fn rerun_yields_identical_groups() {
        let input = names(&[
            "Ubisoft Montréal Studio",
            "Ubisoft Montreal",
            "Montreal Ubisoft",
            "Bolt Technology",
            "Bolt Technlgy",
            "Getir",
            "Valve",
        ]);
        let config = MatchConfig::default();
        let first = find_duplicates(&input, &config).unwrap();
        for _ in 0..3 {
            let again = find_duplicates(&input, &config).unwrap();
            assert_eq!(again.groups, first.groups);
            assert_eq!(again.total_names, first.total_names);
        }
    }

    #[test]
    fn single_query_lookup_dedupes_its_pool() {
        let matches = find_duplicates_for_company(
            "Acme",
            &names(&["", "Acme Inc", "Acme Inc", "Acme GmbH"]),
            &MatchConfig::default(),
        )
        .unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].candidate, "Acme Inc");
        assert_eq!(matches[1].candidate, "Acme GmbH");
    }

    #[test]
    fn single_query_respects_overrides() {
        let config = MatchConfig::with_overrides(
            Preset::Conservative,
            &ConfigOverrides {
                max_results_per_name: Some(1),
                ..ConfigOverrides::default()
            },
        )
        .unwrap();
        let matches = find_duplicates_for_company(
            "Acme",
            &names(&["Acme Inc", "Acme GmbH"]),
            &config,
        )
        .unwrap();
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn result_serializes_to_json() {
        let result = find_duplicates(&names(&["Acme Corp", "Acme"]), &MatchConfig::default())
            .unwrap();
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"representative\":\"Acme Corp\""));
        assert!(json.contains("\"total_names\":2"));
    }
}
