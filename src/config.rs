//! Matching configuration
//!
//! A [`MatchConfig`] is an immutable value built from a named preset plus an
//! optional partial override record, validated before any matching work
//! begins. Validation reports every violated field, not just the first.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Named threshold presets.
///
/// `Conservative` only groups near-certain duplicates, `Aggressive` casts a
/// wide net, `Balanced` sits in between and is the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Conservative,
    #[default]
    Balanced,
    Aggressive,
}

/// Immutable matching configuration.
///
/// The four thresholds are probabilities in `[0, 1]`; `max_results_per_name`
/// must be at least 1. Construct via [`MatchConfig::from_preset`] or
/// [`MatchConfig::with_overrides`]; both yield validated values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Floor for the edit-distance similarity strategy.
    pub high_similarity: f64,
    /// Floor for the token-overlap strategy (after any geographic boost).
    pub token_match: f64,
    /// Floor for the substring strategy.
    pub partial_match: f64,
    /// Matches below this confidence are dropped regardless of strategy.
    pub min_confidence: f64,
    /// Maximum matches kept per query name.
    pub max_results_per_name: usize,
    /// Strip business/legal/industry suffix words during normalization.
    pub remove_suffixes: bool,
    /// Fold accented characters to their base form during normalization.
    pub handle_accents: bool,
    /// Strip digit runs during normalization.
    pub remove_numbers: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::from_preset(Preset::Balanced)
    }
}

/// Partial override record merged over a preset.
///
/// Every field is optional; absent fields keep the preset value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigOverrides {
    pub high_similarity: Option<f64>,
    pub token_match: Option<f64>,
    pub partial_match: Option<f64>,
    pub min_confidence: Option<f64>,
    pub max_results_per_name: Option<usize>,
    pub remove_suffixes: Option<bool>,
    pub handle_accents: Option<bool>,
    pub remove_numbers: Option<bool>,
}

/// One or more configuration fields are out of range.
///
/// `violations` lists every offending field in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid configuration: {}", .violations.join("; "))]
pub struct ConfigError {
    pub violations: Vec<String>,
}

impl MatchConfig {
    /// The literal threshold values of a preset.
    ///
    /// All presets keep suffix stripping and accent folding on and digit
    /// removal off.
    #[must_use]
    pub fn from_preset(preset: Preset) -> Self {
        let (high_similarity, token_match, partial_match, min_confidence, max_results_per_name) =
            match preset {
                Preset::Conservative => (0.92, 0.88, 0.85, 0.85, 5),
                Preset::Balanced => (0.85, 0.80, 0.70, 0.75, 10),
                Preset::Aggressive => (0.78, 0.70, 0.60, 0.60, 15),
            };
        Self {
            high_similarity,
            token_match,
            partial_match,
            min_confidence,
            max_results_per_name,
            remove_suffixes: true,
            handle_accents: true,
            remove_numbers: false,
        }
    }

    /// Merge a partial override record over a preset and validate the result.
    ///
    /// # Example
    /// ```
    /// use namedup::{ConfigOverrides, MatchConfig, Preset};
    ///
    /// let config = MatchConfig::with_overrides(
    ///     Preset::Balanced,
    ///     &ConfigOverrides { min_confidence: Some(0.9), ..ConfigOverrides::default() },
    /// ).unwrap();
    /// assert_eq!(config.min_confidence, 0.9);
    /// assert_eq!(config.high_similarity, 0.85);
    /// ```
    pub fn with_overrides(preset: Preset, overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        let base = Self::from_preset(preset);
        let config = Self {
            high_similarity: overrides.high_similarity.unwrap_or(base.high_similarity),
            token_match: overrides.token_match.unwrap_or(base.token_match),
            partial_match: overrides.partial_match.unwrap_or(base.partial_match),
            min_confidence: overrides.min_confidence.unwrap_or(base.min_confidence),
            max_results_per_name: overrides
                .max_results_per_name
                .unwrap_or(base.max_results_per_name),
            remove_suffixes: overrides.remove_suffixes.unwrap_or(base.remove_suffixes),
            handle_accents: overrides.handle_accents.unwrap_or(base.handle_accents),
            remove_numbers: overrides.remove_numbers.unwrap_or(base.remove_numbers),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check every field, collecting all violations.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut violations = Vec::new();

        for (name, value) in [
            ("high_similarity", self.high_similarity),
            ("token_match", self.token_match),
            ("partial_match", self.partial_match),
            ("min_confidence", self.min_confidence),
        ] {
            if !value.is_finite() {
                violations.push(format!("{name} must be a finite number, got {value}"));
            } else if !(0.0..=1.0).contains(&value) {
                violations.push(format!("{name} must be in range [0.0, 1.0], got {value}"));
            }
        }

        if self.max_results_per_name < 1 {
            violations.push(format!(
                "max_results_per_name must be at least 1, got {}",
                self.max_results_per_name
            ));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ConfigError { violations })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_literals() {
        let c = MatchConfig::from_preset(Preset::Conservative);
        assert_eq!(
            (c.high_similarity, c.token_match, c.partial_match, c.min_confidence),
            (0.92, 0.88, 0.85, 0.85)
        );
        assert_eq!(c.max_results_per_name, 5);

        let b = MatchConfig::from_preset(Preset::Balanced);
        assert_eq!(
            (b.high_similarity, b.token_match, b.partial_match, b.min_confidence),
            (0.85, 0.80, 0.70, 0.75)
        );
        assert_eq!(b.max_results_per_name, 10);

        let a = MatchConfig::from_preset(Preset::Aggressive);
        assert_eq!(
            (a.high_similarity, a.token_match, a.partial_match, a.min_confidence),
            (0.78, 0.70, 0.60, 0.60)
        );
        assert_eq!(a.max_results_per_name, 15);

        for c in [c, b, a] {
            assert!(c.remove_suffixes);
            assert!(c.handle_accents);
            assert!(!c.remove_numbers);
            assert!(c.validate().is_ok());
        }
    }

    #[test]
    fn default_is_balanced() {
        assert_eq!(MatchConfig::default(), MatchConfig::from_preset(Preset::Balanced));
    }

    #[test]
    fn overrides_merge_over_preset() {
        let config = MatchConfig::with_overrides(
            Preset::Aggressive,
            &ConfigOverrides {
                token_match: Some(0.5),
                remove_numbers: Some(true),
                ..ConfigOverrides::default()
            },
        )
        .unwrap();
        assert_eq!(config.token_match, 0.5);
        assert!(config.remove_numbers);
        // Untouched fields keep the preset values.
        assert_eq!(config.high_similarity, 0.78);
        assert_eq!(config.max_results_per_name, 15);
    }

    #[test]
    fn validation_collects_every_violation() {
        let err = MatchConfig::with_overrides(
            Preset::Balanced,
            &ConfigOverrides {
                high_similarity: Some(1.5),
                partial_match: Some(-0.1),
                min_confidence: Some(f64::NAN),
                max_results_per_name: Some(0),
                ..ConfigOverrides::default()
            },
        )
        .unwrap_err();

        assert_eq!(err.violations.len(), 4);
        assert!(err.violations[0].contains("high_similarity"));
        assert!(err.violations[1].contains("partial_match"));
        assert!(err.violations[2].contains("min_confidence"));
        assert!(err.violations[3].contains("max_results_per_name"));
    }

    #[test]
    fn error_message_enumerates_fields() {
        let err = MatchConfig::with_overrides(
            Preset::Balanced,
            &ConfigOverrides {
                token_match: Some(2.0),
                max_results_per_name: Some(0),
                ..ConfigOverrides::default()
            },
        )
        .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("token_match must be in range [0.0, 1.0], got 2"));
        assert!(message.contains("max_results_per_name must be at least 1, got 0"));
    }

    #[test]
    fn boundary_values_are_valid() {
        let config = MatchConfig::with_overrides(
            Preset::Balanced,
            &ConfigOverrides {
                high_similarity: Some(0.0),
                token_match: Some(1.0),
                max_results_per_name: Some(1),
                ..ConfigOverrides::default()
            },
        );
        assert!(config.is_ok());
    }

    #[test]
    fn config_serde_round_trip() {
        let config = MatchConfig::from_preset(Preset::Conservative);
        let json = serde_json::to_string(&config).unwrap();
        let back: MatchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn overrides_deserialize_from_partial_json() {
        let overrides: ConfigOverrides =
            serde_json::from_str(r#"{"min_confidence": 0.9}"#).unwrap();
        assert_eq!(overrides.min_confidence, Some(0.9));
        assert_eq!(overrides.high_similarity, None);
    }
}
