//! Trust classification.
//!
//! Maps column statistics to a [`TrustLabel`] through an ordered chain of
//! named rules. The chain itself is data (a slice of predicate/label
//! pairs evaluated top-down, first match wins), which keeps the rules
//! individually testable and the thresholds tunable without touching
//! control flow.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::{normalize::ColumnKind, stats::ColumnStats};

/// Under a normal distribution the IQR spans ~1.349 standard deviations;
/// used to derive the expected std from the IQR for the stability check.
const NORMAL_IQR_PER_SIGMA: f64 = 1.349;

/// Trust label assigned to a column or a whole dataset.
///
/// Ordered from best to worst, so the worst label across columns is
/// simply the maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TrustLabel {
    /// Column statistics are within every configured threshold.
    Reliable,
    /// At least one moderate threshold is exceeded.
    NeedsCleaning,
    /// At least one hard threshold is exceeded.
    HighRisk,
}

impl TrustLabel {
    /// Human-readable label name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Reliable => "Reliable",
            Self::NeedsCleaning => "Needs Cleaning",
            Self::HighRisk => "High Risk",
        }
    }
}

impl fmt::Display for TrustLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Threshold configuration for trust classification.
///
/// All percentage fields are expressed in [0, 100]. Defaults are
/// documented per field; [`TrustThresholds::validate`] rejects
/// out-of-range or inverted configurations before any column is
/// analyzed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrustThresholds {
    /// Missing percentage above which a column is High Risk
    /// (default: 40).
    pub high_missing_pct: f64,
    /// Missing percentage above which a column Needs Cleaning
    /// (default: 5).
    pub low_missing_pct: f64,
    /// Outlier percentage above which a column is High Risk
    /// (default: 15).
    pub high_outlier_pct: f64,
    /// Outlier percentage above which a column Needs Cleaning
    /// (default: 5).
    pub low_outlier_pct: f64,
    /// Absolute skewness above which a column is High Risk
    /// (default: 2.0).
    pub high_skew: f64,
    /// Absolute skewness above which a column Needs Cleaning
    /// (default: 1.0).
    pub moderate_skew: f64,
    /// Lower edge of the spread stability band (default: 0.5).
    pub instability_low: f64,
    /// Upper edge of the spread stability band (default: 1.5).
    pub instability_high: f64,
}

impl Default for TrustThresholds {
    fn default() -> Self {
        Self {
            high_missing_pct: 40.0,
            low_missing_pct: 5.0,
            high_outlier_pct: 15.0,
            low_outlier_pct: 5.0,
            high_skew: 2.0,
            moderate_skew: 1.0,
            instability_low: 0.5,
            instability_high: 1.5,
        }
    }
}

impl TrustThresholds {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] when a percentage is outside
    /// [0, 100], a value is non-finite or negative, or a low/high pair is
    /// inverted.
    pub fn validate(&self) -> Result<()> {
        let percentages = [
            ("high_missing_pct", self.high_missing_pct),
            ("low_missing_pct", self.low_missing_pct),
            ("high_outlier_pct", self.high_outlier_pct),
            ("low_outlier_pct", self.low_outlier_pct),
        ];
        for (name, value) in percentages {
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                return Err(Error::invalid_config(format!(
                    "{} must be within [0, 100], got {}",
                    name, value
                )));
            }
        }

        let non_negatives = [
            ("high_skew", self.high_skew),
            ("moderate_skew", self.moderate_skew),
            ("instability_low", self.instability_low),
            ("instability_high", self.instability_high),
        ];
        for (name, value) in non_negatives {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::invalid_config(format!(
                    "{} must be a non-negative finite number, got {}",
                    name, value
                )));
            }
        }

        let ordered_pairs = [
            ("low_missing_pct", self.low_missing_pct, "high_missing_pct", self.high_missing_pct),
            ("low_outlier_pct", self.low_outlier_pct, "high_outlier_pct", self.high_outlier_pct),
            ("moderate_skew", self.moderate_skew, "high_skew", self.high_skew),
            ("instability_low", self.instability_low, "instability_high", self.instability_high),
        ];
        for (low_name, low, high_name, high) in ordered_pairs {
            if low > high {
                return Err(Error::invalid_config(format!(
                    "{} ({}) must not exceed {} ({})",
                    low_name, low, high_name, high
                )));
            }
        }

        Ok(())
    }
}

/// One entry in a classification rule chain.
pub struct TrustRule {
    /// Short rule name, surfaced in reports as the reason a label was
    /// assigned.
    pub name: &'static str,
    /// Label assigned when the rule matches.
    pub label: TrustLabel,
    /// Predicate over the column statistics. A rule whose statistic is
    /// unavailable must return false so classification degrades to the
    /// remaining rules.
    pub applies: fn(&ColumnStats, &TrustThresholds) -> bool,
}

/// Rule chain for numeric columns, evaluated top-down; first match wins.
pub const NUMERIC_RULES: &[TrustRule] = &[
    TrustRule {
        name: "high-missing",
        label: TrustLabel::HighRisk,
        applies: |s, t| s.missing_pct > t.high_missing_pct,
    },
    TrustRule {
        name: "high-outliers",
        label: TrustLabel::HighRisk,
        applies: |s, t| s.outlier_pct.is_some_and(|p| p > t.high_outlier_pct),
    },
    TrustRule {
        name: "severe-skew",
        label: TrustLabel::HighRisk,
        applies: |s, t| s.skewness.is_some_and(|k| k.abs() > t.high_skew),
    },
    TrustRule {
        name: "moderate-missing",
        label: TrustLabel::NeedsCleaning,
        applies: |s, t| s.missing_pct > t.low_missing_pct,
    },
    TrustRule {
        name: "moderate-outliers",
        label: TrustLabel::NeedsCleaning,
        applies: |s, t| s.outlier_pct.is_some_and(|p| p > t.low_outlier_pct),
    },
    TrustRule {
        name: "moderate-skew",
        label: TrustLabel::NeedsCleaning,
        applies: |s, t| s.skewness.is_some_and(|k| k.abs() > t.moderate_skew),
    },
    TrustRule {
        name: "unstable-spread",
        label: TrustLabel::NeedsCleaning,
        applies: spread_outside_band,
    },
];

/// Rule chain for categorical columns: missing rate only.
pub const CATEGORICAL_RULES: &[TrustRule] = &[
    TrustRule {
        name: "high-missing",
        label: TrustLabel::HighRisk,
        applies: |s, t| s.missing_pct > t.high_missing_pct,
    },
    TrustRule {
        name: "moderate-missing",
        label: TrustLabel::NeedsCleaning,
        applies: |s, t| s.missing_pct > t.low_missing_pct,
    },
];

/// Spread stability: the ratio of the sample std to the IQR-derived
/// expected std (IQR/1.349) should sit inside the configured band.
/// Skipped when the std is unavailable or the IQR is zero.
fn spread_outside_band(stats: &ColumnStats, thresholds: &TrustThresholds) -> bool {
    match (stats.std_dev, stats.iqr()) {
        (Some(std), Some(iqr)) if iqr > 0.0 => {
            let ratio = std / (iqr / NORMAL_IQR_PER_SIGMA);
            ratio < thresholds.instability_low || ratio > thresholds.instability_high
        }
        _ => false,
    }
}

/// Classifies one column, returning the label and the name of the rule
/// that fired ("identifier" / "clean" when none did).
#[must_use]
pub fn classify(
    kind: ColumnKind,
    stats: &ColumnStats,
    thresholds: &TrustThresholds,
) -> (TrustLabel, &'static str) {
    let rules = match kind {
        // Identifiers are reported but never penalized.
        ColumnKind::Identifier => return (TrustLabel::Reliable, "identifier"),
        ColumnKind::Numeric => NUMERIC_RULES,
        ColumnKind::Categorical => CATEGORICAL_RULES,
    };

    for rule in rules {
        if (rule.applies)(stats, thresholds) {
            return (rule.label, rule.name);
        }
    }

    (TrustLabel::Reliable, "clean")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats_from(values: &[Option<f64>]) -> ColumnStats {
        ColumnStats::from_values(values)
    }

    fn numeric(values: &[f64]) -> ColumnStats {
        stats_from(&values.iter().copied().map(Some).collect::<Vec<_>>())
    }

    #[test]
    fn test_label_ordering_and_display() {
        assert!(TrustLabel::Reliable < TrustLabel::NeedsCleaning);
        assert!(TrustLabel::NeedsCleaning < TrustLabel::HighRisk);
        assert_eq!(TrustLabel::NeedsCleaning.to_string(), "Needs Cleaning");
    }

    #[test]
    fn test_default_thresholds_validate() {
        assert!(TrustThresholds::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range_percentage() {
        let mut t = TrustThresholds::default();
        t.high_missing_pct = 140.0;
        assert!(t.validate().is_err());

        t = TrustThresholds::default();
        t.low_outlier_pct = -1.0;
        assert!(t.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let mut t = TrustThresholds::default();
        t.high_skew = f64::NAN;
        assert!(t.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_pairs() {
        let mut t = TrustThresholds::default();
        t.low_missing_pct = 50.0;
        assert!(t.validate().is_err());

        t = TrustThresholds::default();
        t.instability_low = 2.0;
        assert!(t.validate().is_err());
    }

    #[test]
    fn test_thresholds_json_roundtrip() {
        let t = TrustThresholds::default();
        let json = serde_json::to_string(&t).unwrap();
        let back: TrustThresholds = serde_json::from_str(&json).unwrap();
        assert_eq!(t, back);

        // Partial overrides fall back to defaults
        let partial: TrustThresholds =
            serde_json::from_str(r#"{"high_missing_pct": 25.0}"#).unwrap();
        assert_eq!(partial.high_missing_pct, 25.0);
        assert_eq!(partial.low_missing_pct, 5.0);
    }

    #[test]
    fn test_high_missing_wins_over_moderate() {
        let stats = stats_from(&[Some(1.0), None, None, None]); // 75% missing
        let (label, reason) = classify(ColumnKind::Numeric, &stats, &TrustThresholds::default());
        assert_eq!(label, TrustLabel::HighRisk);
        assert_eq!(reason, "high-missing");
    }

    #[test]
    fn test_high_outliers() {
        // 1 of 6 values beyond the upper fence: 16.7% > 15%
        let stats = numeric(&[1.0, 2.0, 3.0, 4.0, 5.0, 1000.0]);
        let (label, reason) = classify(ColumnKind::Numeric, &stats, &TrustThresholds::default());
        assert_eq!(label, TrustLabel::HighRisk);
        assert_eq!(reason, "high-outliers");
    }

    #[test]
    fn test_moderate_missing() {
        // 1 of 10 missing: 10% sits between the low (5) and high (40)
        // thresholds
        let stats = stats_from(&[
            Some(10.0),
            Some(11.0),
            Some(12.0),
            Some(10.5),
            Some(11.5),
            Some(12.5),
            Some(10.2),
            Some(11.8),
            Some(12.2),
            None,
        ]);
        let (label, reason) = classify(ColumnKind::Numeric, &stats, &TrustThresholds::default());
        assert_eq!(label, TrustLabel::NeedsCleaning);
        assert_eq!(reason, "moderate-missing");
    }

    #[test]
    fn test_reliable_column() {
        let stats = numeric(&[10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0, 17.0]);
        let (label, reason) = classify(ColumnKind::Numeric, &stats, &TrustThresholds::default());
        assert_eq!(label, TrustLabel::Reliable);
        assert_eq!(reason, "clean");
    }

    #[test]
    fn test_identifier_always_reliable() {
        // Stats that would be High Risk for a numeric column
        let stats = ColumnStats::missing_only(10, 9);
        let (label, reason) =
            classify(ColumnKind::Identifier, &stats, &TrustThresholds::default());
        assert_eq!(label, TrustLabel::Reliable);
        assert_eq!(reason, "identifier");
    }

    #[test]
    fn test_categorical_missing_rules_only() {
        let thresholds = TrustThresholds::default();

        let high = ColumnStats::missing_only(10, 5);
        assert_eq!(
            classify(ColumnKind::Categorical, &high, &thresholds).0,
            TrustLabel::HighRisk
        );

        let moderate = ColumnStats::missing_only(10, 1);
        assert_eq!(
            classify(ColumnKind::Categorical, &moderate, &thresholds).0,
            TrustLabel::NeedsCleaning
        );

        let clean = ColumnStats::missing_only(10, 0);
        assert_eq!(
            classify(ColumnKind::Categorical, &clean, &thresholds).0,
            TrustLabel::Reliable
        );
    }

    #[test]
    fn test_skew_rules() {
        let mut thresholds = TrustThresholds::default();
        // Loosen outlier rules so skew is what fires
        thresholds.high_outlier_pct = 100.0;
        thresholds.low_outlier_pct = 100.0;

        let stats = numeric(&[1.0, 1.1, 1.2, 1.3, 1.4, 1.5, 1.6, 50.0]);
        let (label, reason) = classify(ColumnKind::Numeric, &stats, &thresholds);
        assert_eq!(label, TrustLabel::HighRisk);
        assert_eq!(reason, "severe-skew");
    }

    #[test]
    fn test_unstable_spread() {
        let mut thresholds = TrustThresholds::default();
        // Disable the outlier and skew rules so spread is what fires
        thresholds.high_outlier_pct = 100.0;
        thresholds.low_outlier_pct = 100.0;
        thresholds.high_skew = 100.0;
        thresholds.moderate_skew = 100.0;

        // Tight IQR around 10..13 with symmetric far tails: std blows up
        // relative to the IQR
        let stats = numeric(&[
            -200.0, 10.0, 10.5, 11.0, 11.5, 12.0, 12.5, 13.0, 220.0, -210.0, 230.0,
        ]);
        let ratio = stats.std_dev.unwrap() / (stats.iqr().unwrap() / 1.349);
        assert!(ratio > 1.5, "fixture should be unstable, ratio {}", ratio);

        let (label, reason) = classify(ColumnKind::Numeric, &stats, &thresholds);
        assert_eq!(label, TrustLabel::NeedsCleaning);
        assert_eq!(reason, "unstable-spread");
    }

    #[test]
    fn test_spread_check_skipped_on_zero_iqr() {
        let mut thresholds = TrustThresholds::default();
        thresholds.high_outlier_pct = 100.0;
        thresholds.low_outlier_pct = 100.0;

        // Majority constant: IQR is 0, stability check must not fire
        let stats = numeric(&[5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0]);
        assert_eq!(stats.iqr(), Some(0.0));
        let (label, _) = classify(ColumnKind::Numeric, &stats, &thresholds);
        assert_eq!(label, TrustLabel::Reliable);
    }

    #[test]
    fn test_insufficient_data_degrades_to_missing_rules() {
        // Single value: std and skew are undefined; only missing rules
        // can fire
        let stats = stats_from(&[Some(42.0), None]);
        let (label, reason) = classify(ColumnKind::Numeric, &stats, &TrustThresholds::default());
        assert_eq!(label, TrustLabel::HighRisk);
        assert_eq!(reason, "high-missing");
    }

    #[test]
    fn test_raising_high_missing_never_worsens() {
        let stats = stats_from(&[Some(1.0), Some(2.0), Some(3.0), None, None]); // 40%

        let strict = TrustThresholds {
            high_missing_pct: 30.0,
            ..Default::default()
        };
        let loose = TrustThresholds {
            high_missing_pct: 60.0,
            ..Default::default()
        };

        let (strict_label, _) = classify(ColumnKind::Numeric, &stats, &strict);
        let (loose_label, _) = classify(ColumnKind::Numeric, &stats, &loose);
        assert!(loose_label <= strict_label);
    }
}
