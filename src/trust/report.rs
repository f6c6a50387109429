//! Report assembly: per-column profiles, the dataset verdict, and the
//! scorer entry point.

use std::sync::Arc;

use arrow::{
    array::{Float64Array, RecordBatch, StringArray},
    datatypes::{DataType, Field, Schema},
};

use crate::{
    dataset::{ArrowDataset, Dataset},
    error::{Error, Result},
};

use super::{
    classify::{classify, TrustLabel, TrustThresholds},
    normalize::{normalize_column, ColumnKind},
    stats::ColumnStats,
};

/// Trust profile of a single column.
#[derive(Debug, Clone)]
pub struct ColumnProfile {
    /// Column name.
    pub name: String,
    /// Inferred column kind.
    pub kind: ColumnKind,
    /// Computed statistics.
    pub stats: ColumnStats,
    /// Assigned trust label.
    pub label: TrustLabel,
    /// Name of the rule that assigned the label ("identifier" / "clean"
    /// when no rule fired).
    pub reason: &'static str,
}

/// Dataset-level verdict with per-category column counts.
///
/// The counts always sum to the total column count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetVerdict {
    /// Worst label across all columns.
    pub label: TrustLabel,
    /// Columns labeled Reliable.
    pub reliable: usize,
    /// Columns labeled Needs Cleaning.
    pub needs_cleaning: usize,
    /// Columns labeled High Risk.
    pub high_risk: usize,
}

impl DatasetVerdict {
    /// Rolls up column profiles: a single High Risk column makes the
    /// whole dataset High Risk, else any Needs Cleaning column makes it
    /// Needs Cleaning.
    #[must_use]
    pub fn from_profiles(profiles: &[ColumnProfile]) -> Self {
        let mut verdict = Self {
            label: TrustLabel::Reliable,
            reliable: 0,
            needs_cleaning: 0,
            high_risk: 0,
        };

        for profile in profiles {
            match profile.label {
                TrustLabel::Reliable => verdict.reliable += 1,
                TrustLabel::NeedsCleaning => verdict.needs_cleaning += 1,
                TrustLabel::HighRisk => verdict.high_risk += 1,
            }
            verdict.label = verdict.label.max(profile.label);
        }

        verdict
    }

    /// Total number of columns counted.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.reliable + self.needs_cleaning + self.high_risk
    }
}

/// Complete trust report for one dataset: profiles in schema order plus
/// the rolled-up verdict. Created fresh per run and never mutated.
#[derive(Debug, Clone)]
pub struct TrustReport {
    /// Row count of the analyzed dataset.
    pub row_count: usize,
    /// Per-column profiles in schema order.
    pub profiles: Vec<ColumnProfile>,
    /// Dataset-level verdict.
    pub verdict: DatasetVerdict,
}

impl TrustReport {
    /// Looks up a profile by column name.
    #[must_use]
    pub fn profile(&self, name: &str) -> Option<&ColumnProfile> {
        self.profiles.iter().find(|p| p.name == name)
    }

    /// Names of all High Risk columns, in schema order.
    #[must_use]
    pub fn high_risk_columns(&self) -> Vec<&str> {
        self.profiles
            .iter()
            .filter(|p| p.label == TrustLabel::HighRisk)
            .map(|p| p.name.as_str())
            .collect()
    }

    /// Converts the report into a dataset with one row per column.
    ///
    /// Columns: `column`, `kind`, `missing_pct`, `mean`, `median`,
    /// `std_dev`, `iqr`, `skewness`, `outlier_pct`, `trust`.
    /// Statistics that were not computable are null.
    ///
    /// # Errors
    ///
    /// Returns an error if the report has no profiles or batch assembly
    /// fails.
    pub fn to_dataset(&self) -> Result<ArrowDataset> {
        let schema = Arc::new(Schema::new(vec![
            Field::new("column", DataType::Utf8, false),
            Field::new("kind", DataType::Utf8, false),
            Field::new("missing_pct", DataType::Float64, false),
            Field::new("mean", DataType::Float64, true),
            Field::new("median", DataType::Float64, true),
            Field::new("std_dev", DataType::Float64, true),
            Field::new("iqr", DataType::Float64, true),
            Field::new("skewness", DataType::Float64, true),
            Field::new("outlier_pct", DataType::Float64, true),
            Field::new("trust", DataType::Utf8, false),
        ]));

        let names: Vec<&str> = self.profiles.iter().map(|p| p.name.as_str()).collect();
        let kinds: Vec<&str> = self.profiles.iter().map(|p| p.kind.name()).collect();
        let labels: Vec<&str> = self.profiles.iter().map(|p| p.label.name()).collect();

        let float_col = |f: fn(&ColumnProfile) -> Option<f64>| -> Float64Array {
            self.profiles.iter().map(f).collect::<Vec<_>>().into()
        };

        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(StringArray::from(names)),
                Arc::new(StringArray::from(kinds)),
                Arc::new(Float64Array::from(
                    self.profiles
                        .iter()
                        .map(|p| p.stats.missing_pct)
                        .collect::<Vec<_>>(),
                )),
                Arc::new(float_col(|p| p.stats.mean)),
                Arc::new(float_col(|p| p.stats.median)),
                Arc::new(float_col(|p| p.stats.std_dev)),
                Arc::new(float_col(|p| p.stats.iqr())),
                Arc::new(float_col(|p| p.stats.skewness)),
                Arc::new(float_col(|p| p.stats.outlier_pct)),
                Arc::new(StringArray::from(labels)),
            ],
        )
        .map_err(Error::Arrow)?;

        ArrowDataset::from_batch(batch)
    }

    /// Writes the report as a CSV file: one row per column, then a
    /// trailing dataset-verdict line.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn export_csv(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        use std::io::Write;

        let path = path.as_ref();
        self.to_dataset()?.to_csv(path)?;

        let mut file = std::fs::OpenOptions::new()
            .append(true)
            .open(path)
            .map_err(|e| Error::io(e, path))?;
        writeln!(
            file,
            "# dataset verdict: {} (reliable={} needs_cleaning={} high_risk={})",
            self.verdict.label,
            self.verdict.reliable,
            self.verdict.needs_cleaning,
            self.verdict.high_risk
        )
        .map_err(|e| Error::io(e, path))?;

        Ok(())
    }
}

/// Column-level trust scorer.
///
/// A pure function of (dataset, thresholds): analyzing the same dataset
/// with the same thresholds always yields the same report.
///
/// # Example
///
/// ```
/// use confiar::TrustScorer;
///
/// let scorer = TrustScorer::new()
///     .high_missing_pct(30.0)
///     .low_missing_pct(2.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TrustScorer {
    thresholds: TrustThresholds,
}

impl TrustScorer {
    /// Creates a scorer with default thresholds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole threshold configuration.
    #[must_use]
    pub fn with_thresholds(mut self, thresholds: TrustThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Sets the High Risk missing-percentage threshold.
    #[must_use]
    pub fn high_missing_pct(mut self, pct: f64) -> Self {
        self.thresholds.high_missing_pct = pct;
        self
    }

    /// Sets the Needs Cleaning missing-percentage threshold.
    #[must_use]
    pub fn low_missing_pct(mut self, pct: f64) -> Self {
        self.thresholds.low_missing_pct = pct;
        self
    }

    /// Sets the High Risk outlier-percentage threshold.
    #[must_use]
    pub fn high_outlier_pct(mut self, pct: f64) -> Self {
        self.thresholds.high_outlier_pct = pct;
        self
    }

    /// Sets the Needs Cleaning outlier-percentage threshold.
    #[must_use]
    pub fn low_outlier_pct(mut self, pct: f64) -> Self {
        self.thresholds.low_outlier_pct = pct;
        self
    }

    /// Sets the High Risk absolute-skewness threshold.
    #[must_use]
    pub fn high_skew(mut self, skew: f64) -> Self {
        self.thresholds.high_skew = skew;
        self
    }

    /// Sets the Needs Cleaning absolute-skewness threshold.
    #[must_use]
    pub fn moderate_skew(mut self, skew: f64) -> Self {
        self.thresholds.moderate_skew = skew;
        self
    }

    /// Sets the spread stability band.
    #[must_use]
    pub fn instability_band(mut self, low: f64, high: f64) -> Self {
        self.thresholds.instability_low = low;
        self.thresholds.instability_high = high;
        self
    }

    /// Configured thresholds.
    #[must_use]
    pub fn thresholds(&self) -> &TrustThresholds {
        &self.thresholds
    }

    /// Analyzes a dataset and produces the trust report.
    ///
    /// The thresholds are validated first, and structural problems abort
    /// the run before any column is analyzed; per-column problems only
    /// degrade that column's statistics.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for a bad threshold
    /// configuration, [`Error::EmptySchema`] for a dataset with no
    /// columns, and [`Error::EmptyDataset`] for one with no rows.
    pub fn analyze(&self, dataset: &ArrowDataset) -> Result<TrustReport> {
        self.thresholds.validate()?;

        if dataset.schema().fields().is_empty() {
            return Err(Error::EmptySchema);
        }
        if dataset.is_empty() {
            return Err(Error::EmptyDataset);
        }

        let columns = dataset.column_strings()?;

        let profiles: Vec<ColumnProfile> = columns
            .into_iter()
            .map(|(name, raw)| {
                let normalized = normalize_column(&raw);
                let stats = match normalized.kind {
                    ColumnKind::Numeric => ColumnStats::from_values(&normalized.values),
                    // Identifier and categorical columns are exempt from
                    // numeric estimation
                    ColumnKind::Identifier | ColumnKind::Categorical => {
                        ColumnStats::missing_only(normalized.total_count, normalized.missing_count)
                    }
                };
                let (label, reason) = classify(normalized.kind, &stats, &self.thresholds);

                ColumnProfile {
                    name,
                    kind: normalized.kind,
                    stats,
                    label,
                    reason,
                }
            })
            .collect();

        let verdict = DatasetVerdict::from_profiles(&profiles);

        Ok(TrustReport {
            row_count: dataset.len(),
            profiles,
            verdict,
        })
    }
}
