//! Column-level trust scoring.
//!
//! Turns raw per-column cell values into statistics and a trust label per
//! column, plus a worst-column-wins verdict for the whole dataset.
//!
//! The pipeline runs in dependency order:
//!
//! 1. [`normalize`] coerces raw cell text into numbers and infers the
//!    column kind ({Numeric, Identifier, Categorical})
//! 2. [`stats`] computes missing rate, mean, median, standard deviation,
//!    quartiles, skewness, and the Tukey outlier rate
//! 3. [`classify`] maps statistics to a [`TrustLabel`] through an ordered
//!    rule chain with configurable [`TrustThresholds`]
//! 4. [`report`] assembles ordered [`ColumnProfile`]s and the
//!    [`DatasetVerdict`], and exports the result
//!
//! # Estimator choices
//!
//! Quantiles use linear interpolation at position q·(n−1) over the sorted
//! sample; skewness is the adjusted Fisher-Pearson estimator
//! G1 = g1·√(n(n−1))/(n−2); the standard deviation is the sample estimator
//! (ddof = 1). These match the defaults of the tooling the default
//! thresholds were calibrated against and are consistent across all
//! columns.
//!
//! # Example
//!
//! ```no_run
//! use confiar::{ArrowDataset, TrustScorer, TrustLabel};
//!
//! let dataset = ArrowDataset::from_csv("data/orders.csv").unwrap();
//! let report = TrustScorer::new()
//!     .high_missing_pct(30.0)
//!     .analyze(&dataset)
//!     .unwrap();
//!
//! if report.verdict.label == TrustLabel::HighRisk {
//!     eprintln!("columns at risk: {:?}", report.high_risk_columns());
//! }
//! ```

pub mod classify;
pub mod normalize;
pub mod report;
pub mod stats;


pub use classify::{TrustLabel, TrustRule, TrustThresholds, CATEGORICAL_RULES, NUMERIC_RULES};
pub use normalize::{normalize_column, parse_numeric, ColumnKind, NormalizedColumn};
pub use report::{ColumnProfile, DatasetVerdict, TrustReport, TrustScorer};
pub use stats::ColumnStats;
