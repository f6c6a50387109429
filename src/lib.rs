//! confiar - Column-level data trust scoring in Pure Rust
//!
//! Given a tabular dataset, confiar computes per-column statistics
//! (missing-value rate, mean, median, standard deviation, IQR, skewness,
//! Tukey outlier rate) and classifies every column into one of three trust
//! labels: `Reliable`, `Needs Cleaning`, or `High Risk`. A worst-column-wins
//! rollup produces a single verdict for the dataset.
//!
//! # Design Principles
//!
//! 1. **Pure scoring** - the engine is a pure function from
//!    (dataset, thresholds) to (profiles, verdict); no shared state
//! 2. **Ecosystem aligned** - Arrow 53, Parquet 53; datasets are Arrow
//!    `RecordBatch`es loaded from CSV or Parquet
//! 3. **Degrade, don't panic** - unparseable cells count as missing and
//!    statistics that cannot be computed are reported as absent, never NaN
//!
//! # Quick Start
//!
//! ```no_run
//! use confiar::{ArrowDataset, TrustScorer};
//!
//! let dataset = ArrowDataset::from_csv("data/orders.csv").unwrap();
//! let report = TrustScorer::new().analyze(&dataset).unwrap();
//!
//! for profile in &report.profiles {
//!     println!("{}: {}", profile.name, profile.label);
//! }
//! println!("dataset verdict: {}", report.verdict.label);
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
// Allow common test patterns
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::cast_precision_loss,
        clippy::float_cmp,
        clippy::unreadable_literal
    )
)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]

/// CLI module for command-line interface
#[cfg(feature = "cli")]
pub mod cli;
pub mod dataset;
pub mod error;
pub mod trust;

// Re-exports for convenience
// Re-export arrow types commonly needed
pub use arrow::{
    array::RecordBatch,
    datatypes::{Schema, SchemaRef},
};
pub use dataset::{ArrowDataset, CsvOptions, Dataset};
pub use error::{Error, Result};
pub use trust::{
    ColumnKind, ColumnProfile, ColumnStats, DatasetVerdict, TrustLabel, TrustReport, TrustScorer,
    TrustThresholds,
};
