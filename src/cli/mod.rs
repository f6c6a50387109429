//! confiar CLI - Column-level data trust scoring
//!
//! Command-line interface for confiar operations.

use std::{path::PathBuf, process::ExitCode};

use clap::{Args, Parser, Subcommand};

mod basic;
mod trust;

/// confiar - Column-level data trust scoring in Pure Rust
#[derive(Parser)]
#[command(name = "confiar")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a dataset and print per-column trust labels
    Analyze {
        /// Path to dataset file (CSV or Parquet)
        path: PathBuf,
        #[command(flatten)]
        thresholds: ThresholdArgs,
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Analyze a dataset and write the report as CSV
    Export {
        /// Path to dataset file (CSV or Parquet)
        path: PathBuf,
        /// Output CSV file for the report
        #[arg(short, long)]
        output: PathBuf,
        #[command(flatten)]
        thresholds: ThresholdArgs,
    },
    /// Display dataset information
    Info {
        /// Path to dataset file
        path: PathBuf,
    },
    /// Display first N rows of a dataset
    Head {
        /// Path to dataset file
        path: PathBuf,
        /// Number of rows to display
        #[arg(short = 'n', long, default_value = "10")]
        rows: usize,
    },
    /// Display dataset schema
    Schema {
        /// Path to dataset file
        path: PathBuf,
    },
}

/// Threshold overrides shared by the analyze and export commands.
///
/// Flags override values from `--config`, which overrides the documented
/// defaults.
#[derive(Args)]
struct ThresholdArgs {
    /// JSON file with threshold configuration
    #[arg(long)]
    config: Option<PathBuf>,
    /// Missing % above which a column is High Risk (default: 40)
    #[arg(long)]
    high_missing: Option<f64>,
    /// Missing % above which a column Needs Cleaning (default: 5)
    #[arg(long)]
    low_missing: Option<f64>,
    /// Outlier % above which a column is High Risk (default: 15)
    #[arg(long)]
    high_outlier: Option<f64>,
    /// Outlier % above which a column Needs Cleaning (default: 5)
    #[arg(long)]
    low_outlier: Option<f64>,
    /// Absolute skewness above which a column is High Risk (default: 2.0)
    #[arg(long)]
    high_skew: Option<f64>,
    /// Absolute skewness above which a column Needs Cleaning
    /// (default: 1.0)
    #[arg(long)]
    moderate_skew: Option<f64>,
    /// Lower edge of the spread stability band (default: 0.5)
    #[arg(long)]
    instability_low: Option<f64>,
    /// Upper edge of the spread stability band (default: 1.5)
    #[arg(long)]
    instability_high: Option<f64>,
}

impl ThresholdArgs {
    fn resolve(&self) -> crate::Result<crate::TrustThresholds> {
        let mut thresholds = match &self.config {
            Some(path) => {
                let content =
                    std::fs::read_to_string(path).map_err(|e| crate::Error::io(e, path))?;
                serde_json::from_str(&content).map_err(|e| {
                    crate::Error::Format(format!("Invalid threshold config: {}", e))
                })?
            }
            None => crate::TrustThresholds::default(),
        };

        if let Some(v) = self.high_missing {
            thresholds.high_missing_pct = v;
        }
        if let Some(v) = self.low_missing {
            thresholds.low_missing_pct = v;
        }
        if let Some(v) = self.high_outlier {
            thresholds.high_outlier_pct = v;
        }
        if let Some(v) = self.low_outlier {
            thresholds.low_outlier_pct = v;
        }
        if let Some(v) = self.high_skew {
            thresholds.high_skew = v;
        }
        if let Some(v) = self.moderate_skew {
            thresholds.moderate_skew = v;
        }
        if let Some(v) = self.instability_low {
            thresholds.instability_low = v;
        }
        if let Some(v) = self.instability_high {
            thresholds.instability_high = v;
        }

        Ok(thresholds)
    }
}

/// Run the confiar CLI.
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze {
            path,
            thresholds,
            format,
        } => thresholds
            .resolve()
            .and_then(|t| trust::cmd_analyze(&path, t, &format)),
        Commands::Export {
            path,
            output,
            thresholds,
        } => thresholds
            .resolve()
            .and_then(|t| trust::cmd_export(&path, &output, t)),
        Commands::Info { path } => basic::cmd_info(&path),
        Commands::Head { path, rows } => basic::cmd_head(&path, rows),
        Commands::Schema { path } => basic::cmd_schema(&path),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
