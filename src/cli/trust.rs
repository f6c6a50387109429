//! Trust scoring CLI commands.

use std::path::{Path, PathBuf};

use crate::{trust::TrustScorer, TrustReport, TrustThresholds};

use super::basic::load_dataset;

fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.2}", v))
}

/// Analyze a dataset and print the trust report.
pub(crate) fn cmd_analyze(
    path: &PathBuf,
    thresholds: TrustThresholds,
    format: &str,
) -> crate::Result<()> {
    let dataset = load_dataset(path)?;
    let report = TrustScorer::new()
        .with_thresholds(thresholds)
        .analyze(&dataset)?;

    if format == "json" {
        print_json(path, &report)?;
    } else {
        print_table(path, &report);
    }

    Ok(())
}

fn print_json(path: &Path, report: &TrustReport) -> crate::Result<()> {
    let json = serde_json::json!({
        "path": path.display().to_string(),
        "rows": report.row_count,
        "columns": report.profiles.len(),
        "verdict": {
            "label": report.verdict.label.name(),
            "reliable": report.verdict.reliable,
            "needs_cleaning": report.verdict.needs_cleaning,
            "high_risk": report.verdict.high_risk,
        },
        "profiles": report.profiles.iter().map(|p| {
            serde_json::json!({
                "column": p.name,
                "kind": p.kind.name(),
                "missing_pct": p.stats.missing_pct,
                "mean": p.stats.mean,
                "median": p.stats.median,
                "std_dev": p.stats.std_dev,
                "iqr": p.stats.iqr(),
                "skewness": p.stats.skewness,
                "outlier_pct": p.stats.outlier_pct,
                "trust": p.label.name(),
                "reason": p.reason,
            })
        }).collect::<Vec<_>>()
    });

    println!(
        "{}",
        serde_json::to_string_pretty(&json).map_err(|e| crate::Error::Format(e.to_string()))?
    );

    Ok(())
}

fn print_table(path: &Path, report: &TrustReport) {
    println!("Data Trust Report");
    println!("=================");
    println!("File: {}", path.display());
    println!("Rows: {}", report.row_count);
    println!("Columns: {}", report.profiles.len());
    println!();

    println!(
        "{:<20} {:<12} {:>9} {:>10} {:>10} {:>9} {:>9} {:>7} {:>9}  TRUST",
        "COLUMN", "KIND", "MISSING%", "MEAN", "MEDIAN", "STD", "IQR", "SKEW", "OUTLIER%"
    );
    println!("{}", "-".repeat(120));

    for p in &report.profiles {
        println!(
            "{:<20} {:<12} {:>9.2} {:>10} {:>10} {:>9} {:>9} {:>7} {:>9}  {} ({})",
            p.name,
            p.kind.name(),
            p.stats.missing_pct,
            fmt_opt(p.stats.mean),
            fmt_opt(p.stats.median),
            fmt_opt(p.stats.std_dev),
            fmt_opt(p.stats.iqr()),
            fmt_opt(p.stats.skewness),
            fmt_opt(p.stats.outlier_pct),
            p.label,
            p.reason
        );
    }

    println!();
    println!(
        "Dataset verdict: {} (reliable={} needs_cleaning={} high_risk={})",
        report.verdict.label,
        report.verdict.reliable,
        report.verdict.needs_cleaning,
        report.verdict.high_risk
    );
}

/// Analyze a dataset and write the report to a CSV file.
pub(crate) fn cmd_export(
    path: &PathBuf,
    output: &PathBuf,
    thresholds: TrustThresholds,
) -> crate::Result<()> {
    let dataset = load_dataset(path)?;
    let report = TrustScorer::new()
        .with_thresholds(thresholds)
        .analyze(&dataset)?;

    report.export_csv(output)?;

    println!(
        "Trust report for {} columns written to: {}",
        report.profiles.len(),
        output.display()
    );
    println!("Dataset verdict: {}", report.verdict.label);

    Ok(())
}
