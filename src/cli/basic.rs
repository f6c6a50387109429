//! Basic dataset inspection commands.

use std::path::{Path, PathBuf};

use arrow::util::pretty::print_batches;

use crate::{ArrowDataset, Dataset};

pub(crate) fn load_dataset(path: &Path) -> crate::Result<ArrowDataset> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    match ext {
        "csv" => ArrowDataset::from_csv(path),
        "parquet" => ArrowDataset::from_parquet(path),
        ext => Err(crate::Error::unsupported_format(ext)),
    }
}

fn get_format(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => "CSV",
        Some("parquet") => "Parquet",
        _ => "Unknown",
    }
}

pub(crate) fn cmd_info(path: &PathBuf) -> crate::Result<()> {
    let dataset = load_dataset(path)?;

    let file_size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);

    println!("File: {}", path.display());
    println!("Format: {}", get_format(path));
    println!("Rows: {}", dataset.len());
    println!("Batches: {}", dataset.num_batches());
    println!("Columns: {}", dataset.schema().fields().len());
    println!("Size: {} bytes", file_size);

    Ok(())
}

pub(crate) fn cmd_head(path: &PathBuf, rows: usize) -> crate::Result<()> {
    let dataset = load_dataset(path)?;

    if dataset.is_empty() {
        println!("Dataset is empty");
        return Ok(());
    }

    let mut collected = Vec::new();
    let mut count = 0;

    for batch in dataset.iter() {
        let take = (rows - count).min(batch.num_rows());
        if take > 0 {
            collected.push(batch.slice(0, take));
            count += take;
        }
        if count >= rows {
            break;
        }
    }

    if collected.is_empty() {
        println!("No data to display");
        return Ok(());
    }

    print_batches(&collected).map_err(crate::Error::Arrow)?;

    if count < dataset.len() {
        println!("... showing {} of {} rows", count, dataset.len());
    }

    Ok(())
}

pub(crate) fn cmd_schema(path: &PathBuf) -> crate::Result<()> {
    let dataset = load_dataset(path)?;
    let schema = dataset.schema();

    println!("Schema for {}:", path.display());
    println!();

    for (i, field) in schema.fields().iter().enumerate() {
        let nullable = if field.is_nullable() {
            "nullable"
        } else {
            "not null"
        };
        println!(
            "  {}: {} ({}) [{}]",
            i,
            field.name(),
            field.data_type(),
            nullable
        );
    }

    println!();
    println!("Total columns: {}", schema.fields().len());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_csv(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("data.csv");
        std::fs::write(&path, "id,amount\n1,10.5\n2,12.0\n3,11.25\n").expect("write");
        path
    }

    #[test]
    fn test_load_dataset_csv() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_csv(&dir);

        let dataset = load_dataset(&path).expect("load");
        assert_eq!(dataset.len(), 3);
    }

    #[test]
    fn test_load_dataset_unsupported() {
        let result = load_dataset(Path::new("data.xlsx"));
        assert!(matches!(
            result,
            Err(crate::Error::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_cmd_info() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_csv(&dir);
        assert!(cmd_info(&path).is_ok());
    }

    #[test]
    fn test_cmd_head() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_csv(&dir);
        assert!(cmd_head(&path, 2).is_ok());
    }

    #[test]
    fn test_cmd_schema() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_csv(&dir);
        assert!(cmd_schema(&path).is_ok());
    }
}
