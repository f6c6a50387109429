//! Dataset types for confiar.
//!
//! Provides the [`Dataset`] trait and [`ArrowDataset`] implementation
//! for working with Arrow-based tabular data. The trust scorer only needs
//! the shape exposed here (ordered named columns of raw cells), not any
//! particular loading mechanism.

use std::{path::Path, sync::Arc};

use arrow::{
    array::RecordBatch,
    datatypes::SchemaRef,
    util::display::array_value_to_string,
};
use parquet::{
    arrow::{arrow_reader::ParquetRecordBatchReaderBuilder, ArrowWriter},
    file::properties::WriterProperties,
};

use crate::error::{Error, Result};

/// A dataset that can be iterated over.
///
/// Datasets provide access to tabular data stored as Arrow RecordBatches.
/// All implementations must be thread-safe (Send + Sync).
pub trait Dataset: Send + Sync {
    /// Returns the total number of rows in the dataset.
    fn len(&self) -> usize;

    /// Returns true if the dataset contains no rows.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the schema of the dataset.
    fn schema(&self) -> SchemaRef;

    /// Returns an iterator over all RecordBatches in the dataset.
    fn iter(&self) -> Box<dyn Iterator<Item = RecordBatch> + Send + '_>;

    /// Returns the number of batches in the dataset.
    fn num_batches(&self) -> usize;

    /// Returns a specific batch by index.
    fn get_batch(&self, index: usize) -> Option<&RecordBatch>;
}

/// An in-memory dataset backed by Arrow RecordBatches.
///
/// This is the primary dataset type for confiar. It stores data as a
/// collection of RecordBatches and hands the trust scorer per-column
/// views of the raw cell values.
///
/// # Example
///
/// ```no_run
/// use confiar::{ArrowDataset, Dataset};
///
/// let dataset = ArrowDataset::from_csv("data.csv").unwrap();
/// println!("Dataset has {} rows", dataset.len());
/// ```
#[derive(Debug, Clone)]
pub struct ArrowDataset {
    batches: Vec<RecordBatch>,
    schema: SchemaRef,
    row_count: usize,
}

impl ArrowDataset {
    /// Creates a new ArrowDataset from a vector of RecordBatches.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The batches vector is empty
    /// - The batches have inconsistent schemas
    pub fn new(batches: Vec<RecordBatch>) -> Result<Self> {
        if batches.is_empty() {
            return Err(Error::EmptyDataset);
        }

        let schema = batches[0].schema();

        for (i, batch) in batches.iter().enumerate().skip(1) {
            if batch.schema() != schema {
                return Err(Error::schema_mismatch(format!(
                    "Batch {} has different schema than batch 0",
                    i
                )));
            }
        }

        let row_count = batches.iter().map(|b| b.num_rows()).sum();

        Ok(Self {
            batches,
            schema,
            row_count,
        })
    }

    /// Creates an ArrowDataset from a single RecordBatch.
    ///
    /// # Errors
    ///
    /// Returns an error if the batch has an empty schema wrapper (never
    /// for a well-formed batch).
    pub fn from_batch(batch: RecordBatch) -> Result<Self> {
        Self::new(vec![batch])
    }

    /// Loads a dataset from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, is not valid CSV,
    /// or contains no rows.
    pub fn from_csv(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_csv_with_options(path, CsvOptions::default())
    }

    /// Loads a dataset from a CSV file with options.
    ///
    /// The schema is inferred from the file unless one is provided in
    /// `options`.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or the file is empty.
    pub fn from_csv_with_options(path: impl AsRef<Path>, options: CsvOptions) -> Result<Self> {
        use std::io::{BufReader, Seek, SeekFrom};

        use arrow_csv::{reader::Format, ReaderBuilder};

        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| Error::io(e, path))?;
        let mut buf_reader = BufReader::new(file);

        let schema = if let Some(schema) = options.schema {
            Arc::new(schema)
        } else {
            let mut format = Format::default().with_header(options.has_header);
            if let Some(delim) = options.delimiter {
                format = format.with_delimiter(delim);
            }
            let (inferred, _) = format
                .infer_schema(&mut buf_reader, Some(1000))
                .map_err(Error::Arrow)?;

            buf_reader
                .seek(SeekFrom::Start(0))
                .map_err(|e| Error::io(e, path))?;

            Arc::new(inferred)
        };

        let mut builder = ReaderBuilder::new(schema)
            .with_batch_size(options.batch_size)
            .with_header(options.has_header);

        if let Some(delim) = options.delimiter {
            builder = builder.with_delimiter(delim);
        }

        let reader = builder.build(buf_reader).map_err(Error::Arrow)?;

        let batches: Vec<RecordBatch> = reader
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::Arrow)?;

        if batches.is_empty() {
            return Err(Error::EmptyDataset);
        }

        Self::new(batches)
    }

    /// Loads a dataset from a CSV string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not valid CSV or has no rows.
    pub fn from_csv_str(data: &str) -> Result<Self> {
        use std::io::Cursor;

        use arrow_csv::{reader::Format, ReaderBuilder};

        let format = Format::default().with_header(true);
        let mut cursor = Cursor::new(data.as_bytes());
        let (schema, _) = format
            .infer_schema(&mut cursor, None)
            .map_err(Error::Arrow)?;

        let reader = ReaderBuilder::new(Arc::new(schema))
            .with_header(true)
            .build(Cursor::new(data.as_bytes()))
            .map_err(Error::Arrow)?;

        let batches: Vec<RecordBatch> = reader
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::Arrow)?;

        if batches.is_empty() {
            return Err(Error::EmptyDataset);
        }

        Self::new(batches)
    }

    /// Saves the dataset to a CSV file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    pub fn to_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        use arrow_csv::WriterBuilder;

        let path = path.as_ref();
        let file = std::fs::File::create(path).map_err(|e| Error::io(e, path))?;

        let mut writer = WriterBuilder::new().with_header(true).build(file);

        for batch in &self.batches {
            writer.write(batch).map_err(Error::Arrow)?;
        }

        Ok(())
    }

    /// Loads a dataset from a Parquet file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, is not valid
    /// Parquet, or contains no rows.
    pub fn from_parquet(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| Error::io(e, path))?;

        let builder = ParquetRecordBatchReaderBuilder::try_new(file).map_err(Error::Parquet)?;
        let reader = builder.build().map_err(Error::Parquet)?;

        let batches: Vec<RecordBatch> = reader
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::Arrow)?;

        if batches.is_empty() {
            return Err(Error::EmptyDataset);
        }

        Self::new(batches)
    }

    /// Saves the dataset to a Parquet file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    pub fn to_parquet(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path).map_err(|e| Error::io(e, path))?;

        let props = WriterProperties::builder().build();
        let mut writer =
            ArrowWriter::try_new(file, self.schema.clone(), Some(props)).map_err(Error::Parquet)?;

        for batch in &self.batches {
            writer.write(batch).map_err(Error::Parquet)?;
        }

        writer.close().map_err(Error::Parquet)?;
        Ok(())
    }

    /// Extracts every column as raw cell text, in schema order.
    ///
    /// Null cells become `None`; all other cells are rendered through
    /// Arrow's display formatting, so any array type the loaders produce
    /// is handled uniformly. The result is a derived copy; the dataset
    /// itself is never mutated.
    ///
    /// # Errors
    ///
    /// Returns an error if a cell value cannot be rendered.
    pub fn column_strings(&self) -> Result<Vec<(String, Vec<Option<String>>)>> {
        let mut columns: Vec<(String, Vec<Option<String>>)> = self
            .schema
            .fields()
            .iter()
            .map(|f| (f.name().clone(), Vec::with_capacity(self.row_count)))
            .collect();

        for batch in &self.batches {
            for (col_idx, (_, values)) in columns.iter_mut().enumerate() {
                let array = batch.column(col_idx);
                for i in 0..array.len() {
                    if array.is_null(i) {
                        values.push(None);
                    } else {
                        values.push(Some(
                            array_value_to_string(array, i).map_err(Error::Arrow)?,
                        ));
                    }
                }
            }
        }

        Ok(columns)
    }
}

impl Dataset for ArrowDataset {
    fn len(&self) -> usize {
        self.row_count
    }

    fn schema(&self) -> SchemaRef {
        self.schema.clone()
    }

    fn iter(&self) -> Box<dyn Iterator<Item = RecordBatch> + Send + '_> {
        Box::new(self.batches.iter().cloned())
    }

    fn num_batches(&self) -> usize {
        self.batches.len()
    }

    fn get_batch(&self, index: usize) -> Option<&RecordBatch> {
        self.batches.get(index)
    }
}

/// Options for CSV parsing.
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Whether the file has a header row (default: true).
    pub has_header: bool,
    /// Field delimiter (default: inferred comma).
    pub delimiter: Option<u8>,
    /// Rows per RecordBatch (default: 1024).
    pub batch_size: usize,
    /// Explicit schema; inferred from the file when `None`.
    pub schema: Option<arrow::datatypes::Schema>,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            has_header: true,
            delimiter: None,
            batch_size: 1024,
            schema: None,
        }
    }
}
