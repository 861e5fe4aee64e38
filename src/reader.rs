//! Tabular column reader.
//!
//! Reads numeric columns from delimited text files (whitespace-separated
//! by default), applies optional per-file rescale factors and produces
//! series ready to plot.

use std::path::PathBuf;

use csv::ReaderBuilder;

use crate::error::{Error, Result};
use crate::figure::Figure;
use crate::traces::Scatter;

/// One input file and the columns to extract from it.
#[derive(Debug, Clone)]
pub struct ColumnFile {
    /// Path of the data file.
    pub path: PathBuf,
    /// Zero-based index of the x column.
    pub x_column: usize,
    /// Zero-based index of the y column.
    pub y_column: usize,
    /// Factor applied to every x value.
    pub x_scale: f64,
    /// Factor applied to every y value.
    pub y_scale: f64,
}

impl ColumnFile {
    /// Describe a file, defaulting to columns 0 (x) and 1 (y) unscaled.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), x_column: 0, y_column: 1, x_scale: 1.0, y_scale: 1.0 }
    }

    /// Select the x and y column indices.
    #[must_use]
    pub fn columns(mut self, x: usize, y: usize) -> Self {
        self.x_column = x;
        self.y_column = y;
        self
    }

    /// Rescale factors applied to the extracted values.
    #[must_use]
    pub fn rescale(mut self, x: f64, y: f64) -> Self {
        self.x_scale = x;
        self.y_scale = y;
        self
    }
}

/// Options shared by every file of one read.
#[derive(Debug, Clone)]
pub struct ReaderOptions {
    /// Field delimiter; `None` treats runs of spaces as one separator.
    pub delimiter: Option<u8>,
    /// Data rows skipped at the top of each file.
    pub skip_rows: usize,
    /// Maximum number of data rows read per file.
    pub max_rows: Option<usize>,
    /// Lines starting with this byte are ignored.
    pub comment: Option<u8>,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self { delimiter: None, skip_rows: 0, max_rows: None, comment: Some(b'#') }
    }
}

/// One extracted data series.
#[derive(Debug, Clone)]
pub struct Series {
    /// x values.
    pub x: Vec<f64>,
    /// y values.
    pub y: Vec<f64>,
}

/// Read one series per file.
///
/// # Errors
///
/// Returns an error if a file cannot be read, a requested column is out
/// of bounds, a field fails to parse as a number, or a file yields no
/// data rows.
pub fn read_columns(files: &[ColumnFile], options: &ReaderOptions) -> Result<Vec<Series>> {
    files.iter().map(|file| read_one(file, options)).collect()
}

fn read_one(file: &ColumnFile, options: &ReaderOptions) -> Result<Series> {
    let mut builder = ReaderBuilder::new();
    builder
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .comment(options.comment)
        .delimiter(options.delimiter.unwrap_or(b' '));
    let mut reader = builder.from_path(&file.path)?;

    let path = file.path.display().to_string();
    let mut x = Vec::new();
    let mut y = Vec::new();

    for (row, record) in reader.records().enumerate() {
        let record = record?;
        if row < options.skip_rows {
            continue;
        }
        if options.max_rows.is_some_and(|max| x.len() >= max) {
            break;
        }

        // whitespace-delimited files produce empty fields for repeated
        // separators
        let fields: Vec<&str> = record.iter().filter(|field| !field.is_empty()).collect();
        if fields.is_empty() {
            continue;
        }

        x.push(field_value(&fields, file.x_column, &path)? * file.x_scale);
        y.push(field_value(&fields, file.y_column, &path)? * file.y_scale);
    }

    if x.is_empty() {
        return Err(Error::EmptyData);
    }

    Ok(Series { x, y })
}

fn field_value(fields: &[&str], column: usize, path: &str) -> Result<f64> {
    let field = fields.get(column).ok_or_else(|| Error::ColumnOutOfBounds {
        column,
        path: path.to_string(),
        columns: fields.len(),
    })?;
    field
        .parse::<f64>()
        .map_err(|_| Error::InvalidNumber { value: (*field).to_string(), path: path.to_string() })
}

/// Build a figure plotting each series as a line, labeled from `labels`
/// (falling back to a numbered name).
///
/// # Errors
///
/// Returns an error if a series is empty or has mismatched lengths.
pub fn plot_series(series: &[Series], labels: &[&str]) -> Result<Figure> {
    let mut figure = Figure::new();

    for (index, series) in series.iter().enumerate() {
        let name = labels
            .get(index)
            .map_or_else(|| format!("series {}", index + 1), ToString::to_string);
        let scatter =
            Scatter::new().x(&series.x).y(&series.y).name(&name).mode("lines").build()?;
        figure.add_scatter(scatter);
    }

    Ok(figure)
}

/// Read every file and plot the extracted series in one step.
///
/// # Errors
///
/// Propagates [`read_columns`] and [`plot_series`] errors.
pub fn plot_files(
    files: &[ColumnFile],
    options: &ReaderOptions,
    labels: &[&str],
) -> Result<Figure> {
    let series = read_columns(files, options)?;
    plot_series(&series, labels)
}
