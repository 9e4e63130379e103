// File: crates/timing-plot/src/table.rs
// Summary: Results table loader; every CSV column is kept and addressed by header name.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::PlotError;

/// CSV cells keyed by header, all columns of equal length (one entry per data row).
/// Cells stay as text until a column is looked up, so unreferenced columns may hold anything.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultsTable {
    origin: PathBuf,
    headers: Vec<String>,
    cells: Vec<Vec<String>>,
    rows: usize,
}

impl ResultsTable {
    /// Read a headed CSV file. Column order in the file does not matter.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PlotError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| PlotError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_reader(file, path)?;
        info!(
            path = %path.display(),
            rows = table.row_count(),
            columns = table.headers.len(),
            "loaded results table"
        );
        Ok(table)
    }

    /// Read CSV text from `reader`; `origin` only names the source in errors.
    pub fn from_reader<R: Read>(reader: R, origin: &Path) -> Result<Self, PlotError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr
            .headers()
            .map_err(|e| csv_error(origin, e))?
            .iter()
            .map(str::to_string)
            .collect::<Vec<_>>();
        debug!(?headers, "results headers");

        let mut cells = vec![Vec::new(); headers.len()];
        let mut rows = 0usize;
        for rec in rdr.records() {
            let rec = rec.map_err(|e| csv_error(origin, e))?;
            rows += 1;
            for (column, cell) in cells.iter_mut().zip(rec.iter()) {
                column.push(cell.to_string());
            }
        }
        Ok(Self { origin: origin.to_path_buf(), headers, cells, rows })
    }

    /// Values of the column named `name`, in row order.
    /// Fails with [`PlotError::Schema`] if absent and [`PlotError::Parse`] on the first non-numeric cell.
    pub fn column(&self, name: &str) -> Result<Vec<f64>, PlotError> {
        let index = self.headers.iter().position(|h| h == name).ok_or_else(|| PlotError::Schema {
            column: name.to_string(),
            available: self.headers.clone(),
        })?;
        self.cells[index]
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                parse_cell(cell).ok_or_else(|| PlotError::Parse {
                    path: self.origin.clone(),
                    row: i + 1,
                    column: name.to_string(),
                    value: cell.clone(),
                })
            })
            .collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    pub fn column_names(&self) -> &[String] {
        &self.headers
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }
}

// Empty cells load as NaN and later show up as gaps in the line.
fn parse_cell(cell: &str) -> Option<f64> {
    if cell.is_empty() {
        return Some(f64::NAN);
    }
    cell.parse::<f64>().ok()
}

// Read failures underneath the CSV layer count as file access problems.
fn csv_error(path: &Path, source: csv::Error) -> PlotError {
    if let csv::ErrorKind::Io(io) = source.kind() {
        return PlotError::FileAccess {
            path: path.to_path_buf(),
            source: std::io::Error::new(io.kind(), io.to_string()),
        };
    }
    PlotError::Csv { path: path.to_path_buf(), source }
}
