use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};

/// In-memory copy of the row-per-delivery CSV.
///
/// Rows are kept as plain strings so columns this crate does not model
/// (season, city, winner, ...) pass through an enrichment untouched.
#[derive(Debug, Clone)]
pub struct DeliveryTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl DeliveryTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let mut table = Self { headers, rows };
        table.pad_rows();
        table
    }

    pub fn read(path: &Path) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(path)
            .with_context(|| format!("open delivery csv {}", path.display()))?;

        let headers = reader
            .headers()
            .with_context(|| format!("read csv header {}", path.display()))?
            .iter()
            .map(|h| h.to_string())
            .collect::<Vec<_>>();
        if headers.is_empty() {
            return Err(anyhow!("delivery csv {} has no header row", path.display()));
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.with_context(|| format!("read csv row {}", path.display()))?;
            rows.push(record.iter().map(|f| f.to_string()).collect());
        }

        Ok(Self::new(headers, rows))
    }

    /// Write through a sibling temp file and rename over the original, so a
    /// failed enrichment never leaves a half-written dataset behind.
    pub fn write_atomic(&self, path: &Path) -> Result<()> {
        let tmp = path.with_extension("csv.tmp");
        {
            let mut writer = csv::Writer::from_path(&tmp)
                .with_context(|| format!("create temp csv {}", tmp.display()))?;
            writer
                .write_record(&self.headers)
                .context("write csv header")?;
            for row in &self.rows {
                writer.write_record(row).context("write csv row")?;
            }
            writer.flush().context("flush csv writer")?;
        }
        fs::rename(&tmp, path)
            .with_context(|| format!("replace {} with enriched copy", path.display()))?;
        Ok(())
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Index of `name`, appending the column (empty cells) when absent.
    /// Re-running an enrichment therefore overwrites instead of duplicating.
    pub fn ensure_column(&mut self, name: &str) -> usize {
        if let Some(idx) = self.column(name) {
            return idx;
        }
        self.headers.push(name.to_string());
        for row in &mut self.rows {
            row.push(String::new());
        }
        self.headers.len() - 1
    }

    pub fn set_value(&mut self, row: usize, col: usize, value: String) {
        if let Some(cells) = self.rows.get_mut(row)
            && let Some(cell) = cells.get_mut(col)
        {
            *cell = value;
        }
    }

    pub fn value(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    // Short rows happen with flexible parsing; pad so column indices stay valid.
    fn pad_rows(&mut self) {
        let width = self.headers.len();
        for row in &mut self.rows {
            while row.len() < width {
                row.push(String::new());
            }
        }
    }
}
