//src/table.rs

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use ahash::AHashMap;
use flate2::read::MultiGzDecoder;

use crate::error::{AggregateError, Result};

/// Open a SqueezeMeta table for line reading. Supports `.gz`.
pub fn open_table<P: AsRef<Path>>(path: P) -> Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    let f = File::open(path)?;

    let is_gz = path
        .extension()
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    let reader: Box<dyn BufRead> = if is_gz {
        Box::new(BufReader::new(MultiGzDecoder::new(f)))
    } else {
        Box::new(BufReader::new(f))
    };
    Ok(reader)
}

/// Read one line into `line` without its terminator. Returns false at EOF.
pub fn read_record(reader: &mut dyn BufRead, line: &mut String) -> Result<bool> {
    line.clear();
    if reader.read_line(line)? == 0 {
        return Ok(false);
    }
    let trimmed = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed);
    Ok(true)
}

/// Split a record into cells.
pub fn split_cells(line: &str) -> Vec<&str> {
    line.split('\t').collect()
}

/// Cell at `idx`; cells missing from a short row read as empty.
#[inline]
pub fn cell<'a>(cells: &[&'a str], idx: usize) -> &'a str {
    cells.get(idx).copied().unwrap_or("")
}

/// A header line with name -> index lookup.
pub struct TableHeader {
    path: PathBuf,
    names: Vec<String>,
    index: AHashMap<String, usize>,
}

impl TableHeader {
    /// Skip the leading comment line and parse the header.
    pub fn read(reader: &mut dyn BufRead, path: &Path) -> Result<Self> {
        let mut line = String::new();
        for _ in 0..2 {
            if !read_record(reader, &mut line)? {
                return Err(AggregateError::EmptyTable {
                    path: path.to_path_buf(),
                });
            }
        }
        Ok(Self::from_line(&line, path))
    }

    pub fn from_line(line: &str, path: &Path) -> Self {
        let names: Vec<String> = line.trim().split('\t').map(str::to_string).collect();
        let index = names
            .iter()
            .enumerate()
            .map(|(i, h)| (h.clone(), i))
            .collect();
        Self {
            path: path.to_path_buf(),
            names,
            index,
        }
    }

    /// Index of an exactly-named column.
    pub fn require(&self, column: &str) -> Result<usize> {
        self.index
            .get(column)
            .copied()
            .ok_or_else(|| AggregateError::MissingColumn {
                column: column.to_string(),
                path: self.path.clone(),
            })
    }

    /// `(index, header)` of every column whose name contains `label`, in header order.
    pub fn matching(&self, label: &str) -> Vec<(usize, &str)> {
        self.names
            .iter()
            .enumerate()
            .filter(|(_, h)| h.contains(label))
            .map(|(i, h)| (i, h.as_str()))
            .collect()
    }

    /// Sample names implied by the columns labelled `prefix` (e.g. "Raw read count").
    pub fn sample_names(&self, prefix: &str) -> Vec<String> {
        let full = format!("{} ", prefix);
        self.matching(prefix)
            .into_iter()
            .map(|(_, h)| h.replace(&full, ""))
            .collect()
    }

    /// Columns labelled `prefix`, one per entry of `samples` and in that order.
    ///
    /// Fails with `MissingColumn` if some sample has no `<prefix> <sample>` column.
    pub fn sample_columns(&self, prefix: &str, samples: &[String]) -> Result<Vec<(usize, &str)>> {
        let full = format!("{} ", prefix);
        let by_sample: AHashMap<String, (usize, &str)> = self
            .matching(prefix)
            .into_iter()
            .map(|(i, h)| (h.replace(&full, ""), (i, h)))
            .collect();
        samples
            .iter()
            .map(|sample| {
                by_sample
                    .get(sample)
                    .copied()
                    .ok_or_else(|| AggregateError::MissingColumn {
                        column: format!("{}{}", full, sample),
                        path: self.path.clone(),
                    })
            })
            .collect()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

/// Parse an integer count cell.
pub fn parse_count(value: &str, column: &str, line: usize) -> Result<f64> {
    value
        .trim()
        .parse::<u64>()
        .map(|v| v as f64)
        .map_err(|_| invalid(value, column, line))
}

/// Parse a floating-point cell.
pub fn parse_float(value: &str, column: &str, line: usize) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| invalid(value, column, line))
}

fn invalid(value: &str, column: &str, line: usize) -> AggregateError {
    AggregateError::InvalidNumber {
        column: column.to_string(),
        value: value.to_string(),
        line,
    }
}
