//! In-memory model of a delimited PSM result file
//!
//! Comet writes a revision line ahead of the column header; the lines before
//! the header are carried as opaque bytes and written back verbatim, so a
//! read-modify-write cycle only ever touches the data section.

use crate::Error;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

/// On-disk layout of a PSM result file: the field separator and the number of
/// opaque lines preceding the column header.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TableFormat {
    pub delimiter: u8,
    pub preamble_rows: usize,
}

impl Default for TableFormat {
    fn default() -> Self {
        TableFormat {
            delimiter: b'\t',
            preamble_rows: 1,
        }
    }
}

/// An ordered collection of PSM rows read from a delimited text file.
///
/// Rows are kept as raw records so that columns the pipeline does not
/// understand pass through untouched.
#[derive(Debug)]
pub struct PsmTable {
    pub(crate) format: TableFormat,
    pub(crate) preamble: Vec<u8>,
    pub(crate) header: csv::ByteRecord,
    pub(crate) rows: Vec<csv::ByteRecord>,
}

impl PsmTable {
    /// Read a table from `path`, splitting off `format.preamble_rows` raw
    /// lines before handing the rest to the csv parser.
    pub fn load<P: AsRef<Path>>(path: P, format: TableFormat) -> Result<Self, Error> {
        let mut reader = BufReader::new(File::open(path)?);

        let mut preamble = Vec::new();
        for _ in 0..format.preamble_rows {
            let n = reader.read_until(b'\n', &mut preamble)?;
            if n == 0 {
                return Err(Error::MalformedInput(
                    "unexpected end of file while reading preamble".into(),
                ));
            }
        }

        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(format.delimiter)
            .has_headers(true)
            .from_reader(reader);

        let header = rdr
            .byte_headers()
            .map_err(|e| Error::MalformedInput(e.to_string()))?
            .clone();

        let mut rows = Vec::new();
        for record in rdr.byte_records() {
            rows.push(record.map_err(|e| Error::MalformedInput(e.to_string()))?);
        }
        log::trace!("- read {} rows, {} columns", rows.len(), header.len());

        Ok(PsmTable {
            format,
            preamble,
            header,
            rows,
        })
    }

    /// Replace the file at `path` with this table: preamble verbatim, then
    /// header and rows in the same delimited format.
    ///
    /// The write is destructive in place. A crash mid-write can leave a
    /// truncated file; callers own the original if they need it back.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let mut file = File::create(path)?;
        file.write_all(&self.preamble)?;

        let mut wtr = csv::WriterBuilder::new()
            .delimiter(self.format.delimiter)
            .from_writer(file);
        wtr.write_byte_record(&self.header)?;
        for row in &self.rows {
            wtr.write_byte_record(row)?;
        }
        wtr.flush()?;
        log::trace!("- wrote {} rows", self.rows.len());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[csv::ByteRecord] {
        &self.rows
    }

    /// Index of a named column, if present
    pub fn column(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|field| field == name.as_bytes())
    }

    /// Stable sort by a numeric column, highest value first. Ties keep their
    /// original relative order.
    pub fn sort_descending_by(mut self, column: &'static str) -> Result<Self, Error> {
        let ix = self.column(column).ok_or(Error::MissingColumn(column))?;

        let mut keyed = Vec::with_capacity(self.rows.len());
        for (line, row) in self.rows.drain(..).enumerate() {
            let key = parse_numeric(&row, ix, column, line)?;
            keyed.push((key, row));
        }
        keyed.sort_by(|a, b| b.0.total_cmp(&a.0));

        self.rows = keyed.into_iter().map(|(_, row)| row).collect();
        Ok(self)
    }

    /// Return a table with `values` as the named column, overwriting it if it
    /// already exists and appending it otherwise. `values` must hold one
    /// entry per row.
    pub(crate) fn with_column(mut self, name: &str, values: Vec<Vec<u8>>) -> Self {
        debug_assert_eq!(values.len(), self.rows.len());
        match self.column(name) {
            Some(ix) => {
                for (row, value) in self.rows.iter_mut().zip(&values) {
                    let mut replaced = csv::ByteRecord::new();
                    for (j, field) in row.iter().enumerate() {
                        replaced.push_field(if j == ix { value } else { field });
                    }
                    *row = replaced;
                }
            }
            None => {
                self.header.push_field(name.as_bytes());
                for (row, value) in self.rows.iter_mut().zip(&values) {
                    row.push_field(value);
                }
            }
        }
        self
    }

    /// Return a table without the named column. A no-op if the column is
    /// absent.
    pub(crate) fn drop_column(mut self, name: &str) -> Self {
        let ix = match self.column(name) {
            Some(ix) => ix,
            None => return self,
        };
        self.header = strip_field(&self.header, ix);
        for row in self.rows.iter_mut() {
            *row = strip_field(row, ix);
        }
        self
    }

    /// Keep only the rows for which `keep` returns true, preserving order
    pub(crate) fn retain<F: FnMut(&csv::ByteRecord) -> bool>(mut self, keep: F) -> Self {
        self.rows.retain(keep);
        self
    }
}

/// Parse a single field as f64, reporting the offending row on failure
pub(crate) fn parse_numeric(
    row: &csv::ByteRecord,
    ix: usize,
    column: &str,
    line: usize,
) -> Result<f64, Error> {
    let field = row.get(ix).unwrap_or_default();
    std::str::from_utf8(field)
        .ok()
        .and_then(|s| s.trim().parse::<f64>().ok())
        .ok_or_else(|| {
            Error::MalformedInput(format!(
                "row {}: expected a number in column `{}`, got `{}`",
                line + 1,
                column,
                String::from_utf8_lossy(field)
            ))
        })
}

fn strip_field(record: &csv::ByteRecord, ix: usize) -> csv::ByteRecord {
    let mut stripped = csv::ByteRecord::new();
    for (j, field) in record.iter().enumerate() {
        if j != ix {
            stripped.push_field(field);
        }
    }
    stripped
}
