//! Plain-text and JSON datasets
//!
//! Datasets are stored as whitespace-delimited tables: one `x t` pair per line, no header.
//! Blank lines and lines starting with `#` are skipped, so tables can carry a comment block.
//!
//! ```text
//! # x t
//! 0.00000000 0.28163725
//! 0.11111111 0.60713898
//! ```
//!
//! Output tables use the same layout with every column printed to 8 decimal places, so a
//! written training set reads back unchanged (up to that precision).
//!
//! # Example
//! ```rust
//! use polyreg::io::{format_table, read_table};
//!
//! let text = format_table(&[[0.0, 0.5], [1.0, 1.5]], 2);
//! assert_eq!(text, "0.00 0.50\n1.00 1.50\n");
//!
//! let data: Vec<(f64, f64)> = read_table(text.as_bytes()).unwrap();
//! assert_eq!(data, vec![(0.0, 0.5), (1.0, 1.5)]);
//! ```
use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Read, Write},
    path::Path,
};

use serde::de::DeserializeOwned;

use crate::{
    error::{Error, Result},
    value::Value,
};

/// Number of decimal places written by [`write_table`].
pub const TABLE_PRECISION: usize = 8;

/// Reads a two-column `x t` table.
///
/// # Errors
/// - [`Error::Io`] if reading fails.
/// - [`Error::Parse`] if a row does not have exactly two numeric columns.
pub fn read_table<T: Value>(reader: impl Read) -> Result<Vec<(T, T)>> {
    let reader = BufReader::new(reader);
    let mut data = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let row = line.trim();
        if row.is_empty() || row.starts_with('#') {
            continue;
        }

        data.push(parse_row(row, index + 1)?);
    }

    Ok(data)
}

/// Reads a two-column `x t` table from a file.
///
/// # Errors
/// See [`read_table`]. Also fails if the file cannot be opened.
pub fn read_table_file<T: Value>(path: impl AsRef<Path>) -> Result<Vec<(T, T)>> {
    let file = File::open(path.as_ref())?;
    let data = read_table(file)?;
    log::debug!("Read {} rows from {}", data.len(), path.as_ref().display());
    Ok(data)
}

/// Reads a dataset stored as a JSON array of `[x, t]` pairs.
///
/// # Errors
/// - [`Error::Io`] if the file cannot be read.
/// - [`Error::Json`] if it is not an array of number pairs.
pub fn read_json_file<T: Value + DeserializeOwned>(path: impl AsRef<Path>) -> Result<Vec<(T, T)>> {
    let file = File::open(path.as_ref())?;
    let data: Vec<(T, T)> = serde_json::from_reader(BufReader::new(file))?;
    log::debug!("Read {} pairs from {}", data.len(), path.as_ref().display());
    Ok(data)
}

/// Writes rows of values, one row per line, columns separated by single spaces.
///
/// Every value is printed with [`TABLE_PRECISION`] decimal places.
///
/// # Errors
/// Returns [`Error::Io`] if writing fails.
pub fn write_table<T, R>(writer: impl Write, rows: impl IntoIterator<Item = R>) -> Result<()>
where
    T: Value,
    R: AsRef<[T]>,
{
    let mut writer = BufWriter::new(writer);
    for row in rows {
        writeln!(writer, "{}", format_row(row.as_ref(), TABLE_PRECISION))?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes a table to a file, replacing it if it exists.
///
/// # Errors
/// Returns [`Error::Io`] if the file cannot be created or written.
pub fn write_table_file<T, R>(path: impl AsRef<Path>, rows: impl IntoIterator<Item = R>) -> Result<()>
where
    T: Value,
    R: AsRef<[T]>,
{
    let file = File::create(path.as_ref())?;
    write_table(file, rows)?;
    log::debug!("Wrote table to {}", path.as_ref().display());
    Ok(())
}

/// Formats rows of values as table text with the given number of decimal places.
#[must_use]
pub fn format_table<T, R>(rows: impl IntoIterator<Item = R>, precision: usize) -> String
where
    T: Value,
    R: AsRef<[T]>,
{
    let mut out = String::new();
    for row in rows {
        out.push_str(&format_row(row.as_ref(), precision));
        out.push('\n');
    }
    out
}

fn format_row<T: Value>(row: &[T], precision: usize) -> String {
    row.iter()
        .map(|v| format!("{v:.precision$}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn parse_row<T: Value>(row: &str, line: usize) -> Result<(T, T)> {
    let cells: Vec<&str> = row.split_whitespace().collect();
    let [x, t] = cells.as_slice() else {
        return Err(Error::Parse {
            line,
            message: format!("expected 2 columns, found {}", cells.len()),
        });
    };

    Ok((parse_cell(x, line)?, parse_cell(t, line)?))
}

fn parse_cell<T: Value>(cell: &str, line: usize) -> Result<T> {
    let value: f64 = cell.parse().map_err(|e| Error::Parse {
        line,
        message: format!("`{cell}` is not a number ({e})"),
    })?;
    if !value.is_finite() {
        return Err(Error::Parse {
            line,
            message: format!("`{cell}` is not finite"),
        });
    }
    T::try_cast(value)
}
