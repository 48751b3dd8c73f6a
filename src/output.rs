//! Output formatting and persistence for flattened positions.
//!
//! Supports pretty JSON logging and CSV write/append.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info};

use crate::normalize::{COLUMNS, FlatRecord};
use crate::query::WriteMode;
use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Logs any serializable value as pretty-printed JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Writes `records` as CSV rows to `path`, creating the file if needed.
///
/// [`WriteMode::Write`] truncates the file and writes the header row first.
/// [`WriteMode::Append`] keeps existing rows and writes no header. Rows are
/// serialized in memory before the file is opened, so a record that cannot be
/// written leaves the file untouched. The file is closed before returning.
pub fn write_records(path: impl AsRef<Path>, mode: WriteMode, records: &[FlatRecord]) -> Result<()> {
    let path = path.as_ref();
    debug!(
        path = %path.display(),
        file_exists = path.exists(),
        %mode,
        records = records.len(),
        "Writing CSV records"
    );

    // the header is written by hand so an empty write still gets one
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(Vec::new());
    if mode == WriteMode::Write {
        writer.write_record(COLUMNS)?;
    }
    for record in records {
        writer.serialize(record)?;
    }
    let rows = writer.into_inner().map_err(|e| e.into_error())?;

    let mut file = match mode {
        WriteMode::Write => OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?,
        WriteMode::Append => OpenOptions::new().append(true).create(true).open(path)?,
    };
    file.write_all(&rows)?;
    file.flush()?;

    Ok(())
}
