//! CSV export of merged search results.

use std::collections::HashSet;
use std::fs::File;
use std::io;
use std::path::Path;

use anyhow::Context;

use fareprobe_core::{FieldValue, Record, UNAVAILABLE};

/// Union of the field names of `records`, in first-seen order.
pub(crate) fn headers(records: &[Record]) -> Vec<&str> {
    let mut seen = HashSet::new();
    records
        .iter()
        .flat_map(Record::headers)
        .filter(|name| seen.insert(*name))
        .collect()
}

/// Write `records` as CSV. Cells for fields a record lacks are written as
/// `N/A`. Nothing at all is written when there are no records.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
pub(crate) fn write_records<W: io::Write>(writer: W, records: &[Record]) -> anyhow::Result<()> {
    let headers = headers(records);
    let mut csv = csv::Writer::from_writer(writer);
    if !headers.is_empty() {
        csv.write_record(&headers)?;
        for record in records {
            csv.write_record(
                headers
                    .iter()
                    .map(|name| record.get(name).map_or(UNAVAILABLE, FieldValue::as_str)),
            )?;
        }
    }
    csv.flush()?;
    Ok(())
}

/// Write `records` to `path`, creating its parent directory if needed.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be created or written.
pub(crate) fn write_csv(path: &Path, records: &[Record]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    write_records(file, records).with_context(|| format!("failed to write {}", path.display()))
}
