//! CSV import and export of record sets

use super::{RecordSet, Value};
use crate::error::Result;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Load a record set from a CSV file with a header row
pub fn load_records(path: &Path) -> Result<RecordSet> {
    let file = File::open(path)?;
    let records = load_records_from_reader(file)?;
    log::info!(
        "Loaded {} records with {} columns from {}",
        records.len(),
        records.columns().len(),
        path.display()
    );
    Ok(records)
}

/// Load a record set from any CSV reader
pub fn load_records_from_reader<R: Read>(reader: R) -> Result<RecordSet> {
    let mut reader = csv::Reader::from_reader(reader);
    let columns: Vec<String> = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();

    let mut records = RecordSet::new(columns);
    for result in reader.records() {
        let record = result?;
        records.push_row(record.iter().map(Value::parse).collect())?;
    }

    Ok(records)
}

/// Write a record set as CSV with a header row
pub fn write_records<W: Write>(records: &RecordSet, writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(records.columns())?;
    for row in records.rows() {
        writer.write_record(row.iter().map(|v| v.label()))?;
    }
    writer.flush()?;
    Ok(())
}
