use std::io::Read;
use std::path::Path;

use midtrade_models::{DisputeRecord, Side, TradeRecord};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::DataError;

const DISPUTE_COLUMNS: [&str; 5] = ["dispnum", "styear", "stabb", "orig", "sidea"];
const TRADE_COLUMNS: [&str; 5] = ["importer1", "importer2", "year", "flow1", "flow2"];

/// Rows parsed from one CSV file, plus the number of rows that could not be
/// coerced into records.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    pub records: Vec<T>,
    pub skipped: usize,
}

/// Raw MIDB participant row. Every field arrives as text and is coerced here.
#[derive(Debug, Deserialize)]
struct DisputeRow {
    dispnum: String,
    styear: String,
    stabb: String,
    orig: String,
    sidea: String,
}

impl DisputeRow {
    fn into_record(self) -> Option<DisputeRecord> {
        let country = self.stabb.trim();
        if country.is_empty() {
            return None;
        }
        Some(DisputeRecord {
            dispute_id: self.dispnum.trim().parse().ok()?,
            start_year: self.styear.trim().parse().ok()?,
            country: country.to_string(),
            originator: self.orig.trim() == "1",
            side: if self.sidea.trim() == "1" {
                Side::A
            } else {
                Side::B
            },
        })
    }
}

/// Raw COW dyadic row.
#[derive(Debug, Deserialize)]
struct TradeRow {
    importer1: String,
    importer2: String,
    year: String,
    flow1: String,
    flow2: String,
}

impl TradeRow {
    fn into_record(self) -> Option<TradeRecord> {
        let flow1: f64 = self.flow1.trim().parse().ok()?;
        let flow2: f64 = self.flow2.trim().parse().ok()?;
        if !flow1.is_finite() || !flow2.is_finite() {
            return None;
        }
        Some(TradeRecord {
            country1: self.importer1.trim().to_string(),
            country2: self.importer2.trim().to_string(),
            year: self.year.trim().parse().ok()?,
            flow1,
            flow2,
        })
    }
}

/// Parse a MIDB participant CSV.
pub fn read_disputes<R: Read>(reader: R) -> Result<Loaded<DisputeRecord>, DataError> {
    let rdr = reader_builder().from_reader(reader);
    read_rows(rdr, "dispute", &DISPUTE_COLUMNS, DisputeRow::into_record)
}

/// Parse a COW dyadic trade CSV.
pub fn read_trades<R: Read>(reader: R) -> Result<Loaded<TradeRecord>, DataError> {
    let rdr = reader_builder().from_reader(reader);
    read_rows(rdr, "trade", &TRADE_COLUMNS, TradeRow::into_record)
}

pub fn open_disputes(path: impl AsRef<Path>) -> Result<Loaded<DisputeRecord>, DataError> {
    let rdr = reader_builder().from_path(path)?;
    read_rows(rdr, "dispute", &DISPUTE_COLUMNS, DisputeRow::into_record)
}

pub fn open_trades(path: impl AsRef<Path>) -> Result<Loaded<TradeRecord>, DataError> {
    let rdr = reader_builder().from_path(path)?;
    read_rows(rdr, "trade", &TRADE_COLUMNS, TradeRow::into_record)
}

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.trim(csv::Trim::Headers);
    builder
}

fn read_rows<R, Row, T>(
    mut rdr: csv::Reader<R>,
    dataset: &'static str,
    columns: &[&'static str],
    convert: fn(Row) -> Option<T>,
) -> Result<Loaded<T>, DataError>
where
    R: Read,
    Row: DeserializeOwned,
{
    let headers = rdr.headers()?.clone();
    for column in columns {
        if !headers.iter().any(|h| h == *column) {
            return Err(DataError::MissingColumn { dataset, column });
        }
    }

    let mut records = Vec::new();
    let mut skipped = 0;

    for (index, result) in rdr.deserialize::<Row>().enumerate() {
        let row = match result {
            Ok(row) => row,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                warn!(dataset, row = index + 1, error = %e, "Skipping unreadable row");
                skipped += 1;
                continue;
            }
        };
        match convert(row) {
            Some(record) => records.push(record),
            None => {
                debug!(dataset, row = index + 1, "Skipping row with non-numeric fields");
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        warn!(dataset, skipped, "Some rows could not be parsed");
    }

    Ok(Loaded { records, skipped })
}
