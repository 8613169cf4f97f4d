//! The transaction record and its row coercion.

use crate::error::{Result, RowCoercionError};
use serde::{Deserialize, Serialize};
use tx_feed_csv_source::SourceRow;

/// One credit-card transaction reshaped from a source row.
///
/// Field order matters: serde serializes fields in declaration order, which
/// matches the column order of the source dataset and the shape the
/// downstream dashboard consumer parses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Row ordinal from the source file.
    pub id: i64,
    /// Transaction timestamp as text, unparsed.
    pub trans_date_trans_time: String,
    /// Account identifier.
    pub cc_num: i64,
    pub merchant: String,
    pub category: String,
    /// Transaction amount.
    pub amt: f64,
    pub first: String,
    pub last: String,
    pub gender: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: i64,
    pub lat: f64,
    pub long: f64,
    pub city_pop: i64,
    pub job: String,
    /// Date of birth as text, unparsed.
    pub dob: String,
    /// Transaction identifier.
    pub trans_num: String,
    /// Event epoch seconds.
    pub unix_time: i64,
    pub merch_lat: f64,
    pub merch_long: f64,
    /// Fraud label, 0 or 1.
    pub is_fraud: i64,
}

impl TransactionRecord {
    /// Build a record from one source row.
    ///
    /// Fails on the first missing or non-coercible column; no defaulting,
    /// no partial record.
    pub fn from_row(row: &SourceRow) -> Result<Self> {
        Ok(Self {
            id: int_column(row, "id")?,
            trans_date_trans_time: string_column(row, "trans_date_trans_time")?,
            cc_num: int_column(row, "cc_num")?,
            merchant: string_column(row, "merchant")?,
            category: string_column(row, "category")?,
            amt: float_column(row, "amt")?,
            first: string_column(row, "first")?,
            last: string_column(row, "last")?,
            gender: string_column(row, "gender")?,
            street: string_column(row, "street")?,
            city: string_column(row, "city")?,
            state: string_column(row, "state")?,
            zip: int_column(row, "zip")?,
            lat: float_column(row, "lat")?,
            long: float_column(row, "long")?,
            city_pop: int_column(row, "city_pop")?,
            job: string_column(row, "job")?,
            dob: string_column(row, "dob")?,
            trans_num: string_column(row, "trans_num")?,
            unix_time: int_column(row, "unix_time")?,
            merch_lat: float_column(row, "merch_lat")?,
            merch_long: float_column(row, "merch_long")?,
            is_fraud: int_column(row, "is_fraud")?,
        })
    }

    /// Serialize to the UTF-8 JSON payload published to the broker.
    ///
    /// The broker's message framing supplies the length prefix; the payload
    /// itself is plain JSON text.
    pub fn to_payload(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Message key for the broker: the row ordinal as text.
    pub fn key(&self) -> String {
        self.id.to_string()
    }
}

fn string_column(row: &SourceRow, column: &str) -> Result<String> {
    row.get(column)
        .map(str::to_string)
        .ok_or_else(|| RowCoercionError::MissingColumn(column.to_string()))
}

fn int_column(row: &SourceRow, column: &str) -> Result<i64> {
    let raw = row
        .get(column)
        .ok_or_else(|| RowCoercionError::MissingColumn(column.to_string()))?;

    raw.parse().map_err(|_| RowCoercionError::InvalidInteger {
        column: column.to_string(),
        value: raw.to_string(),
    })
}

fn float_column(row: &SourceRow, column: &str) -> Result<f64> {
    let raw = row
        .get(column)
        .ok_or_else(|| RowCoercionError::MissingColumn(column.to_string()))?;

    raw.parse().map_err(|_| RowCoercionError::InvalidFloat {
        column: column.to_string(),
        value: raw.to_string(),
    })
}
