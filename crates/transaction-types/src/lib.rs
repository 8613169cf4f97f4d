//! Transaction record model for tx-feed.
//!
//! Coerces raw source rows into strictly-typed transaction records and
//! encodes them as the JSON payload published to the broker. Every column
//! must be present and coercible to its declared type; a malformed or
//! missing column fails the whole row with [`RowCoercionError`] rather than
//! producing a partial record.

mod error;
mod record;

pub use error::{Result, RowCoercionError};
pub use record::TransactionRecord;
