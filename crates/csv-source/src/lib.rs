//! CSV transaction source for tx-feed
//!
//! This crate reads a delimited transaction file fully into memory as a
//! sequence of rows with named columns, preserving file order. The first
//! column of the source dataset is an unnamed pandas index column holding
//! the 0-based row ordinal; it is normalized to the `id` column here.

mod loader;

pub use loader::{load, load_from_reader, SourceRow};
