//! Serialization helpers for result records.

mod csv;

pub use csv::zone_table_csv;
