//! # Formats
//!
//! On-storage representation of the record collection.

pub mod persistence;

pub use persistence::{
    WireRecord, records_from_bytes, records_to_bytes, store_from_bytes, store_to_bytes,
};
