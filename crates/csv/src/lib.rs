//! `stockroom-csv`: comma-separated text codec.
//!
//! Converts between a header plus rows of string fields and a textual table.
//! This crate knows nothing about inventory items; the inventory crate maps
//! its records onto rows and back.
//!
//! Reading honours double-quoted fields (`""` is a literal quote, commas inside
//! quotes do not split). Writing is configurable through [`Quoting`]: the
//! legacy export writes fields verbatim, so values containing commas, quotes or
//! newlines only round-trip with [`Quoting::Minimal`].

pub mod read;
pub mod row;
pub mod write;

pub use read::{decode, parse_line};
pub use row::CsvRow;
pub use write::{encode, escape_field, ParseQuotingError, Quoting};
