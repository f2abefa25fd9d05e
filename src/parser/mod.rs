//! Delimited text parsing for float profile files
//!
//! - [`line`] - splits one CSV line into fields, honouring quotes
//! - [`reader`] - streams a file line by line into header-keyed [`RawRow`]s

pub mod line;
pub mod reader;

pub use line::split_line;
pub use reader::{RawRow, read_rows};
