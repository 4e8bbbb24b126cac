//! CSV input and output for package tables.
//!
//! - [`reader`] — loads `name`, `ecosystem`, `last_updated`, `downloads` plus any extra columns.
//! - [`writer`] — writes the input columns back out with the derived risk columns appended.

pub mod reader;
pub mod writer;
