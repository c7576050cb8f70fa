//! Record sources other than the SQLite table.

pub mod json_file;
