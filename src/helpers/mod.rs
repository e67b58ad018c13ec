//! Low-level readers shared by the spreadsheet parsers.

pub(crate) mod reader;
pub(crate) mod xml;
pub(crate) mod zip;
