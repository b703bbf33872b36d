//! Import av elevlistor från kalkylblad
//!
//! Själva kalkylbladsformatet hanteras av en [`SpreadsheetParser`];
//! importern arbetar på rader nycklade på kolumnrubrik.

pub mod importer;
pub mod parser;
pub mod workbook;

pub use importer::{parse_class_token, ImportResult, RosterImporter};
pub use parser::{JsonRowsParser, RosterRow, SpreadsheetParser};
pub use workbook::XlsxParser;
