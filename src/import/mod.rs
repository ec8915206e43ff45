//! Delimited-text import pipeline
//!
//! `tokenizer` splits lines, `validator` checks rows, `parser` drives both
//! over a whole export, `file` is the filesystem boundary, and `report`
//! creates the resulting products in a store.

pub mod file;
pub mod number;
pub mod parser;
pub mod report;
pub mod tokenizer;
pub mod validator;

pub use file::{check_csv_file, parse_csv_file, FileCheckError, DEFAULT_MAX_FILE_SIZE};
pub use parser::{parse_csv_text, ParsedCsv};
pub use report::{dry_run_products, import_products, CreationDetail, CreationReport, CreationStatus};
pub use tokenizer::tokenize_line;
pub use validator::{validate_row, RowValidation};
