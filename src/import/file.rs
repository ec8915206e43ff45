//! Reading CSV exports from disk
//!
//! This is the boundary between the filesystem and the parser. Checks on
//! the file itself return [`FileCheckError`]; once parsing starts, every
//! failure is folded into the returned [`ParsedCsv`].

use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use thiserror::Error;
use tracing::{debug, warn};

use crate::import::parser::{parse_csv_text, ParsedCsv};

/// Default maximum accepted file size (10 MiB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Error reported when the file cannot be read or decoded
pub const ERR_READ_FILE: &str = "Erro ao ler o arquivo";

/// Reasons a file is refused before parsing
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FileCheckError {
    #[error("Arquivo deve ter extensão .csv")]
    WrongExtension,

    #[error("Arquivo muito grande. Máximo {}MB", .max_bytes / (1024 * 1024))]
    TooLarge { size: u64, max_bytes: u64 },

    #[error("Arquivo está vazio")]
    Empty,

    #[error("Erro ao ler o arquivo: {0}")]
    Unreadable(String),
}

/// Check extension and size of a CSV file before reading it
pub fn check_csv_file(path: &Path, max_bytes: u64) -> Result<(), FileCheckError> {
    let is_csv = path
        .file_name()
        .map(|name| name.to_string_lossy().to_lowercase().ends_with(".csv"))
        .unwrap_or(false);
    if !is_csv {
        return Err(FileCheckError::WrongExtension);
    }

    let size = fs::metadata(path)
        .map_err(|e| FileCheckError::Unreadable(e.to_string()))?
        .len();

    if size > max_bytes {
        return Err(FileCheckError::TooLarge { size, max_bytes });
    }
    if size == 0 {
        return Err(FileCheckError::Empty);
    }

    Ok(())
}

/// Read and parse a CSV file; never fails
///
/// Read or UTF-8 errors produce a result with the single error
/// [`ERR_READ_FILE`]. A panic while parsing is caught and reported as
/// `Erro ao processar CSV: {message}`.
pub fn parse_csv_file(path: &Path) -> ParsedCsv {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read CSV file");
            return ParsedCsv::failure(ERR_READ_FILE);
        }
    };

    debug!(path = %path.display(), bytes = text.len(), "read CSV file");
    parse_guarded(strip_bom(&text))
}

/// Parse text behind an unwind boundary
pub fn parse_guarded(text: &str) -> ParsedCsv {
    match panic::catch_unwind(AssertUnwindSafe(|| parse_csv_text(text))) {
        Ok(result) => result,
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "erro desconhecido".to_string());
            warn!(error = %message, "CSV parser panicked");
            ParsedCsv::failure(format!("Erro ao processar CSV: {}", message))
        }
    }
}

fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}
