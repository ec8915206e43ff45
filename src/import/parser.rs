//! Batch import of CSV text
//!
//! Drives the tokenizer and validator over a whole export and collects
//! accepted rows, row errors and counts into a [`ParsedCsv`]. Parsing never
//! fails: structural problems and bad rows are reported through the result.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::entities::csv_product::{columns, CsvProduct};
use crate::import::tokenizer::tokenize_line;
use crate::import::validator::validate_row;

/// Error when there is no header line plus at least one data line
pub const ERR_TOO_FEW_LINES: &str =
    "CSV deve ter pelo menos uma linha de cabeçalho e uma linha de dados";

/// Error when no data row was accepted and nothing else went wrong
pub const ERR_NO_VALID_ROWS: &str = "Nenhuma linha válida encontrada no CSV";

/// Result of parsing a CSV export
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedCsv {
    /// True when there are no errors and at least one valid row
    pub success: bool,
    /// Accepted rows, in input order
    pub data: Vec<CsvProduct>,
    /// Human-readable errors, in input order
    pub errors: Vec<String>,
    /// Number of data lines (header excluded)
    pub total_rows: usize,
    /// Number of accepted rows
    pub valid_rows: usize,
}

impl ParsedCsv {
    /// A failed result carrying a single error
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            errors: vec![error.into()],
            ..Self::default()
        }
    }
}

/// Parse a whole CSV text into validated rows
pub fn parse_csv_text(text: &str) -> ParsedCsv {
    let lines: Vec<&str> = text
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    debug!(lines = lines.len(), "parsing CSV text");

    if lines.len() < 2 {
        return ParsedCsv::failure(ERR_TOO_FEW_LINES);
    }

    let headers = tokenize_line(lines[0]);
    debug!(headers = ?headers, "header row");

    let missing: Vec<&str> = columns::REQUIRED
        .iter()
        .copied()
        .filter(|required| !headers.iter().any(|h| h == required))
        .collect();
    if !missing.is_empty() {
        return ParsedCsv::failure(format!(
            "Cabeçalhos obrigatórios ausentes: {}",
            missing.join(", ")
        ));
    }

    let mut result = ParsedCsv {
        total_rows: lines.len() - 1,
        ..ParsedCsv::default()
    };

    let mut skipped_variants = 0usize;
    let mut rejected_rows = 0usize;

    for (i, line) in lines.iter().enumerate().skip(1) {
        let row = CsvProduct::from_values(&headers, tokenize_line(line));

        // Variant rows leave Title blank and belong to the preceding product
        if row.title().trim().is_empty() {
            debug!(line = i, handle = row.handle(), "skipping variant row");
            skipped_variants += 1;
            continue;
        }

        let validation = validate_row(&row, i - 1);
        if validation.is_valid {
            result.data.push(row);
            result.valid_rows += 1;
        } else {
            result.errors.extend(validation.errors);
            rejected_rows += 1;
        }
    }

    debug!(
        skipped_variants,
        rejected_rows,
        valid_rows = result.valid_rows,
        "CSV parse summary"
    );

    result.success = result.errors.is_empty() && result.valid_rows > 0;
    if result.valid_rows == 0 && result.errors.is_empty() {
        result.errors.push(ERR_NO_VALID_ROWS.to_string());
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "Handle,Title,Variant Price\n\
                           prod-1,Red Shoe,49.90\n\
                           prod-1,,49.90\n\
                           prod-2,Blue Hat,abc\n\
                           prod-3,Green Bag,manual\n";

    #[test]
    fn test_end_to_end_example() {
        let result = parse_csv_text(EXAMPLE);

        assert_eq!(result.total_rows, 4);
        assert_eq!(result.valid_rows, 2);
        assert_eq!(result.data.len(), 2);
        assert_eq!(result.data[0].handle(), "prod-1");
        assert_eq!(result.data[1].handle(), "prod-3");
        assert_eq!(
            result.errors,
            vec!["Linha 4: Preço não é um número válido: \"abc\""]
        );
        assert!(!result.success);
    }

    #[test]
    fn test_all_valid_is_success() {
        let result = parse_csv_text("Handle,Title,Variant Price\na,A,1\nb,B,2");
        assert!(result.success);
        assert_eq!(result.valid_rows, 2);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_missing_title_header() {
        let result = parse_csv_text("Handle,Name,Variant Price\na,A,1");

        assert!(!result.success);
        assert_eq!(result.total_rows, 0);
        assert!(result.data.is_empty());
        assert_eq!(
            result.errors,
            vec!["Cabeçalhos obrigatórios ausentes: Title"]
        );
    }

    #[test]
    fn test_missing_headers_are_listed_together() {
        let result = parse_csv_text("handle,title\na,A");
        assert_eq!(
            result.errors,
            vec!["Cabeçalhos obrigatórios ausentes: Handle, Title, Variant Price"]
        );
    }

    #[test]
    fn test_header_only() {
        let result = parse_csv_text("Handle,Title,Variant Price\n\n   \n");

        assert!(!result.success);
        assert_eq!(result.total_rows, 0);
        assert_eq!(result.errors, vec![ERR_TOO_FEW_LINES]);
    }

    #[test]
    fn test_empty_input() {
        let result = parse_csv_text("");
        assert_eq!(result.errors, vec![ERR_TOO_FEW_LINES]);
    }

    #[test]
    fn test_variant_rows_only() {
        let result = parse_csv_text("Handle,Title,Variant Price\nh,,1\nh,  ,2");

        assert!(!result.success);
        assert_eq!(result.total_rows, 2);
        assert_eq!(result.valid_rows, 0);
        assert_eq!(result.errors, vec![ERR_NO_VALID_ROWS]);
    }

    #[test]
    fn test_no_valid_rows_message_not_added_when_errors_exist() {
        let result = parse_csv_text("Handle,Title,Variant Price\nh,T,-5");
        assert_eq!(
            result.errors,
            vec!["Linha 2: Preço não pode ser negativo: -5"]
        );
    }

    #[test]
    fn test_blank_lines_do_not_shift_line_numbers_of_remaining_lines() {
        // Blank lines are dropped before numbering
        let result = parse_csv_text("Handle,Title,Variant Price\r\n\r\nh,T,x\r\n");
        assert_eq!(result.total_rows, 1);
        assert_eq!(
            result.errors,
            vec!["Linha 2: Preço não é um número válido: \"x\""]
        );
    }

    #[test]
    fn test_price_kept_raw() {
        let result = parse_csv_text("Handle,Title,Variant Price\nh,T,\"19,90\"");
        assert!(result.success);
        assert_eq!(result.data[0].variant_price(), "19,90");
    }

    #[test]
    fn test_short_rows_padded() {
        let result = parse_csv_text("Handle,Title,Variant Price,Status\nh,T");
        assert!(result.success);
        assert_eq!(result.data[0].variant_price(), "");
        assert_eq!(result.data[0].status(), Some(""));
    }

    #[test]
    fn test_missing_handle_reported() {
        let result = parse_csv_text("Handle,Title,Variant Price\n,Lonely,1");
        assert_eq!(
            result.errors,
            vec!["Linha 2: Handle é obrigatório e deve ser uma string válida"]
        );
    }

    #[test]
    fn test_json_field_names() {
        let value = serde_json::to_value(parse_csv_text(EXAMPLE)).unwrap();
        assert_eq!(value["totalRows"], 4);
        assert_eq!(value["validRows"], 2);
        assert_eq!(value["data"][0]["Title"], "Red Shoe");
    }
}
