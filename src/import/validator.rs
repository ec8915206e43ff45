//! Row validation for product import
//!
//! A row is accepted only when every rule passes. A bad price rejects the
//! whole row even if Handle and Title are fine.

use serde::Serialize;
use tracing::{debug, trace};

use crate::entities::csv_product::{columns, CsvProduct};
use crate::import::number::{comma_to_dot, parse_float_prefix};

/// Price sentinel meaning "price to be defined later"
pub const MANUAL_PRICE: &str = "manual";

/// Outcome of validating one row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RowValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// Whether a price cell defers pricing (absent, blank or `manual`)
pub fn is_deferred_price(price: Option<&str>) -> bool {
    match price {
        None => true,
        Some(p) => p.trim().is_empty() || p.to_lowercase() == MANUAL_PRICE,
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map(|v| v.trim().is_empty()).unwrap_or(true)
}

/// Validate a row; `line_number` is the zero-based data row index
///
/// Messages refer to `line_number + 2`, the 1-based source line counting
/// the header.
pub fn validate_row(row: &CsvProduct, line_number: usize) -> RowValidation {
    let line = line_number + 2;
    let mut errors = Vec::new();

    trace!(
        line,
        handle = row.handle(),
        title = row.title(),
        "validating row"
    );

    if is_blank(row.get(columns::HANDLE)) {
        errors.push(format!(
            "Linha {}: Handle é obrigatório e deve ser uma string válida",
            line
        ));
    }

    if is_blank(row.get(columns::TITLE)) {
        errors.push(format!(
            "Linha {}: Title é obrigatório para produtos principais",
            line
        ));
    }

    let price = row.get(columns::VARIANT_PRICE);
    match price {
        Some(raw) if !is_deferred_price(price) => match parse_float_prefix(&comma_to_dot(raw)) {
            None => errors.push(format!(
                "Linha {}: Preço não é um número válido: \"{}\"",
                line, raw
            )),
            Some(value) if value < 0.0 => errors.push(format!(
                "Linha {}: Preço não pode ser negativo: {}",
                line, value
            )),
            Some(value) => trace!(line, price = value, "price ok"),
        },
        _ => trace!(line, "no price, deferred"),
    }

    let is_valid = errors.is_empty();
    if !is_valid {
        debug!(line, errors = ?errors, "row rejected");
    }

    RowValidation { is_valid, errors }
}
