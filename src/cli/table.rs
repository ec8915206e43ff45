//! Table and delimited output for CLI commands
//!
//! Human-readable previews use `tabled`; CSV and TSV output goes through
//! the `csv` writer so values are quoted correctly for spreadsheets.

use std::io::Write;

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::cli::helpers::{format_cents, truncate_str};
use crate::cli::OutputFormat;
use crate::entities::{CreateProduct, CsvProduct};

/// Width for long text columns in previews
const TEXT_WIDTH: usize = 40;

#[derive(Tabled)]
struct RowPreview {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Handle")]
    handle: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Status")]
    status: String,
}

#[derive(Tabled)]
struct ProductPreview {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Original")]
    original: String,
    #[tabled(rename = "Colors")]
    colors: usize,
    #[tabled(rename = "Images")]
    images: usize,
}

fn or_dash(s: &str) -> String {
    if s.is_empty() {
        "-".to_string()
    } else {
        s.to_string()
    }
}

/// Preview table of accepted CSV rows
pub fn rows_table(rows: &[CsvProduct]) -> String {
    let preview: Vec<RowPreview> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| RowPreview {
            index: i + 1,
            handle: truncate_str(row.handle(), TEXT_WIDTH),
            title: truncate_str(row.title(), TEXT_WIDTH),
            price: or_dash(row.variant_price()),
            status: or_dash(row.status().unwrap_or("")),
        })
        .collect();

    Table::new(preview).with(Style::rounded()).to_string()
}

/// Preview table of products about to be created
pub fn products_table(products: &[CreateProduct]) -> String {
    let preview: Vec<ProductPreview> = products
        .iter()
        .map(|p| ProductPreview {
            name: truncate_str(&p.name, TEXT_WIDTH),
            price: format_cents(p.sale_price),
            original: format_cents(p.original_price),
            colors: p.colors.as_ref().map(Vec::len).unwrap_or(0),
            images: p.images.len(),
        })
        .collect();

    Table::new(preview).with(Style::rounded()).to_string()
}

/// Write rows as CSV or TSV, header first
///
/// All rows of one parse share the same columns, so the header is taken
/// from the first row. Nothing is written for an empty slice.
pub fn write_rows<W: Write>(rows: &[CsvProduct], format: OutputFormat, out: W) -> csv::Result<()> {
    let delimiter = if format == OutputFormat::Tsv { b'\t' } else { b',' };
    let mut writer = csv::WriterBuilder::new().delimiter(delimiter).from_writer(out);

    if let Some(first) = rows.first() {
        writer.write_record(first.iter().map(|(column, _)| column))?;
        for row in rows {
            writer.write_record(row.iter().map(|(_, value)| value))?;
        }
    }

    writer.flush()?;
    Ok(())
}
