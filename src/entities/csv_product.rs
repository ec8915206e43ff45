//! CSV product row - one data line of a Shopify-style product export

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Column names of the product export format
pub mod columns {
    pub const HANDLE: &str = "Handle";
    pub const TITLE: &str = "Title";
    pub const BODY_HTML: &str = "Body (HTML)";
    pub const VARIANT_PRICE: &str = "Variant Price";
    pub const VARIANT_COMPARE_AT_PRICE: &str = "Variant Compare At Price";
    pub const IMAGE_SRC: &str = "Image Src";
    pub const OPTION1_VALUE: &str = "Option1 Value";
    pub const COLOR_PATTERN: &str = "Cor (product.metafields.shopify.color-pattern)";
    pub const MAKEUP_SHADE: &str =
        "Tonalidade da maquiagem (product.metafields.shopify.makeup-color-shade)";
    pub const INVENTORY_QTY: &str = "Variant Inventory Qty";
    pub const STATUS: &str = "Status";

    /// Headers every import file must carry
    pub const REQUIRED: [&str; 3] = [HANDLE, TITLE, VARIANT_PRICE];

    /// Columns understood by the product mapper, in export order
    pub const KNOWN: [&str; 11] = [
        HANDLE,
        TITLE,
        BODY_HTML,
        VARIANT_PRICE,
        VARIANT_COMPARE_AT_PRICE,
        IMAGE_SRC,
        OPTION1_VALUE,
        COLOR_PATTERN,
        MAKEUP_SHADE,
        INVENTORY_QTY,
        STATUS,
    ];
}

/// A raw CSV row: header name to raw (trimmed) value, in header order
///
/// Values are kept exactly as tokenized. Price normalization happens only
/// when a row is mapped to a product, never in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CsvProduct {
    fields: IndexMap<String, String>,
}

impl CsvProduct {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Zip tokenized values against the header sequence by position
    ///
    /// Missing trailing values become empty strings; extra values are dropped.
    /// A repeated header keeps its first position and takes the later value.
    pub fn from_values(headers: &[String], values: Vec<String>) -> Self {
        let mut values = values.into_iter();
        let fields = headers
            .iter()
            .map(|header| (header.clone(), values.next().unwrap_or_default()))
            .collect();
        Self { fields }
    }

    /// Raw value of a column, if the column exists
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Raw value of a column, empty when the column is absent
    pub fn value(&self, column: &str) -> &str {
        self.get(column).unwrap_or("")
    }

    /// Set a column value, appending the column if new
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(column.into(), value.into());
    }

    /// Iterate columns in header order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn handle(&self) -> &str {
        self.value(columns::HANDLE)
    }

    pub fn title(&self) -> &str {
        self.value(columns::TITLE)
    }

    pub fn body_html(&self) -> &str {
        self.value(columns::BODY_HTML)
    }

    pub fn variant_price(&self) -> &str {
        self.value(columns::VARIANT_PRICE)
    }

    pub fn compare_at_price(&self) -> &str {
        self.value(columns::VARIANT_COMPARE_AT_PRICE)
    }

    pub fn image_src(&self) -> &str {
        self.value(columns::IMAGE_SRC)
    }

    pub fn option1_value(&self) -> &str {
        self.value(columns::OPTION1_VALUE)
    }

    pub fn color_pattern(&self) -> &str {
        self.value(columns::COLOR_PATTERN)
    }

    pub fn makeup_shade(&self) -> &str {
        self.value(columns::MAKEUP_SHADE)
    }

    pub fn inventory_qty(&self) -> &str {
        self.value(columns::INVENTORY_QTY)
    }

    pub fn status(&self) -> Option<&str> {
        self.get(columns::STATUS)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CsvProduct {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
