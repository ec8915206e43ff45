//! Amazon JSON import
//!
//! Maps items scraped from Amazon Brasil search pages (one JSON object per
//! result, keyed by the CSS class the value was scraped from) to catalog
//! products. Items without a usable name or price are skipped.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};
use unicode_normalization::UnicodeNormalization;

use crate::core::store::ProductStore;
use crate::entities::product::{CreateProduct, InfoSection, ProductImage};
use crate::import::number::{comma_to_dot, parse_float_prefix, to_cents};

/// Scraped field keys
pub mod keys {
    pub const SIZE_BASE: &str = "a-size-base";
    pub const SIZE_BASE_PLUS: &str = "a-size-base-plus";
    pub const IMAGE_SRC: &str = "s-image src";
    pub const OFFSCREEN_PRICE: &str = "a-offscreen";
    pub const PRICE_WHOLE: &str = "a-price-whole";
    pub const PRICE_FRACTION: &str = "a-price-fraction";
    pub const LINK: &str = "a-link-normal href";
    pub const RATING: &str = "a-icon-alt";
    pub const REVIEW_COUNT: &str = "a-size-small (2)";
    pub const BADGE: &str = "a-badge-text";
    pub const POPULARITY: &str = "a-size-base (2)";
}

/// Category used when no keyword matches
pub const DEFAULT_CATEGORY: &str = "Geral";

const IMPORT_FOOTER: &str = "**Produto importado do Amazon Brasil**";

/// Reasons an item cannot be read
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmazonError {
    #[error("item não é um objeto JSON")]
    NotAnObject,
}

/// One scraped item: field key to text
///
/// Empty strings read as absent, like blank cells on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AmazonItem {
    fields: IndexMap<String, String>,
}

impl AmazonItem {
    /// Read an item from a JSON object; non-string values are stringified
    pub fn from_value(value: &Value) -> Result<Self, AmazonError> {
        let object = value.as_object().ok_or(AmazonError::NotAnObject)?;
        let fields = object
            .iter()
            .filter_map(|(k, v)| {
                let text = match v {
                    Value::Null => return None,
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                Some((k.clone(), text))
            })
            .collect();
        Ok(Self { fields })
    }

    /// Non-empty value of a field
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Product name, preferring the larger title text
    pub fn name(&self) -> Option<&str> {
        self.get(keys::SIZE_BASE_PLUS)
            .or_else(|| self.get(keys::SIZE_BASE))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AmazonItem {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Price in cents from text like `"R$ 181,01"`; 0 when unreadable
pub fn extract_price(raw: &str) -> i64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();
    parse_float_prefix(&comma_to_dot(&cleaned))
        .and_then(to_cents)
        .unwrap_or(0)
}

/// First run of digits and commas in `s`
fn first_number_run(s: &str) -> Option<&str> {
    let is_part = |c: char| c.is_ascii_digit() || c == ',';
    let start = s.find(is_part)?;
    let len = s[start..].find(|c: char| !is_part(c)).unwrap_or(s.len() - start);
    Some(&s[start..start + len])
}

/// Star rating from text like `"4,6 de 5 estrelas"`; 0 when absent
pub fn extract_rating(raw: &str) -> f64 {
    first_number_run(raw)
        .and_then(|run| parse_float_prefix(&comma_to_dot(run)))
        .unwrap_or(0.0)
}

/// Review count from text like `"(279)"` or `"(14,5 mil)"`; 0 when absent
pub fn extract_review_count(raw: &str) -> u64 {
    let clean: String = raw.chars().filter(|c| *c != '(' && *c != ')').collect();

    if clean.contains("mil") {
        let number: String = clean
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == ',')
            .collect();
        return parse_float_prefix(&comma_to_dot(&number))
            .map(|n| (n * 1000.0).round() as u64)
            .unwrap_or(0);
    }

    let digits: String = clean.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

/// URL slug: lowercase ASCII words joined by dashes, accents removed
pub fn generate_slug(name: &str) -> String {
    let folded: String = name
        .to_lowercase()
        .nfd()
        .filter(|c| !('\u{0300}'..='\u{036f}').contains(c))
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() || *c == '-')
        .collect();

    let mut slug = String::with_capacity(folded.len());
    for c in folded.chars() {
        let c = if c.is_whitespace() { '-' } else { c };
        if c == '-' && slug.ends_with('-') {
            continue;
        }
        slug.push(c);
    }
    slug.trim().to_string()
}

/// Catalog category guessed from keywords in the product name
pub fn detect_category(name: &str) -> &'static str {
    let lower = name.to_lowercase();
    let has = |word: &str| lower.contains(word);

    if has("body splash") || has("perfume") || has("fragrance") {
        "Perfumes e Fragrâncias"
    } else if has("victoria") && has("secret") {
        "Victoria's Secret"
    } else if has("maquiagem") || has("makeup") {
        "Maquiagem"
    } else if has("cuidados") || has("skincare") {
        "Cuidados Pessoais"
    } else {
        DEFAULT_CATEGORY
    }
}

/// Format an integer with `.` thousands separators (pt-BR)
fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

fn is_navigation_text(name: &str) -> bool {
    name.contains("Resultados") || name.contains("Consulte as páginas")
}

/// Map one scraped item to a product
///
/// Returns `None` for items without a name, page navigation text, or
/// without a readable price.
pub fn map_amazon_to_product(item: &AmazonItem) -> Option<CreateProduct> {
    let name = item.name().filter(|n| !n.trim().is_empty())?;
    if is_navigation_text(name) {
        return None;
    }

    let full_price = format!(
        "{}{}",
        item.get(keys::PRICE_WHOLE).unwrap_or(""),
        item.get(keys::PRICE_FRACTION).unwrap_or("00")
    );
    let price = extract_price(item.get(keys::OFFSCREEN_PRICE).unwrap_or(full_price.as_str()));
    if price == 0 {
        return None;
    }

    let rating = extract_rating(item.get(keys::RATING).unwrap_or(""));
    let review_count = extract_review_count(item.get(keys::REVIEW_COUNT).unwrap_or(""));
    let category = detect_category(name);

    let mut description = format!("{}\n\n", name);
    if category != DEFAULT_CATEGORY {
        description.push_str(&format!("**Categoria:** {}\n", category));
    }
    if rating > 0.0 {
        description.push_str(&format!("**Avaliação:** {} de 5 estrelas\n", rating));
    }
    if review_count > 0 {
        description.push_str(&format!(
            "**Número de avaliações:** {}\n",
            format_thousands(review_count)
        ));
    }
    if let Some(popularity) = item.get(keys::POPULARITY) {
        description.push_str(&format!("**Popularidade:** {}\n", popularity));
    }
    if let Some(badge) = item.get(keys::BADGE) {
        description.push_str(&format!("**Status:** {}\n", badge));
    }
    description.push('\n');
    description.push_str(IMPORT_FOOTER);

    let images = item
        .get(keys::IMAGE_SRC)
        .map(|url| vec![ProductImage::from_url(url, name)])
        .unwrap_or_default();

    let mut info_sections = vec![InfoSection {
        title: "Descrição do Produto".to_string(),
        content: description.clone(),
    }];
    if let Some(link) = item.get(keys::LINK) {
        info_sections.push(InfoSection {
            title: "Link Original".to_string(),
            content: format!("Produto original: {}", link),
        });
    }

    Some(CreateProduct {
        name: name.trim().to_string(),
        description: description.trim().to_string(),
        original_price: Some(price),
        sale_price: Some(price),
        colors: None,
        info_sections,
        images,
        video_reviews: None,
    })
}

/// JS-like truthiness of a JSON value
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Whether a JSON document looks like an Amazon scrape
///
/// It must be an array in which at least one object has a name field.
pub fn validate_amazon_json(data: &Value) -> bool {
    let Some(items) = data.as_array() else {
        return false;
    };
    items.iter().any(|item| {
        item.as_object()
            .map(|obj| {
                [keys::SIZE_BASE_PLUS, keys::SIZE_BASE]
                    .iter()
                    .any(|k| obj.get(*k).map(is_truthy).unwrap_or(false))
            })
            .unwrap_or(false)
    })
}

/// Map every item, dropping the ones that cannot become products
pub fn process_amazon_json(items: &[AmazonItem]) -> Vec<CreateProduct> {
    items.iter().filter_map(map_amazon_to_product).collect()
}

/// Summary of an Amazon import run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmazonImportReport {
    pub total: usize,
    pub processed: usize,
    pub created: usize,
    pub skipped: usize,
    pub errors: Vec<String>,
}

/// Map and create every item of a scraped array
///
/// Items are numbered from 1 in error messages. `data` should have passed
/// [`validate_amazon_json`]; a non-array yields an empty report.
pub fn import_amazon(store: &dyn ProductStore, data: &Value) -> AmazonImportReport {
    let items = data.as_array().map(Vec::as_slice).unwrap_or(&[]);
    let mut report = AmazonImportReport {
        total: items.len(),
        ..AmazonImportReport::default()
    };

    info!(items = items.len(), "processing Amazon JSON");

    for (i, value) in items.iter().enumerate() {
        report.processed += 1;

        let item = match AmazonItem::from_value(value) {
            Ok(item) => item,
            Err(e) => {
                report.errors.push(format!("Erro no item {}: {}", i + 1, e));
                continue;
            }
        };

        let Some(product) = map_amazon_to_product(&item) else {
            debug!(item = i + 1, "skipped: insufficient data");
            report.skipped += 1;
            continue;
        };

        match store.create(&product) {
            Ok(()) => {
                info!(name = %product.name, "product created");
                report.created += 1;
            }
            Err(e) => {
                warn!(name = %product.name, error = %e, "product creation failed");
                report
                    .errors
                    .push(format!("Erro ao criar \"{}\": {}", product.name, e));
            }
        }
    }

    report
}
