//! Map validated export rows to catalog products
//!
//! Rows sharing a Handle are variants of one product. The first row of each
//! group carries the product data; the others contribute color options.

use indexmap::IndexMap;

use crate::entities::csv_product::CsvProduct;
use crate::entities::product::{CreateProduct, ProductColor, ProductImage};
use crate::import::number::{comma_to_dot, parse_float_prefix, to_cents};

/// Status value a product must have to be imported
pub const ACTIVE_STATUS: &str = "active";

/// Title given to images imported from the export
pub const IMAGE_TITLE: &str = "Product Image";

/// Convert a price cell to cents
///
/// Blank is zero; a value with no numeric prefix (e.g. `manual`) is `None`,
/// as is `Infinity` or an amount too large to count in cents.
pub fn parse_price_cents(raw: &str) -> Option<i64> {
    if raw.trim().is_empty() {
        return Some(0);
    }
    parse_float_prefix(&comma_to_dot(raw)).and_then(to_cents)
}

fn push_unique(colors: &mut Vec<ProductColor>, title: &str) {
    if !colors.iter().any(|c| c.title == title) {
        colors.push(ProductColor::named(title));
    }
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(';').map(str::trim).filter(|s| !s.is_empty())
}

/// Colors from the color-pattern and makeup-shade metafields
///
/// Pattern names are taken as listed; shades are added only when no color
/// of the same name exists yet.
pub fn extract_colors(color_pattern: &str, makeup_shade: &str) -> Vec<ProductColor> {
    let mut colors: Vec<ProductColor> = split_list(color_pattern).map(ProductColor::named).collect();
    for shade in split_list(makeup_shade) {
        push_unique(&mut colors, shade);
    }
    colors
}

/// Image attachments for an `Image Src` cell (zero or one)
pub fn product_images(image_src: &str) -> Vec<ProductImage> {
    if image_src.trim().is_empty() {
        return Vec::new();
    }
    vec![ProductImage::from_url(image_src, IMAGE_TITLE)]
}

/// Group rows by Handle, keeping first-seen order
pub fn group_by_handle(rows: &[CsvProduct]) -> IndexMap<String, Vec<CsvProduct>> {
    let mut groups: IndexMap<String, Vec<CsvProduct>> = IndexMap::new();
    for row in rows {
        let handle = row.handle();
        if handle.trim().is_empty() {
            continue;
        }
        groups.entry(handle.to_string()).or_default().push(row.clone());
    }
    groups
}

/// Build the product for one Handle group
///
/// Returns `None` when the main row has no title or is not `active`
/// (a missing Status column counts as not active).
pub fn build_product(variants: &[CsvProduct]) -> Option<CreateProduct> {
    let main = variants.first()?;

    if main.title().is_empty() || main.status() != Some(ACTIVE_STATUS) {
        return None;
    }

    let mut colors = Vec::new();
    for variant in variants {
        let option = variant.option1_value();
        if !option.trim().is_empty() {
            push_unique(&mut colors, option);
        }
    }
    for color in extract_colors(main.color_pattern(), main.makeup_shade()) {
        push_unique(&mut colors, &color.title);
    }

    let compare_at = main.compare_at_price();
    let original_source = if compare_at.is_empty() {
        main.variant_price()
    } else {
        compare_at
    };

    Some(CreateProduct {
        name: main.title().to_string(),
        description: main.body_html().to_string(),
        original_price: parse_price_cents(original_source),
        sale_price: parse_price_cents(main.variant_price()),
        colors: if colors.is_empty() { None } else { Some(colors) },
        info_sections: Vec::new(),
        images: product_images(main.image_src()),
        video_reviews: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> CsvProduct {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_parse_price_cents() {
        assert_eq!(parse_price_cents("49.90"), Some(4990));
        assert_eq!(parse_price_cents("19,90"), Some(1990));
        assert_eq!(parse_price_cents(""), Some(0));
        assert_eq!(parse_price_cents("manual"), None);
    }

    #[test]
    fn test_extract_colors_dedupes_shades() {
        let colors = extract_colors("Rosa; Azul ;", "Azul;Coral");
        let titles: Vec<&str> = colors.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Rosa", "Azul", "Coral"]);
        assert!(colors.iter().all(|c| c.hex == "#000000"));
    }

    #[test]
    fn test_extract_colors_empty() {
        assert!(extract_colors("", " ; ").is_empty());
    }

    #[test]
    fn test_product_images() {
        assert!(product_images("  ").is_empty());

        let images = product_images("https://cdn/x.jpg");
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].title, "Product Image");
        assert_eq!(images[0].thumbnails.small.signed_path, "https://cdn/x.jpg");
    }

    #[test]
    fn test_group_by_handle_keeps_order() {
        let rows = vec![
            row(&[("Handle", "b"), ("Title", "B")]),
            row(&[("Handle", "a"), ("Title", "A")]),
            row(&[("Handle", "b"), ("Title", "B2")]),
            row(&[("Handle", ""), ("Title", "orphan")]),
        ];

        let groups = group_by_handle(&rows);
        let handles: Vec<&String> = groups.keys().collect();
        assert_eq!(handles, vec!["b", "a"]);
        assert_eq!(groups["b"].len(), 2);
    }

    #[test]
    fn test_build_product_from_variants() {
        let variants = vec![
            row(&[
                ("Handle", "batom"),
                ("Title", "Batom Matte"),
                ("Body (HTML)", "<p>Longa duração</p>"),
                ("Variant Price", "39,90"),
                ("Variant Compare At Price", "49,90"),
                ("Image Src", "https://cdn/batom.jpg"),
                ("Option1 Value", "Amora"),
                ("Cor (product.metafields.shopify.color-pattern)", "Vermelho"),
                (
                    "Tonalidade da maquiagem (product.metafields.shopify.makeup-color-shade)",
                    "Amora;Nude",
                ),
                ("Status", "active"),
            ]),
            row(&[("Handle", "batom"), ("Title", ""), ("Option1 Value", "Coral")]),
            row(&[("Handle", "batom"), ("Title", ""), ("Option1 Value", "Amora")]),
        ];

        let product = build_product(&variants).unwrap();
        assert_eq!(product.name, "Batom Matte");
        assert_eq!(product.description, "<p>Longa duração</p>");
        assert_eq!(product.sale_price, Some(3990));
        assert_eq!(product.original_price, Some(4990));
        assert_eq!(product.images.len(), 1);
        assert!(product.info_sections.is_empty());
        assert!(product.video_reviews.is_none());

        let titles: Vec<String> = product
            .colors
            .unwrap()
            .into_iter()
            .map(|c| c.title)
            .collect();
        assert_eq!(titles, vec!["Amora", "Coral", "Vermelho", "Nude"]);
    }

    #[test]
    fn test_build_product_original_price_falls_back_to_sale() {
        let variants = vec![row(&[
            ("Handle", "h"),
            ("Title", "T"),
            ("Variant Price", "10"),
            ("Status", "active"),
        ])];

        let product = build_product(&variants).unwrap();
        assert_eq!(product.original_price, Some(1000));
        assert_eq!(product.sale_price, Some(1000));
        assert!(product.colors.is_none());
        assert!(product.images.is_empty());
    }

    #[test]
    fn test_build_product_manual_price_is_null() {
        let variants = vec![row(&[
            ("Handle", "h"),
            ("Title", "T"),
            ("Variant Price", "manual"),
            ("Status", "active"),
        ])];

        let product = build_product(&variants).unwrap();
        assert_eq!(product.sale_price, None);
        assert_eq!(product.original_price, None);
    }

    #[test]
    fn test_parse_price_cents_rejects_unbounded_amounts() {
        assert_eq!(parse_price_cents("Infinity"), None);
        assert_eq!(parse_price_cents("1e300"), None);
        assert_eq!(parse_price_cents("1e17"), None);
        assert_eq!(parse_price_cents("1e3"), Some(100_000));
    }

    #[test]
    fn test_build_product_unbounded_price_is_null() {
        let parsed = crate::import::parse_csv_text(
            "Handle,Title,Variant Price,Status\nh,T,Infinity,active\nh2,T2,1e300,active",
        );
        assert!(parsed.success);

        for row in &parsed.data {
            let product = build_product(std::slice::from_ref(row)).unwrap();
            assert_eq!(product.sale_price, None);
            assert_eq!(product.original_price, None);

            let json = serde_json::to_value(&product).unwrap();
            assert!(json["sale_price"].is_null());
        }

        let mut priced = parsed.data[0].clone();
        priced.set("Variant Price", "250");
        let product = build_product(&[priced]).unwrap();
        assert_eq!(product.sale_price, Some(25_000));
    }

    #[test]
    fn test_build_product_skips_inactive_or_untitled() {
        let draft = vec![row(&[("Handle", "h"), ("Title", "T"), ("Status", "draft")])];
        assert!(build_product(&draft).is_none());

        let no_status = vec![row(&[("Handle", "h"), ("Title", "T")])];
        assert!(build_product(&no_status).is_none());

        let untitled = vec![row(&[("Handle", "h"), ("Title", ""), ("Status", "active")])];
        assert!(build_product(&untitled).is_none());

        assert!(build_product(&[]).is_none());
    }
}
