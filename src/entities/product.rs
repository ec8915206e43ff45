//! Product record type - the payload created in the remote catalog table

use serde::{Deserialize, Serialize};

/// Default MIME type for imported images
pub const DEFAULT_IMAGE_MIMETYPE: &str = "image/jpeg";

/// Default hex code for colors imported without one
pub const DEFAULT_COLOR_HEX: &str = "#000000";

/// Product color / shade option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductColor {
    /// Color name (e.g. "Amora", "Rosa Malva")
    pub title: String,

    /// Hex code (e.g. "#8B4A6B")
    pub hex: String,
}

impl ProductColor {
    /// Color with the default hex code
    pub fn named(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            hex: DEFAULT_COLOR_HEX.to_string(),
        }
    }
}

/// Titled block of rich text shown on the product page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoSection {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnail {
    #[serde(rename = "signedPath")]
    pub signed_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnails {
    pub tiny: Thumbnail,
    pub small: Thumbnail,
    pub card_cover: Thumbnail,
}

impl Thumbnails {
    /// All thumbnail sizes pointing at the same URL
    pub fn uniform(url: &str) -> Self {
        Self {
            tiny: Thumbnail {
                signed_path: url.to_string(),
            },
            small: Thumbnail {
                signed_path: url.to_string(),
            },
            card_cover: Thumbnail {
                signed_path: url.to_string(),
            },
        }
    }
}

/// Attachment record for a product image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    pub id: String,
    pub path: String,
    pub title: String,
    pub mimetype: String,
    pub size: u64,
    pub width: u32,
    pub height: u32,
    pub thumbnails: Thumbnails,
    #[serde(rename = "signedPath")]
    pub signed_path: String,
}

impl ProductImage {
    /// Image referencing an external URL, with a fresh random id
    ///
    /// Dimensions and size are unknown at import time and left at zero.
    pub fn from_url(url: &str, title: impl Into<String>) -> Self {
        Self {
            id: new_attachment_id(),
            path: url.to_string(),
            title: title.into(),
            mimetype: DEFAULT_IMAGE_MIMETYPE.to_string(),
            size: 0,
            width: 0,
            height: 0,
            thumbnails: Thumbnails::uniform(url),
            signed_path: url.to_string(),
        }
    }
}

/// Short random attachment id (lowercase, 9 chars)
fn new_attachment_id() -> String {
    let ulid = ulid::Ulid::new().to_string().to_lowercase();
    // The random part of a ULID starts after the 10-char timestamp
    ulid[ulid.len() - 9..].to_string()
}

/// A product ready to be created in the catalog table
///
/// Prices are integer cents. A price is `None` (serialized as `null`)
/// when the source value was present but not a number, e.g. `manual`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateProduct {
    pub name: String,

    pub original_price: Option<i64>,

    pub sale_price: Option<i64>,

    pub colors: Option<Vec<ProductColor>>,

    pub description: String,

    pub info_sections: Vec<InfoSection>,

    #[serde(rename = "Images")]
    pub images: Vec<ProductImage>,

    pub video_reviews: Option<Vec<String>>,
}

impl CreateProduct {
    /// Create a product with only a name and description
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            original_price: Some(0),
            sale_price: Some(0),
            colors: None,
            description: description.into(),
            info_sections: Vec::new(),
            images: Vec::new(),
            video_reviews: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_from_url() {
        let img = ProductImage::from_url("https://cdn.example.com/a.jpg", "Product Image");

        assert_eq!(img.path, "https://cdn.example.com/a.jpg");
        assert_eq!(img.signed_path, img.path);
        assert_eq!(img.thumbnails.card_cover.signed_path, img.path);
        assert_eq!(img.mimetype, "image/jpeg");
        assert_eq!(img.id.len(), 9);
        assert!(img.id.chars().all(|c| c.is_ascii_alphanumeric() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_product_wire_names() {
        let mut product = CreateProduct::new("Red Shoe", "");
        product.images.push(ProductImage::from_url("u", "t"));
        product.sale_price = None;

        let value = serde_json::to_value(&product).unwrap();
        assert!(value.get("Images").is_some());
        assert!(value["Images"][0].get("signedPath").is_some());
        assert!(value["Images"][0]["thumbnails"]["tiny"].get("signedPath").is_some());
        assert!(value["sale_price"].is_null());
        assert_eq!(value["original_price"], 0);
        assert!(value["colors"].is_null());
        assert!(value["video_reviews"].is_null());
    }

    #[test]
    fn test_color_default_hex() {
        let c = ProductColor::named("Amora");
        assert_eq!(c.hex, "#000000");
    }
}
