//! Mapping of import sources to catalog products

pub mod amazon;
pub mod shopify;

pub use amazon::{
    import_amazon, map_amazon_to_product, process_amazon_json, validate_amazon_json,
    AmazonImportReport, AmazonItem,
};
pub use shopify::{build_product, group_by_handle};
