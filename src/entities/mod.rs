//! Entity types

pub mod csv_product;
pub mod product;

pub use csv_product::CsvProduct;
pub use product::{CreateProduct, InfoSection, ProductColor, ProductImage};
