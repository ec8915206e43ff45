//! CIT: Catalog Import Toolkit
//!
//! Validates product catalog exports (Shopify-style CSV, scraped Amazon
//! JSON) and creates the products in a headless-database records API.

pub mod cli;
pub mod core;
pub mod entities;
pub mod import;
pub mod mapping;
