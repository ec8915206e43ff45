//! Batch product creation and its report
//!
//! Takes the rows accepted by the parser, groups them into products and
//! sends each product to a [`ProductStore`], one request at a time.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::store::ProductStore;
use crate::entities::csv_product::CsvProduct;
use crate::entities::product::CreateProduct;
use crate::mapping::shopify::{build_product, group_by_handle};

/// Outcome of creating one product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreationStatus {
    Success,
    Error,
}

/// Per-product line of a [`CreationReport`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreationDetail {
    pub product_name: String,
    pub status: CreationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Summary of a batch creation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreationReport {
    /// True when no product failed
    pub success: bool,
    pub created: usize,
    /// Groups not imported because untitled or not active
    pub skipped: usize,
    pub errors: Vec<String>,
    pub details: Vec<CreationDetail>,
}

/// Products that would be created from `rows`, in Handle order
pub fn dry_run_products(rows: &[CsvProduct]) -> Vec<CreateProduct> {
    group_by_handle(rows)
        .values()
        .filter_map(|variants| build_product(variants))
        .collect()
}

/// Create one product per Handle group and report the outcome
pub fn import_products(store: &dyn ProductStore, rows: &[CsvProduct]) -> CreationReport {
    let mut report = CreationReport::default();
    let groups = group_by_handle(rows);

    debug!(groups = groups.len(), rows = rows.len(), "importing products");

    for (handle, variants) in &groups {
        let Some(product) = build_product(variants) else {
            debug!(handle = %handle, "skipping inactive or untitled product");
            report.skipped += 1;
            continue;
        };

        match store.create(&product) {
            Ok(()) => {
                info!(handle = %handle, name = %product.name, "product created");
                report.created += 1;
                report.details.push(CreationDetail {
                    product_name: product.name,
                    status: CreationStatus::Success,
                    error: None,
                });
            }
            Err(e) => {
                warn!(handle = %handle, error = %e, "product creation failed");
                report
                    .errors
                    .push(format!("Erro ao criar produto: {}", product.name));
                report.details.push(CreationDetail {
                    product_name: product.name,
                    status: CreationStatus::Error,
                    error: Some(e.to_string()),
                });
            }
        }
    }

    report.success = report.errors.is_empty();
    report
}
