use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use super::extract::ExtractorRegistry;
use super::import::StorefrontImporter;
use super::models::ImportReceipt;
use super::optimize::ContentOptimizer;
use crate::error::CatalogError;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSuccess {
    pub url: String,
    pub product_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchFailure {
    pub url: String,
    pub reason: String,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    pub success: Vec<BatchSuccess>,
    pub failed: Vec<BatchFailure>,
}

/// Extract, optimize and import chained for whole URLs.
pub struct ImportPipeline {
    pub extractors: Arc<ExtractorRegistry>,
    pub optimizer: Arc<ContentOptimizer>,
    pub importer: Arc<dyn StorefrontImporter>,
}

impl ImportPipeline {
    pub fn new(
        extractors: Arc<ExtractorRegistry>,
        optimizer: Arc<ContentOptimizer>,
        importer: Arc<dyn StorefrontImporter>,
    ) -> Self {
        Self {
            extractors,
            optimizer,
            importer,
        }
    }

    pub async fn run(&self, url: &str) -> Result<ImportReceipt, CatalogError> {
        let product = self.extractors.extract(url).await?;
        let content = self.optimizer.optimize(&product).await;
        let optimized = content.into_product(product);
        self.importer.import(&optimized).await
    }

    /// Runs every URL concurrently. Results keep input order within each list.
    pub async fn run_batch(&self, urls: &[String]) -> BatchReport {
        let outcomes = join_all(urls.iter().map(|url| async move {
            (url.clone(), self.run(url).await)
        }))
        .await;

        let mut report = BatchReport::default();
        for (url, outcome) in outcomes {
            match outcome {
                Ok(receipt) => report.success.push(BatchSuccess {
                    url,
                    product_id: receipt.product_id,
                }),
                Err(e) => {
                    warn!(%url, error = %e, "Batch import entry failed");
                    report.failed.push(BatchFailure {
                        url,
                        reason: e.to_string(),
                    });
                }
            }
        }
        info!(
            succeeded = report.success.len(),
            failed = report.failed.len(),
            "Batch import finished"
        );
        report
    }
}
