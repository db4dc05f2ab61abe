//! Product catalog: extraction, optimization and storefront import
//!
//! Every integration here is simulated. Extractors return fixtures per
//! platform and the importer fabricates Shopify ids.

pub mod extract;
pub mod handlers;
pub mod history;
pub mod import;
pub mod models;
pub mod optimize;
pub mod pipeline;

pub use extract::{detect_platform, ExtractorRegistry, FixtureExtractor, ProductExtractor};
pub use history::{ImportHistory, ImportStats, ProductFilter};
pub use import::{MockShopifyImporter, StorefrontImporter};
pub use models::{
    ImportReceipt, ImportStatus, ImportedProduct, OptimizedContent, OptimizedProduct, Platform,
    ProductData,
};
pub use optimize::ContentOptimizer;
pub use pipeline::{BatchReport, ImportPipeline};
