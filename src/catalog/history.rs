use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;

use super::models::{ImportStatus, ImportedProduct, Platform};

/// Filter for the product listing. `None` fields match everything.
#[derive(Debug, Default, Clone)]
pub struct ProductFilter {
    pub search: Option<String>,
    pub status: Option<ImportStatus>,
}

impl ProductFilter {
    fn matches(&self, product: &ImportedProduct) -> bool {
        let search_ok = match &self.search {
            Some(term) => product.title.to_lowercase().contains(&term.to_lowercase()),
            None => true,
        };
        let status_ok = self.status.map_or(true, |s| product.status == s);
        search_ok && status_ok
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ImportStats {
    pub total: usize,
    pub success: usize,
    pub pending: usize,
    pub error: usize,
}

/// Previously imported products shown on the dashboard.
///
/// Read-only: the import pipeline does not record into it.
pub struct ImportHistory {
    products: Vec<ImportedProduct>,
}

impl ImportHistory {
    pub fn new(products: Vec<ImportedProduct>) -> Self {
        Self { products }
    }

    pub fn with_fixtures(store_url: &str) -> Self {
        Self::new(fixture_rows(store_url))
    }

    pub fn list(&self, filter: &ProductFilter) -> Vec<ImportedProduct> {
        self.products
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<ImportedProduct> {
        self.products.iter().find(|p| p.id == id).cloned()
    }

    /// Counts over every product, independent of any filter.
    pub fn stats(&self) -> ImportStats {
        self.products.iter().fold(
            ImportStats {
                total: self.products.len(),
                ..Default::default()
            },
            |mut stats, p| {
                match p.status {
                    ImportStatus::Success => stats.success += 1,
                    ImportStatus::Pending => stats.pending += 1,
                    ImportStatus::Error => stats.error += 1,
                }
                stats
            },
        )
    }
}

fn at(hour: u32, min: u32, sec: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 22, hour, min, sec)
        .single()
        .unwrap_or_else(Utc::now)
}

fn fixture_rows(store_url: &str) -> Vec<ImportedProduct> {
    let shop = |handle: &str| format!("https://{}/products/{}", store_url, handle);
    vec![
        ImportedProduct {
            id: "1".into(),
            title: "Waterproof smart watch with heart rate monitor".into(),
            source: Platform::Aliexpress,
            source_url: "https://www.aliexpress.com/item/1234567890.html".into(),
            shopify_url: shop("smart-watch"),
            status: ImportStatus::Success,
            imported_at: at(14, 25, 30),
        },
        ImportedProduct {
            id: "2".into(),
            title: "Bluetooth 5.0 wireless earbuds with noise cancellation".into(),
            source: Platform::Alibaba,
            source_url: "https://www.alibaba.com/product-detail/example_123456789.html".into(),
            shopify_url: shop("bluetooth-earbuds"),
            status: ImportStatus::Success,
            imported_at: at(13, 15, 10),
        },
        ImportedProduct {
            id: "3".into(),
            title: "Outdoor WiFi security camera".into(),
            source: Platform::Aliexpress,
            source_url: "https://www.aliexpress.com/item/9876543210.html".into(),
            shopify_url: String::new(),
            status: ImportStatus::Pending,
            imported_at: at(16, 5, 45),
        },
        ImportedProduct {
            id: "4".into(),
            title: "LED desk lamp with wireless charger".into(),
            source: Platform::Alibaba,
            source_url: "https://www.alibaba.com/product-detail/example_987654321.html".into(),
            shopify_url: String::new(),
            status: ImportStatus::Error,
            imported_at: at(15, 30, 20),
        },
    ]
}
