use async_trait::async_trait;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use super::models::{ImportReceipt, OptimizedProduct};
use crate::error::CatalogError;
use crate::preferences::PreferencesStore;

/// Destination storefront for optimized products.
#[async_trait]
pub trait StorefrontImporter: Send + Sync {
    async fn import(&self, product: &OptimizedProduct) -> Result<ImportReceipt, CatalogError>;
}

/// Pretends to create the product through the Shopify Admin API.
pub struct MockShopifyImporter {
    preferences: Arc<PreferencesStore>,
    delay: Duration,
}

impl MockShopifyImporter {
    pub fn new(preferences: Arc<PreferencesStore>, delay: Duration) -> Self {
        Self { preferences, delay }
    }
}

#[async_trait]
impl StorefrontImporter for MockShopifyImporter {
    async fn import(&self, product: &OptimizedProduct) -> Result<ImportReceipt, CatalogError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let store_url = self.preferences.store_url().await;
        if store_url.trim().is_empty() {
            return Err(CatalogError::ImportFailed("no Shopify store URL configured".into()));
        }

        let product_id = format!(
            "gid://shopify/Product/{}",
            rand::thread_rng().gen_range(0..10_000_000)
        );
        let shopify_url = format!(
            "https://{}/products/{}",
            store_url,
            product_handle(&product.optimized_title)
        );

        info!(%product_id, %shopify_url, "Product pushed to storefront");
        Ok(ImportReceipt {
            product_id,
            shopify_url,
        })
    }
}

/// Shopify URL handle: lowercase, ASCII word characters and whitespace kept,
/// whitespace runs joined with `-`.
pub fn product_handle(title: &str) -> String {
    let kept: String = title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::models::{Platform, ProductData};
    use crate::preferences::{OptimizationSettings, ShopifyCredentials, StoreSettings};
    use std::collections::BTreeMap;

    #[test]
    fn test_product_handle() {
        assert_eq!(product_handle("Smart Watch, GPS & Heart-Rate!"), "smart-watch-gps-heartrate");
        assert_eq!(product_handle("Écouteurs  sans fil"), "couteurs-sans-fil");
        assert_eq!(product_handle("snake_case item 2"), "snake_case-item-2");
        assert_eq!(product_handle("  padded  "), "padded");
    }

    fn importer(store_url: &str) -> MockShopifyImporter {
        let preferences = Arc::new(PreferencesStore::new(StoreSettings {
            shopify: ShopifyCredentials {
                store_url: store_url.into(),
                api_key: String::new(),
                api_secret: String::new(),
                access_token: String::new(),
            },
            optimization: OptimizationSettings::default(),
        }));
        MockShopifyImporter::new(preferences, Duration::ZERO)
    }

    fn desk_lamp() -> OptimizedProduct {
        OptimizedProduct {
            original_data: ProductData {
                title: "Desk Lamp".into(),
                price: "$12".into(),
                description: "LED lamp".into(),
                images: vec![],
                specifications: BTreeMap::new(),
                source_url: "https://www.alibaba.com/product-detail/lamp.html".into(),
                platform: Platform::Alibaba,
            },
            optimized_title: "Desk Lamp with Wireless Charger".into(),
            optimized_description: "# Desk Lamp".into(),
        }
    }

    #[tokio::test]
    async fn test_mock_import_uses_store_url() {
        let receipt = importer("demo-shop.myshopify.com")
            .import(&desk_lamp())
            .await
            .unwrap();
        assert!(receipt.product_id.starts_with("gid://shopify/Product/"));
        let numeric: u64 = receipt.product_id.rsplit('/').next().unwrap().parse().unwrap();
        assert!(numeric < 10_000_000);
        assert_eq!(
            receipt.shopify_url,
            "https://demo-shop.myshopify.com/products/desk-lamp-with-wireless-charger"
        );
    }

    #[tokio::test]
    async fn test_import_without_store_url_fails() {
        for store_url in ["", "   "] {
            let result = importer(store_url).import(&desk_lamp()).await;
            assert!(matches!(result, Err(CatalogError::ImportFailed(_))));
        }
    }
}
