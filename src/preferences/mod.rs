//! Storefront settings edited from the settings page
//!
//! Held in memory for the life of the process. The optimizer reads the
//! optimization block on every request and the importer reads the store URL.

pub mod handlers;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;

use crate::config::Settings;
use crate::error::AppError;

const MASK: &str = "********";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopifyCredentials {
    pub store_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub api_secret: String,
    #[serde(default)]
    pub access_token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationSettings {
    pub max_title_length: usize,
    pub min_description_length: usize,
    pub keyword_density: f64,
}

impl Default for OptimizationSettings {
    fn default() -> Self {
        Self {
            max_title_length: 70,
            min_description_length: 500,
            keyword_density: 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSettings {
    pub shopify: ShopifyCredentials,
    pub optimization: OptimizationSettings,
}

impl StoreSettings {
    pub fn from_config(config: &Settings) -> Self {
        Self {
            shopify: ShopifyCredentials {
                store_url: config.shopify.store_url.clone(),
                api_key: String::new(),
                api_secret: String::new(),
                access_token: String::new(),
            },
            optimization: OptimizationSettings {
                max_title_length: config.optimization.max_title_length,
                min_description_length: config.optimization.min_description_length,
                keyword_density: config.optimization.keyword_density,
            },
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let store_url = self.shopify.store_url.trim();
        if store_url.is_empty() {
            return Err(AppError::ValidationError("Shopify store URL is required".into()));
        }
        if store_url.contains('/') || store_url.contains(char::is_whitespace) {
            return Err(AppError::ValidationError(
                "Shopify store URL must be a bare domain such as your-store.myshopify.com".into(),
            ));
        }

        let opt = &self.optimization;
        if !(10..=100).contains(&opt.max_title_length) {
            return Err(AppError::ValidationError(
                "Maximum title length must be between 10 and 100".into(),
            ));
        }
        if !(100..=1000).contains(&opt.min_description_length) {
            return Err(AppError::ValidationError(
                "Minimum description length must be between 100 and 1000".into(),
            ));
        }
        if !(1.0..=10.0).contains(&opt.keyword_density) {
            return Err(AppError::ValidationError(
                "Keyword density must be between 1 and 10".into(),
            ));
        }
        Ok(())
    }

    /// Copy safe to send to a browser.
    pub fn masked(&self) -> Self {
        let mask = |s: &str| if s.is_empty() { String::new() } else { MASK.to_string() };
        let mut out = self.clone();
        out.shopify.api_secret = mask(&self.shopify.api_secret);
        out.shopify.access_token = mask(&self.shopify.access_token);
        out
    }
}

pub struct PreferencesStore {
    current: RwLock<StoreSettings>,
}

impl PreferencesStore {
    pub fn new(initial: StoreSettings) -> Self {
        Self {
            current: RwLock::new(initial),
        }
    }

    pub async fn get(&self) -> StoreSettings {
        self.current.read().await.clone()
    }

    pub async fn optimization(&self) -> OptimizationSettings {
        self.current.read().await.optimization.clone()
    }

    pub async fn store_url(&self) -> String {
        self.current.read().await.shopify.store_url.clone()
    }

    /// Validates and replaces the settings. A masked secret keeps the stored value.
    pub async fn update(&self, mut incoming: StoreSettings) -> Result<StoreSettings, AppError> {
        incoming.validate()?;
        incoming.shopify.store_url = incoming.shopify.store_url.trim().to_string();

        let mut current = self.current.write().await;
        if incoming.shopify.api_secret == MASK {
            incoming.shopify.api_secret = current.shopify.api_secret.clone();
        }
        if incoming.shopify.access_token == MASK {
            incoming.shopify.access_token = current.shopify.access_token.clone();
        }
        *current = incoming;
        info!(store_url = %current.shopify.store_url, "Store settings updated");
        Ok(current.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> StoreSettings {
        StoreSettings {
            shopify: ShopifyCredentials {
                store_url: "shop.myshopify.com".into(),
                api_key: "key".into(),
                api_secret: "secret".into(),
                access_token: "shpat_123".into(),
            },
            optimization: OptimizationSettings::default(),
        }
    }

    #[test]
    fn test_validate_ranges() {
        assert!(settings().validate().is_ok());

        let mut s = settings();
        s.optimization.max_title_length = 9;
        assert!(s.validate().is_err());

        let mut s = settings();
        s.optimization.min_description_length = 1001;
        assert!(s.validate().is_err());

        let mut s = settings();
        s.optimization.keyword_density = 0.5;
        assert!(s.validate().is_err());

        let mut s = settings();
        s.shopify.store_url = "https://shop.myshopify.com/admin".into();
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_masked_hides_secrets() {
        let masked = settings().masked();
        assert_eq!(masked.shopify.api_key, "key");
        assert_eq!(masked.shopify.api_secret, MASK);
        assert_eq!(masked.shopify.access_token, MASK);

        let mut empty = settings();
        empty.shopify.api_secret.clear();
        assert_eq!(empty.masked().shopify.api_secret, "");
    }

    #[tokio::test]
    async fn test_update_keeps_masked_secrets() {
        let store = PreferencesStore::new(settings());
        let mut incoming = settings().masked();
        incoming.shopify.store_url = " other.myshopify.com ".into();
        incoming.optimization.max_title_length = 60;

        let updated = store.update(incoming).await.unwrap();
        assert_eq!(updated.shopify.api_secret, "secret");
        assert_eq!(updated.shopify.access_token, "shpat_123");
        assert_eq!(store.store_url().await, "other.myshopify.com");
        assert_eq!(store.optimization().await.max_title_length, 60);
    }

    #[tokio::test]
    async fn test_rejected_update_leaves_settings() {
        let store = PreferencesStore::new(settings());
        let mut incoming = settings();
        incoming.optimization.keyword_density = 42.0;

        assert!(store.update(incoming).await.is_err());
        assert_eq!(store.get().await, settings());
    }
}
