use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use super::models::{Platform, ProductData};
use crate::error::CatalogError;

/// Source of product data for one marketplace.
#[async_trait]
pub trait ProductExtractor: Send + Sync {
    fn platform(&self) -> Platform;
    async fn extract(&self, url: &Url) -> Result<ProductData, CatalogError>;
}

/// Which marketplace a listing URL belongs to, judged by its host.
pub fn detect_platform(url: &Url) -> Option<Platform> {
    let host = url.host_str()?;
    [Platform::Alibaba, Platform::Aliexpress]
        .into_iter()
        .find(|p| host.contains(p.domain()))
}

/// Parses a pasted listing URL, assuming `https://` when the scheme is left off.
pub fn parse_listing_url(raw_url: &str) -> Result<Url, url::ParseError> {
    let trimmed = raw_url.trim();
    match Url::parse(trimmed) {
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(&format!("https://{}", trimmed))
        }
        parsed => parsed,
    }
}

/// Extractor strategies keyed by platform.
#[derive(Default)]
pub struct ExtractorRegistry {
    extractors: HashMap<Platform, Arc<dyn ProductExtractor>>,
}

impl ExtractorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the fixture extractors for every platform.
    pub fn with_fixtures(delay: Duration) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(FixtureExtractor::new(Platform::Alibaba, delay)));
        registry.register(Arc::new(FixtureExtractor::new(Platform::Aliexpress, delay)));
        registry
    }

    /// Replaces any extractor already registered for the same platform.
    pub fn register(&mut self, extractor: Arc<dyn ProductExtractor>) {
        self.extractors.insert(extractor.platform(), extractor);
    }

    pub async fn extract(&self, raw_url: &str) -> Result<ProductData, CatalogError> {
        let url = parse_listing_url(raw_url)
            .map_err(|e| CatalogError::UnsupportedUrl(format!("{}: {}", raw_url, e)))?;
        let platform = detect_platform(&url)
            .ok_or_else(|| CatalogError::UnsupportedUrl(raw_url.to_string()))?;
        let extractor = self.extractors.get(&platform).ok_or_else(|| {
            CatalogError::UnsupportedUrl(format!("no extractor registered for {}", platform))
        })?;

        debug!(%platform, url = %url, "Extracting product data");
        let product = extractor.extract(&url).await?;
        info!(%platform, title = %product.title, "Product data extracted");
        Ok(product)
    }
}

/// Returns a canned listing for its platform.
pub struct FixtureExtractor {
    platform: Platform,
    delay: Duration,
}

impl FixtureExtractor {
    pub fn new(platform: Platform, delay: Duration) -> Self {
        Self { platform, delay }
    }
}

#[async_trait]
impl ProductExtractor for FixtureExtractor {
    fn platform(&self) -> Platform {
        self.platform
    }

    async fn extract(&self, url: &Url) -> Result<ProductData, CatalogError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(fixture(self.platform, url.as_str()))
    }
}

fn specs(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn fixture(platform: Platform, source_url: &str) -> ProductData {
    match platform {
        Platform::Alibaba => ProductData {
            title: "Waterproof smart watch with heart rate monitor and built-in GPS".into(),
            price: "$59.99 - $79.99".into(),
            description: "This high quality smart watch tracks your daily physical activity. \
                It has an HD touch screen, is water resistant and offers exceptional battery life. \
                Ideal for athletes and anyone who cares about their health."
                .into(),
            images: vec![
                "https://example.com/watch1.jpg".into(),
                "https://example.com/watch2.jpg".into(),
                "https://example.com/watch3.jpg".into(),
            ],
            specifications: specs(&[
                ("Color", "Black, Blue, Red"),
                ("Material", "Aluminium and silicone"),
                ("Water Resistance", "IP68"),
                ("Battery Life", "7 days"),
                ("Screen", "1.3 inch HD"),
                ("Connectivity", "Bluetooth 5.0"),
                ("Compatibility", "Android 5.0+ / iOS 9.0+"),
                ("Features", "Heart rate monitor, GPS, Sleep tracking, Step counter"),
            ]),
            source_url: source_url.to_string(),
            platform,
        },
        Platform::Aliexpress => ProductData {
            title: "Bluetooth 5.0 wireless earbuds with active noise cancellation".into(),
            price: "€29.99".into(),
            description: "These wireless earbuds deliver exceptional sound quality with active \
                noise cancellation. Enjoy your music without outside distractions. \
                The ergonomic design stays comfortable during long listening sessions."
                .into(),
            images: vec![
                "https://example.com/earbuds1.jpg".into(),
                "https://example.com/earbuds2.jpg".into(),
                "https://example.com/earbuds3.jpg".into(),
            ],
            specifications: specs(&[
                ("Color", "White, Black"),
                ("Bluetooth Version", "5.0"),
                ("Battery Life", "6 hours (30 hours with charging case)"),
                ("Charging", "USB-C"),
                ("Noise Cancellation", "Active"),
                ("Waterproof", "IPX5"),
                ("Microphone", "Built-in with echo cancellation"),
                ("Controls", "Touch sensitive"),
            ]),
            source_url: source_url.to_string(),
            platform,
        },
    }
}
