use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Alibaba,
    Aliexpress,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Alibaba => "alibaba",
            Platform::Aliexpress => "aliexpress",
        }
    }

    /// Marketplace domain the platform's listings live under.
    pub fn domain(&self) -> &'static str {
        match self {
            Platform::Alibaba => "alibaba.com",
            Platform::Aliexpress => "aliexpress.com",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductData {
    pub title: String,
    pub price: String,
    pub description: String,
    pub images: Vec<String>,
    pub specifications: BTreeMap<String, String>,
    pub source_url: String,
    pub platform: Platform,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizedProduct {
    pub original_data: ProductData,
    pub optimized_title: String,
    pub optimized_description: String,
}

/// Title and description rewritten for the storefront.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizedContent {
    pub title: String,
    pub description: String,
}

impl OptimizedContent {
    pub fn into_product(self, original_data: ProductData) -> OptimizedProduct {
        OptimizedProduct {
            original_data,
            optimized_title: self.title,
            optimized_description: self.description,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportStatus {
    Success,
    Pending,
    Error,
}

impl FromStr for ImportStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(ImportStatus::Success),
            "pending" => Ok(ImportStatus::Pending),
            "error" => Ok(ImportStatus::Error),
            other => Err(format!("unknown import status '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedProduct {
    pub id: String,
    pub title: String,
    pub source: Platform,
    pub source_url: String,
    pub shopify_url: String,
    pub status: ImportStatus,
    pub imported_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReceipt {
    pub product_id: String,
    pub shopify_url: String,
}
