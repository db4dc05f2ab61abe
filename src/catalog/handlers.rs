use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::history::{ImportStats, ProductFilter};
use super::models::{ImportStatus, ImportedProduct, OptimizedProduct, ProductData};
use super::pipeline::BatchReport;
use crate::auth::handlers::require_user;
use crate::error::{AppError, CatalogError};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub product: ProductData,
}

pub async fn extract(
    req: web::Json<ExtractRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let url = req
        .url
        .as_deref()
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| AppError::ValidationError("Product URL is required".into()))?;

    let product = state.pipeline.extractors.extract(url).await?;
    Ok(HttpResponse::Ok().json(ExtractResponse { product }))
}

#[derive(Debug, Deserialize)]
pub struct OptimizeRequest {
    pub product: Option<ProductData>,
}

pub async fn optimize(
    req: web::Json<OptimizeRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let product = req
        .into_inner()
        .product
        .ok_or_else(|| AppError::ValidationError("Product data is required".into()))?;

    let content = state.pipeline.optimizer.optimize(&product).await;
    Ok(HttpResponse::Ok().json(content))
}

/// Import payload before completeness checks.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportProductPayload {
    pub original_data: Option<ProductData>,
    pub optimized_title: Option<String>,
    pub optimized_description: Option<String>,
}

impl ImportProductPayload {
    fn into_product(self) -> Option<OptimizedProduct> {
        let present = |s: Option<String>| s.filter(|v| !v.is_empty());
        Some(OptimizedProduct {
            original_data: self.original_data?,
            optimized_title: present(self.optimized_title)?,
            optimized_description: present(self.optimized_description)?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ImportRequest {
    pub product: Option<ImportProductPayload>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResponse {
    pub product_id: String,
    pub shopify_url: String,
    pub success: bool,
    pub message: String,
}

pub async fn import(
    req: web::Json<ImportRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let product = req
        .into_inner()
        .product
        .and_then(ImportProductPayload::into_product)
        .ok_or_else(|| AppError::ValidationError("Optimized product data is required".into()))?;

    let receipt = state.pipeline.importer.import(&product).await?;
    info!(product_id = %receipt.product_id, "Product imported");
    Ok(HttpResponse::Ok().json(ImportResponse {
        product_id: receipt.product_id,
        shopify_url: receipt.shopify_url,
        success: true,
        message: "Product successfully imported into Shopify".into(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct BatchImportRequest {
    pub urls: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct BatchImportResponse {
    pub results: BatchReport,
}

pub async fn batch_import(
    req: web::Json<BatchImportRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let urls = req
        .into_inner()
        .urls
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::ValidationError("At least one product URL is required".into()))?;

    info!(count = urls.len(), "Starting batch import");
    let results = state.pipeline.run_batch(&urls).await;
    Ok(HttpResponse::Ok().json(BatchImportResponse { results }))
}

#[derive(Debug, Deserialize)]
pub struct ProductsQuery {
    pub search: Option<String>,
    pub status: Option<String>,
}

impl ProductsQuery {
    fn into_filter(self) -> Result<ProductFilter, AppError> {
        let status = match self.status.as_deref() {
            None | Some("") | Some("all") => None,
            Some(s) => Some(s.parse::<ImportStatus>().map_err(AppError::ValidationError)?),
        };
        Ok(ProductFilter {
            search: self.search.filter(|s| !s.is_empty()),
            status,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ProductsResponse {
    pub products: Vec<ImportedProduct>,
    pub stats: ImportStats,
}

pub async fn list_products(
    req: HttpRequest,
    query: web::Query<ProductsQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    require_user(&req, &state).await?;
    let filter = query.into_inner().into_filter()?;
    Ok(HttpResponse::Ok().json(ProductsResponse {
        products: state.history.list(&filter),
        stats: state.history.stats(),
    }))
}

pub async fn get_product(
    req: HttpRequest,
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    require_user(&req, &state).await?;
    let id = path.into_inner();
    let product = state
        .history
        .get(&id)
        .ok_or(CatalogError::ProductNotFound(id))?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "product": product })))
}
