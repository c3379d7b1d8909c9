//! Catalog service: taxonomy, product listings, product pages, reviews.
//!
//! Taxonomy lookups (families, categories, subcategories, brands) change
//! rarely and are cached in memory via `moka` for 5 minutes.

use std::sync::Arc;
use std::time::Duration;

use kronos_core::{CategoryId, FamilyId, Page, VariantId};
use moka::future::Cache;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::ServiceError;
use crate::http::ApiClient;
use crate::models::{Brand, Category, Family, Product, ProductDetail, ProductFilters, Review, Subcategory};

/// Page size for the home page rails (featured, offers, new arrivals).
pub const DEFAULT_RAIL_LIMIT: u32 = 8;

const TAXONOMY_TTL: Duration = Duration::from_secs(300);

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
enum CacheKey {
    Families,
    Categories(Option<FamilyId>),
    Subcategories(Option<CategoryId>),
    Brands,
}

#[derive(Debug, Clone)]
enum CacheValue {
    Families(Arc<Vec<Family>>),
    Categories(Arc<Vec<Category>>),
    Subcategories(Arc<Vec<Subcategory>>),
    Brands(Arc<Vec<Brand>>),
}

/// Public catalog client.
#[derive(Clone)]
pub struct CatalogService {
    api: ApiClient,
    cache: Cache<CacheKey, CacheValue>,
}

impl std::fmt::Debug for CatalogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogService")
            .field("api", &self.api)
            .field("cached_entries", &self.cache.entry_count())
            .finish()
    }
}

#[derive(Serialize)]
struct FamilyQuery {
    #[serde(rename = "familia", skip_serializing_if = "Option::is_none")]
    family: Option<FamilyId>,
}

#[derive(Serialize)]
struct CategoryQuery {
    #[serde(rename = "categoria", skip_serializing_if = "Option::is_none")]
    category: Option<CategoryId>,
}

impl CatalogService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        let cache = Cache::builder()
            .max_capacity(256)
            .time_to_live(TAXONOMY_TTL)
            .build();
        Self { api, cache }
    }

    /// Drop every cached taxonomy lookup.
    pub fn invalidate_taxonomy(&self) {
        self.cache.invalidate_all();
    }

    // =========================================================================
    // Taxonomy
    // =========================================================================

    /// # Errors
    ///
    /// Returns `ServiceError` if the request fails.
    #[instrument(skip(self))]
    pub async fn families(&self) -> Result<Arc<Vec<Family>>, ServiceError> {
        if let Some(CacheValue::Families(families)) = self.cache.get(&CacheKey::Families).await {
            debug!("Cache hit for families");
            return Ok(families);
        }

        let families: Arc<Vec<Family>> = Arc::new(
            self.api
                .get("/familias")
                .envelope("Error al obtener familias")
                .await?,
        );
        self.cache
            .insert(CacheKey::Families, CacheValue::Families(Arc::clone(&families)))
            .await;
        Ok(families)
    }

    /// Categories, optionally restricted to one family.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the request fails.
    #[instrument(skip(self))]
    pub async fn categories(&self, family: Option<FamilyId>) -> Result<Arc<Vec<Category>>, ServiceError> {
        let key = CacheKey::Categories(family);
        if let Some(CacheValue::Categories(categories)) = self.cache.get(&key).await {
            debug!("Cache hit for categories");
            return Ok(categories);
        }

        let categories: Arc<Vec<Category>> = Arc::new(
            self.api
                .get("/categorias")
                .query(&FamilyQuery { family })
                .envelope("Error al obtener categorías")
                .await?,
        );
        self.cache
            .insert(key, CacheValue::Categories(Arc::clone(&categories)))
            .await;
        Ok(categories)
    }

    /// Subcategories, optionally restricted to one category.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the request fails.
    #[instrument(skip(self))]
    pub async fn subcategories(&self, category: Option<CategoryId>) -> Result<Arc<Vec<Subcategory>>, ServiceError> {
        let key = CacheKey::Subcategories(category);
        if let Some(CacheValue::Subcategories(subcategories)) = self.cache.get(&key).await {
            debug!("Cache hit for subcategories");
            return Ok(subcategories);
        }

        let subcategories: Arc<Vec<Subcategory>> = Arc::new(
            self.api
                .get("/subcategorias")
                .query(&CategoryQuery { category })
                .envelope("Error al obtener subcategorías")
                .await?,
        );
        self.cache
            .insert(key, CacheValue::Subcategories(Arc::clone(&subcategories)))
            .await;
        Ok(subcategories)
    }

    /// # Errors
    ///
    /// Returns `ServiceError` if the request fails.
    #[instrument(skip(self))]
    pub async fn brands(&self) -> Result<Arc<Vec<Brand>>, ServiceError> {
        if let Some(CacheValue::Brands(brands)) = self.cache.get(&CacheKey::Brands).await {
            debug!("Cache hit for brands");
            return Ok(brands);
        }

        let brands: Arc<Vec<Brand>> = Arc::new(
            self.api
                .get("/marcas")
                .envelope("Error al obtener marcas")
                .await?,
        );
        self.cache
            .insert(CacheKey::Brands, CacheValue::Brands(Arc::clone(&brands)))
            .await;
        Ok(brands)
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// One page of the product listing.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the request fails.
    #[instrument(skip(self))]
    pub async fn products(&self, filters: &ProductFilters) -> Result<Page<Product>, ServiceError> {
        self.api
            .get("/productos")
            .query(filters)
            .paginated("Error al obtener productos")
            .await
    }

    /// # Errors
    ///
    /// Returns `ServiceError` if the product does not exist or the request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn product(&self, id: VariantId) -> Result<ProductDetail, ServiceError> {
        self.api
            .get(&format!("/productos/{id}"))
            .envelope("Error al obtener el producto")
            .await
    }

    /// # Errors
    ///
    /// Returns `ServiceError` if the product does not exist or the request fails.
    #[instrument(skip(self))]
    pub async fn product_by_slug(&self, slug: &str) -> Result<ProductDetail, ServiceError> {
        self.api
            .get(&format!("/productos/slug/{}", encode_segment(slug)))
            .envelope("Error al obtener el producto")
            .await
    }

    /// In-stock featured products.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the request fails.
    pub async fn featured(&self, limit: Option<u32>) -> Result<Vec<Product>, ServiceError> {
        let filters = ProductFilters {
            featured: Some(true),
            ..rail_filters(limit)
        };
        Ok(self.products(&filters).await?.data)
    }

    /// In-stock products on sale.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the request fails.
    pub async fn offers(&self, limit: Option<u32>) -> Result<Vec<Product>, ServiceError> {
        let filters = ProductFilters {
            on_sale: Some(true),
            ..rail_filters(limit)
        };
        Ok(self.products(&filters).await?.data)
    }

    /// In-stock new arrivals.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the request fails.
    pub async fn new_arrivals(&self, limit: Option<u32>) -> Result<Vec<Product>, ServiceError> {
        let filters = ProductFilters {
            new_arrivals: Some(true),
            ..rail_filters(limit)
        };
        Ok(self.products(&filters).await?.data)
    }

    /// Approved reviews for a product.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn reviews(&self, id: VariantId) -> Result<Vec<Review>, ServiceError> {
        self.api
            .get(&format!("/productos/{id}/valoraciones"))
            .envelope("Error al obtener valoraciones")
            .await
    }
}

fn rail_filters(limit: Option<u32>) -> ProductFilters {
    ProductFilters {
        limit: Some(limit.unwrap_or(DEFAULT_RAIL_LIMIT)),
        in_stock: Some(true),
        ..ProductFilters::default()
    }
}

/// Percent-encode a single path segment.
fn encode_segment(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rail_filters_force_stock_and_default_limit() {
        let filters = rail_filters(None);
        assert_eq!(filters.limit, Some(8));
        assert_eq!(filters.in_stock, Some(true));
        assert_eq!(rail_filters(Some(4)).limit, Some(4));
    }

    #[test]
    fn test_encode_segment() {
        assert_eq!(encode_segment("laptop-x1"), "laptop-x1");
        assert_eq!(encode_segment("mouse inalámbrico/2"), "mouse%20inal%C3%A1mbrico%2F2");
    }
}
