//! Catalog types: taxonomy, products, reviews.

use kronos_core::{BrandId, CategoryId, FamilyId, ProductId, ReviewId, SubcategoryId, UserId, VariantId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Top-level product family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Family {
    #[serde(rename = "id_familia")]
    pub id: FamilyId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "icono", default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(rename = "total_productos", default)]
    pub product_count: Option<i64>,
}

/// Category within a family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "id_categoria")]
    pub id: CategoryId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "icono", default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(rename = "id_familia")]
    pub family_id: FamilyId,
    #[serde(rename = "familia_nombre", default)]
    pub family_name: Option<String>,
    #[serde(rename = "total_productos", default)]
    pub product_count: Option<i64>,
}

/// Subcategory within a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subcategory {
    #[serde(rename = "id_subcategoria")]
    pub id: SubcategoryId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(rename = "id_categoria")]
    pub category_id: CategoryId,
    #[serde(rename = "orden", default)]
    pub position: i32,
    #[serde(rename = "estado", default)]
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    #[serde(rename = "id_marca")]
    pub id: BrandId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(rename = "total_productos", default)]
    pub product_count: Option<i64>,
}

/// Product listing entry (one sellable variant).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "id_producto_detalle")]
    pub id: VariantId,
    #[serde(rename = "nombre")]
    pub name: String,
    pub sku: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(rename = "marca", default)]
    pub brand: String,
    #[serde(rename = "precio_venta")]
    pub sale_price: Decimal,
    #[serde(rename = "precio_base")]
    pub base_price: Decimal,
    #[serde(rename = "descuento_porcentaje", default)]
    pub discount_percent: Option<f64>,
    #[serde(rename = "imagen_principal", default)]
    pub image: Option<String>,
    #[serde(rename = "es_destacado", default)]
    pub featured: bool,
    #[serde(rename = "es_nuevo", default)]
    pub new_arrival: bool,
    #[serde(rename = "es_oferta", default)]
    pub on_sale: bool,
    #[serde(rename = "stock_disponible", default)]
    pub stock: i32,
    #[serde(rename = "valoracion_promedio", default)]
    pub rating: Option<f64>,
    #[serde(rename = "total_valoraciones", default)]
    pub review_count: i32,
    #[serde(rename = "categoria", default)]
    pub category: String,
}

/// Full product page payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub summary: ProductSummaryFields,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "producto_descripcion", default)]
    pub product_description: Option<String>,
    #[serde(rename = "producto_nombre", default)]
    pub product_name: Option<String>,
    #[serde(rename = "modelo", default)]
    pub model: Option<String>,
    #[serde(rename = "marca_logo", default)]
    pub brand_logo: Option<String>,
    #[serde(rename = "imagenes", default)]
    pub images: Option<Vec<String>>,
    #[serde(rename = "especificaciones_base", default)]
    pub specifications: Option<serde_json::Value>,
    #[serde(rename = "peso", default)]
    pub weight: Option<f64>,
    #[serde(rename = "dimensiones", default)]
    pub dimensions: Option<String>,
    #[serde(rename = "garantia_meses", default)]
    pub warranty_months: Option<i32>,
    #[serde(rename = "categoria_nombre", default)]
    pub category_name: Option<String>,
    #[serde(rename = "subcategoria_nombre", default)]
    pub subcategory_name: Option<String>,
}

/// Listing fields shared by the detail payload, all optional there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummaryFields {
    #[serde(rename = "id_producto_detalle")]
    pub id: VariantId,
    #[serde(rename = "nombre")]
    pub name: String,
    pub sku: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(rename = "marca", default)]
    pub brand: String,
    #[serde(rename = "precio_venta", default)]
    pub sale_price: Option<Decimal>,
    #[serde(rename = "precio_base", default)]
    pub base_price: Option<Decimal>,
    #[serde(rename = "descuento_porcentaje", default)]
    pub discount_percent: Option<f64>,
    #[serde(rename = "imagen_principal", default)]
    pub image: Option<String>,
    #[serde(rename = "stock_disponible", default)]
    pub stock: Option<i32>,
    #[serde(rename = "valoracion_promedio", default)]
    pub rating: Option<f64>,
    #[serde(rename = "total_valoraciones", default)]
    pub review_count: Option<i32>,
}

/// Customer review of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    #[serde(rename = "id_valoracion")]
    pub id: ReviewId,
    #[serde(rename = "id_producto")]
    pub product_id: ProductId,
    #[serde(rename = "id_usuario")]
    pub user_id: UserId,
    #[serde(rename = "id_producto_detalle", default)]
    pub variant_id: Option<VariantId>,
    /// 1 to 5.
    #[serde(rename = "calificacion")]
    pub rating: i32,
    #[serde(rename = "titulo", default)]
    pub title: Option<String>,
    #[serde(rename = "comentario", default)]
    pub comment: Option<String>,
    #[serde(rename = "compra_verificada", default)]
    pub verified_purchase: bool,
    #[serde(rename = "votos_util", default)]
    pub helpful_votes: i32,
    #[serde(rename = "votos_no_util", default)]
    pub unhelpful_votes: i32,
    #[serde(rename = "aprobado", default)]
    pub approved: bool,
    #[serde(rename = "fecha_creacion", default)]
    pub created_at: String,
    #[serde(rename = "usuario_nombre", default)]
    pub author_first_name: Option<String>,
    #[serde(rename = "usuario_apellido", default)]
    pub author_last_name: Option<String>,
    #[serde(rename = "imagenes", default)]
    pub images: Option<Vec<String>>,
}

/// Query parameters for `GET /productos`. Unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(rename = "categoria", skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryId>,
    #[serde(rename = "subcategoria", skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<SubcategoryId>,
    #[serde(rename = "marca", skip_serializing_if = "Option::is_none")]
    pub brand: Option<BrandId>,
    #[serde(rename = "familia", skip_serializing_if = "Option::is_none")]
    pub family: Option<FamilyId>,
    #[serde(rename = "precio_min", skip_serializing_if = "Option::is_none")]
    pub min_price: Option<Decimal>,
    #[serde(rename = "precio_max", skip_serializing_if = "Option::is_none")]
    pub max_price: Option<Decimal>,
    #[serde(rename = "destacados", skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(rename = "nuevos", skip_serializing_if = "Option::is_none")]
    pub new_arrivals: Option<bool>,
    #[serde(rename = "ofertas", skip_serializing_if = "Option::is_none")]
    pub on_sale: Option<bool>,
    #[serde(rename = "en_stock", skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_accepts_numeric_and_string_prices() {
        let json = r#"[
            {"id_producto_detalle": 1, "nombre": "Mouse", "sku": "M-1", "marca": "Logi",
             "precio_venta": 59.9, "precio_base": 79.9, "stock_disponible": 4,
             "total_valoraciones": 0, "categoria": "Periféricos"},
            {"id_producto_detalle": 2, "nombre": "Teclado", "sku": "K-1", "marca": "Logi",
             "precio_venta": "120.00", "precio_base": "120.00"}
        ]"#;
        let products: Vec<Product> = serde_json::from_str(json).unwrap();
        assert_eq!(products[0].sale_price, Decimal::new(599, 1));
        assert_eq!(products[1].base_price, Decimal::new(12000, 2));
        assert_eq!(products[1].stock, 0);
    }

    #[test]
    fn test_filters_serialize_only_set_fields() {
        let filters = ProductFilters {
            featured: Some(true),
            in_stock: Some(true),
            limit: Some(8),
            ..ProductFilters::default()
        };
        let json = serde_json::to_value(&filters).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"destacados": true, "en_stock": true, "limit": 8})
        );
    }

    #[test]
    fn test_product_detail_flattens_listing_fields() {
        let json = r#"{
            "id_producto_detalle": 3, "nombre": "Laptop X", "sku": "LX-1", "marca": "Acme",
            "precio_venta": 3500.5, "modelo": "X-2025", "imagenes": ["a.png"],
            "garantia_meses": 12
        }"#;
        let detail: ProductDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.summary.id, VariantId::new(3));
        assert_eq!(detail.model.as_deref(), Some("X-2025"));
        assert_eq!(detail.warranty_months, Some(12));
        assert!(detail.summary.base_price.is_none());
    }
}
