// src/models/catalog.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

// --- Categorias ---
// Somente leitura na superfície HTTP; criadas pelo endpoint de init
// ("SERVIDORES" / "CLOUD") e anexadas ao detalhe do produto.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub category_id: i32,
    pub category_name: String,
    pub description: String,
    pub picture: Option<Vec<u8>>,
}

// --- Fornecedores ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub supplier_id: i32,
    pub company_name: String,
    pub contact_name: String,
    pub contact_title: String,
    pub address: String,
    pub city: String,
    pub region: String,
    pub postal_code: String,
    pub country: String,
    pub phone: String,
    pub fax: Option<String>,
    pub home_page: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewSupplier {
    #[validate(length(min = 1, message = "O nome da empresa é obrigatório."))]
    pub company_name: String,
    pub contact_name: String,
    pub contact_title: String,
    pub address: String,
    pub city: String,
    pub region: String,
    pub postal_code: String,
    pub country: String,
    pub phone: String,
    pub fax: Option<String>,
    pub home_page: Option<String>,
}

// --- Produtos ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub product_id: i32,
    pub product_name: String,
    pub supplier_id: i32,
    pub category_id: i32,
    pub quantity_per_unit: String,
    pub unit_price: Decimal,
    pub units_in_stock: i16,
    pub units_on_order: i16,
    pub reorder_level: i16,
    pub discontinued: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    #[validate(length(min = 1, message = "O nome do produto é obrigatório."))]
    pub product_name: String,
    pub supplier_id: i32,
    pub category_id: i32,
    pub quantity_per_unit: String,
    #[validate(custom(function = "crate::models::validate_not_negative"))]
    pub unit_price: Decimal,
    #[validate(range(min = 0, message = "O estoque não pode ser negativo."))]
    pub units_in_stock: i16,
    #[validate(range(min = 0, message = "As unidades pedidas não podem ser negativas."))]
    pub units_on_order: i16,
    #[validate(range(min = 0, message = "O nível de reposição não pode ser negativo."))]
    pub reorder_level: i16,
    #[serde(default)]
    pub discontinued: bool,
}

/// Produto com fornecedor e categoria anexados (listagem).
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductWithRelations {
    #[serde(flatten)]
    pub product: Product,
    pub supplier: Option<Supplier>,
    pub category: Option<Category>,
}

/// Detalhe do produto: além das relações, a imagem da categoria
/// re-codificada em base64 (ou null quando a categoria não tem imagem).
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub supplier: Option<Supplier>,
    pub category: Option<Category>,
    pub category_image: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_product_rejects_negative_price() {
        let payload = NewProduct {
            product_name: "Servidor X".into(),
            supplier_id: 1,
            category_id: 1,
            quantity_per_unit: "1 unidade".into(),
            unit_price: Decimal::new(-100, 2),
            units_in_stock: 5,
            units_on_order: 0,
            reorder_level: 1,
            discontinued: false,
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn new_product_accepts_valid_payload() {
        let payload = NewProduct {
            product_name: "Servidor X".into(),
            supplier_id: 1,
            category_id: 1,
            quantity_per_unit: "1 unidade".into(),
            unit_price: Decimal::new(4999, 2),
            units_in_stock: 5,
            units_on_order: 0,
            reorder_level: 1,
            discontinued: false,
        };
        assert!(payload.validate().is_ok());
    }
}
