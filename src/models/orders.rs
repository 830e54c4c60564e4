// src/models/orders.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::models::catalog::Product;
use crate::models::people::{Customer, Employee, Shipper};

// --- Pedidos ---
// Os campos ship_* são um snapshot do endereço de entrega, distinto do
// endereço cadastrado do cliente.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: i32,
    pub customer_id: String,
    pub employee_id: i32,
    pub order_date: DateTime<Utc>,
    pub required_date: DateTime<Utc>,
    pub shipped_date: Option<DateTime<Utc>>,
    pub ship_via: i32,
    pub freight: Decimal,
    pub ship_name: String,
    pub ship_address: String,
    pub ship_city: String,
    pub ship_region: String,
    pub ship_postal_code: String,
    pub ship_country: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    #[validate(length(min = 1, message = "O código do cliente é obrigatório."))]
    pub customer_id: String,
    pub employee_id: i32,
    pub order_date: DateTime<Utc>,
    pub required_date: DateTime<Utc>,
    pub shipped_date: Option<DateTime<Utc>>,
    pub ship_via: i32,
    #[validate(custom(function = "crate::models::validate_not_negative"))]
    pub freight: Decimal,
    pub ship_name: String,
    pub ship_address: String,
    pub ship_city: String,
    pub ship_region: String,
    pub ship_postal_code: String,
    pub ship_country: String,
}

// --- Itens de pedido ---
// Chave composta (order_id, product_id): é tanto a linha quanto o payload
// de escrita, já que não existe surrogate.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    pub order_id: i32,
    pub product_id: i32,
    #[validate(custom(function = "crate::models::validate_not_negative"))]
    pub unit_price: Decimal,
    #[validate(range(min = 1, message = "A quantidade deve ser pelo menos 1."))]
    pub quantity: i16,
    #[validate(range(min = 0.0, max = 1.0, message = "O desconto deve estar entre 0 e 1."))]
    pub discount: f32,
}

/// Pedido com cliente, funcionário, transportadora e itens anexados.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderWithRelations {
    #[serde(flatten)]
    pub order: Order,
    pub customer: Option<Customer>,
    pub employee: Option<Employee>,
    pub shipper: Option<Shipper>,
    pub order_details: Vec<OrderDetail>,
}

/// Item de pedido com o pedido e o produto anexados.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetailWithRelations {
    #[serde(flatten)]
    pub detail: OrderDetail,
    pub order: Option<Order>,
    pub product: Option<Product>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(quantity: i16, discount: f32) -> OrderDetail {
        OrderDetail {
            order_id: 1,
            product_id: 1,
            unit_price: Decimal::new(1050, 2),
            quantity,
            discount,
        }
    }

    #[test]
    fn order_detail_requires_positive_quantity() {
        assert!(detail(0, 0.0).validate().is_err());
        assert!(detail(1, 0.0).validate().is_ok());
    }

    #[test]
    fn order_detail_bounds_discount() {
        assert!(detail(2, 1.5).validate().is_err());
        assert!(detail(2, -0.1).validate().is_err());
        assert!(detail(2, 0.25).validate().is_ok());
    }
}
