// src/db/order_detail_repo.rs

use std::collections::{HashMap, HashSet};

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::ensure_matching_key,
    models::catalog::Product,
    models::orders::{Order, OrderDetail, OrderDetailWithRelations},
};

// Repositório da associação pedido-produto. A identidade é a chave
// composta (order_id, product_id), sem surrogate.
#[derive(Clone)]
pub struct OrderDetailRepository {
    pool: PgPool,
}

impl OrderDetailRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Listagem com o pedido e o produto anexados.
    pub async fn list_with_relations(&self) -> Result<Vec<OrderDetailWithRelations>, AppError> {
        let details = sqlx::query_as::<_, OrderDetail>(
            "SELECT * FROM order_details ORDER BY order_id ASC, product_id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        let orders = sqlx::query_as::<_, Order>("SELECT * FROM orders")
            .fetch_all(&self.pool)
            .await?;
        let products = sqlx::query_as::<_, Product>("SELECT * FROM products")
            .fetch_all(&self.pool)
            .await?;

        let orders: HashMap<i32, Order> = orders.into_iter().map(|o| (o.order_id, o)).collect();
        let products: HashMap<i32, Product> =
            products.into_iter().map(|p| (p.product_id, p)).collect();

        Ok(details
            .into_iter()
            .map(|detail| {
                let order = orders.get(&detail.order_id).cloned();
                let product = products.get(&detail.product_id).cloned();
                OrderDetailWithRelations { detail, order, product }
            })
            .collect())
    }

    pub async fn find(&self, order_id: i32, product_id: i32) -> Result<Option<OrderDetail>, AppError> {
        let detail = sqlx::query_as::<_, OrderDetail>(
            "SELECT * FROM order_details WHERE order_id = $1 AND product_id = $2",
        )
        .bind(order_id)
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(detail)
    }

    pub async fn find_with_relations(
        &self,
        order_id: i32,
        product_id: i32,
    ) -> Result<Option<OrderDetailWithRelations>, AppError> {
        let Some(detail) = self.find(order_id, product_id).await? else {
            return Ok(None);
        };

        let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE order_id = $1")
            .bind(order_id)
            .fetch_optional(&self.pool)
            .await?;
        let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE product_id = $1")
            .bind(product_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(Some(OrderDetailWithRelations { detail, order, product }))
    }

    pub async fn create(&self, detail: &OrderDetail) -> Result<OrderDetail, AppError> {
        let created = sqlx::query_as::<_, OrderDetail>(
            r#"
            INSERT INTO order_details (order_id, product_id, unit_price, quantity, discount)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(detail.order_id)
        .bind(detail.product_id)
        .bind(detail.unit_price)
        .bind(detail.quantity)
        .bind(detail.discount)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::Conflict(format!(
                        "Já existe um item para o par pedido {} / produto {}.",
                        detail.order_id, detail.product_id
                    ));
                }
            }
            AppError::DatabaseError(e)
        })?;

        Ok(created)
    }

    pub async fn update(
        &self,
        order_id: i32,
        product_id: i32,
        detail: &OrderDetail,
    ) -> Result<(), AppError> {
        ensure_matching_key(order_id, detail.order_id)?;
        ensure_matching_key(product_id, detail.product_id)?;

        let result = sqlx::query(
            r#"
            UPDATE order_details SET unit_price = $3, quantity = $4, discount = $5
            WHERE order_id = $1 AND product_id = $2
            "#,
        )
        .bind(order_id)
        .bind(product_id)
        .bind(detail.unit_price)
        .bind(detail.quantity)
        .bind(detail.discount)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("item de pedido"));
        }
        Ok(())
    }

    pub async fn delete(&self, order_id: i32, product_id: i32) -> Result<(), AppError> {
        let result =
            sqlx::query("DELETE FROM order_details WHERE order_id = $1 AND product_id = $2")
                .bind(order_id)
                .bind(product_id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("item de pedido"));
        }
        Ok(())
    }

    /// Sonda de unicidade da geração em massa: pares já ocupados.
    pub async fn pairs(&self) -> Result<HashSet<(i32, i32)>, AppError> {
        let pairs: Vec<(i32, i32)> =
            sqlx::query_as("SELECT order_id, product_id FROM order_details")
                .fetch_all(&self.pool)
                .await?;
        Ok(pairs.into_iter().collect())
    }

    // Dependências da geração: os candidatos são sorteados entre os
    // pedidos e produtos existentes.

    pub async fn order_ids(&self) -> Result<Vec<i32>, AppError> {
        let ids: Vec<i32> = sqlx::query_scalar("SELECT order_id FROM orders ORDER BY order_id ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(ids)
    }

    pub async fn product_ids(&self) -> Result<Vec<i32>, AppError> {
        let ids: Vec<i32> =
            sqlx::query_scalar("SELECT product_id FROM products ORDER BY product_id ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(ids)
    }

    pub async fn insert_batch(&self, details: &[OrderDetail]) -> Result<u64, AppError> {
        let mut tx = self.pool.begin().await?;
        for detail in details {
            sqlx::query(
                r#"
                INSERT INTO order_details (order_id, product_id, unit_price, quantity, discount)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(detail.order_id)
            .bind(detail.product_id)
            .bind(detail.unit_price)
            .bind(detail.quantity)
            .bind(detail.discount)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(details.len() as u64)
    }
}
