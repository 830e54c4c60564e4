// src/db/product_repo.rs

use std::collections::HashMap;

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::ensure_matching_key,
    models::catalog::{Category, NewProduct, Product, ProductWithRelations, Supplier},
};

/// Categorias semeadas pelo endpoint de init; a carga massiva de produtos
/// sorteia entre elas.
pub const SEED_CATEGORIES: [&str; 2] = ["SERVIDORES", "CLOUD"];

/// offset = (página - 1) × tamanho. Página começa em 1. Aritmética
/// verificada: parâmetros que estourariam i64 viram `None` e o chamador
/// os rejeita em vez de deixar o OFFSET ficar negativo.
pub fn page_offset(page: i64, page_size: i64) -> Option<i64> {
    page.checked_sub(1)?.checked_mul(page_size)
}

#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Listagem com fornecedor e categoria anexados. Três consultas e dois
    /// mapas em memória em vez de N+1.
    pub async fn list_with_relations(&self) -> Result<Vec<ProductWithRelations>, AppError> {
        let products =
            sqlx::query_as::<_, Product>("SELECT * FROM products ORDER BY product_id ASC")
                .fetch_all(&self.pool)
                .await?;
        let suppliers = sqlx::query_as::<_, Supplier>("SELECT * FROM suppliers")
            .fetch_all(&self.pool)
            .await?;
        let categories = sqlx::query_as::<_, Category>("SELECT * FROM categories")
            .fetch_all(&self.pool)
            .await?;

        let suppliers: HashMap<i32, Supplier> =
            suppliers.into_iter().map(|s| (s.supplier_id, s)).collect();
        let categories: HashMap<i32, Category> =
            categories.into_iter().map(|c| (c.category_id, c)).collect();

        Ok(products
            .into_iter()
            .map(|product| {
                let supplier = suppliers.get(&product.supplier_id).cloned();
                let category = categories.get(&product.category_id).cloned();
                ProductWithRelations { product, supplier, category }
            })
            .collect())
    }

    pub async fn find(&self, id: i32) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE product_id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(product)
    }

    /// Produto com as relações anexadas (visão de detalhe).
    pub async fn find_with_relations(
        &self,
        id: i32,
    ) -> Result<Option<ProductWithRelations>, AppError> {
        let Some(product) = self.find(id).await? else {
            return Ok(None);
        };

        let supplier =
            sqlx::query_as::<_, Supplier>("SELECT * FROM suppliers WHERE supplier_id = $1")
                .bind(product.supplier_id)
                .fetch_optional(&self.pool)
                .await?;
        let category =
            sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE category_id = $1")
                .bind(product.category_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(Some(ProductWithRelations { product, supplier, category }))
    }

    /// Busca por substring no nome, sem diferenciar maiúsculas (ILIKE).
    /// Ordenação estável por product_id para a paginação ser reprodutível.
    pub async fn list_filtered(
        &self,
        search: &str,
        page: i64,
        page_size: i64,
    ) -> Result<Vec<Product>, AppError> {
        let offset = page_offset(page, page_size).ok_or_else(|| {
            AppError::InvalidArgument(
                "Os parâmetros 'page' e 'pageSize' excedem a faixa suportada.".to_string(),
            )
        })?;

        let pattern = format!("%{search}%");
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT * FROM products
            WHERE product_name ILIKE $1
            ORDER BY product_id ASC
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(pattern)
        .bind(offset)
        .bind(page_size)
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    pub async fn create(&self, product: &NewProduct) -> Result<Product, AppError> {
        let created = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (
                product_name, supplier_id, category_id, quantity_per_unit,
                unit_price, units_in_stock, units_on_order, reorder_level, discontinued
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(&product.product_name)
        .bind(product.supplier_id)
        .bind(product.category_id)
        .bind(&product.quantity_per_unit)
        .bind(product.unit_price)
        .bind(product.units_in_stock)
        .bind(product.units_on_order)
        .bind(product.reorder_level)
        .bind(product.discontinued)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    pub async fn update(&self, id: i32, product: &Product) -> Result<(), AppError> {
        ensure_matching_key(id, product.product_id)?;

        let result = sqlx::query(
            r#"
            UPDATE products SET
                product_name = $2, supplier_id = $3, category_id = $4,
                quantity_per_unit = $5, unit_price = $6, units_in_stock = $7,
                units_on_order = $8, reorder_level = $9, discontinued = $10
            WHERE product_id = $1
            "#,
        )
        .bind(id)
        .bind(&product.product_name)
        .bind(product.supplier_id)
        .bind(product.category_id)
        .bind(&product.quantity_per_unit)
        .bind(product.unit_price)
        .bind(product.units_in_stock)
        .bind(product.units_on_order)
        .bind(product.reorder_level)
        .bind(product.discontinued)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("produto"));
        }
        Ok(())
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        // RESTRICT: falha se o produto ainda aparece em itens de pedido.
        let result = sqlx::query("DELETE FROM products WHERE product_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| crate::common::error::map_delete_error(e, "produto"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("produto"));
        }
        Ok(())
    }

    /// Garante as categorias padrão de forma idempotente.
    pub async fn ensure_default_categories(&self) -> Result<(), AppError> {
        for name in SEED_CATEGORIES {
            sqlx::query(
                r#"
                INSERT INTO categories (category_name, description, picture)
                VALUES ($1, $2, NULL)
                ON CONFLICT (category_name) DO NOTHING
                "#,
            )
            .bind(name)
            .bind(format!("Categoria para {}", name.to_lowercase()))
            .execute(&self.pool)
            .await?;
        }
        Ok(())
    }

    /// Ids das categorias semeadas; vazio enquanto o init não rodou.
    pub async fn seed_category_ids(&self) -> Result<Vec<i32>, AppError> {
        let ids: Vec<i32> = sqlx::query_scalar(
            "SELECT category_id FROM categories WHERE category_name = ANY($1)",
        )
        .bind(SEED_CATEGORIES.map(String::from).to_vec())
        .fetch_all(&self.pool)
        .await?;
        Ok(ids)
    }

    /// Dependência da geração em massa: fornecedores existentes.
    pub async fn supplier_ids(&self) -> Result<Vec<i32>, AppError> {
        let ids: Vec<i32> =
            sqlx::query_scalar("SELECT supplier_id FROM suppliers ORDER BY supplier_id ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(ids)
    }

    pub async fn insert_batch(&self, products: &[NewProduct]) -> Result<u64, AppError> {
        let mut tx = self.pool.begin().await?;
        for product in products {
            sqlx::query(
                r#"
                INSERT INTO products (
                    product_name, supplier_id, category_id, quantity_per_unit,
                    unit_price, units_in_stock, units_on_order, reorder_level, discontinued
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                "#,
            )
            .bind(&product.product_name)
            .bind(product.supplier_id)
            .bind(product.category_id)
            .bind(&product.quantity_per_unit)
            .bind(product.unit_price)
            .bind(product.units_in_stock)
            .bind(product.units_on_order)
            .bind(product.reorder_level)
            .bind(product.discontinued)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(products.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_offset_starts_at_zero() {
        assert_eq!(page_offset(1, 10), Some(0));
    }

    #[test]
    fn page_two_of_five_skips_first_five() {
        // Página 2 com tamanho 5 devolve os registros 6..=10.
        assert_eq!(page_offset(2, 5), Some(5));
    }

    #[test]
    fn page_offset_scales_with_page_size() {
        assert_eq!(page_offset(4, 25), Some(75));
    }

    #[test]
    fn page_offset_rejects_overflowing_parameters() {
        // Sem a multiplicação verificada, i64::MAX × 2 estoura (pânico em
        // debug, OFFSET negativo em release).
        assert_eq!(page_offset(i64::MAX, 2), None);
        assert_eq!(page_offset(3, i64::MAX), None);
        assert_eq!(page_offset(i64::MAX, 1), Some(i64::MAX - 1));
    }
}
