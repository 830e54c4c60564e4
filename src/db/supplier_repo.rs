// src/db/supplier_repo.rs

use std::collections::HashSet;

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::ensure_matching_key,
    models::catalog::{NewSupplier, Supplier},
};

#[derive(Clone)]
pub struct SupplierRepository {
    pool: PgPool,
}

impl SupplierRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Supplier>, AppError> {
        let suppliers =
            sqlx::query_as::<_, Supplier>("SELECT * FROM suppliers ORDER BY supplier_id ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(suppliers)
    }

    pub async fn find(&self, id: i32) -> Result<Option<Supplier>, AppError> {
        let supplier =
            sqlx::query_as::<_, Supplier>("SELECT * FROM suppliers WHERE supplier_id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(supplier)
    }

    pub async fn create(&self, supplier: &NewSupplier) -> Result<Supplier, AppError> {
        let created = sqlx::query_as::<_, Supplier>(
            r#"
            INSERT INTO suppliers (
                company_name, contact_name, contact_title, address, city,
                region, postal_code, country, phone, fax, home_page
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(&supplier.company_name)
        .bind(&supplier.contact_name)
        .bind(&supplier.contact_title)
        .bind(&supplier.address)
        .bind(&supplier.city)
        .bind(&supplier.region)
        .bind(&supplier.postal_code)
        .bind(&supplier.country)
        .bind(&supplier.phone)
        .bind(&supplier.fax)
        .bind(&supplier.home_page)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    pub async fn update(&self, id: i32, supplier: &Supplier) -> Result<(), AppError> {
        ensure_matching_key(id, supplier.supplier_id)?;

        let result = sqlx::query(
            r#"
            UPDATE suppliers SET
                company_name = $2, contact_name = $3, contact_title = $4,
                address = $5, city = $6, region = $7, postal_code = $8,
                country = $9, phone = $10, fax = $11, home_page = $12
            WHERE supplier_id = $1
            "#,
        )
        .bind(id)
        .bind(&supplier.company_name)
        .bind(&supplier.contact_name)
        .bind(&supplier.contact_title)
        .bind(&supplier.address)
        .bind(&supplier.city)
        .bind(&supplier.region)
        .bind(&supplier.postal_code)
        .bind(&supplier.country)
        .bind(&supplier.phone)
        .bind(&supplier.fax)
        .bind(&supplier.home_page)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("fornecedor"));
        }
        Ok(())
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        // RESTRICT: falha se o fornecedor ainda tem produtos.
        let result = sqlx::query("DELETE FROM suppliers WHERE supplier_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| crate::common::error::map_delete_error(e, "fornecedor"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("fornecedor"));
        }
        Ok(())
    }

    /// Sonda de unicidade da geração em massa: nomes de empresa existentes.
    pub async fn company_names(&self) -> Result<HashSet<String>, AppError> {
        let names: Vec<String> = sqlx::query_scalar("SELECT company_name FROM suppliers")
            .fetch_all(&self.pool)
            .await?;
        Ok(names.into_iter().collect())
    }

    pub async fn insert_batch(&self, suppliers: &[NewSupplier]) -> Result<u64, AppError> {
        let mut tx = self.pool.begin().await?;
        for supplier in suppliers {
            sqlx::query(
                r#"
                INSERT INTO suppliers (
                    company_name, contact_name, contact_title, address, city,
                    region, postal_code, country, phone, fax, home_page
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                "#,
            )
            .bind(&supplier.company_name)
            .bind(&supplier.contact_name)
            .bind(&supplier.contact_title)
            .bind(&supplier.address)
            .bind(&supplier.city)
            .bind(&supplier.region)
            .bind(&supplier.postal_code)
            .bind(&supplier.country)
            .bind(&supplier.phone)
            .bind(&supplier.fax)
            .bind(&supplier.home_page)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(suppliers.len() as u64)
    }
}
