// src/db/customer_repo.rs

use std::collections::HashSet;

use sqlx::PgPool;

use crate::{common::error::AppError, db::ensure_matching_key, models::people::Customer};

// Repositório de clientes. A chave é o código natural fornecido pelo
// chamador, então a unicidade é verificada na escrita além da PK.
#[derive(Clone)]
pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Customer>, AppError> {
        let customers =
            sqlx::query_as::<_, Customer>("SELECT * FROM customers ORDER BY customer_id ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(customers)
    }

    pub async fn find(&self, id: &str) -> Result<Option<Customer>, AppError> {
        let customer =
            sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE customer_id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(customer)
    }

    pub async fn create(&self, customer: &Customer) -> Result<Customer, AppError> {
        // Chave natural: verifica a colisão na escrita, antes do INSERT.
        if self.find(&customer.customer_id).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Já existe um cliente com o código '{}'.",
                customer.customer_id
            )));
        }

        let created = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (
                customer_id, company_name, contact_name, contact_title,
                address, city, region, postal_code, country, phone, fax
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(&customer.customer_id)
        .bind(&customer.company_name)
        .bind(&customer.contact_name)
        .bind(&customer.contact_title)
        .bind(&customer.address)
        .bind(&customer.city)
        .bind(&customer.region)
        .bind(&customer.postal_code)
        .bind(&customer.country)
        .bind(&customer.phone)
        .bind(&customer.fax)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // Corrida entre o check e o INSERT: a PK ainda nos protege.
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::Conflict(format!(
                        "Já existe um cliente com o código '{}'.",
                        customer.customer_id
                    ));
                }
            }
            AppError::DatabaseError(e)
        })?;

        Ok(created)
    }

    pub async fn update(&self, id: &str, customer: &Customer) -> Result<(), AppError> {
        ensure_matching_key(id, customer.customer_id.as_str())?;

        let result = sqlx::query(
            r#"
            UPDATE customers SET
                company_name = $2, contact_name = $3, contact_title = $4,
                address = $5, city = $6, region = $7, postal_code = $8,
                country = $9, phone = $10, fax = $11
            WHERE customer_id = $1
            "#,
        )
        .bind(id)
        .bind(&customer.company_name)
        .bind(&customer.contact_name)
        .bind(&customer.contact_title)
        .bind(&customer.address)
        .bind(&customer.city)
        .bind(&customer.region)
        .bind(&customer.postal_code)
        .bind(&customer.country)
        .bind(&customer.phone)
        .bind(&customer.fax)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("cliente"));
        }
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM customers WHERE customer_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| crate::common::error::map_delete_error(e, "cliente"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("cliente"));
        }
        Ok(())
    }

    /// Sonda de unicidade da geração em massa: todos os códigos existentes.
    pub async fn codes(&self) -> Result<HashSet<String>, AppError> {
        let codes: Vec<String> = sqlx::query_scalar("SELECT customer_id FROM customers")
            .fetch_all(&self.pool)
            .await?;
        Ok(codes.into_iter().collect())
    }

    /// Persiste o lote gerado numa única transação (tudo ou nada).
    pub async fn insert_batch(&self, customers: &[Customer]) -> Result<u64, AppError> {
        let mut tx = self.pool.begin().await?;
        for customer in customers {
            sqlx::query(
                r#"
                INSERT INTO customers (
                    customer_id, company_name, contact_name, contact_title,
                    address, city, region, postal_code, country, phone, fax
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                "#,
            )
            .bind(&customer.customer_id)
            .bind(&customer.company_name)
            .bind(&customer.contact_name)
            .bind(&customer.contact_title)
            .bind(&customer.address)
            .bind(&customer.city)
            .bind(&customer.region)
            .bind(&customer.postal_code)
            .bind(&customer.country)
            .bind(&customer.phone)
            .bind(&customer.fax)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(customers.len() as u64)
    }
}
