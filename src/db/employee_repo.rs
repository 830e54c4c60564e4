// src/db/employee_repo.rs

use std::collections::HashSet;

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::ensure_matching_key,
    models::people::{Employee, NewEmployee},
};

// O mesmo erro nas duas escritas (create e update): chefe inexistente é
// argumento inválido (400), nunca violação de FK estourando como 500.
fn missing_manager(manager_id: i32) -> AppError {
    AppError::InvalidArgument(format!("O chefe informado ({manager_id}) não existe."))
}

// Repositório de funcionários, incluindo a autorelação de gerência
// (reports_to). A floresta de gerência não pode ter ciclos.
#[derive(Clone)]
pub struct EmployeeRepository {
    pool: PgPool,
}

impl EmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Employee>, AppError> {
        let employees =
            sqlx::query_as::<_, Employee>("SELECT * FROM employees ORDER BY employee_id ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(employees)
    }

    pub async fn find(&self, id: i32) -> Result<Option<Employee>, AppError> {
        let employee =
            sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE employee_id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(employee)
    }

    pub async fn create(&self, employee: &NewEmployee) -> Result<Employee, AppError> {
        if let Some(manager_id) = employee.reports_to {
            if self.find(manager_id).await?.is_none() {
                return Err(missing_manager(manager_id));
            }
        }

        let created = sqlx::query_as::<_, Employee>(
            r#"
            INSERT INTO employees (
                last_name, first_name, title, title_of_courtesy,
                birth_date, hire_date, address, city, region, postal_code,
                country, home_phone, extension, photo, notes, reports_to
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING *
            "#,
        )
        .bind(&employee.last_name)
        .bind(&employee.first_name)
        .bind(&employee.title)
        .bind(&employee.title_of_courtesy)
        .bind(employee.birth_date)
        .bind(employee.hire_date)
        .bind(&employee.address)
        .bind(&employee.city)
        .bind(&employee.region)
        .bind(&employee.postal_code)
        .bind(&employee.country)
        .bind(&employee.home_phone)
        .bind(&employee.extension)
        .bind(&employee.photo)
        .bind(&employee.notes)
        .bind(employee.reports_to)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    pub async fn update(&self, id: i32, employee: &Employee) -> Result<(), AppError> {
        ensure_matching_key(id, employee.employee_id)?;

        if let Some(manager_id) = employee.reports_to {
            if self.find(manager_id).await?.is_none() {
                return Err(missing_manager(manager_id));
            }
            if manager_id == id || self.would_create_cycle(id, manager_id).await? {
                return Err(AppError::InvalidArgument(
                    "A atribuição de chefe criaria um ciclo na hierarquia.".to_string(),
                ));
            }
        }

        let result = sqlx::query(
            r#"
            UPDATE employees SET
                last_name = $2, first_name = $3, title = $4, title_of_courtesy = $5,
                birth_date = $6, hire_date = $7, address = $8, city = $9,
                region = $10, postal_code = $11, country = $12, home_phone = $13,
                extension = $14, photo = $15, notes = $16, reports_to = $17
            WHERE employee_id = $1
            "#,
        )
        .bind(id)
        .bind(&employee.last_name)
        .bind(&employee.first_name)
        .bind(&employee.title)
        .bind(&employee.title_of_courtesy)
        .bind(employee.birth_date)
        .bind(employee.hire_date)
        .bind(&employee.address)
        .bind(&employee.city)
        .bind(&employee.region)
        .bind(&employee.postal_code)
        .bind(&employee.country)
        .bind(&employee.home_phone)
        .bind(&employee.extension)
        .bind(&employee.photo)
        .bind(&employee.notes)
        .bind(employee.reports_to)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("funcionário"));
        }
        Ok(())
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        // RESTRICT: falha se o funcionário ainda gerencia alguém ou tem pedidos.
        let result = sqlx::query("DELETE FROM employees WHERE employee_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| crate::common::error::map_delete_error(e, "funcionário"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("funcionário"));
        }
        Ok(())
    }

    /// Resolve o chefe (um salto na autorelação). Distingue "funcionário
    /// inexistente" de "funcionário sem chefe atribuído".
    pub async fn manager_of(&self, id: i32) -> Result<Employee, AppError> {
        let employee = self.find(id).await?.ok_or(AppError::NotFound("funcionário"))?;
        let manager_id = employee.reports_to.ok_or(AppError::NoManagerAssigned)?;
        self.find(manager_id)
            .await?
            .ok_or(AppError::NotFound("funcionário"))
    }

    /// Sobe a cadeia de chefia a partir do chefe proposto; se alcançar o
    /// próprio funcionário, a atribuição fecharia um ciclo.
    async fn would_create_cycle(&self, employee_id: i32, manager_id: i32) -> Result<bool, AppError> {
        let cycle: bool = sqlx::query_scalar(
            r#"
            WITH RECURSIVE chain AS (
                SELECT employee_id, reports_to FROM employees WHERE employee_id = $1
                UNION ALL
                SELECT e.employee_id, e.reports_to
                FROM employees e
                JOIN chain c ON e.employee_id = c.reports_to
            )
            SELECT EXISTS (SELECT 1 FROM chain WHERE employee_id = $2)
            "#,
        )
        .bind(manager_id)
        .bind(employee_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(cycle)
    }

    /// Sonda de unicidade da geração em massa: telefones residenciais.
    pub async fn phones(&self) -> Result<HashSet<String>, AppError> {
        let phones: Vec<String> = sqlx::query_scalar("SELECT home_phone FROM employees")
            .fetch_all(&self.pool)
            .await?;
        Ok(phones.into_iter().collect())
    }

    pub async fn insert_batch(&self, employees: &[NewEmployee]) -> Result<u64, AppError> {
        let mut tx = self.pool.begin().await?;
        for employee in employees {
            sqlx::query(
                r#"
                INSERT INTO employees (
                    last_name, first_name, title, title_of_courtesy,
                    birth_date, hire_date, address, city, region, postal_code,
                    country, home_phone, extension, photo, notes, reports_to
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
                "#,
            )
            .bind(&employee.last_name)
            .bind(&employee.first_name)
            .bind(&employee.title)
            .bind(&employee.title_of_courtesy)
            .bind(employee.birth_date)
            .bind(employee.hire_date)
            .bind(&employee.address)
            .bind(&employee.city)
            .bind(&employee.region)
            .bind(&employee.postal_code)
            .bind(&employee.country)
            .bind(&employee.home_phone)
            .bind(&employee.extension)
            .bind(&employee.photo)
            .bind(&employee.notes)
            .bind(employee.reports_to)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(employees.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[test]
    fn missing_manager_is_a_client_error() {
        let err = missing_manager(99);
        assert!(matches!(err, AppError::InvalidArgument(_)));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
