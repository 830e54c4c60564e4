// src/db/order_repo.rs

use std::collections::HashMap;

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::ensure_matching_key,
    models::orders::{NewOrder, Order, OrderDetail, OrderWithRelations},
    models::people::{Customer, Employee, Shipper},
};

#[derive(Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Listagem com cliente, funcionário, transportadora e itens anexados.
    pub async fn list_with_relations(&self) -> Result<Vec<OrderWithRelations>, AppError> {
        let orders = sqlx::query_as::<_, Order>("SELECT * FROM orders ORDER BY order_id ASC")
            .fetch_all(&self.pool)
            .await?;
        let (customers, employees, shippers, mut details) = self.relation_maps().await?;

        Ok(orders
            .into_iter()
            .map(|order| {
                let customer = customers.get(&order.customer_id).cloned();
                let employee = employees.get(&order.employee_id).cloned();
                let shipper = shippers.get(&order.ship_via).cloned();
                let order_details = details.remove(&order.order_id).unwrap_or_default();
                OrderWithRelations { order, customer, employee, shipper, order_details }
            })
            .collect())
    }

    pub async fn find(&self, id: i32) -> Result<Option<Order>, AppError> {
        let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE order_id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(order)
    }

    pub async fn find_with_relations(&self, id: i32) -> Result<Option<OrderWithRelations>, AppError> {
        let Some(order) = self.find(id).await? else {
            return Ok(None);
        };

        let customer =
            sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE customer_id = $1")
                .bind(&order.customer_id)
                .fetch_optional(&self.pool)
                .await?;
        let employee =
            sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE employee_id = $1")
                .bind(order.employee_id)
                .fetch_optional(&self.pool)
                .await?;
        let shipper = sqlx::query_as::<_, Shipper>("SELECT * FROM shippers WHERE shipper_id = $1")
            .bind(order.ship_via)
            .fetch_optional(&self.pool)
            .await?;
        let order_details = sqlx::query_as::<_, OrderDetail>(
            "SELECT * FROM order_details WHERE order_id = $1 ORDER BY product_id ASC",
        )
        .bind(order.order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(OrderWithRelations { order, customer, employee, shipper, order_details }))
    }

    pub async fn create(&self, order: &NewOrder) -> Result<Order, AppError> {
        let created = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (
                customer_id, employee_id, order_date, required_date, shipped_date,
                ship_via, freight, ship_name, ship_address, ship_city,
                ship_region, ship_postal_code, ship_country
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(&order.customer_id)
        .bind(order.employee_id)
        .bind(order.order_date)
        .bind(order.required_date)
        .bind(order.shipped_date)
        .bind(order.ship_via)
        .bind(order.freight)
        .bind(&order.ship_name)
        .bind(&order.ship_address)
        .bind(&order.ship_city)
        .bind(&order.ship_region)
        .bind(&order.ship_postal_code)
        .bind(&order.ship_country)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    pub async fn update(&self, id: i32, order: &Order) -> Result<(), AppError> {
        ensure_matching_key(id, order.order_id)?;

        let result = sqlx::query(
            r#"
            UPDATE orders SET
                customer_id = $2, employee_id = $3, order_date = $4,
                required_date = $5, shipped_date = $6, ship_via = $7,
                freight = $8, ship_name = $9, ship_address = $10,
                ship_city = $11, ship_region = $12, ship_postal_code = $13,
                ship_country = $14
            WHERE order_id = $1
            "#,
        )
        .bind(id)
        .bind(&order.customer_id)
        .bind(order.employee_id)
        .bind(order.order_date)
        .bind(order.required_date)
        .bind(order.shipped_date)
        .bind(order.ship_via)
        .bind(order.freight)
        .bind(&order.ship_name)
        .bind(&order.ship_address)
        .bind(&order.ship_city)
        .bind(&order.ship_region)
        .bind(&order.ship_postal_code)
        .bind(&order.ship_country)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("pedido"));
        }
        Ok(())
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        // RESTRICT: falha se o pedido ainda tem itens.
        let result = sqlx::query("DELETE FROM orders WHERE order_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| crate::common::error::map_delete_error(e, "pedido"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("pedido"));
        }
        Ok(())
    }

    // Dependências da geração em massa de pedidos: as três entidades
    // referenciadas precisam existir (as FKs são RESTRICT).

    pub async fn customer_ids(&self) -> Result<Vec<String>, AppError> {
        let ids: Vec<String> =
            sqlx::query_scalar("SELECT customer_id FROM customers ORDER BY customer_id ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(ids)
    }

    pub async fn employee_ids(&self) -> Result<Vec<i32>, AppError> {
        let ids: Vec<i32> =
            sqlx::query_scalar("SELECT employee_id FROM employees ORDER BY employee_id ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(ids)
    }

    pub async fn shipper_ids(&self) -> Result<Vec<i32>, AppError> {
        let ids: Vec<i32> =
            sqlx::query_scalar("SELECT shipper_id FROM shippers ORDER BY shipper_id ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(ids)
    }

    pub async fn insert_batch(&self, orders: &[NewOrder]) -> Result<u64, AppError> {
        let mut tx = self.pool.begin().await?;
        for order in orders {
            sqlx::query(
                r#"
                INSERT INTO orders (
                    customer_id, employee_id, order_date, required_date, shipped_date,
                    ship_via, freight, ship_name, ship_address, ship_city,
                    ship_region, ship_postal_code, ship_country
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
                "#,
            )
            .bind(&order.customer_id)
            .bind(order.employee_id)
            .bind(order.order_date)
            .bind(order.required_date)
            .bind(order.shipped_date)
            .bind(order.ship_via)
            .bind(order.freight)
            .bind(&order.ship_name)
            .bind(&order.ship_address)
            .bind(&order.ship_city)
            .bind(&order.ship_region)
            .bind(&order.ship_postal_code)
            .bind(&order.ship_country)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(orders.len() as u64)
    }

    async fn relation_maps(
        &self,
    ) -> Result<
        (
            HashMap<String, Customer>,
            HashMap<i32, Employee>,
            HashMap<i32, Shipper>,
            HashMap<i32, Vec<OrderDetail>>,
        ),
        AppError,
    > {
        let customers = sqlx::query_as::<_, Customer>("SELECT * FROM customers")
            .fetch_all(&self.pool)
            .await?;
        let employees = sqlx::query_as::<_, Employee>("SELECT * FROM employees")
            .fetch_all(&self.pool)
            .await?;
        let shippers = sqlx::query_as::<_, Shipper>("SELECT * FROM shippers")
            .fetch_all(&self.pool)
            .await?;
        let details = sqlx::query_as::<_, OrderDetail>(
            "SELECT * FROM order_details ORDER BY order_id ASC, product_id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        let customers = customers.into_iter().map(|c| (c.customer_id.clone(), c)).collect();
        let employees = employees.into_iter().map(|e| (e.employee_id, e)).collect();
        let shippers = shippers.into_iter().map(|s| (s.shipper_id, s)).collect();

        let mut grouped: HashMap<i32, Vec<OrderDetail>> = HashMap::new();
        for detail in details {
            grouped.entry(detail.order_id).or_default().push(detail);
        }

        Ok((customers, employees, shippers, grouped))
    }
}
