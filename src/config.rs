// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::db::{
    CustomerRepository, EmployeeRepository, OrderDetailRepository, OrderRepository,
    ProductRepository, SupplierRepository,
};

// Estado compartilhado: o pool e um repositório por recurso. Nenhum outro
// estado mutável atravessa requisições.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub customers: CustomerRepository,
    pub employees: EmployeeRepository,
    pub suppliers: SupplierRepository,
    pub products: ProductRepository,
    pub orders: OrderRepository,
    pub order_details: OrderDetailRepository,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self {
            customers: CustomerRepository::new(db_pool.clone()),
            employees: EmployeeRepository::new(db_pool.clone()),
            suppliers: SupplierRepository::new(db_pool.clone()),
            products: ProductRepository::new(db_pool.clone()),
            orders: OrderRepository::new(db_pool.clone()),
            order_details: OrderDetailRepository::new(db_pool.clone()),
            db_pool,
        })
    }
}
