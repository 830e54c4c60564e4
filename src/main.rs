// src/main.rs

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod models;
mod services;

use crate::config::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let customer_routes = Router::new()
        .route(
            "/",
            get(handlers::customers::get_all).post(handlers::customers::create),
        )
        .route("/bulk", post(handlers::customers::bulk_insert))
        .route(
            "/{id}",
            get(handlers::customers::get_by_id)
                .put(handlers::customers::update)
                .delete(handlers::customers::delete),
        );

    let employee_routes = Router::new()
        .route(
            "/",
            get(handlers::employees::get_all).post(handlers::employees::create),
        )
        .route("/bulk", post(handlers::employees::bulk_insert))
        .route(
            "/{id}",
            get(handlers::employees::get_by_id)
                .put(handlers::employees::update)
                .delete(handlers::employees::delete),
        )
        .route("/{id}/manager", get(handlers::employees::get_manager));

    let supplier_routes = Router::new()
        .route(
            "/",
            get(handlers::suppliers::get_all).post(handlers::suppliers::create),
        )
        .route("/bulk", post(handlers::suppliers::bulk_insert))
        .route(
            "/{id}",
            get(handlers::suppliers::get_by_id)
                .put(handlers::suppliers::update)
                .delete(handlers::suppliers::delete),
        );

    let product_routes = Router::new()
        .route(
            "/",
            get(handlers::products::get_all).post(handlers::products::create),
        )
        .route("/fil", get(handlers::products::get_filtered))
        .route("/bulk", post(handlers::products::bulk_insert))
        .route("/category/init", post(handlers::products::init_categories))
        .route(
            "/{id}",
            get(handlers::products::get_by_id)
                .put(handlers::products::update)
                .delete(handlers::products::delete),
        );

    let order_routes = Router::new()
        .route(
            "/",
            get(handlers::orders::get_all).post(handlers::orders::create),
        )
        .route("/bulk", post(handlers::orders::bulk_insert))
        .route(
            "/{id}",
            get(handlers::orders::get_by_id)
                .put(handlers::orders::update)
                .delete(handlers::orders::delete),
        );

    let order_detail_routes = Router::new()
        .route(
            "/",
            get(handlers::order_details::get_all).post(handlers::order_details::create),
        )
        .route("/bulk", post(handlers::order_details::bulk_insert))
        .route(
            "/{order_id}/{product_id}",
            get(handlers::order_details::get_by_id)
                .put(handlers::order_details::update)
                .delete(handlers::order_details::delete),
        );

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/customers", customer_routes)
        .nest("/api/employees", employee_routes)
        .nest("/api/suppliers", supplier_routes)
        .nest("/api/products", product_routes)
        .nest("/api/orders", order_routes)
        .nest("/api/orderdetails", order_detail_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!(
        "🚀 Servidor escutando em {}",
        listener.local_addr().expect("endereço local indisponível")
    );
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
