// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Clientes ---
        handlers::customers::get_all,
        handlers::customers::get_by_id,
        handlers::customers::create,
        handlers::customers::update,
        handlers::customers::delete,
        handlers::customers::bulk_insert,

        // --- Funcionários ---
        handlers::employees::get_all,
        handlers::employees::get_by_id,
        handlers::employees::create,
        handlers::employees::update,
        handlers::employees::delete,
        handlers::employees::get_manager,
        handlers::employees::bulk_insert,

        // --- Fornecedores ---
        handlers::suppliers::get_all,
        handlers::suppliers::get_by_id,
        handlers::suppliers::create,
        handlers::suppliers::update,
        handlers::suppliers::delete,
        handlers::suppliers::bulk_insert,

        // --- Produtos ---
        handlers::products::init_categories,
        handlers::products::get_all,
        handlers::products::get_by_id,
        handlers::products::create,
        handlers::products::update,
        handlers::products::delete,
        handlers::products::get_filtered,
        handlers::products::bulk_insert,

        // --- Pedidos ---
        handlers::orders::get_all,
        handlers::orders::get_by_id,
        handlers::orders::create,
        handlers::orders::update,
        handlers::orders::delete,
        handlers::orders::bulk_insert,

        // --- Itens de pedido ---
        handlers::order_details::get_all,
        handlers::order_details::get_by_id,
        handlers::order_details::create,
        handlers::order_details::update,
        handlers::order_details::delete,
        handlers::order_details::bulk_insert,
    ),
    components(
        schemas(
            models::catalog::Category,
            models::catalog::Supplier,
            models::catalog::NewSupplier,
            models::catalog::Product,
            models::catalog::NewProduct,
            models::catalog::ProductWithRelations,
            models::catalog::ProductDetail,
            models::people::Customer,
            models::people::Employee,
            models::people::NewEmployee,
            models::people::Shipper,
            models::orders::Order,
            models::orders::NewOrder,
            models::orders::OrderDetail,
            models::orders::OrderWithRelations,
            models::orders::OrderDetailWithRelations,
        )
    ),
    tags(
        (name = "Clientes", description = "CRUD de clientes e carga massiva"),
        (name = "Funcionários", description = "CRUD de funcionários, chefia e carga massiva"),
        (name = "Fornecedores", description = "CRUD de fornecedores e carga massiva"),
        (name = "Produtos", description = "CRUD de produtos, busca paginada e carga massiva"),
        (name = "Pedidos", description = "CRUD de pedidos e carga massiva"),
        (name = "Itens de pedido", description = "CRUD por chave composta e carga massiva"),
    ),
    info(
        title = "Northwind API",
        description = "API REST sobre o esquema Northwind com geração de dados de teste",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
