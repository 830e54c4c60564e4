// src/handlers/orders.rs

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::{check_bulk_count, BulkParams},
    models::orders::{NewOrder, Order, OrderWithRelations},
    services::seed,
};

// GET /api/orders → listagem com cliente, funcionário, transportadora e itens
#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "Pedidos",
    responses((status = 200, description = "Lista de pedidos", body = Vec<OrderWithRelations>))
)]
pub async fn get_all(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let orders = state.orders.list_with_relations().await?;
    Ok(Json(orders))
}

// GET /api/orders/{id}
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = "Pedidos",
    params(("id" = i32, Path, description = "Id do pedido")),
    responses(
        (status = 200, description = "Pedido encontrado", body = OrderWithRelations),
        (status = 404, description = "Pedido não encontrado")
    )
)]
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let order = state
        .orders
        .find_with_relations(id)
        .await?
        .ok_or(AppError::NotFound("pedido"))?;
    Ok(Json(order))
}

// POST /api/orders
#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "Pedidos",
    request_body = NewOrder,
    responses(
        (status = 201, description = "Pedido criado", body = Order),
        (status = 400, description = "Payload inválido")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewOrder>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let created = state.orders.create(&payload).await?;
    let location = format!("/api/orders/{}", created.order_id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    ))
}

// PUT /api/orders/{id}
#[utoipa::path(
    put,
    path = "/api/orders/{id}",
    tag = "Pedidos",
    params(("id" = i32, Path, description = "Id do pedido")),
    request_body = Order,
    responses(
        (status = 204, description = "Pedido atualizado"),
        (status = 400, description = "Chaves não coincidem"),
        (status = 404, description = "Pedido não encontrado")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<Order>,
) -> Result<impl IntoResponse, AppError> {
    state.orders.update(id, &payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

// DELETE /api/orders/{id}
#[utoipa::path(
    delete,
    path = "/api/orders/{id}",
    tag = "Pedidos",
    params(("id" = i32, Path, description = "Id do pedido")),
    responses(
        (status = 204, description = "Pedido removido"),
        (status = 404, description = "Pedido não encontrado"),
        (status = 409, description = "Pedido ainda tem itens")
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    state.orders.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// POST /api/orders/bulk → pedidos de teste
#[utoipa::path(
    post,
    path = "/api/orders/bulk",
    tag = "Pedidos",
    params(BulkParams),
    responses(
        (status = 200, description = "Quantidade inserida"),
        (status = 400, description = "Count inválido ou dependências ausentes")
    )
)]
pub async fn bulk_insert(
    State(state): State<AppState>,
    Query(params): Query<BulkParams>,
) -> Result<impl IntoResponse, AppError> {
    let count = check_bulk_count(params.count.unwrap_or(10))?;

    // As FKs são RESTRICT: cada referência sorteada precisa existir.
    let customer_ids = state.orders.customer_ids().await?;
    if customer_ids.is_empty() {
        return Err(AppError::MissingDependency(
            "Não há clientes cadastrados para referenciar.".to_string(),
        ));
    }
    let employee_ids = state.orders.employee_ids().await?;
    if employee_ids.is_empty() {
        return Err(AppError::MissingDependency(
            "Não há funcionários cadastrados para referenciar.".to_string(),
        ));
    }
    let shipper_ids = state.orders.shipper_ids().await?;
    if shipper_ids.is_empty() {
        return Err(AppError::MissingDependency(
            "Não há transportadoras cadastradas para referenciar.".to_string(),
        ));
    }

    let mut rng = StdRng::from_entropy();
    let batch = seed::order_batch(&mut rng, count, &customer_ids, &employee_ids, &shipper_ids);
    let inserted = state.orders.insert_batch(&batch).await?;
    tracing::info!("{} pedidos inseridos.", inserted);
    Ok(Json(json!({ "inserted": inserted })))
}
