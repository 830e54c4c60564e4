// src/handlers/order_details.rs

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
    models::orders::{OrderDetail, OrderDetailWithRelations},
    services::seed,
};

// GET /api/orderdetails → listagem com pedido e produto anexados
#[utoipa::path(
    get,
    path = "/api/orderdetails",
    tag = "Itens de pedido",
    responses((status = 200, description = "Lista de itens", body = Vec<OrderDetailWithRelations>))
)]
pub async fn get_all(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let details = state.order_details.list_with_relations().await?;
    Ok(Json(details))
}

// GET /api/orderdetails/{orderId}/{productId}
#[utoipa::path(
    get,
    path = "/api/orderdetails/{orderId}/{productId}",
    tag = "Itens de pedido",
    params(
        ("orderId" = i32, Path, description = "Id do pedido"),
        ("productId" = i32, Path, description = "Id do produto")
    ),
    responses(
        (status = 200, description = "Item encontrado", body = OrderDetailWithRelations),
        (status = 404, description = "Item não encontrado")
    )
)]
pub async fn get_by_id(
    State(state): State<AppState>,
    Path((order_id, product_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let detail = state
        .order_details
        .find_with_relations(order_id, product_id)
        .await?
        .ok_or(AppError::NotFound("item de pedido"))?;
    Ok(Json(detail))
}

// POST /api/orderdetails
#[utoipa::path(
    post,
    path = "/api/orderdetails",
    tag = "Itens de pedido",
    request_body = OrderDetail,
    responses(
        (status = 201, description = "Item criado", body = OrderDetail),
        (status = 400, description = "Par pedido/produto já existe ou payload inválido")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<OrderDetail>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let created = state.order_details.create(&payload).await?;
    let location = format!(
        "/api/orderdetails/{}/{}",
        created.order_id, created.product_id
    );
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    ))
}

// PUT /api/orderdetails/{orderId}/{productId}
#[utoipa::path(
    put,
    path = "/api/orderdetails/{orderId}/{productId}",
    tag = "Itens de pedido",
    params(
        ("orderId" = i32, Path, description = "Id do pedido"),
        ("productId" = i32, Path, description = "Id do produto")
    ),
    request_body = OrderDetail,
    responses(
        (status = 204, description = "Item atualizado"),
        (status = 400, description = "Chaves não coincidem"),
        (status = 404, description = "Item não encontrado")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path((order_id, product_id)): Path<(i32, i32)>,
    Json(payload): Json<OrderDetail>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    state
        .order_details
        .update(order_id, product_id, &payload)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// DELETE /api/orderdetails/{orderId}/{productId}
#[utoipa::path(
    delete,
    path = "/api/orderdetails/{orderId}/{productId}",
    tag = "Itens de pedido",
    params(
        ("orderId" = i32, Path, description = "Id do pedido"),
        ("productId" = i32, Path, description = "Id do produto")
    ),
    responses(
        (status = 204, description = "Item removido"),
        (status = 404, description = "Item não encontrado")
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path((order_id, product_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    state.order_details.delete(order_id, product_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// POST /api/orderdetails/bulk → itens de teste com par (pedido, produto) único
#[utoipa::path(
    post,
    path = "/api/orderdetails/bulk",
    tag = "Itens de pedido",
    params(BulkParams),
    responses(
        (status = 200, description = "Quantidade inserida"),
        (status = 400, description = "Count inválido, dependências ausentes ou nenhum par livre")
    )
)]
pub async fn bulk_insert(
    State(state): State<AppState>,
    Query(params): Query<BulkParams>,
) -> Result<impl IntoResponse, AppError> {
    let count = check_bulk_count(params.count.unwrap_or(5))?;

    let order_ids = state.order_details.order_ids().await?;
    let product_ids = state.order_details.product_ids().await?;
    if order_ids.is_empty() || product_ids.is_empty() {
        return Err(AppError::MissingDependency(
            "São necessários pedidos e produtos existentes.".to_string(),
        ));
    }

    let existing = state.order_details.pairs().await?;
    let mut rng = StdRng::from_entropy();
    let batch = seed::order_detail_batch(&mut rng, count, &order_ids, &product_ids, existing);

    if batch.is_empty() {
        return Err(AppError::GenerationExhausted);
    }

    let inserted = state.order_details.insert_batch(&batch).await?;
    tracing::info!("{} itens de pedido inseridos.", inserted);
    Ok(Json(json!({ "inserted": inserted })))
}
