// src/handlers/customers.rs

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
    models::people::Customer,
    services::seed,
};

// GET /api/customers
#[utoipa::path(
    get,
    path = "/api/customers",
    tag = "Clientes",
    responses((status = 200, description = "Lista de clientes", body = Vec<Customer>))
)]
pub async fn get_all(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let customers = state.customers.list().await?;
    Ok(Json(customers))
}

// GET /api/customers/{id}
#[utoipa::path(
    get,
    path = "/api/customers/{id}",
    tag = "Clientes",
    params(("id" = String, Path, description = "Código do cliente")),
    responses(
        (status = 200, description = "Cliente encontrado", body = Customer),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let customer = state
        .customers
        .find(&id)
        .await?
        .ok_or(AppError::NotFound("cliente"))?;
    Ok(Json(customer))
}

// POST /api/customers
#[utoipa::path(
    post,
    path = "/api/customers",
    tag = "Clientes",
    request_body = Customer,
    responses(
        (status = 201, description = "Cliente criado", body = Customer),
        (status = 400, description = "Código já em uso ou payload inválido")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<Customer>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let created = state.customers.create(&payload).await?;
    let location = format!("/api/customers/{}", created.customer_id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    ))
}

// PUT /api/customers/{id}
#[utoipa::path(
    put,
    path = "/api/customers/{id}",
    tag = "Clientes",
    params(("id" = String, Path, description = "Código do cliente")),
    request_body = Customer,
    responses(
        (status = 204, description = "Cliente atualizado"),
        (status = 400, description = "Chaves não coincidem"),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<Customer>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    state.customers.update(&id, &payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

// DELETE /api/customers/{id}
#[utoipa::path(
    delete,
    path = "/api/customers/{id}",
    tag = "Clientes",
    params(("id" = String, Path, description = "Código do cliente")),
    responses(
        (status = 204, description = "Cliente removido"),
        (status = 404, description = "Cliente não encontrado"),
        (status = 409, description = "Cliente ainda possui pedidos")
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.customers.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// POST /api/customers/bulk → clientes de teste com código único
#[utoipa::path(
    post,
    path = "/api/customers/bulk",
    tag = "Clientes",
    params(BulkParams),
    responses(
        (status = 200, description = "Quantidade inserida"),
        (status = 400, description = "Count inválido ou nenhum registro único gerado")
    )
)]
pub async fn bulk_insert(
    State(state): State<AppState>,
    Query(params): Query<BulkParams>,
) -> Result<impl IntoResponse, AppError> {
    let count = check_bulk_count(params.count.unwrap_or(10))?;

    // Carrega os códigos existentes uma vez e resolve a unicidade em
    // memória antes de persistir o lote inteiro numa transação.
    let existing = state.customers.codes().await?;
    let mut rng = StdRng::from_entropy();
    let batch = seed::customer_batch(&mut rng, count, existing);

    if batch.is_empty() {
        return Err(AppError::GenerationExhausted);
    }

    let inserted = state.customers.insert_batch(&batch).await?;
    tracing::info!("{} clientes inseridos.", inserted);
    Ok(Json(json!({ "inserted": inserted })))
}
