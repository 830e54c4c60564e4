// src/handlers/suppliers.rs

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
    models::catalog::{NewSupplier, Supplier},
    services::seed,
};

// GET /api/suppliers
#[utoipa::path(
    get,
    path = "/api/suppliers",
    tag = "Fornecedores",
    responses((status = 200, description = "Lista de fornecedores", body = Vec<Supplier>))
)]
pub async fn get_all(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let suppliers = state.suppliers.list().await?;
    Ok(Json(suppliers))
}

// GET /api/suppliers/{id}
#[utoipa::path(
    get,
    path = "/api/suppliers/{id}",
    tag = "Fornecedores",
    params(("id" = i32, Path, description = "Id do fornecedor")),
    responses(
        (status = 200, description = "Fornecedor encontrado", body = Supplier),
        (status = 404, description = "Fornecedor não encontrado")
    )
)]
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let supplier = state
        .suppliers
        .find(id)
        .await?
        .ok_or(AppError::NotFound("fornecedor"))?;
    Ok(Json(supplier))
}

// POST /api/suppliers
#[utoipa::path(
    post,
    path = "/api/suppliers",
    tag = "Fornecedores",
    request_body = NewSupplier,
    responses(
        (status = 201, description = "Fornecedor criado", body = Supplier),
        (status = 400, description = "Payload inválido")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewSupplier>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let created = state.suppliers.create(&payload).await?;
    let location = format!("/api/suppliers/{}", created.supplier_id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    ))
}

// PUT /api/suppliers/{id}
#[utoipa::path(
    put,
    path = "/api/suppliers/{id}",
    tag = "Fornecedores",
    params(("id" = i32, Path, description = "Id do fornecedor")),
    request_body = Supplier,
    responses(
        (status = 204, description = "Fornecedor atualizado"),
        (status = 400, description = "Chaves não coincidem"),
        (status = 404, description = "Fornecedor não encontrado")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<Supplier>,
) -> Result<impl IntoResponse, AppError> {
    state.suppliers.update(id, &payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

// DELETE /api/suppliers/{id}
#[utoipa::path(
    delete,
    path = "/api/suppliers/{id}",
    tag = "Fornecedores",
    params(("id" = i32, Path, description = "Id do fornecedor")),
    responses(
        (status = 204, description = "Fornecedor removido"),
        (status = 404, description = "Fornecedor não encontrado"),
        (status = 409, description = "Fornecedor ainda tem produtos")
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    state.suppliers.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// POST /api/suppliers/bulk → fornecedores de teste com nome único
#[utoipa::path(
    post,
    path = "/api/suppliers/bulk",
    tag = "Fornecedores",
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

    let existing = state.suppliers.company_names().await?;
    let mut rng = StdRng::from_entropy();
    let batch = seed::supplier_batch(&mut rng, count, existing);

    if batch.is_empty() {
        return Err(AppError::GenerationExhausted);
    }

    let inserted = state.suppliers.insert_batch(&batch).await?;
    tracing::info!("{} fornecedores inseridos sem duplicados.", inserted);
    Ok(Json(json!({ "inserted": inserted })))
}
