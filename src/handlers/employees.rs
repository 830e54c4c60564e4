// src/handlers/employees.rs

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
    models::people::{Employee, NewEmployee},
    services::seed,
};

// GET /api/employees
#[utoipa::path(
    get,
    path = "/api/employees",
    tag = "Funcionários",
    responses((status = 200, description = "Lista de funcionários", body = Vec<Employee>))
)]
pub async fn get_all(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let employees = state.employees.list().await?;
    Ok(Json(employees))
}

// GET /api/employees/{id}
#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    tag = "Funcionários",
    params(("id" = i32, Path, description = "Id do funcionário")),
    responses(
        (status = 200, description = "Funcionário encontrado", body = Employee),
        (status = 404, description = "Funcionário não encontrado")
    )
)]
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let employee = state
        .employees
        .find(id)
        .await?
        .ok_or(AppError::NotFound("funcionário"))?;
    Ok(Json(employee))
}

// POST /api/employees
#[utoipa::path(
    post,
    path = "/api/employees",
    tag = "Funcionários",
    request_body = NewEmployee,
    responses(
        (status = 201, description = "Funcionário criado", body = Employee),
        (status = 400, description = "Payload inválido")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewEmployee>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let created = state.employees.create(&payload).await?;
    let location = format!("/api/employees/{}", created.employee_id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    ))
}

// PUT /api/employees/{id}
#[utoipa::path(
    put,
    path = "/api/employees/{id}",
    tag = "Funcionários",
    params(("id" = i32, Path, description = "Id do funcionário")),
    request_body = Employee,
    responses(
        (status = 204, description = "Funcionário atualizado"),
        (status = 400, description = "Chaves não coincidem ou a chefia criaria ciclo"),
        (status = 404, description = "Funcionário não encontrado")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<Employee>,
) -> Result<impl IntoResponse, AppError> {
    state.employees.update(id, &payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

// DELETE /api/employees/{id}
#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    tag = "Funcionários",
    params(("id" = i32, Path, description = "Id do funcionário")),
    responses(
        (status = 204, description = "Funcionário removido"),
        (status = 404, description = "Funcionário não encontrado"),
        (status = 409, description = "Funcionário ainda tem subordinados ou pedidos")
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    state.employees.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// GET /api/employees/{id}/manager → chefe do funcionário
// "Sem chefe atribuído" e "funcionário inexistente" respondem 404 com
// mensagens distintas.
#[utoipa::path(
    get,
    path = "/api/employees/{id}/manager",
    tag = "Funcionários",
    params(("id" = i32, Path, description = "Id do funcionário")),
    responses(
        (status = 200, description = "Chefe do funcionário", body = Employee),
        (status = 404, description = "Funcionário inexistente ou sem chefe atribuído")
    )
)]
pub async fn get_manager(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let manager = state.employees.manager_of(id).await?;
    Ok(Json(manager))
}

// POST /api/employees/bulk → funcionários de teste com telefone único
#[utoipa::path(
    post,
    path = "/api/employees/bulk",
    tag = "Funcionários",
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

    let existing = state.employees.phones().await?;
    let mut rng = StdRng::from_entropy();
    let batch = seed::employee_batch(&mut rng, count, existing);

    if batch.is_empty() {
        return Err(AppError::GenerationExhausted);
    }

    let inserted = state.employees.insert_batch(&batch).await?;
    tracing::info!("{} funcionários inseridos.", inserted);
    Ok(Json(json!({ "inserted": inserted })))
}
