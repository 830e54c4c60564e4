// src/handlers/products.rs

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use base64::{engine::general_purpose, Engine as _};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::{check_bulk_count, BulkParams},
    models::catalog::{NewProduct, Product, ProductDetail, ProductWithRelations},
    services::seed,
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct FilterParams {
    #[serde(default)]
    pub search: String,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

// POST /api/products/category/init → garante as categorias padrão
#[utoipa::path(
    post,
    path = "/api/products/category/init",
    tag = "Produtos",
    responses((status = 200, description = "Categorias 'SERVIDORES' e 'CLOUD' garantidas"))
)]
pub async fn init_categories(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    state.products.ensure_default_categories().await?;
    Ok(Json(json!({
        "message": "Categorias 'SERVIDORES' e 'CLOUD' criadas."
    })))
}

// GET /api/products → listagem com fornecedor e categoria
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Produtos",
    responses((status = 200, description = "Lista de produtos", body = Vec<ProductWithRelations>))
)]
pub async fn get_all(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let products = state.products.list_with_relations().await?;
    Ok(Json(products))
}

// GET /api/products/{id} → detalhe com a imagem da categoria em base64
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Produtos",
    params(("id" = i32, Path, description = "Id do produto")),
    responses(
        (status = 200, description = "Detalhe do produto", body = ProductDetail),
        (status = 404, description = "Produto não encontrado")
    )
)]
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let with_relations = state
        .products
        .find_with_relations(id)
        .await?
        .ok_or(AppError::NotFound("produto"))?;

    // Imagem ausente vira null, nunca erro.
    let category_image = with_relations
        .category
        .as_ref()
        .and_then(|c| c.picture.as_ref())
        .map(|bytes| general_purpose::STANDARD.encode(bytes));

    Ok(Json(ProductDetail {
        product: with_relations.product,
        supplier: with_relations.supplier,
        category: with_relations.category,
        category_image,
    }))
}

// POST /api/products
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Produtos",
    request_body = NewProduct,
    responses(
        (status = 201, description = "Produto criado", body = Product),
        (status = 400, description = "Payload inválido")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewProduct>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let created = state.products.create(&payload).await?;
    let location = format!("/api/products/{}", created.product_id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    ))
}

// PUT /api/products/{id}
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Produtos",
    params(("id" = i32, Path, description = "Id do produto")),
    request_body = Product,
    responses(
        (status = 204, description = "Produto atualizado"),
        (status = 400, description = "Chaves não coincidem"),
        (status = 404, description = "Produto não encontrado")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<Product>,
) -> Result<impl IntoResponse, AppError> {
    state.products.update(id, &payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

// DELETE /api/products/{id}
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Produtos",
    params(("id" = i32, Path, description = "Id do produto")),
    responses(
        (status = 204, description = "Produto removido"),
        (status = 404, description = "Produto não encontrado"),
        (status = 409, description = "Produto ainda aparece em pedidos")
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    state.products.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// GET /api/products/fil → busca paginada por substring do nome
#[utoipa::path(
    get,
    path = "/api/products/fil",
    tag = "Produtos",
    params(FilterParams),
    responses(
        (status = 200, description = "Página de produtos filtrados", body = Vec<Product>),
        (status = 400, description = "Parâmetros de paginação inválidos")
    )
)]
pub async fn get_filtered(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> Result<impl IntoResponse, AppError> {
    let page = params.page.unwrap_or(1);
    let page_size = params.page_size.unwrap_or(10);
    if page < 1 || page_size < 1 {
        return Err(AppError::InvalidArgument(
            "Os parâmetros 'page' e 'pageSize' devem ser maiores que zero.".to_string(),
        ));
    }

    let products = state
        .products
        .list_filtered(&params.search, page, page_size)
        .await?;
    Ok(Json(products))
}

// POST /api/products/bulk → carga massiva de produtos aleatórios
#[utoipa::path(
    post,
    path = "/api/products/bulk",
    tag = "Produtos",
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
    let count = check_bulk_count(params.count.unwrap_or(500))?;

    let category_ids = state.products.seed_category_ids().await?;
    if category_ids.len() < 2 {
        return Err(AppError::MissingDependency(
            "As categorias 'SERVIDORES' e 'CLOUD' devem existir.".to_string(),
        ));
    }
    let supplier_ids = state.products.supplier_ids().await?;
    if supplier_ids.is_empty() {
        return Err(AppError::MissingDependency(
            "É preciso ao menos um fornecedor cadastrado.".to_string(),
        ));
    }

    let mut rng = StdRng::from_entropy();
    let batch = seed::product_batch(&mut rng, count, &supplier_ids, &category_ids);
    let inserted = state.products.insert_batch(&batch).await?;
    tracing::info!("{} produtos inseridos.", inserted);
    Ok(Json(json!({ "inserted": inserted })))
}
