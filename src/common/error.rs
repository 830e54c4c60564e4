use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// Cada variante corresponde a um desfecho que o chamador consegue distinguir.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    /// O registro pedido não existe ("cliente", "pedido", ...).
    #[error("{0} não encontrado")]
    NotFound(&'static str),

    /// O funcionário existe, mas não tem chefe atribuído.
    /// Mantido separado de `NotFound` de propósito: o chamador precisa
    /// distinguir os dois casos.
    #[error("Este funcionário não tem chefe atribuído")]
    NoManagerAssigned,

    /// Colisão de chave natural no create (código do cliente).
    #[error("{0}")]
    Conflict(String),

    /// A chave do path diverge da chave do payload no update.
    #[error("As chaves do path e do payload não coincidem")]
    KeyMismatch,

    /// Parâmetro de consulta fora da faixa aceita.
    #[error("{0}")]
    InvalidArgument(String),

    /// A geração em massa exige pelo menos um registro referenciado e não há nenhum.
    #[error("{0}")]
    MissingDependency(String),

    /// O orçamento de tentativas se esgotou sem aceitar nenhum registro.
    #[error("Não foi possível gerar nenhum registro único dentro do orçamento de tentativas")]
    GenerationExhausted,

    /// Política RESTRICT: o registro ainda tem dependentes e não pode ser apagado.
    #[error("{0} ainda possui registros dependentes")]
    DependentsExist(&'static str),

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            AppError::NotFound(resource) => {
                (StatusCode::NOT_FOUND, format!("{resource} não encontrado."))
            }
            AppError::NoManagerAssigned => (
                StatusCode::NOT_FOUND,
                "Este funcionário não tem chefe atribuído.".to_string(),
            ),

            AppError::Conflict(msg)
            | AppError::InvalidArgument(msg)
            | AppError::MissingDependency(msg) => (StatusCode::BAD_REQUEST, msg),

            AppError::KeyMismatch => (
                StatusCode::BAD_REQUEST,
                "As chaves do path e do payload não coincidem.".to_string(),
            ),
            AppError::GenerationExhausted => (
                StatusCode::BAD_REQUEST,
                "Não foi possível gerar nenhum registro único.".to_string(),
            ),

            AppError::DependentsExist(resource) => (
                StatusCode::CONFLICT,
                format!("{resource} ainda possui registros dependentes e não pode ser apagado."),
            ),

            // Todos os outros erros (DatabaseError, InternalServerError) viram 500.
            // O `tracing` loga a mensagem detalhada que `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

/// Converte violação de chave estrangeira num erro de política RESTRICT;
/// qualquer outro erro de banco segue como `DatabaseError`.
pub fn map_delete_error(e: sqlx::Error, resource: &'static str) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_foreign_key_violation() {
            return AppError::DependentsExist(resource);
        }
    }
    AppError::DatabaseError(e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn not_found_maps_to_404() {
        assert_eq!(status_of(AppError::NotFound("cliente")), StatusCode::NOT_FOUND);
    }

    #[test]
    fn no_manager_is_distinguishable_from_not_found() {
        // Ambos respondem 404, mas as variantes permanecem distintas para o
        // código que precisa diferenciá-las.
        let no_manager = AppError::NoManagerAssigned;
        let absent = AppError::NotFound("funcionário");
        assert!(!matches!(no_manager, AppError::NotFound(_)));
        assert_eq!(status_of(no_manager), StatusCode::NOT_FOUND);
        assert_eq!(status_of(absent), StatusCode::NOT_FOUND);
    }

    #[test]
    fn client_errors_map_to_400() {
        assert_eq!(
            status_of(AppError::Conflict("já existe".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_of(AppError::KeyMismatch), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(AppError::InvalidArgument("count".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::MissingDependency("sem clientes".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::GenerationExhausted),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn restrict_violation_maps_to_409() {
        assert_eq!(
            status_of(AppError::DependentsExist("categoria")),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn storage_errors_map_to_500() {
        assert_eq!(
            status_of(AppError::DatabaseError(sqlx::Error::PoolClosed)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
