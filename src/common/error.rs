use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Permissão negada: {0}")]
    PermissionDenied(String),

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Veículo não encontrado")]
    VehicleNotFound,

    #[error("Venda não encontrada")]
    SaleNotFound,

    #[error("Cliente não encontrado")]
    CustomerNotFound,

    #[error("Fornecedor não encontrado")]
    VendorNotFound,

    #[error("Despesa não encontrada")]
    ExpenseNotFound,

    #[error("Notificação não encontrada")]
    NotificationNotFound,

    // O veículo existe mas não aceita a operação pedida
    // (ex: registrar venda de um carro já vendido).
    #[error("Veículo indisponível: {0}")]
    VehicleUnavailable(String),

    // Transição de status inválida (ex: concluir uma venda cancelada).
    #[error("Transição de venda inválida: {0}")]
    InvalidSaleTransition(String),

    // Variante genérica para qualquer outro erro inesperado
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
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
            AppError::EmailAlreadyExists => {
                (StatusCode::CONFLICT, "Este e-mail já está em uso.".to_string())
            }
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "E-mail ou senha inválidos.".to_string())
            }
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticação inválido ou ausente.".to_string(),
            ),
            AppError::PermissionDenied(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::UserNotFound => {
                (StatusCode::NOT_FOUND, "Usuário não encontrado.".to_string())
            }
            AppError::VehicleNotFound => {
                (StatusCode::NOT_FOUND, "Veículo não encontrado.".to_string())
            }
            AppError::SaleNotFound => {
                (StatusCode::NOT_FOUND, "Venda não encontrada.".to_string())
            }
            AppError::CustomerNotFound => {
                (StatusCode::NOT_FOUND, "Cliente não encontrado.".to_string())
            }
            AppError::VendorNotFound => {
                (StatusCode::NOT_FOUND, "Fornecedor não encontrado.".to_string())
            }
            AppError::ExpenseNotFound => {
                (StatusCode::NOT_FOUND, "Despesa não encontrada.".to_string())
            }
            AppError::NotificationNotFound => {
                (StatusCode::NOT_FOUND, "Notificação não encontrada.".to_string())
            }
            AppError::VehicleUnavailable(msg) => (StatusCode::CONFLICT, msg),
            AppError::InvalidSaleTransition(msg) => (StatusCode::CONFLICT, msg),

            // Todos os outros erros (Bcrypt, JWT interno, anyhow) viram 500.
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
