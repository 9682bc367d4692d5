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

    // Coluna obrigatória ausente no CSV: aborta a importação inteira antes
    // de processar qualquer linha.
    #[error("Coluna ausente no CSV: {0}")]
    ColunaAusente(String),

    #[error("Arquivo de importação inválido: {0}")]
    ArquivoInvalido(String),

    #[error("Parâmetro inválido: {0}")]
    ParametroInvalido(String),

    #[error("Registro não encontrado")]
    NaoEncontrado,

    // Falha genérica do motor de relatórios: o chamador recebe só a mensagem,
    // sem resultado parcial.
    #[error("Erro ao gerar relatório: {0}")]
    RelatorioError(String),

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
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
            AppError::ColunaAusente(coluna) => {
                let body = Json(json!({ "error": format!("Coluna ausente no CSV: {coluna}") }));
                return (StatusCode::UNPROCESSABLE_ENTITY, body).into_response();
            }
            AppError::ArquivoInvalido(motivo) | AppError::ParametroInvalido(motivo) => {
                let body = Json(json!({ "error": motivo }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::NaoEncontrado => (StatusCode::NOT_FOUND, "Registro não encontrado."),
            AppError::RelatorioError(ref motivo) => {
                tracing::error!("Erro ao gerar relatório: {}", motivo);
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro ao gerar relatório.")
            }

            // Todos os outros erros (DatabaseError, InternalServerError) viram 500.
            // O `tracing` vai logar a mensagem detalhada que `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.")
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
