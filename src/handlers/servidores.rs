// src/handlers/servidores.rs

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::extrair_csv,
    models::{
        importacao::ImportacaoResponse,
        servidor::{FiltroServidores, NovoServidor, Servidor},
    },
    services::importacao::servidores,
};

// PUT /api/servidores/importar
#[utoipa::path(
    put,
    path = "/api/servidores/importar",
    tag = "Servidores",
    request_body(content = String, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "CSV de servidores importado", body = ImportacaoResponse),
        (status = 400, description = "Arquivo inválido"),
        (status = 422, description = "Coluna obrigatória ausente")
    )
)]
pub async fn importar(
    State(app_state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let conteudo = extrair_csv(&mut multipart).await?;
    let total_processados = servidores::importar_csv(&app_state.servidor_repo, &conteudo).await?;

    Ok((
        StatusCode::OK,
        Json(ImportacaoResponse {
            mensagem: format!("{total_processados} servidores importados com sucesso!"),
            total_processados,
        }),
    ))
}

// POST /api/servidores
#[utoipa::path(
    post,
    path = "/api/servidores",
    tag = "Servidores",
    request_body = NovoServidor,
    responses(
        (status = 201, description = "Servidor criado", body = Servidor)
    )
)]
pub async fn criar(
    State(app_state): State<AppState>,
    Json(novo): Json<NovoServidor>,
) -> Result<impl IntoResponse, AppError> {
    novo.validate()?;
    let servidor = app_state.servidor_repo.criar(&novo).await?;
    Ok((StatusCode::CREATED, Json(servidor)))
}

// GET /api/servidores
#[utoipa::path(
    get,
    path = "/api/servidores",
    tag = "Servidores",
    params(FiltroServidores),
    responses(
        (status = 200, description = "Lista de servidores filtrada", body = Vec<Servidor>)
    )
)]
pub async fn listar(
    State(app_state): State<AppState>,
    Query(filtro): Query<FiltroServidores>,
) -> Result<impl IntoResponse, AppError> {
    let servidores = app_state.servidor_repo.listar(&filtro).await?;
    Ok((StatusCode::OK, Json(servidores)))
}

// GET /api/servidores/{id_servidor}
#[utoipa::path(
    get,
    path = "/api/servidores/{id_servidor}",
    tag = "Servidores",
    params(("id_servidor" = i64, Path, description = "ID do servidor no portal")),
    responses(
        (status = 200, description = "Servidor encontrado", body = Servidor),
        (status = 404, description = "Servidor não encontrado")
    )
)]
pub async fn buscar(
    State(app_state): State<AppState>,
    Path(id_servidor): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let servidor = app_state
        .servidor_repo
        .buscar_por_id(id_servidor)
        .await?
        .ok_or(AppError::NaoEncontrado)?;
    Ok((StatusCode::OK, Json(servidor)))
}

// DELETE /api/servidores/{id_servidor}
#[utoipa::path(
    delete,
    path = "/api/servidores/{id_servidor}",
    tag = "Servidores",
    params(("id_servidor" = i64, Path, description = "ID do servidor no portal")),
    responses(
        (status = 204, description = "Servidor e dependentes removidos"),
        (status = 404, description = "Servidor não encontrado")
    )
)]
pub async fn deletar(
    State(app_state): State<AppState>,
    Path(id_servidor): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let removido = app_state.servidor_repo.deletar(id_servidor).await?;
    if !removido {
        return Err(AppError::NaoEncontrado);
    }
    Ok(StatusCode::NO_CONTENT)
}
