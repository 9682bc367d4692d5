// src/handlers/observacoes.rs

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
        observacao::{NovaObservacao, Observacao},
        remuneracao::FiltroPeriodo,
    },
    services::importacao::observacoes,
};

// PUT /api/observacoes/importar
#[utoipa::path(
    put,
    path = "/api/observacoes/importar",
    tag = "Observações",
    request_body(content = String, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "CSV de observações importado", body = ImportacaoResponse),
        (status = 400, description = "Arquivo inválido"),
        (status = 422, description = "Coluna obrigatória ausente")
    )
)]
pub async fn importar(
    State(app_state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let conteudo = extrair_csv(&mut multipart).await?;
    let total_processados =
        observacoes::importar_csv(&app_state.observacao_repo, &conteudo).await?;

    Ok((
        StatusCode::OK,
        Json(ImportacaoResponse {
            mensagem: format!("{total_processados} observações importadas com sucesso!"),
            total_processados,
        }),
    ))
}

// POST /api/observacoes
#[utoipa::path(
    post,
    path = "/api/observacoes",
    tag = "Observações",
    request_body = NovaObservacao,
    responses(
        (status = 201, description = "Observação criada", body = Observacao)
    )
)]
pub async fn criar(
    State(app_state): State<AppState>,
    Json(nova): Json<NovaObservacao>,
) -> Result<impl IntoResponse, AppError> {
    nova.validate()?;
    let observacao = app_state.observacao_repo.criar(&nova).await?;
    Ok((StatusCode::CREATED, Json(observacao)))
}

// GET /api/observacoes
#[utoipa::path(
    get,
    path = "/api/observacoes",
    tag = "Observações",
    params(FiltroPeriodo),
    responses(
        (status = 200, description = "Lista de observações filtrada", body = Vec<Observacao>)
    )
)]
pub async fn listar(
    State(app_state): State<AppState>,
    Query(filtro): Query<FiltroPeriodo>,
) -> Result<impl IntoResponse, AppError> {
    let observacoes = app_state.observacao_repo.listar(&filtro).await?;
    Ok((StatusCode::OK, Json(observacoes)))
}

// GET /api/observacoes/{id_observacao}
#[utoipa::path(
    get,
    path = "/api/observacoes/{id_observacao}",
    tag = "Observações",
    params(("id_observacao" = i64, Path, description = "ID da observação")),
    responses(
        (status = 200, description = "Observação encontrada", body = Observacao),
        (status = 404, description = "Observação não encontrada")
    )
)]
pub async fn buscar(
    State(app_state): State<AppState>,
    Path(id_observacao): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let observacao = app_state
        .observacao_repo
        .buscar_por_id(id_observacao)
        .await?
        .ok_or(AppError::NaoEncontrado)?;
    Ok((StatusCode::OK, Json(observacao)))
}

// DELETE /api/observacoes/{id_observacao}
#[utoipa::path(
    delete,
    path = "/api/observacoes/{id_observacao}",
    tag = "Observações",
    params(("id_observacao" = i64, Path, description = "ID da observação")),
    responses(
        (status = 204, description = "Observação removida"),
        (status = 404, description = "Observação não encontrada")
    )
)]
pub async fn deletar(
    State(app_state): State<AppState>,
    Path(id_observacao): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let removida = app_state.observacao_repo.deletar(id_observacao).await?;
    if !removida {
        return Err(AppError::NaoEncontrado);
    }
    Ok(StatusCode::NO_CONTENT)
}
