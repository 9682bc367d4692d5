// src/handlers/remuneracoes.rs

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
        remuneracao::{FiltroPeriodo, NovaRemuneracao, Remuneracao},
    },
    services::importacao::remuneracoes,
};

// PUT /api/remuneracoes/importar
#[utoipa::path(
    put,
    path = "/api/remuneracoes/importar",
    tag = "Remunerações",
    request_body(content = String, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "CSV de remunerações importado", body = ImportacaoResponse),
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
        remuneracoes::importar_csv(&app_state.remuneracao_repo, &conteudo).await?;

    Ok((
        StatusCode::OK,
        Json(ImportacaoResponse {
            mensagem: format!("{total_processados} remunerações importadas com sucesso!"),
            total_processados,
        }),
    ))
}

// POST /api/remuneracoes
#[utoipa::path(
    post,
    path = "/api/remuneracoes",
    tag = "Remunerações",
    request_body = NovaRemuneracao,
    responses(
        (status = 201, description = "Remuneração criada", body = Remuneracao)
    )
)]
pub async fn criar(
    State(app_state): State<AppState>,
    Json(nova): Json<NovaRemuneracao>,
) -> Result<impl IntoResponse, AppError> {
    nova.validate()?;
    let remuneracao = app_state.remuneracao_repo.criar(&nova).await?;
    Ok((StatusCode::CREATED, Json(remuneracao)))
}

// GET /api/remuneracoes
#[utoipa::path(
    get,
    path = "/api/remuneracoes",
    tag = "Remunerações",
    params(FiltroPeriodo),
    responses(
        (status = 200, description = "Lista de remunerações filtrada", body = Vec<Remuneracao>)
    )
)]
pub async fn listar(
    State(app_state): State<AppState>,
    Query(filtro): Query<FiltroPeriodo>,
) -> Result<impl IntoResponse, AppError> {
    let remuneracoes = app_state.remuneracao_repo.listar(&filtro).await?;
    Ok((StatusCode::OK, Json(remuneracoes)))
}

// GET /api/remuneracoes/{id_remuneracao}
#[utoipa::path(
    get,
    path = "/api/remuneracoes/{id_remuneracao}",
    tag = "Remunerações",
    params(("id_remuneracao" = i64, Path, description = "ID da remuneração")),
    responses(
        (status = 200, description = "Remuneração encontrada", body = Remuneracao),
        (status = 404, description = "Remuneração não encontrada")
    )
)]
pub async fn buscar(
    State(app_state): State<AppState>,
    Path(id_remuneracao): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let remuneracao = app_state
        .remuneracao_repo
        .buscar_por_id(id_remuneracao)
        .await?
        .ok_or(AppError::NaoEncontrado)?;
    Ok((StatusCode::OK, Json(remuneracao)))
}

// DELETE /api/remuneracoes/{id_remuneracao}
#[utoipa::path(
    delete,
    path = "/api/remuneracoes/{id_remuneracao}",
    tag = "Remunerações",
    params(("id_remuneracao" = i64, Path, description = "ID da remuneração")),
    responses(
        (status = 204, description = "Remuneração removida"),
        (status = 404, description = "Remuneração não encontrada")
    )
)]
pub async fn deletar(
    State(app_state): State<AppState>,
    Path(id_remuneracao): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let removida = app_state.remuneracao_repo.deletar(id_remuneracao).await?;
    if !removida {
        return Err(AppError::NaoEncontrado);
    }
    Ok(StatusCode::NO_CONTENT)
}
