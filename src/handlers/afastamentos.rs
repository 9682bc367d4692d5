// src/handlers/afastamentos.rs

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
        afastamento::{Afastamento, NovoAfastamento},
        importacao::ImportacaoResponse,
        remuneracao::FiltroPeriodo,
    },
    services::importacao::afastamentos,
};

// PUT /api/afastamentos/importar
#[utoipa::path(
    put,
    path = "/api/afastamentos/importar",
    tag = "Afastamentos",
    request_body(content = String, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "CSV de afastamentos importado", body = ImportacaoResponse),
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
        afastamentos::importar_csv(&app_state.afastamento_repo, &conteudo).await?;

    Ok((
        StatusCode::OK,
        Json(ImportacaoResponse {
            mensagem: format!("{total_processados} afastamentos importados com sucesso!"),
            total_processados,
        }),
    ))
}

// POST /api/afastamentos
#[utoipa::path(
    post,
    path = "/api/afastamentos",
    tag = "Afastamentos",
    request_body = NovoAfastamento,
    responses(
        (status = 201, description = "Afastamento criado", body = Afastamento)
    )
)]
pub async fn criar(
    State(app_state): State<AppState>,
    Json(novo): Json<NovoAfastamento>,
) -> Result<impl IntoResponse, AppError> {
    novo.validate()?;
    let afastamento = app_state.afastamento_repo.criar(&novo).await?;
    Ok((StatusCode::CREATED, Json(afastamento)))
}

// GET /api/afastamentos
#[utoipa::path(
    get,
    path = "/api/afastamentos",
    tag = "Afastamentos",
    params(FiltroPeriodo),
    responses(
        (status = 200, description = "Lista de afastamentos filtrada", body = Vec<Afastamento>)
    )
)]
pub async fn listar(
    State(app_state): State<AppState>,
    Query(filtro): Query<FiltroPeriodo>,
) -> Result<impl IntoResponse, AppError> {
    let afastamentos = app_state.afastamento_repo.listar(&filtro).await?;
    Ok((StatusCode::OK, Json(afastamentos)))
}

// GET /api/afastamentos/{id_afastamento}
#[utoipa::path(
    get,
    path = "/api/afastamentos/{id_afastamento}",
    tag = "Afastamentos",
    params(("id_afastamento" = i64, Path, description = "ID do afastamento")),
    responses(
        (status = 200, description = "Afastamento encontrado", body = Afastamento),
        (status = 404, description = "Afastamento não encontrado")
    )
)]
pub async fn buscar(
    State(app_state): State<AppState>,
    Path(id_afastamento): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let afastamento = app_state
        .afastamento_repo
        .buscar_por_id(id_afastamento)
        .await?
        .ok_or(AppError::NaoEncontrado)?;
    Ok((StatusCode::OK, Json(afastamento)))
}

// DELETE /api/afastamentos/{id_afastamento}
#[utoipa::path(
    delete,
    path = "/api/afastamentos/{id_afastamento}",
    tag = "Afastamentos",
    params(("id_afastamento" = i64, Path, description = "ID do afastamento")),
    responses(
        (status = 204, description = "Afastamento removido"),
        (status = 404, description = "Afastamento não encontrado")
    )
)]
pub async fn deletar(
    State(app_state): State<AppState>,
    Path(id_afastamento): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let removido = app_state.afastamento_repo.deletar(id_afastamento).await?;
    if !removido {
        return Err(AppError::NaoEncontrado);
    }
    Ok(StatusCode::NO_CONTENT)
}
