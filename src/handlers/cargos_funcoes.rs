// src/handlers/cargos_funcoes.rs

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::extrair_csv,
    models::{cargo_funcao::CargoFuncao, importacao::ImportacaoResponse},
    services::importacao::cargos_funcoes,
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct Paginacao {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// PUT /api/cargos-funcoes/importar
#[utoipa::path(
    put,
    path = "/api/cargos-funcoes/importar",
    tag = "Cargos e Funções",
    request_body(content = String, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "CSV do catálogo de cargos importado", body = ImportacaoResponse),
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
        cargos_funcoes::importar_csv(&app_state.cargo_funcao_repo, &conteudo).await?;

    Ok((
        StatusCode::OK,
        Json(ImportacaoResponse {
            mensagem: format!("{total_processados} cargos/funções importados com sucesso!"),
            total_processados,
        }),
    ))
}

// GET /api/cargos-funcoes
#[utoipa::path(
    get,
    path = "/api/cargos-funcoes",
    tag = "Cargos e Funções",
    params(Paginacao),
    responses(
        (status = 200, description = "Catálogo de cargos paginado", body = Vec<CargoFuncao>)
    )
)]
pub async fn listar(
    State(app_state): State<AppState>,
    Query(paginacao): Query<Paginacao>,
) -> Result<impl IntoResponse, AppError> {
    let cargos = app_state
        .cargo_funcao_repo
        .listar(paginacao.limit.unwrap_or(50), paginacao.offset.unwrap_or(0))
        .await?;
    Ok((StatusCode::OK, Json(cargos)))
}

// GET /api/cargos-funcoes/{id_cargo_funcao}
#[utoipa::path(
    get,
    path = "/api/cargos-funcoes/{id_cargo_funcao}",
    tag = "Cargos e Funções",
    params(("id_cargo_funcao" = i64, Path, description = "ID da entrada do catálogo")),
    responses(
        (status = 200, description = "Entrada do catálogo encontrada", body = CargoFuncao),
        (status = 404, description = "Entrada não encontrada")
    )
)]
pub async fn buscar(
    State(app_state): State<AppState>,
    Path(id_cargo_funcao): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let cargo = app_state
        .cargo_funcao_repo
        .buscar_por_id(id_cargo_funcao)
        .await?
        .ok_or(AppError::NaoEncontrado)?;
    Ok((StatusCode::OK, Json(cargo)))
}

// DELETE /api/cargos-funcoes/{id_cargo_funcao}
#[utoipa::path(
    delete,
    path = "/api/cargos-funcoes/{id_cargo_funcao}",
    tag = "Cargos e Funções",
    params(("id_cargo_funcao" = i64, Path, description = "ID da entrada do catálogo")),
    responses(
        (status = 204, description = "Entrada removida"),
        (status = 404, description = "Entrada não encontrada")
    )
)]
pub async fn deletar(
    State(app_state): State<AppState>,
    Path(id_cargo_funcao): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let removido = app_state.cargo_funcao_repo.deletar(id_cargo_funcao).await?;
    if !removido {
        return Err(AppError::NaoEncontrado);
    }
    Ok(StatusCode::NO_CONTENT)
}
