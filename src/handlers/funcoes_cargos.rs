// src/handlers/funcoes_cargos.rs

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::extrair_csv,
    models::{funcao_cargo::FuncaoCargo, importacao::ImportacaoResponse},
    services::importacao::funcoes_cargos,
};

// PUT /api/funcoes-cargos/importar
#[utoipa::path(
    put,
    path = "/api/funcoes-cargos/importar",
    tag = "Funções e Cargos",
    request_body(content = String, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "CSV de vínculos importado; linhas sem cargo no catálogo são descartadas", body = ImportacaoResponse),
        (status = 400, description = "Arquivo inválido"),
        (status = 422, description = "Coluna obrigatória ausente")
    )
)]
pub async fn importar(
    State(app_state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let conteudo = extrair_csv(&mut multipart).await?;
    let total_processados = funcoes_cargos::importar_csv(
        &app_state.cargo_funcao_repo,
        &app_state.funcao_cargo_repo,
        &conteudo,
    )
    .await?;

    Ok((
        StatusCode::OK,
        Json(ImportacaoResponse {
            mensagem: format!("{total_processados} vínculos importados com sucesso!"),
            total_processados,
        }),
    ))
}

// GET /api/funcoes-cargos/servidor/{id_servidor}
#[utoipa::path(
    get,
    path = "/api/funcoes-cargos/servidor/{id_servidor}",
    tag = "Funções e Cargos",
    params(("id_servidor" = i64, Path, description = "ID do servidor no portal")),
    responses(
        (status = 200, description = "Vínculos do servidor", body = Vec<FuncaoCargo>)
    )
)]
pub async fn listar_por_servidor(
    State(app_state): State<AppState>,
    Path(id_servidor): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let vinculos = app_state
        .funcao_cargo_repo
        .listar_por_servidor(id_servidor)
        .await?;
    Ok((StatusCode::OK, Json(vinculos)))
}

// GET /api/funcoes-cargos/{id_servidor_funcao}
#[utoipa::path(
    get,
    path = "/api/funcoes-cargos/{id_servidor_funcao}",
    tag = "Funções e Cargos",
    params(("id_servidor_funcao" = i64, Path, description = "ID do vínculo")),
    responses(
        (status = 200, description = "Vínculo encontrado", body = FuncaoCargo),
        (status = 404, description = "Vínculo não encontrado")
    )
)]
pub async fn buscar(
    State(app_state): State<AppState>,
    Path(id_servidor_funcao): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let vinculo = app_state
        .funcao_cargo_repo
        .buscar_por_id(id_servidor_funcao)
        .await?
        .ok_or(AppError::NaoEncontrado)?;
    Ok((StatusCode::OK, Json(vinculo)))
}

// DELETE /api/funcoes-cargos/{id_servidor_funcao}
#[utoipa::path(
    delete,
    path = "/api/funcoes-cargos/{id_servidor_funcao}",
    tag = "Funções e Cargos",
    params(("id_servidor_funcao" = i64, Path, description = "ID do vínculo")),
    responses(
        (status = 204, description = "Vínculo removido"),
        (status = 404, description = "Vínculo não encontrado")
    )
)]
pub async fn deletar(
    State(app_state): State<AppState>,
    Path(id_servidor_funcao): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let removido = app_state
        .funcao_cargo_repo
        .deletar(id_servidor_funcao)
        .await?;
    if !removido {
        return Err(AppError::NaoEncontrado);
    }
    Ok(StatusCode::NO_CONTENT)
}
