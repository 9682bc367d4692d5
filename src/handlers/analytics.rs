// src/handlers/analytics.rs
//
// Endpoints do motor de análise. Qualquer falha de cálculo sai como um
// erro genérico de relatório, sem resultado parcial.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Local;
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::analytics::{
        ComparativoAnual, GraficosResponse, Insight, RelatorioCompleto, RelatorioRequest,
        ResumoGeral, StatusResponse,
    },
    services::EstatisticasService,
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct EstatisticasQuery {
    /// Dimensão de agrupamento: cargo, orgao, mes ou servidor.
    pub agrupar_por: Option<String>,
    /// Inclui os registros individuais no relatório.
    pub incluir_detalhes: Option<bool>,
}

fn erro_relatorio(erro: AppError) -> AppError {
    match erro {
        AppError::RelatorioError(_) => erro,
        outro => AppError::RelatorioError(outro.to_string()),
    }
}

// GET /api/analytics/health
#[utoipa::path(
    get,
    path = "/api/analytics/health",
    tag = "Analytics",
    responses(
        (status = 200, description = "Serviço de analytics operacional", body = StatusResponse)
    )
)]
pub async fn health_check() -> impl IntoResponse {
    Json(StatusResponse {
        sucesso: true,
        mensagem: "Serviço de analytics operacional".to_string(),
        dados: Some(serde_json::json!({ "timestamp": Local::now().to_rfc3339() })),
    })
}

// GET /api/analytics/resumo/{ano}
#[utoipa::path(
    get,
    path = "/api/analytics/resumo/{ano}",
    tag = "Analytics",
    params(("ano" = i32, Path, description = "Ano para análise (2020-2030)")),
    responses(
        (status = 200, description = "Resumo geral do ano", body = ResumoGeral),
        (status = 400, description = "Ano fora da faixa aceita"),
        (status = 500, description = "Erro ao gerar o resumo")
    )
)]
pub async fn resumo_geral(
    State(app_state): State<AppState>,
    Path(ano): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    if !(2020..=2030).contains(&ano) {
        return Err(AppError::ParametroInvalido(
            "Ano para análise deve estar entre 2020 e 2030.".to_string(),
        ));
    }

    let (resumo, _insights) = app_state
        .analytics_service
        .resumo_geral(ano)
        .await
        .map_err(erro_relatorio)?;
    Ok((StatusCode::OK, Json(resumo)))
}

// GET /api/analytics/insights/{ano}
#[utoipa::path(
    get,
    path = "/api/analytics/insights/{ano}",
    tag = "Analytics",
    params(("ano" = i32, Path, description = "Ano para análise")),
    responses(
        (status = 200, description = "Insights do ano", body = Vec<Insight>),
        (status = 500, description = "Erro ao gerar insights")
    )
)]
pub async fn insights(
    State(app_state): State<AppState>,
    Path(ano): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let relatorio = app_state
        .analytics_service
        .gerar_relatorio_completo(ano)
        .await
        .map_err(erro_relatorio)?;
    Ok((StatusCode::OK, Json(relatorio.insights)))
}

// POST /api/analytics/relatorio-completo
#[utoipa::path(
    post,
    path = "/api/analytics/relatorio-completo",
    tag = "Analytics",
    request_body = RelatorioRequest,
    responses(
        (status = 200, description = "Relatório completo do ano", body = RelatorioCompleto),
        (status = 500, description = "Erro ao gerar o relatório")
    )
)]
pub async fn relatorio_completo(
    State(app_state): State<AppState>,
    Json(request): Json<RelatorioRequest>,
) -> Result<impl IntoResponse, AppError> {
    request.validate()?;

    let relatorio = app_state
        .analytics_service
        .gerar_relatorio_completo(request.ano)
        .await
        .map_err(erro_relatorio)?;
    Ok((StatusCode::OK, Json(relatorio)))
}

// GET /api/analytics/comparativo/{ano1}/{ano2}
#[utoipa::path(
    get,
    path = "/api/analytics/comparativo/{ano1}/{ano2}",
    tag = "Analytics",
    params(
        ("ano1" = i32, Path, description = "Primeiro ano da comparação"),
        ("ano2" = i32, Path, description = "Segundo ano da comparação")
    ),
    responses(
        (status = 200, description = "Comparativo entre os dois anos", body = ComparativoAnual),
        (status = 500, description = "Erro na comparação")
    )
)]
pub async fn comparativo(
    State(app_state): State<AppState>,
    Path((ano1, ano2)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let comparativo = app_state
        .analytics_service
        .comparativo_anual(ano1, ano2)
        .await
        .map_err(erro_relatorio)?;
    Ok((StatusCode::OK, Json(comparativo)))
}

// GET /api/analytics/graficos/{ano}
#[utoipa::path(
    get,
    path = "/api/analytics/graficos/{ano}",
    tag = "Analytics",
    params(("ano" = i32, Path, description = "Ano para análise")),
    responses(
        (status = 200, description = "Séries numéricas dos gráficos do ano", body = GraficosResponse),
        (status = 500, description = "Erro ao gerar gráficos")
    )
)]
pub async fn graficos(
    State(app_state): State<AppState>,
    Path(ano): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let graficos = app_state
        .analytics_service
        .gerar_graficos(ano)
        .await
        .map_err(erro_relatorio)?;
    Ok((StatusCode::OK, Json(graficos)))
}

// GET /api/analytics/download/estatisticas-csv/{ano}
#[utoipa::path(
    get,
    path = "/api/analytics/download/estatisticas-csv/{ano}",
    tag = "Analytics",
    params(
        ("ano" = i32, Path, description = "Ano para análise"),
        EstatisticasQuery
    ),
    responses(
        (status = 200, description = "Relatório estatístico em CSV", content_type = "text/csv"),
        (status = 400, description = "Agrupamento inválido"),
        (status = 500, description = "Erro ao gerar o CSV estatístico")
    )
)]
pub async fn download_estatisticas_csv(
    State(app_state): State<AppState>,
    Path(ano): Path<i32>,
    Query(query): Query<EstatisticasQuery>,
) -> Result<impl IntoResponse, AppError> {
    let agrupamento = query
        .agrupar_por
        .as_deref()
        .unwrap_or("cargo")
        .parse()
        .map_err(AppError::ParametroInvalido)?;
    let incluir_detalhes = query.incluir_detalhes.unwrap_or(true);

    let dados = app_state
        .estatisticas_service
        .gerar_estatisticas(ano, agrupamento, incluir_detalhes)
        .await
        .map_err(erro_relatorio)?;
    let corpo = EstatisticasService::renderizar_csv(&dados)?;

    let nome_arquivo = format!(
        "estatisticas_servidores_{ano}_{}_{}.csv",
        dados.agrupamento,
        Local::now().format("%Y%m%d_%H%M%S")
    );

    Ok((
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                "text/csv; charset=utf-8".to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={nome_arquivo}"),
            ),
        ],
        corpo,
    ))
}
