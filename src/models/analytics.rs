// src/models/analytics.rs
//
// Estruturas de resposta do motor de análise. Cada relatório carrega os
// insights gerados durante a própria execução: não há acumulador global
// entre chamadas, e o comparativo entre anos monta dois relatórios
// independentes.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Estatística derivada, curta e legível, anexada a um relatório.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    #[schema(example = "remuneracao")]
    pub tipo: String,

    #[schema(example = "Disparidade Salarial")]
    pub titulo: String,

    #[schema(example = "6.0x")]
    pub valor: String,

    pub descricao: String,
    pub periodo: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumoGeral {
    pub total_servidores: i64,
    pub servidores_ativos: i64,
    pub total_remuneracao: f64,
    pub media_remuneracao: f64,
    pub taxa_atividade: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EstatisticasRemuneracao {
    pub minima: f64,
    pub maxima: f64,
    pub media: f64,
    pub total_registros: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopRemuneracao {
    pub nome: String,
    pub cargo: String,
    pub media_anual: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RemuneracaoPorCargo {
    pub cargo: String,
    pub quantidade: i64,
    pub media_remuneracao: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnaliseRemuneracao {
    pub estatisticas: EstatisticasRemuneracao,
    pub top_remuneracoes: Vec<TopRemuneracao>,
    pub remuneracao_por_cargo: Vec<RemuneracaoPorCargo>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServidorAfastado {
    pub nome: String,
    pub cargo: String,
    pub afastamentos: i64,
    pub dias_total: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AfastamentosPorMes {
    pub mes: i32,
    pub quantidade: i64,
    pub total_dias: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnaliseAfastamentos {
    pub total_afastamentos: i64,
    pub total_dias_afastamento: i64,
    pub taxa_afastamento: f64,
    pub servidores_mais_afastados: Vec<ServidorAfastado>,
    pub afastamentos_por_mes: Vec<AfastamentosPorMes>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContagemPorCategoria {
    pub categoria: String,
    pub quantidade: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DistribuicaoOrganizacional {
    pub por_org_superior: Vec<ContagemPorCategoria>,
    pub por_org_exercicio: Vec<ContagemPorCategoria>,
    pub por_regime: Vec<ContagemPorCategoria>,
    pub por_jornada: Vec<ContagemPorCategoria>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RelatorioCompleto {
    #[schema(example = "Ano 2024")]
    pub periodo: String,

    pub resumo_geral: ResumoGeral,
    pub analise_remuneracao: AnaliseRemuneracao,
    pub analise_afastamentos: AnaliseAfastamentos,
    pub distribuicao_organizacional: DistribuicaoOrganizacional,
    pub insights: Vec<Insight>,
    pub graficos_gerados: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RelatorioRequest {
    #[validate(range(min = 1900, max = 2100))]
    pub ano: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumoComparativo {
    pub diferenca_servidores_ativos: i64,
    pub diferenca_remuneracao_media: f64,
    pub percentual_variacao_remuneracao: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumoDeAno {
    pub ano: i32,
    pub resumo: ResumoGeral,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComparativoAnual {
    #[schema(example = "2023 vs 2024")]
    pub periodo_comparacao: String,

    pub resumo_comparativo: ResumoComparativo,
    pub ano1: ResumoDeAno,
    pub ano2: ResumoDeAno,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub sucesso: bool,
    pub mensagem: String,
    pub dados: Option<serde_json::Value>,
}

// --- Séries numéricas dos gráficos ---
//
// O motor calcula apenas as séries; a renderização em imagem fica com um
// colaborador externo.

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PontoEvolucaoMensal {
    pub mes: i32,
    pub media: f64,
    pub quantidade: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PontoDispersao {
    pub nome: String,
    pub media_remuneracao: f64,
    pub total_dias_afastamento: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LinhaTendencia {
    pub inclinacao: f64,
    pub intercepto: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DispersaoRemuneracaoAfastamentos {
    pub pontos: Vec<PontoDispersao>,
    pub tendencia: Option<LinhaTendencia>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DadosGraficos {
    pub evolucao_remuneracao: Vec<PontoEvolucaoMensal>,
    pub remuneracao_por_cargo: Vec<RemuneracaoPorCargo>,
    pub afastamentos_por_mes: Vec<AfastamentosPorMes>,
    pub distribuicao_organizacional: Vec<ContagemPorCategoria>,
    pub dispersao_remuneracao_afastamentos: DispersaoRemuneracaoAfastamentos,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GraficosResponse {
    pub graficos_gerados: Vec<String>,
    pub dados: DadosGraficos,
}
