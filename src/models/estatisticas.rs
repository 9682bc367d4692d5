// src/models/estatisticas.rs
//
// Estruturas do relatório estatístico exportado em CSV.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use utoipa::ToSchema;

/// Dimensão de agrupamento do relatório estatístico.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Agrupamento {
    Cargo,
    Orgao,
    Mes,
    Servidor,
}

impl Agrupamento {
    pub fn rotulo(&self) -> &'static str {
        match self {
            Agrupamento::Cargo => "cargo",
            Agrupamento::Orgao => "orgao",
            Agrupamento::Mes => "mes",
            Agrupamento::Servidor => "servidor",
        }
    }
}

impl FromStr for Agrupamento {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cargo" => Ok(Agrupamento::Cargo),
            "orgao" => Ok(Agrupamento::Orgao),
            "mes" => Ok(Agrupamento::Mes),
            "servidor" => Ok(Agrupamento::Servidor),
            outro => Err(format!(
                "Agrupamento inválido: {outro}. Use: cargo, orgao, mes, servidor"
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumoExecutivo {
    pub servidores_ativos: i64,
    pub total_registros: i64,
    pub total_remuneracao: f64,
    pub media_remuneracao: f64,
    pub menor_remuneracao: f64,
    pub maior_remuneracao: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EstatisticasDescritivas {
    pub media_remuneracao: f64,
    pub mediana_remuneracao: f64,
    /// Só presente quando algum valor se repete na amostra.
    pub moda_remuneracao: Option<f64>,
    pub desvio_padrao: f64,
    pub variancia: f64,
    pub amplitude: f64,
    pub coeficiente_variacao: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Percentil {
    #[schema(example = "Q2 (P50 - Mediana)")]
    pub rotulo: String,
    pub valor: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GrupoEstatistica {
    pub grupo: String,
    pub servidores_unicos: i64,
    pub total_registros: i64,
    pub media_remuneracao: f64,
    pub menor_remuneracao: f64,
    pub maior_remuneracao: f64,
    pub total_remuneracao: f64,
    pub amplitude_salarial: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistroDetalhado {
    pub id_servidor: i64,
    pub nome_servidor: String,
    pub cargo: String,
    pub orgao: String,
    pub mes: i32,
    pub remuneracao_final: f64,
    pub ano: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Correlacao {
    #[schema(example = "Remuneração")]
    pub variavel1: String,

    #[schema(example = "Afastamentos")]
    pub variavel2: String,

    pub coeficiente: f64,
}

/// Conjunto completo de estatísticas de um ano, pronto para serialização
/// em JSON ou renderização em CSV.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DadosEstatisticos {
    pub ano: i32,
    pub agrupamento: String,
    pub resumo_executivo: ResumoExecutivo,
    pub estatisticas_descritivas: Option<EstatisticasDescritivas>,
    pub quartis_percentis: Option<Vec<Percentil>>,
    pub analise_por_grupo: Vec<GrupoEstatistica>,
    pub dados_detalhados: Option<Vec<RegistroDetalhado>>,
    pub correlacoes: Vec<Correlacao>,
    pub total_registros: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agrupamento_aceita_somente_dimensoes_conhecidas() {
        assert_eq!("cargo".parse::<Agrupamento>().unwrap(), Agrupamento::Cargo);
        assert_eq!("mes".parse::<Agrupamento>().unwrap(), Agrupamento::Mes);
        assert!("departamento".parse::<Agrupamento>().is_err());
    }
}
