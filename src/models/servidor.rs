// src/models/servidor.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Servidor público: entidade raiz do domínio. O id é fornecido pelo
/// portal de origem, nunca gerado aqui.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Servidor {
    #[schema(example = 12345)]
    pub id_servidor: i64,

    #[schema(example = "MARIA DA SILVA")]
    pub nome: String,

    #[schema(example = "***456789**")]
    pub cpf: String,

    #[schema(example = "ANALISTA ADMINISTRATIVO")]
    pub descr_cargo: String,

    #[schema(example = "MINISTERIO DA FAZENDA")]
    pub org_superior: String,

    #[schema(example = "RECEITA FEDERAL")]
    pub org_exercicio: String,

    #[schema(example = "REGIME JURIDICO UNICO")]
    pub regime: String,

    #[schema(example = "40 HORAS SEMANAIS")]
    pub jornada_trabalho: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NovoServidor {
    pub id_servidor: i64,

    #[validate(length(min = 1))]
    pub nome: String,

    pub cpf: String,
    pub descr_cargo: String,
    pub org_superior: String,
    pub org_exercicio: String,
    pub regime: String,
    pub jornada_trabalho: String,
}

/// Filtros de listagem aceitos pelo endpoint de consulta.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct FiltroServidores {
    pub nome: Option<String>,
    pub cpf_parcial: Option<String>,
    pub descr_cargo: Option<String>,
    pub org_superior: Option<String>,
    pub org_exercicio: Option<String>,
    pub regime: Option<String>,
    pub jornada_trabalho: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
