// src/models/remuneracao.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Remuneração mensal de um servidor. Não há chave única em
/// (servidor, ano, mês): a unicidade é apenas conceitual.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Remuneracao {
    pub id_remuneracao: i64,
    pub id_servidor: i64,
    pub ano: i32,
    pub mes: i32,

    #[schema(example = "9500.00")]
    pub remuneracao: Decimal,

    #[schema(example = "1200.50")]
    pub irrf: Decimal,

    #[schema(example = "850.00")]
    pub pss_rpgs: Decimal,

    #[schema(example = "7449.50")]
    pub remuneracao_final: Decimal,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NovaRemuneracao {
    pub id_servidor: i64,

    #[validate(range(min = 1900, max = 2100))]
    pub ano: i32,

    #[validate(range(min = 1, max = 12))]
    pub mes: i32,

    pub remuneracao: Decimal,
    pub irrf: Decimal,
    pub pss_rpgs: Decimal,
    pub remuneracao_final: Decimal,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct FiltroPeriodo {
    pub id_servidor: Option<i64>,
    pub ano: Option<i32>,
    pub mes: Option<i32>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
