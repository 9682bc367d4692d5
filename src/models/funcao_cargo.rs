// src/models/funcao_cargo.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Vínculo entre um servidor e uma entrada do catálogo de cargos, com a
/// data de ingresso opcional.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FuncaoCargo {
    pub id_servidor_funcao: i64,
    pub id_servidor: i64,
    pub id_cargo_funcao: i64,
    pub data_ingresso_funcao: Option<NaiveDate>,
}

/// Vínculo já reconciliado contra o catálogo, pronto para persistir.
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NovoFuncaoCargo {
    pub id_servidor: i64,
    pub id_cargo_funcao: i64,
    pub data_ingresso_funcao: Option<NaiveDate>,
}
