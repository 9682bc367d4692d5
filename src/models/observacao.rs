// src/models/observacao.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Observação textual atrelada a um servidor em um período. O flag de
/// teto é derivado do texto no momento da importação.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Observacao {
    pub id_observacao: i64,
    pub id_servidor: i64,
    pub ano: i32,
    pub mes: i32,

    #[schema(example = "REMUNERACAO ACIMA DO TETO CONSTITUCIONAL")]
    pub observacao: String,

    pub flag_teto: bool,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NovaObservacao {
    pub id_servidor: i64,

    #[validate(range(min = 1900, max = 2100))]
    pub ano: i32,

    #[validate(range(min = 1, max = 12))]
    pub mes: i32,

    #[validate(length(min = 1))]
    pub observacao: String,

    pub flag_teto: bool,
}
