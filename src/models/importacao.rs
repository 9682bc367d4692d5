// src/models/importacao.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Resposta dos endpoints de importação de CSV.
///
/// `total_processados` conta linhas submetidas ao banco: lotes que
/// falharam inteiros ficam de fora, e o total pode ser menor que o
/// número de linhas do arquivo.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportacaoResponse {
    #[schema(example = "1500 servidores importados com sucesso!")]
    pub mensagem: String,

    pub total_processados: u64,
}
