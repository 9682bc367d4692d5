// src/models/cargo_funcao.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Entrada do catálogo de cargos/funções. A identidade lógica é a tupla
/// completa de atributos; o banco garante a unicidade dessa tupla.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CargoFuncao {
    pub id_cargo_funcao: i64,
    pub classe_cargo: Option<String>,
    pub referencia_cargo: Option<i64>,
    pub padrao_cargo: Option<i64>,
    pub nivel_cargo: Option<i64>,
    pub funcao: Option<String>,

    #[schema(example = "ANALISTA ADMINISTRATIVO")]
    pub descricao_cargo: String,

    pub nivel_funcao: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NovoCargoFuncao {
    pub classe_cargo: Option<String>,
    pub referencia_cargo: Option<i64>,
    pub padrao_cargo: Option<i64>,
    pub nivel_cargo: Option<i64>,
    pub funcao: Option<String>,
    pub descricao_cargo: String,
    pub nivel_funcao: Option<i64>,
}

impl NovoCargoFuncao {
    /// Chave lógica usada na deduplicação intra-lote: concatenação de
    /// todos os campos limpos, com separador fixo.
    pub fn chave_logica(&self) -> String {
        fn texto<T: std::fmt::Display>(campo: &Option<T>) -> String {
            match campo {
                Some(v) => v.to_string(),
                None => "None".to_string(),
            }
        }
        [
            texto(&self.classe_cargo),
            texto(&self.referencia_cargo),
            texto(&self.padrao_cargo),
            texto(&self.nivel_cargo),
            texto(&self.funcao),
            self.descricao_cargo.clone(),
            texto(&self.nivel_funcao),
        ]
        .join("|")
    }
}
