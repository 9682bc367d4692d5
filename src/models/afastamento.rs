// src/models/afastamento.rs

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Afastamento de um servidor. A data de início pode faltar no CSV de
/// origem; a duração vale 1 dia quando desconhecida.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Afastamento {
    pub id_afastamento: i64,
    pub id_servidor: i64,
    pub ano: i32,
    pub mes: i32,
    pub inicio_afastamento: Option<NaiveDate>,
    pub duracao_dias: i32,
}

impl Afastamento {
    /// Data de fim derivada: início + duração − 1 dia, quando o início é
    /// conhecido.
    pub fn data_fim_calculada(&self) -> Option<NaiveDate> {
        let inicio = self.inicio_afastamento?;
        inicio.checked_add_days(Days::new(self.duracao_dias.saturating_sub(1) as u64))
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NovoAfastamento {
    pub id_servidor: i64,

    #[validate(range(min = 1900, max = 2100))]
    pub ano: i32,

    #[validate(range(min = 1, max = 12))]
    pub mes: i32,

    pub inicio_afastamento: Option<NaiveDate>,

    #[validate(range(min = 1))]
    pub duracao_dias: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_fim_inclui_o_dia_inicial() {
        let afastamento = Afastamento {
            id_afastamento: 1,
            id_servidor: 10,
            ano: 2023,
            mes: 3,
            inicio_afastamento: NaiveDate::from_ymd_opt(2023, 3, 15),
            duracao_dias: 5,
        };
        assert_eq!(
            afastamento.data_fim_calculada(),
            NaiveDate::from_ymd_opt(2023, 3, 19)
        );
    }

    #[test]
    fn sem_inicio_nao_ha_data_fim() {
        let afastamento = Afastamento {
            id_afastamento: 1,
            id_servidor: 10,
            ano: 2023,
            mes: 3,
            inicio_afastamento: None,
            duracao_dias: 10,
        };
        assert_eq!(afastamento.data_fim_calculada(), None);
    }
}
