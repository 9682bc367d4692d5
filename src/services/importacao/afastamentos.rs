// src/services/importacao/afastamentos.rs

use crate::{
    common::error::AppError,
    db::AfastamentoRepository,
    models::afastamento::NovoAfastamento,
    services::importacao::{
        analisar_data, analisar_id, analisar_inteiro, decodificar_latin1, LoteCsv,
    },
};

const COLUNAS_OBRIGATORIAS: &[&str] = &[
    "Id_SERVIDOR_PORTAL",
    "ANO",
    "MES",
    "DATA_INICIO_AFASTAMENTO",
];

/// Normaliza o lote de afastamentos. A data de início é opcional e a
/// duração vale 1 dia quando o arquivo não informa.
pub fn normalizar(lote: &LoteCsv) -> Result<Vec<NovoAfastamento>, AppError> {
    lote.verificar_colunas(COLUNAS_OBRIGATORIAS)?;

    let mut registros = Vec::new();

    for linha in lote.linhas() {
        let Some(id_servidor) = analisar_id(lote.valor(linha, "Id_SERVIDOR_PORTAL")) else {
            continue;
        };
        let Some(ano) = analisar_inteiro(lote.valor(linha, "ANO")) else {
            continue;
        };
        let Some(mes) = analisar_inteiro(lote.valor(linha, "MES")) else {
            continue;
        };

        registros.push(NovoAfastamento {
            id_servidor,
            ano,
            mes,
            inicio_afastamento: analisar_data(lote.valor(linha, "DATA_INICIO_AFASTAMENTO")),
            duracao_dias: 1,
        });
    }

    Ok(registros)
}

pub async fn importar_csv(repo: &AfastamentoRepository, bytes: &[u8]) -> Result<u64, AppError> {
    let conteudo = decodificar_latin1(bytes);
    let lote = LoteCsv::ler(&conteudo)?;
    let registros = normalizar(&lote)?;

    let total_processados = repo.inserir_lote(&registros).await?;
    tracing::info!(
        "Importação concluída: {} afastamentos processados.",
        total_processados
    );
    Ok(total_processados)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const CABECALHO: &str = "Id_SERVIDOR_PORTAL;ANO;MES;DATA_INICIO_AFASTAMENTO";

    #[test]
    fn data_invalida_vira_ausente_sem_descartar_a_linha() {
        let conteudo = format!(
            "{CABECALHO}\n\
             123;2023;3;15/03/2023\n\
             456;2023;4;2023-04-01\n\
             789;2023;5;\n"
        );
        let lote = LoteCsv::ler(&conteudo).unwrap();
        let registros = normalizar(&lote).unwrap();

        assert_eq!(registros.len(), 3);
        assert_eq!(
            registros[0].inicio_afastamento,
            NaiveDate::from_ymd_opt(2023, 3, 15)
        );
        assert_eq!(registros[1].inicio_afastamento, None);
        assert_eq!(registros[2].inicio_afastamento, None);
        assert!(registros.iter().all(|r| r.duracao_dias == 1));
    }
}
