// src/services/importacao/observacoes.rs

use crate::{
    common::error::AppError,
    db::ObservacaoRepository,
    models::observacao::NovaObservacao,
    services::importacao::{
        analisar_id, analisar_inteiro, contem_acima_do_teto, decodificar_latin1, limpar_texto,
        LoteCsv,
    },
};

const COLUNAS_OBRIGATORIAS: &[&str] = &["Id_SERVIDOR_PORTAL", "ANO", "MES", "OBSERVACAO"];

/// Normaliza o lote de observações. O texto é obrigatório: linhas com
/// observação vazia são descartadas. O flag de teto é derivado aqui,
/// no momento da importação.
pub fn normalizar(lote: &LoteCsv) -> Result<Vec<NovaObservacao>, AppError> {
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
        let observacao = limpar_texto(lote.valor(linha, "OBSERVACAO"));
        if observacao.is_empty() {
            continue;
        }

        let flag_teto = contem_acima_do_teto(&observacao);
        registros.push(NovaObservacao {
            id_servidor,
            ano,
            mes,
            observacao,
            flag_teto,
        });
    }

    Ok(registros)
}

pub async fn importar_csv(repo: &ObservacaoRepository, bytes: &[u8]) -> Result<u64, AppError> {
    let conteudo = decodificar_latin1(bytes);
    let lote = LoteCsv::ler(&conteudo)?;
    let registros = normalizar(&lote)?;

    let total_processados = repo.inserir_lote(&registros).await?;
    tracing::info!(
        "Importação concluída: {} observações processadas.",
        total_processados
    );
    Ok(total_processados)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CABECALHO: &str = "Id_SERVIDOR_PORTAL;ANO;MES;OBSERVACAO";

    #[test]
    fn deriva_flag_de_teto_sem_distincao_de_caixa() {
        let conteudo = format!(
            "{CABECALHO}\n\
             123;2023;5;Remuneração acima do teto constitucional\n\
             456;2023;5;Cedido a outro órgão\n\
             789;2023;5;\n"
        );
        let lote = LoteCsv::ler(&conteudo).unwrap();
        let registros = normalizar(&lote).unwrap();

        assert_eq!(registros.len(), 2);
        assert!(registros[0].flag_teto);
        assert!(!registros[1].flag_teto);
    }
}
