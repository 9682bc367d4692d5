// src/services/importacao/remuneracoes.rs

use crate::{
    common::error::AppError,
    db::RemuneracaoRepository,
    models::remuneracao::NovaRemuneracao,
    services::importacao::{
        analisar_id, analisar_inteiro, analisar_moeda, decodificar_latin1, LoteCsv,
    },
};

const COLUNAS_OBRIGATORIAS: &[&str] = &[
    "Id_SERVIDOR_PORTAL",
    "ANO",
    "MES",
    "REMUNERAÇÃO BÁSICA BRUTA (R$)",
    "IRRF (R$)",
    "PSS/RPGS (R$)",
    "REMUNERAÇÃO APÓS DEDUÇÕES OBRIGATÓRIAS (R$)",
];

/// Normaliza o lote de remunerações: linhas sem id/ano/mês são
/// descartadas e os quatro campos monetários entram no formato
/// localizado, com 0,00 para valores ilegíveis.
pub fn normalizar(lote: &LoteCsv) -> Result<Vec<NovaRemuneracao>, AppError> {
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

        registros.push(NovaRemuneracao {
            id_servidor,
            ano,
            mes,
            remuneracao: analisar_moeda(lote.valor(linha, "REMUNERAÇÃO BÁSICA BRUTA (R$)")),
            irrf: analisar_moeda(lote.valor(linha, "IRRF (R$)")),
            pss_rpgs: analisar_moeda(lote.valor(linha, "PSS/RPGS (R$)")),
            remuneracao_final: analisar_moeda(
                lote.valor(linha, "REMUNERAÇÃO APÓS DEDUÇÕES OBRIGATÓRIAS (R$)"),
            ),
        });
    }

    Ok(registros)
}

pub async fn importar_csv(repo: &RemuneracaoRepository, bytes: &[u8]) -> Result<u64, AppError> {
    let conteudo = decodificar_latin1(bytes);
    let lote = LoteCsv::ler(&conteudo)?;
    let registros = normalizar(&lote)?;

    let total_processados = repo.inserir_lote(&registros).await?;
    tracing::info!(
        "Importação concluída: {} remunerações processadas.",
        total_processados
    );
    Ok(total_processados)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    const CABECALHO: &str = "Id_SERVIDOR_PORTAL;ANO;MES;REMUNERAÇÃO BÁSICA BRUTA (R$);IRRF (R$);PSS/RPGS (R$);REMUNERAÇÃO APÓS DEDUÇÕES OBRIGATÓRIAS (R$)";

    #[test]
    fn normaliza_moedas_localizadas() {
        let conteudo = format!(
            "{CABECALHO}\n\
             123;2023;5;9.500,00;1.200,50;850,00;7.449,50\n\
             456;2023;5;;;;\n"
        );
        let lote = LoteCsv::ler(&conteudo).unwrap();
        let registros = normalizar(&lote).unwrap();

        assert_eq!(registros.len(), 2);
        assert_eq!(
            registros[0].remuneracao,
            Decimal::from_str("9500.00").unwrap()
        );
        assert_eq!(registros[0].irrf, Decimal::from_str("1200.50").unwrap());
        assert_eq!(
            registros[0].remuneracao_final,
            Decimal::from_str("7449.50").unwrap()
        );
        // valores vazios viram 0,00 em vez de erro
        assert_eq!(registros[1].remuneracao, Decimal::new(0, 2));
    }

    #[test]
    fn linhas_sem_campos_chave_sao_descartadas() {
        let conteudo = format!(
            "{CABECALHO}\n\
             ;2023;5;100,00;0,00;0,00;100,00\n\
             12x;2023;5;100,00;0,00;0,00;100,00\n\
             123;;5;100,00;0,00;0,00;100,00\n\
             123;2023;;100,00;0,00;0,00;100,00\n\
             123;2023;5;100,00;0,00;0,00;100,00\n"
        );
        let lote = LoteCsv::ler(&conteudo).unwrap();
        let registros = normalizar(&lote).unwrap();

        assert_eq!(registros.len(), 1);
        assert_eq!(registros[0].id_servidor, 123);
    }

    #[test]
    fn coluna_monetaria_ausente_aborta() {
        let conteudo = "Id_SERVIDOR_PORTAL;ANO;MES\n123;2023;5\n";
        let lote = LoteCsv::ler(conteudo).unwrap();
        assert!(matches!(
            normalizar(&lote).unwrap_err(),
            AppError::ColunaAusente(_)
        ));
    }
}
