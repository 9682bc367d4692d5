// src/services/importacao/servidores.rs

use std::collections::HashSet;

use crate::{
    common::error::AppError,
    db::ServidorRepository,
    models::servidor::NovoServidor,
    services::importacao::{
        analisar_id, decodificar_latin1, limpar_texto, limpar_texto_maiusculo, LoteCsv,
    },
};

const COLUNAS_OBRIGATORIAS: &[&str] = &[
    "Id_SERVIDOR_PORTAL",
    "NOME",
    "CPF",
    "DESCRICAO_CARGO",
    "ORGSUP_EXERCICIO",
    "ORG_EXERCICIO",
    "REGIME_JURIDICO",
    "JORNADA_DE_TRABALHO",
];

/// Normaliza o lote de servidores: ids só com dígitos, campos
/// organizacionais em caixa alta e deduplicação por id (a primeira
/// ocorrência vence).
pub fn normalizar(lote: &LoteCsv) -> Result<Vec<NovoServidor>, AppError> {
    lote.verificar_colunas(COLUNAS_OBRIGATORIAS)?;

    let mut vistos = HashSet::new();
    let mut registros = Vec::new();

    for linha in lote.linhas() {
        let Some(id_servidor) = analisar_id(lote.valor(linha, "Id_SERVIDOR_PORTAL")) else {
            continue;
        };
        if !vistos.insert(id_servidor) {
            continue;
        }

        registros.push(NovoServidor {
            id_servidor,
            nome: limpar_texto(lote.valor(linha, "NOME")),
            cpf: limpar_texto(lote.valor(linha, "CPF")),
            descr_cargo: limpar_texto(lote.valor(linha, "DESCRICAO_CARGO")),
            org_superior: limpar_texto_maiusculo(lote.valor(linha, "ORGSUP_EXERCICIO")),
            org_exercicio: limpar_texto_maiusculo(lote.valor(linha, "ORG_EXERCICIO")),
            regime: limpar_texto_maiusculo(lote.valor(linha, "REGIME_JURIDICO")),
            jornada_trabalho: limpar_texto_maiusculo(lote.valor(linha, "JORNADA_DE_TRABALHO")),
        });
    }

    Ok(registros)
}

pub async fn importar_csv(repo: &ServidorRepository, bytes: &[u8]) -> Result<u64, AppError> {
    let conteudo = decodificar_latin1(bytes);
    let lote = LoteCsv::ler(&conteudo)?;
    let registros = normalizar(&lote)?;

    let total_processados = repo.inserir_lote(&registros).await?;
    tracing::info!(
        "Importação concluída: {} servidores processados.",
        total_processados
    );
    Ok(total_processados)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CABECALHO: &str = "Id_SERVIDOR_PORTAL;NOME;CPF;DESCRICAO_CARGO;ORGSUP_EXERCICIO;ORG_EXERCICIO;REGIME_JURIDICO;JORNADA_DE_TRABALHO";

    #[test]
    fn normaliza_e_deduplica_por_id() {
        let conteudo = format!(
            "{CABECALHO}\n\
             123; Maria da Silva ;***111***;Analista;min. fazenda;receita federal;rju;40 horas\n\
             123;Maria Duplicada;***111***;Analista;MF;RF;RJU;40H\n\
             abc;Nome Invalido;***222***;Tecnico;MF;RF;RJU;40H\n\
             456;Joao Souza;***333***;Tecnico;mec;ufmg;rju;20 horas\n"
        );
        let lote = LoteCsv::ler(&conteudo).unwrap();
        let registros = normalizar(&lote).unwrap();

        assert_eq!(registros.len(), 2);
        assert_eq!(registros[0].id_servidor, 123);
        assert_eq!(registros[0].nome, "Maria da Silva");
        assert_eq!(registros[0].org_superior, "MIN. FAZENDA");
        assert_eq!(registros[0].jornada_trabalho, "40 HORAS");
        assert_eq!(registros[1].id_servidor, 456);
    }

    #[test]
    fn coluna_ausente_aborta_antes_de_processar() {
        let conteudo = "Id_SERVIDOR_PORTAL;NOME\n123;Maria\n";
        let lote = LoteCsv::ler(conteudo).unwrap();
        let erro = normalizar(&lote).unwrap_err();
        assert!(matches!(erro, AppError::ColunaAusente(coluna) if coluna == "CPF"));
    }
}
