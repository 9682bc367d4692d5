// src/services/importacao/cargos_funcoes.rs

use std::collections::HashSet;

use crate::{
    common::error::AppError,
    db::CargoFuncaoRepository,
    models::cargo_funcao::NovoCargoFuncao,
    services::importacao::{
        decodificar_latin1, limpar_inteiro_opcional, limpar_texto, limpar_texto_opcional, LoteCsv,
    },
};

const COLUNAS_OBRIGATORIAS: &[&str] = &[
    "CLASSE_CARGO",
    "REFERENCIA_CARGO",
    "PADRAO_CARGO",
    "NIVEL_CARGO",
    "FUNCAO",
    "DESCRICAO_CARGO",
    "NIVEL_FUNCAO",
];

/// Normaliza o catálogo de cargos/funções e deduplica pela chave lógica
/// (a concatenação de todos os campos limpos). A primeira ocorrência de
/// cada chave vence; o restante do lote é descartado.
///
/// A coerção defensiva dos campos numéricos — parse falho, sentinelas
/// -1 e 0, valores não finitos ou fora da faixa de i64 viram ausentes —
/// acontece em [`limpar_inteiro_opcional`], antes de qualquer registro
/// chegar à persistência.
pub fn normalizar(lote: &LoteCsv) -> Result<Vec<NovoCargoFuncao>, AppError> {
    lote.verificar_colunas(COLUNAS_OBRIGATORIAS)?;

    let mut chaves_vistas = HashSet::new();
    let mut registros = Vec::new();

    for linha in lote.linhas() {
        let registro = NovoCargoFuncao {
            classe_cargo: limpar_texto_opcional(lote.valor(linha, "CLASSE_CARGO")),
            referencia_cargo: limpar_inteiro_opcional(lote.valor(linha, "REFERENCIA_CARGO")),
            padrao_cargo: limpar_inteiro_opcional(lote.valor(linha, "PADRAO_CARGO")),
            nivel_cargo: limpar_inteiro_opcional(lote.valor(linha, "NIVEL_CARGO")),
            funcao: limpar_texto_opcional(lote.valor(linha, "FUNCAO")),
            descricao_cargo: limpar_texto(lote.valor(linha, "DESCRICAO_CARGO")),
            nivel_funcao: limpar_inteiro_opcional(lote.valor(linha, "NIVEL_FUNCAO")),
        };

        if chaves_vistas.insert(registro.chave_logica()) {
            registros.push(registro);
        }
    }

    Ok(registros)
}

pub async fn importar_csv(repo: &CargoFuncaoRepository, bytes: &[u8]) -> Result<u64, AppError> {
    let conteudo = decodificar_latin1(bytes);
    let lote = LoteCsv::ler(&conteudo)?;
    let registros = normalizar(&lote)?;

    let total_processados = repo.inserir_lote(&registros).await?;
    tracing::info!(
        "Importação concluída: {} cargos/funções processados.",
        total_processados
    );
    Ok(total_processados)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CABECALHO: &str =
        "CLASSE_CARGO;REFERENCIA_CARGO;PADRAO_CARGO;NIVEL_CARGO;FUNCAO;DESCRICAO_CARGO;NIVEL_FUNCAO";

    #[test]
    fn deduplica_pela_chave_logica_completa() {
        let conteudo = format!(
            "{CABECALHO}\n\
             A;101;5;3;FCT;Analista Administrativo;2\n\
             A;101;5;3;FCT;Analista Administrativo;2\n\
             A;101;5;3;FCT;Analista Administrativo;4\n\
             B;202;1;1;FGR;Tecnico Judiciario;1\n"
        );
        let lote = LoteCsv::ler(&conteudo).unwrap();
        let registros = normalizar(&lote).unwrap();

        // a segunda linha é idêntica e cai; a terceira difere no nível da função
        assert_eq!(registros.len(), 3);
        assert_eq!(registros[0].classe_cargo.as_deref(), Some("A"));
        assert_eq!(registros[0].referencia_cargo, Some(101));
        assert_eq!(registros[0].nivel_funcao, Some(2));
        assert_eq!(registros[1].nivel_funcao, Some(4));
    }

    #[test]
    fn sentinelas_numericas_e_textuais_viram_ausentes() {
        let conteudo = format!(
            "{CABECALHO}\n\
             sem informação;-1;0;xyz;-1;Cargo Sem Nada;1e300\n"
        );
        let lote = LoteCsv::ler(&conteudo).unwrap();
        let registros = normalizar(&lote).unwrap();

        assert_eq!(registros.len(), 1);
        let registro = &registros[0];
        assert_eq!(registro.classe_cargo, None);
        assert_eq!(registro.referencia_cargo, None);
        assert_eq!(registro.padrao_cargo, None);
        assert_eq!(registro.nivel_cargo, None);
        assert_eq!(registro.funcao, None);
        assert_eq!(registro.nivel_funcao, None);
        assert_eq!(registro.descricao_cargo, "Cargo Sem Nada");
    }

    #[test]
    fn reimportar_o_mesmo_lote_gera_as_mesmas_chaves() {
        let conteudo = format!(
            "{CABECALHO}\n\
             A;101;5;3;FCT;Analista;2\n\
             B;202;1;1;FGR;Tecnico;1\n"
        );
        let lote = LoteCsv::ler(&conteudo).unwrap();
        let primeira = normalizar(&lote).unwrap();
        let segunda = normalizar(&lote).unwrap();

        let chaves1: Vec<String> = primeira.iter().map(|r| r.chave_logica()).collect();
        let chaves2: Vec<String> = segunda.iter().map(|r| r.chave_logica()).collect();
        assert_eq!(chaves1, chaves2);
    }
}
