// src/services/importacao/funcoes_cargos.rs
//
// Importa vínculos servidor → cargo. Ao contrário das demais entidades,
// cada linha precisa ser reconciliada contra o catálogo de cargos já
// persistido: o vínculo só é criado quando a tupla limpa
// (classe, padrão, nível, descrição) casa com uma entrada existente.

use std::collections::HashMap;

use crate::{
    common::error::AppError,
    db::{CargoFuncaoRepository, FuncaoCargoRepository},
    models::{cargo_funcao::CargoFuncao, funcao_cargo::NovoFuncaoCargo},
    services::importacao::{
        analisar_data, analisar_id, decodificar_latin1, limpar_inteiro_digitos,
        limpar_texto_opcional, LoteCsv,
    },
};

const COLUNAS_OBRIGATORIAS: &[&str] = &[
    "Id_SERVIDOR_PORTAL",
    "DATA_INGRESSO_CARGOFUNCAO",
    "CLASSE_CARGO",
    "REFERENCIA_CARGO",
    "PADRAO_CARGO",
    "NIVEL_CARGO",
    "FUNCAO",
    "DESCRICAO_CARGO",
    "NIVEL_FUNCAO",
];

/// Chave de reconciliação contra o catálogo.
pub type ChaveCargo = (Option<String>, Option<i64>, Option<i64>, Option<String>);

/// Indexa o catálogo inteiro em memória, uma vez por importação.
///
/// O índice é um retrato do momento da leitura: entradas criadas por
/// outra importação concorrente depois deste ponto não são visíveis, e
/// vínculos que dependam delas serão descartados.
pub fn indexar_catalogo(cargos: &[CargoFuncao]) -> HashMap<ChaveCargo, i64> {
    cargos
        .iter()
        .map(|cargo| {
            (
                (
                    cargo.classe_cargo.clone(),
                    cargo.padrao_cargo,
                    cargo.nivel_cargo,
                    Some(cargo.descricao_cargo.clone()),
                ),
                cargo.id_cargo_funcao,
            )
        })
        .collect()
}

/// Normaliza e reconcilia o lote: linhas sem id ou sem descrição de
/// cargo são descartadas; linhas cuja chave não existe no catálogo são
/// descartadas com um aviso em log, sem abortar a importação.
pub fn reconciliar(
    lote: &LoteCsv,
    indice: &HashMap<ChaveCargo, i64>,
) -> Result<Vec<NovoFuncaoCargo>, AppError> {
    lote.verificar_colunas(COLUNAS_OBRIGATORIAS)?;

    let mut registros = Vec::new();

    for linha in lote.linhas() {
        let Some(id_servidor) = analisar_id(lote.valor(linha, "Id_SERVIDOR_PORTAL")) else {
            continue;
        };
        if lote
            .valor(linha, "DESCRICAO_CARGO")
            .map(str::trim)
            .unwrap_or("")
            .is_empty()
        {
            continue;
        }

        let descricao_cargo = limpar_texto_opcional(lote.valor(linha, "DESCRICAO_CARGO"));
        let chave: ChaveCargo = (
            limpar_texto_opcional(lote.valor(linha, "CLASSE_CARGO")),
            limpar_inteiro_digitos(lote.valor(linha, "PADRAO_CARGO")),
            limpar_inteiro_digitos(lote.valor(linha, "NIVEL_CARGO")),
            descricao_cargo.clone(),
        );

        match indice.get(&chave) {
            Some(&id_cargo_funcao) => registros.push(NovoFuncaoCargo {
                id_servidor,
                id_cargo_funcao,
                data_ingresso_funcao: analisar_data(
                    lote.valor(linha, "DATA_INGRESSO_CARGOFUNCAO"),
                ),
            }),
            None => tracing::warn!(
                "[SKIP] Cargo não encontrado para servidor {} → {:?}",
                id_servidor,
                descricao_cargo
            ),
        }
    }

    Ok(registros)
}

pub async fn importar_csv(
    catalogo_repo: &CargoFuncaoRepository,
    vinculo_repo: &FuncaoCargoRepository,
    bytes: &[u8],
) -> Result<u64, AppError> {
    let conteudo = decodificar_latin1(bytes);
    let lote = LoteCsv::ler(&conteudo)?;

    let catalogo = catalogo_repo.listar_todos().await?;
    let indice = indexar_catalogo(&catalogo);
    let registros = reconciliar(&lote, &indice)?;

    if registros.is_empty() {
        tracing::warn!("Nenhum vínculo válido para importar.");
        return Ok(0);
    }

    let total_processados = vinculo_repo.inserir_lote(&registros).await?;
    tracing::info!(
        "Importação concluída: {} vínculos processados.",
        total_processados
    );
    Ok(total_processados)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const CABECALHO: &str = "Id_SERVIDOR_PORTAL;DATA_INGRESSO_CARGOFUNCAO;CLASSE_CARGO;REFERENCIA_CARGO;PADRAO_CARGO;NIVEL_CARGO;FUNCAO;DESCRICAO_CARGO;NIVEL_FUNCAO";

    fn catalogo_exemplo() -> Vec<CargoFuncao> {
        vec![
            CargoFuncao {
                id_cargo_funcao: 7,
                classe_cargo: Some("A".to_string()),
                referencia_cargo: Some(101),
                padrao_cargo: Some(5),
                nivel_cargo: Some(3),
                funcao: Some("FCT".to_string()),
                descricao_cargo: "Analista Administrativo".to_string(),
                nivel_funcao: Some(2),
            },
            CargoFuncao {
                id_cargo_funcao: 9,
                classe_cargo: None,
                referencia_cargo: None,
                padrao_cargo: None,
                nivel_cargo: None,
                funcao: None,
                descricao_cargo: "Tecnico Judiciario".to_string(),
                nivel_funcao: None,
            },
        ]
    }

    #[test]
    fn vinculo_com_cargo_existente_recebe_o_id_do_catalogo() {
        let indice = indexar_catalogo(&catalogo_exemplo());
        let conteudo = format!(
            "{CABECALHO}\n\
             123;10/01/2020;A;101;5;3;FCT;Analista Administrativo;2\n\
             456;;sem informação;;;;;Tecnico Judiciario;\n"
        );
        let lote = LoteCsv::ler(&conteudo).unwrap();
        let registros = reconciliar(&lote, &indice).unwrap();

        assert_eq!(registros.len(), 2);
        assert_eq!(registros[0].id_servidor, 123);
        assert_eq!(registros[0].id_cargo_funcao, 7);
        assert_eq!(
            registros[0].data_ingresso_funcao,
            NaiveDate::from_ymd_opt(2020, 1, 10)
        );
        assert_eq!(registros[1].id_cargo_funcao, 9);
        assert_eq!(registros[1].data_ingresso_funcao, None);
    }

    #[test]
    fn vinculo_sem_cargo_no_catalogo_e_descartado() {
        let indice = indexar_catalogo(&catalogo_exemplo());
        let conteudo = format!(
            "{CABECALHO}\n\
             123;10/01/2020;Z;999;9;9;FCT;Cargo Inexistente;1\n"
        );
        let lote = LoteCsv::ler(&conteudo).unwrap();
        let registros = reconciliar(&lote, &indice).unwrap();

        assert!(registros.is_empty());
    }

    #[test]
    fn linhas_sem_id_ou_sem_descricao_sao_descartadas() {
        let indice = indexar_catalogo(&catalogo_exemplo());
        let conteudo = format!(
            "{CABECALHO}\n\
             abc;;A;101;5;3;FCT;Analista Administrativo;2\n\
             123;;A;101;5;3;FCT;;2\n"
        );
        let lote = LoteCsv::ler(&conteudo).unwrap();
        let registros = reconciliar(&lote, &indice).unwrap();

        assert!(registros.is_empty());
    }
}
