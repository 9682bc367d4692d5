// src/services/estatisticas_service.rs
//
// Relatório estatístico completo de um ano: resumo executivo,
// estatísticas descritivas, percentis, análise agrupada, registros
// detalhados e correlações, com renderização em CSV delimitado por ";"
// no formato numérico brasileiro.

use chrono::Local;

use crate::{
    common::{
        error::AppError,
        estatisticas::{
            coeficiente_variacao, correlacao_pearson, desvio_padrao_amostral, media, mediana, moda,
            percentil, variancia_amostral,
        },
        formato::{formatar_moeda, formatar_numero},
    },
    db::{estatisticas_repo::LinhaCorrelacao, EstatisticasRepository},
    models::estatisticas::{
        Agrupamento, Correlacao, DadosEstatisticos, EstatisticasDescritivas, Percentil,
    },
};

/// Amostra máxima usada na análise de correlação.
const LIMITE_CORRELACAO: i64 = 500;

/// Mínimo de linhas para calcular qualquer coeficiente.
const MINIMO_LINHAS_CORRELACAO: usize = 10;

/// Máximo de registros individuais no bloco detalhado.
const LIMITE_DETALHES: i64 = 1000;

/// Interpretação qualitativa de um coeficiente de correlação, pela
/// magnitude absoluta e pelo sinal.
pub fn interpretar_correlacao(coeficiente: f64) -> String {
    let magnitude = coeficiente.abs();
    let intensidade = if magnitude >= 0.9 {
        "muito forte"
    } else if magnitude >= 0.7 {
        "forte"
    } else if magnitude >= 0.5 {
        "moderada"
    } else if magnitude >= 0.3 {
        "fraca"
    } else {
        "muito fraca"
    };
    let direcao = if coeficiente > 0.0 { "positiva" } else { "negativa" };
    format!("Correlação {intensidade} {direcao}")
}

/// Estatísticas descritivas sobre os valores válidos do ano, já
/// ordenados de forma crescente.
pub fn calcular_descritivas(valores_ordenados: &[f64]) -> EstatisticasDescritivas {
    let maximo = valores_ordenados.last().copied().unwrap_or(0.0);
    let minimo = valores_ordenados.first().copied().unwrap_or(0.0);
    EstatisticasDescritivas {
        media_remuneracao: media(valores_ordenados),
        mediana_remuneracao: mediana(valores_ordenados),
        moda_remuneracao: moda(valores_ordenados),
        desvio_padrao: desvio_padrao_amostral(valores_ordenados),
        variancia: variancia_amostral(valores_ordenados),
        amplitude: maximo - minimo,
        coeficiente_variacao: coeficiente_variacao(valores_ordenados),
    }
}

/// Escada de percentis da remuneração, com interpolação linear.
pub fn montar_percentis(valores_ordenados: &[f64]) -> Vec<Percentil> {
    let escada: [(&str, f64); 7] = [
        ("P10", 10.0),
        ("Q1 (P25)", 25.0),
        ("Q2 (P50 - Mediana)", 50.0),
        ("Q3 (P75)", 75.0),
        ("P90", 90.0),
        ("P95", 95.0),
        ("P99", 99.0),
    ];
    escada
        .iter()
        .map(|(rotulo, p)| Percentil {
            rotulo: rotulo.to_string(),
            valor: percentil(valores_ordenados, *p),
        })
        .collect()
}

/// Correlações remuneração × mês e remuneração × afastamentos sobre a
/// amostra. Exige pelo menos dez linhas e dois valores distintos na
/// segunda variável; pares indefinidos são omitidos.
pub fn calcular_correlacoes(linhas: &[LinhaCorrelacao]) -> Vec<Correlacao> {
    if linhas.len() < MINIMO_LINHAS_CORRELACAO {
        return Vec::new();
    }

    let remuneracoes: Vec<f64> = linhas.iter().map(|l| l.remuneracao_final).collect();
    let meses: Vec<f64> = linhas.iter().map(|l| l.mes as f64).collect();
    let afastamentos: Vec<f64> = linhas.iter().map(|l| l.total_afastamentos as f64).collect();

    let mut correlacoes = Vec::new();

    let meses_distintos = {
        let mut valores: Vec<i32> = linhas.iter().map(|l| l.mes).collect();
        valores.sort_unstable();
        valores.dedup();
        valores.len()
    };
    if meses_distintos > 1 {
        if let Some(coeficiente) = correlacao_pearson(&remuneracoes, &meses) {
            correlacoes.push(Correlacao {
                variavel1: "Remuneração".to_string(),
                variavel2: "Mês".to_string(),
                coeficiente,
            });
        }
    }

    let afastamentos_distintos = {
        let mut valores: Vec<i64> = linhas.iter().map(|l| l.total_afastamentos).collect();
        valores.sort_unstable();
        valores.dedup();
        valores.len()
    };
    if afastamentos_distintos > 1 {
        if let Some(coeficiente) = correlacao_pearson(&remuneracoes, &afastamentos) {
            correlacoes.push(Correlacao {
                variavel1: "Remuneração".to_string(),
                variavel2: "Afastamentos".to_string(),
                coeficiente,
            });
        }
    }

    correlacoes
}

#[derive(Clone)]
pub struct EstatisticasService {
    repo: EstatisticasRepository,
}

impl EstatisticasService {
    pub fn new(repo: EstatisticasRepository) -> Self {
        Self { repo }
    }

    /// Monta o conjunto completo de estatísticas do ano. Uma falha na
    /// etapa de correlação não derruba o relatório: o bloco sai vazio.
    pub async fn gerar_estatisticas(
        &self,
        ano: i32,
        agrupamento: Agrupamento,
        incluir_detalhes: bool,
    ) -> Result<DadosEstatisticos, AppError> {
        let resumo_executivo = self.repo.resumo_executivo(ano).await?;
        let total_registros = resumo_executivo.total_registros;

        let (estatisticas_descritivas, quartis_percentis) = if total_registros > 0 {
            let valores = self.repo.valores_remuneracao(ano).await?;
            if valores.is_empty() {
                (None, None)
            } else {
                (
                    Some(calcular_descritivas(&valores)),
                    Some(montar_percentis(&valores)),
                )
            }
        } else {
            (None, None)
        };

        let analise_por_grupo = self.repo.analise_por_grupo(ano, agrupamento).await?;

        let dados_detalhados = if incluir_detalhes {
            Some(self.repo.dados_detalhados(ano, LIMITE_DETALHES).await?)
        } else {
            None
        };

        let correlacoes = match self.repo.linhas_correlacao(ano, LIMITE_CORRELACAO).await {
            Ok(linhas) => calcular_correlacoes(&linhas),
            Err(erro) => {
                tracing::error!("Erro ao calcular correlações: {}", erro);
                Vec::new()
            }
        };

        Ok(DadosEstatisticos {
            ano,
            agrupamento: agrupamento.rotulo().to_string(),
            resumo_executivo,
            estatisticas_descritivas,
            quartis_percentis,
            analise_por_grupo,
            dados_detalhados,
            correlacoes,
            total_registros,
        })
    }

    /// Renderiza o relatório como texto delimitado por ";", com BOM
    /// UTF-8 para abrir direto em planilhas, seções tituladas na ordem
    /// fixa e números no formato brasileiro.
    pub fn renderizar_csv(dados: &DadosEstatisticos) -> Result<String, AppError> {
        let mut escritor = csv::WriterBuilder::new()
            .delimiter(b';')
            .flexible(true)
            .from_writer(Vec::new());

        let escrever =
            |escritor: &mut csv::Writer<Vec<u8>>, campos: &[&str]| -> Result<(), AppError> {
                escritor
                    .write_record(campos)
                    .map_err(|e| AppError::RelatorioError(e.to_string()))
            };

        // Cabeçalho e metadados
        escrever(
            &mut escritor,
            &[&format!(
                "RELATÓRIO ESTATÍSTICO - SERVIDORES PÚBLICOS - ANO {}",
                dados.ano
            )],
        )?;
        escrever(
            &mut escritor,
            &[&format!(
                "Gerado em: {}",
                Local::now().format("%d/%m/%Y às %H:%M:%S")
            )],
        )?;
        escrever(
            &mut escritor,
            &[&format!("Agrupamento: {}", dados.agrupamento.to_uppercase())],
        )?;
        escrever(&mut escritor, &[""])?;

        // 1. Resumo executivo
        escrever(&mut escritor, &["RESUMO EXECUTIVO"])?;
        let resumo = &dados.resumo_executivo;
        escrever(
            &mut escritor,
            &["Servidores Ativos", &resumo.servidores_ativos.to_string()],
        )?;
        escrever(
            &mut escritor,
            &["Total de Registros", &resumo.total_registros.to_string()],
        )?;
        escrever(
            &mut escritor,
            &[
                "Total Remuneração",
                &formatar_numero(resumo.total_remuneracao, 2),
            ],
        )?;
        escrever(
            &mut escritor,
            &[
                "Média Remuneração",
                &formatar_numero(resumo.media_remuneracao, 2),
            ],
        )?;
        escrever(
            &mut escritor,
            &[
                "Menor Remuneração",
                &formatar_numero(resumo.menor_remuneracao, 2),
            ],
        )?;
        escrever(
            &mut escritor,
            &[
                "Maior Remuneração",
                &formatar_numero(resumo.maior_remuneracao, 2),
            ],
        )?;
        escrever(&mut escritor, &[""])?;

        // 2. Estatísticas descritivas
        if let Some(descritivas) = &dados.estatisticas_descritivas {
            escrever(&mut escritor, &["ESTATÍSTICAS DESCRITIVAS"])?;
            escrever(&mut escritor, &["Métrica", "Valor"])?;
            escrever(
                &mut escritor,
                &[
                    "Média Remuneração",
                    &formatar_moeda(descritivas.media_remuneracao),
                ],
            )?;
            escrever(
                &mut escritor,
                &[
                    "Mediana Remuneração",
                    &formatar_moeda(descritivas.mediana_remuneracao),
                ],
            )?;
            let moda_formatada = match descritivas.moda_remuneracao {
                Some(valor) => formatar_moeda(valor),
                None => "N/A".to_string(),
            };
            escrever(&mut escritor, &["Moda Remuneração", &moda_formatada])?;
            escrever(
                &mut escritor,
                &["Desvio Padrão", &formatar_numero(descritivas.desvio_padrao, 2)],
            )?;
            escrever(
                &mut escritor,
                &["Variância", &formatar_numero(descritivas.variancia, 2)],
            )?;
            escrever(
                &mut escritor,
                &["Amplitude", &formatar_numero(descritivas.amplitude, 2)],
            )?;
            escrever(
                &mut escritor,
                &[
                    "Coeficiente Variação",
                    &formatar_numero(descritivas.coeficiente_variacao, 2),
                ],
            )?;
            escrever(&mut escritor, &[""])?;
        }

        // 3. Análise por agrupamento
        escrever(
            &mut escritor,
            &[&format!("ANÁLISE POR {}", dados.agrupamento.to_uppercase())],
        )?;
        if !dados.analise_por_grupo.is_empty() {
            escrever(
                &mut escritor,
                &[
                    &capitalizar(&dados.agrupamento),
                    "Servidores Únicos",
                    "Total de Registros",
                    "Média Remuneração",
                    "Menor Remuneração",
                    "Maior Remuneração",
                    "Total Remuneração",
                    "Amplitude Salarial",
                ],
            )?;
            for grupo in &dados.analise_por_grupo {
                escrever(
                    &mut escritor,
                    &[
                        &grupo.grupo,
                        &grupo.servidores_unicos.to_string(),
                        &grupo.total_registros.to_string(),
                        &formatar_moeda(grupo.media_remuneracao),
                        &formatar_moeda(grupo.menor_remuneracao),
                        &formatar_moeda(grupo.maior_remuneracao),
                        &formatar_moeda(grupo.total_remuneracao),
                        &formatar_moeda(grupo.amplitude_salarial),
                    ],
                )?;
            }
        }
        escrever(&mut escritor, &[""])?;

        // 4. Quartis e percentis
        if let Some(percentis) = &dados.quartis_percentis {
            escrever(&mut escritor, &["ANÁLISE DE QUARTIS E PERCENTIS"])?;
            escrever(&mut escritor, &["Percentil", "Valor da Remuneração"])?;
            for item in percentis {
                escrever(&mut escritor, &[&item.rotulo, &formatar_moeda(item.valor)])?;
            }
            escrever(&mut escritor, &[""])?;
        }

        // 5. Dados detalhados (opcional)
        if let Some(detalhes) = &dados.dados_detalhados {
            escrever(&mut escritor, &["DADOS DETALHADOS"])?;
            if !detalhes.is_empty() {
                escrever(
                    &mut escritor,
                    &[
                        "Id Servidor",
                        "Nome Servidor",
                        "Cargo",
                        "Órgão",
                        "Mês",
                        "Remuneração Final",
                        "Ano",
                    ],
                )?;
                for registro in detalhes {
                    escrever(
                        &mut escritor,
                        &[
                            &registro.id_servidor.to_string(),
                            &registro.nome_servidor,
                            &registro.cargo,
                            &registro.orgao,
                            &registro.mes.to_string(),
                            &formatar_moeda(registro.remuneracao_final),
                            &registro.ano.to_string(),
                        ],
                    )?;
                }
            }
            escrever(&mut escritor, &[""])?;
        }

        // 6. Correlações
        escrever(&mut escritor, &["ANÁLISE DE CORRELAÇÕES"])?;
        escrever(
            &mut escritor,
            &[
                "Variável 1",
                "Variável 2",
                "Coeficiente de Correlação",
                "Interpretação",
            ],
        )?;
        for correlacao in &dados.correlacoes {
            escrever(
                &mut escritor,
                &[
                    &correlacao.variavel1,
                    &correlacao.variavel2,
                    &format!("{:.4}", correlacao.coeficiente),
                    &interpretar_correlacao(correlacao.coeficiente),
                ],
            )?;
        }
        escrever(&mut escritor, &[""])?;

        // 7. Observações e metodologia
        escrever(&mut escritor, &["OBSERVAÇÕES E METODOLOGIA"])?;
        escrever(&mut escritor, &["• Valores monetários em reais (R$)"])?;
        escrever(&mut escritor, &["• Separador decimal: vírgula (,)"])?;
        escrever(&mut escritor, &["• Separador de milhares: ponto (.)"])?;
        escrever(
            &mut escritor,
            &["• Dados baseados em registros de remuneração válidos"],
        )?;
        escrever(
            &mut escritor,
            &["• Estatísticas calculadas apenas para servidores ativos no período"],
        )?;
        escrever(
            &mut escritor,
            &[&format!("• Período de análise: {}", dados.ano)],
        )?;
        escrever(
            &mut escritor,
            &[&format!(
                "• Total de registros analisados: {}",
                dados.total_registros
            )],
        )?;

        let bytes = escritor
            .into_inner()
            .map_err(|e| AppError::RelatorioError(e.to_string()))?;
        let corpo =
            String::from_utf8(bytes).map_err(|e| AppError::RelatorioError(e.to_string()))?;

        // BOM para o Excel reconhecer UTF-8
        Ok(format!("\u{feff}{corpo}"))
    }
}

fn capitalizar(texto: &str) -> String {
    let mut caracteres = texto.chars();
    match caracteres.next() {
        Some(primeiro) => primeiro.to_uppercase().collect::<String>() + caracteres.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::estatisticas::{GrupoEstatistica, RegistroDetalhado, ResumoExecutivo};

    fn dados_exemplo() -> DadosEstatisticos {
        let valores: Vec<f64> = (1..=10).map(|i| (i * 1000) as f64).collect();
        DadosEstatisticos {
            ano: 2023,
            agrupamento: "cargo".to_string(),
            resumo_executivo: ResumoExecutivo {
                servidores_ativos: 4,
                total_registros: 10,
                total_remuneracao: 55000.0,
                media_remuneracao: 5500.0,
                menor_remuneracao: 1000.0,
                maior_remuneracao: 10000.0,
            },
            estatisticas_descritivas: Some(calcular_descritivas(&valores)),
            quartis_percentis: Some(montar_percentis(&valores)),
            analise_por_grupo: vec![GrupoEstatistica {
                grupo: "ANALISTA".to_string(),
                servidores_unicos: 2,
                total_registros: 6,
                media_remuneracao: 6000.0,
                menor_remuneracao: 2000.0,
                maior_remuneracao: 10000.0,
                total_remuneracao: 36000.0,
                amplitude_salarial: 8000.0,
            }],
            dados_detalhados: Some(vec![RegistroDetalhado {
                id_servidor: 123,
                nome_servidor: "MARIA".to_string(),
                cargo: "ANALISTA".to_string(),
                orgao: "RECEITA".to_string(),
                mes: 5,
                remuneracao_final: 10000.0,
                ano: 2023,
            }]),
            correlacoes: vec![Correlacao {
                variavel1: "Remuneração".to_string(),
                variavel2: "Mês".to_string(),
                coeficiente: 0.75,
            }],
            total_registros: 10,
        }
    }

    #[test]
    fn interpretacao_por_faixas_de_magnitude() {
        assert_eq!(interpretar_correlacao(0.95), "Correlação muito forte positiva");
        assert_eq!(interpretar_correlacao(-0.8), "Correlação forte negativa");
        assert_eq!(interpretar_correlacao(0.6), "Correlação moderada positiva");
        assert_eq!(interpretar_correlacao(-0.35), "Correlação fraca negativa");
        assert_eq!(interpretar_correlacao(0.1), "Correlação muito fraca positiva");
    }

    #[test]
    fn percentis_da_escada_padrao() {
        let valores: Vec<f64> = (1..=10).map(|i| (i * 10) as f64).collect();
        let percentis = montar_percentis(&valores);
        assert_eq!(percentis.len(), 7);
        let p50 = percentis
            .iter()
            .find(|p| p.rotulo == "Q2 (P50 - Mediana)")
            .unwrap();
        assert!((p50.valor - 55.0).abs() < 1e-9);
    }

    #[test]
    fn correlacoes_exigem_amostra_minima() {
        let linhas: Vec<LinhaCorrelacao> = (0..5)
            .map(|i| LinhaCorrelacao {
                remuneracao_final: 1000.0 * (i + 1) as f64,
                mes: i + 1,
                total_afastamentos: i as i64,
            })
            .collect();
        assert!(calcular_correlacoes(&linhas).is_empty());
    }

    #[test]
    fn correlacoes_omitem_variavel_constante() {
        // mês constante: só a correlação com afastamentos sobrevive
        let linhas: Vec<LinhaCorrelacao> = (0..12)
            .map(|i| LinhaCorrelacao {
                remuneracao_final: 1000.0 + 100.0 * i as f64,
                mes: 6,
                total_afastamentos: i as i64,
            })
            .collect();
        let correlacoes = calcular_correlacoes(&linhas);
        assert_eq!(correlacoes.len(), 1);
        assert_eq!(correlacoes[0].variavel2, "Afastamentos");
        assert!(correlacoes[0].coeficiente > 0.99);
    }

    #[test]
    fn descritivas_sem_moda_quando_nao_ha_repeticao() {
        let valores: Vec<f64> = vec![1.0, 2.0, 3.0];
        let descritivas = calcular_descritivas(&valores);
        assert_eq!(descritivas.moda_remuneracao, None);
        assert_eq!(descritivas.amplitude, 2.0);

        let repetidos = vec![1.0, 2.0, 2.0, 3.0];
        assert_eq!(calcular_descritivas(&repetidos).moda_remuneracao, Some(2.0));
    }

    #[test]
    fn renderizacao_segue_a_ordem_das_secoes() {
        let csv = EstatisticasService::renderizar_csv(&dados_exemplo()).unwrap();

        assert!(csv.starts_with('\u{feff}'));
        let posicoes: Vec<usize> = [
            "RELATÓRIO ESTATÍSTICO",
            "RESUMO EXECUTIVO",
            "ESTATÍSTICAS DESCRITIVAS",
            "ANÁLISE POR CARGO",
            "ANÁLISE DE QUARTIS E PERCENTIS",
            "DADOS DETALHADOS",
            "ANÁLISE DE CORRELAÇÕES",
            "OBSERVAÇÕES E METODOLOGIA",
        ]
        .iter()
        .map(|secao| csv.find(secao).expect(secao))
        .collect();
        assert!(posicoes.windows(2).all(|par| par[0] < par[1]));
    }

    #[test]
    fn renderizacao_usa_formato_numerico_brasileiro() {
        let csv = EstatisticasService::renderizar_csv(&dados_exemplo()).unwrap();
        assert!(csv.contains("55.000,00"));
        assert!(csv.contains("R$ 10.000,00"));
        assert!(csv.contains("0.7500"));
        assert!(csv.contains("Correlação forte positiva"));
    }
}
