// src/services/analytics_service.rs
//
// Motor de análise dos dados de servidores. Cada relatório roda do zero
// para o ano pedido e carrega seus próprios insights: o comparativo de
// dois anos monta dois relatórios independentes e combina os resumos.

use crate::{
    common::{error::AppError, estatisticas::regressao_linear},
    db::{analytics_repo::DimensaoOrganizacional, AnalyticsRepository},
    models::analytics::{
        AnaliseAfastamentos, AnaliseRemuneracao, ComparativoAnual, DadosGraficos,
        DispersaoRemuneracaoAfastamentos, DistribuicaoOrganizacional, GraficosResponse, Insight,
        LinhaTendencia, RelatorioCompleto, ResumoComparativo, ResumoDeAno, ResumoGeral,
    },
};

/// Nomes dos artefatos de gráfico do ano, na ordem de geração. A
/// renderização em imagem fica com um colaborador externo; o motor
/// entrega as séries numéricas.
pub const NOMES_GRAFICOS: &[&str] = &[
    "evolucao_remuneracao_mensal.png",
    "remuneracao_por_cargo.png",
    "afastamentos_por_mes.png",
    "distribuicao_organizacional.png",
    "remuneracao_vs_afastamentos.png",
];

/// Mínimo de pontos para o gráfico de dispersão fazer sentido.
const MINIMO_PONTOS_DISPERSAO: usize = 10;

fn arredondar2(valor: f64) -> f64 {
    (valor * 100.0).round() / 100.0
}

/// Taxa percentual parte/total; zero quando o denominador é zero.
pub fn calcular_taxa(parte: i64, total: i64) -> f64 {
    if total > 0 {
        (parte as f64 / total as f64) * 100.0
    } else {
        0.0
    }
}

/// Insight de disparidade salarial: só existe quando o mínimo e o
/// máximo do ano são ambos não nulos.
pub fn insight_disparidade(minima: f64, maxima: f64, ano: i32) -> Option<Insight> {
    if minima == 0.0 || maxima == 0.0 {
        return None;
    }
    let disparidade = maxima / minima;
    Some(Insight {
        tipo: "remuneracao".to_string(),
        titulo: "Disparidade Salarial".to_string(),
        valor: format!("{disparidade:.1}x"),
        descricao: format!("A maior remuneração é {disparidade:.1} vezes maior que a menor"),
        periodo: Some(ano.to_string()),
    })
}

#[derive(Clone)]
pub struct AnalyticsService {
    repo: AnalyticsRepository,
}

impl AnalyticsService {
    pub fn new(repo: AnalyticsRepository) -> Self {
        Self { repo }
    }

    /// Resumo geral do ano e o insight de atividade correspondente.
    pub async fn resumo_geral(&self, ano: i32) -> Result<(ResumoGeral, Vec<Insight>), AppError> {
        let total_servidores = self.repo.contar_servidores().await?;
        let servidores_ativos = self.repo.contar_ativos(ano).await?;
        let (total_remuneracao, media_remuneracao) =
            self.repo.total_e_media_remuneracao(ano).await?;

        let insights = vec![Insight {
            tipo: "geral".to_string(),
            titulo: "Total de Servidores Ativos".to_string(),
            valor: servidores_ativos.to_string(),
            descricao: format!(
                "De {total_servidores} servidores cadastrados, {servidores_ativos} estiveram ativos em {ano}"
            ),
            periodo: Some(ano.to_string()),
        }];

        let resumo = ResumoGeral {
            total_servidores,
            servidores_ativos,
            total_remuneracao: arredondar2(total_remuneracao),
            media_remuneracao: arredondar2(media_remuneracao),
            taxa_atividade: arredondar2(calcular_taxa(servidores_ativos, total_servidores)),
        };

        Ok((resumo, insights))
    }

    pub async fn analise_remuneracao(
        &self,
        ano: i32,
    ) -> Result<(AnaliseRemuneracao, Vec<Insight>), AppError> {
        let mut estatisticas = self.repo.estatisticas_remuneracao(ano).await?;
        let mut top_remuneracoes = self.repo.top_remuneracoes(ano, 10).await?;
        let mut remuneracao_por_cargo = self.repo.remuneracao_por_cargo(ano).await?;

        let insights = insight_disparidade(estatisticas.minima, estatisticas.maxima, ano)
            .into_iter()
            .collect();

        estatisticas.minima = arredondar2(estatisticas.minima);
        estatisticas.maxima = arredondar2(estatisticas.maxima);
        estatisticas.media = arredondar2(estatisticas.media);
        for top in &mut top_remuneracoes {
            top.media_anual = arredondar2(top.media_anual);
        }
        for cargo in &mut remuneracao_por_cargo {
            cargo.media_remuneracao = arredondar2(cargo.media_remuneracao);
        }

        Ok((
            AnaliseRemuneracao {
                estatisticas,
                top_remuneracoes,
                remuneracao_por_cargo,
            },
            insights,
        ))
    }

    pub async fn analise_afastamentos(
        &self,
        ano: i32,
    ) -> Result<(AnaliseAfastamentos, Vec<Insight>), AppError> {
        let total_afastamentos = self.repo.contar_afastamentos(ano).await?;
        let total_dias_afastamento = self.repo.somar_dias_afastamento(ano).await?;
        let servidores_mais_afastados = self.repo.servidores_mais_afastados(ano, 10).await?;
        let afastamentos_por_mes = self.repo.afastamentos_por_mes(ano).await?;

        let servidores_ativos = self.repo.contar_ativos(ano).await?;
        let taxa_afastamento = calcular_taxa(total_afastamentos, servidores_ativos);

        let insights = vec![Insight {
            tipo: "afastamento".to_string(),
            titulo: "Taxa de Afastamento".to_string(),
            valor: format!("{taxa_afastamento:.1}%"),
            descricao: "Taxa de afastamentos em relação aos servidores ativos".to_string(),
            periodo: Some(ano.to_string()),
        }];

        Ok((
            AnaliseAfastamentos {
                total_afastamentos,
                total_dias_afastamento,
                taxa_afastamento: arredondar2(taxa_afastamento),
                servidores_mais_afastados,
                afastamentos_por_mes,
            },
            insights,
        ))
    }

    /// Distribuição de servidores pelas quatro dimensões categóricas.
    /// Órgão de exercício é limitado aos quinze maiores; as demais saem
    /// completas.
    pub async fn distribuicao_organizacional(
        &self,
    ) -> Result<DistribuicaoOrganizacional, AppError> {
        let por_org_superior = self
            .repo
            .distribuicao(DimensaoOrganizacional::OrgSuperior, None)
            .await?;
        let por_org_exercicio = self
            .repo
            .distribuicao(DimensaoOrganizacional::OrgExercicio, Some(15))
            .await?;
        let por_regime = self
            .repo
            .distribuicao(DimensaoOrganizacional::Regime, None)
            .await?;
        let por_jornada = self
            .repo
            .distribuicao(DimensaoOrganizacional::Jornada, None)
            .await?;

        Ok(DistribuicaoOrganizacional {
            por_org_superior,
            por_org_exercicio,
            por_regime,
            por_jornada,
        })
    }

    /// Relatório completo do ano: resumo, análises, distribuição, os
    /// insights gerados nesta execução e os nomes dos gráficos.
    pub async fn gerar_relatorio_completo(&self, ano: i32) -> Result<RelatorioCompleto, AppError> {
        let (resumo_geral, mut insights) = self.resumo_geral(ano).await?;
        let (analise_remuneracao, insights_remuneracao) = self.analise_remuneracao(ano).await?;
        insights.extend(insights_remuneracao);
        let (analise_afastamentos, insights_afastamentos) = self.analise_afastamentos(ano).await?;
        insights.extend(insights_afastamentos);
        let distribuicao_organizacional = self.distribuicao_organizacional().await?;

        Ok(RelatorioCompleto {
            periodo: format!("Ano {ano}"),
            resumo_geral,
            analise_remuneracao,
            analise_afastamentos,
            distribuicao_organizacional,
            insights,
            graficos_gerados: NOMES_GRAFICOS.iter().map(|n| n.to_string()).collect(),
        })
    }

    /// Comparativo entre dois anos a partir de dois relatórios
    /// independentes. A variação percentual divide pela média do
    /// primeiro ano sem guarda de zero, como na fonte de dados.
    pub async fn comparativo_anual(
        &self,
        ano1: i32,
        ano2: i32,
    ) -> Result<ComparativoAnual, AppError> {
        let relatorio1 = self.gerar_relatorio_completo(ano1).await?;
        let relatorio2 = self.gerar_relatorio_completo(ano2).await?;

        let diferenca_servidores_ativos =
            relatorio2.resumo_geral.servidores_ativos - relatorio1.resumo_geral.servidores_ativos;
        let diferenca_remuneracao_media =
            relatorio2.resumo_geral.media_remuneracao - relatorio1.resumo_geral.media_remuneracao;
        let percentual_variacao_remuneracao =
            (diferenca_remuneracao_media / relatorio1.resumo_geral.media_remuneracao) * 100.0;

        Ok(ComparativoAnual {
            periodo_comparacao: format!("{ano1} vs {ano2}"),
            resumo_comparativo: ResumoComparativo {
                diferenca_servidores_ativos,
                diferenca_remuneracao_media: arredondar2(diferenca_remuneracao_media),
                percentual_variacao_remuneracao: arredondar2(percentual_variacao_remuneracao),
            },
            ano1: ResumoDeAno {
                ano: ano1,
                resumo: relatorio1.resumo_geral,
            },
            ano2: ResumoDeAno {
                ano: ano2,
                resumo: relatorio2.resumo_geral,
            },
        })
    }

    /// Séries numéricas dos cinco gráficos fixos do ano.
    pub async fn gerar_graficos(&self, ano: i32) -> Result<GraficosResponse, AppError> {
        let evolucao_remuneracao = self.repo.evolucao_mensal(ano).await?;
        let remuneracao_por_cargo = self.repo.remuneracao_por_cargo_top(ano).await?;
        let afastamentos_por_mes = self.repo.afastamentos_por_mes(ano).await?;
        let distribuicao_organizacional = self
            .repo
            .distribuicao(DimensaoOrganizacional::OrgSuperior, Some(10))
            .await?;

        let pontos = self.repo.dispersao_remuneracao_afastamentos(ano).await?;
        let dispersao = if pontos.len() < MINIMO_PONTOS_DISPERSAO {
            DispersaoRemuneracaoAfastamentos {
                pontos: Vec::new(),
                tendencia: None,
            }
        } else {
            let x: Vec<f64> = pontos.iter().map(|p| p.media_remuneracao).collect();
            let y: Vec<f64> = pontos
                .iter()
                .map(|p| p.total_dias_afastamento as f64)
                .collect();
            let tendencia =
                regressao_linear(&x, &y).map(|(inclinacao, intercepto)| LinhaTendencia {
                    inclinacao,
                    intercepto,
                });
            DispersaoRemuneracaoAfastamentos { pontos, tendencia }
        };

        Ok(GraficosResponse {
            graficos_gerados: NOMES_GRAFICOS.iter().map(|n| n.to_string()).collect(),
            dados: DadosGraficos {
                evolucao_remuneracao,
                remuneracao_por_cargo,
                afastamentos_por_mes,
                distribuicao_organizacional,
                dispersao_remuneracao_afastamentos: dispersao,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxa_com_denominador_zero_e_zero() {
        assert_eq!(calcular_taxa(5, 0), 0.0);
        assert_eq!(calcular_taxa(0, 10), 0.0);
        assert!((calcular_taxa(25, 100) - 25.0).abs() < 1e-9);
    }

    #[test]
    fn disparidade_de_seis_vezes() {
        let insight = insight_disparidade(1500.0, 9000.0, 2023).unwrap();
        assert_eq!(insight.valor, "6.0x");
        assert!(insight.descricao.contains("6.0"));
        assert_eq!(insight.periodo.as_deref(), Some("2023"));
    }

    #[test]
    fn disparidade_sem_extremos_nao_gera_insight() {
        assert!(insight_disparidade(0.0, 9000.0, 2023).is_none());
        assert!(insight_disparidade(1500.0, 0.0, 2023).is_none());
    }
}
