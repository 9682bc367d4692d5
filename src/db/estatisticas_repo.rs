// src/db/estatisticas_repo.rs
//
// Consultas do relatório estatístico. Só entram registros com
// remuneração final válida; o resumo e os grupos exigem valor positivo.

use sqlx::{FromRow, PgPool};

use crate::{
    common::error::AppError,
    models::estatisticas::{Agrupamento, GrupoEstatistica, RegistroDetalhado, ResumoExecutivo},
};

/// Linha crua da amostra de correlação: remuneração, mês e contagem de
/// afastamentos do servidor naquele mês.
#[derive(Debug, Clone, FromRow)]
pub struct LinhaCorrelacao {
    pub remuneracao_final: f64,
    pub mes: i32,
    pub total_afastamentos: i64,
}

#[derive(Clone)]
pub struct EstatisticasRepository {
    pool: PgPool,
}

impl EstatisticasRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn resumo_executivo(&self, ano: i32) -> Result<ResumoExecutivo, AppError> {
        let resumo = sqlx::query_as::<_, ResumoExecutivo>(
            "SELECT COUNT(DISTINCT r.id_servidor) AS servidores_ativos, \
             COUNT(r.id_servidor) AS total_registros, \
             COALESCE(SUM(r.remuneracao_final), 0)::float8 AS total_remuneracao, \
             COALESCE(AVG(r.remuneracao_final), 0)::float8 AS media_remuneracao, \
             COALESCE(MIN(r.remuneracao_final), 0)::float8 AS menor_remuneracao, \
             COALESCE(MAX(r.remuneracao_final), 0)::float8 AS maior_remuneracao \
             FROM remuneracoes r \
             WHERE r.ano = $1 AND r.remuneracao_final IS NOT NULL AND r.remuneracao_final > 0",
        )
        .bind(ano)
        .fetch_one(&self.pool)
        .await?;
        Ok(resumo)
    }

    /// Todos os valores válidos de remuneração do ano, em ordem
    /// crescente, para os cálculos descritivos e de percentis.
    pub async fn valores_remuneracao(&self, ano: i32) -> Result<Vec<f64>, AppError> {
        let valores = sqlx::query_scalar::<_, f64>(
            "SELECT remuneracao_final::float8 FROM remuneracoes \
             WHERE ano = $1 AND remuneracao_final IS NOT NULL AND remuneracao_final > 0 \
             ORDER BY remuneracao_final",
        )
        .bind(ano)
        .fetch_all(&self.pool)
        .await?;
        Ok(valores)
    }

    /// Análise agrupada pela dimensão escolhida: cinquenta maiores
    /// grupos por remuneração média.
    pub async fn analise_por_grupo(
        &self,
        ano: i32,
        agrupamento: Agrupamento,
    ) -> Result<Vec<GrupoEstatistica>, AppError> {
        let expressao_grupo = match agrupamento {
            Agrupamento::Cargo => "s.descr_cargo",
            Agrupamento::Orgao => "s.org_exercicio",
            Agrupamento::Mes => "r.mes::text",
            Agrupamento::Servidor => "s.nome || ' (ID: ' || s.id_servidor::text || ')'",
        };

        let sql = format!(
            "SELECT COALESCE({expressao_grupo}, 'N/A') AS grupo, \
             COUNT(DISTINCT r.id_servidor) AS servidores_unicos, \
             COUNT(r.id_servidor) AS total_registros, \
             COALESCE(AVG(r.remuneracao_final), 0)::float8 AS media_remuneracao, \
             COALESCE(MIN(r.remuneracao_final), 0)::float8 AS menor_remuneracao, \
             COALESCE(MAX(r.remuneracao_final), 0)::float8 AS maior_remuneracao, \
             COALESCE(SUM(r.remuneracao_final), 0)::float8 AS total_remuneracao, \
             COALESCE(MAX(r.remuneracao_final) - MIN(r.remuneracao_final), 0)::float8 AS amplitude_salarial \
             FROM remuneracoes r \
             LEFT JOIN servidores s ON r.id_servidor = s.id_servidor \
             WHERE r.ano = $1 AND r.remuneracao_final IS NOT NULL AND r.remuneracao_final > 0 \
             GROUP BY {expressao_grupo} \
             ORDER BY media_remuneracao DESC \
             LIMIT 50"
        );

        let grupos = sqlx::query_as::<_, GrupoEstatistica>(&sql)
            .bind(ano)
            .fetch_all(&self.pool)
            .await?;
        Ok(grupos)
    }

    /// Registros individuais em ordem decrescente de remuneração,
    /// limitados para não inflar o arquivo exportado.
    pub async fn dados_detalhados(
        &self,
        ano: i32,
        limite: i64,
    ) -> Result<Vec<RegistroDetalhado>, AppError> {
        let registros = sqlx::query_as::<_, RegistroDetalhado>(
            "SELECT r.id_servidor, COALESCE(s.nome, 'N/A') AS nome_servidor, \
             COALESCE(s.descr_cargo, 'N/A') AS cargo, \
             COALESCE(s.org_exercicio, 'N/A') AS orgao, \
             r.mes, r.remuneracao_final::float8 AS remuneracao_final, r.ano \
             FROM remuneracoes r \
             LEFT JOIN servidores s ON r.id_servidor = s.id_servidor \
             WHERE r.ano = $1 AND r.remuneracao_final IS NOT NULL \
             ORDER BY r.remuneracao_final DESC \
             LIMIT $2",
        )
        .bind(ano)
        .bind(limite)
        .fetch_all(&self.pool)
        .await?;
        Ok(registros)
    }

    /// Amostra para a análise de correlação: uma linha por
    /// (servidor, mês, remuneração) com a contagem de afastamentos
    /// casados por servidor/ano/mês.
    pub async fn linhas_correlacao(
        &self,
        ano: i32,
        limite: i64,
    ) -> Result<Vec<LinhaCorrelacao>, AppError> {
        let linhas = sqlx::query_as::<_, LinhaCorrelacao>(
            "SELECT r.remuneracao_final::float8 AS remuneracao_final, r.mes, \
             COUNT(a.id_afastamento) AS total_afastamentos \
             FROM remuneracoes r \
             LEFT JOIN afastamentos a ON r.id_servidor = a.id_servidor \
                 AND r.ano = a.ano AND r.mes = a.mes \
             WHERE r.ano = $1 AND r.remuneracao_final IS NOT NULL \
             GROUP BY r.id_servidor, r.mes, r.remuneracao_final \
             LIMIT $2",
        )
        .bind(ano)
        .bind(limite)
        .fetch_all(&self.pool)
        .await?;
        Ok(linhas)
    }
}
