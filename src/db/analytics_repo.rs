// src/db/analytics_repo.rs
//
// Consultas agregadas do motor de análise. Valores monetários saem do
// banco já convertidos para float8: as estatísticas derivadas operam em
// ponto flutuante, como o relatório final.

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::analytics::{
        AfastamentosPorMes, ContagemPorCategoria, EstatisticasRemuneracao, PontoDispersao,
        PontoEvolucaoMensal, RemuneracaoPorCargo, ServidorAfastado, TopRemuneracao,
    },
};

/// Dimensões categóricas da distribuição organizacional.
#[derive(Debug, Clone, Copy)]
pub enum DimensaoOrganizacional {
    OrgSuperior,
    OrgExercicio,
    Regime,
    Jornada,
}

impl DimensaoOrganizacional {
    fn coluna(&self) -> &'static str {
        match self {
            DimensaoOrganizacional::OrgSuperior => "org_superior",
            DimensaoOrganizacional::OrgExercicio => "org_exercicio",
            DimensaoOrganizacional::Regime => "regime",
            DimensaoOrganizacional::Jornada => "jornada_trabalho",
        }
    }
}

#[derive(Clone)]
pub struct AnalyticsRepository {
    pool: PgPool,
}

impl AnalyticsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn contar_servidores(&self) -> Result<i64, AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM servidores")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    /// Servidores com pelo menos uma remuneração no ano ("ativos").
    pub async fn contar_ativos(&self, ano: i32) -> Result<i64, AppError> {
        let ativos = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(DISTINCT id_servidor) FROM remuneracoes WHERE ano = $1",
        )
        .bind(ano)
        .fetch_one(&self.pool)
        .await?;
        Ok(ativos)
    }

    pub async fn total_e_media_remuneracao(&self, ano: i32) -> Result<(f64, f64), AppError> {
        let (total, media) = sqlx::query_as::<_, (f64, f64)>(
            "SELECT COALESCE(SUM(remuneracao_final), 0)::float8, \
             COALESCE(AVG(remuneracao_final), 0)::float8 \
             FROM remuneracoes WHERE ano = $1",
        )
        .bind(ano)
        .fetch_one(&self.pool)
        .await?;
        Ok((total, media))
    }

    pub async fn estatisticas_remuneracao(
        &self,
        ano: i32,
    ) -> Result<EstatisticasRemuneracao, AppError> {
        let estatisticas = sqlx::query_as::<_, EstatisticasRemuneracao>(
            "SELECT COALESCE(MIN(remuneracao_final), 0)::float8 AS minima, \
             COALESCE(MAX(remuneracao_final), 0)::float8 AS maxima, \
             COALESCE(AVG(remuneracao_final), 0)::float8 AS media, \
             COUNT(id_remuneracao) AS total_registros \
             FROM remuneracoes WHERE ano = $1",
        )
        .bind(ano)
        .fetch_one(&self.pool)
        .await?;
        Ok(estatisticas)
    }

    /// Maiores remunerações médias do ano, agrupadas por servidor.
    pub async fn top_remuneracoes(
        &self,
        ano: i32,
        limite: i64,
    ) -> Result<Vec<TopRemuneracao>, AppError> {
        let top = sqlx::query_as::<_, TopRemuneracao>(
            "SELECT s.nome, s.descr_cargo AS cargo, \
             AVG(r.remuneracao_final)::float8 AS media_anual \
             FROM remuneracoes r \
             JOIN servidores s ON s.id_servidor = r.id_servidor \
             WHERE r.ano = $1 \
             GROUP BY s.id_servidor, s.nome, s.descr_cargo \
             ORDER BY media_anual DESC \
             LIMIT $2",
        )
        .bind(ano)
        .bind(limite)
        .fetch_all(&self.pool)
        .await?;
        Ok(top)
    }

    pub async fn remuneracao_por_cargo(&self, ano: i32) -> Result<Vec<RemuneracaoPorCargo>, AppError> {
        let por_cargo = sqlx::query_as::<_, RemuneracaoPorCargo>(
            "SELECT s.descr_cargo AS cargo, COUNT(s.id_servidor) AS quantidade, \
             AVG(r.remuneracao_final)::float8 AS media_remuneracao \
             FROM remuneracoes r \
             JOIN servidores s ON s.id_servidor = r.id_servidor \
             WHERE r.ano = $1 \
             GROUP BY s.descr_cargo \
             ORDER BY media_remuneracao DESC",
        )
        .bind(ano)
        .fetch_all(&self.pool)
        .await?;
        Ok(por_cargo)
    }

    /// Série do gráfico de cargos: só cargos com pelo menos cinco
    /// servidores, dez maiores médias.
    pub async fn remuneracao_por_cargo_top(
        &self,
        ano: i32,
    ) -> Result<Vec<RemuneracaoPorCargo>, AppError> {
        let por_cargo = sqlx::query_as::<_, RemuneracaoPorCargo>(
            "SELECT s.descr_cargo AS cargo, COUNT(s.id_servidor) AS quantidade, \
             AVG(r.remuneracao_final)::float8 AS media_remuneracao \
             FROM remuneracoes r \
             JOIN servidores s ON s.id_servidor = r.id_servidor \
             WHERE r.ano = $1 \
             GROUP BY s.descr_cargo \
             HAVING COUNT(s.id_servidor) >= 5 \
             ORDER BY media_remuneracao DESC \
             LIMIT 10",
        )
        .bind(ano)
        .fetch_all(&self.pool)
        .await?;
        Ok(por_cargo)
    }

    pub async fn contar_afastamentos(&self, ano: i32) -> Result<i64, AppError> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM afastamentos WHERE ano = $1",
        )
        .bind(ano)
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }

    pub async fn somar_dias_afastamento(&self, ano: i32) -> Result<i64, AppError> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(SUM(duracao_dias), 0) FROM afastamentos WHERE ano = $1",
        )
        .bind(ano)
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }

    pub async fn servidores_mais_afastados(
        &self,
        ano: i32,
        limite: i64,
    ) -> Result<Vec<ServidorAfastado>, AppError> {
        let mais_afastados = sqlx::query_as::<_, ServidorAfastado>(
            "SELECT s.nome, s.descr_cargo AS cargo, \
             COUNT(a.id_afastamento) AS afastamentos, \
             COALESCE(SUM(a.duracao_dias), 0) AS dias_total \
             FROM afastamentos a \
             JOIN servidores s ON s.id_servidor = a.id_servidor \
             WHERE a.ano = $1 \
             GROUP BY s.id_servidor, s.nome, s.descr_cargo \
             ORDER BY dias_total DESC \
             LIMIT $2",
        )
        .bind(ano)
        .bind(limite)
        .fetch_all(&self.pool)
        .await?;
        Ok(mais_afastados)
    }

    pub async fn afastamentos_por_mes(&self, ano: i32) -> Result<Vec<AfastamentosPorMes>, AppError> {
        let por_mes = sqlx::query_as::<_, AfastamentosPorMes>(
            "SELECT mes, COUNT(id_afastamento) AS quantidade, \
             COALESCE(SUM(duracao_dias), 0) AS total_dias \
             FROM afastamentos WHERE ano = $1 \
             GROUP BY mes ORDER BY mes",
        )
        .bind(ano)
        .fetch_all(&self.pool)
        .await?;
        Ok(por_mes)
    }

    /// Contagem de servidores agrupada por uma dimensão organizacional.
    pub async fn distribuicao(
        &self,
        dimensao: DimensaoOrganizacional,
        limite: Option<i64>,
    ) -> Result<Vec<ContagemPorCategoria>, AppError> {
        let coluna = dimensao.coluna();
        let mut sql = format!(
            "SELECT {coluna} AS categoria, COUNT(id_servidor) AS quantidade \
             FROM servidores GROUP BY {coluna} ORDER BY quantidade DESC"
        );
        if let Some(limite) = limite {
            sql.push_str(&format!(" LIMIT {limite}"));
        }

        let distribuicao = sqlx::query_as::<_, ContagemPorCategoria>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(distribuicao)
    }

    /// Série do gráfico de evolução: média mensal de remuneração no ano.
    pub async fn evolucao_mensal(&self, ano: i32) -> Result<Vec<PontoEvolucaoMensal>, AppError> {
        let evolucao = sqlx::query_as::<_, PontoEvolucaoMensal>(
            "SELECT mes, AVG(remuneracao_final)::float8 AS media, \
             COUNT(id_remuneracao) AS quantidade \
             FROM remuneracoes WHERE ano = $1 \
             GROUP BY mes ORDER BY mes",
        )
        .bind(ano)
        .fetch_all(&self.pool)
        .await?;
        Ok(evolucao)
    }

    /// Pontos do gráfico de dispersão remuneração × dias de afastamento,
    /// um ponto por servidor com remuneração média positiva no ano.
    pub async fn dispersao_remuneracao_afastamentos(
        &self,
        ano: i32,
    ) -> Result<Vec<PontoDispersao>, AppError> {
        let pontos = sqlx::query_as::<_, PontoDispersao>(
            "SELECT s.nome, AVG(r.remuneracao_final)::float8 AS media_remuneracao, \
             COALESCE(SUM(a.duracao_dias), 0) AS total_dias_afastamento \
             FROM servidores s \
             JOIN remuneracoes r ON r.id_servidor = s.id_servidor AND r.ano = $1 \
             LEFT JOIN afastamentos a ON a.id_servidor = s.id_servidor AND a.ano = $1 \
             GROUP BY s.id_servidor, s.nome \
             HAVING AVG(r.remuneracao_final) > 0",
        )
        .bind(ano)
        .fetch_all(&self.pool)
        .await?;
        Ok(pontos)
    }
}
