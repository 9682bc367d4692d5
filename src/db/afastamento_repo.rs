// src/db/afastamento_repo.rs

use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::{
    common::error::AppError,
    db::TAMANHO_LOTE,
    models::{
        afastamento::{Afastamento, NovoAfastamento},
        remuneracao::FiltroPeriodo,
    },
};

#[derive(Clone)]
pub struct AfastamentoRepository {
    pool: PgPool,
}

impl AfastamentoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insere afastamentos em lotes transacionais. Como em remunerações,
    /// não há chave única no banco e reimportar duplica registros.
    pub async fn inserir_lote(&self, registros: &[NovoAfastamento]) -> Result<u64, AppError> {
        let mut total_processados = 0u64;

        for (indice, lote) in registros.chunks(TAMANHO_LOTE).enumerate() {
            let mut qb = QueryBuilder::<Postgres>::new(
                "INSERT INTO afastamentos (id_servidor, ano, mes, inicio_afastamento, duracao_dias) ",
            );
            qb.push_values(lote, |mut b, a| {
                b.push_bind(a.id_servidor)
                    .push_bind(a.ano)
                    .push_bind(a.mes)
                    .push_bind(a.inicio_afastamento)
                    .push_bind(a.duracao_dias);
            });
            qb.push(" ON CONFLICT DO NOTHING");

            let resultado = async {
                let mut tx = self.pool.begin().await?;
                qb.build().execute(&mut *tx).await?;
                tx.commit().await
            }
            .await;

            match resultado {
                Ok(()) => {
                    total_processados += lote.len() as u64;
                    tracing::info!("Lote {} importado: {} afastamentos.", indice + 1, lote.len());
                }
                Err(erro) => {
                    tracing::error!("Erro ao importar lote {}: {}", indice + 1, erro);
                }
            }
        }

        Ok(total_processados)
    }

    pub async fn criar(&self, novo: &NovoAfastamento) -> Result<Afastamento, AppError> {
        let afastamento = sqlx::query_as::<_, Afastamento>(
            r#"
            INSERT INTO afastamentos (id_servidor, ano, mes, inicio_afastamento, duracao_dias)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id_afastamento, id_servidor, ano, mes, inicio_afastamento, duracao_dias
            "#,
        )
        .bind(novo.id_servidor)
        .bind(novo.ano)
        .bind(novo.mes)
        .bind(novo.inicio_afastamento)
        .bind(novo.duracao_dias)
        .fetch_one(&self.pool)
        .await?;

        Ok(afastamento)
    }

    pub async fn buscar_por_id(&self, id_afastamento: i64) -> Result<Option<Afastamento>, AppError> {
        let afastamento = sqlx::query_as::<_, Afastamento>(
            "SELECT * FROM afastamentos WHERE id_afastamento = $1",
        )
        .bind(id_afastamento)
        .fetch_optional(&self.pool)
        .await?;

        Ok(afastamento)
    }

    pub async fn listar(&self, filtro: &FiltroPeriodo) -> Result<Vec<Afastamento>, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT id_afastamento, id_servidor, ano, mes, inicio_afastamento, \
             duracao_dias FROM afastamentos WHERE 1=1",
        );

        if let Some(id_servidor) = filtro.id_servidor {
            qb.push(" AND id_servidor = ").push_bind(id_servidor);
        }
        if let Some(ano) = filtro.ano {
            qb.push(" AND ano = ").push_bind(ano);
        }
        if let Some(mes) = filtro.mes {
            qb.push(" AND mes = ").push_bind(mes);
        }

        let limit = filtro.limit.unwrap_or(50).clamp(1, 100);
        let offset = filtro.offset.unwrap_or(0).max(0);
        qb.push(" ORDER BY ano DESC, mes DESC, id_afastamento LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let afastamentos = qb
            .build_query_as::<Afastamento>()
            .fetch_all(&self.pool)
            .await?;

        Ok(afastamentos)
    }

    pub async fn deletar(&self, id_afastamento: i64) -> Result<bool, AppError> {
        let resultado = sqlx::query("DELETE FROM afastamentos WHERE id_afastamento = $1")
            .bind(id_afastamento)
            .execute(&self.pool)
            .await?;

        Ok(resultado.rows_affected() > 0)
    }
}
