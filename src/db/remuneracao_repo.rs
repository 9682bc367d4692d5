// src/db/remuneracao_repo.rs

use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::{
    common::error::AppError,
    db::TAMANHO_LOTE,
    models::remuneracao::{FiltroPeriodo, NovaRemuneracao, Remuneracao},
};

#[derive(Clone)]
pub struct RemuneracaoRepository {
    pool: PgPool,
}

impl RemuneracaoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insere remunerações em lotes transacionais. Não há chave única em
    /// (servidor, ano, mês), então o ON CONFLICT DO NOTHING não impede
    /// duplicatas em reimportações; é o comportamento preservado da
    /// fonte de dados.
    pub async fn inserir_lote(&self, registros: &[NovaRemuneracao]) -> Result<u64, AppError> {
        let mut total_processados = 0u64;

        for (indice, lote) in registros.chunks(TAMANHO_LOTE).enumerate() {
            let mut qb = QueryBuilder::<Postgres>::new(
                "INSERT INTO remuneracoes (id_servidor, ano, mes, remuneracao, \
                 irrf, pss_rpgs, remuneracao_final) ",
            );
            qb.push_values(lote, |mut b, r| {
                b.push_bind(r.id_servidor)
                    .push_bind(r.ano)
                    .push_bind(r.mes)
                    .push_bind(r.remuneracao)
                    .push_bind(r.irrf)
                    .push_bind(r.pss_rpgs)
                    .push_bind(r.remuneracao_final);
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
                    tracing::info!("Lote {} importado: {} remunerações.", indice + 1, lote.len());
                }
                Err(erro) => {
                    tracing::error!("Erro ao importar lote {}: {}", indice + 1, erro);
                }
            }
        }

        Ok(total_processados)
    }

    pub async fn criar(&self, nova: &NovaRemuneracao) -> Result<Remuneracao, AppError> {
        let remuneracao = sqlx::query_as::<_, Remuneracao>(
            r#"
            INSERT INTO remuneracoes (id_servidor, ano, mes, remuneracao,
                irrf, pss_rpgs, remuneracao_final)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id_remuneracao, id_servidor, ano, mes, remuneracao,
                irrf, pss_rpgs, remuneracao_final
            "#,
        )
        .bind(nova.id_servidor)
        .bind(nova.ano)
        .bind(nova.mes)
        .bind(nova.remuneracao)
        .bind(nova.irrf)
        .bind(nova.pss_rpgs)
        .bind(nova.remuneracao_final)
        .fetch_one(&self.pool)
        .await?;

        Ok(remuneracao)
    }

    pub async fn buscar_por_id(&self, id_remuneracao: i64) -> Result<Option<Remuneracao>, AppError> {
        let remuneracao = sqlx::query_as::<_, Remuneracao>(
            "SELECT * FROM remuneracoes WHERE id_remuneracao = $1",
        )
        .bind(id_remuneracao)
        .fetch_optional(&self.pool)
        .await?;

        Ok(remuneracao)
    }

    pub async fn listar(&self, filtro: &FiltroPeriodo) -> Result<Vec<Remuneracao>, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT id_remuneracao, id_servidor, ano, mes, remuneracao, \
             irrf, pss_rpgs, remuneracao_final FROM remuneracoes WHERE 1=1",
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
        qb.push(" ORDER BY ano DESC, mes DESC, id_remuneracao LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let remuneracoes = qb
            .build_query_as::<Remuneracao>()
            .fetch_all(&self.pool)
            .await?;

        Ok(remuneracoes)
    }

    pub async fn deletar(&self, id_remuneracao: i64) -> Result<bool, AppError> {
        let resultado = sqlx::query("DELETE FROM remuneracoes WHERE id_remuneracao = $1")
            .bind(id_remuneracao)
            .execute(&self.pool)
            .await?;

        Ok(resultado.rows_affected() > 0)
    }
}
