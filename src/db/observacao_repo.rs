// src/db/observacao_repo.rs

use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::{
    common::error::AppError,
    db::TAMANHO_LOTE,
    models::{
        observacao::{NovaObservacao, Observacao},
        remuneracao::FiltroPeriodo,
    },
};

#[derive(Clone)]
pub struct ObservacaoRepository {
    pool: PgPool,
}

impl ObservacaoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn inserir_lote(&self, registros: &[NovaObservacao]) -> Result<u64, AppError> {
        let mut total_processados = 0u64;

        for (indice, lote) in registros.chunks(TAMANHO_LOTE).enumerate() {
            let mut qb = QueryBuilder::<Postgres>::new(
                "INSERT INTO observacoes (id_servidor, ano, mes, observacao, flag_teto) ",
            );
            qb.push_values(lote, |mut b, o| {
                b.push_bind(o.id_servidor)
                    .push_bind(o.ano)
                    .push_bind(o.mes)
                    .push_bind(o.observacao.clone())
                    .push_bind(o.flag_teto);
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
                    tracing::info!("Lote {} importado: {} observações.", indice + 1, lote.len());
                }
                Err(erro) => {
                    tracing::error!("Erro ao importar lote {}: {}", indice + 1, erro);
                }
            }
        }

        Ok(total_processados)
    }

    pub async fn criar(&self, nova: &NovaObservacao) -> Result<Observacao, AppError> {
        let observacao = sqlx::query_as::<_, Observacao>(
            r#"
            INSERT INTO observacoes (id_servidor, ano, mes, observacao, flag_teto)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id_observacao, id_servidor, ano, mes, observacao, flag_teto
            "#,
        )
        .bind(nova.id_servidor)
        .bind(nova.ano)
        .bind(nova.mes)
        .bind(&nova.observacao)
        .bind(nova.flag_teto)
        .fetch_one(&self.pool)
        .await?;

        Ok(observacao)
    }

    pub async fn buscar_por_id(&self, id_observacao: i64) -> Result<Option<Observacao>, AppError> {
        let observacao = sqlx::query_as::<_, Observacao>(
            "SELECT * FROM observacoes WHERE id_observacao = $1",
        )
        .bind(id_observacao)
        .fetch_optional(&self.pool)
        .await?;

        Ok(observacao)
    }

    pub async fn listar(&self, filtro: &FiltroPeriodo) -> Result<Vec<Observacao>, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT id_observacao, id_servidor, ano, mes, observacao, flag_teto \
             FROM observacoes WHERE 1=1",
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
        qb.push(" ORDER BY ano DESC, mes DESC, id_observacao LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let observacoes = qb
            .build_query_as::<Observacao>()
            .fetch_all(&self.pool)
            .await?;

        Ok(observacoes)
    }

    pub async fn deletar(&self, id_observacao: i64) -> Result<bool, AppError> {
        let resultado = sqlx::query("DELETE FROM observacoes WHERE id_observacao = $1")
            .bind(id_observacao)
            .execute(&self.pool)
            .await?;

        Ok(resultado.rows_affected() > 0)
    }
}
