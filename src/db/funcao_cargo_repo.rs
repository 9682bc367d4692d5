// src/db/funcao_cargo_repo.rs

use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::{
    common::error::AppError,
    db::TAMANHO_LOTE,
    models::funcao_cargo::{FuncaoCargo, NovoFuncaoCargo},
};

#[derive(Clone)]
pub struct FuncaoCargoRepository {
    pool: PgPool,
}

impl FuncaoCargoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn inserir_lote(&self, registros: &[NovoFuncaoCargo]) -> Result<u64, AppError> {
        let mut total_processados = 0u64;

        for (indice, lote) in registros.chunks(TAMANHO_LOTE).enumerate() {
            let mut qb = QueryBuilder::<Postgres>::new(
                "INSERT INTO funcao_cargo (id_servidor, id_cargo_funcao, data_ingresso_funcao) ",
            );
            qb.push_values(lote, |mut b, v| {
                b.push_bind(v.id_servidor)
                    .push_bind(v.id_cargo_funcao)
                    .push_bind(v.data_ingresso_funcao);
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
                    tracing::info!("Lote {} importado: {} vínculos.", indice + 1, lote.len());
                }
                Err(erro) => {
                    tracing::error!("Erro ao importar lote {}: {}", indice + 1, erro);
                }
            }
        }

        Ok(total_processados)
    }

    pub async fn buscar_por_id(
        &self,
        id_servidor_funcao: i64,
    ) -> Result<Option<FuncaoCargo>, AppError> {
        let vinculo = sqlx::query_as::<_, FuncaoCargo>(
            "SELECT * FROM funcao_cargo WHERE id_servidor_funcao = $1",
        )
        .bind(id_servidor_funcao)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vinculo)
    }

    pub async fn listar_por_servidor(&self, id_servidor: i64) -> Result<Vec<FuncaoCargo>, AppError> {
        let vinculos = sqlx::query_as::<_, FuncaoCargo>(
            "SELECT id_servidor_funcao, id_servidor, id_cargo_funcao, data_ingresso_funcao \
             FROM funcao_cargo WHERE id_servidor = $1 ORDER BY id_servidor_funcao",
        )
        .bind(id_servidor)
        .fetch_all(&self.pool)
        .await?;

        Ok(vinculos)
    }

    pub async fn deletar(&self, id_servidor_funcao: i64) -> Result<bool, AppError> {
        let resultado = sqlx::query("DELETE FROM funcao_cargo WHERE id_servidor_funcao = $1")
            .bind(id_servidor_funcao)
            .execute(&self.pool)
            .await?;

        Ok(resultado.rows_affected() > 0)
    }
}
