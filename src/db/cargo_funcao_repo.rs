// src/db/cargo_funcao_repo.rs

use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::{
    common::error::AppError,
    db::TAMANHO_LOTE,
    models::cargo_funcao::{CargoFuncao, NovoCargoFuncao},
};

#[derive(Clone)]
pub struct CargoFuncaoRepository {
    pool: PgPool,
}

impl CargoFuncaoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insere entradas do catálogo em lotes transacionais. A restrição
    /// única sobre a tupla completa faz o ON CONFLICT DO NOTHING tornar
    /// a reimportação idempotente para esta entidade.
    pub async fn inserir_lote(&self, registros: &[NovoCargoFuncao]) -> Result<u64, AppError> {
        let mut total_processados = 0u64;

        for (indice, lote) in registros.chunks(TAMANHO_LOTE).enumerate() {
            let mut qb = QueryBuilder::<Postgres>::new(
                "INSERT INTO cargofuncao (classe_cargo, referencia_cargo, padrao_cargo, \
                 nivel_cargo, funcao, descricao_cargo, nivel_funcao) ",
            );
            qb.push_values(lote, |mut b, c| {
                b.push_bind(c.classe_cargo.clone())
                    .push_bind(c.referencia_cargo)
                    .push_bind(c.padrao_cargo)
                    .push_bind(c.nivel_cargo)
                    .push_bind(c.funcao.clone())
                    .push_bind(c.descricao_cargo.clone())
                    .push_bind(c.nivel_funcao);
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
                    tracing::info!(
                        "Lote {} importado: {} cargos/funções.",
                        indice + 1,
                        lote.len()
                    );
                }
                Err(erro) => {
                    tracing::error!("Erro ao importar lote {}: {}", indice + 1, erro);
                }
            }
        }

        Ok(total_processados)
    }

    /// Carrega o catálogo inteiro; usado pela reconciliação de vínculos
    /// para montar o índice em memória de uma vez.
    pub async fn listar_todos(&self) -> Result<Vec<CargoFuncao>, AppError> {
        let cargos = sqlx::query_as::<_, CargoFuncao>(
            "SELECT id_cargo_funcao, classe_cargo, referencia_cargo, padrao_cargo, \
             nivel_cargo, funcao, descricao_cargo, nivel_funcao FROM cargofuncao",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(cargos)
    }

    pub async fn buscar_por_id(&self, id_cargo_funcao: i64) -> Result<Option<CargoFuncao>, AppError> {
        let cargo = sqlx::query_as::<_, CargoFuncao>(
            "SELECT * FROM cargofuncao WHERE id_cargo_funcao = $1",
        )
        .bind(id_cargo_funcao)
        .fetch_optional(&self.pool)
        .await?;

        Ok(cargo)
    }

    pub async fn listar(&self, limit: i64, offset: i64) -> Result<Vec<CargoFuncao>, AppError> {
        let cargos = sqlx::query_as::<_, CargoFuncao>(
            "SELECT id_cargo_funcao, classe_cargo, referencia_cargo, padrao_cargo, \
             nivel_cargo, funcao, descricao_cargo, nivel_funcao FROM cargofuncao \
             ORDER BY id_cargo_funcao LIMIT $1 OFFSET $2",
        )
        .bind(limit.clamp(1, 100))
        .bind(offset.max(0))
        .fetch_all(&self.pool)
        .await?;

        Ok(cargos)
    }

    pub async fn deletar(&self, id_cargo_funcao: i64) -> Result<bool, AppError> {
        let resultado = sqlx::query("DELETE FROM cargofuncao WHERE id_cargo_funcao = $1")
            .bind(id_cargo_funcao)
            .execute(&self.pool)
            .await?;

        Ok(resultado.rows_affected() > 0)
    }
}
