// src/db/servidor_repo.rs

use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::{
    common::error::AppError,
    db::TAMANHO_LOTE,
    models::servidor::{FiltroServidores, NovoServidor, Servidor},
};

#[derive(Clone)]
pub struct ServidorRepository {
    pool: PgPool,
}

impl ServidorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insere servidores em lotes de [`TAMANHO_LOTE`], cada lote em uma
    /// transação própria com ON CONFLICT DO NOTHING sobre a chave
    /// primária: linhas já existentes nunca são sobrescritas.
    ///
    /// Um lote que falha é desfeito e registrado em log; os lotes
    /// seguintes continuam. O total devolvido conta linhas submetidas e
    /// pode ser menor que o tamanho da entrada.
    pub async fn inserir_lote(&self, registros: &[NovoServidor]) -> Result<u64, AppError> {
        let mut total_processados = 0u64;

        for (indice, lote) in registros.chunks(TAMANHO_LOTE).enumerate() {
            let mut qb = QueryBuilder::<Postgres>::new(
                "INSERT INTO servidores (id_servidor, nome, cpf, descr_cargo, \
                 org_superior, org_exercicio, regime, jornada_trabalho) ",
            );
            qb.push_values(lote, |mut b, s| {
                b.push_bind(s.id_servidor)
                    .push_bind(s.nome.clone())
                    .push_bind(s.cpf.clone())
                    .push_bind(s.descr_cargo.clone())
                    .push_bind(s.org_superior.clone())
                    .push_bind(s.org_exercicio.clone())
                    .push_bind(s.regime.clone())
                    .push_bind(s.jornada_trabalho.clone());
            });
            qb.push(" ON CONFLICT (id_servidor) DO NOTHING");

            let resultado = async {
                let mut tx = self.pool.begin().await?;
                qb.build().execute(&mut *tx).await?;
                tx.commit().await
            }
            .await;

            match resultado {
                Ok(()) => {
                    total_processados += lote.len() as u64;
                    tracing::info!("Lote {} importado: {} servidores.", indice + 1, lote.len());
                }
                Err(erro) => {
                    tracing::error!("Erro ao importar lote {}: {}", indice + 1, erro);
                }
            }
        }

        Ok(total_processados)
    }

    pub async fn criar(&self, novo: &NovoServidor) -> Result<Servidor, AppError> {
        let servidor = sqlx::query_as::<_, Servidor>(
            r#"
            INSERT INTO servidores (id_servidor, nome, cpf, descr_cargo,
                org_superior, org_exercicio, regime, jornada_trabalho)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id_servidor, nome, cpf, descr_cargo,
                org_superior, org_exercicio, regime, jornada_trabalho
            "#,
        )
        .bind(novo.id_servidor)
        .bind(&novo.nome)
        .bind(&novo.cpf)
        .bind(&novo.descr_cargo)
        .bind(&novo.org_superior)
        .bind(&novo.org_exercicio)
        .bind(&novo.regime)
        .bind(&novo.jornada_trabalho)
        .fetch_one(&self.pool)
        .await?;

        Ok(servidor)
    }

    pub async fn buscar_por_id(&self, id_servidor: i64) -> Result<Option<Servidor>, AppError> {
        let servidor = sqlx::query_as::<_, Servidor>(
            "SELECT * FROM servidores WHERE id_servidor = $1",
        )
        .bind(id_servidor)
        .fetch_optional(&self.pool)
        .await?;

        Ok(servidor)
    }

    pub async fn listar(&self, filtro: &FiltroServidores) -> Result<Vec<Servidor>, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT id_servidor, nome, cpf, descr_cargo, org_superior, \
             org_exercicio, regime, jornada_trabalho FROM servidores WHERE 1=1",
        );

        if let Some(nome) = &filtro.nome {
            qb.push(" AND nome ILIKE ").push_bind(format!("%{nome}%"));
        }
        if let Some(cpf) = &filtro.cpf_parcial {
            qb.push(" AND cpf LIKE ").push_bind(format!("%{cpf}%"));
        }
        if let Some(cargo) = &filtro.descr_cargo {
            qb.push(" AND descr_cargo ILIKE ").push_bind(format!("%{cargo}%"));
        }
        if let Some(org) = &filtro.org_superior {
            qb.push(" AND org_superior = ").push_bind(org.to_uppercase());
        }
        if let Some(org) = &filtro.org_exercicio {
            qb.push(" AND org_exercicio = ").push_bind(org.to_uppercase());
        }
        if let Some(regime) = &filtro.regime {
            qb.push(" AND regime = ").push_bind(regime.to_uppercase());
        }
        if let Some(jornada) = &filtro.jornada_trabalho {
            qb.push(" AND jornada_trabalho = ").push_bind(jornada.to_uppercase());
        }

        let limit = filtro.limit.unwrap_or(50).clamp(1, 100);
        let offset = filtro.offset.unwrap_or(0).max(0);
        qb.push(" ORDER BY id_servidor LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let servidores = qb
            .build_query_as::<Servidor>()
            .fetch_all(&self.pool)
            .await?;

        Ok(servidores)
    }

    /// Remove o servidor e seus registros dependentes. A importação nunca
    /// apaga em cascata; só este caminho explícito remove dependentes.
    pub async fn deletar(&self, id_servidor: i64) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM remuneracoes WHERE id_servidor = $1")
            .bind(id_servidor)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM afastamentos WHERE id_servidor = $1")
            .bind(id_servidor)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM observacoes WHERE id_servidor = $1")
            .bind(id_servidor)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM funcao_cargo WHERE id_servidor = $1")
            .bind(id_servidor)
            .execute(&mut *tx)
            .await?;

        let resultado = sqlx::query("DELETE FROM servidores WHERE id_servidor = $1")
            .bind(id_servidor)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(resultado.rows_affected() > 0)
    }
}
