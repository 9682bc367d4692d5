// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{
        AfastamentoRepository, AnalyticsRepository, CargoFuncaoRepository, EstatisticasRepository,
        FuncaoCargoRepository, ObservacaoRepository, RemuneracaoRepository, ServidorRepository,
    },
    services::{AnalyticsService, EstatisticasService},
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub servidor_repo: ServidorRepository,
    pub remuneracao_repo: RemuneracaoRepository,
    pub afastamento_repo: AfastamentoRepository,
    pub observacao_repo: ObservacaoRepository,
    pub cargo_funcao_repo: CargoFuncaoRepository,
    pub funcao_cargo_repo: FuncaoCargoRepository,
    pub analytics_service: AnalyticsService,
    pub estatisticas_service: EstatisticasService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o grafo de dependências ---
        let servidor_repo = ServidorRepository::new(db_pool.clone());
        let remuneracao_repo = RemuneracaoRepository::new(db_pool.clone());
        let afastamento_repo = AfastamentoRepository::new(db_pool.clone());
        let observacao_repo = ObservacaoRepository::new(db_pool.clone());
        let cargo_funcao_repo = CargoFuncaoRepository::new(db_pool.clone());
        let funcao_cargo_repo = FuncaoCargoRepository::new(db_pool.clone());
        let analytics_service = AnalyticsService::new(AnalyticsRepository::new(db_pool.clone()));
        let estatisticas_service =
            EstatisticasService::new(EstatisticasRepository::new(db_pool.clone()));

        Ok(Self {
            db_pool,
            servidor_repo,
            remuneracao_repo,
            afastamento_repo,
            observacao_repo,
            cargo_funcao_repo,
            funcao_cargo_repo,
            analytics_service,
            estatisticas_service,
        })
    }
}
