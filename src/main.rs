//src/main.rs

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod models;
mod services;

use crate::config::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é adequado aqui: se a configuração falhar, a aplicação
    // não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let servidores_routes = Router::new()
        .route("/importar", put(handlers::servidores::importar))
        .route(
            "/",
            post(handlers::servidores::criar).get(handlers::servidores::listar),
        )
        .route(
            "/{id_servidor}",
            get(handlers::servidores::buscar).delete(handlers::servidores::deletar),
        );

    let remuneracoes_routes = Router::new()
        .route("/importar", put(handlers::remuneracoes::importar))
        .route(
            "/",
            post(handlers::remuneracoes::criar).get(handlers::remuneracoes::listar),
        )
        .route(
            "/{id_remuneracao}",
            get(handlers::remuneracoes::buscar).delete(handlers::remuneracoes::deletar),
        );

    let afastamentos_routes = Router::new()
        .route("/importar", put(handlers::afastamentos::importar))
        .route(
            "/",
            post(handlers::afastamentos::criar).get(handlers::afastamentos::listar),
        )
        .route(
            "/{id_afastamento}",
            get(handlers::afastamentos::buscar).delete(handlers::afastamentos::deletar),
        );

    let observacoes_routes = Router::new()
        .route("/importar", put(handlers::observacoes::importar))
        .route(
            "/",
            post(handlers::observacoes::criar).get(handlers::observacoes::listar),
        )
        .route(
            "/{id_observacao}",
            get(handlers::observacoes::buscar).delete(handlers::observacoes::deletar),
        );

    let cargos_funcoes_routes = Router::new()
        .route("/importar", put(handlers::cargos_funcoes::importar))
        .route("/", get(handlers::cargos_funcoes::listar))
        .route(
            "/{id_cargo_funcao}",
            get(handlers::cargos_funcoes::buscar).delete(handlers::cargos_funcoes::deletar),
        );

    let funcoes_cargos_routes = Router::new()
        .route("/importar", put(handlers::funcoes_cargos::importar))
        .route(
            "/servidor/{id_servidor}",
            get(handlers::funcoes_cargos::listar_por_servidor),
        )
        .route(
            "/{id_servidor_funcao}",
            get(handlers::funcoes_cargos::buscar).delete(handlers::funcoes_cargos::deletar),
        );

    let analytics_routes = Router::new()
        .route("/health", get(handlers::analytics::health_check))
        .route("/resumo/{ano}", get(handlers::analytics::resumo_geral))
        .route("/insights/{ano}", get(handlers::analytics::insights))
        .route(
            "/relatorio-completo",
            post(handlers::analytics::relatorio_completo),
        )
        .route(
            "/comparativo/{ano1}/{ano2}",
            get(handlers::analytics::comparativo),
        )
        .route("/graficos/{ano}", get(handlers::analytics::graficos))
        .route(
            "/download/estatisticas-csv/{ano}",
            get(handlers::analytics::download_estatisticas_csv),
        );

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/servidores", servidores_routes)
        .nest("/api/remuneracoes", remuneracoes_routes)
        .nest("/api/afastamentos", afastamentos_routes)
        .nest("/api/observacoes", observacoes_routes)
        .nest("/api/cargos-funcoes", cargos_funcoes_routes)
        .nest("/api/funcoes-cargos", funcoes_cargos_routes)
        .nest("/api/analytics", analytics_routes)
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", docs::ApiDoc::openapi()),
        )
        // os CSVs do portal passam fácil do limite padrão de 2 MB
        .layer(DefaultBodyLimit::max(50 * 1024 * 1024))
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
