// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Servidores ---
        handlers::servidores::importar,
        handlers::servidores::criar,
        handlers::servidores::listar,
        handlers::servidores::buscar,
        handlers::servidores::deletar,

        // --- Remunerações ---
        handlers::remuneracoes::importar,
        handlers::remuneracoes::criar,
        handlers::remuneracoes::listar,
        handlers::remuneracoes::buscar,
        handlers::remuneracoes::deletar,

        // --- Afastamentos ---
        handlers::afastamentos::importar,
        handlers::afastamentos::criar,
        handlers::afastamentos::listar,
        handlers::afastamentos::buscar,
        handlers::afastamentos::deletar,

        // --- Observações ---
        handlers::observacoes::importar,
        handlers::observacoes::criar,
        handlers::observacoes::listar,
        handlers::observacoes::buscar,
        handlers::observacoes::deletar,

        // --- Catálogo de cargos ---
        handlers::cargos_funcoes::importar,
        handlers::cargos_funcoes::listar,
        handlers::cargos_funcoes::buscar,
        handlers::cargos_funcoes::deletar,

        // --- Vínculos servidor/cargo ---
        handlers::funcoes_cargos::importar,
        handlers::funcoes_cargos::listar_por_servidor,
        handlers::funcoes_cargos::buscar,
        handlers::funcoes_cargos::deletar,

        // --- Analytics ---
        handlers::analytics::health_check,
        handlers::analytics::resumo_geral,
        handlers::analytics::insights,
        handlers::analytics::relatorio_completo,
        handlers::analytics::comparativo,
        handlers::analytics::graficos,
        handlers::analytics::download_estatisticas_csv,
    ),
    components(
        schemas(
            models::servidor::Servidor,
            models::servidor::NovoServidor,
            models::remuneracao::Remuneracao,
            models::remuneracao::NovaRemuneracao,
            models::afastamento::Afastamento,
            models::afastamento::NovoAfastamento,
            models::observacao::Observacao,
            models::observacao::NovaObservacao,
            models::cargo_funcao::CargoFuncao,
            models::funcao_cargo::FuncaoCargo,
            models::importacao::ImportacaoResponse,
            models::analytics::Insight,
            models::analytics::ResumoGeral,
            models::analytics::EstatisticasRemuneracao,
            models::analytics::TopRemuneracao,
            models::analytics::RemuneracaoPorCargo,
            models::analytics::AnaliseRemuneracao,
            models::analytics::ServidorAfastado,
            models::analytics::AfastamentosPorMes,
            models::analytics::AnaliseAfastamentos,
            models::analytics::ContagemPorCategoria,
            models::analytics::DistribuicaoOrganizacional,
            models::analytics::RelatorioCompleto,
            models::analytics::RelatorioRequest,
            models::analytics::ResumoComparativo,
            models::analytics::ResumoDeAno,
            models::analytics::ComparativoAnual,
            models::analytics::StatusResponse,
            models::analytics::PontoEvolucaoMensal,
            models::analytics::PontoDispersao,
            models::analytics::LinhaTendencia,
            models::analytics::DispersaoRemuneracaoAfastamentos,
            models::analytics::DadosGraficos,
            models::analytics::GraficosResponse,
        )
    ),
    tags(
        (name = "Servidores", description = "Cadastro e importação de servidores"),
        (name = "Remunerações", description = "Registros mensais de remuneração"),
        (name = "Afastamentos", description = "Registros de afastamento"),
        (name = "Observações", description = "Observações textuais por período"),
        (name = "Cargos e Funções", description = "Catálogo de cargos"),
        (name = "Funções e Cargos", description = "Vínculos servidor/cargo"),
        (name = "Analytics", description = "Relatórios, insights e estatísticas")
    ),
    info(
        title = "Portal de Transparência - Backend",
        description = "Importação de CSVs de servidores públicos e análises estatísticas"
    )
)]
pub struct ApiDoc;
