pub mod servidor_repo;
pub use servidor_repo::ServidorRepository;
pub mod remuneracao_repo;
pub use remuneracao_repo::RemuneracaoRepository;
pub mod afastamento_repo;
pub use afastamento_repo::AfastamentoRepository;
pub mod observacao_repo;
pub use observacao_repo::ObservacaoRepository;
pub mod cargo_funcao_repo;
pub use cargo_funcao_repo::CargoFuncaoRepository;
pub mod funcao_cargo_repo;
pub use funcao_cargo_repo::FuncaoCargoRepository;
pub mod analytics_repo;
pub use analytics_repo::AnalyticsRepository;
pub mod estatisticas_repo;
pub use estatisticas_repo::EstatisticasRepository;

/// Tamanho fixo dos lotes de inserção: cada lote é uma transação própria.
pub const TAMANHO_LOTE: usize = 1000;
