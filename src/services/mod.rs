pub mod analytics_service;
pub mod estatisticas_service;
pub mod importacao;

pub use analytics_service::AnalyticsService;
pub use estatisticas_service::EstatisticasService;
