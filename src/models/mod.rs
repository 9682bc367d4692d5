pub mod afastamento;
pub mod analytics;
pub mod cargo_funcao;
pub mod estatisticas;
pub mod funcao_cargo;
pub mod importacao;
pub mod observacao;
pub mod remuneracao;
pub mod servidor;
