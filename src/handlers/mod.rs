pub mod afastamentos;
pub mod analytics;
pub mod cargos_funcoes;
pub mod funcoes_cargos;
pub mod observacoes;
pub mod remuneracoes;
pub mod servidores;

use axum::extract::Multipart;

use crate::common::error::AppError;

/// Extrai o conteúdo do CSV enviado via multipart. O campo precisa se
/// chamar "arquivo" (ou carregar um nome de arquivo) e terminar em
/// ".csv", como no portal de origem.
pub(crate) async fn extrair_csv(multipart: &mut Multipart) -> Result<Vec<u8>, AppError> {
    while let Some(campo) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::ArquivoInvalido(format!("Upload inválido: {e}")))?
    {
        let e_arquivo = campo.name() == Some("arquivo") || campo.file_name().is_some();
        if !e_arquivo {
            continue;
        }

        let nome = campo.file_name().unwrap_or("").to_string();
        if !nome.to_lowercase().ends_with(".csv") {
            return Err(AppError::ArquivoInvalido(
                "O arquivo deve ser um CSV.".to_string(),
            ));
        }

        let bytes = campo
            .bytes()
            .await
            .map_err(|e| AppError::ArquivoInvalido(format!("Falha ao ler o arquivo: {e}")))?;
        return Ok(bytes.to_vec());
    }

    Err(AppError::ArquivoInvalido(
        "Nenhum arquivo enviado.".to_string(),
    ))
}
