//! Pipeline de importação dos CSVs do portal.
//!
//! Os arquivos chegam codificados em Latin-1 e separados por ";". Cada
//! importador segue o mesmo fluxo: verificação das colunas esperadas,
//! normalização linha a linha com limpeza defensiva, deduplicação pela
//! chave lógica da entidade e carga em lotes transacionais de 1000
//! linhas com ON CONFLICT DO NOTHING.
//!
//! Linhas sem os campos-chave (id do servidor, ano, mês ou texto
//! obrigatório) são descartadas sem contar como erro. Uma coluna
//! ausente aborta a importação inteira antes de qualquer linha.

pub mod afastamentos;
pub mod cargos_funcoes;
pub mod funcoes_cargos;
pub mod observacoes;
pub mod remuneracoes;
pub mod servidores;

use std::collections::HashMap;

use chrono::NaiveDate;
use csv::StringRecord;
use rust_decimal::Decimal;

use crate::common::error::AppError;

/// Decodifica Latin-1 sem perdas: em ISO-8859-1 cada byte corresponde
/// ao ponto de código Unicode de mesmo valor.
pub fn decodificar_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// Lote tabular bruto: cabeçalho indexado por nome + linhas como chegaram.
pub struct LoteCsv {
    indices: HashMap<String, usize>,
    linhas: Vec<StringRecord>,
}

impl LoteCsv {
    pub fn ler(conteudo: &str) -> Result<Self, AppError> {
        let mut leitor = csv::ReaderBuilder::new()
            .delimiter(b';')
            .has_headers(true)
            .flexible(true)
            .from_reader(conteudo.as_bytes());

        let cabecalho = leitor
            .headers()
            .map_err(|e| AppError::ArquivoInvalido(format!("CSV ilegível: {e}")))?
            .clone();
        let indices = cabecalho
            .iter()
            .enumerate()
            .map(|(i, coluna)| (coluna.trim().to_string(), i))
            .collect();

        let mut linhas = Vec::new();
        for registro in leitor.records() {
            match registro {
                Ok(linha) => linhas.push(linha),
                Err(e) => tracing::warn!("Linha ilegível no CSV, descartada: {}", e),
            }
        }

        Ok(Self { indices, linhas })
    }

    /// Falha com [`AppError::ColunaAusente`] na primeira coluna esperada
    /// que não existir no cabeçalho.
    pub fn verificar_colunas(&self, obrigatorias: &[&str]) -> Result<(), AppError> {
        for coluna in obrigatorias {
            if !self.indices.contains_key(*coluna) {
                return Err(AppError::ColunaAusente((*coluna).to_string()));
            }
        }
        Ok(())
    }

    pub fn linhas(&self) -> &[StringRecord] {
        &self.linhas
    }

    /// Valor bruto de uma coluna numa linha; célula fora do registro
    /// (linha curta) vira `None`.
    pub fn valor<'a>(&self, linha: &'a StringRecord, coluna: &str) -> Option<&'a str> {
        let indice = *self.indices.get(coluna)?;
        linha.get(indice)
    }
}

// --- Limpeza de valores ---

/// Id de servidor: aceito apenas quando o texto é composto só de
/// dígitos decimais.
pub fn analisar_id(valor: Option<&str>) -> Option<i64> {
    let texto = valor?.trim();
    if texto.is_empty() || !texto.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    texto.parse().ok()
}

/// Ano/mês: inteiro simples; vazio ou não numérico descarta a linha.
pub fn analisar_inteiro(valor: Option<&str>) -> Option<i32> {
    valor?.trim().parse().ok()
}

/// Texto obrigatório: aparado, vazio quando ausente.
pub fn limpar_texto(valor: Option<&str>) -> String {
    valor.unwrap_or("").trim().to_string()
}

/// Campos organizacionais/categóricos: aparados e em caixa alta.
pub fn limpar_texto_maiusculo(valor: Option<&str>) -> String {
    limpar_texto(valor).to_uppercase()
}

/// Texto opcional com sentinelas de ausência: vazio, "-1" e as
/// variantes de "sem informação" (inclusive a forma truncada que
/// aparece nos arquivos do portal) viram `None`.
pub fn limpar_texto_opcional(valor: Option<&str>) -> Option<String> {
    let texto = valor?.trim();
    let minusculo = texto.to_lowercase();
    if matches!(minusculo.as_str(), "" | "-1" | "sem informação" | "sem informaç") {
        return None;
    }
    Some(texto.to_string())
}

/// Campos numéricos de cargo (referência, padrão, nível): tenta parse
/// numérico e trata falha, os sentinelas -1 e 0, valores não finitos e
/// fora da faixa de um inteiro de 64 bits como ausentes.
pub fn limpar_inteiro_opcional(valor: Option<&str>) -> Option<i64> {
    let texto = valor?.trim();
    let numero: f64 = texto.parse().ok()?;
    if !numero.is_finite() || numero == -1.0 || numero == 0.0 {
        return None;
    }
    if numero < i64::MIN as f64 || numero > i64::MAX as f64 {
        return None;
    }
    Some(numero as i64)
}

/// Variante estrita usada na reconciliação de vínculos: além das
/// sentinelas textuais, só aceita dígitos puros.
pub fn limpar_inteiro_digitos(valor: Option<&str>) -> Option<i64> {
    let texto = limpar_texto_opcional(valor)?;
    if !texto.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    texto.parse().ok()
}

/// Moeda localizada: "." separa milhares e "," separa decimais
/// ("1.234,56" → 1234.56). Ausente ou ilegível vale 0,00.
pub fn analisar_moeda(valor: Option<&str>) -> Decimal {
    let texto = match valor {
        Some(t) => t.trim(),
        None => return Decimal::new(0, 2),
    };
    if texto.is_empty() {
        return Decimal::new(0, 2);
    }
    let normalizado = texto.replace('.', "").replace(',', ".");
    match normalizado.parse::<Decimal>() {
        Ok(numero) => numero.round_dp(2),
        Err(_) => Decimal::new(0, 2),
    }
}

/// Datas no formato "DD/MM/YYYY"; qualquer outra coisa vira ausente.
pub fn analisar_data(valor: Option<&str>) -> Option<NaiveDate> {
    let texto = valor?.trim();
    NaiveDate::parse_from_str(texto, "%d/%m/%Y").ok()
}

/// Flag de teto: o texto limpo contém "ACIMA DO TETO", sem distinção de
/// caixa.
pub fn contem_acima_do_teto(observacao: &str) -> bool {
    observacao.to_uppercase().contains("ACIMA DO TETO")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn analisar_id_exige_somente_digitos() {
        assert_eq!(analisar_id(Some("12345")), Some(12345));
        assert_eq!(analisar_id(Some(" 67 ")), Some(67));
        assert_eq!(analisar_id(Some("12a45")), None);
        assert_eq!(analisar_id(Some("-12")), None);
        assert_eq!(analisar_id(Some("")), None);
        assert_eq!(analisar_id(None), None);
    }

    #[test]
    fn moeda_no_formato_brasileiro() {
        assert_eq!(
            analisar_moeda(Some("1.234,56")),
            Decimal::from_str("1234.56").unwrap()
        );
        assert_eq!(analisar_moeda(Some("0,00")), Decimal::from_str("0.00").unwrap());
        assert_eq!(
            analisar_moeda(Some("12.345.678,90")),
            Decimal::from_str("12345678.90").unwrap()
        );
        assert_eq!(analisar_moeda(Some("abc")), Decimal::new(0, 2));
        assert_eq!(analisar_moeda(Some("")), Decimal::new(0, 2));
        assert_eq!(analisar_moeda(None), Decimal::new(0, 2));
    }

    #[test]
    fn data_somente_no_formato_do_portal() {
        assert_eq!(
            analisar_data(Some("15/03/2023")),
            NaiveDate::from_ymd_opt(2023, 3, 15)
        );
        assert_eq!(analisar_data(Some("2023-03-15")), None);
        assert_eq!(analisar_data(Some("32/01/2023")), None);
        assert_eq!(analisar_data(Some("")), None);
        assert_eq!(analisar_data(None), None);
    }

    #[test]
    fn sentinelas_de_ausencia_viram_none() {
        assert_eq!(limpar_texto_opcional(Some("Sem informação")), None);
        assert_eq!(limpar_texto_opcional(Some("sem informaç")), None);
        assert_eq!(limpar_texto_opcional(Some("-1")), None);
        assert_eq!(limpar_texto_opcional(Some("  ")), None);
        assert_eq!(limpar_texto_opcional(None), None);
        assert_eq!(
            limpar_texto_opcional(Some(" CLASSE A ")),
            Some("CLASSE A".to_string())
        );
    }

    #[test]
    fn inteiro_opcional_descarta_sentinelas_e_fora_de_faixa() {
        assert_eq!(limpar_inteiro_opcional(Some("101")), Some(101));
        assert_eq!(limpar_inteiro_opcional(Some("101.0")), Some(101));
        assert_eq!(limpar_inteiro_opcional(Some("-1")), None);
        assert_eq!(limpar_inteiro_opcional(Some("0")), None);
        assert_eq!(limpar_inteiro_opcional(Some("NaN")), None);
        assert_eq!(limpar_inteiro_opcional(Some("inf")), None);
        assert_eq!(limpar_inteiro_opcional(Some("1e300")), None);
        assert_eq!(limpar_inteiro_opcional(Some("abc")), None);
        assert_eq!(limpar_inteiro_opcional(None), None);
    }

    #[test]
    fn latin1_decodifica_acentos() {
        // "REMUNERAÇÃO" em Latin-1: Ç = 0xC7, Ã = 0xC3
        let bytes = b"REMUNERA\xC7\xC3O";
        assert_eq!(decodificar_latin1(bytes), "REMUNERAÇÃO");
    }

    #[test]
    fn flag_teto_ignora_caixa() {
        assert!(contem_acima_do_teto("Remuneração acima do teto constitucional"));
        assert!(contem_acima_do_teto("ACIMA DO TETO"));
        assert!(!contem_acima_do_teto("Dentro do limite"));
    }

    #[test]
    fn lote_csv_verifica_colunas_e_indexa_valores() {
        let conteudo = "Id_SERVIDOR_PORTAL;ANO;MES\n123;2023;5\n";
        let lote = LoteCsv::ler(conteudo).unwrap();

        assert!(lote.verificar_colunas(&["Id_SERVIDOR_PORTAL", "ANO", "MES"]).is_ok());
        let erro = lote.verificar_colunas(&["NOME"]).unwrap_err();
        assert!(matches!(erro, AppError::ColunaAusente(coluna) if coluna == "NOME"));

        let linha = &lote.linhas()[0];
        assert_eq!(lote.valor(linha, "ANO"), Some("2023"));
        assert_eq!(lote.valor(linha, "INEXISTENTE"), None);
    }
}
