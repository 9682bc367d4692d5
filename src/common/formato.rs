//! Formatação numérica localizada para os relatórios exportados:
//! vírgula como separador decimal e ponto como separador de milhares.

/// Formata um número com `casas` casas decimais no padrão brasileiro
/// (ex.: 1234567.891 com 2 casas vira "1.234.567,89").
pub fn formatar_numero(valor: f64, casas: usize) -> String {
    let texto = format!("{valor:.casas$}");
    let (inteiro, fracao) = match texto.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (texto, None),
    };

    let (sinal, digitos) = match inteiro.strip_prefix('-') {
        Some(resto) => ("-", resto),
        None => ("", inteiro.as_str()),
    };

    let mut agrupado = String::new();
    for (i, c) in digitos.chars().enumerate() {
        if i > 0 && (digitos.len() - i) % 3 == 0 {
            agrupado.push('.');
        }
        agrupado.push(c);
    }

    match fracao {
        Some(f) => format!("{sinal}{agrupado},{f}"),
        None => format!("{sinal}{agrupado}"),
    }
}

/// Formata um valor monetário em reais ("R$ 1.234,56").
pub fn formatar_moeda(valor: f64) -> String {
    format!("R$ {}", formatar_numero(valor, 2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agrupa_milhares_e_troca_separador_decimal() {
        assert_eq!(formatar_numero(1234.56, 2), "1.234,56");
        assert_eq!(formatar_numero(1234567.891, 2), "1.234.567,89");
        assert_eq!(formatar_numero(0.0, 2), "0,00");
        assert_eq!(formatar_numero(999.0, 2), "999,00");
        assert_eq!(formatar_numero(1000.0, 0), "1.000");
    }

    #[test]
    fn preserva_sinal_negativo() {
        assert_eq!(formatar_numero(-1234.5, 2), "-1.234,50");
    }

    #[test]
    fn moeda_com_prefixo() {
        assert_eq!(formatar_moeda(1234.56), "R$ 1.234,56");
        assert_eq!(formatar_moeda(0.0), "R$ 0,00");
    }
}
