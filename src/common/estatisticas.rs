//! Funções estatísticas puras usadas pelos relatórios.
//!
//! Todas operam sobre `f64` já extraído do banco; os serviços convertem
//! `Decimal` antes de chamar. Casos degenerados (amostra vazia, menos de
//! dois valores, variância nula) devolvem 0 ou `None` em vez de falhar.

pub fn media(valores: &[f64]) -> f64 {
    if valores.is_empty() {
        return 0.0;
    }
    valores.iter().sum::<f64>() / valores.len() as f64
}

/// Mediana sobre uma fatia já ordenada de forma crescente.
pub fn mediana(valores_ordenados: &[f64]) -> f64 {
    let n = valores_ordenados.len();
    if n == 0 {
        return 0.0;
    }
    if n % 2 == 1 {
        valores_ordenados[n / 2]
    } else {
        (valores_ordenados[n / 2 - 1] + valores_ordenados[n / 2]) / 2.0
    }
}

/// Moda sobre uma fatia ordenada. Só existe moda quando algum valor se
/// repete; caso contrário devolve `None`.
pub fn moda(valores_ordenados: &[f64]) -> Option<f64> {
    let mut melhor: Option<(f64, usize)> = None;
    let mut i = 0;
    while i < valores_ordenados.len() {
        let valor = valores_ordenados[i];
        let mut contagem = 1;
        while i + contagem < valores_ordenados.len() && valores_ordenados[i + contagem] == valor {
            contagem += 1;
        }
        match melhor {
            Some((_, maior)) if contagem <= maior => {}
            _ => melhor = Some((valor, contagem)),
        }
        i += contagem;
    }
    match melhor {
        Some((valor, contagem)) if contagem > 1 => Some(valor),
        _ => None,
    }
}

/// Variância amostral (divisor n-1). Amostras com menos de dois valores
/// devolvem 0.
pub fn variancia_amostral(valores: &[f64]) -> f64 {
    let n = valores.len();
    if n < 2 {
        return 0.0;
    }
    let m = media(valores);
    valores.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / (n - 1) as f64
}

pub fn desvio_padrao_amostral(valores: &[f64]) -> f64 {
    variancia_amostral(valores).sqrt()
}

/// Coeficiente de variação em pontos percentuais (desvio/média × 100).
/// Zero quando há menos de dois valores ou a média é zero.
pub fn coeficiente_variacao(valores: &[f64]) -> f64 {
    if valores.len() < 2 {
        return 0.0;
    }
    let m = media(valores);
    if m == 0.0 {
        return 0.0;
    }
    (desvio_padrao_amostral(valores) / m) * 100.0
}

/// Percentil por interpolação linear sobre uma fatia ordenada, com `p`
/// em [0, 100].
pub fn percentil(valores_ordenados: &[f64], p: f64) -> f64 {
    let n = valores_ordenados.len();
    if n == 0 {
        return 0.0;
    }
    if n == 1 {
        return valores_ordenados[0];
    }
    let posicao = (n - 1) as f64 * (p / 100.0);
    let base = posicao.floor() as usize;
    let fracao = posicao - base as f64;
    if base + 1 < n {
        valores_ordenados[base] + fracao * (valores_ordenados[base + 1] - valores_ordenados[base])
    } else {
        valores_ordenados[n - 1]
    }
}

/// Coeficiente de correlação de Pearson. Devolve `None` quando as séries
/// têm tamanhos diferentes, menos de dois pontos ou variância nula em
/// alguma das variáveis (o coeficiente seria indefinido).
pub fn correlacao_pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }
    let mx = media(x);
    let my = media(y);
    let mut cov = 0.0;
    let mut vx = 0.0;
    let mut vy = 0.0;
    for (a, b) in x.iter().zip(y.iter()) {
        cov += (a - mx) * (b - my);
        vx += (a - mx) * (a - mx);
        vy += (b - my) * (b - my);
    }
    if vx == 0.0 || vy == 0.0 {
        return None;
    }
    let r = cov / (vx.sqrt() * vy.sqrt());
    if r.is_finite() {
        Some(r)
    } else {
        None
    }
}

/// Regressão linear por mínimos quadrados; devolve (coeficiente angular,
/// intercepto) ou `None` quando x é constante.
pub fn regressao_linear(x: &[f64], y: &[f64]) -> Option<(f64, f64)> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }
    let mx = media(x);
    let my = media(y);
    let mut num = 0.0;
    let mut den = 0.0;
    for (a, b) in x.iter().zip(y.iter()) {
        num += (a - mx) * (b - my);
        den += (a - mx) * (a - mx);
    }
    if den == 0.0 {
        return None;
    }
    let inclinacao = num / den;
    Some((inclinacao, my - inclinacao * mx))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentil_interpolacao_linear() {
        let valores: Vec<f64> = vec![10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0];
        assert!((percentil(&valores, 50.0) - 55.0).abs() < 1e-9);
        assert!((percentil(&valores, 10.0) - 19.0).abs() < 1e-9);
        assert!((percentil(&valores, 0.0) - 10.0).abs() < 1e-9);
        assert!((percentil(&valores, 100.0) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn percentil_amostra_vazia_ou_unitaria() {
        assert_eq!(percentil(&[], 50.0), 0.0);
        assert_eq!(percentil(&[42.0], 99.0), 42.0);
    }

    #[test]
    fn mediana_par_e_impar() {
        assert_eq!(mediana(&[1.0, 2.0, 3.0]), 2.0);
        assert_eq!(mediana(&[1.0, 2.0, 3.0, 4.0]), 2.5);
        assert_eq!(mediana(&[]), 0.0);
    }

    #[test]
    fn moda_so_existe_quando_ha_repeticao() {
        assert_eq!(moda(&[1.0, 2.0, 2.0, 3.0]), Some(2.0));
        assert_eq!(moda(&[1.0, 2.0, 3.0]), None);
        assert_eq!(moda(&[]), None);
        // empate: fica com a primeira sequência de maior contagem
        assert_eq!(moda(&[1.0, 1.0, 2.0, 2.0]), Some(1.0));
    }

    #[test]
    fn coeficiente_variacao_amostra_pequena_devolve_zero() {
        assert_eq!(coeficiente_variacao(&[]), 0.0);
        assert_eq!(coeficiente_variacao(&[100.0]), 0.0);
        assert!(coeficiente_variacao(&[10.0, 20.0, 30.0]) > 0.0);
    }

    #[test]
    fn variancia_e_desvio_amostrais() {
        assert_eq!(variancia_amostral(&[5.0]), 0.0);
        let valores = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        // variância amostral de um conjunto clássico: 32/7
        assert!((variancia_amostral(&valores) - 32.0 / 7.0).abs() < 1e-9);
        assert!((desvio_padrao_amostral(&valores) - (32.0f64 / 7.0).sqrt()).abs() < 1e-9);
    }

    #[test]
    fn pearson_perfeitamente_correlacionado() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [2.0, 4.0, 6.0, 8.0];
        let r = correlacao_pearson(&x, &y).unwrap();
        assert!((r - 1.0).abs() < 1e-9);

        let inverso = [8.0, 6.0, 4.0, 2.0];
        let r = correlacao_pearson(&x, &inverso).unwrap();
        assert!((r + 1.0).abs() < 1e-9);
    }

    #[test]
    fn pearson_variavel_constante_nao_tem_coeficiente() {
        let x = [1.0, 2.0, 3.0];
        let y = [5.0, 5.0, 5.0];
        assert_eq!(correlacao_pearson(&x, &y), None);
    }

    #[test]
    fn regressao_linear_recupera_reta() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [3.0, 5.0, 7.0, 9.0];
        let (a, b) = regressao_linear(&x, &y).unwrap();
        assert!((a - 2.0).abs() < 1e-9);
        assert!((b - 1.0).abs() < 1e-9);
        assert_eq!(regressao_linear(&[1.0, 1.0], &[2.0, 3.0]), None);
    }
}
