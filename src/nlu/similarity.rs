//! # Similaridade de Sequências (Ratcliff/Obershelp)
//!
//! Usada no último nível da detecção de capítulo, para tolerar erros de
//! digitação ("binery" → "binary").
//!
//! ## Algoritmo
//!
//! ```text
//! ratio(a, b) = 2·M / (|a| + |b|)
//!
//! M = soma dos blocos casados:
//!   1. acha o maior bloco comum de a[alo..ahi] e b[blo..bhi]
//!      (empate → menor índice em a, depois menor índice em b)
//!   2. repete recursivamente à esquerda e à direita do bloco
//! ```
//!
//! Comparação por `char`, sensível a maiúsculas.

/// Razão de similaridade entre `a` e `b`, em `[0.0, 1.0]`.
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matched = matched_chars(&a, &b, 0, a.len(), 0, b.len());
    2.0 * matched as f64 / total as f64
}

/// Melhor candidato com razão ≥ `cutoff` em relação a `word`.
///
/// Maior razão vence; em empate, o candidato lexicograficamente maior.
/// `None` quando nenhum candidato atinge o corte.
pub fn closest_match<'a>(word: &str, candidates: &[&'a str], cutoff: f64) -> Option<&'a str> {
    let mut best: Option<(f64, &'a str)> = None;
    for &candidate in candidates {
        let score = sequence_ratio(candidate, word);
        if score < cutoff {
            continue;
        }
        let better = match best {
            None => true,
            Some((best_score, best_term)) => {
                score > best_score || (score == best_score && candidate > best_term)
            }
        };
        if better {
            best = Some((score, candidate));
        }
    }
    best.map(|(_, term)| term)
}

/// Total de caracteres nos blocos casados de `a[alo..ahi]` × `b[blo..bhi]`.
fn matched_chars(a: &[char], b: &[char], alo: usize, ahi: usize, blo: usize, bhi: usize) -> usize {
    let (i, j, k) = longest_block(a, b, alo, ahi, blo, bhi);
    if k == 0 {
        return 0;
    }
    let mut total = k;
    if alo < i && blo < j {
        total += matched_chars(a, b, alo, i, blo, j);
    }
    if i + k < ahi && j + k < bhi {
        total += matched_chars(a, b, i + k, ahi, j + k, bhi);
    }
    total
}

/// Maior bloco comum `(i, j, tamanho)` dentro da janela.
fn longest_block(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_k) = (alo, blo, 0);
    let width = bhi - blo;
    // prev[x + 1] = tamanho do bloco que termina em (i - 1, blo + x)
    let mut prev = vec![0usize; width + 1];
    for i in alo..ahi {
        let mut cur = vec![0usize; width + 1];
        for j in blo..bhi {
            if a[i] != b[j] {
                continue;
            }
            let k = prev[j - blo] + 1;
            cur[j - blo + 1] = k;
            if k > best_k {
                best_i = i + 1 - k;
                best_j = j + 1 - k;
                best_k = k;
            }
        }
        prev = cur;
    }
    (best_i, best_j, best_k)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_and_disjoint() {
        assert_eq!(sequence_ratio("binary", "binary"), 1.0);
        assert_eq!(sequence_ratio("abc", "xyz"), 0.0);
        assert_eq!(sequence_ratio("", ""), 1.0);
    }

    #[test]
    fn partial_overlap() {
        assert!((sequence_ratio("abcd", "bcde") - 0.75).abs() < 1e-9);
        // "bin" + "ry" casados → 2·5 / 12
        assert!((sequence_ratio("binary", "binery") - 10.0 / 12.0).abs() < 1e-9);
    }

    #[test]
    fn case_sensitive() {
        assert!(sequence_ratio("Binary", "binary") < 1.0);
    }

    #[test]
    fn closest_match_respects_cutoff() {
        let candidates = ["sequential", "Sequential Logic", "combinational"];
        assert_eq!(closest_match("sequental", &candidates, 0.8), Some("sequential"));
        assert_eq!(closest_match("question", &candidates, 0.8), None);
    }

    #[test]
    fn ties_prefer_the_greater_candidate() {
        let candidates = ["abcx", "abcy"];
        assert_eq!(closest_match("abcz", &candidates, 0.7), Some("abcy"));
    }
}
