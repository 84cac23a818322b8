//! # Extrator de Atributos — Filtros a Partir do Texto Livre
//!
//! O [`AttributeExtractor`] transforma uma mensagem como
//! *"a medium 5 marks question from binary, 2023 paper"* em
//! [`QueryFilters`]. Cada detector é independente e puro (`&str → Option`).
//!
//! ## Detectores
//!
//! | Atributo | Estratégia | Exemplo |
//! |----------|------------|---------|
//! | Capítulo | nome canônico → apelido → fuzzy (≥ 0.8) | "binery" → Binary System |
//! | Dificuldade | substring de low/medium/high | "medium" |
//! | Frequência | substring + sinônimos (regular, annual) | "annual" → yearly |
//! | Marks | inteiro seguido de "mark(s)" | "5mark" → 5 |
//! | Ano | 20[0-2]X, senão 2 dígitos com `'` opcional | "'23" → "2023" |
//!
//! ## ⚠️ Anos de 2 Dígitos
//!
//! Dois dígitos isolados sempre recebem o prefixo "20": "class of 99" vira
//! "2099", e "10 marks" também carrega o ano "2010". O comportamento é
//! mantido como está: qualquer número de 2 dígitos conta como ano.
//!
//! ## ⚠️ Substrings
//!
//! Dificuldade e frequência casam por substring: "follow" contém "low".

use regex::Regex;

use super::similarity::closest_match;
use crate::core::{Chapter, Difficulty, Frequency, MarksQuery, QueryFilters, CHAPTER_ALIASES};

/// Corte mínimo de similaridade para o nível fuzzy da detecção de capítulo.
const FUZZY_CUTOFF: f64 = 0.8;

/// Palavras mais curtas que isso não entram no nível fuzzy.
const FUZZY_MIN_WORD_CHARS: usize = 4;

/// Sinônimos de frequência, testados depois do vocabulário fechado.
const FREQUENCY_SYNONYMS: &[(&str, Frequency)] = &[
    ("regular", Frequency::Frequent),
    ("annual", Frequency::Yearly),
];

/// Extrator de filtros com regexes compiladas uma única vez.
pub struct AttributeExtractor {
    /// `(\d+)\s*marks?`, aplicado ao texto em lowercase.
    marks_re: Regex,
    /// Ano de 4 dígitos entre 2000 e 2029.
    year_full_re: Regex,
    /// Ano de 2 dígitos, com apóstrofo opcional ("'23").
    year_short_re: Regex,
    /// Termos do nível fuzzy: nomes canônicos (caixa original) e apelidos.
    fuzzy_terms: Vec<(&'static str, Chapter)>,
}

impl AttributeExtractor {
    pub fn new() -> Self {
        let fuzzy_terms = Chapter::ALL
            .iter()
            .map(|c| (c.name(), *c))
            .chain(CHAPTER_ALIASES.iter().copied())
            .collect();

        Self {
            marks_re: Regex::new(r"(\d+)\s*marks?").expect("regex de marks inválida"),
            year_full_re: Regex::new(r"\b20[0-2]\d\b").expect("regex de ano inválida"),
            year_short_re: Regex::new(r"'?\b\d{2}\b").expect("regex de ano curto inválida"),
            fuzzy_terms,
        }
    }

    /// Extrai todos os filtros de uma mensagem.
    pub fn extract(&self, text: &str) -> QueryFilters {
        QueryFilters {
            chapter: self.detect_chapter(text),
            difficulty: self.detect_difficulty(text),
            frequency: self.detect_frequency(text),
            marks: self.detect_marks(text),
            year: self.detect_year(text),
        }
    }

    /// Detecta o capítulo em três níveis; o primeiro nível com acerto vence.
    ///
    /// ```text
    /// 1. nome canônico contido no texto (case-insensitive)
    /// 2. apelido contido no texto, na ordem de CHAPTER_ALIASES
    /// 3. para cada palavra ≥ 4 chars, na ordem do texto:
    ///      melhor termo com similaridade ≥ 0.8 → capítulo
    /// ```
    pub fn detect_chapter(&self, text: &str) -> Option<Chapter> {
        let lower = text.to_lowercase();

        if let Some(chapter) = Chapter::ALL
            .into_iter()
            .find(|c| lower.contains(&c.name().to_lowercase()))
        {
            return Some(chapter);
        }

        if let Some((_, chapter)) = CHAPTER_ALIASES.iter().find(|(alias, _)| lower.contains(alias)) {
            return Some(*chapter);
        }

        let terms: Vec<&'static str> = self.fuzzy_terms.iter().map(|(t, _)| *t).collect();
        for word in lower.split_whitespace() {
            if word.chars().count() < FUZZY_MIN_WORD_CHARS {
                continue;
            }
            if let Some(term) = closest_match(word, &terms, FUZZY_CUTOFF) {
                tracing::debug!(word, term, "Capítulo detectado por similaridade");
                return self
                    .fuzzy_terms
                    .iter()
                    .find(|(t, _)| *t == term)
                    .map(|(_, c)| *c);
            }
        }

        None
    }

    pub fn detect_difficulty(&self, text: &str) -> Option<Difficulty> {
        let lower = text.to_lowercase();
        Difficulty::ALL
            .into_iter()
            .find(|d| lower.contains(d.as_str()))
    }

    pub fn detect_frequency(&self, text: &str) -> Option<Frequency> {
        let lower = text.to_lowercase();
        Frequency::ALL
            .into_iter()
            .find(|f| lower.contains(f.as_str()))
            .or_else(|| {
                FREQUENCY_SYNONYMS
                    .iter()
                    .find(|(word, _)| lower.contains(word))
                    .map(|(_, f)| *f)
            })
    }

    /// Primeiro inteiro imediatamente seguido de "mark"/"marks".
    ///
    /// Dígitos que não cabem em `u32` continuam sendo um filtro (que não
    /// casa com nada), para que a resposta cite o valor pedido.
    pub fn detect_marks(&self, text: &str) -> Option<MarksQuery> {
        let lower = text.to_lowercase();
        self.marks_re
            .captures(&lower)
            .and_then(|cap| cap.get(1))
            .map(|m| MarksQuery::parse(m.as_str()))
    }

    /// Ano de prova mencionado, normalizado para 4 dígitos.
    pub fn detect_year(&self, text: &str) -> Option<String> {
        if let Some(m) = self.year_full_re.find(text) {
            return Some(m.as_str().to_string());
        }
        self.year_short_re.find(text).map(|m| {
            let digits = m.as_str().trim_start_matches('\'');
            format!("20{}", digits)
        })
    }
}

impl Default for AttributeExtractor {
    fn default() -> Self {
        Self::new()
    }
}
