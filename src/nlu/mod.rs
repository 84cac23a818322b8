//! # Pipeline NLU — Interpretação da Mensagem do Usuário
//!
//! O [`NluPipeline`] reúne tudo que é necessário para entender uma
//! mensagem, sem tocar em sessão nem dataset:
//!
//! ```text
//! Mensagem do usuário
//!   ├── 1. NFC normalize (Unicode)
//!   ├── 2. Classificar intent (IntentClassifier)
//!   │      Greeting | About | Affirmative | Query
//!   └── 3. Extrair filtros (AttributeExtractor)
//!          capítulo, dificuldade, frequência, marks, ano
//! ```
//!
//! ## Sub-módulos
//!
//! | Módulo | Responsabilidade |
//! |--------|-----------------|
//! | [`intent`] | Classifica a intenção por tabelas fixas |
//! | [`extractor`] | Extrai [`QueryFilters`] do texto livre |
//! | [`similarity`] | Razão de similaridade para o match fuzzy de capítulo |

/// Sub-módulo do classificador de intenção do usuário.
pub mod intent;

/// Sub-módulo do extrator de atributos (filtros).
pub mod extractor;

/// Sub-módulo de similaridade de sequências.
pub mod similarity;

use unicode_normalization::UnicodeNormalization;

use crate::core::QueryFilters;

use extractor::AttributeExtractor;
use intent::{Intent, IntentClassifier};

/// Pipeline NLU completo, imutável após a criação, seguro para uso
/// concorrente (`&self` em todos os métodos).
pub struct NluPipeline {
    intent_classifier: IntentClassifier,
    extractor: AttributeExtractor,
}

impl NluPipeline {
    /// Cria o pipeline compilando as regexes do extrator.
    pub fn new() -> Self {
        Self {
            intent_classifier: IntentClassifier::new(),
            extractor: AttributeExtractor::new(),
        }
    }

    /// Normalização Unicode NFC: garante que "é" digitado de formas
    /// diferentes seja comparado da mesma forma.
    pub fn normalize(&self, text: &str) -> String {
        text.nfc().collect()
    }

    /// Classifica a intenção de um texto já normalizado.
    pub fn classify_intent(&self, text: &str) -> Intent {
        let intent = self.intent_classifier.classify(text);
        tracing::debug!(intent = ?intent, "Intent classificado");
        intent
    }

    /// Extrai os filtros de um texto já normalizado.
    pub fn extract_filters(&self, text: &str) -> QueryFilters {
        let filters = self.extractor.extract(text);
        tracing::debug!(filters = ?filters, "Filtros extraídos");
        filters
    }
}

impl Default for NluPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Chapter;

    #[test]
    fn normalize_composes_accents() {
        let nlu = NluPipeline::new();
        // "e" + acento combinante → "é" pré-composto
        assert_eq!(nlu.normalize("cafe\u{301}"), "caf\u{e9}");
    }

    #[test]
    fn pipeline_exposes_intent_and_filters() {
        let nlu = NluPipeline::new();
        assert_eq!(nlu.classify_intent("hello"), Intent::Greeting);
        let filters = nlu.extract_filters("an annual question on combinational circuits");
        assert_eq!(filters.chapter, Some(Chapter::CombinationalLogic));
        assert_eq!(filters.frequency, Some(crate::core::Frequency::Yearly));
    }
}
