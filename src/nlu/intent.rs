//! # Classificador de Intenção (Intent) do Usuário
//!
//! O [`IntentClassifier`] decide **como** uma mensagem deve ser roteada,
//! usando apenas tabelas fixas, sem modelo e sem estado:
//!
//! | Intent | Regra | Exemplo |
//! |--------|-------|---------|
//! | [`Greeting`](Intent::Greeting) | mensagem inteira é uma saudação | "Hello!" |
//! | [`About`](Intent::About) | contém um padrão de identidade/ajuda | "what can you do?" |
//! | [`Affirmative`](Intent::Affirmative) | mensagem inteira é uma confirmação | "yes" |
//! | [`Query`](Intent::Query) | qualquer outra coisa | "a 5 marks question" |
//!
//! `Affirmative` só vira follow-up se a sessão tiver contexto ativo;
//! essa decisão é do [`Orchestrator`](crate::orchestrator::Orchestrator).

/// Saudações reconhecidas (mensagem inteira, após limpar pontuação).
const GREETINGS: &[&str] = &["hello", "hi", "hey", "greetings", "hola"];

/// Padrões de identidade/ajuda, testados por substring nesta ordem.
const ABOUT_PATTERNS: &[(&str, AboutTopic)] = &[
    ("what are you", AboutTopic::WhatAreYou),
    ("who are you", AboutTopic::WhoAreYou),
    ("what can you do", AboutTopic::Capabilities),
    ("what model", AboutTopic::Model),
    ("help", AboutTopic::Help),
];

/// Vocabulário fechado de confirmações para "mostrar a próxima".
const AFFIRMATIVES: &[&str] = &["yes", "yeah", "sure", "okay", "ok", "y", "yep", "show", "next"];

/// Tópico de uma pergunta sobre o próprio assistente.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AboutTopic {
    WhatAreYou,
    WhoAreYou,
    Capabilities,
    Model,
    Help,
}

/// Intenção classificada a partir da mensagem do usuário.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    /// Saudação. Nunca consulta nem altera a sessão.
    Greeting,
    /// Pergunta sobre o assistente. Nunca consulta nem altera a sessão.
    About(AboutTopic),
    /// Confirmação curta; follow-up quando há contexto ativo.
    Affirmative,
    /// Nova consulta estruturada (o caso mais comum).
    Query,
}

/// Classificador de intenção por tabelas fixas.
pub struct IntentClassifier;

impl IntentClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classifica a mensagem; a primeira regra que casar vence.
    pub fn classify(&self, text: &str) -> Intent {
        let lower = text.to_lowercase();
        let stripped = lower.trim_matches(|c: char| c.is_whitespace() || "?!.".contains(c));

        if GREETINGS.contains(&stripped) {
            return Intent::Greeting;
        }

        if let Some((_, topic)) = ABOUT_PATTERNS.iter().find(|(p, _)| stripped.contains(p)) {
            return Intent::About(*topic);
        }

        if is_affirmative(text) {
            return Intent::Affirmative;
        }

        Intent::Query
    }
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Igualdade exata (case-insensitive, sem espaços nas bordas) com o
/// vocabulário de confirmações. Não é substring: "yes please" não conta.
pub fn is_affirmative(text: &str) -> bool {
    let lower = text.trim().to_lowercase();
    AFFIRMATIVES.contains(&lower.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greetings_ignore_case_and_punctuation() {
        let c = IntentClassifier::new();
        assert_eq!(c.classify("Hello!"), Intent::Greeting);
        assert_eq!(c.classify("  hey?? "), Intent::Greeting);
        assert_eq!(c.classify("hola."), Intent::Greeting);
    }

    #[test]
    fn greeting_must_be_the_whole_message() {
        let c = IntentClassifier::new();
        // "which" contém "hi", mas não é saudação
        assert_eq!(c.classify("which chapter is easiest"), Intent::Query);
        assert_eq!(c.classify("hi give me binary"), Intent::Query);
    }

    #[test]
    fn about_patterns_match_by_substring() {
        let c = IntentClassifier::new();
        assert_eq!(c.classify("So, what can you do?"), Intent::About(AboutTopic::Capabilities));
        assert_eq!(c.classify("Who are you"), Intent::About(AboutTopic::WhoAreYou));
        assert_eq!(c.classify("I need help"), Intent::About(AboutTopic::Help));
        assert_eq!(c.classify("what model is this"), Intent::About(AboutTopic::Model));
    }

    #[test]
    fn affirmatives_are_exact() {
        let c = IntentClassifier::new();
        for word in ["yes", "YEAH", " ok ", "Next", "y"] {
            assert_eq!(c.classify(word), Intent::Affirmative, "{word}");
        }
        assert_eq!(c.classify("yes please"), Intent::Query);
        assert_eq!(c.classify("show me more"), Intent::Query);
    }
}
