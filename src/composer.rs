//! # Composer — Respostas Templadas do Chat
//!
//! O [`Composer`] é a camada de formatação pura: recebe o que o
//! [`Orchestrator`](crate::orchestrator::Orchestrator) decidiu e devolve o
//! texto final, sem lógica de negócio.
//!
//! ## Variação de Fraseado
//!
//! Cada tipo de resposta tem um conjunto de templates equivalentes; um é
//! sorteado uniformemente a cada chamada, usando a fonte aleatória
//! injetada. Em testes, verifique **pertencimento** ao conjunto
//! (ex: [`Composer::greetings`]) e não igualdade exata.
//!
//! | Resposta | Templates | Conteúdo fixo |
//! |----------|-----------|---------------|
//! | saudação | 3 | — |
//! | identidade/ajuda | 1 por tópico | lista de capítulos (capabilities) |
//! | consulta por ano | 3 + 3 follow-up | capítulo, questão, marks |
//! | consulta por capítulo | 4 + 4 follow-up | questão, marks, ano (opcional) |
//! | sem resultado | 1 | filtros ativos |
//! | pedir capítulo | 1 | lista de capítulos |
//! | próxima (follow-up) | 4 + 4 follow-up | questão, marks |
//! | fim dos resultados | 1 | rótulo do contexto |

use rand::Rng;

use crate::core::{Chapter, QueryFilters, QuestionRecord};
use crate::nlu::intent::AboutTopic;

/// Gerador de respostas. Sem estado: a aleatoriedade vem do chamador.
pub struct Composer;

impl Composer {
    pub fn new() -> Self {
        Self
    }

    // ─── Conjuntos de templates (públicos para os testes) ────────

    pub fn greetings() -> Vec<String> {
        vec![
            "Hello! I'm your Digital Electronics study assistant. I can help you practice questions from various chapters. What would you like to study?".into(),
            "Hi there! I'm here to help you with Digital Electronics questions. Which chapter would you like to practice?".into(),
            "Hello! I can provide you with practice questions from Digital Electronics. Would you like to see the available chapters?".into(),
        ]
    }

    pub fn year_openings(year: &str) -> Vec<String> {
        vec![
            format!("Here's a question from the {} exam:", year),
            format!("I found this question from {}:", year),
            format!("This question appeared in {}:", year),
        ]
    }

    pub fn year_more_prompts(year: &str) -> Vec<String> {
        vec![
            format!("Would you like to see another question from {}?", year),
            format!("I have more questions from the {} exam. Would you like to see them?", year),
            format!("Should I show you another question from {}?", year),
        ]
    }

    pub fn chapter_openings(chapter: Chapter) -> Vec<String> {
        vec![
            format!("Here's a question from {}:", chapter),
            format!("I've found this question from {} for you:", chapter),
            format!("Let me share this question from {}:", chapter),
            format!("Here's a relevant question from {}:", chapter),
        ]
    }

    pub fn chapter_more_prompts() -> Vec<String> {
        vec![
            "Would you like to see another question?".into(),
            "Should I show you another question?".into(),
            "Would you like to try another question?".into(),
            "Shall I show you more questions from this chapter?".into(),
        ]
    }

    pub fn follow_up_openings(label: &str) -> Vec<String> {
        vec![
            format!("Here's another question from {}:", label),
            "Sure! Here's the next question:".into(),
            "Here's one more question for you:".into(),
            format!("I've got another question from {}:", label),
        ]
    }

    pub fn follow_up_more_prompts() -> Vec<String> {
        vec![
            "Would you like to see another one?".into(),
            "Should I show you another question?".into(),
            "Would you like to continue with more questions?".into(),
            "Shall I show you another question from this chapter?".into(),
        ]
    }

    // ─── Respostas ───────────────────────────────────────────────

    pub fn greeting<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        pick(rng, Self::greetings())
    }

    /// Respostas fixas sobre o próprio assistente.
    pub fn about(&self, topic: AboutTopic) -> String {
        match topic {
            AboutTopic::WhatAreYou => "I'm a Digital Electronics study assistant designed to help you practice questions from various chapters. I can provide questions based on difficulty level, marks, and frequency of appearance.".into(),
            AboutTopic::WhoAreYou => "I'm your Digital Electronics practice companion. I can help you with questions from different chapters, with various difficulty levels and marks.".into(),
            AboutTopic::Capabilities => format!(
                "I can help you practice Digital Electronics by providing questions from these chapters:\n\n{}\n\nYou can specify:\n- Difficulty level (low/medium/high)\n- Marks (e.g., '5 marks')\n- Frequency (yearly/frequent/occasional)",
                Chapter::catalog()
            ),
            AboutTopic::Model => "I'm a specialized Digital Electronics practice assistant, designed to help you study with questions from previous years and various topics.".into(),
            AboutTopic::Help => "I can help you practice Digital Electronics questions. You can:\n1. Ask for questions from specific chapters\n2. Specify difficulty (low/medium/high)\n3. Request questions with specific marks\n4. Ask for frequently appearing questions\n\nFor example, try: 'Give me a medium difficulty question from Binary System'".into(),
        }
    }

    /// Primeira questão de uma consulta só por ano (sem capítulo).
    pub fn year_match<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        year: &str,
        record: &QuestionRecord,
        has_more: bool,
    ) -> String {
        let mut response = pick(rng, Self::year_openings(year));
        response.push_str("\n\n");
        response.push_str(&format!("Chapter: {}\n", record.chapter));
        response.push_str(&format!("Question: {} [{} marks]\n\n", record.text, record.marks));
        if has_more {
            response.push_str(&pick(rng, Self::year_more_prompts(year)));
        }
        response
    }

    pub fn no_year_match(&self, year: &str) -> String {
        format!(
            "I couldn't find any questions from the {} exam. Would you like to try a different year or specify a chapter?",
            year
        )
    }

    /// Nenhum capítulo reconhecido na mensagem.
    pub fn chapter_prompt(&self) -> String {
        format!(
            "I'd be happy to help you with a question. Which chapter would you like to practice? You can choose from: {}",
            Chapter::catalog()
        )
    }

    /// Primeira questão de uma consulta por capítulo.
    ///
    /// `show_year` acrescenta ", appeared in <ano>" dentro dos colchetes.
    pub fn chapter_match<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        chapter: Chapter,
        record: &QuestionRecord,
        show_year: bool,
        has_more: bool,
    ) -> String {
        let mut response = pick(rng, Self::chapter_openings(chapter));
        response.push_str("\n\n");
        response.push_str(&format!("{} [{} marks", record.text, record.marks));
        if show_year {
            response.push_str(&format!(", appeared in {}", record.year));
        }
        response.push_str("]\n\n");
        if has_more {
            response.push_str(&pick(rng, Self::chapter_more_prompts()));
        }
        response
    }

    /// Capítulo reconhecido, mas nenhum registro passou nos filtros.
    pub fn no_match(&self, chapter: Chapter, filters: &QueryFilters) -> String {
        let parts = filters.describe();
        if parts.is_empty() {
            format!(
                "I don't have any questions from {} at the moment. Would you like to try a different chapter?",
                chapter
            )
        } else {
            format!(
                "I couldn't find any questions from {} matching {}. Would you like me to show you other questions from this chapter?",
                chapter,
                parts.join(", ")
            )
        }
    }

    /// Próxima questão de um contexto ativo.
    pub fn follow_up_next<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        label: &str,
        record: &QuestionRecord,
        remaining: bool,
    ) -> String {
        let mut response = pick(rng, Self::follow_up_openings(label));
        response.push_str(&format!("\n\n{} [{} marks]\n\n", record.text, record.marks));
        if remaining {
            response.push_str(&pick(rng, Self::follow_up_more_prompts()));
        } else {
            response.push_str(
                "That's all the questions I have from this chapter. Would you like to try questions from a different chapter?",
            );
        }
        response
    }

    pub fn follow_up_exhausted(&self, label: &str) -> String {
        format!(
            "I've shown you all the questions I have from {}. Would you like to try questions from a different chapter?",
            label
        )
    }
}

impl Default for Composer {
    fn default() -> Self {
        Self::new()
    }
}

/// Sorteia um template. Os conjuntos acima nunca são vazios.
fn pick<R: Rng + ?Sized>(rng: &mut R, mut templates: Vec<String>) -> String {
    let idx = rng.gen_range(0..templates.len());
    templates.swap_remove(idx)
}
