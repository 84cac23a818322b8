//! # QueryFilters — Restrições Extraídas de Uma Mensagem
//!
//! Objeto de valor transitório: cada campo é independente e opcional.
//! `None` significa "sem restrição", nunca "nenhum resultado".

use std::fmt;

use super::chapter::Chapter;
use super::question::{Difficulty, Frequency, Marks, QuestionRecord};

/// Pontuação pedida pelo usuário.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MarksQuery {
    Points(u32),
    /// Dígitos que não formam um `u32` (valor grande demais, dígitos não
    /// ASCII). Guardados como digitados; nenhum registro casa.
    Unrepresentable(String),
}

impl MarksQuery {
    /// Interpreta os dígitos capturados da mensagem.
    pub fn parse(digits: &str) -> Self {
        digits
            .parse()
            .map(MarksQuery::Points)
            .unwrap_or_else(|_| MarksQuery::Unrepresentable(digits.to_string()))
    }

    pub fn accepts(&self, marks: &Marks) -> bool {
        match self {
            MarksQuery::Points(p) => marks.points() == Some(*p),
            MarksQuery::Unrepresentable(_) => false,
        }
    }
}

impl fmt::Display for MarksQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarksQuery::Points(p) => write!(f, "{}", p),
            MarksQuery::Unrepresentable(raw) => f.write_str(raw),
        }
    }
}

/// Filtros de uma única mensagem do usuário.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryFilters {
    pub chapter: Option<Chapter>,
    pub difficulty: Option<Difficulty>,
    pub frequency: Option<Frequency>,
    pub marks: Option<MarksQuery>,
    pub year: Option<String>,
}

impl QueryFilters {
    /// Conjunção de todos os filtros presentes.
    ///
    /// Registros com marks não numérico só são excluídos quando há
    /// filtro por marks.
    pub fn matches(&self, record: &QuestionRecord) -> bool {
        if self.chapter.is_some_and(|c| c != record.chapter) {
            return false;
        }
        if self.year.as_deref().is_some_and(|y| y != record.year) {
            return false;
        }
        if self.difficulty.is_some_and(|d| d != record.complexity) {
            return false;
        }
        if self.frequency.is_some_and(|f| f != record.frequency) {
            return false;
        }
        if self.marks.as_ref().is_some_and(|m| !m.accepts(&record.marks)) {
            return false;
        }
        true
    }

    /// Descrição dos filtros de atributo ativos (sem o capítulo), na
    /// ordem: dificuldade, frequência, marks, ano.
    ///
    /// ```text
    /// difficulty level 'medium', 5 marks, year 2023
    /// ```
    pub fn describe(&self) -> Vec<String> {
        let mut parts = Vec::new();
        if let Some(d) = self.difficulty {
            parts.push(format!("difficulty level '{}'", d));
        }
        if let Some(f) = self.frequency {
            parts.push(format!("frequency '{}'", f));
        }
        if let Some(m) = &self.marks {
            parts.push(format!("{} marks", m));
        }
        if let Some(y) = &self.year {
            parts.push(format!("year {}", y));
        }
        parts
    }
}
