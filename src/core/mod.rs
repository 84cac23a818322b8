//! # Módulo Core — Tipos Fundamentais do Domínio
//!
//! Tudo no assistente gira em torno destes tipos:
//!
//! - [`Chapter`] — os seis capítulos do dataset, com apelidos para detecção
//! - [`QuestionRecord`] — uma questão de prova com metadados tipados
//! - [`Difficulty`], [`Frequency`], [`Marks`] — vocabulários dos metadados
//! - [`QueryFilters`] — restrições extraídas de uma mensagem do usuário
//! - [`Dataset`] / [`MatchSet`] — a coleção imutável e o resultado de uma consulta
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use crate::core::{Chapter, Dataset, MarksQuery, QueryFilters};
//!
//! let filters = QueryFilters {
//!     chapter: Some(Chapter::BinarySystem),
//!     marks: Some(MarksQuery::Points(5)),
//!     ..Default::default()
//! };
//! let matches = dataset.select(&filters, &mut rng);
//! ```

/// Sub-módulo com [`Chapter`] e a tabela de apelidos.
pub mod chapter;

/// Sub-módulo com [`QuestionRecord`] e os vocabulários de metadados.
pub mod question;

/// Sub-módulo com [`QueryFilters`].
pub mod filters;

/// Sub-módulo com [`Dataset`] e [`MatchSet`].
pub mod dataset;

pub use chapter::{Chapter, CHAPTER_ALIASES};
pub use dataset::{Dataset, MatchSet};
pub use filters::{MarksQuery, QueryFilters};
pub use question::{Difficulty, Frequency, Marks, QuestionRecord};
