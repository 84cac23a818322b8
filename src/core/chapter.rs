//! # Chapter — Os Capítulos do Dataset
//!
//! Enumeração fechada dos seis capítulos de Eletrônica Digital cobertos
//! pelo dataset de questões, com nome canônico e apelidos usados na
//! detecção a partir do texto livre do usuário.
//!
//! ## Ordem de Declaração
//!
//! A ordem de [`Chapter::ALL`] e de [`CHAPTER_ALIASES`] é significativa:
//! quando mais de um nome ou apelido aparece na mesma mensagem, vence o
//! primeiro na ordem de declaração. Por isso "boolean functions" resolve
//! para *Boolean Algebra and Logic Gates* (o apelido "boolean" vem antes).
//!
//! | Capítulo | Apelidos |
//! |----------|----------|
//! | Binary System | binary |
//! | Boolean Algebra and Logic Gates | boolean, boolean algebra, logic gates |
//! | Simplification of Boolean Functions | simplification, boolean functions |
//! | Combinational Logic | combinational |
//! | Sequential Logic | sequential |
//! | Digital Integrated Circuit | digital, integrated circuit, digital circuit |

use std::fmt;

use serde::{Deserialize, Serialize};

/// Um dos seis capítulos do dataset.
///
/// Serializa/desserializa pelo nome canônico exato (ex: `"Binary System"`),
/// que é como o campo `metadata.chapter` aparece no JSONL.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Chapter {
    #[serde(rename = "Binary System")]
    BinarySystem,
    #[serde(rename = "Boolean Algebra and Logic Gates")]
    BooleanAlgebra,
    #[serde(rename = "Simplification of Boolean Functions")]
    Simplification,
    #[serde(rename = "Combinational Logic")]
    CombinationalLogic,
    #[serde(rename = "Sequential Logic")]
    SequentialLogic,
    #[serde(rename = "Digital Integrated Circuit")]
    DigitalIntegratedCircuit,
}

/// Apelidos (lowercase) → capítulo canônico, em ordem de prioridade.
pub const CHAPTER_ALIASES: &[(&str, Chapter)] = &[
    ("boolean", Chapter::BooleanAlgebra),
    ("boolean algebra", Chapter::BooleanAlgebra),
    ("logic gates", Chapter::BooleanAlgebra),
    ("binary", Chapter::BinarySystem),
    ("simplification", Chapter::Simplification),
    ("boolean functions", Chapter::Simplification),
    ("combinational", Chapter::CombinationalLogic),
    ("sequential", Chapter::SequentialLogic),
    ("digital", Chapter::DigitalIntegratedCircuit),
    ("integrated circuit", Chapter::DigitalIntegratedCircuit),
    ("digital circuit", Chapter::DigitalIntegratedCircuit),
];

impl Chapter {
    /// Todos os capítulos, na ordem de declaração.
    pub const ALL: [Chapter; 6] = [
        Chapter::BinarySystem,
        Chapter::BooleanAlgebra,
        Chapter::Simplification,
        Chapter::CombinationalLogic,
        Chapter::SequentialLogic,
        Chapter::DigitalIntegratedCircuit,
    ];

    /// Nome canônico de exibição.
    pub fn name(&self) -> &'static str {
        match self {
            Chapter::BinarySystem => "Binary System",
            Chapter::BooleanAlgebra => "Boolean Algebra and Logic Gates",
            Chapter::Simplification => "Simplification of Boolean Functions",
            Chapter::CombinationalLogic => "Combinational Logic",
            Chapter::SequentialLogic => "Sequential Logic",
            Chapter::DigitalIntegratedCircuit => "Digital Integrated Circuit",
        }
    }

    /// Lista de nomes canônicos separados por vírgula, usada nas
    /// mensagens que pedem ao usuário para escolher um capítulo.
    pub fn catalog() -> String {
        Chapter::ALL
            .iter()
            .map(|c| c.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Chapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
