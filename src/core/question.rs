//! # QuestionRecord — A Unidade do Dataset
//!
//! Cada linha do JSONL vira um [`QuestionRecord`] imutável, com os metadados
//! tipados: capítulo, [`Marks`], [`Difficulty`], [`Frequency`] e ano.
//!
//! ## Metadados Tolerantes
//!
//! O dataset é montado à mão e nem sempre é uniforme:
//!
//! - `marks` pode ser número (`5`), string numérica (`"5"`) ou texto
//!   livre (`"N/A"`) → [`Marks::Points`] ou [`Marks::Unscored`]
//! - `complexity_level` / `pattern_frequency` aparecem com caixa variada
//!   (`"Medium"`, `"medium"`) → parse case-insensitive
//! - `previous_years` pode vir como string ou número → sempre `String`

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use super::chapter::Chapter;

/// Valor desconhecido para um vocabulário fechado (dificuldade/frequência).
#[derive(Debug, thiserror::Error)]
#[error("valor desconhecido para {kind}: '{value}'")]
pub struct UnknownLevel {
    kind: &'static str,
    value: String,
}

/// Nível de complexidade de uma questão (`metadata.complexity_level`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", rename_all = "lowercase")]
pub enum Difficulty {
    Low,
    Medium,
    High,
}

impl Difficulty {
    /// Vocabulário na ordem em que a detecção testa os termos.
    pub const ALL: [Difficulty; 3] = [Difficulty::Low, Difficulty::Medium, Difficulty::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Low => "low",
            Difficulty::Medium => "medium",
            Difficulty::High => "high",
        }
    }
}

impl FromStr for Difficulty {
    type Err = UnknownLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownLevel {
                kind: "complexity_level",
                value: s.to_string(),
            })
    }
}

impl TryFrom<String> for Difficulty {
    type Error = UnknownLevel;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Frequência com que o padrão da questão aparece em provas
/// (`metadata.pattern_frequency`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", rename_all = "lowercase")]
pub enum Frequency {
    Yearly,
    Frequent,
    Occasional,
}

impl Frequency {
    /// Vocabulário na ordem em que a detecção testa os termos.
    pub const ALL: [Frequency; 3] = [Frequency::Yearly, Frequency::Frequent, Frequency::Occasional];

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Yearly => "yearly",
            Frequency::Frequent => "frequent",
            Frequency::Occasional => "occasional",
        }
    }
}

impl FromStr for Frequency {
    type Err = UnknownLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Frequency::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownLevel {
                kind: "pattern_frequency",
                value: s.to_string(),
            })
    }
}

impl TryFrom<String> for Frequency {
    type Error = UnknownLevel;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pontuação de uma questão.
///
/// Valores não numéricos são preservados para exibição, mas nunca
/// satisfazem um filtro por marks.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "RawMarks")]
pub enum Marks {
    /// Pontuação numérica (ex: `5`).
    Points(u32),
    /// Texto livre sem valor numérico (ex: `"N/A"`).
    Unscored(String),
}

impl Marks {
    /// Valor numérico, se houver.
    pub fn points(&self) -> Option<u32> {
        match self {
            Marks::Points(p) => Some(*p),
            Marks::Unscored(_) => None,
        }
    }
}

impl fmt::Display for Marks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Marks::Points(p) => write!(f, "{}", p),
            Marks::Unscored(text) => f.write_str(text),
        }
    }
}

/// Formas aceitas para `metadata.marks` no JSONL.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawMarks {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl From<RawMarks> for Marks {
    fn from(raw: RawMarks) -> Self {
        match raw {
            RawMarks::Integer(n) => match u32::try_from(n) {
                Ok(p) => Marks::Points(p),
                Err(_) => Marks::Unscored(n.to_string()),
            },
            RawMarks::Float(x) if x.fract() == 0.0 && x >= 0.0 && x <= u32::MAX as f64 => {
                Marks::Points(x as u32)
            }
            RawMarks::Float(x) => Marks::Unscored(x.to_string()),
            RawMarks::Text(text) => match text.trim().parse::<u32>() {
                Ok(p) => Marks::Points(p),
                Err(_) => Marks::Unscored(text),
            },
        }
    }
}

/// Questão de prova com metadados tipados. Imutável após a carga.
#[derive(Clone, Debug, PartialEq)]
pub struct QuestionRecord {
    /// Enunciado da questão (campo `output` do JSONL).
    pub text: String,
    /// Instrução original que gerou a entrada (campo `instruction`).
    pub instruction: String,
    pub chapter: Chapter,
    pub marks: Marks,
    pub question_type: String,
    /// Complexidade (`complexity_level`).
    pub complexity: Difficulty,
    /// Frequência do padrão (`pattern_frequency`).
    pub frequency: Frequency,
    /// Ano de prova (`previous_years`), sempre como string.
    pub year: String,
}

/// Linha crua do JSONL, só os campos consumidos pelo sistema.
#[derive(Deserialize)]
pub(crate) struct RawEntry {
    #[serde(default)]
    instruction: String,
    output: String,
    metadata: RawMetadata,
}

#[derive(Deserialize)]
struct RawMetadata {
    chapter: Chapter,
    marks: Marks,
    #[serde(default)]
    question_type: String,
    complexity_level: Difficulty,
    pattern_frequency: Frequency,
    #[serde(deserialize_with = "year_as_string")]
    previous_years: String,
}

impl From<RawEntry> for QuestionRecord {
    fn from(entry: RawEntry) -> Self {
        let meta = entry.metadata;
        Self {
            text: entry.output,
            instruction: entry.instruction,
            chapter: meta.chapter,
            marks: meta.marks,
            question_type: meta.question_type,
            complexity: meta.complexity_level,
            frequency: meta.pattern_frequency,
            year: meta.previous_years,
        }
    }
}

/// Aceita `previous_years` como string ou número.
fn year_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawYear {
        Text(String),
        Number(i64),
    }

    Ok(match RawYear::deserialize(deserializer)? {
        RawYear::Text(s) => s,
        RawYear::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> QuestionRecord {
        serde_json::from_str::<RawEntry>(line).unwrap().into()
    }

    #[test]
    fn parses_full_entry() {
        let record = parse(
            r#"{"instruction":"Generate a question","output":"Convert 1011 to decimal.",
                "metadata":{"chapter":"Binary System","marks":5,"question_type":"numerical",
                "complexity_level":"Medium","pattern_frequency":"frequent","previous_years":"2023"}}"#,
        );
        assert_eq!(record.text, "Convert 1011 to decimal.");
        assert_eq!(record.chapter, Chapter::BinarySystem);
        assert_eq!(record.marks, Marks::Points(5));
        assert_eq!(record.complexity, Difficulty::Medium);
        assert_eq!(record.frequency, Frequency::Frequent);
        assert_eq!(record.year, "2023");
    }

    #[test]
    fn marks_accept_strings_and_keep_non_numeric_text() {
        let numeric: Marks = serde_json::from_str("\"10\"").unwrap();
        assert_eq!(numeric, Marks::Points(10));

        let na: Marks = serde_json::from_str("\"N/A\"").unwrap();
        assert_eq!(na, Marks::Unscored("N/A".into()));
        assert_eq!(na.points(), None);
        assert_eq!(na.to_string(), "N/A");
    }

    #[test]
    fn numeric_year_is_stringified() {
        let record = parse(
            r#"{"output":"Q","metadata":{"chapter":"Sequential Logic","marks":"N/A",
                "complexity_level":"high","pattern_frequency":"Yearly","previous_years":2021}}"#,
        );
        assert_eq!(record.year, "2021");
        assert_eq!(record.instruction, "");
        assert_eq!(record.frequency, Frequency::Yearly);
    }

    #[test]
    fn unknown_difficulty_is_rejected() {
        assert!("extreme".parse::<Difficulty>().is_err());
        assert_eq!("  HIGH ".parse::<Difficulty>().unwrap(), Difficulty::High);
    }
}
