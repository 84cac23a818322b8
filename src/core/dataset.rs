//! # Dataset — Coleção Imutável de Questões
//!
//! O [`Dataset`] guarda os registros carregados do JSONL como
//! `Arc<QuestionRecord>`: um [`MatchSet`] apenas clona ponteiros, nunca
//! os enunciados.
//!
//! ## Formato de Entrada
//!
//! ```text
//! {"instruction": "...", "output": "<enunciado>", "metadata": {
//!     "chapter": "Binary System", "marks": 5, "question_type": "...",
//!     "complexity_level": "medium", "pattern_frequency": "frequent",
//!     "previous_years": "2023"}}
//! ```
//!
//! Uma linha por registro; linhas em branco são ignoradas. Qualquer linha
//! malformada invalida a carga inteira (sem resultados parciais).

use std::io::BufRead;
use std::path::Path;
use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;

use super::filters::QueryFilters;
use super::question::{QuestionRecord, RawEntry};
use crate::error::DatasetError;

/// Sequência somente-leitura de questões.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    records: Vec<Arc<QuestionRecord>>,
}

impl Dataset {
    /// Lê registros JSONL de qualquer `BufRead`.
    ///
    /// `origin` só é usado para compor as mensagens de erro.
    pub fn from_reader<R: BufRead>(reader: R, origin: &Path) -> Result<Self, DatasetError> {
        let mut records = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| DatasetError::Io {
                path: origin.to_path_buf(),
                source,
            })?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let entry: RawEntry =
                serde_json::from_str(line).map_err(|source| DatasetError::Malformed {
                    path: origin.to_path_buf(),
                    line: idx + 1,
                    source,
                })?;
            records.push(Arc::new(QuestionRecord::from(entry)));
        }
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<QuestionRecord>> {
        self.records.iter()
    }

    /// Aplica a conjunção de filtros e embaralha o resultado.
    ///
    /// Cada chamada produz uma nova permutação: mesma entrada, ordem
    /// diferente. Nenhum resultado é um `MatchSet` vazio, não um erro.
    pub fn select<R: Rng + ?Sized>(&self, filters: &QueryFilters, rng: &mut R) -> MatchSet {
        let mut matches: Vec<Arc<QuestionRecord>> = self
            .records
            .iter()
            .filter(|r| filters.matches(r))
            .cloned()
            .collect();
        matches.shuffle(rng);
        MatchSet(matches)
    }
}

/// Resultado de uma consulta, em ordem aleatória fixada na criação.
#[derive(Clone, Debug, Default)]
pub struct MatchSet(Vec<Arc<QuestionRecord>>);

impl MatchSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&QuestionRecord> {
        self.0.first().map(|r| r.as_ref())
    }

    pub fn get(&self, idx: usize) -> Option<&QuestionRecord> {
        self.0.get(idx).map(|r| r.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &QuestionRecord> {
        self.0.iter().map(|r| r.as_ref())
    }
}

impl FromIterator<Arc<QuestionRecord>> for MatchSet {
    fn from_iter<I: IntoIterator<Item = Arc<QuestionRecord>>>(iter: I) -> Self {
        MatchSet(iter.into_iter().collect())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::chapter::Chapter;
    use crate::core::question::{Difficulty, Frequency, Marks};
    use crate::core::MarksQuery;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Dataset pequeno compartilhado pelos testes de outros módulos.
    pub(crate) const SAMPLE_JSONL: &str = r#"{"instruction":"i","output":"Convert (1011)2 to decimal.","metadata":{"chapter":"Binary System","marks":5,"question_type":"numerical","complexity_level":"medium","pattern_frequency":"frequent","previous_years":"2023"}}
{"instruction":"i","output":"Explain 2's complement representation.","metadata":{"chapter":"Binary System","marks":"10","question_type":"theory","complexity_level":"Medium","pattern_frequency":"yearly","previous_years":"2022"}}
{"instruction":"i","output":"Add 1101 and 0110 in binary.","metadata":{"chapter":"Binary System","marks":"N/A","question_type":"numerical","complexity_level":"low","pattern_frequency":"occasional","previous_years":"2021"}}

{"instruction":"i","output":"State De Morgan's theorems.","metadata":{"chapter":"Boolean Algebra and Logic Gates","marks":5,"question_type":"theory","complexity_level":"low","pattern_frequency":"yearly","previous_years":"2023"}}
{"instruction":"i","output":"Simplify F = AB + A'C + BC using a K-map.","metadata":{"chapter":"Simplification of Boolean Functions","marks":10,"question_type":"numerical","complexity_level":"high","pattern_frequency":"frequent","previous_years":"2020"}}
{"instruction":"i","output":"Design a 4-bit ripple carry adder.","metadata":{"chapter":"Combinational Logic","marks":10,"question_type":"design","complexity_level":"high","pattern_frequency":"occasional","previous_years":"2019"}}
{"instruction":"i","output":"Differentiate latches and flip-flops.","metadata":{"chapter":"Sequential Logic","marks":5,"question_type":"theory","complexity_level":"medium","pattern_frequency":"frequent","previous_years":"2022"}}
{"instruction":"i","output":"Compare TTL and CMOS logic families.","metadata":{"chapter":"Digital Integrated Circuit","marks":5,"question_type":"theory","complexity_level":"medium","pattern_frequency":"yearly","previous_years":"2023"}}
"#;

    pub(crate) fn sample() -> Dataset {
        Dataset::from_reader(SAMPLE_JSONL.as_bytes(), Path::new("sample.jsonl")).unwrap()
    }

    fn texts(set: &MatchSet) -> Vec<String> {
        let mut t: Vec<String> = set.iter().map(|r| r.text.clone()).collect();
        t.sort();
        t
    }

    #[test]
    fn loads_records_and_skips_blank_lines() {
        let ds = sample();
        assert_eq!(ds.len(), 8);
        let na = ds.iter().find(|r| r.text.starts_with("Add 1101")).unwrap();
        assert_eq!(na.marks, Marks::Unscored("N/A".into()));
    }

    #[test]
    fn malformed_line_reports_line_number() {
        let input = "{\"output\":\"ok\"}\n";
        let err = Dataset::from_reader(input.as_bytes(), Path::new("bad.jsonl")).unwrap_err();
        assert!(matches!(err, DatasetError::Malformed { line: 1, .. }));
    }

    #[test]
    fn select_applies_every_filter() {
        let ds = sample();
        let mut rng = StdRng::seed_from_u64(7);
        let filters = QueryFilters {
            chapter: Some(Chapter::BinarySystem),
            difficulty: Some(Difficulty::Medium),
            ..Default::default()
        };
        let set = ds.select(&filters, &mut rng);
        assert_eq!(set.len(), 2);
        assert!(set.iter().all(|r| r.chapter == Chapter::BinarySystem));
        assert!(set.iter().all(|r| r.complexity == Difficulty::Medium));
    }

    #[test]
    fn filters_compose_as_a_pure_conjunction() {
        let ds = sample();
        let mut rng = StdRng::seed_from_u64(1);
        let chapter_only = QueryFilters {
            chapter: Some(Chapter::BinarySystem),
            ..Default::default()
        };
        let both = QueryFilters {
            marks: Some(MarksQuery::Points(5)),
            ..chapter_only.clone()
        };

        let direct = ds.select(&both, &mut rng);
        let staged: MatchSet = ds
            .select(&chapter_only, &mut rng)
            .iter()
            .filter(|r| r.marks.points() == Some(5))
            .map(|r| Arc::new(r.clone()))
            .collect();

        assert_eq!(texts(&direct), texts(&staged));
        assert_eq!(direct.len(), 1);
    }

    #[test]
    fn no_match_is_an_empty_set() {
        let ds = sample();
        let mut rng = StdRng::seed_from_u64(3);
        let filters = QueryFilters {
            chapter: Some(Chapter::SequentialLogic),
            frequency: Some(Frequency::Yearly),
            ..Default::default()
        };
        assert!(ds.select(&filters, &mut rng).is_empty());
    }

    #[test]
    fn select_returns_a_permutation_of_the_matches() {
        let ds = sample();
        let mut rng = StdRng::seed_from_u64(42);
        let all = ds.select(&QueryFilters::default(), &mut rng);
        assert_eq!(all.len(), ds.len());
        let mut expected: Vec<String> = ds.iter().map(|r| r.text.clone()).collect();
        expected.sort();
        assert_eq!(texts(&all), expected);
    }
}
