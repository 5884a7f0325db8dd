use crate::catalog::QuestionId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

/// Raw responses keyed by question id, exactly as the respondent selected them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet(BTreeMap<QuestionId, i32>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a response, replacing any earlier answer to the same question.
    pub fn record(&mut self, question_id: QuestionId, raw: i32) {
        self.0.insert(question_id, raw);
    }

    pub fn get(&self, question_id: QuestionId) -> Option<i32> {
        self.0.get(&question_id).copied()
    }

    /// Raw value used for scoring; unanswered questions count as 0.
    pub fn raw_or_zero(&self, question_id: QuestionId) -> i32 {
        self.get(question_id).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, i32)> + '_ {
        self.0.iter().map(|(id, raw)| (*id, *raw))
    }

    /// Imports `question_id,value` rows. A header row is required.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, AnswerImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut answers = Self::new();

        for row in csv_reader.deserialize::<AnswerRow>() {
            let row = row?;
            if answers.0.contains_key(&row.question_id) {
                return Err(AnswerImportError::DuplicateQuestion(row.question_id));
            }
            answers.record(row.question_id, row.value);
        }

        Ok(answers)
    }

    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self, AnswerImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(file)
    }
}

impl FromIterator<(QuestionId, i32)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (QuestionId, i32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, Deserialize)]
struct AnswerRow {
    question_id: QuestionId,
    value: i32,
}

#[derive(Debug, thiserror::Error)]
pub enum AnswerImportError {
    #[error("failed to read answers: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid answer CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("question {0} is answered more than once")]
    DuplicateQuestion(QuestionId),
}
