//! Questionnaire definitions consumed by scoring and interpretation.
//!
//! Definitions are read-only data. The built-in set covers the screening
//! questionnaires offered by default; a JSON file can replace it at startup.

mod builtin;
pub mod profile;

pub use profile::{
    profile_for, ItemConvention, ResponseOption, SeverityBand, SeverityLevel, TestProfile,
};

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::io::Read;
use std::path::Path;

pub type QuestionId = u32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    /// Marks an item whose raw response is inverted before scoring.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub reverse: bool,
}

impl Question {
    pub fn new(id: QuestionId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            reverse: false,
        }
    }

    pub fn reversed(id: QuestionId, text: impl Into<String>) -> Self {
        Self {
            reverse: true,
            ..Self::new(id, text)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScaleType {
    #[serde(rename = "likert_5")]
    FivePointLikert,
    #[serde(rename = "binary")]
    Binary,
}

impl ScaleType {
    pub fn label(&self) -> &'static str {
        match self {
            ScaleType::FivePointLikert => "Likert",
            ScaleType::Binary => "Yes/No",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestDefinition {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Display and step order; irrelevant to scoring.
    pub questions: Vec<Question>,
    pub scale_type: ScaleType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscales: Option<BTreeMap<String, BTreeSet<QuestionId>>>,
}

impl TestDefinition {
    pub fn profile(&self) -> &'static TestProfile {
        profile_for(&self.id)
    }

    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|question| question.id == id)
    }

    /// Checks the structural invariants every definition must satisfy.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.id.trim().is_empty() {
            return Err(CatalogError::EmptyId);
        }
        if self.questions.is_empty() {
            return Err(CatalogError::NoQuestions {
                test_id: self.id.clone(),
            });
        }

        let mut seen = HashSet::with_capacity(self.questions.len());
        for question in &self.questions {
            if !seen.insert(question.id) {
                return Err(CatalogError::DuplicateQuestion {
                    test_id: self.id.clone(),
                    question_id: question.id,
                });
            }
        }

        if let Some(subscales) = &self.subscales {
            for (name, members) in subscales {
                if let Some(missing) = members.iter().find(|id| !seen.contains(id)) {
                    return Err(CatalogError::UnknownSubscaleQuestion {
                        test_id: self.id.clone(),
                        subscale: name.clone(),
                        question_id: *missing,
                    });
                }
            }
        }

        Ok(())
    }

    /// Number of items belonging to a subscale, if it is declared.
    pub fn subscale_len(&self, name: &str) -> Option<usize> {
        self.subscales
            .as_ref()
            .and_then(|subscales| subscales.get(name))
            .map(BTreeSet::len)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("test id must not be empty")]
    EmptyId,
    #[error("test '{test_id}' has no questions")]
    NoQuestions { test_id: String },
    #[error("test '{test_id}' declares question {question_id} more than once")]
    DuplicateQuestion {
        test_id: String,
        question_id: QuestionId,
    },
    #[error("subscale '{subscale}' of test '{test_id}' references unknown question {question_id}")]
    UnknownSubscaleQuestion {
        test_id: String,
        subscale: String,
        question_id: QuestionId,
    },
    #[error("test '{0}' is defined more than once")]
    DuplicateTest(String),
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("catalog is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Ordered, validated collection of questionnaire definitions.
#[derive(Debug, Clone)]
pub struct Catalog {
    tests: Vec<TestDefinition>,
}

impl Catalog {
    pub fn new(tests: Vec<TestDefinition>) -> Result<Self, CatalogError> {
        let mut ids = HashSet::with_capacity(tests.len());
        for test in &tests {
            test.validate()?;
            if !ids.insert(test.id.as_str()) {
                return Err(CatalogError::DuplicateTest(test.id.clone()));
            }
        }
        Ok(Self { tests })
    }

    pub fn builtin() -> Self {
        Self {
            tests: builtin::definitions(),
        }
    }

    /// Reads a JSON array of definitions.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let tests: Vec<TestDefinition> = serde_json::from_reader(reader)?;
        Self::new(tests)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn get(&self, id: &str) -> Option<&TestDefinition> {
        self.tests.iter().find(|test| test.id == id)
    }

    pub fn tests(&self) -> &[TestDefinition] {
        &self.tests
    }
}
