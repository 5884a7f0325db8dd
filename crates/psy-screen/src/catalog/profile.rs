//! Per-test scoring conventions, ceilings and interpretation bands.
//!
//! Every rule that depends on a specific test id lives in this table so the
//! scoring engine, prompt builder and static fallback agree on one source.

use super::ScaleType;
use serde::Serialize;

/// How a Likert raw value becomes an item score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemConvention {
    /// 1..4 UI values mapped onto the clinical 0..3 range; `reverse` is ignored.
    ZeroBasedClinical,
    /// Raw value kept as-is, or reflected as `6 - raw` for reversed items.
    ReverseAware,
}

/// Score range interpretation; a band applies from `min` up to the next band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeverityBand {
    pub min: i32,
    pub label: &'static str,
    pub level: SeverityLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityLevel {
    Minimal,
    Mild,
    Moderate,
    Elevated,
    Severe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResponseOption {
    pub value: i32,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestProfile {
    /// Empty for the generic profile.
    pub id: &'static str,
    pub convention: ItemConvention,
    /// Fixed maximum; `None` falls back to the question-count rule.
    pub max_score: Option<i32>,
    /// Ascending by `min`.
    pub bands: &'static [SeverityBand],
    pub clinical_threshold: Option<i32>,
    pub likert_options: &'static [ResponseOption],
}

const FREQUENCY_OPTIONS: &[ResponseOption] = &[
    ResponseOption { value: 1, label: "Not at all" },
    ResponseOption { value: 2, label: "Several days" },
    ResponseOption { value: 3, label: "More than half the days" },
    ResponseOption { value: 4, label: "Nearly every day" },
];

const INTENSITY_OPTIONS: &[ResponseOption] = &[
    ResponseOption { value: 1, label: "Not at all" },
    ResponseOption { value: 2, label: "Mildly" },
    ResponseOption { value: 3, label: "Moderately" },
    ResponseOption { value: 4, label: "Severely" },
];

const OCCURRENCE_OPTIONS: &[ResponseOption] = &[
    ResponseOption { value: 1, label: "Never" },
    ResponseOption { value: 2, label: "Sometimes" },
    ResponseOption { value: 3, label: "Often" },
    ResponseOption { value: 4, label: "Almost always" },
];

const BINARY_OPTIONS: &[ResponseOption] = &[
    ResponseOption { value: 1, label: "Yes" },
    ResponseOption { value: 0, label: "No" },
];

const fn band(min: i32, label: &'static str, level: SeverityLevel) -> SeverityBand {
    SeverityBand { min, label, level }
}

const PHQ9_BANDS: &[SeverityBand] = &[
    band(0, "Minimal depression", SeverityLevel::Minimal),
    band(5, "Mild depression", SeverityLevel::Mild),
    band(10, "Moderate depression", SeverityLevel::Moderate),
    band(15, "Moderately severe depression", SeverityLevel::Elevated),
    band(20, "Severe depression", SeverityLevel::Severe),
];

const GAD7_BANDS: &[SeverityBand] = &[
    band(0, "Minimal anxiety", SeverityLevel::Minimal),
    band(5, "Mild anxiety", SeverityLevel::Mild),
    band(10, "Moderate anxiety", SeverityLevel::Moderate),
    band(15, "Severe anxiety", SeverityLevel::Severe),
];

const BDI2_BANDS: &[SeverityBand] = &[
    band(0, "Minimal depression", SeverityLevel::Minimal),
    band(14, "Mild depression", SeverityLevel::Mild),
    band(20, "Moderate depression", SeverityLevel::Moderate),
    band(29, "Severe depression", SeverityLevel::Severe),
];

const BAI_BANDS: &[SeverityBand] = &[
    band(0, "Minimal anxiety", SeverityLevel::Minimal),
    band(8, "Mild anxiety", SeverityLevel::Mild),
    band(16, "Moderate anxiety", SeverityLevel::Moderate),
    band(26, "Severe anxiety", SeverityLevel::Severe),
];

const BPD_BANDS: &[SeverityBand] = &[
    band(0, "Below the screening threshold", SeverityLevel::Minimal),
    band(7, "At or above the screening threshold", SeverityLevel::Elevated),
];

static PROFILES: &[TestProfile] = &[
    TestProfile {
        id: "phq-9",
        convention: ItemConvention::ZeroBasedClinical,
        max_score: Some(27),
        bands: PHQ9_BANDS,
        clinical_threshold: None,
        likert_options: FREQUENCY_OPTIONS,
    },
    TestProfile {
        id: "gad-7",
        convention: ItemConvention::ZeroBasedClinical,
        max_score: Some(21),
        bands: GAD7_BANDS,
        clinical_threshold: None,
        likert_options: FREQUENCY_OPTIONS,
    },
    TestProfile {
        id: "bdi-ii",
        convention: ItemConvention::ZeroBasedClinical,
        max_score: Some(63),
        bands: BDI2_BANDS,
        clinical_threshold: None,
        likert_options: INTENSITY_OPTIONS,
    },
    TestProfile {
        id: "bai",
        convention: ItemConvention::ZeroBasedClinical,
        max_score: Some(63),
        bands: BAI_BANDS,
        clinical_threshold: None,
        likert_options: INTENSITY_OPTIONS,
    },
    TestProfile {
        id: "bpd-screen",
        convention: ItemConvention::ReverseAware,
        max_score: None,
        bands: BPD_BANDS,
        clinical_threshold: Some(7),
        likert_options: OCCURRENCE_OPTIONS,
    },
];

static GENERIC: TestProfile = TestProfile {
    id: "",
    convention: ItemConvention::ReverseAware,
    max_score: None,
    bands: &[],
    clinical_threshold: None,
    likert_options: OCCURRENCE_OPTIONS,
};

/// Profile for a test id, or the generic profile for ids without special rules.
pub fn profile_for(test_id: &str) -> &'static TestProfile {
    PROFILES
        .iter()
        .find(|profile| profile.id == test_id)
        .unwrap_or(&GENERIC)
}

impl TestProfile {
    pub fn is_generic(&self) -> bool {
        self.id.is_empty()
    }

    /// Options a respondent chooses from for the given scale.
    pub fn response_options(&self, scale: ScaleType) -> &'static [ResponseOption] {
        match scale {
            ScaleType::Binary => BINARY_OPTIONS,
            ScaleType::FivePointLikert => self.likert_options,
        }
    }

    /// Highest band whose lower bound the score reaches.
    pub fn band_for(&self, score: i32) -> Option<&'static SeverityBand> {
        self.bands.iter().rev().find(|band| score >= band.min)
    }

    /// Renders the bands as "0-4 Minimal depression, 5-9 ..., 20+ Severe depression".
    pub fn describe_bands(&self) -> Option<String> {
        if self.bands.is_empty() {
            return None;
        }

        let parts: Vec<String> = self
            .bands
            .iter()
            .enumerate()
            .map(|(index, band)| match self.bands.get(index + 1) {
                Some(next) => format!("{}-{} {}", band.min, next.min - 1, band.label),
                None => format!("{}+ {}", band.min, band.label),
            })
            .collect();
        Some(parts.join(", "))
    }
}
