//! Converts a completed answer set into a [`TestResult`].
//!
//! Scoring is a pure function of the definition and the answers. Unanswered
//! questions are read as raw value 0 and still pass through the item
//! transform; raw values outside the expected option range are not rejected.
//! Item values and sums saturate at the `i32` bounds instead of overflowing.

mod answers;

pub use answers::{AnswerImportError, AnswerSet};

use crate::catalog::{ItemConvention, Question, ScaleType, SeverityBand, TestDefinition};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-item ceiling used when a test has no fixed maximum.
const GENERIC_LIKERT_ITEM_MAX: i32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub test_id: String,
    pub total_score: i32,
    /// Present iff the definition declares subscales.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscale_scores: Option<BTreeMap<String, i32>>,
    pub max_possible_score: i32,
    pub answers: AnswerSet,
    pub date: DateTime<Utc>,
}

impl TestResult {
    /// Band for the total score under the result's own test id, when that
    /// test defines bands.
    pub fn severity(&self) -> Option<&'static SeverityBand> {
        crate::catalog::profile_for(&self.test_id).band_for(self.total_score)
    }
}

/// Score contributed by one question for a raw response.
pub fn item_score(definition: &TestDefinition, question: &Question, raw: i32) -> i32 {
    match definition.scale_type {
        ScaleType::Binary => raw,
        ScaleType::FivePointLikert => match definition.profile().convention {
            ItemConvention::ZeroBasedClinical => raw.saturating_sub(1),
            ItemConvention::ReverseAware if question.reverse => 6i32.saturating_sub(raw),
            ItemConvention::ReverseAware => raw,
        },
    }
}

/// Declared ceiling: the profile's fixed value, else question count times the
/// per-item maximum (5 for Likert, 1 for binary).
pub fn max_possible_score(definition: &TestDefinition) -> i32 {
    if let Some(max) = definition.profile().max_score {
        return max;
    }

    let count = i32::try_from(definition.questions.len()).unwrap_or(i32::MAX);
    match definition.scale_type {
        ScaleType::FivePointLikert => count.saturating_mul(GENERIC_LIKERT_ITEM_MAX),
        ScaleType::Binary => count,
    }
}

pub fn score(
    definition: &TestDefinition,
    answers: &AnswerSet,
    completed_at: DateTime<Utc>,
) -> TestResult {
    let mut total_score: i32 = 0;
    let mut subscale_scores = definition.subscales.as_ref().map(|subscales| {
        subscales
            .keys()
            .map(|name| (name.clone(), 0))
            .collect::<BTreeMap<String, i32>>()
    });

    for question in &definition.questions {
        let value = item_score(definition, question, answers.raw_or_zero(question.id));
        total_score = total_score.saturating_add(value);

        if let (Some(subscales), Some(totals)) = (&definition.subscales, &mut subscale_scores) {
            for (name, members) in subscales {
                if members.contains(&question.id) {
                    if let Some(running) = totals.get_mut(name) {
                        *running = running.saturating_add(value);
                    }
                }
            }
        }
    }

    TestResult {
        test_id: definition.id.clone(),
        total_score,
        subscale_scores,
        max_possible_score: max_possible_score(definition),
        answers: answers.clone(),
        date: completed_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::QuestionId;
    use chrono::TimeZone;
    use std::collections::BTreeSet;

    fn completed_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0)
            .single()
            .expect("valid timestamp")
    }

    fn definition(id: &str, scale_type: ScaleType, questions: Vec<Question>) -> TestDefinition {
        TestDefinition {
            id: id.to_string(),
            title: id.to_uppercase(),
            description: String::new(),
            questions,
            scale_type,
            subscales: None,
        }
    }

    fn numbered(count: u32) -> Vec<Question> {
        (1..=count)
            .map(|id| Question::new(id, format!("Item {id}")))
            .collect()
    }

    fn uniform(ids: impl IntoIterator<Item = QuestionId>, raw: i32) -> AnswerSet {
        ids.into_iter().map(|id| (id, raw)).collect()
    }

    #[test]
    fn binary_all_yes_scores_question_count() {
        let test = definition("custom-binary", ScaleType::Binary, numbered(10));
        let result = score(&test, &uniform(1..=10, 1), completed_at());
        assert_eq!(result.total_score, 10);
        assert_eq!(result.max_possible_score, 10);
        assert!(result.subscale_scores.is_none());
    }

    #[test]
    fn binary_total_stays_within_question_count() {
        let test = definition("custom-binary", ScaleType::Binary, numbered(6));
        for mask in 0u32..64 {
            let answers: AnswerSet = (1..=6)
                .map(|id| (id, i32::from(mask & (1 << (id - 1)) != 0)))
                .collect();
            let result = score(&test, &answers, completed_at());
            assert_eq!(result.total_score, mask.count_ones() as i32);
            assert!((0..=6).contains(&result.total_score));
        }
    }

    #[test]
    fn clinical_tests_shift_raw_values_and_ignore_reverse() {
        for id in ["phq-9", "gad-7", "bdi-ii", "bai"] {
            let mut questions = numbered(3);
            questions[1].reverse = true;
            let test = definition(id, ScaleType::FivePointLikert, questions);
            for raw in 1..=4 {
                for question in &test.questions {
                    assert_eq!(item_score(&test, question, raw), raw - 1, "{id} raw {raw}");
                }
            }
        }
    }

    #[test]
    fn phq9_all_maximum_answers_reach_ceiling() {
        let test = definition("phq-9", ScaleType::FivePointLikert, numbered(9));
        let result = score(&test, &uniform(1..=9, 4), completed_at());
        assert_eq!(result.total_score, 27);
        assert_eq!(result.max_possible_score, 27);
    }

    #[test]
    fn non_clinical_likert_reflects_reversed_items() {
        let reversed = definition(
            "custom-likert",
            ScaleType::FivePointLikert,
            vec![Question::reversed(1, "Reversed")],
        );
        let plain = definition(
            "custom-likert",
            ScaleType::FivePointLikert,
            vec![Question::new(1, "Plain")],
        );
        assert_eq!(item_score(&reversed, &reversed.questions[0], 5), 1);
        assert_eq!(item_score(&plain, &plain.questions[0], 5), 5);
        for raw in 1..=5 {
            assert_eq!(item_score(&reversed, &reversed.questions[0], raw), 6 - raw);
            assert_eq!(item_score(&plain, &plain.questions[0], raw), raw);
        }
    }

    #[test]
    fn binary_scale_ignores_reverse_flag() {
        let test = definition(
            "custom-binary",
            ScaleType::Binary,
            vec![Question::reversed(1, "Reversed yes/no")],
        );
        assert_eq!(item_score(&test, &test.questions[0], 1), 1);
        assert_eq!(item_score(&test, &test.questions[0], 0), 0);
    }

    #[test]
    fn max_score_is_a_lookup_not_a_count() {
        let gad_short = definition("gad-7", ScaleType::FivePointLikert, numbered(3));
        assert_eq!(max_possible_score(&gad_short), 21);
        let bai = definition("bai", ScaleType::FivePointLikert, numbered(2));
        assert_eq!(max_possible_score(&bai), 63);
        let bdi = definition("bdi-ii", ScaleType::Binary, numbered(2));
        assert_eq!(max_possible_score(&bdi), 63);

        let custom_likert = definition("custom-likert", ScaleType::FivePointLikert, numbered(8));
        assert_eq!(max_possible_score(&custom_likert), 40);
        let custom_binary = definition("custom-binary", ScaleType::Binary, numbered(8));
        assert_eq!(max_possible_score(&custom_binary), 8);
    }

    #[test]
    fn missing_answers_read_as_raw_zero() {
        let plain = definition("custom-likert", ScaleType::FivePointLikert, numbered(2));
        let result = score(&plain, &uniform([1], 3), completed_at());
        assert_eq!(result.total_score, 3);

        let clinical = definition("phq-9", ScaleType::FivePointLikert, numbered(2));
        let result = score(&clinical, &uniform([1], 3), completed_at());
        assert_eq!(result.total_score, 2 + -1);
    }

    #[test]
    fn out_of_range_raw_values_pass_through() {
        let test = definition("custom-binary", ScaleType::Binary, numbered(1));
        let result = score(&test, &uniform([1], 2), completed_at());
        assert_eq!(result.total_score, 2);
    }

    #[test]
    fn extreme_clinical_raw_value_saturates() {
        let test = definition("phq-9", ScaleType::FivePointLikert, numbered(9));
        assert_eq!(item_score(&test, &test.questions[0], i32::MIN), i32::MIN);

        // the eight unanswered items add -1 each on top of the floor
        let result = score(&test, &uniform([1], i32::MIN), completed_at());
        assert_eq!(result.total_score, i32::MIN);
    }

    #[test]
    fn extreme_reversed_raw_value_saturates() {
        let test = definition(
            "custom-likert",
            ScaleType::FivePointLikert,
            vec![Question::reversed(1, "Reversed")],
        );
        assert_eq!(item_score(&test, &test.questions[0], i32::MIN), i32::MAX);
        assert_eq!(item_score(&test, &test.questions[0], i32::MAX), 6 - i32::MAX);
    }

    #[test]
    fn binary_total_saturates_at_i32_max() {
        let test = definition("bpd-screen", ScaleType::Binary, numbered(10));
        let answers: AnswerSet = [(1, i32::MAX), (2, 1)].into_iter().collect();
        let result = score(&test, &answers, completed_at());
        assert_eq!(result.total_score, i32::MAX);
        assert_eq!(result.max_possible_score, 10);
    }

    #[test]
    fn subscale_sums_saturate() {
        let mut test = definition("custom-likert", ScaleType::FivePointLikert, numbered(2));
        test.subscales = Some(BTreeMap::from([(
            "Both".to_string(),
            BTreeSet::from([1, 2]),
        )]));
        let answers: AnswerSet = [(1, i32::MAX), (2, 5)].into_iter().collect();
        let result = score(&test, &answers, completed_at());
        assert_eq!(result.total_score, i32::MAX);
        assert_eq!(result.subscale_scores.expect("subscales")["Both"], i32::MAX);
    }

    #[test]
    fn overlapping_subscales_each_receive_full_item_score() {
        let mut test = definition("custom-likert", ScaleType::FivePointLikert, numbered(4));
        test.questions[3].reverse = true;
        test.subscales = Some(BTreeMap::from([
            ("Alpha".to_string(), BTreeSet::from([1, 2])),
            ("Beta".to_string(), BTreeSet::from([2, 4])),
            ("Empty".to_string(), BTreeSet::new()),
        ]));

        let answers: AnswerSet = [(1, 2), (2, 3), (3, 5), (4, 5)].into_iter().collect();
        let result = score(&test, &answers, completed_at());
        let subscales = result.subscale_scores.expect("subscales present");

        assert_eq!(result.total_score, 2 + 3 + 5 + 1);
        assert_eq!(subscales["Alpha"], 5);
        assert_eq!(subscales["Beta"], 4);
        assert_eq!(subscales["Empty"], 0);

        // item 2 belongs to both subscales and item 3 to neither
        assert_eq!(subscales.values().sum::<i32>(), 2 + 3 + 3 + 1);
    }

    #[test]
    fn result_carries_answers_and_timestamp() {
        let test = definition("custom-binary", ScaleType::Binary, numbered(2));
        let answers = uniform(1..=2, 1);
        let result = score(&test, &answers, completed_at());
        assert_eq!(result.test_id, "custom-binary");
        assert_eq!(result.answers, answers);
        assert_eq!(result.date, completed_at());
    }

    #[test]
    fn result_serializes_with_wire_names() {
        let test = definition("gad-7", ScaleType::FivePointLikert, numbered(1));
        let result = score(&test, &uniform([1], 2), completed_at());
        let json = serde_json::to_value(&result).expect("serializes");
        assert_eq!(json["testId"], "gad-7");
        assert_eq!(json["totalScore"], 1);
        assert_eq!(json["maxPossibleScore"], 21);
        assert!(json.get("subscaleScores").is_none());
        assert_eq!(json["answers"]["1"], 2);
    }

    #[test]
    fn severity_uses_profile_bands() {
        let test = definition("gad-7", ScaleType::FivePointLikert, numbered(7));
        let result = score(&test, &uniform(1..=7, 3), completed_at());
        assert_eq!(result.total_score, 14);
        assert_eq!(result.severity().map(|b| b.label), Some("Moderate anxiety"));
    }
}
