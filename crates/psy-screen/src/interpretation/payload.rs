use crate::catalog::TestDefinition;
use crate::scoring::TestResult;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/generate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterpretationRequest {
    pub result: TestResult,
    #[serde(rename = "testDef")]
    pub test_def: TestDefinition,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterpretationResponse {
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_request_with_wire_names() {
        let json = serde_json::json!({
            "result": {
                "testId": "gad-7",
                "totalScore": 4,
                "maxPossibleScore": 21,
                "answers": { "1": 2, "2": 4 },
                "date": "2025-03-14T09:30:00Z"
            },
            "testDef": {
                "id": "gad-7",
                "title": "GAD-7",
                "description": "",
                "scaleType": "likert_5",
                "questions": [{ "id": 1, "text": "A" }, { "id": 2, "text": "B" }]
            }
        });

        let request: InterpretationRequest = serde_json::from_value(json).expect("parses");
        assert_eq!(request.result.total_score, 4);
        assert_eq!(request.result.answers.get(2), Some(4));
        assert!(request.result.subscale_scores.is_none());
        assert_eq!(request.test_def.questions.len(), 2);
    }
}
