use crate::catalog::TestDefinition;
use crate::scoring::TestResult;
use std::fmt::Write as _;

/// Provider-neutral prompt; each client maps the two parts onto its own
/// system/user message shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpretationPrompt {
    pub instructions: String,
    pub request: String,
}

const INSTRUCTIONS: &str = "You are an AI assistant that interprets self-assessment questionnaire scores. \
You are an algorithm, not a clinician: say so plainly at the start, never speak as a doctor \
or refer to your own practice, and never state a diagnosis. Frame everything as a \
preliminary screening based on the questionnaire's published norms.";

const RESPONSE_STRUCTURE: &[(&str, &str)] = &[
    (
        "Disclaimer",
        "a short note that this analysis was generated by AI from the answers provided and is not a diagnosis",
    ),
    (
        "What your scores mean",
        "an explanation of the scores against the questionnaire's norms",
    ),
    (
        "Possible underlying patterns",
        "patterns or mechanisms that could contribute to these scores, without asserting any diagnosis",
    ),
    (
        "Self-help suggestions",
        "concrete, practical steps the person can try on their own",
    ),
    (
        "Talking to a professional",
        "a warm invitation to consult a qualified mental health professional for an accurate assessment",
    ),
];

/// Human-readable score lines: total of maximum, norms, threshold and subscales.
pub fn score_summary(result: &TestResult, definition: &TestDefinition) -> String {
    let profile = definition.profile();
    let mut summary = format!(
        "Total score: {} of {}.",
        result.total_score, result.max_possible_score
    );

    if let Some(bands) = profile.describe_bands() {
        let _ = write!(summary, "\nReference ranges: {bands}.");
    }
    if let Some(band) = profile.band_for(result.total_score) {
        let _ = write!(summary, "\nScore range reached: {}.", band.label);
    }
    if let Some(threshold) = profile.clinical_threshold {
        let _ = write!(
            summary,
            "\nScreening threshold: {threshold} (score is {}).",
            if result.total_score >= threshold {
                "at or above"
            } else {
                "below"
            }
        );
    }
    if let Some(subscales) = &result.subscale_scores {
        summary.push_str("\nSubscale scores:");
        for (name, value) in subscales {
            let _ = write!(summary, "\n- {name}: {value}");
        }
    }

    summary
}

pub fn build_prompt(result: &TestResult, definition: &TestDefinition) -> InterpretationPrompt {
    let mut request = format!(
        "Interpret the results of the questionnaire \"{}\".\n\nResults:\n{}\n\n\
         Structure the answer as Markdown with one heading per section, in this order:",
        definition.title,
        score_summary(result, definition)
    );
    for (index, (heading, content)) in RESPONSE_STRUCTURE.iter().enumerate() {
        let _ = write!(request, "\n{}. {heading}: {content}.", index + 1);
    }
    request.push_str("\n\nWrite for the person who took the test, in plain and supportive language.");

    InterpretationPrompt {
        instructions: INSTRUCTIONS.to_string(),
        request,
    }
}
