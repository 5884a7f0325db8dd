use crate::catalog::{SeverityLevel, TestDefinition};
use crate::scoring::TestResult;
use std::fmt::Write as _;

const DISCLAIMER: &str = "This interpretation was produced automatically from your answers \
using the questionnaire's reference ranges. It is a preliminary screening, not a diagnosis, \
and no clinician has reviewed it.";

const CONSULTATION: &str = "A qualified mental health professional can look at these results \
together with your history and circumstances. If anything here resonates or worries you, \
consider booking a consultation. If you are thinking about harming yourself, contact local \
emergency services or a crisis line right away.";

/// Deterministic interpretation built without any network call.
pub fn static_interpretation(result: &TestResult, definition: &TestDefinition) -> String {
    let (level, range_label) = classify(result, definition);
    let mut text = String::new();

    let _ = writeln!(text, "## Disclaimer\n\n{DISCLAIMER}\n");

    let _ = writeln!(text, "## What your scores mean\n");
    let _ = writeln!(
        text,
        "Your total score on {} is {} out of a possible {}. This falls in the range \"{range_label}\".",
        definition.title, result.total_score, result.max_possible_score
    );
    if let Some(bands) = definition.profile().describe_bands() {
        let _ = writeln!(text, "\nReference ranges: {bands}.");
    }
    if let Some((name, value, ceiling)) = strongest_subscale(result, definition) {
        let _ = writeln!(
            text,
            "\nThe most pronounced area is **{name}** with {value} of about {ceiling} points."
        );
    }
    text.push('\n');

    let _ = writeln!(text, "## Possible underlying patterns\n\n{}\n", patterns(level));
    let _ = writeln!(text, "## Self-help suggestions\n");
    for suggestion in suggestions(level) {
        let _ = writeln!(text, "- {suggestion}");
    }
    text.push('\n');

    let _ = write!(text, "## Talking to a professional\n\n{CONSULTATION}");
    text
}

/// Band from the test's table, or thirds of the maximum when it has none.
fn classify(result: &TestResult, definition: &TestDefinition) -> (SeverityLevel, String) {
    if let Some(band) = definition.profile().band_for(result.total_score) {
        return (band.level, band.label.to_string());
    }

    let max = i64::from(result.max_possible_score.max(1));
    let total = i64::from(result.total_score);
    if total * 3 < max {
        (SeverityLevel::Minimal, "Low".to_string())
    } else if total * 3 < max * 2 {
        (SeverityLevel::Moderate, "Moderate".to_string())
    } else {
        (SeverityLevel::Elevated, "Elevated".to_string())
    }
}

/// Subscale with the highest share of its own item ceiling; ties keep the
/// alphabetically first name.
fn strongest_subscale(
    result: &TestResult,
    definition: &TestDefinition,
) -> Option<(String, i32, i32)> {
    let scores = result.subscale_scores.as_ref()?;
    let mut strongest: Option<(String, i32, i32)> = None;

    for (name, value) in scores {
        let Some(items) = definition.subscale_len(name) else {
            continue;
        };
        let ceiling = i32::try_from(items).unwrap_or(i32::MAX).saturating_mul(5);
        if ceiling == 0 {
            continue;
        }

        let stronger = strongest.as_ref().map_or(true, |(_, best, best_ceiling)| {
            i64::from(*value) * i64::from(*best_ceiling) > i64::from(*best) * i64::from(ceiling)
        });
        if stronger {
            strongest = Some((name.clone(), *value, ceiling));
        }
    }

    strongest
}

fn patterns(level: SeverityLevel) -> &'static str {
    match level {
        SeverityLevel::Minimal => {
            "Your answers do not point to a notable level of difficulty right now. Everyday \
             stress, sleep and workload can still shift how you feel, so it is worth noticing \
             changes over time."
        }
        SeverityLevel::Mild => {
            "Scores in this range often reflect ongoing stress, disrupted routines or a \
             demanding period of life. Symptoms at this level can ease on their own but may \
             also build up if the underlying pressures continue."
        }
        SeverityLevel::Moderate => {
            "Scores in this range suggest the difficulties are affecting daily life. Common \
             contributors include prolonged stress, unresolved conflicts, isolation and \
             unhelpful thinking patterns that reinforce low mood or worry."
        }
        SeverityLevel::Elevated | SeverityLevel::Severe => {
            "Scores in this range indicate a considerable level of distress. Patterns like \
             these are often maintained by several factors at once, such as intense emotions \
             that are hard to regulate, strain in relationships and reduced capacity to cope."
        }
    }
}

fn suggestions(level: SeverityLevel) -> &'static [&'static str] {
    match level {
        SeverityLevel::Minimal | SeverityLevel::Mild => &[
            "Keep a regular sleep schedule and daily routine.",
            "Make time for physical activity and things you enjoy.",
            "Stay in touch with people you trust and talk about how you feel.",
        ],
        SeverityLevel::Moderate => &[
            "Track your mood and what triggers changes in it for a couple of weeks.",
            "Break tasks into small, manageable steps and acknowledge each one you finish.",
            "Practise a calming technique daily, such as slow breathing or grounding exercises.",
            "Reduce alcohol and other substances that can intensify symptoms.",
        ],
        SeverityLevel::Elevated | SeverityLevel::Severe => &[
            "Tell someone you trust how you have been feeling.",
            "Keep your days structured with small, achievable activities.",
            "Use grounding techniques when emotions feel overwhelming.",
            "Write down crisis contacts so they are at hand when you need them.",
        ],
    }
}
