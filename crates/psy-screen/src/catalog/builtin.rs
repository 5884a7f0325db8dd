use super::{Question, QuestionId, ScaleType, TestDefinition};
use std::collections::{BTreeMap, BTreeSet};

const PHQ9_ITEMS: &[&str] = &[
    "Little interest or pleasure in doing things",
    "Feeling down, depressed, or hopeless",
    "Trouble falling or staying asleep, or sleeping too much",
    "Feeling tired or having little energy",
    "Poor appetite or overeating",
    "Feeling bad about yourself, or that you have let yourself or others down",
    "Trouble concentrating on things such as reading or watching television",
    "Moving or speaking noticeably slowly, or being unusually fidgety and restless",
    "Thoughts that you would be better off dead, or of hurting yourself",
];

const GAD7_ITEMS: &[&str] = &[
    "Feeling nervous, anxious, or on edge",
    "Not being able to stop or control worrying",
    "Worrying too much about different things",
    "Trouble relaxing",
    "Being so restless that it is hard to sit still",
    "Becoming easily annoyed or irritable",
    "Feeling afraid as if something awful might happen",
];

const BDI2_ITEMS: &[&str] = &[
    "Sadness",
    "Pessimism about the future",
    "Sense of past failure",
    "Loss of pleasure",
    "Guilty feelings",
    "Feeling that you are being punished",
    "Disliking yourself",
    "Being critical of yourself",
    "Thoughts of suicide",
    "Crying",
    "Agitation or restlessness",
    "Loss of interest in other people or activities",
    "Difficulty making decisions",
    "Feeling worthless",
    "Loss of energy",
    "Changes in sleeping pattern",
    "Irritability",
    "Changes in appetite",
    "Difficulty concentrating",
    "Tiredness or fatigue",
    "Loss of interest in sex",
];

const BAI_ITEMS: &[&str] = &[
    "Numbness or tingling",
    "Feeling hot",
    "Wobbliness in the legs",
    "Unable to relax",
    "Fear of the worst happening",
    "Dizzy or lightheaded",
    "Heart pounding or racing",
    "Unsteady",
    "Terrified or afraid",
    "Nervous",
    "Feeling of choking",
    "Hands trembling",
    "Shaky or unsteady",
    "Fear of losing control",
    "Difficulty breathing",
    "Fear of dying",
    "Scared",
    "Indigestion",
    "Faint or lightheaded",
    "Face flushed",
    "Hot or cold sweats",
];

const DERS_ITEMS: &[&str] = &[
    "I am clear about what I am feeling",
    "I pay attention to how I feel",
    "I experience my emotions as overwhelming and out of control",
    "I have no idea how I am feeling",
    "I have difficulty making sense out of my feelings",
    "I am attentive to my feelings",
    "I know exactly how I am feeling",
    "I care about what I am feeling",
    "I am confused about how I feel",
    "When I'm upset, I acknowledge my emotions",
    "When I'm upset, I become angry with myself for feeling that way",
    "When I'm upset, I become embarrassed for feeling that way",
    "When I'm upset, I have difficulty getting work done",
    "When I'm upset, I become out of control",
    "When I'm upset, I believe I will remain that way for a long time",
    "When I'm upset, I believe I will end up feeling very depressed",
    "When I'm upset, I believe my feelings are valid and important",
    "When I'm upset, I have difficulty focusing on other things",
    "When I'm upset, I feel out of control",
    "When I'm upset, I can still get things done",
    "When I'm upset, I feel ashamed of myself for feeling that way",
    "When I'm upset, I know I can find a way to eventually feel better",
    "When I'm upset, I feel like I am weak",
    "When I'm upset, I feel I can remain in control of my behaviour",
    "When I'm upset, I feel guilty for feeling that way",
    "When I'm upset, I have difficulty concentrating",
    "When I'm upset, I have difficulty controlling my behaviour",
    "When I'm upset, I believe there is nothing I can do to feel better",
    "When I'm upset, I become irritated with myself for feeling that way",
    "When I'm upset, I start to feel very bad about myself",
    "When I'm upset, I believe wallowing in it is all I can do",
    "When I'm upset, I lose control over my behaviour",
    "When I'm upset, I have difficulty thinking about anything else",
    "When I'm upset, I take time to figure out what I'm really feeling",
    "When I'm upset, it takes me a long time to feel better",
    "When I'm upset, my emotions feel overwhelming",
];

const DERS_REVERSED: &[QuestionId] = &[1, 2, 6, 7, 8, 10, 17, 20, 22, 24, 34];

const DERS_SUBSCALES: &[(&str, &[QuestionId])] = &[
    ("Nonacceptance", &[11, 12, 21, 23, 25, 29]),
    ("Goals", &[13, 18, 20, 26, 33]),
    ("Impulse", &[3, 14, 19, 24, 27, 32]),
    ("Awareness", &[2, 6, 8, 10, 17, 34]),
    ("Strategies", &[15, 16, 22, 28, 30, 31, 35, 36]),
    ("Clarity", &[1, 4, 5, 7, 9]),
];

const BPD_ITEMS: &[&str] = &[
    "Have your closest relationships been troubled by many arguments or repeated breakups?",
    "Have you deliberately hurt yourself physically or made a suicide attempt?",
    "Have you had at least two other problems with impulsivity, such as binges or spending sprees?",
    "Have you been extremely moody?",
    "Have you felt very angry much of the time, or often acted in an angry or sarcastic way?",
    "Have you often been distrustful of other people?",
    "Have you frequently felt unreal, or as if things around you were unreal?",
    "Have you chronically felt empty?",
    "Have you often felt that you had no idea who you are?",
    "Have you made desperate efforts to avoid feeling abandoned or being abandoned?",
];

/// Numbers items from 1 in listing order.
fn items(texts: &[&str], reversed: &[QuestionId]) -> Vec<Question> {
    texts
        .iter()
        .zip(1..)
        .map(|(text, id)| Question {
            id,
            text: (*text).to_string(),
            reverse: reversed.contains(&id),
        })
        .collect()
}

fn subscales(groups: &[(&str, &[QuestionId])]) -> BTreeMap<String, BTreeSet<QuestionId>> {
    groups
        .iter()
        .map(|(name, ids)| (name.to_string(), ids.iter().copied().collect()))
        .collect()
}

fn likert(id: &str, title: &str, description: &str, texts: &[&str]) -> TestDefinition {
    TestDefinition {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        questions: items(texts, &[]),
        scale_type: ScaleType::FivePointLikert,
        subscales: None,
    }
}

pub(super) fn definitions() -> Vec<TestDefinition> {
    vec![
        likert(
            "phq-9",
            "Patient Health Questionnaire (PHQ-9)",
            "Screens for depressive symptoms over the last two weeks.",
            PHQ9_ITEMS,
        ),
        likert(
            "gad-7",
            "Generalized Anxiety Disorder Scale (GAD-7)",
            "Screens for generalized anxiety symptoms over the last two weeks.",
            GAD7_ITEMS,
        ),
        likert(
            "bdi-ii",
            "Beck Depression Inventory (BDI-II)",
            "Rates the intensity of depressive symptoms over the last two weeks.",
            BDI2_ITEMS,
        ),
        likert(
            "bai",
            "Beck Anxiety Inventory (BAI)",
            "Rates how much common anxiety symptoms bothered you over the last month.",
            BAI_ITEMS,
        ),
        TestDefinition {
            id: "ders-36".to_string(),
            title: "Difficulties in Emotion Regulation Scale (DERS-36)".to_string(),
            description: "Measures difficulties across six facets of emotion regulation."
                .to_string(),
            questions: items(DERS_ITEMS, DERS_REVERSED),
            scale_type: ScaleType::FivePointLikert,
            subscales: Some(subscales(DERS_SUBSCALES)),
        },
        TestDefinition {
            id: "bpd-screen".to_string(),
            title: "Borderline Personality Screen (MSI-BPD)".to_string(),
            description: "Ten yes/no questions screening for borderline personality traits."
                .to_string(),
            questions: items(BPD_ITEMS, &[]),
            scale_type: ScaleType::Binary,
            subscales: None,
        },
    ]
}
