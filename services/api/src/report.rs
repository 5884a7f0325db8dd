use crate::infra::load_catalog;
use chrono::Utc;
use clap::Args;
use psy_screen::catalog::{Catalog, TestDefinition};
use psy_screen::config::AppConfig;
use psy_screen::error::AppError;
use psy_screen::interpretation::{InterpretationCascade, RemoteInterpretationClient};
use psy_screen::scoring::{score, AnswerSet, TestResult};
use psy_screen::telemetry;
use std::fmt::Write as _;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Questionnaire id, e.g. phq-9
    #[arg(long)]
    pub(crate) test: String,
    /// CSV file with `question_id,value` rows
    #[arg(long)]
    pub(crate) answers: PathBuf,
    /// Interpret in-process using provider credentials from the environment
    #[arg(long, conflicts_with = "remote")]
    pub(crate) interpret: bool,
    /// Interpret through a running service at this base URL
    #[arg(long)]
    pub(crate) remote: Option<String>,
}

pub(crate) fn run_catalog() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let catalog = load_catalog(&config.catalog)?;
    print!("{}", render_catalog(&catalog));
    Ok(())
}

pub(crate) async fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        test,
        answers,
        interpret,
        remote,
    } = args;

    let config = AppConfig::load()?;
    let catalog = load_catalog(&config.catalog)?;
    let definition = catalog
        .get(&test)
        .ok_or_else(|| AppError::UnknownTest(test.clone()))?;
    let answers = AnswerSet::from_csv_path(&answers)?;
    let result = score(definition, &answers, Utc::now());

    print!("{}", render_result(&result, definition));

    if let Some(base_url) = remote {
        let client = RemoteInterpretationClient::new(&base_url, config.providers.request_timeout)?;
        let text = client.interpret(&result, definition).await;
        println!("\n{text}");
    } else if interpret {
        telemetry::init(&config.telemetry)?;
        let cascade = InterpretationCascade::from_config(&config.providers)?;
        let interpretation = cascade.interpret(&result, definition).await;
        println!("\nInterpretation source: {:?}\n", interpretation.source);
        println!("{}", interpretation.text);
    }

    Ok(())
}

pub(crate) fn render_catalog(catalog: &Catalog) -> String {
    let mut out = String::from("Available questionnaires\n");
    for test in catalog.tests() {
        let _ = writeln!(
            out,
            "  {:<12} {:>3} items  {:<7} {}",
            test.id,
            test.questions.len(),
            test.scale_type.label(),
            test.title
        );
    }
    out
}

pub(crate) fn render_result(result: &TestResult, definition: &TestDefinition) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", definition.title);
    let _ = writeln!(
        out,
        "Score: {} / {}",
        result.total_score, result.max_possible_score
    );
    if let Some(band) = definition.profile().band_for(result.total_score) {
        let _ = writeln!(out, "Range: {}", band.label);
    }
    let unanswered = definition
        .questions
        .iter()
        .filter(|question| result.answers.get(question.id).is_none())
        .count();
    if unanswered > 0 {
        let _ = writeln!(out, "Unanswered questions: {unanswered} (scored as 0)");
    }
    if let Some(subscales) = &result.subscale_scores {
        out.push_str("Subscales:\n");
        for (name, value) in subscales {
            let _ = writeln!(out, "  - {name}: {value}");
        }
    }
    out
}
