use crate::report::{run_catalog, run_score, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use psy_screen::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "psy-screen",
    about = "Score psychological self-assessment questionnaires and serve AI interpretations",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// List the questionnaires in the active catalog
    Catalog,
    /// Score a CSV of answers and optionally interpret the result
    Score(ScoreArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Catalog => run_catalog(),
        Command::Score(args) => run_score(args).await,
    }
}
