use crate::demo::{run_assess, run_demo, run_rubric, AssessArgs, DemoArgs, RubricArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use repair_readiness::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Repair Readiness",
    about = "Score home repair program readiness self-assessments",
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
    /// Print the assessment questions in answer order
    Rubric(RubricArgs),
    /// Score a saved submission and print the dashboard and action plan
    Assess(AssessArgs),
    /// Walk through a scripted assessment with saved history snapshots
    Demo(DemoArgs),
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
        Command::Rubric(args) => run_rubric(args),
        Command::Assess(args) => run_assess(args),
        Command::Demo(args) => run_demo(args),
    }
}
