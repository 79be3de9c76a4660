use crate::demo::{run_assess, run_cohort, run_demo, AssessArgs, CohortArgs, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use edupulse::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "EduPulse",
    about = "Score dropout risk and manage dashboard notifications from the command line",
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
    /// Score a single student's metrics and list recommended interventions
    Assess(AssessArgs),
    /// Summarize the risk mix of the sample class or an imported CSV export
    Cohort(CohortArgs),
    /// Walk through a role's session: seeded notifications, reads, teardown
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
        Command::Assess(args) => run_assess(args),
        Command::Cohort(args) => run_cohort(args),
        Command::Demo(args) => run_demo(args),
    }
}
