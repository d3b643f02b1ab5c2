use crate::error::AppError;
use crate::export::{run_applicants_export, ApplicantsExportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "jobboard",
    about = "Serve the job board or export its data from the command line",
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
    /// Work with the applications received for a job post
    Applicants {
        #[command(subcommand)]
        command: ApplicantsCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ApplicantsCommand {
    /// Write a job's applicants as CSV, checking that the owner posted the job
    Export(ApplicantsExportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// JSON snapshot used to hydrate the store (overrides BOARD_DATA_PATH)
    #[arg(long)]
    pub(crate) data: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Applicants {
            command: ApplicantsCommand::Export(args),
        } => run_applicants_export(args),
    }
}
