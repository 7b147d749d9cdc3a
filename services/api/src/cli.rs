use crate::commands::{run_function, run_preview, run_query, PreviewArgs, RunArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use volume_discount::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "volume-discount",
    about = "Run, serve, and inspect the volume discount cart function",
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
    /// Evaluate one function input and print the function output
    Run(RunArgs),
    /// Show how a rules metafield value is interpreted
    Preview(PreviewArgs),
    /// Print the input query for the configured metafield
    Query,
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
        Command::Run(args) => run_function(args),
        Command::Preview(args) => run_preview(args),
        Command::Query => run_query(),
    }
}
