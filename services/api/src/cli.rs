use crate::apply::{run_apply, ApplyArgs};
use crate::preview::{run_preview, PreviewArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use fan_coach::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Fan Coach Intake",
    about = "Serve the fan coach application endpoint or fill in an application from the terminal",
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
    /// Fill in an application step by step and submit it to a running service
    Apply(ApplyArgs),
    /// Render the e-mail an answers file would produce without sending it
    Preview(PreviewArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Log outgoing e-mails instead of sending them through Resend
    #[arg(long)]
    pub(crate) dry_run: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Apply(args) => run_apply(args).await,
        Command::Preview(args) => run_preview(args),
    }
}
