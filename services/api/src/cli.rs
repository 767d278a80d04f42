use crate::preview::{run_form_preview, run_navigation, run_page, FormPreviewArgs, PageArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use concierge::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Concierge API",
    about = "Serve the concierge site backend and inspect its content and inquiry forms",
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
    /// Read published content from the content store
    Content {
        #[command(subcommand)]
        command: ContentCommand,
    },
    /// Work with inquiry forms without contacting the webhook
    Forms {
        #[command(subcommand)]
        command: FormsCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ContentCommand {
    /// Print the page envelope for a permalink
    Page(PageArgs),
    /// Print the active navigation menus
    Navigation,
}

#[derive(Subcommand, Debug)]
enum FormsCommand {
    /// Validate and normalize a submission, printing what would be relayed
    Preview(FormPreviewArgs),
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
        Command::Content {
            command: ContentCommand::Page(args),
        } => run_page(args).await,
        Command::Content {
            command: ContentCommand::Navigation,
        } => run_navigation().await,
        Command::Forms {
            command: FormsCommand::Preview(args),
        } => run_form_preview(args),
    }
}
