use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use xrate::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Default)]
struct UpdateArgs {
    /// Destination of the rate document
    #[arg(short, long)]
    output: Option<String>,

    /// Provider API key, overrides config and environment
    #[arg(long)]
    api_key: Option<String>,

    /// Provider base URL
    #[arg(long)]
    base_url: Option<String>,
}

impl From<UpdateArgs> for xrate::UpdateOptions {
    fn from(args: UpdateArgs) -> xrate::UpdateOptions {
        xrate::UpdateOptions {
            output: args.output,
            api_key: args.api_key,
            base_url: args.base_url,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Fetch the latest rates and rewrite the rate document (default)
    Update(UpdateArgs),
    /// Show when the rate document was last updated
    Status {
        /// Rate document to inspect
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config_path = cli.config_path.as_deref();
    let result = match cli.command {
        Some(Commands::Setup) => xrate::cli::setup::setup(),
        Some(Commands::Status { output }) => {
            xrate::run_command(xrate::AppCommand::Status { output }, config_path).await
        }
        Some(Commands::Update(args)) => {
            xrate::run_command(xrate::AppCommand::Update(args.into()), config_path).await
        }
        None => {
            xrate::run_command(
                xrate::AppCommand::Update(UpdateArgs::default().into()),
                config_path,
            )
            .await
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
