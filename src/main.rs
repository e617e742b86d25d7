use anyhow::Result;
use clap::Parser;

/// doubtlab - AI doubt solver for exam-prep English
///
/// Sends a free-text doubt to a Gemini-powered tutor and prints the answer.
///
/// The API key is read from --api-key or the GEMINI_API_KEY environment
/// variable. It may be empty in deployments where the hosting environment
/// injects credentials at the network edge.
///
/// Examples:
///   doubtlab ask "What is the difference between 'A Few' and 'Few'?"
#[derive(Parser, Debug)]
#[command(author, version = env!("DOUBTLAB_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// API key for the generative-language endpoint (also via GEMINI_API_KEY)
    #[arg(
        long = "api-key",
        env = "GEMINI_API_KEY",
        value_name = "KEY",
        default_value = "",
        hide_env_values = true,
        global = true
    )]
    pub api_key: String,

    /// Generative-language API URL (defaults to https://generativelanguage.googleapis.com)
    #[arg(long = "api-url", value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// Model to query (defaults to gemini-2.5-flash-preview-09-2025)
    #[arg(long = "model", value_name = "MODEL", global = true)]
    pub model: Option<String>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Ask the AI tutor a doubt
    Ask(AskArgs),
}

#[derive(clap::Args, Debug)]
pub struct AskArgs {
    /// The doubt to solve, as free text
    #[arg(value_name = "QUESTION")]
    pub question: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Ask(args) => {
            doubtlab::commands::ask(&args.question, cli.api_key, cli.api_url, cli.model).await?
        }
    }
    Ok(())
}
