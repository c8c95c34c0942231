//! Telegram MCP command line.
//!
//! Lists the tool catalog or runs a single tool against the seeded in-memory
//! account.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use telegram_mcp::prelude::*;
use telegram_mcp::ToolsListResponse;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEMO_PHONE_NUMBER: &str = "+15550000";
const DEMO_LOGIN_CODE: &str = "12345";

/// Telegram tools for AI agents over the Model Context Protocol
#[derive(Parser)]
#[command(name = "telegram-mcp")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log filter, e.g. `info` or `telegram_mcp=debug`
    #[arg(long, env = "RUST_LOG", default_value = "info", global = true)]
    log_level: String,

    /// JSON configuration file (defaults to TELEGRAM_* environment variables)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the tool descriptors
    Tools,

    /// Run one tool against the in-memory account
    Call {
        /// Tool name, e.g. telegram_get_chats
        name: String,

        /// Tool arguments as a JSON object
        #[arg(short, long, default_value = "{}")]
        args: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<TelegramConfig> {
    if let Some(path) = path {
        return TelegramConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()));
    }
    match TelegramConfig::from_env() {
        Ok(config) => Ok(config),
        Err(TelegramError::MissingConfiguration(key)) => {
            warn!("{} not set, using demo credentials", key);
            Ok(TelegramConfig::new(1, "demo"))
        }
        Err(e) => Err(e.into()),
    }
}

fn parse_arguments(text: &str) -> anyhow::Result<Arguments> {
    let json: serde_json::Value = serde_json::from_str(text).context("--args is not valid JSON")?;
    match Value::from(json) {
        Value::Object(map) => Ok(map.into_iter().collect()),
        other => bail!("--args must be a JSON object, got {}", other.type_name()),
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = load_config(cli.config.as_ref())?;
    let client = Arc::new(InMemoryClient::demo(config));
    let server = TelegramMcpServer::new(client.clone());

    match cli.command {
        Commands::Tools => {
            let mut tools = server.list_tools().await;
            tools.sort_by(|a, b| a.name.cmp(&b.name));
            let response = ToolsListResponse { tools };
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Call { name, args } => {
            let arguments = parse_arguments(&args)?;
            server.start().await?;
            client
                .sign_in(DEMO_PHONE_NUMBER, DEMO_LOGIN_CODE)
                .await
                .context("signing in to the demo account")?;
            info!("Calling {}", name);

            let result = server.call_tool(&name, arguments).await;
            server.stop().await;
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(if result.is_error {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
    }
}
