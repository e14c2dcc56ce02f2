use anyhow::Context;
use call_client::{CallCenterApi, HttpClient, OneshotHttpClient};
use call_desk::{Config, logger, tui};
use clap::{Parser, Subcommand};

/// Terminal front end for the call center backend
#[derive(Parser)]
#[command(name = "call-desk", about, version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Backend base URL (overrides CALL_CENTER_API_BASE)
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Use an in-memory backend instead of the network
    #[arg(long, global = true)]
    mock: bool,
}

#[derive(Subcommand, Default, Clone, Copy)]
enum Command {
    /// Run the interactive terminal UI (default)
    #[default]
    Tui,
    /// Check that the backend answers
    Ping,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(base) = cli.api_base {
        config = config.with_api_base(base)?;
    }

    let command = cli.command.unwrap_or_default();
    match command {
        Command::Tui => {
            logger::init_tui_logger(&config.log_level, config.log_dir.as_deref())?;
        }
        Command::Ping => logger::init_stderr_logger(&config.log_level)?,
    }
    if let Some(path) = &config.env_file {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    if cli.mock {
        tracing::info!("Using the in-memory backend");
        let api = CallCenterApi::new(OneshotHttpClient::new(call_center_mock::router()));
        execute(command, api, "in-memory backend".to_string()).await
    } else {
        let http = config
            .client
            .build_http_client()
            .context("failed to create the HTTP client")?;
        let label = http.base_url().to_string();
        execute(command, CallCenterApi::new(http), label).await
    }
}

async fn execute<C>(command: Command, api: CallCenterApi<C>, label: String) -> anyhow::Result<()>
where
    C: HttpClient + 'static,
{
    match command {
        Command::Tui => tui::run(api, label).await.context("terminal UI failed"),
        Command::Ping => {
            let status = api
                .ping()
                .await
                .with_context(|| format!("backend at {} is not reachable", label))?;
            println!(
                "{}: {}",
                status.status,
                status.message.as_deref().unwrap_or("no message")
            );
            Ok(())
        }
    }
}
