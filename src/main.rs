//! HBAR transfer agent.
//!
//! Turns free-text requests ("send 50 HBAR to 0x...") into signed native
//! transfers on a Hedera JSON-RPC relay.
//!
//! # Architecture Overview
//!
//! ```text
//!   user text
//!       │
//!       ▼
//!  ┌──────────┐   ┌────────┐   ┌──────────┐   ┌─────────┐   ┌────────┐   ┌───────────┐
//!  │ extractor│──▶│ parser │──▶│ address  │──▶│ builder │──▶│ wallet │──▶│ broadcast │
//!  │  (LLM)   │   │        │   │ EIP-55   │   │nonce+gas│   │ EIP-155│   │  (once)   │
//!  └──────────┘   └────────┘   └──────────┘   └─────────┘   └────────┘   └───────────┘
//!       ▲                                          │                           │
//!       │                                          └──────── ledger node ◀─────┘
//!  pipeline::Agent (shared, immutable) ── surfaces: HTTP /chat, REPL, one-shot send
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

use hbar_agent::config::{load_config, load_secrets, AgentConfig};
use hbar_agent::lifecycle::{bootstrap, shutdown};
use hbar_agent::observability::{logging, metrics};
use hbar_agent::{Agent, HttpServer};

#[derive(Parser)]
#[command(name = "hbar-agent")]
#[command(about = "Send HBAR by describing the transfer in plain language", long_about = None)]
struct Cli {
    /// Path to a TOML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the HTTP chat API (default)
    Serve,
    /// Chat interactively on stdin
    Repl,
    /// Handle a single request and exit
    Send {
        /// The request, e.g. "send 5 HBAR to 0x..."
        text: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // A missing .env is fine; the variables may come from the environment.
    let _ = dotenvy::dotenv();

    let config = load_config(cli.config.as_deref())?;
    logging::init_logging(&config.observability);

    tracing::info!("hbar-agent v{} starting", env!("CARGO_PKG_VERSION"));

    let secrets = load_secrets()?;
    let agent = bootstrap(&config, &secrets).await?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config, agent).await?,
        Commands::Repl => repl(&agent).await?,
        Commands::Send { text } => {
            let run = agent.submit(&text).await;
            println!("{}", run.reply());
            if run.result.is_err() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

async fn serve(config: AgentConfig, agent: Agent) -> Result<(), Box<dyn std::error::Error>> {
    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        request_timeout_secs = config.server.request_timeout_secs,
        "Listening for connections"
    );

    let server = HttpServer::new(Arc::new(agent), &config.server);
    server.run(listener, shutdown::ctrl_c()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

async fn repl(agent: &Agent) -> Result<(), std::io::Error> {
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    stdout
        .write_all(b"Describe a transfer, e.g. \"send 5 HBAR to 0x...\". Ctrl+D to quit.\n> ")
        .await?;
    stdout.flush().await?;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if !line.is_empty() {
            let reply = agent.handle_user_message(line).await;
            stdout.write_all(format!("{}\n", reply).as_bytes()).await?;
        }
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
    }

    Ok(())
}
