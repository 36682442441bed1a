use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "agent-cli")]
#[command(about = "Client for a running hbar-agent server", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a transfer request
    Send {
        /// The request, e.g. "send 5 HBAR to 0x..."
        text: String,
    },
    /// Check the agent and its ledger node
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let ok = match cli.command {
        Commands::Send { text } => {
            let res = client
                .post(format!("{}/chat", cli.url))
                .json(&json!({ "message": text }))
                .send()
                .await?;
            print_response(res).await?
        }
        Commands::Health => {
            let res = client.get(format!("{}/health", cli.url)).send().await?;
            print_response(res).await?
        }
    };

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<bool, Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => {
            if let Some(reply) = json.get("reply").and_then(Value::as_str) {
                println!("{}", reply);
            } else {
                println!("{}", serde_json::to_string_pretty(&json)?);
            }
        }
        Err(_) => eprintln!("Error: server returned status {}: {}", status, text),
    }

    Ok(status.is_success())
}
