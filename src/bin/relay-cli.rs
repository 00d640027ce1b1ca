use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "relay-cli")]
#[command(about = "Operator CLI for the ChatKit session relay", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check relay liveness
    Health,
    /// Show the service descriptor
    Describe,
    /// Mint a session token
    Start,
    /// Renew a session token
    Refresh {
        /// Current client secret to offer (the relay mints a new one regardless)
        #[arg(long)]
        current_secret: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Health => {
            let res = client.get(format!("{}/health", cli.url)).send().await?;
            print_response(res).await?;
        }
        Commands::Describe => {
            let res = client.get(format!("{}/", cli.url)).send().await?;
            print_response(res).await?;
        }
        Commands::Start => {
            let res = client
                .post(format!("{}/session/start", cli.url))
                .json(&json!({}))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Refresh { current_secret } => {
            let body = match current_secret {
                Some(secret) => json!({ "currentClientSecret": secret }),
                None => json!({}),
            };
            let res = client
                .post(format!("{}/session/refresh", cli.url))
                .json(&body)
                .send()
                .await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: relay returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
