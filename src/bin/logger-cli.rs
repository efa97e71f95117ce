use std::time::Duration;

use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "logger-cli")]
#[command(about = "Query the log viewer of a running logger-manager service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://127.0.0.1:8000")]
    url: String,

    #[arg(short, long, default_value = "/api/settings")]
    prefix: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List loggers that write log files
    Loggers,
    /// Print the last lines of a logger's file
    Tail {
        /// Logger name, e.g. `app` or `task.cleanup`
        logger: String,

        #[arg(short = 'n', long, default_value_t = 30)]
        lines: usize,

        /// Keep polling and print new tails
        #[arg(short, long)]
        follow: bool,

        #[arg(long, default_value_t = 1000)]
        interval_ms: u64,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = format!("{}{}", cli.url.trim_end_matches('/'), cli.prefix);

    match cli.command {
        Commands::Loggers => {
            let res = client.get(format!("{}/logs/logger_names", base)).send().await?;
            if let Some(json) = json_or_report(res).await? {
                for name in json.as_array().into_iter().flatten() {
                    println!("{}", name.as_str().unwrap_or_default());
                }
            }
        }
        Commands::Tail {
            logger,
            lines,
            follow,
            interval_ms,
        } => loop {
            let count = lines.to_string();
            let res = client
                .get(format!("{}/logs/tail", base))
                .query(&[("logger", logger.as_str()), ("lines", count.as_str())])
                .send()
                .await?;
            let Some(json) = json_or_report(res).await? else {
                break;
            };
            for line in json["lines"].as_array().into_iter().flatten() {
                println!("{}", line.as_str().unwrap_or_default());
            }
            if !follow {
                break;
            }
            tokio::time::sleep(Duration::from_millis(interval_ms)).await;
            println!("---");
        },
    }

    Ok(())
}

async fn json_or_report(res: reqwest::Response) -> Result<Option<Value>, Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: log viewer returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(None);
    }

    Ok(Some(res.json().await?))
}
