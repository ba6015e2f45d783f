//! Terminal client: renders the game as text and reads commands from stdin.

use std::time::Duration;

use clap::Parser;
use client::bin_support::input::parse_line;
use client::config::{ClientConfig, LogFormat};
use client::telemetry;
use client::ws::{ConnectionSession, UiInput, WsConnector};
use client::TextView;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "client")]
#[command(about = "Terminal client for the deck-building game server")]
struct Args {
    /// WebSocket url of the game server (overrides CLIENT_SERVER_URL)
    #[arg(long)]
    server_url: Option<String>,

    /// Log output format (overrides CLIENT_LOG_FORMAT)
    #[arg(long)]
    log_format: Option<LogFormat>,

    /// Seconds to wait for the connection (overrides CLIENT_CONNECT_TIMEOUT_SECS)
    #[arg(long)]
    connect_timeout_secs: Option<u64>,
}

impl Args {
    fn apply(self, mut config: ClientConfig) -> ClientConfig {
        if let Some(url) = self.server_url {
            config.server_url = url;
        }
        if let Some(format) = self.log_format {
            config.log_format = format;
        }
        if let Some(secs) = self.connect_timeout_secs.filter(|s| *s > 0) {
            config.connect_timeout = Duration::from_secs(secs);
        }
        config
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let config = match ClientConfig::from_env().and_then(|config| {
        let config = args.apply(config);
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    telemetry::init_tracing(config.log_format);
    info!(url = %config.server_url, "starting client");

    let (ui_tx, mut ui_rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            let input = match lines.next_line().await {
                Ok(Some(line)) if line.trim().is_empty() => continue,
                Ok(Some(line)) => match parse_line(&line) {
                    Ok(input) => input,
                    Err(e) => {
                        eprintln!("?? {e}");
                        continue;
                    }
                },
                Ok(None) => UiInput::Quit,
                Err(e) => {
                    error!(error = %e, "stdin read failed");
                    UiInput::Quit
                }
            };
            let quit = input == UiInput::Quit;
            if ui_tx.send(input).is_err() || quit {
                break;
            }
        }
    });

    let connector = WsConnector::new(config.connect_timeout);
    let mut client = ConnectionSession::new(connector, config.server_url, TextView::default());

    if let Err(e) = client.open().await {
        eprintln!("❌ Could not start a game: {e}");
        std::process::exit(1);
    }

    if let Err(e) = client.run(&mut ui_rx).await {
        eprintln!("❌ Client stopped: {e}");
        std::process::exit(1);
    }
}
