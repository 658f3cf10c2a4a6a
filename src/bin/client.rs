//! Terminal chat client. Each line read from stdin is one submission.

use std::io::Write;

use anyhow::{Context, Result};
use dotenv::dotenv;
use log::info;
use reqwest::Client;
use tokio::io::{AsyncBufReadExt, BufReader};

use portfolio_chat::config::ClientConfig;
use portfolio_chat::widget::{reveal, ChatTransport, ChatWidget, HttpTransport, Speaker};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("warn"));

    let config = ClientConfig::from_env()?;
    let client = Client::builder()
        .timeout(config.request_timeout)
        .build()
        .context("failed to build HTTP client")?;
    info!("Chatting with {}", config.endpoint);

    let transport = HttpTransport::new(
        client,
        config.endpoint.clone(),
        config.request_field.clone(),
        config.response_field.clone(),
    );
    let mut widget = ChatWidget::new(transport);

    println!("Connected to {}. Type a message and press Enter.", config.endpoint);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let Some(message) = widget.begin(&line) else {
            continue;
        };

        let entries = widget.transcript().entries();
        for entry in &entries[entries.len() - 2..] {
            if entry.speaker == Speaker::You {
                println!("{}", entry);
            } else {
                print!("{}", entry);
            }
        }
        std::io::stdout().flush()?;

        let result = widget.transport().send(&message).await;
        widget.resolve(result);

        if let Some(entry) = widget.transcript().last() {
            type_out(&entry.speaker.to_string(), &entry.text, config.typing_delay).await?;
        }
    }
    Ok(())
}

/// Clears the placeholder line and reveals `text` one character at a time.
async fn type_out(speaker: &str, text: &str, delay: std::time::Duration) -> Result<()> {
    let mut stdout = std::io::stdout();
    if delay.is_zero() {
        writeln!(stdout, "\r\x1b[2K{}: {}", speaker, text)?;
        return Ok(());
    }
    for prefix in reveal(text) {
        write!(stdout, "\r\x1b[2K{}: {}", speaker, prefix)?;
        stdout.flush()?;
        tokio::time::sleep(delay).await;
    }
    writeln!(stdout)?;
    Ok(())
}
