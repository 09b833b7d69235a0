//! Terminal front end for a running portfolio-chat server.
//!
//! Reads one question per line from stdin and prints the assistant's reply.
//! The transcript lives only for the lifetime of the process.
//!
//! # Environment Variables
//!
//! - `CHAT_SERVER_URL` — server base URL (default: "http://127.0.0.1:8080")
//! - `RUST_LOG` — log filter for env_logger (default: "warn")

use portfolio_chat::ui::{ChatSession, HttpChatTransport};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8080";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let base_url =
        std::env::var("CHAT_SERVER_URL").unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string());
    let transport = HttpChatTransport::new(&base_url);
    log::info!("talking to {}", transport.endpoint());

    let mut session = ChatSession::new(transport);
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    stdout
        .write_all(b"Ask about my projects, skills, or experience (Ctrl-D to quit)\n> ")
        .await?;
    stdout.flush().await?;

    while let Some(line) = lines.next_line().await? {
        session.set_input(line);
        if session.can_submit() {
            stdout.write_all(b"...\n").await?;
            stdout.flush().await?;
            if let Some(reply) = session.submit().await {
                stdout
                    .write_all(format!("{}\n", reply.content).as_bytes())
                    .await?;
            }
        }
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
    }

    stdout.write_all(b"\n").await?;
    Ok(())
}
