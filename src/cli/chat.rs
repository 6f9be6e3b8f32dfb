//! CLI `chat` command — one-shot or interactive conversation with the assistant.

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use memogenius::config::MemoConfig;
use memogenius::resources::ChatLog;
use memogenius::session::Session;

use super::{notification_queue, print_notifications, require_session, spinner};

pub async fn chat(config: &MemoConfig, message: Option<&str>) -> Result<()> {
    let session = require_session(config)?;
    let (queue, notifier) = notification_queue();
    let mut log = ChatLog::new(notifier);

    if let Some(message) = message {
        let replied = send(&session, &mut log, message).await;
        print_notifications(&queue);
        anyhow::ensure!(replied, "no reply from the assistant");
        return Ok(());
    }

    println!("Chatting with MemoGenius. Type /quit or press Ctrl-D to leave.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line == "/quit" {
            break;
        }
        if line.is_empty() {
            continue;
        }
        send(&session, &mut log, line).await;
        print_notifications(&queue);
    }

    tracing::debug!(messages = log.messages().len(), "chat ended");
    Ok(())
}

async fn send(session: &Session, log: &mut ChatLog, text: &str) -> bool {
    let pb = spinner("thinking...");
    let reply = log.send_message(session, text).await.map(|m| m.text.clone());
    pb.finish_and_clear();

    match reply {
        Some(text) => {
            println!("{text}");
            true
        }
        None => false,
    }
}
