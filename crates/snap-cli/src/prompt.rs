//! Terminal stand-ins for the confirmation dialog.

use std::io::{BufRead, Write};

use anyhow::Context;
use async_trait::async_trait;
use snap_client::{Confirm, ConfirmPrompt};

/// Asks on stderr and reads `y`/`N` from stdin.
pub struct StdinConfirm;

#[async_trait]
impl Confirm for StdinConfirm {
    async fn confirm(&self, prompt: &ConfirmPrompt) -> bool {
        let question = format!("{}: {} [{}? y/N] ", prompt.title, prompt.message, prompt.action);
        let answer = tokio::task::spawn_blocking(move || read_line(&question)).await;
        match answer {
            Ok(Ok(line)) => is_yes(&line),
            Ok(Err(error)) => {
                tracing::warn!(%error, "failed to read confirmation");
                false
            }
            Err(error) => {
                tracing::warn!(%error, "confirmation task failed");
                false
            }
        }
    }
}

/// Accepts every prompt (`--yes`).
pub struct AutoConfirm;

#[async_trait]
impl Confirm for AutoConfirm {
    async fn confirm(&self, _prompt: &ConfirmPrompt) -> bool {
        true
    }
}

/// Use the provided password or read one line from stdin.
pub async fn password_or_stdin(password: Option<&str>) -> anyhow::Result<String> {
    if let Some(password) = password {
        return Ok(password.to_string());
    }
    let line = tokio::task::spawn_blocking(|| read_line("Password: "))
        .await
        .context("password prompt task failed")??;
    Ok(line)
}

fn read_line(question: &str) -> anyhow::Result<String> {
    let mut stderr = std::io::stderr();
    write!(stderr, "{question}")?;
    stderr.flush()?;

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
