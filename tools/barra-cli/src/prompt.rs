use barra_client::Confirm;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

/// Confirmation for destructive commands.
#[derive(Debug, Clone, Copy)]
pub enum CliConfirm {
    /// `--yes` was passed.
    Assume,
    /// Ask on the terminal.
    Ask,
}

impl Confirm for CliConfirm {
    async fn confirm(&self, prompt: &str) -> bool {
        match self {
            CliConfirm::Assume => true,
            CliConfirm::Ask => ask(prompt).await.unwrap_or_else(|err| {
                tracing::warn!(%err, "could not read confirmation");
                false
            }),
        }
    }
}

async fn ask(prompt: &str) -> std::io::Result<bool> {
    let mut stderr = tokio::io::stderr();
    stderr.write_all(format!("{prompt} [y/N] ").as_bytes()).await?;
    stderr.flush().await?;

    let mut line = String::new();
    BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
    Ok(is_yes(&line))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes" | "s" | "si" | "sí")
}
