//! Terminal confirmation prompt

use async_trait::async_trait;
use delta_importer::source::Confirm;
use std::io::{self, BufRead, Write};

/// Asks on stderr and reads the answer from stdin
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalConfirm;

/// Whether a typed answer means yes
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[async_trait]
impl Confirm for TerminalConfirm {
    async fn confirm(&self, title: &str, message: &str) -> bool {
        let prompt = format!("{title}\n{message}\nImport? [y/N] ");

        let answer = tokio::task::spawn_blocking(move || -> io::Result<String> {
            let mut stderr = io::stderr();
            stderr.write_all(prompt.as_bytes())?;
            stderr.flush()?;

            let mut line = String::new();
            io::stdin().lock().read_line(&mut line)?;
            Ok(line)
        })
        .await;

        match answer {
            Ok(Ok(line)) => is_yes(&line),
            Ok(Err(e)) => {
                tracing::warn!("Could not read confirmation: {}", e);
                false
            }
            Err(e) => {
                tracing::warn!("Confirmation prompt aborted: {}", e);
                false
            }
        }
    }
}
