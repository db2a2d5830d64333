//! Terminal implementation of the controller's user prompt.

use std::io::Write as _;

use async_trait::async_trait;
use client_core::UserPrompt;
use tokio::{
    io::{AsyncBufReadExt, BufReader, Lines, Stdin},
    sync::Mutex,
};
use tracing::warn;

pub struct TerminalPrompt {
    assume_yes: bool,
    input: Mutex<Lines<BufReader<Stdin>>>,
}

impl TerminalPrompt {
    pub fn new(assume_yes: bool) -> Self {
        Self {
            assume_yes,
            input: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
        }
    }

    /// `None` at end of input.
    pub async fn read_line(&self, prompt: &str) -> std::io::Result<Option<String>> {
        print!("{prompt}");
        std::io::stdout().flush()?;
        self.input.lock().await.next_line().await
    }
}

pub fn is_affirmative(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "s" | "sim"
    )
}

#[async_trait]
impl UserPrompt for TerminalPrompt {
    async fn notify(&self, message: &str) {
        println!("{message}");
    }

    async fn confirm(&self, question: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        match self.read_line(&format!("{question} [s/N] ")).await {
            Ok(Some(answer)) => is_affirmative(&answer),
            Ok(None) => false,
            Err(err) => {
                warn!(%err, "failed to read confirmation; treating as declined");
                false
            }
        }
    }
}
