//! Shutdown signal handling

use colored::Colorize;
use tokio::sync::mpsc;

/// Receives a message when the process is asked to stop (SIGINT/SIGTERM)
pub struct ShutdownSignal {
    receiver: mpsc::Receiver<&'static str>,
}

impl ShutdownSignal {
    /// Start listening for shutdown signals
    pub fn new() -> Result<Self, std::io::Error> {
        let (tx, rx) = mpsc::channel(4);

        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};

            let mut sigterm = signal(SignalKind::terminate())?;
            let tx_term = tx.clone();
            tokio::spawn(async move {
                sigterm.recv().await;
                let _ = tx_term.send("SIGTERM").await;
            });
        }

        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                let _ = tx.send("SIGINT").await;
            }
        });

        Ok(Self { receiver: rx })
    }

    /// Wait for the next shutdown request
    pub async fn recv(&mut self) -> Option<&'static str> {
        let name = self.receiver.recv().await?;
        eprintln!("{} Received {} (shutdown)", "↓".cyan(), name);
        Some(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn handler_installs() {
        assert!(ShutdownSignal::new().is_ok());
    }
}
