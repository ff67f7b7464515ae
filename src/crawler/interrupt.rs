//! Interruption handling for a crawl run
//!
//! The handler owns a background task that listens for SIGINT/SIGTERM
//! (Ctrl-C outside Unix) and flips a watch flag. It never touches crawl
//! state; the engine checks the flag between steps and races it against
//! the in-flight fetch. Dropping the handler stops the listener.

use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Owned guard delivering an interruption request to the engine
#[derive(Debug)]
pub struct InterruptHandler {
    signal: watch::Receiver<bool>,
    listener: Option<JoinHandle<()>>,
}

/// Raises the interruption of a [`InterruptHandler::manual`] handler
#[derive(Debug, Clone)]
pub struct InterruptTrigger {
    sender: Arc<watch::Sender<bool>>,
}

impl InterruptTrigger {
    pub fn trigger(&self) {
        self.sender.send_replace(true);
    }
}

impl InterruptHandler {
    /// Starts listening for process signals
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Returns
    ///
    /// * `Ok(InterruptHandler)` - The listener task is running
    /// * `Err(std::io::Error)` - A signal stream could not be registered
    pub fn install() -> Result<Self, std::io::Error> {
        let (sender, signal) = watch::channel(false);

        #[cfg(unix)]
        let listener = {
            use tokio::signal::unix::{signal, SignalKind};

            let mut sigint = signal(SignalKind::interrupt())?;
            let mut sigterm = signal(SignalKind::terminate())?;
            tokio::spawn(async move {
                tokio::select! {
                    _ = sigint.recv() => tracing::warn!("Received SIGINT, saving progress"),
                    _ = sigterm.recv() => tracing::warn!("Received SIGTERM, saving progress"),
                }
                sender.send_replace(true);
            })
        };

        #[cfg(not(unix))]
        let listener = tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    tracing::warn!("Received Ctrl-C, saving progress");
                    sender.send_replace(true);
                }
                Err(e) => tracing::error!("Failed to listen for Ctrl-C: {}", e),
            }
        });

        tracing::debug!("Interrupt handler installed");
        Ok(Self {
            signal,
            listener: Some(listener),
        })
    }

    /// Creates a handler raised only through the returned trigger
    pub fn manual() -> (Self, InterruptTrigger) {
        let (sender, signal) = watch::channel(false);
        let handler = Self {
            signal,
            listener: None,
        };
        let trigger = InterruptTrigger {
            sender: Arc::new(sender),
        };
        (handler, trigger)
    }

    pub fn is_interrupted(&self) -> bool {
        *self.signal.borrow()
    }

    /// Resolves once an interruption has been requested
    ///
    /// Returns immediately if it already was. Never resolves if the signal
    /// source has gone away without firing.
    pub async fn interrupted(&mut self) {
        if self.signal.wait_for(|raised| *raised).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

impl Drop for InterruptHandler {
    fn drop(&mut self) {
        if let Some(listener) = self.listener.take() {
            listener.abort();
            tracing::debug!("Interrupt handler released");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_manual_trigger() {
        let (mut handler, trigger) = InterruptHandler::manual();
        assert!(!handler.is_interrupted());

        trigger.trigger();
        assert!(handler.is_interrupted());
        handler.interrupted().await;
    }

    #[tokio::test]
    async fn test_trigger_from_another_task() {
        let (mut handler, trigger) = InterruptHandler::manual();
        tokio::spawn(async move {
            tokio::task::yield_now().await;
            trigger.trigger();
        });

        tokio::time::timeout(Duration::from_secs(5), handler.interrupted())
            .await
            .unwrap();
        assert!(handler.is_interrupted());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_trigger_never_interrupts() {
        let (mut handler, trigger) = InterruptHandler::manual();
        drop(trigger);

        let waited = tokio::time::timeout(Duration::from_secs(60), handler.interrupted()).await;
        assert!(waited.is_err());
        assert!(!handler.is_interrupted());
    }

    #[tokio::test]
    async fn test_install_and_release() {
        let handler = InterruptHandler::install().unwrap();
        assert!(!handler.is_interrupted());
        drop(handler);
    }
}
