//! Lifecycle supervision for the auxiliary listener task.
//!
//! # Design
//! - The supervisor owns the task handle exclusively and binds its lifetime
//!   to the service: start at boot (when configured), cancel and await at
//!   shutdown.
//! - Shutdown awaits the task rather than merely signalling it; a
//!   cancellation acknowledgment counts as a clean exit.

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::listener::Listener;
use crate::transport::BotTransport;

/// Observable lifecycle of the supervised listener task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorState {
    /// No task was ever started; the service runs without a listener.
    NotStarted,
    /// The listener task is running.
    Running,
    /// Cancellation has been requested; the task is being awaited.
    Stopping,
    /// The task has exited.
    Stopped,
}

/// Owns the auxiliary listener task for the lifetime of the service.
#[derive(Debug)]
pub struct ListenerSupervisor {
    state: SupervisorState,
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl ListenerSupervisor {
    /// Construct an idle supervisor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: SupervisorState::NotStarted,
            cancel: CancellationToken::new(),
            handle: None,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> SupervisorState {
        self.state
    }

    /// Spawn the listener loop onto the runtime.
    ///
    /// Only the first call has an effect; the listener runs until [`stop`]
    /// cancels it.
    ///
    /// [`stop`]: Self::stop
    pub fn start<T>(&mut self, listener: Listener<T>)
    where
        T: BotTransport + 'static,
    {
        if self.state != SupervisorState::NotStarted {
            warn!(state = ?self.state, "listener supervisor already started");
            return;
        }
        let cancel = self.cancel.clone();
        self.handle = Some(tokio::spawn(listener.run(cancel)));
        self.state = SupervisorState::Running;
        info!("auxiliary listener task running");
    }

    /// Cancel the listener and wait for it to exit.
    ///
    /// Returns only once the task has fully stopped; the supervisor never
    /// leaves a task running after the service shutdown sequence. Calling
    /// this on a supervisor that never started is a no-op.
    pub async fn stop(&mut self) {
        match self.state {
            SupervisorState::NotStarted | SupervisorState::Stopped => return,
            SupervisorState::Running | SupervisorState::Stopping => {}
        }

        self.state = SupervisorState::Stopping;
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            match handle.await {
                Ok(()) => info!("auxiliary listener exited cleanly"),
                Err(err) if err.is_cancelled() => {
                    info!("auxiliary listener acknowledged cancellation");
                }
                Err(err) => warn!(error = %err, "auxiliary listener join failed"),
            }
        }
        self.state = SupervisorState::Stopped;
    }
}

impl Default for ListenerSupervisor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allow::AllowList;
    use crate::listener::tests::ScriptedTransport;
    use anyhow::Result;
    use std::sync::Arc;
    use std::sync::atomic::Ordering;
    use tokio::time::{Duration, timeout};

    fn idle_listener() -> (Listener<ScriptedTransport>, Arc<std::sync::atomic::AtomicBool>) {
        let transport = ScriptedTransport::new(Vec::new());
        let disconnected = Arc::clone(&transport.disconnected);
        (
            Listener::new(transport, AllowList::default(), "https://app.example.com"),
            disconnected,
        )
    }

    #[tokio::test]
    async fn stop_awaits_the_running_task() -> Result<()> {
        let (listener, disconnected) = idle_listener();
        let mut supervisor = ListenerSupervisor::new();
        assert_eq!(supervisor.state(), SupervisorState::NotStarted);

        supervisor.start(listener);
        assert_eq!(supervisor.state(), SupervisorState::Running);

        timeout(Duration::from_secs(5), supervisor.stop()).await?;
        assert_eq!(supervisor.state(), SupervisorState::Stopped);
        assert!(
            disconnected.load(Ordering::SeqCst),
            "task must release its connection before the supervisor reports stopped"
        );
        Ok(())
    }

    #[tokio::test]
    async fn stop_without_start_is_a_no_op() {
        let mut supervisor = ListenerSupervisor::new();
        supervisor.stop().await;
        assert_eq!(supervisor.state(), SupervisorState::NotStarted);
    }

    #[tokio::test]
    async fn repeated_stop_is_safe() -> Result<()> {
        let (listener, _) = idle_listener();
        let mut supervisor = ListenerSupervisor::new();
        supervisor.start(listener);

        timeout(Duration::from_secs(5), supervisor.stop()).await?;
        timeout(Duration::from_secs(5), supervisor.stop()).await?;
        assert_eq!(supervisor.state(), SupervisorState::Stopped);
        Ok(())
    }

    #[tokio::test]
    async fn second_start_is_ignored() -> Result<()> {
        let (first, _) = idle_listener();
        let (second, second_disconnected) = idle_listener();
        let mut supervisor = ListenerSupervisor::new();

        supervisor.start(first);
        supervisor.start(second);
        assert_eq!(supervisor.state(), SupervisorState::Running);

        timeout(Duration::from_secs(5), supervisor.stop()).await?;
        assert!(
            !second_disconnected.load(Ordering::SeqCst),
            "ignored listener must never have run"
        );
        Ok(())
    }
}
