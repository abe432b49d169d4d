use spreadwatch_core::{Error, Period, SessionSnapshot, TaskHandle};
use tokio::sync::{mpsc, watch};

use crate::scheduler::driver::Command;
use crate::view::View;

/// Handle to a running refresh session.
///
/// The session owns its driver task: dropping the handle stops the timer and
/// abandons in-flight fetches, exactly like [`RefreshSession::stop`] minus the wait.
#[derive(Debug)]
pub struct RefreshSession {
    cmd_tx: mpsc::UnboundedSender<Command>,
    state_rx: watch::Receiver<SessionSnapshot>,
    handle: Option<TaskHandle>,
}

impl RefreshSession {
    pub(crate) const fn new(
        cmd_tx: mpsc::UnboundedSender<Command>,
        state_rx: watch::Receiver<SessionSnapshot>,
        handle: TaskHandle,
    ) -> Self {
        Self {
            cmd_tx,
            state_rx,
            handle: Some(handle),
        }
    }

    fn send(&self, cmd: Command) -> Result<(), Error> {
        if self.handle.is_none() {
            return Err(Error::Stopped);
        }
        self.cmd_tx.send(cmd).map_err(|_| Error::Stopped)
    }

    /// Fetch now, out of band. The recurring cadence is left untouched.
    ///
    /// # Errors
    /// Returns `Stopped` once the session has shut down.
    pub fn trigger(&self) -> Result<(), Error> {
        self.send(Command::Trigger)
    }

    /// Switch to `period`: results of requests issued under the previous period
    /// are discarded, the cadence restarts and a fetch is issued immediately.
    /// Setting the period already in effect does nothing.
    ///
    /// # Errors
    /// Returns `Stopped` once the session has shut down.
    pub fn set_period(&self, period: Period) -> Result<(), Error> {
        self.send(Command::SetPeriod(period))
    }

    /// Latest published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.state_rx.borrow().clone()
    }

    /// Presentation view of the latest snapshot.
    #[must_use]
    pub fn view(&self) -> View {
        View::from_snapshot(&self.state_rx.borrow())
    }

    /// A receiver notified on every published snapshot.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state_rx.clone()
    }

    /// Wait until a published snapshot satisfies `pred` and return it.
    ///
    /// # Errors
    /// Returns `Stopped` if the session shuts down first.
    pub async fn wait_for<F>(&self, pred: F) -> Result<SessionSnapshot, Error>
    where
        F: FnMut(&SessionSnapshot) -> bool,
    {
        let mut rx = self.state_rx.clone();
        let snap = rx.wait_for(pred).await.map_err(|_| Error::Stopped)?;
        Ok(snap.clone())
    }

    /// Whether `stop` was called or the driver has exited.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.handle.as_ref().is_none_or(TaskHandle::is_finished)
    }

    /// Cancel the timer, abandon in-flight fetches and wait for the driver to exit.
    ///
    /// Calling `stop` again is a no-op; later commands return `Stopped`.
    pub async fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.stop().await;
        }
    }
}
