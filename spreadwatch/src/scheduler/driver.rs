use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use spreadwatch_core::{DataSource, Dataset, FetchError, Period, SessionSnapshot};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::{Instant, MissedTickBehavior};

use super::machine::{Action, Event, Scheduler};
use crate::core::fetch_with_timeout;

/// Requests sent from a `RefreshSession` to its driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Trigger,
    SetPeriod(Period),
}

pub struct DriverParams {
    pub source: Arc<dyn DataSource>,
    pub interval: Duration,
    pub fetch_timeout: Option<Duration>,
    pub period: Period,
}

struct Completion {
    request_id: u64,
    generation: u64,
    outcome: Result<Dataset, FetchError>,
}

fn new_timer(every: Duration) -> tokio::time::Interval {
    // First tick one full interval from now; the start fetch is issued separately.
    let mut timer = tokio::time::interval_at(Instant::now() + every, every);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}

/// Spawn the driver task owning the timer, the in-flight fetches and the
/// scheduler state. The first fetch is issued immediately.
///
/// Fetches live in a `JoinSet` owned by the driver future, so aborting the
/// driver (as dropping a session does) aborts them as well.
pub fn spawn_driver(
    params: DriverParams,
    mut stop_rx: oneshot::Receiver<()>,
    mut cmd_rx: mpsc::UnboundedReceiver<Command>,
    state_tx: watch::Sender<SessionSnapshot>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let DriverParams {
            source,
            interval,
            fetch_timeout,
            period,
        } = params;

        let mut machine = Scheduler::new(period);
        let mut timer = new_timer(interval);
        let mut in_flight: JoinSet<Completion> = JoinSet::new();
        let mut pending = Some(Event::Trigger);

        loop {
            let event = match pending.take() {
                Some(ev) => ev,
                None => tokio::select! {
                    biased;
                    _ = &mut stop_rx => Event::Shutdown,
                    cmd = cmd_rx.recv() => match cmd {
                        Some(Command::Trigger) => Event::Trigger,
                        Some(Command::SetPeriod(p)) => Event::SetPeriod(p),
                        None => Event::Shutdown,
                    },
                    Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => match joined {
                        Ok(done) => Event::Settled {
                            request_id: done.request_id,
                            generation: done.generation,
                            outcome: done.outcome,
                            at: Utc::now(),
                        },
                        Err(_e) => {
                            #[cfg(feature = "tracing")]
                            tracing::warn!(error = %_e, "fetch task did not complete");
                            continue;
                        }
                    },
                    _ = timer.tick() => Event::Tick,
                },
            };

            #[cfg(feature = "tracing")]
            let settled_id = match &event {
                Event::Settled { request_id, .. } => Some(*request_id),
                _ => None,
            };

            let (next, actions) = machine.handle(event);
            machine = next;

            #[cfg(feature = "tracing")]
            if let Some(request_id) = settled_id {
                match machine.last_disposition() {
                    Some(super::machine::Disposition::Applied) => {
                        if let Some(err) = &machine.snapshot().refresh.error {
                            tracing::warn!(request_id, error = %err, "fetch failed");
                        } else {
                            tracing::debug!(request_id, "fetch applied");
                        }
                    }
                    Some(d) => tracing::debug!(request_id, disposition = ?d, "discarding completion"),
                    None => {}
                }
            }

            for action in actions {
                match action {
                    Action::Issue {
                        request_id,
                        generation,
                        period,
                    } => {
                        #[cfg(feature = "tracing")]
                        tracing::debug!(request_id, generation, %period, source = source.name(), "issuing fetch");
                        let source = Arc::clone(&source);
                        in_flight.spawn(async move {
                            let outcome = fetch_with_timeout(source.as_ref(), period, fetch_timeout).await;
                            Completion {
                                request_id,
                                generation,
                                outcome,
                            }
                        });
                    }
                    Action::ResetTimer => timer.reset(),
                    Action::Publish(snapshot) => {
                        state_tx.send_replace(snapshot);
                    }
                    Action::AbortAll => in_flight.abort_all(),
                    Action::Terminate => {
                        #[cfg(feature = "tracing")]
                        tracing::info!("refresh session stopped");
                        return;
                    }
                }
            }
        }
    })
}
