//! Countdown ticker: renders the remaining time once per tick and
//! reschedules itself until it expires, goes idle or is cancelled.

use std::{sync::Arc, time::Duration};
use tokio::{
    sync::{watch, Notify},
    task::JoinHandle,
    time::sleep,
};
use tracing::{debug, info, warn};

use crate::{
    config::CountdownConfig,
    display::{format_remaining, DisplaySurface, Frame},
    state::{ExpiryEvent, TickerOutcome, TickerState},
};

/// What the ticker wants to happen after a tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickStep {
    /// Tick again after the given delay
    Wait(Duration),
    /// No further ticks
    Done(TickerOutcome),
}

/// Countdown state machine bound to a display surface
pub struct Ticker<S> {
    config: CountdownConfig,
    surface: S,
    state: TickerState,
    outcome: Option<TickerOutcome>,
    frames_rendered: u64,
}

impl<S: DisplaySurface> Ticker<S> {
    /// Create a ticker positioned at the configured starting time
    pub fn new(config: CountdownConfig, surface: S) -> Self {
        let state = TickerState::running(config.initial_remaining);
        Self {
            config,
            surface,
            state,
            outcome: None,
            frames_rendered: 0,
        }
    }

    pub fn config(&self) -> &CountdownConfig {
        &self.config
    }

    pub fn state(&self) -> &TickerState {
        &self.state
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Run a single tick.
    ///
    /// A non-negative remaining time is rendered and, when ticking is active,
    /// advanced by one step. A negative remaining time expires the ticker.
    /// Ticking a finished ticker returns its outcome again without rendering.
    pub fn tick(&mut self) -> TickStep {
        if let Some(outcome) = &self.outcome {
            return TickStep::Done(outcome.clone());
        }

        let remaining = match self.state {
            TickerState::Running { remaining } => remaining,
            _ => return TickStep::Done(self.finish(TickerOutcome::Idle)),
        };

        let secs = match u64::try_from(remaining) {
            Ok(secs) => secs,
            Err(_) => {
                info!("Countdown expired after {} frames", self.frames_rendered);
                let event = ExpiryEvent::new(
                    &self.config.finish_message,
                    &self.config.redirect_target,
                    self.frames_rendered,
                );
                return TickStep::Done(self.finish(TickerOutcome::Expired(event)));
            }
        };

        let content = format_remaining(secs, &self.config.display_format, self.config.zero_pad);
        debug!("Rendering {}s remaining", remaining);
        if let Err(e) = self.surface.render(&Frame::new(remaining, content)) {
            warn!("Failed to render countdown frame: {}", e);
        }
        self.frames_rendered += 1;

        match self.config.tick_period() {
            Some(period) => {
                self.state = TickerState::running(remaining.saturating_add(self.config.step));
                TickStep::Wait(period)
            }
            None => {
                info!("Countdown inactive, not rescheduling");
                TickStep::Done(self.finish(TickerOutcome::Idle))
            }
        }
    }

    /// Stop the ticker from outside. Has no effect once it has finished.
    pub fn cancel(&mut self) -> TickerOutcome {
        match &self.outcome {
            Some(outcome) => outcome.clone(),
            None => self.finish(TickerOutcome::Cancelled),
        }
    }

    fn finish(&mut self, outcome: TickerOutcome) -> TickerOutcome {
        if let Err(e) = self.surface.finish() {
            warn!("Failed to finish countdown surface: {}", e);
        }
        self.state = outcome.state();
        self.outcome = Some(outcome.clone());
        outcome
    }
}

impl<S: DisplaySurface + 'static> Ticker<S> {
    /// Start ticking on the tokio runtime
    pub fn spawn(self) -> TickerHandle {
        let cancel = Arc::new(Notify::new());
        let (state_tx, state_rx) = watch::channel(self.state.clone());
        let task = tokio::spawn(self.run(Arc::clone(&cancel), state_tx));

        TickerHandle {
            task,
            canceller: Canceller(cancel),
            state_rx,
        }
    }

    async fn run(mut self, cancel: Arc<Notify>, state_tx: watch::Sender<TickerState>) -> TickerOutcome {
        info!(
            "Starting countdown at {}s (step {}, active {})",
            self.config.initial_remaining, self.config.step, self.config.active
        );

        loop {
            let step = self.tick();
            state_tx.send_replace(self.state.clone());

            match step {
                TickStep::Wait(period) => {
                    tokio::select! {
                        _ = sleep(period) => {}
                        _ = cancel.notified() => {
                            info!("Countdown cancelled after {} frames", self.frames_rendered);
                            let outcome = self.cancel();
                            state_tx.send_replace(self.state.clone());
                            return outcome;
                        }
                    }
                }
                TickStep::Done(outcome) => return outcome,
            }
        }
    }
}

/// Cloneable stop switch for a running ticker
#[derive(Debug, Clone)]
pub struct Canceller(Arc<Notify>);

impl Canceller {
    /// Request the ticker to stop before its next tick
    pub fn cancel(&self) {
        self.0.notify_one();
    }
}

/// Owner's view of a spawned ticker
#[derive(Debug)]
pub struct TickerHandle {
    task: JoinHandle<TickerOutcome>,
    canceller: Canceller,
    state_rx: watch::Receiver<TickerState>,
}

impl TickerHandle {
    pub fn canceller(&self) -> Canceller {
        self.canceller.clone()
    }

    pub fn cancel(&self) {
        self.canceller.cancel();
    }

    /// Watch the ticker state as it changes
    pub fn state(&self) -> watch::Receiver<TickerState> {
        self.state_rx.clone()
    }

    /// Wait for the terminal outcome
    pub async fn finished(self) -> Result<TickerOutcome, String> {
        self.task
            .await
            .map_err(|e| format!("Countdown task failed: {}", e))
    }
}
