// SPDX-License-Identifier: GPL-3.0-only

//! Once-per-second heartbeat synchronized to the 30 second TOTP windows.
//!
//! Every tick re-reads the clock and compares it against the end of the
//! window seen at the last refresh, so a late wake-up delays a refresh by at
//! most the lateness of that single tick and never shifts the ones after it.

use std::{future::Future, sync::Arc, thread, time::Duration};

use smol::{
    Timer,
    channel::{self, Receiver, Sender},
    future,
};

use super::{
    clock::{Clock, SystemClock},
    hub::Hub,
};
use crate::app::utils::{millis_until_next_step, step_end_millis, time_step, unix_millis};

/// Delay between two ticks
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Codes are flagged as about to expire when this many milliseconds, or fewer, remain
pub const URGENCY_THRESHOLD_MS: u64 = 5_000;

/// What the ticker publishes every second
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickEvent {
    /// The current code expires within [`URGENCY_THRESHOLD_MS`]
    pub urgency: bool,
    /// A window boundary was crossed since the previous refresh, codes must be recomputed
    pub refresh_due: bool,
    /// Milliseconds until the next window boundary
    pub rest_ms: u64,
    /// Counter of the window this tick belongs to
    pub time_step: u64,
}

pub type TickHub = Hub<TickEvent>;

/// Decides, tick after tick, whether a window boundary has been crossed
#[derive(Debug, Clone)]
pub struct BoundaryTracker {
    current_step: u64,
}

impl BoundaryTracker {
    pub fn starting_at(now: Duration) -> Self {
        Self {
            current_step: time_step(now),
        }
    }

    /// Step of the last refresh (or of the start)
    pub fn current_step(&self) -> u64 {
        self.current_step
    }

    pub fn observe(&mut self, now: Duration) -> TickEvent {
        let rest_ms = millis_until_next_step(now);
        let refresh_due = unix_millis(now) >= step_end_millis(self.current_step);

        if refresh_due {
            self.current_step = time_step(now);
        }

        TickEvent {
            urgency: rest_ms <= URGENCY_THRESHOLD_MS,
            refresh_due,
            rest_ms,
            time_step: time_step(now),
        }
    }
}

/// How the ticker waits between two ticks
pub trait Pacer: Send {
    fn pause(&mut self, period: Duration) -> impl Future<Output = ()> + Send;
}

/// Sleeps on a [`smol::Timer`]
#[derive(Debug, Clone, Copy, Default)]
pub struct TimerPacer;

impl Pacer for TimerPacer {
    fn pause(&mut self, period: Duration) -> impl Future<Output = ()> + Send {
        async move {
            Timer::after(period).await;
        }
    }
}

/// Asks a running ticker to stop, the ticker also stops once this is dropped
#[derive(Debug)]
pub struct StopHandle(Sender<()>);

/// Listening side of a [`StopHandle`]
#[derive(Debug)]
pub struct StopSignal(Receiver<()>);

pub fn stop_pair() -> (StopHandle, StopSignal) {
    let (tx, rx) = channel::bounded(1);
    (StopHandle(tx), StopSignal(rx))
}

impl StopHandle {
    pub fn stop(&self) {
        self.0.close();
    }
}

impl StopSignal {
    pub fn is_stopped(&self) -> bool {
        self.0.is_closed()
    }

    /// Resolves once the paired [`StopHandle`] stopped or went away
    pub async fn stopped(&self) {
        // nothing is ever sent, recv only returns when the channel closes
        let _ = self.0.recv().await;
    }
}

pub struct Ticker<C = SystemClock, P = TimerPacer> {
    clock: C,
    pacer: P,
    hub: Arc<TickHub>,
}

impl Ticker {
    /// A ticker on the system clock, sleeping on real timers
    pub fn new(hub: Arc<TickHub>) -> Self {
        Self::with_parts(SystemClock, TimerPacer, hub)
    }
}

impl<C: Clock, P: Pacer> Ticker<C, P> {
    pub fn with_parts(clock: C, pacer: P, hub: Arc<TickHub>) -> Self {
        Self { clock, pacer, hub }
    }

    /// Publishes a [`TickEvent`] every [`TICK_INTERVAL`] until `stop` fires
    pub async fn run(self, stop: StopSignal) {
        let Self {
            clock,
            mut pacer,
            hub,
        } = self;

        let mut tracker = BoundaryTracker::starting_at(clock.now());
        log::info!("ticker started at step {}", tracker.current_step());

        while !stop.is_stopped() {
            let event = tracker.observe(clock.now());
            log::trace!("tick {event:?}");
            hub.publish(event);

            let stopped = future::or(
                async {
                    stop.stopped().await;
                    true
                },
                async {
                    pacer.pause(TICK_INTERVAL).await;
                    false
                },
            )
            .await;

            if stopped {
                break;
            }
        }

        log::info!("ticker stopped");
    }

    /// Runs the ticker on its own thread
    pub fn spawn(self) -> std::io::Result<TickerHandle>
    where
        C: 'static,
        P: 'static,
    {
        let (stop, signal) = stop_pair();
        let thread = thread::Builder::new()
            .name("ticker".to_string())
            .spawn(move || smol::block_on(self.run(signal)))?;

        Ok(TickerHandle {
            stop,
            thread: Some(thread),
        })
    }
}

/// Owner of a spawned ticker thread
///
/// Dropping the handle stops the ticker and waits for its thread, which is
/// how the app tears it down.
pub struct TickerHandle {
    stop: StopHandle,
    thread: Option<thread::JoinHandle<()>>,
}

impl TickerHandle {
    /// Stops the ticker and waits for its thread to finish
    pub fn shutdown(mut self) {
        self.stop_and_join();
    }

    fn stop_and_join(&mut self) {
        self.stop.stop();

        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::error!("ticker thread panicked");
            }
        }
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.stop_and_join();
    }
}
