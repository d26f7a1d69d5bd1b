use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::clock::{Clock, SystemClock};

pub const MSG_STARTED: &str = "Stopwatch Started!";
pub const MSG_ALREADY_RUNNING: &str = "Stopwatch is already running.";
pub const MSG_STOPPED: &str = "Stopwatch Stopped!";
pub const MSG_NOT_RUNNING: &str = "Stopwatch is not running.";
pub const MSG_RESET: &str = "Stopwatch Reset!";

/// The two states of the stopwatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Idle,
    Running,
}

/// Broadcast channel a notification is emitted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Started,
    Stopped,
    Reset,
}

/// Handle returned by [`Stopwatch::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObserverId(u64);

type Observer = Box<dyn FnMut(&str)>;

#[derive(Default)]
struct Observers {
    started: Vec<(ObserverId, Observer)>,
    stopped: Vec<(ObserverId, Observer)>,
    reset: Vec<(ObserverId, Observer)>,
}

impl Observers {
    fn slot_mut(&mut self, channel: Channel) -> &mut Vec<(ObserverId, Observer)> {
        match channel {
            Channel::Started => &mut self.started,
            Channel::Stopped => &mut self.stopped,
            Channel::Reset => &mut self.reset,
        }
    }
}

/// Elapsed-time tracker with start/stop/reset and per-channel observers.
///
/// While running, elapsed time is derived from `now - started_at`, where
/// `started_at` is shifted back by whatever had already accumulated. Pausing
/// and resuming therefore never drifts with the caller's refresh rate.
pub struct Stopwatch<C: Clock = SystemClock> {
    clock: C,
    elapsed: Duration,
    running: bool,
    started_at: Option<Instant>,
    observers: Observers,
    next_id: u64,
}

impl Stopwatch<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<C: Clock> Stopwatch<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            elapsed: Duration::ZERO,
            running: false,
            started_at: None,
            observers: Observers::default(),
            next_id: 0,
        }
    }

    /// Register an observer on one channel. Observers run synchronously, in
    /// registration order, and only see messages emitted after they subscribe.
    pub fn subscribe<F>(&mut self, channel: Channel, observer: F) -> ObserverId
    where
        F: FnMut(&str) + 'static,
    {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.observers
            .slot_mut(channel)
            .push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns `false` if the id was not registered.
    #[allow(dead_code)]
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        for channel in [Channel::Started, Channel::Stopped, Channel::Reset] {
            let slot = self.observers.slot_mut(channel);
            if let Some(pos) = slot.iter().position(|(oid, _)| *oid == id) {
                slot.remove(pos);
                return true;
            }
        }
        false
    }

    pub fn start(&mut self) {
        if self.running {
            self.notify(Channel::Started, MSG_ALREADY_RUNNING);
            return;
        }

        let now = self.clock.now();
        // `elapsed` was itself measured from an earlier instant of this clock,
        // so the subtraction cannot reach before the clock's origin.
        self.started_at = Some(now.checked_sub(self.elapsed).unwrap_or(now));
        self.running = true;
        self.notify(Channel::Started, MSG_STARTED);
    }

    pub fn stop(&mut self) {
        if !self.running {
            self.notify(Channel::Stopped, MSG_NOT_RUNNING);
            return;
        }

        self.refresh();
        self.running = false;
        self.started_at = None;
        self.notify(Channel::Stopped, MSG_STOPPED);
    }

    /// Zero the stopwatch and return to idle, whatever the current state.
    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
        self.running = false;
        self.started_at = None;
        self.notify(Channel::Reset, MSG_RESET);
    }

    /// Refresh `elapsed` from the clock while running. Never notifies.
    pub fn tick(&mut self) {
        if self.running {
            self.refresh();
            trace!(elapsed_ms = self.elapsed.as_millis() as u64, "tick");
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn state(&self) -> State {
        if self.running {
            State::Running
        } else {
            State::Idle
        }
    }

    fn refresh(&mut self) {
        if let Some(started_at) = self.started_at {
            let now = self.clock.now();
            // Never let a stale read shrink the accumulated time.
            self.elapsed = self.elapsed.max(now.saturating_duration_since(started_at));
        }
    }

    fn notify(&mut self, channel: Channel, message: &str) {
        debug!(?channel, message, "stopwatch notification");
        for (_, observer) in self.observers.slot_mut(channel).iter_mut() {
            observer(message);
        }
    }
}

impl Default for Stopwatch<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}
