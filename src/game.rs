use rand::rngs::ThreadRng;
use std::time::Duration;

use crate::clock::{Clock, SystemClock};
use crate::delay::{DelaySource, RandomDelay};
use crate::error::GameError;
use crate::presenter::Presenter;
use crate::rating::Rating;
use crate::stats::{Session, StatsSnapshot};
use crate::timer::{TimerId, TimerKind, TimerSlot};

/// How long a result or false start stays on screen before returning to idle
pub const DWELL: Duration = Duration::from_millis(2000);

pub const FALSE_START_MESSAGE: &str = "False Start! Wait for the visual change before clicking.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, strum_macros::Display)]
pub enum GameState {
    #[default]
    Idle,
    Waiting,
    Ready,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrialOutcome {
    FalseStart,
    Reaction { time_ms: f64, rating: Rating },
}

/// Transient bookkeeping for the round in flight
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PendingTrial {
    pub scheduled_ready_at: Option<Duration>,
    pub ready_start_time: Option<Duration>,
    pub pending_timer: Option<TimerId>,
    pub outcome: Option<TrialOutcome>,
}

/// Reaction game core: owns the state, the single timer and the session.
///
/// Every trigger takes the presenter to notify, so the host can keep the
/// machine and its renderer as separate values.
#[derive(Debug)]
pub struct GameStateMachine<C: Clock = SystemClock, D: DelaySource = RandomDelay<ThreadRng>> {
    state: GameState,
    session: Session,
    trial: Option<PendingTrial>,
    timers: TimerSlot,
    clock: C,
    delay: D,
}

impl GameStateMachine {
    pub fn new() -> Self {
        Self::with_sources(SystemClock::new(), RandomDelay::default())
    }
}

impl Default for GameStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock, D: DelaySource> GameStateMachine<C, D> {
    pub fn with_sources(clock: C, delay: D) -> Self {
        Self {
            state: GameState::Idle,
            session: Session::new(),
            trial: None,
            timers: TimerSlot::new(),
            clock,
            delay,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn trial(&self) -> Option<&PendingTrial> {
        self.trial.as_ref()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Deadline of the outstanding timer, if any
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.armed().map(|t| t.deadline)
    }

    pub fn current_stats(&self) -> StatsSnapshot {
        self.session.snapshot()
    }

    /// Begins a round. Ignored unless idle.
    pub fn request_start<P: Presenter + ?Sized>(&mut self, sink: &mut P) {
        if self.state != GameState::Idle {
            log::debug!("start ignored in {} state", self.state);
            return;
        }
        self.begin_trial(sink);
    }

    /// The single click target: starts, false-starts or reacts depending on
    /// the current state. Does nothing while a round is being shown.
    pub fn handle_activation<P: Presenter + ?Sized>(&mut self, sink: &mut P) {
        match self.state {
            GameState::Idle => self.begin_trial(sink),
            GameState::Waiting => self.false_start(sink),
            GameState::Ready => self.react(sink),
            GameState::Complete => log::debug!("activation ignored while complete"),
        }
    }

    /// Clears the session. Only allowed while idle.
    pub fn request_reset<P: Presenter + ?Sized>(&mut self, sink: &mut P) -> Result<(), GameError> {
        if self.state != GameState::Idle {
            let err = GameError::ResetWhileActive { state: self.state };
            log::warn!("{err}");
            sink.stats_clear_rejected(err.user_message());
            return Err(err);
        }

        self.session.clear();
        log::info!("session statistics cleared");
        sink.stats_updated(&self.current_stats());
        Ok(())
    }

    /// Fires the outstanding timer if it is due. Returns true when a
    /// transition happened.
    pub fn poll<P: Presenter + ?Sized>(&mut self, sink: &mut P) -> bool {
        let now = self.clock.now();
        let Some(timer) = self.timers.take_due(now) else {
            return false;
        };

        let Some(trial) = self.trial.as_mut() else {
            log::warn!("timer {:?} fired with no trial in flight", timer.id);
            return false;
        };
        if trial.pending_timer != Some(timer.id) {
            log::warn!("ignoring stale timer {:?}", timer.id);
            return false;
        }
        trial.pending_timer = None;

        match (timer.kind, self.state) {
            (TimerKind::BecomeReady, GameState::Waiting) => {
                trial.scheduled_ready_at = None;
                trial.ready_start_time = Some(now);
                self.state = GameState::Ready;
                log::debug!("ready at {:?}", now);
                sink.entering_ready();
                true
            }
            (TimerKind::ReturnToIdle, GameState::Complete) => {
                self.trial = None;
                self.state = GameState::Idle;
                log::debug!("back to idle");
                sink.entering_idle();
                true
            }
            (kind, state) => {
                log::warn!("{kind:?} timer fired in {state} state");
                false
            }
        }
    }

    fn begin_trial<P: Presenter + ?Sized>(&mut self, sink: &mut P) {
        let now = self.clock.now();
        let deadline = now + self.delay.next_delay();
        let timer = self.timers.arm(TimerKind::BecomeReady, deadline);

        self.trial = Some(PendingTrial {
            scheduled_ready_at: Some(deadline),
            pending_timer: Some(timer),
            ..PendingTrial::default()
        });
        self.state = GameState::Waiting;
        log::debug!("waiting, ready in {:?}", deadline.saturating_sub(now));
        sink.entering_waiting();
    }

    fn false_start<P: Presenter + ?Sized>(&mut self, sink: &mut P) {
        let now = self.clock.now();
        self.timers.cancel();

        let trial = self.trial.get_or_insert_with(PendingTrial::default);
        trial.pending_timer = None;
        trial.scheduled_ready_at = None;
        trial.outcome = Some(TrialOutcome::FalseStart);
        self.state = GameState::Complete;

        log::info!("false start");
        sink.false_start(FALSE_START_MESSAGE);
        self.arm_dwell(now);
    }

    fn react<P: Presenter + ?Sized>(&mut self, sink: &mut P) {
        let now = self.clock.now();
        let Some(started) = self.trial.as_ref().and_then(|t| t.ready_start_time) else {
            log::warn!("reaction in ready state without a start time");
            return;
        };

        let time_ms = now.saturating_sub(started).as_secs_f64() * 1000.0;
        let rating = Rating::classify(time_ms);
        self.session.record(time_ms);

        if let Some(trial) = self.trial.as_mut() {
            trial.outcome = Some(TrialOutcome::Reaction { time_ms, rating });
        }
        self.state = GameState::Complete;

        log::info!("reaction {time_ms:.1} ms ({rating})");
        sink.stats_updated(&self.current_stats());
        sink.result(time_ms, rating);
        self.arm_dwell(now);
    }

    fn arm_dwell(&mut self, now: Duration) {
        let timer = self.timers.arm(TimerKind::ReturnToIdle, now + DWELL);
        if let Some(trial) = self.trial.as_mut() {
            trial.pending_timer = Some(timer);
        }
    }
}
