use crate::rating::Rating;
use crate::stats::StatsSnapshot;

/// Notification sink the state machine reports to.
///
/// Implementors only observe; they never call back into the machine.
pub trait Presenter {
    fn entering_waiting(&mut self);
    fn entering_ready(&mut self);
    fn false_start(&mut self, message: &str);
    fn result(&mut self, time_ms: f64, rating: Rating);
    fn entering_idle(&mut self);
    fn stats_updated(&mut self, stats: &StatsSnapshot);
    fn stats_clear_rejected(&mut self, message: &str);
}

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    EnteringWaiting,
    EnteringReady,
    FalseStart { message: String },
    Result { time_ms: f64, rating: Rating },
    EnteringIdle,
    StatsUpdated(StatsSnapshot),
    StatsClearRejected { message: String },
}

/// Presenter that records every notification in order
#[derive(Debug, Default)]
pub struct EventLog {
    pub events: Vec<GameEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&GameEvent> {
        self.events.last()
    }

    /// Returns and forgets everything recorded so far
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Presenter for EventLog {
    fn entering_waiting(&mut self) {
        self.events.push(GameEvent::EnteringWaiting);
    }

    fn entering_ready(&mut self) {
        self.events.push(GameEvent::EnteringReady);
    }

    fn false_start(&mut self, message: &str) {
        self.events.push(GameEvent::FalseStart {
            message: message.to_string(),
        });
    }

    fn result(&mut self, time_ms: f64, rating: Rating) {
        self.events.push(GameEvent::Result { time_ms, rating });
    }

    fn entering_idle(&mut self) {
        self.events.push(GameEvent::EnteringIdle);
    }

    fn stats_updated(&mut self, stats: &StatsSnapshot) {
        self.events.push(GameEvent::StatsUpdated(*stats));
    }

    fn stats_clear_rejected(&mut self, message: &str) {
        self.events.push(GameEvent::StatsClearRejected {
            message: message.to_string(),
        });
    }
}
