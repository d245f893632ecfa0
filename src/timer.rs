use std::time::Duration;

/// Opaque handle identifying one armed timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// What happens when a timer fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Waiting -> Ready
    BecomeReady,
    /// Complete -> Idle, after the dwell period
    ReturnToIdle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    pub id: TimerId,
    pub kind: TimerKind,
    pub deadline: Duration,
}

/// Holds at most one outstanding timer.
///
/// Arming replaces (and thereby cancels) whatever was armed before, so two
/// timers can never be live at the same time.
#[derive(Debug, Default)]
pub struct TimerSlot {
    next_id: u64,
    armed: Option<Timer>,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self, kind: TimerKind, deadline: Duration) -> TimerId {
        if let Some(stale) = self.armed.take() {
            log::warn!("superseding armed {:?} timer {:?}", stale.kind, stale.id);
        }
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.armed = Some(Timer { id, kind, deadline });
        id
    }

    pub fn cancel(&mut self) -> Option<Timer> {
        self.armed.take()
    }

    /// Removes and returns the armed timer if its deadline has passed
    pub fn take_due(&mut self, now: Duration) -> Option<Timer> {
        match self.armed {
            Some(timer) if timer.deadline <= now => self.armed.take(),
            _ => None,
        }
    }

    pub fn armed(&self) -> Option<&Timer> {
        self.armed.as_ref()
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_due_respects_deadline() {
        let mut slot = TimerSlot::new();
        let id = slot.arm(TimerKind::BecomeReady, Duration::from_millis(100));

        assert!(slot.take_due(Duration::from_millis(99)).is_none());
        let fired = slot.take_due(Duration::from_millis(100)).unwrap();
        assert_eq!(fired.id, id);
        assert_eq!(fired.kind, TimerKind::BecomeReady);
        assert!(!slot.is_armed());
    }

    #[test]
    fn cancel_prevents_firing() {
        let mut slot = TimerSlot::new();
        slot.arm(TimerKind::BecomeReady, Duration::from_millis(10));
        assert!(slot.cancel().is_some());
        assert!(slot.take_due(Duration::from_secs(60)).is_none());
    }

    #[test]
    fn arming_replaces_previous_timer() {
        let mut slot = TimerSlot::new();
        let first = slot.arm(TimerKind::BecomeReady, Duration::from_millis(10));
        let second = slot.arm(TimerKind::ReturnToIdle, Duration::from_millis(50));

        assert_ne!(first, second);
        assert!(slot.take_due(Duration::from_millis(20)).is_none());
        let fired = slot.take_due(Duration::from_millis(50)).unwrap();
        assert_eq!(fired.id, second);
        assert_eq!(fired.kind, TimerKind::ReturnToIdle);
    }

    #[test]
    fn ids_are_unique_across_cancellations() {
        let mut slot = TimerSlot::new();
        let a = slot.arm(TimerKind::BecomeReady, Duration::ZERO);
        slot.cancel();
        let b = slot.arm(TimerKind::BecomeReady, Duration::ZERO);
        assert_ne!(a, b);
    }
}
