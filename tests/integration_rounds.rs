use assert_matches::assert_matches;
use flinch::clock::ManualClock;
use flinch::delay::FixedDelay;
use flinch::error::{GameError, RESET_WHILE_ACTIVE};
use flinch::game::{DWELL, FALSE_START_MESSAGE};
use flinch::presenter::EventLog;
use flinch::{GameEvent, GameState, GameStateMachine, Rating};

fn machine(delay_ms: u64) -> (GameStateMachine<ManualClock, FixedDelay>, ManualClock) {
    let clock = ManualClock::new();
    let game = GameStateMachine::with_sources(clock.clone(), FixedDelay::from_millis(delay_ms));
    (game, clock)
}

/// Plays a full round that reacts `reaction_ms` after the scene changes,
/// then waits out the dwell.
fn play_round(
    game: &mut GameStateMachine<ManualClock, FixedDelay>,
    clock: &ManualClock,
    log: &mut EventLog,
    delay_ms: u64,
    reaction_ms: u64,
) {
    game.request_start(log);
    clock.advance_ms(delay_ms);
    assert!(game.poll(log));
    clock.advance_ms(reaction_ms);
    game.handle_activation(log);
    clock.advance_ms(DWELL.as_millis() as u64);
    assert!(game.poll(log));
}

fn assert_close(actual: Option<f64>, expected: f64) {
    let actual = actual.expect("value present");
    assert!((actual - expected).abs() < 1e-6, "{actual} != {expected}");
}

#[test]
fn normal_round_rates_and_returns_to_idle() {
    let (mut game, clock) = machine(3000);
    let mut log = EventLog::new();

    game.request_start(&mut log);
    assert_eq!(game.state(), GameState::Waiting);

    clock.advance_ms(2999);
    assert!(!game.poll(&mut log));
    clock.advance_ms(1);
    assert!(game.poll(&mut log));
    assert_eq!(game.state(), GameState::Ready);

    clock.advance_ms(220);
    game.handle_activation(&mut log);
    assert_eq!(game.state(), GameState::Complete);

    let events = log.drain();
    assert_eq!(events[0], GameEvent::EnteringWaiting);
    assert_eq!(events[1], GameEvent::EnteringReady);
    assert_matches!(&events[2], GameEvent::StatsUpdated(s) if s.attempts == 1);
    assert_matches!(
        &events[3],
        GameEvent::Result { time_ms, rating: Rating::Great } if (*time_ms - 220.0).abs() < 1e-6
    );

    clock.advance_ms(1999);
    assert!(!game.poll(&mut log));
    clock.advance_ms(1);
    assert!(game.poll(&mut log));
    assert_eq!(game.state(), GameState::Idle);
    assert_eq!(log.drain(), vec![GameEvent::EnteringIdle]);
}

#[test]
fn false_start_never_becomes_ready() {
    let (mut game, clock) = machine(3000);
    let mut log = EventLog::new();

    game.request_start(&mut log);
    clock.advance_ms(500);
    game.handle_activation(&mut log);
    assert_eq!(game.state(), GameState::Complete);
    assert_eq!(game.session().attempts(), 0);

    // the cancelled ready timer must never fire
    clock.advance_ms(3000);
    assert!(game.poll(&mut log));
    assert_eq!(game.state(), GameState::Idle);

    let events = log.drain();
    assert!(!events.contains(&GameEvent::EnteringReady));
    assert!(events.contains(&GameEvent::FalseStart {
        message: FALSE_START_MESSAGE.to_string()
    }));
    assert_eq!(events.last(), Some(&GameEvent::EnteringIdle));
}

#[test]
fn three_rounds_accumulate_stats() {
    let (mut game, clock) = machine(1000);
    let mut log = EventLog::new();

    for ms in [100, 200, 300] {
        play_round(&mut game, &clock, &mut log, 1000, ms);
    }

    let stats = game.current_stats();
    assert_eq!(stats.attempts, 3);
    assert_close(stats.average_ms, 200.0);
    assert_close(stats.best_ms, 100.0);
    assert_close(stats.last_ms, 300.0);
    // an average of exactly 200 ms misses the Excellent cutoff
    assert_eq!(stats.rating, Some(Rating::Great));
    assert_eq!(game.state(), GameState::Idle);
}

#[test]
fn reset_mid_round_is_rejected_and_keeps_session() {
    let (mut game, clock) = machine(1000);
    let mut log = EventLog::new();
    play_round(&mut game, &clock, &mut log, 1000, 250);
    log.drain();

    game.request_start(&mut log);
    let err = game.request_reset(&mut log).unwrap_err();
    assert_matches!(err, GameError::ResetWhileActive { state: GameState::Waiting });
    assert_eq!(game.session().attempts(), 1);
    assert_eq!(
        log.last(),
        Some(&GameEvent::StatsClearRejected {
            message: RESET_WHILE_ACTIVE.to_string()
        })
    );

    // waiting continues unaffected
    clock.advance_ms(1000);
    assert!(game.poll(&mut log));
    assert_eq!(game.state(), GameState::Ready);
}

#[test]
fn reset_when_idle_clears_everything() {
    let (mut game, clock) = machine(1000);
    let mut log = EventLog::new();
    play_round(&mut game, &clock, &mut log, 1000, 180);
    play_round(&mut game, &clock, &mut log, 1000, 260);
    log.drain();

    assert!(game.request_reset(&mut log).is_ok());
    assert!(game.current_stats().is_empty());
    assert_matches!(log.last(), Some(GameEvent::StatsUpdated(s)) if s.attempts == 0);
}

#[test]
fn start_outside_idle_changes_nothing() {
    let (mut game, clock) = machine(1000);
    let mut log = EventLog::new();

    game.request_start(&mut log);
    let deadline = game.next_deadline();
    log.drain();

    clock.advance_ms(400);
    game.request_start(&mut log);
    assert_eq!(game.state(), GameState::Waiting);
    assert_eq!(game.next_deadline(), deadline);
    assert!(log.events.is_empty());

    clock.advance_ms(600);
    game.poll(&mut log);
    game.request_start(&mut log);
    assert_eq!(game.state(), GameState::Ready);

    clock.advance_ms(300);
    game.handle_activation(&mut log);
    log.drain();
    game.request_start(&mut log);
    game.handle_activation(&mut log);
    assert_eq!(game.state(), GameState::Complete);
    assert!(log.events.is_empty());
}

#[test]
fn next_round_after_false_start_plays_normally() {
    let (mut game, clock) = machine(2000);
    let mut log = EventLog::new();

    game.request_start(&mut log);
    game.handle_activation(&mut log);
    clock.advance_ms(DWELL.as_millis() as u64);
    game.poll(&mut log);
    assert_eq!(game.state(), GameState::Idle);

    play_round(&mut game, &clock, &mut log, 2000, 450);
    let stats = game.current_stats();
    assert_eq!(stats.attempts, 1);
    assert_eq!(stats.rating, Some(Rating::Slow));
}
