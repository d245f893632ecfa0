use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use flinch::clock::ManualClock;
use flinch::config::Config;
use flinch::delay::FixedDelay;
use flinch::runtime::{AppEvent, FixedTicker, Runner, TestEventSource};
use flinch::scene::SceneKind;
use flinch::{App, GameState, GameStateMachine};
use ratatui::{backend::TestBackend, Terminal};

const FRAME: Duration = Duration::from_millis(16);

fn key(c: char) -> AppEvent {
    AppEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

fn headless_app() -> (App<ManualClock, FixedDelay>, ManualClock) {
    let clock = ManualClock::new();
    let game = GameStateMachine::with_sources(clock.clone(), FixedDelay::from_millis(1500));
    (App::with_game(game, Config::default()), clock)
}

// Drives the app through the runtime without a tty: a queued key starts the
// round, empty steps become ticks, and the round plays out on the manual clock.
#[test]
fn headless_round_through_runner() {
    let (mut app, clock) = headless_app();
    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(TestEventSource::new(rx), FixedTicker::from_millis(2));

    tx.send(key('s')).unwrap();
    app.handle_event(runner.step(), FRAME);
    assert_eq!(app.game.state(), GameState::Waiting);

    // nothing queued: the runner times out into a tick
    clock.advance_ms(1500);
    let event = runner.step();
    assert!(matches!(event, AppEvent::Tick));
    assert!(app.handle_event(event, FRAME));
    assert_eq!(app.scene.kind(), SceneKind::Ready);

    clock.advance_ms(175);
    tx.send(key(' ')).unwrap();
    app.handle_event(runner.step(), FRAME);
    assert_eq!(app.game.state(), GameState::Complete);
    assert_eq!(app.scene.status().headline, "175 ms");

    clock.advance_ms(2000);
    app.handle_event(runner.step(), FRAME);
    assert_eq!(app.game.state(), GameState::Idle);
    assert_eq!(app.scene.start_label(), "Start Game");

    tx.send(key('q')).unwrap();
    app.handle_event(runner.step(), FRAME);
    assert!(app.should_quit);
}

#[test]
fn headless_false_start_renders_error() {
    let (mut app, _) = headless_app();
    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(TestEventSource::new(rx), FixedTicker::from_millis(2));

    tx.send(key(' ')).unwrap();
    tx.send(key(' ')).unwrap();
    for _ in 0..2 {
        app.handle_event(runner.step(), FRAME);
    }
    assert_eq!(app.game.state(), GameState::Complete);

    let mut terminal = Terminal::new(TestBackend::new(90, 30)).unwrap();
    terminal.draw(|f| f.render_widget(&app, f.area())).unwrap();
    let content: String = terminal
        .backend()
        .buffer()
        .content
        .iter()
        .map(|c| c.symbol())
        .collect();
    assert!(content.contains("Too Early!"));
    assert!(content.contains("Play Again"));
}

#[test]
fn disconnected_source_degrades_to_ticks() {
    let (tx, rx) = mpsc::channel::<AppEvent>();
    drop(tx);
    let runner = Runner::new(TestEventSource::new(rx), FixedTicker::from_millis(1));
    assert!(matches!(runner.step(), AppEvent::Tick));
}
