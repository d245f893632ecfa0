use rand::rngs::ThreadRng;
use ratatui::layout::Rect;
use std::time::Duration;

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::delay::{DelaySource, RandomDelay};
use crate::game::GameStateMachine;
use crate::input::{command_for_key, command_for_mouse, Command};
use crate::runtime::AppEvent;
use crate::scene::Scene;
use crate::ui::screen_layout;

/// Composition root: one game core and the scene it reports to
#[derive(Debug)]
pub struct App<C: Clock = SystemClock, D: DelaySource = RandomDelay<ThreadRng>> {
    pub game: GameStateMachine<C, D>,
    pub scene: Scene,
    pub config: Config,
    pub show_help: bool,
    /// Last drawn frame area, used to hit-test mouse clicks
    pub viewport: Rect,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self::with_game(GameStateMachine::new(), config)
    }
}

impl<C: Clock, D: DelaySource> App<C, D> {
    pub fn with_game(game: GameStateMachine<C, D>, config: Config) -> Self {
        Self {
            game,
            scene: Scene::new(config.animate),
            show_help: config.show_help,
            config,
            viewport: Rect::default(),
            should_quit: false,
        }
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Start => self.game.request_start(&mut self.scene),
            Command::Activate => self.game.handle_activation(&mut self.scene),
            Command::Reset => {
                // the scene already shows the rejection
                if let Err(e) = self.game.request_reset(&mut self.scene) {
                    log::debug!("reset rejected: {e}");
                }
            }
            Command::ToggleHelp => self.show_help = !self.show_help,
            Command::Quit => self.should_quit = true,
        }
    }

    /// Handles one runtime event. Input is applied before due timers fire,
    /// so a click is judged against what was on screen when it arrived.
    /// Returns true when the screen needs a redraw.
    pub fn handle_event(&mut self, event: AppEvent, frame_dt: Duration) -> bool {
        let mut redraw = match event {
            AppEvent::Key(key) => self.apply_opt(command_for_key(key)),
            AppEvent::Mouse(mouse) if self.config.mouse => {
                let layout = screen_layout(self.viewport);
                self.apply_opt(command_for_mouse(mouse, &layout))
            }
            AppEvent::Mouse(_) => false,
            AppEvent::Resize => true,
            AppEvent::Tick => {
                self.scene.tick(frame_dt.as_secs_f64());
                self.config.animate
            }
        };

        if self.game.poll(&mut self.scene) {
            redraw = true;
        }
        redraw
    }

    fn apply_opt(&mut self, command: Option<Command>) -> bool {
        match command {
            Some(command) => {
                self.apply(command);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::delay::FixedDelay;
    use crate::game::GameState;
    use crate::scene::SceneKind;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

    fn test_app() -> (App<ManualClock, FixedDelay>, ManualClock) {
        let clock = ManualClock::new();
        let game = GameStateMachine::with_sources(clock.clone(), FixedDelay::from_millis(1000));
        (App::with_game(game, Config::default()), clock)
    }

    fn key(c: char) -> AppEvent {
        AppEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    const FRAME: Duration = Duration::from_millis(16);

    #[test]
    fn test_space_plays_a_round() {
        let (mut app, clock) = test_app();

        assert!(app.handle_event(key(' '), FRAME));
        assert_eq!(app.game.state(), GameState::Waiting);
        assert_eq!(app.scene.kind(), SceneKind::Waiting);

        clock.advance_ms(1000);
        assert!(app.handle_event(AppEvent::Tick, FRAME));
        assert_eq!(app.game.state(), GameState::Ready);
        assert_eq!(app.scene.kind(), SceneKind::Ready);

        clock.advance_ms(190);
        app.handle_event(key(' '), FRAME);
        assert_eq!(app.game.state(), GameState::Complete);
        assert_eq!(app.scene.status().headline, "190 ms");
        assert_eq!(app.scene.stats().attempts, 1);
    }

    #[test]
    fn test_click_after_deadline_but_before_poll_is_false_start() {
        let (mut app, clock) = test_app();
        app.handle_event(key('s'), FRAME);

        clock.advance_ms(1500);
        app.handle_event(key(' '), FRAME);

        assert_eq!(app.game.state(), GameState::Complete);
        assert_eq!(app.scene.status().headline, "Too Early!");
        assert_eq!(app.game.session().attempts(), 0);
    }

    #[test]
    fn test_reset_mid_round_shows_error() {
        let (mut app, _) = test_app();
        app.handle_event(key('s'), FRAME);
        app.handle_event(key('r'), FRAME);

        assert_eq!(app.game.state(), GameState::Waiting);
        assert_eq!(app.scene.error(), Some("⚠️ Cannot reset while game is active"));
    }

    #[test]
    fn test_mouse_click_on_canvas_activates() {
        let (mut app, _) = test_app();
        app.viewport = Rect::new(0, 0, 80, 30);
        let canvas = screen_layout(app.viewport).canvas;

        let click = AppEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: canvas.x + 3,
            row: canvas.y + 3,
            modifiers: KeyModifiers::NONE,
        });
        assert!(app.handle_event(click, FRAME));
        assert_eq!(app.game.state(), GameState::Waiting);
    }

    #[test]
    fn test_mouse_ignored_when_disabled() {
        let clock = ManualClock::new();
        let game = GameStateMachine::with_sources(clock, FixedDelay::from_millis(1000));
        let mut app = App::with_game(
            game,
            Config {
                mouse: false,
                ..Config::default()
            },
        );
        app.viewport = Rect::new(0, 0, 80, 30);
        let canvas = screen_layout(app.viewport).canvas;

        let click = AppEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: canvas.x + 3,
            row: canvas.y + 3,
            modifiers: KeyModifiers::NONE,
        });
        assert!(!app.handle_event(click, FRAME));
        assert_eq!(app.game.state(), GameState::Idle);
    }

    #[test]
    fn test_quit_and_help_toggle() {
        let (mut app, _) = test_app();
        assert!(app.show_help);
        app.handle_event(key('?'), FRAME);
        assert!(!app.show_help);

        app.handle_event(key('q'), FRAME);
        assert!(app.should_quit);
    }
}
