// Library surface for the binary, headless integration tests and reuse.
pub mod app;
pub mod app_dirs;
pub mod clock;
pub mod config;
pub mod delay;
pub mod error;
pub mod game;
pub mod input;
pub mod logging;
pub mod presenter;
pub mod rating;
pub mod runtime;
pub mod scene;
pub mod shapes;
pub mod stats;
pub mod timer;
pub mod ui;

pub use app::App;
pub use game::{GameState, GameStateMachine};
pub use presenter::{GameEvent, Presenter};
pub use rating::{classify_reaction_time, Rating};
