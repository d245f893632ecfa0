use rand::Rng;
use ratatui::style::Color;

use crate::presenter::Presenter;
use crate::rating::Rating;
use crate::shapes::{angle_of, hex, Group, Mesh, Orbit, Part, Segment};
use crate::stats::StatsSnapshot;

pub const BLUE: Color = hex(0x3B82F6);
pub const GREEN: Color = hex(0x10B981);
pub const PURPLE: Color = hex(0x8B5CF6);
pub const PINK: Color = hex(0xEC4899);
pub const AMBER: Color = hex(0xF59E0B);
pub const YELLOW: Color = hex(0xFBBF24);
pub const RED: Color = hex(0xEF4444);

const READY_PALETTE: [Color; 4] = [GREEN, BLUE, PURPLE, PINK];

// The shapes were tuned at 60 frames per second.
const FRAMES_PER_SEC: f64 = 60.0;

/// Which visual set is on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneKind {
    Idle,
    Waiting,
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Prompt,
    Waiting,
    React,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Status {
    pub headline: String,
    pub subtext: String,
    pub tone: Tone,
    /// Colour override for the subtext line
    pub accent: Option<Color>,
}

impl Status {
    fn new(headline: impl Into<String>, subtext: impl Into<String>, tone: Tone) -> Self {
        Self {
            headline: headline.into(),
            subtext: subtext.into(),
            tone,
            accent: None,
        }
    }

    fn idle() -> Self {
        Self::new(
            "Ready to Start",
            "Click here or the button to begin",
            Tone::Prompt,
        )
    }
}

/// Terminal renderer collaborator: reacts to game notifications by swapping
/// shapes and texts, and animates the shapes between frames
#[derive(Debug)]
pub struct Scene {
    kind: SceneKind,
    groups: Vec<Group>,
    elapsed: f64,
    animate: bool,
    status: Status,
    error: Option<String>,
    stats: StatsSnapshot,
    start_label: &'static str,
    start_enabled: bool,
}

impl Scene {
    pub fn new(animate: bool) -> Self {
        Self {
            kind: SceneKind::Idle,
            groups: idle_groups(),
            elapsed: 0.0,
            animate,
            status: Status::idle(),
            error: None,
            stats: StatsSnapshot::default(),
            start_label: "Start Game",
            start_enabled: true,
        }
    }

    pub fn kind(&self) -> SceneKind {
        self.kind
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn stats(&self) -> &StatsSnapshot {
        &self.stats
    }

    pub fn start_label(&self) -> &'static str {
        self.start_label
    }

    pub fn start_enabled(&self) -> bool {
        self.start_enabled
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Advances the animation by `dt` seconds
    pub fn tick(&mut self, dt: f64) {
        if !self.animate {
            return;
        }
        self.elapsed += dt;
        for group in &mut self.groups {
            group.advance(dt, self.elapsed);
        }
    }

    /// Every visible edge, projected to screen space
    pub fn segments(&self) -> Vec<Segment> {
        let mut out = Vec::new();
        for group in &self.groups {
            group.project_into(&mut out);
        }
        out
    }

    fn show(&mut self, kind: SceneKind) {
        self.kind = kind;
        self.groups = match kind {
            SceneKind::Idle => idle_groups(),
            SceneKind::Waiting => waiting_groups(),
            SceneKind::Ready => ready_groups(&mut rand::thread_rng()),
        };
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Presenter for Scene {
    fn entering_waiting(&mut self) {
        self.error = None;
        self.status = Status::new("Wait...", "Get ready to react", Tone::Waiting);
        self.start_enabled = false;
        self.show(SceneKind::Waiting);
    }

    fn entering_ready(&mut self) {
        self.status = Status::new("CLICK NOW!", "React as fast as you can!", Tone::React);
        self.start_enabled = false;
        self.show(SceneKind::Ready);
    }

    fn false_start(&mut self, message: &str) {
        self.error = Some(format!("⚠️ {message}"));
        self.status = Status {
            accent: Some(RED),
            ..Status::new("Too Early!", "Wait for the shapes to change", Tone::Error)
        };
        self.start_enabled = true;
        self.start_label = "Play Again";
        self.show(SceneKind::Idle);
    }

    fn result(&mut self, time_ms: f64, rating: Rating) {
        self.status = Status {
            accent: Some(rating_color(rating)),
            ..Status::new(
                format!("{} ms", time_ms.round()),
                format!("{} {}", rating.symbol(), rating),
                Tone::React,
            )
        };
        self.start_enabled = true;
        self.start_label = "Play Again";
    }

    fn entering_idle(&mut self) {
        self.status = Status::idle();
        self.start_enabled = true;
        self.start_label = "Start Game";
        if self.kind != SceneKind::Idle {
            self.show(SceneKind::Idle);
        }
    }

    fn stats_updated(&mut self, stats: &StatsSnapshot) {
        if stats.is_empty() {
            self.error = None;
        }
        self.stats = *stats;
    }

    fn stats_clear_rejected(&mut self, message: &str) {
        self.error = Some(format!("⚠️ {message}"));
    }
}

pub fn rating_color(rating: Rating) -> Color {
    match rating {
        Rating::Superhuman => PINK,
        Rating::Excellent => PURPLE,
        Rating::Great => GREEN,
        Rating::Good => BLUE,
        Rating::Average => AMBER,
        Rating::Slow => RED,
    }
}

/// Torus around a dodecahedron, ringed by eight orbiting spheres
fn idle_groups() -> Vec<Group> {
    let mut parts = vec![
        Part::new(Mesh::torus(1.5, 0.2, 8, 32), BLUE),
        Part::new(Mesh::dodecahedron(0.8), PURPLE),
    ];
    parts.extend((0..8).map(|i| {
        Part::new(Mesh::icosphere(0.15, 0), GREEN).orbiting(Orbit {
            base_angle: angle_of(i, 8),
            speed: 0.5,
            radius: 2.0,
        })
    }));
    vec![Group::new(parts, 0.01 * FRAMES_PER_SEC)]
}

/// Wireframe icosphere shell around an octahedron and a tetrahedron
fn waiting_groups() -> Vec<Group> {
    vec![Group::new(
        vec![
            Part::new(Mesh::icosphere(2.0, 1), AMBER),
            Part::new(Mesh::octahedron(1.2), AMBER),
            Part::new(Mesh::tetrahedron(0.7), YELLOW),
        ],
        0.02 * FRAMES_PER_SEC,
    )]
}

/// Eight dodecahedron-and-ring clusters orbiting the centre
fn ready_groups<R: Rng>(rng: &mut R) -> Vec<Group> {
    (0..8)
        .map(|i| {
            let parts = vec![
                Part::new(Mesh::dodecahedron(0.4), READY_PALETTE[i % READY_PALETTE.len()]),
                Part::new(Mesh::ring(0.6, 16), READY_PALETTE[(i + 1) % READY_PALETTE.len()])
                    .rotated([std::f64::consts::FRAC_PI_2, 0.0, 0.0]),
            ];
            let spin = (0.03 + rng.gen_range(0.0..0.02)) * FRAMES_PER_SEC;
            Group::new(parts, spin).orbiting(Orbit {
                base_angle: angle_of(i, 8),
                speed: 0.02,
                radius: 2.5,
            })
        })
        .collect()
}
