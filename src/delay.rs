use rand::rngs::ThreadRng;
use rand::Rng;
use std::time::Duration;

/// Lower bound (inclusive) of the random waiting delay
pub const MIN_DELAY_MS: f64 = 1000.0;
/// Upper bound (exclusive) of the random waiting delay
pub const MAX_DELAY_MS: f64 = 5000.0;

/// Supplies the waiting delay before a round turns ready.
pub trait DelaySource {
    fn next_delay(&mut self) -> Duration;
}

/// Uniform delay in `[MIN_DELAY_MS, MAX_DELAY_MS)` drawn from any [`Rng`].
///
/// Production uses `thread_rng`; tests can pass a seeded `StdRng`.
#[derive(Debug, Clone)]
pub struct RandomDelay<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomDelay<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl Default for RandomDelay<ThreadRng> {
    fn default() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl<R: Rng> DelaySource for RandomDelay<R> {
    fn next_delay(&mut self) -> Duration {
        let ms = self.rng.gen_range(MIN_DELAY_MS..MAX_DELAY_MS);
        Duration::from_secs_f64(ms / 1000.0)
    }
}

/// Always returns the same delay
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay(pub Duration);

impl FixedDelay {
    pub fn from_millis(ms: u64) -> Self {
        Self(Duration::from_millis(ms))
    }
}

impl DelaySource for FixedDelay {
    fn next_delay(&mut self) -> Duration {
        self.0
    }
}
