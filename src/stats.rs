use crate::rating::Rating;

pub fn mean(data: &[f64]) -> Option<f64> {
    let sum = data.iter().sum::<f64>();
    let count = data.len();

    match count {
        positive if positive > 0 => Some(sum / count as f64),
        _ => None,
    }
}

pub fn std_dev(data: &[f64]) -> Option<f64> {
    match (mean(data), data.len()) {
        (Some(data_mean), count) if count > 0 => {
            let variance = data
                .iter()
                .map(|value| {
                    let diff = data_mean - *value;

                    diff * diff
                })
                .sum::<f64>()
                / count as f64;

            Some(variance.sqrt())
        }
        _ => None,
    }
}

pub fn minimum(data: &[f64]) -> Option<f64> {
    data.iter().copied().reduce(f64::min)
}

/// Reaction times recorded during this process' lifetime.
///
/// The attempt count is derived from the stored times, so the two can never
/// disagree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    times: Vec<f64>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, reaction_ms: f64) {
        self.times.push(reaction_ms);
    }

    pub fn clear(&mut self) {
        self.times.clear();
    }

    pub fn attempts(&self) -> usize {
        self.times.len()
    }

    /// Recorded times in chronological order
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn average(&self) -> Option<f64> {
        mean(&self.times)
    }

    pub fn best(&self) -> Option<f64> {
        minimum(&self.times)
    }

    pub fn last(&self) -> Option<f64> {
        self.times.last().copied()
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        let average_ms = self.average();
        StatsSnapshot {
            attempts: self.attempts(),
            average_ms,
            best_ms: self.best(),
            last_ms: self.last(),
            std_dev_ms: std_dev(&self.times),
            rating: average_ms.map(Rating::classify),
        }
    }
}

/// Point-in-time view of the session; optional fields are `None` while no
/// attempt has been recorded
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StatsSnapshot {
    pub attempts: usize,
    pub average_ms: Option<f64>,
    pub best_ms: Option<f64>,
    pub last_ms: Option<f64>,
    pub std_dev_ms: Option<f64>,
    /// Rating of the running average
    pub rating: Option<Rating>,
}

impl StatsSnapshot {
    pub fn is_empty(&self) -> bool {
        self.attempts == 0
    }
}

/// Whole-millisecond display with "-" for missing values
pub fn format_ms(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |ms| format!("{} ms", ms.round()))
}
