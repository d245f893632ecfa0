use serde::{Deserialize, Serialize};

/// Qualitative label for a reaction time.
///
/// Variants are ordered fastest first; `Display` yields the label text.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    strum_macros::Display,
)]
pub enum Rating {
    Superhuman,
    Excellent,
    Great,
    Good,
    Average,
    Slow,
}

/// Ordinal rank of a rating, 0 for the best and 5 for the worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Severity(pub u8);

// Exclusive upper bounds in milliseconds; anything slower is `Slow`.
const THRESHOLDS: [(f64, Rating); 5] = [
    (150.0, Rating::Superhuman),
    (200.0, Rating::Excellent),
    (250.0, Rating::Great),
    (300.0, Rating::Good),
    (350.0, Rating::Average),
];

impl Rating {
    pub const ALL: [Rating; 6] = [
        Rating::Superhuman,
        Rating::Excellent,
        Rating::Great,
        Rating::Good,
        Rating::Average,
        Rating::Slow,
    ];

    /// First threshold the time falls under wins. NaN classifies as `Slow`.
    pub fn classify(ms: f64) -> Self {
        THRESHOLDS
            .iter()
            .find(|(upper, _)| ms < *upper)
            .map_or(Rating::Slow, |&(_, rating)| rating)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Rating::Superhuman => "Superhuman",
            Rating::Excellent => "Excellent",
            Rating::Great => "Great",
            Rating::Good => "Good",
            Rating::Average => "Average",
            Rating::Slow => "Slow",
        }
    }

    pub fn severity(&self) -> Severity {
        Severity(*self as u8)
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Rating::Superhuman => "🚀",
            Rating::Excellent => "⚡",
            Rating::Great => "🎯",
            Rating::Good => "👍",
            Rating::Average => "✓",
            Rating::Slow => "🐌",
        }
    }
}

/// Label and severity for a reaction time in milliseconds
pub fn classify_reaction_time(ms: f64) -> (&'static str, Severity) {
    let rating = Rating::classify(ms);
    (rating.label(), rating.severity())
}
