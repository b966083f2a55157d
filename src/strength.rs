//! Password strength rating from structural signals.

use serde::Serialize;
use std::fmt;

/// Minimum length that counts towards the score.
pub const MIN_LENGTH: usize = 8;

/// Characters that count as "special".
pub const SPECIAL_CHARS: &str = "!@#$%^&*().,<>";

/// Ordinal strength classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrengthTier {
    Weak,
    Medium,
    Strong,
    VeryStrong,
}

impl StrengthTier {
    const TIERS: [StrengthTier; 4] = [
        StrengthTier::Weak,
        StrengthTier::Medium,
        StrengthTier::Strong,
        StrengthTier::VeryStrong,
    ];

    /// Map a signal count to a tier. Scores above 3 saturate.
    pub fn from_score(score: u8) -> Self {
        Self::TIERS[usize::from(score.min(3))]
    }
}

impl fmt::Display for StrengthTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StrengthTier::Weak => "Weak",
            StrengthTier::Medium => "Medium",
            StrengthTier::Strong => "Strong",
            StrengthTier::VeryStrong => "Very Strong",
        };
        f.write_str(label)
    }
}

/// The individual signals a password is scored on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StrengthSignals {
    pub long_enough: bool,
    pub has_uppercase: bool,
    pub has_digit: bool,
    pub has_special: bool,
}

impl StrengthSignals {
    /// Inspect a password.
    pub fn of(password: &str) -> Self {
        Self {
            long_enough: password.chars().count() >= MIN_LENGTH,
            has_uppercase: password.chars().any(char::is_uppercase),
            has_digit: password.chars().any(|c| c.is_ascii_digit()),
            has_special: password.chars().any(|c| SPECIAL_CHARS.contains(c)),
        }
    }

    /// Number of signals present, in `0..=4`.
    pub fn score(&self) -> u8 {
        [
            self.long_enough,
            self.has_uppercase,
            self.has_digit,
            self.has_special,
        ]
        .iter()
        .filter(|present| **present)
        .count() as u8
    }

    /// Hints for the signals that are missing.
    pub fn missing(&self) -> Vec<String> {
        let mut hints = Vec::new();
        if !self.long_enough {
            hints.push(format!("at least {MIN_LENGTH} characters"));
        }
        if !self.has_uppercase {
            hints.push("an uppercase letter".to_string());
        }
        if !self.has_digit {
            hints.push("a digit".to_string());
        }
        if !self.has_special {
            hints.push(format!("one of {SPECIAL_CHARS}"));
        }
        hints
    }
}

/// Full assessment of a password, for user feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrengthReport {
    pub tier: StrengthTier,
    pub score: u8,
    pub signals: StrengthSignals,
}

impl StrengthReport {
    /// Hints for raising the score; empty when every signal is present.
    pub fn hints(&self) -> Vec<String> {
        self.signals.missing()
    }
}

/// Rate a password.
pub fn rate(password: &str) -> StrengthTier {
    StrengthTier::from_score(StrengthSignals::of(password).score())
}

/// Rate a password and keep the signals that produced the rating.
pub fn assess(password: &str) -> StrengthReport {
    let signals = StrengthSignals::of(password);
    let score = signals.score();
    StrengthReport {
        tier: StrengthTier::from_score(score),
        score,
        signals,
    }
}
