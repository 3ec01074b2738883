//! Answer checking and score presentation.

use serde::{Deserialize, Serialize};

/// Case-insensitive exact match. No trimming, no partial credit.
#[must_use]
pub fn is_correct(submitted: &str, expected: &str) -> bool {
    submitted.to_lowercase() == expected.to_lowercase()
}

/// Final tally of a quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
}

impl Score {
    #[must_use]
    pub fn new(correct: usize, total: usize) -> Self {
        Self { correct, total }
    }

    /// Whole percentage, rounded half away from zero; 0 for an empty quiz.
    #[must_use]
    pub fn percentage(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let pct = ((self.correct as f64 / self.total as f64) * 100.0).round() as u32;
        pct
    }

    #[must_use]
    pub fn band(&self) -> ScoreBand {
        ScoreBand::for_percentage(self.percentage())
    }

    /// True when the result deserves a celebration (70 % and up).
    #[must_use]
    pub fn celebrate(&self) -> bool {
        self.percentage() >= 70
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Excellent,
    Great,
    Good,
    KeepPracticing,
}

impl ScoreBand {
    #[must_use]
    pub fn for_percentage(pct: u32) -> Self {
        match pct {
            90.. => ScoreBand::Excellent,
            70..=89 => ScoreBand::Great,
            50..=69 => ScoreBand::Good,
            _ => ScoreBand::KeepPracticing,
        }
    }

    #[must_use]
    pub fn headline(self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Excellent!",
            ScoreBand::Great => "Great Job!",
            ScoreBand::Good => "Good Try!",
            ScoreBand::KeepPracticing => "Keep Practicing!",
        }
    }
}
