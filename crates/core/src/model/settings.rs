use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound on how many questions a single quiz session may sample.
pub const MAX_SAMPLE_SIZE: u32 = 50;

/// Upper bound on the auto-advance delay.
pub const MAX_AUTO_ADVANCE_SECS: u32 = 30;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("sample size must be between 1 and {MAX_SAMPLE_SIZE}, got {0}")]
    InvalidSampleSize(u32),

    #[error("auto-advance delay must be between 1 and {MAX_AUTO_ADVANCE_SECS} seconds, got {0}")]
    InvalidAutoAdvance(u32),
}

/// Tunables for quiz sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSettings {
    sample_size: u32,
    auto_advance_secs: u32,
}

impl QuizSettings {
    /// # Errors
    ///
    /// Returns `SettingsError` when either value is out of range.
    pub fn new(sample_size: u32, auto_advance_secs: u32) -> Result<Self, SettingsError> {
        if !(1..=MAX_SAMPLE_SIZE).contains(&sample_size) {
            return Err(SettingsError::InvalidSampleSize(sample_size));
        }
        if !(1..=MAX_AUTO_ADVANCE_SECS).contains(&auto_advance_secs) {
            return Err(SettingsError::InvalidAutoAdvance(auto_advance_secs));
        }
        Ok(Self {
            sample_size,
            auto_advance_secs,
        })
    }

    #[must_use]
    pub fn sample_size(&self) -> usize {
        self.sample_size as usize
    }

    #[must_use]
    pub fn auto_advance_secs(&self) -> u32 {
        self.auto_advance_secs
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            sample_size: 10,
            auto_advance_secs: 3,
        }
    }
}
