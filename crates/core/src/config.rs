use crate::error::ConfigError;
use crate::types::{
    COOKIE_KIND_COUNT, DEFAULT_MAX_CASCADE_STEPS, DEFAULT_MAX_SHUFFLE_ATTEMPTS, MIN_KIND_COUNT,
    NUM_COLUMNS, NUM_ROWS,
};

/// Rules a level is played under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RulesConfig {
    pub columns: u8,
    pub rows: u8,
    /// Only the first `kind_count` entries of `CookieKind::ALL` are drawn.
    pub kind_count: u8,
    pub max_shuffle_attempts: u32,
    pub max_cascade_steps: u32,
}

impl RulesConfig {
    pub fn classic() -> Self {
        Self {
            columns: NUM_COLUMNS,
            rows: NUM_ROWS,
            kind_count: COOKIE_KIND_COUNT,
            max_shuffle_attempts: DEFAULT_MAX_SHUFFLE_ATTEMPTS,
            max_cascade_steps: DEFAULT_MAX_CASCADE_STEPS,
        }
    }

    pub fn with_dimensions(mut self, columns: u8, rows: u8) -> Self {
        self.columns = columns;
        self.rows = rows;
        self
    }

    pub fn with_kind_count(mut self, kind_count: u8) -> Self {
        self.kind_count = kind_count;
        self
    }

    pub fn with_max_shuffle_attempts(mut self, attempts: u32) -> Self {
        self.max_shuffle_attempts = attempts;
        self
    }

    pub fn with_max_cascade_steps(mut self, steps: u32) -> Self {
        self.max_cascade_steps = steps;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns == 0 || self.rows == 0 {
            return Err(ConfigError::EmptyDimensions {
                columns: self.columns,
                rows: self.rows,
            });
        }
        if !(MIN_KIND_COUNT..=COOKIE_KIND_COUNT).contains(&self.kind_count) {
            return Err(ConfigError::KindCount {
                found: self.kind_count,
                min: MIN_KIND_COUNT,
                max: COOKIE_KIND_COUNT,
            });
        }
        if self.max_shuffle_attempts == 0 {
            return Err(ConfigError::NoShuffleAttempts);
        }
        if self.max_cascade_steps == 0 {
            return Err(ConfigError::NoCascadeSteps);
        }
        Ok(())
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self::classic()
    }
}
