//! Simulation configuration
//!
//! Deserialized from JSON; every field is optional and falls back to the
//! defaults in [`crate::types`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{
    DEFAULT_COLUMNS, DEFAULT_GRAVITY_PERIOD, DEFAULT_MOVE_REPEAT_DELAY, DEFAULT_ROWS, MAX_COLUMNS,
    MAX_ROWS,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("board must have at least one column and one row (got {columns}x{rows})")]
    EmptyBoard { columns: u16, rows: u16 },
    #[error("board is limited to {}x{} cells (got {columns}x{rows})", MAX_COLUMNS, MAX_ROWS)]
    BoardTooLarge { columns: u16, rows: u16 },
    #[error("{name} must be a finite, non-negative number of seconds (got {value})")]
    InvalidPeriod { name: &'static str, value: f32 },
    #[error("spawn anchor ({x}, {y}) is outside the {columns}x{rows} board")]
    SpawnOutOfBounds {
        x: i32,
        y: i32,
        columns: u16,
        rows: u16,
    },
    #[error("board is {columns}x{rows} but the config asks for a different size")]
    BoardMismatch { columns: i32, rows: i32 },
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Board dimensions, timing and spawn point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub columns: u16,
    pub rows: u16,
    /// Seconds between forced downward steps
    pub gravity_period: f32,
    /// Seconds between repeated horizontal steps while a direction is held
    pub move_repeat_delay: f32,
    /// Pivot position of new pieces; defaults to the top row, centered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spawn: Option<(i32, i32)>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
            gravity_period: DEFAULT_GRAVITY_PERIOD,
            move_repeat_delay: DEFAULT_MOVE_REPEAT_DELAY,
            spawn: None,
        }
    }
}

impl SimConfig {
    /// Default timing on a board of the given size
    pub fn with_size(columns: u16, rows: u16) -> Self {
        Self {
            columns,
            rows,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON document
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Effective spawn anchor
    pub fn spawn_anchor(&self) -> (i32, i32) {
        self.spawn
            .unwrap_or((self.columns as i32 / 2, self.rows as i32 - 1))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns == 0 || self.rows == 0 {
            return Err(ConfigError::EmptyBoard {
                columns: self.columns,
                rows: self.rows,
            });
        }
        if self.columns > MAX_COLUMNS || self.rows > MAX_ROWS {
            return Err(ConfigError::BoardTooLarge {
                columns: self.columns,
                rows: self.rows,
            });
        }

        for (name, value) in [
            ("gravity_period", self.gravity_period),
            ("move_repeat_delay", self.move_repeat_delay),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidPeriod { name, value });
            }
        }

        let (x, y) = self.spawn_anchor();
        if x < 0 || x >= self.columns as i32 || y < 0 || y >= self.rows as i32 {
            return Err(ConfigError::SpawnOutOfBounds {
                x,
                y,
                columns: self.columns,
                rows: self.rows,
            });
        }

        Ok(())
    }
}
