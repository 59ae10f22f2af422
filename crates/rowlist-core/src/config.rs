//! Row list configuration that owners can serialize/deserialize.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    /// Row capacity of the first block a list synthesizes.
    pub init_block_rows: usize,

    /// Upper bound for geometric block growth.
    pub max_block_rows: usize,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            init_block_rows: 32,
            max_block_rows: 1024,
        }
    }
}

impl ListConfig {
    pub fn new(init_block_rows: usize, max_block_rows: usize) -> Self {
        Self {
            init_block_rows,
            max_block_rows,
        }
    }

    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `ROWLIST_INIT_BLOCK_ROWS`: capacity of the first block
    /// - `ROWLIST_MAX_BLOCK_ROWS`: growth bound for later blocks
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(s) = std::env::var("ROWLIST_INIT_BLOCK_ROWS") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.init_block_rows = v;
            }
        }

        if let Ok(s) = std::env::var("ROWLIST_MAX_BLOCK_ROWS") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.max_block_rows = v;
            }
        }

        cfg
    }

    /// Parse a JSON document; missing keys take their defaults.
    pub fn from_json(s: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.init_block_rows == 0 {
            return Err(Error::Config("init_block_rows must be at least 1".into()));
        }
        if self.init_block_rows > self.max_block_rows {
            return Err(Error::Config(format!(
                "init_block_rows {} exceeds max_block_rows {}",
                self.init_block_rows, self.max_block_rows
            )));
        }
        Ok(())
    }
}
