//! Plan file loading.
//!
//! A plan is a JSON document holding the measured section list and the run
//! configuration:
//!
//! ```json
//! {
//!   "sections": [
//!     {"cap_rate": 0.98, "time": 0.4, "lives_gained": 0},
//!     {"cap_rate": 0.80, "time": 0.5, "lives_gained": 1}
//!   ],
//!   "config": {"starting_lives": 5, "max_lives": 9, "simulation_depth": 200}
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{RunConfig, RunContext, Section, ValidationError};

/// Deserialised plan file, not yet validated.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunPlan {
    pub sections: Vec<Section>,
    pub config: RunConfig,
}

impl RunPlan {
    /// Validate and compile into a [`RunContext`].
    pub fn into_context(self) -> Result<RunContext, ValidationError> {
        RunContext::new(self.sections, self.config)
    }
}

/// Failure to read or parse a plan file.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("cannot read plan file: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse plan file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Load a plan from a JSON file.
pub fn load_plan(path: &Path) -> Result<RunPlan, PlanError> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}
