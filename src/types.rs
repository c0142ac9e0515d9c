//! Core data structures: sections, run configuration, and the validated
//! run context.
//!
//! The central type is [`RunContext`], which holds the validated section
//! list, the configuration, and derived lookup data (per-section tick
//! costs, the attainable-lives ceiling). It is built once from external
//! input and then shared immutably by every engine query.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::ticks_from_time;

/// One section of the game, as measured by the player.
///
/// - `cap_rate`: probability of clearing the section on a single attempt
///   without losing a life
/// - `time`: wall time one attempt costs, success or failure
/// - `lives_gained`: life reward granted on success (clamped at the run's
///   life ceiling)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub cap_rate: f64,
    pub time: f64,
    #[serde(default)]
    pub lives_gained: u32,
}

/// Run-wide configuration, fixed for the lifetime of a [`RunContext`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Lives held at the start of a fresh run.
    pub starting_lives: u32,
    /// Hard ceiling on held lives; gains beyond it are clamped.
    pub max_lives: u32,
    /// Maximum number of attempt-transitions to unroll from a starting
    /// state. Probability mass still in flight after this many attempts is
    /// reported as residual rather than assigned a time.
    pub simulation_depth: u32,
}

/// A node in the transition graph: which section the player is on and how
/// many lives they hold.
///
/// `section_index == N` (the section count) is the cleared terminal state.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct RunState {
    pub section_index: usize,
    pub life_count: u32,
}

impl RunState {
    pub fn new(section_index: usize, life_count: u32) -> Self {
        Self {
            section_index,
            life_count,
        }
    }
}

/// Rejected input. Fatal: no partial computation is attempted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("section list is empty")]
    NoSections,
    #[error("section {index}: cap_rate {value} outside [0, 1]")]
    CapRateOutOfRange { index: usize, value: f64 },
    #[error("section {index}: time {value} negative or non-finite")]
    InvalidTime { index: usize, value: f64 },
    #[error("max_lives {max_lives} below starting_lives {starting_lives}")]
    MaxLivesBelowStart {
        starting_lives: u32,
        max_lives: u32,
    },
    #[error("simulation_depth must be at least 1")]
    ZeroDepth,
    #[error("life count {life_count} exceeds max_lives {max_lives}")]
    LifeCountOutOfRange { life_count: u32, max_lives: u32 },
    #[error("section index {section_index} out of range 0..={section_count}")]
    SectionIndexOutOfRange {
        section_index: usize,
        section_count: usize,
    },
}

/// Validated, immutable inputs plus derived lookups, shared by all queries.
#[derive(Clone, Debug)]
pub struct RunContext {
    sections: Vec<Section>,
    config: RunConfig,
    /// Per-section attempt cost quantised to ticks.
    section_ticks: Vec<u64>,
    /// Sum of all life rewards; bounds how far above a starting life count
    /// a run can climb before the max_lives clamp.
    total_lives_gained: u32,
}

impl RunContext {
    /// Validate the inputs and compile the derived tables.
    pub fn new(sections: Vec<Section>, config: RunConfig) -> Result<Self, ValidationError> {
        if sections.is_empty() {
            return Err(ValidationError::NoSections);
        }
        for (index, s) in sections.iter().enumerate() {
            if !s.cap_rate.is_finite() || !(0.0..=1.0).contains(&s.cap_rate) {
                return Err(ValidationError::CapRateOutOfRange {
                    index,
                    value: s.cap_rate,
                });
            }
            if !s.time.is_finite() || s.time < 0.0 {
                return Err(ValidationError::InvalidTime {
                    index,
                    value: s.time,
                });
            }
        }
        if config.max_lives < config.starting_lives {
            return Err(ValidationError::MaxLivesBelowStart {
                starting_lives: config.starting_lives,
                max_lives: config.max_lives,
            });
        }
        if config.simulation_depth == 0 {
            return Err(ValidationError::ZeroDepth);
        }

        let section_ticks = sections.iter().map(|s| ticks_from_time(s.time)).collect();
        // Every life value clamps at max_lives downstream, so saturation
        // loses nothing even for absurd reward sums.
        let total_lives_gained = sections
            .iter()
            .fold(0u32, |acc, s| acc.saturating_add(s.lives_gained));

        Ok(Self {
            sections,
            config,
            section_ticks,
            total_lives_gained,
        })
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Number of sections N. `section_index == N` is the cleared terminal.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Attempt cost of section `i` in ticks.
    pub fn section_ticks(&self, i: usize) -> u64 {
        self.section_ticks[i]
    }

    /// The fresh-run starting state `(0, starting_lives)`.
    pub fn start_state(&self) -> RunState {
        RunState::new(0, self.config.starting_lives)
    }

    /// Check a query state against this context's bounds.
    pub fn validate_state(&self, state: RunState) -> Result<(), ValidationError> {
        if state.section_index > self.section_count() {
            return Err(ValidationError::SectionIndexOutOfRange {
                section_index: state.section_index,
                section_count: self.section_count(),
            });
        }
        if state.life_count > self.config.max_lives {
            return Err(ValidationError::LifeCountOutOfRange {
                life_count: state.life_count,
                max_lives: self.config.max_lives,
            });
        }
        Ok(())
    }

    /// Highest life count reachable from `start` (also covering fresh-run
    /// restarts). Every gain clamps at `max_lives`, so the dense life
    /// dimension never needs to exceed this ceiling.
    pub fn attainable_lives(&self, start: RunState) -> u32 {
        let base = start.life_count.max(self.config.starting_lives);
        base.saturating_add(self.total_lives_gained)
            .min(self.config.max_lives)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(cap_rate: f64, time: f64, lives_gained: u32) -> Section {
        Section {
            cap_rate,
            time,
            lives_gained,
        }
    }

    fn config() -> RunConfig {
        RunConfig {
            starting_lives: 2,
            max_lives: 4,
            simulation_depth: 50,
        }
    }

    #[test]
    fn accepts_well_formed_input() {
        let ctx = RunContext::new(
            vec![section(0.9, 0.4, 0), section(0.5, 0.7, 1)],
            config(),
        )
        .unwrap();
        assert_eq!(ctx.section_count(), 2);
        assert_eq!(ctx.section_ticks(0), 40);
        assert_eq!(ctx.section_ticks(1), 70);
    }

    #[test]
    fn rejects_bad_cap_rate() {
        let err = RunContext::new(vec![section(1.2, 0.4, 0)], config()).unwrap_err();
        assert!(matches!(err, ValidationError::CapRateOutOfRange { index: 0, .. }));
        let err = RunContext::new(vec![section(f64::NAN, 0.4, 0)], config()).unwrap_err();
        assert!(matches!(err, ValidationError::CapRateOutOfRange { .. }));
    }

    #[test]
    fn rejects_negative_time() {
        let err = RunContext::new(vec![section(0.5, -1.0, 0)], config()).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidTime { index: 0, .. }));
    }

    #[test]
    fn rejects_empty_sections_and_bad_config() {
        assert_eq!(
            RunContext::new(vec![], config()).unwrap_err(),
            ValidationError::NoSections
        );
        let mut cfg = config();
        cfg.max_lives = 1;
        assert!(matches!(
            RunContext::new(vec![section(0.5, 0.4, 0)], cfg).unwrap_err(),
            ValidationError::MaxLivesBelowStart { .. }
        ));
        let mut cfg = config();
        cfg.simulation_depth = 0;
        assert_eq!(
            RunContext::new(vec![section(0.5, 0.4, 0)], cfg).unwrap_err(),
            ValidationError::ZeroDepth
        );
    }

    #[test]
    fn validates_query_state_bounds() {
        let ctx = RunContext::new(vec![section(0.5, 0.4, 0)], config()).unwrap();
        assert!(ctx.validate_state(RunState::new(0, 4)).is_ok());
        assert!(ctx.validate_state(RunState::new(1, 0)).is_ok()); // terminal
        assert!(matches!(
            ctx.validate_state(RunState::new(2, 0)).unwrap_err(),
            ValidationError::SectionIndexOutOfRange { .. }
        ));
        assert!(matches!(
            ctx.validate_state(RunState::new(0, 5)).unwrap_err(),
            ValidationError::LifeCountOutOfRange { .. }
        ));
    }

    #[test]
    fn huge_life_rewards_saturate_at_the_ceiling() {
        // Reward sums past u32::MAX are valid input; the ceiling still
        // clamps at max_lives instead of wrapping.
        let ctx = RunContext::new(
            vec![section(0.5, 0.4, u32::MAX), section(0.5, 0.4, u32::MAX)],
            config(),
        )
        .unwrap();
        assert_eq!(ctx.attainable_lives(ctx.start_state()), 4);
        assert_eq!(ctx.attainable_lives(RunState::new(1, 4)), 4);
    }

    #[test]
    fn attainable_lives_clamps_at_max() {
        let ctx = RunContext::new(
            vec![section(0.5, 0.4, 3), section(0.5, 0.4, 3)],
            config(),
        )
        .unwrap();
        // 2 starting + 6 gains clamps at max_lives = 4.
        assert_eq!(ctx.attainable_lives(ctx.start_state()), 4);
        // A query state holding more lives than a fresh run raises the base.
        assert_eq!(ctx.attainable_lives(RunState::new(1, 4)), 4);
    }
}
