//! Per-state attempt transitions.
//!
//! One attempt at section `i` with `L` lives resolves to exactly one of:
//! - success (probability `cap_rate[i]`): advance to section `i+1` with
//!   `min(L + lives_gained[i], max_lives)` lives, or to the cleared
//!   terminal when `i+1 == N`;
//! - failure with lives in reserve: retry section `i` with `L-1` lives;
//! - failure at zero lives: the bomb is forced and no-bomb status is lost.
//!
//! Both branches cost the section's full attempt time.

use crate::types::{RunContext, RunState};

/// Destination of one attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NextState {
    /// Still running, at the given state.
    Run(RunState),
    /// All sections cleared without a bomb.
    Cleared,
    /// Failed at zero lives; a bomb was forced. Absorbing.
    NbLost,
}

/// A single transition: destination, probability, and elapsed ticks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttemptTransition {
    pub next: NextState,
    pub prob: f64,
    pub ticks: u64,
}

/// Enumerate the transitions out of a running state.
///
/// Zero-probability branches are omitted, so degenerate sections
/// (`cap_rate` 0 or 1) yield a single transition.
///
/// Panics in debug builds if `state` is terminal; callers resolve the
/// cleared terminal before expanding.
pub fn attempt_transitions(ctx: &RunContext, state: RunState) -> Vec<AttemptTransition> {
    let i = state.section_index;
    debug_assert!(i < ctx.section_count(), "terminal state has no transitions");

    let section = &ctx.sections()[i];
    let ticks = ctx.section_ticks(i);
    let mut out = Vec::with_capacity(2);

    if section.cap_rate > 0.0 {
        let lives = state
            .life_count
            .saturating_add(section.lives_gained)
            .min(ctx.config().max_lives);
        let next = if i + 1 == ctx.section_count() {
            NextState::Cleared
        } else {
            NextState::Run(RunState::new(i + 1, lives))
        };
        out.push(AttemptTransition {
            next,
            prob: section.cap_rate,
            ticks,
        });
    }

    let miss = 1.0 - section.cap_rate;
    if miss > 0.0 {
        let next = if state.life_count > 0 {
            NextState::Run(RunState::new(i, state.life_count - 1))
        } else {
            NextState::NbLost
        };
        out.push(AttemptTransition {
            next,
            prob: miss,
            ticks,
        });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RunConfig, Section};

    fn ctx(sections: Vec<Section>, max_lives: u32) -> RunContext {
        RunContext::new(
            sections,
            RunConfig {
                starting_lives: 1,
                max_lives,
                simulation_depth: 10,
            },
        )
        .unwrap()
    }

    #[test]
    fn success_and_retry_branches() {
        let ctx = ctx(
            vec![
                Section {
                    cap_rate: 0.7,
                    time: 0.4,
                    lives_gained: 0,
                },
                Section {
                    cap_rate: 0.5,
                    time: 0.5,
                    lives_gained: 0,
                },
            ],
            3,
        );
        let trans = attempt_transitions(&ctx, RunState::new(0, 2));
        assert_eq!(trans.len(), 2);
        assert_eq!(trans[0].next, NextState::Run(RunState::new(1, 2)));
        assert!((trans[0].prob - 0.7).abs() < 1e-12);
        assert_eq!(trans[0].ticks, 40);
        assert_eq!(trans[1].next, NextState::Run(RunState::new(0, 1)));
        assert!((trans[1].prob - 0.3).abs() < 1e-12);
    }

    #[test]
    fn last_section_success_clears() {
        let ctx = ctx(
            vec![Section {
                cap_rate: 0.8,
                time: 10.0,
                lives_gained: 1,
            }],
            2,
        );
        let trans = attempt_transitions(&ctx, RunState::new(0, 1));
        assert_eq!(trans[0].next, NextState::Cleared);
        assert_eq!(trans[1].next, NextState::Run(RunState::new(0, 0)));
    }

    #[test]
    fn failure_at_zero_lives_is_nb_lost() {
        let ctx = ctx(
            vec![Section {
                cap_rate: 0.8,
                time: 10.0,
                lives_gained: 0,
            }],
            2,
        );
        let trans = attempt_transitions(&ctx, RunState::new(0, 0));
        assert_eq!(trans[1].next, NextState::NbLost);
        assert!((trans[1].prob - 0.2).abs() < 1e-12);
    }

    #[test]
    fn maximal_life_reward_clamps_without_overflow() {
        let ctx = ctx(
            vec![
                Section {
                    cap_rate: 0.5,
                    time: 0.1,
                    lives_gained: u32::MAX,
                },
                Section {
                    cap_rate: 0.5,
                    time: 0.1,
                    lives_gained: 0,
                },
            ],
            3,
        );
        let trans = attempt_transitions(&ctx, RunState::new(0, 2));
        assert_eq!(trans[0].next, NextState::Run(RunState::new(1, 3)));
    }

    #[test]
    fn life_gain_clamps_at_max_lives() {
        let ctx = ctx(
            vec![
                Section {
                    cap_rate: 1.0,
                    time: 0.1,
                    lives_gained: 5,
                },
                Section {
                    cap_rate: 1.0,
                    time: 0.1,
                    lives_gained: 0,
                },
            ],
            3,
        );
        let trans = attempt_transitions(&ctx, RunState::new(0, 2));
        // cap_rate 1.0: single branch, lives clamped to 3.
        assert_eq!(trans.len(), 1);
        assert_eq!(trans[0].next, NextState::Run(RunState::new(1, 3)));
    }
}
