//! Forward distribution evolution: propagate exact time distributions
//! through the section graph.
//!
//! Starting from a single `(section, lives)` state with probability 1.0 at
//! elapsed time 0, push the distribution forward one attempt per step using
//! the transitions from [`crate::transitions::attempt_transitions`]. Mass
//! reaching an absorbing outcome (cleared, or no-bomb status lost) is
//! collected into a PMF at the tick it resolved; mass still in flight when
//! `simulation_depth` attempts have been unrolled is reported as residual.
//!
//! Uses dense f64 arrays indexed by tick for the per-state distributions
//! and parallelizes both the transition phase and the merge phase. All
//! probabilities are exact products and sums; no sampling.

use std::collections::HashMap;

use rayon::prelude::*;

use crate::pmf::{TimeDistribution, TimePmf};
use crate::transitions::{attempt_transitions, AttemptTransition, NextState};
use crate::types::{RunContext, RunState, ValidationError};

/// Result of depth-bounded evolution with absorbing outcomes.
///
/// `cleared.mass() + nb_lost.mass() + residual` sums to 1 within float
/// tolerance.
#[derive(Clone, Debug)]
pub struct OutcomeDistribution {
    /// PMF of time to clearing every section without a bomb.
    pub cleared: TimePmf,
    /// PMF of time to the forced bomb that ends no-bomb status.
    pub nb_lost: TimePmf,
    /// Mass still unresolved when the depth bound was reached.
    pub residual: f64,
}

impl OutcomeDistribution {
    pub fn resolved_mass(&self) -> f64 {
        self.cleared.mass() + self.nb_lost.mass()
    }

    pub fn total_mass(&self) -> f64 {
        self.resolved_mass() + self.residual
    }
}

/// Evolve from `start`, treating a forced bomb as absorbing.
///
/// This is the raw per-state contract: clear times and bomb times tracked
/// separately, plus truncation residual.
pub fn outcome_distribution(
    ctx: &RunContext,
    start: RunState,
) -> Result<OutcomeDistribution, ValidationError> {
    ctx.validate_state(start)?;
    let (cleared, nb_lost, residual) = propagate(ctx, start, false);
    Ok(OutcomeDistribution {
        cleared,
        nb_lost,
        residual,
    })
}

/// Evolve from `start`, restarting the run whenever a bomb is forced.
///
/// Mass that would absorb into NB-lost at elapsed time t is re-seeded at
/// `(0, starting_lives)` carrying t, so the result is the distribution of
/// time until a no-bomb clear is *eventually* achieved, however many
/// restarts that takes. Residual comes only from the depth bound.
pub fn eventual_clear_distribution(
    ctx: &RunContext,
    start: RunState,
) -> Result<TimeDistribution, ValidationError> {
    ctx.validate_state(start)?;
    let (cleared, nb_lost, residual) = propagate(ctx, start, true);
    debug_assert!(nb_lost.is_empty(), "folded evolution cannot absorb into NB-lost");
    Ok(TimeDistribution {
        pmf: cleared,
        residual,
    })
}

/// Dense tick-indexed distribution for one `(section, lives)` state.
type TickDist = Vec<f64>;

/// Active frontier entry: (state key, dense tick distribution).
type StateEntry = (u32, TickDist);

fn propagate(ctx: &RunContext, start: RunState, fold_restarts: bool) -> (TimePmf, TimePmf, f64) {
    let mut cleared = TimePmf::new();
    let mut nb_lost = TimePmf::new();

    // Terminal start: the run is already a clear at time zero.
    if start.section_index == ctx.section_count() {
        cleared.add_mass(0, 1.0);
        return (cleared, nb_lost, 0.0);
    }

    let depth = ctx.config().simulation_depth as usize;
    let life_stride = ctx.attainable_lives(start) as usize + 1;
    let state_key =
        |s: RunState| (s.section_index * life_stride + s.life_count as usize) as u32;
    let key_state = |k: u32| {
        RunState::new(k as usize / life_stride, (k as usize % life_stride) as u32)
    };

    // Tick capacity: after k attempts the frontier can sit no later than
    // k * max_section_ticks, and one more transition adds at most
    // max_section_ticks, so depth * max + 1 bins always suffice.
    let max_section_ticks = (0..ctx.section_count())
        .map(|i| ctx.section_ticks(i) as usize)
        .max()
        .unwrap_or(0);
    let capacity = depth.saturating_mul(max_section_ticks).saturating_add(1);

    let restart_state = ctx.start_state();

    let mut start_dist = vec![0.0f64; capacity];
    start_dist[0] = 1.0;
    let mut active: Vec<StateEntry> = vec![(state_key(start), start_dist)];

    for _attempt in 0..depth {
        if active.is_empty() {
            break;
        }

        // Phase 1: transitions and highest non-zero tick per active state.
        let transitions_and_bounds: Vec<(Vec<AttemptTransition>, usize)> = active
            .par_iter()
            .map(|(key, dist)| {
                let mut trans = attempt_transitions(ctx, key_state(*key));
                if fold_restarts {
                    for t in &mut trans {
                        if t.next == NextState::NbLost {
                            t.next = NextState::Run(restart_state);
                        }
                    }
                }
                let max_i = dist.iter().rposition(|&p| p > 0.0).unwrap_or(0);
                (trans, max_i)
            })
            .collect();

        // Phase 2: absorbing branches resolve into the output PMFs now;
        // running branches are grouped by destination state.
        let mut dest_map: HashMap<u32, Vec<(usize, usize)>> = HashMap::new();
        for (src_idx, (trans, max_i)) in transitions_and_bounds.iter().enumerate() {
            let dist = &active[src_idx].1;
            for (t_idx, t) in trans.iter().enumerate() {
                match t.next {
                    NextState::Run(next) => {
                        dest_map
                            .entry(state_key(next))
                            .or_default()
                            .push((src_idx, t_idx));
                    }
                    NextState::Cleared | NextState::NbLost => {
                        let sink = if t.next == NextState::Cleared {
                            &mut cleared
                        } else {
                            &mut nb_lost
                        };
                        for i in 0..=*max_i {
                            let p = dist[i];
                            if p > 0.0 {
                                sink.add_mass(i as u64 + t.ticks, t.prob * p);
                            }
                        }
                    }
                }
            }
        }

        // Phase 3: parallel merge; each destination is independent.
        let dest_entries: Vec<(u32, Vec<(usize, usize)>)> = dest_map.into_iter().collect();

        let next_states: Vec<StateEntry> = dest_entries
            .par_iter()
            .map(|(dest_key, contribs)| {
                let mut dense = vec![0.0f64; capacity];

                for &(src_idx, t_idx) in contribs {
                    let src_dist = &active[src_idx].1;
                    let (ref trans, max_i) = transitions_and_bounds[src_idx];
                    let t = &trans[t_idx];
                    let offset = t.ticks as usize;
                    let prob = t.prob;

                    // Shift-and-add over the non-zero range only.
                    for i in 0..=max_i {
                        let p = src_dist[i];
                        if p > 0.0 {
                            dense[i + offset] += prob * p;
                        }
                    }
                }

                (*dest_key, dense)
            })
            .collect();

        active = next_states;
    }

    let residual: f64 = active
        .iter()
        .map(|(_, dist)| dist.iter().sum::<f64>())
        .sum();

    (cleared, nb_lost, residual)
}
