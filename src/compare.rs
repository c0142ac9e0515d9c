//! Decision comparison: continue the current attempt or restart the run?
//!
//! Given the time-to-eventual-clear distributions for the two choices,
//! computes the exact probability of each comparison outcome by pairwise
//! cross-tabulation:
//!   P(T_continue > T_restart) = Σ_x Σ_y P_cont[x] · P_rest[y] · I(x > y)
//! implemented as a cumulative-sum sweep over the two sorted PMFs.
//!
//! Residual mass (mass the depth bound left unresolved on either side)
//! cannot be placed in any bucket, so each reported probability is only
//! known to within ± (residual_continue + residual_restart). That bound is
//! carried on the result instead of being renormalised away.

use crate::constants::{MASS_EPSILON, PRECISION_WARN_THRESHOLD};
use crate::forward::eventual_clear_distribution;
use crate::pmf::TimeDistribution;
use crate::types::{RunContext, RunState, ValidationError};

/// How trustworthy the computed probabilities are.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Precision {
    /// Both residuals are zero within float tolerance; the probabilities
    /// are exact.
    Exact,
    /// Truncation left unresolved mass; the true probabilities lie within
    /// ± `error_bound` of the reported values.
    Bounded { error_bound: f64 },
}

/// Which path the comparison favors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Recommendation {
    Continue,
    Restart,
}

/// Full comparison of the two choices.
#[derive(Clone, Debug)]
pub struct Comparison {
    /// P(T_continue > T_restart): continuing takes strictly longer.
    pub p_continue_longer: f64,
    /// P(T_continue < T_restart): restarting takes strictly longer.
    pub p_restart_longer: f64,
    /// P(T_continue == T_restart), bucket-exact.
    pub p_equal: f64,
    /// Sum of the two residual masses; every probability above is accurate
    /// to within ± this bound.
    pub error_bound: f64,
    /// Mean time to an eventual clear when continuing, conditional on the
    /// resolved mass. `None` if nothing resolved.
    pub expected_continue: Option<f64>,
    /// Mean time to an eventual clear when restarting, likewise.
    pub expected_restart: Option<f64>,
}

impl Comparison {
    pub fn precision(&self) -> Precision {
        if self.error_bound <= MASS_EPSILON {
            Precision::Exact
        } else {
            Precision::Bounded {
                error_bound: self.error_bound,
            }
        }
    }

    /// True when the residual bound is large enough that the answer should
    /// be treated as imprecise.
    pub fn precision_warning(&self) -> bool {
        self.error_bound > PRECISION_WARN_THRESHOLD
    }

    /// The path with the lower expected time. Ties favor continuing (a
    /// restart discards progress for no expected gain). `None` when either
    /// side resolved no mass at all.
    pub fn recommendation(&self) -> Option<Recommendation> {
        match (self.expected_continue, self.expected_restart) {
            (Some(c), Some(r)) if c > r => Some(Recommendation::Restart),
            (Some(_), Some(_)) => Some(Recommendation::Continue),
            _ => None,
        }
    }
}

/// Compare the continue-path distribution against the restart-path
/// distribution.
pub fn compare(continue_dist: &TimeDistribution, restart_dist: &TimeDistribution) -> Comparison {
    let restart_bins: Vec<(u64, f64)> = restart_dist.pmf.iter_ticks().collect();

    let mut p_continue_longer = 0.0;
    let mut p_equal = 0.0;

    // Sweep continue buckets in increasing tick order, maintaining the
    // cumulative restart mass strictly below the current tick.
    let mut cum_below = 0.0;
    let mut j = 0;
    for (t_cont, p_cont) in continue_dist.pmf.iter_ticks() {
        while j < restart_bins.len() && restart_bins[j].0 < t_cont {
            cum_below += restart_bins[j].1;
            j += 1;
        }
        p_continue_longer += p_cont * cum_below;
        if j < restart_bins.len() && restart_bins[j].0 == t_cont {
            p_equal += p_cont * restart_bins[j].1;
        }
    }

    // The remaining resolved pairs are exactly the ones where the restart
    // path is strictly longer.
    let resolved_pairs = continue_dist.resolved_mass() * restart_dist.resolved_mass();
    let p_restart_longer = (resolved_pairs - p_continue_longer - p_equal).max(0.0);

    let error_bound = (continue_dist.residual + restart_dist.residual).min(1.0);

    Comparison {
        p_continue_longer,
        p_restart_longer,
        p_equal,
        error_bound,
        expected_continue: continue_dist.expected_time(),
        expected_restart: restart_dist.expected_time(),
    }
}

/// Full decision query: compare continuing from `current` against
/// restarting from `(0, starting_lives)`, both measured as time to an
/// eventual no-bomb clear.
pub fn advise(ctx: &RunContext, current: RunState) -> Result<Comparison, ValidationError> {
    let continue_dist = eventual_clear_distribution(ctx, current)?;
    let restart_dist = eventual_clear_distribution(ctx, ctx.start_state())?;
    Ok(compare(&continue_dist, &restart_dist))
}
