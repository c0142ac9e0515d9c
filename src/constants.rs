//! Numeric constants: time quantisation and floating-point tolerances.
//!
//! Section times are floats, but the engine accumulates elapsed time as an
//! integer number of **ticks** so that equal totals land in the same PMF
//! bucket exactly. One tick is [`TIME_TICK`] time units (0.01, i.e. two decimal
//! places of resolution). Quantisation happens once, when the section list
//! is validated; everything downstream is integer arithmetic.

/// Length of one time tick. 0.01 time units, i.e. two decimal places.
pub const TIME_TICK: f64 = 0.01;

/// Tolerance for probability-mass conservation checks.
///
/// Forward propagation only multiplies and adds probabilities, so drift is
/// a few ulps per step; 1e-9 leaves ample headroom at any realistic depth.
pub const MASS_EPSILON: f64 = 1e-9;

/// Residual-mass threshold above which a comparison is flagged as imprecise.
pub const PRECISION_WARN_THRESHOLD: f64 = 1e-6;

/// Quantise a non-negative time value to ticks (nearest).
pub fn ticks_from_time(time: f64) -> u64 {
    (time / TIME_TICK).round() as u64
}

/// Convert a tick count back to a time value.
pub fn time_from_ticks(ticks: u64) -> f64 {
    ticks as f64 * TIME_TICK
}
