//! Probability mass functions over quantised time.
//!
//! [`TimePmf`] is a sparse map from tick bucket to probability mass.
//! [`TimeDistribution`] pairs a PMF with the residual (unresolved) mass
//! left by depth truncation; its invariant is resolved + residual = 1.

use std::collections::BTreeMap;

use crate::constants::time_from_ticks;

/// Sparse PMF: tick bucket → probability mass, sorted by tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TimePmf {
    bins: BTreeMap<u64, f64>,
}

impl TimePmf {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `mass` to the bucket at `ticks`. Zero mass is dropped so the
    /// map only holds live buckets.
    pub fn add_mass(&mut self, ticks: u64, mass: f64) {
        if mass > 0.0 {
            *self.bins.entry(ticks).or_insert(0.0) += mass;
        }
    }

    /// Total probability mass across all buckets.
    pub fn mass(&self) -> f64 {
        self.bins.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// Buckets in increasing tick order.
    pub fn iter_ticks(&self) -> impl Iterator<Item = (u64, f64)> + '_ {
        self.bins.iter().map(|(&t, &p)| (t, p))
    }

    /// Buckets in increasing time order, ticks converted back to time.
    pub fn iter_times(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.bins.iter().map(|(&t, &p)| (time_from_ticks(t), p))
    }

    /// Mass-weighted mean time, conditional on landing in this PMF.
    /// `None` when the PMF is empty.
    pub fn expected_time(&self) -> Option<f64> {
        let mass = self.mass();
        if mass <= 0.0 {
            return None;
        }
        let weighted: f64 = self
            .bins
            .iter()
            .map(|(&t, &p)| time_from_ticks(t) * p)
            .sum();
        Some(weighted / mass)
    }
}

/// A PMF of time-to-outcome plus the residual mass that the depth bound
/// left unresolved. Resolved + residual sums to 1 within float tolerance.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeDistribution {
    pub pmf: TimePmf,
    pub residual: f64,
}

impl TimeDistribution {
    pub fn resolved_mass(&self) -> f64 {
        self.pmf.mass()
    }

    pub fn total_mass(&self) -> f64 {
        self.pmf.mass() + self.residual
    }

    /// Mean time conditional on resolving; `None` if nothing resolved.
    pub fn expected_time(&self) -> Option<f64> {
        self.pmf.expected_time()
    }
}
