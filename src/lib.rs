//! # nbclear: exact restart-vs-continue advisor for no-bomb clears
//!
//! A player grinding for a no-bomb (NB) clear works through an ordered list
//! of sections, each with an empirical cap rate (probability of clearing
//! the section without losing a life), an attempt time, and a life reward.
//! Failing a section costs a life and a retry; failing at zero lives forces
//! a bomb and ends NB status. Mid-run, the question is: does restarting
//! from scratch reach an eventual NB clear faster, in expectation and in
//! probability, than continuing the current attempt?
//!
//! ## Algorithm overview
//!
//! Everything is computed exactly, with no Monte Carlo. Two components:
//!
//! | Component | Rust module | Description |
//! |-----------|-------------|-------------|
//! | State-distribution engine | [`forward`] | Push P(section, lives, elapsed ticks) forward one attempt per step, depth-bounded; collect the PMF of time to clear (and to the forced bomb), with truncated mass reported as residual |
//! | Decision comparator | [`compare`] | Cross-tabulate two time PMFs into exact P(continue longer) / P(restart longer) / P(equal), with an error bound from the residuals |
//!
//! Time is quantised to 0.01-unit ticks ([`constants`]) so equal elapsed
//! totals merge into the same bucket exactly. Inputs are validated once
//! into an immutable [`types::RunContext`] shared by every query.
//!
//! ## State representation
//!
//! A frontier entry is `(section_index * stride + life_count, dense tick
//! distribution)`; the life stride is capped at the attainable-lives
//! ceiling, and dense arrays are sized so `simulation_depth` attempts can
//! never overflow them.

#![allow(clippy::needless_range_loop)]

pub mod compare;
pub mod constants;
pub mod forward;
pub mod io;
pub mod pmf;
pub mod transitions;
pub mod types;
