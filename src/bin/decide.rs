//! Restart-or-continue decision for a mid-run no-bomb attempt.
//!
//! Usage:
//!   decide <plan.json> <current_section> <current_lives>
//!
//! The plan file holds the section list and run configuration (see
//! `nbclear::io`). Prints the exact comparison probabilities, the expected
//! times for both paths, and the recommendation.

use std::path::Path;
use std::process::exit;

use nbclear::compare::{advise, Precision, Recommendation};
use nbclear::io::load_plan;
use nbclear::types::RunState;

fn usage() -> ! {
    eprintln!("usage: decide <plan.json> <current_section> <current_lives>");
    exit(2);
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 4 {
        usage();
    }
    let plan_path = &args[1];
    let Ok(current_section) = args[2].parse::<usize>() else {
        usage();
    };
    let Ok(current_lives) = args[3].parse::<u32>() else {
        usage();
    };

    let plan = match load_plan(Path::new(plan_path)) {
        Ok(plan) => plan,
        Err(e) => {
            eprintln!("{}", e);
            exit(1);
        }
    };
    let ctx = match plan.into_context() {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("invalid plan: {}", e);
            exit(1);
        }
    };

    let current = RunState::new(current_section, current_lives);
    let cmp = match advise(&ctx, current) {
        Ok(cmp) => cmp,
        Err(e) => {
            eprintln!("invalid query: {}", e);
            exit(1);
        }
    };

    println!(
        "state: section {} of {}, {} lives (restart baseline: section 0, {} lives)",
        current_section,
        ctx.section_count(),
        current_lives,
        ctx.config().starting_lives
    );
    println!(
        "probability that continuing takes longer:  {:.6}",
        cmp.p_continue_longer
    );
    println!(
        "probability that restarting takes longer:  {:.6}",
        cmp.p_restart_longer
    );
    println!(
        "probability of a dead heat:                {:.6}",
        cmp.p_equal
    );
    match cmp.precision() {
        Precision::Exact => println!("precision: exact (no truncated mass)"),
        Precision::Bounded { error_bound } => {
            println!("precision: each probability accurate to ±{:.3e}", error_bound);
            if cmp.precision_warning() {
                println!("warning: truncation residual is large; raise simulation_depth");
            }
        }
    }
    if let Some(t) = cmp.expected_continue {
        println!("expected time to eventual clear, continuing: {:.2}", t);
    }
    if let Some(t) = cmp.expected_restart {
        println!("expected time to eventual clear, restarting: {:.2}", t);
    }
    match cmp.recommendation() {
        Some(Recommendation::Continue) => println!("recommendation: CONTINUE the attempt"),
        Some(Recommendation::Restart) => println!("recommendation: RESTART the run"),
        None => println!("recommendation: inconclusive (no mass resolved at this depth)"),
    }
}
