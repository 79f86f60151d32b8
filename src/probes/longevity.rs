//! Longevity probe
//!
//! Runs for a known wall-clock length, printing one progress line per step.
//! There is no verdict of its own: a harness that sees the completion line
//! knows the sandbox let the process outlive its budget.

use log::debug;
use std::io::Write;
use std::thread;
use std::time::Duration;

use crate::policy::{LONGEVITY_STEP, LONGEVITY_STEPS};
use crate::verdict::Reporter;

pub fn run<W: Write>(reporter: &mut Reporter<W>) {
    run_for(reporter, LONGEVITY_STEPS, LONGEVITY_STEP);
}

pub fn run_for<W: Write>(reporter: &mut Reporter<W>, steps: u32, step: Duration) {
    reporter.line("Starting long-running process...");
    for i in 0..steps {
        reporter.line(format!("Running for {} seconds...", i));
        thread::sleep(step);
    }
    debug!("ran {} steps of {:?}", steps, step);
    reporter.line(format!(
        "Successfully ran for {}!",
        describe(step * steps)
    ));
}

fn describe(total: Duration) -> String {
    let secs = total.as_secs();
    match secs {
        s if s >= 60 && s % 60 == 0 => {
            let minutes = s / 60;
            format!("{} minute{}", minutes, if minutes == 1 { "" } else { "s" })
        }
        s => format!("{} second{}", s, if s == 1 { "" } else { "s" }),
    }
}
