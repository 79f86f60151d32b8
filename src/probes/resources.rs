//! Resource-exhaustion probe
//!
//! Two sub-probes, both always run:
//!
//! - **memory**: reserve a large block and write every byte of it, so lazy
//!   backing by the allocator cannot hide the resident cost;
//! - **cpu**: start a fixed set of threads that spin on floating-point work
//!   forever. They share nothing and are never asked to stop; only the
//!   sandbox tearing the process down ends them.

use log::{debug, warn};
use std::hint::black_box;
use std::io::{self, Write};
use std::thread::{self, JoinHandle};

use crate::errors::{ProbeError, Result};
use crate::policy::{CPU_ROUND_ITERATIONS, CPU_WORKERS, MEMORY_BLOCK_BYTES, MEMORY_FILL};
use crate::verdict::{attempt, Reporter, Verdict};

const GIB: usize = 1024 * 1024 * 1024;
const MIB: usize = 1024 * 1024;

/// Run both sub-probes, then wait on the compute threads. Does not return
/// unless no thread could be started.
pub fn run<W: Write>(reporter: &mut Reporter<W>) {
    reporter.line("Testing excessive resource usage...");

    attempt(reporter, "Could not allocate memory", |r| {
        r.line(format!(
            "Attempting to allocate {} of memory...",
            human_size(MEMORY_BLOCK_BYTES)
        ));
        r.verdict(&probe_memory(MEMORY_BLOCK_BYTES));
    });

    let mut workers = Vec::new();
    attempt(reporter, "Could not start threads", |r| {
        r.line(format!(
            "Attempting to spawn {} CPU-intensive threads...",
            CPU_WORKERS
        ));
        workers = spawn_workers(r, CPU_WORKERS, burn);
    });

    debug!("{} compute threads running", workers.len());
    for worker in workers {
        if worker.join().is_err() {
            warn!("compute thread panicked");
        }
    }
}

/// Reserve exactly `bytes` and fill all of them.
pub fn allocate_and_touch(bytes: usize) -> Result<Vec<u8>> {
    let mut block = Vec::new();
    block.try_reserve_exact(bytes)?;
    // Capacity is already there, so this writes in place without reallocating.
    block.resize(bytes, MEMORY_FILL);
    Ok(block)
}

pub fn probe_memory(bytes: usize) -> Verdict {
    match allocate_and_touch(bytes) {
        Ok(block) => {
            debug!("touched {} bytes", black_box(&block).len());
            Verdict::success(format!("Allocated {} of memory", human_size(bytes)))
        }
        Err(e) => Verdict::blocked_because("Could not allocate memory", e),
    }
}

/// Start `count` threads running `work`, reporting each start on its own.
pub fn spawn_workers<W: Write>(
    reporter: &mut Reporter<W>,
    count: usize,
    work: fn(),
) -> Vec<JoinHandle<()>> {
    spawn_workers_with(reporter, count, |index| {
        thread::Builder::new()
            .name(format!("cpu-burn-{}", index))
            .spawn(work)
    })
}

pub fn spawn_workers_with<W, S>(
    reporter: &mut Reporter<W>,
    count: usize,
    mut spawn: S,
) -> Vec<JoinHandle<()>>
where
    W: Write,
    S: FnMut(usize) -> io::Result<JoinHandle<()>>,
{
    let mut handles = Vec::with_capacity(count);
    for index in 0..count {
        match spawn(index) {
            Ok(handle) => {
                handles.push(handle);
                reporter.line(format!("Started CPU thread {}", index));
            }
            Err(e) => reporter.verdict(&Verdict::blocked_because(
                format!("Could not start thread {}", index),
                ProbeError::Spawn(e),
            )),
        }
    }
    handles
}

/// Spin forever
pub fn burn() {
    loop {
        burn_round(CPU_ROUND_ITERATIONS);
    }
}

/// One round of trigonometric busywork, opaque to the optimizer
pub fn burn_round(iterations: u32) -> f64 {
    let mut acc = 0.0_f64;
    for i in 0..iterations {
        let x = f64::from(i);
        acc += black_box(x.sin() * x.cos());
    }
    black_box(acc)
}

fn human_size(bytes: usize) -> String {
    if bytes >= GIB && bytes % GIB == 0 {
        format!("{}GB", bytes / GIB)
    } else if bytes >= MIB && bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else {
        format!("{} bytes", bytes)
    }
}
