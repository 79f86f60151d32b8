//! sandbox-probes: confinement-boundary probes in Rust
//!
//! A suite of small adversarial programs, each of which attempts exactly one
//! category of forbidden operation from inside a sandbox under test and
//! reports whether the sandbox stopped it.
//!
//! # Modules
//!
//! - **verdict**: `SUCCESS:` / `BLOCKED:` reporting shared by every probe
//! - **policy**: fixed targets (paths, address, sizes, durations)
//! - **probes**: filesystem, network, resources, longevity, fault
//! - **detector**: entry-point detection behind a C / Python boundary
//! - **logging**: stderr diagnostics
//! - **errors**: error type observed by probes
//!
//! # Example
//!
//! ```ignore
//! use sandbox_probes::{logging, probes::filesystem, Reporter};
//!
//! logging::init_logger();
//! let mut reporter = Reporter::stdout();
//! filesystem::run(&mut reporter, std::env::var_os("HOME"));
//! ```

// Core modules
pub mod errors;
pub mod logging;
pub mod policy;
pub mod verdict;

// Workloads
pub mod probes;

// Boundary-only collaborator
pub mod detector;

// Public API
pub use detector::{analyze, Analysis};
pub use errors::{ProbeError, Result};
pub use verdict::{attempt, Outcome, Reporter, Verdict};
