//! Probe layer: one adversarial workload per policy category
//!
//! Each probe attempts a single kind of forbidden operation and reports the
//! outcome through [`crate::verdict`]. Probes never call each other and
//! take no arguments; every target comes from [`crate::policy`].
//!
//! # Probes
//!
//! - **filesystem**: read files outside the sandbox root
//! - **network**: open an outbound TCP connection
//! - **resources**: allocate 1 GiB and saturate CPU cores indefinitely
//! - **longevity**: outlive a wall-clock budget
//! - **fault**: die by a genuine invalid memory access
//!
//! # Examples
//!
//! ```ignore
//! use sandbox_probes::{probes::network, Reporter};
//!
//! let mut reporter = Reporter::stdout();
//! network::run(&mut reporter);
//! ```

pub mod fault;
pub mod filesystem;
pub mod longevity;
pub mod network;
pub mod resources;

pub use network::{Dialer, TcpDialer};
