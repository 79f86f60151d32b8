//! Fixed probe targets
//!
//! Probes are deliberately non-parameterized fixtures: every target a probe
//! attacks is a constant here, so two runs of the same probe against two
//! sandboxes are directly comparable.

use std::net::{Ipv4Addr, SocketAddrV4};
use std::time::Duration;

/// System-wide account database, readable by default on most hosts
pub const SYSTEM_FILE: &str = "/etc/passwd";

/// Environment variable naming the invoking user's home directory
pub const HOME_VAR: &str = "HOME";

/// Shell configuration file probed under the home directory
pub const HOME_FILE: &str = ".bashrc";

/// Number of lines captured as evidence from a readable file
pub const EVIDENCE_LINES: usize = 3;

/// Public DNS resolver; its service port is always listening
pub const EGRESS_TARGET: SocketAddrV4 = SocketAddrV4::new(Ipv4Addr::new(8, 8, 8, 8), 53);

/// Upper bound on a single outbound connect attempt
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Size of the memory block allocated and touched by the resource probe
pub const MEMORY_BLOCK_BYTES: usize = 1024 * 1024 * 1024;

/// Byte written into every position of the memory block
pub const MEMORY_FILL: u8 = b'X';

/// Number of busy-looping compute threads
pub const CPU_WORKERS: usize = 4;

/// Floating-point iterations per busy-loop round
pub const CPU_ROUND_ITERATIONS: u32 = 10_000_000;

/// Number of progress steps emitted by the longevity probe
pub const LONGEVITY_STEPS: u32 = 120;

/// Wall-clock length of one longevity step
pub const LONGEVITY_STEP: Duration = Duration::from_secs(1);
