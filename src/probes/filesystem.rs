//! Filesystem-escape probe
//!
//! Tries to read two files that live outside any sensible sandbox root: the
//! system account database and the invoking user's shell configuration.
//! Each target gets its own verdict and a refusal on one never stops the
//! attempt on the other.

use log::{debug, warn};
use std::ffi::OsString;
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};

use crate::errors::{ProbeError, Result};
use crate::policy::{EVIDENCE_LINES, HOME_FILE, HOME_VAR, SYSTEM_FILE};
use crate::verdict::{attempt, Reporter, Verdict};

/// Bytes read from an opened target while collecting evidence
const READ_WINDOW: u64 = 4096;

pub fn run<W: Write>(reporter: &mut Reporter<W>, home: Option<OsString>) {
    run_against(reporter, Path::new(SYSTEM_FILE), home);
}

pub(crate) fn run_against<W: Write>(
    reporter: &mut Reporter<W>,
    system_file: &Path,
    home: Option<OsString>,
) {
    reporter.line("Attempting to read sensitive files outside sandbox...");

    let system_label = format!("Could not read {}", system_file.display());
    attempt(reporter, &system_label, |r| r.verdict(&probe_file(system_file)));

    let home_label = format!("Could not read ~/{}", HOME_FILE);
    attempt(reporter, &home_label, |r| match home_target(home) {
        Ok(path) => r.verdict(&probe_file(&path)),
        Err(e) => {
            warn!("skipping home directory target: {}", e);
            r.verdict(&Verdict::blocked_because(&home_label, e));
        }
    });
}

/// Resolve the shell configuration path from the value of `HOME`.
pub fn home_target(home: Option<OsString>) -> Result<PathBuf> {
    home.filter(|h| !h.is_empty())
        .map(|h| PathBuf::from(h).join(HOME_FILE))
        .ok_or_else(|| ProbeError::Environment(format!("{} is not set", HOME_VAR)))
}

/// Open `path` for reading once. A successful open is a containment failure;
/// the first few lines come back as evidence.
pub fn probe_file(path: &Path) -> Verdict {
    debug!("opening {}", path.display());
    match File::open(path) {
        Ok(file) => {
            Verdict::success(format!("Could read {}:", path.display())).with_evidence(head(file))
        }
        Err(e) => {
            debug!("open {} refused: {}", path.display(), e);
            Verdict::blocked(format!("Could not read {}", path.display()))
        }
    }
}

fn head(file: File) -> Vec<String> {
    let mut lines = Vec::with_capacity(EVIDENCE_LINES);
    for chunk in BufReader::new(file.take(READ_WINDOW))
        .split(b'\n')
        .take(EVIDENCE_LINES)
    {
        match chunk {
            Ok(bytes) => {
                let line = String::from_utf8_lossy(&bytes);
                lines.push(line.trim_end_matches('\r').to_string());
            }
            Err(e) => {
                // The open already went through; keep what was read.
                debug!("read stopped early: {}", e);
                break;
            }
        }
    }
    lines
}
