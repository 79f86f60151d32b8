//! Entry-point detector
//!
//! A stateless text check that reports whether a piece of C/C++ source
//! appears to define a program entry point. It knows nothing about the
//! probes and is only reached from outside the crate through a foreign-call
//! boundary:
//!
//! - **ffi**: C ABI exports for a host loading the `cdylib`
//! - **python**: a pyo3 extension module (feature `python`)
//!
//! Every call returns an [`Analysis`]; malformed input never produces an
//! error or a panic across the boundary.
//!
//! # Examples
//!
//! ```
//! use sandbox_probes::detector::analyze;
//!
//! let analysis = analyze("int main(int argc, char **argv) { return 0; }");
//! assert!(analysis.has_main);
//! ```

pub mod ffi;
#[cfg(feature = "python")]
pub mod python;

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Return-typed `main` with a parenthesised argument list, whitespace-tolerant
pub const ENTRY_POINT_PATTERN: &str = r"\s*int\s+main\s*\([^)]*\)";

/// Result handed back across the boundary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub success: bool,
    pub has_main: bool,
    pub message: String,
}

impl Analysis {
    pub fn found() -> Self {
        Self {
            success: true,
            has_main: true,
            message: "Main function found".to_string(),
        }
    }

    pub fn not_found() -> Self {
        Self {
            success: true,
            has_main: false,
            message: "No main function found".to_string(),
        }
    }

    /// The text could not be analysed at all
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            has_main: false,
            message: message.into(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            format!(
                r#"{{"success":false,"hasMain":false,"message":"serialization failed: {}"}}"#,
                e.to_string().replace(['"', '\\'], "'")
            )
        })
    }
}

fn entry_point() -> Result<&'static Regex, &'static regex::Error> {
    static PATTERN: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(ENTRY_POINT_PATTERN))
        .as_ref()
}

/// Look for an entry-point definition in `source`.
pub fn analyze(source: &str) -> Analysis {
    match entry_point() {
        Ok(re) if re.is_match(source) => Analysis::found(),
        Ok(_) => Analysis::not_found(),
        Err(e) => Analysis::failed(format!("entry-point pattern unavailable: {}", e)),
    }
}

/// Looser check: any call-like occurrence of `main(`.
pub fn contains_main(source: &str) -> bool {
    source.contains("main(")
}
