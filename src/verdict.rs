//! Verdict protocol shared by every probe
//!
//! A probe attempts one forbidden operation, observes whether the platform
//! allowed it, and prints exactly one verdict line for that attempt:
//!
//! ```text
//! SUCCESS: Could read /etc/passwd:
//! root:x:0:0:root:/root:/bin/bash
//! BLOCKED: Could not connect to 8.8.8.8:53
//! ```
//!
//! The `SUCCESS:` / `BLOCKED:` prefixes are the only machine-readable
//! contract; a harness greps for them. Evidence attached to a success is
//! capped here, so no probe can turn the signal channel into an unbounded
//! exfiltration path.

use log::{error, warn};
use std::any::Any;
use std::fmt;
use std::io::{self, Write};
use std::panic::{self, AssertUnwindSafe};

use crate::errors::ProbeError;

/// Maximum number of evidence lines carried by one verdict
pub const MAX_EVIDENCE_LINES: usize = 3;

/// Maximum length in bytes of a single evidence line
pub const MAX_EVIDENCE_LINE_BYTES: usize = 256;

/// Whether the attempted operation got through the sandbox
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The platform allowed the operation: the sandbox did not contain it
    Success,
    /// The platform refused the operation
    Blocked,
}

impl Outcome {
    /// Line prefix a harness matches on
    pub fn prefix(self) -> &'static str {
        match self {
            Outcome::Success => "SUCCESS:",
            Outcome::Blocked => "BLOCKED:",
        }
    }
}

/// Outcome of one attempted forbidden operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    outcome: Outcome,
    subject: String,
    evidence: Vec<String>,
}

impl Verdict {
    pub fn success(subject: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Success,
            subject: one_line(subject.into()),
            evidence: Vec::new(),
        }
    }

    pub fn blocked(subject: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Blocked,
            subject: one_line(subject.into()),
            evidence: Vec::new(),
        }
    }

    /// Blocked verdict with a diagnostic appended to the subject
    pub fn blocked_because(subject: impl fmt::Display, reason: impl fmt::Display) -> Self {
        Self::blocked(format!("{}: {}", subject, reason))
    }

    /// Attach captured data, keeping at most [`MAX_EVIDENCE_LINES`] lines of
    /// at most [`MAX_EVIDENCE_LINE_BYTES`] bytes each.
    pub fn with_evidence<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.evidence = lines
            .into_iter()
            .take(MAX_EVIDENCE_LINES)
            .map(|line| clip(line.into()))
            .collect();
        self
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn evidence(&self) -> &[String] {
        &self.evidence
    }

    pub fn is_blocked(&self) -> bool {
        self.outcome == Outcome::Blocked
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.outcome.prefix(), self.subject)?;
        for line in &self.evidence {
            write!(f, "\n{}", line)?;
        }
        Ok(())
    }
}

/// Subjects carry paths and panic text; control characters are escaped so a
/// subject always renders as exactly one line.
fn one_line(subject: String) -> String {
    if !subject.chars().any(char::is_control) {
        return subject;
    }
    let mut line = String::with_capacity(subject.len() + 8);
    for c in subject.chars() {
        if c.is_control() {
            line.extend(c.escape_debug());
        } else {
            line.push(c);
        }
    }
    line
}

fn clip(mut line: String) -> String {
    // Evidence is a single line on the wire.
    if let Some(pos) = line.find(['\n', '\r']) {
        line.truncate(pos);
    }
    if line.len() > MAX_EVIDENCE_LINE_BYTES {
        let mut end = MAX_EVIDENCE_LINE_BYTES;
        while !line.is_char_boundary(end) {
            end -= 1;
        }
        line.truncate(end);
    }
    line
}

/// Line-oriented writer for the signal channel.
///
/// Every line is flushed immediately so a harness sees it even when the
/// probe is killed right after. A failed write is logged and dropped: losing
/// stdout must not turn into a crash that masks the probe's other evidence.
pub struct Reporter<W: Write> {
    out: W,
}

impl Reporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Emit a verdict
    pub fn verdict(&mut self, verdict: &Verdict) {
        self.emit(format_args!("{}", verdict));
    }

    /// Emit an announcement or progress line
    pub fn line(&mut self, message: impl fmt::Display) {
        self.emit(format_args!("{}", message));
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: fmt::Arguments<'_>) {
        let result = self
            .out
            .write_fmt(text)
            .and_then(|_| self.out.write_all(b"\n"))
            .and_then(|_| self.out.flush());
        if let Err(e) = result {
            warn!("signal channel write failed: {}", e);
        }
    }
}

/// Run one sub-probe, converting a panic inside it into a `BLOCKED:` verdict
/// so the remaining sub-probes still get their turn.
pub fn attempt<W, F>(reporter: &mut Reporter<W>, subject: &str, op: F)
where
    W: Write,
    F: FnOnce(&mut Reporter<W>),
{
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| op(&mut *reporter)));
    if let Err(payload) = outcome {
        let message = panic_message(payload.as_ref());
        error!("{} aborted: {}", subject, message);
        reporter.verdict(&Verdict::blocked_because(
            subject,
            ProbeError::Panic(message),
        ));
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(reporter: Reporter<Vec<u8>>) -> String {
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn test_success_line_format() {
        let v = Verdict::success("Connected to 8.8.8.8:53");
        assert_eq!(v.to_string(), "SUCCESS: Connected to 8.8.8.8:53");
        assert!(!v.is_blocked());
    }

    #[test]
    fn test_blocked_line_format() {
        let v = Verdict::blocked("Could not create socket");
        assert_eq!(v.to_string(), "BLOCKED: Could not create socket");
        assert!(v.is_blocked());
    }

    #[test]
    fn test_blocked_because_appends_reason() {
        let v = Verdict::blocked_because("Could not allocate memory", "out of memory");
        assert_eq!(v.subject(), "Could not allocate memory: out of memory");
    }

    #[test]
    fn test_evidence_follows_verdict_line() {
        let v = Verdict::success("Could read /etc/passwd:").with_evidence(["a", "b"]);
        assert_eq!(v.to_string(), "SUCCESS: Could read /etc/passwd:\na\nb");
    }

    #[test]
    fn test_evidence_line_count_is_capped() {
        let lines: Vec<String> = (0..100).map(|i| format!("line {}", i)).collect();
        let v = Verdict::success("x").with_evidence(lines);
        assert_eq!(v.evidence().len(), MAX_EVIDENCE_LINES);
        assert_eq!(v.evidence()[2], "line 2");
    }

    #[test]
    fn test_evidence_line_length_is_capped() {
        let v = Verdict::success("x").with_evidence(["é".repeat(1000)]);
        let line = &v.evidence()[0];
        assert!(line.len() <= MAX_EVIDENCE_LINE_BYTES);
        assert!(line.chars().all(|c| c == 'é'));
    }

    #[test]
    fn test_evidence_cannot_smuggle_newlines() {
        let v = Verdict::success("x").with_evidence(["first\nsecond\nthird"]);
        assert_eq!(v.evidence(), ["first".to_string()]);
        assert_eq!(v.to_string().lines().count(), 2);
    }

    #[test]
    fn test_subject_control_characters_are_escaped() {
        let v = Verdict::blocked("Could not read /x\nSUCCESS: forged\r");
        assert_eq!(v.to_string(), "BLOCKED: Could not read /x\\nSUCCESS: forged\\r");
        assert_eq!(v.to_string().lines().count(), 1);

        let v = Verdict::blocked_because("subject", "line one\nSUCCESS: line two");
        assert_eq!(v.to_string().lines().count(), 1);
    }

    #[test]
    fn test_reporter_writes_one_line_per_call() {
        let mut reporter = Reporter::new(Vec::new());
        reporter.line("Attempting to access network...");
        reporter.verdict(&Verdict::blocked("Could not create socket"));
        assert_eq!(
            output(reporter),
            "Attempting to access network...\nBLOCKED: Could not create socket\n"
        );
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_reporter_survives_closed_channel() {
        let mut reporter = Reporter::new(ClosedPipe);
        reporter.verdict(&Verdict::success("still alive"));
    }

    #[test]
    fn test_attempt_converts_panic_to_blocked() {
        let mut reporter = Reporter::new(Vec::new());
        attempt(&mut reporter, "Could not run sub-probe", |_| {
            panic!("capacity overflow");
        });
        attempt(&mut reporter, "second", |r| r.line("second ran"));
        let text = output(reporter);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("BLOCKED: Could not run sub-probe"));
        assert!(lines[0].contains("capacity overflow"));
        assert_eq!(lines[1], "second ran");
    }

    #[test]
    fn test_attempt_passes_through_normal_output() {
        let mut reporter = Reporter::new(Vec::new());
        attempt(&mut reporter, "unused", |r| {
            r.verdict(&Verdict::success("fine"));
        });
        assert_eq!(output(reporter), "SUCCESS: fine\n");
    }
}
