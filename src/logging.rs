use console::style;
use env_logger::{Builder, Env, Target};
use log::Level;
use std::io::Write;

/// Initialize the diagnostic logger.
///
/// Diagnostics go to stderr so stdout carries nothing but verdicts and
/// progress. Verbosity comes from `RUST_LOG`, defaulting to `warn`.
pub fn init_logger() {
    let env = Env::default().filter_or("RUST_LOG", "warn");

    let _ = Builder::from_env(env)
        .target(Target::Stderr)
        .format(|buf, record| {
            let level = match record.level() {
                Level::Error => format!("{}", style("ERROR").red().bold()),
                Level::Warn => format!("{}", style("WARN ").yellow().bold()),
                Level::Info => format!("{}", style("INFO ").green()),
                Level::Debug => format!("{}", style("DEBUG").cyan()),
                Level::Trace => format!("{}", style("TRACE").dim()),
            };
            writeln!(buf, "{} [{}] {}", level, record.target(), record.args())
        })
        .try_init();
}
