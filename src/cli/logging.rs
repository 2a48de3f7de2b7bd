//! Module implementing logging for the application.
//!
//! Log records from the library (which uses the `log` crate)
//! are passed on to a `slog` logger that writes to standard error.

use slog::{o, Drain, Level, LevelFilter, Logger};
use slog_scope::GlobalLoggerGuard;


/// Level of logging when no -v or -q flags are given.
const DEFAULT_LEVEL: Level = Level::Info;


/// Initialize logging with given verbosity.
///
/// The returned guard must be kept alive for as long as logging is needed.
pub fn init(verbosity: isize) -> Result<GlobalLoggerGuard, log::SetLoggerError> {
    let level = level_for(verbosity);

    let decorator = slog_term::TermDecorator::new().stderr().build();
    let drain = slog_term::CompactFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    let drain = LevelFilter::new(drain, level).fuse();
    let logger = Logger::root(drain, o!());

    let guard = slog_scope::set_global_logger(logger);
    slog_stdlog::init_with_level(log_level(level))?;
    Ok(guard)
}

/// Logging level corresponding to given verbosity
/// (number of -v flags, or negated number of -q flags).
pub fn level_for(verbosity: isize) -> Level {
    let level = DEFAULT_LEVEL.as_usize() as isize + verbosity;
    let level = level.max(Level::Critical.as_usize() as isize)
        .min(Level::Trace.as_usize() as isize);
    Level::from_usize(level as usize).unwrap_or(DEFAULT_LEVEL)
}

fn log_level(level: Level) -> log::Level {
    match level {
        Level::Critical | Level::Error => log::Level::Error,
        Level::Warning => log::Level::Warn,
        Level::Info => log::Level::Info,
        Level::Debug => log::Level::Debug,
        Level::Trace => log::Level::Trace,
    }
}
