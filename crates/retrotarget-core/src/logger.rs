//! Stderr logger for onboard runs.
//!
//! Lines look like `[  12.345s  INFO segment] message`: seconds since the
//! logger was installed, the level, and the last segment of the module path.
//! Install once at startup with [`init_with_level`], or with
//! [`init_from_env`] to let the vision process's launcher pick the level
//! through `RETROTARGET_LOG` (`off`, `error`, `warn`, `info`, `debug`,
//! `trace`).

use std::io::Write;
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

struct FrameLogger {
    level: LevelFilter,
    started: Instant,
}

fn short_target(target: &str) -> &str {
    target.rsplit("::").next().unwrap_or(target)
}

impl Log for FrameLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let elapsed = self.started.elapsed().as_secs_f64();
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(
            stderr,
            "[{:8.3}s {:>5} {}] {}",
            elapsed,
            record.level(),
            short_target(record.target()),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: OnceLock<FrameLogger> = OnceLock::new();

/// Install the stderr logger with the given level filter.
///
/// Later calls are no-ops once a logger has been installed.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_some() {
        return Ok(());
    }
    let logger = LOGGER.get_or_init(|| FrameLogger {
        level,
        started: Instant::now(),
    });
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}

/// Environment variable read by [`init_from_env`].
pub const LOG_ENV: &str = "RETROTARGET_LOG";

/// Parse a level name, falling back to `default` when it is missing or
/// unknown.
pub fn level_from_str(value: Option<&str>, default: LevelFilter) -> LevelFilter {
    value
        .map(str::trim)
        .and_then(|v| LevelFilter::from_str(v).ok())
        .unwrap_or(default)
}

/// Install the stderr logger at the level named by [`LOG_ENV`].
pub fn init_from_env(default: LevelFilter) -> Result<LevelFilter, log::SetLoggerError> {
    let raw = std::env::var(LOG_ENV).ok();
    let level = level_from_str(raw.as_deref(), default);
    init_with_level(level)?;
    Ok(level)
}

/// Install a `tracing` subscriber honoring `RUST_LOG` (default `info`).
///
/// With `json = true` events are emitted as flattened JSON objects.
#[cfg(feature = "tracing")]
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE);
    if json {
        let _ = builder.json().flatten_event(true).finish().try_init();
    } else {
        let _ = builder
            .with_timer(fmt::time::Uptime::default())
            .finish()
            .try_init();
    }
}
