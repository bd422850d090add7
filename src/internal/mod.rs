//! Cascadelog's own diagnostics: rotation, retention and config traces.
//!
//! A process-wide logger that must be initialised explicitly with [`init`];
//! until then every helper is a silent no-op. It writes to stderr only and
//! never through a file writer, so a diagnostic raised while a file writer
//! holds its lock cannot re-enter that writer.

use crate::encoder::TextEncoder;
use crate::level::Level;
use crate::logger::Logger;
use crate::output::ConsoleWriter;
use std::sync::OnceLock;
use std::time::Duration;

static INTERNAL_LOGGER: OnceLock<Logger> = OnceLock::new();

/// Turns on internal diagnostics at `level`. Only the first call takes effect.
pub fn init(level: Level) {
    let was_init = INTERNAL_LOGGER.get().is_some();
    INTERNAL_LOGGER.get_or_init(|| {
        Logger::builder()
            .level(level)
            .flush_interval(Duration::ZERO)
            .backlog(8)
            .encoder(TextEncoder::default())
            .writer(ConsoleWriter::stderr_only())
            .build()
    });
    if !was_init {
        debug("INTERNAL", &format!("Internal logger ready at {level}"));
    }
}

/// Whether [`init`] has run.
#[must_use]
pub fn is_enabled() -> bool {
    INTERNAL_LOGGER.get().is_some()
}

#[track_caller]
fn log(level: Level, scope: &str, msg: &str) {
    if let Some(logger) = INTERNAL_LOGGER.get() {
        logger.with_field("scope", scope).depth(level, 0, msg);
    }
}

#[track_caller]
pub fn debug(scope: &str, msg: &str) {
    log(Level::Debug, scope, msg);
}

#[track_caller]
pub fn info(scope: &str, msg: &str) {
    log(Level::Info, scope, msg);
}

#[track_caller]
pub fn warn(scope: &str, msg: &str) {
    log(Level::Warn, scope, msg);
}

/// Runtime failures the logging call site never sees, such as a failed rotation.
#[track_caller]
pub fn error(scope: &str, msg: &str) {
    log(Level::Error, scope, msg);
}
