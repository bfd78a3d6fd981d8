//! Log output setup
//!
//! The subscriber goes up before anything else runs so settings loading can
//! report its fallbacks. The level from the settings file is applied
//! afterwards through a reload handle, unless `RUST_LOG` is set.

use std::io;

use anyhow::{Context, Result};
use tracing::{warn, Subscriber};
use tracing_subscriber::fmt::format::{DefaultFields, Format};
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::{reload, EnvFilter, FmtSubscriber};

/// Filter used until settings are loaded, and for invalid configured levels
pub const DEFAULT_LEVEL: &str = "info";

/// Swaps the active filter of a running subscriber
pub type FilterHandle<W = fn() -> io::Stdout> =
    reload::Handle<EnvFilter, fmt::Formatter<DefaultFields, Format, W>>;

/// Build a reloadable subscriber writing to `writer`
pub fn subscriber<W>(
    filter: EnvFilter,
    writer: W,
) -> (impl Subscriber + Send + Sync + 'static, FilterHandle<W>)
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let builder = FmtSubscriber::builder()
        .with_writer(writer)
        .with_target(false)
        .with_env_filter(filter)
        .with_filter_reloading();
    let handle = builder.reload_handle();
    (builder.finish(), handle)
}

/// Install the global subscriber: `RUST_LOG` if set, otherwise [`DEFAULT_LEVEL`]
pub fn init() -> Result<FilterHandle> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));
    let (subscriber, handle) = subscriber(filter, io::stdout as fn() -> io::Stdout);
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;
    Ok(handle)
}

/// Apply the configured level. `RUST_LOG` wins when present.
pub fn apply_level(handle: &FilterHandle, level: &str) {
    if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() {
        return;
    }
    reload_level(handle, level);
}

/// Replace the filter behind `handle` with `level`, falling back to
/// [`DEFAULT_LEVEL`] when it does not parse
pub fn reload_level<W>(handle: &FilterHandle<W>, level: &str)
where
    W: for<'w> MakeWriter<'w> + 'static,
{
    let filter = EnvFilter::try_new(level).unwrap_or_else(|e| {
        warn!("Invalid log level '{}': {}, using {}", level, e, DEFAULT_LEVEL);
        EnvFilter::new(DEFAULT_LEVEL)
    });
    if let Err(e) = handle.reload(filter) {
        warn!("Failed to apply log level '{}': {}", level, e);
    }
}

/// In-memory log sink for tests
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct CapturedLog(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

#[cfg(test)]
impl CapturedLog {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

#[cfg(test)]
impl io::Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
impl<'a> MakeWriter<'a> for CapturedLog {
    type Writer = CapturedLog;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_level_takes_effect() {
        let log = CapturedLog::default();
        let (subscriber, handle) = subscriber(EnvFilter::new(DEFAULT_LEVEL), log.clone());

        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!("before reload");
            reload_level(&handle, "debug");
            tracing::debug!("after reload");
        });

        let out = log.contents();
        assert!(!out.contains("before reload"));
        assert!(out.contains("after reload"));
    }
}
