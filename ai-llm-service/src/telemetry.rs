//! Library-scoped log rendering for the rewrite client.
//!
//! Compose [`layer`] into the binary's subscriber next to the application
//! layer; it only renders events whose target starts with [`TARGET_PREFIX`].

use std::io::{self, IsTerminal};

use tracing::Level;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, filter, fmt};

/// Crate target prefix used to filter only library-originated logs.
pub const TARGET_PREFIX: &str = "ai_llm_service";

/// RFC3339 UTC timer, e.g. `2025-09-12T10:20:30Z`.
#[derive(Clone, Debug, Default)]
struct ChronoRfc3339Utc;

impl FormatTime for ChronoRfc3339Utc {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let now = chrono::Utc::now();
        w.write_str(&now.to_rfc3339_opts(chrono::SecondsFormat::Secs, true))
    }
}

/// Compact single-line layer for this crate's events only.
///
/// Span close events are rendered so `#[instrument]`ed provider calls report
/// their duration. ANSI colors are used only when stdout is a terminal.
pub fn layer<S>() -> impl Layer<S> + Send + Sync
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    let only_this_crate = filter::filter_fn(|meta| meta.target().starts_with(TARGET_PREFIX));

    let format = fmt::format()
        .compact()
        .with_timer(ChronoRfc3339Utc)
        .with_target(true)
        .with_source_location(true);

    fmt::layer()
        .with_ansi(io::stdout().is_terminal())
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .event_format(format)
        .with_filter(only_this_crate)
}

/// `EnvFilter` from `RUST_LOG` (or `default`), with `level` applied to this crate.
pub fn env_filter_with_level(default: &str, level: Level) -> EnvFilter {
    let base = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let directive = format!("{TARGET_PREFIX}={}", level.as_str().to_lowercase());
    match directive.parse() {
        Ok(d) => base.add_directive(d),
        Err(_) => base,
    }
}
