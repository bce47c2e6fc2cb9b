use std::io::IsTerminal;

use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt};

use crate::Result;
use crate::error::Error;

/// Filter used when neither an explicit filter nor `RUST_LOG` is usable:
/// toast requests and transitions at `info`, dependencies only at `warn`.
pub const DEFAULT_FILTER: &str = "warn,toaster=info";

/// Install the global tracing subscriber.
///
/// Logs always go to stderr so they never interleave with toasts a console
/// host prints on stdout.
///
/// # Errors
///
/// Returns an error if no filter candidate is valid, if JSON output is
/// requested without the `json-logs` feature, or if a global subscriber was
/// already installed.
pub fn init_tracing(explicit_filter: Option<&str>, use_json: bool) -> Result<()> {
    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = select_filter(explicit_filter, rust_log.as_deref())?;

    #[cfg(feature = "json-logs")]
    if use_json {
        let subscriber = Registry::default().with(filter).with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .json()
                .flatten_event(true),
        );
        tracing::subscriber::set_global_default(subscriber)
            .map_err(|err| Error::Telemetry(err.to_string()))?;
        return Ok(());
    }

    #[cfg(not(feature = "json-logs"))]
    if use_json {
        return Err(Error::Telemetry(
            "binary was built without the `json-logs` feature".to_string(),
        ));
    }

    let subscriber = Registry::default().with(filter).with(
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_ansi(std::io::stderr().is_terminal())
            .with_writer(std::io::stderr),
    );
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|err| Error::Telemetry(err.to_string()))
}

/// First candidate that parses wins: `explicit`, then `rust_log`, then
/// [`DEFAULT_FILTER`]. Blank candidates are skipped.
fn select_filter(explicit: Option<&str>, rust_log: Option<&str>) -> Result<EnvFilter> {
    [explicit, rust_log, Some(DEFAULT_FILTER)]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|candidate| !candidate.is_empty())
        .find_map(|candidate| EnvFilter::try_new(candidate).ok())
        .ok_or_else(|| Error::Telemetry("invalid log filter".to_string()))
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_FILTER, select_filter};

    fn filter_text(explicit: Option<&str>, rust_log: Option<&str>) -> String {
        match select_filter(explicit, rust_log) {
            Ok(filter) => filter.to_string(),
            Err(err) => panic!("a filter should always be selected: {err}"),
        }
    }

    #[test]
    fn explicit_filter_wins_over_rust_log() {
        assert_eq!(filter_text(Some("toaster=debug"), Some("trace")), "toaster=debug");
    }

    #[test]
    fn invalid_or_blank_candidates_fall_through() {
        assert_eq!(filter_text(Some("toaster=[bad"), Some("  ")), filter_text(None, None));
        assert_eq!(filter_text(None, Some("debug")), "debug");
    }

    #[test]
    fn default_keeps_dependencies_quiet() {
        let text = filter_text(None, None);
        assert!(text.contains("toaster=info"));
        assert!(text.contains("warn"));
        assert!(DEFAULT_FILTER.starts_with("warn"));
    }
}
