//! JSON log output for the SP runtime.
//!
//! The filter directive comes from [`Config`](crate::config::Config), which
//! already prefers `RUST_LOG` over the built-in default.

use tracing_subscriber::filter::ParseError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Parse a filter directive such as `info,saml_cot=debug`.
pub fn log_filter(directive: &str) -> Result<EnvFilter, ParseError> {
    EnvFilter::try_new(directive)
}

/// Install the global subscriber. Call once, before the listener runs.
pub fn init_logging(directive: &str) -> Result<(), ParseError> {
    let filter = log_filter(directive)?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .json()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .flatten_event(true),
        )
        .with(filter)
        .init();

    tracing::debug!(directive, "Log filter installed");
    Ok(())
}
