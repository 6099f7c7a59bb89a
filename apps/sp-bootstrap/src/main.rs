//! SAML Service Provider runtime
//!
//! Loads the circle of trust from IdP metadata at startup, keeps it
//! available until shutdown, then runs the teardown hook.

mod config;
mod logging;

use config::Config;
use saml_cot::{CircleOfTrust, ContextListener, MetadataLoader, SpContextListener};
use std::fmt;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() {
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = logging::init_logging(&config.rust_log) {
        eprintln!("Error: invalid log filter {:?}: {e}", config.rust_log);
        std::process::exit(1);
    }

    info!(
        version = env!("CARGO_PKG_VERSION"),
        idp_metadata_dir = %config.idp_metadata_dir.display(),
        sp_entity_id = %config.sp_entity_id,
        "Starting SAML Service Provider"
    );

    let cot = CircleOfTrust::global();
    let loader = MetadataLoader::new(&config.idp_metadata_dir)
        .with_max_metadata_bytes(config.max_metadata_bytes);
    let listener = SpContextListener::new(cot, config.service_provider(), loader);

    listener.context_initialized();

    match serde_json::to_string(&cot.summary()) {
        Ok(summary) => info!(summary = %summary, "Circle of trust ready"),
        Err(e) => warn!(error = %e, "Failed to serialize circle of trust summary"),
    }

    let reason = wait_for_shutdown().await;
    info!(reason = %reason, "Stopping Service Provider");

    listener.context_destroyed();
}

/// Signal that ended the runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShutdownReason {
    Interrupt,
    Terminate,
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interrupt => f.write_str("SIGINT"),
            Self::Terminate => f.write_str("SIGTERM"),
        }
    }
}

/// Resolve on SIGINT or SIGTERM. A listener that cannot be installed
/// never fires, so the other one still decides.
async fn wait_for_shutdown() -> ShutdownReason {
    let interrupt = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "SIGINT listener unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "SIGTERM listener unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => ShutdownReason::Interrupt,
        () = terminate => ShutdownReason::Terminate,
    }
}
