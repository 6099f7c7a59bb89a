//! Application startup and teardown hook
//!
//! The hosting runtime calls [`ContextListener::context_initialized`] once at
//! startup and [`ContextListener::context_destroyed`] at shutdown.

use crate::bootstrap;
use crate::cot::CircleOfTrust;
use crate::loader::{LoadReport, MetadataLoader};
use crate::sp::ServiceProvider;
use tracing::{debug, error, info, instrument};

/// Lifecycle callbacks invoked by the hosting runtime
pub trait ContextListener {
    fn context_initialized(&self);

    fn context_destroyed(&self);
}

/// Populates the circle of trust from IdP metadata files at startup.
pub struct SpContextListener<'a> {
    cot: &'a CircleOfTrust,
    loader: MetadataLoader,
}

impl<'a> SpContextListener<'a> {
    /// Initialize the metadata stack and register this application's SP.
    ///
    /// A bootstrap failure is logged and does not prevent construction.
    pub fn new(cot: &'a CircleOfTrust, sp: ServiceProvider, loader: MetadataLoader) -> Self {
        if let Err(e) = bootstrap::initialize() {
            error!(error = %e, "Error initializing SAML");
        }

        cot.set_sp(sp);

        Self { cot, loader }
    }

    /// Load IdP metadata into the circle of trust.
    #[instrument(skip(self), name = "cot_bootstrap")]
    pub fn initialize(&self) -> LoadReport {
        let report = self.loader.load_into(self.cot);

        info!(
            dir = %self.loader.dir().display(),
            loaded = report.loaded,
            rejected = report.rejected.len(),
            idps = self.cot.idp_count(),
            "Circle of trust initialized"
        );

        report
    }
}

impl ContextListener for SpContextListener<'_> {
    fn context_initialized(&self) {
        self.initialize();
    }

    fn context_destroyed(&self) {
        debug!("Circle of trust listener destroyed");
    }
}
