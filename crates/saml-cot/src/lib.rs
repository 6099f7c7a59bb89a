//! SAML Service Provider circle of trust
//!
//! This crate loads the Identity Providers an SP trusts:
//! - SAML 2.0 `EntityDescriptor` metadata parsing
//! - Process-wide registry of IdPs keyed by entity id
//! - Directory loader for `*.xml` metadata files
//! - Startup/teardown hook for the hosting runtime

pub mod bootstrap;
pub mod cot;
pub mod error;
pub mod idp;
pub mod lifecycle;
pub mod loader;
pub mod metadata;
pub mod sp;

pub use cot::{CircleOfTrust, CotSummary};
pub use error::{BootstrapError, CotError, CotResult};
pub use idp::IdentityProvider;
pub use lifecycle::{ContextListener, SpContextListener};
pub use loader::{
    LoadReport, MetadataLoader, RejectedFile, ScanOutcome, DEFAULT_IDP_METADATA_DIR,
};
pub use metadata::{EntityDescriptor, Endpoint, IdpSsoDescriptor, KeyDescriptor, KeyUsage};
pub use sp::ServiceProvider;
