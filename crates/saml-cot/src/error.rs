//! Circle of trust error types

use std::path::PathBuf;
use thiserror::Error;

/// Result type for circle of trust operations
pub type CotResult<T> = Result<T, CotError>;

/// Errors raised while reading or parsing SAML metadata
#[derive(Debug, Error)]
pub enum CotError {
    /// Metadata file could not be read
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Metadata stream could not be read (no file path available)
    #[error("I/O error reading metadata: {0}")]
    Read(#[from] std::io::Error),

    /// Document is not well-formed XML
    #[error("Malformed metadata XML: {0}")]
    MalformedXml(String),

    /// Document contains no root element
    #[error("Metadata document has no root element")]
    EmptyDocument,

    /// Root element is not a SAML 2.0 `EntityDescriptor`
    #[error("Expected md:EntityDescriptor root element, found {0}")]
    WrongRootElement(String),

    /// `entityID` attribute is missing or empty
    #[error("EntityDescriptor is missing the entityID attribute")]
    MissingEntityId,

    /// `ds:X509Certificate` content is not valid base64
    #[error("Invalid X509Certificate content: {0}")]
    InvalidCertificate(String),

    /// `validUntil` is not an xs:dateTime
    #[error("Invalid validUntil value: {0}")]
    InvalidValidUntil(String),

    /// Metadata document exceeds the configured size cap
    #[error("Metadata exceeds maximum size ({limit} bytes)")]
    MetadataTooLarge { limit: u64 },
}

/// The metadata parsing stack failed its startup self-check
#[derive(Debug, Clone, Error)]
#[error("SAML metadata bootstrap failed: {0}")]
pub struct BootstrapError(pub String);

impl CotError {
    /// Attach a file path to a bare read error
    #[must_use]
    pub fn with_path(self, path: impl Into<PathBuf>) -> Self {
        match self {
            CotError::Read(source) => CotError::Io {
                path: path.into(),
                source,
            },
            other => other,
        }
    }
}
