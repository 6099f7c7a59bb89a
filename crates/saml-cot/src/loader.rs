//! IdP metadata directory loader
//!
//! Scans a directory for `*.xml` metadata files and turns each into an
//! [`IdentityProvider`]. A file that cannot be read or parsed is logged and
//! skipped; it never aborts the scan.

use crate::cot::CircleOfTrust;
use crate::error::{CotError, CotResult};
use crate::idp::IdentityProvider;
use crate::metadata::{EntityDescriptor, DEFAULT_MAX_METADATA_BYTES};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Directory scanned when nothing else is configured
pub const DEFAULT_IDP_METADATA_DIR: &str = "/tmp";

/// Suffix (case-sensitive) identifying metadata files
pub const METADATA_FILE_SUFFIX: &str = ".xml";

/// A metadata file that was skipped, with the reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of scanning the metadata directory
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub providers: Vec<IdentityProvider>,
    pub rejected: Vec<RejectedFile>,
}

/// Result of loading the metadata directory into a registry
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadReport {
    /// Successful registrations, overwrites included
    pub loaded: usize,
    pub rejected: Vec<RejectedFile>,
}

/// Loads IdP metadata files from one directory
#[derive(Debug, Clone)]
pub struct MetadataLoader {
    dir: PathBuf,
    max_metadata_bytes: u64,
}

impl Default for MetadataLoader {
    fn default() -> Self {
        Self::new(DEFAULT_IDP_METADATA_DIR)
    }
}

impl MetadataLoader {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            max_metadata_bytes: DEFAULT_MAX_METADATA_BYTES,
        }
    }

    #[must_use]
    pub fn with_max_metadata_bytes(mut self, max_metadata_bytes: u64) -> Self {
        self.max_metadata_bytes = max_metadata_bytes;
        self
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Parse every metadata file in the directory.
    ///
    /// Files are visited in file-name order, so when two files declare the
    /// same entity id the one sorting last is registered last.
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    pub fn scan(&self) -> ScanOutcome {
        let mut outcome = ScanOutcome::default();

        let entries = match self.list_entries() {
            Some(entries) if !entries.is_empty() => entries,
            _ => {
                info!("No configured IdPs");
                return outcome;
            }
        };

        for path in entries.into_iter().filter(|p| is_metadata_file(p)) {
            info!(path = %path.display(), "Process IdP file descriptor");

            match self.load_file(&path) {
                Ok(descriptor) => outcome.providers.push(IdentityProvider::new(descriptor)),
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "Error loading IdP");
                    info!(path = %path.display(), "Invalid IdP");
                    outcome.rejected.push(RejectedFile {
                        path,
                        reason: e.to_string(),
                    });
                }
            }
        }

        outcome
    }

    /// Scan the directory and register every parsed IdP under its entity id.
    pub fn load_into(&self, cot: &CircleOfTrust) -> LoadReport {
        let ScanOutcome {
            providers,
            rejected,
        } = self.scan();

        let loaded = providers.len();
        for idp in providers {
            let entity_id = idp.entity_id().to_string();
            debug!(entity_id = %entity_id, "Registering IdP");
            cot.add_idp(entity_id, idp);
        }

        LoadReport { loaded, rejected }
    }

    /// Read and parse one metadata file
    pub fn load_file(&self, path: &Path) -> CotResult<EntityDescriptor> {
        let file = File::open(path).map_err(|source| CotError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        EntityDescriptor::from_reader(file, self.max_metadata_bytes).map_err(|e| e.with_path(path))
    }

    /// Directory entries, sorted. `None` when the directory cannot be listed.
    fn list_entries(&self) -> Option<Vec<PathBuf>> {
        if !self.dir.is_dir() {
            return None;
        }

        let read_dir = match fs::read_dir(&self.dir) {
            Ok(read_dir) => read_dir,
            Err(e) => {
                debug!(error = %e, "Cannot list IdP metadata directory");
                return None;
            }
        };

        let mut paths = Vec::new();
        for entry in read_dir {
            match entry {
                Ok(entry) => paths.push(entry.path()),
                Err(e) => debug!(error = %e, "Skipping unreadable directory entry"),
            }
        }
        paths.sort();

        Some(paths)
    }
}

fn is_metadata_file(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().ends_with(METADATA_FILE_SUFFIX))
}
