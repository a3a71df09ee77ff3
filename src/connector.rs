use anyhow::Result;
use core::fmt::{Debug, Display};
use dyn_clone::DynClone;
use thiserror::Error;

use crate::{
    mealie::{latest_backup, BackupRecord},
    outcome::Outcome,
};

pub mod definition;

/// The only connector type this tool knows how to resolve.
pub const MEALIE_CONNECTOR_TYPE: &str = "mealie";

/// Label assumed when connector keys carry no `:label` part.
pub const DEFAULT_LABEL: &str = "main";

#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("Missing required attribute `{0}` for this connector")]
    MissingAttribute(&'static str),

    #[error("Invalid base_url `{url}`: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("The token contains characters that cannot be sent in an HTTP header")]
    InvalidToken,

    #[error("Unable to build the HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// A configured account on a remote service that can create and list backups.
pub trait BackupProvider: DynClone + Send + Sync {
    /// Ask the remote service to create a new backup.
    fn create_backup(&self) -> Result<Outcome>;

    /// Backups currently held by the remote service. `None` when the service
    /// could not be reached or reported no list at all.
    fn list_backups(&self) -> Result<Option<Vec<BackupRecord>>>;

    /// Name of the most recently dated backup, if there is one.
    fn get_latest_backup_name(&self) -> Result<Option<String>> {
        Ok(self
            .list_backups()?
            .and_then(|records| latest_backup(&records).map(|record| record.name.to_owned())))
    }
}

dyn_clone::clone_trait_object!(BackupProvider);

impl Debug for dyn BackupProvider {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "BackupProvider()")
    }
}

/// Resolves connector keys (e.g. `mealie:foo`) to live connectors.
pub trait ConnectorLookup {
    /// `Ok(None)` means the keys do not name a known connector. Errors are
    /// reserved for connectors that exist but cannot be loaded.
    fn get_connector(&self, keys: &str) -> Result<Option<Box<dyn BackupProvider>>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectorKeys {
    pub connector_type: String,
    pub label: String,
}

impl ConnectorKeys {
    pub fn parse(keys: &str) -> Option<Self> {
        let keys = keys.trim();

        let (connector_type, label) = match keys.split_once(':') {
            Some((connector_type, label)) => (connector_type, label),
            None => (keys, DEFAULT_LABEL),
        };

        if connector_type.is_empty() || label.is_empty() || label.contains(['/', '\\']) {
            return None;
        }

        Some(Self {
            connector_type: connector_type.to_string(),
            label: label.to_string(),
        })
    }

    pub fn is_mealie(&self) -> bool {
        self.connector_type == MEALIE_CONNECTOR_TYPE
    }
}

impl Display for ConnectorKeys {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}:{}", self.connector_type, self.label)
    }
}
