use std::{cmp::Ordering, fmt, time::Duration};

use anyhow::Context;
use log::{debug, info, warn};
use reqwest::{
    blocking::Client,
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION},
    Url,
};
use serde::{Deserialize, Serialize};

use crate::{
    connector::{definition::ConnectorDefinition, BackupProvider, ConnectorError},
    outcome::Outcome,
};

/// Admin endpoint used both to create (POST) and list (GET) backups.
pub const BACKUPS_PATH: &str = "/api/admin/backups";

/// Creating a backup happens synchronously on the server and can be slow.
pub const DEFAULT_CREATE_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_LIST_TIMEOUT_SECS: u64 = 30;

/// When a backup was taken. Mealie reports an ISO-8601 string, but a numeric
/// timestamp is accepted too. Numbers order before strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BackupDate {
    Timestamp(serde_json::Number),
    Text(String),
}

impl Ord for BackupDate {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (BackupDate::Timestamp(a), BackupDate::Timestamp(b)) => {
                let a = a.as_f64().unwrap_or(f64::NAN);
                let b = b.as_f64().unwrap_or(f64::NAN);
                a.total_cmp(&b)
            }
            (BackupDate::Timestamp(_), BackupDate::Text(_)) => Ordering::Less,
            (BackupDate::Text(_), BackupDate::Timestamp(_)) => Ordering::Greater,
            (BackupDate::Text(a), BackupDate::Text(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for BackupDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for BackupDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackupDate::Timestamp(n) => write!(f, "{}", n),
            BackupDate::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for BackupDate {
    fn from(value: &str) -> Self {
        BackupDate::Text(value.to_string())
    }
}

/// A backup archive as reported by the Mealie server. Fields other than
/// `name` and `date` are kept for display only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupRecord {
    pub name: String,

    #[serde(default)]
    pub date: Option<BackupDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct CreateBackupResponse {
    error: bool,
    message: String,
}

#[derive(Debug, Deserialize)]
struct AllBackupsResponse {
    #[serde(default)]
    imports: Option<Vec<BackupRecord>>,
}

/// The record with the greatest `date`. Records without a date order first,
/// and of several records sharing the greatest date the last one wins.
pub fn latest_backup(records: &[BackupRecord]) -> Option<&BackupRecord> {
    records.iter().max_by(|a, b| a.date.cmp(&b.date))
}

/// Records ordered oldest first, keeping the server's order for equal dates.
pub fn sorted_backups(records: &[BackupRecord]) -> Vec<BackupRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| a.date.cmp(&b.date));
    sorted
}

/// Client for the backup endpoints of one Mealie server.
#[derive(Clone)]
pub struct MealieConnector {
    base_url: Url,
    backups_url: Url,
    authorization: HeaderValue,
    create_timeout: Duration,
    list_timeout: Duration,
    client: Client,
}

impl MealieConnector {
    pub fn new(definition: &ConnectorDefinition) -> Result<Self, ConnectorError> {
        let token = definition.token.trim();
        if token.is_empty() {
            return Err(ConnectorError::MissingAttribute("token"));
        }

        let raw_url = definition.base_url.trim();
        if raw_url.is_empty() {
            return Err(ConnectorError::MissingAttribute("base_url"));
        }

        let base_url = Url::parse(raw_url).map_err(|e| ConnectorError::InvalidBaseUrl {
            url: raw_url.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConnectorError::InvalidBaseUrl {
                url: raw_url.to_string(),
                reason: format!("unsupported scheme `{}`", base_url.scheme()),
            });
        }

        // An absolute path replaces whatever path the base URL carries.
        let backups_url =
            base_url
                .join(BACKUPS_PATH)
                .map_err(|e| ConnectorError::InvalidBaseUrl {
                    url: raw_url.to_string(),
                    reason: e.to_string(),
                })?;

        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| ConnectorError::InvalidToken)?;
        authorization.set_sensitive(true);

        let client = Client::builder()
            .user_agent(concat!("mealie-backup/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base_url,
            backups_url,
            authorization,
            create_timeout: Duration::from_secs(
                definition
                    .create_timeout_secs
                    .unwrap_or(DEFAULT_CREATE_TIMEOUT_SECS),
            ),
            list_timeout: Duration::from_secs(
                definition
                    .list_timeout_secs
                    .unwrap_or(DEFAULT_LIST_TIMEOUT_SECS),
            ),
            client,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn backups_url(&self) -> &Url {
        &self.backups_url
    }

    pub fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, self.authorization.clone());
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }
}

impl fmt::Debug for MealieConnector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MealieConnector")
            .field("base_url", &self.base_url.as_str())
            .field("create_timeout", &self.create_timeout)
            .field("list_timeout", &self.list_timeout)
            .finish_non_exhaustive()
    }
}

impl BackupProvider for MealieConnector {
    fn create_backup(&self) -> anyhow::Result<Outcome> {
        info!("Requesting a new backup from {}", self.base_url);

        let response = match self
            .client
            .post(self.backups_url.clone())
            .headers(self.headers())
            .timeout(self.create_timeout)
            .send()
        {
            Ok(response) => response,
            Err(e) => {
                warn!("Backup request to {} failed: {}", self.backups_url, e);
                return Ok(Outcome::failure(format!("Failed to create backup:\n{}", e)));
            }
        };

        let status = response.status();

        if !status.is_success() {
            let text = response.text().unwrap_or_default();
            warn!("Backup request to {} returned {}", self.backups_url, status);
            return Ok(Outcome::failure(format!("Failed to create backup:\n{}", text)));
        }

        let body: CreateBackupResponse = response
            .json()
            .context("Unexpected response from Mealie when creating a backup")?;

        debug!("Mealie replied error={} message={}", body.error, body.message);

        Ok(Outcome::new(!body.error, body.message))
    }

    fn list_backups(&self) -> anyhow::Result<Option<Vec<BackupRecord>>> {
        debug!("Listing backups at {}", self.backups_url);

        let response = match self
            .client
            .get(self.backups_url.clone())
            .headers(self.headers())
            .timeout(self.list_timeout)
            .send()
        {
            Ok(response) => response,
            Err(e) => {
                warn!("Could not list backups at {}: {}", self.backups_url, e);
                return Ok(None);
            }
        };

        if !response.status().is_success() {
            warn!(
                "Listing backups at {} returned {}",
                self.backups_url,
                response.status()
            );
            return Ok(None);
        }

        let body: AllBackupsResponse = response
            .json()
            .context("Unexpected response from Mealie when listing backups")?;

        Ok(body.imports)
    }
}
