use std::{borrow::Cow, env, fs, path::PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use regex::Captures;
use regex::Regex;

use crate::{
    connector::{
        definition::ConnectorDefinition, BackupProvider, ConnectorKeys, ConnectorLookup,
    },
    mealie::{MealieConnector, DEFAULT_CREATE_TIMEOUT_SECS, DEFAULT_LIST_TIMEOUT_SECS},
};

pub const HOME_ENV: &str = "MEALIE_BACKUP_HOME";

const CONFIG_FILE: &str = "mealie-backup.yaml";
const CONNECTORS_DIR: &str = "connectors";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_create_timeout")]
    pub create_timeout_secs: u64,

    #[serde(default = "default_list_timeout")]
    pub list_timeout_secs: u64,
}

fn default_create_timeout() -> u64 {
    DEFAULT_CREATE_TIMEOUT_SECS
}

fn default_list_timeout() -> u64 {
    DEFAULT_LIST_TIMEOUT_SECS
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            create_timeout_secs: DEFAULT_CREATE_TIMEOUT_SECS,
            list_timeout_secs: DEFAULT_LIST_TIMEOUT_SECS,
        }
    }
}

/// Owns the home directory: tool config plus one YAML file per connector.
#[derive(Debug, Clone)]
pub struct Engine {
    pub home_path: PathBuf,
}

impl Engine {
    /// Use `home_override` when given, otherwise `~/.mealie-backup`.
    pub fn locate(home_override: Option<PathBuf>) -> anyhow::Result<Self> {
        let home_path = match home_override {
            Some(path) => path,
            None => homedir::get_my_home()
                .map_err(|e| anyhow::anyhow!("Unable to determine your home directory: {:?}", e))?
                .ok_or_else(|| {
                    anyhow::anyhow!(
                        "Unable to determine your home directory. Set {} instead.",
                        HOME_ENV
                    )
                })?
                .join(".mealie-backup"),
        };

        Ok(Self { home_path })
    }

    pub fn get_home(&self) -> PathBuf {
        self.home_path.clone()
    }

    pub fn get_connectors_path(&self) -> PathBuf {
        self.home_path.join(CONNECTORS_DIR)
    }

    pub fn get_definition_path(&self, label: &str) -> PathBuf {
        self.get_connectors_path().join(format!("{}.yaml", label))
    }

    pub fn ensure_home(&self) -> anyhow::Result<()> {
        let home = self.get_home();

        if !home.exists() {
            info!(
                "Home directory {} doesn't exist. Creating...",
                home.to_string_lossy()
            );
            fs::create_dir_all(&home)?;
        }

        let connectors = self.get_connectors_path();

        if !connectors.exists() {
            info!(
                "Connectors directory {} doesn't exist. Creating...",
                connectors.to_string_lossy()
            );
            fs::create_dir(&connectors)?;
        }

        if !home.join(CONFIG_FILE).exists() {
            self.write_config(&EngineConfig::default())?;
        }

        Ok(())
    }

    pub fn get_config(&self) -> anyhow::Result<EngineConfig> {
        Ok(serde_yaml::from_str(&fs::read_to_string(
            self.get_home().join(CONFIG_FILE),
        )?)?)
    }

    pub fn write_config(&self, config: &EngineConfig) -> anyhow::Result<()> {
        Ok(fs::write(
            self.get_home().join(CONFIG_FILE),
            serde_yaml::to_string(config)?,
        )?)
    }

    /// Load and validate the Mealie connector named by `keys`.
    pub fn mealie_connector(&self, keys: &ConnectorKeys) -> anyhow::Result<Option<MealieConnector>> {
        if !keys.is_mealie() {
            debug!("{} is not a mealie connector", keys);
            return Ok(None);
        }

        if !self.get_definition_path(&keys.label).exists() {
            debug!(
                "No connector definition at {}",
                self.get_definition_path(&keys.label).display()
            );
            return Ok(None);
        }

        let (_, mut definition) = ConnectorDefinition::get(self, &keys.label)?;
        let config = self.config_or_default()?;

        definition
            .create_timeout_secs
            .get_or_insert(config.create_timeout_secs);
        definition
            .list_timeout_secs
            .get_or_insert(config.list_timeout_secs);

        let connector = MealieConnector::new(&definition)
            .map_err(|e| anyhow::Error::new(e).context(format!("Cannot load connector {}", keys)))?;

        Ok(Some(connector))
    }

    fn config_or_default(&self) -> anyhow::Result<EngineConfig> {
        if self.get_home().join(CONFIG_FILE).exists() {
            self.get_config()
        } else {
            Ok(EngineConfig::default())
        }
    }
}

impl ConnectorLookup for Engine {
    fn get_connector(&self, keys: &str) -> anyhow::Result<Option<Box<dyn BackupProvider>>> {
        let Some(keys) = ConnectorKeys::parse(keys) else {
            return Ok(None);
        };

        Ok(self
            .mealie_connector(&keys)?
            .map(|connector| Box::new(connector) as Box<dyn BackupProvider>))
    }
}

// (c) Joe_Jingyu - https://stackoverflow.com/questions/62888154/rust-load-environment-variables-into-log4rs-yml-file
/// Replace `${VAR}` references with values from the environment. Unknown
/// variables are left untouched.
pub fn expand_var(raw_config: &str) -> Cow<str> {
    let re = Regex::new(r"\$\{([a-zA-Z_][0-9a-zA-Z_]*)\}").unwrap();
    re.replace_all(raw_config, |caps: &Captures| match env::var(&caps[1]) {
        Ok(val) => val,
        Err(_) => caps[0].to_string(),
    })
}
