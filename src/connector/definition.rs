use capturing_glob::glob;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::engine::{expand_var, Engine};

/// A Mealie connector as stored in `connectors/<label>.yaml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConnectorDefinition {
    #[serde(default)]
    pub token: String,

    #[serde(default)]
    pub base_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_timeout_secs: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_timeout_secs: Option<u64>,
}

impl ConnectorDefinition {
    pub fn create(definition: &ConnectorDefinition, path: &Path) -> anyhow::Result<()> {
        if path.exists() {
            return Err(anyhow::anyhow!(
                "A connector definition already exists with the same label at {}",
                path.display()
            ));
        }

        Self::save(definition, path)
    }

    pub fn save(definition: &ConnectorDefinition, path: &Path) -> anyhow::Result<()> {
        fs::write(path, serde_yaml::to_string(definition)?)?;
        Ok(())
    }

    pub fn list(engine: &Engine) -> anyhow::Result<Vec<(String, ConnectorDefinition)>> {
        let mut results = vec![];

        let pattern = format!(
            "{}/(*).yaml",
            engine.get_connectors_path().to_string_lossy()
        );

        for entry in glob(&pattern)
            .map_err(|e| anyhow::anyhow!("Bad glob pattern: {}", e))?
            .flatten()
        {
            if let Some(label) = entry.group(1).and_then(|label| label.to_str()) {
                results.push((String::from(label), Self::get(engine, label)?.1));
            }
        }

        results.sort_by(|(a, _), (b, _)| a.cmp(b));

        Ok(results)
    }

    pub fn get(engine: &Engine, label: &str) -> anyhow::Result<(PathBuf, ConnectorDefinition)> {
        let path = engine.get_definition_path(label);

        if !path.exists() {
            return Err(anyhow::anyhow!(
                "The connector definition for {} does not exist at {}",
                label,
                path.to_string_lossy()
            ));
        }

        let raw = fs::read_to_string(&path)?;

        Ok((path, serde_yaml::from_str(&expand_var(&raw))?))
    }

    /// The token with everything but its last four characters hidden. Short
    /// tokens are hidden entirely.
    pub fn masked_token(&self) -> String {
        if self.token.is_empty() {
            return "(unset)".to_string();
        }

        let count = self.token.chars().count();
        let visible: String = if count > 8 {
            self.token.chars().skip(count - 4).collect()
        } else {
            String::new()
        };

        format!("****{}", visible)
    }
}
