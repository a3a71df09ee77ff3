use anyhow::Result;
use mealie_backup::{
    connector::definition::ConnectorDefinition,
    engine::{Engine, HOME_ENV},
};
use std::path::PathBuf;
use tempfile::TempDir;

pub mod fixture_connector;

pub type TestResult = Result<()>;

#[derive(Debug)]
pub struct TestContext {
    pub home: TempDir,
    pub engine: Engine,
}

impl TestContext {
    pub fn new() -> Result<Self> {
        let home = TempDir::new()?;

        Ok(Self {
            engine: Engine {
                home_path: home.path().to_path_buf(),
            },
            home,
        })
    }

    /// Write `connectors/<label>.yaml` into this context's home.
    pub fn add_connector(&self, label: &str, token: &str, base_url: &str) -> Result<PathBuf> {
        self.engine.ensure_home()?;

        let path = self.engine.get_definition_path(label);

        ConnectorDefinition::create(
            &ConnectorDefinition {
                token: token.to_string(),
                base_url: base_url.to_string(),
                ..Default::default()
            },
            &path,
        )?;

        Ok(path)
    }

    /// The binary, pointed at this context's home with colours disabled.
    pub fn command(&self) -> Result<assert_cmd::Command> {
        let mut cmd = assert_cmd::Command::cargo_bin("mealie-backup")?;
        cmd.env(HOME_ENV, self.home.path())
            .env("NO_COLOR", "1")
            .env("MEALIE_BACKUP_LOG_STYLE", "never");
        Ok(cmd)
    }
}
