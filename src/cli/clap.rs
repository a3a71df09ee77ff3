use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::outcome::Outcome;

/// Trigger and track backups of a self-hosted Mealie server.
#[derive(Parser)]
#[command(author, about, version)]
pub struct Options {
    /// Directory holding connector definitions. Default: ~/.mealie-backup
    #[arg(long, env = "MEALIE_BACKUP_HOME", global = true)]
    pub home: Option<PathBuf>,

    /// Output JSON on stdout - useful for CI or piping into other utilities
    #[arg(short, long, global = true)]
    pub json: bool,

    #[clap(subcommand)]
    pub subcommand: SubCommand,
}

#[derive(Subcommand, Debug)]
pub enum SubCommand {
    /// Create backups through a connector
    Backup(BackupArgs),
    /// List the backups held by a Mealie server, oldest first
    Ls(ConnectorKeysArgs),
    /// Manage connector definitions
    Connector(ConnectorArgs),
    /// Print the command-line reference as Markdown
    #[cfg(feature = "markdown-docs")]
    #[command(hide = true)]
    MarkdownHelp,
}

#[derive(Args, Debug)]
pub struct BackupArgs {
    #[clap(subcommand)]
    pub subcommand: BackupCommand,
}

#[derive(Subcommand, Debug)]
pub enum BackupCommand {
    /// Create a new backup on a Mealie server and report its filename
    Mealie(ConnectorKeysArgs),
}

#[derive(Args, Debug)]
pub struct ConnectorKeysArgs {
    /// Connector keys, e.g. `mealie:foo`. Only the first one is used.
    #[arg(short = 'c', long = "connector-keys", value_name = "KEYS")]
    pub connector_keys: Vec<String>,
}

#[derive(Args, Debug)]
pub struct ConnectorArgs {
    #[clap(subcommand)]
    pub subcommand: ConnectorCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConnectorCommand {
    /// Create a new Mealie connector definition
    New(ConnectorNewArgs),

    /// Open a connector definition in your default text editor
    Edit(ConnectorLabelArgs),

    /// List all connector definitions
    List,
}

#[derive(Args, Debug)]
pub struct ConnectorNewArgs {
    /// Label for the new connector, used as `mealie:<LABEL>`
    #[arg(index = 1, value_name = "LABEL")]
    pub label: String,

    /// API token generated from the Mealie user profile. `${VAR}` is expanded on load.
    #[arg(short, long)]
    pub token: Option<String>,

    /// Base URL of the Mealie server, e.g. https://mealie.example.com
    #[arg(short, long)]
    pub base_url: Option<String>,
}

#[derive(Args, Debug)]
pub struct ConnectorLabelArgs {
    /// Connector label
    #[arg(index = 1, value_name = "LABEL")]
    pub label: String,
}

pub struct CliResponse {
    pub success: bool,
    pub msg: String,
    pub data: Option<String>,
}

impl CliResponse {
    pub fn from_outcome(outcome: &Outcome) -> anyhow::Result<Self> {
        Ok(Self {
            success: outcome.success,
            msg: outcome.msg.to_owned(),
            data: Some(serde_json::to_string(outcome)?),
        })
    }
}
