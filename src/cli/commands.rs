use colored::*;
use dialoguer::{theme::ColorfulTheme, Input, Password};

use env_logger::Builder;
use log::{info, warn};
use std::io::Write;

use crate::{
    backup::{backup_mealie, MISSING_KEYS_MSG},
    cli::clap::{
        BackupCommand, CliResponse, ConnectorCommand, ConnectorKeysArgs, ConnectorNewArgs,
        Options, SubCommand,
    },
    connector::{definition::ConnectorDefinition, ConnectorKeys, ConnectorLookup},
    engine::Engine,
    mealie::{sorted_backups, MealieConnector},
    outcome::Outcome,
    progress::spinner,
};

fn init_logging() {
    let env = env_logger::Env::default()
        .filter_or("MEALIE_BACKUP_LOG_LEVEL", "info")
        .write_style_or("MEALIE_BACKUP_LOG_STYLE", "always");

    let _ = Builder::from_env(env)
        .format(|buf, record| {
            let level_style = buf.default_level_style(record.level());
            writeln!(
                buf,
                "{: ^9} {}",
                level_style.value(record.level()),
                record.args()
            )
        })
        .try_init();
}

/// The main entrypoint for our CLI. Returns a CliResponse in the result
pub fn run(engine: &Engine, options: Options) -> anyhow::Result<CliResponse> {
    init_logging();

    eprintln!(
        "{} {}",
        format!("mealie-backup {}", crate::PKG_VERSION).bold().green(),
        format!("| {}", crate::TARGET).white().dimmed()
    );
    eprintln!();

    engine.ensure_home()?;

    match options.subcommand {
        SubCommand::Backup(args) => match args.subcommand {
            BackupCommand::Mealie(args) => {
                let progress = spinner("Waiting for Mealie to create the backup...");

                let outcome = backup_mealie(engine, &args.connector_keys);

                progress.finish_and_clear();

                CliResponse::from_outcome(&outcome?)
            }
        },

        SubCommand::Ls(args) => list_backups(engine, &args),

        SubCommand::Connector(args) => match args.subcommand {
            ConnectorCommand::New(args) => new_connector(engine, args),

            ConnectorCommand::Edit(args) => {
                let (path, _) = ConnectorDefinition::get(engine, &args.label)?;

                edit::edit_file(&path)?;

                let (_, definition) = ConnectorDefinition::get(engine, &args.label)?;

                if let Err(e) = MealieConnector::new(&definition) {
                    warn!("mealie:{} will not load: {}", args.label, e);
                }

                Ok(CliResponse {
                    success: true,
                    msg: format!("Edited connector definition at {}", path.display()),
                    data: Some(serde_json::to_string(&summary(
                        &args.label,
                        &definition,
                    ))?),
                })
            }

            ConnectorCommand::List => {
                let defs = ConnectorDefinition::list(engine)?;

                info!(
                    "Your connector definitions are stored at {}",
                    engine.get_connectors_path().display()
                );

                eprint!("\n{}", crate::cli::connector::definition_table(&defs)?);

                let data: Vec<serde_json::Value> = defs
                    .iter()
                    .map(|(label, definition)| summary(label, definition))
                    .collect();

                Ok(CliResponse {
                    success: true,
                    msg: format!("Listed {} connector(s)", defs.len()),
                    data: Some(serde_json::to_string(&data)?),
                })
            }
        },

        #[cfg(feature = "markdown-docs")]
        SubCommand::MarkdownHelp => {
            clap_markdown::print_help_markdown::<Options>();

            Ok(CliResponse {
                success: true,
                msg: "Printed command-line reference".to_string(),
                data: None,
            })
        }
    }
}

fn list_backups(engine: &Engine, args: &ConnectorKeysArgs) -> anyhow::Result<CliResponse> {
    let Some(keys) = args.connector_keys.first() else {
        return CliResponse::from_outcome(&Outcome::failure(MISSING_KEYS_MSG));
    };

    let Some(connector) = engine.get_connector(keys)? else {
        return CliResponse::from_outcome(&Outcome::failure(format!(
            "'{}' is not a valid connector.",
            keys
        )));
    };

    info!("Listing backups held by {}", keys);

    let Some(records) = connector.list_backups()? else {
        return CliResponse::from_outcome(&Outcome::failure(format!(
            "Could not list the backups held by '{}'.",
            keys
        )));
    };

    let records = sorted_backups(&records);

    eprint!("\n{}", crate::cli::backups::backup_table(&records)?);

    Ok(CliResponse {
        success: true,
        msg: format!("Listed {} backup(s) held by {}", records.len(), keys),
        data: Some(serde_json::to_string(&records)?),
    })
}

fn new_connector(engine: &Engine, args: ConnectorNewArgs) -> anyhow::Result<CliResponse> {
    let keys = ConnectorKeys::parse(&format!("mealie:{}", args.label))
        .ok_or_else(|| anyhow::anyhow!("'{}' is not a valid connector label", args.label))?;

    let path = engine.get_definition_path(&keys.label);

    if path.exists() {
        return Err(anyhow::anyhow!(
            "{} already exists at {}. Use `connector edit {}` to change it.",
            keys,
            path.display(),
            keys.label
        ));
    }

    info!("Creating a new connector definition for {}...", keys);

    let base_url = match args.base_url {
        Some(base_url) => base_url,
        None => Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt("Base URL of your Mealie server")
            .interact_text()?,
    };

    let token = match args.token {
        Some(token) => token,
        None => Password::with_theme(&ColorfulTheme::default())
            .with_prompt("API token (create one under your Mealie user profile)")
            .interact()?,
    };

    let definition = ConnectorDefinition {
        token,
        base_url,
        ..Default::default()
    };

    // Validate before saving, expanding ${VAR} the same way loading does.
    let expanded: ConnectorDefinition = serde_yaml::from_str(&crate::engine::expand_var(
        &serde_yaml::to_string(&definition)?,
    ))?;
    MealieConnector::new(&expanded)?;

    ConnectorDefinition::create(&definition, &path)?;

    Ok(CliResponse {
        success: true,
        msg: format!(
            "Created connector {} at {}",
            keys,
            &path.to_string_lossy()
        ),
        data: Some(serde_json::to_string(&summary(&keys.label, &definition))?),
    })
}

fn summary(label: &str, definition: &ConnectorDefinition) -> serde_json::Value {
    serde_json::json!({
        "keys": format!("mealie:{}", label),
        "base_url": definition.base_url,
        "token": definition.masked_token(),
    })
}
