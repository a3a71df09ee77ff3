use log::{info, warn};

use crate::{connector::ConnectorLookup, outcome::Outcome};

pub const MISSING_KEYS_MSG: &str = "Specify connector keys with `-c` (e.g. `-c mealie:foo`).";

/// Create a backup through the first of `connector_keys` and report the
/// filename the server gave it.
pub fn backup_mealie(
    lookup: &dyn ConnectorLookup,
    connector_keys: &[String],
) -> anyhow::Result<Outcome> {
    let Some(keys) = connector_keys.first() else {
        return Ok(Outcome::failure(MISSING_KEYS_MSG));
    };

    if connector_keys.len() > 1 {
        warn!("Only the first connector ({}) will be backed up.", keys);
    }

    let Some(connector) = lookup.get_connector(keys)? else {
        return Ok(Outcome::failure(format!("'{}' is not a valid connector.", keys)));
    };

    info!("Creating a backup through {}...", keys);

    let outcome = connector.create_backup()?;
    if !outcome.success {
        return Ok(outcome);
    }

    info!("{}", outcome.msg);

    let filename = connector.get_latest_backup_name()?;

    Ok(Outcome::success(format!(
        "Created backup '{}'.",
        filename.as_deref().unwrap_or("None")
    )))
}
