use colored::*;
use std::io::Write;
use tabwriter::TabWriter;

use crate::connector::definition::ConnectorDefinition;

pub fn definition_table(defs: &[(String, ConnectorDefinition)]) -> anyhow::Result<String> {
    let mut tw = TabWriter::new(vec![]).ansi(true);

    writeln!(
        &mut tw,
        "{}",
        "Connector Keys\tBase URL\tToken".dimmed().bold()
    )?;

    for (label, definition) in defs {
        writeln!(
            &mut tw,
            "{}\t{}\t{}",
            format!("mealie:{}", label).bold(),
            definition.base_url,
            definition.masked_token().dimmed()
        )?;
    }

    tw.flush()?;

    let bytes = tw
        .into_inner()
        .map_err(|_| anyhow::anyhow!("Unable to render the connector table"))?;

    Ok(String::from_utf8(bytes)?)
}
