use colored::*;
use std::io::Write;
use tabwriter::TabWriter;

use crate::mealie::BackupRecord;

/// Generates a table of backups. The last row is marked as the latest.
pub fn backup_table(records: &[BackupRecord]) -> anyhow::Result<String> {
    let mut tw = TabWriter::new(vec![]).ansi(true);

    writeln!(
        &mut tw,
        "{}\t{}\t{}",
        "Name".dimmed().bold(),
        "Date / Time".dimmed().bold(),
        "Size".dimmed().bold()
    )?;

    let last = records.len().saturating_sub(1);

    for (i, record) in records.iter().enumerate() {
        let row = format!(
            "{}\t{}\t{}",
            record.name,
            record
                .date
                .as_ref()
                .map(|date| date.to_string())
                .unwrap_or_else(|| "???".to_string()),
            match &record.size {
                Some(serde_json::Value::String(size)) => size.clone(),
                Some(size) => size.to_string(),
                None => String::new(),
            }
        );

        if i == last {
            writeln!(
                &mut tw,
                "{} {}",
                row.bold().green(),
                "<-- Latest".dimmed()
            )?;
        } else {
            writeln!(&mut tw, "{}", row)?;
        }
    }

    tw.flush()?;

    let bytes = tw
        .into_inner()
        .map_err(|_| anyhow::anyhow!("Unable to render the backup table"))?;

    Ok(String::from_utf8(bytes)?)
}
