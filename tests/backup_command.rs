mod common;

use common::fixture_connector::{record, FixtureConnector, FixtureLookup};
use common::TestResult;
use mealie_backup::{backup::backup_mealie, outcome::Outcome};
use pretty_assertions::assert_eq;

fn keys(keys: &[&str]) -> Vec<String> {
    keys.iter().map(|k| k.to_string()).collect()
}

#[test]
fn test_fails_without_connector_keys() -> TestResult {
    let lookup = FixtureLookup::default();

    let outcome = backup_mealie(&lookup, &[])?;

    assert_eq!(
        outcome,
        Outcome::failure("Specify connector keys with `-c` (e.g. `-c mealie:foo`).")
    );

    Ok(())
}

#[test]
fn test_fails_on_unknown_connector() -> TestResult {
    let fixture = FixtureConnector::new(Outcome::success("ok"), None);
    let lookup = FixtureLookup::with("mealie:home", fixture.clone());

    let outcome = backup_mealie(&lookup, &keys(&["mealie:bad"]))?;

    assert_eq!(
        <(bool, String)>::from(outcome),
        (false, "'mealie:bad' is not a valid connector.".to_string())
    );
    assert_eq!(fixture.create_count(), 0);

    Ok(())
}

#[test]
fn test_forwards_create_failure_without_listing() -> TestResult {
    let fixture = FixtureConnector::new(
        Outcome::failure("boom"),
        Some(vec![record("2024-backup.zip", Some("2024-01-01T00:00:00"))]),
    );
    let lookup = FixtureLookup::with("mealie:home", fixture.clone());

    let outcome = backup_mealie(&lookup, &keys(&["mealie:home"]))?;

    assert_eq!(outcome, Outcome::failure("boom"));
    assert_eq!(fixture.create_count(), 1);
    assert_eq!(fixture.list_count(), 0, "the read endpoint must not be called");

    Ok(())
}

#[test]
fn test_reports_latest_backup_name() -> TestResult {
    let fixture = FixtureConnector::new(
        Outcome::success("Backup created"),
        Some(vec![
            record("2023-backup.zip", Some("2023-06-01T00:00:00")),
            record("2024-backup.zip", Some("2024-01-01T00:00:00")),
        ]),
    );
    let lookup = FixtureLookup::with("mealie:home", fixture.clone());

    let outcome = backup_mealie(&lookup, &keys(&["mealie:home"]))?;

    assert_eq!(
        outcome,
        Outcome::success("Created backup '2024-backup.zip'.")
    );
    assert_eq!(fixture.create_count(), 1);
    assert_eq!(fixture.list_count(), 1);

    Ok(())
}

#[test]
fn test_absent_name_is_reported_as_none() -> TestResult {
    let fixture = FixtureConnector::new(Outcome::success("Backup created"), Some(vec![]));
    let lookup = FixtureLookup::with("mealie:home", fixture);

    let outcome = backup_mealie(&lookup, &keys(&["mealie:home"]))?;

    assert_eq!(outcome, Outcome::success("Created backup 'None'."));

    Ok(())
}

#[test]
fn test_only_the_first_connector_is_used() -> TestResult {
    let first = FixtureConnector::new(Outcome::success("ok"), None);
    let second = FixtureConnector::new(Outcome::success("ok"), None);

    let mut lookup = FixtureLookup::with("mealie:first", first.clone());
    lookup
        .connectors
        .insert("mealie:second".to_string(), second.clone());

    let outcome = backup_mealie(&lookup, &keys(&["mealie:first", "mealie:second"]))?;

    assert!(outcome.success);
    assert_eq!(first.create_count(), 1);
    assert_eq!(second.create_count(), 0);

    Ok(())
}
