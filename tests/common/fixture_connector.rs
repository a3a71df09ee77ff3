use anyhow::Result;
use mealie_backup::{
    connector::{BackupProvider, ConnectorLookup},
    mealie::{BackupDate, BackupRecord},
    outcome::Outcome,
};
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

/// A connector that answers from memory and counts how often it is called.
#[derive(Clone, Debug)]
pub struct FixtureConnector {
    pub create_outcome: Outcome,
    pub backups: Option<Vec<BackupRecord>>,
    pub create_calls: Arc<AtomicUsize>,
    pub list_calls: Arc<AtomicUsize>,
}

impl FixtureConnector {
    pub fn new(create_outcome: Outcome, backups: Option<Vec<BackupRecord>>) -> Self {
        Self {
            create_outcome,
            backups,
            create_calls: Arc::new(AtomicUsize::new(0)),
            list_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn create_count(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn list_count(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

impl BackupProvider for FixtureConnector {
    fn create_backup(&self) -> Result<Outcome> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.create_outcome.clone())
    }

    fn list_backups(&self) -> Result<Option<Vec<BackupRecord>>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.backups.clone())
    }
}

#[derive(Default)]
pub struct FixtureLookup {
    pub connectors: HashMap<String, FixtureConnector>,
}

impl FixtureLookup {
    pub fn with(keys: &str, connector: FixtureConnector) -> Self {
        let mut lookup = Self::default();
        lookup.connectors.insert(keys.to_string(), connector);
        lookup
    }
}

impl ConnectorLookup for FixtureLookup {
    fn get_connector(&self, keys: &str) -> Result<Option<Box<dyn BackupProvider>>> {
        Ok(self
            .connectors
            .get(keys)
            .map(|connector| Box::new(connector.clone()) as Box<dyn BackupProvider>))
    }
}

pub fn record(name: &str, date: Option<&str>) -> BackupRecord {
    BackupRecord {
        name: name.to_string(),
        date: date.map(BackupDate::from),
        size: None,
    }
}
