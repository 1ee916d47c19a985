use std::collections::HashMap;

use super::{upsert_into, Datastore, RecordKind, StoredRecord};
use crate::error::StoreError;

/// In-memory store for tests and headless runs.
///
/// [`MemoryStore::set_unavailable`] makes every call fail, which is how the
/// save-failure paths are exercised.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: HashMap<RecordKind, Vec<StoredRecord>>,
    unavailable: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&mut self, reason: Option<&str>) {
        self.unavailable = reason.map(str::to_string);
    }

    pub fn len(&self, kind: RecordKind) -> usize {
        self.data.get(&kind).map(Vec::len).unwrap_or(0)
    }

    fn check(&self) -> Result<(), StoreError> {
        match &self.unavailable {
            Some(reason) => Err(StoreError::Unavailable(reason.clone())),
            None => Ok(()),
        }
    }
}

impl Datastore for MemoryStore {
    fn load(&self, kind: RecordKind, asset_id: &str) -> Result<Vec<StoredRecord>, StoreError> {
        self.check()?;
        Ok(self
            .data
            .get(&kind)
            .map(|records| {
                records
                    .iter()
                    .filter(|r| r.asset_id == asset_id)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn save(&mut self, kind: RecordKind, records: Vec<StoredRecord>) -> Result<(), StoreError> {
        self.check()?;
        upsert_into(self.data.entry(kind).or_default(), records);
        Ok(())
    }

    fn delete(&mut self, kind: RecordKind, id: &str) -> Result<(), StoreError> {
        self.check()?;
        let records = self.data.entry(kind).or_default();
        let index = records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound {
                kind: kind.as_str(),
                id: id.to_string(),
            })?;
        records.remove(index);
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(id: &str, key: &str) -> StoredRecord {
        StoredRecord {
            id: id.to_string(),
            asset_id: "car".to_string(),
            key: key.to_string(),
            body: json!({ "key": key }),
        }
    }

    #[test]
    fn delete_missing_is_not_found() {
        let mut store = MemoryStore::new();
        let err = store.delete(RecordKind::Group, "nope").unwrap_err();
        assert!(matches!(err, StoreError::NotFound { kind: "group", .. }));
    }

    #[test]
    fn unavailable_store_fails_every_call() {
        let mut store = MemoryStore::new();
        store.save(RecordKind::Group, vec![record("1", "Wheels")]).unwrap();
        store.set_unavailable(Some("offline"));
        assert!(matches!(
            store.load(RecordKind::Group, "car"),
            Err(StoreError::Unavailable(_))
        ));
        assert!(store.save(RecordKind::Group, Vec::new()).is_err());
        store.set_unavailable(None);
        assert_eq!(store.load(RecordKind::Group, "car").unwrap().len(), 1);
    }
}
