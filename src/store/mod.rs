//! Persistence collaborator.
//!
//! ## Table of Contents
//! - **Datastore**: object-safe record store, one collection per [`RecordKind`]
//! - **Record**: typed records and the JSON helpers around them
//! - **MemoryStore**: in-memory store for tests and headless runs
//! - **JsonFileStore**: one pretty-printed JSON file per record kind
//!
//! The engine only ever sees `load(asset) -> list`, `save(list)` and
//! `delete(id)`; transport is the store's business.

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use std::collections::HashSet;

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::editor::{Annotation, Environment, Group, MaterialOverride, TransformOverride};
use crate::error::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Material,
    Transform,
    Environment,
    Group,
    Annotation,
}

impl RecordKind {
    pub const ALL: [RecordKind; 5] = [
        RecordKind::Material,
        RecordKind::Transform,
        RecordKind::Environment,
        RecordKind::Group,
        RecordKind::Annotation,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::Material => "material",
            RecordKind::Transform => "transform",
            RecordKind::Environment => "environment",
            RecordKind::Group => "group",
            RecordKind::Annotation => "annotation",
        }
    }
}

/// A record as the datastore sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: String,
    pub asset_id: String,
    /// Natural key within the asset (part name, group name, ...)
    pub key: String,
    pub body: serde_json::Value,
}

/// Trait for record storage backends
pub trait Datastore {
    /// All records of `kind` belonging to `asset_id`
    fn load(&self, kind: RecordKind, asset_id: &str) -> Result<Vec<StoredRecord>, StoreError>;

    /// Upserts each record by id, else by `(asset_id, key)`
    fn save(&mut self, kind: RecordKind, records: Vec<StoredRecord>) -> Result<(), StoreError>;

    fn delete(&mut self, kind: RecordKind, id: &str) -> Result<(), StoreError>;

    /// Store name for logging
    fn name(&self) -> &str;
}

/// Shared upsert rule for in-process stores.
pub(crate) fn upsert_into(existing: &mut Vec<StoredRecord>, records: Vec<StoredRecord>) {
    for record in records {
        let position = existing.iter().position(|r| r.id == record.id).or_else(|| {
            existing
                .iter()
                .position(|r| r.asset_id == record.asset_id && r.key == record.key)
        });
        match position {
            Some(index) => existing[index] = record,
            None => existing.push(record),
        }
    }
}

/// A typed record with a natural key.
pub trait Record: Serialize + DeserializeOwned {
    const KIND: RecordKind;

    fn key(&self) -> String;

    /// Durable id, if the record carries one of its own
    fn id(&self) -> Option<String> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRecord {
    pub object_name: String,
    pub material: MaterialOverride,
}

impl Record for MaterialRecord {
    const KIND: RecordKind = RecordKind::Material;

    fn key(&self) -> String {
        self.object_name.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformRecord {
    pub object_name: String,
    pub transform: TransformOverride,
}

impl Record for TransformRecord {
    const KIND: RecordKind = RecordKind::Transform;

    fn key(&self) -> String {
        self.object_name.clone()
    }
}

impl Record for Environment {
    const KIND: RecordKind = RecordKind::Environment;

    fn key(&self) -> String {
        "environment".to_string()
    }
}

impl Record for Group {
    const KIND: RecordKind = RecordKind::Group;

    fn key(&self) -> String {
        self.name.clone()
    }
}

impl Record for Annotation {
    const KIND: RecordKind = RecordKind::Annotation;

    fn key(&self) -> String {
        self.object_name.clone()
    }

    fn id(&self) -> Option<String> {
        self.id.clone()
    }
}

fn to_stored<R: Record>(asset_id: &str, record: &R) -> Result<StoredRecord, StoreError> {
    let key = record.key();
    Ok(StoredRecord {
        id: record
            .id()
            .unwrap_or_else(|| format!("{}:{}:{}", asset_id, R::KIND.as_str(), key)),
        asset_id: asset_id.to_string(),
        key,
        body: serde_json::to_value(record)?,
    })
}

/// Load and deserialize every `R` stored for `asset_id`
pub fn load_records<R: Record>(store: &dyn Datastore, asset_id: &str) -> Result<Vec<R>, StoreError> {
    store
        .load(R::KIND, asset_id)?
        .into_iter()
        .map(|stored| serde_json::from_value(stored.body).map_err(StoreError::from))
        .collect()
}

/// Serialize and upsert `records` for `asset_id`
pub fn save_records<R: Record>(store: &mut dyn Datastore, asset_id: &str, records: &[R]) -> Result<(), StoreError> {
    let stored = records
        .iter()
        .map(|record| to_stored(asset_id, record))
        .collect::<Result<Vec<_>, _>>()?;
    store.save(R::KIND, stored)
}

/// Makes the stored `R` set for `asset_id` equal to `records`.
///
/// Upserts everything given, then deletes stored records that were not.
pub fn replace_records<R: Record>(store: &mut dyn Datastore, asset_id: &str, records: &[R]) -> Result<(), StoreError> {
    let stored = records
        .iter()
        .map(|record| to_stored(asset_id, record))
        .collect::<Result<Vec<_>, _>>()?;
    let keep: HashSet<String> = stored.iter().map(|r| r.id.clone()).collect();
    let keep_keys: HashSet<String> = stored.iter().map(|r| r.key.clone()).collect();

    let stale: Vec<String> = store
        .load(R::KIND, asset_id)?
        .into_iter()
        .filter(|r| !keep.contains(&r.id) && !keep_keys.contains(&r.key))
        .map(|r| r.id)
        .collect();

    store.save(R::KIND, stored)?;
    for id in stale {
        store.delete(R::KIND, &id)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn material(name: &str, opacity: f32) -> MaterialRecord {
        MaterialRecord {
            object_name: name.to_string(),
            material: MaterialOverride {
                opacity,
                ..MaterialOverride::default()
            },
        }
    }

    #[test]
    fn typed_round_trip_through_store() {
        let mut store = MemoryStore::new();
        save_records(&mut store, "car", &[material("Body", 0.5)]).unwrap();
        let loaded: Vec<MaterialRecord> = load_records(&store, "car").unwrap();
        assert_eq!(loaded, vec![material("Body", 0.5)]);
        assert!(load_records::<MaterialRecord>(&store, "boat").unwrap().is_empty());
    }

    #[test]
    fn saving_twice_upserts_by_key() {
        let mut store = MemoryStore::new();
        save_records(&mut store, "car", &[material("Body", 0.5)]).unwrap();
        save_records(&mut store, "car", &[material("Body", 0.8)]).unwrap();
        let loaded: Vec<MaterialRecord> = load_records(&store, "car").unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].material.opacity, 0.8);
    }

    #[test]
    fn replace_drops_records_no_longer_present() {
        let mut store = MemoryStore::new();
        save_records(&mut store, "car", &[material("Body", 0.5), material("Door", 0.5)]).unwrap();
        replace_records(&mut store, "car", &[material("Door", 1.0)]).unwrap();
        let loaded: Vec<MaterialRecord> = load_records(&store, "car").unwrap();
        assert_eq!(loaded, vec![material("Door", 1.0)]);
    }
}
