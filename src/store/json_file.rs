use std::fs;
use std::path::{Path, PathBuf};

use super::{upsert_into, Datastore, RecordKind, StoredRecord};
use crate::error::StoreError;

/// File-based persistent storage
///
/// Keeps one `<kind>.json` array per record kind under a directory. Every
/// call reads the file fresh, so several viewers may share a directory as
/// long as they do not write at the same time.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open or create a file store rooted at `dir`
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        log::info!("JSON file store opened at {}", dir.display());
        Ok(Self { dir })
    }

    pub fn path_for(&self, kind: RecordKind) -> PathBuf {
        self.dir.join(format!("{}.json", kind.as_str()))
    }

    fn read_all(&self, kind: RecordKind) -> Result<Vec<StoredRecord>, StoreError> {
        let path = self.path_for(kind);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&path)?;
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&contents)?)
    }

    fn write_all(&self, kind: RecordKind, records: &[StoredRecord]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(records)?;
        let path = self.path_for(kind);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;
        log::debug!("wrote {} {} records to {}", records.len(), kind.as_str(), path.display());
        Ok(())
    }
}

impl Datastore for JsonFileStore {
    fn load(&self, kind: RecordKind, asset_id: &str) -> Result<Vec<StoredRecord>, StoreError> {
        Ok(self
            .read_all(kind)?
            .into_iter()
            .filter(|r| r.asset_id == asset_id)
            .collect())
    }

    fn save(&mut self, kind: RecordKind, records: Vec<StoredRecord>) -> Result<(), StoreError> {
        let mut all = self.read_all(kind)?;
        upsert_into(&mut all, records);
        self.write_all(kind, &all)
    }

    fn delete(&mut self, kind: RecordKind, id: &str) -> Result<(), StoreError> {
        let mut all = self.read_all(kind)?;
        let len = all.len();
        all.retain(|r| r.id != id);
        if all.len() == len {
            return Err(StoreError::NotFound {
                kind: kind.as_str(),
                id: id.to_string(),
            });
        }
        self.write_all(kind, &all)
    }

    fn name(&self) -> &str {
        "json-file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::Group;
    use crate::store::{load_records, save_records};

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("cicerone-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn records_survive_reopening() {
        let dir = scratch_dir("reopen");
        let group = Group {
            name: "Wheels".to_string(),
            members: vec!["Wheel_1".to_string(), "Wheel_2".to_string()],
        };
        {
            let mut store = JsonFileStore::open(&dir).unwrap();
            save_records(&mut store, "car", &[group.clone()]).unwrap();
        }
        let store = JsonFileStore::open(&dir).unwrap();
        let loaded: Vec<Group> = load_records(&store, "car").unwrap();
        assert_eq!(loaded, vec![group]);
        assert!(store.path_for(RecordKind::Group).exists());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn corrupt_file_is_a_json_error() {
        let dir = scratch_dir("corrupt");
        let store = JsonFileStore::open(&dir).unwrap();
        fs::write(store.path_for(RecordKind::Annotation), "{ nope").unwrap();
        assert!(matches!(
            store.load(RecordKind::Annotation, "car"),
            Err(StoreError::Json(_))
        ));
        let _ = fs::remove_dir_all(&dir);
    }
}
