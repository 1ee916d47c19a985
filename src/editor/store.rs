//! Snapshot-then-mutate front end for the editable state.
//!
//! Every mutator records the pre-mutation snapshot in the [`HistoryStore`]
//! before touching live state, and marks the state as unsaved.

use super::history::HistoryStore;
use super::state::{
    EditorSnapshot, Environment, EnvironmentPatch, MaterialOverride, MaterialProperty, TransformOverride,
};

#[derive(Debug)]
pub struct EditorStore {
    live: EditorSnapshot,
    history: HistoryStore<EditorSnapshot>,
    dirty: bool,
}

impl Default for EditorStore {
    fn default() -> Self {
        Self::new(super::history::DEFAULT_CAPACITY)
    }
}

impl EditorStore {
    pub fn new(history_capacity: usize) -> Self {
        Self {
            live: EditorSnapshot::default(),
            history: HistoryStore::new(history_capacity),
            dirty: false,
        }
    }

    /// Replaces live state with freshly loaded data and forgets all history.
    pub fn load(&mut self, state: EditorSnapshot) {
        self.live = state;
        self.history.clear();
        self.dirty = false;
    }

    pub fn state(&self) -> &EditorSnapshot {
        &self.live
    }

    pub fn history(&self) -> &HistoryStore<EditorSnapshot> {
        &self.history
    }

    pub fn material(&self, name: &str) -> Option<&MaterialOverride> {
        self.live.materials.get(name)
    }

    pub fn transform(&self, name: &str) -> Option<&TransformOverride> {
        self.live.transforms.get(name)
    }

    pub fn environment(&self) -> &Environment {
        &self.live.environment
    }

    pub fn is_deleted(&self, name: &str) -> bool {
        self.transform(name).map(|t| t.deleted).unwrap_or(false)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clears the unsaved-changes flag after a successful save.
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    /// Flags changes made outside the snapshot state (renames, annotations).
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn snapshot(&mut self) {
        self.history.record(self.live.clone());
        self.dirty = true;
    }

    pub fn set_material(&mut self, name: &str, material: MaterialOverride) {
        self.snapshot();
        self.live.materials.insert(name.to_string(), material);
    }

    pub fn update_material_property(&mut self, name: &str, property: MaterialProperty) {
        self.snapshot();
        self.live
            .materials
            .entry(name.to_string())
            .or_default()
            .apply(property);
    }

    /// Removes the override; the part falls back to its original appearance.
    pub fn reset_material(&mut self, name: &str) -> bool {
        if !self.live.materials.contains_key(name) {
            return false;
        }
        self.snapshot();
        self.live.materials.remove(name);
        true
    }

    pub fn set_transform(&mut self, name: &str, transform: TransformOverride) {
        self.snapshot();
        self.live
            .transforms
            .insert(name.to_string(), transform.normalized());
    }

    /// Flips visibility. Deleted parts stay hidden.
    pub fn toggle_visibility(&mut self, name: &str) -> bool {
        self.snapshot();
        let transform = self.live.transforms.entry(name.to_string()).or_default();
        if !transform.deleted {
            transform.visible = !transform.visible;
        }
        transform.visible
    }

    pub fn delete_object(&mut self, name: &str) {
        self.snapshot();
        let transform = self.live.transforms.entry(name.to_string()).or_default();
        transform.deleted = true;
        transform.visible = false;
    }

    pub fn set_environment(&mut self, environment: Environment) {
        self.snapshot();
        self.live.environment = environment;
    }

    pub fn patch_environment(&mut self, patch: EnvironmentPatch) {
        if patch.is_empty() {
            return;
        }
        self.snapshot();
        self.live.environment.apply(patch);
    }

    /// Returns `false` at the start of history.
    pub fn undo(&mut self) -> bool {
        match self.history.undo(&self.live) {
            Some(state) => {
                self.live = state;
                self.dirty = true;
                true
            }
            None => false,
        }
    }

    /// Returns `false` when nothing lies ahead.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(state) => {
                self.live = state;
                self.dirty = true;
                true
            }
            None => false,
        }
    }

    /// Clears `deleted`/hidden flags on ground-like parts.
    ///
    /// Records a single snapshot, and only when something actually changes.
    /// Like any other edit, a repair discards the redo branch.
    /// Returns the repaired names.
    pub fn heal_plane_parts<'a, I>(&mut self, plane_names: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let broken: Vec<String> = plane_names
            .into_iter()
            .filter(|name| self.transform(name).map(|t| t.is_hidden()).unwrap_or(false))
            .map(str::to_string)
            .collect();
        if broken.is_empty() {
            return broken;
        }
        self.snapshot();
        for name in &broken {
            if let Some(transform) = self.live.transforms.get_mut(name) {
                transform.deleted = false;
                transform.visible = true;
            }
        }
        broken
    }

    /// Re-keys live state and every history snapshot.
    pub fn rename_key(&mut self, old: &str, new: &str) {
        self.live.rename_key(old, new);
        self.history.for_each_mut(|snapshot| snapshot.rename_key(old, new));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::state::Fog;

    #[test]
    fn n_operations_then_n_undos_restore_the_original() {
        let mut editor = EditorStore::default();
        let original = editor.state().clone();

        editor.set_material("Body", MaterialOverride::default());
        editor.update_material_property("Body", MaterialProperty::Roughness(0.9));
        editor.delete_object("Wheel");
        editor.toggle_visibility("Door");
        editor.patch_environment(EnvironmentPatch {
            fog: Some(Fog {
                enabled: true,
                ..Fog::default()
            }),
            ..EnvironmentPatch::default()
        });
        let edited = editor.state().clone();

        for _ in 0..5 {
            assert!(editor.undo());
        }
        assert_eq!(editor.state(), &original);
        assert!(!editor.undo());

        for _ in 0..5 {
            assert!(editor.redo());
        }
        assert_eq!(editor.state(), &edited);
        assert!(!editor.redo());
    }

    #[test]
    fn delete_hides_and_toggle_cannot_unhide() {
        let mut editor = EditorStore::default();
        editor.delete_object("Wheel");
        assert!(editor.is_deleted("Wheel"));
        assert!(!editor.toggle_visibility("Wheel"));
        assert!(!editor.transform("Wheel").unwrap().visible);
    }

    #[test]
    fn mutations_set_dirty_and_save_clears_it() {
        let mut editor = EditorStore::default();
        assert!(!editor.is_dirty());
        editor.set_transform("A", TransformOverride::default());
        assert!(editor.is_dirty());
        editor.mark_saved();
        assert!(!editor.is_dirty());
    }

    #[test]
    fn heal_only_snapshots_when_needed() {
        let mut editor = EditorStore::default();
        assert!(editor.heal_plane_parts(["Floor"]).is_empty());
        assert!(editor.history().is_empty());

        editor.delete_object("Floor");
        editor.delete_object("Chair");
        let healed = editor.heal_plane_parts(["Floor"]);
        assert_eq!(healed, vec!["Floor".to_string()]);
        assert!(!editor.transform("Floor").unwrap().is_hidden());
        assert!(editor.is_deleted("Chair"));
        assert_eq!(editor.history().len(), 3);
    }

    #[test]
    fn rename_reaches_into_history() {
        let mut editor = EditorStore::default();
        editor.set_material("Old", MaterialOverride::default());
        editor.update_material_property("Old", MaterialProperty::Opacity(0.5));
        editor.rename_key("Old", "New");
        assert_eq!(editor.material("New").unwrap().opacity, 0.5);

        assert!(editor.undo());
        assert!(editor.material("New").is_some());
        assert!(editor.material("Old").is_none());
    }

    #[test]
    fn heal_after_undo_discards_redo() {
        let mut editor = EditorStore::default();
        editor.delete_object("Floor");
        assert_eq!(editor.heal_plane_parts(["Floor"]), vec!["Floor".to_string()]);

        assert!(editor.undo());
        assert!(editor.is_deleted("Floor"));
        assert!(editor.history().can_redo());

        assert_eq!(editor.heal_plane_parts(["Floor"]), vec!["Floor".to_string()]);
        assert!(!editor.is_deleted("Floor"));
        assert!(!editor.history().can_redo());
        assert!(!editor.redo());
    }
}
