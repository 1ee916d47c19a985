//! Pointer-driven part selection.

use crate::gfx::picking::PointerHit;
use crate::gfx::scene::{MeshHandle, Scene};

use super::groups::GroupRegistry;
use super::store::EditorStore;

/// First hit that may be selected.
///
/// Unknown parts are skipped, as are deleted parts unless they are plane-like.
pub fn resolve_hit<'a>(hits: &'a [PointerHit], scene: &Scene, editor: &EditorStore) -> Option<&'a PointerHit> {
    hits.iter().find(|hit| match scene.part_by_name(&hit.part_name) {
        Some(part) => part.plane_like || !editor.is_deleted(part.name()),
        None => false,
    })
}

/// Ordered set of selected part names.
///
/// Groups select atomically: clicking any member selects every member.
#[derive(Debug, Default, Clone)]
pub struct SelectionManager {
    selected: Vec<String>,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_names(&self) -> &[String] {
        &self.selected
    }

    /// Representative name for single-target UI
    pub fn primary(&self) -> Option<&str> {
        self.selected.first().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.selected.iter().any(|s| s == name)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Engine handles of the selected parts that still resolve
    pub fn selected_handles(&self, scene: &Scene) -> Vec<MeshHandle> {
        self.selected
            .iter()
            .filter_map(|name| scene.part_by_name(name))
            .map(|part| part.mesh)
            .collect()
    }

    /// Applies a click on `part`. Returns `true` if the selection changed.
    ///
    /// Without `multi` the selection becomes the part's selection unit. With
    /// `multi` the whole unit is removed if every member is already selected,
    /// otherwise the missing members are added.
    pub fn click(&mut self, part: &str, groups: &GroupRegistry, scene: &Scene, multi: bool) -> bool {
        let (_, unit) = groups.selection_unit(part, scene);
        let before = self.selected.clone();

        if !multi {
            self.selected = unit;
        } else if unit.iter().all(|name| self.contains(name)) {
            self.selected.retain(|name| !unit.contains(name));
        } else {
            for name in unit {
                if !self.contains(&name) {
                    self.selected.push(name);
                }
            }
        }
        self.selected != before
    }

    pub fn clear(&mut self) -> bool {
        let changed = !self.selected.is_empty();
        self.selected.clear();
        changed
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let len = self.selected.len();
        self.selected.retain(|s| s != name);
        self.selected.len() != len
    }

    pub fn rename(&mut self, old: &str, new: &str) {
        for name in self.selected.iter_mut().filter(|s| s.as_str() == old) {
            *name = new.to_string();
        }
    }
}
