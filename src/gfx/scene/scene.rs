use std::collections::HashMap;

use crate::error::EditorError;
use crate::gfx::geometry::Aabb;

use super::graph::{MeshHandle, RESERVED_GROUND_NAME};
use super::normalizer::FitTransform;
use super::part::{Part, PartId};

/// The normalized asset: an ordered part registry plus the fit applied to it.
///
/// Parts live in an arena indexed by [`PartId`]; names are unique and the only
/// identity other components store.
#[derive(Debug, Clone)]
pub struct Scene {
    parts: Vec<Part>,
    by_name: HashMap<String, PartId>,
    by_handle: HashMap<MeshHandle, PartId>,
    fit: FitTransform,
    model_bounds: Aabb,
}

impl Scene {
    pub(crate) fn from_parts(parts: Vec<Part>, fit: FitTransform, model_bounds: Aabb) -> Self {
        let by_name = parts
            .iter()
            .map(|part| (part.name.clone(), part.id))
            .collect();
        let by_handle = parts.iter().map(|part| (part.mesh, part.id)).collect();
        Self {
            parts,
            by_name,
            by_handle,
            fit,
            model_bounds,
        }
    }

    pub fn empty() -> Self {
        Self::from_parts(Vec::new(), FitTransform::identity(), Aabb::empty())
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn part(&self, id: PartId) -> Option<&Part> {
        self.parts.get(id.index())
    }

    pub fn part_by_name(&self, name: &str) -> Option<&Part> {
        self.by_name.get(name).and_then(|id| self.part(*id))
    }

    pub fn part_by_handle(&self, handle: MeshHandle) -> Option<&Part> {
        self.by_handle.get(&handle).and_then(|id| self.part(*id))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Fit applied to the raw asset during normalization
    pub fn fit(&self) -> &FitTransform {
        &self.fit
    }

    /// Fitted bounds of the parts that took part in fitting
    pub fn model_bounds(&self) -> &Aabb {
        &self.model_bounds
    }

    /// Gets all part names in load order
    pub fn get_object_names(&self) -> Vec<String> {
        self.parts.iter().map(|part| part.name.clone()).collect()
    }

    pub fn get_object_count(&self) -> usize {
        self.parts.len()
    }

    /// Union of the fitted bounds of every named part that still resolves.
    pub fn bounds_of<'a, I>(&self, names: I) -> Aabb
    where
        I: IntoIterator<Item = &'a str>,
    {
        names
            .into_iter()
            .filter_map(|name| self.part_by_name(name))
            .fold(Aabb::empty(), |acc, part| acc.union(&part.world_bounds))
    }

    /// Renames a part in the registry only.
    ///
    /// Callers that hold names elsewhere go through
    /// [`crate::app::Viewer::rename_part`], which rewrites every reference.
    pub(crate) fn rename(&mut self, old: &str, new: &str) -> Result<(), EditorError> {
        let new = new.trim();
        if new.is_empty() {
            return Err(EditorError::EmptyName);
        }
        if old == new {
            return Ok(());
        }
        if new == RESERVED_GROUND_NAME || self.by_name.contains_key(new) {
            return Err(EditorError::NameTaken(new.to_string()));
        }
        let id = self
            .by_name
            .remove(old)
            .ok_or_else(|| EditorError::UnknownPart(old.to_string()))?;
        self.parts[id.index()].name = new.to_string();
        self.by_name.insert(new.to_string(), id);
        Ok(())
    }

    /// Returns `desired_name` or the first `desired_name_<n>` not in use.
    pub fn ensure_unique_name(&self, desired_name: &str) -> String {
        let mut counter = 0;
        let mut test_name = desired_name.to_string();

        while self.by_name.contains_key(&test_name) {
            counter += 1;
            test_name = format!("{}_{}", desired_name, counter);
        }

        test_name
    }

    pub fn get_statistics(&self) -> SceneStatistics {
        SceneStatistics {
            part_count: self.parts.len(),
            plane_like_count: self.parts.iter().filter(|p| p.plane_like).count(),
            scale: self.fit.scale,
            max_extent: self.model_bounds.max_extent(),
        }
    }
}

/// Scene statistics for logging and UI display
#[derive(Debug, Clone, Copy)]
pub struct SceneStatistics {
    pub part_count: usize,
    pub plane_like_count: usize,
    pub scale: f32,
    pub max_extent: f32,
}
