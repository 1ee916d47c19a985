//! Annotation records and their binding to parts and groups.
//!
//! An annotation is bound to an `object_name`: the group name for grouped
//! parts, the part name otherwise. The first annotation with a given
//! `object_name` is "the" annotation for that object.

use cgmath::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::EditorError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// `None` until the annotation is first committed
    pub id: Option<String>,
    pub asset_id: String,
    pub object_name: String,
    pub title: String,
    pub description: String,
    pub position: [f32; 3],
    #[serde(default)]
    pub menu_order: Option<i32>,
    #[serde(default)]
    pub menu_visible: Option<bool>,
    #[serde(default)]
    pub menu_name: Option<String>,
}

impl Annotation {
    /// An unsaved placeholder for `object_name` anchored at `anchor`
    pub fn stub(asset_id: &str, object_name: &str, anchor: Vector3<f32>) -> Self {
        Self {
            id: None,
            asset_id: asset_id.to_string(),
            object_name: object_name.to_string(),
            title: String::new(),
            description: String::new(),
            position: anchor.into(),
            menu_order: None,
            menu_visible: None,
            menu_name: None,
        }
    }

    pub fn anchor(&self) -> Vector3<f32> {
        Vector3::from(self.position)
    }

    pub fn has_content(&self) -> bool {
        !self.title.trim().is_empty() || !self.description.trim().is_empty()
    }

    /// Whether the tour may visit this annotation
    pub fn is_tour_eligible(&self) -> bool {
        self.has_content() && self.menu_visible != Some(false)
    }
}

/// The annotation currently surfaced for display or editing.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveAnnotation {
    pub annotation: Annotation,
    /// Already stored in the book
    pub persisted: bool,
    /// Overlay may be shown; placeholders never show one
    pub show_overlay: bool,
}

#[derive(Debug, Default)]
pub struct AnnotationBook {
    asset_id: String,
    annotations: Vec<Annotation>,
    active: Option<ActiveAnnotation>,
    next_id: u64,
}

impl AnnotationBook {
    pub fn new(asset_id: &str) -> Self {
        Self {
            asset_id: asset_id.to_string(),
            ..Self::default()
        }
    }

    pub fn asset_id(&self) -> &str {
        &self.asset_id
    }

    pub fn load(&mut self, annotations: Vec<Annotation>) {
        self.annotations = annotations;
        self.active = None;
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn find(&self, object_name: &str) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.object_name == object_name)
    }

    pub fn active(&self) -> Option<&ActiveAnnotation> {
        self.active.as_ref()
    }

    pub fn clear_active(&mut self) -> bool {
        self.active.take().is_some()
    }

    /// Makes the annotation for `object_name` active, or a new stub at `point`.
    pub fn bind_selection(&mut self, object_name: &str, point: Vector3<f32>) -> &ActiveAnnotation {
        let active = match self.find(object_name) {
            Some(existing) => ActiveAnnotation {
                show_overlay: existing.has_content(),
                annotation: existing.clone(),
                persisted: true,
            },
            None => ActiveAnnotation {
                annotation: Annotation::stub(&self.asset_id, object_name, point),
                persisted: false,
                show_overlay: false,
            },
        };
        self.active.insert(active)
    }

    /// Replaces the annotation matching by id, else by `object_name`, or appends.
    pub fn upsert(&mut self, annotation: Annotation) -> usize {
        let by_id = annotation
            .id
            .as_ref()
            .and_then(|id| self.annotations.iter().position(|a| a.id.as_ref() == Some(id)));
        let index = by_id.or_else(|| {
            self.annotations
                .iter()
                .position(|a| a.object_name == annotation.object_name)
        });
        match index {
            Some(index) => {
                self.annotations[index] = annotation;
                index
            }
            None => {
                self.annotations.push(annotation);
                self.annotations.len() - 1
            }
        }
    }

    /// Removes every annotation matching `id` or `object_name`.
    pub fn remove(&mut self, id: Option<&str>, object_name: &str) -> Vec<Annotation> {
        let (removed, kept): (Vec<Annotation>, Vec<Annotation>) = std::mem::take(&mut self.annotations)
            .into_iter()
            .partition(|a| a.object_name == object_name || (id.is_some() && a.id.as_deref() == id));
        self.annotations = kept;
        if self
            .active
            .as_ref()
            .map(|active| active.annotation.object_name == object_name)
            .unwrap_or(false)
        {
            self.active = None;
        }
        removed
    }

    /// Fills in the active annotation's text and stores it once it has content.
    ///
    /// Returns the stored annotation, or `None` if it is still a placeholder.
    pub fn commit_active(&mut self, title: &str, description: &str) -> Result<Option<Annotation>, EditorError> {
        let mut active = self.active.take().ok_or(EditorError::NoActiveAnnotation)?;
        active.annotation.title = title.trim().to_string();
        active.annotation.description = description.trim().to_string();

        if !active.annotation.has_content() {
            self.active = Some(active);
            return Ok(None);
        }
        if active.annotation.id.is_none() {
            active.annotation.id = Some(self.allocate_id());
        }
        self.upsert(active.annotation.clone());
        active.persisted = true;
        active.show_overlay = true;
        let stored = active.annotation.clone();
        self.active = Some(active);
        log::info!("annotation '{}' bound to '{}'", stored.title, stored.object_name);
        Ok(Some(stored))
    }

    fn allocate_id(&mut self) -> String {
        loop {
            self.next_id += 1;
            let candidate = format!("{}-annotation-{}", self.asset_id, self.next_id);
            if !self.annotations.iter().any(|a| a.id.as_deref() == Some(candidate.as_str())) {
                return candidate;
            }
        }
    }

    /// Annotations the tour visits, in menu order (unordered ones last).
    pub fn tour_annotations(&self) -> Vec<&Annotation> {
        let mut eligible: Vec<&Annotation> = self.annotations.iter().filter(|a| a.is_tour_eligible()).collect();
        eligible.sort_by_key(|a| (a.menu_order.is_none(), a.menu_order));
        eligible
    }

    pub fn rename_object(&mut self, old: &str, new: &str) {
        for annotation in self.annotations.iter_mut().filter(|a| a.object_name == old) {
            annotation.object_name = new.to_string();
        }
        if let Some(active) = self.active.as_mut() {
            if active.annotation.object_name == old {
                active.annotation.object_name = new.to_string();
            }
        }
    }
}
