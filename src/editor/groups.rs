//! Named part groups that select and annotate as one unit.
//!
//! A part belongs to at most one group. Groups reference parts by name only,
//! so a group loaded for a re-normalized asset may hold names that no longer
//! resolve; those are skipped wherever membership is resolved.

use serde::{Deserialize, Serialize};

use crate::error::EditorError;
use crate::gfx::scene::Scene;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
    /// Member part names in selection order
    pub members: Vec<String>,
}

impl Group {
    pub fn contains(&self, part: &str) -> bool {
        self.members.iter().any(|m| m == part)
    }
}

#[derive(Debug, Default, Clone)]
pub struct GroupRegistry {
    groups: Vec<Group>,
}

impl GroupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces all groups, e.g. after loading from a datastore.
    ///
    /// Later groups lose members already claimed by earlier ones.
    pub fn load(&mut self, groups: Vec<Group>) {
        self.groups.clear();
        for group in groups {
            let members: Vec<String> = group
                .members
                .into_iter()
                .filter(|m| self.group_of(m).is_none())
                .collect();
            if !members.is_empty() {
                self.groups.push(Group {
                    name: group.name,
                    members,
                });
            }
        }
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn get(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn group_of(&self, part: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.contains(part))
    }

    /// Creates a group, moving each member out of any previous group.
    ///
    /// Groups left without members are dropped.
    pub fn create(&mut self, name: &str, members: Vec<String>) -> Result<&Group, EditorError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EditorError::EmptyName);
        }
        if self.get(name).is_some() {
            return Err(EditorError::NameTaken(name.to_string()));
        }
        let mut unique: Vec<String> = Vec::with_capacity(members.len());
        for member in members {
            if !unique.contains(&member) {
                unique.push(member);
            }
        }
        if unique.is_empty() {
            return Err(EditorError::EmptyGroup(name.to_string()));
        }

        for group in &mut self.groups {
            group.members.retain(|m| !unique.contains(m));
        }
        self.groups.retain(|g| {
            if g.members.is_empty() {
                log::debug!("group '{}' lost all members and was dropped", g.name);
            }
            !g.members.is_empty()
        });

        log::info!("created group '{}' with {} parts", name, unique.len());
        self.groups.push(Group {
            name: name.to_string(),
            members: unique,
        });
        let index = self.groups.len() - 1;
        Ok(&self.groups[index])
    }

    pub fn ungroup(&mut self, name: &str) -> Option<Group> {
        let index = self.groups.iter().position(|g| g.name == name)?;
        log::info!("ungrouped '{}'", name);
        Some(self.groups.remove(index))
    }

    /// Members of a group that still resolve in `scene`.
    pub fn resolve_members(&self, name: &str, scene: &Scene) -> Vec<String> {
        self.get(name)
            .map(|group| {
                group
                    .members
                    .iter()
                    .filter(|m| scene.contains(m))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The selection unit for a part: its group (if any) and resolved members.
    pub fn selection_unit(&self, part: &str, scene: &Scene) -> (Option<String>, Vec<String>) {
        match self.group_of(part) {
            Some(group) => {
                let mut members = self.resolve_members(&group.name, scene);
                if members.is_empty() {
                    members.push(part.to_string());
                }
                (Some(group.name.clone()), members)
            }
            None => (None, vec![part.to_string()]),
        }
    }

    pub fn rename_member(&mut self, old: &str, new: &str) {
        for group in &mut self.groups {
            for member in group.members.iter_mut().filter(|m| m.as_str() == old) {
                *member = new.to_string();
            }
        }
    }
}
