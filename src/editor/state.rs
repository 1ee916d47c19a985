//! Editable per-asset state: material and transform overrides plus the
//! environment. Everything here is plain data so history snapshots are a
//! structural `clone()`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Texture reference and its placement on the surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureSettings {
    pub url: String,
    pub repeat: [f32; 2],
    pub offset: [f32; 2],
    /// Radians
    pub rotation: f32,
}

impl Default for TextureSettings {
    fn default() -> Self {
        Self {
            url: String::new(),
            repeat: [1.0, 1.0],
            offset: [0.0, 0.0],
            rotation: 0.0,
        }
    }
}

impl TextureSettings {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}

/// Appearance override for one part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialOverride {
    pub color: [f32; 3],
    pub metalness: f32,
    pub roughness: f32,
    pub opacity: f32,
    pub emissive: [f32; 3],
    pub emissive_intensity: f32,
    pub texture: Option<TextureSettings>,
}

impl Default for MaterialOverride {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            metalness: 0.0,
            roughness: 0.5,
            opacity: 1.0,
            emissive: [0.0, 0.0, 0.0],
            emissive_intensity: 0.0,
            texture: None,
        }
    }
}

/// A single material field change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "property", content = "value")]
pub enum MaterialProperty {
    Color([f32; 3]),
    Metalness(f32),
    Roughness(f32),
    Opacity(f32),
    Emissive([f32; 3]),
    EmissiveIntensity(f32),
    Texture(Option<TextureSettings>),
}

impl MaterialOverride {
    pub fn apply(&mut self, property: MaterialProperty) {
        match property {
            MaterialProperty::Color(color) => self.color = color,
            MaterialProperty::Metalness(v) => self.metalness = v.clamp(0.0, 1.0),
            MaterialProperty::Roughness(v) => self.roughness = v.clamp(0.0, 1.0),
            MaterialProperty::Opacity(v) => self.opacity = v.clamp(0.0, 1.0),
            MaterialProperty::Emissive(color) => self.emissive = color,
            MaterialProperty::EmissiveIntensity(v) => self.emissive_intensity = v.max(0.0),
            MaterialProperty::Texture(texture) => self.texture = texture,
        }
    }
}

/// Visibility and placement override for one part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformOverride {
    pub visible: bool,
    /// Implies `visible == false`
    pub deleted: bool,
    pub position: [f32; 3],
    /// Euler angles in radians
    pub rotation: [f32; 3],
    pub scale: [f32; 3],
}

impl Default for TransformOverride {
    fn default() -> Self {
        Self {
            visible: true,
            deleted: false,
            position: [0.0; 3],
            rotation: [0.0; 3],
            scale: [1.0; 3],
        }
    }
}

impl TransformOverride {
    /// Restores the deleted-implies-hidden rule after arbitrary edits.
    pub fn normalized(mut self) -> Self {
        if self.deleted {
            self.visible = false;
        }
        self
    }

    pub fn is_hidden(&self) -> bool {
        self.deleted || !self.visible
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum Background {
    Color { color: [f32; 3] },
    Gradient { top: [f32; 3], bottom: [f32; 3] },
    /// Image-based backdrop identified by the host
    Environment { name: String },
}

impl Default for Background {
    fn default() -> Self {
        Background::Gradient {
            top: [0.32, 0.36, 0.42],
            bottom: [0.08, 0.09, 0.11],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fog {
    pub enabled: bool,
    pub color: [f32; 3],
    pub near: f32,
    pub far: f32,
}

impl Default for Fog {
    fn default() -> Self {
        Self {
            enabled: false,
            color: [0.8, 0.8, 0.8],
            near: 30.0,
            far: 120.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lighting {
    pub preset: String,
    pub exposure: f32,
    pub ambient_intensity: f32,
    pub shadows: bool,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            preset: "studio".to_string(),
            exposure: 1.0,
            ambient_intensity: 0.4,
            shadows: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Grid {
    pub visible: bool,
    pub size: f32,
    pub divisions: u32,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            visible: true,
            size: 40.0,
            divisions: 40,
        }
    }
}

/// The one active environment of an asset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Environment {
    pub background: Background,
    pub fog: Fog,
    pub lighting: Lighting,
    pub grid: Grid,
}

/// Partial environment update; `None` fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentPatch {
    pub background: Option<Background>,
    pub fog: Option<Fog>,
    pub lighting: Option<Lighting>,
    pub grid: Option<Grid>,
}

impl EnvironmentPatch {
    pub fn is_empty(&self) -> bool {
        self.background.is_none() && self.fog.is_none() && self.lighting.is_none() && self.grid.is_none()
    }
}

impl Environment {
    pub fn apply(&mut self, patch: EnvironmentPatch) {
        if let Some(background) = patch.background {
            self.background = background;
        }
        if let Some(fog) = patch.fog {
            self.fog = fog;
        }
        if let Some(lighting) = patch.lighting {
            self.lighting = lighting;
        }
        if let Some(grid) = patch.grid {
            self.grid = grid;
        }
    }
}

/// Point-in-time copy of everything undo can restore.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditorSnapshot {
    pub materials: BTreeMap<String, MaterialOverride>,
    pub transforms: BTreeMap<String, TransformOverride>,
    pub environment: Environment,
}

impl EditorSnapshot {
    /// Moves the overrides stored under `old` to `new`.
    pub fn rename_key(&mut self, old: &str, new: &str) {
        if let Some(material) = self.materials.remove(old) {
            self.materials.insert(new.to_string(), material);
        }
        if let Some(transform) = self.transforms.remove(old) {
            self.transforms.insert(new.to_string(), transform);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn material_scalars_are_clamped() {
        let mut material = MaterialOverride::default();
        material.apply(MaterialProperty::Metalness(3.0));
        material.apply(MaterialProperty::Opacity(-1.0));
        material.apply(MaterialProperty::EmissiveIntensity(-2.0));
        assert_eq!(material.metalness, 1.0);
        assert_eq!(material.opacity, 0.0);
        assert_eq!(material.emissive_intensity, 0.0);
    }

    #[test]
    fn deleted_transform_is_hidden() {
        let transform = TransformOverride {
            deleted: true,
            visible: true,
            ..TransformOverride::default()
        }
        .normalized();
        assert!(!transform.visible);
        assert!(transform.is_hidden());
    }

    #[test]
    fn patch_only_touches_given_sections() {
        let mut env = Environment::default();
        let fog = Fog {
            enabled: true,
            ..Fog::default()
        };
        env.apply(EnvironmentPatch {
            fog: Some(fog.clone()),
            ..EnvironmentPatch::default()
        });
        assert_eq!(env.fog, fog);
        assert_eq!(env.grid, Grid::default());
        assert!(EnvironmentPatch::default().is_empty());
    }

    #[test]
    fn background_serializes_with_mode_tag() {
        let json = serde_json::to_value(Background::Color { color: [1.0, 0.0, 0.0] }).unwrap();
        assert_eq!(json["mode"], "color");
    }

    #[test]
    fn rename_key_moves_both_maps() {
        let mut snapshot = EditorSnapshot::default();
        snapshot.materials.insert("A".into(), MaterialOverride::default());
        snapshot.transforms.insert("A".into(), TransformOverride::default());
        snapshot.rename_key("A", "B");
        assert!(snapshot.materials.contains_key("B"));
        assert!(snapshot.transforms.contains_key("B"));
        assert!(!snapshot.materials.contains_key("A"));
    }
}
