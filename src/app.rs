//! # Viewer
//!
//! The per-frame orchestrator. A [`Viewer`] owns every component and wires
//! them together in a fixed order each frame:
//!
//! 1. queued pointer/keyboard input interrupts a running tour
//! 2. selection -> annotation binding -> camera target assignment
//! 3. the cinematic camera (and tour) advance
//! 4. ground-like parts are periodically healed
//! 5. the active overlay anchor is projected to the screen
//!
//! Input arrives between frames (`pointer_hits`, `click_at`,
//! `handle_interaction`, `window_event`) and is only acted upon in
//! [`Viewer::frame`]. Camera movement from a new target becomes visible from
//! the next frame on.

use std::collections::{BTreeMap, VecDeque};
use std::time::{Duration, Instant};

use cgmath::Vector3;
use winit::{dpi::PhysicalSize, event::WindowEvent};

use crate::config::ViewerConfig;
use crate::editor::{
    resolve_hit, Annotation, AnnotationBook, EditorSnapshot, EditorStore, Environment, EnvironmentPatch, Group,
    GroupRegistry, MaterialOverride, MaterialProperty, SelectionManager, TextureCache, TextureHandle,
    TextureLoader, TextureSettings, TransformOverride,
};
use crate::error::{ConfigError, EditorError, StoreError, TextureError};
use crate::events::{EventBus, ViewerEvent};
use crate::gfx::camera::{
    compute_distance, CameraController, CameraFrame, CameraMode, CinematicCamera, OrbitCamera, TourSignal, TourStop,
    TransitionOutcome, TransitionRequest,
};
use crate::gfx::geometry::Aabb;
use crate::gfx::hud::{HudProjector, ScreenPoint};
use crate::gfx::picking::{HitTester, ObjectPicker, PointerHit};
use crate::gfx::scene::{Scene, SceneNode, SceneNormalizer, RESERVED_GROUND_NAME};
use crate::input::{InputTranslator, InteractionEvent, KeyCommand};
use crate::store::{self, Datastore, MaterialRecord, TransformRecord};

enum PendingInput {
    Hits { hits: Vec<PointerHit>, multi: bool },
    Interaction(InteractionEvent),
}

pub struct Viewer {
    config: ViewerConfig,
    asset_id: String,
    scene: Scene,
    normalizer: SceneNormalizer,
    camera: OrbitCamera,
    controller: CameraController,
    cinematic: CinematicCamera,
    hud: HudProjector,
    hit_tester: Box<dyn HitTester>,
    input: InputTranslator,
    selection: SelectionManager,
    groups: GroupRegistry,
    annotations: AnnotationBook,
    editor: EditorStore,
    textures: TextureCache<TextureHandle>,
    texture_loader: Option<Box<dyn TextureLoader<TextureHandle>>>,
    events: EventBus,
    pending: VecDeque<PendingInput>,
    viewport: (u32, u32),
    tour_overlay: Option<Vector3<f32>>,
    last_heal: Option<Instant>,
}

impl Default for Viewer {
    fn default() -> Self {
        Self::with_valid_config(ViewerConfig::default())
    }
}

impl Viewer {
    pub fn new(config: ViewerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: ViewerConfig) -> Self {
        let viewport = (1280, 720);
        let camera = OrbitCamera::from_config(&config.camera, viewport.0 as f32 / viewport.1 as f32);
        Self {
            normalizer: SceneNormalizer::new(config.fit.clone()),
            controller: CameraController::from_config(&config.camera),
            cinematic: CinematicCamera::new(config.camera.clone(), config.tour.clone(), config.seed),
            editor: EditorStore::new(config.history_capacity),
            textures: TextureCache::new(config.texture_cache_capacity),
            asset_id: String::new(),
            scene: Scene::empty(),
            camera,
            hud: HudProjector::new(),
            hit_tester: Box::new(ObjectPicker::new()),
            input: InputTranslator::new(),
            selection: SelectionManager::new(),
            groups: GroupRegistry::new(),
            annotations: AnnotationBook::new(""),
            texture_loader: None,
            events: EventBus::new(),
            pending: VecDeque::new(),
            viewport,
            tour_overlay: None,
            last_heal: None,
            config,
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn asset_id(&self) -> &str {
        &self.asset_id
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn camera_mode(&self) -> CameraMode {
        self.cinematic.mode()
    }

    pub fn cinematic(&self) -> &CinematicCamera {
        &self.cinematic
    }

    pub fn selection(&self) -> &SelectionManager {
        &self.selection
    }

    pub fn groups(&self) -> &GroupRegistry {
        &self.groups
    }

    pub fn annotations(&self) -> &AnnotationBook {
        &self.annotations
    }

    pub fn editor(&self) -> &EditorStore {
        &self.editor
    }

    pub fn is_dirty(&self) -> bool {
        self.editor.is_dirty()
    }

    /// Screen position of the overlay anchor from the last frame
    pub fn hud_position(&self) -> Option<ScreenPoint> {
        self.hud.last()
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    pub fn set_texture_loader(&mut self, loader: Box<dyn TextureLoader<TextureHandle>>) {
        self.texture_loader = Some(loader);
    }

    /// Replaces the built-in bounds picker with the host's hit test.
    pub fn set_hit_tester(&mut self, hit_tester: Box<dyn HitTester>) {
        self.hit_tester = hit_tester;
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&ViewerEvent) + 'static) {
        self.events.subscribe(subscriber);
    }

    pub fn drain_events(&mut self) -> Vec<ViewerEvent> {
        self.events.drain()
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
        self.camera.resize_projection(width, height);
    }

    // Loading and saving

    /// Normalizes a freshly loaded asset and resets all per-asset state.
    pub fn load_asset(&mut self, asset_id: &str, root: &SceneNode) {
        self.stop_tour();
        self.cinematic.cancel();
        self.pending.clear();
        self.scene = self.normalizer.normalize(root);
        self.asset_id = asset_id.to_string();
        self.selection.clear();
        self.groups = GroupRegistry::new();
        self.annotations = AnnotationBook::new(asset_id);
        self.editor.load(EditorSnapshot::default());
        self.hud.clear();
        self.tour_overlay = None;
        self.last_heal = None;
        self.frame_model();
        self.publish_selection();
        self.publish_history();
    }

    /// Points the camera at the fitted model from the default orbit angle.
    fn frame_model(&mut self) {
        let bounds = self.scene.model_bounds();
        let center = if bounds.is_empty() {
            Vector3::new(0.0, 0.0, 0.0)
        } else {
            bounds.center()
        };
        let size = if bounds.is_empty() { 0.0 } else { bounds.max_extent() };
        let distance = compute_distance(size, &self.config.camera) * 1.5;
        self.camera.target = center;
        self.camera.set_pitch(0.4);
        self.camera.set_yaw(0.6);
        self.camera.set_distance(distance);
    }

    /// Loads overrides, groups and annotations for the current asset.
    ///
    /// Nothing is applied unless every collection loads.
    pub fn load_from_store(&mut self, datastore: &dyn Datastore) -> Result<(), StoreError> {
        let asset = self.asset_id.clone();
        let materials: Vec<MaterialRecord> = store::load_records(datastore, &asset)?;
        let transforms: Vec<TransformRecord> = store::load_records(datastore, &asset)?;
        let environments: Vec<Environment> = store::load_records(datastore, &asset)?;
        let groups: Vec<Group> = store::load_records(datastore, &asset)?;
        let annotations: Vec<Annotation> = store::load_records(datastore, &asset)?;

        let snapshot = EditorSnapshot {
            materials: materials
                .into_iter()
                .map(|r| (r.object_name, r.material))
                .collect::<BTreeMap<_, _>>(),
            transforms: transforms
                .into_iter()
                .map(|r| (r.object_name, r.transform.normalized()))
                .collect::<BTreeMap<_, _>>(),
            environment: environments.into_iter().next().unwrap_or_default(),
        };
        log::info!(
            "loaded '{}' from {} store: {} materials, {} transforms, {} groups, {} annotations",
            asset,
            datastore.name(),
            snapshot.materials.len(),
            snapshot.transforms.len(),
            groups.len(),
            annotations.len()
        );
        self.editor.load(snapshot);
        self.groups.load(groups);
        self.annotations.load(annotations);
        self.publish_history();
        Ok(())
    }

    /// Writes all editable state. On failure the unsaved-changes flag stays set.
    pub fn save(&mut self, datastore: &mut dyn Datastore) -> Result<(), StoreError> {
        match self.write_all(datastore) {
            Ok(()) => {
                self.editor.mark_saved();
                log::info!("saved '{}' to {} store", self.asset_id, datastore.name());
                self.publish_history();
                Ok(())
            }
            Err(err) => {
                log::warn!("saving '{}' failed: {}", self.asset_id, err);
                self.events
                    .publish(ViewerEvent::Warning(format!("save failed: {}", err)));
                Err(err)
            }
        }
    }

    fn write_all(&self, datastore: &mut dyn Datastore) -> Result<(), StoreError> {
        let asset = self.asset_id.as_str();
        let state = self.editor.state();
        let materials: Vec<MaterialRecord> = state
            .materials
            .iter()
            .map(|(name, material)| MaterialRecord {
                object_name: name.clone(),
                material: material.clone(),
            })
            .collect();
        let transforms: Vec<TransformRecord> = state
            .transforms
            .iter()
            .map(|(name, transform)| TransformRecord {
                object_name: name.clone(),
                transform: transform.clone(),
            })
            .collect();
        store::replace_records(datastore, asset, &materials)?;
        store::replace_records(datastore, asset, &transforms)?;
        store::replace_records(datastore, asset, std::slice::from_ref(&state.environment))?;
        store::replace_records(datastore, asset, self.groups.groups())?;
        store::replace_records(datastore, asset, self.annotations.annotations())?;
        Ok(())
    }

    // Input

    /// Queues hits supplied by the host's own hit test, closest first.
    pub fn pointer_hits(&mut self, hits: Vec<PointerHit>, multi: bool) {
        self.pending.push_back(PendingInput::Hits { hits, multi });
    }

    /// Queues a click to be hit-tested with the configured [`HitTester`].
    pub fn click_at(&mut self, x: f32, y: f32, multi: bool) {
        self.handle_interaction(InteractionEvent::Click { x, y, multi });
    }

    pub fn handle_interaction(&mut self, event: InteractionEvent) {
        self.pending.push_back(PendingInput::Interaction(event));
    }

    /// Feeds a raw window event through the input translator.
    pub fn window_event(&mut self, event: &WindowEvent) {
        if let WindowEvent::Resized(PhysicalSize { width, height }) = event {
            self.resize(*width, *height);
            return;
        }
        if let Some(interaction) = self.input.process_window_event(event) {
            self.handle_interaction(interaction);
        }
    }

    // Frame

    /// Runs one frame at `now`. Returns the overlay's screen position, if any.
    pub fn frame(&mut self, now: Instant) -> Option<ScreenPoint> {
        let pending: Vec<PendingInput> = self.pending.drain(..).collect();
        let interrupted = !pending.is_empty() && self.stop_tour();
        if interrupted {
            log::info!("tour interrupted by user input");
        }
        for input in pending {
            self.apply_input(input, now, interrupted);
        }

        let camera_frame = self.cinematic.update(&mut self.camera, now);
        self.publish_camera_frame(camera_frame);

        self.self_heal(now);

        let anchor = if self.cinematic.mode() == CameraMode::Tour {
            self.tour_overlay
        } else {
            self.annotations
                .active()
                .filter(|active| active.show_overlay)
                .map(|active| active.annotation.anchor())
        };
        self.hud.project(anchor, Some(&self.camera), self.viewport)
    }

    fn apply_input(&mut self, input: PendingInput, now: Instant, tour_interrupted: bool) {
        match input {
            PendingInput::Hits { hits, multi } => self.select_from_hits(&hits, multi, now),
            PendingInput::Interaction(InteractionEvent::Click { x, y, multi }) => {
                let size = (self.viewport.0 as f32, self.viewport.1 as f32);
                let hits = self.hit_tester.hit_test((x, y), size, &self.camera, &self.scene);
                self.select_from_hits(&hits, multi, now);
            }
            PendingInput::Interaction(InteractionEvent::Key(KeyCommand::ToggleTour)) => {
                if !tour_interrupted {
                    self.toggle_tour(now);
                }
            }
            PendingInput::Interaction(InteractionEvent::Key(KeyCommand::Undo)) => {
                self.undo();
            }
            PendingInput::Interaction(InteractionEvent::Key(KeyCommand::Redo)) => {
                self.redo();
            }
            PendingInput::Interaction(InteractionEvent::Key(KeyCommand::ClearSelection)) => {
                self.clear_selection();
            }
            PendingInput::Interaction(event) => {
                if !self.cinematic.is_animating() {
                    self.controller.process_event(&event, &mut self.camera);
                }
            }
        }
    }

    fn select_from_hits(&mut self, hits: &[PointerHit], multi: bool, now: Instant) {
        let Some(hit) = resolve_hit(hits, &self.scene, &self.editor).cloned() else {
            if !multi {
                self.clear_selection();
            }
            return;
        };

        if self.selection.click(&hit.part_name, &self.groups, &self.scene, multi) {
            self.publish_selection();
        }
        if !self.selection.contains(&hit.part_name) {
            return;
        }

        let (group, members) = self.groups.selection_unit(&hit.part_name, &self.scene);
        let object_name = group.unwrap_or_else(|| hit.part_name.clone());
        let active = self.annotations.bind_selection(&object_name, hit.point).clone();
        self.events.publish(ViewerEvent::ActiveAnnotationChanged {
            object_name: Some(object_name.clone()),
            annotation_id: active.annotation.id.clone(),
            show_overlay: active.show_overlay,
        });

        let target_point = if active.persisted {
            active.annotation.anchor()
        } else {
            hit.point
        };
        let bounds = self.scene.bounds_of(members.iter().map(String::as_str));
        let request = TransitionRequest::new(target_point, bounds).for_object(object_name);
        if let TransitionOutcome::Started { pattern, .. } =
            self.cinematic.request_transition(&self.camera, request, now)
        {
            self.events
                .publish(ViewerEvent::CameraAnimationProgress { pattern, progress: 0.0 });
        }
    }

    pub fn clear_selection(&mut self) {
        if self.selection.clear() {
            self.publish_selection();
        }
        if self.annotations.clear_active() {
            self.events.publish(ViewerEvent::ActiveAnnotationChanged {
                object_name: None,
                annotation_id: None,
                show_overlay: false,
            });
        }
    }

    fn publish_camera_frame(&mut self, frame: CameraFrame) {
        if let Some(progress) = frame.progress {
            if progress.finished {
                self.events.publish(ViewerEvent::CameraAnimationFinished {
                    pattern: progress.pattern,
                });
            } else {
                self.events.publish(ViewerEvent::CameraAnimationProgress {
                    pattern: progress.pattern,
                    progress: progress.progress,
                });
            }
        }
        self.handle_tour_signals(frame.tour);
    }

    fn handle_tour_signals(&mut self, signals: Vec<TourSignal>) {
        for signal in signals {
            match signal {
                TourSignal::Show { stop, .. } => {
                    self.tour_overlay = Some(stop.anchor);
                    self.events.publish(ViewerEvent::AnnotationShown {
                        annotation_id: stop.annotation_id,
                        object_name: stop.object_name,
                    });
                }
                TourSignal::Hide => {
                    self.tour_overlay = None;
                    self.events.publish(ViewerEvent::AnnotationHidden);
                }
                TourSignal::Advanced { index } => {
                    self.events.publish(ViewerEvent::TourAdvanced { index });
                }
            }
        }
    }

    fn self_heal(&mut self, now: Instant) {
        let interval = Duration::try_from_secs_f32(self.config.self_heal_interval_secs).unwrap_or(Duration::ZERO);
        let due = self
            .last_heal
            .map_or(true, |last| now.saturating_duration_since(last) >= interval);
        if !due {
            return;
        }
        self.last_heal = Some(now);

        let planes: Vec<&str> = self
            .scene
            .parts()
            .iter()
            .filter(|part| part.plane_like)
            .map(|part| part.name())
            .collect();
        let healed = self.editor.heal_plane_parts(planes);
        if !healed.is_empty() {
            log::warn!("restored hidden ground-like parts: {:?}", healed);
            self.publish_history();
        }
    }

    // Tour

    pub fn start_tour(&mut self, now: Instant) {
        if self.cinematic.mode() == CameraMode::Tour {
            return;
        }
        let stops: Vec<TourStop> = self
            .annotations
            .tour_annotations()
            .into_iter()
            .map(|annotation| TourStop {
                annotation_id: annotation.id.clone(),
                object_name: annotation.object_name.clone(),
                anchor: annotation.anchor(),
                bounds: self.object_bounds(&annotation.object_name),
            })
            .collect();
        let count = stops.len();
        let signals = self.cinematic.start_tour(&self.camera, stops, now);
        self.events.publish(ViewerEvent::TourStarted { stops: count });
        self.handle_tour_signals(signals);
    }

    /// Returns `true` if a tour was running.
    pub fn stop_tour(&mut self) -> bool {
        if !self.cinematic.stop_tour() {
            return false;
        }
        self.tour_overlay = None;
        self.events.publish(ViewerEvent::TourStopped);
        true
    }

    /// Returns whether the tour is running afterwards.
    pub fn toggle_tour(&mut self, now: Instant) -> bool {
        if self.stop_tour() {
            false
        } else {
            self.start_tour(now);
            true
        }
    }

    /// Bounds of a group's resolved members, or of a single part
    fn object_bounds(&self, object_name: &str) -> Aabb {
        if self.groups.get(object_name).is_some() {
            let members = self.groups.resolve_members(object_name, &self.scene);
            self.scene.bounds_of(members.iter().map(String::as_str))
        } else {
            self.scene.bounds_of([object_name])
        }
    }

    // Editing commands

    pub fn undo(&mut self) -> bool {
        let changed = self.editor.undo();
        if changed {
            self.publish_history();
        }
        changed
    }

    pub fn redo(&mut self) -> bool {
        let changed = self.editor.redo();
        if changed {
            self.publish_history();
        }
        changed
    }

    /// Groups the current selection under `name`.
    ///
    /// An active annotation bound to one of the new members is re-bound to
    /// the group.
    pub fn group_selection(&mut self, name: &str) -> Result<(), EditorError> {
        let name = name.trim();
        if name == RESERVED_GROUND_NAME || self.scene.contains(name) {
            return Err(EditorError::NameTaken(name.to_string()));
        }
        let members: Vec<String> = self
            .selection
            .selected_names()
            .iter()
            .filter(|name| self.scene.contains(name))
            .cloned()
            .collect();
        let group = self.groups.create(name, members)?;
        let group_name = group.name.clone();
        let rebind = self
            .annotations
            .active()
            .filter(|active| group.contains(&active.annotation.object_name))
            .map(|active| active.annotation.anchor());
        self.editor.mark_dirty();

        if let Some(anchor) = rebind {
            let active = self.annotations.bind_selection(&group_name, anchor).clone();
            self.events.publish(ViewerEvent::ActiveAnnotationChanged {
                object_name: Some(group_name),
                annotation_id: active.annotation.id.clone(),
                show_overlay: active.show_overlay,
            });
        }
        Ok(())
    }

    pub fn ungroup(&mut self, name: &str) -> bool {
        let removed = self.groups.ungroup(name).is_some();
        if removed {
            self.editor.mark_dirty();
        }
        removed
    }

    /// Renames a part and every reference to it.
    ///
    /// A part may not take a group's name or the reserved ground name. All
    /// checks run before the first rewrite, so a failed rename changes nothing.
    pub fn rename_part(&mut self, old: &str, new: &str) -> Result<(), EditorError> {
        let new = new.trim();
        if self.groups.get(new).is_some() {
            return Err(EditorError::NameTaken(new.to_string()));
        }
        self.scene.rename(old, new)?;
        if old == new {
            return Ok(());
        }
        self.groups.rename_member(old, new);
        let was_selected = self.selection.contains(old);
        self.selection.rename(old, new);
        self.editor.rename_key(old, new);
        self.annotations.rename_object(old, new);
        self.editor.mark_dirty();
        log::info!("renamed part '{}' to '{}'", old, new);
        if was_selected {
            self.publish_selection();
        }
        Ok(())
    }

    /// Stores the active annotation once it has a title or description.
    pub fn commit_active_annotation(
        &mut self,
        title: &str,
        description: &str,
    ) -> Result<Option<Annotation>, EditorError> {
        let stored = self.annotations.commit_active(title, description)?;
        if let Some(annotation) = &stored {
            self.editor.mark_dirty();
            self.events.publish(ViewerEvent::ActiveAnnotationChanged {
                object_name: Some(annotation.object_name.clone()),
                annotation_id: annotation.id.clone(),
                show_overlay: true,
            });
        }
        Ok(stored)
    }

    /// Removes annotations matching `id` or `object_name`. Returns how many.
    pub fn delete_annotation(&mut self, id: Option<&str>, object_name: &str) -> usize {
        let removed = self.annotations.remove(id, object_name).len();
        if removed > 0 {
            self.editor.mark_dirty();
        }
        removed
    }

    fn ensure_part(&self, name: &str) -> Result<(), EditorError> {
        if self.scene.contains(name) {
            Ok(())
        } else {
            Err(EditorError::UnknownPart(name.to_string()))
        }
    }

    /// Resolves a texture through the cache. Failures become warnings.
    fn texture_available(&mut self, texture: Option<&TextureSettings>) -> bool {
        let Some(settings) = texture else {
            return true;
        };
        let result = match self.texture_loader.as_mut() {
            Some(loader) => self.textures.get_or_load(&settings.url, loader.as_mut()),
            None => Err(TextureError {
                url: settings.url.clone(),
                reason: "no texture loader configured".to_string(),
            }),
        };
        match result {
            Ok(_) => true,
            Err(err) => {
                log::warn!("{}", err);
                self.events.publish(ViewerEvent::Warning(err.to_string()));
                false
            }
        }
    }

    /// Returns the cached texture for `url`, if it has been loaded.
    pub fn cached_texture(&mut self, url: &str) -> Option<TextureHandle> {
        let mut no_load = |url: &str| -> Result<TextureHandle, TextureError> {
            Err(TextureError {
                url: url.to_string(),
                reason: "not cached".to_string(),
            })
        };
        self.textures.get_or_load(url, &mut no_load).ok()
    }

    /// Sets a part's material. A texture that fails to load leaves the
    /// previous appearance in place and emits a warning.
    pub fn set_material(&mut self, name: &str, material: MaterialOverride) -> Result<(), EditorError> {
        self.ensure_part(name)?;
        if !self.texture_available(material.texture.as_ref()) {
            return Ok(());
        }
        self.editor.set_material(name, material);
        self.publish_history();
        Ok(())
    }

    pub fn update_material_property(&mut self, name: &str, property: MaterialProperty) -> Result<(), EditorError> {
        self.ensure_part(name)?;
        if let MaterialProperty::Texture(texture) = &property {
            if !self.texture_available(texture.as_ref()) {
                return Ok(());
            }
        }
        self.editor.update_material_property(name, property);
        self.publish_history();
        Ok(())
    }

    pub fn set_transform(&mut self, name: &str, transform: TransformOverride) -> Result<(), EditorError> {
        self.ensure_part(name)?;
        self.editor.set_transform(name, transform);
        self.publish_history();
        Ok(())
    }

    /// Returns the part's visibility afterwards.
    pub fn toggle_visibility(&mut self, name: &str) -> Result<bool, EditorError> {
        self.ensure_part(name)?;
        let visible = self.editor.toggle_visibility(name);
        self.publish_history();
        Ok(visible)
    }

    pub fn delete_object(&mut self, name: &str) -> Result<(), EditorError> {
        self.ensure_part(name)?;
        self.editor.delete_object(name);
        let plane_like = self
            .scene
            .part_by_name(name)
            .map(|part| part.plane_like)
            .unwrap_or(false);
        if !plane_like && self.selection.remove(name) {
            self.publish_selection();
        }
        self.publish_history();
        Ok(())
    }

    pub fn set_environment(&mut self, environment: Environment) {
        self.editor.set_environment(environment);
        self.publish_history();
    }

    pub fn patch_environment(&mut self, patch: EnvironmentPatch) {
        self.editor.patch_environment(patch);
        self.publish_history();
    }

    fn publish_selection(&mut self) {
        self.events.publish(ViewerEvent::SelectionChanged {
            selected: self.selection.selected_names().to_vec(),
            primary: self.selection.primary().map(str::to_string),
        });
    }

    fn publish_history(&mut self) {
        let history = self.editor.history();
        self.events.publish(ViewerEvent::HistoryChanged {
            can_undo: history.can_undo(),
            can_redo: history.can_redo(),
            dirty: self.editor.is_dirty(),
        });
    }
}
