//! End-to-end scenarios driven through `Viewer` with an injected clock.

use std::time::{Duration, Instant};

use approx::assert_relative_eq;
use cgmath::Vector3;
use cicerone::prelude::*;

fn part(name: &str, handle: u64, min: [f32; 3], max: [f32; 3]) -> SceneNode {
    SceneNode::mesh(Some(name), MeshHandle(handle), Aabb::new(Vector3::from(min), Vector3::from(max)))
}

fn seeded_viewer() -> Viewer {
    Viewer::new(ViewerConfig {
        seed: Some(11),
        ..ViewerConfig::default()
    })
    .unwrap()
}

fn hit_on(viewer: &Viewer, name: &str) -> PointerHit {
    let bounds = viewer.scene().part_by_name(name).unwrap().world_bounds;
    PointerHit::new(name, bounds.center(), 5.0)
}

fn click(viewer: &mut Viewer, name: &str, multi: bool, now: Instant) {
    let hit = hit_on(viewer, name);
    viewer.pointer_hits(vec![hit], multi);
    viewer.frame(now);
}

#[test]
fn fit_scales_by_largest_extent_and_grounds_the_model() {
    let mut viewer = seeded_viewer();
    let root = SceneNode::group(Some("Crate")).with_child(part("Crate", 1, [0.0, 10.0, -40.0], [200.0, 60.0, 40.0]));
    viewer.load_asset("crate", &root);

    let target = viewer.config().fit.target_size();
    assert_relative_eq!(viewer.scene().fit().scale, target / 200.0, epsilon = 1e-6);

    let bounds = *viewer.scene().model_bounds();
    assert_relative_eq!(bounds.max_extent(), target, epsilon = 1e-4);
    assert_relative_eq!(bounds.min.y, 0.0, epsilon = 1e-4);

    let half = target / 2.0;
    for corner in bounds.corners() {
        assert!(corner.x >= -half - 1e-4 && corner.x <= half + 1e-4);
        assert!(corner.z >= -half - 1e-4 && corner.z <= half + 1e-4);
        assert!(corner.y >= -1e-4 && corner.y <= target + 1e-4);
    }
}

#[test]
fn grouped_wheels_share_one_annotation() {
    let mut viewer = seeded_viewer();
    let root = SceneNode::group(Some("Car"))
        .with_child(part("Body", 1, [-2.0, 0.5, -1.0], [2.0, 1.5, 1.0]))
        .with_child(part("Wheel_1", 2, [-1.8, 0.0, 1.0], [-1.0, 0.8, 1.3]))
        .with_child(part("Wheel_2", 3, [1.0, 0.0, 1.0], [1.8, 0.8, 1.3]));
    viewer.load_asset("car", &root);
    let mut now = Instant::now();

    click(&mut viewer, "Wheel_1", false, now);
    click(&mut viewer, "Wheel_2", true, now);
    viewer.group_selection("Wheels").unwrap();
    viewer.clear_selection();

    now += Duration::from_secs(3);
    click(&mut viewer, "Wheel_1", false, now);
    let mut selected = viewer.selection().selected_names().to_vec();
    selected.sort();
    assert_eq!(selected, vec!["Wheel_1".to_string(), "Wheel_2".to_string()]);

    let stored = viewer
        .commit_active_annotation("Front Axle", "")
        .unwrap()
        .expect("annotation has a title");
    assert_eq!(stored.object_name, "Wheels");

    viewer.clear_selection();
    now += Duration::from_secs(3);
    click(&mut viewer, "Wheel_2", false, now);
    let active = viewer.annotations().active().unwrap();
    assert!(active.persisted);
    assert!(active.show_overlay);
    assert_eq!(active.annotation.title, "Front Axle");
    assert_eq!(active.annotation.id, stored.id);
    assert!(viewer.hud_position().is_some());
}

fn toured_viewer(now: Instant) -> Viewer {
    let mut viewer = seeded_viewer();
    let root = SceneNode::group(Some("Desk"))
        .with_child(part("Lamp", 1, [-3.0, 0.0, -1.0], [-2.0, 3.0, 0.0]))
        .with_child(part("Monitor", 2, [-1.0, 1.0, -1.0], [1.0, 2.5, -0.8]))
        .with_child(part("Keyboard", 3, [-0.8, 1.0, 0.0], [0.8, 1.05, 0.5]));
    viewer.load_asset("desk", &root);
    for (name, title) in [("Lamp", "Lamp"), ("Monitor", "Display"), ("Keyboard", "Keys")] {
        click(&mut viewer, name, false, now);
        viewer.commit_active_annotation(title, "").unwrap();
    }
    viewer.clear_selection();
    viewer.frame(now);
    viewer.drain_events();
    viewer
}

#[test]
fn tour_wraps_back_to_first_annotation() {
    let t0 = Instant::now();
    let mut viewer = toured_viewer(t0);
    viewer.start_tour(t0);
    assert_eq!(viewer.camera_mode(), CameraMode::Tour);

    let mut advanced = Vec::new();
    let mut now = t0;
    while now < t0 + Duration::from_secs(30) && advanced.len() < 3 {
        now += Duration::from_millis(50);
        viewer.frame(now);
        for event in viewer.drain_events() {
            if let ViewerEvent::TourAdvanced { index } = event {
                advanced.push(index);
            }
        }
    }
    assert_eq!(advanced, vec![1, 2, 0]);
    assert_eq!(viewer.cinematic().tour().unwrap().index(), 0);
}

#[test]
fn click_mid_dwell_stops_the_tour() {
    let t0 = Instant::now();
    let mut viewer = toured_viewer(t0);
    viewer.start_tour(t0);

    let mut now = t0;
    for _ in 0..80 {
        now += Duration::from_millis(50);
        viewer.frame(now);
    }
    assert!(viewer.cinematic().tour().unwrap().is_dwelling());
    viewer.drain_events();

    now += Duration::from_millis(50);
    click(&mut viewer, "Monitor", false, now);
    let events = viewer.drain_events();
    assert!(events.contains(&ViewerEvent::TourStopped));
    assert_ne!(viewer.camera_mode(), CameraMode::Tour);

    for _ in 0..200 {
        now += Duration::from_millis(50);
        viewer.frame(now);
    }
    assert!(!viewer
        .drain_events()
        .iter()
        .any(|event| matches!(event, ViewerEvent::TourAdvanced { .. })));
    assert_eq!(viewer.camera_mode(), CameraMode::Manual);
}

#[test]
fn empty_tour_sweeps_around_the_origin() {
    let t0 = Instant::now();
    let mut viewer = seeded_viewer();
    viewer.load_asset("empty", &SceneNode::group(Some("Nothing")));
    viewer.start_tour(t0);
    viewer.frame(t0 + Duration::from_secs(1));
    let first = viewer.camera().eye;
    viewer.frame(t0 + Duration::from_secs(5));
    let later = viewer.camera().eye;

    let radius = viewer.config().tour.orbit_radius;
    assert_relative_eq!((first.x * first.x + first.z * first.z).sqrt(), radius, epsilon = 1e-3);
    assert_relative_eq!((later.x * later.x + later.z * later.z).sqrt(), radius, epsilon = 1e-3);
    assert!((first.x - later.x).abs() > 1e-3 || (first.z - later.z).abs() > 1e-3);
}

#[test]
fn store_round_trip_keeps_groups_and_annotations() {
    let dir = std::env::temp_dir().join(format!("cicerone-scenario-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    let now = Instant::now();
    let mut viewer = toured_viewer(now);
    click(&mut viewer, "Lamp", false, now);
    click(&mut viewer, "Monitor", true, now);
    viewer.group_selection("Workstation").unwrap();
    viewer.update_material_property("Lamp", MaterialProperty::Opacity(0.5)).unwrap();

    let mut store = JsonFileStore::open(&dir).unwrap();
    viewer.save(&mut store).unwrap();
    assert!(!viewer.is_dirty());

    let mut reloaded = seeded_viewer();
    reloaded.load_asset("desk", &SceneNode::group(Some("Desk"))
        .with_child(part("Lamp", 1, [-3.0, 0.0, -1.0], [-2.0, 3.0, 0.0]))
        .with_child(part("Monitor", 2, [-1.0, 1.0, -1.0], [1.0, 2.5, -0.8]))
        .with_child(part("Keyboard", 3, [-0.8, 1.0, 0.0], [0.8, 1.05, 0.5])));
    reloaded.load_from_store(&store).unwrap();
    assert!(reloaded.groups().get("Workstation").unwrap().contains("Monitor"));
    assert_eq!(reloaded.annotations().annotations().len(), 3);
    assert_relative_eq!(reloaded.editor().material("Lamp").unwrap().opacity, 0.5);
    let _ = std::fs::remove_dir_all(&dir);
}
