//! # Cicerone Demo
//!
//! Headless walkthrough of the engine: builds a small synthetic car, groups
//! its wheels, annotates a few parts, then runs the annotation tour on a
//! simulated 60 Hz clock and logs the camera path.
//!
//! ## Usage:
//! ```bash
//! cargo run --bin cicerone-demo -- [config.json] [store-dir]
//! ```
//!
//! Set `RUST_LOG=debug` for per-transition detail.

use std::io::Write;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Context;
use cgmath::Vector3;
use cicerone::prelude::*;

const FRAME: Duration = Duration::from_millis(16);

fn part(name: &str, handle: u64, min: [f32; 3], max: [f32; 3]) -> SceneNode {
    SceneNode::mesh(Some(name), MeshHandle(handle), Aabb::new(Vector3::from(min), Vector3::from(max)))
}

/// A 4.4 m long car on a showroom floor, in raw asset units (centimetres).
fn synthetic_car() -> SceneNode {
    SceneNode::group(Some("Roadster"))
        .with_child(part("Body", 1, [-220.0, 30.0, -90.0], [220.0, 130.0, 90.0]))
        .with_child(part("Wheel_1", 2, [-160.0, 0.0, 80.0], [-100.0, 60.0, 100.0]))
        .with_child(part("Wheel_2", 3, [100.0, 0.0, 80.0], [160.0, 60.0, 100.0]))
        .with_child(part("Wheel_3", 4, [-160.0, 0.0, -100.0], [-100.0, 60.0, -80.0]))
        .with_child(part("Wheel_4", 5, [100.0, 0.0, -100.0], [160.0, 60.0, -80.0]))
        .with_child(part("Spoiler", 6, [-225.0, 130.0, -70.0], [-200.0, 145.0, 70.0]))
        .with_child(part("Floor", 7, [-600.0, 0.0, -600.0], [600.0, 0.0, 600.0]))
}

/// Clicks a part through host-style hits at its bounds centre.
fn click(viewer: &mut Viewer, name: &str, multi: bool, now: Instant) {
    let Some(part) = viewer.scene().part_by_name(name) else {
        log::warn!("no part named '{}'", name);
        return;
    };
    let point = part.world_bounds.center();
    viewer.pointer_hits(vec![PointerHit::new(name, point, 10.0)], multi);
    viewer.frame(now);
}

fn annotate(viewer: &mut Viewer, name: &str, title: &str, description: &str, now: &mut Instant) -> anyhow::Result<()> {
    click(viewer, name, false, *now);
    viewer
        .commit_active_annotation(title, description)
        .with_context(|| format!("annotating {}", name))?;
    *now += FRAME;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {:<5} {}] {}",
                buf.timestamp_millis(),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => ViewerConfig::from_json_file(Path::new(&path))
            .with_context(|| format!("loading config from {}", path))?,
        None => ViewerConfig {
            seed: Some(7),
            ..ViewerConfig::default()
        },
    };

    let mut viewer = Viewer::new(config)?;
    viewer.subscribe(|event| log::debug!("event: {:?}", event));
    viewer.load_asset("roadster", &synthetic_car());

    let stats = viewer.scene().get_statistics();
    log::info!("scene ready: {:?}", stats);

    let mut now = Instant::now();
    viewer.frame(now);

    // Group the wheels and describe a few parts.
    for (i, wheel) in ["Wheel_1", "Wheel_2", "Wheel_3", "Wheel_4"].iter().enumerate() {
        click(&mut viewer, wheel, i > 0, now);
        now += FRAME;
    }
    viewer.group_selection("Wheels")?;
    annotate(&mut viewer, "Wheel_2", "Front Axle", "Forged 19 inch rims", &mut now)?;
    annotate(&mut viewer, "Body", "Monocoque", "Carbon fibre tub", &mut now)?;
    annotate(&mut viewer, "Spoiler", "Rear Wing", "Active aero at speed", &mut now)?;
    viewer.clear_selection();

    viewer.update_material_property("Body", MaterialProperty::Metalness(0.9))?;
    viewer.update_material_property("Body", MaterialProperty::Roughness(0.2))?;
    viewer.undo();

    if let Some(dir) = args.next() {
        let mut store = JsonFileStore::open(&dir).with_context(|| format!("opening store at {}", dir))?;
        viewer.save(&mut store)?;
    }

    // Two full laps of the tour.
    viewer.start_tour(now);
    let tour_end = now + Duration::from_secs(40);
    let mut last_logged = now;
    while now < tour_end {
        now += FRAME;
        let overlay = viewer.frame(now);
        for event in viewer.drain_events() {
            match event {
                ViewerEvent::AnnotationShown { object_name, .. } => {
                    log::info!("showing annotation for '{}' at {:?}", object_name, overlay);
                }
                ViewerEvent::CameraAnimationFinished { pattern } => {
                    log::info!("arrived via {}", pattern.name());
                }
                ViewerEvent::TourAdvanced { index } => log::info!("tour advanced to stop {}", index),
                _ => {}
            }
        }
        if now.duration_since(last_logged) >= Duration::from_millis(500) {
            let eye = viewer.camera().eye;
            log::debug!("camera eye ({:.2}, {:.2}, {:.2})", eye.x, eye.y, eye.z);
            last_logged = now;
        }
    }

    // Any click ends the tour.
    click(&mut viewer, "Body", false, now);
    log::info!(
        "tour stopped by click; camera mode {:?}, unsaved changes: {}",
        viewer.camera_mode(),
        viewer.is_dirty()
    );
    Ok(())
}
