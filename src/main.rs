//! Dots Projector native demo
//!
//! Sweeps the projector across a small room and logs what it draws. The web
//! build is driven from JavaScript through `WebProjector` instead.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Dots Projector (native) starting...");
    demo::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::start, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::rc::Rc;

    use dots_projector::scene::Shape;
    use dots_projector::{
        ColorUpdate, DotsProjector, ProjectorSettings, QualityPreset, Scene, StaticEmitter,
    };
    use glam::Vec3;

    /// Simulated frame time (ms)
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Demo length (frames)
    const FRAMES: u32 = 240;

    /// 6m x 3m x 10m room with a table and the player's capsule
    fn build_room() -> Scene {
        let mut scene = Scene::new();
        scene.add("floor", Shape::plane(Vec3::ZERO, Vec3::Y));
        scene.add("ceiling", Shape::plane(Vec3::new(0.0, 3.0, 0.0), Vec3::NEG_Y));
        scene.add("wall_north", Shape::plane(Vec3::new(0.0, 0.0, 8.0), Vec3::NEG_Z));
        scene.add("wall_south", Shape::plane(Vec3::new(0.0, 0.0, -2.0), Vec3::Z));
        scene.add("wall_east", Shape::plane(Vec3::new(3.0, 0.0, 0.0), Vec3::NEG_X));
        scene.add("wall_west", Shape::plane(Vec3::new(-3.0, 0.0, 0.0), Vec3::X));
        scene.add("table", Shape::cuboid(Vec3::new(0.5, 0.4, 4.0), Vec3::new(0.8, 0.4, 0.5)));
        scene.add("player_capsule", Shape::sphere(Vec3::new(0.0, 1.0, 0.0), 0.35));
        scene
    }

    pub fn run() {
        let settings = ProjectorSettings::load();
        let scene = build_room();
        let camera = Vec3::new(0.0, 1.6, -0.2);
        let emitter = Rc::new(StaticEmitter::new(Vec3::new(0.2, 1.2, 0.3), Vec3::Z));

        let mut projector = DotsProjector::new(settings, 0x5eed);
        // Optional preset name, e.g. `dots-projector ultra`
        if let Some(arg) = std::env::args().nth(1) {
            match QualityPreset::from_str(&arg) {
                Some(preset) => projector.set_quality(preset),
                None => log::warn!("Unknown quality preset '{}', keeping defaults", arg),
            }
        }
        projector.set_emitter(Some(&emitter));
        projector.set_split(3.0, 4.0);
        projector.set_color(ColorUpdate {
            r: Some(0.4),
            ..Default::default()
        });
        projector.enable(true);
        if let Some(mesh) = projector.mesh() {
            let edge = mesh[1].position[0] - mesh[0].position[0];
            log::info!("Dot quad edge {:.3} m", edge);
        }

        let mut rays = 0;
        let mut uploads = 0;
        for frame in 0..FRAMES {
            // Slow pan across the room
            let yaw = (frame as f32 / FRAMES as f32 - 0.5) * 1.2;
            emitter.set_pose(Vec3::new(0.2, 1.2, 0.3), Vec3::new(yaw.sin(), -0.15, yaw.cos()));

            projector.before_render(camera);
            let report = projector.advance(FRAME_MS, &scene);
            rays += report.rays_cast;
            if projector.take_dirty() {
                uploads += 1;
            }
        }

        if let Some(ring) = projector.ring() {
            log::info!(
                "{} rays cast, {} dots placed, {} active of {} slots, {} uploads",
                rays,
                ring.used(),
                ring.active_count(),
                ring.capacity(),
                uploads
            );
        }

        projector.enable(false);
        let cleared = projector.ring().is_some_and(|r| r.is_clear());
        log::info!("Disabled, ring cleared: {}", cleared);
        projector.dispose();
    }
}
