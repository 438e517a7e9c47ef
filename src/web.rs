//! Browser control surface
//!
//! The JavaScript game mirrors its collision geometry into a [`Scene`], moves
//! the emitter with the held item, and calls `frame` once per render.

use std::rc::Rc;

use glam::Vec3;
use wasm_bindgen::prelude::*;

use crate::projector::{ColorUpdate, DotsProjector, StaticEmitter};
use crate::renderer::{QUAD_INDICES, quad_floats, ring_floats};
use crate::scene::{Scene, Shape};
use crate::settings::{ProjectorSettings, QualityPreset};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
}

#[wasm_bindgen]
pub struct WebProjector {
    projector: DotsProjector,
    scene: Scene,
    emitter: Rc<StaticEmitter>,
}

#[wasm_bindgen]
impl WebProjector {
    /// Projector using settings stored in LocalStorage
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebProjector {
        let seed = js_sys::Date::now() as u64;
        log::info!("Dots projector created with seed: {}", seed);
        Self {
            projector: DotsProjector::new(ProjectorSettings::load(), seed),
            scene: Scene::new(),
            emitter: Rc::new(StaticEmitter::default()),
        }
    }

    pub fn init(&mut self) {
        self.projector.init();
    }

    pub fn enable(&mut self, on: bool) {
        self.projector.enable(on);
    }

    /// Point the projector from a held item or placed tripod
    pub fn set_emitter_pose(&mut self, px: f32, py: f32, pz: f32, fx: f32, fy: f32, fz: f32) {
        self.emitter.set_pose(Vec3::new(px, py, pz), Vec3::new(fx, fy, fz));
        self.projector.set_emitter(Some(&self.emitter));
    }

    pub fn clear_emitter(&mut self) {
        self.projector.clear_emitter();
    }

    pub fn set_split(&mut self, count: f32, spread_deg: f32) {
        self.projector.set_split(count, spread_deg);
    }

    pub fn set_color(&mut self, r: Option<f32>, g: Option<f32>, b: Option<f32>, alpha: Option<f32>) {
        self.projector.set_color(ColorUpdate { r, g, b, alpha });
    }

    pub fn set_max_dist(&mut self, meters: f32) {
        self.projector.set_max_dist(meters);
    }

    /// Switch preset by name; returns false for an unknown name
    pub fn set_quality(&mut self, name: &str) -> bool {
        match QualityPreset::from_str(name) {
            Some(preset) => {
                self.projector.set_quality(preset);
                true
            }
            None => {
                log::debug!("Unknown quality preset ignored: {}", name);
                false
            }
        }
    }

    pub fn quality(&self) -> String {
        self.projector.settings().quality.as_str().to_string()
    }

    pub fn dispose(&mut self) {
        self.projector.dispose();
    }

    #[allow(clippy::too_many_arguments)]
    pub fn add_plane(&mut self, name: &str, px: f32, py: f32, pz: f32, nx: f32, ny: f32, nz: f32) -> usize {
        self.scene
            .add(name, Shape::plane(Vec3::new(px, py, pz), Vec3::new(nx, ny, nz)))
    }

    pub fn add_sphere(&mut self, name: &str, cx: f32, cy: f32, cz: f32, radius: f32) -> usize {
        self.scene.add(name, Shape::sphere(Vec3::new(cx, cy, cz), radius))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn add_box(&mut self, name: &str, cx: f32, cy: f32, cz: f32, hx: f32, hy: f32, hz: f32) -> usize {
        self.scene
            .add(name, Shape::cuboid(Vec3::new(cx, cy, cz), Vec3::new(hx, hy, hz)))
    }

    pub fn set_pickable(&mut self, name: &str, pickable: bool) -> usize {
        self.scene.set_pickable(name, pickable)
    }

    pub fn remove_surface(&mut self, name: &str) -> usize {
        self.scene.remove(name)
    }

    /// Before-render hook plus scheduler advance
    ///
    /// Returns true when the instance data changed and should be re-uploaded.
    pub fn frame(&mut self, elapsed_ms: f64, cx: f32, cy: f32, cz: f32) -> bool {
        self.projector.before_render(Vec3::new(cx, cy, cz));
        self.projector.advance(elapsed_ms, &self.scene);
        self.projector.take_dirty()
    }

    /// 16 floats per slot, column-major
    pub fn instance_data(&self) -> Vec<f32> {
        self.projector.ring().map(ring_floats).unwrap_or_default()
    }

    pub fn active_count(&self) -> usize {
        self.projector.ring().map_or(0, |r| r.active_count())
    }

    pub fn capacity(&self) -> usize {
        self.projector.ring().map_or(0, |r| r.capacity())
    }

    /// RGBA of the dot material
    pub fn color(&self) -> Vec<f32> {
        self.projector.color().to_vec()
    }

    pub fn dot_size(&self) -> f32 {
        self.projector.settings().dot_size
    }

    /// Quad mesh as `x, y, z, u, v` per vertex; empty before init
    pub fn quad_data(&self) -> Vec<f32> {
        self.projector
            .mesh()
            .map(|m| quad_floats(m))
            .unwrap_or_default()
    }

    pub fn quad_indices(&self) -> Vec<u16> {
        QUAD_INDICES.to_vec()
    }

    pub fn save_settings(&self) {
        self.projector.settings().save();
    }
}

impl Default for WebProjector {
    fn default() -> Self {
        Self::new()
    }
}
