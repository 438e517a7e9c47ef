//! Projector lifecycle and the per-tick sampling pass
//!
//! One `DotsProjector` per effect instance. Gameplay code owns it and drives
//! it with `before_render` every frame and `advance` with elapsed time.

use std::rc::{Rc, Weak};

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::billboard::billboard_transform;
use super::cone::sample_cone;
use super::emitter::Emitter;
use super::raycast::{RayFilter, SceneQuery, cast_filtered};
use super::ring::DotRing;
use super::schedule::{IntervalScheduler, RayBudget};
use crate::consts::{WORLD_FORWARD, WORLD_UP};
use crate::renderer::{DotMaterial, DotVertex, quad_vertices};
use crate::settings::{ProjectorSettings, QualityPreset};

/// Optional RGBA channels; missing ones keep their current value
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ColorUpdate {
    pub r: Option<f32>,
    pub g: Option<f32>,
    pub b: Option<f32>,
    pub alpha: Option<f32>,
}

/// What a tick (or a run of ticks) did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub ticks: u32,
    pub rays_cast: u32,
    pub dots_placed: u32,
}

impl TickReport {
    fn merge(&mut self, other: TickReport) {
        self.ticks += other.ticks;
        self.rays_cast += other.rays_cast;
        self.dots_placed += other.dots_placed;
    }
}

/// Rendering handles created by `init`
#[derive(Debug, Clone)]
struct DotHandles {
    material: DotMaterial,
    mesh: [DotVertex; 4],
    ring: DotRing,
}

/// Laser-dot projector instance
pub struct DotsProjector {
    settings: ProjectorSettings,
    filter: RayFilter,
    handles: Option<DotHandles>,
    scheduler: IntervalScheduler,
    enabled: bool,
    emitter: Option<Weak<dyn Emitter>>,
    /// Refreshed by `before_render` while enabled
    camera: Option<Vec3>,
    rng: Pcg32,
}

impl DotsProjector {
    pub fn new(settings: ProjectorSettings, seed: u64) -> Self {
        let settings = settings.sanitized();
        Self {
            filter: RayFilter::new(&settings.denylist),
            scheduler: IntervalScheduler::new(settings.tick_interval_ms),
            settings,
            handles: None,
            enabled: false,
            emitter: None,
            camera: None,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Allocate material, quad mesh and an identity-filled ring
    ///
    /// Does nothing when already initialized.
    pub fn init(&mut self) {
        if self.handles.is_some() {
            return;
        }
        self.handles = Some(DotHandles {
            material: DotMaterial::new(self.settings.color),
            mesh: quad_vertices(self.settings.dot_size),
            ring: DotRing::new(self.settings.capacity),
        });
        log::info!("Dots projector initialized ({} slots)", self.settings.capacity.max(1));
    }

    pub fn is_initialized(&self) -> bool {
        self.handles.is_some()
    }

    /// Start or stop the effect
    ///
    /// Stopping clears every slot so no stale dots stay on screen.
    pub fn enable(&mut self, on: bool) {
        if on {
            self.init();
            if !self.enabled {
                self.enabled = true;
                self.scheduler.start();
                log::info!("Dots projector enabled");
            }
            return;
        }

        let was_enabled = self.enabled;
        self.enabled = false;
        self.scheduler.stop();
        self.camera = None;
        if let Some(handles) = self.handles.as_mut() {
            handles.ring.reset();
        }
        if was_enabled {
            log::info!("Dots projector disabled");
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Per-frame hook: cache the active camera position
    pub fn before_render(&mut self, camera_position: Vec3) {
        if self.enabled && camera_position.is_finite() {
            self.camera = Some(camera_position);
        }
    }

    /// Swap the emitter; takes effect on the next tick
    pub fn set_emitter<E: Emitter + 'static>(&mut self, emitter: Option<&Rc<E>>) {
        self.emitter = emitter.map(|e| {
            let weak: Weak<E> = Rc::downgrade(e);
            weak as Weak<dyn Emitter>
        });
    }

    pub fn clear_emitter(&mut self) {
        self.emitter = None;
    }

    pub fn has_emitter(&self) -> bool {
        self.emitter.as_ref().is_some_and(|w| w.strong_count() > 0)
    }

    /// Update split beams; count is floored, both clamp at zero
    ///
    /// Count is capped at `rays_per_tick`. Non-finite values leave that
    /// parameter unchanged.
    pub fn set_split(&mut self, count: f32, spread_deg: f32) {
        if count.is_finite() {
            let cap = self.settings.rays_per_tick as f32;
            self.settings.split_count = count.floor().clamp(0.0, cap) as u32;
        } else {
            log::debug!("Ignoring split count {}", count);
        }
        if spread_deg.is_finite() {
            self.settings.split_spread_deg = spread_deg.clamp(0.0, 180.0);
        } else {
            log::debug!("Ignoring split spread {}", spread_deg);
        }
    }

    /// Update present color channels
    pub fn set_color(&mut self, update: ColorUpdate) {
        let channels = [update.r, update.g, update.b, update.alpha];
        for (slot, value) in self.settings.color.iter_mut().zip(channels) {
            if let Some(v) = value.filter(|v| v.is_finite()) {
                *slot = v.clamp(0.0, 1.0);
            }
        }
        if let Some(handles) = self.handles.as_mut() {
            handles.material.apply(&update);
        }
    }

    /// Update ray length; ignored unless positive and finite
    pub fn set_max_dist(&mut self, meters: f32) {
        if meters.is_finite() && meters > 0.0 {
            self.settings.max_distance = meters;
        } else {
            log::debug!("Ignoring max distance {}", meters);
        }
    }

    /// Switch capacity and ray count to a preset
    ///
    /// An initialized projector gets a fresh ring at the new capacity; the
    /// dot color carries over and enabled state is kept.
    pub fn set_quality(&mut self, preset: QualityPreset) {
        self.settings.apply_preset(preset);
        self.settings.split_count = self.settings.split_count.min(self.settings.rays_per_tick);
        log::info!(
            "Dots projector quality {} ({} slots, {} rays/tick)",
            preset.as_str(),
            self.settings.capacity,
            self.settings.rays_per_tick
        );

        let Some(old) = self.handles.take() else {
            return;
        };
        self.settings.color = old.material.color;
        self.init();
        if let Some(handles) = self.handles.as_mut() {
            handles.ring.mark_dirty();
        }
    }

    /// Stop ticking and release every rendering handle
    pub fn dispose(&mut self) {
        self.enabled = false;
        self.scheduler.stop();
        self.handles = None;
        self.emitter = None;
        self.camera = None;
        log::info!("Dots projector disposed");
    }

    /// Feed wall-clock time and run the ticks that came due
    pub fn advance<S: SceneQuery + ?Sized>(&mut self, elapsed_ms: f64, scene: &S) -> TickReport {
        let due = self.scheduler.advance(elapsed_ms);
        let mut report = TickReport::default();
        for _ in 0..due {
            report.merge(self.tick(scene));
        }
        report
    }

    /// One full sampling pass
    ///
    /// Primary cone rays go first, then each split beam in turn. Silent no-op
    /// without handles, without a live emitter, or while disabled.
    pub fn tick<S: SceneQuery + ?Sized>(&mut self, scene: &S) -> TickReport {
        if !self.enabled {
            return TickReport::default();
        }
        let Some(handles) = self.handles.as_mut() else {
            return TickReport::default();
        };
        let Some(emitter) = self.emitter.as_ref().and_then(Weak::upgrade) else {
            return TickReport::default();
        };
        let Some(origin) = emitter.world_position().or(self.camera) else {
            return TickReport::default();
        };

        let forward = emitter
            .forward()
            .and_then(|f| f.try_normalize())
            .unwrap_or(WORLD_FORWARD);
        let up = emitter.up().unwrap_or(WORLD_UP);

        let settings = &self.settings;
        let budget = RayBudget::for_tick(settings.rays_per_tick, settings.split_count);
        let mut pass = Pass {
            scene,
            filter: &self.filter,
            ring: &mut handles.ring,
            rng: &mut self.rng,
            origin,
            forward,
            up,
            max_distance: settings.max_distance,
            normal_offset: settings.normal_offset,
            camera: self.camera,
            report: TickReport {
                ticks: 1,
                ..Default::default()
            },
        };

        pass.shoot(budget.primary, settings.cone_angle_deg);
        for _ in 0..budget.splits {
            pass.shoot(budget.per_split, settings.split_spread_deg);
        }

        let report = pass.report;
        if report.dots_placed > 0 {
            handles.ring.mark_dirty();
        }
        report
    }

    pub fn settings(&self) -> &ProjectorSettings {
        &self.settings
    }

    /// Current dot color (material color once initialized)
    pub fn color(&self) -> [f32; 4] {
        self.handles
            .as_ref()
            .map(|h| h.material.color)
            .unwrap_or(self.settings.color)
    }

    pub fn material(&self) -> Option<&DotMaterial> {
        self.handles.as_ref().map(|h| &h.material)
    }

    pub fn mesh(&self) -> Option<&[DotVertex; 4]> {
        self.handles.as_ref().map(|h| &h.mesh)
    }

    pub fn ring(&self) -> Option<&DotRing> {
        self.handles.as_ref().map(|h| &h.ring)
    }

    /// Mutable ring access for the uploader (clears the dirty flag)
    pub fn ring_mut(&mut self) -> Option<&mut DotRing> {
        self.handles.as_mut().map(|h| &mut h.ring)
    }

    /// Whether the ring changed since the last call
    pub fn take_dirty(&mut self) -> bool {
        self.ring_mut().is_some_and(DotRing::take_dirty)
    }

    pub fn camera(&self) -> Option<Vec3> {
        self.camera
    }
}

/// Borrowed state for a single tick
struct Pass<'a, S: ?Sized> {
    scene: &'a S,
    filter: &'a RayFilter,
    ring: &'a mut DotRing,
    rng: &'a mut Pcg32,
    origin: Vec3,
    forward: Vec3,
    up: Vec3,
    max_distance: f32,
    normal_offset: f32,
    camera: Option<Vec3>,
    report: TickReport,
}

impl<S: SceneQuery + ?Sized> Pass<'_, S> {
    /// Cast `rays` directions from one cone, placing a dot per hit
    ///
    /// Split beams share the primary axis and differ only in half-angle.
    fn shoot(&mut self, rays: u32, half_angle_deg: f32) {
        for _ in 0..rays {
            let dir = sample_cone(&mut *self.rng, self.forward, self.up, half_angle_deg);
            self.report.rays_cast += 1;

            let Some(hit) = cast_filtered(self.scene, self.filter, self.origin, dir, self.max_distance) else {
                continue;
            };
            let camera = self.camera.or(Some(self.origin));
            let transform = billboard_transform(hit.point, hit.normal, self.normal_offset, camera);
            self.ring.push(transform);
            self.report.dots_placed += 1;
        }
    }
}
