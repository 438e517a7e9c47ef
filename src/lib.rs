//! Dots Projector - laser-dot effect for the ghost-hunting game
//!
//! Core modules:
//! - `projector`: Cone sampling, ray filtering, dot ring buffer, tick scheduling
//! - `scene`: CPU reference scene for ray queries (native demo, tests, web host)
//! - `renderer`: GPU-facing instance data and upload
//! - `settings`: Tuning values and their persistence
//! - `web`: wasm-bindgen control surface (wasm32 only)

pub mod projector;
pub mod renderer;
pub mod scene;
pub mod settings;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use projector::{ColorUpdate, DotsProjector, Emitter, StaticEmitter, TickReport};
pub use scene::Scene;
pub use settings::{ProjectorSettings, QualityPreset};

use glam::Vec3;

/// Projector configuration constants
pub mod consts {
    use glam::Vec3;

    /// Primary cone half-angle (degrees)
    pub const CONE_HALF_ANGLE_DEG: f32 = 14.0;
    /// Number of split sub-beams
    pub const SPLIT_COUNT: u32 = 0;
    /// Split sub-beam half-angle (degrees)
    pub const SPLIT_SPREAD_DEG: f32 = 6.0;
    /// Maximum ray length (meters)
    pub const MAX_DISTANCE: f32 = 18.0;
    /// Dot color (RGBA, green laser)
    pub const DOT_COLOR: [f32; 4] = [0.35, 1.0, 0.45, 0.9];
    /// Ring buffer capacity (dots)
    pub const DOT_CAPACITY: usize = 4000;
    /// Rays sampled per tick, shared between the primary cone and split beams
    pub const RAYS_PER_TICK: u32 = 200;
    /// Tick interval (milliseconds)
    pub const TICK_INTERVAL_MS: f64 = 60.0;
    /// Billboard quad edge length (meters)
    pub const DOT_SIZE: f32 = 0.025;
    /// Offset along the surface normal to avoid z-fighting (meters)
    pub const NORMAL_OFFSET: f32 = 0.002;
    /// Maximum ticks run for a single `advance` call
    pub const MAX_CATCHUP_TICKS: u32 = 4;

    /// World up, used when the emitter has no usable up vector
    pub const WORLD_UP: Vec3 = Vec3::Y;
    /// World forward, used when the emitter exposes no direction
    pub const WORLD_FORWARD: Vec3 = Vec3::Z;

    /// Surfaces whose name contains any of these (case-insensitive) never catch dots
    pub const RAY_DENYLIST: &[&str] = &["player", "capsule", "camera", "dots", "gui"];
}

/// Cross products shorter than this (squared) count as parallel
const BASIS_EPS: f32 = 1e-6;

/// Build a rotation basis `(right, up, forward)` around `forward`
///
/// Falls back to world up when `up` is zero or parallel to `forward`, and to
/// any perpendicular axis when `forward` is itself vertical.
pub fn orthonormal_basis(forward: Vec3, up: Vec3) -> (Vec3, Vec3, Vec3) {
    let forward = forward.normalize_or(consts::WORLD_FORWARD);
    let right = [up, consts::WORLD_UP]
        .into_iter()
        .map(|u| u.cross(forward))
        .find(|r| r.length_squared() > BASIS_EPS)
        .map(Vec3::normalize)
        .unwrap_or_else(|| forward.any_orthonormal_vector());
    let up = forward.cross(right);
    (right, up, forward)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basis_is_orthonormal() {
        let (r, u, f) = orthonormal_basis(Vec3::new(0.3, -0.2, 0.9), Vec3::Y);
        assert!((r.length() - 1.0).abs() < 1e-5);
        assert!((u.length() - 1.0).abs() < 1e-5);
        assert!((f.length() - 1.0).abs() < 1e-5);
        assert!(r.dot(u).abs() < 1e-5);
        assert!(r.dot(f).abs() < 1e-5);
        assert!(u.dot(f).abs() < 1e-5);
        // Right-handed
        assert!((r.cross(u) - f).length() < 1e-5);
    }

    #[test]
    fn test_basis_degenerate_up() {
        // Up parallel to forward falls back to world up
        let (r, _, f) = orthonormal_basis(Vec3::Z, Vec3::Z);
        assert!((r.length() - 1.0).abs() < 1e-5);
        assert!(r.dot(f).abs() < 1e-5);

        // Zero up with vertical forward still yields a basis
        let (r, u, _) = orthonormal_basis(Vec3::Y, Vec3::ZERO);
        assert!((r.length() - 1.0).abs() < 1e-5);
        assert!((u.length() - 1.0).abs() < 1e-5);
    }
}
