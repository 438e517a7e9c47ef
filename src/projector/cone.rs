//! Cone sampling
//!
//! Directions are drawn uniformly over the spherical cap, not uniformly in
//! angle: `cos θ` is linear in the first random number, which keeps dots from
//! bunching at the beam center.

use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

use crate::orthonormal_basis;

/// Sample a random unit direction within `half_angle_deg` of `forward`
pub fn sample_cone<R: Rng + ?Sized>(rng: &mut R, forward: Vec3, up: Vec3, half_angle_deg: f32) -> Vec3 {
    let u: f32 = rng.random();
    let v: f32 = rng.random();
    cone_direction(forward, up, half_angle_deg, u, v)
}

/// Map two uniforms `u, v ∈ [0, 1)` to a direction inside the cone
///
/// A half-angle of 0 returns `forward` for every `u, v`. Half-angles are
/// clamped to `[0, 180]`.
pub fn cone_direction(forward: Vec3, up: Vec3, half_angle_deg: f32, u: f32, v: f32) -> Vec3 {
    let (tangent, bitangent, forward) = orthonormal_basis(forward, up);

    let theta_max = half_angle_deg.clamp(0.0, 180.0).to_radians();
    let cos_theta = 1.0 - u * (1.0 - theta_max.cos());
    let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
    let phi = TAU * v;

    let dir = tangent * (phi.cos() * sin_theta) + bitangent * (phi.sin() * sin_theta) + forward * cos_theta;
    dir.normalize_or(forward)
}
