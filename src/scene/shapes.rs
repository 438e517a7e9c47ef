//! Analytic ray intersection for scene surfaces

use glam::Vec3;

use crate::projector::Ray;

/// Rays closer to parallel than this are treated as misses
const PARALLEL_EPS: f32 = 1e-6;

/// Surface geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Infinite plane through `point`
    Plane { point: Vec3, normal: Vec3 },
    Sphere { center: Vec3, radius: f32 },
    /// Axis-aligned box
    Cuboid { min: Vec3, max: Vec3 },
}

impl Shape {
    pub fn plane(point: Vec3, normal: Vec3) -> Self {
        Shape::Plane {
            point,
            normal: normal.normalize_or(Vec3::Y),
        }
    }

    pub fn sphere(center: Vec3, radius: f32) -> Self {
        Shape::Sphere {
            center,
            radius: radius.abs(),
        }
    }

    /// Box from center and half extents
    pub fn cuboid(center: Vec3, half_extents: Vec3) -> Self {
        let half = half_extents.abs();
        Shape::Cuboid {
            min: center - half,
            max: center + half,
        }
    }

    /// Distance along the ray and surface normal of the first crossing
    ///
    /// Starting inside a sphere or box hits its far side.
    pub fn intersect(&self, ray: &Ray) -> Option<(f32, Vec3)> {
        match *self {
            Shape::Plane { point, normal } => ray_plane(ray, point, normal),
            Shape::Sphere { center, radius } => ray_sphere(ray, center, radius),
            Shape::Cuboid { min, max } => ray_cuboid(ray, min, max),
        }
    }
}

fn ray_plane(ray: &Ray, point: Vec3, normal: Vec3) -> Option<(f32, Vec3)> {
    let denom = normal.dot(ray.direction);
    if denom.abs() < PARALLEL_EPS {
        return None;
    }
    let t = (point - ray.origin).dot(normal) / denom;
    (t >= 0.0).then_some((t, normal))
}

fn ray_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<(f32, Vec3)> {
    if radius <= 0.0 {
        return None;
    }
    let oc = ray.origin - center;
    let b = oc.dot(ray.direction);
    let c = oc.length_squared() - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let sqrt_disc = disc.sqrt();
    let mut t = -b - sqrt_disc;
    if t < 0.0 {
        // Origin inside the sphere
        t = -b + sqrt_disc;
    }
    if t < 0.0 {
        return None;
    }
    let normal = (ray.at(t) - center) / radius;
    Some((t, normal))
}

/// Slab test, tracking which face was crossed
fn ray_cuboid(ray: &Ray, min: Vec3, max: Vec3) -> Option<(f32, Vec3)> {
    let mut t_near = f32::NEG_INFINITY;
    let mut t_far = f32::INFINITY;
    let mut near_normal = Vec3::ZERO;
    let mut far_normal = Vec3::ZERO;

    for axis in 0..3 {
        let o = ray.origin[axis];
        let d = ray.direction[axis];
        let (lo, hi) = (min[axis], max[axis]);

        if d.abs() < PARALLEL_EPS {
            if o < lo || o > hi {
                return None;
            }
            continue;
        }

        let mut t0 = (lo - o) / d;
        let mut t1 = (hi - o) / d;
        let mut n0 = Vec3::ZERO;
        n0[axis] = -1.0;
        let mut n1 = -n0;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
            std::mem::swap(&mut n0, &mut n1);
        }
        if t0 > t_near {
            t_near = t0;
            near_normal = n0;
        }
        if t1 < t_far {
            t_far = t1;
            far_normal = n1;
        }
        if t_near > t_far {
            return None;
        }
    }

    if t_far < 0.0 {
        None
    } else if t_near >= 0.0 {
        Some((t_near, near_normal))
    } else {
        Some((t_far, far_normal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_hit_and_parallel_miss() {
        let wall = Shape::plane(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let (t, n) = wall.intersect(&Ray::new(Vec3::ZERO, Vec3::Z, 18.0)).unwrap();
        assert!((t - 5.0).abs() < 1e-5);
        assert_eq!(n, Vec3::NEG_Z);

        assert!(wall.intersect(&Ray::new(Vec3::ZERO, Vec3::X, 18.0)).is_none());
        // Behind the origin
        assert!(wall.intersect(&Ray::new(Vec3::ZERO, Vec3::NEG_Z, 18.0)).is_none());
    }

    #[test]
    fn test_sphere_outside_and_inside() {
        let ball = Shape::sphere(Vec3::new(0.0, 0.0, 10.0), 2.0);
        let (t, n) = ball.intersect(&Ray::new(Vec3::ZERO, Vec3::Z, 18.0)).unwrap();
        assert!((t - 8.0).abs() < 1e-4);
        assert!((n - Vec3::NEG_Z).length() < 1e-4);

        let (t, _) = ball
            .intersect(&Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::Z, 18.0))
            .unwrap();
        assert!((t - 2.0).abs() < 1e-4);

        assert!(ball.intersect(&Ray::new(Vec3::ZERO, Vec3::X, 18.0)).is_none());
    }

    #[test]
    fn test_cuboid_faces() {
        let crate_box = Shape::cuboid(Vec3::new(0.0, 0.0, 4.0), Vec3::splat(1.0));
        let (t, n) = crate_box.intersect(&Ray::new(Vec3::ZERO, Vec3::Z, 18.0)).unwrap();
        assert!((t - 3.0).abs() < 1e-5);
        assert_eq!(n, Vec3::NEG_Z);

        let (t, n) = crate_box
            .intersect(&Ray::new(Vec3::new(5.0, 0.0, 4.0), Vec3::NEG_X, 18.0))
            .unwrap();
        assert!((t - 4.0).abs() < 1e-5);
        assert_eq!(n, Vec3::X);

        // From inside, the exit face
        let (t, n) = crate_box
            .intersect(&Ray::new(Vec3::new(0.0, 0.0, 4.0), Vec3::Y, 18.0))
            .unwrap();
        assert!((t - 1.0).abs() < 1e-5);
        assert_eq!(n, Vec3::Y);

        assert!(crate_box.intersect(&Ray::new(Vec3::new(3.0, 0.0, 0.0), Vec3::Z, 18.0)).is_none());
    }
}
