//! Ray casting against the host scene
//!
//! The scene is reached through [`SceneQuery`]; the projector only decides
//! which surfaces are allowed to catch a dot.

use glam::Vec3;

use crate::consts::RAY_DENYLIST;

/// A bounded ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit direction
    pub direction: Vec3,
    /// Maximum hit distance along `direction`
    pub length: f32,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3, length: f32) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
            length,
        }
    }

    /// Point at distance `t` along the ray
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// What the accept predicate gets to see about a candidate surface
#[derive(Debug, Clone, Copy)]
pub struct SurfaceInfo<'a> {
    pub name: &'a str,
    pub pickable: bool,
}

/// First accepted intersection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub point: Vec3,
    /// Unit surface normal
    pub normal: Vec3,
    pub distance: f32,
}

/// Ray-vs-scene intersection provided by the host
pub trait SceneQuery {
    /// Nearest hit within `ray.length` whose surface passes `accept`
    ///
    /// Rejected surfaces must not occlude: the next-nearest accepted surface
    /// is returned instead.
    fn pick(&self, ray: &Ray, accept: &dyn Fn(&SurfaceInfo<'_>) -> bool) -> Option<RayHit>;
}

/// Rejects non-pickable surfaces and anything whose name hits the denylist
#[derive(Debug, Clone)]
pub struct RayFilter {
    /// ASCII-lowercased name fragments
    patterns: Vec<String>,
}

impl Default for RayFilter {
    fn default() -> Self {
        Self::new(RAY_DENYLIST.iter().copied())
    }
}

impl RayFilter {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            patterns: patterns
                .into_iter()
                .map(|p| p.as_ref().trim().to_ascii_lowercase())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    /// Case-insensitive substring match against the denylist
    pub fn is_denied(&self, name: &str) -> bool {
        self.patterns.iter().any(|p| contains_ignore_ascii_case(name, p))
    }

    pub fn accepts(&self, surface: &SurfaceInfo<'_>) -> bool {
        surface.pickable && !self.is_denied(surface.name)
    }
}

/// `needle` must already be ASCII-lowercase
fn contains_ignore_ascii_case(haystack: &str, needle: &str) -> bool {
    let (haystack, needle) = (haystack.as_bytes(), needle.as_bytes());
    needle.is_empty()
        || haystack
            .windows(needle.len())
            .any(|w| w.eq_ignore_ascii_case(needle))
}

/// Cast a ray and keep only hits the filter accepts
///
/// The returned normal always faces back toward the ray origin. A miss is the
/// common case in open space and is not an error.
pub fn cast_filtered<S: SceneQuery + ?Sized>(
    scene: &S,
    filter: &RayFilter,
    origin: Vec3,
    direction: Vec3,
    max_distance: f32,
) -> Option<RayHit> {
    if max_distance.is_nan() || max_distance <= 0.0 {
        return None;
    }
    let ray = Ray::new(origin, direction, max_distance);
    if ray.direction == Vec3::ZERO {
        return None;
    }

    let mut hit = scene.pick(&ray, &|s: &SurfaceInfo<'_>| filter.accepts(s))?;
    if hit.distance > max_distance {
        return None;
    }
    hit.normal = hit.normal.normalize_or(-ray.direction);
    if hit.normal.dot(ray.direction) > 0.0 {
        hit.normal = -hit.normal;
    }
    Some(hit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Scene, Shape};

    fn wall_scene() -> Scene {
        let mut scene = Scene::new();
        scene.add("Player_Capsule", Shape::sphere(Vec3::new(0.0, 0.0, 2.0), 0.5));
        scene.add("hallway_wall", Shape::plane(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z));
        scene.add("back_wall", Shape::plane(Vec3::new(0.0, 0.0, 9.0), Vec3::NEG_Z));
        scene
    }

    #[test]
    fn test_denylist_is_case_insensitive() {
        let filter = RayFilter::default();
        assert!(filter.is_denied("PLAYER_capsule"));
        assert!(filter.is_denied("MainCamera_rig"));
        assert!(filter.is_denied("laserDotsMesh"));
        assert!(!filter.is_denied("hallway_wall"));
    }

    #[test]
    fn test_denylist_match_edges() {
        let filter = RayFilter::new(["  GUI ", "", "camera"]);
        // Pattern at either end of the name, and the whole name
        assert!(filter.is_denied("gui_overlay"));
        assert!(filter.is_denied("hud_Gui"));
        assert!(filter.is_denied("CAMERA"));
        // Shorter than the pattern, or empty
        assert!(!filter.is_denied("cam"));
        assert!(!filter.is_denied(""));
        // Non-ASCII names still compare byte-wise
        assert!(filter.is_denied("Kamera_camera_ü"));
        assert!(!filter.is_denied("guí"));
    }

    #[test]
    fn test_non_pickable_rejected() {
        let filter = RayFilter::new(["player"]);
        assert!(!filter.accepts(&SurfaceInfo { name: "wall", pickable: false }));
        assert!(filter.accepts(&SurfaceInfo { name: "wall", pickable: true }));
    }

    #[test]
    fn test_nearest_denied_falls_through() {
        let scene = wall_scene();
        let hit = cast_filtered(&scene, &RayFilter::default(), Vec3::ZERO, Vec3::Z, 18.0)
            .expect("wall behind the capsule should be hit");
        assert!((hit.point.z - 5.0).abs() < 1e-4);

        // Without the denylist the capsule wins
        let hit = cast_filtered(&scene, &RayFilter::new(Vec::<String>::new()), Vec3::ZERO, Vec3::Z, 18.0)
            .unwrap();
        assert!((hit.point.z - 1.5).abs() < 1e-4);
    }

    #[test]
    fn test_only_denied_surfaces_is_a_miss() {
        let mut scene = Scene::new();
        scene.add("player_body", Shape::plane(Vec3::new(0.0, 0.0, 3.0), Vec3::NEG_Z));
        assert!(cast_filtered(&scene, &RayFilter::default(), Vec3::ZERO, Vec3::Z, 18.0).is_none());
    }

    #[test]
    fn test_max_distance_bounds_ray() {
        let scene = wall_scene();
        assert!(cast_filtered(&scene, &RayFilter::default(), Vec3::ZERO, Vec3::Z, 4.0).is_none());
        assert!(cast_filtered(&scene, &RayFilter::default(), Vec3::ZERO, Vec3::Z, 0.0).is_none());
    }

    #[test]
    fn test_normal_faces_origin() {
        let mut scene = Scene::new();
        // Normal declared pointing away from the emitter
        scene.add("wall", Shape::plane(Vec3::new(0.0, 0.0, 5.0), Vec3::Z));
        let hit = cast_filtered(&scene, &RayFilter::default(), Vec3::ZERO, Vec3::Z, 18.0).unwrap();
        assert!(hit.normal.dot(Vec3::Z) < 0.0);
    }
}
