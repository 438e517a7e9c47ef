//! CPU reference scene
//!
//! A flat list of named analytic surfaces answering [`SceneQuery`]. The web
//! host mirrors its collision geometry here; the native demo and the tests
//! build rooms out of it directly.

pub mod shapes;

pub use shapes::Shape;

use crate::projector::{Ray, RayHit, SceneQuery, SurfaceInfo};

/// A named surface that rays can hit
#[derive(Debug, Clone)]
pub struct Surface {
    pub name: String,
    pub pickable: bool,
    pub shape: Shape,
}

/// Collection of surfaces, iterated in insertion order
#[derive(Debug, Clone, Default)]
pub struct Scene {
    surfaces: Vec<Surface>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pickable surface, returning its index
    pub fn add(&mut self, name: impl Into<String>, shape: Shape) -> usize {
        self.surfaces.push(Surface {
            name: name.into(),
            pickable: true,
            shape,
        });
        self.surfaces.len() - 1
    }

    /// Toggle pickability of every surface with this exact name
    pub fn set_pickable(&mut self, name: &str, pickable: bool) -> usize {
        let mut changed = 0;
        for surface in self.surfaces.iter_mut().filter(|s| s.name == name) {
            surface.pickable = pickable;
            changed += 1;
        }
        changed
    }

    /// Remove every surface with this exact name
    pub fn remove(&mut self, name: &str) -> usize {
        let before = self.surfaces.len();
        self.surfaces.retain(|s| s.name != name);
        before - self.surfaces.len()
    }

    pub fn clear(&mut self) {
        self.surfaces.clear();
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }
}

impl SceneQuery for Scene {
    fn pick(&self, ray: &Ray, accept: &dyn Fn(&SurfaceInfo<'_>) -> bool) -> Option<RayHit> {
        let mut best: Option<RayHit> = None;

        for surface in &self.surfaces {
            let info = SurfaceInfo {
                name: &surface.name,
                pickable: surface.pickable,
            };
            if !accept(&info) {
                continue;
            }
            let Some((t, normal)) = surface.shape.intersect(ray) else {
                continue;
            };
            if t > ray.length {
                continue;
            }
            if best.is_none_or(|b| t < b.distance) {
                best = Some(RayHit {
                    point: ray.at(t),
                    normal,
                    distance: t,
                });
            }
        }

        best
    }
}
