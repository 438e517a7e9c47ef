//! Laser-dot projector
//!
//! Casts rays from an emitter inside a cone and keeps every surface hit as a
//! camera-facing dot in a fixed-size ring of instance transforms:
//! - Sampling is solid-angle uniform and driven by a seeded RNG
//! - Ticks run on a fixed wall-clock interval, never re-entrantly
//! - The ring is never resized after init

pub mod billboard;
pub mod cone;
pub mod controller;
pub mod emitter;
pub mod raycast;
pub mod ring;
pub mod schedule;

pub use billboard::{billboard_transform, look_rotation};
pub use cone::{cone_direction, sample_cone};
pub use controller::{ColorUpdate, DotsProjector, TickReport};
pub use emitter::{Emitter, StaticEmitter};
pub use raycast::{Ray, RayFilter, RayHit, SceneQuery, SurfaceInfo, cast_filtered};
pub use ring::DotRing;
pub use schedule::{IntervalScheduler, RayBudget};
