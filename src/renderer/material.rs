//! Dot material parameters

use crate::projector::ColorUpdate;

/// Additive unlit color for every dot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DotMaterial {
    pub color: [f32; 4],
    pub additive: bool,
}

impl DotMaterial {
    pub fn new(color: [f32; 4]) -> Self {
        Self { color, additive: true }
    }

    /// Apply present, finite channels; others are left alone
    ///
    /// Returns whether anything changed.
    pub fn apply(&mut self, update: &ColorUpdate) -> bool {
        let before = self.color;
        let channels = [update.r, update.g, update.b, update.alpha];
        for (slot, value) in self.color.iter_mut().zip(channels) {
            match value {
                Some(v) if v.is_finite() => *slot = v.clamp(0.0, 1.0),
                Some(v) => log::debug!("Ignoring non-finite dot color channel {}", v),
                None => {}
            }
        }
        self.color != before
    }
}
