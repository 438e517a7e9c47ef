//! Projector tuning
//!
//! Persisted in LocalStorage on web. Everything here is read when the
//! projector is built; only capacity is frozen at init.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    /// Name used by the host's settings menu and in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "low",
            QualityPreset::Medium => "medium",
            QualityPreset::High => "high",
        }
    }

    /// Parse a menu name; `"battery"` and `"ultra"` are the in-game labels
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" | "battery" => Some(QualityPreset::Low),
            "medium" | "med" | "default" => Some(QualityPreset::Medium),
            "high" | "ultra" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Dots kept alive in the ring
    pub fn capacity(&self) -> usize {
        match self {
            QualityPreset::Low => 1500,
            QualityPreset::Medium => DOT_CAPACITY,
            QualityPreset::High => 8000,
        }
    }

    /// Rays cast per tick
    pub fn rays_per_tick(&self) -> u32 {
        match self {
            QualityPreset::Low => 80,
            QualityPreset::Medium => RAYS_PER_TICK,
            QualityPreset::High => 320,
        }
    }
}

/// Projector tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectorSettings {
    pub quality: QualityPreset,

    // === Beam shape ===
    /// Primary cone half-angle (degrees)
    pub cone_angle_deg: f32,
    /// Extra sub-beams sharing the primary axis
    pub split_count: u32,
    /// Sub-beam half-angle (degrees)
    pub split_spread_deg: f32,
    /// Ray length (meters)
    pub max_distance: f32,

    // === Dots ===
    /// RGBA
    pub color: [f32; 4],
    /// Ring buffer slots, fixed at init
    pub capacity: usize,
    /// Quad edge length (meters)
    pub dot_size: f32,
    /// Lift off the hit surface (meters)
    pub normal_offset: f32,

    // === Timing ===
    pub rays_per_tick: u32,
    pub tick_interval_ms: f64,

    /// Name fragments that never catch dots
    pub denylist: Vec<String>,
}

impl Default for ProjectorSettings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            cone_angle_deg: CONE_HALF_ANGLE_DEG,
            split_count: SPLIT_COUNT,
            split_spread_deg: SPLIT_SPREAD_DEG,
            max_distance: MAX_DISTANCE,

            color: DOT_COLOR,
            capacity: DOT_CAPACITY,
            dot_size: DOT_SIZE,
            normal_offset: NORMAL_OFFSET,

            rays_per_tick: RAYS_PER_TICK,
            tick_interval_ms: TICK_INTERVAL_MS,

            denylist: RAY_DENYLIST.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ProjectorSettings {
    /// Create settings from a quality preset (applies preset defaults)
    pub fn from_preset(preset: QualityPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a quality preset (updates quality-dependent settings)
    pub fn apply_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;
        self.capacity = preset.capacity();
        self.rays_per_tick = preset.rays_per_tick();
    }

    /// Clamp every value into its valid range
    ///
    /// Bad values are replaced by defaults rather than rejected.
    pub fn sanitized(mut self) -> Self {
        self.cone_angle_deg = angle_or(self.cone_angle_deg, CONE_HALF_ANGLE_DEG);
        self.split_spread_deg = angle_or(self.split_spread_deg, SPLIT_SPREAD_DEG);
        self.max_distance = positive_or(self.max_distance, MAX_DISTANCE);
        self.dot_size = positive_or(self.dot_size, DOT_SIZE);
        if !self.normal_offset.is_finite() || self.normal_offset < 0.0 {
            self.normal_offset = NORMAL_OFFSET;
        }
        for (channel, default) in self.color.iter_mut().zip(DOT_COLOR) {
            *channel = if channel.is_finite() {
                channel.clamp(0.0, 1.0)
            } else {
                default
            };
        }
        self.capacity = self.capacity.max(1);
        self.split_count = self.split_count.min(self.rays_per_tick);
        if !self.tick_interval_ms.is_finite() || self.tick_interval_ms <= 0.0 {
            self.tick_interval_ms = TICK_INTERVAL_MS;
        }
        self
    }

    /// Parse from JSON; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "dots_projector_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded projector settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Stored projector settings unreadable: {}", e),
                }
            }
        }

        log::info!("Using default projector settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = self.to_json() {
                if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                    log::warn!("Failed to save projector settings");
                } else {
                    log::info!("Projector settings saved");
                }
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

fn angle_or(value: f32, default: f32) -> f32 {
    if value.is_finite() {
        value.clamp(0.0, 180.0)
    } else {
        default
    }
}

fn positive_or(value: f32, default: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        default
    }
}
