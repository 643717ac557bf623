//! Viewer configuration
//!
//! Plain data read by reference during a frame and mutated between frames
//! by the owning application.

use crate::error::{Error, Result};

/// Highest LOD tier a face set can be tagged with
pub const LOD_MAX: u8 = 2;

/// LOD selection mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LodMode {
    /// Pick the tier from camera distance
    Automatic,
    /// Always draw the base tier
    ForceFullRes,
    /// Always draw tier 1
    ForceLod1,
    /// Always draw tier 2
    ForceLod2,
}

impl LodMode {
    /// Tier forced by this mode, or `None` for `Automatic`
    pub fn forced_lod(&self) -> Option<u8> {
        match self {
            LodMode::Automatic => None,
            LodMode::ForceFullRes => Some(0),
            LodMode::ForceLod1 => Some(1),
            LodMode::ForceLod2 => Some(2),
        }
    }
}

/// LOD distance thresholds and override
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LodSettings {
    /// Selection mode
    pub mode: LodMode,
    /// Distance from which tier 1 is used
    pub lod1_distance: f32,
    /// Distance from which tier 2 is used
    pub lod2_distance: f32,
}

impl Default for LodSettings {
    fn default() -> Self {
        Self {
            mode: LodMode::Automatic,
            lod1_distance: 200.0,
            lod2_distance: 400.0,
        }
    }
}

impl LodSettings {
    /// LOD tier for an object at `distance` from the camera.
    ///
    /// Non-decreasing in `distance`; a forced mode ignores distance entirely.
    pub fn lod_for_distance(&self, distance: f32) -> u8 {
        if let Some(lod) = self.mode.forced_lod() {
            return lod;
        }
        if distance >= self.lod2_distance {
            2
        } else if distance >= self.lod1_distance {
            1
        } else {
            0
        }
    }
}

/// Viewer configuration
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// LOD thresholds and forced override
    pub lod: LodSettings,
    /// When false, every visible instance is drawn regardless of the frustum
    pub enable_frustum_culling: bool,
    /// When false, texture slots keep the per-pass default textures
    pub enable_textures: bool,
    /// Lit shading (false = fullbright)
    pub enable_lighting: bool,
    /// Base polygon mode for geometry passes
    pub wireframe: bool,
    /// Face-set cull flags are honoured only when true
    pub backface_culling: bool,
    /// Selection overlay draws a vertex-coloured fill
    pub highlight_selected_piece: bool,
    /// Selection overlay draws a wireframe
    pub wireframe_selected_piece: bool,
    /// Pass errors propagate out of `run_frame` instead of being labelled on screen
    pub strict_errors: bool,
    /// Draw the FPS label after the passes
    pub show_fps: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            lod: LodSettings::default(),
            enable_frustum_culling: false,
            enable_textures: true,
            enable_lighting: true,
            wireframe: false,
            backface_culling: false,
            highlight_selected_piece: true,
            wireframe_selected_piece: false,
            strict_errors: false,
            show_fps: true,
        }
    }
}

impl ViewerConfig {
    /// Check the LOD thresholds are usable.
    pub fn validate(&self) -> Result<()> {
        let LodSettings { lod1_distance, lod2_distance, .. } = self.lod;
        if !lod1_distance.is_finite() || !lod2_distance.is_finite() {
            return Err(Error::InvalidResource(
                "LOD distances must be finite".to_string()
            ));
        }
        if lod1_distance < 0.0 || lod2_distance < 0.0 {
            return Err(Error::InvalidResource(
                "LOD distances must not be negative".to_string()
            ));
        }
        if lod2_distance < lod1_distance {
            return Err(Error::InvalidResource(format!(
                "lod2_distance ({}) is closer than lod1_distance ({})",
                lod2_distance, lod1_distance
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
