use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Fallback `tracing` filter when `RUST_LOG` is unset.
    pub log_level: String,
    /// Orientation spring tuning.
    pub smoothing: SmoothingConfig,
    /// Orientation-to-view mapping gains.
    pub view: ViewConfig,
    /// Voice focus behaviour.
    pub focus: FocusConfig,
    /// Speech recognition session handling.
    pub speech: SpeechConfig,
    /// How the scene is presented while immersive.
    pub presentation: PresentationConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "orrery=info,orrery_immersion=info".to_string(),
            smoothing: SmoothingConfig::default(),
            view: ViewConfig::default(),
            focus: FocusConfig::default(),
            speech: SpeechConfig::default(),
            presentation: PresentationConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    /// Spring stiffness. Higher = snappier head tracking.
    pub stiffness: f32,
    /// Absolute damping coefficient (unit mass). Above `2 * sqrt(stiffness)`
    /// the spring never overshoots.
    pub damping: f32,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            stiffness: 50.0,
            damping: 20.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Gain applied to pitch (beta) and roll (gamma) when tilting the scene.
    pub pitch_gain: f32,
    /// Gain applied to compass heading (alpha) when spinning the scene.
    pub yaw_gain: f32,
    /// Beta reading (degrees) of a device held upright; maps to zero X rotation.
    pub neutral_beta: f32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            pitch_gain: 0.8,
            yaw_gain: 0.2,
            neutral_beta: 90.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FocusConfig {
    /// Seconds a spoken focus target stays selected.
    pub dwell_secs: f32,
    /// Scale hint handed to the renderer for the focused body.
    pub focused_scale: f32,
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            dwell_secs: 5.0,
            focused_scale: 2.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Whether voice focusing is attempted at all.
    pub enabled: bool,
    /// BCP-47 language tag handed to the recognition engine.
    pub language: String,
    /// Consecutive session restarts allowed without a transcript in between.
    pub max_restarts: u32,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            language: "pt-BR".to_string(),
            max_restarts: 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationConfig {
    /// Uniform scene scale while immersive (the scene is shrunk and centered).
    pub immersive_scene_scale: f32,
    /// Request fullscreen on entry.
    pub fullscreen: bool,
    /// Request a landscape orientation lock on entry.
    pub lock_landscape: bool,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            immersive_scene_scale: 0.5,
            fullscreen: true,
            lock_landscape: true,
        }
    }
}
