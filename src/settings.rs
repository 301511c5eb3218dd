//! Presentation settings
//!
//! Read from an optional JSON block embedded in the page; nothing is stored.

use serde::{Deserialize, Serialize};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    /// Triangle fan segments for particle circles
    pub fn circle_segments(&self) -> u32 {
        match self {
            QualityPreset::Low => 8,
            QualityPreset::Medium => 16,
            QualityPreset::High => 32,
        }
    }

    /// Whether particles get a soft halo
    pub fn glow_enabled(&self) -> bool {
        match self {
            QualityPreset::Low => false,
            QualityPreset::Medium => true,
            QualityPreset::High => true,
        }
    }
}

/// Presentation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Reduced motion (no name-reveal bounce, no gift wobble)
    pub reduced_motion: bool,
    /// Fixed layout seed; wall-clock when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            reduced_motion: false,
            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings JSON, falling back to defaults on bad input
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring invalid settings: {}", e);
                Self::default()
            }
        }
    }

    /// Effective shake (respects reduced_motion)
    pub fn effective_shake(&self) -> bool {
        !self.reduced_motion
    }

    /// Effective gift wobble (respects reduced_motion)
    pub fn effective_wobble(&self) -> bool {
        !self.reduced_motion
    }

    /// Element id of the embedded settings block
    const ELEMENT_ID: &'static str = "story-settings";

    /// Load settings from the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let text = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        match text {
            Some(json) if !json.trim().is_empty() => {
                let settings = Self::from_json(&json);
                log::info!("Loaded settings (quality {})", settings.quality.as_str());
                settings
            }
            _ => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Native builds always use defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        log::debug!("No page to read #{} from, using defaults", Self::ELEMENT_ID);
        Self::default()
    }
}
