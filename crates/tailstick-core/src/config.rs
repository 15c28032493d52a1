use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::animator::ScrollBehavior;
use crate::easing::EasingType;
use crate::view::Mode;

/// Lower bound for the corrector interval: one display frame.
pub const MIN_CHECK_INTERVAL_MS: u64 = 17;

/// Engine tuning knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StickyConfig {
    /// Which boundary counts as "the end".
    #[serde(default)]
    pub mode: Mode,
    /// Corrector interval in milliseconds (clamped to >= 17 at use).
    #[serde(default = "default_check_interval")]
    pub check_interval_ms: u64,
    /// Scroll-notification debounce in milliseconds (~one frame).
    #[serde(default = "default_debounce")]
    pub debounce_ms: u64,
    /// How long "sticky but not at end" must persist before the corrector
    /// acts. Two frames by default, filtering hosts that settle the scroll
    /// offset one notification late. A heuristic, not a correctness bound.
    #[serde(default = "default_decision_delay")]
    pub decision_delay_ms: u64,
    /// Applied once, at the first attach.
    #[serde(default)]
    pub initial_scroll_behavior: ScrollBehavior,
    /// Emit decision-level tracing events.
    #[serde(default)]
    pub debug: bool,
    /// Animation tuning.
    #[serde(default)]
    pub animation: AnimationConfig,
}

impl Default for StickyConfig {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            check_interval_ms: default_check_interval(),
            debounce_ms: default_debounce(),
            decision_delay_ms: default_decision_delay(),
            initial_scroll_behavior: ScrollBehavior::default(),
            debug: false,
            animation: AnimationConfig::default(),
        }
    }
}

/// Smooth-scroll animation tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Animation duration in milliseconds.
    #[serde(default = "default_animation_duration")]
    pub duration_ms: u64,
    /// Easing function
    #[serde(default)]
    pub easing: EasingType,
    /// Suggested host tick rate while animating.
    #[serde(default = "default_animation_fps")]
    pub fps: u16,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_animation_duration(),
            easing: EasingType::default(),
            fps: default_animation_fps(),
        }
    }
}

fn default_check_interval() -> u64 {
    100
}

fn default_debounce() -> u64 {
    17 // 1 frame
}

fn default_decision_delay() -> u64 {
    34 // 2 frames
}

fn default_animation_duration() -> u64 {
    150
}

fn default_animation_fps() -> u16 {
    60
}

impl StickyConfig {
    /// Corrector interval, clamped to at least one frame.
    pub fn check_interval(&self) -> Duration {
        Duration::from_millis(self.check_interval_ms.max(MIN_CHECK_INTERVAL_MS))
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn decision_delay(&self) -> Duration {
        Duration::from_millis(self.decision_delay_ms)
    }

    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/tailstick/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("tailstick")
            .join("config.toml")
    }
}

impl AnimationConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    /// Tick duration matching the suggested frame rate.
    pub fn tick_duration(&self) -> Duration {
        if self.fps == 0 {
            Duration::from_millis(16) // ~60fps fallback
        } else {
            Duration::from_millis(1000 / self.fps as u64)
        }
    }
}
