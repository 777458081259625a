//! User configuration — animation profile, thresholds, offsets and input.
//!
//! Settings are read from a TOML file at
//! `$XDG_CONFIG_HOME/scroll-label/config.toml` (default
//! `~/.config/scroll-label/config.toml`), or from `--config`.  Missing keys
//! take their defaults.  Everything is validated here, once, before an
//! animator is built: a bad threshold order is a startup error, never a
//! runtime surprise.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::core::animator::{AnimatorSettings, LabelMode};
use crate::core::geometry::WindowMode;
use crate::core::mapping::{ensure_finite, HoldProfile, OffsetProfile, ProfileError};
use crate::core::selection::ProgressClamp;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config '{path}'")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config '{path}'")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error("content_margin must be a finite, non-negative number, got {0}")]
    ContentMargin(f64),

    #[error("frame_ms must be between 1 and 1000, got {0}")]
    FrameMs(u64),

    #[error("scroll_step must be at least 1")]
    ScrollStep,
}

// ───────────────────────────────────────── choices ───────────

/// Offset mapping profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ProfileKind {
    Linear,
    #[default]
    Hold,
}

/// Where a section counts as current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum WindowKind {
    /// Whole section, heading to separator.
    #[default]
    Bounds,
    /// First to last line of body text, padded by `content_margin`.
    Content,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum LabelsKind {
    #[default]
    Single,
    Dual,
}

// ───────────────────────────────────────── config ────────────

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub profile: ProfileKind,
    pub entry_start: f64,
    pub hold_start: f64,
    pub hold_end: f64,
    pub exit_end: f64,
    /// Label offset before entry, as a fraction of viewport height.
    pub start_offset_vh: f64,
    /// Label offset after exit, as a fraction of viewport height.
    pub end_offset_vh: f64,
    pub progress_clamp_min: f64,
    pub progress_clamp_max: f64,
    pub active_window: WindowKind,
    /// Padding around the content span, as a fraction of section height.
    pub content_margin: f64,
    pub label_mode: LabelsKind,
    /// Frame interval; scroll bursts within one frame coalesce.
    pub frame_ms: u64,
    /// Rows per wheel notch / arrow key.
    pub scroll_step: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            profile: ProfileKind::Hold,
            entry_start: 0.1,
            hold_start: 0.3,
            hold_end: 0.7,
            exit_end: 0.9,
            start_offset_vh: 0.35,
            end_offset_vh: -0.35,
            progress_clamp_min: -0.25,
            progress_clamp_max: 1.25,
            active_window: WindowKind::Bounds,
            content_margin: 0.0,
            label_mode: LabelsKind::Single,
            frame_ms: 16,
            scroll_step: 3,
        }
    }
}

impl AppConfig {
    pub fn parse(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Load from `explicit` if given, otherwise from the default path if it
    /// exists, otherwise defaults.  The result is validated.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let path = config_path();
                if !path.exists() {
                    debug!("no config at {}, using defaults", path.display());
                    return Ok(Self::default());
                }
                path
            }
        };

        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config = Self::parse(&contents).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;
        config.validate()?;
        debug!("loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.animator_settings()?;
        if !(1..=1000).contains(&self.frame_ms) {
            return Err(ConfigError::FrameMs(self.frame_ms));
        }
        if self.scroll_step == 0 {
            return Err(ConfigError::ScrollStep);
        }
        Ok(())
    }

    /// Build validated animator settings.  Hold thresholds are only checked
    /// when the hold profile is selected.
    pub fn animator_settings(&self) -> Result<AnimatorSettings, ConfigError> {
        let profile = match self.profile {
            ProfileKind::Linear => OffsetProfile::Linear,
            ProfileKind::Hold => OffsetProfile::Hold(HoldProfile::new(
                self.entry_start,
                self.hold_start,
                self.hold_end,
                self.exit_end,
            )?),
        };

        let window = match self.active_window {
            WindowKind::Bounds => WindowMode::Bounds,
            WindowKind::Content => {
                if !(self.content_margin.is_finite() && self.content_margin >= 0.0) {
                    return Err(ConfigError::ContentMargin(self.content_margin));
                }
                WindowMode::Content {
                    margin: self.content_margin,
                }
            }
        };

        Ok(AnimatorSettings {
            profile,
            start_offset_vh: ensure_finite("start_offset_vh", self.start_offset_vh)?,
            end_offset_vh: ensure_finite("end_offset_vh", self.end_offset_vh)?,
            clamp: ProgressClamp::new(self.progress_clamp_min, self.progress_clamp_max)?,
            window,
            labels: match self.label_mode {
                LabelsKind::Single => LabelMode::Single,
                LabelsKind::Dual => LabelMode::Dual,
            },
        })
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/scroll-label/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("scroll-label").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        config.validate().unwrap();
        let settings = config.animator_settings().unwrap();
        assert_eq!(settings, AnimatorSettings::default());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = AppConfig::parse(
            r#"
            profile = "linear"
            start_offset_vh = 0.5
            active_window = "content"
            content_margin = 0.1
            "#,
        )
        .unwrap();
        assert_eq!(config.profile, ProfileKind::Linear);
        assert_eq!(config.start_offset_vh, 0.5);
        assert_eq!(config.end_offset_vh, -0.35);
        assert_eq!(config.frame_ms, 16);

        let settings = config.animator_settings().unwrap();
        assert_eq!(settings.profile, OffsetProfile::Linear);
        assert_eq!(settings.window, WindowMode::Content { margin: 0.1 });
    }

    #[test]
    fn unknown_keys_and_values_are_rejected() {
        assert!(AppConfig::parse("hold_star = 0.3").is_err());
        assert!(AppConfig::parse("profile = \"bouncy\"").is_err());
        assert!(AppConfig::parse("label_mode = \"triple\"").is_err());
    }

    #[test]
    fn bad_hold_order_is_a_config_error() {
        let config = AppConfig {
            hold_start: 0.8,
            ..AppConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Profile(ProfileError::HoldOrdering { .. }))
        ));
    }

    #[test]
    fn linear_profile_ignores_hold_thresholds() {
        let config = AppConfig {
            profile: ProfileKind::Linear,
            hold_start: 0.8,
            ..AppConfig::default()
        };
        config.validate().unwrap();
    }

    #[test]
    fn reversed_clamp_is_rejected() {
        let config = AppConfig {
            progress_clamp_min: 1.25,
            progress_clamp_max: -0.25,
            ..AppConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Profile(ProfileError::ClampRange { .. }))
        ));
    }

    #[test]
    fn negative_margin_and_zero_step_are_rejected() {
        let config = AppConfig {
            active_window: WindowKind::Content,
            content_margin: -0.1,
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ContentMargin(_))));

        let config = AppConfig {
            scroll_step: 0,
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ScrollStep)));

        let config = AppConfig {
            frame_ms: 0,
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::FrameMs(0))));
    }

    #[test]
    fn dual_mode_maps_to_animator() {
        let config = AppConfig::parse("label_mode = \"dual\"").unwrap();
        assert_eq!(config.animator_settings().unwrap().labels, LabelMode::Dual);
    }

    #[test]
    fn load_reads_explicit_file() {
        let path = std::env::temp_dir().join(format!(
            "scroll-label-config-test-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "frame_ms = 33\nscroll_step = 5\n").unwrap();
        let config = AppConfig::load(Some(&path));
        let _ = std::fs::remove_file(&path);

        let config = config.unwrap();
        assert_eq!(config.frame_interval(), Duration::from_millis(33));
        assert_eq!(config.scroll_step, 5);
    }

    #[test]
    fn load_reports_missing_explicit_file() {
        let err = AppConfig::load(Some(Path::new("/no/such/scroll-label.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
