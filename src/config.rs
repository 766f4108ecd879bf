use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::session::karaoke::KaraokeTiming;
use crate::session::quiz::QuizSettings;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_voice")]
    pub voice: String,
    #[serde(default = "default_speech_rate")]
    pub speech_rate: f32,
    #[serde(default = "default_audio_enabled")]
    pub audio_enabled: bool,
    #[serde(default = "default_distractor_count")]
    pub distractor_count: usize,
    #[serde(default = "default_quiz_length")]
    pub quiz_length: usize,
    #[serde(default = "default_karaoke_lead_in_ms")]
    pub karaoke_lead_in_ms: u64,
    #[serde(default = "default_karaoke_step_ms")]
    pub karaoke_step_ms: u64,
    #[serde(default = "default_karaoke_dwell_ms")]
    pub karaoke_dwell_ms: u64,
}

fn default_theme() -> String {
    "catppuccin-mocha".to_string()
}
fn default_voice() -> String {
    // zh-TW voice on macOS; other platforms fall back to the engine default
    "Mei-Jia".to_string()
}
fn default_speech_rate() -> f32 {
    0.9
}
fn default_audio_enabled() -> bool {
    true
}
fn default_distractor_count() -> usize {
    3
}
fn default_quiz_length() -> usize {
    10
}
fn default_karaoke_lead_in_ms() -> u64 {
    400
}
fn default_karaoke_step_ms() -> u64 {
    1200
}
fn default_karaoke_dwell_ms() -> u64 {
    5500
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            voice: default_voice(),
            speech_rate: default_speech_rate(),
            audio_enabled: default_audio_enabled(),
            distractor_count: default_distractor_count(),
            quiz_length: default_quiz_length(),
            karaoke_lead_in_ms: default_karaoke_lead_in_ms(),
            karaoke_step_ms: default_karaoke_step_ms(),
            karaoke_dwell_ms: default_karaoke_dwell_ms(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Written back on exit so settings, CLI overrides included, stick.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wordling")
            .join("config.toml")
    }

    /// Clamp hand-edited values into ranges the session can live with.
    /// Call after deserialization.
    pub fn validate(&mut self) {
        self.speech_rate = self.speech_rate.clamp(0.5, 2.0);
        self.distractor_count = self.distractor_count.clamp(1, 7);
        self.quiz_length = self.quiz_length.clamp(1, 50);
        self.karaoke_step_ms = self.karaoke_step_ms.clamp(200, 5000);
        // The dwell must at least cover the lead-in plus the first step,
        // otherwise no character would ever be highlighted.
        let min_dwell = self.karaoke_lead_in_ms + self.karaoke_step_ms;
        self.karaoke_dwell_ms = self.karaoke_dwell_ms.max(min_dwell);
    }

    pub fn quiz_settings(&self) -> QuizSettings {
        QuizSettings {
            distractor_count: self.distractor_count,
            quiz_length: self.quiz_length,
        }
    }

    pub fn karaoke_timing(&self) -> KaraokeTiming {
        KaraokeTiming {
            lead_in_ms: self.karaoke_lead_in_ms,
            step_ms: self.karaoke_step_ms,
            dwell_ms: self.karaoke_dwell_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.theme, "catppuccin-mocha");
        assert_eq!(config.distractor_count, 3);
        assert_eq!(config.quiz_length, 10);
        assert_eq!(config.karaoke_dwell_ms, 5500);
        assert!(config.audio_enabled);
    }

    #[test]
    fn test_config_serde_defaults_from_partial() {
        let toml_str = r#"
theme = "sunny-day"
quiz_length = 5
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.theme, "sunny-day");
        assert_eq!(config.quiz_length, 5);
        // Untouched fields keep their defaults
        assert_eq!(config.voice, "Mei-Jia");
        assert_eq!(config.karaoke_step_ms, 1200);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(config.theme, deserialized.theme);
        assert_eq!(config.quiz_length, deserialized.quiz_length);
        assert_eq!(config.karaoke_dwell_ms, deserialized.karaoke_dwell_ms);
    }

    #[test]
    fn test_save_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        // Parent directories are created on demand
        let path = dir.path().join("wordling").join("config.toml");

        let mut config = Config::default();
        config.theme = "sunny-day".to_string();
        config.quiz_length = 7;
        config.audio_enabled = false;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.theme, "sunny-day");
        assert_eq!(loaded.quiz_length, 7);
        assert!(!loaded.audio_enabled);
    }

    #[test]
    fn test_load_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.theme, default_theme());
    }

    #[test]
    fn test_validate_clamps_values() {
        let mut config = Config::default();
        config.distractor_count = 0;
        config.quiz_length = 999;
        config.speech_rate = 9.0;
        config.validate();
        assert_eq!(config.distractor_count, 1);
        assert_eq!(config.quiz_length, 50);
        assert!((config.speech_rate - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_validate_keeps_dwell_past_first_step() {
        let mut config = Config::default();
        config.karaoke_lead_in_ms = 400;
        config.karaoke_step_ms = 1000;
        config.karaoke_dwell_ms = 100;
        config.validate();
        assert_eq!(config.karaoke_dwell_ms, 1400);
    }
}
