//! Persisted user settings under ~/.goban/.

use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::score::ScoringMethod;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub komi: f64,
    pub scoring_method: ScoringMethod,
    pub show_coords: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            komi: 7.5,
            scoring_method: ScoringMethod::Chinese,
            show_coords: false,
        }
    }
}

/// ~/.goban/, created on first use.
pub fn config_dir() -> io::Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "could not determine home directory",
        )
    })?;
    let dir = home.join(".goban");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

fn settings_path() -> io::Result<PathBuf> {
    Ok(config_dir()?.join("settings.json"))
}

/// Load settings, falling back to defaults when the file is missing or
/// unreadable.
pub fn load() -> Settings {
    let path = match settings_path() {
        Ok(p) => p,
        Err(_) => return Settings::default(),
    };
    match fs::read_to_string(&path) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_default(),
        Err(_) => Settings::default(),
    }
}

/// Save settings as pretty-printed JSON.
pub fn save(settings: &Settings) -> io::Result<()> {
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(settings_path()?, json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.komi, 7.5);
        assert_eq!(settings.scoring_method, ScoringMethod::Chinese);
        assert!(!settings.show_coords);
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            komi: 6.5,
            scoring_method: ScoringMethod::Japanese,
            show_coords: true,
        };
        let json = serde_json::to_string(&settings).expect("serialize");
        assert!(json.contains("\"japanese\""));
        let back: Settings = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, settings);
    }

    #[test]
    fn test_invalid_json_falls_back_to_default() {
        let parsed: Settings = serde_json::from_str("not json").unwrap_or_default();
        assert_eq!(parsed, Settings::default());
    }

    #[test]
    fn test_config_dir_is_under_home() {
        let dir = config_dir().expect("config dir");
        assert!(dir.ends_with(".goban"));
        assert!(dir.exists());
    }
}
