use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::model::Difficulty;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    #[serde(default = "default_version")]
    version: u32,

    /// Last selected tier; the next session starts here.
    #[serde(default)]
    pub difficulty: Difficulty,

    #[serde(default = "default_true")]
    pub audio_enabled: bool,

    #[serde(default = "default_volume")]
    pub volume: f32,

    #[serde(default = "default_true")]
    pub animations_enabled: bool,
}

fn default_version() -> u32 {
    1
}
fn default_true() -> bool {
    true
}
fn default_volume() -> f32 {
    0.5
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            version: 1,
            difficulty: Difficulty::default(),
            audio_enabled: true,
            volume: 0.5,
            animations_enabled: true,
        }
    }
}

impl Settings {
    pub fn load() -> Self {
        Self::load_from(Self::default_path())
    }

    pub fn load_from(path: PathBuf) -> Self {
        if let Ok(contents) = fs::read_to_string(&path) {
            if let Ok(mut settings) = serde_json::from_str::<Settings>(&contents) {
                settings.migrate();
                return settings;
            }
        }
        Settings::default()
    }

    pub fn save(&self) -> Result<(), std::io::Error> {
        self.save_to(Self::default_path())
    }

    pub fn save_to(&self, path: PathBuf) -> Result<(), std::io::Error> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let contents = serde_json::to_string(self)?;
        fs::write(path, contents)
    }

    pub fn default_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("secret-number")
            .join("settings.json")
    }

    fn migrate(&mut self) {
        match self.version {
            0 => {
                self.version = 1;
            }
            _ => (),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_path() -> PathBuf {
        std::env::temp_dir()
            .join("secret-number-tests")
            .join(Uuid::new_v4().to_string())
            .join("settings.json")
    }

    #[test]
    fn test_round_trip() {
        let path = temp_path();
        let settings = Settings {
            difficulty: Difficulty::Hard,
            volume: 0.25,
            audio_enabled: false,
            ..Settings::default()
        };
        settings.save_to(path.clone()).unwrap();

        let loaded = Settings::load_from(path);
        assert_eq!(loaded.difficulty, Difficulty::Hard);
        assert_eq!(loaded.volume, 0.25);
        assert!(!loaded.audio_enabled);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let loaded = Settings::load_from(temp_path());
        assert_eq!(loaded.difficulty, Difficulty::Easy);
        assert!(loaded.audio_enabled);
    }

    #[test]
    fn test_corrupt_file_gives_defaults() {
        let path = temp_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "volume = loud").unwrap();
        let loaded = Settings::load_from(path);
        assert_eq!(loaded.volume, 0.5);
    }
}
