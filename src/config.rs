// src/config.rs

use crate::physics::operations::crystal::DEFAULT_TOLERANCE;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

fn default_tolerance() -> f64 {
  DEFAULT_TOLERANCE
}

fn default_log_level() -> String {
  "info".to_string()
}

fn default_summary_atoms() -> usize {
  20
}

/// User defaults for the command-line tool. Values given in a recipe always win.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
  #[serde(default = "default_tolerance")]
  pub tolerance: f64,

  #[serde(default)]
  pub pbc: [bool; 3],

  #[serde(default = "default_log_level")]
  pub log_level: String,

  /// How many atoms the summary report lists before truncating.
  #[serde(default = "default_summary_atoms")]
  pub summary_atoms: usize,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      tolerance: DEFAULT_TOLERANCE,
      pbc: [false, false, false],
      log_level: default_log_level(),
      summary_atoms: default_summary_atoms(),
    }
  }
}

impl Config {
  /// Loads config from standard OS location (e.g., ~/.config/crysgen/settings.json).
  /// Falls back to defaults if the file is missing or unreadable.
  pub fn load() -> Self {
    Self::load_from(&Self::get_path())
  }

  pub fn load_from(path: &Path) -> Self {
    if !path.exists() {
      log::debug!("No config found at {:?}. Using defaults.", path);
      return Self::default();
    }
    match File::open(path) {
      Ok(file) => match serde_json::from_reader(BufReader::new(file)) {
        Ok(cfg) => {
          log::debug!("Config loaded from {:?}", path);
          cfg
        }
        Err(e) => {
          log::warn!("Error parsing config {:?}: {}", path, e);
          Self::default()
        }
      },
      Err(e) => {
        log::warn!("Error opening config {:?}: {}", path, e);
        Self::default()
      }
    }
  }

  /// Saves config to standard OS location and returns the path written.
  pub fn save(&self) -> io::Result<PathBuf> {
    let path = Self::get_path();
    self.save_to(&path)?;
    Ok(path)
  }

  pub fn save_to(&self, path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent)?;
    }
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, self)?;
    Ok(())
  }

  pub fn get_path() -> PathBuf {
    if let Some(proj) = ProjectDirs::from("org", "mavensgroup", "crysgen") {
      proj.config_dir().join("settings.json")
    } else {
      PathBuf::from("settings.json")
    }
  }
}
