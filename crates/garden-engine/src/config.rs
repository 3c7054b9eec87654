//! Engine configuration.
//!
//! Provides run parameters for the headless runner plus the nested garden rules.
//! Configuration can be loaded from and saved to a TOML file.

use garden_gameplay::GardenConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Configuration file name.
pub const CONFIG_FILE: &str = "garden.toml";

/// Highest supported host frame rate. Every frame must cover at least one tick.
const MAX_TICK_RATE: u32 = 60;

/// Engine configuration parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === Run Settings ===
    /// Random seed (None = seeded from the clock)
    pub seed: Option<u64>,
    /// Tick budget for one run
    pub ticks: u64,
    /// Host frames per second fed to the fixed-timestep driver
    pub tick_rate: u32,

    // === Files ===
    /// JSON input script (None = built-in demo)
    pub script_path: Option<PathBuf>,
    /// Where to write the final snapshot (None = don't write)
    pub snapshot_path: Option<PathBuf>,

    // === Garden ===
    /// Garden rules
    pub garden: GardenConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            ticks: 600,
            tick_rate: 60,
            script_path: None,
            snapshot_path: None,
            garden: GardenConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from the default file in the working directory.
    pub fn load() -> Self {
        Self::load_from(CONFIG_FILE)
    }

    /// Load configuration from a specific path.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file not found, using defaults");
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    info!("Loaded config from {}", path.display());
                    config
                },
                Err(e) => {
                    warn!("Failed to parse config file: {e}");
                    Self::default()
                },
            },
            Err(e) => {
                warn!("Failed to read config file: {e}");
                Self::default()
            },
        }
    }

    /// Save configuration to a specific path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let path = path.as_ref();

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let mut file = fs::File::create(path)?;
        file.write_all(contents.as_bytes())?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Clamp run parameters to supported ranges.
    ///
    /// Garden rules are not touched here; they are checked when the simulation is built.
    pub fn validate(&mut self) {
        self.tick_rate = self.tick_rate.clamp(1, MAX_TICK_RATE);
        self.ticks = self.ticks.max(1);
    }

    /// Real seconds covered by one host frame.
    #[must_use]
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.tick_rate.clamp(1, MAX_TICK_RATE) as f32
    }

    /// The configured seed, or one derived from the clock.
    #[must_use]
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map_or(0, |d| d.as_nanos() as u64)
        })
    }
}
