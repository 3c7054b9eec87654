//! Scripted input for headless runs.
//!
//! A script is a list of steps loaded from JSON (or the built-in demo). Steps
//! are expressed in simulation ticks, so a script plays out the same way at any
//! host frame rate.

use garden_common::{GardenError, GardenResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// A single scripted step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptStep {
    /// Stand still
    Wait {
        /// Ticks to wait
        ticks: u64,
    },

    /// Hold a movement direction
    Move {
        /// X direction (-1 = left, 1 = right, 0 = none)
        dx: f32,
        /// Y direction (-1 = up, 1 = down, 0 = none)
        dy: f32,
        /// Ticks to hold the direction
        ticks: u64,
    },

    /// Teleport the gardener (play-field units, clamped to the field)
    SetPosition {
        /// X position
        x: f32,
        /// Y position
        y: f32,
    },

    /// Press interact once
    Interact,

    /// Press accelerate once
    Accelerate,

    /// Press reverse once
    Reverse,

    /// Log a message
    Log {
        /// Message to log
        message: String,
    },

    /// Repeat a set of steps
    Repeat {
        /// Number of times to repeat
        count: u32,
        /// Steps to repeat
        steps: Vec<ScriptStep>,
    },
}

/// A named sequence of steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    /// Script name
    pub name: String,
    /// Description of what this script does
    #[serde(default)]
    pub description: Option<String>,
    /// Sequence of steps
    pub steps: Vec<ScriptStep>,
}

impl Script {
    /// Loads a script from a JSON file.
    pub fn load(path: &Path) -> GardenResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let script: Script = serde_json::from_str(&content)
            .map_err(|e| GardenError::Serialization(format!("{}: {e}", path.display())))?;
        info!(
            "Loaded script '{}' with {} steps",
            script.name,
            script.steps.len()
        );
        Ok(script)
    }

    /// Ticks the script needs when run to completion.
    #[must_use]
    pub fn duration_ticks(&self) -> u64 {
        fn ticks(steps: &[ScriptStep]) -> u64 {
            steps
                .iter()
                .map(|step| match step {
                    ScriptStep::Wait { ticks } | ScriptStep::Move { ticks, .. } => *ticks,
                    ScriptStep::Interact | ScriptStep::Accelerate | ScriptStep::Reverse => 1,
                    ScriptStep::SetPosition { .. } | ScriptStep::Log { .. } => 0,
                    ScriptStep::Repeat { count, steps } => {
                        u64::from(*count).saturating_mul(ticks(steps))
                    },
                })
                .fold(0, u64::saturating_add)
        }
        ticks(&self.steps)
    }

    /// Built-in demo: a natural harvest, then three accelerated ones moving right.
    #[must_use]
    pub fn demo() -> Self {
        Self {
            name: "demo".to_string(),
            description: Some("Plant, grow and harvest with and without time acceleration".to_string()),
            steps: vec![
                ScriptStep::Log {
                    message: "Growing the first plant naturally".to_string(),
                },
                ScriptStep::Interact,
                ScriptStep::Wait { ticks: 98 },
                ScriptStep::Interact,
                ScriptStep::Log {
                    message: "Accelerating the next three".to_string(),
                },
                ScriptStep::Repeat {
                    count: 3,
                    steps: vec![
                        ScriptStep::Move {
                            dx: 1.0,
                            dy: 0.0,
                            ticks: 10,
                        },
                        ScriptStep::Interact,
                        ScriptStep::Accelerate,
                        ScriptStep::Accelerate,
                        ScriptStep::Interact,
                    ],
                },
                ScriptStep::Log {
                    message: "Leaving the garden to itself".to_string(),
                },
                ScriptStep::Move {
                    dx: 0.0,
                    dy: 1.0,
                    ticks: 20,
                },
                ScriptStep::Interact,
                ScriptStep::Wait { ticks: 600 },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_step_json_format() {
        let json = r#"[
            {"type": "wait", "ticks": 5},
            {"type": "move", "dx": 1.0, "dy": 0.0, "ticks": 3},
            {"type": "interact"},
            {"type": "repeat", "count": 2, "steps": [{"type": "accelerate"}]}
        ]"#;
        let steps: Vec<ScriptStep> = serde_json::from_str(json).expect("parse");
        assert_eq!(steps[0], ScriptStep::Wait { ticks: 5 });
        assert_eq!(steps[2], ScriptStep::Interact);
        assert!(matches!(steps[3], ScriptStep::Repeat { count: 2, .. }));
    }

    #[test]
    fn test_load_script_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("script.json");
        let script = Script::demo();
        std::fs::write(&path, serde_json::to_string(&script).expect("serialize")).expect("write");

        let loaded = Script::load(&path).expect("load");
        assert_eq!(loaded, script);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = Script::load(Path::new("/nonexistent/script.json")).expect_err("missing");
        assert!(matches!(err, GardenError::Io(_)));
    }

    #[test]
    fn test_load_bad_json_is_serialization_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("bad.json");
        std::fs::write(&path, r#"{"name": "x", "steps": [{"type": "dance"}]}"#).expect("write");

        let err = Script::load(&path).expect_err("bad step");
        assert!(matches!(err, GardenError::Serialization(_)));
    }

    #[test]
    fn test_duration_ticks() {
        let script = Script {
            name: "t".to_string(),
            description: None,
            steps: vec![
                ScriptStep::Wait { ticks: 10 },
                ScriptStep::Repeat {
                    count: 3,
                    steps: vec![ScriptStep::Interact, ScriptStep::Log {
                        message: String::new(),
                    }],
                },
            ],
        };
        assert_eq!(script.duration_ticks(), 13);
        assert_eq!(Script::demo().duration_ticks(), 1 + 98 + 1 + 3 * 14 + 20 + 1 + 600);
    }
}
