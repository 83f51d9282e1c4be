//! Client settings, loaded from a JSON file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use hookline_engine::interaction::{ExecutionMode, SwingMode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlacementMode {
    #[default]
    Local,
    PacketOnly,
}

impl From<PlacementMode> for ExecutionMode {
    fn from(mode: PlacementMode) -> Self {
        match mode {
            PlacementMode::Local => ExecutionMode::Local,
            PlacementMode::PacketOnly => ExecutionMode::PacketOnly,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SwingSetting {
    #[default]
    Client,
    Packet,
}

impl From<SwingSetting> for SwingMode {
    fn from(swing: SwingSetting) -> Self {
        match swing {
            SwingSetting::Client => SwingMode::Client,
            SwingSetting::Packet => SwingMode::Packet,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub player_name: String,
    pub entity_id: i32,
    /// Feet position the player spawns at.
    pub spawn: [f64; 3],
    /// Chunk radius of the generated flat world.
    pub world_radius: i32,
    pub strict_direction: bool,
    pub placement: PlacementMode,
    pub swing: SwingSetting,
    /// Modules switched on at startup, by name.
    pub enabled_modules: Vec<String>,
    /// Where `--record` writes the framed packet stream when no path is given.
    pub record_path: Option<PathBuf>,
    pub compression_threshold: Option<u32>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            player_name: "hookline".into(),
            entity_id: 1,
            spawn: [0.5, 65.0, 0.5],
            world_radius: 2,
            strict_direction: false,
            placement: PlacementMode::Local,
            swing: SwingSetting::Client,
            enabled_modules: Vec::new(),
            record_path: None,
            compression_threshold: None,
        }
    }
}

impl ClientConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ClientConfig::from_json(r#"{ "placement": "packet_only", "enabled_modules": ["Scaffold"] }"#)
            .unwrap();
        assert_eq!(config.placement, PlacementMode::PacketOnly);
        assert_eq!(config.swing, SwingSetting::Client);
        assert_eq!(config.enabled_modules, vec!["Scaffold".to_string()]);
        assert_eq!(config.spawn, [0.5, 65.0, 0.5]);
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!(ClientConfig::from_json(r#"{ "placement": "teleport" }"#).is_err());
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = ClientConfig::load(Path::new("/nonexistent/hookline.json")).unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/hookline.json"));
    }
}
