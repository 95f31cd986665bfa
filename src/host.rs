//! Read-only access to live game state
//!
//! Functions never talk to the game engine directly. They query a [`HostState`]
//! implementation, which returns `None` when a value is unavailable (for
//! example when the player is not in a game session).

use std::path::Path;

use chrono::{Local, NaiveTime};
use serde::Deserialize;

use crate::error::ConfigError;

/// Player position in world coordinates
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Memory statistics of the host process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct MemoryStats {
    pub max_bytes: u64,
    pub used_bytes: u64,
}

/// Accessors for live game state provided by the host engine
pub trait HostState {
    /// Current player position
    fn position(&self) -> Option<Position>;

    /// Player yaw in degrees (0 = south, 90 = west, 180 = north, 270 = east)
    fn yaw(&self) -> Option<f32>;

    /// Current frames per second
    fn fps(&self) -> Option<u32>;

    /// Memory usage of the host process
    fn memory(&self) -> Option<MemoryStats>;

    /// Wall-clock time of the local machine
    fn local_time(&self) -> Option<NaiveTime> {
        Some(Local::now().time())
    }
}

/// A static snapshot of game state, loadable from TOML
///
/// ```toml
/// yaw = 180.0
/// fps = 60
/// world = "WC1"
/// time = "13:45:10"
///
/// [position]
/// x = 120.5
/// y = 64.0
/// z = -33.2
///
/// [memory]
/// max_bytes = 4294967296
/// used_bytes = 1073741824
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GameSnapshot {
    pub position: Option<Position>,
    pub yaw: Option<f32>,
    pub fps: Option<u32>,
    pub memory: Option<MemoryStats>,
    /// Current world; delivered to active functions as an update event
    pub world: Option<String>,
    /// Fixed local time; the real clock is used when omitted
    pub time: Option<NaiveTime>,
}

impl GameSnapshot {
    /// Create an empty snapshot (not in a game session)
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a snapshot from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a snapshot from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn with_position(mut self, x: f64, y: f64, z: f64) -> Self {
        self.position = Some(Position::new(x, y, z));
        self
    }

    pub fn with_yaw(mut self, yaw: f32) -> Self {
        self.yaw = Some(yaw);
        self
    }

    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = Some(fps);
        self
    }

    pub fn with_memory(mut self, max_bytes: u64, used_bytes: u64) -> Self {
        self.memory = Some(MemoryStats {
            max_bytes,
            used_bytes,
        });
        self
    }

    pub fn with_world(mut self, world: impl Into<String>) -> Self {
        self.world = Some(world.into());
        self
    }

    pub fn with_time(mut self, time: NaiveTime) -> Self {
        self.time = Some(time);
        self
    }
}

impl HostState for GameSnapshot {
    fn position(&self) -> Option<Position> {
        self.position
    }

    fn yaw(&self) -> Option<f32> {
        self.yaw
    }

    fn fps(&self) -> Option<u32> {
        self.fps
    }

    fn memory(&self) -> Option<MemoryStats> {
        self.memory
    }

    fn local_time(&self) -> Option<NaiveTime> {
        Some(self.time.unwrap_or_else(|| Local::now().time()))
    }
}
