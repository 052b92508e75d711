//! Gameplay tuning: every speed, timer and damage value the scene uses.
//!
//! The same values are serialized into the generated page, so the browser
//! build and the headless model always agree.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::magic::MagicProfile;
use crate::error::{PackError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameTuning {
    /// Canvas width in pixels.
    pub world_width: f32,
    /// Canvas height in pixels.
    pub world_height: f32,
    /// World gravity in pixels per second squared (positive is down).
    pub gravity_y: f32,

    /// Horizontal player speed in pixels per second.
    pub move_speed: f32,
    /// Vertical velocity applied on jump, pixels per second (negative is up).
    pub jump_velocity: f32,
    /// Horizontal enemy chase speed in pixels per second.
    pub enemy_speed: f32,

    /// Milliseconds between sword swings.
    pub attack_cooldown_ms: f32,
    /// Milliseconds between magic casts.
    pub magic_cooldown_ms: f32,
    /// Sword reach in pixels; enemies strictly closer than this are hit.
    pub melee_radius: f32,
    pub melee_damage: i32,
    pub magic_damage: i32,

    pub player_health: i32,
    pub enemy_health: i32,

    /// Players spawn at `player_spawn_x + [0, spawn_band)`.
    pub player_spawn_x: f32,
    /// Enemies spawn at `enemy_spawn_x + [0, spawn_band)`.
    pub enemy_spawn_x: f32,
    /// Width of the random horizontal spawn band in pixels.
    pub spawn_band: f32,
    pub spawn_y: f32,

    /// Center of the ground sprite.
    pub ground_x: f32,
    pub ground_y: f32,
    /// Scale applied to the ground sprite.
    pub ground_scale: f32,

    /// Per-projectile gravity in pixels per second squared; the default
    /// cancels world gravity so bolts fly flat.
    pub projectile_gravity_y: f32,
    /// Milliseconds a projectile may live before it is removed.
    pub projectile_lifetime_ms: f32,

    /// Volume for every sound, 0.0 to 1.0.
    pub sound_volume: f32,

    /// Element rotation handed out to players by spawn order.
    pub magic: Vec<MagicProfile>,
}

impl Default for GameTuning {
    fn default() -> Self {
        Self {
            world_width: 800.0,
            world_height: 600.0,
            gravity_y: 500.0,
            move_speed: 200.0,
            jump_velocity: -400.0,
            enemy_speed: 100.0,
            attack_cooldown_ms: 500.0,
            magic_cooldown_ms: 1000.0,
            melee_radius: 50.0,
            melee_damage: 20,
            magic_damage: 25,
            player_health: 100,
            enemy_health: 50,
            player_spawn_x: 100.0,
            enemy_spawn_x: 400.0,
            spawn_band: 200.0,
            spawn_y: 450.0,
            ground_x: 400.0,
            ground_y: 580.0,
            ground_scale: 2.0,
            projectile_gravity_y: -500.0,
            projectile_lifetime_ms: 3000.0,
            sound_volume: 0.5,
            magic: MagicProfile::default_table(),
        }
    }
}

impl GameTuning {
    /// Load tuning overrides from a JSON file. Missing fields keep their
    /// defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| PackError::io(path, e))?;
        let tuning: Self = serde_json::from_str(&text).map_err(|source| PackError::Tuning {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(tuning.normalized())
    }

    /// Restore the default magic table when none is configured.
    pub fn normalized(mut self) -> Self {
        if self.magic.is_empty() {
            self.magic = MagicProfile::default_table();
        }
        self
    }

    /// Magic profile for the player spawned at `index`. An empty table
    /// rotates through the defaults.
    pub fn profile_for(&self, index: usize) -> MagicProfile {
        if self.magic.is_empty() {
            let defaults = MagicProfile::default_table();
            return defaults[index % defaults.len()];
        }
        self.magic[index % self.magic.len()]
    }
}
