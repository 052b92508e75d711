use super::engine::BodyId;
use super::magic::{Element, MagicProfile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// Countdown timers gating repeat actions, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Cooldowns {
    pub attack_ms: f32,
    pub magic_ms: f32,
}

impl Cooldowns {
    pub fn tick(&mut self, delta_ms: f32) {
        self.attack_ms -= delta_ms;
        self.magic_ms -= delta_ms;
    }

    pub fn attack_ready(&self) -> bool {
        self.attack_ms <= 0.0
    }

    pub fn magic_ready(&self) -> bool {
        self.magic_ms <= 0.0
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub asset: String,
    pub body: BodyId,
    pub health: i32,
    pub facing: Facing,
    pub profile: MagicProfile,
    pub cooldowns: Cooldowns,
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub asset: String,
    pub body: BodyId,
    pub health: i32,
}

impl Enemy {
    /// Apply damage; returns true once the enemy is out of health.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.health -= amount;
        self.is_defeated()
    }

    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }
}

#[derive(Debug, Clone)]
pub struct Projectile {
    pub body: BodyId,
    pub element: Element,
    pub color: u32,
    pub age_ms: f32,
}
