//! Capability boundary between the scene logic and whatever engine renders
//! it. The scene only spawns bodies, steers them, asks about contacts and
//! plays sounds; physics integration, rendering and audio live behind this
//! trait.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Vec2) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Handle to a physics body owned by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Dynamic sprite that collides with the ground and world bounds.
    Sprite,
    /// Dynamic body that is not clamped to the world.
    Projectile,
}

/// One-shot sound effects the scene triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sound {
    Sword,
    Hit,
    Magic,
}

impl Sound {
    /// Audio asset key the sound is loaded under.
    pub fn key(self) -> &'static str {
        match self {
            Sound::Sword => "sword",
            Sound::Hit => "hit",
            Sound::Magic => "magic",
        }
    }
}

pub trait Engine {
    /// Register an image resource under `key`; `src` is a URL or data URI.
    fn load_image(&mut self, key: &str, src: &str);
    fn load_audio(&mut self, key: &str, src: &str);

    /// Decorative full-screen image, no body.
    fn add_background(&mut self, key: &str, at: Vec2);
    /// Static ground body every sprite and projectile collides with.
    fn add_ground(&mut self, key: &str, at: Vec2, scale: f32);

    fn spawn_body(&mut self, key: &str, at: Vec2, kind: BodyKind) -> BodyId;
    fn destroy(&mut self, id: BodyId);

    fn position(&self, id: BodyId) -> Vec2;
    fn set_velocity_x(&mut self, id: BodyId, vx: f32);
    fn set_velocity_y(&mut self, id: BodyId, vy: f32);
    /// Per-body gravity, added to world gravity.
    fn set_gravity_y(&mut self, id: BodyId, gy: f32);
    fn set_tint(&mut self, id: BodyId, color: u32);

    /// Whether the body is resting on the ground.
    fn touching_ground(&self, id: BodyId) -> bool;
    /// Whether two bodies' bounds intersect.
    fn overlaps(&self, a: BodyId, b: BodyId) -> bool;

    fn play(&mut self, sound: Sound, volume: f32);
    fn play_loop(&mut self, key: &str, volume: f32);
}
