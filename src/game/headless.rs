//! A minimal arcade-physics [`Engine`] with no renderer or audio device.
//!
//! Bodies are fixed-size axis-aligned boxes. World gravity plus each body's
//! own gravity is integrated per step, sprites land on the ground line and
//! are clamped to the world, projectiles are not. Everything the scene asks
//! for (sounds, tints, loaded resources) is recorded for inspection.

use std::collections::BTreeMap;

use super::engine::{BodyId, BodyKind, Engine, Sound, Vec2};
use super::input::Inputs;
use super::scene::{Scene, TickReport};
use super::tuning::GameTuning;

/// Half the edge length of every body's box, in pixels.
pub const BODY_HALF_SIZE: f32 = 16.0;
/// Half the height of the unscaled ground sprite, in pixels.
pub const GROUND_HALF_HEIGHT: f32 = 16.0;

#[derive(Debug, Clone)]
struct Body {
    key: String,
    kind: BodyKind,
    pos: Vec2,
    vel: Vec2,
    gravity_y: f32,
    tint: Option<u32>,
    on_ground: bool,
}

/// A resource registered through `load_image` / `load_audio`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loaded {
    pub key: String,
    pub src: String,
}

#[derive(Debug, Clone)]
pub struct HeadlessEngine {
    width: f32,
    height: f32,
    gravity_y: f32,
    ground_top: Option<f32>,
    bodies: BTreeMap<BodyId, Body>,
    next_id: u32,
    images: Vec<Loaded>,
    audio: Vec<Loaded>,
    background: Option<String>,
    played: Vec<Sound>,
    looping: Vec<String>,
}

impl HeadlessEngine {
    pub fn new(tuning: &GameTuning) -> Self {
        Self {
            width: tuning.world_width,
            height: tuning.world_height,
            gravity_y: tuning.gravity_y,
            ground_top: None,
            bodies: BTreeMap::new(),
            next_id: 0,
            images: Vec::new(),
            audio: Vec::new(),
            background: None,
            played: Vec::new(),
            looping: Vec::new(),
        }
    }

    /// Integrate every body over `delta_ms`.
    pub fn step(&mut self, delta_ms: f32) {
        let dt = delta_ms / 1000.0;
        for body in self.bodies.values_mut() {
            body.vel.y += (self.gravity_y + body.gravity_y) * dt;
            body.pos.x += body.vel.x * dt;
            body.pos.y += body.vel.y * dt;
            body.on_ground = false;

            if let Some(top) = self.ground_top {
                let bottom = body.pos.y + BODY_HALF_SIZE;
                match body.kind {
                    BodyKind::Sprite if bottom >= top && body.vel.y >= 0.0 => {
                        body.pos.y = top - BODY_HALF_SIZE;
                        body.vel.y = 0.0;
                        body.on_ground = true;
                    }
                    BodyKind::Projectile if bottom > top => body.on_ground = true,
                    _ => {}
                }
            }

            if body.kind == BodyKind::Sprite {
                let (lo_x, hi_x) = (BODY_HALF_SIZE, self.width - BODY_HALF_SIZE);
                let (lo_y, hi_y) = (BODY_HALF_SIZE, self.height - BODY_HALF_SIZE);
                if body.pos.x < lo_x || body.pos.x > hi_x {
                    body.pos.x = body.pos.x.clamp(lo_x, hi_x);
                    body.vel.x = 0.0;
                }
                if body.pos.y < lo_y || body.pos.y > hi_y {
                    body.pos.y = body.pos.y.clamp(lo_y, hi_y);
                    body.vel.y = 0.0;
                }
            }
        }
    }

    /// Run one frame: scene logic first, then physics.
    pub fn advance(&mut self, scene: &mut Scene, delta_ms: f32, inputs: &Inputs) -> TickReport {
        let report = scene.update(delta_ms, inputs, self);
        self.step(delta_ms);
        report
    }

    /// Teleport a body, e.g. to stage a fight in a test.
    pub fn place(&mut self, id: BodyId, at: Vec2) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.pos = at;
        }
    }

    pub fn is_alive(&self, id: BodyId) -> bool {
        self.bodies.contains_key(&id)
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn velocity(&self, id: BodyId) -> Option<Vec2> {
        self.bodies.get(&id).map(|b| b.vel)
    }

    pub fn tint(&self, id: BodyId) -> Option<u32> {
        self.bodies.get(&id).and_then(|b| b.tint)
    }

    pub fn texture(&self, id: BodyId) -> Option<&str> {
        self.bodies.get(&id).map(|b| b.key.as_str())
    }

    pub fn images(&self) -> &[Loaded] {
        &self.images
    }

    pub fn audio(&self) -> &[Loaded] {
        &self.audio
    }

    pub fn background(&self) -> Option<&str> {
        self.background.as_deref()
    }

    pub fn ground_top(&self) -> Option<f32> {
        self.ground_top
    }

    pub fn played(&self) -> &[Sound] {
        &self.played
    }

    pub fn play_count(&self, sound: Sound) -> usize {
        self.played.iter().filter(|&&s| s == sound).count()
    }

    pub fn looping(&self) -> &[String] {
        &self.looping
    }
}

impl Engine for HeadlessEngine {
    fn load_image(&mut self, key: &str, src: &str) {
        self.images.push(Loaded {
            key: key.to_string(),
            src: src.to_string(),
        });
    }

    fn load_audio(&mut self, key: &str, src: &str) {
        self.audio.push(Loaded {
            key: key.to_string(),
            src: src.to_string(),
        });
    }

    fn add_background(&mut self, key: &str, _at: Vec2) {
        self.background = Some(key.to_string());
    }

    fn add_ground(&mut self, _key: &str, at: Vec2, scale: f32) {
        self.ground_top = Some(at.y - GROUND_HALF_HEIGHT * scale);
    }

    fn spawn_body(&mut self, key: &str, at: Vec2, kind: BodyKind) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        self.bodies.insert(
            id,
            Body {
                key: key.to_string(),
                kind,
                pos: at,
                vel: Vec2::default(),
                gravity_y: 0.0,
                tint: None,
                on_ground: false,
            },
        );
        id
    }

    fn destroy(&mut self, id: BodyId) {
        self.bodies.remove(&id);
    }

    fn position(&self, id: BodyId) -> Vec2 {
        self.bodies.get(&id).map(|b| b.pos).unwrap_or_default()
    }

    fn set_velocity_x(&mut self, id: BodyId, vx: f32) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.vel.x = vx;
        }
    }

    fn set_velocity_y(&mut self, id: BodyId, vy: f32) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.vel.y = vy;
        }
    }

    fn set_gravity_y(&mut self, id: BodyId, gy: f32) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.gravity_y = gy;
        }
    }

    fn set_tint(&mut self, id: BodyId, color: u32) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.tint = Some(color);
        }
    }

    fn touching_ground(&self, id: BodyId) -> bool {
        self.bodies.get(&id).is_some_and(|b| b.on_ground)
    }

    fn overlaps(&self, a: BodyId, b: BodyId) -> bool {
        match (self.bodies.get(&a), self.bodies.get(&b)) {
            (Some(a), Some(b)) => {
                (a.pos.x - b.pos.x).abs() < BODY_HALF_SIZE * 2.0
                    && (a.pos.y - b.pos.y).abs() < BODY_HALF_SIZE * 2.0
            }
            _ => false,
        }
    }

    fn play(&mut self, sound: Sound, _volume: f32) {
        self.played.push(sound);
    }

    fn play_loop(&mut self, key: &str, _volume: f32) {
        self.looping.push(key.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_with_ground() -> HeadlessEngine {
        let tuning = GameTuning::default();
        let mut engine = HeadlessEngine::new(&tuning);
        engine.add_ground("ground", Vec2::new(400.0, 580.0), 2.0);
        engine
    }

    #[test]
    fn sprites_fall_and_land_on_ground() {
        let mut engine = engine_with_ground();
        let id = engine.spawn_body("knight", Vec2::new(100.0, 450.0), BodyKind::Sprite);
        assert!(!engine.touching_ground(id));
        for _ in 0..120 {
            engine.step(16.0);
        }
        assert!(engine.touching_ground(id));
        assert_eq!(engine.position(id).y, 548.0 - BODY_HALF_SIZE);
    }

    #[test]
    fn projectile_with_cancelled_gravity_flies_flat() {
        let mut engine = engine_with_ground();
        let id = engine.spawn_body("bolt", Vec2::new(100.0, 300.0), BodyKind::Projectile);
        engine.set_gravity_y(id, -500.0);
        engine.set_velocity_x(id, 400.0);
        engine.step(500.0);
        let at = engine.position(id);
        assert_eq!(at.y, 300.0);
        assert_eq!(at.x, 300.0);
    }

    #[test]
    fn projectiles_ignore_world_bounds() {
        let mut engine = engine_with_ground();
        let id = engine.spawn_body("bolt", Vec2::new(790.0, 300.0), BodyKind::Projectile);
        engine.set_gravity_y(id, -500.0);
        engine.set_velocity_x(id, 600.0);
        engine.step(100.0);
        assert!(engine.position(id).x > 800.0);
    }

    #[test]
    fn sprites_stay_inside_world() {
        let mut engine = engine_with_ground();
        let id = engine.spawn_body("goblin", Vec2::new(10.0, 100.0), BodyKind::Sprite);
        engine.set_velocity_x(id, -200.0);
        engine.step(100.0);
        assert_eq!(engine.position(id).x, BODY_HALF_SIZE);
    }

    #[test]
    fn overlap_requires_intersecting_boxes() {
        let mut engine = engine_with_ground();
        let a = engine.spawn_body("a", Vec2::new(100.0, 100.0), BodyKind::Sprite);
        let b = engine.spawn_body("b", Vec2::new(131.0, 100.0), BodyKind::Sprite);
        let c = engine.spawn_body("c", Vec2::new(132.0, 100.0), BodyKind::Sprite);
        assert!(engine.overlaps(a, b));
        assert!(!engine.overlaps(a, c));
        engine.destroy(b);
        assert!(!engine.overlaps(a, b));
    }
}
