//! The brawler scene: load, setup and per-frame simulation.
//!
//! Entity lists, cooldowns and the magic table live on [`Scene`] and are
//! handed to each phase explicitly.

use rand::Rng;

use super::engine::{BodyKind, Engine, Sound, Vec2};
use super::entity::{Cooldowns, Enemy, Facing, Player, Projectile};
use super::input::{Bindings, InputFrame, Inputs};
use super::tuning::GameTuning;
use crate::assets::AssetBundle;

/// Image key projectiles are spawned with.
pub const PROJECTILE_KEY: &str = "magicProjectile";
/// Loaded in place of a packaged `magicProjectile` image.
pub const FALLBACK_PROJECTILE_URL: &str = "https://i.ibb.co/6B9qzRn/magic.png";
/// Audio key of the looping background track.
pub const MUSIC_KEY: &str = "bgm";

/// Outcome of one [`Scene::update`] call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Asset names of enemies destroyed this frame.
    pub enemies_defeated: Vec<String>,
    pub swings: usize,
    /// Damage applications from swords and projectiles.
    pub hits: usize,
    pub projectiles_spawned: usize,
    /// Projectiles removed for age or leaving the world.
    pub projectiles_expired: usize,
}

pub struct Scene {
    tuning: GameTuning,
    bindings: Bindings,
    players: Vec<Player>,
    enemies: Vec<Enemy>,
    projectiles: Vec<Projectile>,
    sounds: Vec<Sound>,
    background: Option<String>,
    ground: Option<String>,
    music: bool,
}

impl Scene {
    pub fn new(tuning: GameTuning, bindings: Bindings) -> Self {
        Self {
            tuning: tuning.normalized(),
            bindings,
            players: Vec::new(),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            sounds: Vec::new(),
            background: None,
            ground: None,
            music: false,
        }
    }

    /// Register every packaged asset with the engine under its name.
    pub fn preload<E: Engine + ?Sized>(&self, bundle: &AssetBundle, engine: &mut E) {
        for (name, uri) in bundle.images().iter() {
            engine.load_image(name, &uri.to_string());
        }
        for (name, uri) in bundle.audio().iter() {
            engine.load_audio(name, &uri.to_string());
        }
        if !bundle.images().contains(PROJECTILE_KEY) {
            engine.load_image(PROJECTILE_KEY, FALLBACK_PROJECTILE_URL);
        }
    }

    /// Place the backdrop, spawn one entity per character image and start
    /// the music. Runs once, after [`Scene::preload`].
    pub fn create<E, R>(&mut self, bundle: &AssetBundle, engine: &mut E, rng: &mut R)
    where
        E: Engine + ?Sized,
        R: Rng + ?Sized,
    {
        let tuning = &self.tuning;
        let images = bundle.images();

        self.background = images
            .names()
            .find(|k| k.to_lowercase().contains("background"))
            .map(str::to_string);
        if let Some(key) = &self.background {
            let center = Vec2::new(tuning.world_width / 2.0, tuning.world_height / 2.0);
            engine.add_background(key, center);
        }

        // "background" also contains "ground"; whichever comes first wins.
        self.ground = images
            .names()
            .find(|k| k.to_lowercase().contains("ground"))
            .map(str::to_string);
        if let Some(key) = &self.ground {
            let at = Vec2::new(tuning.ground_x, tuning.ground_y);
            engine.add_ground(key, at, tuning.ground_scale);
        }

        for (i, key) in images.names().filter(|k| is_player(k)).enumerate() {
            let x = tuning.player_spawn_x + rng.gen::<f32>() * tuning.spawn_band;
            let body = engine.spawn_body(key, Vec2::new(x, tuning.spawn_y), BodyKind::Sprite);
            self.players.push(Player {
                asset: key.to_string(),
                body,
                health: tuning.player_health,
                facing: Facing::Right,
                profile: tuning.profile_for(i),
                cooldowns: Cooldowns::default(),
            });
        }

        for key in images.names().filter(|k| is_enemy(k)) {
            let x = tuning.enemy_spawn_x + rng.gen::<f32>() * tuning.spawn_band;
            let body = engine.spawn_body(key, Vec2::new(x, tuning.spawn_y), BodyKind::Sprite);
            self.enemies.push(Enemy {
                asset: key.to_string(),
                body,
                health: tuning.enemy_health,
            });
        }

        self.sounds = [Sound::Sword, Sound::Hit, Sound::Magic]
            .into_iter()
            .filter(|s| bundle.audio().contains(s.key()))
            .collect();

        if bundle.audio().contains(MUSIC_KEY) {
            engine.play_loop(MUSIC_KEY, tuning.sound_volume);
            self.music = true;
        }

        log::debug!(
            "scene created: {} players, {} enemies, background {:?}, ground {:?}",
            self.players.len(),
            self.enemies.len(),
            self.background,
            self.ground
        );
    }

    /// Advance the scene by `delta_ms`. Does nothing until a player exists.
    pub fn update<E: Engine + ?Sized>(
        &mut self,
        delta_ms: f32,
        inputs: &Inputs,
        engine: &mut E,
    ) -> TickReport {
        let mut report = TickReport::default();
        if self.players.is_empty() {
            return report;
        }

        for player in &mut self.players {
            player.cooldowns.tick(delta_ms);
        }

        let bound: Vec<_> = self.bindings.iter().collect();
        for (slot, index) in bound {
            if index >= self.players.len() {
                continue;
            }
            let input = inputs.get(&slot).copied().unwrap_or_default();
            self.drive_player(index, input, engine, &mut report);
        }

        self.advance_projectiles(delta_ms, engine, &mut report);
        self.steer_enemies(engine);
        report
    }

    fn drive_player<E: Engine + ?Sized>(
        &mut self,
        index: usize,
        input: InputFrame,
        engine: &mut E,
        report: &mut TickReport,
    ) {
        let Self {
            tuning,
            players,
            enemies,
            projectiles,
            sounds,
            ..
        } = self;
        let sounds: &[Sound] = sounds;
        let player = &mut players[index];

        match input.horizontal() {
            -1 => {
                engine.set_velocity_x(player.body, -tuning.move_speed);
                player.facing = Facing::Left;
            }
            1 => {
                engine.set_velocity_x(player.body, tuning.move_speed);
                player.facing = Facing::Right;
            }
            _ => engine.set_velocity_x(player.body, 0.0),
        }
        if input.up && engine.touching_ground(player.body) {
            engine.set_velocity_y(player.body, tuning.jump_velocity);
        }

        if input.attack && player.cooldowns.attack_ready() {
            play(engine, sounds, Sound::Sword, tuning.sound_volume);
            player.cooldowns.attack_ms = tuning.attack_cooldown_ms;
            report.swings += 1;

            let origin = engine.position(player.body);
            for enemy in enemies.iter_mut() {
                if engine.position(enemy.body).distance(origin) < tuning.melee_radius {
                    enemy.take_damage(tuning.melee_damage);
                    report.hits += 1;
                    play(engine, sounds, Sound::Hit, tuning.sound_volume);
                }
            }
            remove_defeated(enemies, engine, report);
        }

        if input.magic && player.cooldowns.magic_ready() {
            player.cooldowns.magic_ms = tuning.magic_cooldown_ms;
            play(engine, sounds, Sound::Magic, tuning.sound_volume);

            let profile = player.profile;
            let at = engine.position(player.body);
            let body = engine.spawn_body(PROJECTILE_KEY, at, BodyKind::Projectile);
            engine.set_velocity_x(body, player.facing.sign() * profile.speed);
            engine.set_tint(body, profile.color);
            engine.set_gravity_y(body, tuning.projectile_gravity_y);
            projectiles.push(Projectile {
                body,
                element: profile.element,
                color: profile.color,
                age_ms: 0.0,
            });
            report.projectiles_spawned += 1;
        }
    }

    fn advance_projectiles<E: Engine + ?Sized>(
        &mut self,
        delta_ms: f32,
        engine: &mut E,
        report: &mut TickReport,
    ) {
        let Self {
            tuning,
            enemies,
            projectiles,
            sounds,
            ..
        } = self;
        let sounds: &[Sound] = sounds;

        projectiles.retain_mut(|proj| {
            proj.age_ms += delta_ms;

            if let Some(enemy) = enemies
                .iter_mut()
                .find(|e| !e.is_defeated() && engine.overlaps(proj.body, e.body))
            {
                enemy.take_damage(tuning.magic_damage);
                report.hits += 1;
                play(engine, sounds, Sound::Hit, tuning.sound_volume);
                engine.destroy(proj.body);
                return false;
            }

            if engine.touching_ground(proj.body) {
                engine.destroy(proj.body);
                return false;
            }

            let at = engine.position(proj.body);
            let outside = at.x < 0.0
                || at.x > tuning.world_width
                || at.y < 0.0
                || at.y > tuning.world_height;
            if outside || proj.age_ms > tuning.projectile_lifetime_ms {
                engine.destroy(proj.body);
                report.projectiles_expired += 1;
                return false;
            }
            true
        });

        remove_defeated(enemies, engine, report);
    }

    /// Every enemy walks toward the first player, re-decided each frame.
    fn steer_enemies<E: Engine + ?Sized>(&self, engine: &mut E) {
        let Some(target) = self.players.first() else {
            return;
        };
        let target = engine.position(target.body);
        for enemy in &self.enemies {
            let vx = if target.x < engine.position(enemy.body).x {
                -self.tuning.enemy_speed
            } else {
                self.tuning.enemy_speed
            };
            engine.set_velocity_x(enemy.body, vx);
        }
    }

    pub fn tuning(&self) -> &GameTuning {
        &self.tuning
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn background(&self) -> Option<&str> {
        self.background.as_deref()
    }

    pub fn ground(&self) -> Option<&str> {
        self.ground.as_deref()
    }

    pub fn music_playing(&self) -> bool {
        self.music
    }
}

fn is_player(name: &str) -> bool {
    name.to_lowercase().starts_with("player")
}

fn is_enemy(name: &str) -> bool {
    !(name.contains("background") || name.contains("ground")) && !is_player(name)
}

fn play<E: Engine + ?Sized>(engine: &mut E, available: &[Sound], sound: Sound, volume: f32) {
    if available.contains(&sound) {
        engine.play(sound, volume);
    }
}

fn remove_defeated<E: Engine + ?Sized>(
    enemies: &mut Vec<Enemy>,
    engine: &mut E,
    report: &mut TickReport,
) {
    enemies.retain(|e| {
        if e.is_defeated() {
            engine.destroy(e.body);
            report.enemies_defeated.push(e.asset.clone());
            false
        } else {
            true
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_prefix_is_case_insensitive() {
        assert!(is_player("Player2"));
        assert!(is_player("playerKnight"));
        assert!(!is_player("knight_player"));
    }

    #[test]
    fn enemy_filter_is_case_sensitive_on_scenery() {
        assert!(!is_enemy("castle_background"));
        assert!(!is_enemy("underground"));
        assert!(is_enemy("Ground_troll"));
        assert!(!is_enemy("PLAYER1"));
        assert!(is_enemy("goblin"));
    }
}
