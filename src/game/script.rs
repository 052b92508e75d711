//! Scripted headless runs of the scene, used by the `simulate` command.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use super::headless::HeadlessEngine;
use super::input::{self, Bindings, InputFrame};
use super::scene::Scene;
use super::tuning::GameTuning;
use crate::assets::AssetBundle;

/// Frame time of a 60 Hz display, in milliseconds.
pub const FRAME_MS: f32 = 1000.0 / 60.0;

/// Canned keyboard input for a headless run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputScript {
    /// Nothing pressed.
    Idle,
    /// Hold right the whole time.
    Walk,
    /// Hold right with sword and magic held; jump once a second.
    Brawl,
}

impl InputScript {
    pub fn frame(self, n: u32) -> InputFrame {
        match self {
            InputScript::Idle => InputFrame::default(),
            InputScript::Walk => InputFrame {
                right: true,
                ..InputFrame::default()
            },
            InputScript::Brawl => InputFrame {
                right: true,
                up: n % 60 == 0,
                attack: true,
                magic: true,
                ..InputFrame::default()
            },
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SimulationSummary {
    pub frames: u32,
    pub players: usize,
    pub enemies_spawned: usize,
    pub enemies_left: usize,
    pub defeated: Vec<String>,
    pub projectiles_spawned: usize,
    pub projectiles_expired: usize,
    pub projectiles_in_flight: usize,
    pub sword_swings: usize,
    pub hits: usize,
    pub music: bool,
}

/// Load, set up and run the scene for `frames` frames on a headless engine.
pub fn run_headless(
    bundle: &AssetBundle,
    tuning: &GameTuning,
    script: InputScript,
    frames: u32,
    seed: u64,
) -> SimulationSummary {
    let mut engine = HeadlessEngine::new(tuning);
    let mut scene = Scene::new(tuning.clone(), Bindings::default());
    let mut rng = StdRng::seed_from_u64(seed);

    scene.preload(bundle, &mut engine);
    scene.create(bundle, &mut engine, &mut rng);

    let mut summary = SimulationSummary {
        frames,
        players: scene.players().len(),
        enemies_spawned: scene.enemies().len(),
        music: scene.music_playing(),
        ..SimulationSummary::default()
    };

    for n in 0..frames {
        let inputs = input::keyboard(script.frame(n));
        let report = engine.advance(&mut scene, FRAME_MS, &inputs);
        summary.defeated.extend(report.enemies_defeated);
        summary.projectiles_spawned += report.projectiles_spawned;
        summary.projectiles_expired += report.projectiles_expired;
        summary.sword_swings += report.swings;
        summary.hits += report.hits;
    }

    summary.enemies_left = scene.enemies().len();
    summary.projectiles_in_flight = scene.projectiles().len();
    summary
}
