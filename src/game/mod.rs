//! Engine-agnostic model of the packaged brawler.
//!
//! - `engine` — the capability trait the scene drives
//! - `scene` — preload / create / update phases and their state
//! - `entity` — players, enemies, projectiles, cooldowns
//! - `magic` — element profiles handed out by spawn order
//! - `input` — logical inputs and the input-to-player binding table
//! - `tuning` — named gameplay constants, JSON-overridable
//! - `headless` — a recording engine with simple arcade physics
//! - `script` — canned input runs on the headless engine

pub mod engine;
pub mod entity;
pub mod headless;
pub mod input;
pub mod magic;
pub mod scene;
pub mod script;
pub mod tuning;

pub use engine::{BodyId, BodyKind, Engine, Sound, Vec2};
pub use headless::HeadlessEngine;
pub use input::{Bindings, InputFrame, Inputs, Key};
pub use magic::{Element, MagicProfile};
pub use scene::{Scene, TickReport};
pub use script::{run_headless, InputScript, SimulationSummary};
pub use tuning::GameTuning;
