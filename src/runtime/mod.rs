//! Generates the self-contained HTML page that runs the packaged brawler on
//! Phaser.
//!
//! This module is split into:
//! - `html` — page shell and data embedding (wrap_html)
//! - `scene_js` — the preload/create/update scene script
//! - `helpers` — script-safe JSON and HTML escaping

mod helpers;
mod html;
mod scene_js;

pub use html::{wrap_html, DEFAULT_TITLE, PHASER_CDN};
