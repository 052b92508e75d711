//! Full-page HTML generation. Produces one self-contained document with
//! every asset inlined as a data URI and the Phaser scene script.

use super::helpers::{html_escape, script_json};
use super::scene_js::SCENE_JS;
use crate::assets::AssetBundle;
use crate::game::GameTuning;

/// Engine build the page loads at run time.
pub const PHASER_CDN: &str = "https://cdn.jsdelivr.net/npm/phaser@3.60.0/dist/phaser.min.js";
pub const DEFAULT_TITLE: &str = "Castle Crashers Demo";

/// Render the complete page for `bundle`.
pub fn wrap_html(bundle: &AssetBundle, tuning: &GameTuning, title: &str) -> String {
    let title = html_escape(title);
    let image_assets = script_json(bundle.images());
    let audio_assets = script_json(bundle.audio());
    let tuning_json = script_json(&tuning.clone().normalized());

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>{title}</title>
<script src="{PHASER_CDN}"></script>
<style>
body {{ margin: 0; background: #000; }}
canvas {{ display: block; margin: 0 auto; }}
</style>
</head>
<body>
<script>
const imageAssets = {image_assets};
const audioAssets = {audio_assets};
const tuning = {tuning_json};
{SCENE_JS}</script>
</body>
</html>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AssetKind, DataUri};
    use std::path::Path;

    fn bundle() -> AssetBundle {
        let mut b = AssetBundle::new();
        b.insert(
            "player1",
            DataUri::encode(AssetKind::Image, "png", b"knight".to_vec()),
            Path::new("player1.png"),
        );
        b.insert(
            "bgm",
            DataUri::encode(AssetKind::Audio, "wav", b"loop".to_vec()),
            Path::new("bgm.wav"),
        );
        b
    }

    #[test]
    fn page_inlines_both_maps_and_tuning() {
        let html = wrap_html(&bundle(), &GameTuning::default(), DEFAULT_TITLE);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(
            r#"const imageAssets = {"player1":"data:image/png;base64,a25pZ2h0"};"#
        ));
        assert!(html.contains(r#"const audioAssets = {"bgm":"data:audio/wav;base64,bG9vcA=="};"#));
        assert!(html.contains(r#""attack_cooldown_ms":500.0"#));
        assert!(html.contains(PHASER_CDN));
        assert!(html.contains("<title>Castle Crashers Demo</title>"));
    }

    #[test]
    fn page_never_ships_an_empty_magic_table() {
        let tuning = GameTuning {
            magic: Vec::new(),
            ..GameTuning::default()
        };
        let html = wrap_html(&AssetBundle::new(), &tuning, DEFAULT_TITLE);
        assert!(html.contains(r#""magic":[{"element":"fire","color":16711680,"speed":400.0}"#));
    }

    #[test]
    fn page_carries_scene_functions() {
        let html = wrap_html(&AssetBundle::new(), &GameTuning::default(), "t");
        assert!(html.contains("const imageAssets = {};"));
        assert!(html.contains("function preload()"));
        assert!(html.contains("function create()"));
        assert!(html.contains("function update(time, delta)"));
        assert!(html.contains("https://i.ibb.co/6B9qzRn/magic.png"));
    }

    #[test]
    fn title_is_escaped() {
        let html = wrap_html(&AssetBundle::new(), &GameTuning::default(), "</title><script>");
        assert!(html.contains("<title>&lt;/title&gt;&lt;script&gt;</title>"));
    }

    #[test]
    fn hostile_asset_name_cannot_end_script() {
        let mut b = AssetBundle::new();
        b.insert(
            "</script>boss",
            DataUri::encode(AssetKind::Image, "png", Vec::new()),
            Path::new("x.png"),
        );
        let html = wrap_html(&b, &GameTuning::default(), "t");
        assert_eq!(html.matches("</script>").count(), 2);
    }
}
