use std::fs;
use std::path::Path;

use brawl_pack::assets::{scan_dir, AssetKind, DataUri};
use brawl_pack::error::PackError;
use brawl_pack::game::{self, GameTuning, InputScript};
use brawl_pack::{pack_dir, write_artifact, PackOptions, DEFAULT_OUTPUT};

fn write(root: &Path, rel: &str, bytes: &[u8]) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .unwrap_or_else(|e| panic!("cannot create {}: {e}", parent.display()));
    }
    fs::write(&path, bytes).unwrap_or_else(|e| panic!("cannot write {}: {e}", path.display()));
}

/// Pull the JS object literal assigned to `name` out of the page.
fn embedded_map(html: &str, name: &str) -> serde_json::Map<String, serde_json::Value> {
    let start = format!("const {name} = ");
    let from = html.find(&start).expect("map declared") + start.len();
    let len = html[from..].find(";\n").expect("map terminated");
    serde_json::from_str(&html[from..from + len]).expect("map is JSON")
}

#[test]
fn knight_scenario() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "player1.png", b"knight");
    write(dir.path(), "enemies/goblin.jpg", b"goblin");
    write(dir.path(), "sfx/sword.mp3", b"swish");
    write(dir.path(), "bgm.wav", b"loop");

    let out = pack_dir(dir.path(), &PackOptions::default()).unwrap();
    assert_eq!(out.bundle.summary(), "Found 2 images and 2 audio files.");

    let images = out.bundle.images().names().collect::<Vec<_>>();
    let audio = out.bundle.audio().names().collect::<Vec<_>>();
    assert_eq!(images, ["player1", "goblin"]);
    assert_eq!(audio, ["bgm", "sword"]);
    assert!(out.html.contains(r#"const imageAssets = {"player1":"#));

    let images = embedded_map(&out.html, "imageAssets");
    assert_eq!(embedded_map(&out.html, "audioAssets").len(), 2);
    assert_eq!(
        images["goblin"].as_str().unwrap(),
        "data:image/jpg;base64,Z29ibGlu"
    );

    let path = dir.path().join(DEFAULT_OUTPUT);
    write_artifact(&out, &path).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), out.html);

    let summary = game::run_headless(
        &out.bundle,
        &GameTuning::default(),
        InputScript::Idle,
        1,
        0,
    );
    assert_eq!(summary.players, 1);
    assert_eq!(summary.enemies_spawned, 1);
    assert!(summary.music);
}

#[test]
fn every_extension_round_trips_its_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let files: [(&str, AssetKind, &str); 6] = [
        ("a/hero.png", AssetKind::Image, "png"),
        ("a/b/tree.JPG", AssetKind::Image, "jpg"),
        ("sky.jpeg", AssetKind::Image, "jpeg"),
        ("sfx/zap.mp3", AssetKind::Audio, "mp3"),
        ("hit.Wav", AssetKind::Audio, "wav"),
        ("music/theme.ogg", AssetKind::Audio, "ogg"),
    ];
    for (i, (rel, _, _)) in files.iter().enumerate() {
        write(dir.path(), rel, &[i as u8, 0xff, 0x00, b'<']);
    }

    let bundle = scan_dir(dir.path()).unwrap();
    for (i, (rel, kind, subtype)) in files.iter().enumerate() {
        let stem = Path::new(rel).file_stem().unwrap().to_str().unwrap();
        let map = match kind {
            AssetKind::Image => bundle.images(),
            AssetKind::Audio => bundle.audio(),
        };
        let uri = map.get(stem).unwrap_or_else(|| panic!("{rel} missing"));
        let prefix = format!("data:{}/{subtype};base64,", kind.mime_family());
        assert!(uri.to_string().starts_with(&prefix), "{rel}: {uri}");

        let decoded = DataUri::parse(&uri.to_string()).unwrap();
        assert_eq!(decoded.bytes(), [i as u8, 0xff, 0x00, b'<']);
    }
}

#[test]
fn unrecognized_files_are_left_out() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "notes.txt", b"todo");
    write(dir.path(), "anim.gif", b"gif");
    write(dir.path(), "README", b"readme");
    write(dir.path(), ".png", b"hidden");
    write(dir.path(), "index.html", b"<html>");
    write(dir.path(), "goblin.png", b"g");

    let bundle = scan_dir(dir.path()).unwrap();
    assert_eq!(bundle.images().names().collect::<Vec<_>>(), ["goblin"]);
    assert!(bundle.audio().is_empty());
}

#[test]
fn later_file_wins_a_name_collision() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "knight.png", b"root");
    write(dir.path(), "alt/knight.png", b"alt");
    write(dir.path(), "zed/knight.jpeg", b"zed");
    write(dir.path(), "archer.png", b"archer");

    let bundle = scan_dir(dir.path()).unwrap();
    let images = bundle.images();
    assert_eq!(images.names().collect::<Vec<_>>(), ["archer", "knight"]);
    assert_eq!(images.get("knight").unwrap().bytes(), b"zed");
    assert_eq!(images.get("knight").unwrap().subtype(), "jpeg");

    let collisions = bundle.collisions();
    assert_eq!(collisions.len(), 2);
    assert!(collisions[0].replaced.ends_with("knight.png"));
    assert!(collisions[1].kept.ends_with("zed/knight.jpeg"));
    assert!(bundle
        .source(AssetKind::Image, "knight")
        .unwrap()
        .ends_with("zed/knight.jpeg"));
}

#[test]
fn same_stem_in_both_kinds_is_not_a_collision() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "magic.png", b"sprite");
    write(dir.path(), "magic.ogg", b"sound");

    let bundle = scan_dir(dir.path()).unwrap();
    assert!(bundle.images().contains("magic"));
    assert!(bundle.audio().contains("magic"));
    assert!(bundle.collisions().is_empty());
}

#[test]
fn missing_root_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = scan_dir(&dir.path().join("nope")).unwrap_err();
    assert!(matches!(err, PackError::NotADirectory(_)));

    write(dir.path(), "file.png", b"x");
    let err = pack_dir(&dir.path().join("file.png"), &PackOptions::default()).unwrap_err();
    assert!(matches!(err, PackError::NotADirectory(_)));
}

#[test]
fn line_separators_in_names_are_escaped() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "odd\u{2028}name.png", b"x");

    let out = pack_dir(dir.path(), &PackOptions::default()).unwrap();
    assert!(!out.html.contains('\u{2028}'));
    assert!(out.html.contains(r"odd\u2028name"));
    assert!(embedded_map(&out.html, "imageAssets").contains_key("odd\u{2028}name"));
}

#[test]
fn tuning_file_reaches_page_and_model() {
    let dir = tempfile::tempdir().unwrap();
    let tuning_path = dir.path().join("tuning.json");
    fs::write(&tuning_path, r#"{ "enemy_speed": 150, "melee_damage": 50 }"#).unwrap();

    let tuning = GameTuning::load(&tuning_path).unwrap();
    assert_eq!(tuning.enemy_speed, 150.0);
    assert_eq!(tuning.melee_damage, 50);
    assert_eq!(tuning.magic.len(), 4);

    let options = PackOptions {
        tuning,
        ..PackOptions::default()
    };
    let out = pack_dir(dir.path(), &options).unwrap();
    assert!(out.html.contains(r#""enemy_speed":150.0"#));
}

#[cfg(unix)]
#[test]
fn dangling_link_aborts_the_scan() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "goblin.png", b"g");
    std::os::unix::fs::symlink(dir.path().join("missing.png"), dir.path().join("ghost.png"))
        .unwrap();

    match scan_dir(dir.path()) {
        Err(PackError::Io { path, .. }) => assert!(path.ends_with("ghost.png"), "{path:?}"),
        other => panic!("expected an io error, got {other:?}"),
    }
}

#[cfg(unix)]
#[test]
fn links_are_followed_but_not_into_directories() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "art/goblin.png", b"g");
    write(dir.path(), "notes.txt", b"n");
    let link = |target: &str, name: &str| {
        std::os::unix::fs::symlink(dir.path().join(target), dir.path().join(name)).unwrap();
    };
    link("art/goblin.png", "orc.png");
    link("art", "gallery.png");
    link("nowhere.txt", "dangling.txt");

    let bundle = scan_dir(dir.path()).unwrap();
    assert_eq!(bundle.images().names().collect::<Vec<_>>(), ["orc", "goblin"]);
    assert_eq!(bundle.images().get("orc").unwrap().bytes(), b"g");
}
