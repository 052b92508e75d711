pub mod assets;
pub mod error;
pub mod game;
pub mod runtime;
pub mod server;

use std::fs;
use std::path::Path;

use assets::AssetBundle;
use error::{PackError, Result};
use game::GameTuning;

/// File name the artifact is written to by default.
pub const DEFAULT_OUTPUT: &str = "index.html";

/// Everything that shapes the generated page besides the assets.
#[derive(Debug, Clone)]
pub struct PackOptions {
    pub title: String,
    pub tuning: GameTuning,
}

impl Default for PackOptions {
    fn default() -> Self {
        Self {
            title: runtime::DEFAULT_TITLE.to_string(),
            tuning: GameTuning::default(),
        }
    }
}

/// Result of packing a directory: the discovered assets and the page.
#[derive(Debug, Clone)]
pub struct PackOutput {
    pub bundle: AssetBundle,
    pub html: String,
}

/// Scan `root` and render the self-contained page.
pub fn pack_dir(root: &Path, options: &PackOptions) -> Result<PackOutput> {
    let bundle = assets::scan_dir(root)?;
    let html = runtime::wrap_html(&bundle, &options.tuning, &options.title);
    Ok(PackOutput { bundle, html })
}

/// Write the page to `path`, replacing any previous artifact.
pub fn write_artifact(output: &PackOutput, path: &Path) -> Result<()> {
    fs::write(path, &output.html).map_err(|e| PackError::io(path, e))
}

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn pack_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        let out = pack_dir(dir.path(), &PackOptions::default()).expect("pack should succeed");
        assert_eq!(out.bundle.summary(), "Found 0 images and 0 audio files.");
        assert!(out.html.contains("const imageAssets = {};"));
        assert!(out.html.contains("const audioAssets = {};"));
    }

    #[test]
    fn custom_title_and_tuning_reach_page() {
        let dir = tempfile::tempdir().unwrap();
        let options = PackOptions {
            title: "Keep Siege".to_string(),
            tuning: GameTuning {
                melee_radius: 64.0,
                ..GameTuning::default()
            },
        };
        let out = pack_dir(dir.path(), &options).unwrap();
        assert!(out.html.contains("<title>Keep Siege</title>"));
        assert!(out.html.contains(r#""melee_radius":64.0"#));
    }

    #[test]
    fn write_artifact_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let out = pack_dir(dir.path(), &PackOptions::default()).unwrap();
        let path = dir.path().join(DEFAULT_OUTPUT);
        write_artifact(&out, &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), out.html);
    }

    #[test]
    fn write_artifact_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let out = pack_dir(dir.path(), &PackOptions::default()).unwrap();
        let err = write_artifact(&out, &dir.path().join("no/such/index.html")).unwrap_err();
        assert!(matches!(err, PackError::Io { .. }));
    }
}
