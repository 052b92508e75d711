use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use walkdir::{DirEntry, WalkDir};

use super::{AssetBundle, AssetKind, DataUri};
use crate::error::{PackError, Result};

/// Walk `root` recursively and encode every recognized image and audio file.
///
/// Within a directory, files are visited before subdirectories and both are
/// taken in file-name order, so a stem that appears twice resolves to the
/// file deepest/last in that order. Any unreadable file aborts the scan.
pub fn scan_dir(root: &Path) -> Result<AssetBundle> {
    if !root.is_dir() {
        return Err(PackError::NotADirectory(root.to_path_buf()));
    }

    let mut bundle = AssetBundle::new();
    let walker = WalkDir::new(root).sort_by(files_then_dirs);

    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_dir() {
            continue;
        }
        let path = entry.path();
        let Some((name, ext)) = split_stem(path) else {
            continue;
        };
        let Some(kind) = AssetKind::from_extension(&ext) else {
            log::trace!("skipping {}", path.display());
            continue;
        };

        // Symlinks are resolved but not descended into; a dangling one is
        // an unreadable file.
        let meta = fs::metadata(path).map_err(|e| PackError::io(path, e))?;
        if meta.is_dir() {
            continue;
        }

        let bytes = fs::read(path).map_err(|e| PackError::io(path, e))?;
        log::debug!(
            "{} {} -> '{}' ({} bytes)",
            kind.mime_family(),
            path.display(),
            name,
            bytes.len()
        );

        let uri = DataUri::encode(kind, &ext, bytes);
        if let Some(c) = bundle.insert(name, uri, path) {
            log::warn!(
                "duplicate {} name '{}': {} replaces {}",
                c.kind.mime_family(),
                c.name,
                c.kept.display(),
                c.replaced.display()
            );
        }
    }

    Ok(bundle)
}

fn files_then_dirs(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}

/// Split a file name into (stem, lowercase extension). Only the last
/// extension is stripped; dotfiles such as `.png` have no extension.
fn split_stem(path: &Path) -> Option<(String, String)> {
    let stem = path.file_stem()?.to_string_lossy().into_owned();
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    Some((stem, ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_strips_only_last_extension() {
        assert_eq!(
            split_stem(Path::new("dir/tiles.v2.PNG")),
            Some(("tiles.v2".to_string(), "png".to_string()))
        );
        assert_eq!(split_stem(Path::new(".png")), None);
        assert_eq!(split_stem(Path::new("README")), None);
    }

    #[test]
    fn missing_root_is_rejected() {
        let err = scan_dir(Path::new("/definitely/not/here")).unwrap_err();
        assert!(matches!(err, PackError::NotADirectory(_)));
    }
}
