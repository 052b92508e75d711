//! Asset discovery and encoding.
//!
//! - `data_uri` — base64 `data:` URI encoding and parsing
//! - `scan` — directory walk that builds an [`AssetBundle`]

mod data_uri;
mod scan;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

pub use data_uri::DataUri;
pub use scan::scan_dir;

/// Media family an asset is classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Image,
    Audio,
}

impl AssetKind {
    pub const IMAGE_EXTENSIONS: [&'static str; 3] = ["png", "jpg", "jpeg"];
    pub const AUDIO_EXTENSIONS: [&'static str; 3] = ["mp3", "wav", "ogg"];

    /// Classify a file extension (without the dot), ignoring case.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_ascii_lowercase();
        if Self::IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Image)
        } else if Self::AUDIO_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Audio)
        } else {
            None
        }
    }

    pub fn mime_family(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Audio => "audio",
        }
    }

    pub(crate) fn from_mime_family(family: &str) -> Option<Self> {
        match family {
            "image" => Some(Self::Image),
            "audio" => Some(Self::Audio),
            _ => None,
        }
    }
}

/// Name-keyed collection of inline-encoded resources.
///
/// Iterates in first-insertion order. Inserting an existing name replaces
/// the resource but keeps the name where it was first seen.
#[derive(Debug, Clone, Default)]
pub struct AssetMap {
    entries: Vec<(String, DataUri)>,
    index: HashMap<String, usize>,
}

impl AssetMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entry, returning the replaced resource.
    pub fn insert(&mut self, name: impl Into<String>, uri: DataUri) -> Option<DataUri> {
        let name = name.into();
        match self.index.get(&name) {
            Some(&i) => Some(std::mem::replace(&mut self.entries[i].1, uri)),
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, uri));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&DataUri> {
        self.index.get(name).map(|&i| &self.entries[i].1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DataUri)> {
        self.entries.iter().map(|(name, uri)| (name.as_str(), uri))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for AssetMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, uri) in &self.entries {
            map.serialize_entry(name, uri)?;
        }
        map.end()
    }
}

/// Two files in one category that produced the same asset name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetCollision {
    pub kind: AssetKind,
    pub name: String,
    /// File whose content ended up in the map (visited later).
    pub kept: PathBuf,
    /// File whose content was overwritten.
    pub replaced: PathBuf,
}

/// One row of [`AssetBundle::listing`].
#[derive(Debug, Clone, Serialize)]
pub struct AssetEntry {
    pub name: String,
    pub kind: AssetKind,
    pub mime: String,
    pub bytes: usize,
    /// Length of the `data:` URI embedded in the page.
    pub encoded: usize,
    pub source: Option<PathBuf>,
}

/// Everything one packaging run produced: the image map, the audio map, and
/// any name collisions resolved along the way.
#[derive(Debug, Clone, Default)]
pub struct AssetBundle {
    images: AssetMap,
    audio: AssetMap,
    collisions: Vec<AssetCollision>,
    sources: HashMap<(AssetKind, String), PathBuf>,
}

impl AssetBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource read from `source`. Later insertions win; a replaced
    /// entry is recorded and returned as a collision.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        uri: DataUri,
        source: &Path,
    ) -> Option<AssetCollision> {
        let name = name.into();
        let kind = uri.kind();
        let map = match kind {
            AssetKind::Image => &mut self.images,
            AssetKind::Audio => &mut self.audio,
        };
        let previous = self
            .sources
            .insert((kind, name.clone()), source.to_path_buf());
        map.insert(name.clone(), uri)?;

        let collision = AssetCollision {
            kind,
            name,
            kept: source.to_path_buf(),
            replaced: previous.unwrap_or_default(),
        };
        self.collisions.push(collision.clone());
        Some(collision)
    }

    pub fn images(&self) -> &AssetMap {
        &self.images
    }

    pub fn audio(&self) -> &AssetMap {
        &self.audio
    }

    pub fn collisions(&self) -> &[AssetCollision] {
        &self.collisions
    }

    /// Path the named asset was read from, if it came from disk.
    pub fn source(&self, kind: AssetKind, name: &str) -> Option<&Path> {
        self.sources
            .get(&(kind, name.to_string()))
            .map(PathBuf::as_path)
    }

    /// Human-readable asset count line.
    pub fn summary(&self) -> String {
        format!(
            "Found {} images and {} audio files.",
            self.images.len(),
            self.audio.len()
        )
    }

    /// Flat description of every asset, images first.
    pub fn listing(&self) -> Vec<AssetEntry> {
        self.images
            .iter()
            .chain(self.audio.iter())
            .map(|(name, uri)| AssetEntry {
                name: name.to_string(),
                kind: uri.kind(),
                mime: uri.mime(),
                bytes: uri.bytes().len(),
                encoded: uri.encoded_len(),
                source: self.source(uri.kind(), name).map(Path::to_path_buf),
            })
            .collect()
    }
}
