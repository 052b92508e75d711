use std::fmt;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Serialize, Serializer};

use super::AssetKind;

/// Inline-encoded resource: raw bytes plus a declared media type.
///
/// Renders as `data:<kind>/<subtype>;base64,<payload>`. The subtype is the
/// lowercase file extension exactly as found on disk, so `.jpg` stays
/// `image/jpg` rather than the canonical `image/jpeg`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    kind: AssetKind,
    subtype: String,
    bytes: Vec<u8>,
}

impl DataUri {
    pub fn encode(kind: AssetKind, subtype: &str, bytes: Vec<u8>) -> Self {
        Self {
            kind,
            subtype: subtype.trim_start_matches('.').to_ascii_lowercase(),
            bytes,
        }
    }

    /// Parse a rendered `data:` URI back into its parts.
    ///
    /// Only the two media families this crate produces are accepted.
    pub fn parse(text: &str) -> Option<Self> {
        let rest = text.strip_prefix("data:")?;
        let (mime, payload) = rest.split_once(";base64,")?;
        let (family, subtype) = mime.split_once('/')?;
        let kind = AssetKind::from_mime_family(family)?;
        let bytes = BASE64.decode(payload).ok()?;
        Some(Self {
            kind,
            subtype: subtype.to_string(),
            bytes,
        })
    }

    pub fn kind(&self) -> AssetKind {
        self.kind
    }

    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime(&self) -> String {
        format!("{}/{}", self.kind.mime_family(), self.subtype)
    }

    /// Length of the rendered URI without building it.
    pub fn encoded_len(&self) -> usize {
        "data:;base64,".len() + self.mime().len() + self.bytes.len().div_ceil(3) * 4
    }
}

impl fmt::Display for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data:{};base64,{}", self.mime(), BASE64.encode(&self.bytes))
    }
}

impl Serialize for DataUri {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
