//! Coarse media categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Coarse media category of a catalogued file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    /// Audio-only file (tags + stream properties)
    Audio,

    /// Video file (stream probed)
    Video,

    /// Still image
    Image,
}

impl MediaKind {
    /// All kinds, in display order
    pub const ALL: [MediaKind; 3] = [MediaKind::Audio, MediaKind::Video, MediaKind::Image];

    /// Lower-case name used in conditions and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Audio => "audio",
            MediaKind::Video => "video",
            MediaKind::Image => "image",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "audio" => Ok(MediaKind::Audio),
            "video" => Ok(MediaKind::Video),
            "image" => Ok(MediaKind::Image),
            _ => anyhow::bail!("Unknown media kind: {}", s),
        }
    }
}
