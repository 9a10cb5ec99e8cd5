//! Catalog entries.
//!
//! An [`Entry`] is the common envelope (path, name, size, mtime) around a
//! kind-specific [`MediaDetails`] payload. Every metadata field is optional:
//! extraction failures leave fields empty and they render as `unknown`.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Local};
use serde::Serialize;

use super::kind::MediaKind;

/// Placeholder for absent metadata
pub const UNKNOWN: &str = "unknown";

/// Timestamp format used for modification times
pub const MODIFIED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One catalogued file
#[derive(Debug, Clone, Serialize)]
pub struct Entry {
    /// Path exactly as given to `ADD`
    pub path: PathBuf,

    /// File name component of the path
    pub name: String,

    /// Size in bytes
    pub size: u64,

    /// Last modification time (local)
    pub modified: DateTime<Local>,

    /// Kind-specific metadata
    pub details: MediaDetails,
}

impl Entry {
    /// Kind discriminator, derived from the payload
    pub fn kind(&self) -> MediaKind {
        self.details.kind()
    }

    /// Modification time as `YYYY-MM-DD HH:MM:SS`
    pub fn modified_display(&self) -> String {
        self.modified.format(MODIFIED_FORMAT).to_string()
    }
}

/// Kind-specific payload of an entry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MediaDetails {
    Audio(AudioMeta),
    Video(VideoMeta),
    Image(ImageMeta),
}

impl MediaDetails {
    pub fn kind(&self) -> MediaKind {
        match self {
            MediaDetails::Audio(_) => MediaKind::Audio,
            MediaDetails::Video(_) => MediaKind::Video,
            MediaDetails::Image(_) => MediaKind::Image,
        }
    }
}

/// Audio stream properties and tags
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AudioMeta {
    pub bitrate_kbps: Option<u32>,
    pub duration_secs: Option<f64>,
    pub channels: Option<u8>,
    pub sample_rate: Option<u32>,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub year: Option<u32>,
    pub genre: Option<String>,
}

/// Properties of the first video stream
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VideoMeta {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub fps: Option<f64>,
    pub duration_secs: Option<f64>,
    pub frame_count: Option<u64>,
    /// Four-character codec tag (e.g. `avc1`)
    pub codec: Option<String>,
    pub bitrate_kbps: Option<f64>,
}

/// Image header properties
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImageMeta {
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Upper-case format name (e.g. `PNG`)
    pub format: Option<String>,
    /// Pixel layout name (e.g. `RGB`, `RGBA`, `L`)
    pub color_mode: Option<String>,
}

/// Render an optional value, falling back to `unknown`
pub fn or_unknown<T: fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| UNKNOWN.to_string(), |v| v.to_string())
}

/// `m:ss`, or `unknown`
pub fn format_duration(secs: Option<f64>) -> String {
    match secs {
        Some(secs) if secs > 0.0 => {
            let total = secs as u64;
            format!("{}:{:02}", total / 60, total % 60)
        }
        _ => UNKNOWN.to_string(),
    }
}

/// `WxH`, or `unknown` unless both sides are known and non-zero
pub fn format_resolution(width: Option<u32>, height: Option<u32>) -> String {
    match (width, height) {
        (Some(w), Some(h)) if w > 0 && h > 0 => format!("{}x{}", w, h),
        _ => UNKNOWN.to_string(),
    }
}

fn megabytes(size: u64) -> f64 {
    size as f64 / 1024.0 / 1024.0
}

fn kilobytes(size: u64) -> f64 {
    size as f64 / 1024.0
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.details {
            MediaDetails::Audio(meta) => write!(
                f,
                "Audio: {} | Duration: {} | Bitrate: {} | Size: {:.2} MB | Modified: {}",
                self.name,
                format_duration(meta.duration_secs),
                or_unknown(meta.bitrate_kbps.map(|b| format!("{} kbps", b))),
                megabytes(self.size),
                self.modified_display(),
            ),
            MediaDetails::Video(meta) => write!(
                f,
                "Video: {} | Resolution: {} | Frame rate: {} | Duration: {} | Size: {:.2} MB | Modified: {}",
                self.name,
                format_resolution(meta.width, meta.height),
                or_unknown(meta.fps.map(|fps| format!("{:.2} fps", fps))),
                format_duration(meta.duration_secs),
                megabytes(self.size),
                self.modified_display(),
            ),
            MediaDetails::Image(meta) => write!(
                f,
                "Image: {} | Resolution: {} | Format: {} | Size: {:.2} KB | Modified: {}",
                self.name,
                format_resolution(meta.width, meta.height),
                or_unknown(meta.format.as_deref()),
                kilobytes(self.size),
                self.modified_display(),
            ),
        }
    }
}
