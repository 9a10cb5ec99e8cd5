//! Extension-based media classification.
//!
//! Extensions are compared lower-case without the leading dot. `mp4` is not
//! in any set: it is disambiguated by probing for a video stream.

use std::collections::HashSet;
use std::path::Path;

use tracing::debug;

use crate::config::ExtensionsConfig;
use crate::domain::MediaKind;

/// Built-in audio extensions
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "flac", "m4a", "aac", "ogg", "wma"];

/// Built-in video extensions (excluding `mp4`)
pub const VIDEO_EXTENSIONS: &[&str] = &[
    "avi", "mkv", "mov", "wmv", "flv", "webm", "m4v", "mpg", "mpeg",
];

/// Built-in image extensions
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "tiff", "tif", "webp"];

/// Extension resolved by probing instead of lookup
pub const PROBED_EXTENSION: &str = "mp4";

/// Lower-case extension of `path`, without the dot
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// The three extension sets used for lookup
#[derive(Debug, Clone)]
pub struct ExtensionSets {
    audio: HashSet<String>,
    video: HashSet<String>,
    image: HashSet<String>,
}

impl Default for ExtensionSets {
    fn default() -> Self {
        Self {
            audio: to_set(AUDIO_EXTENSIONS),
            video: to_set(VIDEO_EXTENSIONS),
            image: to_set(IMAGE_EXTENSIONS),
        }
    }
}

impl ExtensionSets {
    /// Built-in sets extended with the configured extras
    ///
    /// Extras never override an existing mapping or the probed extension.
    pub fn with_extras(extras: &ExtensionsConfig) -> Self {
        let mut sets = Self::default();
        for (kind, list) in [
            (MediaKind::Audio, &extras.audio),
            (MediaKind::Video, &extras.video),
            (MediaKind::Image, &extras.image),
        ] {
            for raw in list {
                let ext = normalize(raw);
                if ext.is_empty() || ext == PROBED_EXTENSION || sets.lookup(&ext).is_some() {
                    debug!(extension = %ext, "ignoring configured extension");
                    continue;
                }
                sets.set_mut(kind).insert(ext);
            }
        }
        sets
    }

    /// Kind for a normalized extension, if any set contains it
    pub fn lookup(&self, ext: &str) -> Option<MediaKind> {
        if self.audio.contains(ext) {
            Some(MediaKind::Audio)
        } else if self.video.contains(ext) {
            Some(MediaKind::Video)
        } else if self.image.contains(ext) {
            Some(MediaKind::Image)
        } else {
            None
        }
    }

    fn set_mut(&mut self, kind: MediaKind) -> &mut HashSet<String> {
        match kind {
            MediaKind::Audio => &mut self.audio,
            MediaKind::Video => &mut self.video,
            MediaKind::Image => &mut self.image,
        }
    }
}

fn to_set(exts: &[&str]) -> HashSet<String> {
    exts.iter().map(|e| e.to_string()).collect()
}

fn normalize(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_lowercase()
}
