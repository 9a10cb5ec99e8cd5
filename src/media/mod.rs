//! Media inspection: classification and metadata extraction.
//!
//! [`Inspector`] turns a path into a catalog [`Entry`]:
//! - classify by extension (`mp4` is probed for a video stream)
//! - read filesystem attributes (name, size, mtime)
//! - run the extractor for the detected kind
//!
//! Extractors never fail: unreadable metadata leaves fields empty.

pub mod audio;
pub mod classify;
pub mod imaging;
pub mod probe;
pub mod video;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use thiserror::Error;
use tracing::debug;

use crate::config::ResolvedConfig;
use crate::domain::{Entry, MediaDetails, MediaKind, VideoMeta};

pub use classify::{extension_of, ExtensionSets, PROBED_EXTENSION};
pub use probe::{DisabledProbe, FfprobeProbe, ProbeError, StreamInfo, VideoProbe};

/// Errors that keep a file out of the catalog
#[derive(Debug, Error)]
pub enum InspectError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("unsupported file format: {}", .0.display())]
    Unsupported(PathBuf),

    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Classifies files and extracts their metadata
pub struct Inspector {
    extensions: ExtensionSets,
    probe: Box<dyn VideoProbe>,
}

impl Default for Inspector {
    fn default() -> Self {
        Self::new(ExtensionSets::default(), Box::new(FfprobeProbe::default()))
    }
}

impl fmt::Debug for Inspector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inspector")
            .field("extensions", &self.extensions)
            .field("probe", &self.probe.name())
            .finish()
    }
}

impl Inspector {
    pub fn new(extensions: ExtensionSets, probe: Box<dyn VideoProbe>) -> Self {
        Self { extensions, probe }
    }

    /// Built-in extension sets with a custom probe
    pub fn with_probe(probe: impl VideoProbe + 'static) -> Self {
        Self::new(ExtensionSets::default(), Box::new(probe))
    }

    /// Inspector configured from resolved settings
    pub fn from_config(config: &ResolvedConfig) -> Self {
        let extensions = ExtensionSets::with_extras(&config.extensions);
        let probe: Box<dyn VideoProbe> = if config.probe.enabled {
            Box::new(FfprobeProbe::new(config.probe.ffprobe.clone()))
        } else {
            Box::new(DisabledProbe)
        };
        Self::new(extensions, probe)
    }

    /// Detect the kind of `path`; `None` means unknown
    pub fn classify(&self, path: &Path) -> Option<MediaKind> {
        self.detect(path).map(|(kind, _)| kind)
    }

    /// Build a catalog entry for `path`
    pub fn inspect(&self, path: &Path) -> Result<Entry, InspectError> {
        if !path.exists() {
            return Err(InspectError::NotFound(path.to_path_buf()));
        }

        let io_err = |source| InspectError::Io {
            path: path.to_path_buf(),
            source,
        };
        let metadata = fs::metadata(path).map_err(io_err)?;
        let modified: DateTime<Local> = metadata.modified().map_err(io_err)?.into();

        let (kind, stream) = self
            .detect(path)
            .ok_or_else(|| InspectError::Unsupported(path.to_path_buf()))?;

        let details = match kind {
            MediaKind::Audio => MediaDetails::Audio(audio::read_audio(path)),
            MediaKind::Video => MediaDetails::Video(match stream {
                Some(info) => VideoMeta::from(info),
                None => video::read_video(path, self.probe.as_ref()),
            }),
            MediaKind::Image => MediaDetails::Image(imaging::read_image(path)),
        };

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        debug!(path = %path.display(), %kind, size = metadata.len(), "inspected file");

        Ok(Entry {
            path: path.to_path_buf(),
            name,
            size: metadata.len(),
            modified,
            details,
        })
    }

    /// Kind plus the probe result when one was needed to decide it
    fn detect(&self, path: &Path) -> Option<(MediaKind, Option<StreamInfo>)> {
        let ext = extension_of(path)?;
        if ext != PROBED_EXTENSION {
            return self.extensions.lookup(&ext).map(|kind| (kind, None));
        }

        match self.probe.probe(path) {
            Ok(info) if info.has_picture() => Some((MediaKind::Video, Some(info))),
            Ok(_) => {
                debug!(path = %path.display(), "mp4 has no picture stream, treating as audio");
                Some((MediaKind::Audio, None))
            }
            Err(e) => {
                debug!(path = %path.display(), error = %e, "mp4 probe inconclusive, treating as audio");
                Some((MediaKind::Audio, None))
            }
        }
    }
}
