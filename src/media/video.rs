//! Video metadata from a [`VideoProbe`].

use std::path::Path;

use tracing::warn;

use super::probe::{StreamInfo, VideoProbe};
use crate::domain::VideoMeta;

/// Probe the first video stream; any failure yields empty metadata
pub fn read_video(path: &Path, probe: &dyn VideoProbe) -> VideoMeta {
    match probe.probe(path) {
        Ok(info) => VideoMeta::from(info),
        Err(e) => {
            warn!(
                path = %path.display(),
                probe = probe.name(),
                error = %e,
                "video metadata unavailable"
            );
            VideoMeta::default()
        }
    }
}

impl From<StreamInfo> for VideoMeta {
    fn from(info: StreamInfo) -> Self {
        Self {
            width: info.width.filter(|w| *w > 0),
            height: info.height.filter(|h| *h > 0),
            fps: info.fps,
            duration_secs: info.duration_secs,
            frame_count: info.frame_count,
            codec: info.codec,
            bitrate_kbps: info.bitrate_kbps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::probe::DisabledProbe;

    #[test]
    fn test_failed_probe_degrades_to_empty_metadata() {
        let meta = read_video(Path::new("missing.mkv"), &DisabledProbe);
        assert_eq!(meta, VideoMeta::default());
    }

    #[test]
    fn test_zero_dimensions_are_dropped() {
        let meta = VideoMeta::from(StreamInfo {
            width: Some(0),
            height: Some(480),
            fps: Some(25.0),
            ..Default::default()
        });
        assert_eq!(meta.width, None);
        assert_eq!(meta.height, Some(480));
        assert_eq!(meta.fps, Some(25.0));
    }
}
