//! Video stream probing.
//!
//! The default [`FfprobeProbe`] runs the `ffprobe` CLI in subprocess mode
//! and parses its JSON output. Probing is used twice: to decide whether an
//! `.mp4` file carries a picture stream, and to extract video metadata.
//! Attached pictures (embedded cover art) do not count as video streams.

use std::path::Path;
use std::process::Command;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Errors raised while probing a file
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("ffprobe exited with status {status:?}: {stderr}")]
    Failed { status: Option<i32>, stderr: String },

    #[error("unreadable ffprobe output: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("no video stream found")]
    NoVideoStream,

    #[error("probing is disabled")]
    Disabled,
}

/// Properties of the first video stream of a file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamInfo {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub fps: Option<f64>,
    pub frame_count: Option<u64>,
    pub codec: Option<String>,
    pub bitrate_kbps: Option<f64>,
    pub duration_secs: Option<f64>,
}

impl StreamInfo {
    /// True when the stream reports positive frame dimensions
    pub fn has_picture(&self) -> bool {
        matches!((self.width, self.height), (Some(w), Some(h)) if w > 0 && h > 0)
    }
}

/// Trait for video stream probes
pub trait VideoProbe {
    /// Human-readable probe name
    fn name(&self) -> &str;

    /// Open `path` as a video stream and read its properties
    fn probe(&self, path: &Path) -> Result<StreamInfo, ProbeError>;
}

/// Probe backed by the `ffprobe` binary
#[derive(Debug, Clone)]
pub struct FfprobeProbe {
    /// Program name or absolute path (default: "ffprobe")
    program: String,
}

impl Default for FfprobeProbe {
    fn default() -> Self {
        Self::new("ffprobe")
    }
}

impl FfprobeProbe {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl VideoProbe for FfprobeProbe {
    fn name(&self) -> &str {
        "ffprobe"
    }

    fn probe(&self, path: &Path) -> Result<StreamInfo, ProbeError> {
        debug!(program = %self.program, path = %path.display(), "probing video stream");

        let output = Command::new(&self.program)
            .args([
                "-v",
                "error",
                "-select_streams",
                "v",
                "-show_entries",
                "stream=width,height,codec_name,codec_tag,avg_frame_rate,r_frame_rate,bit_rate,nb_frames:stream_disposition=attached_pic:format=duration,bit_rate",
                "-of",
                "json",
            ])
            .arg(path)
            .output()
            .map_err(|source| ProbeError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ProbeError::Failed {
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        parse_ffprobe_json(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Probe that never succeeds; used when probing is switched off
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledProbe;

impl VideoProbe for DisabledProbe {
    fn name(&self) -> &str {
        "disabled"
    }

    fn probe(&self, _path: &Path) -> Result<StreamInfo, ProbeError> {
        Err(ProbeError::Disabled)
    }
}

#[derive(Debug, Default, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    streams: Vec<FfprobeStream>,
    format: Option<FfprobeFormat>,
}

#[derive(Debug, Default, Deserialize)]
struct FfprobeStream {
    width: Option<u32>,
    height: Option<u32>,
    codec_name: Option<String>,
    codec_tag: Option<String>,
    avg_frame_rate: Option<String>,
    r_frame_rate: Option<String>,
    bit_rate: Option<String>,
    nb_frames: Option<String>,
    #[serde(default)]
    disposition: FfprobeDisposition,
}

#[derive(Debug, Default, Deserialize)]
struct FfprobeDisposition {
    #[serde(default)]
    attached_pic: i64,
}

#[derive(Debug, Default, Deserialize)]
struct FfprobeFormat {
    duration: Option<String>,
    bit_rate: Option<String>,
}

/// Parse `ffprobe -of json` output into [`StreamInfo`]
pub fn parse_ffprobe_json(json: &str) -> Result<StreamInfo, ProbeError> {
    let parsed: FfprobeOutput = serde_json::from_str(json)?;
    let stream = parsed
        .streams
        .into_iter()
        .find(|stream| stream.disposition.attached_pic != 1)
        .ok_or(ProbeError::NoVideoStream)?;
    let format = parsed.format.unwrap_or_default();

    let fps = stream
        .avg_frame_rate
        .as_deref()
        .and_then(parse_rate)
        .or_else(|| stream.r_frame_rate.as_deref().and_then(parse_rate));

    let container_duration = format.duration.as_deref().and_then(parse_positive);
    let frame_count = stream
        .nb_frames
        .as_deref()
        .and_then(|n| n.trim().parse::<u64>().ok())
        .filter(|&n| n > 0)
        .or_else(|| match (container_duration, fps) {
            (Some(d), Some(fps)) => Some((d * fps).round() as u64),
            _ => None,
        });

    let duration_secs = container_duration.or_else(|| match (frame_count, fps) {
        (Some(frames), Some(fps)) => Some(frames as f64 / fps),
        _ => None,
    });

    let bitrate_kbps = stream
        .bit_rate
        .as_deref()
        .and_then(parse_positive)
        .or_else(|| format.bit_rate.as_deref().and_then(parse_positive))
        .map(|bps| bps / 1000.0);

    let codec = stream
        .codec_tag
        .as_deref()
        .and_then(fourcc)
        .or(stream.codec_name);

    Ok(StreamInfo {
        width: stream.width,
        height: stream.height,
        fps,
        frame_count,
        codec,
        bitrate_kbps,
        duration_secs,
    })
}

fn parse_positive(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| *v > 0.0)
}

/// Parse an ffprobe rational such as `30000/1001`
fn parse_rate(rate: &str) -> Option<f64> {
    let (num, den) = rate.split_once('/')?;
    let num: f64 = num.trim().parse().ok()?;
    let den: f64 = den.trim().parse().ok()?;
    if den == 0.0 {
        return None;
    }
    Some(num / den).filter(|fps| *fps > 0.0)
}

/// Decode a numeric codec tag (`0x31637661`) into its four characters
fn fourcc(tag: &str) -> Option<String> {
    let value = u32::from_str_radix(tag.trim().trim_start_matches("0x"), 16).ok()?;
    if value == 0 {
        return None;
    }
    let bytes = value.to_le_bytes();
    if !bytes.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
        return None;
    }
    Some(bytes.iter().map(|&b| b as char).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const H264_MP4: &str = r#"{
        "programs": [],
        "streams": [{
            "width": 1280,
            "height": 720,
            "codec_name": "h264",
            "codec_tag": "0x31637661",
            "r_frame_rate": "30/1",
            "avg_frame_rate": "30000/1001",
            "bit_rate": "2500000",
            "nb_frames": "600"
        }],
        "format": { "duration": "20.020000", "bit_rate": "2650000" }
    }"#;

    #[test]
    fn test_parse_full_stream() {
        let info = parse_ffprobe_json(H264_MP4).unwrap();
        assert_eq!(info.width, Some(1280));
        assert_eq!(info.height, Some(720));
        assert!((info.fps.unwrap() - 29.97).abs() < 0.01);
        assert_eq!(info.frame_count, Some(600));
        assert_eq!(info.codec.as_deref(), Some("avc1"));
        assert_eq!(info.bitrate_kbps, Some(2500.0));
        assert_eq!(info.duration_secs, Some(20.02));
        assert!(info.has_picture());
    }

    #[test]
    fn test_parse_falls_back_to_codec_name_and_container_bitrate() {
        let json = r#"{
            "streams": [{
                "width": 640,
                "height": 360,
                "codec_name": "vp9",
                "codec_tag": "0x0000",
                "avg_frame_rate": "0/0",
                "r_frame_rate": "25/1"
            }],
            "format": { "duration": "4.0", "bit_rate": "800000" }
        }"#;
        let info = parse_ffprobe_json(json).unwrap();
        assert_eq!(info.codec.as_deref(), Some("vp9"));
        assert_eq!(info.fps, Some(25.0));
        assert_eq!(info.frame_count, Some(100));
        assert_eq!(info.bitrate_kbps, Some(800.0));
    }

    #[test]
    fn test_duration_derived_from_frames() {
        let json = r#"{
            "streams": [{ "width": 2, "height": 2, "avg_frame_rate": "10/1", "nb_frames": "50" }]
        }"#;
        let info = parse_ffprobe_json(json).unwrap();
        assert_eq!(info.duration_secs, Some(5.0));
    }

    #[test]
    fn test_no_streams_is_an_error() {
        let err = parse_ffprobe_json(r#"{"streams": [], "format": {}}"#).unwrap_err();
        assert!(matches!(err, ProbeError::NoVideoStream));
    }

    #[test]
    fn test_cover_art_is_not_a_video_stream() {
        let json = r#"{
            "streams": [{
                "width": 600,
                "height": 600,
                "codec_name": "mjpeg",
                "disposition": { "attached_pic": 1 }
            }],
            "format": { "duration": "212.4", "bit_rate": "256000" }
        }"#;
        let err = parse_ffprobe_json(json).unwrap_err();
        assert!(matches!(err, ProbeError::NoVideoStream));
    }

    #[test]
    fn test_cover_art_is_skipped_for_the_real_stream() {
        let json = r#"{
            "streams": [
                { "width": 500, "height": 500, "codec_name": "png", "disposition": { "attached_pic": 1 } },
                { "width": 1920, "height": 1080, "codec_name": "h264", "avg_frame_rate": "24/1",
                  "disposition": { "default": 1, "attached_pic": 0 } }
            ],
            "format": { "duration": "10.0" }
        }"#;
        let info = parse_ffprobe_json(json).unwrap();
        assert_eq!(info.width, Some(1920));
        assert_eq!(info.codec.as_deref(), Some("h264"));
        assert!(info.has_picture());
    }

    #[test]
    fn test_zero_dimensions_have_no_picture() {
        let info = StreamInfo {
            width: Some(0),
            height: Some(0),
            ..Default::default()
        };
        assert!(!info.has_picture());
    }

    #[test]
    fn test_missing_binary_is_a_spawn_error() {
        let probe = FfprobeProbe::new("mediacat-no-such-ffprobe");
        let err = probe.probe(Path::new("clip.mp4")).unwrap_err();
        assert!(matches!(err, ProbeError::Spawn { .. }));
    }
}
