//! Detailed single-file report used by `mediacat-analyze`.

use std::fmt;

use crate::domain::entry::{format_duration, format_resolution, or_unknown};
use crate::domain::{Entry, MediaDetails};

const RULE_WIDTH: usize = 80;

/// Every known field of one entry, one per line
#[derive(Debug, Clone, Copy)]
pub struct Report<'a>(pub &'a Entry);

fn field(f: &mut fmt::Formatter<'_>, label: &str, value: impl fmt::Display) -> fmt::Result {
    writeln!(f, "{:<13}{}", format!("{}:", label), value)
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entry = self.0;
        let rule = "=".repeat(RULE_WIDTH);

        writeln!(f, "{}", rule)?;
        writeln!(f, "Media report: {}", entry.name)?;
        writeln!(f, "{}", rule)?;
        field(f, "Type", entry.kind())?;
        field(f, "Path", entry.path.display())?;
        field(
            f,
            "Size",
            format!(
                "{} bytes ({:.2} MB)",
                entry.size,
                entry.size as f64 / 1024.0 / 1024.0
            ),
        )?;
        field(f, "Modified", entry.modified_display())?;

        match &entry.details {
            MediaDetails::Audio(meta) => {
                field(f, "Duration", format_duration(meta.duration_secs))?;
                field(f, "Bitrate", or_unknown(meta.bitrate_kbps.map(|b| format!("{} kbps", b))))?;
                field(f, "Channels", or_unknown(meta.channels))?;
                field(f, "Sample rate", or_unknown(meta.sample_rate.map(|r| format!("{} Hz", r))))?;
                field(f, "Title", or_unknown(meta.title.as_deref()))?;
                field(f, "Artist", or_unknown(meta.artist.as_deref()))?;
                field(f, "Album", or_unknown(meta.album.as_deref()))?;
                field(f, "Year", or_unknown(meta.year))?;
                field(f, "Genre", or_unknown(meta.genre.as_deref()))?;
            }
            MediaDetails::Video(meta) => {
                field(f, "Resolution", format_resolution(meta.width, meta.height))?;
                field(f, "Frame rate", or_unknown(meta.fps.map(|fps| format!("{:.2} fps", fps))))?;
                field(f, "Duration", format_duration(meta.duration_secs))?;
                field(f, "Frames", or_unknown(meta.frame_count))?;
                field(f, "Codec", or_unknown(meta.codec.as_deref()))?;
                field(f, "Bitrate", or_unknown(meta.bitrate_kbps.map(|b| format!("{:.0} kbps", b))))?;
            }
            MediaDetails::Image(meta) => {
                field(f, "Resolution", format_resolution(meta.width, meta.height))?;
                field(f, "Format", or_unknown(meta.format.as_deref()))?;
                field(f, "Color mode", or_unknown(meta.color_mode.as_deref()))?;
            }
        }

        writeln!(f, "{}", rule)
    }
}
