//! Audio metadata via `lofty`.

use std::path::Path;

use lofty::error::LoftyError;
use lofty::file::{AudioFile, TaggedFileExt};
use lofty::tag::{Accessor, ItemKey};
use tracing::warn;

use crate::domain::AudioMeta;

/// Read stream properties and tags; any failure yields empty metadata
pub fn read_audio(path: &Path) -> AudioMeta {
    match try_read_audio(path) {
        Ok(meta) => meta,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "audio metadata unavailable");
            AudioMeta::default()
        }
    }
}

fn try_read_audio(path: &Path) -> Result<AudioMeta, LoftyError> {
    let tagged_file = lofty::read_from_path(path)?;
    let properties = tagged_file.properties();

    let duration = properties.duration().as_secs_f64();
    let mut meta = AudioMeta {
        bitrate_kbps: properties
            .audio_bitrate()
            .or_else(|| properties.overall_bitrate())
            .filter(|b| *b > 0),
        duration_secs: (duration > 0.0).then_some(duration),
        channels: properties.channels().filter(|c| *c > 0),
        sample_rate: properties.sample_rate().filter(|r| *r > 0),
        ..Default::default()
    };

    // Primary tag first, then whatever tag the container carries
    if let Some(tag) = tagged_file.primary_tag().or_else(|| tagged_file.first_tag()) {
        meta.title = non_empty(tag.title().as_deref());
        meta.artist = non_empty(tag.artist().as_deref());
        meta.album = non_empty(tag.album().as_deref());
        meta.genre = non_empty(tag.genre().as_deref());
        meta.year = tag
            .get_string(&ItemKey::Year)
            .or_else(|| tag.get_string(&ItemKey::RecordingDate))
            .and_then(parse_year);
    }

    Ok(meta)
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Leading four digits of a year or ISO date (`2019`, `2019-05-01`)
fn parse_year(value: &str) -> Option<u32> {
    let digits: String = value.trim().chars().take_while(char::is_ascii_digit).collect();
    if digits.len() < 4 {
        return None;
    }
    digits[..4].parse().ok().filter(|y| *y > 0)
}
