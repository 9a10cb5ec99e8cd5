//! mediacat - script-driven catalog of multimedia files
//!
//! Classifies audio, video and image files, extracts basic metadata through
//! external libraries, and keeps them in an in-memory catalog driven by a
//! tiny command script.
//!
//! # Architecture
//!
//! - Classification is an extension lookup; `.mp4` is probed for a picture
//!   stream to tell video from audio-only files
//! - Metadata comes from `lofty` (audio), `image` (images) and `ffprobe`
//!   (video); extraction failures degrade to unknown fields
//! - The catalog keeps insertion order and removes entries by condition
//!
//! # Modules
//!
//! - `cli`: Command-line interfaces (script runner, single-file analyzer)
//! - `config`: YAML configuration discovery and loading
//! - `domain`: Data structures (MediaKind, Entry)
//! - `library`: Catalog container and removal conditions
//! - `media`: Classification, probing and metadata extraction
//! - `report`: Detailed single-file report
//! - `script`: Command script interpreter
//!
//! # Usage
//!
//! ```bash
//! # Run a command script
//! mediacat commands.txt
//!
//! # Analyze one file
//! mediacat-analyze holiday.mp4
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod library;
pub mod media;
pub mod report;
pub mod script;

// Re-export main types at crate root for convenience
pub use domain::{AudioMeta, Entry, ImageMeta, MediaDetails, MediaKind, VideoMeta};
pub use library::{Catalog, Condition, ConditionError};
pub use media::{InspectError, Inspector, StreamInfo, VideoProbe};
pub use script::Interpreter;
