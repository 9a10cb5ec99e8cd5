//! Domain types for the media catalog.
//!
//! This module contains the core data structures:
//! - MediaKind: Coarse media category
//! - Entry: One catalogued file with its kind-specific metadata

pub mod entry;
pub mod kind;

// Re-export commonly used types
pub use entry::{AudioMeta, Entry, ImageMeta, MediaDetails, VideoMeta, UNKNOWN};
pub use kind::MediaKind;
