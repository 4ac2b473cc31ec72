//! Attachment presentation resolution.
//!
//! [`resolve`] turns one [`AttachmentDescriptor`] into a [`RenderPlan`]: a
//! tagged description of which presentation variant the UI should use and
//! the fully-resolved fields that variant needs. It is a pure function —
//! no I/O, no shared state, no error path. Every input, however malformed,
//! yields a displayable plan.

use serde::{Deserialize, Serialize};

use crate::i18n;
use crate::model::attachment::{AttachmentDescriptor, AttachmentKind};

/// MIME type offered to a playback element as one `<source>` candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MimeCandidate {
    #[serde(rename = "audio/ogg")]
    OggAudio,
    #[serde(rename = "audio/mpeg")]
    MpegAudio,
    #[serde(rename = "audio/wav")]
    WavAudio,
    #[serde(rename = "video/mp4")]
    Mp4Video,
}

impl MimeCandidate {
    /// The MIME type string for the playback element.
    pub fn mime(self) -> &'static str {
        match self {
            Self::OggAudio => "audio/ogg",
            Self::MpegAudio => "audio/mpeg",
            Self::WavAudio => "audio/wav",
            Self::Mp4Video => "video/mp4",
        }
    }
}

/// Source candidates for audio playback. The order is fixed: the playback
/// element probes them front to back and plays the first supported one.
pub const AUDIO_SOURCE_CANDIDATES: [MimeCandidate; 3] = [
    MimeCandidate::OggAudio,
    MimeCandidate::MpegAudio,
    MimeCandidate::WavAudio,
];

/// Source candidates for video playback.
pub const VIDEO_SOURCE_CANDIDATES: [MimeCandidate; 1] = [MimeCandidate::Mp4Video];

/// Fully-resolved, UI-agnostic instruction for presenting one attachment.
///
/// Exactly one variant is produced per descriptor. Label fields are present
/// only when the corresponding raw value was a defined, positive number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "lowercase")]
pub enum RenderPlan {
    /// The media has no URL yet. Takes precedence over every kind rule.
    Unavailable { reason: String },

    /// Inline image, opened full-resolution on click.
    Image {
        url: String,
        alt_text: String,
        clickable_fullscreen: bool,
    },

    /// Audio player with ordered source candidates.
    Audio {
        url: String,
        mime_candidates: Vec<MimeCandidate>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        duration_label: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        size_label: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        download_filename: Option<String>,
    },

    /// Video player with ordered source candidates.
    Video {
        url: String,
        mime_candidates: Vec<MimeCandidate>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        duration_label: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        size_label: Option<String>,
    },

    /// Download link for a document.
    Document {
        url: String,
        display_name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        size_label: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        download_filename: Option<String>,
    },

    /// Plain-text stand-in for unrecognized attachment kinds.
    Fallback { text: String },
}

/// Resolve one attachment descriptor into a render plan.
///
/// Total function: undefined or invalid input maps to `Unavailable` or
/// `Fallback`, never to an error.
pub fn resolve(descriptor: &AttachmentDescriptor) -> RenderPlan {
    // A missing or empty URL dominates every kind-specific rule.
    let url = match descriptor
        .url
        .as_deref()
        .filter(|u| !u.trim().is_empty())
    {
        Some(u) => u.to_string(),
        None => {
            return RenderPlan::Unavailable {
                reason: i18n::media_unavailable().to_string(),
            }
        }
    };

    match descriptor.kind {
        AttachmentKind::Image | AttachmentKind::Sticker => RenderPlan::Image {
            url,
            alt_text: descriptor
                .filename
                .clone()
                .unwrap_or_else(|| i18n::image_generic_alt().to_string()),
            clickable_fullscreen: true,
        },
        AttachmentKind::Audio => RenderPlan::Audio {
            url,
            mime_candidates: AUDIO_SOURCE_CANDIDATES.to_vec(),
            duration_label: format_duration(descriptor.duration_seconds),
            size_label: format_size(descriptor.size_bytes),
            download_filename: descriptor.filename.clone(),
        },
        AttachmentKind::Video => RenderPlan::Video {
            url,
            mime_candidates: VIDEO_SOURCE_CANDIDATES.to_vec(),
            duration_label: format_duration(descriptor.duration_seconds),
            size_label: format_size(descriptor.size_bytes),
        },
        AttachmentKind::Document => RenderPlan::Document {
            url,
            display_name: descriptor
                .filename
                .clone()
                .unwrap_or_else(|| i18n::document_default_name().to_string()),
            size_label: format_size(descriptor.size_bytes),
            download_filename: descriptor.filename.clone(),
        },
        AttachmentKind::Unknown => RenderPlan::Fallback {
            text: format!(
                "\u{1F4C4} {}",
                descriptor
                    .filename
                    .as_deref()
                    .unwrap_or_else(|| i18n::fallback_download_label())
            ),
        },
    }
}

/// Format a playback duration for display.
///
/// Missing, non-finite, or non-positive input yields no label (a zero-length
/// clip is indistinguishable from a missing duration). Durations are floored
/// to whole seconds; `>= 60s` renders as `"m:ss"`, shorter as `"{s}s"`.
pub fn format_duration(seconds: Option<f64>) -> Option<String> {
    let secs = seconds.filter(|s| s.is_finite() && *s > 0.0)?;
    let total = secs.floor() as u64;
    if total == 0 {
        return None;
    }
    let minutes = total / 60;
    let rem = total % 60;
    if minutes > 0 {
        Some(format!("{minutes}:{rem:02}"))
    } else {
        Some(format!("{rem}s"))
    }
}

/// Format a byte count for display: one decimal in KB below 1024 KB,
/// otherwise one decimal in MB.
///
/// Missing, non-finite, or non-positive input yields no label.
pub fn format_size(bytes: Option<f64>) -> Option<String> {
    let bytes = bytes.filter(|b| b.is_finite() && *b > 0.0)?;
    let kilobytes = bytes / 1024.0;
    if kilobytes < 1024.0 {
        Some(format!("{kilobytes:.1} KB"))
    } else {
        Some(format!("{:.1} MB", kilobytes / 1024.0))
    }
}
