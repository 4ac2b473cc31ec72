//! Attachment descriptor metadata.
//!
//! The actual media bytes are NEVER touched here — the backend serves them
//! separately. Only the metadata needed to decide a presentation is stored.

use serde::{Deserialize, Serialize};

/// Media category of an attachment.
///
/// Backend payloads carry this as a free-form string tag; any value outside
/// the known set maps to [`AttachmentKind::Unknown`] rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Image,
    Sticker,
    Audio,
    Video,
    Document,
    #[serde(other)]
    Unknown,
}

impl AttachmentKind {
    /// The canonical tag for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Sticker => "sticker",
            Self::Audio => "audio",
            Self::Video => "video",
            Self::Document => "document",
            Self::Unknown => "unknown",
        }
    }

    /// Parse a backend kind tag. Unrecognized tags (including future ones)
    /// become `Unknown`.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "image" => Self::Image,
            "sticker" => Self::Sticker,
            "audio" => Self::Audio,
            "video" => Self::Video,
            "document" => Self::Document,
            _ => Self::Unknown,
        }
    }
}

impl Default for AttachmentKind {
    fn default() -> Self {
        Self::Unknown
    }
}

/// Metadata describing a single message attachment.
///
/// Constructed by the caller from backend data; every field except `kind` is
/// optional because the backend omits whatever it does not know. Fields
/// outside this shape are ignored during deserialization.
///
/// `duration_seconds` and `size_bytes` are `f64` so that malformed backend
/// payloads (negative numbers, non-integral sizes) still deserialize; the
/// formatters treat anything non-finite or non-positive as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttachmentDescriptor {
    /// Media category tag.
    pub kind: AttachmentKind,

    /// URL where the media bytes can be fetched. Absence means the media is
    /// not yet available.
    pub url: Option<String>,

    /// Original filename, when the backend knows it.
    pub filename: Option<String>,

    /// Playback length in seconds (audio/video).
    pub duration_seconds: Option<f64>,

    /// Media size in bytes.
    pub size_bytes: Option<f64>,

    /// Accompanying text shown above the media.
    pub caption: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_tag_known() {
        assert_eq!(AttachmentKind::from_tag("image"), AttachmentKind::Image);
        assert_eq!(AttachmentKind::from_tag("sticker"), AttachmentKind::Sticker);
        assert_eq!(
            AttachmentKind::from_tag("document"),
            AttachmentKind::Document
        );
    }

    #[test]
    fn test_kind_from_tag_unknown_never_fails() {
        assert_eq!(
            AttachmentKind::from_tag("location"),
            AttachmentKind::Unknown
        );
        assert_eq!(AttachmentKind::from_tag(""), AttachmentKind::Unknown);
        assert_eq!(AttachmentKind::from_tag("IMAGE"), AttachmentKind::Unknown);
    }

    #[test]
    fn test_deserialize_unknown_kind_tag() {
        let d: AttachmentDescriptor =
            serde_json::from_str(r#"{"kind":"contact_card","url":"http://x"}"#).expect("parse");
        assert_eq!(d.kind, AttachmentKind::Unknown);
    }

    #[test]
    fn test_deserialize_ignores_extra_fields() {
        let raw = r#"{
            "kind": "audio",
            "url": "http://x/a.ogg",
            "duration_seconds": 95,
            "mimetype": "audio/ogg",
            "whatsapp_message_id": "wamid.123"
        }"#;
        let d: AttachmentDescriptor = serde_json::from_str(raw).expect("parse");
        assert_eq!(d.kind, AttachmentKind::Audio);
        assert_eq!(d.duration_seconds, Some(95.0));
        assert!(d.filename.is_none());
    }

    #[test]
    fn test_deserialize_negative_size_is_kept_raw() {
        // Garbage numbers must deserialize; the formatters decide they are
        // unusable, not the model.
        let d: AttachmentDescriptor =
            serde_json::from_str(r#"{"kind":"video","url":"http://x","size_bytes":-1}"#)
                .expect("parse");
        assert_eq!(d.size_bytes, Some(-1.0));
    }

    #[test]
    fn test_serialize_roundtrip() {
        let d = AttachmentDescriptor {
            kind: AttachmentKind::Document,
            url: Some("http://x/r.pdf".into()),
            filename: Some("relatorio.pdf".into()),
            size_bytes: Some(2048.0),
            ..Default::default()
        };
        let json = serde_json::to_string(&d).expect("serialize");
        let back: AttachmentDescriptor = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, d);
    }
}
