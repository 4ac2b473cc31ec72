//! Integration tests for attachment resolution: dispatch rules, label
//! derivation, and end-to-end scenarios over backend-shaped JSON.

use mediaplan::model::attachment::AttachmentDescriptor;
use mediaplan::resolver::{format_duration, format_size, resolve, MimeCandidate, RenderPlan};

fn from_backend(raw: &str) -> AttachmentDescriptor {
    serde_json::from_str(raw).expect("backend descriptor JSON")
}

// ─── Test 1: Missing URL dominates every kind ───────────────────────

#[test]
fn test_no_url_always_unavailable() {
    for raw in [
        r#"{"kind":"image"}"#,
        r#"{"kind":"sticker","filename":"s.webp"}"#,
        r#"{"kind":"audio","duration_seconds":95}"#,
        r#"{"kind":"video","size_bytes":1024}"#,
        r#"{"kind":"document","filename":"report.pdf"}"#,
        r#"{"kind":"poll"}"#,
        r#"{"kind":"image","url":""}"#,
    ] {
        let plan = resolve(&from_backend(raw));
        assert_eq!(
            plan,
            RenderPlan::Unavailable {
                reason: "M\u{ed}dia n\u{e3}o dispon\u{ed}vel".to_string()
            },
            "descriptor {raw} must resolve to Unavailable"
        );
    }
}

// ─── Test 2: Image and sticker share the image presentation ─────────

#[test]
fn test_image_and_sticker_presentation() {
    let plan = resolve(&from_backend(
        r#"{"kind":"image","url":"http://x/p.jpg","filename":"planta_baixa.jpg"}"#,
    ));
    assert_eq!(
        plan,
        RenderPlan::Image {
            url: "http://x/p.jpg".to_string(),
            alt_text: "planta_baixa.jpg".to_string(),
            clickable_fullscreen: true,
        }
    );

    let plan = resolve(&from_backend(r#"{"kind":"sticker","url":"http://x/s.webp"}"#));
    match plan {
        RenderPlan::Image { alt_text, .. } => assert_eq!(alt_text, "Imagem"),
        other => panic!("sticker must render as Image, got {other:?}"),
    }
}

// ─── Test 3: Unrecognized kinds degrade to Fallback ─────────────────

#[test]
fn test_unknown_kinds_fall_back() {
    for raw in [
        r#"{"kind":"location","url":"http://x/loc"}"#,
        r#"{"kind":"contact_card","url":"http://x/vcf"}"#,
        r#"{"kind":"","url":"http://x/blob"}"#,
    ] {
        let plan = resolve(&from_backend(raw));
        assert!(
            matches!(plan, RenderPlan::Fallback { .. }),
            "descriptor {raw} must resolve to Fallback, got {plan:?}"
        );
    }

    let plan = resolve(&from_backend(
        r#"{"kind":"future_thing","url":"http://x/f","filename":"contrato.docx"}"#,
    ));
    assert_eq!(
        plan,
        RenderPlan::Fallback {
            text: "\u{1F4C4} contrato.docx".to_string()
        }
    );
}

// ─── Test 4: Formatter tables ───────────────────────────────────────

#[test]
fn test_duration_formatter_table() {
    assert_eq!(format_duration(Some(0.0)), None);
    assert_eq!(format_duration(Some(45.0)), Some("45s".to_string()));
    assert_eq!(format_duration(Some(90.0)), Some("1:30".to_string()));
    assert_eq!(format_duration(Some(600.0)), Some("10:00".to_string()));
}

#[test]
fn test_size_formatter_table() {
    assert_eq!(format_size(Some(500.0)), Some("0.5 KB".to_string()));
    assert_eq!(format_size(Some(2048.0)), Some("2.0 KB".to_string()));
    assert_eq!(format_size(Some(1_572_864.0)), Some("1.5 MB".to_string()));
}

// ─── Test 5: End-to-end audio scenario ──────────────────────────────

#[test]
fn test_audio_end_to_end() {
    let plan = resolve(&from_backend(
        r#"{"kind":"audio","url":"http://x/a.ogg","duration_seconds":95,"size_bytes":204800,"filename":"voice.ogg"}"#,
    ));
    assert_eq!(
        plan,
        RenderPlan::Audio {
            url: "http://x/a.ogg".to_string(),
            mime_candidates: vec![
                MimeCandidate::OggAudio,
                MimeCandidate::MpegAudio,
                MimeCandidate::WavAudio,
            ],
            duration_label: Some("1:35".to_string()),
            size_label: Some("200.0 KB".to_string()),
            download_filename: Some("voice.ogg".to_string()),
        }
    );
}

// ─── Test 6: End-to-end video and document scenarios ────────────────

#[test]
fn test_video_end_to_end() {
    let plan = resolve(&from_backend(
        r#"{"kind":"video","url":"http://x/v.mp4","duration_seconds":600,"size_bytes":1572864}"#,
    ));
    assert_eq!(
        plan,
        RenderPlan::Video {
            url: "http://x/v.mp4".to_string(),
            mime_candidates: vec![MimeCandidate::Mp4Video],
            duration_label: Some("10:00".to_string()),
            size_label: Some("1.5 MB".to_string()),
        }
    );
}

#[test]
fn test_document_end_to_end() {
    let plan = resolve(&from_backend(
        r#"{"kind":"document","url":"http://x/r.pdf","filename":"relatorio.pdf","size_bytes":2048}"#,
    ));
    assert_eq!(
        plan,
        RenderPlan::Document {
            url: "http://x/r.pdf".to_string(),
            display_name: "relatorio.pdf".to_string(),
            size_label: Some("2.0 KB".to_string()),
            download_filename: Some("relatorio.pdf".to_string()),
        }
    );
}

// ─── Test 7: Idempotence ────────────────────────────────────────────

#[test]
fn test_resolution_is_idempotent() {
    let descriptor = from_backend(
        r#"{"kind":"audio","url":"http://x/a.ogg","duration_seconds":95,"size_bytes":204800,"filename":"voice.ogg","caption":"segue o áudio"}"#,
    );
    assert_eq!(resolve(&descriptor), resolve(&descriptor));
}

// ─── Test 8: Backend payloads with extra fields and garbage numbers ─

#[test]
fn test_realistic_backend_payload() {
    // The backend sends more fields than we model; everything outside the
    // descriptor shape is ignored, and garbage numerics lose their labels.
    let plan = resolve(&from_backend(
        r#"{
            "kind": "video",
            "url": "http://cdn.example/v.mp4",
            "duration_seconds": -12,
            "size_bytes": null,
            "mimetype": "video/mp4",
            "conversation_id": 4812,
            "sender": {"name": "Ana", "phone": "+55 11 99999-0000"}
        }"#,
    ));
    assert_eq!(
        plan,
        RenderPlan::Video {
            url: "http://cdn.example/v.mp4".to_string(),
            mime_candidates: vec![MimeCandidate::Mp4Video],
            duration_label: None,
            size_label: None,
        }
    );
}
