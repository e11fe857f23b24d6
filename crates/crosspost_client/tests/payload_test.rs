use crosspost_client::{PayloadBuilder, PayloadPart};
use crosspost_core::{ContentKind, MediaRef, Platform, UploadRequest};
use crosspost_error::BuildErrorKind;
use std::io::Write;
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str) -> MediaRef {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(b"not really media").unwrap();
    MediaRef::file(path)
}

fn request(kind: ContentKind, media: Vec<MediaRef>) -> UploadRequest {
    UploadRequest::builder()
        .kind(kind)
        .user("brand-account")
        .title("Launch day")
        .platforms([Platform::Facebook, Platform::X])
        .media(media)
        .build()
        .unwrap()
}

#[test]
fn video_from_local_file() {
    let dir = TempDir::new().unwrap();
    let video = write_file(&dir, "clip.mp4");

    let payload = PayloadBuilder::new()
        .build(&request(ContentKind::Video, vec![video]))
        .unwrap();

    assert_eq!(payload.endpoint(), "upload");
    assert_eq!(payload.text_values("user"), vec!["brand-account"]);
    assert_eq!(payload.text_values("title"), vec!["Launch day"]);
    assert_eq!(payload.text_values("platform[]"), vec!["facebook", "x"]);
    assert!(payload.text_values("caption").is_empty());

    let file = payload
        .parts()
        .iter()
        .find(|part| part.name() == "video")
        .unwrap();
    match file {
        PayloadPart::File {
            file_name, mime, ..
        } => {
            assert_eq!(file_name, "clip.mp4");
            assert_eq!(*mime, "video/mp4");
        }
        other => panic!("expected a file part, got {other:?}"),
    }
}

#[test]
fn video_from_url_is_sent_as_text() {
    let payload = PayloadBuilder::new()
        .build(&request(
            ContentKind::Video,
            vec![MediaRef::parse("https://cdn.example.com/clip.mp4")],
        ))
        .unwrap();

    assert_eq!(
        payload.text_values("video"),
        vec!["https://cdn.example.com/clip.mp4"]
    );
    assert!(payload.file_paths().is_empty());
}

#[test]
fn missing_video_file_is_invalid_media() {
    let dir = TempDir::new().unwrap();
    let missing = MediaRef::file(dir.path().join("missing.mp4"));

    let err = PayloadBuilder::new()
        .build(&request(ContentKind::Video, vec![missing]))
        .unwrap_err();
    assert!(matches!(err.kind(), BuildErrorKind::InvalidMediaType(m) if m.ends_with("missing.mp4")));
}

#[test]
fn directory_is_not_a_video() {
    let dir = TempDir::new().unwrap();
    let err = PayloadBuilder::new()
        .build(&request(ContentKind::Video, vec![MediaRef::file(dir.path())]))
        .unwrap_err();
    assert!(matches!(err.kind(), BuildErrorKind::InvalidMediaType(_)));
}

// Opens fine but every read at offset zero fails
#[cfg(target_os = "linux")]
const UNREADABLE: &str = "/proc/self/mem";

#[cfg(target_os = "linux")]
#[test]
fn unreadable_video_is_invalid_media() {
    let err = PayloadBuilder::new()
        .build(&request(ContentKind::Video, vec![MediaRef::file(UNREADABLE)]))
        .unwrap_err();
    assert!(matches!(err.kind(), BuildErrorKind::InvalidMediaType(m) if m == UNREADABLE));
}

#[cfg(target_os = "linux")]
#[test]
fn unreadable_photo_is_dropped() {
    let payload = PayloadBuilder::new()
        .build(&request(
            ContentKind::Photos,
            vec![
                MediaRef::file(UNREADABLE),
                MediaRef::url("https://cdn.example.com/ok.jpg"),
            ],
        ))
        .unwrap();

    assert!(payload.file_paths().is_empty());
    assert_eq!(
        payload.text_values("photos[]"),
        vec!["https://cdn.example.com/ok.jpg"]
    );
}

#[test]
fn video_needs_exactly_one_item() {
    let builder = PayloadBuilder::new();

    let none = builder
        .build(&request(ContentKind::Video, vec![]))
        .unwrap_err();
    assert_eq!(none.kind(), &BuildErrorKind::MissingMedia);

    let two = builder
        .build(&request(
            ContentKind::Video,
            vec![
                MediaRef::parse("https://cdn.example.com/a.mp4"),
                MediaRef::parse("https://cdn.example.com/b.mp4"),
            ],
        ))
        .unwrap_err();
    assert_eq!(two.kind(), &BuildErrorKind::TooManyMedia(2));
}

#[test]
fn malformed_url_is_rejected() {
    let err = PayloadBuilder::new()
        .build(&request(
            ContentKind::Video,
            vec![MediaRef::url("https://")],
        ))
        .unwrap_err();
    assert!(matches!(err.kind(), BuildErrorKind::InvalidMediaType(_)));
}

#[test]
fn photos_drop_invalid_items_and_keep_order() {
    let dir = TempDir::new().unwrap();
    let first = write_file(&dir, "first.png");
    let missing = MediaRef::file(dir.path().join("gone.jpg"));
    let remote = MediaRef::parse("https://cdn.example.com/second.jpg");

    let payload = PayloadBuilder::new()
        .build(&request(ContentKind::Photos, vec![first, missing, remote]))
        .unwrap();

    assert_eq!(payload.endpoint(), "upload_photos");
    let photo_parts: Vec<_> = payload
        .parts()
        .iter()
        .filter(|part| part.name() == "photos[]")
        .collect();
    assert_eq!(photo_parts.len(), 2);
    assert!(matches!(photo_parts[0], PayloadPart::File { file_name, .. } if file_name == "first.png"));
    assert!(matches!(photo_parts[1], PayloadPart::Text { value, .. } if value.ends_with("second.jpg")));
    // Caption is always sent for photos
    assert_eq!(payload.text_values("caption"), vec![""]);
}

#[test]
fn photos_fail_when_nothing_is_usable() {
    let dir = TempDir::new().unwrap();
    let err = PayloadBuilder::new()
        .build(&request(
            ContentKind::Photos,
            vec![
                MediaRef::file(dir.path().join("a.png")),
                MediaRef::file(dir.path().join("b.png")),
            ],
        ))
        .unwrap_err();
    assert_eq!(err.kind(), &BuildErrorKind::NoValidMedia { rejected: 2 });

    let empty = PayloadBuilder::new()
        .build(&request(ContentKind::Photos, vec![]))
        .unwrap_err();
    assert_eq!(empty.kind(), &BuildErrorKind::MissingMedia);
}

#[test]
fn photo_caption_is_forwarded() {
    let mut req = request(
        ContentKind::Photos,
        vec![MediaRef::parse("https://cdn.example.com/a.jpg")],
    );
    req = UploadRequest::builder()
        .kind(*req.kind())
        .user(req.user().clone())
        .title(req.title().clone())
        .platforms(req.platforms().clone())
        .media(req.media().clone())
        .caption(Some("golden hour".to_string()))
        .build()
        .unwrap();

    let payload = PayloadBuilder::new().build(&req).unwrap();
    assert_eq!(payload.text_values("caption"), vec!["golden hour"]);
}

#[test]
fn text_ignores_media() {
    let payload = PayloadBuilder::new()
        .build(&request(
            ContentKind::Text,
            vec![MediaRef::parse("https://cdn.example.com/a.jpg")],
        ))
        .unwrap();

    assert_eq!(payload.endpoint(), "upload_text");
    assert!(payload.parts().iter().all(|part| matches!(part, PayloadPart::Text { .. })));
    assert!(payload.text_values("photos[]").is_empty());
    assert_eq!(payload.platforms(), &vec![Platform::Facebook, Platform::X]);
}

#[test]
fn media_kinds_require_a_title() {
    let req = UploadRequest::builder()
        .kind(ContentKind::Video)
        .user("u1")
        .title("   ")
        .platform(Platform::TikTok)
        .media_item(MediaRef::parse("https://cdn.example.com/a.mp4"))
        .build()
        .unwrap();

    let err = PayloadBuilder::new().build(&req).unwrap_err();
    assert_eq!(err.kind(), &BuildErrorKind::MissingTitle);
}
