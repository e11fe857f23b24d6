use clap::Parser;
use crosspost::cli::{
    Cli, Commands, OutputFormat, exit_code, parse_text_platform, usage_exit_code,
};
use crosspost::{FailureReason, GenerationKind, Platform, RawResponse, UploadResult};

#[test]
fn video_command_parses() {
    let cli = Cli::try_parse_from([
        "crosspost",
        "video",
        "--video",
        "clip.mp4",
        "--title",
        "Launch",
        "--user",
        "brand",
        "--platforms",
        "tiktok",
        "youtube",
    ])
    .unwrap();

    match cli.command {
        Commands::Video {
            video, platforms, ..
        } => {
            assert_eq!(video, "clip.mp4");
            assert_eq!(platforms, vec![Platform::TikTok, Platform::YouTube]);
        }
        other => panic!("unexpected command: {other:?}"),
    }
    assert_eq!(cli.format, OutputFormat::Human);
}

#[test]
fn platforms_accept_comma_lists_and_global_flags() {
    let cli = Cli::try_parse_from([
        "crosspost",
        "text",
        "--title",
        "Hello",
        "--user",
        "brand",
        "--platforms",
        "x,linkedin",
        "--api-key",
        "k",
        "--format",
        "json",
        "-v",
    ])
    .unwrap();

    assert!(cli.verbose);
    assert_eq!(cli.api_key.as_deref(), Some("k"));
    assert_eq!(cli.format, OutputFormat::Json);
    assert!(matches!(
        cli.command,
        Commands::Text { ref platforms, .. } if platforms == &vec![Platform::X, Platform::LinkedIn]
    ));
}

#[test]
fn platform_choices_are_limited_per_kind() {
    let text_on_instagram = Cli::try_parse_from([
        "crosspost",
        "text",
        "--title",
        "Hello",
        "--user",
        "brand",
        "--platforms",
        "instagram",
    ]);
    assert!(text_on_instagram.is_err());

    let photos_on_youtube = Cli::try_parse_from([
        "crosspost",
        "photos",
        "--photos",
        "a.jpg",
        "--title",
        "Album",
        "--user",
        "brand",
        "--platforms",
        "youtube",
    ]);
    assert!(photos_on_youtube.is_err());

    let err = parse_text_platform("tiktok").unwrap_err();
    assert!(err.contains("linkedin, x, facebook, threads"));
    assert!(parse_text_platform("myspace").unwrap_err().contains("unknown platform"));
}

#[test]
fn photos_take_several_references() {
    let cli = Cli::try_parse_from([
        "crosspost",
        "photos",
        "--photos",
        "a.jpg",
        "https://cdn.example.com/b.png",
        "--title",
        "Album",
        "--user",
        "brand",
        "--caption",
        "Weekend",
        "--platforms",
        "instagram",
    ])
    .unwrap();

    match cli.command {
        Commands::Photos {
            photos, caption, ..
        } => {
            assert_eq!(photos.len(), 2);
            assert_eq!(caption.as_deref(), Some("Weekend"));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn platforms_are_required() {
    let missing = Cli::try_parse_from(["crosspost", "text", "--title", "Hello", "--user", "brand"]);
    assert!(missing.is_err());
}

#[test]
fn generate_defaults_to_post_caption() {
    let cli = Cli::try_parse_from(["crosspost", "generate", "--prompt", "coffee"]).unwrap();
    match cli.command {
        Commands::Generate { kind, prompt, .. } => {
            assert_eq!(kind, GenerationKind::PostCaption);
            assert_eq!(prompt, "coffee");
        }
        other => panic!("unexpected command: {other:?}"),
    }

    let cli = Cli::try_parse_from([
        "crosspost",
        "generate",
        "--type",
        "video_description",
        "--prompt",
        "drone",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Commands::Generate {
            kind: GenerationKind::VideoDescription,
            ..
        }
    ));
}

#[test]
fn exit_codes_follow_outcome() {
    let ok = UploadResult::from_response(
        &RawResponse::new(200, r#"{"success": true}"#),
        &[Platform::X],
    );
    assert_eq!(exit_code(&ok), 0);

    let partial = UploadResult::from_response(
        &RawResponse::new(
            200,
            r#"{"results": {"x": {"success": true}, "threads": {"success": false}}}"#,
        ),
        &[Platform::X, Platform::Threads],
    );
    assert_eq!(exit_code(&partial), 2);

    let failed = UploadResult::failed(FailureReason::AllPlatformsFailed);
    assert_eq!(exit_code(&failed), 1);
}

#[test]
fn usage_errors_never_use_the_partial_failure_code() {
    let help = Cli::try_parse_from(["crosspost", "--help"]).unwrap_err();
    assert_eq!(usage_exit_code(&help), 0);

    let missing = Cli::try_parse_from(["crosspost", "text", "--title", "hi"]).unwrap_err();
    assert_eq!(usage_exit_code(&missing), 1);

    let unknown = Cli::try_parse_from(["crosspost", "podcast"]).unwrap_err();
    assert_eq!(usage_exit_code(&unknown), 1);
}
