use super::*;

#[test]
fn parse_rate_reads_num_over_den() {
    assert_eq!(parse_rate("24/1"), Some(Fps { num: 24, den: 1 }));
    assert_eq!(parse_rate("30000/1001"), Some(Fps { num: 30000, den: 1001 }));
    assert_eq!(parse_rate(" 25 / 1 "), Some(Fps { num: 25, den: 1 }));
    assert_eq!(parse_rate("0/0"), None);
    assert_eq!(parse_rate("24"), None);
    assert_eq!(parse_rate("a/b"), None);
}

#[test]
fn metadata_uses_first_video_stream() {
    let json = br#"{
        "streams": [
            { "codec_type": "audio", "duration": "12.0" },
            { "codec_type": "video", "width": 1920, "height": 1080,
              "avg_frame_rate": "24/1", "duration": "9.708333" }
        ],
        "format": { "duration": "12.0" }
    }"#;
    let info = video_info_from_json(json).unwrap();
    assert_eq!((info.width, info.height), (1920, 1080));
    assert_eq!(info.fps, Fps { num: 24, den: 1 });
    assert!((info.duration_secs - 9.708333).abs() < 1e-9);
}

#[test]
fn metadata_falls_back_to_container_duration() {
    let json = br#"{
        "streams": [
            { "codec_type": "video", "width": 640, "height": 360, "avg_frame_rate": "25/1" }
        ],
        "format": { "duration": "3.5" }
    }"#;
    let info = video_info_from_json(json).unwrap();
    assert_eq!(info.duration_secs, 3.5);
}

#[test]
fn incomplete_metadata_is_a_load_error() {
    let cases: [&[u8]; 6] = [
        br#"not json"#,
        br#"{ "streams": [ { "codec_type": "audio" } ] }"#,
        br#"{ "streams": [ { "codec_type": "video", "avg_frame_rate": "24/1", "duration": "1" } ] }"#,
        br#"{ "streams": [ { "codec_type": "video", "width": 0, "height": 2,
              "avg_frame_rate": "24/1", "duration": "1" } ] }"#,
        br#"{ "streams": [ { "codec_type": "video", "width": 2, "height": 2,
              "avg_frame_rate": "0/0", "duration": "1" } ] }"#,
        br#"{ "streams": [ { "codec_type": "video", "width": 2, "height": 2,
              "avg_frame_rate": "24/1", "duration": "N/A" } ] }"#,
    ];
    for json in cases {
        let err = video_info_from_json(json).unwrap_err();
        assert!(
            matches!(err, IntroError::Load(_)),
            "{}: {err}",
            String::from_utf8_lossy(json)
        );
    }
}
