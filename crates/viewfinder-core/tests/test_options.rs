use viewfinder_core::options::ViewerOptions;
use viewfinder_core::transform::Point;

#[test]
fn test_default_values() {
    let options = ViewerOptions::default();
    assert_eq!(options.mouse_pan_speed, 0.5);
    assert_eq!(options.mouse_wheel_speed, 0.33);
    assert_eq!(options.touch_pan_speed, 1.0);
    assert_eq!(options.two_finger_zoom_speed, 1.0);
    assert_eq!(options.double_click_min_ms, 100);
    assert_eq!(options.double_click_max_ms, 300);
    assert_eq!(options.scale_step, 1.1);
    assert_eq!(options.brightness_step, 8.0);
    assert_eq!(options.contrast_step, 1.1);
    assert_eq!(options.info_text_font, "12px sans-serif");
    assert_eq!(options.info_text_color, "#FFFFFF");
    assert_eq!(options.info_text_position, Point::new(10.0, 14.0));
    assert!(!options.draw_boundary);
    assert_eq!(options.boundary_size, 10.0);
    assert_eq!(options.boundary_color, "#FFFFFF");
    assert_eq!(options.msg_load_start, "Loading {0} ...");
    assert_eq!(options.msg_loaded, "Loaded {0}");
}

#[test]
fn test_options_serde_round_trip() {
    let mut options = ViewerOptions::default();
    options.mouse_pan_speed = 2.0;
    options.draw_boundary = true;
    options.msg_loaded = "Done: {0}".to_string();

    let json = serde_json::to_string(&options).unwrap();
    let back: ViewerOptions = serde_json::from_str(&json).unwrap();
    assert_eq!(format!("{options:?}"), format!("{back:?}"));
}

#[test]
fn test_empty_json_yields_defaults() {
    let options: ViewerOptions = serde_json::from_str("{}").unwrap();
    assert_eq!(
        format!("{options:?}"),
        format!("{:?}", ViewerOptions::default())
    );
}

#[test]
fn test_partial_json_keeps_remaining_defaults() {
    let options: ViewerOptions = serde_json::from_str(
        r#"{"mouse_pan_speed": 2.0, "info_text_position": {"x": 1.0, "y": 2.0}}"#,
    )
    .unwrap();
    assert_eq!(options.mouse_pan_speed, 2.0);
    assert_eq!(options.info_text_position, Point::new(1.0, 2.0));
    assert_eq!(options.scale_step, 1.1);
    assert_eq!(options.msg_loaded, "Loaded {0}");
}

#[test]
fn test_caption_substitution() {
    let options = ViewerOptions::default();
    assert_eq!(options.load_start_caption("a.png"), "Loading a.png ...");
    assert_eq!(options.loaded_caption("a.png"), "Loaded a.png");
}

#[test]
fn test_caption_without_placeholder_is_unchanged() {
    let mut options = ViewerOptions::default();
    options.msg_load_start = "Busy".to_string();
    assert_eq!(options.load_start_caption("a.png"), "Busy");
}

#[test]
fn test_caption_replaces_first_placeholder_only() {
    let mut options = ViewerOptions::default();
    options.msg_loaded = "{0} and {0}".to_string();
    assert_eq!(options.loaded_caption("x"), "x and {0}");
}
