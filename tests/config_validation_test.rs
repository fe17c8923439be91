use std::fs;
use std::path::Path;
use tempfile::tempdir;

use proxy_gen::config::{Config, Quality, load_config, parse_config, read_or_default};
use proxy_gen::transcode::Codec;

// Helper function to parse configuration text
fn parse_test_config(config_content: &str) -> anyhow::Result<Config> {
    parse_config(config_content, Path::new("test_config.yaml"))
}

#[test]
fn test_empty_configuration_uses_defaults() {
    let config = parse_test_config("").unwrap();
    assert_eq!(config, Config::default());

    assert!(config.output.p5_preview);
    assert_eq!(config.output.p5_preview_source, Quality::Preview);
    assert!(config.output.workflow_store);
    assert_eq!(config.output.workflow_store_source, Quality::Workflow);
    assert_eq!(config.workflow_path.remove_levels, 1);
    assert_eq!(config.workflow_path.append(), Some("proxies"));
    assert_eq!(config.preview.scale, "320");
    assert_eq!(config.workflow.scale, "1920");
    assert_eq!(config.workflow.crf, "18");
    assert_eq!(config.logging.file, "proxy_generator.log");
}

#[test]
fn test_full_configuration() {
    let valid_config = r#"
output:
  p5_preview: true
  p5_preview_source: workflow
  workflow_store: false
transcoder:
  ffmpeg_path: "/usr/local/bin/ffmpeg"
workflow_path:
  project_folder: "Projects"
  new_base: "/Volumes/Proxy_Storage"
  remove_levels: 2
  append_path: "Proxies"
preview:
  scale: "480"
workflow:
  codec: prores
  codec_profile: hq
logging:
  debug: true
"#;

    let config = parse_test_config(valid_config).unwrap();
    assert_eq!(config.output.p5_preview_source, Quality::Workflow);
    assert!(!config.output.workflow_store);
    assert_eq!(
        config.transcoder.custom_ffmpeg(),
        Some(Path::new("/usr/local/bin/ffmpeg"))
    );
    assert_eq!(
        config.workflow_path.base_replacement(),
        Some(("Projects", "/Volumes/Proxy_Storage"))
    );
    assert_eq!(config.workflow_path.remove_levels, 2);

    // Unset profile values keep the tier defaults
    assert_eq!(config.preview.scale, "480");
    assert_eq!(config.preview.crf, "28");
    assert_eq!(config.workflow.codec, Codec::ProRes);
    assert_eq!(config.workflow.container(), "mov");
    assert_eq!(config.workflow.scale, "1920");
    assert!(config.logging.debug);
}

#[test]
fn test_numeric_profile_values() {
    let config = parse_test_config("preview:\n  scale: 480\n  crf: 23\n").unwrap();
    assert_eq!(config.preview.scale, "480");
    assert_eq!(config.preview.crf, "23");
    assert_eq!(config.preview.video_bitrate, "256k");
}

#[test]
fn test_negative_remove_levels_rejected() {
    let invalid_config = r#"
workflow_path:
  remove_levels: -1
"#;

    let result = parse_test_config(invalid_config);
    assert!(
        result.is_err(),
        "Negative remove_levels should fail to parse"
    );
}

#[test]
fn test_marker_with_separator_rejected() {
    let invalid_config = r#"
workflow_path:
  project_folder: "Projects/2024"
  new_base: "/Volumes/Proxy_Storage"
"#;

    let error = parse_test_config(invalid_config).unwrap_err();
    assert!(
        error.to_string().contains("workflow_path.project_folder"),
        "Error message should name the field: {error}"
    );
}

#[test]
fn test_marker_with_backslash_rejected() {
    let invalid_config = r#"
workflow_path:
  project_folder: 'Projects\2024'
  new_base: "/Volumes/Proxy_Storage"
"#;

    assert!(parse_test_config(invalid_config).is_err());
}

#[test]
fn test_absolute_append_path_rejected() {
    let invalid_config = r#"
workflow_path:
  append_path: "/Proxies"
"#;

    let error = parse_test_config(invalid_config).unwrap_err();
    assert!(error.to_string().contains("workflow_path.append_path"));
}

#[test]
fn test_parent_dir_in_append_path_rejected() {
    let invalid_config = r#"
workflow_path:
  append_path: "../Proxies"
"#;

    assert!(parse_test_config(invalid_config).is_err());
}

#[cfg(unix)]
#[test]
fn test_relative_new_base_rejected() {
    let invalid_config = r#"
workflow_path:
  project_folder: "Projects"
  new_base: "Proxy_Storage"
"#;

    let error = parse_test_config(invalid_config).unwrap_err();
    assert!(error.to_string().contains("workflow_path.new_base"));
}

#[test]
fn test_half_configured_base_replacement_is_accepted() {
    let config_text = r#"
workflow_path:
  project_folder: "Projects"
"#;

    let config = parse_test_config(config_text).unwrap();
    assert_eq!(config.workflow_path.base_replacement(), None);
}

#[test]
fn test_empty_scale_rejected_only_when_rendered() {
    let invalid_config = r#"
preview:
  scale: ""
"#;
    assert!(parse_test_config(invalid_config).is_err());

    let unused_profile = r#"
output:
  p5_preview: false
preview:
  scale: ""
"#;
    assert!(parse_test_config(unused_profile).is_ok());
}

#[test]
fn test_unknown_quality_rejected() {
    let invalid_config = r#"
output:
  p5_preview_source: "medium"
"#;

    assert!(parse_test_config(invalid_config).is_err());
}

#[test]
fn test_unknown_section_rejected() {
    let invalid_config = r#"
outputs:
  p5_preview: false
"#;

    assert!(parse_test_config(invalid_config).is_err());
}

#[test]
fn test_unknown_field_inside_section_rejected() {
    let invalid_config = r#"
workflow_path:
  remove_level: 0
"#;
    assert!(parse_test_config(invalid_config).is_err());

    let invalid_profile = r#"
preview:
  bitrate: "512k"
"#;
    assert!(parse_test_config(invalid_profile).is_err());
}

#[test]
fn test_marker_and_base_are_trimmed() {
    let config_text = r#"
workflow_path:
  project_folder: " Projects "
  new_base: "/Volumes/Proxy_Storage "
"#;

    let config = parse_test_config(config_text).unwrap();
    assert_eq!(
        config.workflow_path.base_replacement(),
        Some(("Projects", "/Volumes/Proxy_Storage"))
    );
}

#[test]
fn test_invalid_yaml() {
    let error = parse_test_config("output: [").unwrap_err();
    assert!(error.to_string().contains("Please check the YAML syntax"));
}

#[test]
fn test_load_config_from_file() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("proxy.yaml");
    fs::write(
        &config_path,
        "workflow_path:\n  remove_levels: 0\n  append_path: \"\"\n",
    )
    .unwrap();

    let config = load_config(&config_path).unwrap();
    assert_eq!(config.workflow_path.remove_levels, 0);
    assert_eq!(config.workflow_path.append(), None);
}

#[test]
fn test_read_or_default() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("proxy.yaml");

    let (config, origin) = read_or_default(&config_path).unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(origin, None);

    fs::write(&config_path, "preview:\n  scale: \"240\"\n").unwrap();
    let (config, origin) = read_or_default(&config_path).unwrap();
    assert_eq!(config.preview.scale, "240");
    assert_eq!(origin, Some(config_path));
}
