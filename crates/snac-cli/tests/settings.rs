use std::fs;
use std::path::PathBuf;

use snac_cli::settings::{HostOverrides, load_settings};

fn settings_file(name: &str, content: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("snac-align-settings-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn explicit_file_fills_in_defaults() {
    let path = settings_file("partial.toml", "[host]\nproject = \"1877\"\n");
    let settings = load_settings(Some(&path)).unwrap();

    insta::assert_json_snapshot!(settings.host, @r#"
    {
      "url": "http://127.0.0.1:3333/",
      "project": "1877",
      "timeout_secs": 30
    }
    "#);
}

#[test]
fn explicit_file_drives_the_client() {
    let path = settings_file(
        "full.toml",
        "[host]\nurl = \"http://files:4444\"\ntimeout_secs = 5\n",
    );
    let settings = load_settings(Some(&path)).unwrap();
    let config = settings
        .client_config(&HostOverrides {
            url: None,
            project: Some("42".to_string()),
        })
        .unwrap();

    insta::assert_json_snapshot!(
        (config.base_url().as_str(), config.project_id()),
        @r#"
    [
      "http://files:4444/",
      "42"
    ]
    "#
    );
}

#[test]
fn explicit_file_must_parse() {
    let path = settings_file("broken.toml", "[host\nurl = 3\n");
    let error = load_settings(Some(&path)).unwrap_err();
    assert!(format!("{error:#}").contains("failed to parse settings file"));
}

#[test]
fn explicit_file_must_exist() {
    let path = std::env::temp_dir().join("snac-align-no-such-settings.toml");
    let error = load_settings(Some(&path)).unwrap_err();
    assert!(format!("{error:#}").contains("failed to read settings file"));
}
