//! Tests for configured sessions.

use std::path::Path;

use cairn::{ConfigError, Mode, Session, SessionConfig, SessionError};

#[test]
fn mode_from_config() {
    let config = SessionConfig::from_str(
        r#"
        [engine]
        mode = "non-strict"
        "#,
        Path::new("cairn.toml"),
    )
    .unwrap();
    assert_eq!(config.mode, Mode::NonStrict);

    let mut session = Session::with_config(config);
    let out = session.eval("2 a 3 b c 5 + d +").unwrap();
    assert_eq!(out.to_string(), "[[] d c b a 10]");
}

#[test]
fn budget_from_config() {
    let config = SessionConfig::from_str(
        r#"
        [engine]
        max_steps = 1
        "#,
        Path::new("cairn.toml"),
    )
    .unwrap();
    let mut session = Session::with_config(config);
    assert_eq!(session.eval("2 1 +").unwrap().to_string(), "[[1 +] 2]");
}

#[test]
fn config_file_on_disk() {
    let dir = std::env::temp_dir().join(format!("cairn-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("cairn.toml");
    std::fs::write(&path, "[engine]\nmode = \"infer\"\n\n[log]\nlevel = \"trace\"\n").unwrap();

    let config = SessionConfig::from_file(&path).unwrap();
    assert_eq!(config.mode, Mode::Infer);
    assert_eq!(config.log_level, log::LevelFilter::Trace);

    let mut session = Session::with_config(config);
    assert_eq!(session.run("dup").unwrap().to_string(), "['a_0] -> ['a_0 'a_0]");

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn bad_config() {
    let result = SessionConfig::from_str("[engine]\nmode = 3", Path::new("cairn.toml"));
    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}

#[test]
fn bad_config_file_fails_the_session() {
    let dir = std::env::temp_dir().join(format!("cairn-bad-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("cairn.toml");
    std::fs::write(&path, "[engine]\nmax_steps = 0\n").unwrap();

    let result = Session::from_config_file(&path);
    assert!(matches!(
        result,
        Err(SessionError::Config(ConfigError::Invalid { .. }))
    ));

    std::fs::remove_dir_all(&dir).unwrap();
}
