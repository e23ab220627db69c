use super::*;
use std::path::PathBuf;
use std::time::Duration;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    std::fs::write(file.path(), contents).unwrap();
    file
}

#[test]
fn test_defaults() {
    let config = AgentConfig::default();

    assert_eq!(config.frame_handler, "NOOP");
    assert_eq!(config.game_frame_buffer_size, 5);
    assert_eq!(config.collect_frames_interval().unwrap(), Duration::from_secs(1));
    assert_eq!(
        config.collect_character_interval().unwrap(),
        Duration::from_secs(1)
    );
    assert_eq!(
        config.collect_frames_for_context_interval().unwrap(),
        Duration::from_secs(1)
    );
    assert_eq!(config.datasets().root(), PathBuf::from("datasets"));
    config.validate().unwrap();
}

#[test]
fn test_load_agent_section_and_context_block() {
    let file = write_config(
        r#"
datasets_root = "/tmp/agent-datasets"

[frame_handlers.COLLECT_FRAMES_FOR_CONTEXT]
context = "boss_fight"
interval = 0.25

[SuperHexagonGameAgentPlugin]
frame_handler = "COLLECT_FRAMES_FOR_CONTEXT"
game_frame_buffer_size = 8
collect_frames_interval = 0

[OtherGameAgentPlugin]
frame_handler = "COLLECT_CHARACTERS"
"#,
    );

    let config = AgentConfig::load(file.path(), "SuperHexagonGameAgent").unwrap();

    assert_eq!(config.frame_handler, "COLLECT_FRAMES_FOR_CONTEXT");
    assert_eq!(config.game_frame_buffer_size, 8);
    assert_eq!(config.collect_frames_interval, Some(0.0));
    assert_eq!(config.collect_frames_interval().unwrap(), Duration::from_secs(1));
    assert_eq!(config.collect_character_interval, None);
    assert_eq!(config.collect_frames_for_context.context, "boss_fight");
    assert_eq!(
        config.collect_frames_for_context_interval().unwrap(),
        Duration::from_millis(250)
    );
    assert_eq!(config.datasets_root, PathBuf::from("/tmp/agent-datasets"));
}

#[test]
fn test_missing_sections_use_defaults() {
    let file = write_config(
        r#"
[SomeoneElsePlugin]
frame_handler = "COLLECT_FRAMES"
"#,
    );

    let config = AgentConfig::load(file.path(), "MyAgent").unwrap();

    assert_eq!(config, AgentConfig::default());
}

#[test]
fn test_invalid_values_are_rejected() {
    let file = write_config(
        r#"
[MyAgentPlugin]
game_frame_buffer_size = 0
"#,
    );
    assert!(matches!(
        AgentConfig::load(file.path(), "MyAgent").unwrap_err().variant,
        GameAgentErrorVariant::InvalidConfiguration(_)
    ));

    let config = AgentConfig {
        collect_character_interval: Some(-1.0),
        ..AgentConfig::default()
    };
    assert!(config.validate().is_err());
    assert!(config.collect_character_interval().is_err());
}

#[test]
fn test_missing_file_is_a_config_error() {
    let result = AgentConfig::load("/nonexistent/agent/config.toml", "MyAgent");

    assert!(matches!(
        result.unwrap_err().variant,
        GameAgentErrorVariant::Config(_)
    ));
}

#[test]
fn test_zero_collection_intervals_fall_back_to_default() {
    let config = AgentConfig {
        collect_frames_interval: Some(0.0),
        collect_character_interval: Some(0.0),
        collect_frames_for_context: ContextCollectionConfig::new("menus".to_string(), 0.0),
        ..AgentConfig::default()
    };

    assert_eq!(config.collect_frames_interval().unwrap(), Duration::from_secs(1));
    assert_eq!(
        config.collect_character_interval().unwrap(),
        Duration::from_secs(1)
    );
    assert_eq!(
        config.collect_frames_for_context_interval().unwrap(),
        Duration::ZERO
    );

    let config = AgentConfig {
        collect_frames_interval: Some(2.5),
        ..AgentConfig::default()
    };
    assert_eq!(
        config.collect_frames_interval().unwrap(),
        Duration::from_millis(2500)
    );
}

#[test]
fn test_environment_overlays_agent_section() {
    let file = write_config(
        r#"
[MyGamePlugin]
frame_handler = "COLLECT_FRAMES"
game_frame_buffer_size = 8
"#,
    );
    std::env::set_var("GAME_AGENT__MYGAMEPLUGIN__GAME_FRAME_BUFFER_SIZE", "3");

    let config = AgentConfig::load(file.path(), "MyGame");
    std::env::remove_var("GAME_AGENT__MYGAMEPLUGIN__GAME_FRAME_BUFFER_SIZE");
    let config = config.unwrap();

    assert_eq!(config.frame_handler, "COLLECT_FRAMES");
    assert_eq!(config.game_frame_buffer_size, 3);
}

#[test]
fn test_environment_alone_configures_agent() {
    std::env::set_var(
        "GAME_AGENT__ENVONLYAGENTPLUGIN__FRAME_HANDLER",
        "COLLECT_CHARACTERS",
    );
    std::env::set_var(
        "GAME_AGENT__ENVONLYAGENTPLUGIN__COLLECT_CHARACTER_INTERVAL",
        "0.5",
    );

    let config = AgentConfig::from_environment("EnvOnlyAgent");
    std::env::remove_var("GAME_AGENT__ENVONLYAGENTPLUGIN__FRAME_HANDLER");
    std::env::remove_var("GAME_AGENT__ENVONLYAGENTPLUGIN__COLLECT_CHARACTER_INTERVAL");
    let config = config.unwrap();

    assert_eq!(config.frame_handler, "COLLECT_CHARACTERS");
    assert_eq!(
        config.collect_character_interval().unwrap(),
        Duration::from_millis(500)
    );
    assert_eq!(config.game_frame_buffer_size, 5);
    assert_eq!(config.datasets_root, PathBuf::from("datasets"));
}
