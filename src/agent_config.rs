use crate::*;
use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub static DEFAULT_FRAME_HANDLER: &str = "NOOP";
pub static DEFAULT_DATASETS_ROOT: &str = "datasets";
pub static DEFAULT_CONTEXT: &str = "default";
pub static DEFAULT_INTERVAL_SECONDS: f64 = 1.0;
pub static NOOP_INTERVAL: Duration = Duration::from_secs(1);
pub static ENVIRONMENT_PREFIX: &str = "GAME_AGENT";

/// Settings of the context collection handler.
#[derive(new, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextCollectionConfig {
    #[serde(default = "default_context")]
    pub context: String,
    #[serde(default = "default_interval")]
    pub interval: f64,
}

impl Default for ContextCollectionConfig {
    fn default() -> Self {
        Self::new(default_context(), default_interval())
    }
}

/// Everything an agent reads from configuration. Missing values fall back to
/// their defaults; nothing here is read from a global.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    #[serde(default = "default_frame_handler")]
    pub frame_handler: String,

    #[serde(default = "default_game_frame_buffer_size")]
    pub game_frame_buffer_size: usize,

    #[serde(default)]
    pub collect_frames_interval: Option<f64>,

    #[serde(default)]
    pub collect_character_interval: Option<f64>,

    #[serde(default)]
    pub collect_frames_for_context: ContextCollectionConfig,

    #[serde(default = "default_datasets_root")]
    pub datasets_root: PathBuf,
}

fn default_frame_handler() -> String {
    DEFAULT_FRAME_HANDLER.to_string()
}

fn default_game_frame_buffer_size() -> usize {
    DEFAULT_GAME_FRAME_BUFFER_SIZE
}

fn default_datasets_root() -> PathBuf {
    PathBuf::from(DEFAULT_DATASETS_ROOT)
}

fn default_context() -> String {
    DEFAULT_CONTEXT.to_string()
}

fn default_interval() -> f64 {
    DEFAULT_INTERVAL_SECONDS
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            frame_handler: default_frame_handler(),
            game_frame_buffer_size: default_game_frame_buffer_size(),
            collect_frames_interval: None,
            collect_character_interval: None,
            collect_frames_for_context: ContextCollectionConfig::default(),
            datasets_root: default_datasets_root(),
        }
    }
}

/// Options scoped to one agent type, found under `[<AgentName>Plugin]`.
#[derive(Debug, Clone, Default, Deserialize)]
struct AgentSection {
    frame_handler: Option<String>,
    game_frame_buffer_size: Option<usize>,
    collect_frames_interval: Option<f64>,
    collect_character_interval: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct FrameHandlersSection {
    #[serde(
        rename = "COLLECT_FRAMES_FOR_CONTEXT",
        alias = "collect_frames_for_context",
        default
    )]
    collect_frames_for_context: ContextCollectionConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RawSettings {
    #[serde(default)]
    frame_handlers: FrameHandlersSection,
    datasets_root: Option<PathBuf>,
    #[serde(flatten)]
    sections: HashMap<String, ::config::Value>,
}

impl AgentConfig {
    /// Reads the configuration of the agent called `agent_name` from a TOML
    /// file, overlaid with `GAME_AGENT__*` environment variables.
    pub fn load<P: AsRef<Path>>(path: P, agent_name: &str) -> GameAgentResult<Self> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix(ENVIRONMENT_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        Self::from_settings(settings, agent_name)
    }

    /// Like [`AgentConfig::load`] without a file; only the environment and
    /// defaults apply.
    pub fn from_environment(agent_name: &str) -> GameAgentResult<Self> {
        let settings = Config::builder()
            .add_source(
                Environment::with_prefix(ENVIRONMENT_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        Self::from_settings(settings, agent_name)
    }

    fn from_settings(settings: Config, agent_name: &str) -> GameAgentResult<Self> {
        let raw: RawSettings = settings.try_deserialize()?;
        let section_name = plugin_section_name(agent_name);
        let section = match raw
            .sections
            .into_iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(&section_name))
        {
            Some((_, value)) => value.try_deserialize::<AgentSection>()?,
            None => AgentSection::default(),
        };

        let defaults = Self::default();
        let config = Self {
            frame_handler: section.frame_handler.unwrap_or(defaults.frame_handler),
            game_frame_buffer_size: section
                .game_frame_buffer_size
                .unwrap_or(defaults.game_frame_buffer_size),
            collect_frames_interval: section.collect_frames_interval,
            collect_character_interval: section.collect_character_interval,
            collect_frames_for_context: raw.frame_handlers.collect_frames_for_context,
            datasets_root: raw.datasets_root.unwrap_or(defaults.datasets_root),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> GameAgentResult<()> {
        if self.game_frame_buffer_size == 0 {
            return GameAgentError::new_result(GameAgentErrorVariant::InvalidConfiguration(
                "game_frame_buffer_size must be at least 1".to_string(),
            ));
        }
        for (name, interval) in [
            ("collect_frames_interval", self.collect_frames_interval),
            ("collect_character_interval", self.collect_character_interval),
            ("interval", Some(self.collect_frames_for_context.interval)),
        ] {
            if let Some(seconds) = interval {
                seconds_to_duration(name, seconds)?;
            }
        }
        Ok(())
    }

    pub fn datasets(&self) -> DatasetPaths {
        DatasetPaths::new(self.datasets_root.clone())
    }

    pub fn collect_frames_interval(&self) -> GameAgentResult<Duration> {
        seconds_to_duration(
            "collect_frames_interval",
            interval_or_default(self.collect_frames_interval),
        )
    }

    pub fn collect_character_interval(&self) -> GameAgentResult<Duration> {
        seconds_to_duration(
            "collect_character_interval",
            interval_or_default(self.collect_character_interval),
        )
    }

    pub fn collect_frames_for_context_interval(&self) -> GameAgentResult<Duration> {
        seconds_to_duration("interval", self.collect_frames_for_context.interval)
    }
}

pub fn plugin_section_name(agent_name: &str) -> String {
    format!("{}Plugin", agent_name)
}

/// An unset or zero collection interval means the default interval.
fn interval_or_default(seconds: Option<f64>) -> f64 {
    match seconds {
        Some(seconds) if seconds != 0.0 => seconds,
        _ => DEFAULT_INTERVAL_SECONDS,
    }
}

fn seconds_to_duration(name: &str, seconds: f64) -> GameAgentResult<Duration> {
    Duration::try_from_secs_f64(seconds).map_err(|e| {
        GameAgentError::new(GameAgentErrorVariant::InvalidConfiguration(format!(
            "{} of {} seconds is not a valid interval: {}",
            name, seconds, e
        )))
    })
}
