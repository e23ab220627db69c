use std::backtrace::Backtrace;
use std::path::PathBuf;
use thiserror::Error;

/// [`ModelLoadFailure`] describes why a serialized model could not be turned
/// back into a value: either the file could not be read or its contents did
/// not decode.
#[derive(Error, Debug)]
pub enum ModelLoadFailure {
    #[error("could not read model file: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not decode model: {0}")]
    Decode(#[from] bincode::Error),
}

/// [`GameAgentErrorVariant`] is an enumeration of all the specific error
/// variants that can occur while an agent dispatches frames, runs handler
/// setup, writes datasets or loads models.
#[derive(Error, Debug)]
pub enum GameAgentErrorVariant {
    #[error("{0:?} is not a registered frame handler")]
    UnknownFrameHandler(String),

    #[error("Failed to load model from {path:?}: {source}")]
    ModelLoad {
        path: PathBuf,
        #[source]
        source: ModelLoadFailure,
    },

    #[error("Failed to save model to {path:?}: {source}")]
    ModelSave {
        path: PathBuf,
        #[source]
        source: ModelLoadFailure,
    },

    #[error("Dataset io error at {path:?}: {source}")]
    DatasetIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Image error at {path:?}: {source}")]
    ImageEncoding {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Frames with {0} channels can not be converted to an image")]
    UnsupportedChannelCount(usize),

    #[error("Frame of {width}x{height} is too small to downscale")]
    FrameTooSmall { width: usize, height: usize },

    #[error(transparent)]
    NDArrayShapeError(#[from] ::ndarray::ShapeError),

    #[error(transparent)]
    Config(#[from] ::config::ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Token preparation failed for frame {frame_uuid}: {reason}")]
    TokenPreparation { frame_uuid: String, reason: String },
}

/// [`GameAgentError`] struct provides an error variant
/// [`GameAgentErrorVariant`] along with its backtrace.
#[derive(Debug)]
pub struct GameAgentError {
    pub backtrace: Backtrace,
    pub variant: GameAgentErrorVariant,
}

impl GameAgentError {
    pub fn new(variant: GameAgentErrorVariant) -> Self {
        Self {
            backtrace: Backtrace::capture(),
            variant,
        }
    }

    pub fn new_result<T>(variant: GameAgentErrorVariant) -> Result<T, Self> {
        Err(Self::new(variant))
    }

    pub fn is_unknown_frame_handler(&self) -> bool {
        matches!(self.variant, GameAgentErrorVariant::UnknownFrameHandler(_))
    }

    pub fn is_model_load(&self) -> bool {
        matches!(self.variant, GameAgentErrorVariant::ModelLoad { .. })
    }
}

impl std::fmt::Display for GameAgentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.variant, f)
    }
}

impl std::error::Error for GameAgentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.variant.source()
    }
}

impl From<GameAgentErrorVariant> for GameAgentError {
    fn from(variant: GameAgentErrorVariant) -> Self {
        Self::new(variant)
    }
}

impl From<::ndarray::ShapeError> for GameAgentError {
    fn from(error: ::ndarray::ShapeError) -> Self {
        Self::new(error.into())
    }
}

impl From<::config::ConfigError> for GameAgentError {
    fn from(error: ::config::ConfigError) -> Self {
        Self::new(error.into())
    }
}

#[allow(clippy::result_large_err)]
pub type GameAgentResult<T> = Result<T, GameAgentError>;
