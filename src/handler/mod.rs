pub mod builtin;
pub mod decorator;

pub use builtin::*;
pub use decorator::*;

use crate::*;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// The symbolic names that can be configured as an agent's `frame_handler`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FrameHandlerId {
    Noop,
    CollectFrames,
    CollectFramesForContext,
    CollectCharacters,
}

impl FrameHandlerId {
    pub const ALL: [FrameHandlerId; 4] = [
        FrameHandlerId::Noop,
        FrameHandlerId::CollectFrames,
        FrameHandlerId::CollectFramesForContext,
        FrameHandlerId::CollectCharacters,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FrameHandlerId::Noop => "NOOP",
            FrameHandlerId::CollectFrames => "COLLECT_FRAMES",
            FrameHandlerId::CollectFramesForContext => "COLLECT_FRAMES_FOR_CONTEXT",
            FrameHandlerId::CollectCharacters => "COLLECT_CHARACTERS",
        }
    }
}

impl fmt::Display for FrameHandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FrameHandlerId {
    type Err = GameAgentError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|id| id.as_str() == name)
            .copied()
            .ok_or_else(|| {
                GameAgentError::new(GameAgentErrorVariant::UnknownFrameHandler(
                    name.to_string(),
                ))
            })
    }
}

/// What a handler gets to see besides the frame itself.
pub struct HandlerContext<'a> {
    pub config: &'a AgentConfig,
    pub datasets: DatasetPaths,
    pub game_frame_buffer: &'a GameFrameBuffer,
    pub sprite_catalog: &'a SpriteCatalog,
    pub models: &'a ModelStore,
    pub token_preparer: &'a dyn TokenPreparer,
    pub sleeper: &'a dyn Sleeper,
}

pub trait FrameHandler {
    fn handle_frame(&mut self, context: &HandlerContext, frame: &GameFrame)
        -> GameAgentResult<()>;
}

impl<G> FrameHandler for G
where
    G: FnMut(&HandlerContext, &GameFrame) -> GameAgentResult<()>,
{
    fn handle_frame(
        &mut self,
        context: &HandlerContext,
        frame: &GameFrame,
    ) -> GameAgentResult<()> {
        self(context, frame)
    }
}

/// One-time preparation run before the first frame is dispatched.
pub trait FrameHandlerSetup {
    fn setup(&mut self, context: &HandlerContext) -> GameAgentResult<()>;
}

impl<G> FrameHandlerSetup for G
where
    G: FnMut(&HandlerContext) -> GameAgentResult<()>,
{
    fn setup(&mut self, context: &HandlerContext) -> GameAgentResult<()> {
        self(context)
    }
}

/// Maps handler names to the handler run for every frame and, for some of
/// them, a setup. An agent takes ownership of its registry when it is built
/// and never adds or removes entries afterwards.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<FrameHandlerId, Box<dyn FrameHandler>>,
    setups: HashMap<FrameHandlerId, Box<dyn FrameHandlerSetup>>,
}

impl HandlerRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        Self::empty()
            .with_handler(
                FrameHandlerId::Noop,
                Paced::new(handle_noop, noop_interval),
            )
            .with_handler(
                FrameHandlerId::CollectFrames,
                Paced::new(handle_collect_frames, AgentConfig::collect_frames_interval),
            )
            .with_handler(
                FrameHandlerId::CollectFramesForContext,
                Paced::new(
                    handle_collect_frames_for_context,
                    AgentConfig::collect_frames_for_context_interval,
                ),
            )
            .with_handler(
                FrameHandlerId::CollectCharacters,
                Paced::new(
                    handle_collect_characters,
                    AgentConfig::collect_character_interval,
                ),
            )
            .with_setup(
                FrameHandlerId::CollectFramesForContext,
                setup_collect_frames_for_context,
            )
    }

    pub fn with_handler<H: FrameHandler + 'static>(
        mut self,
        id: FrameHandlerId,
        handler: H,
    ) -> Self {
        self.handlers.insert(id, Box::new(handler));
        self
    }

    pub fn with_setup<S: FrameHandlerSetup + 'static>(
        mut self,
        id: FrameHandlerId,
        setup: S,
    ) -> Self {
        self.setups.insert(id, Box::new(setup));
        self
    }

    pub fn resolve(&mut self, name: &str) -> GameAgentResult<&mut dyn FrameHandler> {
        let id: FrameHandlerId = name.parse()?;
        match self.handlers.get_mut(&id) {
            Some(handler) => Ok(handler.as_mut()),
            None => GameAgentError::new_result(GameAgentErrorVariant::UnknownFrameHandler(
                name.to_string(),
            )),
        }
    }

    /// The setup registered for `name`. Unknown names have no setup.
    pub fn setup_for(&mut self, name: &str) -> Option<&mut (dyn FrameHandlerSetup + 'static)> {
        let id: FrameHandlerId = name.parse().ok()?;
        self.setups.get_mut(&id).map(|setup| setup.as_mut())
    }

    pub fn contains(&self, id: FrameHandlerId) -> bool {
        self.handlers.contains_key(&id)
    }

    pub fn has_setup(&self, id: FrameHandlerId) -> bool {
        self.setups.contains_key(&id)
    }

    pub fn ids(&self) -> Vec<FrameHandlerId> {
        let mut ids: Vec<_> = self.handlers.keys().copied().collect();
        ids.sort();
        ids
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut setups: Vec<_> = self.setups.keys().collect();
        setups.sort();
        f.debug_struct("HandlerRegistry")
            .field("handlers", &self.ids())
            .field("setups", &setups)
            .finish()
    }
}
