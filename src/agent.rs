use crate::*;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use std::path::Path;

/// State that handlers may read while a frame is dispatched. Kept apart from
/// the registry so that a handler can be borrowed mutably alongside it.
struct AgentState {
    config: AgentConfig,
    game_frame_buffer: GameFrameBuffer,
    sprite_catalog: SpriteCatalog,
    models: ModelStore,
    token_preparer: Box<dyn TokenPreparer>,
    sleeper: Box<dyn Sleeper>,
}

impl AgentState {
    fn handler_context(&self) -> HandlerContext<'_> {
        HandlerContext {
            config: &self.config,
            datasets: self.config.datasets(),
            game_frame_buffer: &self.game_frame_buffer,
            sprite_catalog: &self.sprite_catalog,
            models: &self.models,
            token_preparer: self.token_preparer.as_ref(),
            sleeper: self.sleeper.as_ref(),
        }
    }
}

/// A long lived agent that receives every frame of a running game and hands
/// it to the frame handler named in its configuration.
pub struct GameAgent {
    uuid: String,
    started_at: DateTime<Utc>,
    name: String,
    game: Box<dyn Game>,
    input_controller: Box<dyn InputController>,
    registry: HandlerRegistry,
    setup_performed: bool,
    state: AgentState,
}

impl GameAgent {
    pub fn builder<G: Game + 'static>(name: &str, game: G, config: AgentConfig) -> GameAgentBuilder {
        GameAgentBuilder::new(name, game, config)
    }

    /// Processes one frame. Frames must be dispatched one at a time.
    ///
    /// The first call runs the setup of the configured handler, if it has
    /// one. Setup is tracked per agent, not per handler: switching
    /// `frame_handler` later does not run the new handler's setup.
    ///
    /// Once a handler has been resolved the frame is added to the frame
    /// buffer whatever the handler returns. An unknown handler name or a
    /// failing setup returns before anything is buffered.
    pub fn dispatch(&mut self, frame: GameFrame) -> GameAgentResult<()> {
        if !self.setup_performed {
            self.setup_frame_handler()?;
        }

        let result = {
            let context = self.state.handler_context();
            let frame_handler = self.registry.resolve(&context.config.frame_handler)?;
            debug!(
                "Dispatching {}x{} frame captured at {} to {}",
                frame.width(),
                frame.height(),
                frame.timestamp(),
                context.config.frame_handler
            );
            let result = frame_handler.handle_frame(&context, &frame);
            if let Err(e) = &result {
                warn!(
                    "Frame handler {} failed, frame is still buffered: {}",
                    context.config.frame_handler, e
                );
            }
            result
        };

        self.state.game_frame_buffer.add_game_frame(frame);
        result
    }

    fn setup_frame_handler(&mut self) -> GameAgentResult<()> {
        let context = self.state.handler_context();
        if let Some(setup) = self.registry.setup_for(&context.config.frame_handler) {
            info!(
                "Running setup for frame handler {}",
                context.config.frame_handler
            );
            setup.setup(&context)?;
        }
        self.setup_performed = true;
        Ok(())
    }

    pub fn load_machine_learning_model<M: DeserializeOwned, P: AsRef<Path>>(
        &self,
        path: P,
    ) -> GameAgentResult<M> {
        ModelStore::load(path)
    }

    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn game(&self) -> &dyn Game {
        self.game.as_ref()
    }

    pub fn config(&self) -> &AgentConfig {
        &self.state.config
    }

    /// Changes take effect from the next dispatched frame.
    pub fn config_mut(&mut self) -> &mut AgentConfig {
        &mut self.state.config
    }

    pub fn setup_performed(&self) -> bool {
        self.setup_performed
    }

    pub fn game_frame_buffer(&self) -> &GameFrameBuffer {
        &self.state.game_frame_buffer
    }

    pub fn sprite_catalog(&self) -> &SpriteCatalog {
        &self.state.sprite_catalog
    }

    pub fn models(&self) -> &ModelStore {
        &self.state.models
    }

    pub fn models_mut(&mut self) -> &mut ModelStore {
        &mut self.state.models
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    pub fn input_controller_mut(&mut self) -> &mut dyn InputController {
        self.input_controller.as_mut()
    }
}

impl std::fmt::Debug for GameAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameAgent")
            .field("uuid", &self.uuid)
            .field("name", &self.name)
            .field("game", &self.game.name())
            .field("started_at", &self.started_at)
            .field("frame_handler", &self.state.config.frame_handler)
            .field("setup_performed", &self.setup_performed)
            .field("buffered_frames", &self.state.game_frame_buffer.len())
            .finish()
    }
}

pub struct GameAgentBuilder {
    name: String,
    game: Box<dyn Game>,
    config: AgentConfig,
    input_controller: Box<dyn InputController>,
    token_preparer: Box<dyn TokenPreparer>,
    sleeper: Box<dyn Sleeper>,
    registry: HandlerRegistry,
}

impl GameAgentBuilder {
    pub fn new<G: Game + 'static>(name: &str, game: G, config: AgentConfig) -> Self {
        Self {
            name: name.to_string(),
            game: Box::new(game),
            config,
            input_controller: Box::new(NullInputController),
            token_preparer: Box::new(NullTokenPreparer),
            sleeper: Box::new(ThreadSleeper),
            registry: HandlerRegistry::builtin(),
        }
    }

    pub fn input_controller<C: InputController + 'static>(mut self, input_controller: C) -> Self {
        self.input_controller = Box::new(input_controller);
        self
    }

    pub fn token_preparer<T: TokenPreparer + 'static>(mut self, token_preparer: T) -> Self {
        self.token_preparer = Box::new(token_preparer);
        self
    }

    pub fn sleeper<S: Sleeper + 'static>(mut self, sleeper: S) -> Self {
        self.sleeper = Box::new(sleeper);
        self
    }

    pub fn registry(mut self, registry: HandlerRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn build(self) -> GameAgentResult<GameAgent> {
        self.config.validate()?;

        let mut sprite_catalog = SpriteCatalog::new();
        for sprite in self.game.sprites().values() {
            sprite_catalog.register(sprite.clone());
        }

        let agent = GameAgent {
            uuid: uuid::Uuid::new_v4().to_string(),
            started_at: Utc::now(),
            name: self.name,
            input_controller: self.input_controller,
            registry: self.registry,
            setup_performed: false,
            state: AgentState {
                game_frame_buffer: GameFrameBuffer::new(self.config.game_frame_buffer_size),
                config: self.config,
                sprite_catalog,
                models: ModelStore::new(),
                token_preparer: self.token_preparer,
                sleeper: self.sleeper,
            },
            game: self.game,
        };
        info!(
            "Started agent {} ({}) for {} with {} sprites, frame handler {}",
            agent.name,
            agent.uuid,
            agent.game.name(),
            agent.state.sprite_catalog.len(),
            agent.state.config.frame_handler
        );
        Ok(agent)
    }
}
