use crate::*;
use log::debug;

/// Sends input to the running game on behalf of an agent.
pub trait InputController {
    fn tap_key(&mut self, key: &str) -> GameAgentResult<()>;
    fn type_text(&mut self, text: &str) -> GameAgentResult<()>;
}

/// Controller that drops every input. Used when an agent only observes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullInputController;

impl InputController for NullInputController {
    fn tap_key(&mut self, key: &str) -> GameAgentResult<()> {
        debug!("Dropping key tap {:?}", key);
        Ok(())
    }

    fn type_text(&mut self, text: &str) -> GameAgentResult<()> {
        debug!("Dropping {} characters of typed text", text.len());
        Ok(())
    }
}
